//! Response token verification.

// crates.io
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
// self
use crate::{
	_prelude::*,
	config::ApiSecret,
	token::{InvalidReason, TokenClaims, ValidationOutcome},
};

/// Verifies response tokens against an expected issuer/audience pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenValidator {
	expected_issuer: String,
	expected_audience: String,
	secret: ApiSecret,
}
impl TokenValidator {
	/// Creates a validator for tokens issued by `expected_issuer` for `expected_audience`.
	pub fn new(
		expected_issuer: impl Into<String>,
		expected_audience: impl Into<String>,
		secret: ApiSecret,
	) -> Self {
		Self {
			expected_issuer: expected_issuer.into(),
			expected_audience: expected_audience.into(),
			secret,
		}
	}

	/// Expected issuer claim.
	pub fn expected_issuer(&self) -> &str {
		&self.expected_issuer
	}

	/// Expected audience claim.
	pub fn expected_audience(&self) -> &str {
		&self.expected_audience
	}

	/// Checks presence, then signature and expiry, then issuer and audience.
	pub fn validate(&self, token: Option<&str>) -> ValidationOutcome {
		validate_token(token, &self.expected_issuer, &self.expected_audience, &self.secret)
	}
}

/// Verifies `token` and classifies the first failing check.
pub fn validate_token(
	token: Option<&str>,
	expected_issuer: &str,
	expected_audience: &str,
	secret: &ApiSecret,
) -> ValidationOutcome {
	let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) else {
		return ValidationOutcome::Invalid(InvalidReason::MissingToken);
	};
	let key = DecodingKey::from_secret(secret.expose().as_bytes());
	let mut validation = Validation::new(Algorithm::HS256);

	// Issuer and audience are checked separately below.
	validation.validate_aud = false;
	validation.leeway = 0;
	validation.set_required_spec_claims(&["exp"]);

	let claims = match jsonwebtoken::decode::<TokenClaims>(token, &key, &validation) {
		Ok(data) => data.claims,
		Err(_) => return ValidationOutcome::Invalid(InvalidReason::BadSignatureOrExpired),
	};

	if claims.iss.as_deref() != Some(expected_issuer)
		|| claims.aud.as_deref() != Some(expected_audience)
	{
		return ValidationOutcome::Invalid(InvalidReason::WrongIssuerOrAudience);
	}

	ValidationOutcome::Valid
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::token::{TokenIssuer, sign};

	const APP: &str = "https://app.example.com";
	const API: &str = "https://api.example.com";

	fn secret() -> ApiSecret {
		ApiSecret::new("shared-secret")
	}

	fn issue(issuer: &str, audience: &str, at: OffsetDateTime, secret: &ApiSecret) -> String {
		TokenIssuer::new(issuer)
			.issue_at(at, audience, secret, "token")
			.expect("Signing should succeed.")
			.remove("token")
			.expect("Token should be keyed by name.")
	}

	#[test]
	fn issued_token_round_trips_as_valid() {
		let token = issue(APP, API, OffsetDateTime::now_utc(), &secret());
		let outcome = validate_token(Some(&token), APP, API, &secret());

		assert_eq!(outcome, ValidationOutcome::Valid);
		assert!(outcome.is_valid());
		assert_eq!(outcome.reason(), None);
	}

	#[test]
	fn absent_or_empty_token_is_missing() {
		let validator = TokenValidator::new(APP, API, secret());

		assert_eq!(validator.validate(None), ValidationOutcome::Invalid(InvalidReason::MissingToken));
		assert!(!validator.validate(None).is_valid());
		assert_eq!((validator.expected_issuer(), validator.expected_audience()), (APP, API));
		assert_eq!(
			validator.validate(Some("  ")),
			ValidationOutcome::Invalid(InvalidReason::MissingToken)
		);
	}

	#[test]
	fn foreign_secret_and_spliced_signature_are_rejected() {
		let validator = TokenValidator::new(APP, API, secret());
		let now = OffsetDateTime::now_utc();
		let foreign = issue(APP, API, now, &ApiSecret::new("other-secret"));

		assert_eq!(
			validator.validate(Some(&foreign)),
			ValidationOutcome::Invalid(InvalidReason::BadSignatureOrExpired)
		);

		let genuine = issue(APP, API, now, &secret());
		let other = issue(APP, "https://elsewhere.example.com", now, &secret());
		let (genuine_body, _) = genuine.rsplit_once('.').expect("Token should have a signature.");
		let (_, other_signature) = other.rsplit_once('.').expect("Token should have a signature.");
		let spliced = format!("{genuine_body}.{other_signature}");

		assert_eq!(
			validator.validate(Some(&spliced)),
			ValidationOutcome::Invalid(InvalidReason::BadSignatureOrExpired)
		);
		assert_eq!(
			validator.validate(Some("not-a-jwt")),
			ValidationOutcome::Invalid(InvalidReason::BadSignatureOrExpired)
		);
	}

	#[test]
	fn expired_token_is_rejected() {
		let validator = TokenValidator::new(APP, API, secret());
		let token = issue(APP, API, OffsetDateTime::now_utc() - Duration::seconds(200), &secret());

		assert_eq!(
			validator.validate(Some(&token)),
			ValidationOutcome::Invalid(InvalidReason::BadSignatureOrExpired)
		);
	}

	#[test]
	fn swapped_or_missing_claims_are_wrong_issuer_or_audience() {
		let validator = TokenValidator::new(APP, API, secret());
		let swapped = issue(API, APP, OffsetDateTime::now_utc(), &secret());

		assert_eq!(
			validator.validate(Some(&swapped)),
			ValidationOutcome::Invalid(InvalidReason::WrongIssuerOrAudience)
		);

		let now = OffsetDateTime::now_utc();
		let mut claims = TokenClaims::new(APP, API, now);

		claims.aud = None;

		let anonymous = sign(&claims, &secret()).expect("Signing should succeed.");

		assert_eq!(
			validator.validate(Some(&anonymous)),
			ValidationOutcome::Invalid(InvalidReason::WrongIssuerOrAudience)
		);
	}
}
