//! Request token issuance.

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
// self
use crate::{
	_prelude::*,
	config::ApiSecret,
	error::ConfigError,
	token::TokenClaims,
};

/// Signs short-lived request tokens on behalf of the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenIssuer {
	issuer: String,
}
impl TokenIssuer {
	/// Creates an issuer that stamps `issuer` (the application URL) into every token.
	pub fn new(issuer: impl Into<String>) -> Self {
		Self { issuer: issuer.into() }
	}

	/// Configured issuer claim.
	pub fn issuer(&self) -> &str {
		&self.issuer
	}

	/// Issues a token for `audience` and returns it keyed by `key_name`.
	pub fn issue(
		&self,
		audience: &str,
		secret: &ApiSecret,
		key_name: &str,
	) -> Result<BTreeMap<String, String>, ConfigError> {
		self.issue_at(OffsetDateTime::now_utc(), audience, secret, key_name)
	}

	/// Issues a token as if the current instant were `now`.
	pub fn issue_at(
		&self,
		now: OffsetDateTime,
		audience: &str,
		secret: &ApiSecret,
		key_name: &str,
	) -> Result<BTreeMap<String, String>, ConfigError> {
		let claims = TokenClaims::new(self.issuer.as_str(), audience, now);
		let token = sign(&claims, secret)?;

		Ok(BTreeMap::from([(key_name.to_owned(), token)]))
	}
}

/// Signs arbitrary claims with HS256.
pub fn sign(claims: &TokenClaims, secret: &ApiSecret) -> Result<String, ConfigError> {
	let key = EncodingKey::from_secret(secret.expose().as_bytes());

	Ok(jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &key)?)
}
