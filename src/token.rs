//! Short-lived HS256 request tokens and response-token verification.
//!
//! Outbound calls made in production mode carry a token signed with the API secret whose
//! issuer is the application URL and whose audience is the API origin. Responses are expected
//! to embed a token minted the other way around (issuer = API origin, audience = application
//! URL); [`TokenValidator`] checks it and reports a [`ValidationOutcome`] that never fails the
//! call.

pub mod issuer;
pub mod validator;

pub use issuer::*;
pub use validator::*;

// self
use crate::_prelude::*;

/// Lifetime of every issued request token.
pub const TOKEN_LIFETIME: Duration = Duration::seconds(100);

/// Registered claims carried by request and response tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
	/// Issuer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub iss: Option<String>,
	/// Audience.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub aud: Option<String>,
	/// Issued-at (Unix seconds).
	pub iat: i64,
	/// Expiry (Unix seconds).
	pub exp: i64,
}
impl TokenClaims {
	/// Builds claims issued at `now` that expire after [`TOKEN_LIFETIME`].
	pub fn new(issuer: impl Into<String>, audience: impl Into<String>, now: OffsetDateTime) -> Self {
		let iat = now.unix_timestamp();

		Self {
			iss: Some(issuer.into()),
			aud: Some(audience.into()),
			iat,
			exp: (now + TOKEN_LIFETIME).unix_timestamp(),
		}
	}
}

/// Why a response token was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
	/// The response carried no token.
	MissingToken,
	/// Signature verification failed or the token expired.
	BadSignatureOrExpired,
	/// Issuer or audience differs from the expected pair.
	WrongIssuerOrAudience,
}
impl InvalidReason {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			InvalidReason::MissingToken => "missing_token",
			InvalidReason::BadSignatureOrExpired => "bad_signature_or_expired",
			InvalidReason::WrongIssuerOrAudience => "wrong_issuer_or_audience",
		}
	}

	/// Human-readable warning placed into envelope messages.
	pub const fn message(self) -> &'static str {
		match self {
			InvalidReason::MissingToken => "token could not be located.",
			InvalidReason::BadSignatureOrExpired => "token is invalid or expired.",
			InvalidReason::WrongIssuerOrAudience =>
				"token not originating from original issuer / audience.",
		}
	}
}
impl Display for InvalidReason {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.message())
	}
}

/// Result of verifying a response token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidationOutcome {
	/// Signature, expiry, issuer, and audience all check out.
	Valid,
	/// The token was absent or rejected.
	Invalid(InvalidReason),
}
impl ValidationOutcome {
	/// Returns `true` for [`ValidationOutcome::Valid`].
	pub const fn is_valid(self) -> bool {
		matches!(self, ValidationOutcome::Valid)
	}

	/// Returns the rejection reason, if any.
	pub const fn reason(self) -> Option<InvalidReason> {
		match self {
			ValidationOutcome::Valid => None,
			ValidationOutcome::Invalid(reason) => Some(reason),
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ValidationOutcome::Valid => "valid",
			ValidationOutcome::Invalid(reason) => reason.as_str(),
		}
	}
}
