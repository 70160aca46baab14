//! Immutable client configuration shared by every call.
//!
//! A [`ClientConfig`] is assembled once (through [`ClientConfigBuilder`] or the environment
//! helpers) and then read concurrently by every request without locking.

/// Builder API and environment loading for client configurations.
pub mod builder;
/// Redacting wrapper for the API secret.
pub mod secret;

pub use builder::*;
pub use secret::*;

// std
use std::time::Duration as StdDuration;
// self
use crate::_prelude::*;

/// Default form/body field carrying the signed request token.
pub const DEFAULT_TOKEN_FIELD: &str = "token";

/// Deployment mode controlling whether request tokens are signed and response tokens verified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
	/// Sign outbound requests and verify response tokens.
	Production,
	/// Pre-production deployment; tokens are neither signed nor verified.
	Staging,
	#[default]
	/// Local development; tokens are neither signed nor verified.
	Development,
	/// Automated test runs; tokens are neither signed nor verified.
	Testing,
}
impl ExecutionMode {
	/// Returns a stable label suitable for config files, spans, and metrics.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExecutionMode::Production => "production",
			ExecutionMode::Staging => "staging",
			ExecutionMode::Development => "development",
			ExecutionMode::Testing => "testing",
		}
	}

	/// Returns `true` when token signing and verification are active.
	pub const fn is_production(self) -> bool {
		matches!(self, ExecutionMode::Production)
	}
}
impl Display for ExecutionMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ExecutionMode {
	type Err = crate::error::ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"production" | "prod" => Ok(Self::Production),
			"staging" => Ok(Self::Staging),
			"development" | "dev" | "local" => Ok(Self::Development),
			"testing" | "test" => Ok(Self::Testing),
			_ => Err(crate::error::ConfigError::InvalidSetting {
				name: "mode",
				value: s.to_owned(),
			}),
		}
	}
}

/// Immutable configuration consumed by [`RestClient`](crate::client::RestClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Base REST URL; request paths are appended to it.
	pub base_url: Url,
	/// API key injected into every query as `api_key`.
	pub api_key: String,
	/// API secret injected as `api_secret`; also the HMAC key for request/response tokens.
	pub api_secret: ApiSecret,
	/// Application URL used as the outbound token issuer and expected response audience.
	pub app_url: String,
	/// Form field (and response body field) carrying the signed token.
	pub token_field: String,
	/// Whether envelopes include upstream response headers.
	pub show_headers: bool,
	/// Deployment mode gating token signing and verification.
	pub mode: ExecutionMode,
	/// Optional per-request timeout forwarded to the transport.
	pub timeout: Option<StdDuration>,
}
impl ClientConfig {
	/// Creates a new builder.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::new()
	}

	/// Returns the API origin (`scheme://host[:port]`), used as the outbound token audience.
	pub fn api_origin(&self) -> String {
		self.base_url.origin().ascii_serialization()
	}

	/// Appends `path` to the base URL.
	///
	/// The base URL's path is preserved, so `https://api.example.com/v2` joined with `/users`
	/// yields `https://api.example.com/v2/users`.
	pub fn request_url(&self, path: &str) -> Result<Url, crate::error::ConfigError> {
		let base = self.base_url.as_str().trim_end_matches('/');
		let path = path.trim_start_matches('/');
		let joined = if path.is_empty() { base.to_owned() } else { format!("{base}/{path}") };

		Url::parse(&joined).map_err(|source| crate::error::ConfigError::InvalidRequestPath {
			path: path.to_owned(),
			source,
		})
	}

	/// Joins `path` like [`request_url`](Self::request_url) and moves any query it carried out of
	/// the URL, so the caller can merge those pairs with the other query parameters.
	pub fn request_target(
		&self,
		path: &str,
	) -> Result<(Url, Vec<(String, String)>), crate::error::ConfigError> {
		let mut url = self.request_url(path)?;
		let pairs = url.query_pairs().into_owned().collect();

		url.set_query(None);
		url.set_fragment(None);

		Ok((url, pairs))
	}
}
