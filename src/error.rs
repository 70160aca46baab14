//! Client-level error types shared by configuration, signing, and transport layers.
//!
//! Only failures the caller cannot recover from surface here. Upstream error responses, bodies
//! that fail to decode, and rejected response tokens are folded into
//! [`ResponseEnvelope`](crate::response::ResponseEnvelope) values instead.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure that produced no upstream response (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Configuration and validation failures raised while building or using the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required setting was not supplied.
	#[error("Missing required setting `{name}`.")]
	MissingSetting {
		/// Setting or environment variable name.
		name: &'static str,
	},
	/// A setting could not be interpreted.
	#[error("Setting `{name}` has an invalid value: {value}.")]
	InvalidSetting {
		/// Setting or environment variable name.
		name: &'static str,
		/// Offending raw value.
		value: String,
	},
	/// The API secret is empty; request tokens cannot be signed.
	#[error("API secret must not be empty.")]
	MissingSecret,
	/// Base REST URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base REST URL uses a scheme other than http or https.
	#[error("Base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Rejected URL.
		url: String,
	},
	/// Request path cannot be joined with the base URL.
	#[error("Request path `{path}` does not form a valid URL.")]
	InvalidRequestPath {
		/// Caller-supplied path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP verb is not one of GET/POST/PUT/PATCH/DELETE.
	#[error("Unsupported HTTP method `{method}`.")]
	UnsupportedMethod {
		/// Rejected verb.
		method: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Request token could not be signed.
	#[error("Request token could not be signed.")]
	TokenSigning {
		/// Signing primitive failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
impl From<jsonwebtoken::errors::Error> for ConfigError {
	fn from(e: jsonwebtoken::errors::Error) -> Self {
		Self::TokenSigning { source: e }
	}
}

/// Transport-level failures (network, timeout, IO) that carry no upstream response.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the REST endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded the configured timeout.
	#[error("Request timed out while calling the REST endpoint.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Transport rejected the request before sending it (bad header name, body, etc.).
	#[error("Request could not be constructed for the REST endpoint.")]
	InvalidRequest {
		/// Transport-specific builder error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the REST endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}

	/// Wraps a transport-specific request construction error.
	pub fn invalid_request(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::InvalidRequest { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_builder() {
			Self::invalid_request(e)
		} else if e.is_timeout() {
			Self::timeout(e)
		} else {
			Self::network(e)
		}
	}
}
