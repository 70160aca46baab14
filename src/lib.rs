//! Signed REST client: deterministic parameter assembly, short-lived HS256 request tokens, and
//! normalized response envelopes with sliding pagination links.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod pagination;
pub mod params;
pub mod response;
pub mod token;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::RestClient,
		config::{ClientConfig, ExecutionMode},
		http::ReqwestTransport,
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = RestClient<ReqwestTransport>;

	/// API key shared by test configurations.
	pub const TEST_API_KEY: &str = "test-key";
	/// API secret shared by test configurations; also signs request and response tokens.
	pub const TEST_API_SECRET: &str = "test-secret-with-enough-entropy";
	/// Application URL used as the outbound token issuer.
	pub const TEST_APP_URL: &str = "https://app.example.com";

	/// Builds a configuration pointing at `base_url` with the shared test credentials.
	pub fn test_config(base_url: &str, mode: ExecutionMode) -> ClientConfig {
		ClientConfig::builder()
			.base_url(Url::parse(base_url).expect("Failed to parse test base URL."))
			.credentials(TEST_API_KEY, TEST_API_SECRET)
			.app_url(TEST_APP_URL)
			.mode(mode)
			.build()
			.expect("Failed to build test client configuration.")
	}

	/// Constructs a [`RestClient`] backed by the default reqwest transport.
	pub fn build_reqwest_test_client(base_url: &str, mode: ExecutionMode) -> ReqwestTestClient {
		RestClient::new(test_config(base_url, mode))
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _, tokio as _};
