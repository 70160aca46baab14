// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	config::{ApiSecret, ClientConfig, DEFAULT_TOKEN_FIELD, ExecutionMode},
	error::ConfigError,
};

/// Environment variable holding the base REST URL.
pub const ENV_URL: &str = "SIGNED_REST_URL";
/// Environment variable holding the API key.
pub const ENV_KEY: &str = "SIGNED_REST_KEY";
/// Environment variable holding the API secret.
pub const ENV_SECRET: &str = "SIGNED_REST_SECRET";
/// Environment variable toggling header capture (`true`/`false`/`1`/`0`).
pub const ENV_SHOW_HEADERS: &str = "SIGNED_REST_SHOW_HEADERS";
/// Environment variable overriding the token field name.
pub const ENV_TOKEN_FIELD: &str = "SIGNED_REST_TOKEN_FIELD";
/// Environment variable holding the application URL (token issuer).
pub const ENV_APP_URL: &str = "SIGNED_REST_APP_URL";
/// Environment variable holding the execution mode.
pub const ENV_MODE: &str = "SIGNED_REST_MODE";
/// Environment variable holding the request timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "SIGNED_REST_TIMEOUT_SECS";

/// Builder for [`ClientConfig`] values.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	/// Base REST URL.
	pub base_url: Option<Url>,
	/// API key.
	pub api_key: Option<String>,
	/// API secret.
	pub api_secret: Option<ApiSecret>,
	/// Application URL; defaults to an empty issuer when unset.
	pub app_url: Option<String>,
	/// Token field name; defaults to [`DEFAULT_TOKEN_FIELD`].
	pub token_field: Option<String>,
	/// Header capture flag.
	pub show_headers: bool,
	/// Execution mode.
	pub mode: ExecutionMode,
	/// Optional request timeout.
	pub timeout: Option<StdDuration>,
}
impl ClientConfigBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the base REST URL.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Sets the API key and secret pair.
	pub fn credentials(mut self, key: impl Into<String>, secret: impl Into<ApiSecret>) -> Self {
		self.api_key = Some(key.into());
		self.api_secret = Some(secret.into());

		self
	}

	/// Sets the application URL used as token issuer.
	pub fn app_url(mut self, url: impl Into<String>) -> Self {
		self.app_url = Some(url.into());

		self
	}

	/// Overrides the token field name.
	pub fn token_field(mut self, field: impl Into<String>) -> Self {
		self.token_field = Some(field.into());

		self
	}

	/// Toggles header capture in envelopes.
	pub fn show_headers(mut self, show: bool) -> Self {
		self.show_headers = show;

		self
	}

	/// Overrides the execution mode.
	pub fn mode(mut self, mode: ExecutionMode) -> Self {
		self.mode = mode;

		self
	}

	/// Sets the per-request timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let base_url = self.base_url.ok_or(ConfigError::MissingSetting { name: "base_url" })?;
		let api_key = self.api_key.ok_or(ConfigError::MissingSetting { name: "api_key" })?;
		let api_secret = self.api_secret.ok_or(ConfigError::MissingSecret)?;
		let token_field = self.token_field.unwrap_or_else(|| DEFAULT_TOKEN_FIELD.to_owned());
		let config = ClientConfig {
			base_url,
			api_key,
			api_secret,
			app_url: self.app_url.unwrap_or_default(),
			token_field,
			show_headers: self.show_headers,
			mode: self.mode,
			timeout: self.timeout,
		};

		config.validate()?;

		Ok(config)
	}
}

impl ClientConfig {
	/// Loads a configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Loads a configuration through an arbitrary variable lookup.
	///
	/// Empty values are treated as unset.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
		let raw_url = get(ENV_URL).ok_or(ConfigError::MissingSetting { name: ENV_URL })?;
		let base_url =
			Url::parse(&raw_url).map_err(|source| ConfigError::InvalidBaseUrl { source })?;
		let key = get(ENV_KEY).ok_or(ConfigError::MissingSetting { name: ENV_KEY })?;
		let secret = get(ENV_SECRET).ok_or(ConfigError::MissingSecret)?;
		let mut builder = ClientConfigBuilder::new().base_url(base_url).credentials(key, secret);

		if let Some(raw) = get(ENV_SHOW_HEADERS) {
			builder = builder.show_headers(parse_flag(ENV_SHOW_HEADERS, &raw)?);
		}
		if let Some(field) = get(ENV_TOKEN_FIELD) {
			builder = builder.token_field(field);
		}
		if let Some(app_url) = get(ENV_APP_URL) {
			builder = builder.app_url(app_url);
		}
		if let Some(raw) = get(ENV_MODE) {
			builder = builder.mode(raw.parse().map_err(|_| ConfigError::InvalidSetting {
				name: ENV_MODE,
				value: raw.clone(),
			})?);
		}
		if let Some(raw) = get(ENV_TIMEOUT_SECS) {
			let secs = raw
				.trim()
				.parse::<u64>()
				.map_err(|_| ConfigError::InvalidSetting { name: ENV_TIMEOUT_SECS, value: raw })?;

			builder = builder.timeout(StdDuration::from_secs(secs));
		}

		builder.build()
	}

	/// Validates invariants for the configuration.
	fn validate(&self) -> Result<(), ConfigError> {
		if !matches!(self.base_url.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedScheme { url: self.base_url.to_string() });
		}
		if self.base_url.host_str().is_none() {
			return Err(ConfigError::InvalidSetting {
				name: "base_url",
				value: self.base_url.to_string(),
			});
		}
		if self.api_key.is_empty() {
			return Err(ConfigError::MissingSetting { name: "api_key" });
		}
		if self.api_secret.is_empty() {
			return Err(ConfigError::MissingSecret);
		}
		if self.token_field.trim().is_empty() {
			return Err(ConfigError::InvalidSetting {
				name: "token_field",
				value: self.token_field.clone(),
			});
		}
		if self.mode.is_production() && self.app_url.is_empty() {
			return Err(ConfigError::MissingSetting { name: "app_url" });
		}

		Ok(())
	}
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		_ => Err(ConfigError::InvalidSetting { name, value: raw.to_owned() }),
	}
}
