//! Client facade that assembles, signs, dispatches, and normalizes REST calls.
//!
//! [`RestClient`] owns an immutable [`ClientConfig`] and a transport handle. Every call builds
//! its own parameter set, so a client can be cloned or shared across tasks without locking.
//! In production mode outbound calls carry a signed request token and response tokens are
//! verified; other modes skip both steps.

// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	config::ClientConfig,
	http::{Method, RestTransport, TransportFailure, TransportRequest},
	obs::{self, RequestOutcome, RequestSpan},
	pagination::PageRequest,
	params::{Fragment, ParamBuilder},
	response::{ResponseEnvelope, ResponseNormalizer},
	token::{TokenIssuer, TokenValidator},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestRestClient = RestClient<ReqwestTransport>;

/// Signed REST client bound to one API.
#[derive(Clone)]
pub struct RestClient<C>
where
	C: ?Sized + RestTransport,
{
	/// Transport used for every outbound call.
	pub transport: Arc<C>,
	config: Arc<ClientConfig>,
	issuer: TokenIssuer,
	normalizer: ResponseNormalizer,
}
impl<C> RestClient<C>
where
	C: ?Sized + RestTransport,
{
	/// Creates a client that dispatches through the caller-provided transport.
	pub fn with_transport(config: ClientConfig, transport: impl Into<Arc<C>>) -> Self {
		let issuer = TokenIssuer::new(config.app_url.as_str());
		let mut normalizer = ResponseNormalizer::new(config.token_field.as_str())
			.with_show_headers(config.show_headers);

		if config.mode.is_production() {
			normalizer = normalizer.with_validator(TokenValidator::new(
				config.api_origin(),
				config.app_url.as_str(),
				config.api_secret.clone(),
			));
		}

		Self { transport: transport.into(), config: Arc::new(config), issuer, normalizer }
	}

	/// Overrides the timeout forwarded to the transport for every call.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		Arc::make_mut(&mut self.config).timeout = Some(timeout);

		self
	}

	/// Active configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Performs one call and normalizes the upstream response.
	///
	/// Parameters are assembled in a fixed order: credentials, then any query carried by `path`,
	/// then `pagination` (when given), then `fragment`. Upstream error statuses and undecodable
	/// bodies resolve to [`ResponseEnvelope::Error`]; only configuration problems and transport
	/// failures that produced no response are returned as `Err`.
	pub async fn do_request(
		&self,
		method: Method,
		path: &str,
		fragment: Fragment,
		pagination: Option<PageRequest>,
	) -> Result<ResponseEnvelope> {
		let span = RequestSpan::new(method, "do_request");

		obs::record_request_outcome(method, RequestOutcome::Attempt);

		let result = span
			.instrument(async move {
				let (url, path_query) = self.config.request_target(path)?;
				let mut builder =
					ParamBuilder::new(self.config.api_key.as_str(), &self.config.api_secret)
						.query(path_query);

				if let Some(page) = pagination {
					builder = builder.query(page.query_pairs());
				}

				builder = builder.apply(fragment);

				if self.config.mode.is_production() {
					let token = self.issuer.issue(
						&self.config.api_origin(),
						&self.config.api_secret,
						&self.config.token_field,
					)?;

					builder = builder.form_params(token);
				}

				let link_url = link_url(&url, builder.redacted_query());
				let request = TransportRequest {
					method,
					url,
					descriptor: builder.build(),
					timeout: self.config.timeout,
				};
				let raw = match self.transport.call(request).await {
					Ok(raw) => raw,
					Err(TransportFailure::Response { response }) => response,
					Err(TransportFailure::Transport(e)) => return Err(e.into()),
				};

				Ok(self.normalizer.normalize(&raw, Some(&link_url)))
			})
			.await;

		match &result {
			Ok(envelope) => obs::record_request_outcome(method, RequestOutcome::of(envelope)),
			Err(_) => obs::record_request_outcome(method, RequestOutcome::Failure),
		}

		result
	}

	/// Shorthand for [`do_request`](Self::do_request) with [`Method::Get`].
	pub async fn get(
		&self,
		path: &str,
		fragment: Fragment,
		pagination: Option<PageRequest>,
	) -> Result<ResponseEnvelope> {
		self.do_request(Method::Get, path, fragment, pagination).await
	}

	/// Shorthand for [`do_request`](Self::do_request) with [`Method::Post`].
	pub async fn post(&self, path: &str, fragment: Fragment) -> Result<ResponseEnvelope> {
		self.do_request(Method::Post, path, fragment, None).await
	}

	/// Shorthand for [`do_request`](Self::do_request) with [`Method::Put`].
	pub async fn put(&self, path: &str, fragment: Fragment) -> Result<ResponseEnvelope> {
		self.do_request(Method::Put, path, fragment, None).await
	}

	/// Shorthand for [`do_request`](Self::do_request) with [`Method::Patch`].
	pub async fn patch(&self, path: &str, fragment: Fragment) -> Result<ResponseEnvelope> {
		self.do_request(Method::Patch, path, fragment, None).await
	}

	/// Shorthand for [`do_request`](Self::do_request) with [`Method::Delete`].
	pub async fn delete(&self, path: &str, fragment: Fragment) -> Result<ResponseEnvelope> {
		self.do_request(Method::Delete, path, fragment, None).await
	}
}
#[cfg(feature = "reqwest")]
impl RestClient<ReqwestTransport> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: ClientConfig) -> Self {
		Self::with_transport(config, ReqwestTransport::default())
	}
}
impl<C> Debug for RestClient<C>
where
	C: ?Sized + RestTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RestClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("api_key", &self.config.api_key)
			.field("mode", &self.config.mode)
			.field("validates_responses", &self.config.mode.is_production())
			.finish()
	}
}

/// Request URL with credentials stripped, used as the base for pagination links.
fn link_url(url: &Url, redacted_query: BTreeMap<String, String>) -> Url {
	let mut link = url.clone();

	if !redacted_query.is_empty() {
		link.query_pairs_mut().extend_pairs(redacted_query);
	}

	link
}
