//! Transport primitives for signed REST calls.
//!
//! The module exposes [`RestTransport`], the client's only dependency on an HTTP stack, along
//! with the request/response records that cross it. Implementations receive a fully assembled
//! [`TransportRequest`] and report either a [`RawResponse`] or a [`TransportFailure`]. Stacks that
//! surface 4xx/5xx statuses as errors should return [`TransportFailure::Response`] so the client
//! can still normalize the upstream body; failures without any response use
//! [`TransportFailure::Transport`] and are propagated to the caller.

// std
use std::{ops::Deref, time::Duration as StdDuration};
// self
use crate::{_prelude::*, error::TransportError, params::RequestDescriptor};
#[cfg(feature = "reqwest")]
use crate::params::{MultipartPart, PartContents};

/// Boxed future returned by [`RestTransport::call`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportFailure>> + 'a + Send>>;

/// HTTP verbs supported by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `PATCH`.
	Patch,
	/// `DELETE`.
	Delete,
}
impl Method {
	/// Returns the lowercase verb, suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "get",
			Method::Post => "post",
			Method::Put => "put",
			Method::Patch => "patch",
			Method::Delete => "delete",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Method {
	type Err = crate::error::ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"get" => Ok(Self::Get),
			"post" => Ok(Self::Post),
			"put" => Ok(Self::Put),
			"patch" => Ok(Self::Patch),
			"delete" => Ok(Self::Delete),
			_ => Err(crate::error::ConfigError::UnsupportedMethod { method: s.to_owned() }),
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<Method> for reqwest::Method {
	fn from(method: Method) -> Self {
		match method {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Put => reqwest::Method::PUT,
			Method::Patch => reqwest::Method::PATCH,
			Method::Delete => reqwest::Method::DELETE,
		}
	}
}

/// Fully assembled outbound call handed to a [`RestTransport`].
#[derive(Clone, Debug)]
pub struct TransportRequest {
	/// HTTP verb.
	pub method: Method,
	/// Target URL without the descriptor's query parameters.
	pub url: Url,
	/// Query, header, form, and multipart buckets.
	pub descriptor: RequestDescriptor,
	/// Optional deadline for the whole exchange.
	pub timeout: Option<StdDuration>,
}

/// Status, headers, and body of an upstream response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code; `0` when the transport could not determine one.
	pub status: u16,
	/// Status reason phrase reported by the transport.
	pub reason: Option<String>,
	/// Response headers; repeated headers keep every value.
	pub headers: BTreeMap<String, Vec<String>>,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Creates a response with the provided status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into(), ..Default::default() }
	}

	/// Sets the reason phrase.
	pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
		self.reason = Some(reason.into());

		self
	}

	/// Appends a header value.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.entry(name.into()).or_default().push(value.into());

		self
	}

	/// Reason phrase, falling back to `HTTP <status>` when the transport supplied none.
	pub fn reason_phrase(&self) -> String {
		self.reason
			.as_deref()
			.filter(|reason| !reason.is_empty())
			.map(str::to_owned)
			.unwrap_or_else(|| format!("HTTP {}", self.status))
	}
}

/// Failure reported by a [`RestTransport`].
#[derive(Debug, ThisError)]
pub enum TransportFailure {
	/// The transport raised an error but still captured the upstream response.
	#[error("Upstream responded with HTTP status {}.", .response.status)]
	Response {
		/// Captured upstream response.
		response: RawResponse,
	},
	/// No response was received.
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Abstraction over HTTP stacks able to execute one assembled REST call.
///
/// Implementations must be `Send + Sync + 'static` so a client can be shared across tasks, and
/// the returned future must be `Send`. Retries, pooling, and TLS belong to the implementation;
/// the client calls [`call`](RestTransport::call) exactly once per request.
pub trait RestTransport
where
	Self: 'static + Send + Sync,
{
	/// Dispatches `request` and resolves with the upstream response.
	fn call(&self, request: TransportRequest) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Every status code resolves to `Ok`; only failures without a response become errors.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a dedicated reqwest client whose requests default to `timeout`.
	pub fn with_timeout(timeout: StdDuration) -> Result<Self, crate::error::ConfigError> {
		Ok(Self(ReqwestClient::builder().timeout(timeout).build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl RestTransport for ReqwestTransport {
	fn call(&self, request: TransportRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let TransportRequest { method, url, descriptor, timeout } = request;
			let mut builder = client.request(method.into(), url).query(descriptor.query());

			for (name, value) in descriptor.headers() {
				builder = builder.header(name.as_str(), value.as_str());
			}

			if !descriptor.multipart().is_empty() {
				builder = builder.multipart(multipart_form(&descriptor));
			} else if !descriptor.form_params().is_empty() {
				builder = builder.form(descriptor.form_params());
			}
			if let Some(timeout) = timeout {
				builder = builder.timeout(timeout);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status();
			let headers = collect_headers(response.headers());
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(RawResponse {
				status: status.as_u16(),
				reason: status.canonical_reason().map(str::to_owned),
				headers,
				body,
			})
		})
	}
}

/// Form params travel as text parts when a request also carries multipart fields.
#[cfg(feature = "reqwest")]
fn multipart_form(descriptor: &RequestDescriptor) -> reqwest::multipart::Form {
	let mut form = reqwest::multipart::Form::new();

	for (name, value) in descriptor.form_params() {
		form = form.text(name.clone(), value.clone());
	}
	for MultipartPart { name, contents, filename } in descriptor.multipart().iter().cloned() {
		let part = match contents {
			PartContents::Text(text) => reqwest::multipart::Part::text(text),
			PartContents::Bytes(bytes) => reqwest::multipart::Part::bytes(bytes),
		};
		let part = match filename {
			Some(filename) => part.file_name(filename),
			None => part,
		};

		form = form.part(name, part);
	}

	form
}

#[cfg(feature = "reqwest")]
fn collect_headers(headers: &reqwest::header::HeaderMap) -> BTreeMap<String, Vec<String>> {
	let mut collected = BTreeMap::<String, Vec<String>>::new();

	for (name, value) in headers {
		let value = String::from_utf8_lossy(value.as_bytes()).into_owned();

		collected.entry(name.as_str().to_owned()).or_default().push(value);
	}

	collected
}
