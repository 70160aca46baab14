//! Demonstrates plugging a non-reqwest transport into [`RestClient`].
//!
//! 1. Implement [`RestTransport`] and return [`RawResponse`] values for every status.
//! 2. Report stack-level errors that still captured a response as
//!    [`TransportFailure::Response`] so the client normalizes them.
//! 3. Report failures without a response as [`TransportFailure::Transport`]; the client returns
//!    them as `Err`.

// std
use std::io::{Error as IoError, ErrorKind};
// crates.io
use color_eyre::Result;
use serde_json::json;
use url::Url;
// self
use signed_rest::{
	client::RestClient,
	config::{ClientConfig, ExecutionMode},
	error::TransportError,
	http::{RawResponse, RestTransport, TransportFailure, TransportFuture, TransportRequest},
	params::Fragment,
};

/// Canned transport that answers by path instead of touching the network.
#[derive(Debug, Default)]
struct CannedTransport;
impl RestTransport for CannedTransport {
	fn call(&self, request: TransportRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			match request.url.path() {
				"/ok" => Ok(RawResponse::new(
					200,
					json!({ "data": { "method": request.method.as_str() } }).to_string(),
				)),
				"/throttled" => Err(TransportFailure::Response {
					response: RawResponse::new(429, json!({ "messages": "slow down" }).to_string())
						.with_reason("Too Many Requests"),
				}),
				_ => Err(TransportFailure::Transport(TransportError::network(IoError::new(
					ErrorKind::NotConnected,
					"no route to canned host",
				)))),
			}
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::builder()
		.base_url(Url::parse("https://api.example.com")?)
		.credentials("demo-key", "demo-secret")
		.mode(ExecutionMode::Development)
		.build()?;
	let client = RestClient::<CannedTransport>::with_transport(config, CannedTransport);
	let ok = client.post("/ok", Fragment::new().form_param("name", "demo")).await?;
	let throttled = client.get("/throttled", Fragment::new(), None).await?;

	println!("Success envelope: {}.", serde_json::to_string(&ok)?);
	println!("Normalized failure: {}.", serde_json::to_string(&throttled)?);

	match client.get("/offline", Fragment::new(), None).await {
		Ok(envelope) => println!("Unexpected envelope: {envelope:?}."),
		Err(e) => println!("Transport failure surfaced to the caller: {e}."),
	}

	Ok(())
}
