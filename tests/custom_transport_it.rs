// std
use std::{sync::Mutex, time::Duration as StdDuration};
// crates.io
use serde_json::json;
use url::Url;
// self
use signed_rest::{
	client::RestClient,
	config::{ClientConfig, ExecutionMode},
	error::{Error, TransportError},
	http::{Method, RawResponse, RestTransport, TransportFailure, TransportFuture, TransportRequest},
	params::Fragment,
};

enum Script {
	Respond(RawResponse),
	FailWithResponse(RawResponse),
	FailWithoutResponse,
}

struct FakeTransport {
	script: Mutex<Vec<Script>>,
	seen: Mutex<Vec<(Method, Url, Option<StdDuration>)>>,
}
impl FakeTransport {
	fn scripted(script: Vec<Script>) -> Self {
		Self { script: Mutex::new(script), seen: Mutex::new(Vec::new()) }
	}

	fn seen(&self) -> Vec<(Method, Url, Option<StdDuration>)> {
		self.seen.lock().expect("Seen lock should not be poisoned.").clone()
	}
}
impl RestTransport for FakeTransport {
	fn call(&self, request: TransportRequest) -> TransportFuture<'_> {
		self.seen
			.lock()
			.expect("Seen lock should not be poisoned.")
			.push((request.method, request.url.clone(), request.timeout));

		let next = self.script.lock().expect("Script lock should not be poisoned.").remove(0);

		Box::pin(async move {
			match next {
				Script::Respond(response) => Ok(response),
				Script::FailWithResponse(response) => Err(TransportFailure::Response { response }),
				Script::FailWithoutResponse => Err(TransportFailure::Transport(
					TransportError::network(std::io::Error::new(
						std::io::ErrorKind::ConnectionRefused,
						"connection refused",
					)),
				)),
			}
		})
	}
}

fn config() -> ClientConfig {
	ClientConfig::builder()
		.base_url(Url::parse("https://api.example.com").expect("Base URL should parse."))
		.credentials("key", "secret")
		.mode(ExecutionMode::Staging)
		.build()
		.expect("Configuration should be valid.")
}

#[tokio::test]
async fn failures_with_responses_are_normalized() {
	let transport = FakeTransport::scripted(vec![Script::FailWithResponse(
		RawResponse::new(503, json!({ "error": "maintenance" }).to_string())
			.with_reason("Service Unavailable"),
	)]);
	let client = RestClient::<FakeTransport>::with_transport(config(), transport);
	let envelope = client
		.get("/status", Fragment::new(), None)
		.await
		.expect("Failures carrying a response should still resolve to an envelope.");

	assert_eq!(envelope.status(), 503);
	assert_eq!(envelope.as_error().map(|error| &error.error), Some(&json!("maintenance")));
}

#[tokio::test]
async fn failures_without_responses_are_propagated() {
	let transport = FakeTransport::scripted(vec![Script::FailWithoutResponse]);
	let client = RestClient::<FakeTransport>::with_transport(config(), transport);
	let err = client
		.get("/status", Fragment::new(), None)
		.await
		.expect_err("Failures without a response should surface as errors.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
}

#[tokio::test]
async fn timeout_and_request_url_reach_the_transport() {
	let transport = FakeTransport::scripted(vec![Script::Respond(RawResponse::new(
		200,
		json!({ "data": [] }).to_string(),
	))]);
	let client = RestClient::<FakeTransport>::with_transport(config(), transport)
		.with_timeout(StdDuration::from_secs(3));
	let envelope = client
		.do_request(Method::Patch, "/accounts/5/", Fragment::new(), None)
		.await
		.expect("Call should resolve to an envelope.");
	let seen = client.transport.seen();

	assert!(envelope.is_success());
	assert_eq!(seen.len(), 1);
	assert_eq!(seen[0].0, Method::Patch);
	assert_eq!(seen[0].1.as_str(), "https://api.example.com/accounts/5/");
	assert_eq!(seen[0].2, Some(StdDuration::from_secs(3)));
}
