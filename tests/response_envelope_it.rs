#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use signed_rest::{
	_preludet::*,
	client::RestClient,
	config::{ClientConfig, ExecutionMode},
	http::ReqwestTransport,
	pagination::PageRequest,
	params::Fragment,
	response::{DEFAULT_ERROR_MESSAGE, MALFORMED_BODY_ERROR},
};

#[tokio::test]
async fn upstream_errors_resolve_to_error_envelopes() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), ExecutionMode::Development);
	let missing = server
		.mock_async(|when, then| {
			when.method(GET).path("/missing");
			then.status(404).json_body(json!({}));
		})
		.await;
	let invalid = server
		.mock_async(|when, then| {
			when.method(PATCH).path("/accounts/1");
			then.status(422).json_body(json!({
				"error": { "email": ["taken"] },
				"messages": "validation failed"
			}));
		})
		.await;
	let not_found = client
		.get("/missing", Fragment::new(), None)
		.await
		.expect("Call should resolve to an envelope.");
	let rejected = client
		.patch("/accounts/1", Fragment::new().form_param("email", "a@example.com"))
		.await
		.expect("Call should resolve to an envelope.");

	missing.assert_async().await;
	invalid.assert_async().await;

	assert_eq!(
		serde_json::to_value(&not_found).expect("Envelope should serialize."),
		json!({ "error": "Not Found", "messages": DEFAULT_ERROR_MESSAGE, "status": 404 })
	);
	assert_eq!(
		rejected.as_error().map(|error| &error.error),
		Some(&json!({ "email": ["taken"] }))
	);
	assert_eq!(rejected.messages(), &json!("validation failed"));
	assert_eq!(rejected.status(), 422);
}

#[tokio::test]
async fn undecodable_bodies_become_internal_errors() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), ExecutionMode::Development);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/html");
			then.status(200).header("content-type", "text/html").body("<html>oops</html>");
		})
		.await;
	let envelope =
		client.get("/html", Fragment::new(), None).await.expect("Call should resolve to an envelope.");

	mock.assert_async().await;

	let error = envelope.as_error().expect("Error branch expected.");

	assert_eq!(error.error, json!(MALFORMED_BODY_ERROR));
	assert_eq!(error.status, 500);
}

#[tokio::test]
async fn paginated_responses_gain_sanitized_links() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), ExecutionMode::Development);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/items").query_param("page", "3").query_param("take", "10");
			then.status(200).json_body(json!({
				"data": [],
				"meta": { "pagination": { "current_page": 3, "total_pages": 10 } }
			}));
		})
		.await;
	let envelope = client
		.get("/items", Fragment::new().filter("kind", "book"), Some(PageRequest::new(3, 10)))
		.await
		.expect("Call should resolve to an envelope.");

	mock.assert_async().await;

	let success = envelope.as_success().expect("Success branch expected.");
	let links = success.pagination.as_ref().expect("Pagination links expected.");
	let next = links.next.as_ref().expect("Next link expected.");
	let injected = success.meta.as_ref().and_then(|meta| meta.pointer("/pagination/links/full"));

	assert_eq!(links.countdown.len(), 2);
	assert_eq!(links.countup.len(), 5);
	assert!(next.query_pairs().any(|(key, value)| key == "page" && value == "4"));
	assert!(next.query_pairs().any(|(key, value)| key == "filter[kind]" && value == "book"));
	assert!(!next.query_pairs().any(|(key, _)| key == "api_key" || key == "api_secret"));
	assert_eq!(injected.and_then(Value::as_object).map(|full| full.len()), Some(8));
}

#[tokio::test]
async fn headers_are_captured_when_enabled() {
	let server = MockServer::start_async().await;
	let config = ClientConfig::builder()
		.base_url(Url::parse(&server.base_url()).expect("Mock server URL should parse."))
		.credentials(TEST_API_KEY, TEST_API_SECRET)
		.show_headers(true)
		.build()
		.expect("Configuration should be valid.");
	let client = RestClient::<ReqwestTransport>::new(config);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/ping");
			then.status(200).header("x-request-id", "abc").json_body(json!({ "data": "pong" }));
		})
		.await;
	let envelope =
		client.get("/ping", Fragment::new(), None).await.expect("Call should resolve to an envelope.");

	mock.assert_async().await;

	assert_eq!(
		envelope.headers().and_then(|headers| headers.get("x-request-id")),
		Some(&vec!["abc".to_owned()])
	);
}
