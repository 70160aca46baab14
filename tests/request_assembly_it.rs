#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use signed_rest::{
	_preludet::*,
	config::ExecutionMode,
	http::Method,
	pagination::PageRequest,
	params::{FileUpload, Fragment, MultipartValue},
};

#[tokio::test]
async fn get_merges_credentials_pagination_filters_and_headers() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), ExecutionMode::Development);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/items")
				.query_param("api_key", TEST_API_KEY)
				.query_param("api_secret", TEST_API_SECRET)
				.query_param("page", "3")
				.query_param("take", "12")
				.query_param("filter[status]", "open")
				.query_param("sort", "name")
				.header("x-tenant", "acme");
			then.status(200).json_body(json!({ "data": [{ "id": 1 }] }));
		})
		.await;
	let fragment = Fragment::new()
		.query("sort", "name")
		.filter("status", "open")
		.header("x-tenant", "acme");
	let envelope = client
		.get("/items", fragment, Some(PageRequest::new(3, 0)))
		.await
		.expect("Call should resolve to an envelope.");

	mock.assert_async().await;

	assert!(envelope.is_success());
	assert_eq!(envelope.status(), 200);
	assert_eq!(envelope.as_success().map(|success| &success.data), Some(&json!([{ "id": 1 }])));
}

#[tokio::test]
async fn fragment_overrides_pagination_and_credentials() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), ExecutionMode::Testing);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/items")
				.query_param("api_key", "override-key")
				.query_param("page", "9");
			then.status(200).json_body(json!({ "data": [] }));
		})
		.await;
	let fragment = Fragment::new().credentials("override-key", "override-secret").query("page", "9");
	let envelope = client
		.do_request(Method::Get, "items", fragment, Some(PageRequest::default()))
		.await
		.expect("Call should resolve to an envelope.");

	mock.assert_async().await;

	assert!(envelope.is_success());
}

#[tokio::test]
async fn post_sends_url_encoded_form() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), ExecutionMode::Development);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/orders")
				.header("content-type", "application/x-www-form-urlencoded")
				.body_includes("sku=A-1")
				.body_includes("quantity=2");
			then.status(200).json_body(json!({ "data": { "id": 42 }, "messages": "created" }));
		})
		.await;
	let envelope = client
		.post("/orders", Fragment::new().form_param("sku", "A-1").form_param("quantity", "2"))
		.await
		.expect("Call should resolve to an envelope.");

	mock.assert_async().await;

	assert_eq!(envelope.messages(), &json!("created"));
}

#[tokio::test]
async fn multipart_fields_carry_files_and_nested_names() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), ExecutionMode::Development);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/uploads")
				.header_exists("content-type")
				.body_includes("name=\"avatar\"; filename=\"avatar.png\"")
				.body_includes("name=\"profile[nickname]\"")
				.body_includes("name=\"note\"")
				.body_includes("png-bytes");
			then.status(200).json_body(json!({ "data": { "stored": true } }));
		})
		.await;
	let fragment = Fragment::new()
		.multipart("avatar", FileUpload::new("avatar.png", b"png-bytes".to_vec()))
		.multipart(
			"profile",
			MultipartValue::nested([("nickname".to_owned(), MultipartValue::from("neo"))]),
		)
		.form_param("note", "folded into multipart");
	let envelope =
		client.post("/uploads", fragment).await.expect("Call should resolve to an envelope.");

	mock.assert_async().await;

	assert!(envelope.is_success());
}

#[tokio::test]
async fn base_url_path_prefix_is_preserved() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.url("/v2/"), ExecutionMode::Development);
	let mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/v2/items/7");
			then.status(200).json_body(json!({ "data": null }));
		})
		.await;
	let envelope =
		client.delete("/items/7", Fragment::new()).await.expect("Call should resolve to an envelope.");

	mock.assert_async().await;

	assert_eq!(envelope.as_success().map(|success| &success.data), Some(&Value::Null));
}
