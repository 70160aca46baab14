//! Sends a signed, paginated request to a local mock API and prints the normalized envelope.
//!
//! 1. Start an [`httpmock`] server that answers `GET /articles` with a paginated payload.
//! 2. Build a [`ClientConfig`] in production mode so the call carries a signed request token.
//! 3. Issue the call through [`RestClient::get`] and print the JSON envelope, including the
//!    synthesized pagination links.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use signed_rest::{
	client::RestClient,
	config::{ApiSecret, ClientConfig, ExecutionMode},
	http::ReqwestTransport,
	pagination::PageRequest,
	params::Fragment,
	token::TokenIssuer,
};

const APP_URL: &str = "https://app.example.com";
const API_SECRET: &str = "demo-secret";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let base_url = Url::parse(&server.base_url())?;
	let response_token = TokenIssuer::new(base_url.origin().ascii_serialization())
		.issue(APP_URL, &ApiSecret::new(API_SECRET), "token")?
		.remove("token")
		.unwrap_or_default();

	server
		.mock_async(|when, then| {
			when.method(GET).path("/articles").query_param("page", "2");
			then.status(200).json_body(json!({
				"data": [{ "id": 13, "title": "Signed requests" }],
				"meta": { "pagination": { "current_page": 2, "total_pages": 4 } },
				"token": response_token,
			}));
		})
		.await;

	let config = ClientConfig::builder()
		.base_url(base_url)
		.credentials("demo-key", API_SECRET)
		.app_url(APP_URL)
		.mode(ExecutionMode::Production)
		.build()?;
	let client = RestClient::<ReqwestTransport>::new(config);
	let envelope = client
		.get("/articles", Fragment::new().filter("status", "published"), Some(PageRequest::new(2, 5)))
		.await?;

	println!("{}", serde_json::to_string_pretty(&envelope)?);
	println!("Response token check: {:?}.", envelope.validation());

	Ok(())
}
