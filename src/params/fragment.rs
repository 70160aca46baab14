//! Caller-supplied partial request payloads.

// self
use crate::{_prelude::*, config::ApiSecret, params::MultipartValue};

/// Replacement credentials carried by a [`Fragment`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
	/// API key placed in `query.api_key`.
	pub key: String,
	/// API secret placed in `query.api_secret`.
	pub secret: ApiSecret,
}

/// Partial request-parameter payload supplied for one call.
///
/// Every bucket is optional; absent or empty buckets leave the builder untouched. JSON payloads
/// may spell the form bucket as `form_params` or `formParams`. Multipart values only come from
/// Rust callers since files cannot travel through JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Fragment {
	/// Credentials override.
	pub credentials: Option<Credentials>,
	/// Query parameters.
	pub query: BTreeMap<String, String>,
	/// Header parameters.
	pub headers: BTreeMap<String, String>,
	/// Filters flattened into `query["filter[<key>]"]`.
	pub filters: BTreeMap<String, String>,
	/// URL-encoded form parameters.
	#[serde(alias = "formParams")]
	pub form_params: BTreeMap<String, String>,
	/// Multipart fields in insertion order.
	#[serde(skip)]
	pub multipart: Vec<(String, MultipartValue)>,
}
impl Fragment {
	/// Creates an empty fragment.
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides the credentials.
	pub fn credentials(mut self, key: impl Into<String>, secret: impl Into<ApiSecret>) -> Self {
		self.credentials = Some(Credentials { key: key.into(), secret: secret.into() });

		self
	}

	/// Adds a query parameter.
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.insert(key.into(), value.into());

		self
	}

	/// Adds a header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());

		self
	}

	/// Adds a filter.
	pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.filters.insert(key.into(), value.into());

		self
	}

	/// Adds a form parameter.
	pub fn form_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.form_params.insert(key.into(), value.into());

		self
	}

	/// Adds a multipart field; a repeated name replaces the earlier value in place.
	pub fn multipart(mut self, name: impl Into<String>, value: impl Into<MultipartValue>) -> Self {
		let name = name.into();
		let value = value.into();

		match self.multipart.iter_mut().find(|(existing, _)| *existing == name) {
			Some((_, slot)) => *slot = value,
			None => self.multipart.push((name, value)),
		}

		self
	}

	/// Returns `true` if no bucket carries data.
	pub fn is_empty(&self) -> bool {
		self.credentials.is_none()
			&& self.query.is_empty()
			&& self.headers.is_empty()
			&& self.filters.is_empty()
			&& self.form_params.is_empty()
			&& self.multipart.is_empty()
	}
}
