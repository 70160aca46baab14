//! Request parameter assembly.
//!
//! [`ParamBuilder`] accumulates one call's [`RequestDescriptor`] from caller fragments. Every
//! bucket merges right-biased: keys from a later fragment replace identical keys from an earlier
//! one, and keys the later fragment omits keep their earlier values. Fragments are applied in a
//! fixed order (credentials, query, headers, filters, form params, multipart) and absent or empty
//! buckets are skipped, so partial application is idempotent.

pub mod fragment;
pub mod multipart;

pub use fragment::*;
pub use multipart::{FileUpload, MultipartPart, MultipartValue, PartContents};

// self
use crate::{_prelude::*, config::ApiSecret};

/// Query key holding the API key.
pub const API_KEY_PARAM: &str = "api_key";
/// Query key holding the API secret.
pub const API_SECRET_PARAM: &str = "api_secret";

/// Wire-level request description consumed once by the transport.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestDescriptor {
	query: BTreeMap<String, String>,
	headers: BTreeMap<String, String>,
	form_params: BTreeMap<String, String>,
	multipart: Vec<MultipartPart>,
}
impl RequestDescriptor {
	/// Query parameters, including credentials.
	pub fn query(&self) -> &BTreeMap<String, String> {
		&self.query
	}

	/// Returns a single query value.
	pub fn query_value(&self, key: &str) -> Option<&str> {
		self.query.get(key).map(String::as_str)
	}

	/// Returns `true` if the query carries `key`.
	pub fn has_query(&self, key: &str) -> bool {
		self.query.contains_key(key)
	}

	/// Removes a query parameter, returning its previous value.
	pub fn remove_query(&mut self, key: &str) -> Option<String> {
		self.query.remove(key)
	}

	/// Header parameters.
	pub fn headers(&self) -> &BTreeMap<String, String> {
		&self.headers
	}

	/// URL-encoded form parameters.
	pub fn form_params(&self) -> &BTreeMap<String, String> {
		&self.form_params
	}

	/// Multipart parts in insertion order.
	pub fn multipart(&self) -> &[MultipartPart] {
		&self.multipart
	}

	/// Query parameters with `api_key` and `api_secret` removed.
	pub fn redacted_query(&self) -> BTreeMap<String, String> {
		redact(&self.query)
	}
}
impl Debug for RequestDescriptor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut query = self.redacted_query();

		if self.query.contains_key(API_KEY_PARAM) {
			query.insert(API_KEY_PARAM.into(), "<redacted>".into());
		}
		if self.query.contains_key(API_SECRET_PARAM) {
			query.insert(API_SECRET_PARAM.into(), "<redacted>".into());
		}

		f.debug_struct("RequestDescriptor")
			.field("query", &query)
			.field("headers", &self.headers)
			.field("form_params", &self.form_params.keys().collect::<Vec<_>>())
			.field("multipart", &self.multipart)
			.finish()
	}
}

/// Call-scoped accumulator for a [`RequestDescriptor`].
#[derive(Clone, Debug)]
pub struct ParamBuilder {
	descriptor: RequestDescriptor,
}
impl ParamBuilder {
	/// Creates a builder seeded with the required credentials.
	pub fn new(key: impl Into<String>, secret: &ApiSecret) -> Self {
		Self { descriptor: RequestDescriptor::default() }.credentials(key, secret)
	}

	/// Sets `query.api_key` and `query.api_secret`.
	pub fn credentials(mut self, key: impl Into<String>, secret: &ApiSecret) -> Self {
		self.descriptor.query.insert(API_KEY_PARAM.into(), key.into());
		self.descriptor.query.insert(API_SECRET_PARAM.into(), secret.expose().to_owned());

		self
	}

	/// Shallow-merges query parameters; incoming keys win.
	pub fn query<I, K, V>(mut self, extra: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		merge(&mut self.descriptor.query, extra);

		self
	}

	/// Shallow-merges headers; incoming keys win.
	pub fn headers<I, K, V>(mut self, extra: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		merge(&mut self.descriptor.headers, extra);

		self
	}

	/// Flattens each filter into `query["filter[<key>]"]`.
	pub fn filters<I, K, V>(mut self, filters: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Display,
		V: Into<String>,
	{
		for (key, value) in filters {
			self.descriptor.query.insert(format!("filter[{key}]"), value.into());
		}

		self
	}

	/// Shallow-merges form parameters; incoming keys win.
	pub fn form_params<I, K, V>(mut self, extra: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		merge(&mut self.descriptor.form_params, extra);

		self
	}

	/// Adds multipart fields, replacing existing parts with the same flattened name.
	pub fn multipart<I, K>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = (K, MultipartValue)>,
		K: AsRef<str>,
	{
		for (name, value) in fields {
			for part in multipart::flatten(name.as_ref(), value) {
				let parts = &mut self.descriptor.multipart;

				match parts.iter_mut().find(|existing| existing.name == part.name) {
					Some(existing) => *existing = part,
					None => parts.push(part),
				}
			}
		}

		self
	}

	/// Applies every non-empty bucket of `fragment` in the fixed order.
	pub fn apply(mut self, fragment: Fragment) -> Self {
		let Fragment { credentials, query, headers, filters, form_params, multipart } = fragment;

		if let Some(credentials) = credentials {
			self = self.credentials(credentials.key, &credentials.secret);
		}
		if !query.is_empty() {
			self = self.query(query);
		}
		if !headers.is_empty() {
			self = self.headers(headers);
		}
		if !filters.is_empty() {
			self = self.filters(filters);
		}
		if !form_params.is_empty() {
			self = self.form_params(form_params);
		}
		if !multipart.is_empty() {
			self = self.multipart(multipart);
		}

		self
	}

	/// Borrows the descriptor assembled so far.
	pub fn descriptor(&self) -> &RequestDescriptor {
		&self.descriptor
	}

	/// Query parameters with `api_key` and `api_secret` removed.
	pub fn redacted_query(&self) -> BTreeMap<String, String> {
		self.descriptor.redacted_query()
	}

	/// Consumes the builder and returns the descriptor.
	pub fn build(self) -> RequestDescriptor {
		self.descriptor
	}
}

fn merge<I, K, V>(bucket: &mut BTreeMap<String, String>, extra: I)
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<String>,
{
	bucket.extend(extra.into_iter().map(|(k, v)| (k.into(), v.into())));
}

fn redact(query: &BTreeMap<String, String>) -> BTreeMap<String, String> {
	query
		.iter()
		.filter(|(key, _)| key.as_str() != API_KEY_PARAM && key.as_str() != API_SECRET_PARAM)
		.map(|(key, value)| (key.clone(), value.clone()))
		.collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn builder() -> ParamBuilder {
		ParamBuilder::new("key", &ApiSecret::new("secret"))
	}

	#[test]
	fn credentials_are_seeded_at_construction() {
		let descriptor = builder().build();

		assert_eq!(descriptor.query_value(API_KEY_PARAM), Some("key"));
		assert_eq!(descriptor.query_value(API_SECRET_PARAM), Some("secret"));
	}

	#[test]
	fn merges_are_right_biased_per_bucket() {
		let first = Fragment::new()
			.query("a", "1")
			.query("b", "1")
			.header("x-trace", "first")
			.form_param("name", "first");
		let second =
			Fragment::new().query("b", "2").header("x-trace", "second").form_param("other", "2");
		let descriptor = builder().apply(first).apply(second).build();

		assert_eq!(descriptor.query_value("a"), Some("1"));
		assert_eq!(descriptor.query_value("b"), Some("2"));
		assert_eq!(descriptor.headers().get("x-trace").map(String::as_str), Some("second"));
		assert_eq!(descriptor.form_params().get("name").map(String::as_str), Some("first"));
		assert_eq!(descriptor.form_params().get("other").map(String::as_str), Some("2"));
	}

	#[test]
	fn filters_flatten_without_removing_other_keys() {
		let descriptor = builder().query([("page", "2")]).filters([("a", "1"), ("b", "2")]).build();

		assert_eq!(descriptor.query_value("filter[a]"), Some("1"));
		assert_eq!(descriptor.query_value("filter[b]"), Some("2"));
		assert_eq!(descriptor.query_value("page"), Some("2"));
		assert!(descriptor.has_query(API_KEY_PARAM));
		assert!(!descriptor.has_query("filters"));
	}

	#[test]
	fn empty_fragments_do_not_overwrite_state() {
		let seeded = builder().apply(Fragment::new().query("a", "1").form_param("f", "v"));
		let before = seeded.descriptor().clone();
		let after = seeded.apply(Fragment::new()).build();

		assert_eq!(before, after);
	}

	#[test]
	fn redacted_query_never_contains_credentials() {
		let builder = builder()
			.query([("api_key", "overridden"), ("q", "search")])
			.apply(Fragment::new().credentials("new-key", "new-secret"));
		let redacted = builder.redacted_query();

		assert!(!redacted.contains_key(API_KEY_PARAM));
		assert!(!redacted.contains_key(API_SECRET_PARAM));
		assert_eq!(redacted.get("q").map(String::as_str), Some("search"));
		assert_eq!(builder.descriptor().query_value(API_KEY_PARAM), Some("new-key"));
	}

	#[test]
	fn multipart_parts_replace_by_name() {
		let descriptor = builder()
			.multipart([("title", MultipartValue::from("draft"))])
			.multipart([("title", MultipartValue::from("final")), ("body", "text".into())])
			.build();
		let names = descriptor.multipart().iter().map(|part| part.name.as_str()).collect::<Vec<_>>();

		assert_eq!(names, ["title", "body"]);
		assert_eq!(descriptor.multipart()[0].contents, PartContents::Text("final".into()));
	}

	#[test]
	fn applied_multipart_keeps_caller_order() {
		let fragment = Fragment::new()
			.multipart("zeta", "last-alphabetically")
			.multipart("alpha", "first-alphabetically")
			.multipart("middle", MultipartValue::nested([("b", "1"), ("a", "2")]));
		let descriptor = builder().apply(fragment).build();
		let names = descriptor.multipart().iter().map(|part| part.name.as_str()).collect::<Vec<_>>();

		assert_eq!(names, ["zeta", "alpha", "middle[b]", "middle[a]"]);
	}

	#[test]
	fn removed_query_values_are_returned() {
		let mut descriptor = builder().query([("q", "search")]).build();

		assert_eq!(descriptor.remove_query("q").as_deref(), Some("search"));
		assert_eq!(descriptor.remove_query("q"), None);
		assert!(!descriptor.has_query("q"));
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let descriptor = builder().form_params([("token", "signed-value")]).build();
		let rendered = format!("{descriptor:?}");

		assert!(!rendered.contains("\"secret\""));
		assert!(!rendered.contains("signed-value"));
		assert!(rendered.contains("<redacted>"));
	}
}
