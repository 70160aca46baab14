//! Uniform success/error envelopes built from upstream responses.

// self
use crate::{
	_prelude::*,
	http::RawResponse,
	obs,
	pagination::{PaginationLinker, PaginationLinks, PaginationMeta},
	token::{TokenValidator, ValidationOutcome},
};

/// Messages used on the success branch when upstream supplied none.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "no messaging present.";
/// Messages used on the error branch when upstream supplied none.
pub const DEFAULT_ERROR_MESSAGE: &str = "response assignment failure";
/// Error value used when the body is not a JSON object.
pub const MALFORMED_BODY_ERROR: &str = "malformed response body";

/// Normalized outcome of one call.
///
/// Serializes to the flat JSON shape callers consume: the success branch carries
/// `"success": true` and the error branch carries `"error"`; never both.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
	/// Upstream answered with status 200.
	Success(SuccessEnvelope),
	/// Any other status, or an undecodable body.
	Error(ErrorEnvelope),
}
impl ResponseEnvelope {
	/// Returns `true` for the success branch.
	pub fn is_success(&self) -> bool {
		matches!(self, ResponseEnvelope::Success(_))
	}

	/// Effective status code.
	pub fn status(&self) -> u16 {
		match self {
			ResponseEnvelope::Success(success) => success.status,
			ResponseEnvelope::Error(error) => error.status,
		}
	}

	/// Envelope messages.
	pub fn messages(&self) -> &Value {
		match self {
			ResponseEnvelope::Success(success) => &success.messages,
			ResponseEnvelope::Error(error) => &error.messages,
		}
	}

	/// Captured headers, when header capture is enabled.
	pub fn headers(&self) -> Option<&BTreeMap<String, Vec<String>>> {
		match self {
			ResponseEnvelope::Success(success) => success.headers.as_ref(),
			ResponseEnvelope::Error(error) => error.headers.as_ref(),
		}
	}

	/// Response-token verification result; `None` when verification was skipped.
	pub fn validation(&self) -> Option<ValidationOutcome> {
		match self {
			ResponseEnvelope::Success(success) => success.validation,
			ResponseEnvelope::Error(error) => error.validation,
		}
	}

	/// Success branch, if populated.
	pub fn as_success(&self) -> Option<&SuccessEnvelope> {
		match self {
			ResponseEnvelope::Success(success) => Some(success),
			ResponseEnvelope::Error(_) => None,
		}
	}

	/// Error branch, if populated.
	pub fn as_error(&self) -> Option<&ErrorEnvelope> {
		match self {
			ResponseEnvelope::Success(_) => None,
			ResponseEnvelope::Error(error) => Some(error),
		}
	}
}

/// Success branch of [`ResponseEnvelope`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SuccessEnvelope {
	/// Always `true`.
	pub success: bool,
	/// Upstream `data`, or `null`.
	pub data: Value,
	/// Upstream `messages`, a default string, or a token warning.
	pub messages: Value,
	/// Response headers, only when header capture is enabled.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub headers: Option<BTreeMap<String, Vec<String>>>,
	/// Upstream `meta`, with pagination links injected under `pagination.links`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub meta: Option<Value>,
	/// Upstream status.
	pub status: u16,
	/// Typed copy of the injected pagination links.
	#[serde(skip)]
	pub pagination: Option<PaginationLinks>,
	/// Response-token verification result.
	#[serde(skip)]
	pub validation: Option<ValidationOutcome>,
}

/// Error branch of [`ResponseEnvelope`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorEnvelope {
	/// Upstream `error`, or the status reason phrase.
	pub error: Value,
	/// Upstream `messages`, a default string, or a token warning.
	pub messages: Value,
	/// Response headers, only when header capture is enabled.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub headers: Option<BTreeMap<String, Vec<String>>>,
	/// Upstream status; `500` when upstream reported none.
	pub status: u16,
	/// Response-token verification result.
	#[serde(skip)]
	pub validation: Option<ValidationOutcome>,
}

/// Converts [`RawResponse`] values into [`ResponseEnvelope`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseNormalizer {
	show_headers: bool,
	token_field: String,
	validator: Option<TokenValidator>,
	linker: PaginationLinker,
}
impl ResponseNormalizer {
	/// Creates a normalizer that reads the response token from `token_field`.
	pub fn new(token_field: impl Into<String>) -> Self {
		Self {
			show_headers: false,
			token_field: token_field.into(),
			validator: None,
			linker: PaginationLinker::default(),
		}
	}

	/// Toggles header capture.
	pub fn with_show_headers(mut self, show_headers: bool) -> Self {
		self.show_headers = show_headers;

		self
	}

	/// Enables response-token verification.
	pub fn with_validator(mut self, validator: TokenValidator) -> Self {
		self.validator = Some(validator);

		self
	}

	/// Replaces the pagination linker.
	pub fn with_linker(mut self, linker: PaginationLinker) -> Self {
		self.linker = linker;

		self
	}

	/// Builds the envelope for `raw`.
	///
	/// `request_url` is the URL the call was sent to; pagination links are only synthesized
	/// when it is provided and carries a `page` parameter.
	pub fn normalize(&self, raw: &RawResponse, request_url: Option<&Url>) -> ResponseEnvelope {
		let headers = self.show_headers.then(|| raw.headers.clone());
		let mut body = match decode_body(&raw.body) {
			Ok(body) => body,
			Err(e) => {
				obs::warn_malformed_body(&e);

				return ResponseEnvelope::Error(ErrorEnvelope {
					error: Value::String(MALFORMED_BODY_ERROR.into()),
					messages: Value::String(DEFAULT_ERROR_MESSAGE.into()),
					headers,
					status: 500,
					validation: None,
				});
			},
		};
		let validation = self.validator.as_ref().map(|validator| {
			let outcome = validator.validate(body.get(&self.token_field).and_then(Value::as_str));

			obs::record_token_outcome(outcome);

			outcome
		});
		let upstream_messages = body.remove("messages").filter(is_present);
		let messages = |default: &str| match validation.and_then(ValidationOutcome::reason) {
			Some(reason) => {
				obs::warn_invalid_token(reason);

				serde_json::json!({ "warning": reason.message() })
			},
			None => upstream_messages.clone().unwrap_or_else(|| Value::String(default.into())),
		};

		if raw.status == 200 {
			let mut meta = body.remove("meta").filter(|meta| !meta.is_null());
			let pagination = match (meta.as_mut(), request_url) {
				(Some(meta), Some(url)) => self.attach_links(meta, url),
				_ => None,
			};

			return ResponseEnvelope::Success(SuccessEnvelope {
				success: true,
				data: body.remove("data").unwrap_or(Value::Null),
				messages: messages(DEFAULT_SUCCESS_MESSAGE),
				headers,
				meta,
				status: raw.status,
				pagination,
				validation,
			});
		}

		ResponseEnvelope::Error(ErrorEnvelope {
			error: body
				.remove("error")
				.filter(is_present)
				.unwrap_or_else(|| Value::String(raw.reason_phrase())),
			messages: messages(DEFAULT_ERROR_MESSAGE),
			headers,
			status: if raw.status == 0 { 500 } else { raw.status },
			validation,
		})
	}

	fn attach_links(&self, meta: &mut Value, url: &Url) -> Option<PaginationLinks> {
		let links = self.linker.link(PaginationMeta::from_meta(meta)?, url)?;
		let encoded = serde_json::to_value(&links).ok()?;

		meta.get_mut("pagination")?.as_object_mut()?.insert("links".into(), encoded);

		Some(links)
	}
}

fn decode_body(
	body: &[u8],
) -> Result<serde_json::Map<String, Value>, serde_path_to_error::Error<serde_json::Error>> {
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
}

fn is_present(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::String(text) => !text.is_empty(),
		Value::Array(items) => !items.is_empty(),
		Value::Object(map) => !map.is_empty(),
		Value::Number(_) => true,
	}
}
