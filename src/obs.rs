//! Optional observability helpers for signed REST calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `signed_rest.request` with the `method` and
//!   `stage` (call site) fields, plus a warning event whenever a response token is rejected.
//! - Enable `metrics` to increment the `signed_rest_request_total` counter for every
//!   attempt/success/upstream_error/failure, labeled by `method` + `outcome`, and the
//!   `signed_rest_token_validation_total` counter labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, response::ResponseEnvelope};

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to [`RestClient::do_request`](crate::client::RestClient::do_request).
	Attempt,
	/// Normalized into a success envelope.
	Success,
	/// Normalized into an error envelope.
	UpstreamError,
	/// Error propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::UpstreamError => "upstream_error",
			RequestOutcome::Failure => "failure",
		}
	}

	/// Classifies a normalized envelope.
	pub fn of(envelope: &ResponseEnvelope) -> Self {
		if envelope.is_success() { RequestOutcome::Success } else { RequestOutcome::UpstreamError }
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
