// self
use crate::{_prelude::*, http::Method, token::InvalidReason};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span builder used by client calls.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the provided method + stage.
	pub fn new(method: Method, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("signed_rest.request", method = method.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a warning event for a rejected response token.
pub fn warn_invalid_token(reason: InvalidReason) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(reason = reason.as_str(), "{}", reason.message());
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = reason;
	}
}

/// Emits a warning event for a response body that is not a JSON object.
pub fn warn_malformed_body(error: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(error = %error, "Response body could not be decoded.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = error;
	}
}
