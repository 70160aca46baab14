// self
use crate::{http::Method, obs::RequestOutcome, token::ValidationOutcome};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(method: Method, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"signed_rest_request_total",
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome);
	}
}

/// Records a response-token verification result.
pub fn record_token_outcome(outcome: ValidationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("signed_rest_token_validation_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
