//! Translation of raw EC2 errors into retry classifications.
//!
//! This is the only place that matches on provider error-code strings.

use crate::error::ApiError;
use crate::retry::Classification;

/// The instance is in a state from which it cannot be started, which for
/// `StartInstances` means it is already running.
pub const INCORRECT_INSTANCE_STATE: &str = "IncorrectInstanceState";
/// No capacity for the requested instance type in the zone right now.
pub const INSUFFICIENT_INSTANCE_CAPACITY: &str = "InsufficientInstanceCapacity";

/// Codes for provider-side conditions expected to clear on their own.
const TRANSIENT_CODES: &[&str] = &[
    "RequestLimitExceeded",
    "Unavailable",
    "InternalError",
    "ServiceUnavailable",
    // Freshly created instances may not be visible yet.
    "InvalidInstanceID.NotFound",
];

/// Classification for `StartInstances` failures.
pub fn classify_start(err: &ApiError) -> Classification {
    match err {
        ApiError::Service { code, .. } if code == INCORRECT_INSTANCE_STATE => {
            Classification::AlreadySatisfied
        }
        ApiError::Service { code, .. } if TRANSIENT_CODES.contains(&code.as_str()) => {
            Classification::Retryable
        }
        // Provider-side failure, whatever the body says.
        ApiError::Service { status, .. } if *status >= 500 => Classification::Retryable,
        ApiError::Transport(_) => Classification::Retryable,
        _ => Classification::Fatal,
    }
}

/// Classification for `RunInstances` failures.
pub fn classify_launch(err: &ApiError) -> Classification {
    match err.code() {
        Some(INSUFFICIENT_INSTANCE_CAPACITY) => Classification::Retryable,
        _ => Classification::Fatal,
    }
}
