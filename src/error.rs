//! Error types shared by the EC2 client and the CLI front end.

use thiserror::Error;

/// A failed call against the EC2 control plane.
///
/// `Service` carries the structured error the provider returned; the
/// classification adapters in [`crate::aws::ec2::classify`] only ever look
/// at its `code`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{code}: {message} (status {status}, request id {request_id})")]
    Service {
        status: u16,
        code: String,
        message: String,
        request_id: String,
    },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Provider error code, if the provider returned one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Service { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Invalid command-line invocation. Nothing has been sent when one of these
/// is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("An instance id is required for 'start' action")]
    MissingInstanceId,
    #[error(
        "For 'launch' action, you need to specify --ami, --instance_type, --subnet, and --security_group"
    )]
    MissingLaunchFlags,
    #[error("--backoff_factor must be at least 1")]
    ZeroBackoffFactor,
}
