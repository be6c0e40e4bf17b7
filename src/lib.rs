// # ec2ctl: Start or Launch a Single EC2 Instance
//
// This crate starts an existing EC2 instance or launches a new one from a
// fixed launch specification, retrying with exponential backoff while the
// provider reports a transient condition (instance not yet startable,
// insufficient capacity).
//
// The HTTP client is behind the `reqwest` feature; everything else (retry
// policy, classification, request building) is plain Rust and testable
// without network access.

/// Shared HTTP client. Enabled with the `reqwest` feature.
#[cfg(feature = "reqwest")]
pub mod client;

/// Amazon Web Services utilities: credentials, signing, EC2.
pub mod aws;

/// Error types.
pub mod error;

/// Bounded exponential retry executor.
pub mod retry;

/// Validated requests built from command-line flags.
pub mod request;

/// Start and launch, wrapped in the retry executor.
pub mod ops;

pub use error::{ApiError, UsageError};
pub use retry::{Classification, Outcome, Retrier, RetryPolicy};
