//! # Amazon EC2 Client
//!
//! Starts existing instances and launches new ones through the EC2 query API.
//!
//! ## Submodules
//! - `api`: The [`Ec2Api`] trait the retry call sites are written against.
//! - `classify`: Maps EC2 error codes to retry classifications.
//! - `client`: The signed HTTP implementation of [`Ec2Api`].
//! - `defaults`: Builds the fixed launch specification.
//! - `response`: Decodes XML responses and errors.
//! - `types`: The launch specification data structures.

pub mod api;
pub mod classify;
/// HTTP client for the EC2 query API.
#[cfg(feature = "reqwest")]
pub mod client;
pub mod defaults;
pub mod response;
pub mod types;

// Re-export key components to provide a convenient public API for this module.
pub use crate::aws::ec2::api::Ec2Api;
#[cfg(feature = "reqwest")]
pub use crate::aws::ec2::client::{Ec2Client, default_endpoint};
pub use crate::aws::ec2::defaults::launch_specification;
pub use crate::aws::ec2::types::*;
