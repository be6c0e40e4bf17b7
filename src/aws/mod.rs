//! # Amazon Web Services plumbing
//!
//! Provider-wide pieces shared by every service client: credentials and how
//! they are resolved, Signature Version 4 request signing, and the small
//! amount of XML decoding the query APIs need.
//!
//! ## Submodules
//! - `auth`: Resolves [`Credentials`] from the environment or the shared credentials file.
//! - `sigv4`: Signs query-API requests.
//! - `types`: Provider-wide data types.
//! - `xml`: Field extraction from query-API responses.
//! - `ec2`: The EC2 control-plane client.

pub mod auth;
pub mod ec2;
pub mod sigv4;
pub mod types;
pub mod xml;

pub use auth::load_credentials;
pub use types::Credentials;
