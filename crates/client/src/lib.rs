//! Data-access layer for front-ends talking to the progress server.
//!
//! `ProgressClient` caches query results, shares in-flight requests between
//! concurrent callers, and drops cached reads after every mutation.

#![forbid(unsafe_code)]

pub mod cache;
pub mod error;
pub mod transport;

pub use cache::ProgressClient;
pub use error::ClientError;
pub use transport::{HttpTransport, HttpTransportConfig, ProgressTransport};
