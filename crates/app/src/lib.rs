#![forbid(unsafe_code)]

pub mod config;
pub mod routes;
pub mod server;

pub use routes::{AppState, router};
