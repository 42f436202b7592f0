//! Server module for building the HTTP server
//!
//! `ServerBuilder` wires the store, the auth guard and the REST exposure
//! together and serves them with graceful shutdown.

pub mod builder;
pub mod exposure;
pub mod middleware;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
