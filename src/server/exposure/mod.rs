//! Exposure layers turning the application state into a transport
//!
//! Only REST is provided; handlers stay transport-agnostic behind `AppState`.

pub mod rest;

pub use rest::RestExposure;
