//! Shared types and models for the Umuhinzi yield prediction platform
//!
//! This crate contains types shared between the backend, the browser
//! dashboard (via WASM), and other components of the system.

pub mod districts;
pub mod models;
pub mod types;
pub mod validation;

pub use districts::*;
pub use models::*;
pub use types::*;
pub use validation::*;
