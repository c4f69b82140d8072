//! HTTP handlers for the Umuhinzi yield prediction service

mod auth;
mod health;
mod predict;

pub use auth::*;
pub use health::*;
pub use predict::*;
