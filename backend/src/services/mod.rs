//! Business logic services for the Umuhinzi yield prediction service

pub mod auth;
pub mod features;
pub mod prediction;
pub mod predictor;

pub use auth::{AuthProvider, ConfigAuthProvider};
pub use prediction::PredictionService;
pub use predictor::{ForestModel, Predictor};
