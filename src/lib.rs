//! Customer churn prediction over a fixed eleven-field record.
//!
//! Raw form values are encoded through fixed category tables, assembled into
//! an eleven-feature vector and passed through a fitted feature selector,
//! scaler and gradient-boosted classifier.

/// Application directory resolution.
pub mod app_dirs;
/// Serialized selector, scaler and classifier.
pub mod artifacts;
/// TOML configuration.
pub mod config;
/// Category tables and value coercion.
pub mod encoding;
/// Raw records and feature vectors.
pub mod features;
/// Tracing setup.
pub mod logging;
/// Prediction entry points.
pub mod predictor;
/// Input form description.
pub mod schema;

pub use features::{FeatureVector, RawInputRecord};
pub use predictor::{ChurnLabel, ChurnPredictor, PredictError};
