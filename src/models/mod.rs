pub mod additive;
pub mod artifact;
pub mod error;
pub mod forecaster;
pub mod registry;
