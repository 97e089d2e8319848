//! Device keep / sell / replace recommendations.
//!
//! A [`DeviceAdvisor`] is trained once on [`TRAINING_DATA`] (a seeded 70/30
//! split, fitted on the 70% side) and then answers [`PredictRequest`]s.

mod dataset;
mod model;
mod request;

pub use dataset::{
    to_training_matrix, DeviceProfile, Recommendation, TrainingExample, FEATURE_NAMES,
    TRAINING_DATA,
};
pub use model::{DeviceAdvisor, ModelSummary, TrainerConfig};
pub use request::{ErrorResponse, PredictRequest, PredictResponse};
