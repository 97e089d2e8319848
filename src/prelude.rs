//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use device_advisor::prelude::*;
//! ```

pub use crate::advisor::{
    DeviceAdvisor, DeviceProfile, PredictRequest, PredictResponse, Recommendation, TrainerConfig,
};
pub use crate::error::AdvisorError;
pub use crate::model_selection::train_test_split;
pub use crate::primitives::Matrix;
pub use crate::traits::Classifier;
pub use crate::tree::DecisionTreeClassifier;
