//! device-advisor: keep / sell / replace recommendations for devices.
//!
//! A small CART decision tree is fitted on five hand-labelled device
//! profiles and then queried one profile at a time.
//!
//! # Quick Start
//!
//! ```
//! use device_advisor::prelude::*;
//!
//! let advisor = DeviceAdvisor::train(&TrainerConfig::default()).unwrap();
//!
//! let request = PredictRequest::from_json(br#"{"edad_dispositivo": 1, "estado_bateria": 80, "rendimiento": 90}"#).unwrap();
//! let recommendation = advisor.predict(request).unwrap();
//! assert_eq!(recommendation.as_str(), "mantener");
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Row-major [`Matrix`] storage
//! - [`tree`]: CART decision tree classifier
//! - [`model_selection`]: Seeded train/test splitting
//! - [`advisor`]: Device data set, request parsing and the trained advisor
//! - [`error`]: Error type shared by every module

pub mod advisor;
pub mod error;
pub mod model_selection;
pub mod prelude;
pub mod primitives;
pub mod traits;
pub mod tree;

pub use error::{AdvisorError, Result};
pub use primitives::Matrix;
pub use traits::Classifier;
