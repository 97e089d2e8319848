//! Fixed device-condition training data and its label set.

use crate::error::{AdvisorError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Feature names in the order they appear in every feature vector.
pub const FEATURE_NAMES: [&str; 4] = [
    "edad_dispositivo",
    "estado_bateria",
    "rendimiento",
    "frecuencia_reparacion",
];

/// What to do with a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    /// Keep using the device.
    #[serde(rename = "mantener")]
    Keep,
    /// Sell the device.
    #[serde(rename = "vender")]
    Sell,
    /// Replace the device.
    #[serde(rename = "cambiar")]
    Replace,
}

impl Recommendation {
    /// Every label, indexed by class index.
    pub const ALL: [Recommendation; 3] = [Self::Keep, Self::Sell, Self::Replace];

    /// Class index used by the classifier.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Keep => 0,
            Self::Sell => 1,
            Self::Replace => 2,
        }
    }

    /// Inverse of [`Recommendation::index`].
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::UnknownClass`] for indices outside the label set.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(AdvisorError::UnknownClass {
                index,
                n_classes: Self::ALL.len(),
            })
    }

    /// Wire label (`mantener`, `vender`, `cambiar`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keep => "mantener",
            Self::Sell => "vender",
            Self::Replace => "cambiar",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition of a single device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Age in years
    pub device_age: i64,
    /// Battery health, percent
    pub battery_state: i64,
    /// Performance, percent
    pub performance: i64,
    /// Number of repairs so far
    pub repair_frequency: i64,
}

impl DeviceProfile {
    /// Battery percentage assumed when a request omits it.
    pub const DEFAULT_BATTERY_STATE: i64 = 70;
    /// Performance percentage assumed when a request omits it.
    pub const DEFAULT_PERFORMANCE: i64 = 80;
    /// Repair count assumed when a request omits it.
    pub const DEFAULT_REPAIR_FREQUENCY: i64 = 0;

    /// Profile for a device of the given age with every other field defaulted.
    #[must_use]
    pub const fn with_age(device_age: i64) -> Self {
        Self {
            device_age,
            battery_state: Self::DEFAULT_BATTERY_STATE,
            performance: Self::DEFAULT_PERFORMANCE,
            repair_frequency: Self::DEFAULT_REPAIR_FREQUENCY,
        }
    }

    /// Feature vector in [`FEATURE_NAMES`] order.
    #[must_use]
    pub fn features(&self) -> [f32; 4] {
        [
            self.device_age as f32,
            self.battery_state as f32,
            self.performance as f32,
            self.repair_frequency as f32,
        ]
    }
}

/// One labeled row of training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingExample {
    /// Device features
    pub profile: DeviceProfile,
    /// Expected recommendation
    pub label: Recommendation,
}

const fn example(
    device_age: i64,
    battery_state: i64,
    performance: i64,
    repair_frequency: i64,
    label: Recommendation,
) -> TrainingExample {
    TrainingExample {
        profile: DeviceProfile {
            device_age,
            battery_state,
            performance,
            repair_frequency,
        },
        label,
    }
}

/// The built-in training set.
pub const TRAINING_DATA: [TrainingExample; 5] = [
    example(1, 80, 90, 0, Recommendation::Keep),
    example(2, 70, 75, 1, Recommendation::Keep),
    example(3, 50, 60, 2, Recommendation::Sell),
    example(4, 40, 50, 2, Recommendation::Replace),
    example(5, 20, 30, 3, Recommendation::Replace),
];

/// Feature matrix and class-index labels for `examples`.
///
/// # Errors
///
/// Propagates matrix construction errors.
pub fn to_training_matrix(examples: &[TrainingExample]) -> Result<(Matrix<f32>, Vec<usize>)> {
    let rows: Vec<[f32; 4]> = examples.iter().map(|e| e.profile.features()).collect();
    let labels = examples.iter().map(|e| e.label.index()).collect();
    Ok((Matrix::from_rows(&rows)?, labels))
}
