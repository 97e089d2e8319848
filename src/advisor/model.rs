//! The trained device advisor.

use super::dataset::{
    to_training_matrix, DeviceProfile, Recommendation, TrainingExample, FEATURE_NAMES,
    TRAINING_DATA,
};
use super::request::PredictRequest;
use crate::error::Result;
use crate::model_selection::train_test_split;
use crate::traits::Classifier;
use crate::tree::DecisionTreeClassifier;
use serde::Serialize;
use tracing::{debug, info};

/// Training configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    /// Fraction of rows held out from fitting
    pub test_size: f64,
    /// Shuffle seed; `None` draws a fresh one
    pub seed: Option<u64>,
    /// Tree depth limit; `None` grows until pure
    pub max_depth: Option<usize>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            test_size: 0.3,
            seed: Some(42),
            max_depth: None,
        }
    }
}

impl TrainerConfig {
    /// Sets the held-out fraction.
    #[must_use]
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    /// Sets the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Limits tree depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Shape of the fitted model, as reported by `GET /model`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    /// Tree-growing algorithm
    pub algorithm: &'static str,
    /// Split criterion
    pub criterion: &'static str,
    /// Feature names in vector order
    pub features: Vec<&'static str>,
    /// Labels present in the training partition, in class-index order
    pub labels: Vec<Recommendation>,
    /// Fitted tree depth
    pub depth: usize,
    /// Fitted leaf count
    pub leaves: usize,
    /// Rows used for fitting
    pub train_samples: usize,
    /// Rows held out
    pub holdout_samples: usize,
}

/// A decision tree fitted on device-condition data.
///
/// Built once and then only read; share it behind an `Arc`.
///
/// # Example
///
/// ```
/// use device_advisor::advisor::{DeviceAdvisor, DeviceProfile, Recommendation, TrainerConfig};
///
/// let advisor = DeviceAdvisor::train(&TrainerConfig::default()).expect("training succeeds");
/// let profile = DeviceProfile { device_age: 1, battery_state: 80, performance: 90, repair_frequency: 0 };
/// assert_eq!(advisor.recommend(&profile).unwrap(), Recommendation::Keep);
/// ```
#[derive(Debug, Clone)]
pub struct DeviceAdvisor {
    tree: DecisionTreeClassifier,
    classes: Vec<Recommendation>,
    training: Vec<TrainingExample>,
    holdout: Vec<TrainingExample>,
}

impl DeviceAdvisor {
    /// Splits the built-in data set and fits a tree on the training part.
    ///
    /// # Errors
    ///
    /// Returns an error if the split or fit fails.
    pub fn train(config: &TrainerConfig) -> Result<Self> {
        Self::train_on(&TRAINING_DATA, config)
    }

    /// Same as [`DeviceAdvisor::train`] over arbitrary examples.
    ///
    /// # Errors
    ///
    /// Returns an error if the split or fit fails.
    pub fn train_on(examples: &[TrainingExample], config: &TrainerConfig) -> Result<Self> {
        let (x, y) = to_training_matrix(examples)?;
        let split = train_test_split(&x, &y, config.test_size, config.seed)?;

        let mut tree = match config.max_depth {
            Some(depth) => DecisionTreeClassifier::new().with_max_depth(depth),
            None => DecisionTreeClassifier::new(),
        };
        tree.fit(&split.x_train, &split.y_train)?;
        let (depth, leaves) = (tree.depth()?, tree.n_leaves()?);

        let mut class_indices = split.y_train.clone();
        class_indices.sort_unstable();
        class_indices.dedup();
        let classes = class_indices
            .into_iter()
            .map(Recommendation::from_index)
            .collect::<Result<Vec<_>>>()?;

        let pick = |indices: &[usize]| indices.iter().map(|&i| examples[i]).collect::<Vec<_>>();
        let advisor = Self {
            classes,
            training: pick(&split.train_indices),
            holdout: pick(&split.test_indices),
            tree,
        };

        info!(
            train = advisor.training.len(),
            holdout = advisor.holdout.len(),
            depth,
            leaves,
            classes = ?advisor.classes,
            "decision tree fitted"
        );
        Ok(advisor)
    }

    /// Predicts a recommendation for one device.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree yields a class with no label.
    pub fn recommend(&self, profile: &DeviceProfile) -> Result<Recommendation> {
        let class = self.tree.predict_one(&profile.features())?;
        let recommendation = Recommendation::from_index(class)?;
        debug!(?profile, %recommendation, "prediction");
        Ok(recommendation)
    }

    /// Validates a decoded request and predicts for it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AdvisorError::InvalidDeviceAge`] without consulting
    /// the tree when the age is negative or missing.
    pub fn predict(&self, request: PredictRequest) -> Result<Recommendation> {
        let profile = request.into_profile()?;
        self.recommend(&profile)
    }

    /// Labels seen during fitting; the only ones [`DeviceAdvisor::recommend`] can return.
    #[must_use]
    pub fn classes(&self) -> &[Recommendation] {
        &self.classes
    }

    /// Rows the tree was fitted on.
    #[must_use]
    pub fn training_examples(&self) -> &[TrainingExample] {
        &self.training
    }

    /// Rows held out from fitting.
    #[must_use]
    pub fn holdout_examples(&self) -> &[TrainingExample] {
        &self.holdout
    }

    /// Underlying classifier.
    #[must_use]
    pub fn classifier(&self) -> &DecisionTreeClassifier {
        &self.tree
    }

    /// Describes the fitted model.
    ///
    /// # Errors
    ///
    /// Only fails if the tree is unfitted, which `train` rules out.
    pub fn summary(&self) -> Result<ModelSummary> {
        Ok(ModelSummary {
            algorithm: "cart",
            criterion: "gini",
            features: FEATURE_NAMES.to_vec(),
            labels: self.classes.clone(),
            depth: self.tree.depth()?,
            leaves: self.tree.n_leaves()?,
            train_samples: self.training.len(),
            holdout_samples: self.holdout.len(),
        })
    }
}
