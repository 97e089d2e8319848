//! Core traits for ML estimators.

use crate::error::Result;
use crate::primitives::Matrix;

/// Supervised classifier over dense `f32` features and integer class labels.
///
/// Classifiers implement fit/predict/score following sklearn conventions.
///
/// # Examples
///
/// ```
/// use device_advisor::prelude::*;
///
/// let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 8.0, 9.0]).unwrap();
/// let y = vec![0, 0, 1, 1];
///
/// let mut tree = DecisionTreeClassifier::new();
/// tree.fit(&x, &y).unwrap();
/// assert_eq!(tree.predict(&x).unwrap(), y);
/// assert!((tree.score(&x, &y).unwrap() - 1.0).abs() < 1e-6);
/// ```
pub trait Classifier {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (dimension mismatch, empty data).
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()>;

    /// Predicts one class label per row of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is unfitted or `x` has the wrong width.
    fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>>;

    /// Accuracy (fraction of correct predictions) on `x` against `y`.
    ///
    /// # Errors
    ///
    /// Propagates prediction errors.
    fn score(&self, x: &Matrix<f32>, y: &[usize]) -> Result<f32> {
        let predictions = self.predict(x)?;
        if y.is_empty() {
            return Ok(0.0);
        }
        let correct = predictions
            .iter()
            .zip(y.iter())
            .filter(|(pred, truth)| pred == truth)
            .count();
        Ok(correct as f32 / y.len() as f32)
    }
}
