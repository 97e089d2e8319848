//! Train/test splitting.
//!
//! # Example
//!
//! ```
//! use device_advisor::model_selection::train_test_split;
//! use device_advisor::primitives::Matrix;
//!
//! let x = Matrix::from_vec(10, 2, (0..20).map(|i| i as f32).collect()).expect("valid matrix");
//! let y: Vec<usize> = (0..10).map(|i| i % 2).collect();
//!
//! let split = train_test_split(&x, &y, 0.2, Some(42)).expect("split should succeed");
//! assert_eq!(split.x_train.n_rows(), 8);
//! assert_eq!(split.y_test.len(), 2);
//! ```

use crate::error::{AdvisorError, Result};
use crate::primitives::Matrix;
use rand_mt::Mt;

/// Output of [`train_test_split`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit<L> {
    /// Training features
    pub x_train: Matrix<f32>,
    /// Held-out features
    pub x_test: Matrix<f32>,
    /// Training labels
    pub y_train: Vec<L>,
    /// Held-out labels
    pub y_test: Vec<L>,
    /// Original row indices of the training partition, in shuffled order
    pub train_indices: Vec<usize>,
    /// Original row indices of the held-out partition, in shuffled order
    pub test_indices: Vec<usize>,
}

/// Validates inputs and returns `(n_train, n_test)`.
fn validate_split_inputs(n_samples: usize, n_labels: usize, test_size: f64) -> Result<(usize, usize)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(AdvisorError::InvalidHyperparameter {
            param: "test_size".to_string(),
            value: test_size.to_string(),
            constraint: "a fraction strictly between 0 and 1".to_string(),
        });
    }

    if n_samples != n_labels {
        return Err(AdvisorError::DimensionMismatch {
            expected: format!("{n_samples} labels"),
            actual: format!("{n_labels} labels"),
        });
    }

    let n_test = (n_samples as f64 * test_size).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);

    if n_test == 0 || n_train == 0 {
        return Err(AdvisorError::EmptyPartition { n_train, n_test });
    }

    Ok((n_train, n_test))
}

/// Uniform draw from `0..=max` by masked rejection sampling.
fn bounded(rng: &mut Mt, max: u64) -> u64 {
    if max == 0 {
        return 0;
    }
    let mask = u64::MAX >> max.leading_zeros();
    loop {
        let raw = if max <= u64::from(u32::MAX) {
            u64::from(rng.next_u32())
        } else {
            (u64::from(rng.next_u32()) << 32) | u64::from(rng.next_u32())
        };
        let value = raw & mask;
        if value <= max {
            return value;
        }
    }
}

/// Permutation of `0..n_samples` drawn from a 32-bit Mersenne Twister.
///
/// Fisher-Yates from the last position down, so a given seed yields the
/// same order as the classic MT19937 `permutation(n)` of scientific Python
/// stacks.
fn permutation(n_samples: usize, random_state: Option<u64>) -> Result<Vec<usize>> {
    let seed = match random_state {
        Some(seed) => u32::try_from(seed).map_err(|_| AdvisorError::InvalidHyperparameter {
            param: "random_state".to_string(),
            value: seed.to_string(),
            constraint: "a seed below 2^32".to_string(),
        })?,
        None => rand::random(),
    };

    let mut rng = Mt::new(seed);
    let mut indices: Vec<usize> = (0..n_samples).collect();
    for i in (1..n_samples).rev() {
        let j = bounded(&mut rng, i as u64) as usize;
        indices.swap(i, j);
    }
    Ok(indices)
}

/// Splits rows of `x` and `y` into random train and test partitions.
///
/// `ceil(n * test_size)` rows go to the test partition, taken from the
/// front of a seeded permutation; the rest, in permutation order, form the
/// training partition. With a `random_state` the split is reproducible.
///
/// # Errors
///
/// Returns an error if `test_size` is outside (0, 1), if `random_state`
/// does not fit in 32 bits, if `x` and `y` disagree on the number of
/// samples, or if either partition would be empty.
pub fn train_test_split<L: Clone>(
    x: &Matrix<f32>,
    y: &[L],
    test_size: f64,
    random_state: Option<u64>,
) -> Result<TrainTestSplit<L>> {
    let (_, n_test) = validate_split_inputs(x.n_rows(), y.len(), test_size)?;

    let mut test_indices = permutation(x.n_rows(), random_state)?;
    let train_indices = test_indices.split_off(n_test);

    let gather = |indices: &[usize]| indices.iter().map(|&i| y[i].clone()).collect::<Vec<L>>();

    Ok(TrainTestSplit {
        x_train: x.select_rows(&train_indices),
        x_test: x.select_rows(&test_indices),
        y_train: gather(&train_indices),
        y_test: gather(&test_indices),
        train_indices,
        test_indices,
    })
}
