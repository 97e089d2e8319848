//! Decision tree classification.
//!
//! Implements CART (Classification and Regression Trees) using Gini
//! impurity. Trees grow until every leaf is pure unless a maximum depth is
//! set.
//!
//! # Example
//!
//! ```
//! use device_advisor::prelude::*;
//!
//! // Training data (simple 2D binary classification)
//! let x = Matrix::from_vec(4, 2, vec![
//!     0.0, 0.0,  // class 0
//!     0.0, 1.0,  // class 0
//!     1.0, 0.0,  // class 1
//!     1.0, 1.0,  // class 1
//! ]).expect("Matrix creation should succeed");
//! let y = vec![0, 0, 1, 1];
//!
//! let mut tree = DecisionTreeClassifier::new().with_max_depth(3);
//! tree.fit(&x, &y).expect("fit should succeed");
//!
//! assert_eq!(tree.predict_one(&[0.9, 0.2]).unwrap(), 1);
//! ```

mod helpers;

use crate::error::{AdvisorError, Result};
use crate::primitives::Matrix;
use crate::traits::Classifier;
use serde::{Deserialize, Serialize};

use helpers::build_tree;

/// Internal node in a decision tree.
///
/// Contains a split condition (feature and threshold) and pointers to
/// left and right subtrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f32,
    /// Left subtree (samples where feature <= threshold)
    pub left: Box<TreeNode>,
    /// Right subtree (samples where feature > threshold)
    pub right: Box<TreeNode>,
}

/// Leaf node in a decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    /// Predicted class label for this leaf
    pub class_label: usize,
    /// Number of training samples in this leaf
    pub n_samples: usize,
}

/// A node in a decision tree (either internal node or leaf).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal decision node with split condition
    Node(Node),
    /// Leaf node with class prediction
    Leaf(Leaf),
}

impl TreeNode {
    /// Returns the depth of the tree rooted at this node.
    ///
    /// Leaf nodes have depth 0, internal nodes have depth 1 + max(left, right).
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Node(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }

    /// Number of leaves under this node.
    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Node(node) => node.left.n_leaves() + node.right.n_leaves(),
        }
    }

    /// Walks from this node to the leaf that `sample` falls into.
    fn leaf_for(&self, sample: &[f32]) -> &Leaf {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return leaf,
                TreeNode::Node(internal) => {
                    node = if sample[internal.feature_idx] <= internal.threshold {
                        &internal.left
                    } else {
                        &internal.right
                    };
                }
            }
        }
    }
}

/// Decision tree classifier using the CART algorithm.
///
/// Uses Gini impurity for splitting criterion and builds trees recursively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    tree: Option<TreeNode>,
    max_depth: Option<usize>,
    /// Number of features the model was trained on (for validation)
    n_features: Option<usize>,
}

impl DecisionTreeClassifier {
    /// Creates a new decision tree classifier with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum depth of the tree.
    ///
    /// # Arguments
    ///
    /// * `depth` - Maximum depth (root has depth 0)
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Configured depth limit, if any.
    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Whether `fit` has completed.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.tree.is_some()
    }

    /// Number of features seen during `fit`.
    #[must_use]
    pub fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    /// Root of the fitted tree.
    #[must_use]
    pub fn root(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    /// Depth of the fitted tree (0 for a single leaf).
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::NotFitted`] before `fit`.
    pub fn depth(&self) -> Result<usize> {
        self.fitted_tree().map(TreeNode::depth)
    }

    /// Leaf count of the fitted tree.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::NotFitted`] before `fit`.
    pub fn n_leaves(&self) -> Result<usize> {
        self.fitted_tree().map(TreeNode::n_leaves)
    }

    /// Predicts the class label for a single sample.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::NotFitted`] before `fit` and
    /// [`AdvisorError::DimensionMismatch`] if the sample width differs from
    /// the training data.
    pub fn predict_one(&self, sample: &[f32]) -> Result<usize> {
        let tree = self.fitted_tree()?;
        if let Some(expected) = self.n_features {
            if sample.len() != expected {
                return Err(AdvisorError::DimensionMismatch {
                    expected: format!("{expected} features"),
                    actual: format!("{} features", sample.len()),
                });
            }
        }
        Ok(tree.leaf_for(sample).class_label)
    }

    fn fitted_tree(&self) -> Result<&TreeNode> {
        self.tree.as_ref().ok_or(AdvisorError::NotFitted)
    }
}

impl Classifier for DecisionTreeClassifier {
    /// Fits the decision tree to training data.
    ///
    /// # Arguments
    ///
    /// * `x` - Training features (n_samples × n_features)
    /// * `y` - Training labels (n_samples class indices)
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        let (n_rows, n_cols) = x.shape();
        if n_rows != y.len() {
            return Err(AdvisorError::DimensionMismatch {
                expected: format!("{n_rows} labels"),
                actual: format!("{} labels", y.len()),
            });
        }
        if n_rows == 0 {
            return Err(AdvisorError::EmptyDataset);
        }

        let indices: Vec<usize> = (0..n_rows).collect();
        self.n_features = Some(n_cols);
        self.tree = Some(build_tree(x, y, &indices, 0, self.max_depth));
        Ok(())
    }

    fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        (0..x.n_rows())
            .map(|row| self.predict_one(x.row(row)))
            .collect()
    }
}
