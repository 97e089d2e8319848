//! Helper functions for tree building.
//!
//! Splits are evaluated over row indices into the original training matrix
//! so no intermediate matrices are materialized while growing the tree.

use super::{Leaf, Node, TreeNode};
use crate::primitives::Matrix;
use std::collections::BTreeMap;

/// Per-class sample counts, ordered by class index.
fn class_counts(labels: impl Iterator<Item = usize>) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Calculate Gini impurity for a set of labels.
///
/// Gini = 1 - Σ(p_i²); 0.0 for a pure set.
pub(super) fn gini_impurity(labels: &[usize]) -> f32 {
    if labels.is_empty() {
        return 0.0;
    }

    let n = labels.len() as f32;
    class_counts(labels.iter().copied())
        .values()
        .fold(1.0, |gini, &count| {
            let p = count as f32 / n;
            gini - p * p
        })
}

/// Weighted Gini impurity of a two-way split.
pub(super) fn gini_split(left_labels: &[usize], right_labels: &[usize]) -> f32 {
    let n_left = left_labels.len() as f32;
    let n_right = right_labels.len() as f32;
    let n_total = n_left + n_right;

    if n_total == 0.0 {
        return 0.0;
    }

    (n_left / n_total) * gini_impurity(left_labels)
        + (n_right / n_total) * gini_impurity(right_labels)
}

/// Most frequent label; ties go to the smallest class index.
pub(super) fn majority_class(labels: &[usize]) -> usize {
    class_counts(labels.iter().copied())
        .into_iter()
        .fold((0, 0), |(best, best_count), (label, count)| {
            if count > best_count {
                (label, count)
            } else {
                (best, best_count)
            }
        })
        .0
}

/// Sorted distinct values, merging values closer than 1e-10.
pub(super) fn sorted_unique_values(values: &[f32]) -> Vec<f32> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    sorted.dedup_by(|a, b| (*a - *b).abs() <= 1e-10);
    sorted
}

/// Best midpoint threshold for one feature column.
///
/// Returns `Some((threshold, gain))` for the first threshold with the
/// highest strictly positive information gain.
pub(super) fn find_best_split_for_feature(values: &[f32], labels: &[usize]) -> Option<(f32, f32)> {
    if values.len() < 2 {
        return None;
    }

    let unique = sorted_unique_values(values);
    let current_impurity = gini_impurity(labels);
    let mut best: Option<(f32, f32)> = None;

    for pair in unique.windows(2) {
        let threshold = (pair[0] + pair[1]) / 2.0;
        let (left, right): (Vec<(f32, usize)>, Vec<(f32, usize)>) = values
            .iter()
            .copied()
            .zip(labels.iter().copied())
            .partition(|&(v, _)| v <= threshold);
        if left.is_empty() || right.is_empty() {
            continue;
        }
        let left: Vec<usize> = left.into_iter().map(|(_, l)| l).collect();
        let right: Vec<usize> = right.into_iter().map(|(_, l)| l).collect();

        let gain = current_impurity - gini_split(&left, &right);
        if gain > best.map_or(0.0, |(_, g)| g) {
            best = Some((threshold, gain));
        }
    }

    best
}

/// Best (feature, threshold, gain) across all features for the given rows.
fn find_best_split(x: &Matrix<f32>, labels: &[usize], indices: &[usize]) -> Option<(usize, f32, f32)> {
    if indices.len() < 2 {
        return None;
    }

    let mut best: Option<(usize, f32, f32)> = None;
    for feature_idx in 0..x.n_cols() {
        let column: Vec<f32> = indices.iter().map(|&row| x.get(row, feature_idx)).collect();
        if let Some((threshold, gain)) = find_best_split_for_feature(&column, labels) {
            if gain > best.map_or(0.0, |(_, _, g)| g) {
                best = Some((feature_idx, threshold, gain));
            }
        }
    }
    best
}

fn leaf(labels: &[usize]) -> TreeNode {
    TreeNode::Leaf(Leaf {
        class_label: majority_class(labels),
        n_samples: labels.len(),
    })
}

/// Build a decision tree recursively over the rows in `indices`.
///
/// # Arguments
///
/// * `x` - Full training matrix
/// * `y` - Labels for every row of `x`
/// * `indices` - Rows that reached this node
/// * `depth` - Current depth in tree
/// * `max_depth` - Maximum allowed depth (None = unlimited)
pub(super) fn build_tree(
    x: &Matrix<f32>,
    y: &[usize],
    indices: &[usize],
    depth: usize,
    max_depth: Option<usize>,
) -> TreeNode {
    let labels: Vec<usize> = indices.iter().map(|&row| y[row]).collect();

    // Pure node or depth limit
    let pure = labels.windows(2).all(|w| w[0] == w[1]);
    if pure || max_depth.is_some_and(|limit| depth >= limit) {
        return leaf(&labels);
    }

    let Some((feature_idx, threshold, _gain)) = find_best_split(x, &labels, indices) else {
        return leaf(&labels);
    };

    let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&row| x.get(row, feature_idx) <= threshold);

    TreeNode::Node(Node {
        feature_idx,
        threshold,
        left: Box::new(build_tree(x, y, &left_indices, depth + 1, max_depth)),
        right: Box::new(build_tree(x, y, &right_indices, depth + 1, max_depth)),
    })
}
