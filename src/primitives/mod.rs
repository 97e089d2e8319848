//! Core compute primitives.
//!
//! The decision tree and the train/test split both operate on [`Matrix`].

mod matrix;

pub use matrix::Matrix;
