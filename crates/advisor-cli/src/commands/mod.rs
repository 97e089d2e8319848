//! Command implementations

pub(crate) mod predict;
pub(crate) mod serve;
