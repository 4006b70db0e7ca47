use alloc::string::String;

use thiserror::Error;

use crate::Layout;

/// A configuration that cannot be accepted. Raised before any engine state changes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("fixed item size must be greater than zero")]
    ZeroItemSize,

    #[error("estimated item size must be greater than zero")]
    ZeroEstimatedItemSize,

    #[error("{layout:?} layout requires a numeric viewport extent")]
    MissingViewportExtent { layout: Layout },

    #[error("{strategy} sizing does not accept a {item_size} item size")]
    SizeSpecMismatch {
        strategy: &'static str,
        item_size: &'static str,
    },

    #[error("direction `{direction}` conflicts with layout `{layout:?}`")]
    ConflictingLayout { direction: String, layout: Layout },

    #[error("unknown layout or direction `{0}`")]
    UnknownOrientation(String),
}

/// A size strategy reported an unusable extent for a measured index.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MeasureError {
    #[error("item {index} has a non-positive size")]
    NonPositiveSize { index: usize },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Measure(#[from] MeasureError),

    #[error("index {index} is out of range for {count} items")]
    IndexOutOfRange { index: usize, count: usize },
}
