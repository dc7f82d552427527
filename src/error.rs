//! Defines [`GeoError`], representing all errors returned by this crate.

use std::fmt::Debug;

use thiserror::Error;

use crate::algorithm::Operation;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoError {
    /// A structural invariant of the geometry model was violated, e.g. a ring with two points.
    #[error("{0}")]
    InvalidGeometry(String),

    /// Text or binary input that could not be decoded.
    #[error("{0}")]
    MalformedInput(String),

    /// A geometric operation could not produce a well-defined result because an input is
    /// topologically invalid.
    #[error(
        "Failed to {} geometry {}: TopologyException: {detail}",
        .operation.verb(),
        .operation.name()
    )]
    TopologyException {
        /// The operation that failed.
        operation: Operation,
        /// Human-readable description, including a location hint when one is available.
        detail: String,
    },

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl GeoError {
    pub(crate) fn topology(operation: Operation, detail: impl Into<String>) -> Self {
        let err = GeoError::TopologyException {
            operation,
            detail: detail.into(),
        };
        log::debug!("{err}");
        err
    }
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoError>;
