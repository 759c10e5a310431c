//! Crate-level error type.

use coachline_runtime::StoreError;
use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::search::SearchError;

/// Anything that can go wrong while driving a booking
#[derive(Error, Debug)]
pub enum BookingError {
    /// The search form is incomplete
    #[error("search: {0}")]
    Search(#[from] SearchError),

    /// The passenger form is incomplete
    #[error("checkout: {0}")]
    Checkout(#[from] CheckoutError),

    /// The configuration is unusable
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// The store rejected an action or timed out
    #[error("store: {0}")]
    Store(#[from] StoreError),

    /// The wizard ended up on a different step than expected
    #[error("expected the {expected} step, wizard is on {actual}")]
    UnexpectedStep {
        /// Step the caller expected
        expected: crate::wizard::StepKind,
        /// Step the wizard is on
        actual: crate::wizard::StepKind,
    },

    /// Serializing a confirmation failed
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for booking operations
pub type Result<T> = std::result::Result<T, BookingError>;
