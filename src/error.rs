use thiserror::Error;

use crate::models::review::ContentId;

/// Errors surfaced by the review flows. None of them is fatal to the app:
/// each one ends the flow that raised it and the user may start over.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("wallet not connected")]
    WalletNotConnected,

    #[error("content store transport failed: {0}")]
    Transport(String),

    #[error("transaction rejected: {0}")]
    ChainRejection(String),

    #[error("content {0} could not be resolved")]
    ResolutionMiss(ContentId),

    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Input problems reported inline by the review form.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a star rating")]
    RatingRequired,

    #[error("Rating {0} is out of range, expected 1-5")]
    RatingOutOfRange(u8),

    #[error("Please write your review")]
    TextRequired,
}

pub type Result<T, E = ReviewError> = std::result::Result<T, E>;
