use std::fmt;

use leptos::logging::log;

use crate::error::ReviewError;
use crate::models::address::TxHash;

/// User-visible status of a write flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TxStatus {
    #[default]
    Idle,
    Uploading,
    AwaitingConfirmation,
    Confirmed {
        tx_hash: TxHash,
    },
    Failed {
        reason: String,
    },
}

impl TxStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TxStatus::Idle => "Idle",
            TxStatus::Uploading => "Uploading",
            TxStatus::AwaitingConfirmation => "AwaitingConfirmation",
            TxStatus::Confirmed { .. } => "Confirmed",
            TxStatus::Failed { .. } => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TxStatus::Confirmed { .. } | TxStatus::Failed { .. })
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, TxStatus::Uploading | TxStatus::AwaitingConfirmation)
    }

    /// Short progress text for buttons and banners.
    pub fn progress_text(&self) -> &'static str {
        match self {
            TxStatus::Idle => "",
            TxStatus::Uploading => "Uploading review content...",
            TxStatus::AwaitingConfirmation => "Waiting for on-chain confirmation...",
            TxStatus::Confirmed { .. } => "Confirmed",
            TxStatus::Failed { .. } => "Failed",
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Single-direction state machine behind a write flow.
///
/// Review submissions go Idle → Uploading → AwaitingConfirmation; purchases
/// have nothing to upload and go straight from Idle to AwaitingConfirmation.
/// Both end in Confirmed or Failed, and only `reset` leaves a terminal state.
#[derive(Debug, Clone)]
pub struct TxLifecycle {
    name: &'static str,
    status: TxStatus,
    uploads: bool,
}

impl TxLifecycle {
    pub fn for_submission() -> Self {
        Self {
            name: "SUBMIT",
            status: TxStatus::Idle,
            uploads: true,
        }
    }

    pub fn for_purchase() -> Self {
        Self {
            name: "PURCHASE",
            status: TxStatus::Idle,
            uploads: false,
        }
    }

    pub fn status(&self) -> &TxStatus {
        &self.status
    }

    fn allows(&self, next: &TxStatus) -> bool {
        use TxStatus::*;
        match (&self.status, next) {
            (Idle, Uploading) => self.uploads,
            (Idle, AwaitingConfirmation) => !self.uploads,
            (Uploading, AwaitingConfirmation) | (Uploading, Failed { .. }) => true,
            (AwaitingConfirmation, Confirmed { .. }) | (AwaitingConfirmation, Failed { .. }) => true,
            _ => false,
        }
    }

    pub fn advance(&mut self, next: TxStatus) -> Result<&TxStatus, ReviewError> {
        if !self.allows(&next) {
            return Err(ReviewError::InvalidTransition {
                from: self.status.label(),
                to: next.label(),
            });
        }
        log!("[{}] {} -> {}", self.name, self.status, next);
        self.status = next;
        Ok(&self.status)
    }

    /// Returns a finished flow to Idle so the user can start again.
    pub fn reset(&mut self) -> Result<(), ReviewError> {
        if self.status.is_in_flight() {
            return Err(ReviewError::InvalidTransition {
                from: self.status.label(),
                to: TxStatus::Idle.label(),
            });
        }
        self.status = TxStatus::Idle;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash() -> TxHash {
        TxHash::from_bytes([1u8; 32])
    }

    #[test]
    fn test_submission_happy_path() {
        let mut lifecycle = TxLifecycle::for_submission();
        lifecycle.advance(TxStatus::Uploading).unwrap();
        lifecycle.advance(TxStatus::AwaitingConfirmation).unwrap();
        let status = lifecycle.advance(TxStatus::Confirmed { tx_hash: hash() }).unwrap();
        assert!(status.is_terminal());
    }

    #[test]
    fn test_submission_cannot_skip_upload() {
        let mut lifecycle = TxLifecycle::for_submission();
        let err = lifecycle.advance(TxStatus::AwaitingConfirmation).unwrap_err();
        assert_eq!(
            err,
            ReviewError::InvalidTransition {
                from: "Idle",
                to: "AwaitingConfirmation"
            }
        );
    }

    #[test]
    fn test_no_backward_transitions() {
        let mut lifecycle = TxLifecycle::for_submission();
        lifecycle.advance(TxStatus::Uploading).unwrap();
        lifecycle.advance(TxStatus::AwaitingConfirmation).unwrap();
        assert!(lifecycle.advance(TxStatus::Uploading).is_err());
        lifecycle
            .advance(TxStatus::Failed {
                reason: "rejected".into(),
            })
            .unwrap();
        assert!(lifecycle.advance(TxStatus::AwaitingConfirmation).is_err());
        assert!(lifecycle.advance(TxStatus::Confirmed { tx_hash: hash() }).is_err());
    }

    #[test]
    fn test_purchase_skips_upload() {
        let mut lifecycle = TxLifecycle::for_purchase();
        assert!(lifecycle.advance(TxStatus::Uploading).is_err());
        lifecycle.advance(TxStatus::AwaitingConfirmation).unwrap();
        lifecycle.advance(TxStatus::Confirmed { tx_hash: hash() }).unwrap();
    }

    #[test]
    fn test_reset() {
        let mut lifecycle = TxLifecycle::for_submission();
        lifecycle.advance(TxStatus::Uploading).unwrap();
        assert!(lifecycle.reset().is_err());
        lifecycle
            .advance(TxStatus::Failed {
                reason: "store down".into(),
            })
            .unwrap();
        lifecycle.reset().unwrap();
        assert_eq!(lifecycle.status(), &TxStatus::Idle);
    }
}
