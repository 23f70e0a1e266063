//! Review submission: store the review body, then register its content id
//! on-chain. Storing always happens first so the registry never points at
//! content that was not written.

use leptos::logging::{error, log};

use crate::chain::ReviewRegistry;
use crate::content_store::ContentStore;
use crate::error::ReviewError;
use crate::flows::lifecycle::{TxLifecycle, TxStatus};
use crate::models::address::TxHash;
use crate::models::review::{ContentId, ReviewDraft};
use crate::utils::time::now_millis;
use crate::wallet::WalletSession;

/// What a confirmed submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedReview {
    pub product_id: u64,
    pub content_id: ContentId,
    pub tx_hash: TxHash,
}

pub struct ReviewSubmission<S, R> {
    store: S,
    registry: R,
    lifecycle: TxLifecycle,
}

impl<S, R> ReviewSubmission<S, R>
where
    S: ContentStore,
    R: ReviewRegistry,
{
    pub fn new(store: S, registry: R) -> Self {
        Self {
            store,
            registry,
            lifecycle: TxLifecycle::for_submission(),
        }
    }

    pub fn status(&self) -> &TxStatus {
        self.lifecycle.status()
    }

    pub fn reset(&mut self) -> Result<(), ReviewError> {
        self.lifecycle.reset()
    }

    /// Runs the whole submission. `observer` sees every status change,
    /// including the terminal one.
    ///
    /// Precondition failures (wallet, rating, text) are returned without
    /// leaving Idle and without touching the store. Anything that goes wrong
    /// afterwards ends in `Failed`; there is no retry.
    pub async fn submit<F>(
        &mut self,
        wallet: &WalletSession,
        product_id: u64,
        draft: ReviewDraft,
        mut observer: F,
    ) -> Result<SubmittedReview, ReviewError>
    where
        F: FnMut(&TxStatus),
    {
        if !matches!(self.lifecycle.status(), TxStatus::Idle) {
            return Err(ReviewError::InvalidTransition {
                from: self.lifecycle.status().label(),
                to: TxStatus::Uploading.label(),
            });
        }
        let reviewer = wallet.require_address()?;
        let payload = draft.into_payload(product_id, now_millis())?;

        observer(self.lifecycle.advance(TxStatus::Uploading)?);
        let content_id = match self.store.store(&payload).await {
            Ok(id) => id,
            Err(err) => return Err(self.fail(err, &mut observer)),
        };
        log!("[SUBMIT] Review for product {} uploaded as {}", product_id, content_id);

        observer(self.lifecycle.advance(TxStatus::AwaitingConfirmation)?);
        let tx_hash = match self
            .registry
            .submit_review(&reviewer, product_id, &content_id)
            .await
        {
            Ok(tx_hash) => tx_hash,
            Err(err) => return Err(self.fail(err, &mut observer)),
        };
        let receipt = match self.registry.wait_for_receipt(&tx_hash).await {
            Ok(receipt) => receipt,
            Err(err) => return Err(self.fail(err, &mut observer)),
        };

        observer(self.lifecycle.advance(TxStatus::Confirmed {
            tx_hash: receipt.tx_hash,
        })?);
        Ok(SubmittedReview {
            product_id,
            content_id,
            tx_hash: receipt.tx_hash,
        })
    }

    fn fail<F>(&mut self, err: ReviewError, observer: &mut F) -> ReviewError
    where
        F: FnMut(&TxStatus),
    {
        error!("[SUBMIT] Review submission failed: {}", err);
        match self.lifecycle.advance(TxStatus::Failed {
            reason: err.to_string(),
        }) {
            Ok(status) => observer(status),
            Err(transition) => error!("[SUBMIT] {}", transition),
        }
        err
    }
}
