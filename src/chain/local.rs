use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use leptos::logging::{log, warn};
use sha2::{Digest, Sha256};

use super::{abi, ChainClient, ReceiptContract, ReviewRegistry, TxReceipt};
use crate::error::ReviewError;
use crate::models::address::{Address, TxHash};
use crate::models::review::{ContentId, ProductReviewRecord, ReviewRecord};
use crate::utils::time::{now_millis, sleep};

/// Account the local wallet connector signs with.
pub const DEV_ACCOUNT: Address = Address::from_bytes([
    0x5e, 0xed, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x01,
]);

#[derive(Debug, Clone)]
enum PendingAction {
    SubmitReview {
        reviewer: Address,
        product_id: u64,
        content_id: ContentId,
    },
    MintReceipt {
        product_id: u64,
        recipient: Address,
    },
}

#[derive(Debug, Clone)]
struct PendingTx {
    action: PendingAction,
    reverted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReceiptToken {
    token_id: u64,
    owner: Address,
    product_id: u64,
}

#[derive(Debug, Default)]
struct ChainState {
    block_number: u64,
    nonce: u64,
    next_token_id: u64,
    reviews: Vec<ReviewRecord>,
    receipts: Vec<ReceiptToken>,
    pending: HashMap<TxHash, PendingTx>,
    mined: HashMap<TxHash, TxReceipt>,
    reject_next_signature: bool,
    revert_next: bool,
}

/// In-process stand-in for both contracts.
///
/// Write calls return a transaction hash immediately and take effect when the
/// transaction is awaited with [`ChainClient::wait_for_receipt`], which is when
/// the local chain "mines" it. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct LocalChain {
    state: Rc<RefCell<ChainState>>,
    confirmation_latency: Duration,
    receipt_gate: bool,
}

impl LocalChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay applied before each receipt is returned.
    pub fn with_confirmation_latency(mut self, latency: Duration) -> Self {
        self.confirmation_latency = latency;
        self
    }

    /// Makes `submitReview` revert unless the reviewer holds a receipt for the product.
    pub fn with_receipt_gate(mut self) -> Self {
        self.receipt_gate = true;
        self
    }

    /// The next write call fails as if the user declined to sign it.
    pub fn reject_next_signature(&self) {
        self.state.borrow_mut().reject_next_signature = true;
    }

    /// The next write call is accepted but reverts when mined.
    pub fn revert_next(&self) {
        self.state.borrow_mut().revert_next = true;
    }

    /// Appends a review record as if it had been mined earlier.
    pub fn seed_review(&self, record: ReviewRecord) {
        self.state.borrow_mut().reviews.push(record);
    }

    pub fn review_count(&self) -> usize {
        self.state.borrow().reviews.len()
    }

    pub fn block_number(&self) -> u64 {
        self.state.borrow().block_number
    }

    fn send(&self, from: &Address, function: &str, action: PendingAction) -> Result<TxHash, ReviewError> {
        let mut state = self.state.borrow_mut();
        if std::mem::take(&mut state.reject_next_signature) {
            warn!("[CHAIN] {} from {} rejected by signer", function, from);
            return Err(ReviewError::ChainRejection("User rejected the request.".to_string()));
        }

        state.nonce += 1;
        let mut hasher = Sha256::new();
        hasher.update(state.nonce.to_le_bytes());
        hasher.update(from.as_bytes());
        hasher.update(function.as_bytes());
        let tx_hash = TxHash::from_bytes(hasher.finalize().into());

        let reverted = std::mem::take(&mut state.revert_next);
        state.pending.insert(tx_hash, PendingTx { action, reverted });
        log!("[CHAIN] {} sent by {} as {}", function, from, tx_hash);
        Ok(tx_hash)
    }

    fn holds_receipt(state: &ChainState, user: &Address, product_id: u64) -> bool {
        state
            .receipts
            .iter()
            .any(|r| r.owner == *user && r.product_id == product_id)
    }
}

impl ChainClient for LocalChain {
    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<TxReceipt, ReviewError> {
        sleep(self.confirmation_latency).await;

        let mut state = self.state.borrow_mut();
        if let Some(receipt) = state.mined.get(tx_hash) {
            return Ok(receipt.clone());
        }
        let pending = state
            .pending
            .remove(tx_hash)
            .ok_or_else(|| ReviewError::ChainRejection(format!("unknown transaction {tx_hash}")))?;

        let gated_out = match &pending.action {
            PendingAction::SubmitReview {
                reviewer,
                product_id,
                ..
            } => self.receipt_gate && !Self::holds_receipt(&state, reviewer, *product_id),
            PendingAction::MintReceipt { .. } => false,
        };
        if pending.reverted || gated_out {
            warn!("[CHAIN] Transaction {} reverted", tx_hash);
            return Err(ReviewError::ChainRejection("execution reverted".to_string()));
        }

        state.block_number += 1;
        let timestamp = (now_millis() / 1000).max(0) as u64;
        let minted_token = match pending.action {
            PendingAction::SubmitReview {
                reviewer,
                product_id,
                content_id,
            } => {
                state.reviews.push(ReviewRecord {
                    reviewer,
                    product_id,
                    content_id,
                    timestamp,
                });
                None
            }
            PendingAction::MintReceipt {
                product_id,
                recipient,
            } => {
                state.next_token_id += 1;
                let token_id = state.next_token_id;
                state.receipts.push(ReceiptToken {
                    token_id,
                    owner: recipient,
                    product_id,
                });
                Some(token_id)
            }
        };

        let receipt = TxReceipt {
            tx_hash: *tx_hash,
            block_number: state.block_number,
            minted_token,
        };
        state.mined.insert(*tx_hash, receipt.clone());
        log!("[CHAIN] Transaction {} mined in block {}", tx_hash, receipt.block_number);
        Ok(receipt)
    }
}

impl ReceiptContract for LocalChain {
    async fn mint_receipt(
        &self,
        from: &Address,
        product_id: u64,
        recipient: &Address,
    ) -> Result<TxHash, ReviewError> {
        self.send(
            from,
            abi::MINT_RECEIPT,
            PendingAction::MintReceipt {
                product_id,
                recipient: *recipient,
            },
        )
    }

    async fn has_receipt(&self, user: &Address, product_id: u64) -> Result<bool, ReviewError> {
        Ok(Self::holds_receipt(&self.state.borrow(), user, product_id))
    }

    async fn balance_of(&self, owner: &Address) -> Result<u64, ReviewError> {
        let state = self.state.borrow();
        Ok(state.receipts.iter().filter(|r| r.owner == *owner).count() as u64)
    }
}

impl ReviewRegistry for LocalChain {
    async fn submit_review(
        &self,
        from: &Address,
        product_id: u64,
        content_id: &ContentId,
    ) -> Result<TxHash, ReviewError> {
        self.send(
            from,
            abi::SUBMIT_REVIEW,
            PendingAction::SubmitReview {
                reviewer: *from,
                product_id,
                content_id: content_id.clone(),
            },
        )
    }

    async fn get_product_reviews(
        &self,
        product_id: u64,
    ) -> Result<Vec<ProductReviewRecord>, ReviewError> {
        let state = self.state.borrow();
        Ok(state
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .map(|r| ProductReviewRecord {
                reviewer: r.reviewer,
                content_id: r.content_id.clone(),
                timestamp: r.timestamp,
            })
            .collect())
    }

    async fn get_all_reviews(&self) -> Result<Vec<ReviewRecord>, ReviewError> {
        Ok(self.state.borrow().reviews.clone())
    }
}
