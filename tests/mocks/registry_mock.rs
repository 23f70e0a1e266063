use std::cell::RefCell;
use std::rc::Rc;

use verireview::chain::{ChainClient, ReviewRegistry, TxReceipt};
use verireview::models::address::{Address, TxHash};
use verireview::models::review::{ContentId, ProductReviewRecord, ReviewRecord};
use verireview::ReviewError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitCall {
    pub from: Address,
    pub product_id: u64,
    pub content_id: ContentId,
}

#[derive(Default)]
struct RegistryState {
    submit_calls: Vec<SubmitCall>,
    records: Vec<ReviewRecord>,
    reject_signing: bool,
    next_timestamp: u64,
}

/// Review registry that records every call and mines each submission at an
/// increasing timestamp.
#[derive(Clone, Default)]
pub struct RecordingRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ReviewRecord>) -> Self {
        let registry = Self::default();
        registry.state.borrow_mut().records = records;
        registry
    }

    pub fn reject_signing(&self) {
        self.state.borrow_mut().reject_signing = true;
    }

    pub fn submit_calls(&self) -> Vec<SubmitCall> {
        self.state.borrow().submit_calls.clone()
    }

    pub fn records(&self) -> Vec<ReviewRecord> {
        self.state.borrow().records.clone()
    }
}

impl ChainClient for RecordingRegistry {
    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<TxReceipt, ReviewError> {
        let block_number = self.state.borrow().records.len() as u64;
        Ok(TxReceipt {
            tx_hash: *tx_hash,
            block_number,
            minted_token: None,
        })
    }
}

impl ReviewRegistry for RecordingRegistry {
    async fn submit_review(
        &self,
        from: &Address,
        product_id: u64,
        content_id: &ContentId,
    ) -> Result<TxHash, ReviewError> {
        let mut state = self.state.borrow_mut();
        if state.reject_signing {
            return Err(ReviewError::ChainRejection("User rejected the request.".to_string()));
        }
        state.submit_calls.push(SubmitCall {
            from: *from,
            product_id,
            content_id: content_id.clone(),
        });
        state.next_timestamp += 100;
        let timestamp = state.next_timestamp;
        state.records.push(ReviewRecord {
            reviewer: *from,
            product_id,
            content_id: content_id.clone(),
            timestamp,
        });
        Ok(TxHash::from_bytes([state.submit_calls.len() as u8; 32]))
    }

    async fn get_product_reviews(
        &self,
        product_id: u64,
    ) -> Result<Vec<ProductReviewRecord>, ReviewError> {
        Ok(self
            .state
            .borrow()
            .records
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
        Ok(self.records())
    }
}
