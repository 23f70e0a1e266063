//! On-chain surface consumed by the app: the receipt token contract and the
//! review registry. Both are reached through these traits; `LocalChain` is the
//! in-process implementation used for local runs and tests.

pub mod local;

use crate::error::ReviewError;
use crate::models::address::{Address, TxHash};
use crate::models::review::{ContentId, ProductReviewRecord, ReviewRecord};

pub use local::LocalChain;

/// Function names of the two contract ABIs.
pub mod abi {
    pub const MINT_RECEIPT: &str = "mintReceipt";
    pub const HAS_RECEIPT: &str = "hasReceipt";
    pub const BALANCE_OF: &str = "balanceOf";
    pub const SUBMIT_REVIEW: &str = "submitReview";
    pub const GET_PRODUCT_REVIEWS: &str = "getProductReviews";
    pub const GET_ALL_REVIEWS: &str = "getAllReviews";
}

/// Outcome of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    /// Token minted by the transaction, decoded from its transfer event.
    pub minted_token: Option<u64>,
}

#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// Waits until `tx_hash` is mined. A reverted transaction is a `ChainRejection`.
    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<TxReceipt, ReviewError>;
}

#[allow(async_fn_in_trait)]
pub trait ReceiptContract: ChainClient {
    async fn mint_receipt(
        &self,
        from: &Address,
        product_id: u64,
        recipient: &Address,
    ) -> Result<TxHash, ReviewError>;

    async fn has_receipt(&self, user: &Address, product_id: u64) -> Result<bool, ReviewError>;

    async fn balance_of(&self, owner: &Address) -> Result<u64, ReviewError>;
}

#[allow(async_fn_in_trait)]
pub trait ReviewRegistry: ChainClient {
    async fn submit_review(
        &self,
        from: &Address,
        product_id: u64,
        content_id: &ContentId,
    ) -> Result<TxHash, ReviewError>;

    async fn get_product_reviews(
        &self,
        product_id: u64,
    ) -> Result<Vec<ProductReviewRecord>, ReviewError>;

    async fn get_all_reviews(&self) -> Result<Vec<ReviewRecord>, ReviewError>;
}
