//! Simulated purchase: minting a receipt token for a product, and the
//! eligibility check that receipts gate.

use leptos::logging::{error, log};

use crate::chain::ReceiptContract;
use crate::error::ReviewError;
use crate::flows::lifecycle::{TxLifecycle, TxStatus};
use crate::models::product::{Catalog, Product};
use crate::wallet::WalletSession;

pub struct Purchase<C> {
    contract: C,
    lifecycle: TxLifecycle,
}

impl<C: ReceiptContract> Purchase<C> {
    pub fn new(contract: C) -> Self {
        Self {
            contract,
            lifecycle: TxLifecycle::for_purchase(),
        }
    }

    pub fn status(&self) -> &TxStatus {
        self.lifecycle.status()
    }

    pub fn reset(&mut self) -> Result<(), ReviewError> {
        self.lifecycle.reset()
    }

    /// Mints a receipt for `product` to the connected account and returns the token id.
    pub async fn buy<F>(
        &mut self,
        wallet: &WalletSession,
        product: &Product,
        mut observer: F,
    ) -> Result<u64, ReviewError>
    where
        F: FnMut(&TxStatus),
    {
        let buyer = wallet.require_address()?;
        observer(self.lifecycle.advance(TxStatus::AwaitingConfirmation)?);
        log!("[PURCHASE] Minting receipt for {} to {}", product.name, buyer);

        let outcome = match self.contract.mint_receipt(&buyer, product.id, &buyer).await {
            Ok(tx_hash) => self.contract.wait_for_receipt(&tx_hash).await,
            Err(err) => Err(err),
        }
        .and_then(|receipt| {
            receipt.minted_token.map(|token| (receipt.tx_hash, token)).ok_or_else(|| {
                ReviewError::ChainRejection(format!("no receipt token minted by {}", receipt.tx_hash))
            })
        });
        let (tx_hash, token_id) = match outcome {
            Ok(minted) => minted,
            Err(err) => {
                error!("[PURCHASE] Purchase of {} failed: {}", product.name, err);
                observer(self.lifecycle.advance(TxStatus::Failed {
                    reason: err.to_string(),
                })?);
                return Err(err);
            }
        };

        observer(self.lifecycle.advance(TxStatus::Confirmed { tx_hash })?);
        Ok(token_id)
    }
}

/// Catalog products the connected account holds a receipt for, in catalog order.
pub async fn eligible_products<C>(
    contract: &C,
    wallet: &WalletSession,
    catalog: &Catalog,
) -> Result<Vec<Product>, ReviewError>
where
    C: ReceiptContract,
{
    let Some(owner) = wallet.address() else {
        return Ok(Vec::new());
    };
    let mut eligible = Vec::new();
    for product in catalog.iter() {
        if contract.has_receipt(&owner, product.id).await? {
            eligible.push(product.clone());
        }
    }
    Ok(eligible)
}

/// Number of receipt tokens the connected account holds. Zero when disconnected.
pub async fn receipt_count<C>(contract: &C, wallet: &WalletSession) -> Result<u64, ReviewError>
where
    C: ReceiptContract,
{
    match wallet.address() {
        Some(owner) => contract.balance_of(&owner).await,
        None => Ok(0),
    }
}
