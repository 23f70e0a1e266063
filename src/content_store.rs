//! Content-addressed storage for review bodies.
//!
//! Only a pointer to the stored payload goes on-chain. `InMemoryContentStore`
//! stands in for a network store: it keeps payloads in memory for the lifetime
//! of the process and simulates upload and fetch round trips with a delay.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use leptos::logging::log;
use sha2::{Digest, Sha256};

use crate::config::AppConfig;
use crate::error::ReviewError;
use crate::models::review::{ContentId, ReviewPayload};
use crate::utils::time::sleep;

pub const CONTENT_ID_PREFIX: &str = "sha256-";

#[allow(async_fn_in_trait)]
pub trait ContentStore {
    /// Stores `payload` and returns the identifier it can be fetched by.
    async fn store(&self, payload: &ReviewPayload) -> Result<ContentId, ReviewError>;

    /// Looks up a payload. `Ok(None)` means the store answered but has no such entry.
    async fn fetch(&self, id: &ContentId) -> Result<Option<ReviewPayload>, ReviewError>;
}

/// Derives the identifier of a payload from the SHA-256 digest of its JSON encoding.
pub fn content_id_for(payload: &ReviewPayload) -> Result<ContentId, ReviewError> {
    let bytes = serde_json::to_vec(payload)
        .map_err(|e| ReviewError::Transport(format!("failed to encode payload: {e}")))?;
    let digest = Sha256::digest(&bytes);
    Ok(ContentId::new(format!("{CONTENT_ID_PREFIX}{}", hex::encode(digest))))
}

#[derive(Debug, Default)]
struct StoreState {
    entries: HashMap<ContentId, ReviewPayload>,
    store_calls: usize,
}

/// Shared in-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    state: Rc<RefCell<StoreState>>,
    upload_latency: Duration,
    fetch_latency: Duration,
}

impl InMemoryContentStore {
    /// A store that answers immediately.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(upload_latency: Duration, fetch_latency: Duration) -> Self {
        Self {
            state: Rc::default(),
            upload_latency,
            fetch_latency,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_latency(config.upload_latency, config.fetch_latency)
    }

    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `store` calls made so far, including ones that deduplicated.
    pub fn store_calls(&self) -> usize {
        self.state.borrow().store_calls
    }

    pub fn contains(&self, id: &ContentId) -> bool {
        self.state.borrow().entries.contains_key(id)
    }
}

impl ContentStore for InMemoryContentStore {
    async fn store(&self, payload: &ReviewPayload) -> Result<ContentId, ReviewError> {
        self.state.borrow_mut().store_calls += 1;
        sleep(self.upload_latency).await;

        let id = content_id_for(payload)?;
        let mut state = self.state.borrow_mut();
        if state.entries.contains_key(&id) {
            log!("[STORE] Payload already stored as {}", id);
        } else {
            state.entries.insert(id.clone(), payload.clone());
            log!("[STORE] Stored review for product {} as {}", payload.product_id, id);
        }
        Ok(id)
    }

    async fn fetch(&self, id: &ContentId) -> Result<Option<ReviewPayload>, ReviewError> {
        sleep(self.fetch_latency).await;
        let found = self.state.borrow().entries.get(id).cloned();
        if found.is_none() {
            log!("[STORE] No payload for {}", id);
        }
        Ok(found)
    }
}
