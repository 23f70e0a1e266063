//! Review retrieval: read the registry, resolve each record's body from the
//! content store, attach product names and order newest first.

use futures::future::join_all;
use leptos::logging::{log, warn};

use crate::chain::ReviewRegistry;
use crate::content_store::ContentStore;
use crate::error::ReviewError;
use crate::models::address::Address;
use crate::models::product::Catalog;
use crate::models::review::{ContentId, ReviewPayload, ReviewRecord};

/// A registry record merged with its resolved body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedReview {
    pub reviewer: Address,
    pub product_id: u64,
    pub product_name: Option<String>,
    pub content_id: ContentId,
    pub timestamp: u64,
    pub payload: ReviewPayload,
}

impl DisplayedReview {
    /// Time shown next to the review: when it was written, or the block time
    /// if the payload carries none. Block times past the `i64` millisecond
    /// range saturate.
    pub fn display_time_millis(&self) -> i64 {
        if self.payload.created_at > 0 {
            self.payload.created_at
        } else {
            i64::try_from(self.timestamp)
                .unwrap_or(i64::MAX)
                .saturating_mul(1000)
        }
    }
}

/// Result of one full reload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewFeed {
    pub reviews: Vec<DisplayedReview>,
    /// Records whose content could not be resolved and were left out.
    pub dropped: usize,
}

impl ReviewFeed {
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

pub async fn load_all_reviews<R, S>(
    registry: &R,
    store: &S,
    catalog: &Catalog,
) -> Result<ReviewFeed, ReviewError>
where
    R: ReviewRegistry,
    S: ContentStore,
{
    let records = registry.get_all_reviews().await?;
    log!("[RETRIEVE] Registry returned {} reviews", records.len());
    Ok(resolve_records(records, store, catalog).await)
}

pub async fn load_product_reviews<R, S>(
    registry: &R,
    store: &S,
    catalog: &Catalog,
    product_id: u64,
) -> Result<ReviewFeed, ReviewError>
where
    R: ReviewRegistry,
    S: ContentStore,
{
    let records = registry
        .get_product_reviews(product_id)
        .await?
        .into_iter()
        .map(|r| r.for_product(product_id))
        .collect::<Vec<_>>();
    log!(
        "[RETRIEVE] Registry returned {} reviews for product {}",
        records.len(),
        product_id
    );
    Ok(resolve_records(records, store, catalog).await)
}

/// Same as [`load_all_reviews`] but fetches every body at once instead of one
/// after another. Ordering and dropping rules are identical.
pub async fn load_all_reviews_concurrently<R, S>(
    registry: &R,
    store: &S,
    catalog: &Catalog,
) -> Result<ReviewFeed, ReviewError>
where
    R: ReviewRegistry,
    S: ContentStore,
{
    let records = registry.get_all_reviews().await?;
    log!("[RETRIEVE] Registry returned {} reviews, resolving concurrently", records.len());
    let outcomes = join_all(records.iter().map(|r| store.fetch(&r.content_id))).await;
    Ok(assemble(records.into_iter().zip(outcomes), catalog))
}

/// Resolves records one at a time.
async fn resolve_records<S>(records: Vec<ReviewRecord>, store: &S, catalog: &Catalog) -> ReviewFeed
where
    S: ContentStore,
{
    let mut resolved = Vec::with_capacity(records.len());
    for record in records {
        let outcome = store.fetch(&record.content_id).await;
        resolved.push((record, outcome));
    }
    assemble(resolved, catalog)
}

/// Merges records with their fetched bodies. A record whose body is missing or
/// failed to load is logged and dropped.
fn assemble<I>(resolved: I, catalog: &Catalog) -> ReviewFeed
where
    I: IntoIterator<Item = (ReviewRecord, Result<Option<ReviewPayload>, ReviewError>)>,
{
    let mut feed = ReviewFeed::default();

    for (record, outcome) in resolved {
        let payload = match outcome {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                warn!(
                    "[RETRIEVE] Dropping review by {}: {}",
                    record.reviewer,
                    ReviewError::ResolutionMiss(record.content_id.clone())
                );
                feed.dropped += 1;
                continue;
            }
            Err(err) => {
                warn!("[RETRIEVE] Failed to load review data for {}: {}", record.content_id, err);
                feed.dropped += 1;
                continue;
            }
        };

        feed.reviews.push(DisplayedReview {
            product_name: catalog.find(record.product_id).map(|p| p.name.clone()),
            reviewer: record.reviewer,
            product_id: record.product_id,
            content_id: record.content_id,
            timestamp: record.timestamp,
            payload,
        });
    }

    // newest first
    feed.reviews.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    feed
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::chain::LocalChain;
    use crate::content_store::InMemoryContentStore;
    use crate::models::review::ReviewDraft;

    fn reviewer() -> Address {
        "0x00000000000000000000000000000000000000cc".parse().unwrap()
    }

    async fn seed(
        chain: &LocalChain,
        store: &InMemoryContentStore,
        product_id: u64,
        timestamp: u64,
        text: &str,
    ) -> ContentId {
        let payload = ReviewDraft::new(5, text).into_payload(product_id, 0).unwrap();
        let content_id = store.store(&payload).await.unwrap();
        chain.seed_review(ReviewRecord {
            reviewer: reviewer(),
            product_id,
            content_id: content_id.clone(),
            timestamp,
        });
        content_id
    }

    #[tokio::test]
    async fn test_sorted_newest_first() {
        let chain = LocalChain::new();
        let store = InMemoryContentStore::new();
        seed(&chain, &store, 1, 100, "older").await;
        seed(&chain, &store, 2, 200, "newer").await;

        let feed = load_all_reviews(&chain, &store, &Catalog::sample()).await.unwrap();
        let stamps: Vec<u64> = feed.reviews.iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps, vec![200, 100]);
        assert_eq!(feed.reviews[0].product_name.as_deref(), Some("Smart Fitness Watch"));
        assert_eq!(feed.dropped, 0);
    }

    #[tokio::test]
    async fn test_unresolvable_records_are_dropped() {
        let chain = LocalChain::new();
        let store = InMemoryContentStore::new();
        seed(&chain, &store, 1, 10, "kept").await;
        chain.seed_review(ReviewRecord {
            reviewer: reviewer(),
            product_id: 1,
            content_id: ContentId::new("sha256-gone"),
            timestamp: 20,
        });

        let feed = load_all_reviews(&chain, &store, &Catalog::sample()).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.dropped, 1);
        assert_eq!(feed.reviews[0].payload.text, "kept");
    }

    #[tokio::test]
    async fn test_unknown_product_has_no_name() {
        let chain = LocalChain::new();
        let store = InMemoryContentStore::new();
        seed(&chain, &store, 42, 1, "mystery item").await;

        let feed = load_all_reviews(&chain, &store, &Catalog::sample()).await.unwrap();
        assert_eq!(feed.reviews[0].product_name, None);
        // created_at of 0 falls back to block time
        assert_eq!(feed.reviews[0].display_time_millis(), 1000);
    }

    #[tokio::test]
    async fn test_huge_block_timestamp_saturates() {
        let chain = LocalChain::new();
        let store = InMemoryContentStore::new();
        seed(&chain, &store, 1, u64::MAX / 2, "far future").await;
        seed(&chain, &store, 2, u64::MAX, "end of time").await;

        let feed = load_all_reviews(&chain, &store, &Catalog::sample()).await.unwrap();
        assert_eq!(feed.len(), 2);
        for review in &feed.reviews {
            assert_eq!(review.display_time_millis(), i64::MAX);
        }
    }

    #[tokio::test]
    async fn test_product_reviews_only() {
        let chain = LocalChain::new();
        let store = InMemoryContentStore::new();
        seed(&chain, &store, 1, 5, "earbuds").await;
        seed(&chain, &store, 3, 6, "keyboard").await;
        seed(&chain, &store, 3, 7, "keyboard again").await;

        let feed = load_product_reviews(&chain, &store, &Catalog::sample(), 3)
            .await
            .unwrap();
        assert_eq!(feed.len(), 2);
        assert!(feed.reviews.iter().all(|r| r.product_id == 3));
        assert_eq!(feed.reviews[0].payload.text, "keyboard again");
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() {
        let chain = LocalChain::new();
        let store = InMemoryContentStore::with_latency(
            std::time::Duration::ZERO,
            std::time::Duration::from_millis(50),
        );
        for (product_id, ts) in [(1, 300), (2, 100), (4, 200)] {
            seed(&chain, &store, product_id, ts, &format!("review at {ts}")).await;
        }
        chain.seed_review(ReviewRecord {
            reviewer: reviewer(),
            product_id: 1,
            content_id: ContentId::new("sha256-lost"),
            timestamp: 400,
        });

        let catalog = Catalog::sample();
        let start = std::time::Instant::now();
        let concurrent = load_all_reviews_concurrently(&chain, &store, &catalog).await.unwrap();
        let concurrent_elapsed = start.elapsed();

        let start = std::time::Instant::now();
        let sequential = load_all_reviews(&chain, &store, &catalog).await.unwrap();
        let sequential_elapsed = start.elapsed();

        assert_eq!(concurrent, sequential);
        assert_eq!(concurrent.dropped, 1);
        let stamps: Vec<u64> = concurrent.reviews.iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps, vec![300, 200, 100]);
        // four 50ms fetches take at least 200ms one after another
        assert!(sequential_elapsed >= std::time::Duration::from_millis(200));
        assert!(concurrent_elapsed < sequential_elapsed);
    }

    #[tokio::test]
    async fn test_empty_registry() {
        let feed = load_all_reviews(&LocalChain::new(), &InMemoryContentStore::new(), &Catalog::sample())
            .await
            .unwrap();
        assert!(feed.is_empty());
    }
}
