use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use verireview::content_store::{ContentStore, InMemoryContentStore};
use verireview::models::review::{ContentId, ReviewPayload};
use verireview::ReviewError;

/// Content store whose transport can be made to fail, wrapping the in-memory store.
#[derive(Clone, Default)]
pub struct FlakyContentStore {
    pub inner: InMemoryContentStore,
    fail_uploads: Rc<RefCell<bool>>,
    unreachable: Rc<RefCell<HashSet<ContentId>>>,
}

impl FlakyContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_uploads(&self) {
        *self.fail_uploads.borrow_mut() = true;
    }

    /// Fetches of `id` fail with a transport error.
    pub fn make_unreachable(&self, id: ContentId) {
        self.unreachable.borrow_mut().insert(id);
    }
}

impl ContentStore for FlakyContentStore {
    async fn store(&self, payload: &ReviewPayload) -> Result<ContentId, ReviewError> {
        if *self.fail_uploads.borrow() {
            return Err(ReviewError::Transport("upload timed out".to_string()));
        }
        self.inner.store(payload).await
    }

    async fn fetch(&self, id: &ContentId) -> Result<Option<ReviewPayload>, ReviewError> {
        if self.unreachable.borrow().contains(id) {
            return Err(ReviewError::Transport(format!("gateway unreachable for {id}")));
        }
        self.inner.fetch(id).await
    }
}
