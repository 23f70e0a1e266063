pub mod lifecycle;
pub mod purchase;
pub mod retrieval;
pub mod submission;

pub use lifecycle::{TxLifecycle, TxStatus};
pub use purchase::{eligible_products, receipt_count, Purchase};
pub use retrieval::{
    load_all_reviews, load_all_reviews_concurrently, load_product_reviews, DisplayedReview,
    ReviewFeed,
};
pub use submission::{ReviewSubmission, SubmittedReview};
