//! Verified product reviews.
//!
//! A storefront where buying a product mints a receipt token, and holding the
//! receipt lets the buyer publish a review. Review bodies go to a
//! content-addressed store; only their content id is registered on-chain.

pub mod app;
pub mod chain;
pub mod components;
pub mod config;
pub mod content_store;
pub mod error;
pub mod flows;
pub mod models;
pub mod utils;
pub mod wallet;

pub use error::{ReviewError, ValidationError};

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    utils::panic_hook::init();
    leptos::mount_to_body(App);
}
