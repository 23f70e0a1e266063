//! Main application entry point for the verified reviews storefront.
//! Wires the shared services into context and lays out the shop, the
//! reviewable-products panel and the public review feed.

use std::time::Duration;

use leptos::logging::error;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::chain::LocalChain;
use crate::components::{
    my_reviews::MyReviews, product_grid::ProductGrid, reviews_list::ReviewsList,
    wallet_bar::WalletBar,
};
use crate::config::AppConfig;
use crate::content_store::InMemoryContentStore;
use crate::models::product::Catalog;
use crate::wallet::WalletSession;

/// Handles shared by every component. Cloning is cheap; clones share state.
#[derive(Clone, Debug)]
pub struct AppServices {
    pub config: AppConfig,
    pub store: InMemoryContentStore,
    pub chain: LocalChain,
    pub catalog: Catalog,
}

impl AppServices {
    pub fn from_config(config: AppConfig) -> Self {
        Self {
            store: InMemoryContentStore::from_config(&config),
            chain: LocalChain::new()
                .with_confirmation_latency(Duration::from_millis(800))
                .with_receipt_gate(),
            catalog: Catalog::sample(),
            config,
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::from_env().unwrap_or_else(|err| {
        error!("[CONFIG] {}, falling back to defaults", err);
        AppConfig::default()
    });
    provide_context(AppServices::from_config(config));

    view! {
        <Title text="Verified Reviews"/>
        <Router>
            <main>
                <Routes>
                    <Route path="" view=HomePage/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    let wallet = create_rw_signal(WalletSession::default());
    // Bumped after every confirmed purchase or review so dependent views reload.
    let refresh = create_rw_signal(0u32);
    let bump = Callback::new(move |_: ()| refresh.update(|n| *n += 1));

    view! {
        <div>
            <h1>{ "Verified Reviews" }</h1>
            <WalletBar wallet=wallet refresh=refresh.read_only() />
            <ProductGrid wallet=wallet.read_only() on_purchased=bump />
            <MyReviews wallet=wallet.read_only() refresh=refresh.read_only() on_reviewed=bump />
            <ReviewsList refresh=refresh.read_only() />
        </div>
    }
}
