use leptos::logging::error;
use leptos::*;

use crate::app::AppServices;
use crate::chain::local::DEV_ACCOUNT;
use crate::flows::receipt_count;
use crate::utils::format::truncate_address;
use crate::wallet::{available_connectors, Connector, WalletSession, SEPOLIA};

#[component]
pub fn WalletBar(wallet: RwSignal<WalletSession>, refresh: ReadSignal<u32>) -> impl IntoView {
    let services = expect_context::<AppServices>();
    let connectors = available_connectors(&services.config);

    let receipts = create_local_resource(
        move || (wallet.get(), refresh.get()),
        move |(session, _)| {
            let chain = services.chain.clone();
            async move {
                receipt_count(&chain, &session).await.unwrap_or_else(|err| {
                    error!("[WALLET] Failed to read receipt balance: {}", err);
                    0
                })
            }
        },
    );

    // The local connector answers at once with the development account.
    let connect = move |connector: Connector| {
        wallet.update(|session| {
            if let Err(err) = session.begin_connect(connector) {
                error!("[WALLET] {}", err);
                return;
            }
            if let Err(err) = session.complete_connect(DEV_ACCOUNT, SEPOLIA.id) {
                error!("[WALLET] {}", err);
            }
        });
    };

    view! {
        <nav>
            {move || match wallet.get() {
                WalletSession::Connected { address, chain, .. } => view! {
                    <span>{ truncate_address(&address) }</span>
                    <span>{ chain.name }</span>
                    <span class="receipt-count">
                        { move || format!("Receipts: {}", receipts.get().unwrap_or(0)) }
                    </span>
                    <button on:click=move |_| wallet.update(|s| s.disconnect())>{ "Disconnect" }</button>
                }
                .into_view(),
                WalletSession::Connecting { .. } => view! { <span>{ "Connecting..." }</span> }.into_view(),
                WalletSession::Disconnected => connectors
                    .iter()
                    .cloned()
                    .map(|connector| {
                        let label = connector.name();
                        view! { <button on:click=move |_| connect(connector.clone())>{ label }</button> }
                    })
                    .collect_view(),
            }}
        </nav>
    }
}
