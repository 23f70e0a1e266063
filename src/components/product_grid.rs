//! Shop grid. Each product can be "bought", which mints a receipt token that
//! unlocks reviewing it.

use leptos::logging::{error, log};
use leptos::*;

use crate::app::AppServices;
use crate::flows::{Purchase, TxStatus};
use crate::utils::leptos_owner::with_owner_safe;
use crate::wallet::WalletSession;

#[component]
pub fn ProductGrid(wallet: ReadSignal<WalletSession>, on_purchased: Callback<()>) -> impl IntoView {
    let services = expect_context::<AppServices>();
    let (status, set_status) = create_signal(TxStatus::Idle);
    let (buying, set_buying) = create_signal(None::<u64>);

    let cards = services
        .catalog
        .products()
        .iter()
        .cloned()
        .map(|product| {
            let chain = services.chain.clone();
            let product_id = product.id;
            let target = product.clone();
            let buy = move |_: ev::MouseEvent| {
                if buying.get_untracked().is_some() {
                    return;
                }
                let session = wallet.get_untracked();
                let chain = chain.clone();
                let target = target.clone();
                let owner = Owner::current();
                set_buying.set(Some(target.id));
                spawn_local(async move {
                    let mut purchase = Purchase::new(chain);
                    let result = purchase
                        .buy(&session, &target, |s| set_status.set(s.clone()))
                        .await;
                    with_owner_safe(owner, "product_grid purchase", || {
                        set_buying.set(None);
                        match result {
                            Ok(token_id) => {
                                log!("[SHOP] Receipt #{} minted for {}", token_id, target.name);
                                on_purchased.call(());
                            }
                            Err(err) => error!("[SHOP] Purchase failed: {}", err),
                        }
                    });
                });
            };

            view! {
                <li>
                    <img src=product.image_ref.clone() alt=product.name.clone() width="200" />
                    <h3>{ product.name.clone() }</h3>
                    <p>{ product.description.clone() }</p>
                    <span>{ product.display_price() }</span>
                    <button
                        on:click=buy
                        disabled=move || buying.get().is_some() || !wallet.get().is_connected()
                    >
                        { move || if buying.get() == Some(product_id) { "Processing..." } else { "Buy Now" } }
                    </button>
                </li>
            }
        })
        .collect_view();

    view! {
        <section>
            <h2>{ "Shop" }</h2>
            <ul>{ cards }</ul>
            <p>{ move || status.get().progress_text() }</p>
        </section>
    }
}
