use leptos::logging::error;
use leptos::*;

use crate::app::AppServices;
use crate::components::review_form::ReviewForm;
use crate::flows::eligible_products;
use crate::models::product::Product;
use crate::wallet::WalletSession;

/// Products the connected wallet holds a receipt for, each with a button
/// that opens the review form.
#[component]
pub fn MyReviews(
    wallet: ReadSignal<WalletSession>,
    refresh: ReadSignal<u32>,
    on_reviewed: Callback<()>,
) -> impl IntoView {
    let services = expect_context::<AppServices>();
    let (selected, set_selected) = create_signal(None::<Product>);

    let eligible = create_local_resource(
        move || (wallet.get(), refresh.get()),
        move |(session, _)| {
            let services = services.clone();
            async move {
                eligible_products(&services.chain, &session, &services.catalog)
                    .await
                    .unwrap_or_else(|err| {
                        error!("[MY_REVIEWS] Failed to check receipts: {}", err);
                        Vec::new()
                    })
            }
        },
    );

    let on_submitted = Callback::new(move |_: ()| {
        set_selected.set(None);
        on_reviewed.call(());
    });
    let on_cancel = Callback::new(move |_: ()| set_selected.set(None));

    view! {
        <Show when=move || wallet.get().is_connected()>
            <section>
                <h2>{ "My Reviewable Products" }</h2>
                { move || match eligible.get() {
                    None => view! { <p>{ "Checking receipts..." }</p> }.into_view(),
                    Some(products) if products.is_empty() => view! {
                        <p>{ "Purchase a product first to unlock the ability to write verified reviews." }</p>
                    }
                    .into_view(),
                    Some(products) => products
                        .into_iter()
                        .map(|product| {
                            let name = product.name.clone();
                            let price = product.display_price();
                            view! {
                                <div>
                                    <h4>{ name }</h4>
                                    <span>{ "Verified Purchase" }</span>
                                    <span>{ price }</span>
                                    <button class="write-review" on:click=move |_| set_selected.set(Some(product.clone()))>
                                        { "Write Review" }
                                    </button>
                                </div>
                            }
                        })
                        .collect_view(),
                }}
                { move || selected.get().map(|product| view! {
                    <ReviewForm product=product wallet=wallet on_submitted=on_submitted on_cancel=on_cancel />
                })}
            </section>
        </Show>
    }
}
