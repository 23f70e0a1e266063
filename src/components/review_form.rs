use leptos::logging::log;
use leptos::*;

use crate::app::AppServices;
use crate::flows::{ReviewSubmission, TxStatus};
use crate::models::product::Product;
use crate::models::review::{Rating, ReviewDraft};
use crate::utils::leptos_owner::with_owner_safe;
use crate::wallet::WalletSession;

#[component]
pub fn ReviewForm(
    product: Product,
    wallet: ReadSignal<WalletSession>,
    on_submitted: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let services = expect_context::<AppServices>();
    let (rating, set_rating) = create_signal(0u8);
    let (review_content, set_review_content) = create_signal(String::new());
    let (status, set_status) = create_signal(TxStatus::Idle);
    let (notice, set_notice) = create_signal(None::<String>);
    let product_id = product.id;

    let submit_review = move |_: ev::MouseEvent| {
        if status.get_untracked().is_in_flight() {
            return;
        }
        let draft = ReviewDraft::new(rating.get_untracked(), review_content.get_untracked());
        if let Err(err) = draft.validate() {
            set_notice.set(Some(err.to_string()));
            return;
        }
        set_notice.set(None);

        let session = wallet.get_untracked();
        let store = services.store.clone();
        let chain = services.chain.clone();
        let owner = Owner::current();
        // Each attempt starts a fresh flow from Idle.
        spawn_local(async move {
            let mut flow = ReviewSubmission::new(store, chain);
            let result = flow
                .submit(&session, product_id, draft, |s| set_status.set(s.clone()))
                .await;
            with_owner_safe(owner, "review_form submit", || match result {
                Ok(submitted) => {
                    log!("[REVIEW_FORM] Review published as {}", submitted.content_id);
                    set_rating.set(0);
                    set_review_content.set(String::new());
                    on_submitted.call(());
                }
                Err(err) => set_notice.set(Some(format!("Failed to submit review: {err}"))),
            });
        });
    };

    let stars = (Rating::MIN..=Rating::MAX)
        .map(|star| {
            view! {
                <button
                    type="button"
                    on:click=move |_| set_rating.set(star)
                    disabled=move || status.get().is_in_flight()
                >
                    { move || if star <= rating.get() { "★" } else { "☆" } }
                </button>
            }
        })
        .collect_view();

    view! {
        <div>
            <h3>{ format!("Review {}", product.name) }</h3>
            <div>{ stars }</div>
            <textarea
                placeholder="Share your experience with this product..."
                prop:value=review_content
                on:input=move |e| set_review_content.set(event_target_value(&e))
                disabled=move || status.get().is_in_flight()
            />
            <p>{ move || status.get().progress_text() }</p>
            <p>{ move || notice.get() }</p>
            <button on:click=submit_review disabled=move || status.get().is_in_flight()>
                { "Submit Review" }
            </button>
            <button
                class="cancel-button"
                on:click=move |_| on_cancel.call(())
                disabled=move || status.get().is_in_flight()
            >
                { "Cancel" }
            </button>
        </div>
    }
}
