use leptos::logging::error;
use leptos::*;

use crate::app::AppServices;
use crate::flows::{load_all_reviews, DisplayedReview, ReviewFeed};
use crate::utils::format::{avatar_initials, format_timestamp, truncate_address};

/// Public feed of every verified review, newest first. Reloads in full
/// whenever `refresh` changes.
#[component]
pub fn ReviewsList(refresh: ReadSignal<u32>) -> impl IntoView {
    let services = expect_context::<AppServices>();

    let feed = create_local_resource(
        move || refresh.get(),
        move |_| {
            let services = services.clone();
            async move {
                load_all_reviews(&services.chain, &services.store, &services.catalog)
                    .await
                    .unwrap_or_else(|err| {
                        error!("[REVIEWS] Failed to load reviews: {}", err);
                        ReviewFeed::default()
                    })
            }
        },
    );

    view! {
        <section>
            { move || match feed.get() {
                None => view! { <p>{ "Loading verified reviews..." }</p> }.into_view(),
                Some(feed) if feed.is_empty() => view! {
                    <div>
                        <h3>{ "No Reviews Yet" }</h3>
                        <p>{ "Be the first to purchase a product and write a verified review!" }</p>
                    </div>
                }
                .into_view(),
                Some(feed) => {
                    let heading = format!("Latest Verified Reviews ({})", feed.len());
                    let items = feed
                        .reviews
                        .into_iter()
                        .map(|review| view! { <ReviewItem review=review /> })
                        .collect_view();
                    view! {
                        <h3>{ heading }</h3>
                        <ul>{ items }</ul>
                    }
                    .into_view()
                }
            }}
        </section>
    }
}

#[component]
fn ReviewItem(review: DisplayedReview) -> impl IntoView {
    let rating = review.payload.rating.get();
    let stars: String = (1..=5u8).map(|s| if s <= rating { '★' } else { '☆' }).collect();

    view! {
        <li>
            <span>{ avatar_initials(&review.reviewer) }</span>
            <span>{ truncate_address(&review.reviewer) }</span>
            <span>{ "Verified Purchase" }</span>
            { review.product_name.clone().map(|name| view! { <p>{ name }</p> }) }
            <span>{ format_timestamp(review.display_time_millis()) }</span>
            <div>
                { stars }
                <span>{ format!("{rating}/5") }</span>
            </div>
            <p>{ review.payload.text.clone() }</p>
        </li>
    }
}
