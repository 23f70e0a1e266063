use leptos::Owner;

/// Runs `f` under `owner`, typically captured before an `.await` in a
/// `spawn_local` task. If the owning component is gone, logs and returns None.
pub fn with_owner_safe<F, R>(owner: Option<Owner>, log_context: &str, f: F) -> Option<R>
where
    F: FnOnce() -> R,
{
    match owner {
        Some(owner) => match leptos::try_with_owner(owner, f) {
            Ok(value) => Some(value),
            Err(_) => {
                leptos::logging::log!("[OWNER] Owner disposed before update: {}", log_context);
                None
            }
        },
        None => {
            leptos::logging::log!("[OWNER] No Leptos owner in context: {}", log_context);
            None
        }
    }
}
