use std::panic;
use leptos::logging::log;

/// Installs `console_error_panic_hook` and adds a hint when a panic comes from a
/// reactive owner being torn down while a review or purchase task was still running.
pub fn set_custom_panic_hook() {
    console_error_panic_hook::set_once();
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Call the original hook first
        original_hook(panic_info);

        let message = if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else {
            "Unknown panic".to_string()
        };

        if message.contains("OwnerDisposed") {
            log!("[PANIC] Leptos owner disposal detected. This usually happens when:");
            log!("[PANIC] 1. The review form was closed while an upload or confirmation was pending");
            log!("[PANIC] 2. A purchase finished after the product grid was unmounted");
        }
    }));
}

/// Call in main.rs or in the hydrate entry point
pub fn init() {
    log!("[PANIC_HOOK] Setting up custom panic hook");
    set_custom_panic_hook();
    log!("[PANIC_HOOK] Custom panic hook set up successfully");
}
