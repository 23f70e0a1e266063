pub mod format;
pub mod leptos_owner;
pub mod panic_hook;
pub mod time;
