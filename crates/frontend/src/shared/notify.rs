//! Blocking browser notices: the storefront's alert/confirm dialogs.

/// Modal notice. No-op outside a browser context.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Explicit user confirmation; declining (or no browser) answers `false`.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .map(|window| window.confirm_with_message(message).unwrap_or(false))
        .unwrap_or(false)
}
