// Accessibility helpers

/// Id of the polite live region rendered by the app shell.
pub const STATUS_REGION_ID: &str = "store-status";

/// Get CSS for visible focus indicators and screen reader utilities
///
/// Returns critical accessibility CSS that should be injected early in the page load.
/// Includes focus ring styles, screen reader helper classes and the `hidden` rule the
/// drawers rely on.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus-visible{outline:3px solid #00D9C0;outline-offset:2px} [hidden]{display:none!important} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Update the live region status for screen readers
///
/// Updates the text content of the status region if present.
pub fn set_status(msg: &str) {
    if let Some(node) = crate::dom::by_id(STATUS_REGION_ID) {
        node.set_text_content(Some(msg));
    }
}
