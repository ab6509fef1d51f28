//! Wraps rendered tables in a horizontally scrollable container so wide
//! tables don't stretch narrow screens.
//!
//! This is a plain substring substitution, not an HTML rewrite: every literal
//! `<table>` and `</table>` is wrapped independently, whatever surrounds it.
//! Tags with attributes (`<table class="x">`) are left alone.

const TABLE_OPEN: &str = "<table>";
const TABLE_CLOSE: &str = "</table>";
const WRAPPED_OPEN: &str = "<div class=\"table-wrapper\"><table>";
const WRAPPED_CLOSE: &str = "</table></div>";

/// Returns `html` with each table tag wrapped in the scroll container.
pub fn wrap_tables(html: &str) -> String {
    html.replace(TABLE_OPEN, WRAPPED_OPEN)
        .replace(TABLE_CLOSE, WRAPPED_CLOSE)
}
