//! Adapter around [`pulldown_cmark`], the markdown renderer used for post
//! bodies.

use pulldown_cmark::{html, Options, Parser};

/// Converts markdown to HTML, appending the result onto `w`. GitHub-flavored
/// tables, strikethrough and task lists are enabled. Raw HTML in the source
/// passes through untouched.
pub fn to_html(w: &mut String, markdown: &str) {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    html::push_html(w, Parser::new_ext(markdown, options));
}
