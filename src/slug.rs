//! Derives URL-safe post identifiers from post titles.

/// Converts a title into a slug: lowercased, with everything but ASCII
/// letters, digits, spaces and hyphens removed, then spaces turned into
/// hyphens, hyphen runs collapsed, and no leading or trailing hyphen.
/// Non-ASCII letters are dropped rather than transliterated. Only the ASCII
/// space counts as a separator; tabs, newlines and other Unicode spaces are
/// removed like punctuation.
///
/// Distinct titles may produce the same slug (`Test Post` and `test post`).
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        let c = match c {
            'a'..='z' | '0'..='9' | '-' => c,
            ' ' => '-',
            _ => continue,
        };
        if c == '-' && (slug.is_empty() || slug.ends_with('-')) {
            continue;
        }
        slug.push(c);
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
