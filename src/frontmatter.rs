//! Splits a post source file into its metadata block and its markdown body.
//!
//! The metadata block is a run of `key: value` lines fenced by bare `---`
//! lines at the top of the file:
//!
//! ```md
//! ---
//! title: Hello, world!
//! date: April 16, 2021
//! ---
//! # Hello
//! ```
//!
//! Parsing never fails. Malformed input degrades instead: a file whose first
//! line is not a fence has no metadata and its whole text is the body (so a
//! later `---` horizontal rule stays in the body), and a block that is opened
//! but never closed swallows the rest of the file, leaving the body empty.

const FENCE: &str = "---";

/// The ordered `key: value` pairs of a post's metadata block. Keys keep the
/// position of their first occurrence; a repeated key overwrites the earlier
/// value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, String)>,
}

impl Frontmatter {
    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like [`Frontmatter::get`], but treats an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Sets `key` to `value`. The last insert for a key wins.
    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parses `input` into its [`Frontmatter`] and body.
///
/// A block exists only when the first line trims to `---`; any other input
/// has no metadata and is all body. Inside the block, lines are split at
/// their first colon into a trimmed key and a trimmed value, and lines
/// without a colon are skipped. A later `---` line closes the block once at
/// least one key has been parsed. The body is everything after the closing
/// fence line, byte for byte.
pub fn parse(input: &str) -> (Frontmatter, &str) {
    let mut lines = input.split('\n');
    let opening = match lines.next() {
        Some(line) if line.trim() == FENCE => line,
        _ => return (Frontmatter::default(), input),
    };

    let mut frontmatter = Frontmatter::default();
    let mut offset = opening.len() + 1;
    for line in lines {
        offset += line.len() + 1;

        if line.trim() == FENCE {
            if frontmatter.is_empty() {
                continue;
            }
            return (frontmatter, input.get(offset..).unwrap_or(""));
        }

        if let Some(i) = line.find(':') {
            frontmatter.insert(
                line[..i].trim().to_owned(),
                line[i + 1..].trim().to_owned(),
            );
        }
    }

    // opened but never closed: the metadata swallowed the remainder
    (frontmatter, "")
}
