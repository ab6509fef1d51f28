use crate::post::Post;
use crate::tables::wrap_tables;
use crate::template::{self, Templater};
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// The file name of the home page in the site root.
pub const HOME_PAGE: &str = "index.html";

/// Responsible for templating and writing HTML pages to disk from [`Post`]
/// sources.
pub struct Writer<'a> {
    pub templater: &'a Templater<'a>,

    /// The directory in which post pages are written, as
    /// `{pages_output_directory}/{slug}.html`.
    pub pages_output_directory: &'a Path,

    /// The site root, which receives the home page.
    pub root_output_directory: &'a Path,
}

impl Writer<'_> {
    /// Writes one page per post, in order. Posts sharing a slug share an
    /// output file, so the later post replaces the earlier one. Returns the
    /// paths written.
    pub fn write_posts(&self, posts: &[Post]) -> Result<Vec<PathBuf>> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        let mut written = Vec::with_capacity(posts.len());
        for post in posts {
            if let Some(earlier) = seen.insert(&post.slug, &post.source_filename) {
                warn!(
                    "`{}` and `{}` share the slug `{}`; `{}` wins",
                    earlier, post.source_filename, post.slug, post.source_filename
                );
            }
            written.push(self.write_post(post)?);
        }
        Ok(written)
    }

    /// Templates a single [`Post`] and writes it to disk.
    fn write_post(&self, post: &Post) -> Result<PathBuf> {
        let body = wrap_tables(&post.body);
        let html = self.templater.post_page(post, &body)?;
        let path = self.pages_output_directory.join(post.file_name());
        write_file(&path, html.as_bytes())?;
        debug!("Wrote `{}` from `{}`", path.display(), post.source_filename);
        Ok(path)
    }

    /// Writes the home page listing `posts` in order, returning its path.
    pub fn write_home_page(&self, posts: &[Post]) -> Result<PathBuf> {
        let html = self.templater.home_page(posts)?;
        let path = self.root_output_directory.join(HOME_PAGE);
        write_file(&path, html.as_bytes())?;
        Ok(path)
    }
}

/// Writes `contents` to `path`, replacing any existing file.
pub fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents).map_err(|err| Error::Write {
        path: path.to_owned(),
        err,
    })
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(template::Error),

    /// An error writing an output file.
    Write { path: PathBuf, err: io::Error },
}

impl From<template::Error> for Error {
    /// Converts a [`template::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator for fallible template operations.
    fn from(err: template::Error) -> Error {
        Error::Template(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::Write { path, err } => {
                write!(f, "Writing '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(err) => Some(err),
            Error::Write { path: _, err } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::post::SourceDocument;
    use crate::template::Site;
    use std::time::SystemTime;

    fn post(name: &str, contents: &str) -> Post {
        Post::from_source(&SourceDocument {
            path: PathBuf::from(name),
            contents: contents.to_owned(),
            modified: SystemTime::UNIX_EPOCH,
        })
    }

    fn site() -> Site {
        Site {
            origin: String::from("https://example.com"),
            title: String::from("Example"),
            author: String::from("Jane Doe"),
            tagline: String::new(),
            background: None,
        }
    }

    #[test]
    fn test_write_posts_wraps_tables() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let site = site();
        let templater = Templater::new(&site);
        let writer = Writer {
            templater: &templater,
            pages_output_directory: dir.path(),
            root_output_directory: dir.path(),
        };

        let posts = vec![post(
            "t.md",
            "---\ntitle: Tables\n---\n| a |\n|---|\n| 1 |\n\n| b |\n|---|\n| 2 |\n",
        )];
        let written = writer.write_posts(&posts)?;
        assert_eq!(vec![dir.path().join("tables.html")], written);

        let html = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!(2, html.matches("<div class=\"table-wrapper\"><table>").count());
        assert_eq!(2, html.matches("</table></div>").count());
        Ok(())
    }

    #[test]
    fn test_write_posts_collision_last_wins() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let site = site();
        let templater = Templater::new(&site);
        let writer = Writer {
            templater: &templater,
            pages_output_directory: dir.path(),
            root_output_directory: dir.path(),
        };

        let posts = vec![
            post("a.md", "---\ntitle: Test Post\n---\nfirst body"),
            post("b.md", "---\ntitle: test post\n---\nsecond body"),
        ];
        writer.write_posts(&posts)?;

        let html = std::fs::read_to_string(dir.path().join("test-post.html")).unwrap();
        assert!(html.contains("second body"));
        assert!(!html.contains("first body"));
        Ok(())
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let site = site();
        let templater = Templater::new(&site);
        let writer = Writer {
            templater: &templater,
            pages_output_directory: Path::new("./no/such/dir"),
            root_output_directory: Path::new("./no/such/dir"),
        };
        match writer.write_posts(&[post("a.md", "x")]) {
            Err(Error::Write { path, .. }) => assert_eq!(Path::new("./no/such/dir/a.html"), path),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
