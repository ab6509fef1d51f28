//! Defines the [`SourceDocument`] and [`Post`] types and the logic for
//! reading post source files from disk and turning them into posts.

use crate::frontmatter::{self, Frontmatter};
use crate::{markdown, slug};
use log::debug;
use std::fmt;
use std::fs::read_dir;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// The file extension recognized as post source.
pub const MARKDOWN_EXTENSION: &str = "md";

/// The extension of rendered post pages.
pub const HTML_EXTENSION: &str = "html";

pub const UNTITLED: &str = "Untitled Post";
pub const NO_DATE: &str = "No date";
pub const DEFAULT_READ_TIME: &str = "5 min read";
pub const NO_SUMMARY: &str = "No summary available.";

/// A post source file as read from disk.
#[derive(Clone, Debug)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub contents: String,
    pub modified: SystemTime,
}

impl SourceDocument {
    /// Reads the file at `path` along with its modification time.
    pub fn read(path: &Path) -> Result<SourceDocument> {
        let annotate = |err| Error::Read {
            path: path.to_owned(),
            err,
        };
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(annotate)?;
        let contents = std::fs::read_to_string(path).map_err(annotate)?;
        Ok(SourceDocument {
            path: path.to_owned(),
            contents,
            modified,
        })
    }

    /// The file name, e.g. `hello.md`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The file name less its extension, e.g. `hello`.
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// One parsed and rendered post. Each post backs exactly one output page,
/// `{pages_directory}/{slug}.html`.
#[derive(Clone, Debug)]
pub struct Post {
    pub frontmatter: Frontmatter,

    /// The post body rendered to HTML.
    pub body: String,

    /// Derived from the title, or the source file stem when there is no
    /// usable title. Not unique across posts.
    pub slug: String,

    /// The name of the source file the post was parsed from.
    pub source_filename: String,
}

impl Post {
    /// Builds a post from its source: splits off the frontmatter, renders the
    /// markdown body and derives the slug.
    pub fn from_source(doc: &SourceDocument) -> Post {
        let (frontmatter, body_markdown) = frontmatter::parse(&doc.contents);

        let mut body = String::new();
        markdown::to_html(&mut body, body_markdown);

        let slug = frontmatter
            .get("title")
            .map(slug::slugify)
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| doc.file_stem());

        Post {
            frontmatter,
            body,
            slug,
            source_filename: doc.file_name(),
        }
    }

    pub fn title(&self) -> &str {
        self.frontmatter.get_non_empty("title").unwrap_or(UNTITLED)
    }

    pub fn date(&self) -> &str {
        self.frontmatter.get_non_empty("date").unwrap_or(NO_DATE)
    }

    pub fn read_time(&self) -> &str {
        self.frontmatter
            .get_non_empty("readTime")
            .unwrap_or(DEFAULT_READ_TIME)
    }

    pub fn summary(&self) -> &str {
        self.frontmatter.get_non_empty("summary").unwrap_or(NO_SUMMARY)
    }

    /// The output file name, e.g. `hello-world.html`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.slug, HTML_EXTENSION)
    }
}

/// Finds the post source files (extension `.md`) directly inside
/// `source_directory`, reads them, and returns them most recently modified
/// first. Files modified at the same instant are ordered by name.
///
/// Ordering comes from the filesystem, not from any `date` frontmatter, so
/// touching an old post moves it to the top.
pub fn discover(source_directory: &Path) -> Result<Vec<SourceDocument>> {
    let read_dir_err = |err| Error::ReadDir {
        path: source_directory.to_owned(),
        err,
    };

    let mut docs = Vec::new();
    for result in read_dir(source_directory).map_err(read_dir_err)? {
        let entry = result.map_err(read_dir_err)?;
        let path = entry.path();
        let is_markdown = path
            .extension()
            .map_or(false, |ext| ext == MARKDOWN_EXTENSION);
        // follows symlinks, so linked sources count as posts
        if is_markdown && path.is_file() {
            debug!("Discovered post source `{}`", path.display());
            docs.push(SourceDocument::read(&path)?);
        }
    }

    docs.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.path.cmp(&b.path)));
    Ok(docs)
}

/// Discovers and parses every post in `source_directory`. See [`discover`]
/// for ordering.
pub fn parse_posts(source_directory: &Path) -> Result<Vec<Post>> {
    Ok(discover(source_directory)?
        .iter()
        .map(Post::from_source)
        .collect())
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error reading post sources. Malformed post content is never
/// an error; only I/O is.
#[derive(Debug)]
pub enum Error {
    /// Returned when the source directory can't be listed.
    ReadDir { path: PathBuf, err: std::io::Error },

    /// Returned when a source file can't be read.
    Read { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ReadDir { path, err } => {
                write!(f, "Reading directory '{}': {}", path.display(), err)
            }
            Error::Read { path, err } => {
                write!(f, "Reading post '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ReadDir { path: _, err } => Some(err),
            Error::Read { path: _, err } => Some(err),
        }
    }
}
