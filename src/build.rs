//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: parsing the posts
//! ([`crate::post`]), rendering post pages and the home page
//! ([`crate::write`]), copying the static asset directory into the output
//! directory, and generating the sitemap ([`crate::sitemap`]).
//!
//! A build is all-or-nothing in the sense that the first I/O error aborts it.
//! Files written before the error stay on disk.

use crate::config::Config;
use crate::post::{self, Error as ParseError};
use crate::sitemap::{self, SITEMAP};
use crate::template::{Site, Templater};
use crate::write::{Error as WriteError, Writer};
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a finished build produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Post pages written, one per source file. Colliding slugs are counted
    /// once per source file even though they share a page.
    pub posts: usize,

    /// Files copied from the asset directory.
    pub assets: usize,

    /// Whether the background asset was copied to the site root.
    pub background_copied: bool,
    pub home_page: PathBuf,
    pub sitemap: PathBuf,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Posts written:  {}", self.posts)?;
        writeln!(f, "Assets copied:  {}", self.assets)?;
        writeln!(
            f,
            "Background:     {}",
            if self.background_copied { "copied" } else { "none" }
        )?;
        writeln!(f, "Home page:      {}", self.home_page.display())?;
        write!(f, "Sitemap:        {}", self.sitemap.display())
    }
}

/// Builds the site from a [`Config`] object, stamping the sitemap with
/// today's (UTC) date. See [`build_site_on`].
pub fn build_site(config: &Config) -> Result<Summary> {
    build_site_on(config, Utc::now().naive_utc().date())
}

/// Builds the site from a [`Config`] object. This calls into
/// [`post::parse_posts`], [`Writer::write_posts`], and
/// [`sitemap::write_sitemap`] which do the heavy-lifting. This function also
/// copies the static assets from the asset directory into the output
/// directory. `build_date` becomes every sitemap entry's `lastmod`.
pub fn build_site_on(config: &Config, build_date: NaiveDate) -> Result<Summary> {
    create_dir(&config.source_directory)?;
    create_dir(&config.pages_output_directory)?;

    // collect all posts, most recently modified first
    let posts = post::parse_posts(&config.source_directory)?;
    info!(
        "Parsed {} post(s) from `{}`",
        posts.len(),
        config.source_directory.display()
    );

    // pages reference the background only when it will actually be copied
    let background = match &config.background_asset {
        Some(background) => find_background(config, background),
        None => None,
    };
    let site = Site {
        background: background.as_ref().map(|b| b.name.clone()),
        ..config.site.clone()
    };

    // write the post pages
    let templater = Templater::new(&site);
    let writer = Writer {
        templater: &templater,
        pages_output_directory: &config.pages_output_directory,
        root_output_directory: &config.root_output_directory,
    };
    let written = writer.write_posts(&posts)?;

    // copy static assets
    let assets = copy_assets(
        &config.asset_source_directory,
        &config.asset_output_directory,
    )?;
    let background_copied = match &background {
        Some(background) => {
            copy_file(
                &background.source,
                &config.root_output_directory.join(&background.name),
            )?;
            true
        }
        None => false,
    };

    let home_page = writer.write_home_page(&posts)?;

    // create the sitemap
    let sitemap_path = config.root_output_directory.join(SITEMAP);
    let sitemap_err = |err| WriteError::Write {
        path: sitemap_path.clone(),
        err,
    };
    let file = File::create(&sitemap_path).map_err(sitemap_err)?;
    sitemap::write_sitemap(&site, &posts, build_date, file).map_err(sitemap_err)?;

    Ok(Summary {
        posts: written.len(),
        assets,
        background_copied,
        home_page,
        sitemap: sitemap_path,
    })
}

/// Creates `dir` and any missing parents. Succeeds if it already exists.
fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|err| Error::CreateDir {
        path: dir.to_owned(),
        err,
    })
}

/// Copies every file under `src` to the same relative path under `dst`,
/// overwriting existing files. Returns the number of files copied. A missing
/// `src` means there is nothing to copy.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize> {
    if !src.is_dir() {
        warn!(
            "Asset directory `{}` not found; skipping assets",
            src.display()
        );
        return Ok(0);
    }

    let mut copied = 0;
    for result in WalkDir::new(src) {
        let entry = result?;
        // strip_prefix shouldn't fail since `src` is always an ancestor of
        // the walked entries
        let relative = match entry.path().strip_prefix(src) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            create_dir(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }
    debug!("Copied {} asset(s) into `{}`", copied, dst.display());
    Ok(copied)
}

/// A background asset that exists and will be copied to the site root.
struct Background {
    source: PathBuf,

    /// The file name it takes in the site root.
    name: String,
}

fn find_background(config: &Config, background: &Path) -> Option<Background> {
    let source = config.asset_source_directory.join(background);
    if !source.is_file() {
        debug!("No background asset at `{}`", source.display());
        return None;
    }
    let name = background.file_name()?.to_string_lossy().into_owned();
    Some(Background { source, name })
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    match std::fs::copy(from, to) {
        Ok(_) => Ok(()),
        Err(err) => Err(Error::CopyAsset {
            from: from.to_owned(),
            to: to.to_owned(),
            err,
        }),
    }
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Every variant aborts the build.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors reading post sources.
    Parse(ParseError),

    /// Returned for errors writing pages or the sitemap.
    Write(WriteError),

    /// Returned when a source or output directory can't be created.
    CreateDir { path: PathBuf, err: std::io::Error },

    /// Returned when an asset can't be copied.
    CopyAsset {
        from: PathBuf,
        to: PathBuf,
        err: std::io::Error,
    },

    /// Returned when walking the asset directory fails.
    WalkDir(walkdir::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
            Error::CreateDir { path, err } => {
                write!(f, "Creating directory '{}': {}", path.display(), err)
            }
            Error::CopyAsset { from, to, err } => write!(
                f,
                "Copying '{}' to '{}': {}",
                from.display(),
                to.display(),
                err
            ),
            Error::WalkDir(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::CreateDir { path: _, err } => Some(err),
            Error::CopyAsset { err, .. } => Some(err),
            Error::WalkDir(err) => Some(err),
        }
    }
}

impl From<ParseError> for Error {
    /// Converts [`ParseError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts [`walkdir::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}
