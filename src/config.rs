//! Loads the build configuration from an optional `blog.yaml` project file.
//!
//! ```yaml
//! site_url: https://blog.example.org
//! title: Example Blog
//! author: Jane Doe
//! tagline: Writing things down
//! source_directory: content
//! output_directory: public
//! asset_directory: assets
//! background_asset: background.jpg
//! ```
//!
//! Every key is optional. Relative paths resolve against the directory
//! holding the project file.

use crate::template::{Site, PAGES_PATH};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file.
pub const PROJECT_FILE: &str = "blog.yaml";

/// The directory, relative to the output root, receiving static assets.
pub const ASSETS_PATH: &str = "assets";

#[derive(Deserialize)]
#[serde(default)]
struct Project {
    site_url: String,
    title: String,
    author: String,
    tagline: String,
    source_directory: PathBuf,
    output_directory: PathBuf,
    asset_directory: PathBuf,
    background_asset: Option<String>,
}

impl Default for Project {
    fn default() -> Self {
        Project {
            site_url: String::from("https://example.com"),
            title: String::from("My Blog"),
            author: String::from("Blog Author"),
            tagline: String::from("Thoughts, notes and write-ups."),
            source_directory: PathBuf::from("content"),
            output_directory: PathBuf::from("public"),
            asset_directory: PathBuf::from("assets"),
            background_asset: Some(String::from("background.jpg")),
        }
    }
}

/// Everything a build needs, resolved ahead of the run.
#[derive(Clone, Debug)]
pub struct Config {
    pub site: Site,

    /// The directory holding post source files.
    pub source_directory: PathBuf,

    /// The site root: home page, sitemap and background image.
    pub root_output_directory: PathBuf,

    /// `{root_output_directory}/pages`, holding post pages.
    pub pages_output_directory: PathBuf,

    /// The static asset tree copied verbatim into the output.
    pub asset_source_directory: PathBuf,

    /// `{root_output_directory}/assets`.
    pub asset_output_directory: PathBuf,

    /// The asset file (relative to the asset directory) also copied to the
    /// site root.
    pub background_asset: Option<PathBuf>,
}

impl Config {
    /// Looks for [`PROJECT_FILE`] in `dir` and its ancestors. Falls back to
    /// the defaults rooted at `dir` when there is none.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let mut current = Some(dir);
        while let Some(candidate) = current {
            let path = candidate.join(PROJECT_FILE);
            if path.is_file() {
                return Config::from_project_file(&path);
            }
            current = candidate.parent();
        }
        log::info!(
            "No `{}` found from `{}`; using defaults",
            PROJECT_FILE,
            dir.display()
        );
        Config::from_project(Project::default(), dir)
    }

    /// Loads the configuration from the project file at `path`.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Opening project file `{}`", path.display()))?;
        let project: Project = serde_yaml::from_str(&contents)
            .with_context(|| format!("Loading configuration `{}`", path.display()))?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => Config::from_project(project, project_root),
        }
    }

    /// Replaces the output root, re-deriving the directories under it.
    pub fn with_output_directory(mut self, output_directory: &Path) -> Config {
        self.root_output_directory = output_directory.to_owned();
        self.pages_output_directory = output_directory.join(PAGES_PATH);
        self.asset_output_directory = output_directory.join(ASSETS_PATH);
        self
    }

    fn from_project(project: Project, project_root: &Path) -> Result<Config> {
        let site_url = Url::parse(&project.site_url)
            .with_context(|| format!("Parsing `site_url` '{}'", project.site_url))?;
        if site_url.cannot_be_a_base() {
            return Err(anyhow!("`site_url` '{}' is not a base URL", site_url));
        }
        let root_output_directory = project_root.join(&project.output_directory);
        let background_asset = project.background_asset.map(PathBuf::from);
        // copied into the site root under its bare file name
        let background = background_asset
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned());

        Ok(Config {
            site: Site {
                origin: site_url.as_str().trim_end_matches('/').to_owned(),
                title: project.title,
                author: project.author,
                tagline: project.tagline,
                background,
            },
            source_directory: project_root.join(&project.source_directory),
            pages_output_directory: root_output_directory.join(PAGES_PATH),
            asset_output_directory: root_output_directory.join(ASSETS_PATH),
            root_output_directory,
            asset_source_directory: project_root.join(&project.asset_directory),
            background_asset,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_project_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = Config::from_directory(dir.path())?;
        assert_eq!("https://example.com", config.site.origin);
        assert_eq!(dir.path().join("content"), config.source_directory);
        assert_eq!(dir.path().join("public"), config.root_output_directory);
        assert_eq!(dir.path().join("public/pages"), config.pages_output_directory);
        assert_eq!(dir.path().join("public/assets"), config.asset_output_directory);
        assert_eq!(dir.path().join("assets"), config.asset_source_directory);
        assert_eq!(Some(PathBuf::from("background.jpg")), config.background_asset);
        Ok(())
    }

    #[test]
    fn test_project_file_in_ancestor() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join(PROJECT_FILE),
            "site_url: https://blog.example.org/\ntitle: Mine\nauthor: Me\noutput_directory: out\nbackground_asset: ~\n",
        )?;
        let nested = dir.path().join("content/drafts");
        fs::create_dir_all(&nested)?;

        let config = Config::from_directory(&nested)?;
        assert_eq!("https://blog.example.org", config.site.origin);
        assert_eq!("Mine", config.site.title);
        assert_eq!("Me", config.site.author);
        assert_eq!(dir.path().join("out"), config.root_output_directory);
        assert_eq!(dir.path().join("content"), config.source_directory);
        assert_eq!(None, config.background_asset);
        assert_eq!(None, config.site.background);
        Ok(())
    }

    #[test]
    fn test_nested_background_uses_file_name() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(PROJECT_FILE), "background_asset: img/bg.jpg\n")?;
        let config = Config::from_directory(dir.path())?;
        assert_eq!(Some(PathBuf::from("img/bg.jpg")), config.background_asset);
        assert_eq!(Some("bg.jpg"), config.site.background.as_deref());
        Ok(())
    }

    #[test]
    fn test_site_url_with_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(PROJECT_FILE), "site_url: https://example.org/blog/\n")?;
        let config = Config::from_directory(dir.path())?;
        assert_eq!("https://example.org/blog", config.site.origin);
        assert_eq!("https://example.org/blog/pages/x.html", config.site.post_url("x"));
        Ok(())
    }

    #[test]
    fn test_invalid_site_url() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(PROJECT_FILE), "site_url: not a url\n")?;
        assert!(Config::from_directory(dir.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_with_output_directory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = Config::from_directory(dir.path())?.with_output_directory(Path::new("/tmp/site"));
        assert_eq!(Path::new("/tmp/site/pages"), config.pages_output_directory);
        assert_eq!(Path::new("/tmp/site/assets"), config.asset_output_directory);
        Ok(())
    }
}
