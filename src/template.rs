//! Turns posts into complete HTML documents.
//!
//! Pages are first assembled as typed values ([`Document`], [`Article`],
//! [`Home`]) and then serialized in one place through the embedded theme
//! templates. The templates are executed by [`gtmpl`], which follows Go's
//! `text/template`: values are inserted verbatim, never HTML-escaped. Post
//! content and metadata are written by the site's author and are trusted, so
//! a title such as `<em>Rust</em>` renders as markup.

use crate::frontmatter::Frontmatter;
use crate::post::Post;
use gtmpl_value::Value;
use std::fmt;

const LAYOUT_TEMPLATE: &str = include_str!("theme/layout.html");
const POST_TEMPLATE: &str = include_str!("theme/post.html");
const HOME_TEMPLATE: &str = include_str!("theme/home.html");
const STYLE: &str = include_str!("theme/style.css");

pub const DEFAULT_DESCRIPTION: &str =
    "Notes and long-form writing on software and the craft of building it.";
pub const DEFAULT_KEYWORDS: &str = "blog, software, programming, writing";

/// Site-relative path of the social card image used when a post doesn't name
/// its own `image`.
pub const DEFAULT_IMAGE_PATH: &str = "/assets/og-image.png";

/// The directory, relative to the site root, holding post pages.
pub const PAGES_PATH: &str = "pages";

/// Site-wide values shared by every page.
#[derive(Clone, Debug)]
pub struct Site {
    /// The site origin without a trailing slash, e.g. `https://example.com`.
    pub origin: String,
    pub title: String,
    pub author: String,
    pub tagline: String,

    /// File name of the background image copied to the site root, if any.
    pub background: Option<String>,
}

impl Site {
    /// The absolute URL of a post page.
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/{}/{}.html", self.origin, PAGES_PATH, slug)
    }
}

/// Which kind of page is being rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind<'a> {
    Home,
    Post { slug: &'a str },
}

impl PageKind<'_> {
    pub fn is_post_page(&self) -> bool {
        matches!(self, PageKind::Post { .. })
    }
}

/// A complete HTML page prior to serialization.
#[derive(Clone, Debug)]
pub struct Document {
    /// The contents of `<title>`.
    pub head_title: String,

    /// The page title used in social metadata.
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub canonical_url: String,
    pub image: String,
    pub og_type: &'static str,
    pub site_name: String,

    /// Absolute URL of the page background, or empty for none.
    pub background: String,

    /// Whether to show a link back to the home page.
    pub back_link: bool,
    pub style: &'static str,
    pub body: String,
}

/// The body of a post page.
#[derive(Clone, Debug)]
pub struct Article<'a> {
    pub title: &'a str,
    pub date: &'a str,
    pub read_time: &'a str,
    pub summary: &'a str,
    pub content: &'a str,
}

/// One post as listed on the home page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry<'a> {
    pub title: &'a str,
    pub date: &'a str,
    pub read_time: &'a str,
    pub summary: &'a str,
    pub slug: &'a str,
}

impl<'a> From<&'a Post> for IndexEntry<'a> {
    fn from(post: &'a Post) -> IndexEntry<'a> {
        IndexEntry {
            title: post.title(),
            date: post.date(),
            read_time: post.read_time(),
            summary: post.summary(),
            slug: &post.slug,
        }
    }
}

impl IndexEntry<'_> {
    /// The link to the post page, relative to the site root.
    pub fn url(&self) -> String {
        format!("{}/{}.html", PAGES_PATH, self.slug)
    }
}

/// The body of the home page.
#[derive(Clone, Debug)]
pub struct Home<'a> {
    pub site_title: &'a str,
    pub tagline: &'a str,
    pub posts: Vec<IndexEntry<'a>>,
}

/// Builds and serializes pages for a [`Site`].
pub struct Templater<'a> {
    pub site: &'a Site,
}

impl<'a> Templater<'a> {
    pub fn new(site: &'a Site) -> Templater<'a> {
        Templater { site }
    }

    /// Assembles the [`Document`] for a page. Missing SEO metadata falls back
    /// to canned values: `summary` for the description, `keywords`, `author`
    /// (the site author) and `image` (the default social card).
    pub fn document(
        &self,
        title: &str,
        body: &str,
        kind: PageKind,
        frontmatter: &Frontmatter,
    ) -> Document {
        let site = self.site;
        let (canonical_url, head_title, og_type) = match kind {
            PageKind::Post { slug } => (
                site.post_url(slug),
                format!("{} | {}", title, site.title),
                "article",
            ),
            PageKind::Home => (site.origin.clone(), title.to_owned(), "website"),
        };

        Document {
            head_title,
            title: title.to_owned(),
            description: frontmatter
                .get_non_empty("summary")
                .unwrap_or(DEFAULT_DESCRIPTION)
                .to_owned(),
            keywords: frontmatter
                .get_non_empty("keywords")
                .unwrap_or(DEFAULT_KEYWORDS)
                .to_owned(),
            author: frontmatter
                .get_non_empty("author")
                .unwrap_or(site.author.as_str())
                .to_owned(),
            canonical_url,
            image: match frontmatter.get_non_empty("image") {
                Some(image) => image.to_owned(),
                None => format!("{}{}", site.origin, DEFAULT_IMAGE_PATH),
            },
            og_type,
            site_name: site.title.clone(),
            background: match &site.background {
                Some(name) => format!("{}/{}", site.origin, name),
                None => String::new(),
            },
            back_link: kind.is_post_page(),
            style: STYLE,
            body: body.to_owned(),
        }
    }

    /// Renders a complete page. `body` is inserted as-is.
    pub fn render(
        &self,
        title: &str,
        body: &str,
        kind: PageKind,
        frontmatter: &Frontmatter,
    ) -> Result<String> {
        serialize(
            LAYOUT_TEMPLATE,
            &self.document(title, body, kind, frontmatter),
        )
    }

    /// Renders the page for `post`, whose `body` has already been
    /// post-processed.
    pub fn post_page(&self, post: &Post, body: &str) -> Result<String> {
        let article = serialize(
            POST_TEMPLATE,
            &Article {
                title: post.title(),
                date: post.date(),
                read_time: post.read_time(),
                summary: post.summary(),
                content: body,
            },
        )?;
        self.render(
            post.title(),
            &article,
            PageKind::Post { slug: &post.slug },
            &post.frontmatter,
        )
    }

    /// Renders the home page listing `posts` in the given order.
    pub fn home_page(&self, posts: &[Post]) -> Result<String> {
        let home = serialize(
            HOME_TEMPLATE,
            &Home {
                site_title: &self.site.title,
                tagline: &self.site.tagline,
                posts: posts.iter().map(IndexEntry::from).collect(),
            },
        )?;
        self.render(
            &self.site.title,
            &home,
            PageKind::Home,
            &Frontmatter::default(),
        )
    }
}

/// The single serialization boundary: executes `template` against `item`.
fn serialize<'v, T>(template: &str, item: &'v T) -> Result<String>
where
    Value: From<&'v T>,
{
    gtmpl::template(template, Value::from(item)).map_err(|e| Error(e.to_string()))
}

/// The result of a templating operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Returned when a theme template fails to parse or execute.
#[derive(Debug)]
pub struct Error(pub String);

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Templating: {}", self.0)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::frontmatter;
    use crate::post::{SourceDocument, NO_DATE, NO_SUMMARY, UNTITLED};
    use std::path::PathBuf;
    use std::time::SystemTime;

    fn site() -> Site {
        Site {
            origin: String::from("https://example.com"),
            title: String::from("Example Blog"),
            author: String::from("Jane Doe"),
            tagline: String::from("Writing things down"),
            background: Some(String::from("background.jpg")),
        }
    }

    fn post(name: &str, contents: &str) -> Post {
        Post::from_source(&SourceDocument {
            path: PathBuf::from(name),
            contents: contents.to_owned(),
            modified: SystemTime::UNIX_EPOCH,
        })
    }

    #[test]
    fn test_post_document_metadata() {
        let site = site();
        let (fm, _) = frontmatter::parse("---\ntitle: T\n---\n");
        let doc = Templater::new(&site).document("T", "<p>b</p>", PageKind::Post { slug: "t" }, &fm);
        assert_eq!("https://example.com/pages/t.html", doc.canonical_url);
        assert_eq!(DEFAULT_DESCRIPTION, doc.description);
        assert_eq!(DEFAULT_KEYWORDS, doc.keywords);
        assert_eq!("Jane Doe", doc.author);
        assert_eq!("https://example.com/assets/og-image.png", doc.image);
        assert_eq!("article", doc.og_type);
        assert!(doc.back_link);
    }

    #[test]
    fn test_home_document_metadata() {
        let site = site();
        let doc = Templater::new(&site).document("Example Blog", "", PageKind::Home, &Frontmatter::default());
        assert_eq!("https://example.com", doc.canonical_url);
        assert_eq!("website", doc.og_type);
        assert!(!doc.back_link);
    }

    #[test]
    fn test_frontmatter_overrides_defaults() {
        let site = site();
        let (fm, _) = frontmatter::parse(
            "---\nsummary: About things\nkeywords: a, b\nimage: https://cdn.example.com/x.png\nauthor: Guest\n---\n",
        );
        let doc = Templater::new(&site).document("T", "", PageKind::Post { slug: "t" }, &fm);
        assert_eq!("About things", doc.description);
        assert_eq!("a, b", doc.keywords);
        assert_eq!("https://cdn.example.com/x.png", doc.image);
        assert_eq!("Guest", doc.author);
    }

    #[test]
    fn test_render_post_page() -> Result<()> {
        let site = site();
        let post = post("a.md", "---\ntitle: Hello World!\n---\n# Hi");
        let html = Templater::new(&site).post_page(&post, &post.body)?;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<meta charset=\"UTF-8\">"));
        assert!(html.contains("name=\"viewport\""));
        assert!(html.contains("<h1 class=\"post-title\">Hello World!</h1>"));
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains(&format!("<meta name=\"description\" content=\"{}\">", DEFAULT_DESCRIPTION)));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://example.com/pages/hello-world.html\">"));
        assert!(html.contains("<meta property=\"og:url\" content=\"https://example.com/pages/hello-world.html\">"));
        assert!(html.contains("<meta name=\"twitter:card\" content=\"summary_large_image\">"));
        assert!(html.contains("Back to home"));
        assert!(html.contains("<style>"));
        assert!(!html.contains("<link rel=\"stylesheet\""));
        assert!(html.contains("url(\"https://example.com/background.jpg\")"));
        Ok(())
    }

    #[test]
    fn test_render_post_page_fallbacks() -> Result<()> {
        let site = site();
        let post = post("plain.md", "just text");
        let html = Templater::new(&site).post_page(&post, &post.body)?;
        assert!(html.contains(&format!("<h1 class=\"post-title\">{}</h1>", UNTITLED)));
        assert!(html.contains(&format!("<time>{}</time>", NO_DATE)));
        assert!(html.contains("<span>5 min read</span>"));
        assert!(html.contains(NO_SUMMARY));
        Ok(())
    }

    #[test]
    fn test_values_are_not_escaped() -> Result<()> {
        let site = site();
        let post = post("a.md", "---\ntitle: <em>Rust</em> & \"friends\"\nsummary: a <b>bold</b> claim\n---\n");
        let html = Templater::new(&site).post_page(&post, &post.body)?;
        assert!(html.contains("<h1 class=\"post-title\"><em>Rust</em> & \"friends\"</h1>"));
        assert!(html.contains("<meta name=\"description\" content=\"a <b>bold</b> claim\">"));
        assert!(!html.contains("&lt;em&gt;"));
        Ok(())
    }

    #[test]
    fn test_render_home_page() -> Result<()> {
        let site = Site {
            background: None,
            ..site()
        };
        let posts = vec![
            post("b.md", "---\ntitle: Second\ndate: June 2\nreadTime: 3 min read\nsummary: two\n---\n"),
            post("a.md", "---\ntitle: First\n---\n"),
        ];
        let html = Templater::new(&site).home_page(&posts)?;
        assert!(html.contains("<h1 class=\"site-title\">Example Blog</h1>"));
        assert!(html.contains("<p class=\"tagline\">Writing things down</p>"));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://example.com\">"));
        assert!(!html.contains("Back to home"));
        assert!(!html.contains("background-image"));

        let second = html.find("href=\"pages/second.html\"").expect("second listed");
        let first = html.find("href=\"pages/first.html\"").expect("first listed");
        assert!(second < first);
        assert!(html.contains("<time>June 2</time>"));
        assert!(html.contains("<span>3 min read</span>"));
        assert!(html.contains("<p class=\"post-card-summary\">two</p>"));
        assert!(html.contains(NO_SUMMARY));
        Ok(())
    }

    #[test]
    fn test_render_home_page_without_posts() -> Result<()> {
        let site = site();
        let html = Templater::new(&site).home_page(&[])?;
        assert!(html.contains("Nothing published yet."));
        assert!(!html.contains("post-card\""));
        Ok(())
    }

    #[test]
    fn test_index_entry_from_post() {
        let post = post("a.md", "---\ntitle: Hello World!\n---\n");
        let entry = IndexEntry::from(&post);
        assert_eq!("hello-world", entry.slug);
        assert_eq!("pages/hello-world.html", entry.url());
        assert_eq!(NO_DATE, entry.date);
    }
}
