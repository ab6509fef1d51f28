//! Support for creating a sitemap from a list of posts.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use crate::post::Post;
use crate::template::Site;
use chrono::NaiveDate;
use std::fmt;
use std::io::{self, Write};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// The file name of the sitemap in the site root.
pub const SITEMAP: &str = "sitemap.xml";

/// How often a URL is expected to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        })
    }
}

/// A single `<url>` element.
#[derive(Clone, Debug, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,

    /// The date of the build that produced the sitemap; content dates are
    /// not consulted.
    pub lastmod: NaiveDate,
    pub changefreq: ChangeFrequency,
    pub priority: f32,
}

/// Lists the site root followed by one entry per post, in post order. Every
/// entry is stamped with `build_date`.
pub fn entries(site: &Site, posts: &[Post], build_date: NaiveDate) -> Vec<SitemapEntry> {
    let root = SitemapEntry {
        loc: format!("{}/", site.origin),
        lastmod: build_date,
        changefreq: ChangeFrequency::Weekly,
        priority: 1.0,
    };

    std::iter::once(root)
        .chain(posts.iter().map(|post| SitemapEntry {
            loc: site.post_url(&post.slug),
            lastmod: build_date,
            changefreq: ChangeFrequency::Monthly,
            priority: 0.8,
        }))
        .collect()
}

/// Creates the sitemap for `posts` and writes it to a [`std::io::Write`].
pub fn write_sitemap<W: Write>(
    site: &Site,
    posts: &[Post],
    build_date: NaiveDate,
    mut w: W,
) -> io::Result<()> {
    w.write_all(to_xml(&entries(site, posts, build_date)).as_bytes())
}

/// Serializes `entries` as a sitemap `urlset`.
pub fn to_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 160);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NS));
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.lastmod.format("%Y-%m-%d")
        ));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
