//! The library code for the `blogsmith` static site generator. A build is a
//! single sequential pass:
//!
//! 1. Reading post sources from disk, most recently modified first
//!    ([`crate::post`]), splitting each into frontmatter and markdown
//!    ([`crate::frontmatter`]) and deriving its slug ([`crate::slug`])
//! 2. Writing one page per post, plus the home page ([`crate::write`])
//! 3. Copying static assets and writing the sitemap ([`crate::build`],
//!    [`crate::sitemap`])
//!
//! Pages are assembled as typed documents and serialized through the theme
//! templates embedded in the binary ([`crate::template`]). Nothing persists
//! between builds except the files written to the output directory.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod frontmatter;
pub mod markdown;
pub mod post;
pub mod sitemap;
pub mod slug;
pub mod tables;
pub mod template;
pub mod value;
pub mod write;
