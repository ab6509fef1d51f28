//! Conversions from the typed page models in [`crate::template`] into
//! [`Value`]s for the theme templates. Field names here are the names the
//! templates refer to (e.g. `{{.read_time}}`).

use crate::template::{Article, Document, Home, IndexEntry};
use gtmpl_value::Value;
use std::collections::HashMap;

fn string<S: Into<String>>(s: S) -> Value {
    Value::String(s.into())
}

impl From<&Document> for Value {
    fn from(d: &Document) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("head_title".to_owned(), string(d.head_title.as_str()));
        m.insert("title".to_owned(), string(d.title.as_str()));
        m.insert("description".to_owned(), string(d.description.as_str()));
        m.insert("keywords".to_owned(), string(d.keywords.as_str()));
        m.insert("author".to_owned(), string(d.author.as_str()));
        m.insert("canonical_url".to_owned(), string(d.canonical_url.as_str()));
        m.insert("image".to_owned(), string(d.image.as_str()));
        m.insert("og_type".to_owned(), string(d.og_type));
        m.insert("site_name".to_owned(), string(d.site_name.as_str()));
        m.insert("background".to_owned(), string(d.background.as_str()));
        m.insert("back_link".to_owned(), Value::Bool(d.back_link));
        m.insert("style".to_owned(), string(d.style));
        m.insert("body".to_owned(), string(d.body.as_str()));
        Value::Object(m)
    }
}

impl From<&Article<'_>> for Value {
    fn from(a: &Article) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), string(a.title));
        m.insert("date".to_owned(), string(a.date));
        m.insert("read_time".to_owned(), string(a.read_time));
        m.insert("summary".to_owned(), string(a.summary));
        m.insert("content".to_owned(), string(a.content));
        Value::Object(m)
    }
}

impl From<&IndexEntry<'_>> for Value {
    fn from(e: &IndexEntry) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), string(e.title));
        m.insert("date".to_owned(), string(e.date));
        m.insert("read_time".to_owned(), string(e.read_time));
        m.insert("summary".to_owned(), string(e.summary));
        m.insert("slug".to_owned(), string(e.slug));
        m.insert("url".to_owned(), string(e.url()));
        Value::Object(m)
    }
}

impl From<&Home<'_>> for Value {
    fn from(h: &Home) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("site_title".to_owned(), string(h.site_title));
        m.insert("tagline".to_owned(), string(h.tagline));
        m.insert("has_posts".to_owned(), Value::Bool(!h.posts.is_empty()));
        m.insert(
            "posts".to_owned(),
            Value::Array(h.posts.iter().map(Value::from).collect()),
        );
        Value::Object(m)
    }
}
