//! The metadata record a provider fills in for one catalog item.
//!
//! Every field defaults to empty. Providers leave a field empty to signal
//! "unknown"; readers never have to deal with a missing key.

use serde::{Deserialize, Serialize};

/// Descriptive metadata for one catalog item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Display title.
    pub title: String,
    /// Canonical catalog number as reported by the provider.
    pub number: String,
    /// Release date, as the provider formats it.
    pub release: String,
    /// Runtime, usually in minutes.
    pub runtime: String,
    pub director: String,
    pub studio: String,
    pub publisher: String,
    pub series: String,
    /// Genre tags, in provider order.
    pub tags: Vec<String>,
    /// Performers, in provider order.
    pub actor: Vec<String>,
    /// Cover image URL.
    pub cover: String,
    /// Synopsis.
    pub outline: String,
    /// Provider-side content id, when the source exposes one.
    pub cid: String,
    /// Tags derived from the filename after a result is accepted.
    pub extra: Extra,
}

/// Filename-derived tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extra {
    /// `"Leaked"` when the filename carries a leaked marker.
    pub leaked: String,
    /// Multi-part label such as `-cd2`.
    pub part: String,
    /// `"C"` when the filename carries a subtitle marker.
    pub sub: String,
}

impl Metadata {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a scalar field by dotted path.
    ///
    /// Unknown, list-valued or arbitrarily deep paths read as `""`.
    ///
    /// ```
    /// use idforged_common::Metadata;
    ///
    /// let mut data = Metadata::new();
    /// data.title = "A Title".into();
    /// data.extra.part = "-cd1".into();
    ///
    /// assert_eq!(data.text("title"), "A Title");
    /// assert_eq!(data.text("extra.part"), "-cd1");
    /// assert_eq!(data.text("studio"), "");
    /// assert_eq!(data.text("extra.never.set.anywhere"), "");
    /// ```
    pub fn text(&self, path: &str) -> &str {
        let mut segments = path.split('.');
        let head = segments.next().unwrap_or_default();
        let rest: Vec<&str> = segments.collect();

        match (head, rest.as_slice()) {
            ("title", []) => &self.title,
            ("number", []) => &self.number,
            ("release", []) => &self.release,
            ("runtime", []) => &self.runtime,
            ("director", []) => &self.director,
            ("studio", []) => &self.studio,
            ("publisher", []) => &self.publisher,
            ("series", []) => &self.series,
            ("cover", []) => &self.cover,
            ("outline", []) => &self.outline,
            ("cid", []) => &self.cid,
            ("extra", [field]) => self.extra.text(field),
            _ => "",
        }
    }

    /// Read a list field by name. Anything else reads as an empty slice.
    pub fn list(&self, path: &str) -> &[String] {
        match path {
            "tags" => &self.tags,
            "actor" => &self.actor,
            _ => &[],
        }
    }
}

impl Extra {
    /// Read a field by name; unknown names read as `""`.
    pub fn text(&self, field: &str) -> &str {
        match field {
            "leaked" => &self.leaked,
            "part" => &self.part,
            "sub" => &self.sub,
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_read_empty() {
        let data = Metadata::new();
        for field in [
            "title", "number", "release", "runtime", "director", "studio", "publisher", "series",
            "cover", "outline", "cid",
        ] {
            assert_eq!(data.text(field), "", "{field} should be empty");
        }
        assert!(data.list("tags").is_empty());
        assert!(data.list("actor").is_empty());
    }

    #[test]
    fn nested_and_unknown_paths_read_empty() {
        let data = Metadata::new();
        assert_eq!(data.text("extra.leaked"), "");
        assert_eq!(data.text("extra.sub"), "");
        assert_eq!(data.text("extra.unknown"), "");
        assert_eq!(data.text("extra.a.b.c.d"), "");
        assert_eq!(data.text("no.such.group"), "");
        assert_eq!(data.text(""), "");
        assert!(data.list("extra.tags").is_empty());
    }

    #[test]
    fn list_fields_do_not_read_as_text() {
        let mut data = Metadata::new();
        data.tags = vec!["drama".into()];
        assert_eq!(data.text("tags"), "");
        assert_eq!(data.list("tags"), ["drama".to_string()]);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let data: Metadata =
            serde_json::from_str(r#"{"title": "T", "extra": {"sub": "C"}}"#).unwrap();
        assert_eq!(data.title, "T");
        assert_eq!(data.number, "");
        assert_eq!(data.extra.sub, "C");
        assert_eq!(data.extra.leaked, "");
        assert!(data.actor.is_empty());
    }
}
