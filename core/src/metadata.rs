//! User-entered metadata and the tag editor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata attached to the uploaded object.
///
/// `tags` keeps insertion order and never holds the same value twice
/// (exact, case-sensitive comparison).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl Metadata {
    /// Commit the tag entry field.
    ///
    /// A blank draft is left as is. Otherwise the trimmed value is appended
    /// unless already present and the draft is cleared. Returns whether a
    /// tag was added.
    pub fn commit_tag(&mut self, draft: &mut String) -> bool {
        let tag = draft.trim();
        if tag.is_empty() {
            return false;
        }

        let added = if self.tags.iter().any(|t| t == tag) {
            false
        } else {
            self.tags.push(tag.to_string());
            true
        };
        draft.clear();
        added
    }

    /// Remove exactly `tag`. Absent tags are a no-op.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Tags as stored on the object.
    pub fn joined_tags(&self) -> String {
        self.tags.join(",")
    }

    /// User metadata map sent with the object.
    pub fn object_metadata(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("title".to_string(), self.title.clone()),
            ("description".to_string(), self.description.clone()),
            ("tags".to_string(), self.joined_tags()),
        ])
    }
}
