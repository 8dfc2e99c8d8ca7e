use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// How a sub-page's target is put on screen.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbedKind {
    /// Sandboxed iframe pointing at the target.
    Embed,
    /// External script attached to the page, loaded asynchronously.
    Script,
    /// Plain outbound link card.
    Link,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SubpageEntry {
    pub title: String,
    pub kind: EmbedKind,
    pub target: Url,
    /// Markdown shown above the embedded content.
    pub blurb: Option<String>,
    /// Name of an initializer registered with the session, run once the
    /// script has loaded. Only meaningful for [`EmbedKind::Script`].
    pub initializer: Option<String>,
}

/// A top-level route that owns its own table of sub-pages.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Section {
    #[serde(default)]
    pub subpages: BTreeMap<String, SubpageEntry>,
}

impl Section {
    pub fn get(&self, slug: &str) -> Option<&SubpageEntry> {
        self.subpages.get(slug)
    }
}
