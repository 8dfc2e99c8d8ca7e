use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use url::Url;

use crate::subpage::{EmbedKind, Section};

/// `subpages(section="/foam")` lists a section's sub-pages for navigation
/// chrome, ordered by slug.
pub struct Subpages {
    sections: BTreeMap<String, Section>,
}

#[derive(Serialize)]
struct SubpageLink<'a> {
    slug: &'a str,
    path: String,
    title: &'a str,
    kind: EmbedKind,
    target: &'a Url,
}

impl Subpages {
    pub fn new(sections: BTreeMap<String, Section>) -> Self {
        Self { sections }
    }
}

impl tera::Function for Subpages {
    fn call(&self, args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
        let key = args
            .get("section")
            .cloned()
            .map(tera::from_value::<String>)
            .transpose()?
            .ok_or_else(|| tera::Error::msg("subpages: missing section"))?;

        let Some(section) = self.sections.get(&key) else {
            return Err(format!("no such section {}", key).into());
        };

        let links = section
            .subpages
            .iter()
            .map(|(slug, entry)| SubpageLink {
                slug,
                path: format!("{}/{}", key.trim_end_matches('/'), slug),
                title: &entry.title,
                kind: entry.kind,
                target: &entry.target,
            })
            .collect::<Vec<_>>();

        Ok(tera::to_value(links)?)
    }
}
