use std::collections::BTreeMap;

use log::debug;

use crate::{
    config::{Config, ROOT_ROUTE},
    subpage::Section,
    templates::TemplateStore,
};

/// A sub-path that the owning section should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubpageRequest {
    pub section: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Route key whose template was chosen; `/` after a fallback.
    pub key: String,
    pub template: String,
    /// Set whenever the root template is shown, fallbacks included.
    pub is_root: bool,
    pub fallback: bool,
    pub subpage: Option<SubpageRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Found(Resolved),
    /// Neither the route nor the root route has a template.
    NotFound,
}

/// Strips the `#` a location hash carries. Empty means the root route.
pub fn normalize(fragment: &str) -> &str {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    if fragment.is_empty() {
        ROOT_ROUTE
    } else {
        fragment
    }
}

/// The first two `/`-separated segments of `path`: `/foam/x/y` -> `/foam`.
pub fn route_key(path: &str) -> String {
    let key = path.split('/').take(2).collect::<Vec<_>>().join("/");
    if key.is_empty() {
        ROOT_ROUTE.to_string()
    } else {
        key
    }
}

/// Immutable route and sub-page tables plus the templates they point at.
pub struct Router {
    routes: BTreeMap<String, String>,
    sections: BTreeMap<String, Section>,
    templates: TemplateStore,
}

impl Router {
    pub fn new(
        routes: BTreeMap<String, String>,
        sections: BTreeMap<String, Section>,
        templates: TemplateStore,
    ) -> Self {
        Self {
            routes,
            sections,
            templates,
        }
    }

    pub fn from_config(config: &Config, templates: TemplateStore) -> Self {
        Self::new(config.routes.clone(), config.sections.clone(), templates)
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn routes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.get(key)
    }

    /// Routes whose template id has no template behind it.
    pub fn missing_templates(&self) -> Vec<(&str, &str)> {
        self.routes()
            .filter(|(_, id)| !self.templates.contains(id))
            .collect()
    }

    fn template_for(&self, key: &str) -> Option<&str> {
        self.routes
            .get(key)
            .map(String::as_str)
            .filter(|id| self.templates.contains(id))
    }

    fn subpage_request(&self, key: &str, path: &str) -> Option<SubpageRequest> {
        self.sections.get(key)?;

        let slug = path.strip_prefix(key)?.strip_prefix('/')?;
        if slug.is_empty() {
            return None;
        }

        Some(SubpageRequest {
            section: key.to_string(),
            slug: slug.to_string(),
        })
    }

    pub fn resolve(&self, fragment: &str) -> RouteMatch {
        let path = normalize(fragment);
        let key = route_key(path);

        if let Some(template) = self.template_for(&key) {
            return RouteMatch::Found(Resolved {
                template: template.to_string(),
                is_root: key == ROOT_ROUTE,
                fallback: false,
                subpage: self.subpage_request(&key, path),
                key,
            });
        }

        match self.template_for(ROOT_ROUTE) {
            Some(template) => {
                debug!("no template for route '{key}', falling back to root");
                RouteMatch::Found(Resolved {
                    key: ROOT_ROUTE.to_string(),
                    template: template.to_string(),
                    is_root: true,
                    fallback: true,
                    subpage: None,
                })
            }
            None => RouteMatch::NotFound,
        }
    }
}
