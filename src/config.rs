use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{anyhow, Context as _};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::subpage::{EmbedKind, Section};

/// Route key of the home page, also the fallback for unknown routes.
pub const ROOT_ROUTE: &str = "/";

fn default_root_class() -> String {
    "home-page-bg".to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub title: String,
    pub base_url: Url,
    /// Body class applied while the root route is shown.
    #[serde(default = "default_root_class")]
    pub root_class: String,
    /// Route key to template id.
    #[serde(default)]
    pub routes: BTreeMap<String, String>,
    /// Sub-page tables, keyed by the route key of the owning section.
    #[serde(default)]
    pub sections: BTreeMap<String, Section>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("loading {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (key, section) in &self.sections {
            if !self.routes.contains_key(key) {
                return Err(anyhow!("section '{key}' is not a registered route"));
            }
            // `#/x` keys on `/x`, so the root route can never dispatch a sub-page.
            if key == ROOT_ROUTE {
                return Err(anyhow!("the root route '{ROOT_ROUTE}' cannot own sub-pages"));
            }

            for (slug, entry) in &section.subpages {
                check_slug(key, slug)?;
                if entry.initializer.is_some() && entry.kind != EmbedKind::Script {
                    return Err(anyhow!(
                        "sub-page '{key}/{slug}' names an initializer but is not a script"
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn make_permalink(&self, path: &str) -> anyhow::Result<Url> {
        let escaped = path.strip_suffix("index.html").unwrap_or(path);
        Ok(self.base_url.join(escaped)?)
    }

    /// Absolute URL that navigates the single-page app to `fragment`.
    pub fn fragment_url(&self, fragment: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_fragment(Some(fragment));
        url
    }
}

/// Slugs become one path segment of the route and of the build output.
fn check_slug(key: &str, slug: &str) -> anyhow::Result<()> {
    if slug.is_empty() {
        return Err(anyhow!("section '{key}' has an empty sub-page slug"));
    }
    if slug.contains(['/', '\\']) {
        return Err(anyhow!(
            "sub-page '{slug}' in section '{key}' must be a single path segment"
        ));
    }
    if slug.chars().all(|c| c == '.') {
        return Err(anyhow!("sub-page '{slug}' in section '{key}' is not a valid slug"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CONFIG;

    #[test]
    fn parses_routes_and_sections() {
        let config = Config::parse(CONFIG).unwrap();

        assert_eq!(config.root_class, "home-page-bg");
        assert_eq!(config.routes["/foam"], "foam-page");

        let foam = &config.sections["/foam"];
        assert_eq!(foam.get("fps-energy").unwrap().kind, EmbedKind::Embed);
        assert_eq!(
            foam.get("nitroshot-data").unwrap().initializer.as_deref(),
            Some("nitroshot")
        );
        assert!(foam.get("topcut").is_none());
        assert!(config.sections["/bey"].get("topcut").is_some());
    }

    #[test]
    fn rejects_section_without_route() {
        let text = r#"
            title = "t"
            base_url = "https://example.org/"

            [routes]
            "/" = "home-page"

            [sections."/foam".subpages.x]
            title = "X"
            kind = "embed"
            target = "https://example.org/x"
        "#;

        let err = Config::parse(text).unwrap_err();
        assert!(err.to_string().contains("'/foam'"));
    }

    fn with_foam_slug(slug: &str) -> String {
        format!(
            r#"
            title = "t"
            base_url = "https://example.org/"

            [routes]
            "/foam" = "foam-page"

            [sections."/foam".subpages."{slug}"]
            title = "X"
            kind = "embed"
            target = "https://example.org/x"
            "#
        )
    }

    #[test]
    fn rejects_slugs_that_are_not_one_segment() {
        for slug in ["", ".", "..", "/x", "../../escaped", "a/b", "a\\\\b"] {
            let err = Config::parse(&with_foam_slug(slug))
                .expect_err(&format!("slug {slug:?} should be rejected"));
            assert!(err.to_string().contains("sub-page"), "{err}");
        }

        assert!(Config::parse(&with_foam_slug("fps-energy.v2")).is_ok());
    }

    #[test]
    fn rejects_sections_on_the_root_route() {
        let text = r#"
            title = "t"
            base_url = "https://example.org/"

            [routes]
            "/" = "home-page"

            [sections."/".subpages.about]
            title = "About"
            kind = "embed"
            target = "https://example.org/about"
        "#;

        let err = Config::parse(text).unwrap_err();
        assert!(err.to_string().contains("root route"));
    }

    #[test]
    fn rejects_unknown_kind() {
        let text = r#"
            title = "t"
            base_url = "https://example.org/"

            [routes]
            "/foam" = "foam-page"

            [sections."/foam".subpages.x]
            title = "X"
            kind = "video"
            target = "https://example.org/x"
        "#;

        assert!(Config::parse(text).is_err());
    }

    #[test]
    fn rejects_initializer_on_embed() {
        let text = r#"
            title = "t"
            base_url = "https://example.org/"

            [routes]
            "/foam" = "foam-page"

            [sections."/foam".subpages.x]
            title = "X"
            kind = "embed"
            target = "https://example.org/x"
            initializer = "boot"
        "#;

        assert!(Config::parse(text).is_err());
    }

    #[test]
    fn builds_fragment_urls() {
        let config = Config::parse(CONFIG).unwrap();

        assert_eq!(
            config.fragment_url("/foam/fps-energy").as_str(),
            "https://example.org/#/foam/fps-energy"
        );
        assert_eq!(
            config.make_permalink("foam/index.html").unwrap().as_str(),
            "https://example.org/foam/"
        );
    }
}
