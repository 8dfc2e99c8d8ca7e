use std::path::Path;

use log::info;
use tera::Tera;

use crate::{
    config::Config,
    functions::{markdown::Markdown, route_url::RouteUrl, subpages::Subpages},
};

/// Page shell wrapped around every rendered container.
pub const LAYOUT: &str = "layout.html";

/// Markup blocks addressed by template id. Id `foam-page` lives in
/// `foam-page.html`.
pub struct TemplateStore {
    tera: Tera,
}

fn file_name(id: &str) -> String {
    format!("{id}.html")
}

impl TemplateStore {
    pub fn load(template_dir: &Path) -> anyhow::Result<Self> {
        let tera = Tera::new(&template_dir.join("**").join("*").to_string_lossy())?;

        info!(
            "loaded templates: {:?}",
            tera.get_template_names().collect::<Vec<_>>()
        );

        Ok(Self { tera })
    }

    pub fn from_raw<'a>(
        templates: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        Ok(Self { tera })
    }

    pub fn register_functions(&mut self, config: &Config) {
        self.tera.register_function("route_url", RouteUrl);
        self.tera
            .register_function("subpages", Subpages::new(config.sections.clone()));
        self.tera.register_filter("markdown", Markdown {});
    }

    pub fn contains(&self, id: &str) -> bool {
        let name = file_name(id);
        self.tera.get_template_names().any(|n| n == name)
    }

    pub fn has_layout(&self) -> bool {
        self.tera.get_template_names().any(|n| n == LAYOUT)
    }

    /// Renders a fresh copy of template `id`.
    pub fn instantiate(&self, id: &str, ctx: &tera::Context) -> anyhow::Result<String> {
        Ok(self.tera.render(&file_name(id), ctx)?)
    }

    pub fn render_layout(&self, ctx: &tera::Context) -> anyhow::Result<String> {
        Ok(self.tera.render(LAYOUT, ctx)?)
    }
}
