use chrono::Utc;
use url::Url;

use crate::{
    config::Config, embed::NOT_FOUND_HTML, session::Container,
    templates::TemplateStore,
};

/// Markup of the content container alone.
pub fn render_container(
    templates: &TemplateStore,
    config: &Config,
    container: &Container,
) -> anyhow::Result<String> {
    match container {
        Container::Empty => Ok(String::new()),
        Container::NotFound => Ok(NOT_FOUND_HTML.to_string()),
        Container::Page(view) => {
            let mut ctx = tera::Context::new();
            ctx.insert("config", config);
            ctx.insert("view", view);

            templates.instantiate(&view.template, &ctx)
        }
    }
}

/// The container wrapped in `layout.html` when the site has one. The root
/// style class goes on the body only while the root template is shown.
/// `current_url` is the address the page is served from.
pub fn render_page(
    templates: &TemplateStore,
    config: &Config,
    container: &Container,
    current_url: &Url,
) -> anyhow::Result<String> {
    let content = render_container(templates, config, container)?;

    if !templates.has_layout() {
        return Ok(content);
    }

    let (body_class, scripts): (&str, &[Url]) = match container {
        Container::Page(view) if view.root => (config.root_class.as_str(), view.scripts.as_slice()),
        Container::Page(view) => ("", view.scripts.as_slice()),
        _ => ("", &[][..]),
    };

    let mut ctx = tera::Context::new();
    ctx.insert("config", config);
    ctx.insert("content", &content);
    ctx.insert("body_class", body_class);
    ctx.insert("scripts", scripts);
    ctx.insert("current_url", current_url.as_str());
    ctx.insert("last_updated", &Utc::now().to_string());

    templates.render_layout(&ctx)
}
