use tera::escape_html;
use url::Url;

use crate::{
    markdown::render_markdown,
    session::View,
    subpage::{EmbedKind, SubpageEntry},
};

/// Capabilities granted to embedded frames. Nothing else is allowed.
pub const SANDBOX: [&str; 4] = [
    "allow-same-origin",
    "allow-scripts",
    "allow-forms",
    "allow-popups",
];

/// Element a loaded script is expected to render into.
pub const SCRIPT_CONTAINER_ID: &str = "script-container";

pub const NOT_FOUND_HTML: &str = "<p>Page not found</p>";

fn attr_url(url: &Url) -> String {
    url.as_str().replace('&', "&amp;")
}

fn frame(entry: &SubpageEntry) -> String {
    format!(
        "<div class=\"iframe-container\"><iframe src=\"{}\" title=\"{}\" sandbox=\"{}\" loading=\"lazy\"></iframe></div>\n",
        attr_url(&entry.target),
        escape_html(&entry.title),
        SANDBOX.join(" "),
    )
}

fn link(entry: &SubpageEntry) -> String {
    format!(
        "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener\">Open {}</a></p>\n",
        attr_url(&entry.target),
        escape_html(&entry.title),
    )
}

/// Writes `entry` into the view's content area. Returns the script that
/// still has to be loaded, if any.
pub fn render(view: &mut View, entry: &SubpageEntry) -> Option<Url> {
    let mut html = format!("<h3>{}</h3>\n", escape_html(&entry.title));

    if let Some(blurb) = &entry.blurb {
        html.push_str(&render_markdown(blurb));
    }

    let script = match entry.kind {
        EmbedKind::Embed => {
            html.push_str(&frame(entry));
            None
        }
        EmbedKind::Link => {
            html.push_str(&link(entry));
            None
        }
        EmbedKind::Script => {
            html.push_str(&format!("<div id=\"{SCRIPT_CONTAINER_ID}\"></div>\n"));
            view.scripts.push(entry.target.clone());
            Some(entry.target.clone())
        }
    };

    view.content = Some(html);
    script
}

/// Shown in the content area when a section has no such sub-page.
pub fn subpage_not_found(slug: &str) -> String {
    format!(
        "<p class=\"not-found\">Page not found: {}</p>\n",
        escape_html(slug)
    )
}

pub fn load_error(src: &Url, error: &anyhow::Error) -> String {
    format!(
        "<p class=\"embed-error\">Error loading {}: {}</p>\n",
        escape_html(src.as_str()),
        escape_html(&error.to_string()),
    )
}
