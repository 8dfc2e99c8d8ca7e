use crate::{config::Config, router::Router, templates::TemplateStore};

pub const CONFIG: &str = r#"
title = "Topcut"
base_url = "https://example.org/"

[routes]
"/" = "home-page"
"/bey" = "bey-page"
"/foam" = "foam-page"

[sections."/foam".subpages.fps-energy]
title = "Donutcat FPS/Energy Spreadsheet"
kind = "embed"
target = "https://docs.google.com/spreadsheets/d/e/FPS/pubhtml?widget=true"

[sections."/foam".subpages.nitroshot-data]
title = "Nitroshot+ Data"
kind = "script"
target = "https://example.org/scripts/nitroshot.js"
initializer = "nitroshot"

[sections."/foam".subpages.mcmaster-spring]
title = "McMaster Spring Spreadsheet"
kind = "link"
target = "https://docs.google.com/spreadsheets/d/SPRING/edit"
blurb = "Click the link below to view the spreadsheet."

[sections."/bey".subpages.topcut]
title = "DMVBX Topcut"
kind = "script"
target = "https://example.org/scripts/topcut.js"
"#;

pub const SECTION_TEMPLATE: &str = r#"{% if not view.header_hidden %}<h2 class="section-header">{{ view.route }}</h2>{% endif %}
<nav class="section-nav">{% for page in subpages(section=view.route) %}<a href="{{ route_url(path=page.path) }}">{{ page.title }}</a>{% endfor %}</nav>
<div class="page-content">{% if view.content %}{{ view.content | safe }}{% else %}<p>Pick a sheet</p>{% endif %}</div>"#;

pub fn config() -> Config {
    Config::parse(CONFIG).unwrap()
}

pub fn templates(config: &Config) -> TemplateStore {
    let mut templates = TemplateStore::from_raw([
        ("home-page.html", "<h1>{{ config.title }}</h1>"),
        ("bey-page.html", SECTION_TEMPLATE),
        ("foam-page.html", SECTION_TEMPLATE),
        (
            "layout.html",
            r#"<link rel="canonical" href="{{ current_url | safe }}"><body class="{{ body_class }}">{{ content | safe }}{% for src in scripts %}<script src="{{ src }}"></script>{% endfor %}</body>"#,
        ),
    ])
    .unwrap();
    templates.register_functions(config);
    templates
}

pub fn router() -> Router {
    let config = config();
    let templates = templates(&config);
    Router::from_config(&config, templates)
}
