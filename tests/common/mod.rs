use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CONFIG: &str = r#"
title = "Topcut"
base_url = "https://example.org/"

[routes]
"/" = "home-page"
"/bey" = "bey-page"
"/foam" = "foam-page"

[sections."/foam".subpages.fps-energy]
title = "FPS and Energy"
kind = "embed"
target = "https://docs.google.com/spreadsheets/d/e/FPS/pubhtml?widget=true"

[sections."/foam".subpages.nitroshot-data]
title = "Nitroshot Data"
kind = "script"
target = "https://example.org/scripts/nitroshot.js"

[sections."/bey".subpages.topcut]
title = "Topcut"
kind = "embed"
target = "https://docs.google.com/spreadsheets/d/e/TOPCUT/pubhtml"
"#;

const SECTION: &str = r#"{% if not view.header_hidden %}<h2 id="section-header">Section</h2>{% endif %}
<nav>{% for page in subpages(section=view.route) %}<a href="{{ route_url(path=page.path) }}">{{ page.title }}</a>{% endfor %}</nav>
<div class="page-content">{% if view.content %}{{ view.content | safe }}{% else %}<p>Pick a sheet</p>{% endif %}</div>"#;

const LAYOUT: &str = r#"<html><link rel="canonical" href="{{ current_url | safe }}"><body class="{{ body_class }}"><main id="app">{{ content | safe }}</main>{% for src in scripts %}<script src="{{ src }}"></script>{% endfor %}</body></html>"#;

pub struct TestSite {
    _tmp: TempDir,
    pub home: PathBuf,
}

impl TestSite {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().to_path_buf();

        write(&home, "config.toml", CONFIG);
        write(&home, "templates/layout.html", LAYOUT);
        write(&home, "templates/home-page.html", "<h1>{{ config.title }}</h1>");
        write(&home, "templates/bey-page.html", SECTION);
        write(&home, "templates/foam-page.html", SECTION);
        write(&home, "static/css/site.css", "body { margin: 0; }");

        Self { _tmp: tmp, home }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("hashsite").expect("hashsite binary");
        cmd.arg("--path").arg(&self.home);
        cmd
    }

    #[allow(dead_code)]
    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.home.join(relative)).expect("remove fixture file");
    }
}

fn write(home: &Path, relative: &str, contents: &str) {
    let path = home.join(relative);
    fs::create_dir_all(path.parent().unwrap()).expect("create fixture dir");
    fs::write(path, contents).expect("write fixture file");
}
