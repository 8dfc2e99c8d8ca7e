use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use url::Url;

use crate::{config::Config, router::Router, templates::TemplateStore};

const LOCAL_BASE_URL: &str = "http://127.0.0.1:1111";

/// A site directory: `config.toml`, `templates/` and `static/`.
pub struct Site {
    pub home: PathBuf,
    pub config: Config,
    pub router: Router,
}

impl Site {
    pub fn load(home: PathBuf, local: bool) -> anyhow::Result<Self> {
        let mut config = Config::load(&home.join("config.toml"))?;

        if local {
            config.base_url = Url::from_str(LOCAL_BASE_URL)?;
        }

        let mut templates = TemplateStore::load(&home.join("templates"))?;
        templates.register_functions(&config);

        let router = Router::from_config(&config, templates);

        Ok(Self {
            home,
            config,
            router,
        })
    }

    pub fn absolute<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.home.join(path.as_ref())
    }

    pub fn relative(&self, path: &Path) -> anyhow::Result<PathBuf> {
        Ok(path.strip_prefix(&self.home)?.into())
    }

    /// Every fragment the site can show: each route, then each sub-page.
    pub fn fragments(&self) -> Vec<String> {
        let mut fragments = self
            .router
            .routes()
            .map(|(key, _)| key.to_string())
            .collect::<Vec<_>>();

        for (key, section) in self.router.sections() {
            for slug in section.subpages.keys() {
                fragments.push(format!("{}/{}", key.trim_end_matches('/'), slug));
            }
        }

        fragments
    }
}
