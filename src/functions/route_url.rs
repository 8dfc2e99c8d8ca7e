use std::collections::HashMap;

/// `route_url(path="foam/fps-energy")` -> `#/foam/fps-energy`
pub struct RouteUrl;

pub fn fragment_href(path: &str) -> String {
    format!("#/{}", path.trim().trim_start_matches('/'))
}

impl tera::Function for RouteUrl {
    fn call(&self, args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
        let path = args
            .get("path")
            .cloned()
            .map(tera::from_value::<String>)
            .transpose()?
            .ok_or_else(|| tera::Error::msg("route_url: missing path"))?;

        Ok(tera::to_value(fragment_href(&path))?)
    }

    fn is_safe(&self) -> bool {
        true
    }
}
