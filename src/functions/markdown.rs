use crate::markdown::render_markdown;

pub struct Markdown {}

impl tera::Filter for Markdown {
    fn filter(
        &self,
        value: &tera::Value,
        _args: &std::collections::HashMap<String, tera::Value>,
    ) -> tera::Result<tera::Value> {
        let input = tera::from_value::<String>(value.clone())?;

        Ok(tera::to_value(render_markdown(&input))?)
    }

    fn is_safe(&self) -> bool {
        true
    }
}
