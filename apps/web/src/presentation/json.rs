use serde_json::{json, Value};

use super::{RenderError, Renderer};

/// Renders `{"template": ..., "context": ...}` documents
///
/// Useful for API clients and for asserting on handler contexts.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError> {
        let document = json!({
            "template": template,
            "context": context,
        });
        Ok(serde_json::to_string(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_template_and_context() {
        let body = JsonRenderer
            .render("rango/about.html", &json!({ "boldmessage": "hi" }))
            .unwrap();
        let value: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["template"], "rango/about.html");
        assert_eq!(value["context"]["boldmessage"], "hi");
    }
}
