// Presentation collaborator
// Renders a named template against a JSON context

pub mod html;
pub mod json;
pub mod templates;

use serde_json::Value;
use thiserror::Error;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Failed to serialize context: {0}")]
    Context(#[from] serde_json::Error),
}

/// Turns a template name and a context into a response body
pub trait Renderer: Send + Sync {
    /// Value of the `Content-Type` header for rendered bodies
    fn content_type(&self) -> &'static str;

    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError>;
}
