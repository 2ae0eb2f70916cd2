//! Port for rendering named HTML templates.

use super::define_port_error;

define_port_error! {
    /// Errors raised by template renderers.
    pub enum TemplateError {
        /// No template is registered under the requested name.
        UnknownTemplate { name: String } => "unknown template: {name}",
    }
}

/// Renders a template by name into an HTML document.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, name: &str) -> Result<String, TemplateError>;
}
