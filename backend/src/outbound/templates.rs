//! `TemplateRenderer` over HTML documents compiled into the binary.

use crate::domain::ports::{TemplateError, TemplateRenderer};

const TEMPLATES: &[(&str, &str)] = &[("index", include_str!("../../templates/index.html"))];

/// Renderer for the templates shipped in `backend/templates/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl TemplateRenderer for EmbeddedTemplates {
    fn render(&self, name: &str) -> Result<String, TemplateError> {
        TEMPLATES
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, document)| (*document).to_owned())
            .ok_or_else(|| TemplateError::unknown_template(name))
    }
}
