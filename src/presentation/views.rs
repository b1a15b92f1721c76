use askama::{Error as AskamaError, Template};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("template rendering failed in {origin}")]
pub struct TemplateRenderError {
    pub(crate) origin: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(origin: &'static str, error: AskamaError) -> Self {
        Self { origin, error }
    }
}

pub fn render_template<T: Template>(
    origin: &'static str,
    template: &T,
) -> Result<String, TemplateRenderError> {
    template
        .render()
        .map_err(|err| TemplateRenderError::new(origin, err))
}
