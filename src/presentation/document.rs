use askama::Template;

use crate::application::compiler::{CompiledBody, DocumentOptions};

use super::views::{TemplateRenderError, render_template};

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportDocumentTemplate<'a> {
    pub title: &'a str,
    pub mathjax: bool,
    pub body: &'a str,
    pub script: &'a str,
}

/// Wrap compiled body markup and scripts into the final HTML document.
pub fn render_document(
    options: &DocumentOptions,
    body: &CompiledBody,
) -> Result<String, TemplateRenderError> {
    let template = ReportDocumentTemplate {
        title: options.title.as_str(),
        mathjax: options.mathjax,
        body: body.markup.trim_end(),
        script: body.script.trim_end(),
    };
    render_template("presentation::document::render_document", &template)
}
