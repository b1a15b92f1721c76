//! Single-figure embedding in one of the supported modes.

use crate::{
    application::error::AppError,
    domain::{
        artifact::EmbeddingMode,
        instruction::{Placement, RenderUnit},
    },
    presentation::{
        fragments::{FigureTemplate, InteractiveScriptTemplate},
        views::render_template,
    },
};

pub fn figure_element_id(slot: usize) -> String {
    format!("ptw-figure-{slot}")
}

/// Build the inline unit embedding the artifact stored at `reference`.
pub fn embed_figure(
    reference: &str,
    mode: EmbeddingMode,
    slot: usize,
) -> Result<RenderUnit, AppError> {
    let element_id = figure_element_id(slot);
    let template = FigureTemplate {
        element_id: &element_id,
        src: reference,
        interactive: mode == EmbeddingMode::Interactive,
        scrollable: mode == EmbeddingMode::Scrollable,
    };
    let markup = render_template("application::figure::embed_figure", &template)?;
    let unit = RenderUnit::new(markup, Placement::Inline)?;

    if mode != EmbeddingMode::Interactive {
        return Ok(unit);
    }

    let script = render_template(
        "application::figure::embed_figure",
        &InteractiveScriptTemplate {
            element_id: &element_id,
        },
    )?;
    Ok(unit.with_script(script))
}
