//! Markup and script fragments embedded into render units.

use askama::Template;

#[derive(Template)]
#[template(path = "fragments/figure.html")]
pub struct FigureTemplate<'a> {
    pub element_id: &'a str,
    pub src: &'a str,
    pub interactive: bool,
    pub scrollable: bool,
}

/// Resizes an interactive figure frame to its content once loaded.
#[derive(Template)]
#[template(path = "fragments/interactive.js", escape = "none")]
pub struct InteractiveScriptTemplate<'a> {
    pub element_id: &'a str,
}

#[derive(Template)]
#[template(path = "fragments/slider.html")]
pub struct SliderMarkupTemplate<'a> {
    pub slider_id: &'a str,
    pub view_id: &'a str,
    pub max: usize,
    pub first_src: &'a str,
    pub interactive: bool,
}

/// `sources` must be a JSON object literal keyed by artifact slot.
#[derive(Template)]
#[template(path = "fragments/slider.js", escape = "none")]
pub struct SliderScriptTemplate<'a> {
    pub slider_id: &'a str,
    pub view_id: &'a str,
    pub first_slot: usize,
    pub sources: &'a str,
}
