//! Slider widgets binding several pre-rendered artifacts to one range control.
//!
//! Element ids are derived from the first artifact slot reserved for the
//! widget. Slots come from the session's monotonically increasing counter, so
//! two widgets in the same session never share an id.

use std::{collections::BTreeMap, ops::Range};

use crate::{
    application::error::AppError,
    domain::{
        artifact::ArtifactKind,
        error::DomainError,
        instruction::{Placement, RenderUnit},
    },
    presentation::{
        fragments::{SliderMarkupTemplate, SliderScriptTemplate},
        views::render_template,
    },
};

#[derive(Debug, Clone)]
pub struct SliderWidget<'a> {
    references: &'a [String],
    kind: ArtifactKind,
    first_slot: usize,
}

impl<'a> SliderWidget<'a> {
    /// `references[i]` must be the artifact persisted in slot `first_slot + i`.
    pub fn new(
        references: &'a [String],
        kind: ArtifactKind,
        first_slot: usize,
    ) -> Result<Self, DomainError> {
        if references.is_empty() {
            return Err(DomainError::invalid_configuration(
                "slider requires at least one artifact",
            ));
        }

        Ok(Self {
            references,
            kind,
            first_slot,
        })
    }

    pub fn slider_id(&self) -> String {
        format!("ptw-slider-{}", self.first_slot)
    }

    pub fn view_id(&self) -> String {
        format!("ptw-slider-view-{}", self.first_slot)
    }

    /// Upper bound of the range control; the lower bound is always zero.
    pub fn max(&self) -> usize {
        self.references.len() - 1
    }

    pub fn slots(&self) -> Range<usize> {
        self.first_slot..self.first_slot + self.references.len()
    }

    pub fn build(&self) -> Result<RenderUnit, AppError> {
        let slider_id = self.slider_id();
        let view_id = self.view_id();

        let markup = render_template(
            "application::slider::build",
            &SliderMarkupTemplate {
                slider_id: &slider_id,
                view_id: &view_id,
                max: self.max(),
                first_src: &self.references[0],
                interactive: self.kind == ArtifactKind::Interactive,
            },
        )?;

        let sources: BTreeMap<usize, &str> = self
            .slots()
            .zip(self.references)
            .map(|(slot, reference)| (slot, reference.as_str()))
            .collect();
        let sources = serde_json::to_string(&sources)?;

        let script = render_template(
            "application::slider::build",
            &SliderScriptTemplate {
                slider_id: &slider_id,
                view_id: &view_id,
                first_slot: self.first_slot,
                sources: &sources,
            },
        )?;

        Ok(RenderUnit::new(markup, Placement::Inline)?.with_script(script))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn references(first_slot: usize, count: usize) -> Vec<String> {
        (first_slot..first_slot + count)
            .map(|slot| format!("plots/plot_{slot}.svg"))
            .collect()
    }

    #[test]
    fn range_bounds_cover_every_artifact() {
        let refs = references(0, 5);
        let widget = SliderWidget::new(&refs, ArtifactKind::Image, 0).expect("valid widget");
        let unit = widget.build().expect("slider renders");

        assert!(unit.markup().contains("min=\"0\""));
        assert!(unit.markup().contains("max=\"4\""));
        assert!(unit.markup().contains("value=\"0\""));
        assert!(unit.markup().contains("<img id=\"ptw-slider-view-0\""));
    }

    #[test]
    fn single_artifact_still_yields_a_control() {
        let refs = references(9, 1);
        let widget = SliderWidget::new(&refs, ArtifactKind::Image, 9).expect("valid widget");
        let unit = widget.build().expect("slider renders");

        assert_eq!(widget.max(), 0);
        assert!(unit.markup().contains("type=\"range\""));
        assert!(unit.markup().contains("max=\"0\""));
        let script = unit.script().expect("slider script");
        assert!(script.contains("addEventListener(\"input\""));
    }

    #[test]
    fn empty_slider_is_rejected() {
        let err = SliderWidget::new(&[], ArtifactKind::Image, 0).expect_err("no artifacts");
        assert!(matches!(err, DomainError::InvalidConfiguration { .. }));
    }

    #[test]
    fn script_maps_slots_to_references() {
        let refs = references(3, 3);
        let widget = SliderWidget::new(&refs, ArtifactKind::Image, 3).expect("valid widget");
        let unit = widget.build().expect("slider renders");
        let script = unit.script().expect("slider script");

        assert!(script.contains(
            r#"{"3":"plots/plot_3.svg","4":"plots/plot_4.svg","5":"plots/plot_5.svg"}"#
        ));
        assert!(script.contains("var first = 3;"));
        assert!(script.contains("sources[first + parseInt(slider.value, 10)]"));
    }

    #[test]
    fn interactive_artifacts_use_a_frame() {
        let refs = vec!["plots/plot_0.html".to_string(), "plots/plot_1.html".to_string()];
        let widget =
            SliderWidget::new(&refs, ArtifactKind::Interactive, 0).expect("valid widget");
        let unit = widget.build().expect("slider renders");

        assert!(unit.markup().contains("<iframe id=\"ptw-slider-view-0\""));
    }
}
