//! Report session: the ordered instruction list and artifact slot counter.
//!
//! Every authoring call appends to the session; compiling drains it. Text
//! passed to `title`, `subtitle` and `comment` is an HTML fragment, so inline
//! markup and MathJax delimiters pass through untouched.

use std::ops::Range;

use metrics::counter;
use tracing::debug;

use crate::{
    application::{error::AppError, figure::embed_figure, slider::SliderWidget},
    domain::{
        artifact::{ArtifactKind, ArtifactSource, EmbeddingMode},
        error::DomainError,
        instruction::{Instruction, LayoutDirective, Placement, RenderUnit},
        layout::LayoutTarget,
    },
    infra::artifacts::ArtifactRegistry,
};

#[derive(Debug, Default)]
pub struct ReportSession {
    instructions: Vec<Instruction>,
    next_slot: usize,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: impl Into<Instruction>) {
        self.instructions.push(instruction.into());
    }

    pub fn title(&mut self, text: &str) {
        self.push_block(format!("<h1>{text}</h1>"));
    }

    pub fn subtitle(&mut self, text: &str) {
        self.push_block(format!("<h2>{text}</h2>"));
    }

    pub fn comment(&mut self, text: &str) {
        self.push_block(format!("<p>{text}</p>"));
    }

    pub fn rule(&mut self) {
        self.push_block("<hr>".to_string());
    }

    /// Append a caller-built unit verbatim.
    pub fn html(&mut self, unit: RenderUnit) {
        self.push(unit);
    }

    /// Switch layout by name (`normal`, `one` .. `four`, `center`).
    pub fn stacker(&mut self, name: &str) -> Result<(), DomainError> {
        let directive = LayoutDirective::parse(name)?;
        self.push(directive);
        Ok(())
    }

    pub fn layout(&mut self, target: LayoutTarget) {
        self.push(LayoutDirective::new(target));
    }

    /// Persist one artifact and embed it as a figure.
    pub fn figure<R>(
        &mut self,
        registry: &mut R,
        source: &ArtifactSource,
        mode: EmbeddingMode,
    ) -> Result<(), AppError>
    where
        R: ArtifactRegistry + ?Sized,
    {
        let slot = self.reserve_slots(1).start;
        let reference = registry.render_artifact(slot, source)?;
        counter!("plotwist_artifacts_total").increment(1);

        let unit = embed_figure(&reference, mode, slot)?;
        debug!(
            target = "application::session",
            op = "session::figure",
            slot,
            mode = %mode,
            reference = %reference,
            "Figure appended"
        );
        self.push(unit);
        Ok(())
    }

    /// Persist every artifact into consecutive slots and bind them to one slider.
    pub fn slider<R>(
        &mut self,
        registry: &mut R,
        sources: &[ArtifactSource],
        kind: ArtifactKind,
    ) -> Result<(), AppError>
    where
        R: ArtifactRegistry + ?Sized,
    {
        if sources.is_empty() {
            return Err(
                DomainError::invalid_configuration("slider requires at least one artifact").into(),
            );
        }

        let slots = self.reserve_slots(sources.len());
        let references = slots
            .clone()
            .zip(sources)
            .map(|(slot, source)| registry.render_artifact(slot, source))
            .collect::<Result<Vec<_>, _>>()?;
        counter!("plotwist_artifacts_total").increment(references.len() as u64);

        let unit = SliderWidget::new(&references, kind, slots.start)?.build()?;
        debug!(
            target = "application::session",
            op = "session::slider",
            first_slot = slots.start,
            artifacts = references.len(),
            "Slider appended"
        );
        self.push(unit);
        Ok(())
    }

    /// Claim `count` fresh artifact slots. Slots are never handed out twice
    /// until the session is reset.
    pub fn reserve_slots(&mut self, count: usize) -> Range<usize> {
        let start = self.next_slot;
        self.next_slot += count;
        start..self.next_slot
    }

    pub fn next_slot(&self) -> usize {
        self.next_slot
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Drop pending instructions and restart slot numbering.
    pub fn reset(&mut self) {
        self.instructions.clear();
        self.next_slot = 0;
    }

    /// Drop instructions queued after the first `len`. Reserved slots are kept.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.instructions.truncate(len);
    }

    pub(crate) fn take_instructions(&mut self) -> Vec<Instruction> {
        std::mem::take(&mut self.instructions)
    }

    fn push_block(&mut self, markup: String) {
        self.push(RenderUnit::wrapped(markup, Placement::Block));
    }
}
