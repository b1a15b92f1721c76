//! Instruction stream compiler.
//!
//! [`Compiler`] is the pure state machine: it walks the instruction list once,
//! feeding units to the active layout strategy and swapping strategies on
//! directives. [`ReportCompiler`] drains a [`ReportSession`], wraps the compiled
//! body in the document template and writes the result.

use std::{path::PathBuf, time::Instant};

use metrics::{counter, histogram};
use tracing::{info, trace, warn};

use crate::{
    application::{
        error::AppError,
        session::ReportSession,
        stacker::{self, LayoutStrategy},
    },
    domain::{
        instruction::{Instruction, RenderUnit},
        layout::LayoutTarget,
    },
    infra::output::DocumentWriter,
    presentation::document::render_document,
};

const DEFAULT_DOCUMENT_TITLE: &str = "Report";

/// Body markup and scripts accumulated over one instruction stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledBody {
    pub markup: String,
    pub script: String,
    /// Layout active when the stream ended.
    pub layout: LayoutTarget,
    pub units: usize,
    pub layout_changes: usize,
}

pub struct Compiler {
    strategy: Box<dyn LayoutStrategy>,
    script: String,
    units: usize,
    layout_changes: usize,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            strategy: stacker::build(LayoutTarget::Normal, String::new()),
            script: String::new(),
            units: 0,
            layout_changes: 0,
        }
    }

    /// Compile a whole instruction stream.
    pub fn run<I>(instructions: I) -> CompiledBody
    where
        I: IntoIterator<Item = Instruction>,
    {
        let mut compiler = Self::new();
        for instruction in instructions {
            compiler.apply(instruction);
        }
        compiler.finish()
    }

    pub fn apply(&mut self, instruction: Instruction) {
        match instruction {
            Instruction::Unit(unit) => self.accept(&unit),
            Instruction::Directive(directive) => self.switch(directive.target()),
        }
    }

    pub fn layout(&self) -> LayoutTarget {
        self.strategy.target()
    }

    pub fn markup(&self) -> &str {
        self.strategy.markup()
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn finish(mut self) -> CompiledBody {
        self.strategy.finalize();
        CompiledBody {
            layout: self.strategy.target(),
            markup: self.strategy.take_markup(),
            script: self.script,
            units: self.units,
            layout_changes: self.layout_changes,
        }
    }

    fn accept(&mut self, unit: &RenderUnit) {
        self.strategy.accept(unit);
        if let Some(script) = unit.script() {
            self.script.push_str(script);
            self.script.push('\n');
        }
        self.units += 1;
    }

    /// Replace the active strategy, carrying its markup over verbatim.
    fn switch(&mut self, target: LayoutTarget) {
        self.strategy.finalize();
        let seed = self.strategy.take_markup();
        trace!(
            target = "application::compiler",
            op = "compiler::switch",
            from = %self.strategy.target(),
            to = %target,
            seed_bytes = seed.len(),
            "Switching layout strategy"
        );
        self.strategy = stacker::build(target, seed);
        self.layout_changes += 1;
    }
}

/// Document-level options applied around the compiled body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    pub title: String,
    pub mathjax: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_DOCUMENT_TITLE.to_string(),
            mathjax: true,
        }
    }
}

impl From<&crate::config::DocumentSettings> for DocumentOptions {
    fn from(settings: &crate::config::DocumentSettings) -> Self {
        Self {
            title: settings.title.clone(),
            mathjax: settings.mathjax,
        }
    }
}

/// Fully rendered document that has not been written yet.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub body: CompiledBody,
    pub html: String,
}

/// Summary of a written report.
#[derive(Debug, Clone)]
pub struct CompiledReport {
    pub path: PathBuf,
    pub bytes: usize,
    pub units: usize,
    pub layout_changes: usize,
    pub layout: LayoutTarget,
}

pub struct ReportCompiler {
    options: DocumentOptions,
    writer: DocumentWriter,
}

impl ReportCompiler {
    pub fn new(options: DocumentOptions, writer: DocumentWriter) -> Self {
        Self { options, writer }
    }

    pub fn writer(&self) -> &DocumentWriter {
        &self.writer
    }

    /// Drain the session and render the document without writing it.
    ///
    /// The session's instruction list is empty afterwards whether or not
    /// rendering succeeds.
    pub fn render(&self, session: &mut ReportSession) -> Result<RenderedDocument, AppError> {
        let instructions = session.take_instructions();
        counter!("plotwist_instructions_total").increment(instructions.len() as u64);

        let body = Compiler::run(instructions);
        counter!("plotwist_layout_swaps_total").increment(body.layout_changes as u64);

        let html = render_document(&self.options, &body)?;
        Ok(RenderedDocument { body, html })
    }

    /// Drain the session, render the document and write it to its destination.
    ///
    /// Nothing is written when any step fails, and the session is left empty
    /// either way.
    pub fn compile(&self, session: &mut ReportSession) -> Result<CompiledReport, AppError> {
        let started_at = Instant::now();
        let result = self.render(session).and_then(|rendered| {
            self.writer.write(&rendered.html)?;
            Ok(CompiledReport {
                path: self.writer.path().to_path_buf(),
                bytes: rendered.html.len(),
                units: rendered.body.units,
                layout_changes: rendered.body.layout_changes,
                layout: rendered.body.layout,
            })
        });
        let elapsed_ms = started_at.elapsed().as_millis() as u64;

        match &result {
            Ok(report) => {
                counter!("plotwist_compile_total").increment(1);
                histogram!("plotwist_compile_ms").record(elapsed_ms as f64);
                info!(
                    target = "application::compiler",
                    op = "compiler::compile",
                    result = "ok",
                    elapsed_ms,
                    path = %report.path.display(),
                    bytes = report.bytes,
                    units = report.units,
                    layout_changes = report.layout_changes,
                    "Report compiled"
                );
            }
            Err(err) => {
                counter!("plotwist_compile_failed_total").increment(1);
                warn!(
                    target = "application::compiler",
                    op = "compiler::compile",
                    result = "error",
                    elapsed_ms,
                    kind = err.kind(),
                    error = %err,
                    "Report compile aborted"
                );
            }
        }

        result
    }
}
