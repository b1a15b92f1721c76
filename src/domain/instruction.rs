//! Instruction stream entities: content units and layout directives.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::layout::LayoutTarget;

/// Row-breaking hint consumed by row-based layout strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Always starts a fresh row.
    Block,
    /// May share a row with neighbouring inline units.
    #[default]
    Inline,
}

/// One content contribution to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderUnit {
    markup: String,
    placement: Placement,
    script: String,
}

impl RenderUnit {
    /// Build a unit from an HTML fragment. Empty markup is rejected.
    pub fn new(markup: impl Into<String>, placement: Placement) -> Result<Self, DomainError> {
        let markup = markup.into();
        if markup.is_empty() {
            return Err(DomainError::invalid_configuration(
                "render unit markup must not be empty",
            ));
        }

        Ok(Self {
            markup,
            placement,
            script: String::new(),
        })
    }

    /// Unit around markup produced by wrapping text in tags, which is never empty.
    pub(crate) fn wrapped(markup: String, placement: Placement) -> Self {
        debug_assert!(!markup.is_empty());
        Self {
            markup,
            placement,
            script: String::new(),
        }
    }

    pub fn block(markup: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(markup, Placement::Block)
    }

    pub fn inline(markup: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(markup, Placement::Inline)
    }

    /// Attach a script fragment emitted into the document's script section.
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn script(&self) -> Option<&str> {
        (!self.script.is_empty()).then_some(self.script.as_str())
    }
}

/// Request to replace the active layout strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDirective {
    target: LayoutTarget,
}

impl LayoutDirective {
    pub fn new(target: LayoutTarget) -> Self {
        Self { target }
    }

    /// Parse one of the recognised layout names (`normal`, `one` .. `four`, `center`).
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        name.parse().map(Self::new)
    }

    pub fn target(&self) -> LayoutTarget {
        self.target
    }
}

/// Entry of the ordered instruction list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Unit(RenderUnit),
    Directive(LayoutDirective),
}

impl Instruction {
    pub fn kind(&self) -> &'static str {
        match self {
            Instruction::Unit(_) => "unit",
            Instruction::Directive(_) => "directive",
        }
    }
}

impl From<RenderUnit> for Instruction {
    fn from(unit: RenderUnit) -> Self {
        Instruction::Unit(unit)
    }
}

impl From<LayoutDirective> for Instruction {
    fn from(directive: LayoutDirective) -> Self {
        Instruction::Directive(directive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_markup_is_rejected() {
        let err = RenderUnit::block("").expect_err("empty markup");
        assert!(matches!(err, DomainError::InvalidConfiguration { .. }));
    }

    #[test]
    fn empty_script_is_omitted() {
        let unit = RenderUnit::inline("<p>x</p>")
            .expect("valid unit")
            .with_script("");
        assert_eq!(unit.script(), None);

        let unit = unit.with_script("console.log(1);");
        assert_eq!(unit.script(), Some("console.log(1);"));
    }

    #[test]
    fn directive_parses_recognised_names() {
        let directive = LayoutDirective::parse("three").expect("known layout");
        assert_eq!(directive.target().to_string(), "three");

        let err = LayoutDirective::parse("five").expect_err("unknown layout");
        assert!(err.to_string().contains("five"));
    }
}
