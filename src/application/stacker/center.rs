use crate::domain::{instruction::RenderUnit, layout::LayoutTarget};

use super::{LayoutStrategy, ROW_BREAK};

const CENTER_OPEN: &str = "<div class=\"ptw-center\">";
const CENTER_CLOSE: &str = "</div>";

/// Wraps every unit in its own centering container, ignoring placement.
#[derive(Debug, Default)]
pub struct CenterStacker {
    markup: String,
}

impl CenterStacker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(markup: String) -> Self {
        Self { markup }
    }
}

impl LayoutStrategy for CenterStacker {
    fn target(&self) -> LayoutTarget {
        LayoutTarget::Center
    }

    fn accept(&mut self, unit: &RenderUnit) {
        self.markup.push_str(CENTER_OPEN);
        self.markup.push_str(unit.markup());
        self.markup.push_str(CENTER_CLOSE);
        self.markup.push_str(ROW_BREAK);
        self.markup.push('\n');
    }

    fn markup(&self) -> &str {
        &self.markup
    }

    fn take_markup(&mut self) -> String {
        std::mem::take(&mut self.markup)
    }
}
