use crate::domain::{instruction::RenderUnit, layout::LayoutTarget};

use super::LayoutStrategy;

/// One unit per line, in emission order.
#[derive(Debug, Default)]
pub struct NormalStacker {
    markup: String,
}

impl NormalStacker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(markup: String) -> Self {
        Self { markup }
    }
}

impl LayoutStrategy for NormalStacker {
    fn target(&self) -> LayoutTarget {
        LayoutTarget::Normal
    }

    fn accept(&mut self, unit: &RenderUnit) {
        self.markup.push_str(unit.markup());
        self.markup.push('\n');
    }

    fn markup(&self) -> &str {
        &self.markup
    }

    fn take_markup(&mut self) -> String {
        std::mem::take(&mut self.markup)
    }
}
