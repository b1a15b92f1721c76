use crate::domain::{
    instruction::{Placement, RenderUnit},
    layout::{ColumnCount, LayoutTarget},
};

use super::{LayoutStrategy, ROW_BREAK};

/// Flows inline units into rows of a fixed width; block units always close the row.
#[derive(Debug)]
pub struct ColumnStacker {
    markup: String,
    columns: ColumnCount,
    column: usize,
}

impl ColumnStacker {
    pub fn new(columns: ColumnCount) -> Self {
        Self::seeded(columns, String::new())
    }

    pub fn seeded(columns: ColumnCount, markup: String) -> Self {
        Self {
            markup,
            columns,
            column: 0,
        }
    }

    /// Zero-based index of the next free column in the current row.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl LayoutStrategy for ColumnStacker {
    fn target(&self) -> LayoutTarget {
        LayoutTarget::Columns(self.columns)
    }

    fn accept(&mut self, unit: &RenderUnit) {
        self.markup.push_str(unit.markup());
        match unit.placement() {
            Placement::Block => {
                self.markup.push_str(ROW_BREAK);
                self.column = 0;
            }
            Placement::Inline => {
                self.column += 1;
                if self.column == self.columns.get() {
                    self.markup.push_str(ROW_BREAK);
                    self.column = 0;
                }
            }
        }
        self.markup.push('\n');
    }

    fn markup(&self) -> &str {
        &self.markup
    }

    fn take_markup(&mut self) -> String {
        std::mem::take(&mut self.markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(markup: &str) -> RenderUnit {
        RenderUnit::inline(markup).expect("valid unit")
    }

    fn block(markup: &str) -> RenderUnit {
        RenderUnit::block(markup).expect("valid unit")
    }

    #[test]
    fn breaks_row_after_n_inline_units() {
        let columns = ColumnCount::new(3).expect("supported");
        let mut stacker = ColumnStacker::new(columns);
        for name in ["a", "b", "c", "d"] {
            stacker.accept(&inline(name));
        }

        assert_eq!(stacker.markup(), "a\nb\nc<br>\nd\n");
        assert_eq!(stacker.column(), 1);
    }

    #[test]
    fn block_unit_resets_column_counter() {
        let columns = ColumnCount::new(2).expect("supported");
        let mut stacker = ColumnStacker::new(columns);
        stacker.accept(&inline("a"));
        assert_eq!(stacker.column(), 1);

        stacker.accept(&block("<h2>t</h2>"));
        assert_eq!(stacker.column(), 0);

        stacker.accept(&inline("b"));
        stacker.accept(&inline("c"));
        assert_eq!(stacker.markup(), "a\n<h2>t</h2><br>\nb\nc<br>\n");
        assert_eq!(stacker.column(), 0);
    }

    #[test]
    fn single_column_breaks_after_every_unit() {
        let columns = ColumnCount::new(1).expect("supported");
        let mut stacker = ColumnStacker::new(columns);
        stacker.accept(&inline("a"));
        stacker.accept(&inline("b"));

        assert_eq!(stacker.markup(), "a<br>\nb<br>\n");
    }
}
