//! Layout strategies ("stackers") that turn render units into body markup.
//!
//! A strategy owns the body markup accumulated so far. When a layout
//! directive replaces it, the compiler takes that markup and seeds the
//! successor with it, so only the placement policy for later units changes.

mod center;
mod columns;
mod normal;

use crate::domain::{instruction::RenderUnit, layout::LayoutTarget};

pub use center::CenterStacker;
pub use columns::ColumnStacker;
pub use normal::NormalStacker;

/// Markup emitted to end a row.
pub const ROW_BREAK: &str = "<br>";

/// Placement policy applied to each unit of the instruction stream.
pub trait LayoutStrategy {
    /// Layout this strategy implements.
    fn target(&self) -> LayoutTarget;

    /// Append the unit's markup according to the placement policy.
    fn accept(&mut self, unit: &RenderUnit);

    /// Flush pending state before the strategy is replaced or the stream ends.
    fn finalize(&mut self) {}

    /// Markup accumulated so far, including any seeded predecessor output.
    fn markup(&self) -> &str;

    /// Move the accumulated markup out, leaving the strategy empty.
    fn take_markup(&mut self) -> String;
}

/// Construct the strategy for `target`, seeded with markup from its predecessor.
pub fn build(target: LayoutTarget, seed: String) -> Box<dyn LayoutStrategy> {
    match target {
        LayoutTarget::Normal => Box::new(NormalStacker::seeded(seed)),
        LayoutTarget::Columns(columns) => Box::new(ColumnStacker::seeded(columns, seed)),
        LayoutTarget::Center => Box::new(CenterStacker::seeded(seed)),
    }
}
