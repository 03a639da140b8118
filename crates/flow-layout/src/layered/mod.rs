//! Topological strategies
//!
//! Both strategies assign every node a discrete level, then lay each level
//! out as a horizontal row centered on the canvas. Rows are
//! `layered.levelHeight` apart, starting at `layered.topOffset`.

mod level;
mod tree;

pub use level::{level_assignment, LevelLayout};
pub use tree::{tree_levels, TreeLayout};

use crate::{LayoutConfig, Point};

/// Center of slot `slot` in a row of `count` nodes on level `level`
pub(crate) fn row_position(level: usize, count: usize, slot: usize, config: &LayoutConfig) -> Point {
    let layered = &config.layered;
    let row_width = count as f64 * layered.level_spacing;
    let start = (config.canvas_width - row_width) / 2.0 + layered.level_spacing / 2.0;
    Point::new(
        start + slot as f64 * layered.level_spacing,
        layered.top_offset + level as f64 * layered.level_height,
    )
}
