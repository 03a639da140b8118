use crate::{LayoutConfig, LayoutContext, LayoutStrategy, NodeKey, Point};

/// Row-major grid with `ceil(sqrt(n))` columns
///
/// The grid starts at `radial.gridMargin` from the top-left corner. Cells
/// divide the remaining canvas evenly and are then widened by
/// `radial.gridSpread`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridLayout;

impl<N: NodeKey> LayoutStrategy<N> for GridLayout {
    fn place(&self, ctx: &mut LayoutContext<N>, config: &LayoutConfig) {
        let count = ctx.len();
        if count == 0 {
            return;
        }

        let radial = &config.radial;
        let cols = (count as f64).sqrt().ceil() as usize;
        let rows = count.div_ceil(cols);
        let margin = radial.grid_margin;
        let cell_width = (config.canvas_width - 2.0 * margin) / cols.saturating_sub(1).max(1) as f64
            * radial.grid_spread;
        let cell_height = (config.canvas_height - 2.0 * margin)
            / rows.saturating_sub(1).max(1) as f64
            * radial.grid_spread;

        for (i, position) in ctx.positions.iter_mut().enumerate() {
            let (row, col) = (i / cols, i % cols);
            *position = Point::new(
                margin + col as f64 * cell_width,
                margin + row as f64 * cell_height,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphModel;
    use test_log::test;

    fn place(n: i64) -> Vec<Point> {
        let mut ctx = LayoutContext::new(GraphModel::new(1..=n, []));
        GridLayout.place(&mut ctx, &LayoutConfig::default());
        ctx.positions
    }

    #[test]
    fn five_nodes_use_three_columns() {
        let positions = place(5);
        // cells are 700 / 2 * 1.1 wide and 700 / 1 * 1.1 high
        assert!((positions[0].x - 150.0).abs() < 1e-9);
        assert!((positions[1].x - 535.0).abs() < 1e-9);
        assert!((positions[2].x - 920.0).abs() < 1e-9);
        assert!((positions[3].x - 150.0).abs() < 1e-9);
        assert!((positions[3].y - 920.0).abs() < 1e-9);
        assert!((positions[4].y - 920.0).abs() < 1e-9);
    }

    #[test]
    fn single_node_sits_at_margin() {
        assert_eq!(place(1), vec![Point::new(150.0, 150.0)]);
    }
}
