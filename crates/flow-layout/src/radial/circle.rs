use crate::{LayoutConfig, LayoutContext, LayoutStrategy, NodeKey};
use std::f64::consts::TAU;

/// All nodes on one circle around the canvas center, in list order
///
/// The radius grows with the square root of the node count once there are
/// more than 16 nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleLayout;

impl<N: NodeKey> LayoutStrategy<N> for CircleLayout {
    fn place(&self, ctx: &mut LayoutContext<N>, config: &LayoutConfig) {
        let count = ctx.len();
        if count == 0 {
            return;
        }

        let growth = ((count as f64).sqrt() / 4.0).max(1.0);
        let radius = config.canvas_width.min(config.canvas_height)
            * config.radial.circle_radius_ratio
            * growth;
        let center = config.center();
        for (i, position) in ctx.positions.iter_mut().enumerate() {
            *position = center.polar(radius, i as f64 / count as f64 * TAU);
        }
    }
}
