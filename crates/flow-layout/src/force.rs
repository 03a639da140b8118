use crate::{LayoutConfig, LayoutContext, LayoutStrategy, NodeKey, Vec2};
use std::f64::consts::TAU;
use tracing::debug;

/// Force-directed layout
///
/// Nodes are seeded on a circle around the canvas center, then moved by a
/// fixed number of simulation steps. Every step accumulates pairwise
/// repulsion and edge attraction, clamps the result per axis and bounces
/// moves that would leave the canvas. No randomness is involved, the same
/// input order always gives the same layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForceDirected;

impl<N: NodeKey> LayoutStrategy<N> for ForceDirected {
    fn place(&self, ctx: &mut LayoutContext<N>, config: &LayoutConfig) {
        if ctx.is_empty() {
            return;
        }

        seed(ctx, config);

        let force = &config.force;
        let k = (config.canvas_width * config.canvas_height / ctx.len() as f64).sqrt()
            * force.spacing_factor;

        for iteration in 0..force.iterations {
            repulse(ctx, config, k);
            if let Err(edge) = attract(ctx, config, k) {
                let edge = &ctx.model.edges()[edge];
                debug!(
                    "Iteration {iteration}: cannot find node for edge {:?} -> {:?}, skipping attraction",
                    edge.source, edge.target
                );
            }
            integrate(ctx, config);
        }
    }
}

/// Place every node on a circle, radius varied by `index % 3`
fn seed<N: NodeKey>(ctx: &mut LayoutContext<N>, config: &LayoutConfig) {
    let center = config.center();
    let radius = config.canvas_width.min(config.canvas_height) * config.force.seed_radius_ratio;
    let count = ctx.len() as f64;

    for (i, position) in ctx.positions.iter_mut().enumerate() {
        let angle = i as f64 / count * TAU;
        let node_radius = radius * (0.8 + (i % 3) as f64 * 0.1);
        *position = center.polar(node_radius, angle);
    }
}

/// Reset displacements and add the repulsion of every other node
fn repulse<N: NodeKey>(ctx: &mut LayoutContext<N>, config: &LayoutConfig, k: f64) {
    let force = &config.force;
    let LayoutContext {
        positions,
        displacement,
        ..
    } = ctx;

    for (i, delta) in displacement.iter_mut().enumerate() {
        *delta = Vec2::zero();
        for (j, other) in positions.iter().enumerate() {
            if i == j {
                continue;
            }
            let dist = positions[i].delta(*other);
            let len = dist.length();
            if len <= 0.0 || len >= force.repulsion_range {
                continue;
            }
            let eject = if len < force.close_range {
                force.close_eject_factor
            } else {
                force.eject_factor
            };
            let push = k * k / len * eject;
            delta.x += dist.x / len * push;
            delta.y += dist.y / len * push;
        }
    }
}

/// Pull the endpoints of every edge together
///
/// Stops at the first edge with an unknown endpoint and returns its index;
/// edges after it get no attraction in this step.
fn attract<N: NodeKey>(
    ctx: &mut LayoutContext<N>,
    config: &LayoutConfig,
    k: f64,
) -> Result<(), usize> {
    let condense = config.force.condense_factor;
    for edge in 0..ctx.model.edges().len() {
        let (source, target) = ctx.model.link(edge).ok_or(edge)?;
        let dist = ctx.positions[source].delta(ctx.positions[target]);
        let pull = dist.length() / k * condense;

        ctx.displacement[source].x -= dist.x * pull;
        ctx.displacement[source].y -= dist.y * pull;
        ctx.displacement[target].x += dist.x * pull;
        ctx.displacement[target].y += dist.y * pull;
    }
    Ok(())
}

/// Apply clamped displacements, bouncing off the canvas edges
fn integrate<N: NodeKey>(ctx: &mut LayoutContext<N>, config: &LayoutConfig) {
    let force = &config.force;
    for (position, delta) in ctx.positions.iter_mut().zip(&ctx.displacement) {
        let dx = delta.x.floor().clamp(-force.max_step_x, force.max_step_x);
        let dy = delta.y.floor().clamp(-force.max_step_y, force.max_step_y);
        position.x = bounce(position.x, dx, config.canvas_width);
        position.y = bounce(position.y, dy, config.canvas_height);
    }
}

fn bounce(value: f64, step: f64, limit: f64) -> f64 {
    let moved = value + step;
    if moved >= limit || moved <= 0.0 {
        value - step
    } else {
        moved
    }
}
