use super::row_position;
use crate::{GraphModel, LayoutConfig, LayoutContext, LayoutStrategy, NodeKey};
use std::collections::HashMap;
use tracing::debug;

/// Level layout from a topological sweep
///
/// Nodes without incoming edges form level 0. Sweeping a level removes its
/// outgoing edges, and every node left without incoming edges joins the
/// next level. Nodes the sweep never frees (cycles) share the level after
/// the deepest one. Inside a level nodes are ordered by id.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelLayout;

/// Level of every node after the topological sweep
pub fn level_assignment<N: NodeKey>(model: &GraphModel<N>) -> Vec<usize> {
    let len = model.len();
    let mut remaining: Vec<usize> = (0..len).map(|node| model.in_degree(node)).collect();
    let mut levels: Vec<Option<usize>> = vec![None; len];

    let mut current: Vec<usize> = (0..len).filter(|&node| remaining[node] == 0).collect();
    if current.is_empty() && len > 0 {
        debug!("No node without incoming edges, starting from {:?}", model.id(0));
        current.push(0);
    }
    for &node in &current {
        levels[node] = Some(0);
    }

    let mut level = 0;
    while !current.is_empty() {
        level += 1;
        let mut next = Vec::new();
        for &node in &current {
            for child in model.children(node) {
                remaining[child] = remaining[child].saturating_sub(1);
                if remaining[child] == 0 && levels[child].is_none() {
                    levels[child] = Some(level);
                    next.push(child);
                }
            }
        }
        current = next;
    }

    let deepest = levels.iter().flatten().copied().max().unwrap_or(0);
    let mut unreached = 0;
    let levels: Vec<usize> = levels
        .into_iter()
        .map(|level| {
            level.unwrap_or_else(|| {
                unreached += 1;
                deepest + 1
            })
        })
        .collect();
    if unreached > 0 {
        debug!("{unreached} nodes left in cycles, placed on level {}", deepest + 1);
    }
    levels
}

impl<N: NodeKey> LayoutStrategy<N> for LevelLayout {
    fn place(&self, ctx: &mut LayoutContext<N>, config: &LayoutConfig) {
        let levels = level_assignment(&ctx.model);

        let mut counts: HashMap<usize, usize> = HashMap::new();
        for &level in &levels {
            *counts.entry(level).or_default() += 1;
        }

        let model = &ctx.model;
        for (node, &level) in levels.iter().enumerate() {
            let id = model.id(node);
            let slot = levels
                .iter()
                .enumerate()
                .filter(|&(other, &other_level)| {
                    other != node && other_level == level && model.id(other) < id
                })
                .count();
            ctx.positions[node] = row_position(level, counts[&level], slot, config);
        }
    }
}
