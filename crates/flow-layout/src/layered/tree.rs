use super::row_position;
use crate::{GraphModel, LayoutConfig, LayoutContext, LayoutStrategy, NodeKey, Point};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Hierarchical layout from the graph's roots
///
/// Roots are the nodes without incoming edges, or the first node when every
/// node has one. Each reachable node sits one level below its deepest
/// parent, so every edge between reachable nodes points downwards. Edges
/// closing a cycle are ignored. Nodes in the same level keep their list
/// order from left to right.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeLayout;

/// Longest-path level of every node, `None` when no root reaches it
pub fn tree_levels<N: NodeKey>(model: &GraphModel<N>) -> Vec<Option<usize>> {
    if model.is_empty() {
        return Vec::new();
    }
    let mut roots = model.sources();
    if roots.is_empty() {
        debug!("No root found, using first node {:?}", model.id(0));
        roots.push(0);
    }

    let reached = model.bfs_levels(&roots);
    let mut remaining = vec![0; model.len()];
    for (a, b) in model.links() {
        if reached[a].is_some() {
            remaining[b] += 1;
        }
    }

    let mut levels: Vec<Option<usize>> = vec![None; model.len()];
    // deepest level among the parents swept so far, plus one
    let mut candidate: Vec<Option<usize>> = vec![None; model.len()];
    let mut queue: VecDeque<usize> = roots.iter().copied().collect();
    for &root in &roots {
        levels[root] = Some(0);
    }

    loop {
        while let Some(node) = queue.pop_front() {
            let level = levels[node].unwrap_or(0);
            for child in model.children(node) {
                if levels[child].is_some() {
                    continue;
                }
                let next = candidate[child].map_or(level + 1, |c| c.max(level + 1));
                candidate[child] = Some(next);
                remaining[child] -= 1;
                if remaining[child] == 0 {
                    levels[child] = Some(next);
                    queue.push_back(child);
                }
            }
        }

        // a cycle blocks the sweep, release its first node
        let blocked = (0..model.len())
            .find(|&node| levels[node].is_none() && candidate[node].is_some());
        let Some(node) = blocked else {
            break;
        };
        debug!("Breaking cycle at {:?}", model.id(node));
        levels[node] = candidate[node];
        queue.push_back(node);
    }

    levels
}

impl<N: NodeKey> LayoutStrategy<N> for TreeLayout {
    fn place(&self, ctx: &mut LayoutContext<N>, config: &LayoutConfig) {
        let levels = tree_levels(&ctx.model);

        let mut counts: HashMap<usize, usize> = HashMap::new();
        for level in levels.iter().flatten() {
            *counts.entry(*level).or_default() += 1;
        }

        let center = config.center();
        let mut slots: HashMap<usize, usize> = HashMap::new();
        let mut unreached = 0;
        for (node, level) in levels.into_iter().enumerate() {
            ctx.positions[node] = match level {
                Some(level) => {
                    let slot = slots.entry(level).or_default();
                    let position = row_position(level, counts[&level], *slot, config);
                    *slot += 1;
                    position
                }
                None => {
                    unreached += 1;
                    Point::new(
                        center.x,
                        center.y + node as f64 * config.layered.fallback_step,
                    )
                }
            };
        }

        if unreached > 0 {
            debug!("{unreached} nodes unreachable from any root, using fallback positions");
        }
    }
}
