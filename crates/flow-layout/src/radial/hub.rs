use crate::{GraphModel, LayoutConfig, LayoutContext, LayoutStrategy, NodeKey, NodeStyle};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI, TAU};
use tracing::debug;

/// Distance of fanned-out children from their parent
const CHILD_MIN_RADIUS: f64 = 180.0;
const CHILD_BASE_RADIUS: f64 = 120.0;
const CHILD_RADIUS_STEP: f64 = 15.0;

/// Connectivity distance of a previous-ring node not joined by an edge
const UNLINKED_DISTANCE: usize = 1000;

/// Rings around the most connected node
///
/// The hub is the node with the highest total degree. Every other node is
/// put on the ring of its breadth-first distance from the hub. The first
/// ring surrounds the hub; deeper nodes fan out from their parent in the
/// previous ring, then every ring is pushed out to its nominal radius and
/// crowded neighbors on the same ring are eased apart.
#[derive(Debug, Clone, Copy, Default)]
pub struct HubRadialLayout;

/// Hub and ring assignment of a graph
#[derive(Debug, Clone, PartialEq)]
pub struct HubPlan {
    pub hub: usize,
    /// Ring of every node, 0 for the hub
    pub levels: Vec<usize>,
    /// Nodes of each ring in list order
    pub rings: Vec<Vec<usize>>,
}

/// The node with the highest total degree, first one on ties
///
/// Without any edge this falls back to a node without incoming edges, then
/// to the first node.
pub fn select_hub<N: NodeKey>(model: &GraphModel<N>) -> Option<usize> {
    let mut best = None;
    let mut max_degree = 0;
    for node in 0..model.len() {
        let degree = model.degree(node);
        if degree > max_degree {
            max_degree = degree;
            best = Some(node);
        }
    }
    best.or_else(|| model.sources().first().copied())
        .or_else(|| (!model.is_empty()).then_some(0))
}

impl HubPlan {
    pub fn new<N: NodeKey>(model: &GraphModel<N>) -> Option<Self> {
        let hub = select_hub(model)?;
        let reached = model.bfs_levels(&[hub]);
        let deepest = reached.iter().flatten().copied().max().unwrap_or(0);
        let levels: Vec<usize> = reached
            .into_iter()
            .map(|level| level.unwrap_or(deepest + 1))
            .collect();

        let mut rings = vec![Vec::new(); deepest + 2];
        for (node, &level) in levels.iter().enumerate() {
            rings[level].push(node);
        }

        Some(Self { hub, levels, rings })
    }

    fn ring(&self, level: usize) -> &[usize] {
        self.rings.get(level).map(Vec::as_slice).unwrap_or_default()
    }
}

impl<N: NodeKey> LayoutStrategy<N> for HubRadialLayout {
    fn place(&self, ctx: &mut LayoutContext<N>, config: &LayoutConfig) {
        let Some(plan) = HubPlan::new(&ctx.model) else {
            return;
        };
        debug!(
            "Hub {:?} with {} rings",
            ctx.model.id(plan.hub),
            plan.rings.len() - 1
        );

        let center = config.center();
        // hub first, so nodes without a parent fall back to the center
        ctx.positions.fill(center);
        ctx.styles[plan.hub] = Some(NodeStyle::hub());

        let mut sectors = vec![None; ctx.len()];
        place_first_ring(ctx, &plan, &mut sectors, config);
        place_outer_rings(ctx, &plan, &mut sectors);
        respace_rings(ctx, &plan, config);
        ease_rings(ctx, &plan, config);
    }
}

/// Spread the first ring on a full circle, or on a half circle when crowded
fn place_first_ring<N: NodeKey>(
    ctx: &mut LayoutContext<N>,
    plan: &HubPlan,
    sectors: &mut [Option<f64>],
    config: &LayoutConfig,
) {
    let hub = &config.hub;
    let ring = plan.ring(1);
    let center = config.center();

    for (i, &node) in ring.iter().enumerate() {
        let angle = if ring.len() <= hub.semicircle_threshold {
            i as f64 * TAU / ring.len().max(1) as f64
        } else {
            i as f64 * PI / (ring.len() - 1).max(1) as f64 - FRAC_PI_2
        };
        ctx.positions[node] = center.polar(hub.base_radius, angle);
        sectors[node] = Some(angle);
    }
}

/// Fan every deeper node out from its parent in the previous ring
fn place_outer_rings<N: NodeKey>(
    ctx: &mut LayoutContext<N>,
    plan: &HubPlan,
    sectors: &mut [Option<f64>],
) {
    for level in 2..plan.rings.len() {
        let mut groups: Vec<(Option<usize>, Vec<usize>)> = Vec::new();
        for &node in plan.ring(level) {
            let parent = find_parent(&ctx.model, plan, node, level);
            match groups.iter_mut().find(|(p, _)| *p == parent) {
                Some((_, children)) => children.push(node),
                None => groups.push((parent, vec![node])),
            }
        }

        for (parent, children) in groups {
            let (origin, parent_angle) = match parent {
                Some(parent) => (ctx.positions[parent], sectors[parent].unwrap_or(0.0)),
                None => (ctx.positions[plan.hub], 0.0),
            };
            let count = children.len();
            let radius = CHILD_MIN_RADIUS.max(CHILD_BASE_RADIUS + CHILD_RADIUS_STEP * count as f64);
            let spread = match count {
                0..=3 => FRAC_PI_6,
                4..=6 => FRAC_PI_4,
                _ => FRAC_PI_3,
            };
            let step = if count > 1 {
                spread / (count - 1) as f64
            } else {
                0.0
            };

            for (i, &child) in children.iter().enumerate() {
                let angle = if count == 1 {
                    parent_angle
                } else {
                    parent_angle - spread / 2.0 + i as f64 * step
                };
                ctx.positions[child] = origin.polar(radius, angle);
                sectors[child] = Some(angle);
            }
        }
    }
}

/// Parent of `node` in ring `level - 1`
///
/// The source of the first edge into `node` from that ring wins. Otherwise
/// the first node of the ring joined to `node` by an edge in either
/// direction, otherwise the first node of the ring.
fn find_parent<N: NodeKey>(
    model: &GraphModel<N>,
    plan: &HubPlan,
    node: usize,
    level: usize,
) -> Option<usize> {
    if let Some((source, _)) = model
        .links()
        .find(|&(source, target)| target == node && plan.levels[source] == level - 1)
    {
        return Some(source);
    }

    let mut parent = None;
    let mut closest = usize::MAX;
    for &candidate in plan.ring(level - 1) {
        let distance = if model.connected(node, candidate) {
            0
        } else {
            UNLINKED_DISTANCE
        };
        if distance < closest {
            closest = distance;
            parent = Some(candidate);
        }
    }
    parent
}

/// Move every ring onto its nominal radius around the center, keeping angles
///
/// Graphs above `hub.crowdThreshold` nodes get proportionally wider rings.
fn respace_rings<N: NodeKey>(ctx: &mut LayoutContext<N>, plan: &HubPlan, config: &LayoutConfig) {
    let hub = &config.hub;
    let center = config.center();
    let count = ctx.len();
    let scale = if count > hub.crowd_threshold {
        1.0 + count as f64 / hub.crowd_scale
    } else {
        1.0
    };

    for (position, &level) in ctx.positions.iter_mut().zip(&plan.levels) {
        if level == 0 {
            continue;
        }
        let radius = hub.base_radius + (level - 1) as f64 * hub.radius_increment * scale;
        *position = center.polar(radius, position.angle_from(center));
    }
}

/// Rotate same-ring pairs closer than a node width away from each other
fn ease_rings<N: NodeKey>(ctx: &mut LayoutContext<N>, plan: &HubPlan, config: &LayoutConfig) {
    let center = config.center();
    let step = config.hub.easing_step;

    for _ in 0..config.hub.easing_passes {
        for ring in plan.rings.iter().skip(1) {
            for (i, &a) in ring.iter().enumerate() {
                for &b in &ring[i + 1..] {
                    let (pa, pb) = (ctx.positions[a], ctx.positions[b]);
                    if pa.distance(pb) >= config.node_width {
                        continue;
                    }
                    let radius = pa.distance(center);
                    ctx.positions[a] = center.polar(radius, pa.angle_from(center) - step);
                    ctx.positions[b] = center.polar(radius, pb.angle_from(center) + step);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn model(n: i64, edges: &[(i64, i64)]) -> GraphModel<i64> {
        GraphModel::new(1..=n, edges.iter().copied())
    }

    fn place(n: i64, edges: &[(i64, i64)]) -> LayoutContext<i64> {
        let mut ctx = LayoutContext::new(model(n, edges));
        HubRadialLayout.place(&mut ctx, &LayoutConfig::default());
        ctx
    }

    fn star(n: i64) -> Vec<(i64, i64)> {
        (2..=n).map(|leaf| (1, leaf)).collect()
    }

    #[test]
    fn hub_is_the_most_connected_node() {
        assert_eq!(select_hub(&model(4, &[(1, 2), (3, 2), (2, 4)])), Some(1));
        // first wins on ties
        assert_eq!(select_hub(&model(4, &[(1, 2), (3, 4)])), Some(0));
    }

    #[test]
    fn hub_without_edges_is_first_node() {
        assert_eq!(select_hub(&model(3, &[])), Some(0));
        assert_eq!(select_hub(&model(0, &[])), None);
    }

    #[test]
    fn star_leaves_circle_the_hub() {
        let ctx = place(6, &star(6));
        let config = LayoutConfig::default();
        let hub = ctx.positions[0];
        assert_eq!(hub, config.center());
        for leaf in &ctx.positions[1..] {
            assert!((leaf.distance(hub) - config.hub.base_radius).abs() < 1e-3);
        }
        assert_eq!(ctx.styles[0], Some(NodeStyle::hub()));
        assert!(ctx.styles[1..].iter().all(Option::is_none));
    }

    #[test]
    fn inbound_star_still_centers_the_hub() {
        let edges: Vec<(i64, i64)> = (2..=6).map(|leaf| (leaf, 1)).collect();
        let plan = HubPlan::new(&model(6, &edges)).unwrap();
        assert_eq!(plan.hub, 0);
        // leaves are unreachable from the hub and form the first ring
        assert_eq!(plan.levels, vec![0, 1, 1, 1, 1, 1]);

        let ctx = place(6, &edges);
        for leaf in &ctx.positions[1..] {
            assert!((leaf.distance(ctx.positions[0]) - 220.0).abs() < 1e-3);
        }
    }

    #[test]
    fn crowded_first_ring_uses_half_circle() {
        let config = LayoutConfig::default();
        let mut ctx = LayoutContext::new(model(11, &star(11)));
        let plan = HubPlan::new(&ctx.model).unwrap();
        let mut sectors = vec![None; ctx.len()];
        place_first_ring(&mut ctx, &plan, &mut sectors, &config);

        assert!((sectors[1].unwrap() + FRAC_PI_2).abs() < 1e-12);
        assert!((sectors[10].unwrap() - FRAC_PI_2).abs() < 1e-12);
        assert!((ctx.positions[1].y - 280.0).abs() < 1e-9);
        assert!(ctx.positions[1..].iter().all(|p| p.x >= 500.0 - 1e-9));
    }

    #[test]
    fn children_fan_out_around_parent_sector() {
        // 1 is the hub, 2 sits at angle 0 with children 6 and 7
        let ctx = place(7, &[(1, 2), (1, 3), (1, 4), (1, 5), (2, 6), (2, 7)]);
        let center = LayoutConfig::default().center();
        let (six, seven) = (ctx.positions[5], ctx.positions[6]);

        assert!((ctx.positions[1].distance(center) - 220.0).abs() < 1e-9);
        assert!((six.distance(center) - 420.0).abs() < 1e-9);
        assert!((seven.distance(center) - 420.0).abs() < 1e-9);
        assert!((six.x - seven.x).abs() < 1e-9);
        assert!((six.y + seven.y - 1000.0).abs() < 1e-9);
        assert!(six.y < seven.y);
        assert!(six.distance(seven) >= 170.0);
    }

    #[test]
    fn parent_prefers_direct_edge_then_connectivity() {
        // 6 is unreachable from the hub and only points at 5
        let g = model(6, &[(1, 2), (1, 3), (2, 4), (3, 5), (6, 5)]);
        let plan = HubPlan::new(&g).unwrap();
        assert_eq!(plan.levels, vec![0, 1, 1, 2, 2, 3]);
        assert_eq!(find_parent(&g, &plan, 3, 2), Some(1));
        assert_eq!(find_parent(&g, &plan, 4, 2), Some(2));
        assert_eq!(find_parent(&g, &plan, 5, 3), Some(4));
    }

    #[test]
    fn unlinked_node_falls_back_to_first_of_previous_ring() {
        let g = model(4, &[(1, 2), (1, 3)]);
        let plan = HubPlan::new(&g).unwrap();
        assert_eq!(plan.levels, vec![0, 1, 1, 2]);
        assert_eq!(find_parent(&g, &plan, 3, 2), Some(1));
    }

    #[test]
    fn large_graphs_get_wider_rings() {
        let mut edges = star(17);
        edges.extend([(2, 18), (2, 19), (2, 20)]);
        let ctx = place(20, &edges);
        let center = LayoutConfig::default().center();
        for p in &ctx.positions[1..17] {
            assert!((p.distance(center) - 220.0).abs() < 1e-6);
        }
        // 220 + 200 * (1 + 20 / 50)
        for p in &ctx.positions[17..] {
            assert!((p.distance(center) - 500.0).abs() < 1e-6);
        }
    }
}
