use crate::{LayoutConfig, Point, Vec2};
use tracing::trace;

/// Pushes apart nodes whose footprints collide
///
/// A footprint is the node size grown by the minimum gap. Each pass moves
/// every overlapping node along the axis where its overlap is smaller, by
/// half the overlap plus a fixed push. A pass that would raise the total
/// overlap is retried with halved moves and dropped if that never helps,
/// so the total never grows from one pass to the next. Passes stop once
/// nothing moves or after `overlapPasses`. Dense graphs may keep some
/// overlap.
#[derive(Debug, Clone)]
pub struct OverlapResolver {
    footprint: Vec2,
    push: f64,
    max_passes: usize,
}

/// Halvings tried before a pass is given up
const DAMPING_STEPS: usize = 4;

impl OverlapResolver {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            footprint: config.footprint(),
            push: config.overlap_push,
            max_passes: config.overlap_passes,
        }
    }

    /// Run passes until stable, returns how many ran
    pub fn resolve(&self, positions: &mut [Point]) -> usize {
        let mut passes = 0;
        while passes < self.max_passes {
            passes += 1;
            if !self.pass(positions) {
                break;
            }
        }
        trace!("Overlap resolution ran {passes} passes");
        passes
    }

    /// One pass over all nodes, returns whether any node moved
    ///
    /// Nodes are moved in list order, later nodes see the moves of earlier
    /// ones. Positions are left untouched when no damped version of the
    /// pass keeps the total overlap from growing.
    pub fn pass(&self, positions: &mut [Point]) -> bool {
        let before = self.violation(positions);
        if before == 0.0 {
            return false;
        }

        let start = positions.to_vec();
        let mut damping = 1.0;
        for _ in 0..=DAMPING_STEPS {
            self.sweep(positions, damping);
            if self.violation(positions) <= before {
                return true;
            }
            positions.copy_from_slice(&start);
            damping /= 2.0;
        }
        trace!("No overlap pass reduces violation {before}, stopping");
        false
    }

    fn sweep(&self, positions: &mut [Point], damping: f64) {
        for i in 0..positions.len() {
            let mut shift = Vec2::zero();
            let a = positions[i];
            for (j, b) in positions.iter().enumerate() {
                if i == j {
                    continue;
                }
                let Some(overlap) = self.overlap(a, *b) else {
                    continue;
                };
                if overlap.x < overlap.y {
                    let dir = if a.x < b.x { -1.0 } else { 1.0 };
                    shift.x += dir * (overlap.x / 2.0 + self.push);
                } else {
                    let dir = if a.y < b.y { -1.0 } else { 1.0 };
                    shift.y += dir * (overlap.y / 2.0 + self.push);
                }
            }
            positions[i].x += shift.x * damping;
            positions[i].y += shift.y * damping;
        }
    }

    /// Sum over node pairs of the smaller axis overlap
    pub fn violation(&self, positions: &[Point]) -> f64 {
        let mut total = 0.0;
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                if let Some(overlap) = self.overlap(*a, *b) {
                    total += overlap.x.min(overlap.y);
                }
            }
        }
        total
    }

    /// Per-axis overlap of two footprints, `None` unless both axes overlap
    fn overlap(&self, a: Point, b: Point) -> Option<Vec2> {
        let x = self.footprint.x - (a.x - b.x).abs();
        let y = self.footprint.y - (a.y - b.y).abs();
        (x > 0.0 && y > 0.0).then_some(Vec2::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use test_log::test;

    fn resolver() -> OverlapResolver {
        OverlapResolver::new(&LayoutConfig::default())
    }

    #[test]
    fn separated_nodes_stop_after_one_pass() {
        let mut positions = vec![Point::new(100.0, 100.0), Point::new(400.0, 100.0)];
        let before = positions.clone();
        assert_eq!(resolver().resolve(&mut positions), 1);
        assert_eq!(positions, before);
    }

    #[test]
    fn close_pair_moves_along_smaller_overlap() {
        let mut positions = vec![Point::new(500.0, 500.0), Point::new(510.0, 500.0)];
        assert!(resolver().pass(&mut positions));
        // overlap is 210 on x and 130 on y, so the pair splits vertically
        assert_eq!(positions[0], Point::new(500.0, 570.0));
        assert_eq!(positions[1], Point::new(510.0, 465.0));
    }

    #[test]
    fn coincident_nodes_are_separated() {
        let mut positions = vec![Point::new(500.0, 500.0); 2];
        let resolver = resolver();
        resolver.resolve(&mut positions);
        assert_eq!(resolver.violation(&positions), 0.0);
    }

    #[test]
    fn violation_never_grows_between_passes() {
        let resolver = resolver();
        let mut positions = vec![
            Point::new(400.0, 500.0),
            Point::new(500.0, 500.0),
            Point::new(600.0, 500.0),
        ];
        let mut last = resolver.violation(&positions);
        assert_eq!(last, 260.0);
        for _ in 0..50 {
            let moved = resolver.pass(&mut positions);
            let now = resolver.violation(&positions);
            assert!(now <= last, "{now} > {last}");
            last = now;
            if !moved {
                break;
            }
        }
        assert_eq!(last, 0.0);
    }

    fn assert_monotone(resolver: &OverlapResolver, positions: &mut [Point]) {
        let mut last = resolver.violation(positions);
        for pass in 0..50 {
            let moved = resolver.pass(positions);
            let now = resolver.violation(positions);
            assert!(now <= last, "pass {pass}: {last} -> {now} from {positions:?}");
            last = now;
            if !moved {
                break;
            }
        }
    }

    #[test]
    fn crowded_cluster_never_gains_overlap() {
        let mut positions = vec![
            Point::new(503.0, 357.5),
            Point::new(571.0, 489.5),
            Point::new(405.0, 266.5),
            Point::new(294.0, 297.5),
            Point::new(232.0, 217.0),
            Point::new(412.0, 436.5),
            Point::new(427.0, 495.0),
        ];
        assert_monotone(&resolver(), &mut positions);
    }

    #[test]
    fn random_clusters_never_gain_overlap() {
        let resolver = resolver();
        let mut rng = ChaCha8Rng::seed_from_u64(0x0E41_A9);
        for _ in 0..2000 {
            let count = rng.gen_range(3..=8);
            let mut positions: Vec<Point> = (0..count)
                .map(|_| {
                    let x = rng.gen_range(400..=1200) as f64 / 2.0;
                    let y = rng.gen_range(400..=1000) as f64 / 2.0;
                    Point::new(x, y)
                })
                .collect();
            assert_monotone(&resolver, &mut positions);
        }
    }

    #[test]
    fn rejected_pass_leaves_positions_untouched() {
        let resolver = resolver();
        let mut positions = vec![
            Point::new(503.0, 357.5),
            Point::new(571.0, 489.5),
            Point::new(405.0, 266.5),
            Point::new(294.0, 297.5),
            Point::new(232.0, 217.0),
            Point::new(412.0, 436.5),
            Point::new(427.0, 495.0),
        ];
        for _ in 0..50 {
            let before = positions.clone();
            if !resolver.pass(&mut positions) {
                assert_eq!(positions, before);
                break;
            }
        }
    }

    #[test]
    fn pass_cap_is_respected() {
        let config = LayoutConfig {
            overlap_passes: 1,
            ..Default::default()
        };
        let mut positions = vec![Point::new(500.0, 500.0); 3];
        assert_eq!(OverlapResolver::new(&config).resolve(&mut positions), 1);
    }
}
