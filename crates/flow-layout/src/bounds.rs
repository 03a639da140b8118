use crate::{LayoutConfig, Point, Vec2};
use tracing::trace;

/// Axis-aligned box around a set of node centers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn of(positions: &[Point]) -> Option<Self> {
        let first = *positions.first()?;
        Some(positions.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |bounds, p| Self {
                min: Point::new(bounds.min.x.min(p.x), bounds.min.y.min(p.y)),
                max: Point::new(bounds.max.x.max(p.x), bounds.max.y.max(p.y)),
            },
        ))
    }
}

/// Fits a finished layout inside the canvas minus the safety margin
///
/// The layout is first shifted so nothing sits left of or above the margin.
/// If it still reaches past the far margin it is scaled down uniformly
/// around the canvas center, then shifted back inside the window. Scaling
/// never exceeds 1, so relative positions and aspect ratio are kept.
#[derive(Debug, Clone)]
pub struct BoundsNormalizer {
    canvas: Vec2,
    margin: f64,
}

impl BoundsNormalizer {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            canvas: config.canvas(),
            margin: config.safety_margin,
        }
    }

    pub fn normalize(&self, positions: &mut [Point]) {
        let Some(bounds) = Bounds::of(positions) else {
            return;
        };

        let offset = Vec2::new(
            (self.margin - bounds.min.x).max(0.0),
            (self.margin - bounds.min.y).max(0.0),
        );
        let limit = self.limit();
        let scale = self
            .axis_scale(bounds.max.x + offset.x, limit.x)
            .min(self.axis_scale(bounds.max.y + offset.y, limit.y))
            .clamp(0.0, 1.0);
        trace!("Normalizing with offset {offset:?} and scale {scale}");

        let center = Point::new(self.canvas.x / 2.0, self.canvas.y / 2.0);
        for p in positions.iter_mut() {
            p.x += offset.x;
            p.y += offset.y;
            if scale < 1.0 {
                p.x = center.x + (p.x - center.x) * scale;
                p.y = center.y + (p.y - center.y) * scale;
            }
        }

        if scale < 1.0 {
            self.recenter(positions);
        }
    }

    /// Far edge of the allowed window on each axis
    fn limit(&self) -> Vec2 {
        Vec2::new(self.canvas.x - self.margin, self.canvas.y - self.margin)
    }

    /// Factor that brings `[margin, max]` within `[margin, limit]`
    ///
    /// Negative when the margins leave no room, callers clamp it.
    fn axis_scale(&self, max: f64, limit: f64) -> f64 {
        if max > limit {
            (limit - self.margin) / (max - self.margin)
        } else {
            1.0
        }
    }

    /// Shift the scaled layout back inside the window
    ///
    /// Scaling around the center keeps the extent within the window but not
    /// necessarily the position.
    fn recenter(&self, positions: &mut [Point]) {
        let Some(bounds) = Bounds::of(positions) else {
            return;
        };
        let limit = self.limit();
        let shift = Vec2::new(
            shift_into(bounds.min.x, bounds.max.x, self.margin, limit.x),
            shift_into(bounds.min.y, bounds.max.y, self.margin, limit.y),
        );
        for p in positions.iter_mut() {
            p.x += shift.x;
            p.y += shift.y;
        }
    }
}

fn shift_into(min: f64, max: f64, low: f64, high: f64) -> f64 {
    if min < low {
        low - min
    } else if max > high {
        high - max
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn normalize(mut positions: Vec<Point>) -> Vec<Point> {
        BoundsNormalizer::new(&LayoutConfig::default()).normalize(&mut positions);
        positions
    }

    fn assert_inside(positions: &[Point]) {
        for p in positions {
            assert!(p.x >= 80.0 - 1e-9 && p.x <= 920.0 + 1e-9, "{p:?}");
            assert!(p.y >= 80.0 - 1e-9 && p.y <= 920.0 + 1e-9, "{p:?}");
        }
    }

    #[test]
    fn layout_inside_window_is_untouched() {
        let positions = vec![Point::new(100.0, 200.0), Point::new(900.0, 800.0)];
        assert_eq!(normalize(positions.clone()), positions);
    }

    #[test]
    fn shortfall_is_offset() {
        let positions = normalize(vec![Point::new(30.0, 500.0), Point::new(300.0, 0.0)]);
        assert_eq!(positions, vec![Point::new(80.0, 580.0), Point::new(350.0, 80.0)]);
    }

    #[test]
    fn oversized_layout_is_scaled_uniformly() {
        let positions = normalize(vec![
            Point::new(80.0, 80.0),
            Point::new(1760.0, 80.0),
            Point::new(80.0, 500.0),
        ]);
        assert_inside(&positions);
        // width 1680 becomes 840, so every distance halves
        assert!((positions[1].x - positions[0].x - 840.0).abs() < 1e-9);
        assert!((positions[2].y - positions[0].y - 210.0).abs() < 1e-9);
    }

    #[test]
    fn offset_and_scale_combine() {
        let positions = normalize(vec![
            Point::new(-400.0, -50.0),
            Point::new(1300.0, 1200.0),
            Point::new(200.0, 300.0),
        ]);
        assert_inside(&positions);
    }

    #[test]
    fn oversized_margin_never_mirrors_the_layout() {
        let config = LayoutConfig {
            safety_margin: 600.0,
            ..Default::default()
        };
        let mut positions = vec![Point::new(100.0, 100.0), Point::new(900.0, 700.0)];
        BoundsNormalizer::new(&config).normalize(&mut positions);
        assert!(positions[0].x <= positions[1].x, "{positions:?}");
        assert!(positions[0].y <= positions[1].y, "{positions:?}");
        assert!(positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn empty_layout_is_ignored() {
        assert!(normalize(Vec::new()).is_empty());
    }
}
