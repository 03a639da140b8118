/// 2D vector with f64 components
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Create a new vector
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a zero vector
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean length
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// 2D point in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` in direction `angle` (radians)
    pub fn polar(self, radius: f64, angle: f64) -> Self {
        Self {
            x: self.x + radius * angle.cos(),
            y: self.y + radius * angle.sin(),
        }
    }

    /// Vector from `other` to `self`
    pub fn delta(self, other: Self) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    pub fn distance(self, other: Self) -> f64 {
        self.delta(other).length()
    }

    /// Angle of `self` seen from `center`
    pub fn angle_from(self, center: Self) -> f64 {
        (self.y - center.y).atan2(self.x - center.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;
    use test_log::test;

    #[test]
    fn polar_and_angle_agree() {
        let center = Point::new(500.0, 500.0);
        let p = center.polar(100.0, FRAC_PI_2);
        assert!((p.x - 500.0).abs() < 1e-9);
        assert!((p.y - 600.0).abs() < 1e-9);
        assert!((p.angle_from(center) - FRAC_PI_2).abs() < 1e-9);
        assert!((p.distance(center) - 100.0).abs() < 1e-9);
    }
}
