use crate::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Canvas geometry and tuning constants for one layout request
///
/// Every field has a default, so a partial JSON object such as
/// `{"canvasWidth": 1200}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub node_width: f64,
    pub node_height: f64,
    /// Gap kept between node footprints by the overlap resolver
    pub min_node_distance: f64,
    /// Distance kept between every node and the canvas edges
    pub safety_margin: f64,
    /// Maximum passes of the overlap resolver
    pub overlap_passes: usize,
    /// Extra push added to half the overlap on each correction
    pub overlap_push: f64,
    pub force: ForceConfig,
    pub layered: LayeredConfig,
    pub radial: RadialConfig,
    pub hub: HubConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1000.0,
            canvas_height: 1000.0,
            node_width: 170.0,
            node_height: 80.0,
            min_node_distance: 50.0,
            safety_margin: 80.0,
            overlap_passes: 50,
            overlap_push: 5.0,
            force: ForceConfig::default(),
            layered: LayeredConfig::default(),
            radial: RadialConfig::default(),
            hub: HubConfig::default(),
        }
    }
}

impl LayoutConfig {
    pub fn canvas(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    /// Rectangular footprint used for overlap checks (node size plus gap)
    pub fn footprint(&self) -> Vec2 {
        Vec2::new(
            self.node_width + self.min_node_distance,
            self.node_height + self.min_node_distance,
        )
    }
}

/// Force-directed simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceConfig {
    pub iterations: usize,
    /// Seed circle radius as a fraction of the smaller canvas side
    pub seed_radius_ratio: f64,
    /// Multiplier on the ideal edge length `sqrt(area / n)`
    pub spacing_factor: f64,
    /// Pairs further apart than this do not repel
    pub repulsion_range: f64,
    /// Pairs closer than this use `close_eject_factor`
    pub close_range: f64,
    pub eject_factor: f64,
    pub close_eject_factor: f64,
    pub condense_factor: f64,
    pub max_step_x: f64,
    pub max_step_y: f64,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            iterations: 300,
            seed_radius_ratio: 0.35,
            spacing_factor: 1.5,
            repulsion_range: 350.0,
            close_range: 50.0,
            eject_factor: 8.0,
            close_eject_factor: 9.0,
            condense_factor: 2.5,
            max_step_x: 6.0,
            max_step_y: 5.0,
        }
    }
}

/// Tree and level layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayeredConfig {
    /// Vertical distance between consecutive levels
    pub level_height: f64,
    /// Horizontal slot width of one node inside a level
    pub level_spacing: f64,
    /// `y` of level 0
    pub top_offset: f64,
    /// Vertical step between stacked unreachable tree nodes
    pub fallback_step: f64,
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self {
            level_height: 200.0,
            level_spacing: 230.0,
            top_offset: 80.0,
            fallback_step: 70.0,
        }
    }
}

/// Circle and grid layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadialConfig {
    /// Circle radius as a fraction of the smaller canvas side
    pub circle_radius_ratio: f64,
    pub grid_margin: f64,
    /// Multiplier on the grid cell size
    pub grid_spread: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            circle_radius_ratio: 0.4,
            grid_margin: 150.0,
            grid_spread: 1.1,
        }
    }
}

/// Hub-radial layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HubConfig {
    /// Radius of the first ring around the hub
    pub base_radius: f64,
    /// Radius added per ring
    pub radius_increment: f64,
    /// First rings with more nodes than this use the upper semicircle
    pub semicircle_threshold: usize,
    /// Graphs with more nodes than this get wider ring spacing
    pub crowd_threshold: usize,
    pub crowd_scale: f64,
    pub easing_passes: usize,
    /// Angle nudge in radians applied to crowded same-ring pairs
    pub easing_step: f64,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            base_radius: 220.0,
            radius_increment: 200.0,
            semicircle_threshold: 8,
            crowd_threshold: 15,
            crowd_scale: 50.0,
            easing_passes: 5,
            easing_step: 0.05,
        }
    }
}
