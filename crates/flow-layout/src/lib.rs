//! Automatic layout for flow editors
//!
//! Given the nodes and lines of a flow, this crate computes a position for
//! every node so a canvas editor can draw the flow without stored
//! coordinates. A request runs one layout strategy, then resolves overlaps
//! and fits the result inside the canvas. Positions are written back as
//! pixel offsets (`left`/`top`).
//!
//! # Layout strategies
//!
//! - [`ForceDirected`]: deterministic spring simulation (the default)
//! - [`TreeLayout`]: breadth-first levels from the roots
//! - [`LevelLayout`]: topological levels, tolerant of cycles
//! - [`CircleLayout`]: one circle in list order
//! - [`GridLayout`]: uniform grid in list order
//! - [`HubRadialLayout`]: rings around the most connected node
//!
//! # Example
//!
//! ```
//! use flow_layout::{layout_flow, FlowData, FlowNode, LayoutMode, Line, NodeId};
//!
//! let mut flow: FlowData<NodeId> = FlowData::new(
//!     vec![FlowNode::new("start"), FlowNode::new("review"), FlowNode::new("done")],
//!     vec![Line::new("start", "review"), Line::new("review", "done")],
//! );
//!
//! layout_flow(&mut flow, LayoutMode::Level);
//! assert_eq!(flow.node_list[0].top.as_deref(), Some("80px"));
//! assert_eq!(flow.node_list[2].top.as_deref(), Some("480px"));
//! ```
//!
//! Or straight from editor JSON:
//!
//! ```
//! use flow_layout::{layout_json, LayoutConfig};
//! use serde_json::json;
//!
//! let flow = json!({
//!     "nodeList": [{"id": 1}, {"id": 2}],
//!     "lineList": [{"from": 1, "to": 2}],
//! });
//! let flow = layout_json(flow, "tree", &LayoutConfig::default()).unwrap();
//! assert_eq!(flow["nodeList"][1]["top"], "280px");
//! ```

mod bounds;
mod config;
mod engine;
mod error;
mod flow;
mod force;
mod geometry;
mod graph;
mod overlap;
mod pipeline;

pub mod layered;
pub mod radial;

pub use bounds::{Bounds, BoundsNormalizer};
pub use config::{ForceConfig, HubConfig, LayeredConfig, LayoutConfig, RadialConfig};
pub use engine::{LayoutMode, LayoutStrategy};
pub use error::FlowLayoutError;
pub use flow::{FlowData, FlowNode, Line, NodeId, NodeKey, NodeStyle};
pub use force::ForceDirected;
pub use geometry::{Point, Vec2};
pub use graph::{Edge, GraphModel, LayoutContext};
pub use overlap::OverlapResolver;
pub use pipeline::{layout_flow, layout_flow_with, layout_json};

pub use layered::{LevelLayout, TreeLayout};
pub use radial::{CircleLayout, GridLayout, HubRadialLayout};
