//! Flow description exchanged with the canvas editor
//!
//! The engine only reads node ids and line endpoints. It writes `left`,
//! `top` and, for highlighted nodes, `style`. Everything else a caller puts
//! on a node, a line or the container is carried through untouched.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;
use std::hash::Hash;

/// Requirements on a node identifier
///
/// Ordering is used by the level layout to place nodes left to right.
pub trait NodeKey: Clone + Eq + Hash + Ord + Debug {}

impl<T> NodeKey for T where T: Clone + Eq + Hash + Ord + Debug {}

/// Node identifier as it appears in editor JSON
///
/// Ids are JSON integers (signed, or unsigned above `i64::MAX`) or strings.
/// Fractional numbers are not ids and fail deserialization.
///
/// Integers sort before strings, integers numerically and strings
/// lexicographically.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[serde(untagged)]
pub enum NodeId {
    #[display("{_0}")]
    Int(i64),
    #[display("{_0}")]
    UInt(u64),
    #[display("{_0}")]
    Str(String),
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// Presentational attributes the engine may set and the renderer reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Kept as the caller wrote it, editors send both `10` and `"10"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeStyle {
    /// Style given to the hub of a hub-radial layout
    pub fn hub() -> Self {
        Self {
            background_color: Some("#90CAF9".to_string()),
            z_index: Some(Value::from("10")),
            transform: Some("scale(1.05)".to_string()),
            extra: Map::new(),
        }
    }

    /// Overwrite the fields set in `other`, keep the rest
    pub fn merge(&mut self, other: NodeStyle) {
        if other.background_color.is_some() {
            self.background_color = other.background_color;
        }
        if other.z_index.is_some() {
            self.z_index = other.z_index;
        }
        if other.transform.is_some() {
            self.transform = other.transform;
        }
        self.extra.extend(other.extra);
    }
}

/// A step of the flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode<N> {
    pub id: N,
    /// Horizontal pixel offset, e.g. `"512px"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    /// Vertical pixel offset, e.g. `"80px"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<N> FlowNode<N> {
    pub fn new(id: impl Into<N>) -> Self {
        Self {
            id: id.into(),
            left: None,
            top: None,
            style: None,
            extra: Map::new(),
        }
    }
}

/// A transition between two steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line<N> {
    pub from: N,
    pub to: N,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<N> Line<N> {
    pub fn new(from: impl Into<N>, to: impl Into<N>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            extra: Map::new(),
        }
    }
}

/// The container handed in by the editor and handed back positioned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowData<N> {
    pub node_list: Vec<FlowNode<N>>,
    pub line_list: Vec<Line<N>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<N> FlowData<N> {
    pub fn new(node_list: Vec<FlowNode<N>>, line_list: Vec<Line<N>>) -> Self {
        Self {
            node_list,
            line_list,
            extra: Map::new(),
        }
    }
}
