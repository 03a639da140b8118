use crate::{FlowNode, Line, NodeKey, NodeStyle, Point, Vec2};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, VecDeque};
use tracing::warn;

/// A transition as read from the caller, endpoints not yet resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<N> {
    pub source: N,
    pub target: N,
}

/// Indexed view of the flow graph
///
/// Nodes are addressed by their position in the caller's node list. Edges
/// whose endpoints are both known are mirrored into a petgraph `DiGraph`
/// (parallel edges kept) for neighbor and degree queries; dangling edges
/// are kept in [`GraphModel::edges`] only.
///
/// Node ids must be unique. With duplicates, id lookups resolve to the
/// first node carrying the id.
#[derive(Debug, Clone)]
pub struct GraphModel<N> {
    graph: DiGraph<N, ()>,
    index: HashMap<N, usize>,
    edges: Vec<Edge<N>>,
    links: Vec<Option<(usize, usize)>>,
}

impl<N: NodeKey> GraphModel<N> {
    pub fn new<I>(ids: impl IntoIterator<Item = N>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        for id in ids {
            let node = graph.add_node(id.clone());
            index.entry(id).or_insert(node.index());
        }

        let mut edges = Vec::new();
        let mut links = Vec::new();
        for (source, target) in pairs {
            let link = match (index.get(&source), index.get(&target)) {
                (Some(&from), Some(&to)) => {
                    graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
                    Some((from, to))
                }
                _ => {
                    warn!("Edge {source:?} -> {target:?} references an unknown node");
                    None
                }
            };
            edges.push(Edge { source, target });
            links.push(link);
        }

        Self {
            graph,
            index,
            edges,
            links,
        }
    }

    /// Build the model from the editor's node and line lists
    pub fn from_flow(nodes: &[FlowNode<N>], lines: &[Line<N>]) -> Self {
        Self::new(
            nodes.iter().map(|node| node.id.clone()),
            lines
                .iter()
                .map(|line| (line.from.clone(), line.to.clone())),
        )
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn id(&self, node: usize) -> &N {
        &self.graph[NodeIndex::new(node)]
    }

    pub fn index_of(&self, id: &N) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// All edges in input order, including dangling ones
    pub fn edges(&self) -> &[Edge<N>] {
        &self.edges
    }

    /// Endpoint indices of edge `edge`, `None` when an endpoint is unknown
    pub fn link(&self, edge: usize) -> Option<(usize, usize)> {
        self.links[edge]
    }

    /// Resolved edges in input order
    pub fn links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.links.iter().flatten().copied()
    }

    /// Direct successors of `node`, once per edge
    pub fn children(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(node), Direction::Outgoing)
            .map(|n| n.index())
    }

    pub fn in_degree(&self, node: usize) -> usize {
        self.graph
            .neighbors_directed(NodeIndex::new(node), Direction::Incoming)
            .count()
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.graph
            .neighbors_directed(NodeIndex::new(node), Direction::Outgoing)
            .count()
    }

    /// Incoming plus outgoing edges
    pub fn degree(&self, node: usize) -> usize {
        self.in_degree(node) + self.out_degree(node)
    }

    /// Nodes without incoming edges, in list order
    pub fn sources(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&node| self.in_degree(node) == 0)
            .collect()
    }

    /// Whether an edge joins `a` and `b` in either direction
    pub fn connected(&self, a: usize, b: usize) -> bool {
        self.graph
            .find_edge_undirected(NodeIndex::new(a), NodeIndex::new(b))
            .is_some()
    }

    /// Breadth-first depth of every node reachable from `roots`
    pub fn bfs_levels(&self, roots: &[usize]) -> Vec<Option<usize>> {
        let mut levels = vec![None; self.len()];
        let mut queue = VecDeque::new();
        for &root in roots {
            if levels[root].is_none() {
                levels[root] = Some(0);
                queue.push_back(root);
            }
        }

        while let Some(node) = queue.pop_front() {
            let level = levels[node].unwrap_or(0);
            for child in self.children(node) {
                if levels[child].is_none() {
                    levels[child] = Some(level + 1);
                    queue.push_back(child);
                }
            }
        }

        levels
    }
}

/// Working state of one layout request
///
/// Created fresh for every request, nothing in it outlives the call.
#[derive(Debug, Clone)]
pub struct LayoutContext<N> {
    pub model: GraphModel<N>,
    /// Node centers, indexed like the node list
    pub positions: Vec<Point>,
    /// Styles the engine wants merged into nodes when finishing
    pub styles: Vec<Option<NodeStyle>>,
    /// Per-node displacement accumulated by the force simulator
    pub(crate) displacement: Vec<Vec2>,
}

impl<N: NodeKey> LayoutContext<N> {
    pub fn new(model: GraphModel<N>) -> Self {
        let len = model.len();
        Self {
            model,
            positions: vec![Point::default(); len],
            styles: vec![None; len],
            displacement: vec![Vec2::zero(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of the node with the given id
    pub fn position_of(&self, id: &N) -> Option<Point> {
        self.model.index_of(id).map(|node| self.positions[node])
    }

    /// Write rounded pixel offsets and engine styles back onto the nodes
    ///
    /// Numeric `x`/`y` working fields a caller may have supplied are removed.
    pub fn finish(self, nodes: &mut [FlowNode<N>]) {
        for ((node, position), style) in nodes.iter_mut().zip(self.positions).zip(self.styles) {
            node.left = Some(pixels(position.x));
            node.top = Some(pixels(position.y));
            node.extra.remove("x");
            node.extra.remove("y");
            if let Some(style) = style {
                node.style.get_or_insert_with(NodeStyle::default).merge(style);
            }
        }
    }
}

fn pixels(value: f64) -> String {
    format!("{}px", value.round() as i64)
}
