use crate::error::{FloorPlanError, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Planar position in floor-plan units. `x` grows to the east, `y` to the north.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `(dx, dy)` from `self` to `other`
    #[must_use]
    pub fn delta_to(self, other: Point) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }
}

/// Node in the floor plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanNode {
    /// Stable key (e.g. "circulation")
    pub id: String,

    /// Human-readable name used in directions
    pub label: String,

    /// Only used for direction phrasing, never for routing cost
    pub position: Point,

    /// Annotation appended when a route arrives here
    pub landmark: Option<String>,
}

/// Undirected hallway between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEdge {
    /// Traversal cost, always > 0
    pub weight: u32,
}

/// Adjacent node with the weight of the connecting edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor<'a> {
    pub id: &'a str,
    pub weight: u32,
}

/// Immutable single-floor plan.
///
/// Built once from a [`crate::FloorPlanDocument`]; every query afterwards is a
/// read, so a plan can be shared across threads without locking.
#[derive(Debug, Clone)]
pub struct FloorPlan {
    pub(crate) graph: UnGraph<PlanNode, PlanEdge>,
    pub(crate) node_index: HashMap<String, NodeIndex>,
    pub(crate) default_start: NodeIndex,
}

impl FloorPlan {
    pub(crate) fn index_of(&self, id: &str) -> Result<NodeIndex> {
        self.node_index
            .get(id)
            .copied()
            .ok_or_else(|| FloorPlanError::UnknownNode(id.to_string()))
    }

    pub(crate) fn id_at(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].id
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Result<&PlanNode> {
        let idx = self.index_of(id)?;
        Ok(&self.graph[idx])
    }

    /// All nodes in document order
    pub fn nodes(&self) -> impl Iterator<Item = &PlanNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// All edges as `(a, b, weight)` in document order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.graph.edge_references().map(move |e| {
            (
                self.id_at(e.source()),
                self.id_at(e.target()),
                e.weight().weight,
            )
        })
    }

    /// Adjacent nodes ordered by document position
    pub fn neighbors(&self, id: &str) -> Result<Vec<Neighbor<'_>>> {
        let idx = self.index_of(id)?;
        let mut found: Vec<(NodeIndex, u32)> = self
            .graph
            .edges(idx)
            .map(|e| {
                let other = if e.source() == idx { e.target() } else { e.source() };
                (other, e.weight().weight)
            })
            .collect();
        found.sort_by_key(|(other, _)| other.index());

        Ok(found
            .into_iter()
            .map(|(other, weight)| Neighbor {
                id: self.id_at(other),
                weight,
            })
            .collect())
    }

    /// Weight of the edge between `a` and `b`, `None` if they are not adjacent
    pub fn edge_weight(&self, a: &str, b: &str) -> Result<Option<u32>> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        Ok(self
            .graph
            .find_edge(a, b)
            .map(|e| self.graph[e].weight))
    }

    /// Sum of edge weights along `path`, `None` if two consecutive entries are
    /// not connected by an edge.
    pub fn path_weight<S: AsRef<str>>(&self, path: &[S]) -> Result<Option<u64>> {
        let mut total = 0u64;
        for pair in path.windows(2) {
            match self.edge_weight(pair[0].as_ref(), pair[1].as_ref())? {
                Some(weight) => total += u64::from(weight),
                None => return Ok(None),
            }
        }
        if let Some(first) = path.first() {
            self.index_of(first.as_ref())?;
        }
        Ok(Some(total))
    }

    #[must_use]
    pub fn default_start(&self) -> &PlanNode {
        &self.graph[self.default_start]
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
