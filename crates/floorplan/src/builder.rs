use crate::document::FloorPlanDocument;
use crate::error::{FloorPlanError, Result};
use crate::types::{FloorPlan, PlanEdge, PlanNode, Point};
use petgraph::graph::UnGraph;
use std::collections::HashMap;

impl FloorPlan {
    /// Build and validate the graph.
    ///
    /// Fails with [`FloorPlanError::GraphIntegrity`] on duplicate or empty ids,
    /// non-finite coordinates, edges to unknown nodes, non-positive weights,
    /// self-loops, duplicate edges, or an unknown default start.
    pub fn from_document(doc: &FloorPlanDocument) -> Result<Self> {
        let mut graph = UnGraph::with_capacity(doc.nodes.len(), doc.edges.len());
        let mut node_index = HashMap::with_capacity(doc.nodes.len());

        // Phase 1: nodes
        for record in &doc.nodes {
            let id = record.id.trim();
            if id.is_empty() {
                return Err(integrity(format!(
                    "node with label '{}' has an empty id",
                    record.label
                )));
            }
            if !record.x.is_finite() || !record.y.is_finite() {
                return Err(integrity(format!("node '{id}' has a non-finite coordinate")));
            }
            if node_index.contains_key(id) {
                return Err(integrity(format!("duplicate node id '{id}'")));
            }

            let landmark = record
                .landmark
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);

            let idx = graph.add_node(PlanNode {
                id: id.to_string(),
                label: record.label.trim().to_string(),
                position: Point::new(record.x, record.y),
                landmark,
            });
            node_index.insert(id.to_string(), idx);
        }

        // Phase 2: edges
        for edge in &doc.edges {
            let lookup = |id: &str| {
                node_index.get(id.trim()).copied().ok_or_else(|| {
                    integrity(format!(
                        "edge {} -> {} references unknown node '{id}'",
                        edge.from, edge.to
                    ))
                })
            };
            let from = lookup(&edge.from)?;
            let to = lookup(&edge.to)?;

            if edge.weight <= 0 {
                return Err(integrity(format!(
                    "edge {} -> {} has non-positive weight {}",
                    edge.from, edge.to, edge.weight
                )));
            }
            let weight = u32::try_from(edge.weight).map_err(|_| {
                integrity(format!(
                    "edge {} -> {} weight {} is out of range",
                    edge.from, edge.to, edge.weight
                ))
            })?;
            if from == to {
                return Err(integrity(format!("self-loop on node '{}'", edge.from)));
            }
            if graph.find_edge(from, to).is_some() {
                return Err(integrity(format!(
                    "duplicate edge between '{}' and '{}'",
                    edge.from, edge.to
                )));
            }

            graph.add_edge(from, to, PlanEdge { weight });
        }

        let default_start = node_index
            .get(doc.default_start.trim())
            .copied()
            .ok_or_else(|| {
                integrity(format!(
                    "default start '{}' is not a node",
                    doc.default_start
                ))
            })?;

        log::debug!(
            "Floor plan loaded: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self {
            graph,
            node_index,
            default_start,
        })
    }

    /// The bundled library floor plan
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_document(&FloorPlanDocument::builtin())
            .expect("bundled floor plan must validate")
    }
}

fn integrity(reason: String) -> FloorPlanError {
    FloorPlanError::GraphIntegrity(reason)
}
