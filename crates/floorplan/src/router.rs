use crate::error::{FloorPlanError, Result};
use crate::types::FloorPlan;
use petgraph::algo::astar;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

/// Minimum-weight walk between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Node ids from start to goal, inclusive
    pub path: Vec<String>,

    /// Sum of edge weights along `path`
    pub total_weight: u64,
}

impl Route {
    /// A single-node route: start and goal coincide
    #[must_use]
    pub fn is_stationary(&self) -> bool {
        self.path.len() <= 1
    }

    #[must_use]
    pub fn start(&self) -> &str {
        self.path.first().map(String::as_str).unwrap_or_default()
    }

    #[must_use]
    pub fn goal(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}

impl FloorPlan {
    /// Dijkstra over declared edge weights (A* with a zero heuristic, which
    /// also reconstructs the path). Coordinates never influence the cost.
    pub fn shortest_route(&self, from: &str, to: &str) -> Result<Route> {
        let start = self.index_of(from)?;
        let goal = self.index_of(to)?;

        if start == goal {
            return Ok(Route {
                path: vec![self.id_at(start).to_string()],
                total_weight: 0,
            });
        }

        let (total_weight, nodes) = astar(
            &self.graph,
            start,
            |n| n == goal,
            |e| u64::from(e.weight().weight),
            |_| 0,
        )
        .ok_or_else(|| FloorPlanError::NoPath {
            from: from.to_string(),
            to: to.to_string(),
        })?;

        log::trace!(
            "Route {from} -> {to}: {} hops, weight {total_weight}",
            nodes.len().saturating_sub(1)
        );

        Ok(Route {
            path: nodes
                .into_iter()
                .map(|idx| self.id_at(idx).to_string())
                .collect(),
            total_weight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{EdgeRecord, FloorPlanDocument, NodeRecord};
    use pretty_assertions::assert_eq;

    fn plan(nodes: &[(&str, f64, f64)], edges: &[(&str, &str, i64)]) -> FloorPlan {
        let doc = FloorPlanDocument {
            default_start: nodes[0].0.to_string(),
            nodes: nodes
                .iter()
                .map(|(id, x, y)| NodeRecord {
                    id: id.to_string(),
                    label: id.to_string(),
                    x: *x,
                    y: *y,
                    landmark: None,
                    features: Vec::new(),
                    nearby: Vec::new(),
                })
                .collect(),
            edges: edges
                .iter()
                .map(|(from, to, weight)| EdgeRecord {
                    from: from.to_string(),
                    to: to.to_string(),
                    weight: *weight,
                })
                .collect(),
            aliases: Vec::new(),
            descriptors: Vec::new(),
        };
        FloorPlan::from_document(&doc).unwrap()
    }

    #[test]
    fn hallway_scenario() {
        let plan = plan(
            &[
                ("mainEntrance", 100.0, 400.0),
                ("circulation", 400.0, 420.0),
                ("toCafeBergson", 500.0, 430.0),
            ],
            &[
                ("mainEntrance", "circulation", 300),
                ("circulation", "toCafeBergson", 100),
            ],
        );

        let route = plan.shortest_route("mainEntrance", "toCafeBergson").unwrap();
        assert_eq!(
            route.path,
            vec!["mainEntrance", "circulation", "toCafeBergson"]
        );
        assert_eq!(route.total_weight, 400);
        assert_eq!(route.start(), "mainEntrance");
        assert_eq!(route.goal(), "toCafeBergson");
    }

    #[test]
    fn same_node_is_stationary() {
        let plan = plan(&[("a", 0.0, 0.0), ("b", 1.0, 0.0)], &[("a", "b", 1)]);
        let route = plan.shortest_route("b", "b").unwrap();
        assert_eq!(route.path, vec!["b"]);
        assert_eq!(route.total_weight, 0);
        assert!(route.is_stationary());
    }

    #[test]
    fn weights_beat_geometry() {
        // b sits on the straight line but the hallway through it is expensive
        let plan = plan(
            &[("a", 0.0, 0.0), ("b", 50.0, 0.0), ("c", 100.0, 0.0), ("d", 50.0, 500.0)],
            &[("a", "b", 100), ("b", "c", 100), ("a", "d", 10), ("d", "c", 10)],
        );
        let route = plan.shortest_route("a", "c").unwrap();
        assert_eq!(route.path, vec!["a", "d", "c"]);
        assert_eq!(route.total_weight, 20);
    }

    #[test]
    fn traversal_is_symmetric() {
        let plan = FloorPlan::builtin();
        let there = plan.shortest_route("vocalBooth", "referenceCollection").unwrap();
        let back = plan.shortest_route("referenceCollection", "vocalBooth").unwrap();
        assert_eq!(there.total_weight, back.total_weight);
    }

    #[test]
    fn disconnected_region_is_no_path() {
        let plan = plan(
            &[("a", 0.0, 0.0), ("b", 1.0, 0.0), ("island", 9.0, 9.0)],
            &[("a", "b", 1)],
        );
        match plan.shortest_route("a", "island") {
            Err(FloorPlanError::NoPath { from, to }) => {
                assert_eq!(from, "a");
                assert_eq!(to, "island");
            }
            other => panic!("expected NoPath, got {other:?}"),
        }
    }

    #[test]
    fn unknown_endpoint_is_reported() {
        let plan = plan(&[("a", 0.0, 0.0)], &[]);
        assert!(matches!(
            plan.shortest_route("a", "nowhere"),
            Err(FloorPlanError::UnknownNode(id)) if id == "nowhere"
        ));
    }

    #[test]
    fn builtin_route_to_project_room_a() {
        let plan = FloorPlan::builtin();
        let route = plan.shortest_route("mainEntrance", "projectRoomA").unwrap();
        assert_eq!(
            route.path,
            vec![
                "mainEntrance",
                "circulation",
                "southEntrance",
                "southCollaborativeStudyArea",
                "projectRoomA"
            ]
        );
        assert_eq!(route.total_weight, 600);
    }
}
