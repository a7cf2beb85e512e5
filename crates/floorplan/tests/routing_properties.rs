use proptest::prelude::*;
use std::collections::{BTreeMap, BinaryHeap};
use std::cmp::Reverse;
use wayfinder_floorplan::{EdgeRecord, FloorPlan, FloorPlanDocument, FloorPlanError, NodeRecord};

fn node_id(i: usize) -> String {
    format!("n{i}")
}

/// A spanning chain keeps the graph connected; extra edges add shortcuts.
fn build(node_count: usize, chain: &[i64], extra: &[(usize, usize, i64)]) -> FloorPlan {
    let nodes = (0..node_count)
        .map(|i| NodeRecord {
            id: node_id(i),
            label: format!("Room {i}"),
            x: (i * 10) as f64,
            y: 0.0,
            landmark: None,
            features: Vec::new(),
            nearby: Vec::new(),
        })
        .collect();

    let mut pairs: BTreeMap<(usize, usize), i64> = BTreeMap::new();
    for (i, weight) in chain.iter().enumerate().take(node_count - 1) {
        pairs.insert((i, i + 1), *weight);
    }
    for &(a, b, weight) in extra {
        let (a, b) = (a % node_count, b % node_count);
        if a != b {
            pairs.entry((a.min(b), a.max(b))).or_insert(weight);
        }
    }

    let edges = pairs
        .into_iter()
        .map(|((a, b), weight)| EdgeRecord {
            from: node_id(a),
            to: node_id(b),
            weight,
        })
        .collect();

    FloorPlan::from_document(&FloorPlanDocument {
        default_start: node_id(0),
        nodes,
        edges,
        aliases: Vec::new(),
        descriptors: Vec::new(),
    })
    .expect("generated plan is valid")
}

/// Reference distances computed independently of the router
fn reference_distance(plan: &FloorPlan, from: &str, to: &str) -> Option<u64> {
    let mut best: BTreeMap<String, u64> = BTreeMap::new();
    let mut heap = BinaryHeap::new();
    best.insert(from.to_string(), 0);
    heap.push(Reverse((0u64, from.to_string())));

    while let Some(Reverse((cost, id))) = heap.pop() {
        if id == to {
            return Some(cost);
        }
        if best.get(&id).is_some_and(|known| *known < cost) {
            continue;
        }
        for neighbor in plan.neighbors(&id).unwrap() {
            let next = cost + u64::from(neighbor.weight);
            if best.get(neighbor.id).map_or(true, |known| next < *known) {
                best.insert(neighbor.id.to_string(), next);
                heap.push(Reverse((next, neighbor.id.to_string())));
            }
        }
    }
    None
}

proptest! {
    #[test]
    fn proptest_routes_are_optimal_and_edge_connected(
        node_count in 2usize..12,
        chain in prop::collection::vec(1i64..500, 11),
        extra in prop::collection::vec((0usize..12, 0usize..12, 1i64..500), 0..20),
        from in 0usize..12,
        to in 0usize..12,
    ) {
        let plan = build(node_count, &chain, &extra);
        let from = node_id(from % node_count);
        let to = node_id(to % node_count);

        let route = plan.shortest_route(&from, &to).unwrap();
        prop_assert_eq!(route.start(), from.as_str());
        prop_assert_eq!(route.goal(), to.as_str());

        let walked = plan.path_weight(&route.path).unwrap();
        prop_assert_eq!(walked, Some(route.total_weight));
        prop_assert_eq!(Some(route.total_weight), reference_distance(&plan, &from, &to));

        for pair in route.path.windows(2) {
            prop_assert_ne!(&pair[0], &pair[1]);
        }
    }

    #[test]
    fn proptest_self_route_is_single_node(node_count in 1usize..8, pick in 0usize..8) {
        let plan = build(node_count.max(2), &[1; 8], &[]);
        let id = node_id(pick % node_count.max(2));
        let route = plan.shortest_route(&id, &id).unwrap();
        prop_assert_eq!(route.path, vec![id]);
        prop_assert_eq!(route.total_weight, 0);
    }
}

#[test]
fn split_building_reports_no_path() {
    let doc = FloorPlanDocument {
        default_start: "west".to_string(),
        nodes: ["west", "hall", "east"]
            .iter()
            .map(|id| NodeRecord {
                id: id.to_string(),
                label: id.to_string(),
                x: 0.0,
                y: 0.0,
                landmark: None,
                features: Vec::new(),
                nearby: Vec::new(),
            })
            .collect(),
        edges: vec![EdgeRecord {
            from: "west".to_string(),
            to: "hall".to_string(),
            weight: 4,
        }],
        aliases: Vec::new(),
        descriptors: Vec::new(),
    };
    let plan = FloorPlan::from_document(&doc).unwrap();

    let err = plan.shortest_route("west", "east").unwrap_err();
    assert!(matches!(err, FloorPlanError::NoPath { .. }));
    assert_eq!(err.to_string(), "No path found between west and east");
}

#[test]
fn neighbors_and_listing() {
    let plan = FloorPlan::builtin();

    let around: Vec<(&str, u32)> = plan
        .neighbors("circulation")
        .unwrap()
        .into_iter()
        .map(|n| (n.id, n.weight))
        .collect();
    assert_eq!(
        around,
        vec![
            ("mainEntrance", 300),
            ("southEntrance", 50),
            ("toCafeBergson", 100),
            ("toLowerLevel", 100),
        ]
    );

    assert!(plan.contains("vocalBooth"));
    assert!(!plan.contains("rooftop"));
    assert!(matches!(
        plan.neighbors("rooftop"),
        Err(FloorPlanError::UnknownNode(_))
    ));

    let first = plan.nodes().next().unwrap();
    assert_eq!(first.id, "mainEntrance");
    assert_eq!(first.label, "Main Entrance");
    assert_eq!(plan.nodes().count(), 17);
    assert_eq!(plan.edges().count(), 16);
}

#[test]
fn loads_plan_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annex.toml");
    std::fs::write(
        &path,
        r#"
default_start = "lobby"

[[nodes]]
id = "lobby"
label = "Lobby"
x = 0
y = 0

[[nodes]]
id = "stacks"
label = "Stacks"
x = 40
y = 0
landmark = "Shelves start here"

[[edges]]
from = "lobby"
to = "stacks"
weight = 12
"#,
    )
    .unwrap();

    let doc = FloorPlanDocument::from_file(&path).unwrap();
    let plan = FloorPlan::from_document(&doc).unwrap();
    assert_eq!(plan.edge_weight("stacks", "lobby").unwrap(), Some(12));
    assert_eq!(
        plan.node("stacks").unwrap().landmark.as_deref(),
        Some("Shelves start here")
    );
}
