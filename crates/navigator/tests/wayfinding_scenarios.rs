use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::Arc;
use wayfinder_navigator::{FloorPlanDocument, NavigatorError, Wayfinder};

const HALLWAY: &str = r#"{
  "default_start": "mainEntrance",
  "nodes": [
    { "id": "mainEntrance", "label": "Main Entrance", "x": 100, "y": 400 },
    { "id": "circulation", "label": "Circulation", "x": 400, "y": 420 },
    { "id": "toCafeBergson", "label": "To Café Bergson", "x": 500, "y": 430 },
    { "id": "annex", "label": "Annex", "x": 900, "y": 900 }
  ],
  "edges": [
    { "from": "mainEntrance", "to": "circulation", "weight": 300 },
    { "from": "circulation", "to": "toCafeBergson", "weight": 100 }
  ],
  "aliases": [
    { "phrase": "desk", "node": "circulation" },
    { "phrase": "cafe", "node": "toCafeBergson" }
  ]
}"#;

fn hallway() -> Wayfinder {
    let doc = FloorPlanDocument::from_bytes(HALLWAY.as_bytes()).unwrap();
    Wayfinder::from_document(&doc).unwrap()
}

#[test]
fn hallway_route_heads_east() {
    let route = hallway().route("mainEntrance", "toCafeBergson").unwrap();
    assert_eq!(route.path, vec!["mainEntrance", "circulation", "toCafeBergson"]);
    assert_eq!(route.total_weight, 400);
    assert_eq!(
        route.directions[0],
        "1. From Main Entrance, continue straight east along the hallway to reach Circulation"
    );
    assert_eq!(route.directions.len(), 2);
}

#[test]
fn disconnected_node_has_no_path() {
    let wayfinder = hallway();
    let err = wayfinder.route("mainEntrance", "annex").unwrap_err();
    assert_eq!(err.code(), "no_path");
    assert!(err.is_user_facing());

    let envelope = wayfinder.error_envelope(&err);
    assert_eq!(envelope.message, "No path found between these locations.");
    assert!(envelope.suggestions.is_empty());
}

#[test]
fn unknown_ids_are_not_user_facing() {
    let err = hallway().route("mainEntrance", "roof").unwrap_err();
    assert!(matches!(err, NavigatorError::FloorPlan(_)));
    assert_eq!(err.code(), "unknown_node");
    assert!(!err.is_user_facing());
}

#[test]
fn ask_with_start_and_destination() {
    let wayfinder = Wayfinder::builtin();
    let route = wayfinder
        .ask("How do I get from 1South to the Information Commons?")
        .unwrap();
    assert_eq!(
        route.path,
        vec![
            "southCollaborativeStudyArea",
            "southEntrance",
            "circulation",
            "mainEntrance",
            "johnPMcGowanInformationCommons",
        ]
    );
    assert_eq!(route.total_weight, 650);
}

#[test]
fn ask_without_start_uses_the_entrance() {
    let route = Wayfinder::builtin().ask("Where can I find the cafe?").unwrap();
    assert_eq!(route.path.first().map(String::as_str), Some("mainEntrance"));
    assert_eq!(route.path.last().map(String::as_str), Some("toCafeBergson"));
}

#[test]
fn ask_about_nowhere_is_no_match() {
    let err = Wayfinder::builtin()
        .ask("How do I get to the planetarium?")
        .unwrap_err();
    assert_eq!(err.code(), "no_match");
}

#[test]
fn ask_between_two_names_for_one_place_is_already_there() {
    let route = Wayfinder::builtin()
        .ask("How do I get from circulation to borrowing?")
        .unwrap();
    assert_eq!(route.path, vec!["circulation"]);
    assert!(route.already_there);
    assert!(route.directions.is_empty());
}

#[test]
fn ask_never_routes_to_the_start_place() {
    let wayfinder = Wayfinder::builtin();
    let err = wayfinder
        .ask("How do I get from 1south to the moon base?")
        .unwrap_err();
    assert_eq!(err.code(), "no_match");
    let envelope = wayfinder.error_envelope(&err);
    assert_eq!(envelope.message, "I couldn't find a location matching 'the moon base'.");
}

#[test]
fn lost_user_keeps_the_inference_when_the_destination_is_unknown() {
    let wayfinder = Wayfinder::builtin();
    let response = wayfinder
        .assist_lost_user(
            "I see soundproof walls and recording equipment",
            Some("the moon"),
        )
        .unwrap();

    assert_eq!(response.inference.candidates[0].node_id, "vocalBooth");
    assert!(!response.inference.needs_clarification);
    assert_eq!(response.unresolved_destination.as_deref(), Some("the moon"));
    assert!(response.destination.is_none());
    assert!(response.route.is_none());
    assert!(response.highlight.is_none());
}

#[test]
fn lost_user_named_by_alias_order() {
    let response = Wayfinder::builtin()
        .assist_lost_user("I'm at the help desk by the 1south sign", None)
        .unwrap();
    assert_eq!(
        response.inference.candidates[0].node_id,
        "southCollaborativeStudyArea"
    );
    let route = response.route.unwrap();
    assert_eq!(route.path.first().map(String::as_str), Some("southCollaborativeStudyArea"));
    assert_eq!(route.path.last().map(String::as_str), Some("mainEntrance"));
}

#[test]
fn lost_user_with_distinctive_features_gets_directions() {
    let wayfinder = Wayfinder::builtin();
    let response = wayfinder
        .assist_lost_user("I see soundproof walls and recording equipment", None)
        .unwrap();

    assert!(!response.inference.needs_clarification);
    assert_eq!(response.inference.candidates[0].node_id, "vocalBooth");
    assert_eq!(response.destination.as_deref(), Some("mainEntrance"));

    let route = response.route.unwrap();
    assert_eq!(
        route.path,
        vec!["vocalBooth", "johnPMcGowanInformationCommons", "mainEntrance"]
    );
    let highlight = response.highlight.unwrap();
    assert_eq!(highlight.highlighted_nodes, route.path);
    assert_eq!(highlight.highlighted_edges.len(), 2);
}

#[test]
fn ambiguous_lost_user_gets_questions_not_directions() {
    let response = Wayfinder::builtin()
        .assist_lost_user("I'm next to a staircase", Some("periodicals"))
        .unwrap();

    assert!(response.inference.needs_clarification);
    assert_eq!(response.inference.candidates.len(), 3);
    assert_eq!(
        response.inference.questions[0],
        "Do you see any of these features: staircase, level signage, directory?"
    );
    assert!(response.route.is_none());
    assert!(response.highlight.is_none());
}

#[test]
fn computers_place_the_user_in_the_information_commons() {
    let inference = Wayfinder::builtin().infer_location("I'm near some computers");
    let commons = inference
        .candidates
        .iter()
        .find(|c| c.node_id == "johnPMcGowanInformationCommons")
        .unwrap();
    assert!(commons.confidence >= 0.4);
}

#[test]
fn highlight_rejects_unknown_ids_and_keeps_path_order() {
    let wayfinder = Wayfinder::builtin();
    assert!(wayfinder
        .highlight_and_project(&["circulation", "nowhere"])
        .is_err());

    let response = wayfinder
        .highlight_and_project(&["toCafeBergson", "circulation"])
        .unwrap();
    assert_eq!(response.highlighted_nodes, vec!["toCafeBergson", "circulation"]);
    assert_eq!(response.highlighted_edges[0].from, "toCafeBergson");
}

#[test]
fn shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Wayfinder>();

    let wayfinder = Arc::new(Wayfinder::builtin());
    std::thread::scope(|scope| {
        let handles: Vec<_> = ["cafe", "periodicals", "reference", "admin"]
            .into_iter()
            .map(|goal| {
                let wayfinder = Arc::clone(&wayfinder);
                scope.spawn(move || wayfinder.route_between(None, goal).unwrap().total_weight)
            })
            .collect();
        let weights: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(weights, vec![400, 600, 700, 550]);
    });
}

#[test]
fn loads_a_floor_plan_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(HALLWAY.as_bytes()).unwrap();

    let wayfinder = Wayfinder::from_file(file.path()).unwrap();
    assert_eq!(wayfinder.list_locations().len(), 4);
    assert_eq!(
        wayfinder.resolve_location("the front desk").unwrap().node_id,
        "circulation"
    );
}

#[test]
fn conflicting_aliases_fail_at_load() {
    let doc = r#"{
      "default_start": "a",
      "nodes": [
        { "id": "a", "label": "A", "x": 0, "y": 0 },
        { "id": "b", "label": "B", "x": 1, "y": 0 }
      ],
      "edges": [{ "from": "a", "to": "b", "weight": 1 }],
      "aliases": [
        { "phrase": "desk", "node": "a" },
        { "phrase": "desk", "node": "b" }
      ]
    }"#;
    let doc = FloorPlanDocument::from_bytes(doc.as_bytes()).unwrap();
    let err = Wayfinder::from_document(&doc).unwrap_err();
    assert_eq!(err.code(), "graph_integrity");
}

#[test]
fn envelopes_serialize_with_codes() {
    let wayfinder = Wayfinder::builtin();
    let err = wayfinder.resolve_location("   ").unwrap_err();
    let json = serde_json::to_value(wayfinder.error_envelope(&err)).unwrap();
    assert_eq!(json["code"], "no_match");
}
