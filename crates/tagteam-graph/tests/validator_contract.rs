//! Validator contract over lowered graphs
//!
//! Builds small graphs from the typed node model, lowers them, and checks
//! the validator verdicts the rest of the system relies on.

use chrono::{TimeZone, Utc};
use serde_json::json;
use tagteam_core::{Node, RealWorldEntity, Role, RoleType};
use tagteam_graph::{node_to_value, JsonLdSerializer, PatternId, ShmlValidator};

fn doctor() -> RealWorldEntity {
    RealWorldEntity {
        id: "inst:Person_doctor_abc123def456".to_string(),
        label: "doctor".to_string(),
        types: vec!["cco:Person".to_string(), "owl:NamedIndividual".to_string()],
        instantiated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        instantiated_by: Some("doc:test".to_string()),
        is_bearer_of: vec!["inst:Agent_Role_cafebabe".to_string()],
        genericity_category: None,
        class_nomination: None,
    }
}

fn agent_role() -> Role {
    Role {
        id: "inst:Agent_Role_cafebabe".to_string(),
        label: "Agent Role of doctor".to_string(),
        role_type: RoleType::Agent,
        types: vec!["cco:AgentRole".to_string(), "bfo:BFO_0000023".to_string()],
        inheres_in: "inst:Person_doctor_abc123def456".to_string(),
        realized_in: vec!["inst:Act_examine_12345678".to_string()],
        would_be_realized_in: vec![],
    }
}

#[test]
fn lowered_role_and_bearer_validate_cleanly() {
    let graph = vec![
        node_to_value(&Node::Entity(doctor())),
        node_to_value(&Node::Role(agent_role())),
        json!({
            "id": "inst:Act_examine_12345678",
            "type": ["cco:Act"],
            "label": "examine",
            "has_agent": { "id": "inst:Person_doctor_abc123def456" },
            "occurs_during": { "id": "inst:interval" }
        }),
        json!({
            "id": "inst:interval",
            "type": ["bfo:BFO_0000026"],
            "label": "today",
            "has_start_time": "2024-05-01T00:00:00Z",
            "has_end_time": "2024-05-02T00:00:00Z"
        }),
    ];
    let report = ShmlValidator::new().validate(&graph);
    assert!(report.violations().is_empty(), "{}", report.summary());
    assert!(report.compliance_score > 90.0);
}

#[test]
fn role_stripped_of_its_bearer_is_flagged() {
    let mut role = agent_role();
    role.inheres_in = String::new();
    let mut lowered = node_to_value(&Node::Role(role));
    lowered.as_object_mut().unwrap().remove("inheres_in");
    let report = ShmlValidator::new().validate(&[lowered]);
    assert!(report
        .violations()
        .iter()
        .any(|f| f.pattern == PatternId::RolePattern));
}

#[test]
fn document_roundtrips_through_the_serializer() {
    let serializer = JsonLdSerializer::new();
    let graph = vec![
        node_to_value(&Node::Entity(doctor())),
        node_to_value(&Node::Role(agent_role())),
    ];
    let serialized = serializer.serialize(&graph);
    let (parsed, context) = serializer.parse(&serialized).unwrap();
    assert_eq!(parsed, graph);
    assert_eq!(context["id"], "@id");
    // Parsing the same document twice is stable.
    let again = serializer.serialize(&parsed);
    assert_eq!(serialized, again);
}

#[test]
fn pretty_and_compact_forms_carry_the_same_graph() {
    let compact = JsonLdSerializer::new();
    let pretty = JsonLdSerializer::new().with_pretty(true);
    let graph = vec![node_to_value(&Node::Entity(doctor()))];
    let (a, _) = compact.parse(&compact.serialize(&graph)).unwrap();
    let (b, _) = pretty.parse(&pretty.serialize(&graph)).unwrap();
    assert_eq!(a, b);
}
