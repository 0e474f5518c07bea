//! Alternative-reading construction
//!
//! For each non-default reading of an ambiguity, the builder deep-clones the
//! ambiguous node from the flat graph, re-ids it with an `_alt<n>` suffix,
//! marks it `tagteam:AlternativeNode`, points `alternativeFor` at the
//! original, and applies the reading-specific modifications. Plausibility
//! mass: the default reading keeps the ambiguity's confidence; the
//! alternatives share the remainder equally, nudged by intensifiers and
//! clamped to [0.05, 0.95].

use crate::ambiguity::{Ambiguity, AmbiguityKind};
use serde_json::{json, Value};
use tagteam_core::vocab;
use tracing::warn;

static DEONTIC_INTENSIFIERS: &[&str] = &["strongly", "definitely", "absolutely", "certainly"];
static EPISTEMIC_INTENSIFIERS: &[&str] = &["possibly", "probably", "likely", "perhaps"];
static DEONTIC_READINGS: &[&str] = &["obligation", "recommendation", "permission"];
static EPISTEMIC_READINGS: &[&str] = &["expectation", "inference", "possibility"];

/// Builder configuration; defaults match the serializer contract.
#[derive(Debug, Clone)]
pub struct AlternativeGraphConfig {
    pub iri_suffix: String,
    pub preserve_original_links: bool,
    pub include_metadata: bool,
    pub default_plausibility: f64,
}

impl Default for AlternativeGraphConfig {
    fn default() -> Self {
        Self {
            iri_suffix: "_alt".to_string(),
            preserve_original_links: true,
            include_metadata: true,
            default_plausibility: 0.7,
        }
    }
}

/// Variant-node constructor over the flat JSON-LD graph.
#[derive(Debug, Default, Clone)]
pub struct AlternativeGraphBuilder {
    config: AlternativeGraphConfig,
}

impl AlternativeGraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: AlternativeGraphConfig) -> Self {
        Self { config }
    }

    /// Build alternative nodes for one ambiguity. `start_index` numbers the
    /// `_alt<n>` suffixes so repeated ambiguities on one node stay unique.
    /// Returns an empty vector (after logging) when the source node is gone.
    #[must_use]
    pub fn build(&self, ambiguity: &Ambiguity, graph: &[Value], start_index: usize) -> Vec<Value> {
        let Some(original) = graph
            .iter()
            .find(|n| n.get("id").and_then(Value::as_str) == Some(ambiguity.node_id.as_str()))
        else {
            warn!(node = %ambiguity.node_id, "alternative source node not found");
            return Vec::new();
        };

        let alternatives: Vec<&crate::ambiguity::AmbiguityReading> = ambiguity
            .readings
            .iter()
            .filter(|r| r.name != ambiguity.default_reading)
            .collect();
        if alternatives.is_empty() {
            return Vec::new();
        }

        let base = if ambiguity.confidence > 0.0 {
            ambiguity.confidence
        } else {
            self.config.default_plausibility
        };
        let shared = (1.0 - base) / alternatives.len() as f64;

        let mut nodes = Vec::with_capacity(alternatives.len());
        for (offset, reading) in alternatives.iter().enumerate() {
            let index = start_index + offset;
            let mut node = original.clone();
            let Some(object) = node.as_object_mut() else {
                warn!(node = %ambiguity.node_id, "alternative source is not an object");
                continue;
            };

            let alt_id = format!("{}{}{}", ambiguity.node_id, self.config.iri_suffix, index);
            object.insert("id".to_string(), json!(alt_id));
            push_type(object, vocab::TT_ALTERNATIVE_NODE);
            object.insert("alternativeFor".to_string(), json!({ "id": ambiguity.node_id }));

            if !self.config.preserve_original_links {
                strip_reference_fields(object);
            }

            apply_reading(object, ambiguity, &reading.name, reading.formalization.as_deref());

            if self.config.include_metadata {
                let plausibility = adjusted_plausibility(shared, &reading.name, ambiguity);
                object.insert("sourceAmbiguity".to_string(), json!(ambiguity.kind.as_str()));
                object.insert("plausibility".to_string(), json!(plausibility));
            }
            nodes.push(node);
        }
        nodes
    }
}

fn adjusted_plausibility(shared: f64, reading: &str, ambiguity: &Ambiguity) -> f64 {
    let mut value = shared;
    if let Some(span) = &ambiguity.span_text {
        let lower = span.to_lowercase();
        let has = |words: &[&str]| {
            words.iter().any(|w| {
                lower
                    .split(|c: char| !c.is_ascii_alphanumeric())
                    .any(|token| token == *w)
            })
        };
        if DEONTIC_READINGS.contains(&reading) && has(DEONTIC_INTENSIFIERS) {
            value += 0.15;
        }
        if EPISTEMIC_READINGS.contains(&reading) && has(EPISTEMIC_INTENSIFIERS) {
            value += 0.15;
        }
    }
    value.clamp(0.05, 0.95)
}

fn apply_reading(
    object: &mut serde_json::Map<String, Value>,
    ambiguity: &Ambiguity,
    reading: &str,
    formalization: Option<&str>,
) {
    match ambiguity.kind {
        AmbiguityKind::ModalForce => {
            let (modality, actuality) = match reading {
                "obligation" => ("obligation", "Prescribed"),
                "recommendation" => ("recommendation", "Prescribed"),
                "permission" => ("permission", "Permitted"),
                "expectation" => ("expectation", "Hypothetical"),
                "inference" => ("inference", "Hypothetical"),
                "possibility" => ("possibility", "Hypothetical"),
                "ability" => ("ability", "Potential"),
                other => (other, "Hypothetical"),
            };
            object.insert("modality".to_string(), json!(modality));
            object.insert("actualityStatus".to_string(), json!(actuality));
        }
        AmbiguityKind::Scope => {
            object.insert("scope".to_string(), json!(reading));
            if let Some(formal) = formalization {
                object.insert("formalization".to_string(), json!(formal));
            }
        }
        AmbiguityKind::NounCategory => {
            let types = match reading {
                "process" => vec![vocab::BFO_PROCESS, vocab::TT_ALTERNATIVE_NODE],
                _ => vec![vocab::BFO_GDC, vocab::TT_ALTERNATIVE_NODE],
            };
            object.insert("type".to_string(), json!(types));
        }
        AmbiguityKind::Metonymy => {
            if reading == "organization" {
                let literal = object
                    .get("label")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                object.insert(
                    "type".to_string(),
                    json!([vocab::CCO_ORGANIZATION, vocab::BFO_OBJECT, vocab::TT_ALTERNATIVE_NODE]),
                );
                object.insert("metonymicSource".to_string(), json!(literal));
                object.insert("literalType".to_string(), json!(vocab::CCO_ARTIFACT));
                object.insert("metonymyType".to_string(), json!("location_for_institution"));
            }
        }
        AmbiguityKind::Selectional => {
            // No structural rewrite; the metadata records the finding.
        }
    }
}

fn push_type(object: &mut serde_json::Map<String, Value>, iri: &str) {
    match object.get_mut("type") {
        Some(Value::Array(types)) => {
            if !types.iter().any(|t| t.as_str() == Some(iri)) {
                types.push(json!(iri));
            }
        }
        Some(single @ Value::String(_)) => {
            let previous = single.as_str().unwrap_or_default().to_string();
            *single = json!([previous, iri]);
        }
        _ => {
            object.insert("type".to_string(), json!([iri]));
        }
    }
}

fn strip_reference_fields(object: &mut serde_json::Map<String, Value>) {
    let is_reference = |value: &Value| {
        value.get("id").is_some()
            || value
                .as_array()
                .is_some_and(|a| a.iter().all(|v| v.get("id").is_some()) && !a.is_empty())
    };
    let keys: Vec<String> = object
        .iter()
        .filter(|(k, v)| *k != "alternativeFor" && is_reference(v))
        .map(|(k, _)| k.clone())
        .collect();
    for key in keys {
        object.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ambiguity::AmbiguityReading;

    fn modal_ambiguity() -> Ambiguity {
        Ambiguity {
            kind: AmbiguityKind::ModalForce,
            node_id: "inst:act_1".to_string(),
            readings: vec![
                AmbiguityReading {
                    name: "obligation".to_string(),
                    formalization: None,
                },
                AmbiguityReading {
                    name: "expectation".to_string(),
                    formalization: None,
                },
                AmbiguityReading {
                    name: "recommendation".to_string(),
                    formalization: None,
                },
            ],
            default_reading: "obligation".to_string(),
            confidence: 0.7,
            signals: vec![],
            constraint: None,
            span_text: Some("The doctor should allocate resources".to_string()),
        }
    }

    fn act_node() -> Value {
        json!({
            "id": "inst:act_1",
            "type": ["cco:Act"],
            "label": "allocate",
            "modality": "recommendation",
            "actualityStatus": "Prescribed",
            "has_agent": { "id": "inst:doctor" }
        })
    }

    #[test]
    fn builds_one_node_per_non_default_reading() {
        let graph = vec![act_node()];
        let nodes = AlternativeGraphBuilder::new().build(&modal_ambiguity(), &graph, 1);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["id"], "inst:act_1_alt1");
        assert_eq!(nodes[1]["id"], "inst:act_1_alt2");
        for node in &nodes {
            let types: Vec<&str> = node["type"]
                .as_array()
                .unwrap()
                .iter()
                .map(|t| t.as_str().unwrap())
                .collect();
            assert!(types.contains(&"tagteam:AlternativeNode"));
            assert_eq!(node["alternativeFor"]["id"], "inst:act_1");
            assert_eq!(node["sourceAmbiguity"], "modal_force");
        }
        // Distinct modality/actuality per reading.
        assert_eq!(nodes[0]["modality"], "expectation");
        assert_eq!(nodes[0]["actualityStatus"], "Hypothetical");
        assert_eq!(nodes[1]["modality"], "recommendation");
        assert_eq!(nodes[1]["actualityStatus"], "Prescribed");
    }

    #[test]
    fn plausibility_shares_the_remainder() {
        let graph = vec![act_node()];
        let nodes = AlternativeGraphBuilder::new().build(&modal_ambiguity(), &graph, 1);
        for node in &nodes {
            let p = node["plausibility"].as_f64().unwrap();
            assert!((0.05..=0.95).contains(&p));
            // (1 - 0.7) / 2
            assert!((p - 0.15).abs() < 1e-9);
        }
    }

    #[test]
    fn intensifier_boosts_matching_reading() {
        let mut ambiguity = modal_ambiguity();
        ambiguity.span_text = Some("The doctor probably should allocate resources".to_string());
        let graph = vec![act_node()];
        let nodes = AlternativeGraphBuilder::new().build(&ambiguity, &graph, 1);
        // "probably" is epistemic: expectation gains 0.15, recommendation does not.
        let expectation = nodes[0]["plausibility"].as_f64().unwrap();
        let recommendation = nodes[1]["plausibility"].as_f64().unwrap();
        assert!((expectation - 0.30).abs() < 1e-9);
        assert!((recommendation - 0.15).abs() < 1e-9);
    }

    #[test]
    fn missing_source_node_yields_nothing() {
        let nodes = AlternativeGraphBuilder::new().build(&modal_ambiguity(), &[], 1);
        assert!(nodes.is_empty());
    }

    #[test]
    fn scope_reading_sets_formalization() {
        let ambiguity = Ambiguity {
            kind: AmbiguityKind::Scope,
            node_id: "inst:act_1".to_string(),
            readings: vec![
                AmbiguityReading {
                    name: "wide".to_string(),
                    formalization: Some("∀x(P(x) → ¬Q(x))".to_string()),
                },
                AmbiguityReading {
                    name: "narrow".to_string(),
                    formalization: Some("¬∀x(P(x) → Q(x))".to_string()),
                },
            ],
            default_reading: "wide".to_string(),
            confidence: 0.7,
            signals: vec![],
            constraint: None,
            span_text: None,
        };
        let graph = vec![act_node()];
        let nodes = AlternativeGraphBuilder::new().build(&ambiguity, &graph, 1);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0]["scope"], "narrow");
        assert_eq!(nodes[0]["formalization"], "¬∀x(P(x) → Q(x))");
    }

    #[test]
    fn metonymy_retypes_as_organization() {
        let graph = vec![json!({
            "id": "inst:house",
            "type": ["cco:Facility", "owl:NamedIndividual"],
            "label": "white house"
        })];
        let ambiguity = Ambiguity {
            kind: AmbiguityKind::Metonymy,
            node_id: "inst:house".to_string(),
            readings: vec![
                AmbiguityReading {
                    name: "location".to_string(),
                    formalization: None,
                },
                AmbiguityReading {
                    name: "organization".to_string(),
                    formalization: None,
                },
            ],
            default_reading: "location".to_string(),
            confidence: 0.6,
            signals: vec![],
            constraint: None,
            span_text: None,
        };
        let nodes = AlternativeGraphBuilder::new().build(&ambiguity, &graph, 1);
        assert_eq!(nodes.len(), 1);
        let types: Vec<&str> = nodes[0]["type"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t.as_str().unwrap())
            .collect();
        assert_eq!(types, vec!["cco:Organization", "bfo:Object", "tagteam:AlternativeNode"]);
        assert_eq!(nodes[0]["metonymyType"], "location_for_institution");
        assert_eq!(nodes[0]["literalType"], "cco:Artifact");
    }
}
