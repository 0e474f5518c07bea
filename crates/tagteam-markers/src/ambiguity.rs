//! Ambiguity detection
//!
//! Scans extracted entities and acts for five ambiguity classes:
//! nominalization (noun category), selectional violation, modal force,
//! quantifier/negation scope, and location-for-institution metonymy. Each
//! finding names its readings, a default reading, and the signals that led
//! to it; the alternative-graph builder turns the non-default readings into
//! variant nodes.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tagteam_core::{vocab, Act, DiscourseReferent};
use tracing::debug;

static NOMINALIZATION_SUFFIXES: &[&str] =
    &["tion", "ment", "sis", "ance", "ence", "ity", "ness", "ing"];

/// Nominalizations that are overwhelmingly continuant-denoting.
static CONTINUANT_DOMINANT: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "building", "painting", "meeting", "drawing", "offering", "clothing", "ceiling",
        "feeling", "opening", "equipment", "government", "department",
    ]
    .into_iter()
    .collect()
});

static INTENTIONAL_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["hire", "fire", "decide", "promise", "agree", "refuse", "plan", "want", "intend", "choose"]
        .into_iter()
        .collect()
});

static PHYSICAL_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["lift", "carry", "move", "push", "pull", "throw", "drop"]
        .into_iter()
        .collect()
});

static COMMUNICATION_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["announce", "say", "declare", "decide", "report", "state", "confirm", "deny"]
        .into_iter()
        .collect()
});

static LOCATION_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "house", "city", "country", "building", "capital", "headquarters", "office", "town",
        "state", "nation", "palace", "campus",
    ]
    .into_iter()
    .collect()
});

static ABSTRACT_TYPES: &[&str] = &[
    "BFO_0000019",
    "BFO_0000016",
    "BFO_0000031",
    "InformationContentEntity",
    "BFO_0000015",
];

/// Ambiguity classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityKind {
    NounCategory,
    Selectional,
    ModalForce,
    Scope,
    Metonymy,
}

impl AmbiguityKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AmbiguityKind::NounCategory => "noun_category",
            AmbiguityKind::Selectional => "selectional",
            AmbiguityKind::ModalForce => "modal_force",
            AmbiguityKind::Scope => "scope",
            AmbiguityKind::Metonymy => "metonymy",
        }
    }
}

/// One candidate reading of an ambiguous node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbiguityReading {
    pub name: String,
    /// First-order-logic rendering for scope readings.
    pub formalization: Option<String>,
}

impl AmbiguityReading {
    fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            formalization: None,
        }
    }

    fn formal(name: &str, formalization: &str) -> Self {
        Self {
            name: name.to_string(),
            formalization: Some(formalization.to_string()),
        }
    }
}

/// One detected ambiguity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ambiguity {
    pub kind: AmbiguityKind,
    /// Graph node the ambiguity attaches to.
    pub node_id: String,
    pub readings: Vec<AmbiguityReading>,
    pub default_reading: String,
    pub confidence: f64,
    pub signals: Vec<String>,
    /// Ontology constraint violated, for selectional findings.
    pub constraint: Option<String>,
    /// Clause text used for intensifier-sensitive plausibility.
    pub span_text: Option<String>,
}

/// Inputs to one detection pass.
#[derive(Debug)]
pub struct AmbiguityContext<'a> {
    pub text: &'a str,
    pub referents: &'a [DiscourseReferent],
    pub acts: &'a [Act],
    /// Act id → surface modal marker.
    pub modal_markers: &'a IndexMap<String, String>,
    /// Tier 2 id → specific type IRI.
    pub bearer_types: &'a IndexMap<String, String>,
    /// Tier 2 id → canonical label.
    pub bearer_labels: &'a IndexMap<String, String>,
}

/// Five-class ambiguity scanner.
#[derive(Debug, Default, Clone)]
pub struct AmbiguityDetector;

impl AmbiguityDetector {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Detect all ambiguities, in class order then text order.
    #[must_use]
    pub fn detect(&self, ctx: &AmbiguityContext<'_>) -> Vec<Ambiguity> {
        let mut findings = Vec::new();
        self.detect_noun_category(ctx, &mut findings);
        self.detect_selectional(ctx, &mut findings);
        self.detect_modal_force(ctx, &mut findings);
        self.detect_scope(ctx, &mut findings);
        self.detect_metonymy(ctx, &mut findings);
        debug!(count = findings.len(), "ambiguity scan complete");
        findings
    }

    fn detect_noun_category(&self, ctx: &AmbiguityContext<'_>, findings: &mut Vec<Ambiguity>) {
        for referent in ctx.referents {
            let head = head_word(&referent.label);
            if CONTINUANT_DOMINANT.contains(head.as_str()) {
                continue;
            }
            let suffixed = NOMINALIZATION_SUFFIXES
                .iter()
                .any(|s| head.ends_with(s) && head.len() >= s.len() + 3);
            if !suffixed {
                continue;
            }
            let mut signals = Vec::new();
            let after = &ctx.text[referent.end.min(ctx.text.len())..];
            let of_complement = after.trim_start().starts_with("of ");
            if of_complement {
                signals.push("of_complement".to_string());
            }
            let subject_of_intentional = ctx.acts.iter().any(|a| {
                a.has_agent.as_deref() == referent.is_about.as_deref()
                    && referent.is_about.is_some()
                    && INTENTIONAL_VERBS.contains(a.lemma.as_str())
            });
            if subject_of_intentional {
                signals.push("subject_of_intentional_act".to_string());
            }
            let default_reading = if of_complement { "process" } else { "continuant" };
            findings.push(Ambiguity {
                kind: AmbiguityKind::NounCategory,
                node_id: referent
                    .is_about
                    .clone()
                    .unwrap_or_else(|| referent.id.clone()),
                readings: vec![
                    AmbiguityReading::plain("process"),
                    AmbiguityReading::plain("continuant"),
                ],
                default_reading: default_reading.to_string(),
                confidence: 0.7,
                signals,
                constraint: None,
                span_text: Some(referent.label.clone()),
            });
        }
    }

    fn detect_selectional(&self, ctx: &AmbiguityContext<'_>, findings: &mut Vec<Ambiguity>) {
        for act in ctx.acts {
            let Some(agent) = &act.has_agent else { continue };
            let Some(agent_type) = ctx.bearer_types.get(agent) else {
                continue;
            };
            let agentive = vocab::is_agentive_type(agent_type);
            let abstract_subject = ABSTRACT_TYPES
                .iter()
                .any(|t| vocab::local_name(agent_type) == *t);

            let violated = if !agentive && INTENTIONAL_VERBS.contains(act.lemma.as_str()) {
                Some("has_agent range cco:Agent")
            } else if abstract_subject && PHYSICAL_VERBS.contains(act.lemma.as_str()) {
                Some("physical act requires a material participant")
            } else {
                None
            };
            let Some(constraint) = violated else { continue };
            findings.push(Ambiguity {
                kind: AmbiguityKind::Selectional,
                node_id: act.id.clone(),
                readings: vec![
                    AmbiguityReading::plain("literal"),
                    AmbiguityReading::plain("coerced_agent"),
                ],
                default_reading: "coerced_agent".to_string(),
                confidence: 0.85,
                signals: vec![format!("verb:{}", act.lemma)],
                constraint: Some(constraint.to_string()),
                span_text: None,
            });
        }
    }

    fn detect_modal_force(&self, ctx: &AmbiguityContext<'_>, findings: &mut Vec<Ambiguity>) {
        for act in ctx.acts {
            let Some(marker) = ctx.modal_markers.get(&act.id) else {
                continue;
            };
            let readings: Vec<&str> = match marker.as_str() {
                "should" => vec!["obligation", "expectation", "recommendation"],
                "must" | "shall" => vec!["obligation", "inference"],
                "may" => vec!["permission", "possibility"],
                "might" => vec!["possibility", "inference"],
                "could" => vec!["possibility", "ability"],
                _ => continue,
            };
            let mut signals = Vec::new();
            // Perfect aspect under the modal defaults to the epistemic reading.
            let perfect = act.tag == "VBN";
            if perfect {
                signals.push("perfect_aspect".to_string());
            }
            let agent_subject = act
                .has_agent
                .as_ref()
                .and_then(|a| ctx.bearer_types.get(a))
                .is_some_and(|t| vocab::is_agentive_type(t));
            if agent_subject {
                signals.push("agent_subject".to_string());
            }
            if act.is_negated {
                signals.push("negation_under_modal".to_string());
            }
            let default_reading = if perfect {
                match marker.as_str() {
                    "must" | "might" => "inference",
                    "may" | "could" => "possibility",
                    _ => "expectation",
                }
            } else if agent_subject {
                readings[0]
            } else {
                match marker.as_str() {
                    "should" => "expectation",
                    "must" | "shall" => "obligation",
                    "may" | "might" | "could" => "possibility",
                    _ => readings[0],
                }
            };
            findings.push(Ambiguity {
                kind: AmbiguityKind::ModalForce,
                node_id: act.id.clone(),
                readings: readings.into_iter().map(AmbiguityReading::plain).collect(),
                default_reading: default_reading.to_string(),
                confidence: 0.7,
                signals,
                constraint: None,
                span_text: Some(ctx.text.to_string()),
            });
        }
    }

    fn detect_scope(&self, ctx: &AmbiguityContext<'_>, findings: &mut Vec<Ambiguity>) {
        let Some(anchor) = ctx.acts.first().map(|a| a.id.clone()) else {
            return;
        };
        let lower = ctx.text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_ascii_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .collect();
        let position = |w: &str| words.iter().position(|x| *x == w);

        // Universal quantifier interacting with negation.
        let universal = position("all").or_else(|| position("every"));
        let negation = position("not").or_else(|| position("n't"));
        if let (Some(u), Some(n)) = (universal, negation) {
            let pattern = if n < u { "not_all" } else { "all_not" };
            findings.push(Ambiguity {
                kind: AmbiguityKind::Scope,
                node_id: anchor.clone(),
                readings: vec![
                    AmbiguityReading::formal("wide", "∀x(P(x) → ¬Q(x))"),
                    AmbiguityReading::formal("narrow", "¬∀x(P(x) → Q(x))"),
                ],
                default_reading: if n < u { "narrow" } else { "wide" }.to_string(),
                confidence: 0.7,
                signals: vec![pattern.to_string()],
                constraint: None,
                span_text: Some(ctx.text.to_string()),
            });
        }

        // Two interacting quantifiers.
        if let Some(u) = universal {
            if position("some").is_some_and(|e| e > u) {
                findings.push(Ambiguity {
                    kind: AmbiguityKind::Scope,
                    node_id: anchor.clone(),
                    readings: vec![
                        AmbiguityReading::formal("subject_wide", "∀x∃y R(x, y)"),
                        AmbiguityReading::formal("object_wide", "∃y∀x R(x, y)"),
                    ],
                    default_reading: "subject_wide".to_string(),
                    confidence: 0.65,
                    signals: vec!["double_quantifier".to_string()],
                    constraint: None,
                    span_text: Some(ctx.text.to_string()),
                });
            }
        }

        // Modal directly negated.
        for modal in ["may", "must", "might"] {
            if lower.contains(&format!("{modal} not")) {
                findings.push(Ambiguity {
                    kind: AmbiguityKind::Scope,
                    node_id: anchor.clone(),
                    readings: vec![
                        AmbiguityReading::plain("permission_denied"),
                        AmbiguityReading::plain("possibility_denied"),
                    ],
                    default_reading: if modal == "may" {
                        "permission_denied"
                    } else {
                        "possibility_denied"
                    }
                    .to_string(),
                    confidence: 0.7,
                    signals: vec![format!("{modal}_not")],
                    constraint: None,
                    span_text: Some(ctx.text.to_string()),
                });
            }
        }
    }

    fn detect_metonymy(&self, ctx: &AmbiguityContext<'_>, findings: &mut Vec<Ambiguity>) {
        for act in ctx.acts {
            let Some(agent) = &act.has_agent else { continue };
            if !COMMUNICATION_VERBS.contains(act.lemma.as_str())
                && !INTENTIONAL_VERBS.contains(act.lemma.as_str())
            {
                continue;
            }
            let Some(label) = ctx.bearer_labels.get(agent) else {
                continue;
            };
            let head = head_word(label);
            if !LOCATION_NOUNS.contains(head.as_str()) {
                continue;
            }
            findings.push(Ambiguity {
                kind: AmbiguityKind::Metonymy,
                node_id: agent.clone(),
                readings: vec![
                    AmbiguityReading::plain("location"),
                    AmbiguityReading::plain("organization"),
                ],
                default_reading: "location".to_string(),
                confidence: 0.6,
                signals: vec![format!("location_as_agent:{head}")],
                constraint: None,
                span_text: Some(label.clone()),
            });
        }
    }
}

fn head_word(label: &str) -> String {
    label
        .split_whitespace()
        .last()
        .unwrap_or(label)
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagteam_core::{ActPattern, ActualityStatus, Definiteness, Modality, ReferentialStatus};

    fn act(id: &str, lemma: &str) -> Act {
        Act {
            id: id.to_string(),
            label: lemma.to_string(),
            verb: lemma.to_string(),
            lemma: lemma.to_string(),
            tag: "VB".to_string(),
            pattern: ActPattern::Regular,
            is_passive: false,
            is_negated: false,
            is_copular: false,
            modality: None,
            actuality: ActualityStatus::Actual,
            has_agent: None,
            affects: None,
            has_participant: Vec::new(),
            occurs_during: None,
        }
    }

    fn empty_maps() -> (IndexMap<String, String>, IndexMap<String, String>, IndexMap<String, String>) {
        (IndexMap::new(), IndexMap::new(), IndexMap::new())
    }

    #[test]
    fn modal_force_should() {
        let mut a = act("inst:act_1", "allocate");
        a.modality = Some(Modality::Recommendation);
        a.has_agent = Some("inst:doctor".to_string());
        let (mut markers, mut types, labels) = empty_maps();
        markers.insert("inst:act_1".to_string(), "should".to_string());
        types.insert("inst:doctor".to_string(), vocab::CCO_PERSON.to_string());

        let detector = AmbiguityDetector::new();
        let findings = detector.detect(&AmbiguityContext {
            text: "The doctor should allocate resources",
            referents: &[],
            acts: &[a],
            modal_markers: &markers,
            bearer_types: &types,
            bearer_labels: &labels,
        });
        let modal: Vec<&Ambiguity> = findings
            .iter()
            .filter(|f| f.kind == AmbiguityKind::ModalForce)
            .collect();
        assert_eq!(modal.len(), 1);
        let names: Vec<&str> = modal[0].readings.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["obligation", "expectation", "recommendation"]);
        // Agent subject defaults the deontic reading.
        assert_eq!(modal[0].default_reading, "obligation");
        assert!(modal[0].signals.contains(&"agent_subject".to_string()));
    }

    #[test]
    fn selectional_violation_inanimate_agent() {
        let mut a = act("inst:act_1", "hire");
        a.has_agent = Some("inst:table".to_string());
        let (markers, mut types, labels) = empty_maps();
        types.insert("inst:table".to_string(), vocab::CCO_ARTIFACT.to_string());

        let findings = AmbiguityDetector::new().detect(&AmbiguityContext {
            text: "The table hired a contractor",
            referents: &[],
            acts: &[a],
            modal_markers: &markers,
            bearer_types: &types,
            bearer_labels: &labels,
        });
        let selectional: Vec<&Ambiguity> = findings
            .iter()
            .filter(|f| f.kind == AmbiguityKind::Selectional)
            .collect();
        assert_eq!(selectional.len(), 1);
        assert_eq!(selectional[0].confidence, 0.85);
        assert!(selectional[0].constraint.as_deref().unwrap().contains("cco:Agent"));
    }

    #[test]
    fn noun_category_nominalization() {
        let mut referent = DiscourseReferent::new(
            "inst:ref_0_14".to_string(),
            "the inspection".to_string(),
            0,
            14,
            Definiteness::Definite,
            ReferentialStatus::Introduced,
            vocab::BFO_PROCESS.to_string(),
        );
        referent.is_about = Some("inst:x".to_string());
        let (markers, types, labels) = empty_maps();
        let findings = AmbiguityDetector::new().detect(&AmbiguityContext {
            text: "the inspection of the site",
            referents: &[referent],
            acts: &[],
            modal_markers: &markers,
            bearer_types: &types,
            bearer_labels: &labels,
        });
        let nominal: Vec<&Ambiguity> = findings
            .iter()
            .filter(|f| f.kind == AmbiguityKind::NounCategory)
            .collect();
        assert_eq!(nominal.len(), 1);
        assert_eq!(nominal[0].default_reading, "process");
        assert!(nominal[0].signals.contains(&"of_complement".to_string()));
    }

    #[test]
    fn blocklisted_nominalizations_are_silent() {
        let referent = DiscourseReferent::new(
            "inst:ref_0_12".to_string(),
            "the building".to_string(),
            0,
            12,
            Definiteness::Definite,
            ReferentialStatus::Introduced,
            vocab::CCO_FACILITY.to_string(),
        );
        let (markers, types, labels) = empty_maps();
        let findings = AmbiguityDetector::new().detect(&AmbiguityContext {
            text: "the building",
            referents: &[referent],
            acts: &[],
            modal_markers: &markers,
            bearer_types: &types,
            bearer_labels: &labels,
        });
        assert!(findings.iter().all(|f| f.kind != AmbiguityKind::NounCategory));
    }

    #[test]
    fn scope_all_not() {
        let a = act("inst:act_1", "pass");
        let (markers, types, labels) = empty_maps();
        let findings = AmbiguityDetector::new().detect(&AmbiguityContext {
            text: "All patients did not recover",
            referents: &[],
            acts: &[a],
            modal_markers: &markers,
            bearer_types: &types,
            bearer_labels: &labels,
        });
        let scope: Vec<&Ambiguity> = findings
            .iter()
            .filter(|f| f.kind == AmbiguityKind::Scope)
            .collect();
        assert_eq!(scope.len(), 1);
        assert_eq!(scope[0].default_reading, "wide");
        assert!(scope[0].readings.iter().all(|r| r.formalization.is_some()));
    }

    #[test]
    fn scope_may_not() {
        let a = act("inst:act_1", "enter");
        let (markers, types, labels) = empty_maps();
        let findings = AmbiguityDetector::new().detect(&AmbiguityContext {
            text: "Visitors may not enter",
            referents: &[],
            acts: &[a],
            modal_markers: &markers,
            bearer_types: &types,
            bearer_labels: &labels,
        });
        let scope: Vec<&Ambiguity> = findings
            .iter()
            .filter(|f| f.kind == AmbiguityKind::Scope)
            .collect();
        assert_eq!(scope[0].default_reading, "permission_denied");
    }

    #[test]
    fn metonymy_location_agent() {
        let mut a = act("inst:act_1", "announce");
        a.has_agent = Some("inst:house".to_string());
        let (markers, mut types, mut labels) = empty_maps();
        types.insert("inst:house".to_string(), vocab::CCO_FACILITY.to_string());
        labels.insert("inst:house".to_string(), "white house".to_string());

        let findings = AmbiguityDetector::new().detect(&AmbiguityContext {
            text: "The White House announced the decision",
            referents: &[],
            acts: &[a],
            modal_markers: &markers,
            bearer_types: &types,
            bearer_labels: &labels,
        });
        let metonymy: Vec<&Ambiguity> = findings
            .iter()
            .filter(|f| f.kind == AmbiguityKind::Metonymy)
            .collect();
        assert_eq!(metonymy.len(), 1);
        assert_eq!(metonymy[0].node_id, "inst:house");
        assert_eq!(metonymy[0].default_reading, "location");
    }
}
