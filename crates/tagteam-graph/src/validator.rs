//! SHML pattern validation
//!
//! Eight named patterns run over the flat JSON-LD graph, each accumulating a
//! passed/total score. VIOLATION marks an ontologically impossible state,
//! WARNING an incomplete but valid one, INFO a suggestion. Strict mode
//! promotes warnings to violations for scoring and reporting. Validation
//! never throws; everything lands in the report.

use crate::suggest::find_similar;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tagteam_core::vocab;
use tracing::debug;

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Violation,
    Warning,
    Info,
}

/// The eight pattern identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternId {
    InformationStaircase,
    RolePattern,
    Designation,
    TemporalInterval,
    Measurement,
    SocioPrimal,
    DomainRange,
    Vocabulary,
}

impl PatternId {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternId::InformationStaircase => "INFORMATIONSTAIRCASE",
            PatternId::RolePattern => "ROLEPATTERN",
            PatternId::Designation => "DESIGNATION",
            PatternId::TemporalInterval => "TEMPORALINTERVAL",
            PatternId::Measurement => "MEASUREMENT",
            PatternId::SocioPrimal => "SOCIOPRIMAL",
            PatternId::DomainRange => "DOMAINRANGE",
            PatternId::Vocabulary => "VOCABULARY",
        }
    }

    const ALL: [PatternId; 8] = [
        PatternId::InformationStaircase,
        PatternId::RolePattern,
        PatternId::Designation,
        PatternId::TemporalInterval,
        PatternId::Measurement,
        PatternId::SocioPrimal,
        PatternId::DomainRange,
        PatternId::Vocabulary,
    ];
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub pattern: PatternId,
    pub node_id: Option<String>,
    pub message: String,
    pub suggestion: Option<String>,
}

/// Per-pattern pass statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternScore {
    pub passed: usize,
    pub total: usize,
}

impl PatternScore {
    /// `passed / total × 100`; full marks when nothing applied.
    #[must_use]
    pub fn score(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.passed as f64 / self.total as f64 * 100.0
        }
    }
}

/// The validation outcome for one graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
    pub scores: IndexMap<PatternId, PatternScore>,
    pub compliance_score: f64,
    pub strict: bool,
}

impl ValidationReport {
    #[must_use]
    pub fn violations(&self) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Violation)
            .collect()
    }

    #[must_use]
    pub fn warnings(&self) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .collect()
    }

    #[must_use]
    pub fn infos(&self) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Info)
            .collect()
    }

    #[must_use]
    pub fn is_conformant(&self) -> bool {
        self.violations().is_empty()
    }

    /// Human-readable per-pattern table plus totals.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::from("SHML validation\n");
        for (pattern, score) in &self.scores {
            out.push_str(&format!(
                "  {:<22} {:>3}/{:<3} ({:.0}%)\n",
                pattern.as_str(),
                score.passed,
                score.total,
                score.score()
            ));
        }
        out.push_str(&format!(
            "  violations: {}, warnings: {}, info: {}\n  compliance: {:.1}\n",
            self.violations().len(),
            self.warnings().len(),
            self.infos().len(),
            self.compliance_score
        ));
        out
    }
}

/// The eight-pattern validator.
#[derive(Debug, Default, Clone)]
pub struct ShmlValidator {
    pub strict: bool,
    pub verbose: bool,
}

impl ShmlValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate a flat graph.
    #[must_use]
    pub fn validate(&self, graph: &[Value]) -> ValidationReport {
        let mut run = Run::new(graph);
        run.information_staircase();
        run.role_pattern();
        run.designation();
        run.temporal_interval();
        run.measurement();
        run.socio_primal();
        run.domain_range();
        run.vocabulary();
        run.finish(self.strict)
    }
}

/// ICE-denoting local names for the staircase and domain checks.
static ICE_LOCALS: &[&str] = &[
    "InformationContentEntity",
    "ScarcityAssertion",
    "DirectiveContent",
    "DeonticContent",
    "DirectiveInformationContentEntity",
    "ValueAssertionEvent",
    "ContextAssessmentEvent",
];

static INDEPENDENT_CONTINUANT_LOCALS: &[&str] = &[
    "Person",
    "Organization",
    "GroupOfPersons",
    "Artifact",
    "Facility",
    "Agent",
    "Object",
    "BFO_0000004",
    "BFO_0000027",
    "BFO_0000040",
];

static AGENT_LOCALS: &[&str] = &["Person", "Organization", "GroupOfPersons", "Agent"];

static PROCESS_LOCALS: &[&str] = &["Act", "ActOfSurgery", "BFO_0000015"];

static TEMPORAL_LOCALS: &[&str] = &["BFO_0000008", "BFO_0000026"];

struct Run<'g> {
    graph: &'g [Value],
    index: HashMap<&'g str, &'g Value>,
    findings: Vec<Finding>,
    scores: IndexMap<PatternId, PatternScore>,
}

impl<'g> Run<'g> {
    fn new(graph: &'g [Value]) -> Self {
        let index = graph
            .iter()
            .filter_map(|n| n.get("id").and_then(Value::as_str).map(|id| (id, n)))
            .collect();
        let mut scores = IndexMap::new();
        for pattern in PatternId::ALL {
            scores.insert(pattern, PatternScore::default());
        }
        Self {
            graph,
            index,
            findings: Vec::new(),
            scores,
        }
    }

    fn check(
        &mut self,
        pattern: PatternId,
        ok: bool,
        severity: Severity,
        node_id: Option<&str>,
        message: impl Into<String>,
        suggestion: Option<String>,
    ) {
        let entry = self.scores.entry(pattern).or_default();
        entry.total += 1;
        if ok {
            entry.passed += 1;
        } else {
            self.findings.push(Finding {
                severity,
                pattern,
                node_id: node_id.map(str::to_string),
                message: message.into(),
                suggestion,
            });
        }
    }

    /// Pattern 1: ICE → IBE → literal text.
    fn information_staircase(&mut self) {
        for node in self.graph {
            let id = node_id(node);
            if has_any_local(node, ICE_LOCALS) {
                self.check(
                    PatternId::InformationStaircase,
                    node.get("is_concretized_by").is_some(),
                    Severity::Warning,
                    id,
                    "information content entity has no is_concretized_by",
                    None,
                );
            }
            if has_local(node, "InformationBearingEntity") {
                self.check(
                    PatternId::InformationStaircase,
                    node.get("has_text_value").is_some(),
                    Severity::Warning,
                    id,
                    "information bearer has no has_text_value",
                    None,
                );
                let concretizes_something = !references(node.get("concretizes")).is_empty()
                    || self.graph.iter().any(|other| {
                        references(other.get("is_concretized_by"))
                            .iter()
                            .any(|r| Some(r.as_str()) == id)
                    });
                self.check(
                    PatternId::InformationStaircase,
                    concretizes_something,
                    Severity::Warning,
                    id,
                    "information bearer concretizes nothing",
                    None,
                );
            }
        }
    }

    /// Pattern 2: roles have bearers and realizations.
    fn role_pattern(&mut self) {
        for node in self.graph {
            if !is_role_node(node) {
                continue;
            }
            let id = node_id(node);
            let bearer_iri = references(node.get("inheres_in")).into_iter().next();
            let inverse_bearer = id.and_then(|role_id| {
                self.graph
                    .iter()
                    .find(|other| {
                        references(other.get("is_bearer_of"))
                            .iter()
                            .any(|r| r == role_id)
                    })
                    .and_then(|n| n.get("id").and_then(Value::as_str))
                    .map(str::to_string)
            });
            let bearer = bearer_iri.clone().or(inverse_bearer);
            self.check(
                PatternId::RolePattern,
                bearer.is_some(),
                Severity::Violation,
                id,
                "role has no bearer",
                None,
            );
            self.check(
                PatternId::RolePattern,
                node.get("realized_in").is_some() || node.get("would_be_realized_in").is_some(),
                Severity::Warning,
                id,
                "role is never realized",
                None,
            );
            if let Some(bearer_node) = bearer.as_deref().and_then(|b| self.index.get(b)) {
                self.check(
                    PatternId::RolePattern,
                    has_any_local(bearer_node, INDEPENDENT_CONTINUANT_LOCALS),
                    Severity::Warning,
                    id,
                    "role bearer is not an independent continuant",
                    None,
                );
            }
        }
    }

    /// Pattern 3: designative content designates something.
    fn designation(&mut self) {
        for node in self.graph {
            let designative = has_local(node, "DesignativeInformationContentEntity")
                || has_local(node, "ComplexDesignator");
            if !designative {
                continue;
            }
            self.check(
                PatternId::Designation,
                node.get("designates").is_some() || node.get("is_designated_by").is_some(),
                Severity::Violation,
                node_id(node),
                "designative content designates nothing",
                None,
            );
        }
    }

    /// Pattern 4: temporal intervals are well-formed.
    fn temporal_interval(&mut self) {
        for node in self.graph {
            if !has_any_local(node, TEMPORAL_LOCALS) {
                continue;
            }
            let id = node_id(node);
            let start = node.get("has_start_time").and_then(Value::as_str);
            let end = node.get("has_end_time").and_then(Value::as_str);
            self.check(
                PatternId::TemporalInterval,
                start.is_some(),
                Severity::Warning,
                id,
                "temporal region has no has_start_time",
                None,
            );
            self.check(
                PatternId::TemporalInterval,
                end.is_some(),
                Severity::Warning,
                id,
                "temporal region has no has_end_time",
                None,
            );
            if let (Some(start), Some(end)) = (start, end) {
                self.check(
                    PatternId::TemporalInterval,
                    start <= end,
                    Severity::Violation,
                    id,
                    format!("interval start '{start}' is after end '{end}'"),
                    None,
                );
            }
        }
    }

    /// Pattern 5: quality measurements are complete.
    fn measurement(&mut self) {
        for node in self.graph {
            if !has_local(node, "QualityMeasurement") {
                continue;
            }
            let id = node_id(node);
            let measures_quality = !references(node.get("measures")).is_empty()
                || self.graph.iter().any(|other| {
                    references(other.get("is_measured_by"))
                        .iter()
                        .any(|r| Some(r.as_str()) == id)
                });
            self.check(
                PatternId::Measurement,
                measures_quality,
                Severity::Violation,
                id,
                "quality measurement is not linked to a quality",
                None,
            );
            self.check(
                PatternId::Measurement,
                node.get("has_measurement_value").is_some(),
                Severity::Violation,
                id,
                "quality measurement has no has_measurement_value",
                None,
            );
            self.check(
                PatternId::Measurement,
                node.get("uses_measurement_unit").is_some(),
                Severity::Violation,
                id,
                "quality measurement has no uses_measurement_unit",
                None,
            );
        }
    }

    /// Pattern 6: acts are temporally grounded and participated.
    fn socio_primal(&mut self) {
        for node in self.graph {
            if !has_local(node, "Act") {
                continue;
            }
            let id = node_id(node);
            self.check(
                PatternId::SocioPrimal,
                node.get("occurs_during").is_some() || node.get("has_start_time").is_some(),
                Severity::Warning,
                id,
                "act has no temporal grounding",
                None,
            );
            let participated = node.get("has_agent").is_some()
                || node.get("affects").is_some()
                || !references(node.get("has_participant")).is_empty();
            self.check(
                PatternId::SocioPrimal,
                participated,
                Severity::Warning,
                id,
                "act has no participants",
                None,
            );
        }
    }

    /// Pattern 7: predicate domain/range constraints.
    fn domain_range(&mut self) {
        for node in self.graph {
            let id = node_id(node);

            for target in self.resolved(node, "is_concretized_by") {
                self.check(
                    PatternId::DomainRange,
                    has_local(target, "InformationBearingEntity"),
                    Severity::Violation,
                    id,
                    "is_concretized_by target is not an information bearer",
                    None,
                );
            }
            for target in self.resolved(node, "is_bearer_of") {
                self.check(
                    PatternId::DomainRange,
                    is_role_node(target),
                    Severity::Violation,
                    id,
                    "is_bearer_of target is not a role",
                    None,
                );
            }
            for target in self.resolved(node, "is_part_of") {
                // Continuants participate in processes, they are not parts of them.
                self.check(
                    PatternId::DomainRange,
                    !has_any_local(target, PROCESS_LOCALS),
                    Severity::Violation,
                    id,
                    "is_part_of targets a process",
                    None,
                );
            }
            for target in self.resolved(node, "asserts") {
                self.check(
                    PatternId::DomainRange,
                    has_any_local(target, ICE_LOCALS),
                    Severity::Violation,
                    id,
                    "asserts target is not information content",
                    None,
                );
            }
            if node.get("has_agent").is_some() {
                self.check(
                    PatternId::DomainRange,
                    has_any_local(node, PROCESS_LOCALS),
                    Severity::Violation,
                    id,
                    "has_agent on a non-process subject",
                    None,
                );
                for target in self.resolved(node, "has_agent") {
                    self.check(
                        PatternId::DomainRange,
                        has_any_local(target, AGENT_LOCALS),
                        Severity::Violation,
                        id,
                        "has_agent target is not an agent",
                        None,
                    );
                }
            }
            if node.get("prescribes").is_some() {
                self.check(
                    PatternId::DomainRange,
                    has_local(node, "DirectiveContent")
                        || has_local(node, "DeonticContent")
                        || has_local(node, "DirectiveInformationContentEntity"),
                    Severity::Warning,
                    id,
                    "prescribes on non-directive content",
                    None,
                );
                for target in self.resolved(node, "prescribes") {
                    self.check(
                        PatternId::DomainRange,
                        has_any_local(target, PROCESS_LOCALS),
                        Severity::Warning,
                        id,
                        "prescribes target is not a process",
                        None,
                    );
                }
            }
            if node.get("inheres_in").is_some() {
                self.check(
                    PatternId::DomainRange,
                    is_role_node(node) || has_local(node, "BFO_0000019"),
                    Severity::Violation,
                    id,
                    "inheres_in on a node that is neither role nor quality",
                    None,
                );
                for target in self.resolved(node, "inheres_in") {
                    self.check(
                        PatternId::DomainRange,
                        has_any_local(target, INDEPENDENT_CONTINUANT_LOCALS),
                        Severity::Violation,
                        id,
                        "inheres_in target is not an independent continuant",
                        None,
                    );
                }
            }
        }
    }

    /// Pattern 8: all types and predicates are known vocabulary.
    fn vocabulary(&mut self) {
        for node in self.graph {
            let id = node_id(node);
            for type_iri in type_list(node) {
                let known = vocab::is_known_class(&type_iri);
                let suggestion = if known {
                    None
                } else {
                    find_similar(
                        vocab::local_name(&type_iri),
                        vocab::KNOWN_CLASSES.iter().copied(),
                        3,
                    )
                    .map(str::to_string)
                };
                self.check(
                    PatternId::Vocabulary,
                    known,
                    Severity::Warning,
                    id,
                    format!("unknown class '{type_iri}'"),
                    suggestion,
                );
            }
            let Some(object) = node.as_object() else { continue };
            for key in object.keys() {
                if key == "id" || key.starts_with('@') {
                    continue;
                }
                let known = vocab::is_known_predicate(key);
                let suggestion = if known {
                    None
                } else {
                    find_similar(
                        vocab::local_name(key),
                        vocab::KNOWN_PREDICATES.iter().copied(),
                        3,
                    )
                    .map(str::to_string)
                };
                self.check(
                    PatternId::Vocabulary,
                    known,
                    Severity::Warning,
                    id,
                    format!("unknown predicate '{key}'"),
                    suggestion,
                );
            }
        }
    }

    fn resolved(&self, node: &Value, key: &str) -> Vec<&'g Value> {
        references(node.get(key))
            .into_iter()
            .filter_map(|iri| self.index.get(iri.as_str()).copied())
            .collect()
    }

    fn finish(mut self, strict: bool) -> ValidationReport {
        if strict {
            for finding in &mut self.findings {
                if finding.severity == Severity::Warning {
                    finding.severity = Severity::Violation;
                }
            }
        }
        let scored: Vec<f64> = self
            .scores
            .values()
            .filter(|s| s.total > 0)
            .map(PatternScore::score)
            .collect();
        let mean = if scored.is_empty() {
            100.0
        } else {
            scored.iter().sum::<f64>() / scored.len() as f64
        };
        let violations = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Violation)
            .count();
        let warnings = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count();
        let compliance_score =
            (mean - 10.0 * violations as f64 - 2.0 * warnings as f64).clamp(0.0, 100.0);
        debug!(compliance_score, violations, warnings, "validation finished");
        ValidationReport {
            findings: self.findings,
            scores: self.scores,
            compliance_score,
            strict,
        }
    }
}

fn node_id(node: &Value) -> Option<&str> {
    node.get("id").and_then(Value::as_str)
}

fn type_list(node: &Value) -> Vec<String> {
    match node.get("type") {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn has_local(node: &Value, local: &str) -> bool {
    type_list(node).iter().any(|t| vocab::local_name(t) == local)
}

fn has_any_local(node: &Value, locals: &[&str]) -> bool {
    type_list(node)
        .iter()
        .any(|t| locals.contains(&vocab::local_name(t)))
}

fn is_role_node(node: &Value) -> bool {
    type_list(node).iter().any(|t| {
        let local = vocab::local_name(t);
        local == "BFO_0000023" || local.ends_with("Role")
    })
}

/// Reference IRIs from a `{ "id": x }` value or a sequence of them.
fn references(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Object(map)) => map
            .get("id")
            .and_then(Value::as_str)
            .map(|s| vec![s.to_string()])
            .unwrap_or_default(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.get("id").and_then(Value::as_str))
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(graph: Vec<Value>) -> ValidationReport {
        ShmlValidator::new().validate(&graph)
    }

    #[test]
    fn role_without_bearer_is_a_violation() {
        let report = validate(vec![json!({
            "id": "inst:Agent_Role_deadbeef",
            "type": ["cco:AgentRole", "bfo:BFO_0000023"],
            "label": "Agent Role",
            "realized_in": { "id": "inst:act_1" }
        })]);
        let violation = report
            .violations()
            .into_iter()
            .find(|f| f.pattern == PatternId::RolePattern)
            .expect("expected ROLEPATTERN violation");
        assert!(violation.message.contains("no bearer"));
    }

    #[test]
    fn role_with_inverse_bearer_passes() {
        let report = validate(vec![
            json!({
                "id": "inst:Agent_Role_deadbeef",
                "type": ["cco:AgentRole"],
                "realized_in": { "id": "inst:act_1" }
            }),
            json!({
                "id": "inst:doctor",
                "type": ["cco:Person", "owl:NamedIndividual"],
                "is_bearer_of": { "id": "inst:Agent_Role_deadbeef" }
            }),
        ]);
        assert!(report
            .violations()
            .iter()
            .all(|f| f.pattern != PatternId::RolePattern));
    }

    #[test]
    fn is_part_of_process_is_a_violation() {
        let report = validate(vec![
            json!({
                "id": "inst:wheel",
                "type": ["cco:Artifact"],
                "is_part_of": { "id": "inst:act_1" }
            }),
            json!({ "id": "inst:act_1", "type": ["cco:Act"] }),
        ]);
        let violation = report
            .violations()
            .into_iter()
            .find(|f| f.pattern == PatternId::DomainRange)
            .expect("expected DOMAINRANGE violation");
        assert!(violation.message.contains("is_part_of"));
    }

    #[test]
    fn has_agent_on_non_process_is_a_violation() {
        let report = validate(vec![
            json!({
                "id": "inst:thing",
                "type": ["cco:Artifact"],
                "has_agent": { "id": "inst:doctor" }
            }),
            json!({ "id": "inst:doctor", "type": ["cco:Person"] }),
        ]);
        assert!(report
            .violations()
            .iter()
            .any(|f| f.pattern == PatternId::DomainRange
                && f.message.contains("non-process")));
    }

    #[test]
    fn has_agent_range_must_be_agentive() {
        let report = validate(vec![
            json!({
                "id": "inst:act_1",
                "type": ["cco:Act"],
                "has_agent": { "id": "inst:rock" }
            }),
            json!({ "id": "inst:rock", "type": ["bfo:BFO_0000040"] }),
        ]);
        assert!(report
            .violations()
            .iter()
            .any(|f| f.message.contains("not an agent")));
    }

    #[test]
    fn ice_without_bearer_is_a_warning() {
        let report = validate(vec![json!({
            "id": "inst:ScarcityAssertion_abc",
            "type": ["tagteam:ScarcityAssertion"],
            "is_about": { "id": "inst:x" }
        })]);
        assert!(report
            .warnings()
            .iter()
            .any(|f| f.pattern == PatternId::InformationStaircase));
        assert!(report.violations().is_empty());
    }

    #[test]
    fn strict_mode_promotes_warnings() {
        let graph = vec![json!({
            "id": "inst:ScarcityAssertion_abc",
            "type": ["tagteam:ScarcityAssertion"]
        })];
        let report = ShmlValidator::new().strict(true).validate(&graph);
        assert!(!report.violations().is_empty());
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn unknown_vocabulary_gets_a_suggestion() {
        let report = validate(vec![json!({
            "id": "inst:x",
            "type": ["cco:Persun"],
            "label": "typo"
        })]);
        let finding = report
            .warnings()
            .into_iter()
            .find(|f| f.pattern == PatternId::Vocabulary)
            .expect("expected VOCABULARY warning");
        assert_eq!(finding.suggestion.as_deref(), Some("Person"));
    }

    #[test]
    fn temporal_interval_ordering() {
        let report = validate(vec![json!({
            "id": "inst:interval",
            "type": ["bfo:BFO_0000026"],
            "has_start_time": "2024-06-01T00:00:00Z",
            "has_end_time": "2024-05-01T00:00:00Z"
        })]);
        assert!(report
            .violations()
            .iter()
            .any(|f| f.pattern == PatternId::TemporalInterval));
    }

    #[test]
    fn measurement_requires_all_three_links() {
        let report = validate(vec![json!({
            "id": "inst:m1",
            "type": ["tagteam:QualityMeasurement"],
            "has_measurement_value": 37.5
        })]);
        let violations: Vec<_> = report
            .violations()
            .into_iter()
            .filter(|f| f.pattern == PatternId::Measurement)
            .collect();
        // Missing quality link and unit, value present.
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn act_without_participants_warns() {
        let report = validate(vec![json!({
            "id": "inst:act_1",
            "type": ["cco:Act"],
            "label": "allocate"
        })]);
        let socio: Vec<_> = report
            .warnings()
            .into_iter()
            .filter(|f| f.pattern == PatternId::SocioPrimal)
            .collect();
        assert_eq!(socio.len(), 2);
    }

    #[test]
    fn clean_graph_scores_high() {
        let report = validate(vec![
            json!({
                "id": "inst:act_1",
                "type": ["cco:Act"],
                "label": "allocate",
                "has_agent": { "id": "inst:doctor" },
                "occurs_during": { "id": "inst:interval" }
            }),
            json!({
                "id": "inst:doctor",
                "type": ["cco:Person", "owl:NamedIndividual"],
                "label": "doctor"
            }),
            json!({
                "id": "inst:interval",
                "type": ["bfo:BFO_0000026"],
                "label": "today",
                "has_start_time": "2024-05-01T00:00:00Z",
                "has_end_time": "2024-05-02T00:00:00Z"
            }),
        ]);
        assert!(report.violations().is_empty());
        assert!(report.compliance_score > 90.0);
        assert!(report.summary().contains("DOMAINRANGE"));
    }

    #[test]
    fn compliance_penalises_violations() {
        let clean = validate(vec![json!({
            "id": "inst:doctor",
            "type": ["cco:Person"],
            "label": "doctor"
        })]);
        let broken = validate(vec![json!({
            "id": "inst:Agent_Role_deadbeef",
            "type": ["cco:AgentRole"],
            "label": "orphan role"
        })]);
        assert!(broken.compliance_score < clean.compliance_score);
    }
}
