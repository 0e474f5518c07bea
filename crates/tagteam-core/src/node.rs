//! Graph node data model
//!
//! The emitted knowledge graph is a flat list of nodes. Dynamic
//! "sometimes-present" properties of the source format are modelled as tagged
//! [`Node`] variants with option-valued fields; the JSON-LD serializer maps
//! each variant onto the fixed `@context`.
//!
//! Two tiers of entities exist side by side: [`DiscourseReferent`] (Tier 1,
//! what the text says) and [`RealWorldEntity`] (Tier 2, what the text is
//! about), linked by `is_about`. Cyclic relations (ICE ↔ IBE, Role ↔ bearer)
//! are stored as two unidirectional references, the inverse edge added only
//! after both sides exist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Definiteness of a discourse referent's introducing determiner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Definiteness {
    Definite,
    Indefinite,
    Anaphoric,
    Interrogative,
    InterrogativeSelective,
}

impl Definiteness {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Definiteness::Definite => "definite",
            Definiteness::Indefinite => "indefinite",
            Definiteness::Anaphoric => "anaphoric",
            Definiteness::Interrogative => "interrogative",
            Definiteness::InterrogativeSelective => "interrogative_selective",
        }
    }
}

/// How a referent enters the discourse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferentialStatus {
    Introduced,
    Presupposed,
    Anaphoric,
    Hypothetical,
    Interrogative,
}

impl ReferentialStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferentialStatus::Introduced => "introduced",
            ReferentialStatus::Presupposed => "presupposed",
            ReferentialStatus::Anaphoric => "anaphoric",
            ReferentialStatus::Hypothetical => "hypothetical",
            ReferentialStatus::Interrogative => "interrogative",
        }
    }
}

/// Calendar/clock units recognised on temporal noun phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TemporalUnit {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalUnit::Second => "second",
            TemporalUnit::Minute => "minute",
            TemporalUnit::Hour => "hour",
            TemporalUnit::Day => "day",
            TemporalUnit::Week => "week",
            TemporalUnit::Month => "month",
            TemporalUnit::Year => "year",
        }
    }

    /// Parse a singular or plural unit word.
    #[must_use]
    pub fn parse_word(word: &str) -> Option<Self> {
        match word.to_lowercase().trim_end_matches('s') {
            "second" => Some(TemporalUnit::Second),
            "minute" => Some(TemporalUnit::Minute),
            "hour" => Some(TemporalUnit::Hour),
            "day" => Some(TemporalUnit::Day),
            "week" => Some(TemporalUnit::Week),
            "month" => Some(TemporalUnit::Month),
            "year" => Some(TemporalUnit::Year),
            _ => None,
        }
    }
}

/// Coordination flavor for conjunct referents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinationType {
    /// "X and Y"
    Conjunction,
    /// "X or Y"
    Disjunction,
}

impl CoordinationType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinationType::Conjunction => "conjunction",
            CoordinationType::Disjunction => "disjunction",
        }
    }
}

/// Pronoun subclasses tracked on referents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PronounType {
    Personal,
    Possessive,
    Demonstrative,
    Interrogative,
}

impl PronounType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PronounType::Personal => "personal",
            PronounType::Possessive => "possessive",
            PronounType::Demonstrative => "demonstrative",
            PronounType::Interrogative => "interrogative",
        }
    }
}

/// Genericity reading of a subject noun phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenericityCategory {
    /// Generic/kind reference: "Dogs have fur"
    #[serde(rename = "GEN")]
    Gen,
    /// Instance reference: "The dog barked"
    #[serde(rename = "INST")]
    Inst,
    /// Universally quantified: "Every dog barks"
    #[serde(rename = "UNIV")]
    Univ,
    /// Ambiguous between readings
    #[serde(rename = "AMB")]
    Amb,
}

impl GenericityCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GenericityCategory::Gen => "GEN",
            GenericityCategory::Inst => "INST",
            GenericityCategory::Univ => "UNIV",
            GenericityCategory::Amb => "AMB",
        }
    }
}

/// A classified genericity reading with its evidence basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericityReading {
    pub category: GenericityCategory,
    /// In [0, 1].
    pub confidence: f64,
    /// Which signal produced the reading ("bare_plural", "determiner_the", ...).
    pub basis: String,
    /// Secondary reading for AMB and weak INST classifications.
    pub alternative: Option<GenericityAlternative>,
}

/// Secondary genericity reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericityAlternative {
    pub category: GenericityCategory,
    pub confidence: f64,
}

/// Modal flavor attached to an act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Obligation,
    Permission,
    Ability,
    Expectation,
    Possibility,
    Inference,
    Conditional,
    Habitual,
    Recommendation,
}

impl Modality {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Obligation => "obligation",
            Modality::Permission => "permission",
            Modality::Ability => "ability",
            Modality::Expectation => "expectation",
            Modality::Possibility => "possibility",
            Modality::Inference => "inference",
            Modality::Conditional => "conditional",
            Modality::Habitual => "habitual",
            Modality::Recommendation => "recommendation",
        }
    }
}

/// Whether the act happened, is required, planned, or merely possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActualityStatus {
    Actual,
    Prescribed,
    Planned,
    Hypothetical,
    Potential,
    Permitted,
}

impl ActualityStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ActualityStatus::Actual => "Actual",
            ActualityStatus::Prescribed => "Prescribed",
            ActualityStatus::Planned => "Planned",
            ActualityStatus::Hypothetical => "Hypothetical",
            ActualityStatus::Potential => "Potential",
            ActualityStatus::Permitted => "Permitted",
        }
    }

    /// Only actual acts realize roles; the rest would-be-realize them.
    #[must_use]
    pub fn can_realize(&self) -> bool {
        matches!(self, ActualityStatus::Actual)
    }
}

/// Role flavor borne by an act participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    Agent,
    Patient,
    Recipient,
    Beneficiary,
    Instrument,
    /// Catch-all participant role, typed as bare bfo:Role.
    Participant,
}

impl RoleType {
    /// Specific ontology type for the role node.
    #[must_use]
    pub fn type_iri(&self) -> &'static str {
        match self {
            RoleType::Agent => crate::vocab::CCO_AGENT_ROLE,
            RoleType::Patient => crate::vocab::CCO_PATIENT_ROLE,
            RoleType::Recipient => crate::vocab::CCO_RECIPIENT_ROLE,
            RoleType::Beneficiary => crate::vocab::CCO_BENEFICIARY_ROLE,
            RoleType::Instrument => crate::vocab::CCO_INSTRUMENT_ROLE,
            RoleType::Participant => crate::vocab::BFO_ROLE,
        }
    }

    /// Key fragment for consolidation and hashing.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            RoleType::Agent => "agent",
            RoleType::Patient => "patient",
            RoleType::Recipient => "recipient",
            RoleType::Beneficiary => "beneficiary",
            RoleType::Instrument => "instrument",
            RoleType::Participant => "participant",
        }
    }

    /// Label fragment ("Agent" for "Agent Role of ...").
    #[must_use]
    pub fn label_fragment(&self) -> &'static str {
        match self {
            RoleType::Agent => "Agent",
            RoleType::Patient => "Patient",
            RoleType::Recipient => "Recipient",
            RoleType::Beneficiary => "Beneficiary",
            RoleType::Instrument => "Instrument",
            RoleType::Participant => "Participant",
        }
    }
}

/// Tier 1 discourse referent: a span of source text that mentions something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscourseReferent {
    pub id: String,
    /// Surface text of the span; the label is the text itself.
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub definiteness: Definiteness,
    pub referential_status: ReferentialStatus,
    /// Compact IRI the referent denotes (cco/bfo/tagteam).
    pub denoted_type: String,
    pub scarcity_marker: Option<String>,
    pub quantity: Option<i64>,
    pub quantifier: Option<String>,
    pub temporal_unit: Option<TemporalUnit>,
    pub introducing_preposition: Option<String>,
    /// Governing verb that refined the denoted type, if any.
    pub type_refined_by: Option<String>,
    pub is_conjunct: bool,
    pub coordination_type: Option<CoordinationType>,
    pub is_possessor: bool,
    pub is_pp_object: bool,
    pub preposition: Option<String>,
    pub is_pronoun: bool,
    pub pronoun_type: Option<PronounType>,
    pub genericity: Option<GenericityReading>,
    /// Tier 2 counterpart, linked after factory construction.
    pub is_about: Option<String>,
}

impl DiscourseReferent {
    /// A referent with the mandatory fields set and all flags off.
    #[must_use]
    pub fn new(
        id: String,
        label: String,
        start: usize,
        end: usize,
        definiteness: Definiteness,
        referential_status: ReferentialStatus,
        denoted_type: String,
    ) -> Self {
        Self {
            id,
            label,
            start,
            end,
            definiteness,
            referential_status,
            denoted_type,
            scarcity_marker: None,
            quantity: None,
            quantifier: None,
            temporal_unit: None,
            introducing_preposition: None,
            type_refined_by: None,
            is_conjunct: false,
            coordination_type: None,
            is_possessor: false,
            is_pp_object: false,
            preposition: None,
            is_pronoun: false,
            pronoun_type: None,
            genericity: None,
            is_about: None,
        }
    }
}

/// Class-nomination record carried by GEN/UNIV Tier 2 entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNomination {
    /// Always "unresolved" until an external resolver runs.
    pub status: String,
    /// Head singularised, each word title-cased ("Dog", "Critical Patient").
    pub nominated_class_label: String,
    pub basis: String,
}

impl ClassNomination {
    #[must_use]
    pub fn unresolved(nominated_class_label: String, basis: String) -> Self {
        Self {
            status: "unresolved".to_string(),
            nominated_class_label,
            basis,
        }
    }
}

/// Tier 2 real-world entity: the independent (or generically dependent)
/// continuant a referent is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealWorldEntity {
    /// `inst:<TypeLabel>_<CleanLabel>_<hash12>`.
    pub id: String,
    /// Canonical label: determiners and modal adjectives stripped, head lemmatized.
    pub label: String,
    /// Specific type first, then `owl:NamedIndividual` or `owl:Class`.
    pub types: Vec<String>,
    pub instantiated_at: DateTime<Utc>,
    pub instantiated_by: Option<String>,
    /// Inverse of the roles' `inheres_in`; filled by role detection.
    pub is_bearer_of: Vec<String>,
    pub genericity_category: Option<GenericityCategory>,
    pub class_nomination: Option<ClassNomination>,
}

impl RealWorldEntity {
    /// The specific (first) type.
    #[must_use]
    pub fn specific_type(&self) -> &str {
        self.types.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn is_class_level(&self) -> bool {
        self.types.iter().any(|t| t == crate::vocab::OWL_CLASS)
    }
}

/// Syntactic shape of an act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActPattern {
    Regular,
    Possessive,
    Existential,
}

impl ActPattern {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ActPattern::Regular => "regular",
            ActPattern::Possessive => "possessive",
            ActPattern::Existential => "existential",
        }
    }
}

/// An act: a verbal event with its participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Act {
    pub id: String,
    pub label: String,
    pub verb: String,
    pub lemma: String,
    pub tag: String,
    pub pattern: ActPattern,
    pub is_passive: bool,
    pub is_negated: bool,
    pub is_copular: bool,
    pub modality: Option<Modality>,
    pub actuality: ActualityStatus,
    pub has_agent: Option<String>,
    pub affects: Option<String>,
    pub has_participant: Vec<String>,
    pub occurs_during: Option<String>,
}

/// Shape of a structural assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionPattern {
    Predication,
    NegatedPredication,
    Locative,
    Possessive,
    Existential,
}

impl AssertionPattern {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AssertionPattern::Predication => "predication",
            AssertionPattern::NegatedPredication => "negated_predication",
            AssertionPattern::Locative => "locative",
            AssertionPattern::Possessive => "possessive",
            AssertionPattern::Existential => "existential",
        }
    }
}

/// A copular/possessive/existential structural assertion between two phrases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralAssertion {
    pub id: String,
    pub label: String,
    pub pattern: AssertionPattern,
    pub subject_text: String,
    pub object_text: Option<String>,
    /// Resolved Tier 2 ids, when entity extraction found matching spans.
    pub subject: Option<String>,
    pub object: Option<String>,
    pub copula: Option<String>,
    pub negated: bool,
    /// Inferred relation IRI ("cco:has_part", "bfo:located_in", ...).
    pub relation: Option<String>,
}

/// One realizable role per (roleType, bearer) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// `inst:<RoleType>_Role_<hash8>`.
    pub id: String,
    pub label: String,
    pub role_type: RoleType,
    pub types: Vec<String>,
    pub inheres_in: String,
    pub realized_in: Vec<String>,
    pub would_be_realized_in: Vec<String>,
}

/// Aggregate of person members filling a plural participant slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectAggregate {
    pub id: String,
    pub label: String,
    pub has_member_part: Vec<String>,
    pub member_count: usize,
}

/// Member of an [`ObjectAggregate`], always a Person entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMember {
    pub id: String,
    pub label: String,
    pub member_index: usize,
    pub member_count: usize,
    pub is_bearer_of: Vec<String>,
}

/// Information-content flavor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IceKind {
    /// Promoted Tier 1 scarcity flag.
    Scarcity {
        evidence_text: String,
        scarcity_marker: String,
        supply_count: Option<i64>,
        /// Tier 1 referent the assertion was extracted from.
        extracted_from: String,
        detected_at: DateTime<Utc>,
    },
    /// Deontic/directive content prescribing an act.
    Directive {
        modal_type: Modality,
        modal_marker: String,
        prescribes: String,
    },
    /// Generic ICE sub-kind carrying only its type list.
    Generic,
}

/// Abstract information content (ICE layer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationContent {
    pub id: String,
    pub label: String,
    pub types: Vec<String>,
    pub kind: IceKind,
    pub is_about: Option<String>,
    pub is_concretized_by: Option<String>,
}

/// Information bearer carrying literal source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationBearer {
    pub id: String,
    pub label: String,
    /// The exact source substring for this bearer's span.
    pub has_text_value: String,
    pub start: usize,
    pub end: usize,
    /// One bearer may concretize several ICEs.
    pub concretizes: Vec<String>,
}

/// Multi-word proper-name span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexDesignator {
    pub id: String,
    pub full_name: String,
    pub name_components: Vec<String>,
    /// Defaults to cco:Organization.
    pub denoted_type: String,
    pub start: usize,
    pub end: usize,
    /// Entity this name designates, once resolved.
    pub designates: Option<String>,
}

/// A node of the emitted graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Referent(DiscourseReferent),
    Entity(RealWorldEntity),
    Act(Act),
    Assertion(StructuralAssertion),
    Role(Role),
    Aggregate(ObjectAggregate),
    Member(AggregateMember),
    Ice(InformationContent),
    Ibe(InformationBearer),
    Designator(ComplexDesignator),
}

impl Node {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Node::Referent(n) => &n.id,
            Node::Entity(n) => &n.id,
            Node::Act(n) => &n.id,
            Node::Assertion(n) => &n.id,
            Node::Role(n) => &n.id,
            Node::Aggregate(n) => &n.id,
            Node::Member(n) => &n.id,
            Node::Ice(n) => &n.id,
            Node::Ibe(n) => &n.id,
            Node::Designator(n) => &n.id,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Node::Referent(n) => &n.label,
            Node::Entity(n) => &n.label,
            Node::Act(n) => &n.label,
            Node::Assertion(n) => &n.label,
            Node::Role(n) => &n.label,
            Node::Aggregate(n) => &n.label,
            Node::Member(n) => &n.label,
            Node::Ice(n) => &n.label,
            Node::Ibe(n) => &n.label,
            Node::Designator(n) => &n.full_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actuality_realization() {
        assert!(ActualityStatus::Actual.can_realize());
        assert!(!ActualityStatus::Prescribed.can_realize());
        assert!(!ActualityStatus::Hypothetical.can_realize());
    }

    #[test]
    fn temporal_unit_words() {
        assert_eq!(TemporalUnit::parse_word("weeks"), Some(TemporalUnit::Week));
        assert_eq!(TemporalUnit::parse_word("Year"), Some(TemporalUnit::Year));
        assert_eq!(TemporalUnit::parse_word("fortnight"), None);
    }

    #[test]
    fn role_type_iris() {
        assert_eq!(RoleType::Agent.type_iri(), "cco:AgentRole");
        assert_eq!(RoleType::Participant.type_iri(), "bfo:BFO_0000023");
    }

    #[test]
    fn referent_defaults() {
        let r = DiscourseReferent::new(
            "inst:ref_0_9".into(),
            "the nurse".into(),
            0,
            9,
            Definiteness::Definite,
            ReferentialStatus::Presupposed,
            "cco:Person".into(),
        );
        assert!(!r.is_pronoun);
        assert!(r.is_about.is_none());
        assert_eq!(r.label, "the nurse");
    }

    #[test]
    fn genericity_serde_names() {
        let json = serde_json::to_string(&GenericityCategory::Gen).unwrap();
        assert_eq!(json, "\"GEN\"");
    }
}
