//! Ontology vocabulary: compact IRIs and the known class/predicate sets
//!
//! All IRIs in the graph are compact (`prefix:Local`). The constants here are
//! the closed set the pipeline emits; the vocabulary validator checks graph
//! types and predicates against [`KNOWN_CLASSES`] / [`KNOWN_PREDICATES`]
//! prefix-agnostically (local names only).

use once_cell::sync::Lazy;
use std::collections::BTreeSet;

// BFO classes
pub const BFO_ENTITY: &str = "bfo:BFO_0000001";
pub const BFO_INDEPENDENT_CONTINUANT: &str = "bfo:BFO_0000004";
pub const BFO_TEMPORAL_REGION: &str = "bfo:BFO_0000008";
pub const BFO_PROCESS: &str = "bfo:BFO_0000015";
pub const BFO_DISPOSITION: &str = "bfo:BFO_0000016";
pub const BFO_QUALITY: &str = "bfo:BFO_0000019";
pub const BFO_ROLE: &str = "bfo:BFO_0000023";
pub const BFO_1D_TEMPORAL_REGION: &str = "bfo:BFO_0000026";
pub const BFO_OBJECT_AGGREGATE: &str = "bfo:BFO_0000027";
pub const BFO_GDC: &str = "bfo:BFO_0000031";
pub const BFO_MATERIAL_ENTITY: &str = "bfo:BFO_0000040";
pub const BFO_OBJECT: &str = "bfo:Object";

// BFO relations
pub const BFO_PART_OF: &str = "bfo:part_of";
pub const BFO_LOCATED_IN: &str = "bfo:located_in";

// CCO classes
pub const CCO_PERSON: &str = "cco:Person";
pub const CCO_AGENT: &str = "cco:Agent";
pub const CCO_ORGANIZATION: &str = "cco:Organization";
pub const CCO_GROUP_OF_PERSONS: &str = "cco:GroupOfPersons";
pub const CCO_ARTIFACT: &str = "cco:Artifact";
pub const CCO_FACILITY: &str = "cco:Facility";
pub const CCO_ACT: &str = "cco:Act";
pub const CCO_ICE: &str = "cco:InformationContentEntity";
pub const CCO_IBE: &str = "cco:InformationBearingEntity";
pub const CCO_DESIGNATIVE_ICE: &str = "cco:DesignativeInformationContentEntity";
pub const CCO_DIRECTIVE_ICE: &str = "cco:DirectiveInformationContentEntity";
pub const CCO_AGENT_ROLE: &str = "cco:AgentRole";
pub const CCO_PATIENT_ROLE: &str = "cco:PatientRole";
pub const CCO_RECIPIENT_ROLE: &str = "cco:RecipientRole";
pub const CCO_BENEFICIARY_ROLE: &str = "cco:BeneficiaryRole";
pub const CCO_INSTRUMENT_ROLE: &str = "cco:InstrumentRole";

// CCO relations
pub const CCO_HAS_PART: &str = "cco:has_part";
pub const CCO_MEMBER_OF: &str = "cco:member_of";
pub const CCO_HAS_FUNCTION: &str = "cco:has_function";

// tagteam classes
pub const TT_DISCOURSE_REFERENT: &str = "tagteam:DiscourseReferent";
pub const TT_STRUCTURAL_ASSERTION: &str = "tagteam:StructuralAssertion";
pub const TT_SCARCITY_ASSERTION: &str = "tagteam:ScarcityAssertion";
pub const TT_DIRECTIVE_CONTENT: &str = "tagteam:DirectiveContent";
pub const TT_DEONTIC_CONTENT: &str = "tagteam:DeonticContent";
pub const TT_VALUE_ASSERTION_EVENT: &str = "tagteam:ValueAssertionEvent";
pub const TT_CONTEXT_ASSESSMENT_EVENT: &str = "tagteam:ContextAssessmentEvent";
pub const TT_ALTERNATIVE_NODE: &str = "tagteam:AlternativeNode";
pub const TT_COMPLEX_DESIGNATOR: &str = "tagteam:ComplexDesignator";
pub const TT_QUALITY_MEASUREMENT: &str = "tagteam:QualityMeasurement";

// RDF/OWL
pub const RDF_TYPE: &str = "rdf:type";
pub const RDFS_SUBCLASS_OF: &str = "rdfs:subClassOf";
pub const OWL_NAMED_INDIVIDUAL: &str = "owl:NamedIndividual";
pub const OWL_CLASS: &str = "owl:Class";

/// Human-readable label for a type IRI, used in generated ids
/// (`inst:<TypeLabel>_...`). BFO numeric ids map to their English names.
#[must_use]
pub fn type_label(iri: &str) -> &str {
    match local_name(iri) {
        "BFO_0000001" => "Entity",
        "BFO_0000004" => "IndependentContinuant",
        "BFO_0000008" => "TemporalRegion",
        "BFO_0000015" => "Process",
        "BFO_0000016" => "Disposition",
        "BFO_0000019" => "Quality",
        "BFO_0000023" => "Role",
        "BFO_0000026" => "TemporalInterval",
        "BFO_0000027" => "ObjectAggregate",
        "BFO_0000031" => "GenericallyDependentContinuant",
        "BFO_0000040" => "MaterialEntity",
        other => other,
    }
}

/// Local name of a compact or full IRI: text after the last `:`, `#`, or `/`.
#[must_use]
pub fn local_name(iri: &str) -> &str {
    let cut = iri.rfind(|c| c == ':' || c == '#' || c == '/');
    match cut {
        Some(i) => &iri[i + 1..],
        None => iri,
    }
}

/// Classes the serializer may emit. Checked by local name.
pub static KNOWN_CLASSES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    [
        // BFO numeric ids
        "BFO_0000001",
        "BFO_0000004",
        "BFO_0000008",
        "BFO_0000015",
        "BFO_0000016",
        "BFO_0000019",
        "BFO_0000023",
        "BFO_0000026",
        "BFO_0000027",
        "BFO_0000031",
        "BFO_0000040",
        "Object",
        // CCO
        "Person",
        "Agent",
        "Organization",
        "GroupOfPersons",
        "Artifact",
        "Facility",
        "Act",
        "ActOfSurgery",
        "InformationContentEntity",
        "InformationBearingEntity",
        "DesignativeInformationContentEntity",
        "DirectiveInformationContentEntity",
        "AgentRole",
        "PatientRole",
        "RecipientRole",
        "BeneficiaryRole",
        "InstrumentRole",
        // tagteam
        "DiscourseReferent",
        "StructuralAssertion",
        "ScarcityAssertion",
        "DirectiveContent",
        "DeonticContent",
        "ValueAssertionEvent",
        "ContextAssessmentEvent",
        "AlternativeNode",
        "ComplexDesignator",
        "QualityMeasurement",
        // OWL
        "NamedIndividual",
        "Class",
    ]
    .into_iter()
    .collect()
});

/// Predicates the serializer may emit. Checked by local name.
pub static KNOWN_PREDICATES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    [
        "type",
        "label",
        "is_about",
        "inheres_in",
        "is_bearer_of",
        "realized_in",
        "would_be_realized_in",
        "has_agent",
        "affects",
        "has_participant",
        "has_member_part",
        "member_index",
        "member_count",
        "occurs_during",
        "is_concretized_by",
        "concretizes",
        "has_text_value",
        "prescribes",
        "designates",
        "is_designated_by",
        "has_start_time",
        "has_end_time",
        "measures",
        "is_measured_by",
        "has_measurement_value",
        "uses_measurement_unit",
        "is_part_of",
        "has_part",
        "member_of",
        "has_function",
        "located_in",
        "subClassOf",
        "asserts",
        "based_on",
        "detected_by",
        "extracted_from",
        "detected_at",
        "instantiated_at",
        "instantiated_by",
        "alternativeFor",
        "sourceAmbiguity",
        "plausibility",
        "modality",
        "actualityStatus",
        "modalType",
        "modalMarker",
        "scope",
        "formalization",
        "metonymicSource",
        "metonymyType",
        "literalType",
        "scarcityMarker",
        "supplyCount",
        "evidenceText",
        "definiteness",
        "referentialStatus",
        "denotesType",
        "typeRefinedBy",
        "quantity",
        "quantifier",
        "temporalUnit",
        "introducingPreposition",
        "isConjunct",
        "coordinationType",
        "isPossessor",
        "isPPObject",
        "preposition",
        "isPronoun",
        "pronounType",
        "genericityCategory",
        "genericityBasis",
        "genericityConfidence",
        "classNominationStatus",
        "nominatedClassLabel",
        "nominationBasis",
        "requiresOntologyResolution",
        "canonicalClassLabel",
        "textSpanStart",
        "textSpanEnd",
        "fullName",
        "nameComponents",
        "denotedType",
        "verb",
        "lemma",
        "tag",
        "pattern",
        "isPassive",
        "isNegated",
        "isCopular",
        "subjectText",
        "objectText",
        "subject",
        "object",
        "copula",
        "relation",
        "validInContext",
        "assertionType",
        "validatedBy",
        "supersedes",
        "extractionConfidence",
        "classificationConfidence",
        "relevanceConfidence",
        "aggregateConfidence",
        "validationTimestamp",
        "temporal_extent",
        "score",
        "polarity",
        "salience",
    ]
    .into_iter()
    .collect()
});

/// Does the local name of `iri` denote a known class?
#[must_use]
pub fn is_known_class(iri: &str) -> bool {
    KNOWN_CLASSES.contains(local_name(iri))
}

/// Does the local name of `iri` denote a known predicate?
#[must_use]
pub fn is_known_predicate(iri: &str) -> bool {
    KNOWN_PREDICATES.contains(local_name(iri))
}

/// Tier 2 types compatible with agency (may fill `has_agent` / bear AgentRole).
#[must_use]
pub fn is_agentive_type(iri: &str) -> bool {
    matches!(
        local_name(iri),
        "Person" | "Organization" | "GroupOfPersons" | "Agent"
    )
}

/// Person-or-person-group check used by role mapping.
#[must_use]
pub fn is_person_type(iri: &str) -> bool {
    matches!(local_name(iri), "Person" | "GroupOfPersons")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_names() {
        assert_eq!(local_name("bfo:BFO_0000015"), "BFO_0000015");
        assert_eq!(local_name("http://example.org/ont#Person"), "Person");
        assert_eq!(local_name("Person"), "Person");
    }

    #[test]
    fn known_sets_are_prefix_agnostic() {
        assert!(is_known_class("cco:Person"));
        assert!(is_known_class("http://www.ontologyrepository.com/CommonCoreOntologies/Person"));
        assert!(!is_known_class("cco:Persun"));
        assert!(is_known_predicate("tagteam:inheres_in"));
        assert!(!is_known_predicate("tagteam:inheres_on"));
    }

    #[test]
    fn agentive_types() {
        assert!(is_agentive_type(CCO_PERSON));
        assert!(is_agentive_type(CCO_ORGANIZATION));
        assert!(is_agentive_type(CCO_GROUP_OF_PERSONS));
        assert!(!is_agentive_type(CCO_ARTIFACT));
    }
}
