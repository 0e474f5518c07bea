//! Keyword tables for the typing cascade
//!
//! All tables are immutable process-wide configuration, initialised once.
//! Lookups are by lower-cased head noun unless noted otherwise.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use tagteam_core::vocab;

/// Per-pronoun presupposed types.
pub static PRONOUN_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for word in ["i", "me", "you", "he", "him", "she", "her", "we", "us"] {
        map.insert(word, vocab::CCO_PERSON);
    }
    map.insert("it", vocab::BFO_INDEPENDENT_CONTINUANT);
    for word in ["they", "them"] {
        map.insert(word, vocab::BFO_OBJECT_AGGREGATE);
    }
    for word in ["this", "that", "these", "those"] {
        map.insert(word, vocab::BFO_ENTITY);
    }
    map
});

/// Heads that read as a process when compounded with an artifact modifier.
pub static AMBIGUOUS_COMPOUND_HEADS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "installation",
        "operation",
        "construction",
        "development",
        "deployment",
        "implementation",
        "production",
        "formation",
        "configuration",
        "migration",
    ]
    .into_iter()
    .collect()
});

/// Modifier nouns that mark the compound as an act on an artifact.
pub static ENTITY_ARTIFACT_MODIFIERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "system", "server", "software", "database", "network", "machine", "device", "equipment",
        "application", "building", "infrastructure", "hardware", "platform",
    ]
    .into_iter()
    .collect()
});

/// Result nouns with a fixed, context-free reading.
pub static RESULT_NOUNS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("medication", vocab::CCO_ARTIFACT),
        ("documentation", vocab::BFO_GDC),
        ("location", vocab::BFO_MATERIAL_ENTITY),
        ("equipment", vocab::CCO_ARTIFACT),
        ("publication", vocab::BFO_GDC),
        ("notation", vocab::BFO_GDC),
    ]
    .into_iter()
    .collect()
});

/// Nominalizations whose reading flips on context; value is the entity-type
/// default chosen when no of-complement forces the process reading.
pub static AMBIGUOUS_NOMINALIZATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("organization", vocab::CCO_ORGANIZATION),
        ("administration", vocab::CCO_ORGANIZATION),
        ("association", vocab::CCO_ORGANIZATION),
        ("foundation", vocab::CCO_ORGANIZATION),
        ("collection", vocab::BFO_OBJECT_AGGREGATE),
    ]
    .into_iter()
    .collect()
});

/// Nominalizations that always read as acts.
pub static ACTION_NOMINALIZATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "deployment",
        "installation",
        "execution",
        "implementation",
        "authentication",
        "authorization",
        "validation",
        "verification",
        "compilation",
        "optimization",
        "evaluation",
        "allocation",
        "coordination",
        "negotiation",
    ]
    .into_iter()
    .collect()
});

/// Suffixes that default the head to bfo:Process.
pub static PROCESS_SUFFIXES: &[&str] = &["tion", "ment", "ing", "sis", "ance", "ence", "ure", "ery"];

/// Fallback process roots consulted only when no domain config is registered.
pub static LEGACY_DOMAIN_PROCESSES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("surgery", vocab::BFO_PROCESS),
        ("diagnosis", vocab::BFO_PROCESS),
        ("treatment", vocab::BFO_PROCESS),
        ("therapy", vocab::BFO_PROCESS),
        ("triage", vocab::BFO_PROCESS),
    ]
    .into_iter()
    .collect()
});

/// Person-denoting heads.
pub static PERSONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "doctor", "nurse", "patient", "physician", "surgeon", "clinician", "teacher", "student",
        "engineer", "manager", "employee", "customer", "user", "person", "man", "woman", "child",
        "boy", "girl", "officer", "driver", "worker", "author", "scientist", "researcher",
        "lawyer", "judge", "operator", "technician", "analyst", "director", "president",
        "resident", "visitor", "caregiver", "pharmacist",
    ]
    .into_iter()
    .collect()
});

/// Organization-denoting heads.
pub static ORGANIZATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "company", "corporation", "agency", "department", "team", "committee", "government",
        "university", "school", "ministry", "bureau", "board", "council", "firm", "bank",
        "institute", "laboratory", "unit",
    ]
    .into_iter()
    .collect()
});

/// Artifact-denoting heads.
pub static ARTIFACTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ventilator", "car", "vehicle", "computer", "device", "machine", "tool", "table", "chair",
        "book", "phone", "server", "monitor", "pump", "scanner", "instrument", "bed", "mask",
        "syringe", "catheter", "implant", "wheelchair", "resource", "supply", "kit",
    ]
    .into_iter()
    .collect()
});

/// Facility-denoting heads.
pub static FACILITIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "hospital", "clinic", "building", "facility", "factory", "office", "warehouse", "airport",
        "station", "ward", "pharmacy", "campus",
    ]
    .into_iter()
    .collect()
});

/// Quality-denoting heads (non-evaluative).
pub static QUALITY_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["color", "size", "shape", "weight", "height", "temperature", "texture", "density"]
        .into_iter()
        .collect()
});

/// Information-artifact heads; defaults refined later by the governing verb.
pub static INFORMATION_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "report", "plan", "design", "specification", "record", "message", "email", "note", "list",
        "schedule", "protocol", "document", "chart", "summary", "manual", "policy", "form",
    ]
    .into_iter()
    .collect()
});

/// Known product names (proper-name cascade and step-10 lookups).
pub static PRODUCT_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["iphone", "android", "windows", "linux", "macos", "excel", "word", "kubernetes", "postgres"]
        .into_iter()
        .collect()
});

/// Disease terms → Disposition.
pub static DISEASE_TERMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "diabetes", "cancer", "pneumonia", "infection", "hypertension", "asthma", "influenza",
        "flu", "sepsis", "stroke", "disease", "illness", "disorder", "syndrome", "condition",
        "tumor", "arrhythmia",
    ]
    .into_iter()
    .collect()
});

/// Disposition terms (capacities and tendencies).
pub static DISPOSITION_TERMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "capacity", "ability", "tendency", "propensity", "capability", "potential",
        "susceptibility", "disposition", "fragility", "immunity",
    ]
    .into_iter()
    .collect()
});

/// Evaluative quality terms.
pub static EVALUATIVE_QUALITY_TERMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "success", "failure", "demand", "quality", "performance", "efficiency", "effectiveness",
        "reliability", "availability", "accuracy", "severity", "urgency",
    ]
    .into_iter()
    .collect()
});

/// Symptom heads and phrases → Quality.
pub static SYMPTOM_TERMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "pain", "fever", "cough", "fatigue", "nausea", "headache", "rash", "swelling", "symptom",
        "dizziness", "weakness", "shortness",
    ]
    .into_iter()
    .collect()
});

/// Ontological vocabulary fallback over singularised heads.
pub static ONTOLOGY_VOCABULARY: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("process", vocab::BFO_PROCESS),
        ("event", vocab::BFO_PROCESS),
        ("activity", vocab::BFO_PROCESS),
        ("quality", vocab::BFO_QUALITY),
        ("property", vocab::BFO_QUALITY),
        ("role", vocab::BFO_ROLE),
        ("disposition", vocab::BFO_DISPOSITION),
        ("entity", vocab::BFO_ENTITY),
        ("object", vocab::BFO_MATERIAL_ENTITY),
        ("material", vocab::BFO_MATERIAL_ENTITY),
        ("information", vocab::BFO_GDC),
        ("aggregate", vocab::BFO_OBJECT_AGGREGATE),
        ("group", vocab::CCO_GROUP_OF_PERSONS),
        ("crowd", vocab::CCO_GROUP_OF_PERSONS),
        ("organism", vocab::BFO_MATERIAL_ENTITY),
    ]
    .into_iter()
    .collect()
});

/// Title prefixes that mark a proper name as a person.
pub static PERSON_TITLES: &[&str] = &["dr", "mr", "mrs", "ms", "prof"];

/// Corporate suffixes that mark a proper name as an organization.
pub static ORG_SUFFIXES: &[&str] = &[
    "inc",
    "corp",
    "llc",
    "ltd",
    "company",
    "corporation",
    "foundation",
];

/// Modal adjectives stripped from canonical labels and marking hypotheticals.
pub static MODAL_ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "possible",
        "likely",
        "probable",
        "suspected",
        "potential",
        "presumed",
        "apparent",
        "alleged",
        "uncertain",
        "questionable",
    ]
    .into_iter()
    .collect()
});

/// Contextual markers that make a following referent hypothetical.
pub static HYPOTHETICAL_MARKERS: &[&str] = &[
    "if",
    "would",
    "could",
    "might",
    "suppose",
    "assuming",
    "hypothetically",
];

/// Scarcity markers on determiner/adjective position.
pub static SCARCITY_MARKERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["last", "only", "final", "remaining", "sole", "scarce", "limited"]
        .into_iter()
        .collect()
});

/// Markers implying exactly one remaining item.
pub static SINGLETON_SCARCITY_MARKERS: &[&str] = &["last", "only", "final", "sole"];

/// Relative temporal prefixes ("next week") and standalone relative terms.
pub static RELATIVE_TEMPORAL_PREFIXES: &[&str] = &["next", "last", "previous", "coming", "past"];
pub static RELATIVE_TEMPORAL_TERMS: &[&str] = &["today", "tomorrow", "yesterday", "now"];

/// Object nouns whose type is refined by the governing verb.
pub static AMBIGUOUS_OBJECT_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "design",
        "report",
        "document",
        "plan",
        "data",
        "specification",
        "analysis",
        "summary",
        "review",
        "record",
        "diagram",
        "model",
    ]
    .into_iter()
    .collect()
});

/// Cognitive verbs: object reads as information content.
pub static COGNITIVE_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "review", "analyze", "read", "explain", "summarize", "discuss", "examine", "evaluate",
        "interpret", "understand", "describe", "present", "approve",
    ]
    .into_iter()
    .collect()
});

/// Physical-handling verbs: object reads as artifact.
pub static PHYSICAL_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "build", "carry", "print", "store", "move", "lift", "ship", "deliver", "install",
        "transport", "hold", "shred",
    ]
    .into_iter()
    .collect()
});

/// Purely temporal adverbs skipped during chunk-candidate collection.
pub static TEMPORAL_ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["yesterday", "today", "tomorrow", "now", "soon", "later", "recently"]
        .into_iter()
        .collect()
});

/// Clause-boundary words that stop the backwards determiner scan.
pub static CLAUSE_BOUNDARY_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "and", "or", "but", "nor", "because", "although", "while", "if", "that", "which", "who",
        "whom", "whose", "when", "where", "is", "are", "was", "were", "be", "been", "have", "has",
        "had", "do", "does", "did", "will", "would", "can", "could", "may", "might", "must",
        "shall", "should",
    ]
    .into_iter()
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pronoun_table_covers_core_forms() {
        assert_eq!(PRONOUN_TYPES.get("she"), Some(&vocab::CCO_PERSON));
        assert_eq!(PRONOUN_TYPES.get("it"), Some(&vocab::BFO_INDEPENDENT_CONTINUANT));
        assert_eq!(PRONOUN_TYPES.get("they"), Some(&vocab::BFO_OBJECT_AGGREGATE));
        assert_eq!(PRONOUN_TYPES.get("those"), Some(&vocab::BFO_ENTITY));
    }

    #[test]
    fn disjoint_person_and_organization_heads() {
        for head in PERSONS.iter() {
            assert!(!ORGANIZATIONS.contains(head), "{head} in both tables");
        }
    }

    #[test]
    fn scarcity_markers_include_singletons() {
        for marker in SINGLETON_SCARCITY_MARKERS {
            assert!(SCARCITY_MARKERS.contains(marker));
        }
    }
}
