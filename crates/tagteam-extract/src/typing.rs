//! The ontological typing cascade
//!
//! A plain ordered list of deterministic rules; the first rule that yields a
//! type wins. Rules never consult each other, only the [`TypeQuery`] built
//! from the candidate phrase and, for rule 6, an optional domain
//! configuration handle.

use crate::lexicon;
use tagteam_core::{vocab, TemporalUnit};
use tagteam_tokenizer::singularize;

/// Domain-configuration contract (loading is out of scope; the handle is not).
pub trait DomainConfigLoader: Send + Sync {
    fn is_config_loaded(&self) -> bool;

    /// Specialised process type for a head noun ("surgery" → cco:ActOfSurgery).
    fn process_root_word(&self, word: &str) -> Option<String>;

    /// Specialise a BFO type for a domain term.
    fn type_specialization(&self, bfo_type: &str, term: &str) -> Option<String>;
}

/// Everything the cascade may inspect about one candidate phrase.
#[derive(Debug, Clone)]
pub struct TypeQuery<'a> {
    pub text: &'a str,
    pub head: &'a str,
    pub head_tag: &'a str,
    pub determiner: Option<&'a str>,
    /// Non-head words of the phrase, in order.
    pub modifiers: Vec<&'a str>,
    pub has_of_complement: bool,
    pub is_pronoun: bool,
    pub is_plural: bool,
    pub is_proper: bool,
    pub quantity: Option<i64>,
    pub temporal_unit: Option<TemporalUnit>,
}

/// A cascade outcome: the chosen type and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecision {
    pub iri: String,
    pub rule: &'static str,
}

impl TypeDecision {
    fn new(iri: impl Into<String>, rule: &'static str) -> Self {
        Self {
            iri: iri.into(),
            rule,
        }
    }
}

/// Run the cascade; total (always returns, default rule last).
#[must_use]
pub fn infer_type(query: &TypeQuery<'_>, config: Option<&dyn DomainConfigLoader>) -> TypeDecision {
    let head = query.head.to_lowercase();
    let head_singular = singularize(&head);

    // 1. Pronoun presupposition.
    if query.is_pronoun {
        if let Some(&iri) = lexicon::PRONOUN_TYPES.get(head.as_str()) {
            return TypeDecision::new(iri, "pronoun_presupposition");
        }
    }

    // 2. Compound-noun disambiguation: artifact modifier + process-ish head.
    if lexicon::AMBIGUOUS_COMPOUND_HEADS.contains(head.as_str())
        && query
            .modifiers
            .iter()
            .any(|m| lexicon::ENTITY_ARTIFACT_MODIFIERS.contains(m.to_lowercase().as_str()))
    {
        return TypeDecision::new(vocab::BFO_PROCESS, "compound_disambiguation");
    }

    // 3. Unambiguous result nouns.
    if let Some(&iri) = lexicon::RESULT_NOUNS.get(head.as_str()) {
        return TypeDecision::new(iri, "result_noun");
    }

    // 4. Ambiguous nominalizations, resolved by context.
    if let Some(&default_iri) = lexicon::AMBIGUOUS_NOMINALIZATIONS.get(head.as_str()) {
        if query.has_of_complement {
            return TypeDecision::new(vocab::BFO_PROCESS, "nominalization_of_complement");
        }
        if matches!(query.determiner.map(str::to_lowercase).as_deref(), Some("the" | "this" | "that")) {
            return TypeDecision::new(default_iri, "nominalization_definite");
        }
        // Bare/indefinite: the entity default is the safer reading.
        return TypeDecision::new(default_iri, "nominalization_default");
    }

    // 5. Result-noun exceptions, no context needed.
    if let Some(&iri) = lexicon::RESULT_NOUNS.get(head_singular.as_str()) {
        return TypeDecision::new(iri, "result_noun_exception");
    }

    // 6. Domain-config specialization.
    if let Some(loader) = config {
        if loader.is_config_loaded() {
            if let Some(iri) = loader.process_root_word(&head) {
                return TypeDecision::new(iri, "domain_config");
            }
        }
    }

    // 7. Action nominalizations.
    if lexicon::ACTION_NOMINALIZATIONS.contains(head.as_str()) {
        return TypeDecision::new(vocab::CCO_ACT, "action_nominalization");
    }

    // 8. Process suffixes. "thing"/"string" are not gerunds; require a stem.
    if lexicon::PROCESS_SUFFIXES
        .iter()
        .any(|s| head.ends_with(s) && head.len() >= s.len() + 3)
    {
        return TypeDecision::new(vocab::BFO_PROCESS, "process_suffix");
    }

    // 9. Deprecated domain-process table, only without a config loader.
    if config.map_or(true, |c| !c.is_config_loaded()) {
        if let Some(&iri) = lexicon::LEGACY_DOMAIN_PROCESSES.get(head.as_str()) {
            return TypeDecision::new(iri, "legacy_domain_process");
        }
    }

    // 10. Direct entity-type mapping by head noun.
    if lexicon::PERSONS.contains(head_singular.as_str()) {
        if query.is_plural {
            return TypeDecision::new(vocab::BFO_OBJECT_AGGREGATE, "person_plural");
        }
        return TypeDecision::new(vocab::CCO_PERSON, "person_head");
    }
    if lexicon::ORGANIZATIONS.contains(head_singular.as_str()) {
        return TypeDecision::new(vocab::CCO_ORGANIZATION, "organization_head");
    }
    if lexicon::ARTIFACTS.contains(head_singular.as_str()) {
        return TypeDecision::new(vocab::CCO_ARTIFACT, "artifact_head");
    }
    if lexicon::FACILITIES.contains(head_singular.as_str()) {
        return TypeDecision::new(vocab::CCO_FACILITY, "facility_head");
    }
    if lexicon::QUALITY_NOUNS.contains(head_singular.as_str()) {
        return TypeDecision::new(vocab::BFO_QUALITY, "quality_head");
    }
    if lexicon::INFORMATION_NOUNS.contains(head_singular.as_str()) {
        return TypeDecision::new(vocab::BFO_GDC, "information_head");
    }
    if lexicon::PRODUCT_NAMES.contains(head.as_str()) {
        return TypeDecision::new(vocab::CCO_ARTIFACT, "product_name");
    }

    // 11. Temporal regions.
    if let Some(_unit) = query.temporal_unit {
        if query.quantity.is_some() {
            return TypeDecision::new(vocab::BFO_1D_TEMPORAL_REGION, "temporal_quantity");
        }
        let prefix_word = query.modifiers.first().copied().or(query.determiner);
        let relative_prefix = prefix_word
            .map(|m| lexicon::RELATIVE_TEMPORAL_PREFIXES.contains(&m.to_lowercase().as_str()))
            .unwrap_or(false);
        if relative_prefix {
            return TypeDecision::new(vocab::BFO_TEMPORAL_REGION, "temporal_relative");
        }
        return TypeDecision::new(vocab::BFO_TEMPORAL_REGION, "temporal_unit");
    }
    if lexicon::RELATIVE_TEMPORAL_TERMS.contains(&head.as_str()) {
        return TypeDecision::new(vocab::BFO_TEMPORAL_REGION, "temporal_standalone");
    }

    // 12. Symptom / disease / quality.
    if lexicon::DISEASE_TERMS.contains(head_singular.as_str()) {
        return TypeDecision::new(vocab::BFO_DISPOSITION, "disease_term");
    }
    if lexicon::DISPOSITION_TERMS.contains(head_singular.as_str()) {
        return TypeDecision::new(vocab::BFO_DISPOSITION, "disposition_term");
    }
    if lexicon::EVALUATIVE_QUALITY_TERMS.contains(head_singular.as_str()) {
        return TypeDecision::new(vocab::BFO_QUALITY, "evaluative_quality");
    }
    if lexicon::SYMPTOM_TERMS.contains(head_singular.as_str())
        || query
            .text
            .to_lowercase()
            .split_whitespace()
            .any(|w| lexicon::SYMPTOM_TERMS.contains(w))
    {
        return TypeDecision::new(vocab::BFO_QUALITY, "symptom_term");
    }

    // 13. Ontological vocabulary fallback with plural normalisation.
    if let Some(&iri) = lexicon::ONTOLOGY_VOCABULARY.get(head_singular.as_str()) {
        return TypeDecision::new(iri, "ontology_vocabulary");
    }

    // 14. Proper names.
    if query.is_proper || has_title_prefix(query.text) {
        return TypeDecision::new(classify_proper_name(query), "proper_name");
    }

    // 15. Default.
    TypeDecision::new(vocab::BFO_MATERIAL_ENTITY, "default_material_entity")
}

fn has_title_prefix(text: &str) -> bool {
    let first = text.split_whitespace().next().unwrap_or("");
    let trimmed = first.trim_end_matches('.').to_lowercase();
    lexicon::PERSON_TITLES.contains(&trimmed.as_str())
}

fn classify_proper_name(query: &TypeQuery<'_>) -> &'static str {
    let text = query.text;
    if has_title_prefix(text) {
        return vocab::CCO_PERSON;
    }
    let lower = text.to_lowercase();
    if lexicon::PRODUCT_NAMES.contains(lower.as_str()) {
        return vocab::CCO_ARTIFACT;
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.iter().any(|w| {
        let t = w.trim_end_matches([',', '.']).to_lowercase();
        lexicon::ORG_SUFFIXES.contains(&t.as_str())
    }) {
        return vocab::CCO_ORGANIZATION;
    }
    // Bare acronyms name institutions, not people.
    if words.len() == 1 && words[0].len() >= 2 && words[0].chars().all(|c| c.is_ascii_uppercase()) {
        return vocab::CCO_ORGANIZATION;
    }
    match words.len() {
        // Likely "FirstName LastName" (optionally with middle name).
        2 | 3 => vocab::CCO_PERSON,
        n if n >= 4 => vocab::CCO_ORGANIZATION,
        _ => {
            if text.len() <= 8 && text.chars().next().is_some_and(char::is_uppercase) {
                vocab::CCO_PERSON
            } else {
                vocab::BFO_MATERIAL_ENTITY
            }
        }
    }
}

/// Verb-context refinement for ambiguous object nouns: cognitive verbs read
/// the object as information content, physical verbs as an artifact.
#[must_use]
pub fn refine_ambiguous_object(head: &str, verb_lemma: &str) -> Option<&'static str> {
    let head = singularize(&head.to_lowercase());
    if !lexicon::AMBIGUOUS_OBJECT_NOUNS.contains(head.as_str()) {
        return None;
    }
    let verb = verb_lemma.to_lowercase();
    if lexicon::COGNITIVE_VERBS.contains(verb.as_str()) {
        return Some(vocab::CCO_ICE);
    }
    if lexicon::PHYSICAL_VERBS.contains(verb.as_str()) {
        return Some(vocab::CCO_ARTIFACT);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query<'a>(text: &'a str, head: &'a str) -> TypeQuery<'a> {
        TypeQuery {
            text,
            head,
            head_tag: "NN",
            determiner: None,
            modifiers: Vec::new(),
            has_of_complement: false,
            is_pronoun: false,
            is_plural: false,
            is_proper: false,
            quantity: None,
            temporal_unit: None,
        }
    }

    #[test]
    fn pronouns_presuppose() {
        let mut q = query("she", "she");
        q.is_pronoun = true;
        let decision = infer_type(&q, None);
        assert_eq!(decision.iri, vocab::CCO_PERSON);
        assert_eq!(decision.rule, "pronoun_presupposition");

        let mut q = query("they", "they");
        q.is_pronoun = true;
        assert_eq!(infer_type(&q, None).iri, vocab::BFO_OBJECT_AGGREGATE);
    }

    #[test]
    fn compound_reads_as_process() {
        let mut q = query("server installation", "installation");
        q.modifiers = vec!["server"];
        assert_eq!(infer_type(&q, None).rule, "compound_disambiguation");
    }

    #[test]
    fn result_nouns_beat_suffixes() {
        let q = query("the medication", "medication");
        let decision = infer_type(&q, None);
        assert_eq!(decision.iri, vocab::CCO_ARTIFACT);
        assert_eq!(decision.rule, "result_noun");
    }

    #[test]
    fn of_complement_forces_process() {
        let mut q = query("organization of the event", "organization");
        q.has_of_complement = true;
        assert_eq!(infer_type(&q, None).iri, vocab::BFO_PROCESS);
        let mut q = query("the organization", "organization");
        q.determiner = Some("the");
        assert_eq!(infer_type(&q, None).iri, vocab::CCO_ORGANIZATION);
        // Bare falls back to the entity default, chosen as the safer reading.
        let q = query("organization", "organization");
        assert_eq!(infer_type(&q, None).iri, vocab::CCO_ORGANIZATION);
    }

    #[test]
    fn action_nominalizations_are_acts() {
        assert_eq!(infer_type(&query("deployment", "deployment"), None).iri, vocab::CCO_ACT);
    }

    #[test]
    fn process_suffix_fallback() {
        let decision = infer_type(&query("the calibration", "calibration"), None);
        assert_eq!(decision.iri, vocab::BFO_PROCESS);
        assert_eq!(decision.rule, "process_suffix");
    }

    #[test]
    fn person_singular_and_plural() {
        assert_eq!(infer_type(&query("the doctor", "doctor"), None).iri, vocab::CCO_PERSON);
        let mut q = query("two patients", "patients");
        q.is_plural = true;
        q.quantity = Some(2);
        assert_eq!(infer_type(&q, None).iri, vocab::BFO_OBJECT_AGGREGATE);
    }

    #[test]
    fn temporal_regions() {
        let mut q = query("three weeks", "weeks");
        q.quantity = Some(3);
        q.temporal_unit = Some(TemporalUnit::Week);
        assert_eq!(infer_type(&q, None).iri, vocab::BFO_1D_TEMPORAL_REGION);

        let mut q = query("next week", "week");
        q.modifiers = vec!["next"];
        q.temporal_unit = Some(TemporalUnit::Week);
        assert_eq!(infer_type(&q, None).iri, vocab::BFO_TEMPORAL_REGION);
    }

    #[test]
    fn disease_is_disposition() {
        assert_eq!(infer_type(&query("diabetes", "diabetes"), None).iri, vocab::BFO_DISPOSITION);
        assert_eq!(infer_type(&query("the condition", "condition"), None).iri, vocab::BFO_DISPOSITION);
    }

    #[test]
    fn symptom_is_quality() {
        assert_eq!(infer_type(&query("severe pain", "pain"), None).iri, vocab::BFO_QUALITY);
    }

    #[test]
    fn proper_name_shapes() {
        let mut q = query("Dr. Smith", "Smith");
        q.is_proper = true;
        assert_eq!(infer_type(&q, None).iri, vocab::CCO_PERSON);

        let mut q = query("Acme Corp", "Corp");
        q.is_proper = true;
        assert_eq!(infer_type(&q, None).iri, vocab::CCO_ORGANIZATION);

        let mut q = query("John Smith", "Smith");
        q.is_proper = true;
        assert_eq!(infer_type(&q, None).iri, vocab::CCO_PERSON);

        let mut q = query("United Nations Relief Works Agency", "Agency");
        q.is_proper = true;
        // organization head wins before the proper-name rule
        assert_eq!(infer_type(&q, None).iri, vocab::CCO_ORGANIZATION);

        let mut q = query("CBP", "CBP");
        q.is_proper = true;
        assert_eq!(infer_type(&q, None).iri, vocab::CCO_ORGANIZATION);

        let mut q = query("Smith", "Smith");
        q.is_proper = true;
        assert_eq!(infer_type(&q, None).iri, vocab::CCO_PERSON);
    }

    #[test]
    fn default_is_material_entity() {
        assert_eq!(
            infer_type(&query("fur", "fur"), None).iri,
            vocab::BFO_MATERIAL_ENTITY
        );
    }

    #[test]
    fn verb_refinement() {
        assert_eq!(refine_ambiguous_object("report", "review"), Some(vocab::CCO_ICE));
        assert_eq!(refine_ambiguous_object("report", "print"), Some(vocab::CCO_ARTIFACT));
        assert_eq!(refine_ambiguous_object("report", "see"), None);
        assert_eq!(refine_ambiguous_object("ventilator", "print"), None);
    }

    #[test]
    fn domain_config_specializes() {
        struct SurgeryConfig;
        impl DomainConfigLoader for SurgeryConfig {
            fn is_config_loaded(&self) -> bool {
                true
            }
            fn process_root_word(&self, word: &str) -> Option<String> {
                (word == "surgery").then(|| "cco:ActOfSurgery".to_string())
            }
            fn type_specialization(&self, _bfo_type: &str, _term: &str) -> Option<String> {
                None
            }
        }
        let decision = infer_type(&query("the surgery", "surgery"), Some(&SurgeryConfig));
        assert_eq!(decision.iri, "cco:ActOfSurgery");
        assert_eq!(decision.rule, "domain_config");
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn cascade_is_total_over_known_prefixes(head in "[a-zA-Z]{1,15}") {
                let q = TypeQuery {
                    text: &head,
                    head: &head,
                    head_tag: "NN",
                    determiner: None,
                    modifiers: Vec::new(),
                    has_of_complement: false,
                    is_pronoun: false,
                    is_plural: false,
                    is_proper: false,
                    quantity: None,
                    temporal_unit: None,
                };
                let decision = infer_type(&q, None);
                prop_assert!(
                    decision.iri.starts_with("bfo:")
                        || decision.iri.starts_with("cco:")
                        || decision.iri.starts_with("tagteam:")
                );
            }
        }
    }
}
