//! Tier 2 construction
//!
//! For each Tier 1 referent the factory picks the specific real-world type,
//! normalises the canonical label, and mints a document-scoped
//! content-addressed id. One entity exists per
//! (normalizedLabel, specificType, documentScope); the per-session cache
//! deduplicates by generated id. Plural person referents with a known count
//! become an [`ObjectAggregate`] with indexed Person members.

use crate::lexicon;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tagteam_core::{
    ids, vocab, AggregateMember, ClassNomination, DiscourseReferent, GenericityCategory,
    ObjectAggregate, RealWorldEntity,
};
use tagteam_tokenizer::{singularize, Lemmatizer};
use tracing::debug;

/// Everything Tier 2 construction produced for one document.
#[derive(Debug, Default)]
pub struct Tier2Set {
    pub entities: Vec<RealWorldEntity>,
    pub aggregates: Vec<ObjectAggregate>,
    pub members: Vec<AggregateMember>,
    /// Tier 1 referent id → Tier 2 id.
    pub link_map: IndexMap<String, String>,
}

impl Tier2Set {
    #[must_use]
    pub fn entity(&self, id: &str) -> Option<&RealWorldEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn aggregate(&self, id: &str) -> Option<&ObjectAggregate> {
        self.aggregates.iter().find(|a| a.id == id)
    }
}

/// Document-scoped Tier 2 factory with a per-session dedup cache.
pub struct RealWorldEntityFactory<'a> {
    lemmatizer: &'a dyn Lemmatizer,
    scope: String,
    document_iri: Option<String>,
    timestamp: DateTime<Utc>,
    cache: IndexMap<String, ()>,
}

impl<'a> RealWorldEntityFactory<'a> {
    #[must_use]
    pub fn new(
        lemmatizer: &'a dyn Lemmatizer,
        scope: impl Into<String>,
        document_iri: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            lemmatizer,
            scope: scope.into(),
            document_iri,
            timestamp,
            cache: IndexMap::new(),
        }
    }

    /// Build Tier 2 for every referent and attach `is_about` links back onto
    /// the referents.
    pub fn build_all(&mut self, referents: &mut [DiscourseReferent]) -> Tier2Set {
        let mut set = Tier2Set::default();
        for referent in referents.iter() {
            let tier2_id = self.create_for(referent, &mut set);
            set.link_map.insert(referent.id.clone(), tier2_id);
        }
        Self::link_referents_to_tier2(referents, &set.link_map);
        set
    }

    /// Attach `is_about` from each referent to its Tier 2 counterpart.
    pub fn link_referents_to_tier2(
        referents: &mut [DiscourseReferent],
        link_map: &IndexMap<String, String>,
    ) {
        for referent in referents.iter_mut() {
            if let Some(tier2_id) = link_map.get(&referent.id) {
                referent.is_about = Some(tier2_id.clone());
            }
        }
    }

    fn create_for(&mut self, referent: &DiscourseReferent, set: &mut Tier2Set) -> String {
        // Plural persons with a known count become an aggregate of members.
        if referent.denoted_type == vocab::BFO_OBJECT_AGGREGATE {
            if let Some(count) = referent.quantity.filter(|&n| n >= 2) {
                let head = head_word(&referent.label);
                if lexicon::PERSONS.contains(singularize(&head).as_str()) {
                    return self.create_aggregate(referent, count as usize, set);
                }
            }
            // Plural persons without a count stay a plain group entity.
            let head = head_word(&referent.label);
            if lexicon::PERSONS.contains(singularize(&head).as_str()) {
                return self.create_entity(referent, vocab::CCO_GROUP_OF_PERSONS, set);
            }
        }
        let specific = self.specific_type(referent);
        self.create_entity(referent, &specific, set)
    }

    /// Specific Tier 2 type: the referent's denoted type passes through
    /// unless it is the BFO root fallback, in which case person/organization
    /// keyword checks over the head noun run one last time.
    fn specific_type(&self, referent: &DiscourseReferent) -> String {
        let denoted = referent.denoted_type.as_str();
        if denoted.is_empty() || denoted == vocab::BFO_ENTITY {
            let head = singularize(&head_word(&referent.label));
            if lexicon::PERSONS.contains(head.as_str()) {
                return vocab::CCO_PERSON.to_string();
            }
            if lexicon::ORGANIZATIONS.contains(head.as_str()) {
                return vocab::CCO_ORGANIZATION.to_string();
            }
            return vocab::BFO_ENTITY.to_string();
        }
        denoted.to_string()
    }

    fn create_entity(
        &mut self,
        referent: &DiscourseReferent,
        specific: &str,
        set: &mut Tier2Set,
    ) -> String {
        let normalized = self.normalize_label(&referent.label);
        let type_label = vocab::type_label(specific);
        let clean = ids::id_fragment(&normalized);
        let id = ids::entity_id(type_label, &clean, &normalized, specific, &self.scope);
        if self.cache.contains_key(&id) {
            return id;
        }
        self.cache.insert(id.clone(), ());

        let class_level = matches!(
            referent.genericity.as_ref().map(|g| g.category),
            Some(GenericityCategory::Gen | GenericityCategory::Univ)
        );
        let marker_type = if class_level {
            vocab::OWL_CLASS
        } else {
            vocab::OWL_NAMED_INDIVIDUAL
        };
        let class_nomination = class_level.then(|| {
            let head = singularize(&head_word(&normalized));
            ClassNomination::unresolved(
                title_case(&head),
                referent
                    .genericity
                    .as_ref()
                    .map(|g| g.basis.clone())
                    .unwrap_or_else(|| "genericity".to_string()),
            )
        });

        debug!(id = %id, label = %normalized, specific, "minted tier2 entity");
        set.entities.push(RealWorldEntity {
            id: id.clone(),
            label: normalized,
            types: vec![specific.to_string(), marker_type.to_string()],
            instantiated_at: self.timestamp,
            instantiated_by: self.document_iri.clone(),
            is_bearer_of: Vec::new(),
            genericity_category: referent.genericity.as_ref().map(|g| g.category),
            class_nomination,
        });
        id
    }

    fn create_aggregate(
        &mut self,
        referent: &DiscourseReferent,
        count: usize,
        set: &mut Tier2Set,
    ) -> String {
        let normalized = self.normalize_label(&referent.label);
        let clean = ids::id_fragment(&normalized);
        let id = ids::entity_id(
            "ObjectAggregate",
            &clean,
            &normalized,
            vocab::BFO_OBJECT_AGGREGATE,
            &self.scope,
        );
        if self.cache.contains_key(&id) {
            return id;
        }
        self.cache.insert(id.clone(), ());

        let singular = singularize(&head_word(&normalized));
        let mut member_ids = Vec::with_capacity(count);
        for index in 1..=count {
            let member_label = format!("{singular} {index}");
            let member_id = ids::entity_id(
                "Person",
                &ids::id_fragment(&member_label),
                &member_label,
                vocab::CCO_PERSON,
                &self.scope,
            );
            set.members.push(AggregateMember {
                id: member_id.clone(),
                label: member_label,
                member_index: index,
                member_count: count,
                is_bearer_of: Vec::new(),
            });
            member_ids.push(member_id);
        }
        debug!(id = %id, count, "minted object aggregate");
        set.aggregates.push(ObjectAggregate {
            id: id.clone(),
            label: normalized,
            has_member_part: member_ids,
            member_count: count,
        });
        id
    }

    /// Canonical label: lower-case (acronyms keep their case), leading
    /// determiner, quantifier, and modal adjectives stripped, trailing
    /// punctuation stripped, head noun lemmatized (acronyms skipped).
    fn normalize_label(&self, label: &str) -> String {
        let trimmed = label.trim().trim_end_matches(['.', ',', ';', '!', '?']);
        let mut words: Vec<String> = trimmed
            .split_whitespace()
            .map(|w| {
                if is_acronym(w) {
                    w.to_string()
                } else {
                    w.to_lowercase()
                }
            })
            .collect();
        while let Some(first) = words.first() {
            let strip = matches!(
                first.as_str(),
                "the" | "a" | "an" | "this" | "that" | "these" | "those"
            ) || lexicon::MODAL_ADJECTIVES.contains(first.as_str())
                || lexicon::SCARCITY_MARKERS.contains(first.as_str())
                || first.chars().all(|c| c.is_ascii_digit())
                || matches!(
                    first.as_str(),
                    "one" | "two" | "three" | "four" | "five" | "six" | "seven" | "eight"
                        | "nine" | "ten"
                );
            if strip && words.len() > 1 {
                words.remove(0);
            } else {
                break;
            }
        }
        if let Some(head) = words.last_mut() {
            if !is_acronym(head) {
                *head = self.lemmatizer.lemmatize(head, "NN");
            }
        }
        words.join(" ")
    }
}

fn head_word(label: &str) -> String {
    label
        .split_whitespace()
        .last()
        .unwrap_or(label)
        .to_lowercase()
}

fn is_acronym(word: &str) -> bool {
    word.len() >= 2 && word.chars().all(|c| c.is_ascii_uppercase())
}

fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tagteam_core::{Definiteness, GenericityReading, ReferentialStatus};
    use tagteam_tokenizer::RuleLemmatizer;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn referent(label: &str, denoted: &str) -> DiscourseReferent {
        DiscourseReferent::new(
            format!("inst:ref_0_{}", label.len()),
            label.to_string(),
            0,
            label.len(),
            Definiteness::Definite,
            ReferentialStatus::Presupposed,
            denoted.to_string(),
        )
    }

    fn factory(lemmatizer: &RuleLemmatizer) -> RealWorldEntityFactory<'_> {
        RealWorldEntityFactory::new(lemmatizer, "doc1", Some("doc:doc1".to_string()), timestamp())
    }

    #[test]
    fn mints_stable_content_addressed_ids() {
        let lemmatizer = RuleLemmatizer::new();
        let mut referents = vec![referent("the last ventilator", vocab::CCO_ARTIFACT)];
        let set_a = factory(&lemmatizer).build_all(&mut referents.clone());
        let set_b = factory(&lemmatizer).build_all(&mut referents);
        assert_eq!(set_a.entities[0].id, set_b.entities[0].id);
        assert!(set_a.entities[0].id.starts_with("inst:Artifact_"));
    }

    #[test]
    fn label_normalisation_strips_determiner_and_modal() {
        let lemmatizer = RuleLemmatizer::new();
        let mut referents = vec![referent("possible diabetes", vocab::BFO_DISPOSITION)];
        let set = factory(&lemmatizer).build_all(&mut referents);
        assert_eq!(set.entities[0].label, "diabetes");
        assert!(set.entities[0].id.starts_with("inst:Disposition_diabetes_"));
    }

    #[test]
    fn acronyms_keep_case_and_skip_lemmatization() {
        let lemmatizer = RuleLemmatizer::new();
        let mut referents = vec![referent("DHS", vocab::CCO_ORGANIZATION)];
        let set = factory(&lemmatizer).build_all(&mut referents);
        assert_eq!(set.entities[0].label, "DHS");
    }

    #[test]
    fn deduplicates_by_generated_id() {
        let lemmatizer = RuleLemmatizer::new();
        let mut referents = vec![
            referent("the doctor", vocab::CCO_PERSON),
            {
                let mut r = referent("doctor", vocab::CCO_PERSON);
                r.id = "inst:ref_30_36".to_string();
                r
            },
        ];
        let set = factory(&lemmatizer).build_all(&mut referents);
        assert_eq!(set.entities.len(), 1);
        // Both referents point at the single shared entity.
        assert_eq!(referents[0].is_about, referents[1].is_about);
    }

    #[test]
    fn generic_subjects_become_classes() {
        let lemmatizer = RuleLemmatizer::new();
        let mut r = referent("Dogs", vocab::BFO_MATERIAL_ENTITY);
        r.genericity = Some(GenericityReading {
            category: GenericityCategory::Gen,
            confidence: 0.95,
            basis: "bare_plural".to_string(),
            alternative: None,
        });
        let mut referents = vec![r];
        let set = factory(&lemmatizer).build_all(&mut referents);
        let entity = &set.entities[0];
        assert!(entity.types.contains(&vocab::OWL_CLASS.to_string()));
        let nomination = entity.class_nomination.as_ref().unwrap();
        assert_eq!(nomination.status, "unresolved");
        assert_eq!(nomination.nominated_class_label, "Dog");
    }

    #[test]
    fn plural_persons_with_count_become_aggregate() {
        let lemmatizer = RuleLemmatizer::new();
        let mut r = referent("two critically ill patients", vocab::BFO_OBJECT_AGGREGATE);
        r.quantity = Some(2);
        let mut referents = vec![r];
        let set = factory(&lemmatizer).build_all(&mut referents);
        assert_eq!(set.aggregates.len(), 1);
        assert_eq!(set.members.len(), 2);
        let aggregate = &set.aggregates[0];
        assert_eq!(aggregate.member_count, 2);
        assert_eq!(aggregate.has_member_part.len(), 2);
        assert_eq!(set.members[0].label, "patient 1");
        assert_eq!(set.members[1].member_index, 2);
        assert_eq!(referents[0].is_about.as_deref(), Some(aggregate.id.as_str()));
    }

    #[test]
    fn plural_persons_without_count_stay_group() {
        let lemmatizer = RuleLemmatizer::new();
        let mut referents = vec![referent("patients", vocab::BFO_OBJECT_AGGREGATE)];
        let set = factory(&lemmatizer).build_all(&mut referents);
        assert!(set.aggregates.is_empty());
        assert_eq!(set.entities[0].specific_type(), vocab::CCO_GROUP_OF_PERSONS);
    }

    #[test]
    fn provenance_fields_are_set() {
        let lemmatizer = RuleLemmatizer::new();
        let mut referents = vec![referent("the doctor", vocab::CCO_PERSON)];
        let set = factory(&lemmatizer).build_all(&mut referents);
        assert_eq!(set.entities[0].instantiated_at, timestamp());
        assert_eq!(set.entities[0].instantiated_by.as_deref(), Some("doc:doc1"));
    }
}
