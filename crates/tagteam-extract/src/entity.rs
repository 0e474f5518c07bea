//! Tier 1 entity extraction
//!
//! Two candidate sources are combined: NP-chunk components and proper-name
//! signals. Each candidate is classified by the typing cascade, then refined
//! by its governing verb, given definiteness and referential status, and
//! finally post-filtered (title fragments, appositives).

use crate::lexicon;
use crate::typing::{self, DomainConfigLoader, TypeQuery};
use serde::{Deserialize, Serialize};
use tagteam_core::{
    vocab, CoordinationType, Definiteness, DiscourseReferent, PronounType, ReferentialStatus,
    TemporalUnit,
};
use std::collections::HashMap;
use tagteam_tokenizer::{
    singularize, ChunkComponent, ChunkKind, ComponentRole, Lemmatizer, NpChunk, NpChunker, Token,
};
use tracing::debug;

/// Kind of an externally-supplied named-entity signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NerKind {
    Person,
    Organization,
    Place,
}

impl NerKind {
    fn type_iri(self) -> &'static str {
        match self {
            NerKind::Person => vocab::CCO_PERSON,
            NerKind::Organization => vocab::CCO_ORGANIZATION,
            NerKind::Place => vocab::CCO_FACILITY,
        }
    }
}

/// A proper-name span recognised by an external NER collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEntitySignal {
    pub text: String,
    pub kind: NerKind,
    pub start: usize,
    pub end: usize,
}

/// Everything entity extraction reads for one document.
#[derive(Debug)]
pub struct ExtractionContext<'a> {
    pub text: &'a str,
    pub tokens: &'a [Token],
    pub tags: &'a [String],
    pub chunks: &'a [NpChunk],
    pub ner_signals: &'a [NamedEntitySignal],
}

/// Chunk-and-name driven Tier 1 extractor.
pub struct EntityExtractor<'a> {
    lemmatizer: &'a dyn Lemmatizer,
    config: Option<&'a dyn DomainConfigLoader>,
}

impl<'a> EntityExtractor<'a> {
    #[must_use]
    pub fn new(lemmatizer: &'a dyn Lemmatizer) -> Self {
        Self {
            lemmatizer,
            config: None,
        }
    }

    #[must_use]
    pub fn with_config(lemmatizer: &'a dyn Lemmatizer, config: &'a dyn DomainConfigLoader) -> Self {
        Self {
            lemmatizer,
            config: Some(config),
        }
    }

    /// Extract discourse referents in text order.
    #[must_use]
    pub fn extract(&self, ctx: &ExtractionContext<'_>) -> Vec<DiscourseReferent> {
        let mut referents: Vec<DiscourseReferent> = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        let mut typed_rules: HashMap<String, &'static str> = HashMap::new();

        for chunk in ctx.chunks {
            for component in NpChunker::extract_components(chunk) {
                if lexicon::TEMPORAL_ADVERBS.contains(component.text.to_lowercase().as_str()) {
                    continue;
                }
                // A PP-modified chunk is represented by its head NP and its
                // PP object; the covering span would double-count both.
                if chunk.kind == ChunkKind::PpModified
                    && matches!(component.role, ComponentRole::Phrase)
                {
                    continue;
                }
                let normalized = normalize_surface(&component.text);
                if seen.contains(&normalized) {
                    continue;
                }
                seen.push(normalized);
                let (referent, rule) = self.materialize(ctx, chunk, &component);
                typed_rules.insert(referent.id.clone(), rule);
                referents.push(referent);
            }
        }

        self.add_pronouns(ctx, &mut referents);
        self.mark_coordination(ctx, &mut referents);
        self.inherit_symptom_types(&mut referents);
        self.merge_proper_names(ctx, &mut referents, &typed_rules);
        self.refine_by_governing_verb(ctx, &mut referents);
        post_filter(ctx, &mut referents);
        referents.sort_by_key(|r| (r.start, r.end));
        referents
    }

    fn materialize(
        &self,
        ctx: &ExtractionContext<'_>,
        chunk: &NpChunk,
        component: &ChunkComponent,
    ) -> (DiscourseReferent, &'static str) {
        let head_lower = component.head_noun.to_lowercase();
        let is_plural = singularize(&head_lower) != head_lower
            || head_tag(ctx, component).is_some_and(|t| matches!(t, "NNS" | "NNPS"));
        // Sentence-initial capitalisation is orthography, not a proper name.
        let is_proper = head_tag(ctx, component).is_some_and(|t| matches!(t, "NNP" | "NNPS"))
            || (looks_proper(&component.text) && !is_sentence_initial(ctx.text, component.start));
        let has_of_complement = matches!(component.role, ComponentRole::HeadNp)
            && chunk.preposition.as_deref() == Some("of");
        let temporal_unit = TemporalUnit::parse_word(&component.head_noun);
        let modifiers: Vec<&str> = component
            .text
            .split_whitespace()
            .filter(|w| !w.eq_ignore_ascii_case(&component.head_noun))
            .collect();

        let query = TypeQuery {
            text: &component.text,
            head: &component.head_noun,
            head_tag: head_tag(ctx, component).unwrap_or("NN"),
            determiner: component.determiner.as_deref(),
            modifiers,
            has_of_complement,
            is_pronoun: false,
            is_plural,
            is_proper,
            quantity: component.quantity,
            temporal_unit,
        };
        let decision = typing::infer_type(&query, self.config);
        debug!(text = %component.text, iri = %decision.iri, rule = decision.rule, "typed candidate");

        let definiteness = self.detect_definiteness(ctx, component);
        let referential_status =
            self.detect_referential_status(ctx, component, definiteness, &decision.iri);

        let mut referent = DiscourseReferent::new(
            referent_id(component.start, component.end),
            component.text.clone(),
            component.start,
            component.end,
            definiteness,
            referential_status,
            decision.iri,
        );
        referent.quantity = component.quantity;
        referent.quantifier = component.quantifier.clone();
        referent.temporal_unit = temporal_unit;

        // Scarcity markers sit on adjective (or "last"-determiner) position.
        let marker = component
            .adjectives
            .iter()
            .map(|a| a.to_lowercase())
            .find(|a| lexicon::SCARCITY_MARKERS.contains(a.as_str()));
        if let Some(marker) = marker {
            if referent.quantity.is_none()
                && lexicon::SINGLETON_SCARCITY_MARKERS.contains(&marker.as_str())
            {
                referent.quantity = Some(1);
            }
            referent.scarcity_marker = Some(marker);
        }

        match &component.role {
            ComponentRole::Possessor => referent.is_possessor = true,
            ComponentRole::PpObject { preposition } => {
                referent.is_pp_object = true;
                referent.preposition = Some(preposition.clone());
                referent.introducing_preposition = Some(preposition.clone());
            }
            ComponentRole::HeadNp | ComponentRole::Phrase => {}
        }
        (referent, decision.rule)
    }

    /// Pronoun and Wh-word candidates from the raw tag stream.
    fn add_pronouns(&self, ctx: &ExtractionContext<'_>, referents: &mut Vec<DiscourseReferent>) {
        for (i, token) in ctx.tokens.iter().enumerate() {
            let tag = ctx.tags[i].as_str();
            let (pronoun_type, definiteness, status) = match tag {
                "PRP" => (
                    PronounType::Personal,
                    Definiteness::Anaphoric,
                    ReferentialStatus::Anaphoric,
                ),
                "PRP$" => (
                    PronounType::Possessive,
                    Definiteness::Anaphoric,
                    ReferentialStatus::Anaphoric,
                ),
                "WP" | "WRB" => (
                    PronounType::Interrogative,
                    Definiteness::Interrogative,
                    ReferentialStatus::Interrogative,
                ),
                "WDT" => (
                    PronounType::Interrogative,
                    Definiteness::InterrogativeSelective,
                    ReferentialStatus::Interrogative,
                ),
                _ => continue,
            };
            if referents.iter().any(|r| r.start <= token.start && token.end <= r.end) {
                continue;
            }
            let lower = token.text.to_lowercase();
            let query = TypeQuery {
                text: &token.text,
                head: &token.text,
                head_tag: tag,
                determiner: None,
                modifiers: Vec::new(),
                has_of_complement: false,
                is_pronoun: true,
                is_plural: matches!(lower.as_str(), "they" | "them" | "these" | "those" | "we" | "us"),
                is_proper: false,
                quantity: None,
                temporal_unit: None,
            };
            let decision = typing::infer_type(&query, self.config);
            let mut referent = DiscourseReferent::new(
                referent_id(token.start, token.end),
                token.text.clone(),
                token.start,
                token.end,
                definiteness,
                status,
                decision.iri,
            );
            referent.is_pronoun = true;
            referent.pronoun_type = Some(pronoun_type);
            referents.push(referent);
        }
    }

    /// Conjunct flags for "X and Y" / "X or Y" over adjacent referents.
    fn mark_coordination(&self, ctx: &ExtractionContext<'_>, referents: &mut [DiscourseReferent]) {
        let mut marks: Vec<(usize, CoordinationType)> = Vec::new();
        for i in 0..referents.len() {
            for j in 0..referents.len() {
                if referents[i].end >= referents[j].start || i == j {
                    continue;
                }
                let between = &ctx.text[referents[i].end..referents[j].start];
                let word = between.trim().trim_matches(',').trim().to_lowercase();
                let coordination = match word.as_str() {
                    "and" => Some(CoordinationType::Conjunction),
                    "or" => Some(CoordinationType::Disjunction),
                    _ => None,
                };
                if let Some(kind) = coordination {
                    marks.push((i, kind));
                    marks.push((j, kind));
                }
            }
        }
        for (idx, kind) in marks {
            referents[idx].is_conjunct = true;
            referents[idx].coordination_type = Some(kind);
        }
    }

    /// Coordinated symptom conjuncts share a type; any disease makes the
    /// whole group dispositional.
    fn inherit_symptom_types(&self, referents: &mut [DiscourseReferent]) {
        let conjuncts: Vec<usize> = referents
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_conjunct)
            .map(|(i, _)| i)
            .collect();
        if conjuncts.len() < 2 {
            return;
        }
        let any_disease = conjuncts.iter().any(|&i| {
            let head = singularize(&head_word(&referents[i].label));
            lexicon::DISEASE_TERMS.contains(head.as_str())
        });
        let any_symptom = conjuncts.iter().any(|&i| {
            let head = singularize(&head_word(&referents[i].label));
            lexicon::SYMPTOM_TERMS.contains(head.as_str())
        });
        if any_disease {
            for &i in &conjuncts {
                referents[i].denoted_type = vocab::BFO_DISPOSITION.to_string();
            }
        } else if any_symptom {
            for &i in &conjuncts {
                referents[i].denoted_type = vocab::BFO_QUALITY.to_string();
            }
        }
    }

    /// Proper-name signals: upgrade a matching generic referent in place, or
    /// add a fresh referent when nothing matches.
    fn merge_proper_names(
        &self,
        ctx: &ExtractionContext<'_>,
        referents: &mut Vec<DiscourseReferent>,
        typed_rules: &HashMap<String, &'static str>,
    ) {
        for signal in ctx.ner_signals {
            let target = referents.iter_mut().find(|r| {
                normalize_surface(&r.label) == normalize_surface(&signal.text)
                    || (r.start <= signal.start && signal.end <= r.end)
            });
            match target {
                Some(referent) => {
                    // Heuristic guesses yield to the explicit signal; anything
                    // the cascade committed to by vocabulary stands.
                    let generic = matches!(
                        referent.denoted_type.as_str(),
                        vocab::BFO_MATERIAL_ENTITY | vocab::BFO_ENTITY
                    ) || typed_rules.get(&referent.id).copied()
                        == Some("proper_name");
                    if generic {
                        referent.denoted_type = signal.kind.type_iri().to_string();
                    }
                }
                None => {
                    let mut referent = DiscourseReferent::new(
                        referent_id(signal.start, signal.end),
                        signal.text.clone(),
                        signal.start,
                        signal.end,
                        Definiteness::Definite,
                        ReferentialStatus::Presupposed,
                        signal.kind.type_iri().to_string(),
                    );
                    referent.is_pronoun = false;
                    referents.push(referent);
                }
            }
        }
    }

    /// Verb-context refinement for ambiguous object nouns.
    fn refine_by_governing_verb(
        &self,
        ctx: &ExtractionContext<'_>,
        referents: &mut [DiscourseReferent],
    ) {
        for referent in referents.iter_mut() {
            let head = head_word(&referent.label);
            if !lexicon::AMBIGUOUS_OBJECT_NOUNS.contains(singularize(&head).as_str()) {
                continue;
            }
            let Some((verb_idx, verb)) = nearest_preceding_verb(ctx, referent.start) else {
                continue;
            };
            // A content noun between the verb and this phrase breaks government.
            let blocked = ctx.tokens.iter().enumerate().any(|(i, t)| {
                i > verb_idx
                    && t.end <= referent.start
                    && ctx.tags[i].starts_with("NN")
            });
            if blocked {
                continue;
            }
            let lemma = self.lemmatizer.lemmatize(&verb, "VB");
            if let Some(refined) = typing::refine_ambiguous_object(&head, &lemma) {
                referent.denoted_type = refined.to_string();
                referent.type_refined_by = Some(verb);
            }
        }
    }

    fn detect_definiteness(
        &self,
        ctx: &ExtractionContext<'_>,
        component: &ChunkComponent,
    ) -> Definiteness {
        if let Some(det) = &component.determiner {
            return classify_determiner(det);
        }
        // Backwards scan, at most six tokens, stopping at punctuation or a
        // clause boundary.
        let before: Vec<usize> = ctx
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.end <= component.start)
            .map(|(i, _)| i)
            .collect();
        for &i in before.iter().rev().take(6) {
            let word = ctx.tokens[i].text.to_lowercase();
            let tag = ctx.tags[i].as_str();
            if tag.starts_with(['.', ',', ':']) || lexicon::CLAUSE_BOUNDARY_WORDS.contains(word.as_str())
            {
                break;
            }
            if tag == "DT" || tag == "PRP$" || tag == "WDT" || tag == "WP" {
                return classify_determiner(&word);
            }
        }
        Definiteness::Indefinite
    }

    fn detect_referential_status(
        &self,
        ctx: &ExtractionContext<'_>,
        component: &ChunkComponent,
        definiteness: Definiteness,
        _denoted_type: &str,
    ) -> ReferentialStatus {
        if matches!(
            definiteness,
            Definiteness::Interrogative | Definiteness::InterrogativeSelective
        ) {
            return ReferentialStatus::Interrogative;
        }
        // Leading modal adjective.
        if component
            .adjectives
            .first()
            .map(|a| lexicon::MODAL_ADJECTIVES.contains(a.to_lowercase().as_str()))
            .unwrap_or(false)
        {
            return ReferentialStatus::Hypothetical;
        }
        // Hypothetical marker within 50 characters before the phrase.
        let mut window_start = component.start.saturating_sub(50);
        while !ctx.text.is_char_boundary(window_start) {
            window_start += 1;
        }
        let window = ctx.text[window_start..component.start].to_lowercase();
        if lexicon::HYPOTHETICAL_MARKERS
            .iter()
            .any(|m| window.split(|c: char| !c.is_ascii_alphanumeric()).any(|w| w == *m))
        {
            return ReferentialStatus::Hypothetical;
        }
        if definiteness == Definiteness::Definite {
            // Definite non-first-mention presupposes its referent.
            let normalized = normalize_surface(&component.text);
            let earlier = ctx.chunks.iter().any(|c| {
                c.end <= component.start && normalize_surface(&c.text) == normalized
            });
            if earlier {
                return ReferentialStatus::Presupposed;
            }
        }
        ReferentialStatus::Introduced
    }
}

fn classify_determiner(det: &str) -> Definiteness {
    match det.to_lowercase().as_str() {
        "the" | "this" | "that" | "these" | "those" | "my" | "your" | "his" | "her" | "its"
        | "our" | "their" => Definiteness::Definite,
        "which" => Definiteness::InterrogativeSelective,
        "what" | "whose" => Definiteness::Interrogative,
        _ => Definiteness::Indefinite,
    }
}

fn referent_id(start: usize, end: usize) -> String {
    format!("inst:ref_{start}_{end}")
}

fn normalize_surface(text: &str) -> String {
    text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

fn head_word(label: &str) -> String {
    label
        .split_whitespace()
        .last()
        .unwrap_or(label)
        .to_lowercase()
}

fn head_tag<'a>(ctx: &'a ExtractionContext<'_>, component: &ChunkComponent) -> Option<&'a str> {
    ctx.tokens
        .iter()
        .position(|t| t.end == component.end)
        .map(|i| ctx.tags[i].as_str())
}

fn looks_proper(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    !words.is_empty()
        && words
            .iter()
            .all(|w| w.chars().next().is_some_and(char::is_uppercase))
}

/// Is the span the first word of its sentence?
fn is_sentence_initial(text: &str, start: usize) -> bool {
    let before = text[..start].trim_end();
    before.is_empty() || before.ends_with(['.', '!', '?'])
}

fn nearest_preceding_verb(ctx: &ExtractionContext<'_>, before: usize) -> Option<(usize, String)> {
    ctx.tokens
        .iter()
        .enumerate()
        .filter(|(i, t)| t.end <= before && ctx.tags[*i].starts_with("VB"))
        .next_back()
        .map(|(i, t)| (i, t.text.clone()))
}

/// Title-fragment suppression and appositive removal.
fn post_filter(ctx: &ExtractionContext<'_>, referents: &mut Vec<DiscourseReferent>) {
    // Single words strictly contained (as whole words) in a longer referent.
    let multi: Vec<Vec<String>> = referents
        .iter()
        .filter(|r| r.label.split_whitespace().count() > 1)
        .map(|r| {
            r.label
                .split_whitespace()
                .map(|w| w.trim_matches('.').to_lowercase())
                .collect()
        })
        .collect();
    referents.retain(|r| {
        if r.label.split_whitespace().count() != 1 || r.is_pronoun {
            return true;
        }
        let word = r.label.trim_matches('.').to_lowercase();
        !multi.iter().any(|words| words.len() > 1 && words.contains(&word))
    });

    // Appositives: a comma-flanked NP immediately following another NP.
    let spans: Vec<(usize, usize)> = referents.iter().map(|r| (r.start, r.end)).collect();
    referents.retain(|r| {
        let before = ctx.text[..r.start].trim_end();
        if !before.ends_with(',') {
            return true;
        }
        let after = ctx.text[r.end..].trim_start();
        let comma_flanked = after.starts_with(',');
        if !comma_flanked {
            return true;
        }
        let preceding_np = spans.iter().any(|&(_, end)| {
            end < r.start && ctx.text[end..r.start].trim().trim_matches(',').trim().is_empty()
        });
        !preceding_np
    });
}
