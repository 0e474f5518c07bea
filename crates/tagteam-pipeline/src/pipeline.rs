//! Document pipeline orchestration
//!
//! One forward pass per document:
//!
//! ```text
//! text ─► tokens ─► tags ─► chunks ──► Tier 1 referents ─► genericity
//!                     │                     │
//!   dependency parse ─┴─► acts/assertions  ├─► Tier 2 entities/aggregates
//!                              │           │
//!                              └── resolve participants ─► roles
//!                                       │
//!        markers: certainty · ambiguity · alternatives · scarcity · directives
//!                                       │
//!                        flat JSON-LD graph ─► validation ─► document
//! ```
//!
//! Every stage is a pure function of its inputs; the only mutable state is
//! the Tier 2 factory cache, which lives and dies with one build call.

use crate::config::PipelineConfig;
use chrono::Utc;
use indexmap::IndexMap;
use serde_json::Value;
use tagteam_core::{
    ids, vocab, Act, DepArc, DepTree, DiscourseReferent, GraphError, GraphResult, Node,
    StructuralAssertion,
};
use tagteam_extract::{
    ActExtraction, DomainConfigLoader, EntityExtractor, ExtractionContext, NamedEntitySignal,
    NerKind, RealWorldEntityFactory, RoleDetector, Tier2Set, TreeActExtractor,
};
use tagteam_extract::roles::BearerInfo;
use tagteam_graph::{node_to_value, JsonLdSerializer, ShmlValidator, ValidationReport};
use tagteam_markers::{
    AlternativeGraphBuilder, AlternativeGraphConfig, AmbiguityContext, AmbiguityDetector,
    CertaintyAnalysis, CertaintyAnalyzer, ComplexDesignatorDetector, DirectiveContentFactory,
    GenericityDetector, ScarcityAssertionFactory, SubjectContext,
};
use tagteam_tokenizer::{Lemmatizer, NpChunker, PosTagger, RuleLemmatizer, Token, Tokenizer};
use tracing::{debug, warn};

/// Externally-supplied dependency parse: 1-indexed ids, `head = 0` roots.
#[derive(Debug, Clone, Default)]
pub struct DependencyParse {
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
    pub arcs: Vec<DepArc>,
}

/// Everything one build call produces.
#[derive(Debug)]
pub struct PipelineOutput {
    /// The flat graph, alternatives included.
    pub graph: Vec<Value>,
    /// `{ "@context": ..., "@graph": [...] }`.
    pub document: Value,
    pub serialized: String,
    pub report: ValidationReport,
    pub certainty: CertaintyAnalysis,
}

/// The top-level pipeline.
pub struct GraphBuilder {
    config: PipelineConfig,
    lemmatizer: Box<dyn Lemmatizer>,
    domain_config: Option<Box<dyn DomainConfigLoader>>,
}

impl GraphBuilder {
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            lemmatizer: Box::new(RuleLemmatizer::new()),
            domain_config: None,
        }
    }

    #[must_use]
    pub fn with_lemmatizer(mut self, lemmatizer: Box<dyn Lemmatizer>) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    #[must_use]
    pub fn with_domain_config(mut self, loader: Box<dyn DomainConfigLoader>) -> Self {
        self.domain_config = Some(loader);
        self
    }

    /// Build the knowledge graph for one document.
    pub fn build(
        &self,
        text: &str,
        parse: Option<&DependencyParse>,
        ner_signals: &[NamedEntitySignal],
    ) -> GraphResult<PipelineOutput> {
        if text.trim().is_empty() {
            return Err(GraphError::EmptyInput);
        }
        let scope = self.config.scope().to_string();
        let timestamp = self.config.timestamp.unwrap_or_else(Utc::now);

        // Lexical layer.
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize(text);
        let words: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();
        let tags = PosTagger::new().tag(&words);
        let chunks = NpChunker::new().chunk(&tokens, &tags, text);

        // Complex designators double as an internal organization-NER signal.
        let designators = ComplexDesignatorDetector::new().detect(&tokens);
        let mut signals: Vec<NamedEntitySignal> = ner_signals.to_vec();
        for designator in &designators {
            let already = signals
                .iter()
                .any(|s| s.start == designator.start && s.end == designator.end);
            if !already {
                signals.push(NamedEntitySignal {
                    text: designator.full_name.clone(),
                    kind: NerKind::Organization,
                    start: designator.start,
                    end: designator.end,
                });
            }
        }

        // Tier 1 extraction.
        let extractor = match &self.domain_config {
            Some(loader) => EntityExtractor::with_config(&*self.lemmatizer, &**loader),
            None => EntityExtractor::new(&*self.lemmatizer),
        };
        let mut referents = extractor.extract(&ExtractionContext {
            text,
            tokens: &tokens,
            tags: &tags,
            chunks: &chunks,
            ner_signals: &signals,
        });

        // Dependency layer.
        let (tree, token_spans) = match parse {
            Some(parse) => {
                let tree = DepTree::new(
                    parse.tokens.clone(),
                    parse.tags.clone(),
                    parse.arcs.clone(),
                )?;
                let spans = align_spans(text, &parse.tokens);
                (Some(tree), spans)
            }
            None => (None, Vec::new()),
        };
        let extraction = match &tree {
            Some(tree) => TreeActExtractor::new(&*self.lemmatizer).extract(tree),
            None => ActExtraction::default(),
        };

        // Genericity over subject positions, before Tier 2 exists.
        self.classify_subjects(&extraction, tree.as_ref(), &token_spans, &mut referents);

        // Tier 2.
        let mut tier2 = Tier2Set::default();
        if self.config.create_tier2 {
            let mut factory = RealWorldEntityFactory::new(
                &*self.lemmatizer,
                scope.clone(),
                self.config.document_iri.clone(),
                timestamp,
            );
            tier2 = factory.build_all(&mut referents);
        }

        // Acts and assertions, resolved onto Tier 2.
        let mut modal_markers: IndexMap<String, String> = IndexMap::new();
        let mut acts =
            self.resolve_acts(&extraction, &token_spans, &referents, &scope, &mut modal_markers);
        let assertions = self.resolve_assertions(&extraction, &token_spans, &referents, &scope);

        // Bearer catalogue for roles and ambiguity checks.
        let (bearer_infos, bearer_types, bearer_labels) = bearer_catalogue(&tier2, &referents);

        // Ambiguity detection sees raw agents; the emitted graph honours the
        // agent-compatibility invariant, so non-agentive subjects demote to
        // participants afterwards.
        let ambiguities = AmbiguityDetector::new().detect(&AmbiguityContext {
            text,
            referents: &referents,
            acts: &acts,
            modal_markers: &modal_markers,
            bearer_types: &bearer_types,
            bearer_labels: &bearer_labels,
        });
        for act in &mut acts {
            let demote = act
                .has_agent
                .as_ref()
                .and_then(|a| bearer_types.get(a))
                .is_some_and(|t| !vocab::is_agentive_type(t));
            if demote {
                if let Some(agent) = act.has_agent.take() {
                    act.has_participant.insert(0, agent);
                }
            }
        }

        // Roles.
        let role_set = RoleDetector::new().detect(&acts, &bearer_infos);
        for (bearer, roles) in &role_set.bearer_roles {
            if let Some(entity) = tier2.entities.iter_mut().find(|e| &e.id == bearer) {
                entity.is_bearer_of = roles.clone();
            } else if let Some(member) = tier2.members.iter_mut().find(|m| &m.id == bearer) {
                member.is_bearer_of = roles.clone();
            }
        }

        // ICE layer: scarcity promotions and directive content.
        let scarcity = ScarcityAssertionFactory::new(scope.clone(), timestamp)
            .promote(&referents, text);
        let directives = DirectiveContentFactory::new(scope.clone()).build(
            &acts,
            |id| modal_markers.get(id).map(String::as_str),
            text,
        );

        // Document-level certainty.
        let certainty = CertaintyAnalyzer::new().analyze(text);

        // Assemble and lower.
        let mut nodes: Vec<Node> = Vec::new();
        nodes.extend(referents.iter().cloned().map(Node::Referent));
        nodes.extend(tier2.entities.iter().cloned().map(Node::Entity));
        nodes.extend(tier2.aggregates.iter().cloned().map(Node::Aggregate));
        nodes.extend(tier2.members.iter().cloned().map(Node::Member));
        nodes.extend(acts.iter().cloned().map(Node::Act));
        nodes.extend(assertions.into_iter().map(Node::Assertion));
        nodes.extend(role_set.roles.iter().cloned().map(Node::Role));
        nodes.extend(scarcity.assertions.into_iter().map(Node::Ice));
        nodes.extend(directives.directives.into_iter().map(Node::Ice));
        for bearer in merge_bearers(scarcity.bearers, directives.bearers) {
            nodes.push(Node::Ibe(bearer));
        }
        for mut designator in designators {
            match resolve_designator(designator.start, designator.end, &referents) {
                Some(target) => {
                    designator.designates = Some(target);
                    nodes.push(Node::Designator(designator));
                }
                None => debug!(name = %designator.full_name, "designator left unresolved"),
            }
        }

        let mut graph: Vec<Value> = nodes.iter().map(node_to_value).collect();

        // Alternative readings.
        let alternative_builder = AlternativeGraphBuilder::with_config(AlternativeGraphConfig {
            iri_suffix: self.config.iri_suffix.clone(),
            preserve_original_links: self.config.preserve_original_links,
            include_metadata: self.config.include_metadata,
            default_plausibility: self.config.default_plausibility,
        });
        let mut counters: IndexMap<String, usize> = IndexMap::new();
        for ambiguity in &ambiguities {
            let counter = counters.entry(ambiguity.node_id.clone()).or_insert(1);
            let alternatives = alternative_builder.build(ambiguity, &graph, *counter);
            *counter += alternatives.len();
            graph.extend(alternatives);
        }

        // Validation and serialization.
        let report = ShmlValidator {
            strict: self.config.strict,
            verbose: self.config.verbose,
        }
        .validate(&graph);
        if self.config.strict && !report.is_conformant() {
            return Err(GraphError::ValidationFailed {
                violations: report.violations().len(),
            });
        }

        let serializer = JsonLdSerializer {
            compact: self.config.compact,
            pretty: self.config.pretty,
        };
        let document = serializer.document(&graph);
        let serialized = serializer.serialize(&graph);
        debug!(nodes = graph.len(), compliance = report.compliance_score, "document built");

        Ok(PipelineOutput {
            graph,
            document,
            serialized,
            report,
            certainty,
        })
    }

    /// Genericity classification for subject-position referents.
    fn classify_subjects(
        &self,
        extraction: &ActExtraction,
        tree: Option<&DepTree>,
        token_spans: &[(usize, usize)],
        referents: &mut [DiscourseReferent],
    ) {
        let Some(tree) = tree else { return };
        let detector = GenericityDetector::new();

        let mut subjects: Vec<(Vec<usize>, String, String, Option<String>)> = Vec::new();
        for act in &extraction.acts {
            let tokens = if act.is_passive {
                act.affected_tokens.clone()
            } else {
                act.agent_tokens.clone()
            };
            if !tokens.is_empty() {
                subjects.push((
                    tokens,
                    act.lemma.clone(),
                    act.tag.clone(),
                    act.modal_marker.clone(),
                ));
            }
        }
        for assertion in &extraction.assertions {
            if !assertion.subject_tokens.is_empty() {
                subjects.push((
                    assertion.subject_tokens.clone(),
                    "be".to_string(),
                    "VBZ".to_string(),
                    None,
                ));
            }
        }

        for (subject_tokens, predicate_lemma, predicate_tag, modal) in subjects {
            let Some(span) = span_of(&subject_tokens, token_spans) else {
                continue;
            };
            let Some(index) = best_overlap(span, referents) else {
                continue;
            };
            if referents[index].genericity.is_some() {
                continue;
            }
            let Some(&head_id) = subject_tokens.last() else {
                continue;
            };
            let head = tree.token(head_id).to_string();
            let head_tag = tree.tag(head_id).to_string();
            let determiner = referents[index]
                .label
                .split_whitespace()
                .next()
                .filter(|w| {
                    matches!(
                        w.to_lowercase().as_str(),
                        "the" | "a" | "an" | "this" | "that" | "these" | "those" | "all"
                            | "every" | "each" | "no" | "some" | "several" | "few" | "many"
                            | "my" | "your" | "his" | "her" | "its" | "our" | "their"
                    )
                })
                .map(str::to_string);
            let reading = detector.classify(&SubjectContext {
                determiner,
                is_plural: matches!(head_tag.as_str(), "NNS" | "NNPS"),
                head,
                head_tag,
                predicate_lemma: predicate_lemma.clone(),
                predicate_tag: predicate_tag.clone(),
                modal: modal.clone(),
            });
            referents[index].genericity = Some(reading);
        }
    }

    fn resolve_acts(
        &self,
        extraction: &ActExtraction,
        token_spans: &[(usize, usize)],
        referents: &[DiscourseReferent],
        scope: &str,
        modal_markers: &mut IndexMap<String, String>,
    ) -> Vec<Act> {
        let mut acts = Vec::with_capacity(extraction.acts.len());
        for ex in &extraction.acts {
            let id = format!(
                "inst:Act_{}_{}",
                ids::id_fragment(&ex.lemma),
                ids::content_hash(&[&ex.verb, &ex.root.to_string(), scope], 8)
            );
            let has_agent = resolve_tier2(&ex.agent_tokens, token_spans, referents);
            let affects = resolve_tier2(&ex.affected_tokens, token_spans, referents);
            let mut has_participant = Vec::new();
            for participant in &ex.participants {
                if let Some(target) = resolve_tier2(&participant.tokens, token_spans, referents) {
                    if Some(&target) != has_agent.as_ref()
                        && Some(&target) != affects.as_ref()
                        && !has_participant.contains(&target)
                    {
                        has_participant.push(target);
                    }
                } else {
                    warn!(act = %id, "participant span did not resolve");
                }
            }
            let occurs_during = resolve_tier2(&ex.temporal_tokens, token_spans, referents);

            if let Some(marker) = &ex.modal_marker {
                modal_markers.insert(id.clone(), marker.clone());
            }
            acts.push(Act {
                id,
                label: ex.verb.clone(),
                verb: ex.verb.clone(),
                lemma: ex.lemma.clone(),
                tag: ex.tag.clone(),
                pattern: ex.pattern,
                is_passive: ex.is_passive,
                is_negated: ex.is_negated,
                is_copular: ex.is_copular,
                modality: ex.modality,
                actuality: ex.actuality,
                has_agent,
                affects,
                has_participant,
                occurs_during,
            });
        }
        acts
    }

    fn resolve_assertions(
        &self,
        extraction: &ActExtraction,
        token_spans: &[(usize, usize)],
        referents: &[DiscourseReferent],
        scope: &str,
    ) -> Vec<StructuralAssertion> {
        let mut assertions = Vec::with_capacity(extraction.assertions.len());
        for (index, ex) in extraction.assertions.iter().enumerate() {
            let id = format!(
                "inst:Assertion_{}",
                ids::content_hash(
                    &[&ex.subject_text, ex.pattern.as_str(), &index.to_string(), scope],
                    8
                )
            );
            let label = match (&ex.copula, &ex.object_text) {
                (Some(copula), Some(object)) => {
                    format!("{} {} {}", ex.subject_text, copula, object)
                }
                _ => format!("{} ({})", ex.subject_text, ex.pattern.as_str()),
            };
            assertions.push(StructuralAssertion {
                id,
                label,
                pattern: ex.pattern,
                subject_text: ex.subject_text.clone(),
                object_text: ex.object_text.clone(),
                subject: resolve_tier2(&ex.subject_tokens, token_spans, referents),
                object: resolve_tier2(&ex.object_tokens, token_spans, referents),
                copula: ex.copula.clone(),
                negated: ex.negated,
                relation: ex.relation.clone(),
            });
        }
        assertions
    }
}

/// Sequentially align parse tokens onto character offsets.
fn align_spans(text: &str, tokens: &[String]) -> Vec<(usize, usize)> {
    let mut spans = Vec::with_capacity(tokens.len());
    let mut cursor = 0;
    for token in tokens {
        match text[cursor..].find(token.as_str()) {
            Some(found) => {
                let start = cursor + found;
                let end = start + token.len();
                spans.push((start, end));
                cursor = end;
            }
            None => spans.push((cursor, cursor)),
        }
    }
    spans
}

/// Character span covered by a 1-indexed token-id list.
fn span_of(token_ids: &[usize], spans: &[(usize, usize)]) -> Option<(usize, usize)> {
    let mut out: Option<(usize, usize)> = None;
    for &id in token_ids {
        let Some(&(start, end)) = spans.get(id.checked_sub(1)?) else {
            continue;
        };
        out = Some(match out {
            None => (start, end),
            Some((s, e)) => (s.min(start), e.max(end)),
        });
    }
    out
}

/// Referent with the largest overlap against a span.
fn best_overlap(span: (usize, usize), referents: &[DiscourseReferent]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (index, referent) in referents.iter().enumerate() {
        let lo = span.0.max(referent.start);
        let hi = span.1.min(referent.end);
        if hi <= lo {
            continue;
        }
        let overlap = hi - lo;
        if best.map_or(true, |(_, b)| overlap > b) {
            best = Some((index, overlap));
        }
    }
    best.map(|(index, _)| index)
}

fn resolve_tier2(
    token_ids: &[usize],
    spans: &[(usize, usize)],
    referents: &[DiscourseReferent],
) -> Option<String> {
    let span = span_of(token_ids, spans)?;
    let index = best_overlap(span, referents)?;
    referents[index].is_about.clone()
}

fn resolve_designator(
    start: usize,
    end: usize,
    referents: &[DiscourseReferent],
) -> Option<String> {
    let index = best_overlap((start, end), referents)?;
    referents[index].is_about.clone()
}

/// Per-bearer facts for role detection and ambiguity checks.
fn bearer_catalogue(
    tier2: &Tier2Set,
    referents: &[DiscourseReferent],
) -> (
    IndexMap<String, BearerInfo>,
    IndexMap<String, String>,
    IndexMap<String, String>,
) {
    let mut infos: IndexMap<String, BearerInfo> = IndexMap::new();
    let mut types: IndexMap<String, String> = IndexMap::new();
    let mut labels: IndexMap<String, String> = IndexMap::new();

    let preposition_for = |id: &str| {
        referents
            .iter()
            .find(|r| r.is_about.as_deref() == Some(id) && r.introducing_preposition.is_some())
            .and_then(|r| r.introducing_preposition.clone())
    };

    for entity in &tier2.entities {
        let specific = entity.specific_type().to_string();
        infos.insert(
            entity.id.clone(),
            BearerInfo {
                label: entity.label.clone(),
                is_person: vocab::is_person_type(&specific),
                is_agentive: vocab::is_agentive_type(&specific),
                member_ids: Vec::new(),
                preposition: preposition_for(&entity.id),
            },
        );
        types.insert(entity.id.clone(), specific);
        labels.insert(entity.id.clone(), entity.label.clone());
    }
    for aggregate in &tier2.aggregates {
        infos.insert(
            aggregate.id.clone(),
            BearerInfo {
                label: aggregate.label.clone(),
                is_person: true,
                is_agentive: false,
                member_ids: aggregate.has_member_part.clone(),
                preposition: preposition_for(&aggregate.id),
            },
        );
        types.insert(aggregate.id.clone(), vocab::BFO_OBJECT_AGGREGATE.to_string());
        labels.insert(aggregate.id.clone(), aggregate.label.clone());
    }
    for member in &tier2.members {
        infos.insert(
            member.id.clone(),
            BearerInfo {
                label: member.label.clone(),
                is_person: true,
                is_agentive: false,
                member_ids: Vec::new(),
                preposition: None,
            },
        );
        types.insert(member.id.clone(), vocab::CCO_PERSON.to_string());
        labels.insert(member.id.clone(), member.label.clone());
    }
    (infos, types, labels)
}

fn merge_bearers(
    first: Vec<tagteam_core::InformationBearer>,
    second: Vec<tagteam_core::InformationBearer>,
) -> Vec<tagteam_core::InformationBearer> {
    let mut merged: Vec<tagteam_core::InformationBearer> = Vec::new();
    for bearer in first.into_iter().chain(second) {
        match merged.iter_mut().find(|b| b.id == bearer.id) {
            Some(existing) => {
                for ice in bearer.concretizes {
                    if !existing.concretizes.contains(&ice) {
                        existing.concretizes.push(ice);
                    }
                }
            }
            None => merged.push(bearer),
        }
    }
    merged
}
