//! Act and structural-assertion extraction from the dependency tree
//!
//! Each root classifies as exactly one of five patterns, tried in order:
//! copular predication, existential, possessive `have`, verb-derived locative
//! relation, and the regular verb act. Embedded clauses (`advcl`,
//! `acl:relcl`, `acl`) recurse.
//!
//! Participants are kept as token-id lists; the pipeline resolves them to
//! Tier 2 entities by span overlap.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tagteam_core::{
    vocab, ActPattern, ActualityStatus, AssertionPattern, DepTree, Modality, TemporalUnit, UdLabel,
};
use tagteam_tokenizer::Lemmatizer;
use tracing::debug;

/// Prepositions that read a copular predicate as a location.
static LOCATIVE_PREPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["in", "at", "on", "near", "by", "under", "above", "behind"]
        .into_iter()
        .collect()
});

/// `<predicate head> <preposition>` → relation IRI.
static RELATION_INFERENCE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("component of", vocab::CCO_HAS_PART),
        ("member of", vocab::CCO_MEMBER_OF),
        ("type of", vocab::RDFS_SUBCLASS_OF),
        ("kind of", vocab::RDFS_SUBCLASS_OF),
        ("part of", vocab::BFO_PART_OF),
        ("example of", vocab::RDF_TYPE),
        ("instance of", vocab::RDF_TYPE),
        ("located in", vocab::BFO_LOCATED_IN),
        ("based in", vocab::BFO_LOCATED_IN),
        ("responsible for", vocab::CCO_HAS_FUNCTION),
    ]
    .into_iter()
    .collect()
});

static NEGATION_WORDS: &[&str] = &["not", "n't", "never", "no"];

/// A participant slot before entity resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActParticipant {
    pub tokens: Vec<usize>,
    pub preposition: Option<String>,
}

/// A verb act before entity resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedAct {
    pub root: usize,
    pub verb: String,
    pub lemma: String,
    pub tag: String,
    pub pattern: ActPattern,
    pub is_passive: bool,
    pub is_negated: bool,
    pub is_copular: bool,
    pub modality: Option<Modality>,
    pub actuality: ActualityStatus,
    pub modal_marker: Option<String>,
    pub agent_tokens: Vec<usize>,
    pub affected_tokens: Vec<usize>,
    pub participants: Vec<ActParticipant>,
    /// Temporal modifier tokens, if the clause carries one.
    pub temporal_tokens: Vec<usize>,
}

/// A structural assertion before entity resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedAssertion {
    pub pattern: AssertionPattern,
    pub subject_text: String,
    pub object_text: Option<String>,
    pub subject_tokens: Vec<usize>,
    pub object_tokens: Vec<usize>,
    pub copula: Option<String>,
    pub negated: bool,
    pub relation: Option<String>,
}

/// Output of one tree pass.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActExtraction {
    pub acts: Vec<ExtractedAct>,
    pub assertions: Vec<ExtractedAssertion>,
}

/// Dependency-tree driven act extractor.
pub struct TreeActExtractor<'a> {
    lemmatizer: &'a dyn Lemmatizer,
}

impl<'a> TreeActExtractor<'a> {
    #[must_use]
    pub fn new(lemmatizer: &'a dyn Lemmatizer) -> Self {
        Self { lemmatizer }
    }

    /// Extract acts and assertions for every root of the tree.
    #[must_use]
    pub fn extract(&self, tree: &DepTree) -> ActExtraction {
        let mut out = ActExtraction::default();
        for &root in tree.roots() {
            self.process_clause(tree, root, &mut out);
        }
        out
    }

    fn process_clause(&self, tree: &DepTree, root: usize, out: &mut ActExtraction) {
        if self.try_copular(tree, root, out)
            || self.try_existential(tree, root, out)
            || self.try_possessive(tree, root, out)
            || self.try_verb_derived_relation(tree, root, out)
        {
            self.recurse_embedded(tree, root, out);
            return;
        }
        self.emit_regular_act(tree, root, out);
        self.recurse_embedded(tree, root, out);
    }

    fn recurse_embedded(&self, tree: &DepTree, root: usize, out: &mut ActExtraction) {
        for label in [UdLabel::Advcl, UdLabel::AclRelcl, UdLabel::Acl] {
            for child in tree.children_with_label(root, &label) {
                self.process_clause(tree, child, out);
            }
        }
    }

    /// Pattern 1: copular predication, locative or relation-inferred.
    fn try_copular(&self, tree: &DepTree, root: usize, out: &mut ActExtraction) -> bool {
        let Some(cop) = tree.child_with_label(root, &UdLabel::Cop) else {
            return false;
        };
        let subject = self.subject_tokens(tree, root);
        let negated = is_negated(tree, root);
        let copula = tree.token(cop).to_string();

        // Locative: a case child of the predicate from the locative set.
        if let Some(case) = tree.child_with_label(root, &UdLabel::Case) {
            if LOCATIVE_PREPOSITIONS.contains(tree.token(case).to_lowercase().as_str()) {
                let object = subtree_minus(
                    tree,
                    root,
                    &[
                        UdLabel::Nsubj,
                        UdLabel::NsubjPass,
                        UdLabel::Cop,
                        UdLabel::Case,
                        UdLabel::Advmod,
                        UdLabel::Mark,
                    ],
                );
                out.assertions.push(ExtractedAssertion {
                    pattern: AssertionPattern::Locative,
                    subject_text: join_tokens(tree, &subject),
                    object_text: Some(join_tokens(tree, &object)),
                    subject_tokens: subject,
                    object_tokens: object,
                    copula: Some(copula),
                    negated,
                    relation: Some(vocab::BFO_LOCATED_IN.to_string()),
                });
                return true;
            }
        }

        // Relation inference over predicate head + attached preposition.
        let mut relation = None;
        let mut object_tokens = Vec::new();
        for label in [UdLabel::Nmod, UdLabel::Obl] {
            if let Some(object) = tree.child_with_label(root, &label) {
                let preposition = tree
                    .child_with_label(object, &UdLabel::Case)
                    .map(|c| tree.token(c).to_lowercase());
                if let Some(prep) = &preposition {
                    let key = format!("{} {}", tree.token(root).to_lowercase(), prep);
                    relation = RELATION_INFERENCE.get(key.as_str()).map(|&r| r.to_string());
                }
                object_tokens = subtree_minus(tree, object, &[UdLabel::Case]);
                break;
            }
        }

        let pattern = if negated {
            AssertionPattern::NegatedPredication
        } else {
            AssertionPattern::Predication
        };
        debug!(root = tree.token(root), ?relation, "copular assertion");
        out.assertions.push(ExtractedAssertion {
            pattern,
            subject_text: join_tokens(tree, &subject),
            object_text: (!object_tokens.is_empty()).then(|| join_tokens(tree, &object_tokens)),
            subject_tokens: subject,
            object_tokens,
            copula: Some(copula),
            negated,
            relation,
        });
        true
    }

    /// Pattern 2: existential `there`.
    fn try_existential(&self, tree: &DepTree, root: usize, out: &mut ActExtraction) -> bool {
        if !tree.tag(root).starts_with("VB") {
            return false;
        }
        if tree.child_with_label(root, &UdLabel::Expl).is_none() {
            return false;
        }
        let subject = self.subject_tokens(tree, root);
        out.assertions.push(ExtractedAssertion {
            pattern: AssertionPattern::Existential,
            subject_text: join_tokens(tree, &subject),
            object_text: None,
            subject_tokens: subject,
            object_tokens: Vec::new(),
            copula: Some(tree.token(root).to_string()),
            negated: is_negated(tree, root),
            relation: None,
        });
        true
    }

    /// Pattern 3: possessive `have` with a bare object.
    fn try_possessive(&self, tree: &DepTree, root: usize, out: &mut ActExtraction) -> bool {
        let lemma = self.lemmatizer.lemmatize(tree.token(root), tree.tag(root));
        if lemma != "have" {
            return false;
        }
        let Some(object) = tree.child_with_label(root, &UdLabel::Obj) else {
            return false;
        };
        if tree.child_with_label(root, &UdLabel::Aux).is_some()
            || tree.child_with_label(root, &UdLabel::AuxPass).is_some()
        {
            return false;
        }
        let subject = self.subject_tokens(tree, root);
        let object_tokens = tree.subtree(object).into_iter().map(|(i, _)| i).collect::<Vec<_>>();
        let negated = is_negated(tree, root);

        out.assertions.push(ExtractedAssertion {
            pattern: AssertionPattern::Possessive,
            subject_text: join_tokens(tree, &subject),
            object_text: Some(join_tokens(tree, &object_tokens)),
            subject_tokens: subject.clone(),
            object_tokens: object_tokens.clone(),
            copula: None,
            negated,
            relation: Some(vocab::CCO_HAS_PART.to_string()),
        });
        out.acts.push(ExtractedAct {
            root,
            verb: tree.token(root).to_string(),
            lemma,
            tag: tree.tag(root).to_string(),
            pattern: ActPattern::Possessive,
            is_passive: false,
            is_negated: negated,
            is_copular: false,
            modality: None,
            actuality: ActualityStatus::Actual,
            modal_marker: None,
            agent_tokens: subject,
            affected_tokens: object_tokens,
            participants: Vec::new(),
            temporal_tokens: Vec::new(),
        });
        true
    }

    /// Pattern 4: passive `locate`/`base` with a locative oblique.
    fn try_verb_derived_relation(
        &self,
        tree: &DepTree,
        root: usize,
        out: &mut ActExtraction,
    ) -> bool {
        let lemma = self.lemmatizer.lemmatize(tree.token(root), tree.tag(root));
        if lemma != "locate" && lemma != "base" {
            return false;
        }
        let passive = tree.child_with_label(root, &UdLabel::NsubjPass).is_some()
            || tree.child_with_label(root, &UdLabel::AuxPass).is_some();
        if !passive {
            return false;
        }
        let obliques = tree.children_with_label(root, &UdLabel::Obl);
        // Agentive by-phrase keeps the verb an act.
        let has_by_agent = obliques.iter().any(|&o| {
            tree.child_with_label(o, &UdLabel::Case)
                .is_some_and(|c| tree.token(c).eq_ignore_ascii_case("by"))
        });
        if has_by_agent {
            return false;
        }
        let locative = obliques.iter().copied().find(|&o| {
            tree.child_with_label(o, &UdLabel::Case)
                .is_some_and(|c| matches!(tree.token(c).to_lowercase().as_str(), "in" | "at"))
        });
        let Some(place) = locative else {
            return false;
        };
        let subject = self.subject_tokens(tree, root);
        let object_tokens = subtree_minus(tree, place, &[UdLabel::Case]);
        out.assertions.push(ExtractedAssertion {
            pattern: AssertionPattern::Locative,
            subject_text: join_tokens(tree, &subject),
            object_text: Some(join_tokens(tree, &object_tokens)),
            subject_tokens: subject,
            object_tokens,
            copula: None,
            negated: is_negated(tree, root),
            relation: Some(vocab::BFO_LOCATED_IN.to_string()),
        });
        true
    }

    /// Pattern 5: the regular verb act.
    fn emit_regular_act(&self, tree: &DepTree, root: usize, out: &mut ActExtraction) {
        let is_passive = tree.child_with_label(root, &UdLabel::NsubjPass).is_some()
            || tree.child_with_label(root, &UdLabel::AuxPass).is_some();
        let is_negated = is_negated(tree, root);
        let (modality, actuality, modal_marker) = self.detect_modality(tree, root);

        let mut agent_tokens = Vec::new();
        let mut affected_tokens = Vec::new();
        let mut participants = Vec::new();
        let mut temporal_tokens = Vec::new();

        if is_passive {
            if let Some(subject) = tree.child_with_label(root, &UdLabel::NsubjPass) {
                affected_tokens = subtree_ids(tree, subject);
            }
        } else {
            if let Some(subject) = tree.child_with_label(root, &UdLabel::Nsubj) {
                agent_tokens = subtree_ids(tree, subject);
            }
            if let Some(object) = tree.child_with_label(root, &UdLabel::Obj) {
                affected_tokens = subtree_ids(tree, object);
            }
        }

        for label in [UdLabel::Obl, UdLabel::Nmod] {
            for oblique in tree.children_with_label(root, &label) {
                let preposition = tree
                    .child_with_label(oblique, &UdLabel::Case)
                    .map(|c| tree.token(c).to_lowercase());
                let tokens = subtree_minus(tree, oblique, &[UdLabel::Case]);
                if preposition.as_deref() == Some("by") && is_passive {
                    agent_tokens = tokens;
                    continue;
                }
                if is_temporal_phrase(tree, oblique) {
                    temporal_tokens = tokens;
                    continue;
                }
                participants.push(ActParticipant {
                    tokens,
                    preposition,
                });
            }
        }
        for advmod in tree.children_with_label(root, &UdLabel::Advmod) {
            let word = tree.token(advmod).to_lowercase();
            if matches!(word.as_str(), "yesterday" | "today" | "tomorrow") {
                temporal_tokens = vec![advmod];
            }
        }

        let verb = tree.token(root).to_string();
        let lemma = self.lemmatizer.lemmatize(&verb, tree.tag(root));
        debug!(verb = %verb, passive = is_passive, negated = is_negated, "regular act");
        out.acts.push(ExtractedAct {
            root,
            verb,
            lemma,
            tag: tree.tag(root).to_string(),
            pattern: ActPattern::Regular,
            is_passive,
            is_negated,
            is_copular: false,
            modality,
            actuality,
            modal_marker,
            agent_tokens,
            affected_tokens,
            participants,
            temporal_tokens,
        });
    }

    fn detect_modality(
        &self,
        tree: &DepTree,
        root: usize,
    ) -> (Option<Modality>, ActualityStatus, Option<String>) {
        for aux in tree.children_with_label(root, &UdLabel::Aux) {
            let word = tree.token(aux).to_lowercase();
            let mapped = match word.as_str() {
                "must" | "shall" => Some((Modality::Obligation, ActualityStatus::Prescribed)),
                "should" => Some((Modality::Recommendation, ActualityStatus::Prescribed)),
                "may" => Some((Modality::Permission, ActualityStatus::Permitted)),
                "might" => Some((Modality::Possibility, ActualityStatus::Hypothetical)),
                "could" => Some((Modality::Possibility, ActualityStatus::Potential)),
                "can" => Some((Modality::Ability, ActualityStatus::Potential)),
                "will" => Some((Modality::Expectation, ActualityStatus::Planned)),
                "would" => Some((Modality::Conditional, ActualityStatus::Hypothetical)),
                _ => None,
            };
            if let Some((modality, actuality)) = mapped {
                return (Some(modality), actuality, Some(word));
            }
        }
        if tree
            .children_with_label(root, &UdLabel::Mark)
            .iter()
            .any(|&m| tree.token(m).eq_ignore_ascii_case("if"))
        {
            return (Some(Modality::Conditional), ActualityStatus::Hypothetical, None);
        }
        (None, ActualityStatus::Actual, None)
    }

    fn subject_tokens(&self, tree: &DepTree, root: usize) -> Vec<usize> {
        tree.child_with_label(root, &UdLabel::Nsubj)
            .or_else(|| tree.child_with_label(root, &UdLabel::NsubjPass))
            .map(|s| subtree_ids(tree, s))
            .unwrap_or_default()
    }
}

fn subtree_ids(tree: &DepTree, id: usize) -> Vec<usize> {
    tree.subtree(id).into_iter().map(|(i, _)| i).collect()
}

/// Subtree of `root` excluding the subtrees of children attached with any of
/// `excluded` labels (and punctuation).
fn subtree_minus(tree: &DepTree, root: usize, excluded: &[UdLabel]) -> Vec<usize> {
    let mut dropped: HashSet<usize> = HashSet::new();
    for &child in tree.children(root) {
        let Some(arc) = tree.arc(child) else { continue };
        let excluded_child = excluded.contains(&arc.label)
            || matches!(&arc.label, UdLabel::Other(l) if l == "punct");
        if excluded_child {
            for (i, _) in tree.subtree(child) {
                dropped.insert(i);
            }
        }
    }
    tree.subtree(root)
        .into_iter()
        .map(|(i, _)| i)
        .filter(|i| !dropped.contains(i))
        .collect()
}

fn join_tokens(tree: &DepTree, ids: &[usize]) -> String {
    let mut out = String::new();
    for (n, &i) in ids.iter().enumerate() {
        let token = tree.token(i);
        if n > 0 && !token.starts_with('\'') && token != "n't" {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

fn is_negated(tree: &DepTree, node: usize) -> bool {
    tree.children(node).iter().any(|&c| {
        let Some(arc) = tree.arc(c) else { return false };
        match &arc.label {
            UdLabel::Neg => true,
            UdLabel::Advmod => NEGATION_WORDS.contains(&tree.token(c).to_lowercase().as_str()),
            _ => false,
        }
    })
}

fn is_temporal_phrase(tree: &DepTree, node: usize) -> bool {
    TemporalUnit::parse_word(tree.token(node)).is_some()
        || matches!(
            tree.token(node).to_lowercase().as_str(),
            "yesterday" | "today" | "tomorrow"
        )
}
