//! Noun-phrase chunking over tag sequences
//!
//! Three templates, tried left-to-right in order of specificity:
//!
//! 1. Possessive: `DT? JJ* NN+ POS NN+` — head is the rightmost noun of the
//!    possessed part, not the possessor.
//! 2. PP-modified: `<simple NP> IN|TO <simple NP>` — head is the rightmost
//!    noun of the leading NP; the PP object is kept as a substructure with
//!    its preposition.
//! 3. Simple: `DT? JJ* NN+` — head is the rightmost noun.
//!
//! A numeral and adverb-graded adjectives ("two critically ill patients")
//! fold into the simple template; the numeral is recorded as the chunk's
//! quantity.

use crate::tokenizer::Token;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkKind {
    Simple,
    Possessive,
    PpModified,
}

/// A contiguous sub-phrase of a chunk with its own head noun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPhrase {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub head_noun: String,
    pub determiner: Option<String>,
    pub adjectives: Vec<String>,
    pub quantity: Option<i64>,
    pub quantifier: Option<String>,
}

/// A matched noun-phrase chunk with explicit head noun and substructure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpChunk {
    pub kind: ChunkKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub head_noun: String,
    pub determiner: Option<String>,
    pub adjectives: Vec<String>,
    pub quantity: Option<i64>,
    pub quantifier: Option<String>,
    /// Possessor part of a possessive chunk.
    pub possessor: Option<SubPhrase>,
    /// Leading NP of a PP-modified chunk.
    pub head_phrase: Option<SubPhrase>,
    /// Object NP of a PP-modified chunk.
    pub pp_object: Option<SubPhrase>,
    /// Preposition introducing `pp_object`.
    pub preposition: Option<String>,
}

/// Component role within a chunk, as consumed by entity extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentRole {
    /// The full phrase.
    Phrase,
    /// The possessor part of a possessive chunk.
    Possessor,
    /// The leading NP of a PP-modified chunk.
    HeadNp,
    /// The object of the embedded PP.
    PpObject { preposition: String },
}

/// One extraction candidate from a chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkComponent {
    pub role: ComponentRole,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub head_noun: String,
    pub determiner: Option<String>,
    pub adjectives: Vec<String>,
    pub quantity: Option<i64>,
    pub quantifier: Option<String>,
}

fn is_noun(tag: &str) -> bool {
    matches!(tag, "NN" | "NNS" | "NNP" | "NNPS")
}

fn is_adjective(tag: &str) -> bool {
    matches!(tag, "JJ" | "JJR" | "JJS")
}

/// Span of a simple NP starting at `i`: `DT? CD? (RB? JJ)* NN+`.
/// Returns (next_index, determiner_idx, quantity_idx, adjective_idxs, noun_idxs).
struct SimpleNp {
    next: usize,
    determiner: Option<usize>,
    quantity: Option<usize>,
    adjectives: Vec<usize>,
    nouns: Vec<usize>,
}

impl SimpleNp {
    /// Rightmost noun; `match_simple` never yields an empty noun run.
    fn head(&self) -> usize {
        self.nouns[self.nouns.len() - 1]
    }
}

fn match_simple(tags: &[String], mut i: usize) -> Option<SimpleNp> {
    let mut np = SimpleNp {
        next: i,
        determiner: None,
        quantity: None,
        adjectives: Vec::new(),
        nouns: Vec::new(),
    };
    if i < tags.len() && tags[i] == "DT" {
        np.determiner = Some(i);
        i += 1;
    }
    if i < tags.len() && tags[i] == "CD" {
        np.quantity = Some(i);
        i += 1;
    }
    loop {
        if i < tags.len() && is_adjective(&tags[i]) {
            np.adjectives.push(i);
            i += 1;
        } else if i + 1 < tags.len() && tags[i] == "RB" && is_adjective(&tags[i + 1]) {
            np.adjectives.push(i + 1);
            i += 2;
        } else {
            break;
        }
    }
    while i < tags.len() && is_noun(&tags[i]) {
        np.nouns.push(i);
        i += 1;
    }
    if np.nouns.is_empty() {
        return None;
    }
    np.next = i;
    Some(np)
}

/// Template-matching NP chunker.
#[derive(Debug, Default, Clone)]
pub struct NpChunker;

impl NpChunker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Chunk a tagged token sequence. `source` supplies exact phrase text via
    /// offsets, so clitics reconstruct without a leading space.
    #[must_use]
    pub fn chunk(&self, tokens: &[Token], tags: &[String], source: &str) -> Vec<NpChunk> {
        debug_assert_eq!(tokens.len(), tags.len());
        let mut chunks = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            if let Some((chunk, next)) = self.match_possessive(tokens, tags, source, i) {
                chunks.push(chunk);
                i = next;
            } else if let Some((chunk, next)) = self.match_pp(tokens, tags, source, i) {
                chunks.push(chunk);
                i = next;
            } else if let Some((chunk, next)) = self.match_bare(tokens, tags, source, i) {
                chunks.push(chunk);
                i = next;
            } else {
                i += 1;
            }
        }
        chunks
    }

    fn match_possessive(
        &self,
        tokens: &[Token],
        tags: &[String],
        source: &str,
        i: usize,
    ) -> Option<(NpChunk, usize)> {
        let owner = match_simple(tags, i)?;
        let pos_idx = owner.next;
        if pos_idx >= tags.len() || tags[pos_idx] != "POS" {
            return None;
        }
        let mut j = pos_idx + 1;
        let mut possessed = Vec::new();
        while j < tags.len() && is_noun(&tags[j]) {
            possessed.push(j);
            j += 1;
        }
        if possessed.is_empty() {
            return None;
        }
        let start = tokens[i].start;
        let end = tokens[j - 1].end;
        // Head is the rightmost noun of the possessed part, not the possessor.
        let head = tokens[possessed[possessed.len() - 1]].text.clone();
        let possessor = sub_phrase(tokens, source, &owner);
        let chunk = NpChunk {
            kind: ChunkKind::Possessive,
            text: source[start..end].to_string(),
            start,
            end,
            head_noun: head,
            determiner: owner.determiner.map(|d| tokens[d].text.clone()),
            adjectives: owner.adjectives.iter().map(|&a| tokens[a].text.clone()).collect(),
            quantity: parse_quantity(tokens, owner.quantity),
            quantifier: owner.quantity.map(|q| tokens[q].text.clone()),
            possessor: Some(possessor),
            head_phrase: None,
            pp_object: None,
            preposition: None,
        };
        Some((chunk, j))
    }

    fn match_pp(
        &self,
        tokens: &[Token],
        tags: &[String],
        source: &str,
        i: usize,
    ) -> Option<(NpChunk, usize)> {
        let lead = match_simple(tags, i)?;
        let prep_idx = lead.next;
        if prep_idx >= tags.len() || !matches!(tags[prep_idx].as_str(), "IN" | "TO") {
            return None;
        }
        let object = match_simple(tags, prep_idx + 1)?;
        let start = tokens[i].start;
        let end = tokens[object.next - 1].end;
        // Head is the rightmost noun of the leading NP.
        let head = tokens[lead.head()].text.clone();
        let chunk = NpChunk {
            kind: ChunkKind::PpModified,
            text: source[start..end].to_string(),
            start,
            end,
            head_noun: head,
            determiner: lead.determiner.map(|d| tokens[d].text.clone()),
            adjectives: lead.adjectives.iter().map(|&a| tokens[a].text.clone()).collect(),
            quantity: parse_quantity(tokens, lead.quantity),
            quantifier: lead.quantity.map(|q| tokens[q].text.clone()),
            possessor: None,
            head_phrase: Some(sub_phrase(tokens, source, &lead)),
            pp_object: Some(sub_phrase(tokens, source, &object)),
            preposition: Some(tokens[prep_idx].text.to_lowercase()),
        };
        Some((chunk, object.next))
    }

    fn match_bare(
        &self,
        tokens: &[Token],
        tags: &[String],
        source: &str,
        i: usize,
    ) -> Option<(NpChunk, usize)> {
        let np = match_simple(tags, i)?;
        let start = tokens[i].start;
        let end = tokens[np.next - 1].end;
        let head = tokens[np.head()].text.clone();
        let chunk = NpChunk {
            kind: ChunkKind::Simple,
            text: source[start..end].to_string(),
            start,
            end,
            head_noun: head,
            determiner: np.determiner.map(|d| tokens[d].text.clone()),
            adjectives: np.adjectives.iter().map(|&a| tokens[a].text.clone()).collect(),
            quantity: parse_quantity(tokens, np.quantity),
            quantifier: np.quantity.map(|q| tokens[q].text.clone()),
            possessor: None,
            head_phrase: None,
            pp_object: None,
            preposition: None,
        };
        Some((chunk, np.next))
    }

    /// Decompose a chunk into its extraction candidates.
    #[must_use]
    pub fn extract_components(chunk: &NpChunk) -> Vec<ChunkComponent> {
        let full = ChunkComponent {
            role: ComponentRole::Phrase,
            text: chunk.text.clone(),
            start: chunk.start,
            end: chunk.end,
            head_noun: chunk.head_noun.clone(),
            determiner: chunk.determiner.clone(),
            adjectives: chunk.adjectives.clone(),
            quantity: chunk.quantity,
            quantifier: chunk.quantifier.clone(),
        };
        match chunk.kind {
            ChunkKind::Simple => vec![full],
            ChunkKind::Possessive => {
                let mut components = Vec::new();
                if let Some(owner) = &chunk.possessor {
                    components.push(ChunkComponent {
                        role: ComponentRole::Possessor,
                        text: owner.text.clone(),
                        start: owner.start,
                        end: owner.end,
                        head_noun: owner.head_noun.clone(),
                        determiner: owner.determiner.clone(),
                        adjectives: owner.adjectives.clone(),
                        quantity: owner.quantity,
                        quantifier: owner.quantifier.clone(),
                    });
                }
                components.push(full);
                components
            }
            ChunkKind::PpModified => {
                let mut components = Vec::new();
                if let Some(lead) = &chunk.head_phrase {
                    components.push(ChunkComponent {
                        role: ComponentRole::HeadNp,
                        text: lead.text.clone(),
                        start: lead.start,
                        end: lead.end,
                        head_noun: lead.head_noun.clone(),
                        determiner: lead.determiner.clone(),
                        adjectives: lead.adjectives.clone(),
                        quantity: chunk.quantity,
                        quantifier: chunk.quantifier.clone(),
                    });
                }
                if let (Some(object), Some(prep)) = (&chunk.pp_object, &chunk.preposition) {
                    components.push(ChunkComponent {
                        role: ComponentRole::PpObject {
                            preposition: prep.clone(),
                        },
                        text: object.text.clone(),
                        start: object.start,
                        end: object.end,
                        head_noun: object.head_noun.clone(),
                        determiner: object.determiner.clone(),
                        adjectives: object.adjectives.clone(),
                        quantity: object.quantity,
                        quantifier: object.quantifier.clone(),
                    });
                }
                components.push(full);
                components
            }
        }
    }
}

fn sub_phrase(tokens: &[Token], source: &str, np: &SimpleNp) -> SubPhrase {
    let first = np
        .determiner
        .or(np.quantity)
        .or_else(|| np.adjectives.first().copied())
        .unwrap_or_else(|| np.nouns[0]);
    let start = tokens[first].start;
    let end = tokens[np.head()].end;
    SubPhrase {
        text: source[start..end].to_string(),
        start,
        end,
        head_noun: tokens[np.head()].text.clone(),
        determiner: np.determiner.map(|d| tokens[d].text.clone()),
        adjectives: np.adjectives.iter().map(|&a| tokens[a].text.clone()).collect(),
        quantity: parse_quantity(tokens, np.quantity),
        quantifier: np.quantity.map(|q| tokens[q].text.clone()),
    }
}

fn parse_quantity(tokens: &[Token], idx: Option<usize>) -> Option<i64> {
    let idx = idx?;
    let word = tokens[idx].text.to_lowercase();
    if let Ok(n) = word.parse::<i64>() {
        return Some(n);
    }
    match word.as_str() {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::PosTagger;
    use crate::tokenizer::Tokenizer;

    fn chunk_text(text: &str) -> Vec<NpChunk> {
        let tokens = Tokenizer::new().tokenize(text);
        let words: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();
        let tags = PosTagger::new().tag(&words);
        NpChunker::new().chunk(&tokens, &tags, text)
    }

    #[test]
    fn simple_np() {
        let chunks = chunk_text("the critical patient arrived");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].kind, ChunkKind::Simple);
        assert_eq!(chunks[0].text, "the critical patient");
        assert_eq!(chunks[0].head_noun, "patient");
        assert_eq!(chunks[0].determiner.as_deref(), Some("the"));
        assert_eq!(chunks[0].adjectives, vec!["critical"]);
    }

    #[test]
    fn head_is_rightmost_noun() {
        let chunks = chunk_text("blood sugar levels");
        assert_eq!(chunks[0].head_noun, "levels");
    }

    #[test]
    fn numeral_and_graded_adjective() {
        let chunks = chunk_text("two critically ill patients");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].quantity, Some(2));
        assert_eq!(chunks[0].adjectives, vec!["ill"]);
        assert_eq!(chunks[0].head_noun, "patients");
    }

    #[test]
    fn possessive_head_is_possessed() {
        let text = "the doctor's report";
        let chunks = chunk_text(text);
        assert_eq!(chunks.len(), 1);
        let chunk = &chunks[0];
        assert_eq!(chunk.kind, ChunkKind::Possessive);
        assert_eq!(chunk.head_noun, "report");
        assert_eq!(chunk.text, "the doctor's report");
        let owner = chunk.possessor.as_ref().unwrap();
        assert_eq!(owner.text, "the doctor");
        assert_eq!(owner.head_noun, "doctor");
    }

    #[test]
    fn pp_modified_head_is_leading_np() {
        let chunks = chunk_text("a component of DHS");
        assert_eq!(chunks.len(), 1);
        let chunk = &chunks[0];
        assert_eq!(chunk.kind, ChunkKind::PpModified);
        assert_eq!(chunk.head_noun, "component");
        assert_eq!(chunk.preposition.as_deref(), Some("of"));
        assert_eq!(chunk.pp_object.as_ref().unwrap().text, "DHS");
    }

    #[test]
    fn components_of_possessive() {
        let chunks = chunk_text("the doctor's report");
        let components = NpChunker::extract_components(&chunks[0]);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].role, ComponentRole::Possessor);
        assert_eq!(components[0].text, "the doctor");
        assert_eq!(components[1].role, ComponentRole::Phrase);
    }

    #[test]
    fn components_of_pp() {
        let chunks = chunk_text("a component of DHS");
        let components = NpChunker::extract_components(&chunks[0]);
        assert_eq!(components.len(), 3);
        assert!(matches!(components[0].role, ComponentRole::HeadNp));
        assert!(matches!(
            &components[1].role,
            ComponentRole::PpObject { preposition } if preposition == "of"
        ));
        assert!(matches!(components[2].role, ComponentRole::Phrase));
    }

    #[test]
    fn multiple_chunks_in_order() {
        let chunks = chunk_text("the doctor examined the patient");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "the doctor");
        assert_eq!(chunks[1].text, "the patient");
    }
}
