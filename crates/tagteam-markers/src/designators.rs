//! Greedy multi-word proper-name detection
//!
//! A capitalised sequence grows across internal connectors ("and", "or",
//! "of", "for", "on", "the") when the next meaningful token is capitalised or
//! a known acronym. Commas are consumed if followed by another capitalised
//! token, but ", the" breaks the span (list item). High-confidence verbs
//! break the span even when capitalised. Known acronyms form single-token
//! spans.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use tagteam_core::{vocab, ComplexDesignator};
use tagteam_tokenizer::Token;

static CONNECTORS: &[&str] = &["and", "or", "of", "for", "on", "the"];

static KNOWN_ACRONYMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "NATO", "WHO", "OECD", "UN", "EU", "UNICEF", "NASA", "FBI", "CIA", "DHS", "CBP", "WTO",
        "IMF", "CDC",
    ]
    .into_iter()
    .collect()
});

/// Verbs that end a name span even when sentence-capitalised.
static BREAKING_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "is", "are", "was", "were", "include", "includes", "support", "supports", "visit",
        "visits", "meet", "meets", "said", "made", "announced", "signed", "launched",
    ]
    .into_iter()
    .collect()
});

/// Greedy capitalised-span scanner.
#[derive(Debug, Default, Clone)]
pub struct ComplexDesignatorDetector;

impl ComplexDesignatorDetector {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scan a token stream for multi-word proper names and known acronyms.
    #[must_use]
    pub fn detect(&self, tokens: &[Token]) -> Vec<ComplexDesignator> {
        let mut designators = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let word = tokens[i].text.as_str();
            if BREAKING_VERBS.contains(word.to_lowercase().as_str()) {
                i += 1;
                continue;
            }
            if KNOWN_ACRONYMS.contains(word) {
                designators.push(make_designator(&tokens[i..=i]));
                i += 1;
                continue;
            }
            // A capitalised connector ("The", "Of") never opens a span; it
            // can only join one.
            if CONNECTORS.contains(&word.to_lowercase().as_str()) || !is_name_word(word) {
                i += 1;
                continue;
            }
            // Grow the span greedily.
            let start = i;
            let mut end = i; // inclusive index of the last name word
            let mut j = i + 1;
            while j < tokens.len() {
                let next = tokens[j].text.as_str();
                let next_lower = next.to_lowercase();
                if BREAKING_VERBS.contains(next_lower.as_str()) {
                    break;
                }
                if is_name_word(next) || KNOWN_ACRONYMS.contains(next) {
                    end = j;
                    j += 1;
                    continue;
                }
                if CONNECTORS.contains(&next_lower.as_str()) {
                    // Connector joins only when capitalised material follows.
                    match tokens.get(j + 1) {
                        Some(after)
                            if is_name_word(&after.text)
                                || KNOWN_ACRONYMS.contains(after.text.as_str()) =>
                        {
                            j += 1;
                            continue;
                        }
                        _ => break,
                    }
                }
                if next == "," {
                    // ", the" is a list item boundary; ", <Name>" continues.
                    match tokens.get(j + 1) {
                        Some(after)
                            if after.text.to_lowercase() != "the"
                                && (is_name_word(&after.text)
                                    || KNOWN_ACRONYMS.contains(after.text.as_str())) =>
                        {
                            j += 1;
                            continue;
                        }
                        _ => break,
                    }
                }
                break;
            }
            let span = &tokens[start..=end];
            let name_words = span.iter().filter(|t| is_name_word(&t.text)).count();
            if name_words >= 2 {
                designators.push(make_designator(span));
            }
            i = end + 1;
        }
        designators
    }
}

/// Capitalised word, or a short ALL-CAPS token read as a noun.
fn is_name_word(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_uppercase() {
        return false;
    }
    word.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

fn make_designator(span: &[Token]) -> ComplexDesignator {
    let start = span[0].start;
    let end = span[span.len() - 1].end;
    let components: Vec<String> = span
        .iter()
        .filter(|t| is_name_word(&t.text) || KNOWN_ACRONYMS.contains(t.text.as_str()))
        .map(|t| t.text.clone())
        .collect();
    let full_name = span
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    ComplexDesignator {
        id: format!("inst:designator_{start}_{end}"),
        full_name,
        name_components: components,
        denoted_type: vocab::CCO_ORGANIZATION.to_string(),
        start,
        end,
        designates: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagteam_tokenizer::Tokenizer;

    fn detect(text: &str) -> Vec<ComplexDesignator> {
        let tokens = Tokenizer::new().tokenize(text);
        ComplexDesignatorDetector::new().detect(&tokens)
    }

    #[test]
    fn multi_word_name() {
        let designators = detect("The World Health Organization convened");
        assert_eq!(designators.len(), 1);
        assert_eq!(designators[0].full_name, "World Health Organization");
        assert_eq!(
            designators[0].name_components,
            vec!["World", "Health", "Organization"]
        );
        assert_eq!(designators[0].denoted_type, "cco:Organization");
    }

    #[test]
    fn connector_joins_capitalised_material() {
        let designators = detect("the Department of Homeland Security said so");
        assert_eq!(designators.len(), 1);
        assert_eq!(designators[0].full_name, "Department of Homeland Security");
    }

    #[test]
    fn acronym_is_single_token_span() {
        let designators = detect("NATO expanded");
        assert_eq!(designators.len(), 1);
        assert_eq!(designators[0].full_name, "NATO");
        assert_eq!(designators[0].name_components, vec!["NATO"]);
    }

    #[test]
    fn high_confidence_verb_breaks_span() {
        let designators = detect("Acme Corporation Includes Windows");
        // "Includes" breaks even though capitalised.
        assert_eq!(designators[0].full_name, "Acme Corporation");
    }

    #[test]
    fn comma_list_splits_into_spans() {
        let designators = detect("the OECD, the World Bank, and UNICEF agreed");
        let names: Vec<&str> = designators.iter().map(|d| d.full_name.as_str()).collect();
        assert_eq!(names, vec!["OECD", "World Bank", "UNICEF"]);
    }

    #[test]
    fn single_capitalised_word_is_not_enough() {
        let designators = detect("Yesterday everything changed");
        assert!(designators.is_empty());
    }

    #[test]
    fn offsets_cover_source(){
        let text = "met the World Health Organization today";
        let designators = detect(text);
        let d = &designators[0];
        assert_eq!(&text[d.start..d.end], "World Health Organization");
    }
}
