//! Rule-based English POS tagging
//!
//! A fixed lexicon covers the closed classes and common open-class words;
//! suffix and context heuristics cover the rest. After the main pass a small
//! lexical-override table corrects a closed set of systematic mistaggings in
//! a single sweep over the tagged stream.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Penn-style tags over a fixed lexicon plus heuristics.
#[derive(Debug, Default, Clone)]
pub struct PosTagger;

static LEXICON: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let entries: &[(&str, &str)] = &[
        // Determiners and quantifiers
        ("the", "DT"),
        ("a", "DT"),
        ("an", "DT"),
        ("this", "DT"),
        ("that", "DT"),
        ("these", "DT"),
        ("those", "DT"),
        ("each", "DT"),
        ("every", "DT"),
        ("all", "DT"),
        ("some", "DT"),
        ("any", "DT"),
        ("no", "DT"),
        ("another", "DT"),
        ("several", "DT"),
        ("few", "DT"),
        ("many", "DT"),
        ("most", "DT"),
        ("both", "DT"),
        ("last", "JJ"),
        ("only", "JJ"),
        // Pronouns
        ("i", "PRP"),
        ("you", "PRP"),
        ("he", "PRP"),
        ("she", "PRP"),
        ("it", "PRP"),
        ("we", "PRP"),
        ("they", "PRP"),
        ("me", "PRP"),
        ("him", "PRP"),
        ("her", "PRP"),
        ("us", "PRP"),
        ("them", "PRP"),
        ("mine", "PRP"),
        ("yours", "PRP"),
        ("hers", "PRP"),
        ("ours", "PRP"),
        ("theirs", "PRP"),
        ("my", "PRP$"),
        ("your", "PRP$"),
        ("his", "PRP$"),
        ("its", "PRP$"),
        ("our", "PRP$"),
        ("their", "PRP$"),
        // Wh-words
        ("who", "WP"),
        ("whom", "WP"),
        ("what", "WP"),
        ("whose", "WP$"),
        ("which", "WDT"),
        ("where", "WRB"),
        ("when", "WRB"),
        ("why", "WRB"),
        ("how", "WRB"),
        // Modals
        ("can", "MD"),
        ("could", "MD"),
        ("may", "MD"),
        ("might", "MD"),
        ("must", "MD"),
        ("shall", "MD"),
        ("should", "MD"),
        ("will", "MD"),
        ("would", "MD"),
        // Copula and auxiliaries
        ("be", "VB"),
        ("is", "VBZ"),
        ("are", "VBP"),
        ("am", "VBP"),
        ("was", "VBD"),
        ("were", "VBD"),
        ("been", "VBN"),
        ("being", "VBG"),
        ("have", "VBP"),
        ("has", "VBZ"),
        ("had", "VBD"),
        ("having", "VBG"),
        ("do", "VBP"),
        ("does", "VBZ"),
        ("did", "VBD"),
        ("done", "VBN"),
        // Prepositions and subordinators
        ("in", "IN"),
        ("on", "IN"),
        ("at", "IN"),
        ("by", "IN"),
        ("for", "IN"),
        ("with", "IN"),
        ("from", "IN"),
        ("of", "IN"),
        ("into", "IN"),
        ("onto", "IN"),
        ("under", "IN"),
        ("over", "IN"),
        ("about", "IN"),
        ("between", "IN"),
        ("among", "IN"),
        ("near", "IN"),
        ("behind", "IN"),
        ("above", "IN"),
        ("below", "IN"),
        ("during", "IN"),
        ("after", "IN"),
        ("before", "IN"),
        ("through", "IN"),
        ("if", "IN"),
        ("because", "IN"),
        ("while", "IN"),
        ("since", "IN"),
        ("as", "IN"),
        ("to", "TO"),
        // Conjunctions
        ("and", "CC"),
        ("or", "CC"),
        ("but", "CC"),
        ("nor", "CC"),
        // Number words
        ("one", "CD"),
        ("two", "CD"),
        ("three", "CD"),
        ("four", "CD"),
        ("five", "CD"),
        ("six", "CD"),
        ("seven", "CD"),
        ("eight", "CD"),
        ("nine", "CD"),
        ("ten", "CD"),
        // Adverbs
        ("not", "RB"),
        ("please", "RB"),
        ("never", "RB"),
        ("also", "RB"),
        ("very", "RB"),
        ("quite", "RB"),
        ("too", "RB"),
        ("now", "RB"),
        ("then", "RB"),
        ("here", "RB"),
        ("there", "EX"),
        ("yesterday", "RB"),
        ("today", "RB"),
        ("tomorrow", "RB"),
        // Common adjectives
        ("new", "JJ"),
        ("old", "JJ"),
        ("good", "JJ"),
        ("ill", "JJ"),
        ("critical", "JJ"),
        ("critically", "RB"),
        ("possible", "JJ"),
        ("likely", "JJ"),
        ("probable", "JJ"),
        ("suspected", "JJ"),
        ("potential", "JJ"),
        ("available", "JJ"),
        // Common nouns
        ("doctor", "NN"),
        ("nurse", "NN"),
        ("patient", "NN"),
        ("patients", "NNS"),
        ("hospital", "NN"),
        ("clinic", "NN"),
        ("ventilator", "NN"),
        ("ventilators", "NNS"),
        ("resource", "NN"),
        ("resources", "NNS"),
        ("condition", "NN"),
        ("diabetes", "NN"),
        ("fur", "NN"),
        ("dog", "NN"),
        ("dogs", "NNS"),
        ("cat", "NN"),
        ("cats", "NNS"),
        ("team", "NN"),
        ("company", "NN"),
        ("organization", "NN"),
        ("report", "NN"),
        ("plan", "NN"),
        ("design", "NN"),
        ("data", "NN"),
        ("document", "NN"),
        ("system", "NN"),
        ("server", "NN"),
        ("component", "NN"),
        ("member", "NN"),
        ("part", "NN"),
        ("example", "NN"),
        ("instance", "NN"),
        ("kind", "NN"),
        ("type", "NN"),
        ("blood", "NN"),
        ("sugar", "NN"),
        ("level", "NN"),
        ("levels", "NNS"),
        ("alert", "NN"),
        ("access", "NN"),
        ("change", "NN"),
        // Common verbs
        ("allocate", "VB"),
        ("suggest", "VBP"),
        ("suggests", "VBZ"),
        ("indicate", "VBP"),
        ("review", "VB"),
        ("analyze", "VB"),
        ("build", "VB"),
        ("carry", "VB"),
        ("print", "VB"),
        ("store", "VB"),
        ("bark", "VBP"),
        ("barks", "VBZ"),
        ("run", "VB"),
        ("runs", "VBZ"),
        ("give", "VB"),
        ("gave", "VBD"),
        ("said", "VBD"),
        ("say", "VB"),
        ("made", "VBD"),
        ("make", "VB"),
        ("announced", "VBD"),
        ("hired", "VBD"),
        ("fired", "VBD"),
        ("decided", "VBD"),
        ("located", "VBN"),
        ("based", "VBN"),
        ("saw", "VBD"),
        ("went", "VBD"),
        ("came", "VBD"),
        ("knew", "VBD"),
        ("thought", "VBD"),
        ("took", "VBD"),
        ("told", "VBD"),
        ("found", "VBD"),
        ("got", "VBD"),
        ("ran", "VBD"),
        ("met", "VBD"),
        ("wrote", "VBD"),
        ("sent", "VBD"),
        ("built", "VBD"),
        ("kept", "VBD"),
        ("held", "VBD"),
    ];
    entries.iter().copied().collect()
});

/// Post-pass overrides: words that must always carry a fixed tag.
static ALWAYS_IN: &[&str] = &[
    "for", "with", "on", "in", "at", "from", "to", "into", "onto", "by", "of",
];
static ALWAYS_DT: &[&str] = &["the", "a", "an"];
static ALWAYS_CC: &[&str] = &["and", "or"];
/// Nouns systematically mistagged after a determiner.
static NOUN_AFTER_DT: &[&str] = &["alert", "access", "change"];

impl PosTagger {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Tag a word sequence, returning a parallel tag vector.
    #[must_use]
    pub fn tag(&self, words: &[String]) -> Vec<String> {
        let mut tags: Vec<String> = Vec::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            let prev = tags.last().map(String::as_str);
            tags.push(self.tag_word(word, i, prev));
        }
        self.apply_overrides(words, &mut tags);
        tags
    }

    fn tag_word(&self, word: &str, position: usize, prev_tag: Option<&str>) -> String {
        // Clitics
        match word.to_lowercase().as_str() {
            "'s" => return "POS".to_string(),
            "n't" => return "RB".to_string(),
            "'ll" | "'d" => return "MD".to_string(),
            "'re" | "'ve" | "'m" => return "VBP".to_string(),
            _ => {}
        }

        if word.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
            && word.chars().any(|c| c.is_ascii_digit())
        {
            return "CD".to_string();
        }

        if !word.chars().next().is_some_and(char::is_alphanumeric) && word.chars().count() == 1 {
            return punctuation_tag(word).to_string();
        }

        let lower = word.to_lowercase();
        if let Some(&tag) = LEXICON.get(lower.as_str()) {
            return tag.to_string();
        }

        // All-caps acronyms and mid-sentence capitalised words are proper nouns.
        if word.len() >= 2 && word.chars().all(|c| c.is_ascii_uppercase()) {
            return "NNP".to_string();
        }
        if position > 0 && word.chars().next().is_some_and(char::is_uppercase) {
            return "NNP".to_string();
        }

        if matches!(prev_tag, Some("MD") | Some("TO")) {
            return "VB".to_string();
        }

        suffix_tag(&lower).to_string()
    }

    /// Single corrective pass over the tagged stream.
    fn apply_overrides(&self, words: &[String], tags: &mut [String]) {
        for i in 0..words.len() {
            let lower = words[i].to_lowercase();
            if ALWAYS_IN.contains(&lower.as_str()) {
                tags[i] = "IN".to_string();
            } else if ALWAYS_DT.contains(&lower.as_str()) {
                tags[i] = "DT".to_string();
            } else if ALWAYS_CC.contains(&lower.as_str()) {
                tags[i] = "CC".to_string();
            } else if i > 0 && tags[i - 1] == "DT" && NOUN_AFTER_DT.contains(&lower.as_str()) {
                tags[i] = "NN".to_string();
            }
        }
    }
}

fn suffix_tag(lower: &str) -> &'static str {
    if lower.ends_with("ly") {
        return "RB";
    }
    if lower.ends_with("ing") && lower.len() > 4 {
        return "VBG";
    }
    if lower.ends_with("ed") && lower.len() > 3 {
        return "VBD";
    }
    for noun_suffix in ["tion", "ment", "ness", "ity", "ance", "ence", "sis", "ure", "ery"] {
        if lower.ends_with(noun_suffix) {
            return "NN";
        }
    }
    for adj_suffix in ["ous", "ive", "able", "ible", "ful", "less", "ical"] {
        if lower.ends_with(adj_suffix) {
            return "JJ";
        }
    }
    if lower.ends_with('s')
        && lower.len() > 2
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        return "NNS";
    }
    "NN"
}

fn punctuation_tag(word: &str) -> &'static str {
    match word {
        "." | "!" | "?" => ".",
        "," => ",",
        ";" | ":" => ":",
        "(" => "-LRB-",
        ")" => "-RRB-",
        _ => "SYM",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_all(text: &[&str]) -> Vec<String> {
        let words: Vec<String> = text.iter().map(|w| (*w).to_string()).collect();
        PosTagger::new().tag(&words)
    }

    #[test]
    fn tags_simple_sentence() {
        let tags = tag_all(&["The", "doctor", "must", "allocate", "the", "ventilator"]);
        assert_eq!(tags, vec!["DT", "NN", "MD", "VB", "DT", "NN"]);
    }

    #[test]
    fn modal_context_forces_base_verb() {
        let tags = tag_all(&["should", "triage"]);
        assert_eq!(tags, vec!["MD", "VB"]);
    }

    #[test]
    fn acronyms_are_proper_nouns() {
        let tags = tag_all(&["CBP", "is", "a", "component", "of", "DHS"]);
        assert_eq!(tags, vec!["NNP", "VBZ", "DT", "NN", "IN", "NNP"]);
    }

    #[test]
    fn override_noun_after_determiner() {
        let tags = tag_all(&["the", "alert", "fired"]);
        assert_eq!(tags[1], "NN");
        let tags = tag_all(&["an", "access", "request"]);
        assert_eq!(tags[1], "NN");
    }

    #[test]
    fn override_to_is_preposition() {
        let tags = tag_all(&["went", "to", "Boston"]);
        assert_eq!(tags[1], "IN");
    }

    #[test]
    fn suffix_heuristics() {
        let tags = tag_all(&["reportedly", "deploying", "walked", "installation", "hazardous"]);
        assert_eq!(tags, vec!["RB", "VBG", "VBD", "NN", "JJ"]);
    }

    #[test]
    fn capitalised_mid_sentence_is_nnp() {
        let tags = tag_all(&["visited", "Boston"]);
        assert_eq!(tags[1], "NNP");
    }

    #[test]
    fn clitics() {
        let tags = tag_all(&["patient", "'s", "does", "n't"]);
        assert_eq!(tags, vec!["NN", "POS", "VBZ", "RB"]);
    }
}
