//! Rule-based lemmatization
//!
//! A closed irregular table plus ordered suffix rules
//! (`-ied→-y`, `-ed`, `-d`, `-ing`, `-ies→-y`, `-es`, `-s`). The
//! [`Lemmatizer`] trait is the seam for an injected external lemmatizer; the
//! pipeline ships [`RuleLemmatizer`] as the default.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// External-lemmatizer contract.
pub trait Lemmatizer: Send + Sync {
    /// Lemma of `word` given its POS tag.
    fn lemmatize(&self, word: &str, tag: &str) -> String;

    /// Lemmatize the head (final word) of a phrase, keeping the rest.
    fn lemmatize_phrase(&self, phrase: &str) -> String {
        let mut words: Vec<&str> = phrase.split_whitespace().collect();
        match words.pop() {
            Some(head) => {
                let lemma = self.lemmatize(head, "NN");
                let mut out = words.join(" ");
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&lemma);
                out
            }
            None => String::new(),
        }
    }
}

static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let entries: &[(&str, &str)] = &[
        // be / have / do
        ("am", "be"),
        ("is", "be"),
        ("are", "be"),
        ("was", "be"),
        ("were", "be"),
        ("been", "be"),
        ("being", "be"),
        ("has", "have"),
        ("had", "have"),
        ("having", "have"),
        ("does", "do"),
        ("did", "do"),
        ("done", "do"),
        // strong verbs
        ("went", "go"),
        ("gone", "go"),
        ("said", "say"),
        ("made", "make"),
        ("took", "take"),
        ("taken", "take"),
        ("gave", "give"),
        ("given", "give"),
        ("found", "find"),
        ("saw", "see"),
        ("seen", "see"),
        ("got", "get"),
        ("gotten", "get"),
        ("came", "come"),
        ("knew", "know"),
        ("known", "know"),
        ("thought", "think"),
        ("told", "tell"),
        ("held", "hold"),
        ("kept", "keep"),
        ("left", "leave"),
        ("met", "meet"),
        ("ran", "run"),
        ("wrote", "write"),
        ("written", "write"),
        ("spoke", "speak"),
        ("spoken", "speak"),
        ("brought", "bring"),
        ("bought", "buy"),
        ("sent", "send"),
        ("built", "build"),
        ("felt", "feel"),
        ("paid", "pay"),
        ("lost", "lose"),
        ("chose", "choose"),
        ("chosen", "choose"),
        ("led", "lead"),
        // e-final stems whose past/participle would otherwise truncate
        ("located", "locate"),
        ("based", "base"),
        ("allocated", "allocate"),
        ("allocating", "allocate"),
        ("created", "create"),
        ("used", "use"),
        ("using", "use"),
        ("named", "name"),
        ("required", "require"),
        ("provided", "provide"),
        ("received", "receive"),
        ("described", "describe"),
        ("included", "include"),
        ("involved", "involve"),
        ("managed", "manage"),
        ("managing", "manage"),
        ("examined", "examine"),
        ("prescribed", "prescribe"),
        // irregular noun plurals
        ("children", "child"),
        ("people", "person"),
        ("persons", "person"),
        ("men", "man"),
        ("women", "woman"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("mice", "mouse"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("data", "data"),
        ("diabetes", "diabetes"),
    ];
    entries.iter().copied().collect()
});

/// Default lemmatizer: irregular table first, then ordered suffix rules.
#[derive(Debug, Default, Clone)]
pub struct RuleLemmatizer;

impl RuleLemmatizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, word: &str, _tag: &str) -> String {
        let lower = word.to_lowercase();
        if let Some(&lemma) = IRREGULAR.get(lower.as_str()) {
            return lemma.to_string();
        }
        if let Some(stem) = lower.strip_suffix("ied") {
            if !stem.is_empty() {
                return format!("{stem}y");
            }
        }
        if let Some(stem) = lower.strip_suffix("ed") {
            if stem.len() > 2 {
                return stem.to_string();
            }
        }
        if let Some(stem) = lower.strip_suffix('d') {
            if stem.len() > 2 && stem.ends_with('e') {
                return stem.to_string();
            }
        }
        if let Some(stem) = lower.strip_suffix("ing") {
            if stem.len() > 2 {
                return stem.to_string();
            }
        }
        if let Some(stem) = lower.strip_suffix("ies") {
            if !stem.is_empty() {
                return format!("{stem}y");
            }
        }
        if let Some(stem) = lower.strip_suffix("es") {
            if stem.len() > 2 && matches!(stem.chars().last(), Some('s' | 'z' | 'x' | 'h')) {
                return stem.to_string();
            }
        }
        if let Some(stem) = lower.strip_suffix('s') {
            if stem.len() > 1 && !stem.ends_with('s') && !stem.ends_with('u') && !stem.ends_with('i') {
                return stem.to_string();
            }
        }
        lower
    }
}

/// Simple plural normalisation used by the vocabulary fallback:
/// `-ies→-y`, `-ses/-zes/-xes/-ches/-shes → strip 2`, trailing `-s`.
#[must_use]
pub fn singularize(word: &str) -> String {
    let lower = word.to_lowercase();
    if let Some(stem) = lower.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    for suffix in ["ses", "zes", "xes", "ches", "shes"] {
        if lower.ends_with(suffix) && lower.len() > suffix.len() {
            return lower[..lower.len() - 2].to_string();
        }
    }
    if let Some(stem) = lower.strip_suffix('s') {
        if stem.len() > 1 && !stem.ends_with('s') {
            return stem.to_string();
        }
    }
    lower
}
