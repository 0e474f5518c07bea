//! Rule-based genericity classification
//!
//! Subject noun phrases classify into GEN / INST / UNIV / AMB from
//! determiner, number, tense/aspect, predicate type, and modality signals,
//! combined deterministically. Only subject-position entities are classified.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use tagteam_core::{GenericityAlternative, GenericityCategory, GenericityReading};

/// Stative predicates boost the generic reading.
static STATIVE_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "be", "have", "contain", "include", "know", "belong", "consist", "comprise", "own",
        "possess", "represent", "involve", "concern", "require", "need",
    ]
    .into_iter()
    .collect()
});

/// Common mass nouns read generically when bare.
static MASS_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["water", "fur", "information", "money", "sand", "air", "blood", "rice", "equipment"]
        .into_iter()
        .collect()
});

static DEONTIC_MODALS: &[&str] = &["shall", "must", "should"];
static EPISTEMIC_MODALS: &[&str] = &["might", "may", "could"];

/// Subject-position context consumed by the detector.
#[derive(Debug, Clone, Default)]
pub struct SubjectContext {
    pub determiner: Option<String>,
    pub head: String,
    /// Penn tag of the head noun.
    pub head_tag: String,
    pub is_plural: bool,
    /// Lemma of the governing predicate.
    pub predicate_lemma: String,
    /// Penn tag of the governing predicate.
    pub predicate_tag: String,
    /// Modal auxiliary under the predicate, if any.
    pub modal: Option<String>,
}

impl SubjectContext {
    fn is_proper(&self) -> bool {
        matches!(self.head_tag.as_str(), "NNP" | "NNPS")
    }

    fn is_stative(&self) -> bool {
        STATIVE_VERBS.contains(self.predicate_lemma.as_str())
    }

    fn is_present(&self) -> bool {
        matches!(self.predicate_tag.as_str(), "VBZ" | "VBP" | "VB")
    }

    fn is_past(&self) -> bool {
        matches!(self.predicate_tag.as_str(), "VBD" | "VBN")
    }

    fn is_mass(&self) -> bool {
        MASS_NOUNS.contains(self.head.to_lowercase().as_str())
    }
}

/// Determiner/tense/predicate/modality driven classifier.
#[derive(Debug, Default, Clone)]
pub struct GenericityDetector;

impl GenericityDetector {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Classify one subject NP.
    #[must_use]
    pub fn classify(&self, subject: &SubjectContext) -> GenericityReading {
        // Proper nouns are instances, full stop.
        if subject.is_proper() {
            return reading(GenericityCategory::Inst, 0.95, "proper_noun", None);
        }

        let determiner = subject.determiner.as_deref().map(str::to_lowercase);
        match determiner.as_deref() {
            Some("all" | "every" | "each") => {
                return reading(GenericityCategory::Univ, 0.90, "universal_quantifier", None);
            }
            Some("no") => {
                return reading(GenericityCategory::Univ, 0.85, "negative_universal", None);
            }
            Some("some" | "several" | "few" | "many") => {
                return reading(GenericityCategory::Inst, 0.70, "existential_quantifier", None);
            }
            Some("a" | "an") => {
                // Deontic modal + indefinite subject reads as a rule.
                if subject
                    .modal
                    .as_deref()
                    .is_some_and(|m| DEONTIC_MODALS.contains(&m))
                {
                    return reading(
                        GenericityCategory::Gen,
                        0.75,
                        "indefinite_deontic",
                        Some((GenericityCategory::Inst, 0.25)),
                    );
                }
                if subject
                    .modal
                    .as_deref()
                    .is_some_and(|m| EPISTEMIC_MODALS.contains(&m))
                {
                    return reading(
                        GenericityCategory::Amb,
                        0.50,
                        "indefinite_epistemic",
                        Some((GenericityCategory::Inst, 0.50)),
                    );
                }
                return reading(
                    GenericityCategory::Gen,
                    0.55,
                    "indefinite_weak",
                    Some((GenericityCategory::Inst, 0.45)),
                );
            }
            Some(
                "the" | "this" | "that" | "these" | "those" | "my" | "your" | "his" | "her"
                | "its" | "our" | "their",
            ) => {
                // Institutional-the: "The electron has negative charge".
                if determiner.as_deref() == Some("the")
                    && !subject.is_plural
                    && subject.is_stative()
                    && subject.is_present()
                {
                    return reading(
                        GenericityCategory::Amb,
                        0.55,
                        "institutional_the",
                        Some((GenericityCategory::Gen, 0.45)),
                    );
                }
                return reading(GenericityCategory::Inst, 0.85, "definite_determiner", None);
            }
            _ => {}
        }

        // Bare subjects.
        if subject.is_plural {
            if subject.is_past() && !subject.is_stative() {
                // "Dogs barked" is an episodic reading.
                return reading(
                    GenericityCategory::Inst,
                    0.60,
                    "bare_plural_episodic",
                    Some((GenericityCategory::Gen, 0.40)),
                );
            }
            let confidence = if subject.is_stative() && subject.is_present() {
                0.95
            } else {
                0.90
            };
            return reading(GenericityCategory::Gen, confidence, "bare_plural", None);
        }
        if subject.is_mass() {
            return reading(GenericityCategory::Gen, 0.85, "bare_mass", None);
        }
        reading(
            GenericityCategory::Amb,
            0.50,
            "bare_singular",
            Some((GenericityCategory::Inst, 0.50)),
        )
    }
}

fn reading(
    category: GenericityCategory,
    confidence: f64,
    basis: &str,
    alternative: Option<(GenericityCategory, f64)>,
) -> GenericityReading {
    GenericityReading {
        category,
        confidence,
        basis: basis.to_string(),
        alternative: alternative.map(|(category, confidence)| GenericityAlternative {
            category,
            confidence,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(determiner: Option<&str>, head: &str, head_tag: &str, plural: bool) -> SubjectContext {
        SubjectContext {
            determiner: determiner.map(str::to_string),
            head: head.to_string(),
            head_tag: head_tag.to_string(),
            is_plural: plural,
            predicate_lemma: "have".to_string(),
            predicate_tag: "VBP".to_string(),
            modal: None,
        }
    }

    #[test]
    fn bare_plural_stative_is_strongly_generic() {
        // "Dogs have fur"
        let r = GenericityDetector::new().classify(&subject(None, "Dogs", "NNS", true));
        assert_eq!(r.category, GenericityCategory::Gen);
        assert!(r.confidence >= 0.9);
        assert_eq!(r.basis, "bare_plural");
    }

    #[test]
    fn bare_plural_past_dynamic_is_episodic() {
        let mut s = subject(None, "Dogs", "NNS", true);
        s.predicate_lemma = "bark".to_string();
        s.predicate_tag = "VBD".to_string();
        let r = GenericityDetector::new().classify(&s);
        assert_eq!(r.category, GenericityCategory::Inst);
        assert!(r.alternative.is_some());
    }

    #[test]
    fn definite_is_instance() {
        let mut s = subject(Some("the"), "doctor", "NN", false);
        s.predicate_lemma = "allocate".to_string();
        s.predicate_tag = "VB".to_string();
        let r = GenericityDetector::new().classify(&s);
        assert_eq!(r.category, GenericityCategory::Inst);
    }

    #[test]
    fn institutional_the_is_ambiguous() {
        // "The electron has negative charge"
        let s = subject(Some("the"), "electron", "NN", false);
        let r = GenericityDetector::new().classify(&s);
        assert_eq!(r.category, GenericityCategory::Amb);
        assert_eq!(r.basis, "institutional_the");
        assert_eq!(r.alternative.unwrap().category, GenericityCategory::Gen);
    }

    #[test]
    fn universal_quantifiers() {
        let r = GenericityDetector::new().classify(&subject(Some("every"), "dog", "NN", false));
        assert_eq!(r.category, GenericityCategory::Univ);
        let r = GenericityDetector::new().classify(&subject(Some("no"), "dog", "NN", false));
        assert_eq!(r.category, GenericityCategory::Univ);
        assert_eq!(r.basis, "negative_universal");
    }

    #[test]
    fn proper_noun_is_instance() {
        let r = GenericityDetector::new().classify(&subject(None, "CBP", "NNP", false));
        assert_eq!(r.category, GenericityCategory::Inst);
        assert!(r.confidence >= 0.9);
    }

    #[test]
    fn indefinite_with_deontic_modal_reads_generic() {
        let mut s = subject(Some("a"), "provider", "NN", false);
        s.modal = Some("shall".to_string());
        let r = GenericityDetector::new().classify(&s);
        assert_eq!(r.category, GenericityCategory::Gen);
        assert_eq!(r.basis, "indefinite_deontic");
    }

    #[test]
    fn indefinite_with_epistemic_modal_is_ambiguous() {
        let mut s = subject(Some("a"), "visitor", "NN", false);
        s.modal = Some("might".to_string());
        let r = GenericityDetector::new().classify(&s);
        assert_eq!(r.category, GenericityCategory::Amb);
    }

    #[test]
    fn bare_mass_noun_is_generic() {
        let r = GenericityDetector::new().classify(&subject(None, "water", "NN", false));
        assert_eq!(r.category, GenericityCategory::Gen);
        assert_eq!(r.basis, "bare_mass");
    }

    #[test]
    fn bare_singular_count_is_ambiguous() {
        let r = GenericityDetector::new().classify(&subject(None, "dog", "NN", false));
        assert_eq!(r.category, GenericityCategory::Amb);
    }
}
