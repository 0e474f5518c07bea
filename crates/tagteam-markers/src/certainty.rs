//! Lexicon-based certainty analysis
//!
//! Hedges pull the score toward their (low) strength, boosters toward their
//! (high) strength, each by a 0.3 step: `score += 0.3 × (strength − score)`,
//! starting from 0.5 and clamped to [0, 1]. Evidentials dominate the marker
//! typology regardless of score.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hedge/booster subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSubtype {
    Modal,
    Adverb,
    Verb,
    Approximator,
}

/// Evidential source typology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidentialSource {
    Reported,
    Attributed,
    Hearsay,
}

impl EvidentialSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidentialSource::Reported => "reported",
            EvidentialSource::Attributed => "attributed",
            EvidentialSource::Hearsay => "hearsay",
        }
    }
}

/// A matched hedge or booster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerMatch {
    pub marker: String,
    pub position: usize,
    pub strength: f64,
    pub subtype: MarkerSubtype,
}

/// A matched evidential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidentialMatch {
    pub marker: String,
    pub position: usize,
    pub source_type: EvidentialSource,
    pub reliability: f64,
}

/// Dominant marker typology of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DominantType {
    Evidential,
    Hedged,
    Boosted,
    Mixed,
    Neutral,
}

impl DominantType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DominantType::Evidential => "evidential",
            DominantType::Hedged => "hedged",
            DominantType::Boosted => "boosted",
            DominantType::Mixed => "mixed",
            DominantType::Neutral => "neutral",
        }
    }
}

/// Result of certainty analysis over one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertaintyAnalysis {
    pub score: f64,
    pub dominant: DominantType,
    pub hedges: Vec<MarkerMatch>,
    pub boosters: Vec<MarkerMatch>,
    pub evidentials: Vec<EvidentialMatch>,
    pub is_hedged: bool,
    pub is_reported: bool,
}

static HEDGES: Lazy<HashMap<&'static str, (f64, MarkerSubtype)>> = Lazy::new(|| {
    [
        ("might", (0.30, MarkerSubtype::Modal)),
        ("may", (0.35, MarkerSubtype::Modal)),
        ("could", (0.35, MarkerSubtype::Modal)),
        ("possibly", (0.30, MarkerSubtype::Adverb)),
        ("perhaps", (0.30, MarkerSubtype::Adverb)),
        ("probably", (0.45, MarkerSubtype::Adverb)),
        ("likely", (0.50, MarkerSubtype::Adverb)),
        ("seems", (0.40, MarkerSubtype::Verb)),
        ("seem", (0.40, MarkerSubtype::Verb)),
        ("appears", (0.40, MarkerSubtype::Verb)),
        ("appear", (0.40, MarkerSubtype::Verb)),
        ("suggests", (0.40, MarkerSubtype::Verb)),
        ("suggest", (0.40, MarkerSubtype::Verb)),
        ("estimate", (0.45, MarkerSubtype::Verb)),
        ("approximately", (0.45, MarkerSubtype::Approximator)),
        ("roughly", (0.45, MarkerSubtype::Approximator)),
        ("around", (0.45, MarkerSubtype::Approximator)),
        ("nearly", (0.45, MarkerSubtype::Approximator)),
    ]
    .into_iter()
    .collect()
});

static BOOSTERS: Lazy<HashMap<&'static str, (f64, MarkerSubtype)>> = Lazy::new(|| {
    [
        ("definitely", (0.90, MarkerSubtype::Adverb)),
        ("certainly", (0.90, MarkerSubtype::Adverb)),
        ("clearly", (0.85, MarkerSubtype::Adverb)),
        ("undoubtedly", (0.90, MarkerSubtype::Adverb)),
        ("obviously", (0.85, MarkerSubtype::Adverb)),
        ("always", (0.80, MarkerSubtype::Adverb)),
        ("must", (0.80, MarkerSubtype::Modal)),
        ("will", (0.75, MarkerSubtype::Modal)),
        ("proves", (0.85, MarkerSubtype::Verb)),
        ("confirms", (0.85, MarkerSubtype::Verb)),
        ("demonstrates", (0.80, MarkerSubtype::Verb)),
    ]
    .into_iter()
    .collect()
});

static EVIDENTIALS: Lazy<HashMap<&'static str, (EvidentialSource, f64)>> = Lazy::new(|| {
    [
        ("reportedly", (EvidentialSource::Reported, 0.50)),
        ("apparently", (EvidentialSource::Reported, 0.45)),
        ("allegedly", (EvidentialSource::Hearsay, 0.40)),
        ("supposedly", (EvidentialSource::Hearsay, 0.40)),
        ("purportedly", (EvidentialSource::Hearsay, 0.40)),
        ("according", (EvidentialSource::Attributed, 0.55)),
    ]
    .into_iter()
    .collect()
});

/// Whole-word, case-insensitive marker scanner.
#[derive(Debug, Default, Clone)]
pub struct CertaintyAnalyzer;

impl CertaintyAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Analyze one claim's text span.
    #[must_use]
    pub fn analyze(&self, text: &str) -> CertaintyAnalysis {
        let mut hedges = Vec::new();
        let mut boosters = Vec::new();
        let mut evidentials = Vec::new();

        for (word, position) in words_with_positions(text) {
            let lower = word.to_lowercase();
            if let Some(&(strength, subtype)) = HEDGES.get(lower.as_str()) {
                hedges.push(MarkerMatch {
                    marker: lower.clone(),
                    position,
                    strength,
                    subtype,
                });
            }
            if let Some(&(strength, subtype)) = BOOSTERS.get(lower.as_str()) {
                boosters.push(MarkerMatch {
                    marker: lower.clone(),
                    position,
                    strength,
                    subtype,
                });
            }
            if let Some(&(source_type, reliability)) = EVIDENTIALS.get(lower.as_str()) {
                evidentials.push(EvidentialMatch {
                    marker: lower,
                    position,
                    source_type,
                    reliability,
                });
            }
        }

        // Markers adjust the score in text order.
        let mut adjustments: Vec<(usize, f64)> = hedges
            .iter()
            .map(|h| (h.position, h.strength))
            .chain(boosters.iter().map(|b| (b.position, b.strength)))
            .collect();
        adjustments.sort_by_key(|&(p, _)| p);
        let mut score: f64 = 0.5;
        for (_, strength) in adjustments {
            score += 0.3 * (strength - score);
        }
        score = score.clamp(0.0, 1.0);

        let dominant = if !evidentials.is_empty() {
            DominantType::Evidential
        } else if !hedges.is_empty() && !boosters.is_empty() {
            DominantType::Mixed
        } else if !hedges.is_empty() {
            DominantType::Hedged
        } else if !boosters.is_empty() {
            DominantType::Boosted
        } else {
            DominantType::Neutral
        };

        CertaintyAnalysis {
            score,
            dominant,
            is_hedged: !hedges.is_empty(),
            is_reported: !evidentials.is_empty(),
            hedges,
            boosters,
            evidentials,
        }
    }
}

fn words_with_positions(text: &str) -> Vec<(&str, usize)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_ascii_alphanumeric() || c == '\'' {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            out.push((&text[s..i], s));
        }
    }
    if let Some(s) = start {
        out.push((&text[s..], s));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evidential_with_hedge() {
        let analysis =
            CertaintyAnalyzer::new().analyze("The patient reportedly might have the condition");
        assert_eq!(analysis.evidentials.len(), 1);
        assert_eq!(analysis.evidentials[0].marker, "reportedly");
        assert_eq!(analysis.evidentials[0].source_type, EvidentialSource::Reported);
        assert_eq!(analysis.hedges.len(), 1);
        assert_eq!(analysis.hedges[0].marker, "might");
        assert_eq!(analysis.hedges[0].subtype, MarkerSubtype::Modal);
        assert_eq!(analysis.dominant, DominantType::Evidential);
        assert!(analysis.score < 0.5);
        assert!(analysis.is_hedged);
        assert!(analysis.is_reported);
    }

    #[test]
    fn booster_raises_score() {
        let analysis = CertaintyAnalyzer::new().analyze("This definitely works");
        assert!(analysis.score > 0.5);
        assert_eq!(analysis.dominant, DominantType::Boosted);
    }

    #[test]
    fn mixed_markers() {
        let analysis = CertaintyAnalyzer::new().analyze("It might definitely work");
        assert_eq!(analysis.dominant, DominantType::Mixed);
    }

    #[test]
    fn neutral_text_is_half() {
        let analysis = CertaintyAnalyzer::new().analyze("The doctor examined the patient");
        assert_eq!(analysis.score, 0.5);
        assert_eq!(analysis.dominant, DominantType::Neutral);
        assert!(!analysis.is_hedged);
        assert!(!analysis.is_reported);
    }

    #[test]
    fn whole_word_matching_only() {
        // "mighty" must not match the hedge "might".
        let analysis = CertaintyAnalyzer::new().analyze("A mighty effort");
        assert!(analysis.hedges.is_empty());
    }

    #[test]
    fn score_recurrence_is_order_dependent_and_clamped() {
        let analyzer = CertaintyAnalyzer::new();
        let a = analyzer.analyze("might definitely");
        let b = analyzer.analyze("definitely might");
        assert!(a.score > 0.0 && a.score < 1.0);
        assert!(b.score > 0.0 && b.score < 1.0);
        assert_ne!(a.score, b.score);
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn score_stays_in_unit_interval(text in "[a-zA-Z ']{0,200}") {
                let analysis = CertaintyAnalyzer::new().analyze(&text);
                prop_assert!((0.0..=1.0).contains(&analysis.score));
            }

            #[test]
            fn marker_positions_index_into_text(text in "[a-zA-Z ]{0,200}") {
                let analysis = CertaintyAnalyzer::new().analyze(&text);
                for marker in analysis.hedges.iter().chain(&analysis.boosters) {
                    let slice = &text[marker.position..marker.position + marker.marker.len()];
                    prop_assert!(slice.eq_ignore_ascii_case(&marker.marker));
                }
            }
        }
    }
}
