//! Scarcity-assertion promotion
//!
//! Tier 1 scarcity flags promote into ScarcityAssertion ICE nodes about the
//! Tier 2 resource, concretized by an information bearer holding the literal
//! evidence span. Tier 2 entities never carry scarcity fields directly; the
//! Tier 1 referent may keep them as evidence.

use chrono::{DateTime, Utc};
use tagteam_core::{
    ids, vocab, DiscourseReferent, IceKind, InformationBearer, InformationContent,
};
use tracing::warn;

/// ICE + IBE nodes produced by promotion.
#[derive(Debug, Default)]
pub struct ScarcityOutput {
    pub assertions: Vec<InformationContent>,
    pub bearers: Vec<InformationBearer>,
}

/// Promotes Tier 1 scarcity markers into ICE assertions.
pub struct ScarcityAssertionFactory {
    scope: String,
    timestamp: DateTime<Utc>,
}

impl ScarcityAssertionFactory {
    #[must_use]
    pub fn new(scope: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            scope: scope.into(),
            timestamp,
        }
    }

    /// Promote every scarce referent. `text` supplies the literal evidence
    /// substring for the bearer.
    #[must_use]
    pub fn promote(&self, referents: &[DiscourseReferent], text: &str) -> ScarcityOutput {
        let mut out = ScarcityOutput::default();
        for referent in referents {
            let Some(marker) = &referent.scarcity_marker else {
                continue;
            };
            let Some(about) = &referent.is_about else {
                // I6 requires a Tier 2 target; emit nothing for this item.
                warn!(referent = %referent.id, "scarce referent without tier2 target");
                continue;
            };
            let assertion_id = format!(
                "inst:ScarcityAssertion_{}",
                ids::content_hash(&[&referent.id, marker, &self.scope], 12)
            );
            let bearer_id = format!("inst:ibe_{}_{}", referent.start, referent.end);
            let evidence = text
                .get(referent.start..referent.end)
                .unwrap_or(&referent.label)
                .to_string();

            out.bearers.push(InformationBearer {
                id: bearer_id.clone(),
                label: evidence.clone(),
                has_text_value: evidence.clone(),
                start: referent.start,
                end: referent.end,
                concretizes: vec![assertion_id.clone()],
            });
            out.assertions.push(InformationContent {
                id: assertion_id,
                label: format!("scarcity of {}", referent.label),
                types: vec![
                    vocab::TT_SCARCITY_ASSERTION.to_string(),
                    vocab::CCO_ICE.to_string(),
                ],
                kind: IceKind::Scarcity {
                    evidence_text: evidence,
                    scarcity_marker: marker.clone(),
                    supply_count: referent.quantity,
                    extracted_from: referent.id.clone(),
                    detected_at: self.timestamp,
                },
                is_about: Some(about.clone()),
                is_concretized_by: Some(bearer_id),
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tagteam_core::{Definiteness, ReferentialStatus};

    fn scarce_referent(text: &str, start: usize, end: usize) -> DiscourseReferent {
        let mut r = DiscourseReferent::new(
            format!("inst:ref_{start}_{end}"),
            text.to_string(),
            start,
            end,
            Definiteness::Definite,
            ReferentialStatus::Presupposed,
            vocab::CCO_ARTIFACT.to_string(),
        );
        r.scarcity_marker = Some("last".to_string());
        r.quantity = Some(1);
        r.is_about = Some("inst:Artifact_ventilator_abc123def456".to_string());
        r
    }

    #[test]
    fn promotes_scarce_referent() {
        let text = "The doctor must allocate the last ventilator";
        let referent = scarce_referent("the last ventilator", 25, 44);
        let factory = ScarcityAssertionFactory::new(
            "doc1",
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        );
        let out = factory.promote(&[referent], text);
        assert_eq!(out.assertions.len(), 1);
        assert_eq!(out.bearers.len(), 1);

        let assertion = &out.assertions[0];
        assert!(assertion.id.starts_with("inst:ScarcityAssertion_"));
        assert!(assertion.types.contains(&vocab::TT_SCARCITY_ASSERTION.to_string()));
        assert_eq!(
            assertion.is_about.as_deref(),
            Some("inst:Artifact_ventilator_abc123def456")
        );
        let IceKind::Scarcity {
            evidence_text,
            scarcity_marker,
            supply_count,
            extracted_from,
            ..
        } = &assertion.kind
        else {
            panic!("wrong ICE kind");
        };
        assert_eq!(evidence_text, "the last ventilator");
        assert_eq!(scarcity_marker, "last");
        assert_eq!(*supply_count, Some(1));
        assert_eq!(extracted_from, "inst:ref_25_44");

        // The bearer carries the exact source substring.
        let bearer = &out.bearers[0];
        assert_eq!(bearer.has_text_value, &text[25..44]);
        assert_eq!(bearer.concretizes, vec![assertion.id.clone()]);
        assert_eq!(assertion.is_concretized_by.as_deref(), Some(bearer.id.as_str()));
    }

    #[test]
    fn unlinked_referent_is_skipped() {
        let mut referent = scarce_referent("the last ventilator", 25, 44);
        referent.is_about = None;
        let factory = ScarcityAssertionFactory::new(
            "doc1",
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        );
        let out = factory.promote(&[referent], "irrelevant");
        assert!(out.assertions.is_empty());
    }

    #[test]
    fn non_scarce_referents_produce_nothing() {
        let mut referent = scarce_referent("the ventilator", 25, 39);
        referent.scarcity_marker = None;
        let factory = ScarcityAssertionFactory::new(
            "doc1",
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        );
        let out = factory.promote(&[referent], "irrelevant");
        assert!(out.assertions.is_empty());
    }
}
