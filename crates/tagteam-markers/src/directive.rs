//! Directive and deontic content
//!
//! Deontic modals on acts yield ICE nodes prescribing the act: obligation and
//! recommendation produce DirectiveContent, permission produces
//! DeonticContent. One information bearer spans the source sentence and may
//! concretize several directives.

use tagteam_core::{ids, vocab, Act, IceKind, InformationBearer, InformationContent, Modality};

/// ICE + IBE nodes produced for one document.
#[derive(Debug, Default)]
pub struct DirectiveOutput {
    pub directives: Vec<InformationContent>,
    pub bearers: Vec<InformationBearer>,
}

/// Emits directive/deontic ICEs for modalised acts.
pub struct DirectiveContentFactory {
    scope: String,
}

impl DirectiveContentFactory {
    #[must_use]
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    /// Build directives for every deontically-modalised act.
    /// `modal_marker` looks up the surface modal for an act id.
    #[must_use]
    pub fn build<'a>(
        &self,
        acts: &[Act],
        modal_marker: impl Fn(&str) -> Option<&'a str>,
        text: &str,
    ) -> DirectiveOutput {
        let mut out = DirectiveOutput::default();
        let mut bearer: Option<InformationBearer> = None;

        for act in acts {
            let Some(modality) = act.modality else { continue };
            let ice_type = match modality {
                Modality::Obligation | Modality::Recommendation => vocab::TT_DIRECTIVE_CONTENT,
                Modality::Permission => vocab::TT_DEONTIC_CONTENT,
                _ => continue,
            };
            let marker = modal_marker(&act.id).unwrap_or_default().to_string();

            // One sentence-spanning bearer concretizes all directives.
            let bearer_entry = bearer.get_or_insert_with(|| InformationBearer {
                id: format!("inst:ibe_0_{}", text.len()),
                label: text.to_string(),
                has_text_value: text.to_string(),
                start: 0,
                end: text.len(),
                concretizes: Vec::new(),
            });

            let id = format!(
                "inst:{}_{}",
                vocab::local_name(ice_type),
                ids::content_hash(&[&act.id, &marker, &self.scope], 12)
            );
            bearer_entry.concretizes.push(id.clone());
            out.directives.push(InformationContent {
                id,
                label: format!("{} {}", marker, act.label).trim().to_string(),
                types: vec![ice_type.to_string(), vocab::CCO_DIRECTIVE_ICE.to_string()],
                kind: IceKind::Directive {
                    modal_type: modality,
                    modal_marker: marker,
                    prescribes: act.id.clone(),
                },
                is_about: None,
                is_concretized_by: Some(bearer_entry.id.clone()),
            });
        }
        if let Some(b) = bearer {
            out.bearers.push(b);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagteam_core::{ActPattern, ActualityStatus};

    fn act(id: &str, modality: Option<Modality>) -> Act {
        Act {
            id: id.to_string(),
            label: "allocate".to_string(),
            verb: "allocate".to_string(),
            lemma: "allocate".to_string(),
            tag: "VB".to_string(),
            pattern: ActPattern::Regular,
            is_passive: false,
            is_negated: false,
            is_copular: false,
            modality,
            actuality: ActualityStatus::Prescribed,
            has_agent: None,
            affects: None,
            has_participant: Vec::new(),
            occurs_during: None,
        }
    }

    #[test]
    fn obligation_yields_directive_content() {
        let factory = DirectiveContentFactory::new("doc1");
        let out = factory.build(
            &[act("inst:act_1", Some(Modality::Obligation))],
            |_| Some("must"),
            "The doctor must allocate the ventilator",
        );
        assert_eq!(out.directives.len(), 1);
        let directive = &out.directives[0];
        assert!(directive.id.starts_with("inst:DirectiveContent_"));
        assert!(directive.types.contains(&vocab::TT_DIRECTIVE_CONTENT.to_string()));
        let IceKind::Directive {
            modal_type,
            modal_marker,
            prescribes,
        } = &directive.kind
        else {
            panic!("wrong kind");
        };
        assert_eq!(*modal_type, Modality::Obligation);
        assert_eq!(modal_marker, "must");
        assert_eq!(prescribes, "inst:act_1");
        // The bearer holds the sentence and concretizes the directive.
        assert_eq!(out.bearers.len(), 1);
        assert_eq!(out.bearers[0].concretizes, vec![directive.id.clone()]);
    }

    #[test]
    fn permission_yields_deontic_content() {
        let factory = DirectiveContentFactory::new("doc1");
        let out = factory.build(
            &[act("inst:act_1", Some(Modality::Permission))],
            |_| Some("may"),
            "Visitors may enter",
        );
        assert!(out.directives[0]
            .types
            .contains(&vocab::TT_DEONTIC_CONTENT.to_string()));
    }

    #[test]
    fn one_bearer_concretizes_multiple_directives() {
        let factory = DirectiveContentFactory::new("doc1");
        let out = factory.build(
            &[
                act("inst:act_1", Some(Modality::Obligation)),
                act("inst:act_2", Some(Modality::Recommendation)),
            ],
            |id| {
                if id.ends_with('1') {
                    Some("must")
                } else {
                    Some("should")
                }
            },
            "Staff must wash hands and should wear masks",
        );
        assert_eq!(out.directives.len(), 2);
        assert_eq!(out.bearers.len(), 1);
        assert_eq!(out.bearers[0].concretizes.len(), 2);
    }

    #[test]
    fn epistemic_modality_is_not_a_directive() {
        let factory = DirectiveContentFactory::new("doc1");
        let out = factory.build(
            &[act("inst:act_1", Some(Modality::Possibility))],
            |_| Some("might"),
            "The patient might have the condition",
        );
        assert!(out.directives.is_empty());
        assert!(out.bearers.is_empty());
    }
}
