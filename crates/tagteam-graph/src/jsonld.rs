//! JSON-LD serialization
//!
//! Lowers typed graph nodes onto flat JSON maps and wraps them in a document
//! with the fixed `@context`. The context aliases `id`/`type`/`label`, maps
//! compact prefixes to full IRIs, declares the class aliases, and coerces
//! `@id`-valued and literal-typed predicates. Parsing is the inverse.

use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};
use tagteam_core::{GraphError, GraphResult, IceKind, Node};

/// Predicates whose values are node references.
static ID_COERCED: &[&str] = &[
    "inheres_in",
    "is_bearer_of",
    "realized_in",
    "would_be_realized_in",
    "has_participant",
    "has_agent",
    "affects",
    "is_concretized_by",
    "concretizes",
    "is_about",
    "asserts",
    "based_on",
    "detected_by",
    "validInContext",
    "assertionType",
    "validatedBy",
    "supersedes",
    "occurs_during",
    "has_member_part",
    "prescribes",
    "designates",
    "is_designated_by",
    "extracted_from",
    "instantiated_by",
    "alternativeFor",
    "denotesType",
    "denotedType",
    "relation",
    "subject",
    "object",
];

/// Literal predicates with an explicit datatype.
static LITERAL_TYPED: &[(&str, &str)] = &[
    ("extractionConfidence", "xsd:decimal"),
    ("classificationConfidence", "xsd:decimal"),
    ("relevanceConfidence", "xsd:decimal"),
    ("aggregateConfidence", "xsd:decimal"),
    ("validationTimestamp", "xsd:dateTime"),
    ("instantiated_at", "xsd:dateTime"),
    ("detected_at", "xsd:dateTime"),
    ("temporal_extent", "xsd:decimal"),
    ("score", "xsd:decimal"),
    ("polarity", "xsd:integer"),
    ("salience", "xsd:decimal"),
];

static CLASS_ALIASES: &[(&str, &str)] = &[
    ("DiscourseReferent", "tagteam:DiscourseReferent"),
    ("StructuralAssertion", "tagteam:StructuralAssertion"),
    ("ScarcityAssertion", "tagteam:ScarcityAssertion"),
    ("DirectiveContent", "tagteam:DirectiveContent"),
    ("DeonticContent", "tagteam:DeonticContent"),
    ("ValueAssertionEvent", "tagteam:ValueAssertionEvent"),
    ("ContextAssessmentEvent", "tagteam:ContextAssessmentEvent"),
    ("AlternativeNode", "tagteam:AlternativeNode"),
    ("ComplexDesignator", "tagteam:ComplexDesignator"),
    ("QualityMeasurement", "tagteam:QualityMeasurement"),
];

/// The fixed `@context` of every emitted document.
pub static CONTEXT: Lazy<Value> = Lazy::new(|| {
    let mut context = Map::new();
    context.insert(
        "bfo".to_string(),
        json!("http://purl.obolibrary.org/obo/"),
    );
    context.insert(
        "cco".to_string(),
        json!("http://www.ontologyrepository.com/CommonCoreOntologies/"),
    );
    context.insert("tagteam".to_string(), json!("http://tagteam.dev/ontology/"));
    context.insert("inst".to_string(), json!("http://tagteam.dev/instance/"));
    context.insert(
        "rdf".to_string(),
        json!("http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    );
    context.insert(
        "rdfs".to_string(),
        json!("http://www.w3.org/2000/01/rdf-schema#"),
    );
    context.insert("owl".to_string(), json!("http://www.w3.org/2002/07/owl#"));
    context.insert("xsd".to_string(), json!("http://www.w3.org/2001/XMLSchema#"));
    context.insert("id".to_string(), json!("@id"));
    context.insert("type".to_string(), json!("@type"));
    context.insert("label".to_string(), json!("rdfs:label"));
    for (alias, iri) in CLASS_ALIASES {
        context.insert((*alias).to_string(), json!(iri));
    }
    for predicate in ID_COERCED {
        context.insert(
            (*predicate).to_string(),
            json!({ "@id": format!("tagteam:{predicate}"), "@type": "@id" }),
        );
    }
    for (predicate, datatype) in LITERAL_TYPED {
        context.insert(
            (*predicate).to_string(),
            json!({ "@id": format!("tagteam:{predicate}"), "@type": datatype }),
        );
    }
    Value::Object(context)
});

fn reference(iri: &str) -> Value {
    json!({ "id": iri })
}

/// Scalar reference for one target, sequence for several.
fn reference_seq(iris: &[String]) -> Option<Value> {
    match iris {
        [] => None,
        [only] => Some(reference(only)),
        many => Some(Value::Array(many.iter().map(|i| reference(i)).collect())),
    }
}

fn set_opt(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value);
    }
}

/// Lower one typed node onto its flat JSON map.
#[must_use]
pub fn node_to_value(node: &Node) -> Value {
    let mut map = Map::new();
    map.insert("id".to_string(), json!(node.id()));
    match node {
        Node::Referent(r) => {
            map.insert("type".to_string(), json!(["tagteam:DiscourseReferent"]));
            map.insert("label".to_string(), json!(r.label));
            map.insert("textSpanStart".to_string(), json!(r.start));
            map.insert("textSpanEnd".to_string(), json!(r.end));
            map.insert("definiteness".to_string(), json!(r.definiteness.as_str()));
            map.insert(
                "referentialStatus".to_string(),
                json!(r.referential_status.as_str()),
            );
            map.insert("denotesType".to_string(), reference(&r.denoted_type));
            set_opt(&mut map, "scarcityMarker", r.scarcity_marker.as_ref().map(|m| json!(m)));
            set_opt(&mut map, "quantity", r.quantity.map(|q| json!(q)));
            set_opt(&mut map, "quantifier", r.quantifier.as_ref().map(|q| json!(q)));
            set_opt(&mut map, "temporalUnit", r.temporal_unit.map(|u| json!(u.as_str())));
            set_opt(
                &mut map,
                "introducingPreposition",
                r.introducing_preposition.as_ref().map(|p| json!(p)),
            );
            set_opt(&mut map, "typeRefinedBy", r.type_refined_by.as_ref().map(|v| json!(v)));
            if r.is_conjunct {
                map.insert("isConjunct".to_string(), json!(true));
                set_opt(
                    &mut map,
                    "coordinationType",
                    r.coordination_type.map(|c| json!(c.as_str())),
                );
            }
            if r.is_possessor {
                map.insert("isPossessor".to_string(), json!(true));
            }
            if r.is_pp_object {
                map.insert("isPPObject".to_string(), json!(true));
                set_opt(&mut map, "preposition", r.preposition.as_ref().map(|p| json!(p)));
            }
            if r.is_pronoun {
                map.insert("isPronoun".to_string(), json!(true));
                set_opt(&mut map, "pronounType", r.pronoun_type.map(|p| json!(p.as_str())));
            }
            if let Some(genericity) = &r.genericity {
                map.insert(
                    "genericityCategory".to_string(),
                    json!(genericity.category.as_str()),
                );
                map.insert("genericityBasis".to_string(), json!(genericity.basis));
                map.insert(
                    "genericityConfidence".to_string(),
                    json!(genericity.confidence),
                );
            }
            set_opt(&mut map, "is_about", r.is_about.as_ref().map(|a| reference(a)));
        }
        Node::Entity(e) => {
            map.insert("type".to_string(), json!(e.types));
            map.insert("label".to_string(), json!(e.label));
            map.insert(
                "instantiated_at".to_string(),
                json!(e.instantiated_at.to_rfc3339()),
            );
            set_opt(
                &mut map,
                "instantiated_by",
                e.instantiated_by.as_ref().map(|d| reference(d)),
            );
            set_opt(&mut map, "is_bearer_of", reference_seq(&e.is_bearer_of));
            set_opt(
                &mut map,
                "genericityCategory",
                e.genericity_category.map(|g| json!(g.as_str())),
            );
            if let Some(nomination) = &e.class_nomination {
                map.insert("classNominationStatus".to_string(), json!(nomination.status));
                map.insert(
                    "nominatedClassLabel".to_string(),
                    json!(nomination.nominated_class_label),
                );
                map.insert("nominationBasis".to_string(), json!(nomination.basis));
                map.insert("requiresOntologyResolution".to_string(), json!(true));
            }
        }
        Node::Act(a) => {
            map.insert("type".to_string(), json!(["cco:Act"]));
            map.insert("label".to_string(), json!(a.label));
            map.insert("verb".to_string(), json!(a.verb));
            map.insert("lemma".to_string(), json!(a.lemma));
            map.insert("tag".to_string(), json!(a.tag));
            map.insert("pattern".to_string(), json!(a.pattern.as_str()));
            map.insert("isPassive".to_string(), json!(a.is_passive));
            map.insert("isNegated".to_string(), json!(a.is_negated));
            map.insert("isCopular".to_string(), json!(a.is_copular));
            set_opt(&mut map, "modality", a.modality.map(|m| json!(m.as_str())));
            map.insert("actualityStatus".to_string(), json!(a.actuality.as_str()));
            set_opt(&mut map, "has_agent", a.has_agent.as_ref().map(|v| reference(v)));
            set_opt(&mut map, "affects", a.affects.as_ref().map(|v| reference(v)));
            set_opt(&mut map, "has_participant", reference_seq(&a.has_participant));
            set_opt(&mut map, "occurs_during", a.occurs_during.as_ref().map(|v| reference(v)));
        }
        Node::Assertion(s) => {
            map.insert("type".to_string(), json!(["tagteam:StructuralAssertion"]));
            map.insert("label".to_string(), json!(s.label));
            map.insert("pattern".to_string(), json!(s.pattern.as_str()));
            map.insert("subjectText".to_string(), json!(s.subject_text));
            set_opt(&mut map, "objectText", s.object_text.as_ref().map(|o| json!(o)));
            set_opt(&mut map, "subject", s.subject.as_ref().map(|v| reference(v)));
            set_opt(&mut map, "object", s.object.as_ref().map(|v| reference(v)));
            set_opt(&mut map, "copula", s.copula.as_ref().map(|c| json!(c)));
            map.insert("isNegated".to_string(), json!(s.negated));
            set_opt(&mut map, "relation", s.relation.as_ref().map(|r| reference(r)));
        }
        Node::Role(role) => {
            map.insert("type".to_string(), json!(role.types));
            map.insert("label".to_string(), json!(role.label));
            map.insert("inheres_in".to_string(), reference(&role.inheres_in));
            set_opt(&mut map, "realized_in", reference_seq(&role.realized_in));
            set_opt(
                &mut map,
                "would_be_realized_in",
                reference_seq(&role.would_be_realized_in),
            );
        }
        Node::Aggregate(aggregate) => {
            map.insert(
                "type".to_string(),
                json!(["bfo:BFO_0000027", "owl:NamedIndividual"]),
            );
            map.insert("label".to_string(), json!(aggregate.label));
            set_opt(&mut map, "has_member_part", reference_seq(&aggregate.has_member_part));
            map.insert("member_count".to_string(), json!(aggregate.member_count));
        }
        Node::Member(member) => {
            map.insert("type".to_string(), json!(["cco:Person", "owl:NamedIndividual"]));
            map.insert("label".to_string(), json!(member.label));
            map.insert("member_index".to_string(), json!(member.member_index));
            map.insert("member_count".to_string(), json!(member.member_count));
            set_opt(&mut map, "is_bearer_of", reference_seq(&member.is_bearer_of));
        }
        Node::Ice(ice) => {
            map.insert("type".to_string(), json!(ice.types));
            map.insert("label".to_string(), json!(ice.label));
            set_opt(&mut map, "is_about", ice.is_about.as_ref().map(|a| reference(a)));
            set_opt(
                &mut map,
                "is_concretized_by",
                ice.is_concretized_by.as_ref().map(|b| reference(b)),
            );
            match &ice.kind {
                IceKind::Scarcity {
                    evidence_text,
                    scarcity_marker,
                    supply_count,
                    extracted_from,
                    detected_at,
                } => {
                    map.insert("evidenceText".to_string(), json!(evidence_text));
                    map.insert("scarcityMarker".to_string(), json!(scarcity_marker));
                    set_opt(&mut map, "supplyCount", supply_count.map(|s| json!(s)));
                    map.insert("extracted_from".to_string(), reference(extracted_from));
                    map.insert("detected_at".to_string(), json!(detected_at.to_rfc3339()));
                }
                IceKind::Directive {
                    modal_type,
                    modal_marker,
                    prescribes,
                } => {
                    map.insert("modalType".to_string(), json!(modal_type.as_str()));
                    map.insert("modalMarker".to_string(), json!(modal_marker));
                    map.insert("prescribes".to_string(), reference(prescribes));
                }
                IceKind::Generic => {}
            }
        }
        Node::Ibe(ibe) => {
            map.insert("type".to_string(), json!(["cco:InformationBearingEntity"]));
            map.insert("label".to_string(), json!(ibe.label));
            map.insert("has_text_value".to_string(), json!(ibe.has_text_value));
            map.insert("textSpanStart".to_string(), json!(ibe.start));
            map.insert("textSpanEnd".to_string(), json!(ibe.end));
            set_opt(&mut map, "concretizes", reference_seq(&ibe.concretizes));
        }
        Node::Designator(d) => {
            map.insert(
                "type".to_string(),
                json!([
                    "tagteam:ComplexDesignator",
                    "cco:DesignativeInformationContentEntity"
                ]),
            );
            map.insert("label".to_string(), json!(d.full_name));
            map.insert("fullName".to_string(), json!(d.full_name));
            map.insert("nameComponents".to_string(), json!(d.name_components));
            map.insert("denotedType".to_string(), reference(&d.denoted_type));
            map.insert("textSpanStart".to_string(), json!(d.start));
            map.insert("textSpanEnd".to_string(), json!(d.end));
            set_opt(&mut map, "designates", d.designates.as_ref().map(|v| reference(v)));
        }
    }
    Value::Object(map)
}

/// Serializer for the fixed-context JSON-LD document shape.
#[derive(Debug, Clone)]
pub struct JsonLdSerializer {
    pub compact: bool,
    pub pretty: bool,
}

impl Default for JsonLdSerializer {
    fn default() -> Self {
        Self {
            compact: true,
            pretty: false,
        }
    }
}

impl JsonLdSerializer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Wrap a flat graph in `{ "@context": ..., "@graph": [...] }`.
    #[must_use]
    pub fn document(&self, graph: &[Value]) -> Value {
        json!({
            "@context": CONTEXT.clone(),
            "@graph": graph,
        })
    }

    /// Serialize to a string; keys serialize in canonical (sorted) order, so
    /// identical graphs yield byte-identical output.
    #[must_use]
    pub fn serialize(&self, graph: &[Value]) -> String {
        let document = self.document(graph);
        if self.pretty {
            serde_json::to_string_pretty(&document).unwrap_or_default()
        } else {
            serde_json::to_string(&document).unwrap_or_default()
        }
    }

    /// Parse a document back into its graph and context.
    pub fn parse(&self, input: &str) -> GraphResult<(Vec<Value>, Value)> {
        let value: Value = serde_json::from_str(input).map_err(|_| GraphError::EmptyInput)?;
        let graph = value
            .get("@graph")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| GraphError::MissingNode {
                id: "@graph".to_string(),
            })?;
        let context = value.get("@context").cloned().unwrap_or(Value::Null);
        Ok((graph, context))
    }
}
