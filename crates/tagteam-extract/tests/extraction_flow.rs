//! Integration of the extraction stack: chunks to referents to Tier 2, and
//! dependency trees to acts.

use chrono::{TimeZone, Utc};
use tagteam_core::{vocab, ActualityStatus, DepArc, DepTree, Modality};
use tagteam_extract::{
    EntityExtractor, ExtractionContext, RealWorldEntityFactory, TreeActExtractor,
};
use tagteam_tokenizer::{NpChunker, PosTagger, RuleLemmatizer, Tokenizer};

const TEXT: &str = "The doctor examined the patient with a scanner";

fn tree() -> DepTree {
    let arcs = [
        (1, 2, "det"),
        (2, 3, "nsubj"),
        (3, 0, "root"),
        (4, 5, "det"),
        (5, 3, "obj"),
        (6, 8, "case"),
        (7, 8, "det"),
        (8, 3, "obl"),
    ];
    DepTree::new(
        TEXT.split_whitespace().map(str::to_string).collect(),
        vec!["DT", "NN", "VBD", "DT", "NN", "IN", "DT", "NN"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        arcs.iter()
            .map(|&(d, h, l)| DepArc::new(d, h, l.parse().unwrap()))
            .collect(),
    )
    .unwrap()
}

#[test]
fn referents_and_tier2_for_instrumental_clause() {
    let tokens = Tokenizer::new().tokenize(TEXT);
    let words: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();
    let tags = PosTagger::new().tag(&words);
    let chunks = NpChunker::new().chunk(&tokens, &tags, TEXT);

    let lemmatizer = RuleLemmatizer::new();
    let extractor = EntityExtractor::new(&lemmatizer);
    let mut referents = extractor.extract(&ExtractionContext {
        text: TEXT,
        tokens: &tokens,
        tags: &tags,
        chunks: &chunks,
        ner_signals: &[],
    });

    let doctor = referents
        .iter()
        .find(|r| r.label.eq_ignore_ascii_case("the doctor"))
        .expect("doctor referent");
    assert_eq!(doctor.denoted_type, vocab::CCO_PERSON);

    let scanner = referents
        .iter()
        .find(|r| r.label.eq_ignore_ascii_case("a scanner"))
        .expect("scanner referent");
    assert_eq!(scanner.denoted_type, vocab::CCO_ARTIFACT);
    assert!(scanner.is_pp_object);
    assert_eq!(scanner.introducing_preposition.as_deref(), Some("with"));

    let mut factory = RealWorldEntityFactory::new(
        &lemmatizer,
        "doc:flow",
        Some("doc:flow".to_string()),
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    );
    let tier2 = factory.build_all(&mut referents);

    // Every referent links to exactly one Tier 2 entity.
    for referent in &referents {
        let about = referent.is_about.as_deref().expect("linked referent");
        assert!(tier2.entity(about).is_some(), "missing tier2 for {about}");
    }
    let scanner_entity = tier2
        .entity(referents
            .iter()
            .find(|r| r.label.eq_ignore_ascii_case("a scanner"))
            .and_then(|r| r.is_about.as_deref())
            .unwrap())
        .unwrap();
    assert_eq!(scanner_entity.label, "scanner");
    assert_eq!(scanner_entity.specific_type(), vocab::CCO_ARTIFACT);
}

#[test]
fn acts_for_instrumental_clause() {
    let lemmatizer = RuleLemmatizer::new();
    let extraction = TreeActExtractor::new(&lemmatizer).extract(&tree());

    assert!(extraction.assertions.is_empty());
    assert_eq!(extraction.acts.len(), 1);
    let act = &extraction.acts[0];
    assert_eq!(act.lemma, "examine");
    assert_eq!(act.actuality, ActualityStatus::Actual);
    assert_eq!(act.modality, None::<Modality>);
    assert_eq!(act.agent_tokens, vec![1, 2]);
    assert_eq!(act.affected_tokens, vec![4, 5]);
    assert_eq!(act.participants.len(), 1);
    assert_eq!(act.participants[0].preposition.as_deref(), Some("with"));
    assert_eq!(act.participants[0].tokens, vec![7, 8]);
}
