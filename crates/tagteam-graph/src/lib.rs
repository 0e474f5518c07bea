// tagteam-graph: Validation and serialization

//! # TagTeam Graph
//!
//! The back end of the pipeline: lowering typed nodes onto the flat JSON-LD
//! graph, validating that graph against the eight SHML patterns, and
//! serializing with the fixed `@context`.

pub mod jsonld;
pub mod suggest;
pub mod validator;

pub use jsonld::{node_to_value, JsonLdSerializer, CONTEXT};
pub use suggest::{find_similar, levenshtein};
pub use validator::{
    Finding, PatternId, PatternScore, Severity, ShmlValidator, ValidationReport,
};
