// tagteam-pipeline: Document pipeline orchestration

//! # TagTeam Pipeline
//!
//! The single-document, single-pass pipeline: free-form English prose plus an
//! externally-built dependency parse in, a validated BFO/CCO JSON-LD
//! knowledge graph out.
//!
//! ## Example
//!
//! ```rust
//! use tagteam_pipeline::{DependencyParse, GraphBuilder, PipelineConfig};
//! use tagteam_core::{DepArc, UdLabel};
//!
//! let parse = DependencyParse {
//!     tokens: vec!["Dogs".into(), "have".into(), "fur".into()],
//!     tags: vec!["NNS".into(), "VBP".into(), "NN".into()],
//!     arcs: vec![
//!         DepArc::new(1, 2, UdLabel::Nsubj),
//!         DepArc::new(2, 0, UdLabel::Root),
//!         DepArc::new(3, 2, UdLabel::Obj),
//!     ],
//! };
//! let builder = GraphBuilder::new(PipelineConfig::new().with_document_iri("doc:demo"));
//! let output = builder.build("Dogs have fur", Some(&parse), &[])?;
//! assert!(!output.graph.is_empty());
//! # Ok::<(), tagteam_core::GraphError>(())
//! ```

pub mod config;
pub mod pipeline;

pub use config::PipelineConfig;
pub use pipeline::{DependencyParse, GraphBuilder, PipelineOutput};

// Re-export the pieces callers typically need alongside the pipeline.
pub use tagteam_core::{DepArc, GraphError, GraphResult, UdLabel};
pub use tagteam_extract::{DomainConfigLoader, NamedEntitySignal, NerKind};
pub use tagteam_graph::{ShmlValidator, ValidationReport};
pub use tagteam_tokenizer::Lemmatizer;
