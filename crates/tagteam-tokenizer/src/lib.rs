// tagteam-tokenizer: Lexical layer for tagteam

//! # TagTeam Tokenizer
//!
//! The lexical layer of the extraction pipeline: offset-preserving
//! tokenization and sentence splitting, rule-based English POS tagging with a
//! corrective override pass, template-driven noun-phrase chunking, and
//! rule-based lemmatization behind an injectable trait.
//!
//! ```text
//! text ──► Tokenizer ──► PosTagger ──► NpChunker ──► chunks
//!                │                                     │
//!                └── sentence spans        components per template
//! ```

pub mod chunker;
pub mod lemmatizer;
pub mod tagger;
pub mod tokenizer;

pub use chunker::{ChunkComponent, ChunkKind, ComponentRole, NpChunk, NpChunker, SubPhrase};
pub use lemmatizer::{singularize, Lemmatizer, RuleLemmatizer};
pub use tagger::PosTagger;
pub use tokenizer::{SentenceSpan, Token, Tokenizer};
