// tagteam-extract: Entity, act, and role extraction

//! # TagTeam Extract
//!
//! The extraction core of the pipeline: Tier 1 discourse referents from NP
//! chunks and proper-name signals, the deterministic typing cascade, Tier 2
//! real-world entities with content-addressed ids, dependency-tree act and
//! structural-assertion extraction, and role detection.
//!
//! ```text
//! chunks + NER ──► EntityExtractor ──► DiscourseReferents (Tier 1)
//!                                           │
//!                              RealWorldEntityFactory ──► Tier 2 + aggregates
//! dep tree ──► TreeActExtractor ──► acts + assertions
//!                                           │
//!                                     RoleDetector ──► consolidated roles
//! ```

pub mod acts;
pub mod entity;
pub mod lexicon;
pub mod roles;
pub mod tier2;
pub mod typing;

pub use acts::{ActExtraction, ActParticipant, ExtractedAct, ExtractedAssertion, TreeActExtractor};
pub use entity::{EntityExtractor, ExtractionContext, NamedEntitySignal, NerKind};
pub use roles::{BearerInfo, RoleDetector, RoleSet};
pub use tier2::{RealWorldEntityFactory, Tier2Set};
pub use typing::{infer_type, refine_ambiguous_object, DomainConfigLoader, TypeDecision, TypeQuery};
