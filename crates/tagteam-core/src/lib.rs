// tagteam-core: Graph data model and shared types for tagteam

#![warn(rustdoc::broken_intra_doc_links)]

//! # TagTeam Core
//!
//! Foundational types for the tagteam extraction pipeline: the knowledge-graph
//! node model, the BFO/CCO/tagteam vocabulary, content-addressed id helpers,
//! and the immutable dependency-tree view consumed by the extractors.
//!
//! ## Key Components
//!
//! - [`Node`]: tagged union over every graph-node shape
//! - [`DiscourseReferent`] / [`RealWorldEntity`]: the two entity tiers,
//!   linked by `is_about`
//! - [`DepTree`]: validated adjacency view over an external dependency parse
//! - [`vocab`]: compact IRIs plus the known class/predicate sets
//! - [`ids`]: truncated-SHA-256 id construction
//!
//! ## Example
//!
//! ```rust
//! use tagteam_core::{DepArc, DepTree, UdLabel};
//!
//! let tree = DepTree::new(
//!     vec!["Dogs".into(), "bark".into()],
//!     vec!["NNS".into(), "VBP".into()],
//!     vec![
//!         DepArc::new(1, 2, UdLabel::Nsubj),
//!         DepArc::new(2, 0, UdLabel::Root),
//!     ],
//! )?;
//! assert_eq!(tree.roots(), &[2]);
//! assert_eq!(tree.subtree_text(2), "Dogs bark");
//! # Ok::<(), tagteam_core::GraphError>(())
//! ```

pub mod deptree;
pub mod error;
pub mod ids;
pub mod node;
pub mod vocab;

pub use deptree::{DepArc, DepTree, UdLabel};
pub use error::{GraphError, GraphResult};
pub use node::{
    Act, ActPattern, ActualityStatus, AggregateMember, AssertionPattern, ClassNomination,
    ComplexDesignator, CoordinationType, Definiteness, DiscourseReferent, GenericityAlternative,
    GenericityCategory, GenericityReading, IceKind, InformationBearer, InformationContent,
    Modality, Node, ObjectAggregate, PronounType, RealWorldEntity, ReferentialStatus, Role,
    RoleType, StructuralAssertion, TemporalUnit,
};
