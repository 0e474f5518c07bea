// tagteam-markers: Higher-level marker analyses

//! # TagTeam Markers
//!
//! The marker analyses that run after core extraction: certainty
//! (hedge/booster/evidential lexicons), genericity (GEN/INST/UNIV/AMB),
//! five-class ambiguity detection with alternative-reading construction,
//! greedy complex-designator scanning, scarcity-assertion promotion, and
//! directive content for deontic modals.

pub mod alternatives;
pub mod ambiguity;
pub mod certainty;
pub mod designators;
pub mod directive;
pub mod genericity;
pub mod scarcity;

pub use alternatives::{AlternativeGraphBuilder, AlternativeGraphConfig};
pub use ambiguity::{
    Ambiguity, AmbiguityContext, AmbiguityDetector, AmbiguityKind, AmbiguityReading,
};
pub use certainty::{
    CertaintyAnalysis, CertaintyAnalyzer, DominantType, EvidentialMatch, EvidentialSource,
    MarkerMatch, MarkerSubtype,
};
pub use designators::ComplexDesignatorDetector;
pub use directive::{DirectiveContentFactory, DirectiveOutput};
pub use genericity::{GenericityDetector, SubjectContext};
pub use scarcity::{ScarcityAssertionFactory, ScarcityOutput};
