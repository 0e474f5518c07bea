//! Pipeline configuration

use chrono::{DateTime, Utc};

/// Configuration for one [`crate::GraphBuilder`].
///
/// All fields are optional in spirit; the defaults produce a lenient,
/// compact, Tier-2-materialising pipeline scoped by `"default"`.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Materialise Tier 2 entities.
    pub create_tier2: bool,
    /// Scopes Tier 2 ids and fills `instantiated_by`.
    pub document_iri: Option<String>,
    /// Alternative scope when `document_iri` is absent.
    pub session_id: Option<String>,
    /// Treat any VIOLATION as fatal.
    pub strict: bool,
    pub verbose: bool,
    /// Serializer toggles.
    pub compact: bool,
    pub pretty: bool,
    /// Pinned clock; `None` reads the system clock at build time.
    pub timestamp: Option<DateTime<Utc>>,
    /// AlternativeGraphBuilder knobs.
    pub iri_suffix: String,
    pub preserve_original_links: bool,
    pub include_metadata: bool,
    pub default_plausibility: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            create_tier2: true,
            document_iri: None,
            session_id: None,
            strict: false,
            verbose: false,
            compact: true,
            pretty: false,
            timestamp: None,
            iri_suffix: "_alt".to_string(),
            preserve_original_links: true,
            include_metadata: true,
            default_plausibility: 0.7,
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_document_iri(mut self, iri: impl Into<String>) -> Self {
        self.document_iri = Some(iri.into());
        self
    }

    #[must_use]
    pub fn with_session_id(mut self, session: impl Into<String>) -> Self {
        self.session_id = Some(session.into());
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn without_tier2(mut self) -> Self {
        self.create_tier2 = false;
        self
    }

    /// Effective document scope for content-addressed ids.
    #[must_use]
    pub fn scope(&self) -> &str {
        self.document_iri
            .as_deref()
            .or(self.session_id.as_deref())
            .unwrap_or("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PipelineConfig::default();
        assert!(config.create_tier2);
        assert!(!config.strict);
        assert_eq!(config.iri_suffix, "_alt");
        assert_eq!(config.default_plausibility, 0.7);
        assert_eq!(config.scope(), "default");
    }

    #[test]
    fn scope_prefers_document_iri() {
        let config = PipelineConfig::new()
            .with_session_id("session-9")
            .with_document_iri("doc:42");
        assert_eq!(config.scope(), "doc:42");
    }
}
