//! Content-addressed identifier construction
//!
//! Every node id is a truncated SHA-256 digest over the fields that define
//! the node's identity, so identical inputs always yield identical ids and
//! re-extraction of the same phrase deduplicates (spec properties P1/P2).

use sha2::{Digest, Sha256};

/// Namespace prefix carried by every instance id.
pub const INST_PREFIX: &str = "inst:";

/// Hash a sequence of identity parts, joined by `|`, truncated to
/// `hex_len` hex characters.
#[must_use]
pub fn content_hash(parts: &[&str], hex_len: usize) -> String {
    let mut hasher = Sha256::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            hasher.update(b"|");
        }
        hasher.update(part.as_bytes());
    }
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(hex_len);
    for byte in digest.iter() {
        if hex.len() >= hex_len {
            break;
        }
        hex.push_str(&format!("{byte:02x}"));
    }
    hex.truncate(hex_len);
    hex
}

/// Tier 2 entity id: `inst:<TypeLabel>_<CleanLabel>_<hash12>` where the hash
/// covers `normalizedLabel | specificType | documentScope`.
#[must_use]
pub fn entity_id(type_label: &str, clean_label: &str, normalized: &str, specific_type: &str, scope: &str) -> String {
    let hash = content_hash(&[normalized, specific_type, scope], 12);
    format!("{INST_PREFIX}{type_label}_{clean_label}_{hash}")
}

/// Role id: `inst:<RoleType>_Role_<hash8>` over `roleType | bearerIRI`.
#[must_use]
pub fn role_id(role_type_label: &str, role_type_key: &str, bearer_iri: &str) -> String {
    let hash = content_hash(&[role_type_key, bearer_iri], 8);
    format!("{INST_PREFIX}{role_type_label}_Role_{hash}")
}

/// Sanitize a surface form for inclusion in an id: alphanumerics kept,
/// everything else collapsed to single underscores.
#[must_use]
pub fn id_fragment(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_underscore = false;
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            last_underscore = false;
        } else if !last_underscore && !out.is_empty() {
            out.push('_');
            last_underscore = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    if out.is_empty() {
        out.push('x');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_and_truncated() {
        let a = content_hash(&["ventilator", "cco:Artifact", "doc1"], 12);
        let b = content_hash(&["ventilator", "cco:Artifact", "doc1"], 12);
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn hash_separates_fields() {
        // "ab|c" and "a|bc" must not collide via naive concatenation
        let a = content_hash(&["ab", "c"], 12);
        let b = content_hash(&["a", "bc"], 12);
        assert_ne!(a, b);
    }

    #[test]
    fn entity_id_shape() {
        let id = entity_id("Artifact", "ventilator", "ventilator", "cco:Artifact", "doc1");
        assert!(id.starts_with("inst:Artifact_ventilator_"));
        assert_eq!(id.len(), "inst:Artifact_ventilator_".len() + 12);
    }

    #[test]
    fn fragment_sanitizes() {
        assert_eq!(id_fragment("Dr. Smith's clinic"), "Dr_Smith_s_clinic");
        assert_eq!(id_fragment("--"), "x");
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hash_length_and_stability(parts in prop::collection::vec(".*", 1..4), len in 4usize..32) {
                let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
                let a = content_hash(&refs, len);
                let b = content_hash(&refs, len);
                prop_assert_eq!(&a, &b);
                prop_assert_eq!(a.len(), len);
                prop_assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
            }

            #[test]
            fn fragments_are_id_safe(label in ".*") {
                let fragment = id_fragment(&label);
                prop_assert!(!fragment.is_empty());
                prop_assert!(fragment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_'));
            }
        }
    }
}
