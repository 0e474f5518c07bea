//! Immutable dependency-tree view
//!
//! The upstream parser hands the pipeline a flat arc list with 1-indexed
//! token ids (`head = 0` marks roots) plus parallel token and tag vectors.
//! [`DepTree`] validates that input once and then serves as a read-only
//! adjacency view; the core never modifies arcs.

use crate::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};

/// Universal Dependencies v2 arc labels consumed by the extractors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UdLabel {
    #[serde(rename = "nsubj")]
    Nsubj,
    #[serde(rename = "nsubj:pass")]
    NsubjPass,
    #[serde(rename = "obj")]
    Obj,
    #[serde(rename = "cop")]
    Cop,
    #[serde(rename = "aux")]
    Aux,
    #[serde(rename = "aux:pass")]
    AuxPass,
    #[serde(rename = "nmod")]
    Nmod,
    #[serde(rename = "obl")]
    Obl,
    #[serde(rename = "advmod")]
    Advmod,
    #[serde(rename = "advcl")]
    Advcl,
    #[serde(rename = "acl")]
    Acl,
    #[serde(rename = "acl:relcl")]
    AclRelcl,
    #[serde(rename = "expl")]
    Expl,
    #[serde(rename = "case")]
    Case,
    #[serde(rename = "mark")]
    Mark,
    #[serde(rename = "det")]
    Det,
    #[serde(rename = "cc")]
    Cc,
    #[serde(rename = "amod")]
    Amod,
    #[serde(rename = "nummod")]
    Nummod,
    #[serde(rename = "neg")]
    Neg,
    #[serde(rename = "root")]
    Root,
    /// Any label outside the consumed set; carried through untouched.
    #[serde(untagged)]
    Other(String),
}

impl std::str::FromStr for UdLabel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "nsubj" => UdLabel::Nsubj,
            "nsubj:pass" => UdLabel::NsubjPass,
            "obj" => UdLabel::Obj,
            "cop" => UdLabel::Cop,
            "aux" => UdLabel::Aux,
            "aux:pass" => UdLabel::AuxPass,
            "nmod" => UdLabel::Nmod,
            "obl" => UdLabel::Obl,
            "advmod" => UdLabel::Advmod,
            "advcl" => UdLabel::Advcl,
            "acl" => UdLabel::Acl,
            "acl:relcl" => UdLabel::AclRelcl,
            "expl" => UdLabel::Expl,
            "case" => UdLabel::Case,
            "mark" => UdLabel::Mark,
            "det" => UdLabel::Det,
            "cc" => UdLabel::Cc,
            "amod" => UdLabel::Amod,
            "nummod" => UdLabel::Nummod,
            "neg" => UdLabel::Neg,
            "root" => UdLabel::Root,
            other => UdLabel::Other(other.to_string()),
        })
    }
}

/// A single typed dependency arc, 1-indexed; `head = 0` marks a root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepArc {
    pub dependent: usize,
    pub head: usize,
    pub label: UdLabel,
    #[serde(default)]
    pub score_margin: f64,
}

impl DepArc {
    #[must_use]
    pub fn new(dependent: usize, head: usize, label: UdLabel) -> Self {
        Self {
            dependent,
            head,
            label,
            score_margin: 0.0,
        }
    }
}

/// Immutable adjacency view over an externally-provided parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepTree {
    tokens: Vec<String>,
    tags: Vec<String>,
    arcs: Vec<DepArc>,
    /// children[h] lists dependents of token h (index 0 = roots), in token order.
    children: Vec<Vec<usize>>,
}

impl DepTree {
    /// Build a tree, validating the input contract: non-empty token list,
    /// tokens/tags of equal length, arc ids within `[1, |tokens|]`, and at
    /// least one root arc.
    pub fn new(tokens: Vec<String>, tags: Vec<String>, arcs: Vec<DepArc>) -> GraphResult<Self> {
        if tokens.is_empty() {
            return Err(GraphError::EmptyInput);
        }
        if tokens.len() != tags.len() {
            return Err(GraphError::LengthMismatch {
                tokens: tokens.len(),
                tags: tags.len(),
            });
        }
        let n = tokens.len();
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n + 1];
        let mut has_root = false;
        for arc in &arcs {
            if arc.dependent < 1 || arc.dependent > n {
                return Err(GraphError::ArcOutOfRange {
                    id: arc.dependent,
                    len: n,
                });
            }
            if arc.head > n {
                return Err(GraphError::ArcOutOfRange { id: arc.head, len: n });
            }
            if arc.head == 0 {
                has_root = true;
            }
            children[arc.head].push(arc.dependent);
        }
        if !has_root {
            return Err(GraphError::NoRoot);
        }
        for list in &mut children {
            list.sort_unstable();
        }
        Ok(Self {
            tokens,
            tags,
            arcs,
            children,
        })
    }

    /// Token count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Surface token for a 1-indexed id.
    #[must_use]
    pub fn token(&self, id: usize) -> &str {
        &self.tokens[id - 1]
    }

    /// POS tag for a 1-indexed id.
    #[must_use]
    pub fn tag(&self, id: usize) -> &str {
        &self.tags[id - 1]
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Root token ids, in token order.
    #[must_use]
    pub fn roots(&self) -> &[usize] {
        &self.children[0]
    }

    /// Dependents of `head`, in token order.
    #[must_use]
    pub fn children(&self, head: usize) -> &[usize] {
        &self.children[head]
    }

    /// The arc whose dependent is `id`.
    #[must_use]
    pub fn arc(&self, id: usize) -> Option<&DepArc> {
        self.arcs.iter().find(|a| a.dependent == id)
    }

    /// First dependent of `head` attached with `label`.
    #[must_use]
    pub fn child_with_label(&self, head: usize, label: &UdLabel) -> Option<usize> {
        self.children(head)
            .iter()
            .copied()
            .find(|&c| self.arc(c).map(|a| &a.label) == Some(label))
    }

    /// All dependents of `head` attached with `label`, in token order.
    #[must_use]
    pub fn children_with_label(&self, head: usize, label: &UdLabel) -> Vec<usize> {
        self.children(head)
            .iter()
            .copied()
            .filter(|&c| self.arc(c).map(|a| &a.label) == Some(label))
            .collect()
    }

    /// The subtree rooted at `id`: token ids and surfaces, ordered by id
    /// (DFS over the arc index, then flattened into token order).
    #[must_use]
    pub fn subtree(&self, id: usize) -> Vec<(usize, &str)> {
        let mut ids = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            ids.push(next);
            for &child in self.children(next) {
                stack.push(child);
            }
        }
        ids.sort_unstable();
        ids.into_iter().map(|i| (i, self.token(i))).collect()
    }

    /// Surface text of a subtree, space-joined in token order.
    #[must_use]
    pub fn subtree_text(&self, id: usize) -> String {
        self.subtree(id)
            .into_iter()
            .map(|(_, t)| t)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
