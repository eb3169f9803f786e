//! Requested-root resolution against deleted and merged taxids
//!
//! @module taxonomy/resolve

use std::fmt;

use super::{NodeId, Taxonomy};

/// What happened to one requested root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootOutcome {
    /// The taxid is in the relation table
    Found(NodeId),
    /// The taxid was merged; `to` is printed instead
    Merged { from: NodeId, to: NodeId },
    /// The taxid was deleted; nothing is printed
    Deleted(NodeId),
    /// The taxid is unknown; nothing is printed
    NotFound(NodeId),
}

impl RootOutcome {
    /// Taxid whose subtree gets printed, if any
    pub fn target(&self) -> Option<NodeId> {
        match *self {
            RootOutcome::Found(id) => Some(id),
            RootOutcome::Merged { to, .. } => Some(to),
            RootOutcome::Deleted(_) | RootOutcome::NotFound(_) => None,
        }
    }

    /// Whether this outcome deserves a warning
    pub fn is_stale(&self) -> bool {
        !matches!(self, RootOutcome::Found(_))
    }
}

impl fmt::Display for RootOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootOutcome::Found(id) => write!(f, "taxid {} found", id),
            RootOutcome::Merged { from, to } => write!(f, "taxid {} was merged into {}", from, to),
            RootOutcome::Deleted(id) => write!(f, "taxid {} was deleted", id),
            RootOutcome::NotFound(id) => write!(f, "taxid {} not found", id),
        }
    }
}

/// Resolve a requested root
///
/// A taxid present in the relation table is used as is, even if it is also
/// listed as deleted or merged. Merges are followed one hop only.
pub fn resolve_root(taxonomy: &Taxonomy, id: NodeId) -> RootOutcome {
    if taxonomy.nodes.contains(id) {
        RootOutcome::Found(id)
    } else if taxonomy.deleted.contains(&id) {
        RootOutcome::Deleted(id)
    } else if let Some(&to) = taxonomy.merged.get(&id) {
        RootOutcome::Merged { from: id, to }
    } else {
        RootOutcome::NotFound(id)
    }
}
