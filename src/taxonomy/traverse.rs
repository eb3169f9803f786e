//! Subtree Traversal
//!
//! Depth-first, pre-order emission of taxonomy subtrees:
//! - Explicit stack, so taxonomic depth never grows the call stack
//! - Children visited in ascending taxid order
//! - Visited-node guard against cycles and nodes reachable twice
//!
//! Events are streamed into a [`TreeSink`] as the walk proceeds.
//!
//! @module taxonomy/traverse

use std::collections::HashSet;

use tracing::{debug, warn};

use super::resolve::{resolve_root, RootOutcome};
use super::{LabelStyle, NodeId, Taxonomy};
use crate::error::Result;
use crate::output::TreeSink;

// =============================================================================
// STATS
// =============================================================================

/// Counters for one or more subtree walks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Entries written to the sink
    pub emitted: usize,
    /// Children skipped because they were already emitted under this root
    pub revisits: usize,
    /// Deepest level reached (root = 0)
    pub max_depth: usize,
}

impl TraversalStats {
    fn absorb(&mut self, other: TraversalStats) {
        self.emitted += other.emitted;
        self.revisits += other.revisits;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

// =============================================================================
// EMIT SUBTREE
// =============================================================================

/// One node on the explicit traversal stack
struct Frame {
    node: NodeId,
    depth: usize,
    /// Index of the next child to consider
    next: usize,
}

/// Emit `root` and all its descendants into `sink`
///
/// The root is opened at depth 0. A child equal to its parent (the taxonomy
/// root's self-record) is never emitted. Any other child already emitted
/// during this walk is skipped, which bounds the walk by the node count even
/// on cyclic input.
pub fn emit_subtree<S: TreeSink + ?Sized>(
    taxonomy: &Taxonomy,
    root: NodeId,
    style: LabelStyle,
    sink: &mut S,
) -> Result<TraversalStats> {
    let mut stats = TraversalStats::default();
    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(root);

    sink.open_node(0, &taxonomy.label(root, style))?;
    stats.emitted += 1;

    let mut stack = vec![Frame {
        node: root,
        depth: 0,
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let children = taxonomy.nodes.children(frame.node);

        let mut descend = None;
        while let Some(&child) = children.get(frame.next) {
            frame.next += 1;
            if child == frame.node {
                continue;
            }
            if !visited.insert(child) {
                stats.revisits += 1;
                debug!(parent = frame.node, child, "Skipping already emitted taxid");
                continue;
            }
            descend = Some(child);
            break;
        }

        match descend {
            Some(child) => {
                let depth = frame.depth + 1;
                sink.open_node(depth, &taxonomy.label(child, style))?;
                stats.emitted += 1;
                stats.max_depth = stats.max_depth.max(depth);
                stack.push(Frame {
                    node: child,
                    depth,
                    next: 0,
                });
            }
            None => {
                let depth = frame.depth;
                stack.pop();
                sink.close_node(depth)?;
            }
        }
    }

    Ok(stats)
}

// =============================================================================
// LIST TREES
// =============================================================================

/// Result of printing all requested roots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListReport {
    /// One outcome per requested root, in request order
    pub outcomes: Vec<RootOutcome>,
    pub stats: TraversalStats,
}

impl ListReport {
    /// Number of requested roots that produced output
    pub fn printed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.target().is_some()).count()
    }

    /// Number of requested roots that were skipped
    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.printed()
    }
}

/// Print the subtree of every requested root into `sink`
///
/// Roots are resolved one by one; deleted and unknown taxids are reported
/// and skipped, merged taxids are replaced by their target. Every root gets
/// a fresh visited set, so repeated roots print identical subtrees.
pub fn list_trees<S: TreeSink + ?Sized>(
    taxonomy: &Taxonomy,
    roots: &[NodeId],
    style: LabelStyle,
    sink: &mut S,
) -> Result<ListReport> {
    let mut report = ListReport::default();

    sink.begin()?;
    for &requested in roots {
        let outcome = resolve_root(taxonomy, requested);
        if outcome.is_stale() {
            warn!("{}", outcome);
        }
        report.outcomes.push(outcome);

        if let Some(root) = outcome.target() {
            let stats = emit_subtree(taxonomy, root, style, sink)?;
            report.stats.absorb(stats);
        }
    }
    sink.finish()?;

    Ok(report)
}

// =============================================================================
// TESTS
// =============================================================================
