//! Relation Table - parent/child adjacency built from `nodes.dmp`
//!
//! Every taxid seen as a child or a parent becomes a key, so a lookup in the
//! table doubles as an existence check. Records may arrive in any order.
//!
//! @module taxonomy/nodes

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use super::dump::{for_each_line, open_dump};
use super::{LabelTable, NodeId};
use crate::error::Result;

/// Minimum number of tab-separated pieces a `nodes.dmp` line must have
const MIN_NODE_FIELDS: usize = 6;

// =============================================================================
// RECORD
// =============================================================================

/// One parsed `nodes.dmp` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRecord<'a> {
    pub child: NodeId,
    pub parent: NodeId,
    pub rank: &'a str,
}

/// Parse a `nodes.dmp` line
///
/// The line is split on tabs into at most six pieces: piece 0 is the child
/// taxid, piece 2 the parent taxid, piece 4 the rank. Returns `None` when
/// fewer than six pieces exist or either taxid is not an integer.
pub fn parse_node_line(line: &str) -> Option<NodeRecord<'_>> {
    let mut fields = line.splitn(MIN_NODE_FIELDS, '\t');
    let child = fields.next()?;
    fields.next()?;
    let parent = fields.next()?;
    fields.next()?;
    let rank = fields.next()?;
    fields.next()?;

    Some(NodeRecord {
        child: child.parse().ok()?,
        parent: parent.parse().ok()?,
        rank,
    })
}

// =============================================================================
// ADJACENCY TABLE
// =============================================================================

/// Immutable mapping from taxid to its direct children
///
/// Child lists are deduplicated and sorted ascending.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyTable {
    children: HashMap<NodeId, Vec<NodeId>>,
}

impl AdjacencyTable {
    /// Whether `id` appeared anywhere in the relation records
    pub fn contains(&self, id: NodeId) -> bool {
        self.children.contains_key(&id)
    }

    /// Direct children of `id` in ascending order (empty for unknown ids)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of known taxids
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// All known taxids, in no particular order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.keys().copied()
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Accumulates relation records into an [`AdjacencyTable`]
#[derive(Debug, Default)]
pub struct AdjacencyBuilder {
    children: HashMap<NodeId, Vec<NodeId>>,
    ranks: Option<LabelTable>,
    accepted: usize,
    skipped: usize,
}

impl AdjacencyBuilder {
    /// Create a builder; ranks are kept only when `with_ranks` is set
    pub fn new(with_ranks: bool) -> Self {
        Self {
            ranks: with_ranks.then(LabelTable::default),
            ..Self::default()
        }
    }

    /// Create with estimated capacity
    pub fn with_capacity(with_ranks: bool, nodes: usize) -> Self {
        Self {
            children: HashMap::with_capacity(nodes),
            ranks: with_ranks.then(|| LabelTable::with_capacity(nodes)),
            accepted: 0,
            skipped: 0,
        }
    }

    /// Record that `child` hangs below `parent`
    pub fn add_edge(&mut self, child: NodeId, parent: NodeId) {
        self.children.entry(parent).or_default().push(child);
        self.children.entry(child).or_default();
    }

    /// Add a parsed record, including its rank when ranks are kept
    pub fn add_record(&mut self, record: NodeRecord<'_>) {
        self.add_edge(record.child, record.parent);
        if let Some(ranks) = self.ranks.as_mut() {
            ranks.insert(record.child, record.rank);
        }
        self.accepted += 1;
    }

    /// Parse and add one `nodes.dmp` line; malformed lines are skipped
    pub fn add_line(&mut self, line: &str) -> bool {
        match parse_node_line(line) {
            Some(record) => {
                self.add_record(record);
                true
            }
            None => {
                self.skipped += 1;
                false
            }
        }
    }

    /// Freeze into the adjacency table and the rank table
    pub fn build(self) -> (AdjacencyTable, LabelTable) {
        debug!(
            accepted = self.accepted,
            skipped = self.skipped,
            nodes = self.children.len(),
            "Built relation table"
        );

        let mut children = self.children;
        for list in children.values_mut() {
            list.sort_unstable();
            list.dedup();
        }

        (AdjacencyTable { children }, self.ranks.unwrap_or_default())
    }
}

/// Build the relation table from a `nodes.dmp` reader
pub fn read_nodes<R: std::io::BufRead>(
    reader: R,
    path: &Path,
    with_ranks: bool,
) -> Result<(AdjacencyTable, LabelTable)> {
    let mut builder = AdjacencyBuilder::new(with_ranks);
    for_each_line(reader, path, |line| {
        builder.add_line(line);
    })?;
    Ok(builder.build())
}

/// Build the relation table from a `nodes.dmp` file
pub fn load_nodes(path: &Path, with_ranks: bool) -> Result<(AdjacencyTable, LabelTable)> {
    debug!(path = %path.display(), "Loading nodes");
    read_nodes(open_dump(path)?, path, with_ranks)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const HUMAN: &str = "9606\t|\t9605\t|\tspecies\t|\tHS\t|\t5\t|";

    fn build(lines: &[&str], with_ranks: bool) -> (AdjacencyTable, LabelTable) {
        read_nodes(lines.join("\n").as_bytes(), Path::new("nodes.dmp"), with_ranks).unwrap()
    }

    #[test]
    fn test_parse_node_line() {
        let record = parse_node_line(HUMAN).unwrap();
        assert_eq!(record.child, 9606);
        assert_eq!(record.parent, 9605);
        assert_eq!(record.rank, "species");
    }

    #[test]
    fn test_parse_requires_six_fields() {
        assert!(parse_node_line("9606\t|\t9605\t|\tspecies").is_none());
        assert!(parse_node_line("9606\t|\t9605\t|\tspecies\t|").is_some());
    }

    #[test]
    fn test_parse_rejects_non_integer_ids() {
        assert!(parse_node_line("abc\t|\t9605\t|\tspecies\t|").is_none());
        assert!(parse_node_line("9606\t|\tx\t|\tspecies\t|").is_none());
        assert!(parse_node_line("99999999999\t|\t1\t|\tspecies\t|").is_none());
    }

    #[test]
    fn test_every_mentioned_node_is_a_key() {
        let (table, _) = build(&["9606\t|\t9605\t|\tspecies\t|"], false);
        assert!(table.contains(9606));
        assert!(table.contains(9605));
        assert_eq!(table.len(), 2);
        assert!(table.children(9606).is_empty());
        assert_eq!(table.children(9605), &[9606]);
    }

    #[test]
    fn test_order_independent() {
        let lines = [
            "741158\t|\t9606\t|\tsubspecies\t|",
            "9606\t|\t9605\t|\tspecies\t|",
            "63221\t|\t9606\t|\tsubspecies\t|",
            "9605\t|\t9604\t|\tgenus\t|",
        ];
        let (forward, _) = build(&lines, false);
        let mut reversed = lines;
        reversed.reverse();
        let (backward, _) = build(&reversed, false);

        let mut ids: Vec<_> = forward.node_ids().collect();
        ids.sort_unstable();
        for id in ids {
            assert_eq!(forward.children(id), backward.children(id));
        }
        assert_eq!(forward.children(9606), &[63221, 741158]);
    }

    #[test]
    fn test_children_sorted_and_deduplicated() {
        let mut builder = AdjacencyBuilder::new(false);
        for child in [30, 10, 20, 10] {
            builder.add_edge(child, 1);
        }
        let (table, _) = builder.build();
        assert_eq!(table.children(1), &[10, 20, 30]);
    }

    #[test]
    fn test_self_loop_accepted() {
        let (table, _) = build(&["1\t|\t1\t|\tno rank\t|"], false);
        assert!(table.contains(1));
        assert_eq!(table.children(1), &[1]);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let mut builder = AdjacencyBuilder::new(false);
        assert!(!builder.add_line(""));
        assert!(!builder.add_line("garbage"));
        assert!(builder.add_line(HUMAN));
        let (table, _) = builder.build();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_invalid_utf8_record_does_not_abort_load() {
        let input: &[u8] = b"2\t|\t1\t|\tno rank \xff\t|\t\t|\n\
                             9606\t|\t9605\t|\tspecies\t|\t\t|\n";
        let (table, ranks) = read_nodes(input, Path::new("nodes.dmp"), true).unwrap();
        assert_eq!(table.children(1), &[2]);
        assert_eq!(table.children(9605), &[9606]);
        assert_eq!(ranks.get(9606), "species");
    }

    #[test]
    fn test_ranks_only_when_requested() {
        let (_, ranks) = build(&[HUMAN], false);
        assert!(ranks.is_empty());

        let (_, ranks) = build(&[HUMAN], true);
        assert_eq!(ranks.get(9606), "species");
        assert_eq!(ranks.get(9605), "");
    }
}
