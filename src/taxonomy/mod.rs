//! Taxonomy - relation table, decoration tables and subtree traversal
//!
//! Loading reads two independent inputs in parallel:
//! - `nodes.dmp` into the adjacency table (plus ranks when requested)
//! - `names.dmp`, `delnodes.dmp`, `merged.dmp` into the auxiliary tables
//!
//! The two halves share nothing until both have finished.
//!
//! @module taxonomy

pub mod dump;
pub mod nodes;
pub mod resolve;
pub mod tables;
pub mod traverse;

use std::collections::HashMap;
use std::time::Instant;

use tracing::info;

use crate::config::Config;
use crate::error::Result;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use nodes::{parse_node_line, AdjacencyBuilder, AdjacencyTable, NodeRecord};
pub use resolve::{resolve_root, RootOutcome};
pub use tables::{AuxTables, DeletedSet, MergedMap};
pub use traverse::{emit_subtree, list_trees, ListReport, TraversalStats};

/// NCBI taxonomy identifier
pub type NodeId = i32;

// =============================================================================
// LABEL TABLE
// =============================================================================

/// Taxid -> text lookup used for scientific names and ranks
///
/// Missing entries read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: HashMap<NodeId, String>,
}

impl LabelTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            labels: HashMap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, id: NodeId, label: &str) {
        self.labels.insert(id, label.to_string());
    }

    pub fn get(&self, id: NodeId) -> &str {
        self.labels.get(&id).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// =============================================================================
// TAXONOMY
// =============================================================================

/// Which decorations follow the taxid in each printed entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelStyle {
    pub show_rank: bool,
    pub show_name: bool,
}

/// Everything the printer needs, fully materialized in memory
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    pub nodes: AdjacencyTable,
    pub ranks: LabelTable,
    pub names: LabelTable,
    pub deleted: DeletedSet,
    pub merged: MergedMap,
}

impl Taxonomy {
    /// Format the entry for `id`: `<id>[ [rank]][ name]`
    pub fn label(&self, id: NodeId, style: LabelStyle) -> String {
        let mut label = id.to_string();
        if style.show_rank {
            label.push_str(" [");
            label.push_str(self.ranks.get(id));
            label.push(']');
        }
        if style.show_name {
            label.push(' ');
            label.push_str(self.names.get(id));
        }
        label
    }
}

/// Load the taxonomy described by `config`
///
/// Names and ranks are only read when `style` asks for them. The relation
/// table and the auxiliary tables are built concurrently on a pool of
/// `config.threads` workers; either failing aborts the load.
pub fn load_taxonomy(config: &Config, style: LabelStyle) -> Result<Taxonomy> {
    let start = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.max(1))
        .build()?;

    let names_file = config.names_file();
    let names = style.show_name.then_some(names_file.as_path());
    let delnodes = config.delnodes_file();
    let merged = config.merged_file();
    let nodes_file = config.nodes_file();

    let (aux, relations) = pool.join(
        || AuxTables::load(names, &delnodes, &merged),
        || nodes::load_nodes(&nodes_file, style.show_rank),
    );
    let aux = aux?;
    let (nodes, ranks) = relations?;

    info!(
        nodes = nodes.len(),
        names = aux.names.len(),
        deleted = aux.deleted.len(),
        merged = aux.merged.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Loaded taxonomy"
    );

    Ok(Taxonomy {
        nodes,
        ranks,
        names: aux.names,
        deleted: aux.deleted,
        merged: aux.merged,
    })
}
