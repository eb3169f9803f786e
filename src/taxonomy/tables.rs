//! Auxiliary tables - scientific names, deleted taxids, merged taxids
//!
//! Parses `names.dmp`, `delnodes.dmp` and `merged.dmp`. Malformed lines are
//! skipped; an unreadable file is fatal.
//!
//! @module taxonomy/tables

use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use super::dump::{dmp_fields, for_each_line, open_dump};
use super::{LabelTable, NodeId};
use crate::error::Result;

/// Taxids removed from the taxonomy
pub type DeletedSet = HashSet<NodeId>;

/// Old taxid -> taxid it was merged into
pub type MergedMap = HashMap<NodeId, NodeId>;

/// Name class kept from `names.dmp`
pub const SCIENTIFIC_NAME: &str = "scientific name";

/// Decoration tables loaded alongside the relation table
#[derive(Debug, Clone, Default)]
pub struct AuxTables {
    pub names: LabelTable,
    pub deleted: DeletedSet,
    pub merged: MergedMap,
}

impl AuxTables {
    /// Load the tables; `names` is `None` when names are not needed
    pub fn load(names: Option<&Path>, delnodes: &Path, merged: &Path) -> Result<Self> {
        let names = match names {
            Some(path) => {
                debug!(path = %path.display(), "Loading names");
                read_names(open_dump(path)?, path)?
            }
            None => LabelTable::default(),
        };

        debug!(path = %delnodes.display(), "Loading deleted taxids");
        let deleted = read_delnodes(open_dump(delnodes)?, delnodes)?;

        debug!(path = %merged.display(), "Loading merged taxids");
        let merged = read_merged(open_dump(merged)?, merged)?;

        debug!(
            names = names.len(),
            deleted = deleted.len(),
            merged = merged.len(),
            "Loaded auxiliary tables"
        );

        Ok(Self {
            names,
            deleted,
            merged,
        })
    }
}

// =============================================================================
// LINE PARSERS
// =============================================================================

/// Parse a `names.dmp` line, keeping only scientific names
///
/// Format: `tax_id | name_txt | unique_name | name_class |`
pub fn parse_name_line(line: &str) -> Option<(NodeId, &str)> {
    let mut fields = dmp_fields(line);
    let id = fields.next()?.trim().parse().ok()?;
    let name = fields.next()?;
    let class = fields.nth(1)?;
    (class.trim() == SCIENTIFIC_NAME).then_some((id, name))
}

/// Parse a `delnodes.dmp` line: `tax_id |`
pub fn parse_delnodes_line(line: &str) -> Option<NodeId> {
    dmp_fields(line).next()?.trim().parse().ok()
}

/// Parse a `merged.dmp` line: `old_tax_id | new_tax_id |`
pub fn parse_merged_line(line: &str) -> Option<(NodeId, NodeId)> {
    let mut fields = dmp_fields(line);
    let old = fields.next()?.trim().parse().ok()?;
    let new = fields.next()?.trim().parse().ok()?;
    Some((old, new))
}

// =============================================================================
// READERS
// =============================================================================

pub fn read_names<R: BufRead>(reader: R, path: &Path) -> Result<LabelTable> {
    let mut names = LabelTable::default();
    for_each_line(reader, path, |line| {
        if let Some((id, name)) = parse_name_line(line) {
            names.insert(id, name);
        }
    })?;
    Ok(names)
}

pub fn read_delnodes<R: BufRead>(reader: R, path: &Path) -> Result<DeletedSet> {
    let mut deleted = DeletedSet::new();
    let mut skipped = 0usize;
    for_each_line(reader, path, |line| match parse_delnodes_line(line) {
        Some(id) => {
            deleted.insert(id);
        }
        None => skipped += 1,
    })?;
    if skipped > 0 {
        debug!(skipped, path = %path.display(), "Skipped malformed lines");
    }
    Ok(deleted)
}

pub fn read_merged<R: BufRead>(reader: R, path: &Path) -> Result<MergedMap> {
    let mut merged = MergedMap::new();
    let mut skipped = 0usize;
    for_each_line(reader, path, |line| match parse_merged_line(line) {
        Some((old, new)) => {
            merged.insert(old, new);
        }
        None => skipped += 1,
    })?;
    if skipped > 0 {
        debug!(skipped, path = %path.display(), "Skipped malformed lines");
    }
    Ok(merged)
}
