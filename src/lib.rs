//! taxtree - taxonomic subtree listing
//!
//! Reads an NCBI taxonomy dump (`nodes.dmp`, `names.dmp`, `delnodes.dmp`,
//! `merged.dmp`), rebuilds the tree in memory and prints the subtrees below
//! requested taxids as an indented outline or as nested JSON.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod taxonomy;

pub use config::Config;
pub use error::{Result, TaxTreeError};
pub use taxonomy::{NodeId, Taxonomy};
