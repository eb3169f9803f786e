//! Command handlers

pub mod list;
