//! Command handlers for the GTC CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod clear;
pub mod completions;
pub mod config;
pub mod list;
pub mod stats;
pub mod sweep;
pub mod url;
pub mod warm;
