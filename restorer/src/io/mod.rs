//! I/O helpers for restorer commands.

pub mod config;
pub mod document;
