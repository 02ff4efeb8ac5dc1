//! Restores text documents whose special characters were replaced by emoji
//! and typographic placeholders.
//!
//! - **[`core`]**: Pure, deterministic logic (the substitution table and the
//!   fold that applies it). No I/O.
//! - **[`io`]**: Side-effecting operations (document read/write, config file).
//!
//! [`restore`] ties the two together for the CLI.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod restore;
pub mod rules;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
