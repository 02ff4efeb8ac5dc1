//! Deterministic, pure restoration logic.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! strings and return deterministic outputs suitable for tests.

pub mod table;
pub mod transform;
