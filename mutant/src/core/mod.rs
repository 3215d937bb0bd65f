//! Deterministic, pure logic for dna classification.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod detector;
pub mod fingerprint;
pub mod grid;
pub mod types;
pub mod validate;
