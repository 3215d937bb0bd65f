//! Mutant DNA detection over square nucleotide grids.
//!
//! A DNA sample is an NxN grid of `A`, `T`, `C` and `G`. It is classified as
//! mutant when more than one straight run of four identical bases exists,
//! horizontally, vertically or along either diagonal. The crate keeps the same
//! split as the rest of the workspace:
//!
//! - **[`core`]**: Pure, deterministic logic (validation, scanning, fingerprints).
//!   No I/O, safe to call from any thread without coordination.
//! - **[`io`]**: Side-effecting operations (configuration files, verdict store).
//!
//! [`service`] coordinates both to memoize verdicts and report aggregate stats.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod service;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
