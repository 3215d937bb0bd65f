//! Stable exit codes for mutant CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// `mutant check` classified the sample as mutant.
pub const MUTANT: i32 = OK;
/// Command failed due to invalid dna, config, store or other errors.
pub const INVALID: i32 = 1;
/// `mutant check` classified the sample as human.
pub const HUMAN: i32 = 2;
