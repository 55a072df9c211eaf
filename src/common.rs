//! Helpers shared across the crate.

/// Checks the pre-conditions of the builders and validators.
pub(crate) mod checker;
