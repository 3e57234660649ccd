//! Legality checks against the rulebook.
//!
//! Violations are reported as human-readable messages rather than errors, so
//! the same call answers "is this legal?" and feeds the messages shown to the
//! player. A legal ship or squadron yields empty lists.

mod ship;
mod squadron;

pub use ship::{upgrade_count_limit, validate_ship};
pub use squadron::{SquadronValidation, validate_squadron};
