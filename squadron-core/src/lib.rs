//! Squadron Rules Engine
//!
//! Platform-agnostic rules for building starfighter squadrons: ship
//! construction, point costs, legality checks and the printable text format.
//! This crate has no UI or I/O; every operation is a pure function of its
//! inputs plus the built-in upgrade catalog.

pub mod catalog;
pub mod constants;
pub mod cost;
pub mod dice;
pub mod notation;
pub mod printable;
pub mod ship;
pub mod squadron;
pub mod validation;

// Re-export commonly used types
pub use catalog::{CatalogError, Rarity, ShipClass, ShipType, Upgrade, UpgradeCatalog, catalog};
pub use cost::{CostBreakdown, cost_breakdown, cost_with_pilot, cost_without_pilot};
pub use dice::{Rating, Stat};
pub use notation::{
    SplitUpgrade, coalesce_duplicate_upgrades, expand_duplicate_upgrades, format_upgrades,
    split_duplicate_upgrade,
};
pub use printable::{PrintableError, format_weapon, parse_printable, printable_version};
pub use ship::{
    Ship, ShipOptions, SquadronTrait, Weapon, WeaponArc, WeaponBase, WeaponBaseList, WeaponList,
};
pub use squadron::{RosterError, Squadron};
pub use validation::{SquadronValidation, upgrade_count_limit, validate_ship, validate_squadron};
