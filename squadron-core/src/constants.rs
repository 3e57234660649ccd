//! Centralized rulebook constants for squadron building.
//!
//! Point tables, per-class limits and the upgrade names the rules key off.
//! Keeping them together means the rulebook can only be adjusted via code
//! changes reviewed in version control.

use crate::dice::Rating;

// Upgrade names the rules refer to ------------------------------------------
pub const UPGRADE_AGILE: &str = "Agile";
pub const UPGRADE_ENHANCED_TURRET: &str = "Enhanced Turret";
pub const UPGRADE_FULLY_LOADED: &str = "Fully Loaded";
pub const UPGRADE_HARD_POINT: &str = "Hard Point";
pub const UPGRADE_SHIELDS: &str = "Shields";
pub const UPGRADE_TAILGUNNER: &str = "Tailgunner";
pub const UPGRADE_TARGETING_COMPUTER: &str = "Targeting Computer";

// Squadron composition ------------------------------------------------------
pub const SQUADRON_MIN_SHIPS: usize = 4;
pub const SQUADRON_MAX_SHIPS: usize = 16;
pub const RARE_MAX_CARRIERS: usize = 1;
pub const UNCOMMON_MAX_CARRIERS: usize = 3;

// Per-class rule tables -----------------------------------------------------
pub(crate) const SNUBFIGHTER_SPEED: (i32, i32) = (2, 3);
pub(crate) const GUNSHIP_SPEED: (i32, i32) = (1, 2);
pub(crate) const CORVETTE_SPEED: (i32, i32) = (1, 1);

pub(crate) const SNUBFIGHTER_DEFAULT_SPEED: i32 = 2;
pub(crate) const GUNSHIP_DEFAULT_SPEED: i32 = 1;
pub(crate) const CORVETTE_DEFAULT_SPEED: i32 = 1;

pub(crate) const SNUBFIGHTER_MAX_COST: u32 = 14;
pub(crate) const GUNSHIP_MAX_COST: u32 = 20;
pub(crate) const CORVETTE_MAX_COST: u32 = 30;

pub(crate) const SNUBFIGHTER_UPGRADE_SLOTS: u32 = 3;
pub(crate) const GUNSHIP_UPGRADE_SLOTS: u32 = 4;
pub(crate) const CORVETTE_UPGRADE_SLOTS: u32 = 5;

pub(crate) const SNUBFIGHTER_MAX_WEAPONS: usize = 2;
pub(crate) const GUNSHIP_MAX_WEAPONS: usize = 2;
pub(crate) const CORVETTE_MAX_WEAPONS: usize = 3;

pub(crate) const FULL_PILOT_DICE: &[Rating] = &[Rating::D6, Rating::D8, Rating::D10];
pub(crate) const CORVETTE_PILOT_DICE: &[Rating] = &[Rating::D6, Rating::D8];

// Point costs ---------------------------------------------------------------
pub(crate) const ENHANCED_TURRET_SURCHARGE: u32 = 1;
pub(crate) const DEFAULT_UPGRADE_COST: u32 = 1;
pub(crate) const DEFAULT_UPGRADE_SLOTS: u32 = 1;

pub(crate) const fn speed_cost(speed: i32) -> u32 {
    match speed {
        1 => 1,
        2 => 3,
        3 => 5,
        _ => 0,
    }
}

pub(crate) const fn defense_cost(rating: Rating) -> u32 {
    match rating {
        Rating::D6 => 2,
        Rating::D8 => 4,
        Rating::D10 => 8,
        _ => 0,
    }
}

pub(crate) const fn firepower_cost(rating: Rating) -> u32 {
    match rating {
        Rating::D6 => 2,
        Rating::D8 => 4,
        _ => 6,
    }
}

pub(crate) const fn pilot_cost(rating: Rating) -> u32 {
    match rating {
        Rating::D6 => 1,
        Rating::D8 => 3,
        Rating::D10 => 5,
        Rating::D4 | Rating::D12 => 0,
    }
}
