//! Point cost calculator
use serde::{Deserialize, Serialize};

use crate::catalog::catalog;
use crate::constants::{
    ENHANCED_TURRET_SURCHARGE, defense_cost, firepower_cost, pilot_cost, speed_cost,
};
use crate::ship::{Ship, Weapon, WeaponArc};

/// Points a ship spends on each part of its build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub speed: u32,
    pub defense: u32,
    pub weapons: u32,
    pub upgrades: u32,
    pub pilot: u32,
}

impl CostBreakdown {
    #[must_use]
    pub const fn without_pilot(&self) -> u32 {
        self.speed + self.defense + self.weapons + self.upgrades
    }

    #[must_use]
    pub const fn with_pilot(&self) -> u32 {
        self.without_pilot() + self.pilot
    }
}

fn weapon_cost(weapon: &Weapon) -> u32 {
    let surcharge = if weapon.arc == WeaponArc::EnhancedTurret {
        ENHANCED_TURRET_SURCHARGE
    } else {
        0
    };
    firepower_cost(weapon.firepower.rating) + surcharge
}

/// Catalog cost of every upgrade entry, duplicates counted individually.
fn upgrades_cost(upgrades: &[String]) -> u32 {
    let catalog = catalog();
    upgrades
        .iter()
        .map(|name| {
            catalog.get(name).map_or_else(
                || {
                    log::warn!("upgrade {name:?} is not in the catalog; costing it at 0");
                    0
                },
                |upgrade| upgrade.cost,
            )
        })
        .sum()
}

/// Itemized cost computed from the ship's current derived stats.
#[must_use]
pub fn cost_breakdown(ship: &Ship) -> CostBreakdown {
    let breakdown = CostBreakdown {
        speed: speed_cost(ship.speed),
        defense: defense_cost(ship.defense().rating),
        weapons: ship.weapons().iter().map(weapon_cost).sum(),
        upgrades: upgrades_cost(&ship.upgrades),
        pilot: ship.pilot().map_or(0, |stat| pilot_cost(stat.rating)),
    };
    log::trace!("cost of {:?}: {breakdown:?}", ship.name);
    breakdown
}

#[must_use]
pub fn cost_without_pilot(ship: &Ship) -> u32 {
    cost_breakdown(ship).without_pilot()
}

#[must_use]
pub fn cost_with_pilot(ship: &Ship) -> u32 {
    cost_breakdown(ship).with_pilot()
}
