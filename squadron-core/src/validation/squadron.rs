use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{Rarity, ShipType, catalog};
use crate::constants::{
    RARE_MAX_CARRIERS, SQUADRON_MAX_SHIPS, SQUADRON_MIN_SHIPS, UNCOMMON_MAX_CARRIERS,
};
use crate::cost::cost_with_pilot;
use crate::notation::{coalesce_duplicate_upgrades, split_duplicate_upgrade};
use crate::ship::Ship;

/// Squadron-wide violations plus the per-ship rarity violations, index
/// aligned with the ships that were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadronValidation {
    pub squadron: Vec<String>,
    pub ships: Vec<Vec<String>>,
}

impl SquadronValidation {
    #[must_use]
    pub fn is_legal(&self) -> bool {
        self.squadron.is_empty() && self.ships.iter().all(Vec::is_empty)
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.squadron, self.ships)
    }
}

/// Check squadron size, the snubfighter points share and upgrade rarity.
///
/// Per-ship rules are not repeated here; run [`super::validate_ship`] on each
/// ship for those.
#[must_use]
pub fn validate_squadron(ships: &[Ship]) -> SquadronValidation {
    let mut squadron = Vec::new();
    squadron.extend(validate_size(ships));
    squadron.extend(validate_composition(ships));

    let validation = SquadronValidation {
        squadron,
        ships: validate_rarity(ships),
    };
    if !validation.is_legal() {
        log::debug!("squadron of {} ship(s) is illegal: {validation:?}", ships.len());
    }
    validation
}

fn validate_size(ships: &[Ship]) -> Option<String> {
    match ships.len() {
        0 => None,
        n if n < SQUADRON_MIN_SHIPS => {
            Some("A squadron must contain at least four ships".to_string())
        }
        n if n > SQUADRON_MAX_SHIPS => Some(format!(
            "A squadron must contain at most {SQUADRON_MAX_SHIPS} ships"
        )),
        _ => None,
    }
}

fn validate_composition(ships: &[Ship]) -> Option<String> {
    let (total, snub) = ships.iter().fold((0u32, 0u32), |(total, snub), ship| {
        let cost = cost_with_pilot(ship);
        let snub_cost = if ship.ship_type() == ShipType::Snubfighter {
            cost
        } else {
            0
        };
        (total + cost, snub + snub_cost)
    });
    (snub * 2 < total)
        .then(|| "A squadron must contain at least 50% snubfighters, by points".to_string())
}

/// Distinct upgrade names a ship carries; repeats count once.
fn carried_upgrades(ship: &Ship) -> Vec<String> {
    let mut names: Vec<String> = coalesce_duplicate_upgrades(&ship.upgrades)
        .iter()
        .map(|entry| split_duplicate_upgrade(entry).upgrade)
        .collect();
    names.sort();
    names.dedup();
    names
}

fn validate_rarity(ships: &[Ship]) -> Vec<Vec<String>> {
    let mut carriers: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, ship) in ships.iter().enumerate() {
        for name in carried_upgrades(ship) {
            carriers.entry(name).or_default().push(idx);
        }
    }

    let catalog = catalog();
    let mut per_ship = vec![Vec::new(); ships.len()];
    for (name, holders) in &carriers {
        let Some(upgrade) = catalog.get(name) else {
            continue;
        };
        let message = match upgrade.rarity {
            Rarity::Rare if holders.len() > RARE_MAX_CARRIERS => {
                format!("At most one ship can carry the {name} upgrade")
            }
            Rarity::Uncommon if holders.len() > UNCOMMON_MAX_CARRIERS => {
                format!("At most three ships can carry the {name} upgrade")
            }
            _ => continue,
        };
        for &idx in holders {
            per_ship[idx].push(message.clone());
        }
    }
    per_ship
}
