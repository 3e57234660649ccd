//! Static reference data: ship classes and the upgrade catalog
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

use crate::constants::{
    CORVETTE_DEFAULT_SPEED, CORVETTE_MAX_COST, CORVETTE_MAX_WEAPONS, CORVETTE_PILOT_DICE,
    CORVETTE_SPEED, CORVETTE_UPGRADE_SLOTS, DEFAULT_UPGRADE_COST, DEFAULT_UPGRADE_SLOTS,
    FULL_PILOT_DICE, GUNSHIP_DEFAULT_SPEED, GUNSHIP_MAX_COST, GUNSHIP_MAX_WEAPONS, GUNSHIP_SPEED,
    GUNSHIP_UPGRADE_SLOTS, SNUBFIGHTER_DEFAULT_SPEED, SNUBFIGHTER_MAX_COST,
    SNUBFIGHTER_MAX_WEAPONS, SNUBFIGHTER_SPEED, SNUBFIGHTER_UPGRADE_SLOTS,
};
use crate::dice::Rating;

const DEFAULT_UPGRADES_DATA: &str = include_str!("../data/upgrades.json");

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    Snubfighter,
    Gunship,
    Corvette,
}

impl ShipType {
    pub const ALL: [Self; 3] = [Self::Snubfighter, Self::Gunship, Self::Corvette];

    /// Upper-case tag, as stored in catalog data.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Snubfighter => "SNUBFIGHTER",
            Self::Gunship => "GUNSHIP",
            Self::Corvette => "CORVETTE",
        }
    }

    /// Title-case name used in rule messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Snubfighter => "Snubfighter",
            Self::Gunship => "Gunship",
            Self::Corvette => "Corvette",
        }
    }

    /// Rule table for this ship class.
    #[must_use]
    pub const fn class(self) -> &'static ShipClass {
        match self {
            Self::Snubfighter => &SNUBFIGHTER,
            Self::Gunship => &GUNSHIP,
            Self::Corvette => &CORVETTE,
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShipType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SNUBFIGHTER" => Ok(Self::Snubfighter),
            "GUNSHIP" => Ok(Self::Gunship),
            "CORVETTE" => Ok(Self::Corvette),
            _ => Err(()),
        }
    }
}

/// Per-class constants the cost and validation rules key off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    pub min_speed: i32,
    pub max_speed: i32,
    pub default_speed: i32,
    pub defense: Rating,
    pub pilot_dice: &'static [Rating],
    /// Cap on the non-pilot cost, waived under High Tech.
    pub max_cost: u32,
    pub upgrade_slots: u32,
    /// Weapon mounts before Hard Point adds one.
    pub max_weapons: usize,
}

const SNUBFIGHTER: ShipClass = ShipClass {
    min_speed: SNUBFIGHTER_SPEED.0,
    max_speed: SNUBFIGHTER_SPEED.1,
    default_speed: SNUBFIGHTER_DEFAULT_SPEED,
    defense: Rating::D6,
    pilot_dice: FULL_PILOT_DICE,
    max_cost: SNUBFIGHTER_MAX_COST,
    upgrade_slots: SNUBFIGHTER_UPGRADE_SLOTS,
    max_weapons: SNUBFIGHTER_MAX_WEAPONS,
};

const GUNSHIP: ShipClass = ShipClass {
    min_speed: GUNSHIP_SPEED.0,
    max_speed: GUNSHIP_SPEED.1,
    default_speed: GUNSHIP_DEFAULT_SPEED,
    defense: Rating::D8,
    pilot_dice: FULL_PILOT_DICE,
    max_cost: GUNSHIP_MAX_COST,
    upgrade_slots: GUNSHIP_UPGRADE_SLOTS,
    max_weapons: GUNSHIP_MAX_WEAPONS,
};

const CORVETTE: ShipClass = ShipClass {
    min_speed: CORVETTE_SPEED.0,
    max_speed: CORVETTE_SPEED.1,
    default_speed: CORVETTE_DEFAULT_SPEED,
    defense: Rating::D10,
    pilot_dice: CORVETTE_PILOT_DICE,
    max_cost: CORVETTE_MAX_COST,
    upgrade_slots: CORVETTE_UPGRADE_SLOTS,
    max_weapons: CORVETTE_MAX_WEAPONS,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn default_cost() -> u32 {
    DEFAULT_UPGRADE_COST
}

const fn default_slots() -> u32 {
    DEFAULT_UPGRADE_SLOTS
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    pub name: String,
    /// Ship classes allowed to carry it
    pub classes: Vec<ShipType>,
    pub rarity: Rarity,
    #[serde(default = "default_cost")]
    pub cost: u32,
    /// Weight against the per-ship upgrade limit
    #[serde(default = "default_slots")]
    pub slots: u32,
}

impl Upgrade {
    #[must_use]
    pub fn allows(&self, ship_type: ShipType) -> bool {
        self.classes.contains(&ship_type)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("upgrade catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("upgrade {0:?} is listed more than once")]
    DuplicateUpgrade(String),
}

/// Upgrade catalog keyed by upgrade name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeCatalog {
    entries: BTreeMap<String, Upgrade>,
}

impl UpgradeCatalog {
    /// Load a catalog from a JSON array of upgrade entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or names an upgrade twice.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let upgrades: Vec<Upgrade> = serde_json::from_str(json)?;
        let mut entries = BTreeMap::new();
        for upgrade in upgrades {
            if entries.contains_key(&upgrade.name) {
                return Err(CatalogError::DuplicateUpgrade(upgrade.name));
            }
            entries.insert(upgrade.name.clone(), upgrade);
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_UPGRADES_DATA).unwrap_or_else(|err| {
            log::error!("embedded upgrade catalog failed to load: {err}");
            Self::default()
        })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Upgrade> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All entries, alphabetized by name.
    pub fn iter(&self) -> impl Iterator<Item = &Upgrade> {
        self.entries.values()
    }

    pub fn for_ship_type(&self, ship_type: ShipType) -> impl Iterator<Item = &Upgrade> {
        self.iter().filter(move |upgrade| upgrade.allows(ship_type))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-wide catalog, parsed once from the embedded asset.
#[must_use]
pub fn catalog() -> &'static UpgradeCatalog {
    static CATALOG: OnceLock<UpgradeCatalog> = OnceLock::new();
    CATALOG.get_or_init(UpgradeCatalog::load_from_static)
}
