//! Ship aggregate: base attributes plus derived stats
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::catalog::ShipType;
use crate::constants::{UPGRADE_AGILE, UPGRADE_SHIELDS, UPGRADE_TARGETING_COMPUTER};
use crate::dice::{Rating, Stat};

/// Weapon lists are almost always four mounts or fewer.
pub type WeaponBaseList = SmallVec<[WeaponBase; 4]>;
pub type WeaponList = SmallVec<[Weapon; 4]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeaponArc {
    Front,
    Rear,
    Turret,
    EnhancedTurret,
}

impl WeaponArc {
    /// One-letter suffix used by the printable format.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Front => "",
            Self::Rear => "R",
            Self::Turret => "T",
            Self::EnhancedTurret => "E",
        }
    }

    #[must_use]
    pub fn from_suffix(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(Self::Rear),
            'T' => Some(Self::Turret),
            'E' => Some(Self::EnhancedTurret),
            _ => None,
        }
    }
}

/// Unmodified weapon mount as stored on a ship.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeaponBase {
    pub firepower: Rating,
    pub arc: WeaponArc,
}

impl WeaponBase {
    #[must_use]
    pub const fn new(firepower: Rating, arc: WeaponArc) -> Self {
        Self { firepower, arc }
    }
}

/// Weapon after upgrade and trait bonuses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weapon {
    pub firepower: Stat,
    pub arc: WeaponArc,
}

impl Weapon {
    #[must_use]
    pub const fn new(firepower: Stat, arc: WeaponArc) -> Self {
        Self { firepower, arc }
    }
}

/// Squadron-wide trait; every ship in a squadron carries the same one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SquadronTrait {
    Rugged,
    Hotshots,
    HighTech,
    BerserkerIntelligence,
}

impl SquadronTrait {
    pub const ALL: [Self; 4] = [
        Self::Rugged,
        Self::Hotshots,
        Self::HighTech,
        Self::BerserkerIntelligence,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rugged => "Rugged",
            Self::Hotshots => "Hotshots",
            Self::HighTech => "High Tech",
            Self::BerserkerIntelligence => "Berserker Intelligence",
        }
    }
}

impl fmt::Display for SquadronTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SquadronTrait {
    type Err = ();

    /// Accepts the label in any case, with spaces, hyphens or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "rugged" => Ok(Self::Rugged),
            "hotshots" => Ok(Self::Hotshots),
            "hightech" => Ok(Self::HighTech),
            "berserkerintelligence" => Ok(Self::BerserkerIntelligence),
            _ => Err(()),
        }
    }
}

/// Optional inputs for the ship factories. Unset fields take class defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipOptions {
    pub name: Option<String>,
    /// Ignored by corvettes, which always fly at speed 1
    pub speed: Option<i32>,
    pub weapons: Vec<WeaponBase>,
    pub pilot: Option<Rating>,
    pub upgrades: Vec<String>,
    pub squadron_trait: Option<SquadronTrait>,
}

impl ShipOptions {
    #[must_use]
    pub fn with_upgrades<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.upgrades = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_weapons<I>(mut self, weapons: I) -> Self
    where
        I: IntoIterator<Item = (Rating, WeaponArc)>,
    {
        self.weapons = weapons
            .into_iter()
            .map(|(firepower, arc)| WeaponBase::new(firepower, arc))
            .collect();
        self
    }
}

/// A single ship of a squadron.
///
/// Only base values are stored; `defense`, `pilot` and `weapons` are
/// recomputed from them on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ShipRecord", into = "ShipRecord")]
pub struct Ship {
    pub name: String,
    ship_type: ShipType,
    pub speed: i32,
    pub(crate) defense_base: Rating,
    pub weapons_base: WeaponBaseList,
    pilot_base: Option<Rating>,
    /// Upgrade names; only "Enhanced Turret" may legally repeat
    pub upgrades: Vec<String>,
    pub squadron_trait: Option<SquadronTrait>,
}

impl Ship {
    /// Build a ship of any class. The defense die is fixed by the class.
    #[must_use]
    pub fn new(ship_type: ShipType, options: ShipOptions) -> Self {
        let class = ship_type.class();
        Self {
            name: options
                .name
                .unwrap_or_else(|| ship_type.label().to_string()),
            ship_type,
            speed: options.speed.unwrap_or(class.default_speed),
            defense_base: class.defense,
            weapons_base: options.weapons.into_iter().collect(),
            pilot_base: options.pilot,
            upgrades: options.upgrades,
            squadron_trait: options.squadron_trait,
        }
    }

    #[must_use]
    pub fn snubfighter(options: ShipOptions) -> Self {
        Self::new(ShipType::Snubfighter, options)
    }

    #[must_use]
    pub fn gunship(options: ShipOptions) -> Self {
        Self::new(ShipType::Gunship, options)
    }

    #[must_use]
    pub fn corvette(options: ShipOptions) -> Self {
        Self::new(
            ShipType::Corvette,
            ShipOptions {
                speed: None,
                ..options
            },
        )
    }

    #[must_use]
    pub const fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    #[must_use]
    pub const fn defense_base(&self) -> Rating {
        self.defense_base
    }

    #[must_use]
    pub const fn pilot_base(&self) -> Option<Rating> {
        self.pilot_base
    }

    #[must_use]
    pub fn has_upgrade(&self, name: &str) -> bool {
        self.upgrades.iter().any(|u| u == name)
    }

    /// Number of copies of `name` in the upgrade list.
    #[must_use]
    pub fn upgrade_count(&self, name: &str) -> usize {
        self.upgrades.iter().filter(|u| *u == name).count()
    }

    fn has_trait(&self, squadron_trait: SquadronTrait) -> bool {
        self.squadron_trait == Some(squadron_trait)
    }

    fn bonus(&self, upgrade: &str, squadron_trait: SquadronTrait) -> i32 {
        i32::from(self.has_upgrade(upgrade)) + i32::from(self.has_trait(squadron_trait))
    }

    /// Defense after Shields and Rugged.
    #[must_use]
    pub fn defense(&self) -> Stat {
        Stat::with_modifier(
            self.defense_base,
            self.bonus(UPGRADE_SHIELDS, SquadronTrait::Rugged),
        )
    }

    /// Pilot after Agile and Hotshots, or `None` for an unpiloted ship.
    #[must_use]
    pub fn pilot(&self) -> Option<Stat> {
        let modifier = self.bonus(UPGRADE_AGILE, SquadronTrait::Hotshots);
        self.pilot_base
            .map(|rating| Stat::with_modifier(rating, modifier))
    }

    /// Weapons after Targeting Computer and Berserker Intelligence.
    #[must_use]
    pub fn weapons(&self) -> WeaponList {
        let modifier = self.bonus(
            UPGRADE_TARGETING_COMPUTER,
            SquadronTrait::BerserkerIntelligence,
        );
        self.weapons_base
            .iter()
            .map(|w| Weapon::new(Stat::with_modifier(w.firepower, modifier), w.arc))
            .collect()
    }
}

/// Wire shape of a ship; the defense die is re-derived on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShipRecord {
    name: String,
    ship_type: ShipType,
    speed: i32,
    #[serde(default)]
    weapons: Vec<WeaponBase>,
    #[serde(default)]
    pilot: Option<Rating>,
    #[serde(default)]
    upgrades: Vec<String>,
    #[serde(default)]
    squadron_trait: Option<SquadronTrait>,
}

impl From<ShipRecord> for Ship {
    fn from(record: ShipRecord) -> Self {
        Self::new(
            record.ship_type,
            ShipOptions {
                name: Some(record.name),
                speed: Some(record.speed),
                weapons: record.weapons,
                pilot: record.pilot,
                upgrades: record.upgrades,
                squadron_trait: record.squadron_trait,
            },
        )
    }
}

impl From<Ship> for ShipRecord {
    fn from(ship: Ship) -> Self {
        Self {
            name: ship.name,
            ship_type: ship.ship_type,
            speed: ship.speed,
            weapons: ship.weapons_base.into_vec(),
            pilot: ship.pilot_base,
            upgrades: ship.upgrades,
            squadron_trait: ship.squadron_trait,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factories_fix_defense_by_class() {
        assert_eq!(Ship::snubfighter(ShipOptions::default()).defense(), Stat::new(Rating::D6));
        assert_eq!(Ship::gunship(ShipOptions::default()).defense(), Stat::new(Rating::D8));
        assert_eq!(Ship::corvette(ShipOptions::default()).defense(), Stat::new(Rating::D10));
    }

    #[test]
    fn factory_defaults() {
        let snub = Ship::snubfighter(ShipOptions::default());
        assert_eq!(snub.name, "Snubfighter");
        assert_eq!(snub.speed, 2);
        assert!(snub.weapons_base.is_empty());
        assert_eq!(snub.pilot(), None);
        assert_eq!(Ship::gunship(ShipOptions::default()).speed, 1);

        let corvette = Ship::corvette(ShipOptions {
            speed: Some(3),
            ..ShipOptions::default()
        });
        assert_eq!(corvette.speed, 1);
    }

    #[test]
    fn defense_stacks_shields_and_rugged() {
        let shields = Ship::corvette(ShipOptions::default().with_upgrades(["Shields"]));
        assert_eq!(shields.defense(), Stat::with_modifier(Rating::D10, 1));

        let both = Ship::corvette(ShipOptions {
            squadron_trait: Some(SquadronTrait::Rugged),
            ..ShipOptions::default().with_upgrades(["Shields"])
        });
        assert_eq!(both.defense(), Stat::with_modifier(Rating::D10, 2));
    }

    #[test]
    fn pilot_bonuses_apply_only_when_piloted() {
        let agile = Ship::gunship(ShipOptions {
            pilot: Some(Rating::D8),
            ..ShipOptions::default().with_upgrades(["Agile"])
        });
        assert_eq!(agile.pilot(), Some(Stat::with_modifier(Rating::D8, 1)));

        let hotshots = Ship::gunship(ShipOptions {
            pilot: Some(Rating::D8),
            squadron_trait: Some(SquadronTrait::Hotshots),
            ..ShipOptions::default()
        });
        assert_eq!(hotshots.pilot(), Some(Stat::with_modifier(Rating::D8, 1)));

        let unpiloted = Ship::gunship(ShipOptions::default().with_upgrades(["Agile"]));
        assert_eq!(unpiloted.pilot(), None);
    }

    #[test]
    fn weapons_add_targeting_computer_and_berserker_bonuses() {
        let mut ship = Ship::corvette(
            ShipOptions::default()
                .with_weapons([(Rating::D10, WeaponArc::Front), (Rating::D10, WeaponArc::Rear)]),
        );
        assert_eq!(
            ship.weapons().as_slice(),
            &[
                Weapon::new(Stat::new(Rating::D10), WeaponArc::Front),
                Weapon::new(Stat::new(Rating::D10), WeaponArc::Rear),
            ]
        );

        ship.upgrades.push("Targeting Computer".to_string());
        ship.squadron_trait = Some(SquadronTrait::BerserkerIntelligence);
        assert!(
            ship.weapons()
                .iter()
                .all(|w| w.firepower == Stat::with_modifier(Rating::D10, 2))
        );
    }

    #[test]
    fn mutations_are_visible_to_derived_stats() {
        let mut ship = Ship::gunship(ShipOptions::default());
        assert_eq!(ship.defense().modifier, 0);
        ship.upgrades.push("Shields".to_string());
        assert_eq!(ship.defense().modifier, 1);
        ship.upgrades.clear();
        assert_eq!(ship.defense().modifier, 0);
    }

    #[test]
    fn squadron_trait_parses_loosely() {
        assert_eq!("High Tech".parse::<SquadronTrait>(), Ok(SquadronTrait::HighTech));
        assert_eq!("high-tech".parse::<SquadronTrait>(), Ok(SquadronTrait::HighTech));
        assert_eq!(
            "BERSERKER_INTELLIGENCE".parse::<SquadronTrait>(),
            Ok(SquadronTrait::BerserkerIntelligence)
        );
        assert!("stealthy".parse::<SquadronTrait>().is_err());
        for t in SquadronTrait::ALL {
            assert_eq!(t.label().parse::<SquadronTrait>(), Ok(t));
        }
    }

    #[test]
    fn serde_rederives_defense_from_type() {
        let ship = Ship::gunship(ShipOptions {
            name: Some("Harpy".to_string()),
            speed: Some(2),
            pilot: Some(Rating::D8),
            ..ShipOptions::default()
                .with_weapons([(Rating::D8, WeaponArc::Front)])
                .with_upgrades(["Ground Support", "Transport"])
        });
        let json = serde_json::to_string(&ship).unwrap();
        assert!(!json.contains("defense"));
        let back: Ship = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ship);
        assert_eq!(back.defense_base(), Rating::D8);
    }
}
