//! Squadron roster: a named list of ships sharing one trait, with a plain
//! text form of one printable line per ship.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::ShipType;
use crate::cost::cost_with_pilot;
use crate::printable::{PrintableError, parse_printable, printable_version};
use crate::ship::{Ship, SquadronTrait};
use crate::validation::{SquadronValidation, validate_ship, validate_squadron};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("roster line {line}: {source}")]
pub struct RosterError {
    /// 1-based line number in the roster text
    pub line: usize,
    #[source]
    pub source: PrintableError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squadron {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    squadron_trait: Option<SquadronTrait>,
    #[serde(default)]
    ships: Vec<Ship>,
}

impl Squadron {
    #[must_use]
    pub fn new(name: Option<String>, squadron_trait: Option<SquadronTrait>) -> Self {
        Self {
            name,
            squadron_trait,
            ships: Vec::new(),
        }
    }

    #[must_use]
    pub const fn squadron_trait(&self) -> Option<SquadronTrait> {
        self.squadron_trait
    }

    #[must_use]
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Add a ship, overwriting its trait with the squadron's.
    pub fn push(&mut self, mut ship: Ship) {
        ship.squadron_trait = self.squadron_trait;
        self.ships.push(ship);
    }

    pub fn remove(&mut self, index: usize) -> Option<Ship> {
        (index < self.ships.len()).then(|| self.ships.remove(index))
    }

    /// Change the squadron trait and restamp every ship.
    pub fn set_trait(&mut self, squadron_trait: Option<SquadronTrait>) {
        self.squadron_trait = squadron_trait;
        for ship in &mut self.ships {
            ship.squadron_trait = squadron_trait;
        }
    }

    #[must_use]
    pub fn total_cost(&self) -> u32 {
        self.ships.iter().map(cost_with_pilot).sum()
    }

    #[must_use]
    pub fn snubfighter_cost(&self) -> u32 {
        self.ships
            .iter()
            .filter(|ship| ship.ship_type() == ShipType::Snubfighter)
            .map(cost_with_pilot)
            .sum()
    }

    #[must_use]
    pub fn validate(&self) -> SquadronValidation {
        validate_squadron(&self.ships)
    }

    /// Per-ship rule violations, index aligned with [`Self::ships`].
    #[must_use]
    pub fn ship_violations(&self) -> Vec<Vec<String>> {
        self.ships.iter().map(validate_ship).collect()
    }

    /// True when no ship breaks a ship rule and the squadron checks pass.
    #[must_use]
    pub fn is_legal(&self) -> bool {
        self.ship_violations().iter().all(Vec::is_empty) && self.validate().is_legal()
    }

    /// Parse roster text: one printable line per ship.
    ///
    /// Blank lines and `#` comments are skipped. A comment before the first
    /// ship names the squadron. The trait is not part of the text; apply it
    /// afterwards with [`Self::set_trait`].
    ///
    /// # Errors
    ///
    /// Returns the first line that fails to parse as a ship.
    pub fn parse_roster(text: &str) -> Result<Self, RosterError> {
        let mut squadron = Self::default();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                let comment = comment.trim();
                if squadron.name.is_none() && squadron.is_empty() && !comment.is_empty() {
                    squadron.name = Some(comment.to_string());
                }
                continue;
            }
            let ship = parse_printable(line).map_err(|source| RosterError {
                line: idx + 1,
                source,
            })?;
            squadron.push(ship);
        }
        log::debug!(
            "parsed roster {:?} with {} ship(s)",
            squadron.name,
            squadron.len()
        );
        Ok(squadron)
    }

    /// Render the roster text read by [`Self::parse_roster`].
    #[must_use]
    pub fn to_roster(&self) -> String {
        let mut out = String::new();
        if let Some(name) = &self.name {
            out.push_str(&format!("# {name}\n"));
        }
        for ship in &self.ships {
            out.push_str(&printable_version(ship));
            out.push('\n');
        }
        out
    }
}
