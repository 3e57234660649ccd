use serde::Serialize;

use squadron_core::{
    CostBreakdown, Ship, ShipType, Squadron, SquadronTrait, coalesce_duplicate_upgrades,
    cost_breakdown, printable_version,
};

/// Everything the reports show about one ship.
#[derive(Debug, Clone, Serialize)]
pub struct ShipSummary {
    pub name: String,
    pub ship_type: ShipType,
    pub printable: String,
    pub cost: CostBreakdown,
    pub cost_without_pilot: u32,
    pub cost_with_pilot: u32,
    /// Upgrade list with repeats folded into "Name xN"
    pub upgrades: Vec<String>,
    /// Ship rule violations followed by any rarity violations
    pub violations: Vec<String>,
    pub legal: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SquadronSummary {
    pub name: Option<String>,
    pub squadron_trait: Option<SquadronTrait>,
    pub ships: Vec<ShipSummary>,
    pub total_cost: u32,
    pub snubfighter_cost: u32,
    pub squadron_violations: Vec<String>,
    pub legal: bool,
    #[serde(skip)]
    pub roster: String,
}

impl ShipSummary {
    fn new(ship: &Ship, mut violations: Vec<String>, rarity: Vec<String>) -> Self {
        let cost = cost_breakdown(ship);
        violations.extend(rarity);
        Self {
            name: ship.name.clone(),
            ship_type: ship.ship_type(),
            printable: printable_version(ship),
            cost,
            cost_without_pilot: cost.without_pilot(),
            cost_with_pilot: cost.with_pilot(),
            upgrades: coalesce_duplicate_upgrades(&ship.upgrades),
            legal: violations.is_empty(),
            violations,
        }
    }
}

impl SquadronSummary {
    #[must_use]
    pub fn from_squadron(squadron: &Squadron) -> Self {
        let (squadron_violations, rarity) = squadron.validate().into_parts();
        let ships: Vec<ShipSummary> = squadron
            .ships()
            .iter()
            .zip(squadron.ship_violations())
            .zip(rarity)
            .map(|((ship, violations), rarity)| ShipSummary::new(ship, violations, rarity))
            .collect();
        let legal = squadron_violations.is_empty() && ships.iter().all(|s| s.legal);
        Self {
            name: squadron.name.clone(),
            squadron_trait: squadron.squadron_trait(),
            ships,
            total_cost: squadron.total_cost(),
            snubfighter_cost: squadron.snubfighter_cost(),
            squadron_violations,
            legal,
            roster: squadron.to_roster(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed squadron")
    }

    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.squadron_violations.len() + self.ships.iter().map(|s| s.violations.len()).sum::<usize>()
    }
}
