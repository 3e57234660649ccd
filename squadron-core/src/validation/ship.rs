use crate::catalog::{ShipType, catalog};
use crate::constants::{
    UPGRADE_ENHANCED_TURRET, UPGRADE_FULLY_LOADED, UPGRADE_HARD_POINT, UPGRADE_TAILGUNNER,
};
use crate::cost::cost_without_pilot;
use crate::dice::Rating;
use crate::ship::{Ship, SquadronTrait, Weapon, WeaponArc};

/// Check one ship against every per-ship rule, in rulebook order.
#[must_use]
pub fn validate_ship(ship: &Ship) -> Vec<String> {
    let mut errors = Vec::new();
    errors.extend(validate_speed(ship));
    errors.extend(validate_defense(ship));
    validate_weapons(ship, &mut errors);
    validate_upgrades(ship, &mut errors);
    errors.extend(validate_upgrade_count(ship));
    errors.extend(validate_pilot(ship));
    errors.extend(validate_max_cost(ship));

    if !errors.is_empty() {
        log::debug!(
            "{} {:?} breaks {} rule(s): {errors:?}",
            ship.ship_type(),
            ship.name,
            errors.len()
        );
    }
    errors
}

/// Upgrade slots available to the ship: class base, plus one each for
/// Fully Loaded and the High Tech trait.
#[must_use]
pub fn upgrade_count_limit(ship: &Ship) -> u32 {
    let class = ship.ship_type().class();
    class.upgrade_slots
        + u32::from(ship.has_upgrade(UPGRADE_FULLY_LOADED))
        + u32::from(ship.squadron_trait == Some(SquadronTrait::HighTech))
}

fn plural(ship_type: ShipType) -> String {
    format!("{}s", ship_type.label())
}

fn number_word(n: usize) -> String {
    match n {
        1 => "one".to_string(),
        2 => "two".to_string(),
        3 => "three".to_string(),
        4 => "four".to_string(),
        5 => "five".to_string(),
        _ => n.to_string(),
    }
}

/// "2d6 or 2d8", "2d6, 2d8, or 2d10"
fn dice_list(dice: &[Rating]) -> String {
    match dice {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{}, or {last}", head.join(", "))
        }
    }
}

fn validate_speed(ship: &Ship) -> Option<String> {
    let class = ship.ship_type().class();
    if (class.min_speed..=class.max_speed).contains(&ship.speed) {
        None
    } else {
        Some(format!(
            "Speed is {}, but must be between {} and {}",
            ship.speed, class.min_speed, class.max_speed
        ))
    }
}

fn validate_defense(ship: &Ship) -> Option<String> {
    let ship_type = ship.ship_type();
    let required = ship_type.class().defense;
    let actual = ship.defense().rating;
    (actual != required).then(|| {
        format!("Defense is {actual}, but defense for a {ship_type} must be {required}")
    })
}

fn count_rating(weapons: &[Weapon], rating: Rating) -> usize {
    weapons
        .iter()
        .filter(|w| w.firepower.rating == rating)
        .count()
}

fn count_arc(weapons: &[Weapon], arc: WeaponArc) -> usize {
    weapons.iter().filter(|w| w.arc == arc).count()
}

/// Returns false when the mount count is over the limit.
fn check_weapon_count(ship: &Ship, weapons: &[Weapon], errors: &mut Vec<String>) -> bool {
    let ship_type = ship.ship_type();
    let hard_point = ship.has_upgrade(UPGRADE_HARD_POINT);
    let max = ship_type.class().max_weapons + usize::from(hard_point);
    if weapons.len() <= max {
        return true;
    }
    let with = if hard_point { " with Hard Point" } else { "" };
    errors.push(format!(
        "{}{with} may not carry more than {} weapons",
        plural(ship_type),
        number_word(max)
    ));
    false
}

fn check_arcs(weapons: &[Weapon], errors: &mut Vec<String>) {
    if count_arc(weapons, WeaponArc::Front) > 1 {
        errors.push("Ships may not have more than one front-firing weapon".to_string());
    }
    if count_arc(weapons, WeaponArc::Rear) > 1 {
        errors.push("Ships may not have more than one rear-firing weapon".to_string());
    }
}

fn validate_weapons(ship: &Ship, errors: &mut Vec<String>) {
    let weapons = ship.weapons();
    match ship.ship_type() {
        ShipType::Snubfighter => validate_snubfighter_weapons(ship, &weapons, errors),
        ShipType::Gunship => {
            check_weapon_count(ship, &weapons, errors);
            if count_rating(&weapons, Rating::D10) > 1 {
                errors.push("Gunships may not carry more than one 2d10 weapon".to_string());
            }
            check_arcs(&weapons, errors);
        }
        ShipType::Corvette => {
            check_weapon_count(ship, &weapons, errors);
            if count_rating(&weapons, Rating::D6) > 0 {
                errors.push("Corvettes may not carry 2d6 weapons".to_string());
            }
            check_arcs(&weapons, errors);
        }
    }
}

fn validate_snubfighter_weapons(ship: &Ship, weapons: &[Weapon], errors: &mut Vec<String>) {
    let Some((first, rest)) = weapons.split_first() else {
        errors.push("Snubfighters must carry at least one weapon".to_string());
        return;
    };
    if !check_weapon_count(ship, weapons, errors) {
        return;
    }
    if count_rating(weapons, Rating::D10) > 0 {
        errors.push("Snubfighters may not carry 2d10 weapons".to_string());
    }
    if count_rating(weapons, Rating::D8) > 1 {
        errors.push("Snubfighters may only carry one 2d8 weapon".to_string());
    }
    if first.arc != WeaponArc::Front {
        errors.push("A Snubfighter's first weapon must fire forward".to_string());
    }
    if rest.iter().any(|w| w.arc == WeaponArc::Front) {
        errors.push("A Snubfighter's secondary weapons must not fire forward".to_string());
    }
}

/// Upgrade names with their copy counts, in first-seen order.
fn group_upgrades(upgrades: &[String]) -> Vec<(&str, usize)> {
    let mut groups: Vec<(&str, usize)> = Vec::new();
    for name in upgrades {
        if let Some(group) = groups.iter_mut().find(|(n, _)| *n == name.as_str()) {
            group.1 += 1;
        } else {
            groups.push((name.as_str(), 1));
        }
    }
    groups
}

fn validate_upgrades(ship: &Ship, errors: &mut Vec<String>) {
    let ship_type = ship.ship_type();
    let catalog = catalog();

    for (name, count) in group_upgrades(&ship.upgrades) {
        if count > 1 && name != UPGRADE_ENHANCED_TURRET {
            errors.push(format!(
                "Ships cannot have more than one copy of the {name} upgrade"
            ));
        }
        let allowed = catalog.get(name).is_some_and(|u| u.allows(ship_type));
        if !allowed {
            if !catalog.contains(name) {
                log::warn!("upgrade {name:?} is not in the catalog");
            }
            errors.push(format!("{} cannot have the {name} upgrade", plural(ship_type)));
        }
    }

    let weapons = ship.weapons();
    if count_arc(&weapons, WeaponArc::Rear) > 0 && !ship.has_upgrade(UPGRADE_TAILGUNNER) {
        errors.push(
            "The ship must have a Tailgunner upgrade for its rear-facing weapon".to_string(),
        );
    }
    if count_arc(&weapons, WeaponArc::EnhancedTurret)
        > ship.upgrade_count(UPGRADE_ENHANCED_TURRET)
    {
        errors.push(
            "The ship must have an Enhanced Turret upgrade for each of its weapons with enhanced turrets"
                .to_string(),
        );
    }
}

fn validate_upgrade_count(ship: &Ship) -> Option<String> {
    let catalog = catalog();
    let used: u32 = ship
        .upgrades
        .iter()
        .filter_map(|name| catalog.get(name))
        .map(|u| u.slots)
        .sum();
    let limit = upgrade_count_limit(ship);
    if used <= limit {
        return None;
    }

    let mut modifiers = Vec::new();
    if ship.has_upgrade(UPGRADE_FULLY_LOADED) {
        modifiers.push(UPGRADE_FULLY_LOADED);
    }
    if ship.squadron_trait == Some(SquadronTrait::HighTech) {
        modifiers.push(SquadronTrait::HighTech.label());
    }
    let with = if modifiers.is_empty() {
        String::new()
    } else {
        format!(" with {}", modifiers.join(" and "))
    };
    Some(format!(
        "{}{with} may have at most {limit} upgrades",
        plural(ship.ship_type())
    ))
}

fn validate_pilot(ship: &Ship) -> Option<String> {
    let ship_type = ship.ship_type();
    let allowed = ship_type.class().pilot_dice;
    let pilot = ship.pilot()?;
    (!allowed.contains(&pilot.rating)).then(|| {
        format!(
            "The pilot stat for a {ship_type} must be {}",
            dice_list(allowed)
        )
    })
}

fn validate_max_cost(ship: &Ship) -> Option<String> {
    if ship.squadron_trait == Some(SquadronTrait::HighTech) {
        return None;
    }
    let ship_type = ship.ship_type();
    let max = ship_type.class().max_cost;
    let cost = cost_without_pilot(ship);
    (cost > max).then(|| {
        format!("The ship's non-pilot cost ({cost}) exceeds the maximum for a {ship_type} ({max})")
    })
}
