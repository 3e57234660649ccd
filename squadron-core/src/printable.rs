//! Printable one-line ship format.
//!
//! `{name} ({type}) {cost} ({cost with pilot}):{speed}:{defense}:{weapons}:{pilot}:{upgrades}`
//!
//! e.g. `Manticore (snubfighter) 11 (14):2:2d6+1:2d6,2d6T:2d8:Repair,Shields,Torpedoes`.
//! Costs and defense are written for the reader only; parsing recomputes them.
use thiserror::Error;

use crate::catalog::ShipType;
use crate::cost::{cost_with_pilot, cost_without_pilot};
use crate::dice::Rating;
use crate::ship::{Ship, ShipOptions, Weapon, WeaponArc, WeaponBase};

const NO_PILOT: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrintableError {
    #[error("no parenthesized ship type in {0:?}")]
    MissingShipType(String),
    #[error("unknown ship type {0:?}")]
    UnknownShipType(String),
}

/// Weapon firepower followed by its arc letter, e.g. `2d8+1T`.
#[must_use]
pub fn format_weapon(weapon: &Weapon) -> String {
    format!("{}{}", weapon.firepower, weapon.arc.suffix())
}

#[must_use]
pub fn printable_version(ship: &Ship) -> String {
    let weapons: Vec<String> = ship.weapons().iter().map(format_weapon).collect();
    let pilot = ship
        .pilot()
        .map_or_else(|| NO_PILOT.to_string(), |p| p.to_string());
    format!(
        "{} ({}) {} ({}):{}:{}:{}:{}:{}",
        ship.name,
        ship.ship_type().as_str().to_lowercase(),
        cost_without_pilot(ship),
        cost_with_pilot(ship),
        ship.speed,
        ship.defense(),
        weapons.join(","),
        pilot,
        ship.upgrades.join(",")
    )
}

/// Parse a printable line back into a ship.
///
/// Parsing is tolerant: cost figures, the defense segment and any stat
/// modifiers are ignored, unknown die sizes read as 2d10 and missing
/// trailing segments are empty. The squadron trait is never encoded, so the
/// parsed ship has none.
///
/// # Errors
///
/// Returns an error when the first segment has no `(type)` or names a ship
/// type that doesn't exist.
pub fn parse_printable(input: &str) -> Result<Ship, PrintableError> {
    let mut segments = input.split(':');
    let (name, ship_type) = parse_name_and_type(segments.next().unwrap_or_default())?;
    let speed = parse_speed(segments.next().unwrap_or_default());
    let _defense = segments.next();
    let weapons = parse_weapons(segments.next().unwrap_or_default());
    let pilot = parse_pilot(segments.next().unwrap_or_default());
    let mut upgrades: Vec<String> = segments
        .next()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect();
    upgrades.sort();

    Ok(Ship::new(
        ship_type,
        ShipOptions {
            name: Some(name),
            speed: Some(speed),
            weapons,
            pilot,
            upgrades,
            squadron_trait: None,
        },
    ))
}

/// The ship type is the first `(...)` group that names one, so a name may
/// itself carry parentheses ("Foo (Mk II) (gunship)").
fn parse_name_and_type(block: &str) -> Result<(String, ShipType), PrintableError> {
    let missing = || PrintableError::MissingShipType(block.to_string());
    let mut first_token: Option<&str> = None;
    for (open, _) in block.match_indices('(') {
        let Some(len) = block[open..].find(')') else {
            break;
        };
        let token = &block[open + 1..open + len];
        if let Ok(ship_type) = token.parse::<ShipType>() {
            return Ok((block[..open].trim().to_string(), ship_type));
        }
        first_token.get_or_insert(token);
    }
    let token = first_token.ok_or_else(missing)?;
    Err(PrintableError::UnknownShipType(token.trim().to_string()))
}

/// Leading integer of the segment; anything unreadable becomes 0 and is
/// left for the validator to flag.
fn parse_speed(segment: &str) -> i32 {
    let trimmed = segment.trim();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && matches!(c, '-' | '+'))))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse().unwrap_or_else(|_| {
        log::warn!("unreadable speed {segment:?}; using 0");
        0
    })
}

/// Die size from the digits after the first `d`, e.g. `2d8+1` is 2d8.
fn extract_rating(token: &str) -> Rating {
    let sides: Option<u32> = token.find(['d', 'D']).and_then(|idx| {
        let digits: String = token[idx + 1..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    });
    match sides {
        Some(6) => Rating::D6,
        Some(8) => Rating::D8,
        Some(10) => Rating::D10,
        _ => {
            log::warn!("unrecognized die in {token:?}; reading it as 2d10");
            Rating::D10
        }
    }
}

fn parse_weapons(segment: &str) -> Vec<WeaponBase> {
    segment
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let arc = token
                .chars()
                .next_back()
                .and_then(WeaponArc::from_suffix)
                .unwrap_or(WeaponArc::Front);
            WeaponBase::new(extract_rating(token), arc)
        })
        .collect()
}

fn parse_pilot(segment: &str) -> Option<Rating> {
    let token = segment.trim();
    token.contains(['d', 'D']).then(|| extract_rating(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Stat;
    use crate::ship::SquadronTrait;

    fn simple() -> Ship {
        Ship::snubfighter(ShipOptions {
            name: Some("Simple".to_string()),
            speed: Some(2),
            pilot: Some(Rating::D8),
            ..ShipOptions::default()
                .with_weapons([(Rating::D8, WeaponArc::Front)])
                .with_upgrades(["Repair", "Shields"])
        })
    }

    #[test]
    fn prints_every_segment() {
        assert_eq!(
            printable_version(&simple()),
            "Simple (snubfighter) 11 (14):2:2d6+1:2d8:2d8:Repair,Shields"
        );
    }

    #[test]
    fn prints_arc_letters_and_missing_pilot() {
        let ship = Ship::corvette(ShipOptions {
            name: Some("Auroch".to_string()),
            ..ShipOptions::default().with_weapons([
                (Rating::D10, WeaponArc::Turret),
                (Rating::D8, WeaponArc::Rear),
                (Rating::D8, WeaponArc::EnhancedTurret),
            ])
        });
        assert_eq!(
            printable_version(&ship),
            "Auroch (corvette) 24 (24):1:2d10:2d10T,2d8R,2d8E:None:"
        );
    }

    #[test]
    fn format_weapon_keeps_modifier() {
        let weapon = Weapon::new(Stat::with_modifier(Rating::D8, 1), WeaponArc::Turret);
        assert_eq!(format_weapon(&weapon), "2d8+1T");
    }

    #[test]
    fn parses_basic_lines() {
        assert_eq!(
            parse_printable("Simple (snubfighter) 11 (14):2:2d6:2d8:2d8:Repair,Shields").unwrap(),
            simple()
        );

        let gunship = Ship::gunship(ShipOptions {
            name: Some("Simple2".to_string()),
            speed: Some(1),
            pilot: Some(Rating::D8),
            ..ShipOptions::default()
                .with_weapons([(Rating::D6, WeaponArc::Turret)])
                .with_upgrades(["Ground Support", "Repair"])
        });
        assert_eq!(
            parse_printable("Simple2 (gunship) 9 (10):1:2d8:2d6T:2d8:Ground Support,Repair")
                .unwrap(),
            gunship
        );

        let corvette = Ship::corvette(ShipOptions {
            name: Some("Simple3".to_string()),
            pilot: Some(Rating::D6),
            ..ShipOptions::default()
                .with_weapons([(Rating::D8, WeaponArc::Front), (Rating::D8, WeaponArc::Turret)])
                .with_upgrades(["Carrier", "Reinforced Hull", "Targeting Computer"])
        });
        assert_eq!(
            parse_printable(
                "Simple3 (corvette) 20 (21):1:2d10:2d8,2d8T:2d6:Carrier,Reinforced Hull,Targeting Computer"
            )
            .unwrap(),
            corvette
        );
    }

    #[test]
    fn ignores_written_points() {
        for points in ["11 (14)", "22 (28)", "ab (cd)", "abcde", ""] {
            let input = format!("Simple (snubfighter) {points}:2:2d6:2d8:2d8:Repair,Shields");
            let parsed = parse_printable(&input).unwrap();
            assert_eq!(cost_without_pilot(&parsed), 11, "{points}");
            assert_eq!(cost_with_pilot(&parsed), 14, "{points}");
        }
    }

    #[test]
    fn ignores_written_defense() {
        for defense in ["2d8", "2d4", "123", ""] {
            let input = format!(
                "Simple2 (gunship) 9 (10):1:{defense}:2d6T:2d6:Ground Support,Repair"
            );
            assert_eq!(parse_printable(&input).unwrap().defense(), Stat::new(Rating::D8));
        }
    }

    #[test]
    fn ship_type_is_case_insensitive() {
        for token in ["snubfighter", "Snubfighter", "SNUBFiGhTeR"] {
            let input = format!("Simple ({token}) 11 (14):2:2d6:2d8:2d8:Repair,Shields");
            assert_eq!(
                parse_printable(&input).unwrap().ship_type(),
                ShipType::Snubfighter
            );
        }
    }

    #[test]
    fn weapon_arc_is_case_insensitive() {
        for (weapon, arc) in [
            ("2d8t", WeaponArc::Turret),
            ("2d8r", WeaponArc::Rear),
            ("2d8e", WeaponArc::EnhancedTurret),
        ] {
            let input = format!(
                "Simple3 (corvette) 20 (21):1:2d10:{weapon}:2d6:Carrier,Reinforced Hull,Targeting Computer"
            );
            assert_eq!(parse_printable(&input).unwrap().weapons()[0].arc, arc);
        }
    }

    #[test]
    fn ignores_weapon_and_pilot_modifiers() {
        for modifier in ["+1", "+999", "+a"] {
            let weapon =
                format!("Simple (snubfighter) 11 (14):2:2d6:2d8{modifier}:2d8:Repair,Shields");
            let parsed = parse_printable(&weapon).unwrap();
            assert_eq!(parsed.weapons()[0].firepower.modifier, 0);
            assert_eq!(parsed.weapons_base[0].firepower, Rating::D8);

            let pilot =
                format!("Simple (snubfighter) 11 (14):2:2d6:2d8:2d8{modifier}:Repair,Shields");
            let parsed = parse_printable(&pilot).unwrap();
            assert_eq!(parsed.pilot(), Some(Stat::new(Rating::D8)));
        }
    }

    #[test]
    fn unrecognized_die_reads_as_d10() {
        let parsed = parse_printable("Odd (gunship) 0 (0):1:2d8:2d7,3x:2d12:").unwrap();
        assert!(parsed.weapons_base.iter().all(|w| w.firepower == Rating::D10));
        assert_eq!(parsed.pilot_base(), Some(Rating::D10));
    }

    #[test]
    fn alphabetizes_upgrades() {
        let parsed =
            parse_printable("Simple (snubfighter) 11 (14):2:2d6:2d8:2d8:Shields,Repair").unwrap();
        assert_eq!(parsed.upgrades, ["Repair", "Shields"]);
    }

    #[test]
    fn handles_missing_upgrades_and_pilot() {
        let parsed = parse_printable("Simple (snubfighter) 11 (14):2:2d6:2d8:2d8").unwrap();
        assert!(parsed.upgrades.is_empty());

        let unpiloted = parse_printable("Simple (gunship) 5 (5):1:2d8::None:").unwrap();
        assert_eq!(unpiloted.pilot(), None);
        assert!(unpiloted.weapons_base.is_empty());

        let bare = parse_printable("Simple (gunship)").unwrap();
        assert_eq!(bare.speed, 0);
        assert_eq!(bare.pilot(), None);
    }

    #[test]
    fn squadron_trait_is_not_encoded() {
        let mut ship = simple();
        ship.squadron_trait = Some(SquadronTrait::Rugged);
        let parsed = parse_printable(&printable_version(&ship)).unwrap();
        assert_eq!(parsed.squadron_trait, None);
    }

    #[test]
    fn rejects_missing_or_unknown_ship_type() {
        assert_eq!(
            parse_printable("Simple 11 (14:2"),
            Err(PrintableError::MissingShipType("Simple 11 (14".to_string()))
        );
        assert_eq!(
            parse_printable("Simple (frigate) 11 (14):2:2d6:2d8:2d8:"),
            Err(PrintableError::UnknownShipType("frigate".to_string()))
        );
    }

    #[test]
    fn name_may_contain_parentheses() {
        let ship = Ship::gunship(ShipOptions {
            name: Some("Foo (Mk II)".to_string()),
            speed: Some(1),
            pilot: Some(Rating::D8),
            ..ShipOptions::default().with_weapons([(Rating::D8, WeaponArc::Turret)])
        });
        let line = printable_version(&ship);
        assert!(line.starts_with("Foo (Mk II) (gunship) "));
        let parsed = parse_printable(&line).unwrap();
        assert_eq!(parsed.name, "Foo (Mk II)");
        assert_eq!(parsed.ship_type(), ShipType::Gunship);
        assert_eq!(
            parse_printable("Foo (Mk II) 11 (14):2"),
            Err(PrintableError::UnknownShipType("Mk II".to_string()))
        );
    }
}
