use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use squadron_core::{CostBreakdown, Upgrade, format_upgrades};

use super::{ShipSummary, SquadronSummary};

/// Which part of a squadron summary a report focuses on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Validate,
    Cost,
    Print,
}

fn upgrade_text(ship: &ShipSummary) -> String {
    if ship.upgrades.is_empty() {
        "-".to_string()
    } else {
        format_upgrades(&ship.upgrades, " ")
    }
}

fn breakdown_line(cost: &CostBreakdown) -> String {
    format!(
        "speed {} · defense {} · weapons {} · upgrades {} · pilot {}",
        cost.speed, cost.defense, cost.weapons, cost.upgrades, cost.pilot
    )
}

pub fn generate_console_report<W: Write>(
    out: &mut W,
    summary: &SquadronSummary,
    view: View,
) -> Result<()> {
    writeln!(out)?;
    let heading = match summary.squadron_trait {
        Some(squadron_trait) => format!("🚀 {} ({squadron_trait})", summary.title()),
        None => format!("🚀 {}", summary.title()),
    };
    writeln!(out, "{}", heading.bright_cyan().bold())?;
    writeln!(out, "{}", "=".repeat(30).cyan())?;

    if view == View::Print {
        for ship in &summary.ships {
            writeln!(out, "{}", ship.printable)?;
        }
        return Ok(());
    }

    for ship in &summary.ships {
        let status = if ship.legal {
            "✅ LEGAL".green()
        } else {
            "❌ ILLEGAL".red()
        };
        writeln!(
            out,
            "{} {} ({}) {} ({})",
            status,
            ship.name.bold(),
            ship.ship_type.label(),
            ship.cost_without_pilot,
            ship.cost_with_pilot
        )?;
        match view {
            View::Cost => writeln!(out, "   {}", breakdown_line(&ship.cost))?,
            View::Validate | View::Print => {
                writeln!(out, "   Upgrades: {}", upgrade_text(ship))?;
            }
        }
        if view == View::Validate && !ship.violations.is_empty() {
            writeln!(out, "   Violations:")?;
            for violation in &ship.violations {
                writeln!(out, "     • {}", violation.red())?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "📊 Squadron Summary".bright_yellow().bold())?;
    writeln!(out, "{}", "===================".yellow())?;
    writeln!(out, "Ships: {}", summary.ships.len())?;
    writeln!(out, "Total cost: {}", summary.total_cost)?;
    writeln!(out, "Snubfighter cost: {}", summary.snubfighter_cost)?;
    if view == View::Validate {
        if !summary.squadron_violations.is_empty() {
            writeln!(out, "Squadron violations:")?;
            for violation in &summary.squadron_violations {
                writeln!(out, "  • {}", violation.red())?;
            }
        }
        let verdict = if summary.legal {
            "LEGAL".green().bold()
        } else {
            format!("ILLEGAL ({} violation(s))", summary.violation_count())
                .red()
                .bold()
        };
        writeln!(out, "Result: {verdict}")?;
    }
    Ok(())
}

pub fn generate_json_report<W: Write>(out: &mut W, summary: &SquadronSummary) -> Result<()> {
    let json_output = serde_json::to_string_pretty(summary)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(
    out: &mut W,
    summary: &SquadronSummary,
    view: View,
) -> Result<()> {
    writeln!(out, "# Squadron Report: {}\n", summary.title())?;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Ships**: {}", summary.ships.len())?;
    if let Some(squadron_trait) = summary.squadron_trait {
        writeln!(out, "- **Trait**: {squadron_trait}")?;
    }
    writeln!(out, "- **Total cost**: {}", summary.total_cost)?;
    writeln!(out, "- **Snubfighter cost**: {}", summary.snubfighter_cost)?;
    if view == View::Validate {
        let verdict = if summary.legal { "✅ legal" } else { "❌ illegal" };
        writeln!(out, "- **Result**: {verdict}")?;
    }
    writeln!(out)?;

    match view {
        View::Print => {
            writeln!(out, "## Roster\n")?;
            writeln!(out, "```text\n{}```", summary.roster)?;
        }
        View::Cost => {
            writeln!(out, "## Costs\n")?;
            writeln!(
                out,
                "| Ship | Type | Speed | Defense | Weapons | Upgrades | Pilot | Total | With pilot |"
            )?;
            writeln!(out, "|---|---|---|---|---|---|---|---|---|")?;
            for ship in &summary.ships {
                let c = &ship.cost;
                writeln!(
                    out,
                    "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
                    ship.name,
                    ship.ship_type.label(),
                    c.speed,
                    c.defense,
                    c.weapons,
                    c.upgrades,
                    c.pilot,
                    ship.cost_without_pilot,
                    ship.cost_with_pilot
                )?;
            }
        }
        View::Validate => {
            writeln!(out, "## Ships\n")?;
            for ship in &summary.ships {
                let status = if ship.legal { "✅" } else { "❌" };
                writeln!(out, "### {} {}\n", status, ship.name)?;
                writeln!(out, "- **Type**: {}", ship.ship_type.label())?;
                writeln!(
                    out,
                    "- **Cost**: {} ({} with pilot)",
                    ship.cost_without_pilot, ship.cost_with_pilot
                )?;
                writeln!(out, "- **Upgrades**: {}", upgrade_text(ship))?;
                if !ship.violations.is_empty() {
                    writeln!(out, "- **Violations**:")?;
                    for violation in &ship.violations {
                        writeln!(out, "  - {violation}")?;
                    }
                }
                writeln!(out)?;
            }
            if !summary.squadron_violations.is_empty() {
                writeln!(out, "## Squadron Violations\n")?;
                for violation in &summary.squadron_violations {
                    writeln!(out, "- {violation}")?;
                }
            }
        }
    }
    Ok(())
}

fn class_list(upgrade: &Upgrade) -> String {
    upgrade
        .classes
        .iter()
        .map(|class| class.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn generate_catalog_console<W: Write>(out: &mut W, upgrades: &[&Upgrade]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📦 Upgrade Catalog".bright_cyan().bold())?;
    writeln!(out, "{}", "==================".cyan())?;
    for upgrade in upgrades {
        writeln!(
            out,
            "{} {:9} cost {}  slots {}  {}",
            format!("{:22}", upgrade.name).bold(),
            upgrade.rarity.as_str(),
            upgrade.cost,
            upgrade.slots,
            class_list(upgrade)
        )?;
    }
    writeln!(out, "\n{} upgrade(s)", upgrades.len())?;
    Ok(())
}

pub fn generate_catalog_markdown<W: Write>(out: &mut W, upgrades: &[&Upgrade]) -> Result<()> {
    writeln!(out, "# Upgrade Catalog\n")?;
    writeln!(out, "| Upgrade | Rarity | Cost | Slots | Ship types |")?;
    writeln!(out, "|---|---|---|---|---|")?;
    for upgrade in upgrades {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            upgrade.name,
            upgrade.rarity,
            upgrade.cost,
            upgrade.slots,
            class_list(upgrade)
        )?;
    }
    Ok(())
}

pub fn generate_catalog_json<W: Write>(out: &mut W, upgrades: &[&Upgrade]) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(upgrades)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use squadron_core::{ShipType, Squadron, catalog};

    const ROSTER: &str = "\
# Lone Wolves
Wolf (snubfighter) 0 (0):2:2d6:2d6,2d6T:2d6:Fast
Brute (gunship) 0 (0):2:2d8:2d10,2d8R:2d10:Repair
";

    fn summary() -> SquadronSummary {
        SquadronSummary::from_squadron(&Squadron::parse_roster(ROSTER).unwrap())
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn console_validate_lists_violations() {
        let summary = summary();
        let text = render(|out| generate_console_report(out, &summary, View::Validate));
        assert!(text.contains("Lone Wolves"));
        assert!(text.contains("✅ LEGAL Wolf (Snubfighter) 10 (11)"));
        assert!(text.contains("❌ ILLEGAL Brute (Gunship)"));
        assert!(text.contains("The ship must have a Tailgunner upgrade for its rear-facing weapon"));
        assert!(text.contains("A squadron must contain at least four ships"));
        assert!(text.contains("Result: ILLEGAL"));
    }

    #[test]
    fn console_cost_shows_breakdown() {
        let summary = summary();
        let text = render(|out| generate_console_report(out, &summary, View::Cost));
        assert!(text.contains("speed 3 · defense 2 · weapons 4 · upgrades 1 · pilot 1"));
        assert!(!text.contains("Result:"));
    }

    #[test]
    fn console_print_emits_printable_lines() {
        let summary = summary();
        let text = render(|out| generate_console_report(out, &summary, View::Print));
        assert!(text.contains("Wolf (snubfighter) 10 (11):2:2d6:2d6,2d6T:2d6:Fast"));
    }

    #[test]
    fn markdown_report_has_sections() {
        let summary = summary();
        let text = render(|out| generate_markdown_report(out, &summary, View::Validate));
        assert!(text.starts_with("# Squadron Report: Lone Wolves"));
        assert!(text.contains("### ❌ Brute"));
        assert!(text.contains("## Squadron Violations"));

        let costs = render(|out| generate_markdown_report(out, &summary, View::Cost));
        assert!(costs.contains("| Wolf | Snubfighter | 3 | 2 | 4 | 1 | 1 | 10 | 11 |"));

        let roster = render(|out| generate_markdown_report(out, &summary, View::Print));
        assert!(roster.contains("```text\n# Lone Wolves\n"));
    }

    #[test]
    fn json_report_round_trips_through_serde() {
        let summary = summary();
        let text = render(|out| generate_json_report(out, &summary));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["name"], "Lone Wolves");
        assert_eq!(value["ships"][0]["ship_type"], "SNUBFIGHTER");
        assert_eq!(value["legal"], false);
        assert!(value.get("roster").is_none());
    }

    #[test]
    fn catalog_reports_list_entries() {
        let upgrades: Vec<&Upgrade> = catalog().for_ship_type(ShipType::Corvette).collect();
        let text = render(|out| generate_catalog_console(out, &upgrades));
        assert!(text.contains("Reinforced Hull"));
        assert!(!text.contains("Agile"));

        let md = render(|out| generate_catalog_markdown(out, &upgrades));
        assert!(md.contains("| Carrier | Uncommon | 1 | 1 | Corvette |"));

        let json = render(|out| generate_catalog_json(out, &upgrades));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(upgrades.len()));
    }
}
