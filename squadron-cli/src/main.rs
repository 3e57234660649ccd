mod logic;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Read, Write, stdin, stdout};
use std::path::{Path, PathBuf};

use logic::{SquadronSummary, View, reports};
use squadron_core::{ShipType, Squadron, SquadronTrait, Upgrade, catalog};

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Check every ship and the squadron as a whole against the rules
    Validate {
        /// Roster file, one printable ship per line ("-" reads stdin)
        roster: PathBuf,
    },
    /// Itemize point costs per ship and for the squadron
    Cost {
        /// Roster file, one printable ship per line ("-" reads stdin)
        roster: PathBuf,
    },
    /// Re-emit the roster with recomputed costs and stats
    Print {
        /// Roster file, one printable ship per line ("-" reads stdin)
        roster: PathBuf,
    },
    /// List the upgrade catalog
    Catalog {
        /// Only upgrades this ship type may carry
        #[arg(long, value_parser = parse_ship_type)]
        ship_type: Option<ShipType>,
    },
}

#[derive(Debug, Parser)]
#[command(name = "squadron", version)]
#[command(about = "Cost and legality reports for starfighter squadron rosters")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output report format
    #[arg(long, global = true, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Squadron trait applied to every ship before evaluating
    #[arg(long = "trait", global = true, value_parser = parse_trait)]
    squadron_trait: Option<SquadronTrait>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,
}

fn parse_trait(value: &str) -> Result<SquadronTrait, String> {
    value.parse().map_err(|()| {
        let known: Vec<&str> = SquadronTrait::ALL.iter().map(|t| t.label()).collect();
        format!("unknown trait {value:?} (expected one of: {})", known.join(", "))
    })
}

fn parse_ship_type(value: &str) -> Result<ShipType, String> {
    value
        .parse()
        .map_err(|()| format!("unknown ship type {value:?}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.report == "console" && args.output.is_none() {
        announce_banner();
    }

    let legal = run(&args)?;
    if !legal {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn announce_banner() {
    println!("{}", "🛰️  Squadron Builder".bright_cyan().bold());
    println!("{}", "====================".cyan());
}

/// Run the selected subcommand. Returns false when `validate` finds the
/// roster illegal.
fn run(args: &Args) -> Result<bool> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    if args.output.is_some() {
        colored::control::set_override(false);
    }

    let legal = match &args.command {
        Command::Catalog { ship_type } => {
            let upgrades: Vec<&Upgrade> = match ship_type {
                Some(ship_type) => catalog().for_ship_type(*ship_type).collect(),
                None => catalog().iter().collect(),
            };
            write_catalog(&args.report, &mut output_target, &upgrades)?;
            true
        }
        Command::Validate { roster } => {
            let summary = summarize(roster, args.squadron_trait)?;
            write_summary(&args.report, &mut output_target, &summary, View::Validate)?;
            summary.legal
        }
        Command::Cost { roster } => {
            let summary = summarize(roster, args.squadron_trait)?;
            write_summary(&args.report, &mut output_target, &summary, View::Cost)?;
            true
        }
        Command::Print { roster } => {
            let summary = summarize(roster, args.squadron_trait)?;
            write_summary(&args.report, &mut output_target, &summary, View::Print)?;
            true
        }
    };

    output_target.flush_inner()?;
    Ok(legal)
}

fn load_roster(path: &Path) -> Result<Squadron> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        stdin()
            .read_to_string(&mut buf)
            .context("failed to read roster from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    Squadron::parse_roster(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn summarize(path: &Path, squadron_trait: Option<SquadronTrait>) -> Result<SquadronSummary> {
    let mut squadron = load_roster(path)?;
    if squadron_trait.is_some() {
        squadron.set_trait(squadron_trait);
    }
    log::info!(
        "loaded {} ship(s) from {}",
        squadron.len(),
        path.display()
    );
    Ok(SquadronSummary::from_squadron(&squadron))
}

fn write_summary(
    report: &str,
    output_target: &mut OutputTarget,
    summary: &SquadronSummary,
    view: View,
) -> Result<()> {
    match report {
        "json" => reports::generate_json_report(output_target, summary),
        "markdown" => reports::generate_markdown_report(output_target, summary, view),
        _ => {
            if summary.ships.is_empty() {
                writeln!(output_target, "No ships in roster.")?;
                return Ok(());
            }
            reports::generate_console_report(output_target, summary, view)
        }
    }
}

fn write_catalog(
    report: &str,
    output_target: &mut OutputTarget,
    upgrades: &[&Upgrade],
) -> Result<()> {
    match report {
        "json" => reports::generate_catalog_json(output_target, upgrades),
        "markdown" => reports::generate_catalog_markdown(output_target, upgrades),
        _ => reports::generate_catalog_console(output_target, upgrades),
    }
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
