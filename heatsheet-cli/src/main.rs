mod config;
mod output;
mod parse;

use chrono::NaiveDate;
use clap::Parser;
use heatsheet_core::{
    assign_final_lanes, compute_standings, final_qualifiers, order_roster, Competitor,
    FinalDrawMode, PointsTable, Race, RaceConfig, Standing, StandingsOptions,
};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::HeatsheetConfig;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

/// Used when neither the CLI nor the config file names a round count.
const DEFAULT_ROUND_COUNT: usize = 4;

#[derive(Parser)]
#[command(name = "heatsheet", version, about = "Build race heat sheets and compute standings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Build the multi-round heat and lane plan for a race
    Build(BuildArgs),
    /// Compute qualifying standings from recorded results
    Standings(StandingsArgs),
    /// Assign final-round lanes from the qualifying standings
    Final(FinalArgs),
    /// Create a default config file at ~/.config/heatsheet/config.toml
    Init,
}

#[derive(Parser)]
struct BuildArgs {
    /// Roster file: JSON array of registration rows
    #[arg(long)]
    roster: PathBuf,

    /// Number of rounds including the final (3-6)
    #[arg(long)]
    rounds: Option<usize>,

    /// Seed fixing every draw in the plan. Defaults to a timestamp-based
    /// value, printed so the build can be reproduced.
    #[arg(long)]
    seed: Option<String>,

    /// Category file (JSON); registrations failing its eligibility
    /// checks are dropped before the build
    #[arg(long)]
    category: Option<PathBuf>,

    /// Event date (YYYY-MM-DD), required with --category for the age check
    #[arg(long)]
    event_date: Option<String>,

    /// Output JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Show progress during execution
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/heatsheet/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct StandingsArgs {
    /// Roster file: JSON array of registration rows
    #[arg(long)]
    roster: PathBuf,

    /// Results file: JSON array of recorded heat results
    #[arg(long)]
    results: PathBuf,

    /// Number of rounds including the final (3-6); results from the last
    /// round are excluded from the standings
    #[arg(long)]
    rounds: Option<usize>,

    /// How many standings positions qualify for the final
    #[arg(long)]
    final_slots: Option<usize>,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Show progress during execution
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/heatsheet/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct FinalArgs {
    /// Roster file: JSON array of registration rows
    #[arg(long)]
    roster: PathBuf,

    /// Results file: JSON array of recorded heat results
    #[arg(long)]
    results: PathBuf,

    /// Number of rounds including the final (3-6)
    #[arg(long)]
    rounds: Option<usize>,

    /// How many standings positions qualify for the final
    #[arg(long)]
    final_slots: Option<usize>,

    /// Race seed; required for the random draw, unused with --gate-choice
    #[arg(long)]
    seed: Option<String>,

    /// Ranked gate choice instead of a random draw
    #[arg(long)]
    gate_choice: bool,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Show progress during execution
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/heatsheet/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build(args) => run_build(args),
        Commands::Standings(args) => run_standings(args),
        Commands::Final(args) => run_final(args),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default round count, points table, etc.");
        }
    }
}

fn load_cfg(path_override: Option<&PathBuf>) -> HeatsheetConfig {
    let config_path = path_override.cloned().unwrap_or_else(config::config_path);
    config::load_config(&config_path)
}

fn points_table(cfg: &HeatsheetConfig) -> PointsTable {
    match &cfg.points {
        Some(values) => PointsTable::from_places(values)
            .unwrap_or_else(|e| bail(format!("Invalid points table in config: {e}"))),
        None => PointsTable::default(),
    }
}

fn default_seed() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("race-{secs}")
}

fn run_build(args: BuildArgs) {
    let cfg = load_cfg(args.config.as_ref());
    let round_count = args.rounds.or(cfg.rounds).unwrap_or(DEFAULT_ROUND_COUNT);
    let seed = args.seed.clone().unwrap_or_else(default_seed);

    let mut entries = parse::load_roster(&args.roster);

    if let Some(ref category_path) = args.category {
        let category = parse::load_category(category_path);
        let event_date = args
            .event_date
            .as_deref()
            .unwrap_or_else(|| bail("--event-date is required with --category"));
        let event_date: NaiveDate = event_date.parse().unwrap_or_else(|_| {
            bail(format!("Invalid --event-date \"{event_date}\", expected YYYY-MM-DD"))
        });
        let before = entries.len();
        entries.retain(|e| category.is_eligible(&e.competitor, event_date));
        if args.verbose {
            eprintln!(
                "{} of {before} registrations eligible for {}",
                entries.len(),
                category.name,
            );
        }
    }

    let roster = order_roster(&entries);

    let mut race = Race::new(RaceConfig {
        round_count,
        seed: seed.clone(),
    })
    .unwrap_or_else(|e| bail(e));
    if let Err(e) = race.build(&roster) {
        bail(e);
    }

    if args.verbose {
        let heat_count: usize = race.rounds().iter().map(|r| r.heats.len()).sum();
        eprintln!(
            "Built {} rounds ({heat_count} heats) for {} riders with seed \"{seed}\"",
            race.rounds().len(),
            roster.len(),
        );
    }

    if args.json {
        output::print_plan_json(race.rounds(), &roster, &seed);
    } else {
        output::print_plan_table(race.rounds(), &roster, &seed);
    }
}

/// Shared by `standings` and `final`: load both files, rank the riders.
fn compute_from_files(
    roster_path: &PathBuf,
    results_path: &PathBuf,
    round_count: usize,
    final_slot_count: usize,
    cfg: &HeatsheetConfig,
    verbose: bool,
) -> (Vec<Competitor>, Vec<Standing>) {
    let entries = parse::load_roster(roster_path);
    let roster = order_roster(&entries);
    let results = parse::load_results(results_path, round_count);
    let points = points_table(cfg);

    let standings = compute_standings(
        &roster,
        &results,
        &points,
        &StandingsOptions { final_slot_count },
    )
    .unwrap_or_else(|e| bail(e));

    if verbose {
        eprintln!(
            "{} riders ranked from {} recorded results",
            standings.len(),
            results.len(),
        );
    }
    (roster, standings)
}

fn run_standings(args: StandingsArgs) {
    let cfg = load_cfg(args.config.as_ref());
    let round_count = args.rounds.or(cfg.rounds).unwrap_or(DEFAULT_ROUND_COUNT);
    let final_slots = args
        .final_slots
        .or(cfg.final_slots)
        .unwrap_or(heatsheet_core::constants::DEFAULT_FINAL_SLOTS);

    let (roster, standings) = compute_from_files(
        &args.roster,
        &args.results,
        round_count,
        final_slots,
        &cfg,
        args.verbose,
    );

    if args.json {
        output::print_standings_json(&standings, &roster);
    } else {
        output::print_standings_table(&standings, &roster);
    }
}

fn run_final(args: FinalArgs) {
    let cfg = load_cfg(args.config.as_ref());
    let round_count = args.rounds.or(cfg.rounds).unwrap_or(DEFAULT_ROUND_COUNT);
    let final_slots = args
        .final_slots
        .or(cfg.final_slots)
        .unwrap_or(heatsheet_core::constants::DEFAULT_FINAL_SLOTS);

    let (roster, standings) = compute_from_files(
        &args.roster,
        &args.results,
        round_count,
        final_slots,
        &cfg,
        args.verbose,
    );

    let gate_choice = args.gate_choice || cfg.gate_choice_final.unwrap_or(false);
    let mode = if gate_choice {
        FinalDrawMode::GateChoice
    } else {
        FinalDrawMode::Random
    };
    let seed = match args.seed {
        Some(seed) => seed,
        None if gate_choice => String::new(), // gate choice draws nothing
        None => bail("--seed is required for a random final draw"),
    };

    let qualifiers = final_qualifiers(&standings);
    let lanes = assign_final_lanes(&qualifiers, mode, &seed).unwrap_or_else(|e| bail(e));

    if args.verbose {
        let mode_name = if gate_choice { "gate choice" } else { "random draw" };
        eprintln!("{} qualifiers, lanes by {mode_name}", qualifiers.len());
    }

    if args.json {
        output::print_final_json(&lanes, &roster);
    } else {
        output::print_final_table(&lanes, &roster);
    }
}
