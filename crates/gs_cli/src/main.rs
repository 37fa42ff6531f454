//! Match telemetry query CLI
//!
//! Thin wrapper over `gs_core`: load a frame file, annotate it against the
//! region given on the command line, run one query, print the result.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gs_core::{
    DensitySink, GameStateTable, RegionSpec, Side, StagingParams, VERSION,
};
use gs_cli::{load_frames, TextDensitySink};

#[derive(Parser)]
#[command(name = "gs_cli")]
#[command(version = VERSION)]
#[command(about = "Run telemetry queries over a match frame file", long_about = None)]
struct Cli {
    /// Input frame file (.csv, .json or .jsonl)
    #[arg(long)]
    frames: PathBuf,

    /// Chokepoint polygon vertices as a JSON array of [x, y] pairs
    #[arg(long, default_value = "[[-1735,250],[-2024,398],[-2806,742],[-2472,1233],[-1565,580]]")]
    polygon: String,

    /// Minimum region z (inclusive)
    #[arg(long, default_value_t = 285.0)]
    z_min: f64,

    /// Maximum region z (inclusive)
    #[arg(long, default_value_t = 421.0)]
    z_max: f64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List distinct (round, player) entries observed inside the chokepoint
    Chokepoint {
        #[arg(long)]
        team: String,

        /// Side the team played: T or CT
        #[arg(long)]
        side: Side,
    },

    /// Average seconds until N weapon-qualified players stage in an area
    Staging {
        #[arg(long)]
        team: String,

        /// Side the team played: T or CT
        #[arg(long)]
        side: Side,

        /// Named map area, e.g. BombsiteB
        #[arg(long)]
        area: String,

        /// Qualifying weapon class; repeat for any-of matching
        #[arg(long = "class", required = true)]
        classes: Vec<String>,

        /// Distinct qualifying players required
        #[arg(long, default_value_t = 2)]
        min_players: usize,
    },

    /// Render a density grid of a team's alive presence in an area
    Density {
        #[arg(long)]
        team: String,

        /// Side the team played: T or CT
        #[arg(long)]
        side: Side,

        /// Named map area, e.g. BombsiteB
        #[arg(long)]
        area: String,

        /// Grid width in cells
        #[arg(long, default_value_t = 48)]
        columns: usize,

        /// Grid height in cells
        #[arg(long, default_value_t = 18)]
        rows: usize,

        /// Also write the sample document as JSON for an external renderer
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let rows = load_frames(&cli.frames)?;
    let vertices: Vec<(f64, f64)> = serde_json::from_str(&cli.polygon)
        .context("--polygon must be a JSON array of [x, y] pairs")?;
    let region = RegionSpec::new(vertices, cli.z_min, cli.z_max)?;
    let table = GameStateTable::new(rows, region)?;

    println!("📊 Annotated {} frames", table.len());

    match cli.command {
        Commands::Chokepoint { team, side } => run_chokepoint(&table, &team, side),
        Commands::Staging {
            team,
            side,
            area,
            classes,
            min_players,
        } => run_staging(&table, team, side, area, classes, min_players),
        Commands::Density {
            team,
            side,
            area,
            columns,
            rows,
            out,
        } => run_density(&table, &team, side, &area, columns, rows, out),
    }
}

fn run_chokepoint(table: &GameStateTable, team: &str, side: Side) -> Result<()> {
    let entries = table.chokepoint_usage(team, side);

    if entries.is_empty() {
        println!("No chokepoint usage observed for {} on {}", team, side);
        return Ok(());
    }

    println!("round  player            tick      seconds");
    for frame in &entries {
        println!(
            "{:>5}  {:<16}  {:>8}  {:>9.2}",
            frame.row.round_num, frame.row.player, frame.row.tick, frame.row.seconds
        );
    }

    let rounds: std::collections::BTreeSet<u32> =
        entries.iter().map(|f| f.row.round_num).collect();
    println!(
        "\n✅ {} distinct (round, player) entries across {} round(s)",
        entries.len(),
        rounds.len()
    );
    Ok(())
}

fn run_staging(
    table: &GameStateTable,
    team: String,
    side: Side,
    area: String,
    target_classes: Vec<String>,
    min_players: usize,
) -> Result<()> {
    let params = StagingParams {
        team,
        side,
        area,
        target_classes,
        min_players,
    };
    let report = table.staging_timer(&params)?;

    for round in &report.rounds {
        println!("round {:>3}: staged at {:.2}s", round.round_num, round.seconds);
    }

    match report.mean_seconds {
        Some(mean) => println!(
            "\n✅ {} on {} staged {} player(s) with {:?} in {} after {:.2}s on average ({} qualifying round(s))",
            params.team,
            params.side,
            params.min_players,
            params.target_classes,
            params.area,
            mean,
            report.rounds.len()
        ),
        None => println!(
            "No round had {} distinct {} players carrying {:?} in {}",
            params.min_players, params.team, params.target_classes, params.area
        ),
    }
    Ok(())
}

fn run_density(
    table: &GameStateTable,
    team: &str,
    side: Side,
    area: &str,
    columns: usize,
    rows: usize,
    out: Option<PathBuf>,
) -> Result<()> {
    let doc = table.density_doc(team, side, area)?;

    let mut sink = TextDensitySink::new(io::stdout().lock(), columns, rows);
    sink.render(&doc)?;

    if let Some(path) = out {
        std::fs::write(&path, serde_json::to_string_pretty(&doc)?)?;
        println!("\n📄 Density document written to {}", path.display());
    }
    Ok(())
}
