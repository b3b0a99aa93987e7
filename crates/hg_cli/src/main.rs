//! Hoopgrid CLI
//!
//! Diagnostic tool driving the import and grid engine end-to-end:
//! import a league export file, print a summary, generate a puzzle,
//! or evaluate a single guess.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hg_core::{
    build_grid, cell_key, classify_label, evaluate, explain, import_league, AchievementId,
    CellSpec, Grid, GridConfig, League, Player, RandomTeams, RarityCache, RarityStrategy,
    SizeLimits, TeamsAndAchievements,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hg_cli")]
#[command(about = "Import league exports and generate 3x3 grid puzzles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of an imported league export
    Summary {
        /// League export file (.json or .json.gz)
        file: PathBuf,
    },

    /// Generate a grid and print each cell's rarest answers
    Grid {
        /// League export file (.json or .json.gz)
        file: PathBuf,

        /// Seed for reproducible generation
        #[arg(long)]
        seed: Option<u64>,

        /// Mix achievement criteria into the columns
        #[arg(long, default_value = "false")]
        achievements: bool,

        /// Answers previewed per cell
        #[arg(long, default_value = "3")]
        preview: usize,

        /// Rarity strategy: "count" or "win-shares"
        #[arg(long, default_value = "win-shares")]
        strategy: String,
    },

    /// Evaluate one guess against a row/column criterion pair
    Guess {
        /// League export file (.json or .json.gz)
        file: PathBuf,

        /// Row criterion: team name, abbreviation, or achievement label
        #[arg(long)]
        row: String,

        /// Column criterion: team name, abbreviation, or achievement label
        #[arg(long)]
        col: String,

        /// Guessed player name
        #[arg(long)]
        player: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Summary { file } => summary(&file),
        Commands::Grid { file, seed, achievements, preview, strategy } => {
            grid(&file, seed, achievements, preview, &strategy)
        }
        Commands::Guess { file, row, col, player } => guess(&file, &row, &col, &player),
    }
}

fn load_league(path: &Path) -> Result<League> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let hint = path.file_name().and_then(|name| name.to_str());
    Ok(import_league(&bytes, hint, &SizeLimits::default())?)
}

fn summary(path: &Path) -> Result<()> {
    let league = load_league(path)?;
    println!("Teams:   {}", league.teams.len());
    println!("Players: {}", league.players.len());
    match league.season_range {
        Some((lo, hi)) => println!("Seasons: {}-{}", lo, hi),
        None => println!("Seasons: none"),
    }
    for team in &league.teams {
        println!(
            "  [{:>3}] {} ({}) - {} players",
            team.id,
            team.display_name,
            team.abbreviation,
            league.roster_size(team.id)
        );
    }
    Ok(())
}

fn grid(
    path: &Path,
    seed: Option<u64>,
    achievements: bool,
    preview: usize,
    strategy: &str,
) -> Result<()> {
    let league = load_league(path)?;
    let config = GridConfig { seed, ..GridConfig::default() };
    let grid = if achievements {
        build_grid(&league, &config, &TeamsAndAchievements::default())?
    } else {
        build_grid(&league, &config, &RandomTeams)?
    };
    print_grid(&league, &grid, preview, parse_strategy(strategy)?);
    Ok(())
}

fn parse_strategy(name: &str) -> Result<RarityStrategy> {
    match name {
        "count" => Ok(RarityStrategy::CountPercentile),
        "win-shares" => Ok(RarityStrategy::WinShares),
        other => bail!("unknown rarity strategy: {} (expected \"count\" or \"win-shares\")", other),
    }
}

fn print_grid(league: &League, grid: &Grid, preview: usize, strategy: RarityStrategy) {
    println!("Grid {}", grid.id);
    println!("Columns: {}", grid.cols.iter().map(CellSpec::describe).collect::<Vec<_>>().join(" | "));
    let mut cache = RarityCache::new();
    for (r, row_spec) in grid.rows.iter().enumerate() {
        println!("Row: {}", row_spec.describe());
        for (c, col_spec) in grid.cols.iter().enumerate() {
            let cell = grid.cell(r, c);
            let players: Vec<&Player> =
                cell.iter().filter_map(|&id| league.player(id)).collect();
            let results = cache.get_or_compute(&cell_key(&grid.id, r, c), strategy, &players);
            let mut ranked: Vec<_> = results.values().collect();
            ranked.sort_by_key(|result| result.rank);
            let preview_text: Vec<String> = ranked
                .iter()
                .take(preview)
                .filter_map(|result| {
                    league
                        .player(result.player_id)
                        .map(|p| format!("{} ({})", p.name, result.score))
                })
                .collect();
            println!(
                "  x {}: {} answers; rarest: {}",
                col_spec.describe(),
                cell.len(),
                preview_text.join(", ")
            );
        }
    }
}

fn guess(path: &Path, row: &str, col: &str, player_name: &str) -> Result<()> {
    let league = load_league(path)?;
    let row_spec = resolve_spec(&league, row)?;
    let col_spec = resolve_spec(&league, col)?;
    let Some(player) = league.player_by_name(player_name) else {
        bail!("no player named {:?} in this league", player_name);
    };
    let outcome = evaluate(player, &row_spec, &col_spec);
    if outcome.correct {
        println!("Correct: {} satisfies both criteria", player.name);
    } else {
        println!("Incorrect ({})", match (outcome.row_pass, outcome.col_pass) {
            (true, false) => "row only",
            (false, true) => "column only",
            _ => "neither",
        });
        if let Some(text) = explain(player, &row_spec, &col_spec, outcome) {
            println!("{}", text);
        }
    }
    Ok(())
}

/// Team lookup by display name or abbreviation first, then the free-text
/// achievement classifier.
fn resolve_spec(league: &League, text: &str) -> Result<CellSpec> {
    if let Some(team) = league.teams.iter().find(|team| {
        team.display_name.eq_ignore_ascii_case(text) || team.abbreviation.eq_ignore_ascii_case(text)
    }) {
        return Ok(CellSpec::Team { team_id: team.id, team_name: team.display_name.clone() });
    }
    match classify_label(text) {
        AchievementId::Unknown => bail!("unrecognized criterion: {:?}", text),
        id => Ok(CellSpec::Achievement { id, label: text.to_owned() }),
    }
}
