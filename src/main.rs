use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use league_engine::config::EngineConfig;
use league_engine::engine::{rate_season, run_season, SeasonInputs};
use league_engine::storage::{
    read_identities, read_match_records, read_priors, read_rosters, write_report,
};

#[derive(Parser)]
#[command(name = "league-engine")]
#[command(about = "Rating and division assignment engine for multi-day league seasons")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full season pipeline: rate players, roll up teams, seed divisions
    Run {
        /// Match-day records (JSON array)
        #[arg(long)]
        records: PathBuf,

        /// Team rosters (JSON array)
        #[arg(long)]
        rosters: PathBuf,

        /// Alias table (JSON array of identities)
        #[arg(long)]
        aliases: PathBuf,

        /// Prior-season ratings (JSON object)
        #[arg(long)]
        priors: Option<PathBuf>,

        /// Write the season report here
        #[arg(long)]
        out: Option<PathBuf>,

        /// Compute and print but don't write the report
        #[arg(long)]
        dry_run: bool,
    },

    /// Rate players only
    Rate {
        /// Match-day records (JSON array)
        #[arg(long)]
        records: PathBuf,

        /// Alias table (JSON array of identities)
        #[arg(long)]
        aliases: PathBuf,

        /// Prior-season ratings (JSON object)
        #[arg(long)]
        priors: Option<PathBuf>,

        /// How many ranked players to print (default all)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Seed divisions and print the resulting partition
    Seed {
        /// Match-day records (JSON array)
        #[arg(long)]
        records: PathBuf,

        /// Team rosters (JSON array)
        #[arg(long)]
        rosters: PathBuf,

        /// Alias table (JSON array of identities)
        #[arg(long)]
        aliases: PathBuf,

        /// Prior-season ratings (JSON object)
        #[arg(long)]
        priors: Option<PathBuf>,
    },

    /// Validate the configuration file and exit
    CheckConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting league-engine v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Run {
            records,
            rosters,
            aliases,
            priors,
            out,
            dry_run,
        } => {
            let config = load_config(&cli.config)?;
            let inputs = load_inputs(&records, Some(&rosters), &aliases, priors.as_deref())?;
            let report = run_season(&inputs, &config)?;

            println!("\n=== Season Results ===");
            println!("Players rated:    {}", report.players.len());
            println!("Unrated:          {}", report.unrated.len());
            println!("Teams:            {}", report.teams.len());
            println!("Divisions:        {}", report.assignment.divisions.len());

            for failure in &report.unrated {
                println!("  unrated {} — {}", failure.name, failure.reason);
            }
            for team in &report.teams {
                for warning in &team.warnings {
                    println!("  warning [{}] {}", team.name, warning);
                }
            }
            print_assignment(&report.assignment);

            match out {
                Some(path) if !dry_run => {
                    write_report(&path, &report)?;
                    println!("\nReport written to {}", path.display());
                }
                Some(_) => println!("\n(dry run - no report written)"),
                None => {}
            }
        }
        Commands::Rate {
            records,
            aliases,
            priors,
            limit,
        } => {
            let config = load_config(&cli.config)?;
            let inputs = load_inputs(&records, None, &aliases, priors.as_deref())?;
            let outcome = rate_season(&inputs, &config)?;

            println!("\n=== Player Ratings ===");
            for rating in outcome.ratings.iter().take(limit.unwrap_or(usize::MAX)) {
                println!(
                    "  #{:<3} {:<24} {:>10.2}  ({} days, {} kills)",
                    rating.rank.unwrap_or(0),
                    rating.player,
                    rating.combined_rating,
                    rating.days_played,
                    rating.total_kills,
                );
            }
            for failure in &outcome.failures {
                println!("  unrated {} — {}", failure.name, failure.reason);
            }
        }
        Commands::Seed {
            records,
            rosters,
            aliases,
            priors,
        } => {
            let config = load_config(&cli.config)?;
            let inputs = load_inputs(&records, Some(&rosters), &aliases, priors.as_deref())?;
            let report = run_season(&inputs, &config)?;
            print_assignment(&report.assignment);
        }
        Commands::CheckConfig => {
            let config = EngineConfig::from_file(Path::new(&cli.config))
                .with_context(|| format!("configuration check failed for {}", cli.config))?;
            println!("Configuration OK: {}", cli.config);
            println!("  lobby tiers:  {}", config.scoring.lobby_bonus.len());
            println!("  tier labels:  {}", config.tiers.len());
            println!("  divisions:    {}", config.schedule.divisions.len());
        }
    }

    Ok(())
}

/// Load the configuration file, falling back to built-in defaults when the
/// default path doesn't exist.
fn load_config(path: &str) -> Result<EngineConfig> {
    if Path::new(path).exists() {
        Ok(EngineConfig::from_file(Path::new(path))
            .with_context(|| format!("failed to load configuration from {}", path))?)
    } else {
        tracing::info!(path, "no configuration file, using built-in defaults");
        Ok(EngineConfig::default())
    }
}

fn load_inputs(
    records: &Path,
    rosters: Option<&Path>,
    aliases: &Path,
    priors: Option<&Path>,
) -> Result<SeasonInputs> {
    Ok(SeasonInputs {
        records: read_match_records(records)?,
        identities: read_identities(aliases)?,
        rosters: match rosters {
            Some(path) => read_rosters(path)?,
            None => Vec::new(),
        },
        priors: match priors {
            Some(path) => read_priors(path)?,
            None => Default::default(),
        },
    })
}

fn print_assignment(assignment: &league_engine::DivisionAssignment) {
    println!("\n=== Division Seeding ===");
    for division in &assignment.divisions {
        println!(
            "Division {} ({}) — {} teams, avg rating {:.2}",
            division.index,
            division.scheduled_day,
            division.stats.count,
            division.stats.avg_rating,
        );
        for team in &division.teams {
            println!("  {:<24} {:>10.2}  [{}]", team.name, team.rating, team.tier);
        }
    }
}
