use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mktm::config::AppConfig;
use mktm::display::{render_leaderboard, render_races, render_welcome};
use mktm::lifecycle::{
    add_players, create_tournament, find_first_incomplete_race, lazy_player_names,
    record_race_result, TournamentError,
};
use mktm::prompt::Prompter;
use mktm::schedule::Progress;
use mktm::storage::{StorageError, TournamentFile};

#[derive(Parser)]
#[command(name = "mktm")]
#[command(about = "Mario Kart Tournament Maker")]
#[command(version)]
struct Cli {
    /// Path of the tournament save file to write to / read from
    #[arg(short, long, global = true, env = mktm::config::TOURNAMENT_FILE_ENV)]
    file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, default_value = "./mktm.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new tournament
    New {
        /// Number of rounds of the tournament
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Names of the players. If none provided, will ask for them before starting
        #[arg(short, long, num_args = 1..)]
        players: Vec<String>,

        /// Create the tournament with this many players named Player1..PlayerN
        #[arg(short, long, conflicts_with = "players")]
        lazy: Option<usize>,

        /// Replace an existing tournament file
        #[arg(long)]
        force: bool,
    },

    /// Display the races and their results
    Status,

    /// Enter the results of a race (default: first unfinished race)
    Results {
        /// Race number, starting at 1
        race: Option<usize>,
    },

    /// Register more players while the first round is running
    AddPlayers {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Display the leaderboard
    Leaderboard,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", format!("{e:#}").red());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config);

    // Initialize tracing
    let level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().ok().map(|c| c.log_level.clone()))
        .unwrap_or_else(|| "warn".to_string());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    let config = config.with_context(|| format!("Failed to load {}", cli.config.display()))?;
    let file = TournamentFile::new(cli.file.clone().unwrap_or_else(|| config.file.clone()));
    tracing::debug!("Using tournament file {:?}", file.path());

    match cli.command {
        Commands::New {
            rounds,
            players,
            lazy,
            force,
        } => {
            let rounds = rounds.unwrap_or(config.default_rounds);
            if rounds < 1 {
                return Err(TournamentError::InvalidRoundCount(rounds).into());
            }
            if file.exists() && !force {
                return Err(StorageError::AlreadyExists(file.path().to_path_buf()).into());
            }

            let names = if !players.is_empty() {
                players
            } else if let Some(count) = lazy {
                lazy_player_names(count)
            } else {
                let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
                match prompter.read_player_names()? {
                    Some(names) => {
                        println!("{}", "Tournament created!".bold());
                        names
                    }
                    None => {
                        println!("No players registered, nothing saved");
                        return Ok(());
                    }
                }
            };

            let tournament = create_tournament(names, rounds, &mut rand::thread_rng())?;
            file.create(&tournament, force)?;

            print!("{}", render_welcome(&tournament));
            print!("{}", render_races(&tournament));
            println!(
                "\nSuccessfully saved tournament to {}",
                file.path().display().to_string().bold()
            );
        }

        Commands::Status => {
            let tournament = load(&file)?;
            print!("{}", render_races(&tournament));
        }

        Commands::Results { race } => {
            let mut tournament = load(&file)?;

            let index = match race {
                Some(number) => number
                    .checked_sub(1)
                    .ok_or_else(|| anyhow::anyhow!("Wrong race nb: {}", number))?,
                None => find_first_incomplete_race(&tournament).ok_or_else(|| {
                    anyhow::anyhow!("No unfinished race in {}", file.path().display())
                })?,
            };

            let pending = tournament
                .races
                .get(index)
                .ok_or(TournamentError::RaceNotFound(index))?;
            if !pending.is_pending() {
                return Err(TournamentError::RaceAlreadyScored(index).into());
            }

            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
            let Some(scores) = prompter.read_scores(index + 1, pending)? else {
                println!("Results not saved");
                return Ok(());
            };

            // someone else may have used the file while we were prompting
            file.reload_races(&mut tournament)?;
            let progress =
                record_race_result(&mut tournament, index, &scores, &mut rand::thread_rng())?;
            file.save(&tournament)?;

            match progress {
                Progress::Finished => {
                    println!("\n{}", "Tournament completed!".bold());
                    print!("{}", render_leaderboard(&tournament));
                }
                Progress::RoundGenerated { round } => {
                    print!("{}", render_races(&tournament));
                    println!("{}", format!("Round {} is ready!", round + 1).bold());
                    println!("{}", "Tournament updated!".bold());
                }
                Progress::InProgress => {
                    print!("{}", render_races(&tournament));
                    println!("{}", "Tournament updated!".bold());
                }
            }
        }

        Commands::AddPlayers { names } => {
            let mut tournament = load(&file)?;
            let added = add_players(&mut tournament, names)?;
            file.save(&tournament)?;

            print!("{}", render_races(&tournament));
            println!("{}", format!("Added {} players", added.len()).bold());
        }

        Commands::Leaderboard => {
            let tournament = load(&file)?;
            print!("{}", render_leaderboard(&tournament));
        }
    }

    Ok(())
}

fn load(file: &TournamentFile) -> Result<mktm::Tournament> {
    file.load()
        .with_context(|| format!("Can't read file {}", file.path().display()))
}
