use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use democracy_score::config::{Config, ScoringWeights};
use democracy_score::error::DsResult;
use democracy_score::scorer::Scorer;
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with scoring weights; explicit flags still win
    #[arg(global = true, long)]
    weights: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a single history file
    Score(cmd::score::ScoreArgs),
    /// Score one user from a directory of histories
    Profile(cmd::profile::ProfileArgs),
    /// Score every user in a directory and rank them
    Batch(cmd::batch::BatchArgs),
    /// Score a seeded synthetic history
    Simulate(cmd::simulate::SimulateArgs),
    /// Print the tag -> dimension table
    Tags,
}

fn resolve_config(cli: &Cli, matches: &ArgMatches) -> Option<Config> {
    let (name, config) = match &cli.command {
        Commands::Score(args) => ("score", &args.config),
        Commands::Profile(args) => ("profile", &args.config),
        Commands::Batch(args) => ("batch", &args.config),
        Commands::Simulate(args) => ("simulate", &args.config),
        Commands::Tags => return None,
    };
    let mut config = config.clone();

    if let Some(path) = &cli.weights {
        info!("Loading Weights from: {}", path);
        let mut file_weights = ScoringWeights::load_from_file(path).unwrap_or_else(|e| {
            error!("Failed to load weights '{}': {}", path, e);
            process::exit(1);
        });
        // Arguments like --weight-balance live in the subcommand's matches.
        if let Some(sub_matches) = matches.subcommand_matches(name) {
            file_weights.merge_from_cli(&config.weights, sub_matches);
        }
        config.weights = file_weights;
    } else {
        info!("No external weights loaded. Using embedded defaults.");
    }

    Some(config)
}

fn execute(command: Commands, scorer: Arc<Scorer>) -> DsResult<()> {
    match command {
        Commands::Score(args) => cmd::score::run(args, scorer),
        Commands::Profile(args) => cmd::profile::run(args, scorer),
        Commands::Batch(args) => cmd::batch::run(args, scorer),
        Commands::Simulate(args) => cmd::simulate::run(args, scorer),
        Commands::Tags => {
            reports::print_tag_table();
            Ok(())
        }
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let scorer = match resolve_config(&cli, &matches) {
        Some(config) => match Scorer::new(&config) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                error!("FATAL ERROR INITIALIZING SCORER: {}", e);
                process::exit(1);
            }
        },
        None => Arc::new(Scorer::default()),
    };

    if let Err(e) = execute(cli.command, scorer) {
        error!("{}", e);
        process::exit(1);
    }
}
