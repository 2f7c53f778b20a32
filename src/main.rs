//! NFL Prediction CLI
//!
//! Encodes feature tensors and generates predictions from JSON fixture files.

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use gridiron::encoding;
use gridiron::predict::inference::{format_prediction, PredictionEngine};
use gridiron::records::clean_player_record;
use gridiron::{Config, GridironError, Result, ValidationStatus};

#[derive(Parser)]
#[command(name = "gridiron")]
#[command(about = "NFL game prediction using feature tensors", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode records into feature vectors
    Encode {
        #[command(subcommand)]
        target: EncodeCommands,
    },
    /// Predict game or player outcomes
    Predict {
        #[command(subcommand)]
        target: PredictCommands,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Initialize a new project with default config
    Init,
}

#[derive(Subcommand)]
enum EncodeCommands {
    /// Encode a single player record (670 features)
    Player {
        /// Player record JSON file
        file: String,
        /// Write the vector to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
    /// Encode a roster (64 x 670 features, flattened)
    Roster {
        /// Roster JSON file (array of player records)
        file: String,
        #[arg(long)]
        output: Option<String>,
    },
    /// Encode a full game (85,810 features)
    Game {
        /// Home roster JSON file
        #[arg(long)]
        home: String,
        /// Away roster JSON file
        #[arg(long)]
        away: String,
        /// Game context JSON file
        #[arg(long)]
        context: String,
        #[arg(long)]
        output: Option<String>,
    },
    /// Encode a play (85,830 features)
    Play {
        #[arg(long)]
        home: String,
        #[arg(long)]
        away: String,
        #[arg(long)]
        context: String,
        /// Play state JSON file
        #[arg(long)]
        state: String,
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
enum PredictCommands {
    /// Predict a game outcome
    Game {
        #[arg(long)]
        home: String,
        #[arg(long)]
        away: String,
        #[arg(long)]
        context: String,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Predict a player stat line
    Player {
        /// Player record JSON file
        file: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Validate the configuration and report per-section status
    Validate,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Encode { target } => run_encode(target),
        Commands::Predict { target } => run_predict(target),
        Commands::Config { action } => match action {
            ConfigCommands::Validate => run_validate(&config),
        },
        Commands::Init => run_init(&cli.config),
    }
}

fn run_encode(target: EncodeCommands) -> Result<()> {
    match target {
        EncodeCommands::Player { file, output } => {
            let record = clean_player_record(load_value(&file)?);
            emit_vector(&encoding::encode_player(&record), output.as_deref())
        }
        EncodeCommands::Roster { file, output } => {
            let players = load_roster(&file)?;
            emit_vector(&encoding::encode_roster(&players), output.as_deref())
        }
        EncodeCommands::Game {
            home,
            away,
            context,
            output,
        } => {
            let home = load_roster(&home)?;
            let away = load_roster(&away)?;
            let context = load_value(&context)?;
            emit_vector(
                &encoding::encode_game(&home, &away, &context),
                output.as_deref(),
            )
        }
        EncodeCommands::Play {
            home,
            away,
            context,
            state,
            output,
        } => {
            let home = load_roster(&home)?;
            let away = load_roster(&away)?;
            let context = load_value(&context)?;
            let state = load_value(&state)?;
            emit_vector(
                &encoding::encode_play(&home, &away, &context, &state),
                output.as_deref(),
            )
        }
    }
}

fn run_predict(target: PredictCommands) -> Result<()> {
    let engine = PredictionEngine::new();

    match target {
        PredictCommands::Game {
            home,
            away,
            context,
            format,
        } => {
            let home = load_roster(&home)?;
            let away = load_roster(&away)?;
            let context = load_value(&context)?;

            let prediction = engine.predict_game(&home, &away, &context);
            match format {
                OutputFormat::Table => {
                    println!("{}", format_prediction(&prediction, "Home", "Away"))
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&prediction)?),
            }
            Ok(())
        }
        PredictCommands::Player { file } => {
            let record = clean_player_record(load_value(&file)?);
            let prediction = engine.predict_player(&record);
            println!("{}", serde_json::to_string_pretty(&prediction)?);
            Ok(())
        }
    }
}

fn run_validate(config: &Config) -> Result<()> {
    let report = config.validate();

    for section in &report.sections {
        println!(
            "  {:<10} {:<8} {}",
            section.name, section.status, section.message
        );
    }
    println!("\nOverall: {}", report.overall);

    if report.overall == ValidationStatus::Error {
        return Err(GridironError::Config("Configuration is invalid".to_string()));
    }
    Ok(())
}

fn run_init(config_path: &str) -> Result<()> {
    if std::path::Path::new(config_path).exists() {
        println!("Config already exists at {}", config_path);
        return Ok(());
    }

    Config::default().save(config_path)?;
    std::fs::create_dir_all("model")?;

    println!("Created default config at {}", config_path);
    println!("Created model/ directory");
    println!("\nNext steps:");
    println!("  1. Edit {} to customize settings", config_path);
    println!("  2. Run 'gridiron encode player <file>' to encode a record");
    println!("  3. Run 'gridiron predict game --home <h> --away <a> --context <c>'");
    Ok(())
}

/// Load a JSON value from a fixture file
fn load_value(path: &str) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a roster fixture: a JSON array of player records, cleaned
fn load_roster(path: &str) -> Result<Vec<Value>> {
    match load_value(path)? {
        Value::Array(records) => Ok(records.into_iter().map(clean_player_record).collect()),
        _ => Err(GridironError::Parse(format!(
            "Roster file {} must contain a JSON array of player records",
            path
        ))),
    }
}

/// Print a feature vector as a JSON array, or write it to a file
fn emit_vector(vector: &[f32], output: Option<&str>) -> Result<()> {
    let json = serde_json::to_string(vector)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("Wrote {} features to {}", vector.len(), path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
