mod error;
mod paths;
mod render;
mod script;

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use relsheet_lib::GridConfig;
use relsheet_lib::Sheet;
use relsheet_lib::source::JsonFileSource;
use relsheet_lib::source::LoadOutcome;
use relsheet_lib::source::TableSource;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "relsheet", version, about = "Inspect and script relational sheets")]
struct Cli {
    /// Log level written to the log file (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,

    /// Log file (defaults to latest.log in the cache directory)
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Grid config file (defaults to config.json in the config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sheets in a data file
    Sheets {
        /// JSON sheet document
        data: PathBuf,
    },

    /// Print one sheet as a grid
    Show {
        /// JSON sheet document
        data: PathBuf,

        /// Sheet to show
        #[arg(long, short = 's')]
        sheet: String,

        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a script of interaction steps against a sheet
    #[command(after_help = "\
Example script:
  [
    { \"step\": \"click\", \"row\": 0, \"col\": 1, \"kind\": \"double\" },
    { \"step\": \"draft\", \"value\": \"Ada\" },
    { \"step\": \"commit\" },
    { \"step\": \"menu\", \"row\": 0, \"col\": 1, \"action\": \"duplicate_row\" }
  ]")]
    Replay {
        /// JSON sheet document
        data: PathBuf,

        /// Sheet to load before the first step
        #[arg(long, short = 's')]
        sheet: String,

        /// JSON array of steps
        #[arg(long, value_name = "FILE")]
        script: PathBuf,

        /// Print the final view model as JSON
        #[arg(long)]
        json: bool,

        /// Only print the final grid
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

fn init_logging(cli: &Cli) -> Result<(), CliError> {
    let path = match &cli.log_file {
        Some(path) => path.clone(),
        None => {
            paths::rotate_logs();
            let Some(path) = paths::log_file() else {
                return Ok(());
            };
            path
        }
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CliError::io(parent, e))?;
    }
    let file = File::create(&path).map_err(|e| CliError::io(&path, e))?;
    WriteLogger::init(cli.log_level, Config::default(), file)?;
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<GridConfig, CliError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match paths::config_file() {
            Some(path) if path.exists() => path,
            _ => return Ok(GridConfig::default()),
        },
    };
    let json = std::fs::read_to_string(&path).map_err(|e| CliError::io(&path, e))?;
    let config = serde_json::from_str(&json).map_err(|e| CliError::json("config", e))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

async fn open_sheet(config: GridConfig, source: &dyn TableSource, name: &str) -> Result<Sheet, CliError> {
    let mut sheet = Sheet::new(config);
    match sheet.load_table(source, name).await {
        LoadOutcome::Applied { .. } => Ok(sheet),
        LoadOutcome::Failed { error } => Err(CliError::Load {
            name: name.to_string(),
            error,
        }),
        LoadOutcome::Stale => Err(CliError::Load {
            name: name.to_string(),
            error: "superseded".to_string(),
        }),
    }
}

fn print_view(sheet: &Sheet, json: bool) -> Result<(), CliError> {
    let view = sheet.view();
    if json {
        let text = serde_json::to_string_pretty(&view).map_err(|e| CliError::json("view", e))?;
        println!("{}", text);
    } else {
        print!("{}", render::render_grid(&view));
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Sheets { data } => {
            let source = JsonFileSource::new(data);
            let summaries = source.list_tables().await?;
            print!("{}", render::render_summaries(&summaries));
        }
        Commands::Show { data, sheet, json } => {
            let source = JsonFileSource::new(data);
            let sheet = open_sheet(config, &source, &sheet).await?;
            print_view(&sheet, json)?;
        }
        Commands::Replay {
            data,
            sheet,
            script,
            json,
            quiet,
        } => {
            let source = JsonFileSource::new(data);
            let mut sheet = open_sheet(config, &source, &sheet).await?;

            let text = tokio::fs::read_to_string(&script)
                .await
                .map_err(|e| CliError::io(&script, e))?;
            let steps = script::parse_script(&text)?;

            for (index, step) in steps.iter().enumerate() {
                let report = step.apply(&mut sheet, &source).await;
                log::info!("Step {} ({}): {}", index + 1, step.name(), report);
                if !quiet {
                    println!("{:>3}. {}: {}", index + 1, step.name(), report);
                }
            }
            if !quiet {
                println!();
            }
            print_view(&sheet, json)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli) {
        eprintln!("Warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
