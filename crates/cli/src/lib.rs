use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use wayfinder_navigator::{NavigatorError, Wayfinder};
use wayfinder_protocol::{serialize_json, CommandResponse, ErrorEnvelope};

mod render;

/// Exit status for a request the core answered with an error
const EXIT_REQUEST_FAILED: u8 = 1;
/// Exit status for a floor plan that could not be loaded
const EXIT_BAD_FLOOR_PLAN: u8 = 2;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "wayfinder")]
#[command(about = "Indoor wayfinding for the library floor plan", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Floor plan document (JSON or TOML); the bundled library plan by default
    #[arg(long, global = true, env = "WAYFINDER_FLOOR_PLAN")]
    floor_plan: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// List every location with its display label
    Locations,

    /// Resolve a place name to a location
    Resolve {
        /// Free-text place name
        text: String,
    },

    /// Guess where someone is from a description of their surroundings
    Infer {
        description: String,
    },

    /// Route to a place, from another place or the main entrance
    Route {
        /// Destination, as free text
        to: String,

        /// Start, as free text
        #[arg(long)]
        from: Option<String>,
    },

    /// Show which locations and hallways a path lights up
    Highlight {
        /// Node ids in path order
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Answer a routing question ("how do I get from 1south to the info commons?")
    Ask {
        question: String,
    },

    /// Help someone who does not know where they are
    Lost {
        description: String,

        /// Where they want to go; the main entrance by default
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

pub fn main_entry() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let wayfinder = match load_wayfinder(cli.floor_plan.as_ref()) {
        Ok(wayfinder) => wayfinder,
        Err(err) => {
            log::error!("Failed to load floor plan: {err}");
            let envelope = ErrorEnvelope {
                code: err.code().to_string(),
                message: err.to_string(),
                hint: Some("Check the --floor-plan document or WAYFINDER_FLOOR_PLAN.".to_string()),
                suggestions: Vec::new(),
            };
            emit_error::<()>(cli.format, &envelope)?;
            return Ok(ExitCode::from(EXIT_BAD_FLOOR_PLAN));
        }
    };

    let format = cli.format;
    match cli.command {
        Commands::Locations => {
            let locations = wayfinder.list_locations();
            respond(&wayfinder, format, Ok(locations), |l| Ok(render::locations(l)))
        }
        Commands::Resolve { text } => {
            let result = wayfinder.resolve_location(&text);
            respond(&wayfinder, format, result, |r| Ok(render::resolution(r)))
        }
        Commands::Infer { description } => {
            let inference = wayfinder.infer_location(&description);
            respond(&wayfinder, format, Ok(inference), |i| Ok(render::inference(i)))
        }
        Commands::Route { to, from } => {
            let result = wayfinder.route_between(from.as_deref(), &to);
            respond(&wayfinder, format, result, |r| render::route(&wayfinder, r))
        }
        Commands::Highlight { ids } => {
            let result = wayfinder.highlight_and_project(&ids);
            respond(&wayfinder, format, result, |h| Ok(render::highlight(h)))
        }
        Commands::Ask { question } => {
            let result = wayfinder.ask(&question);
            respond(&wayfinder, format, result, |r| render::route(&wayfinder, r))
        }
        Commands::Lost { description, to } => {
            let result = wayfinder.assist_lost_user(&description, to.as_deref());
            respond(&wayfinder, format, result, |r| render::lost_user(&wayfinder, r))
        }
    }
}

fn load_wayfinder(path: Option<&PathBuf>) -> wayfinder_navigator::Result<Wayfinder> {
    match path {
        Some(path) => {
            let wayfinder = Wayfinder::from_file(path)?;
            log::info!(
                "Loaded floor plan {} ({} locations, {} hallways)",
                path.display(),
                wayfinder.plan().node_count(),
                wayfinder.plan().edge_count()
            );
            Ok(wayfinder)
        }
        None => Ok(Wayfinder::builtin()),
    }
}

fn respond<T: Serialize>(
    wayfinder: &Wayfinder,
    format: OutputFormat,
    result: wayfinder_navigator::Result<T>,
    text: impl FnOnce(&T) -> Result<String>,
) -> Result<ExitCode> {
    match result {
        Ok(data) => {
            let out = match format {
                OutputFormat::Json => serialize_json(&CommandResponse::ok(data))
                    .context("Failed to serialize response")?,
                OutputFormat::Text => text(&data)?,
            };
            print_stdout(&out)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            log_request_error(&err);
            emit_error::<T>(format, &wayfinder.error_envelope(&err))?;
            Ok(ExitCode::from(EXIT_REQUEST_FAILED))
        }
    }
}

fn emit_error<T: Serialize>(format: OutputFormat, envelope: &ErrorEnvelope) -> Result<()> {
    let out = match format {
        OutputFormat::Json => serialize_json(&CommandResponse::<T>::error(envelope.clone()))
            .context("Failed to serialize error response")?,
        OutputFormat::Text => render::error(envelope),
    };
    print_stdout(&out)
}

fn log_request_error(err: &NavigatorError) {
    if err.is_user_facing() {
        log::debug!("Request failed: {err}");
    } else {
        log::warn!("Request failed ({}): {err}", err.code());
    }
}
