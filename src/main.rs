use clap::Parser;
use footprint::args::{Args, Command};
use footprint::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            match commands::alert(&e) {
                Some(alert) => eprintln!("{alert}"),
                None => error!("{e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Calc(calc_args) => {
            let config = Config::load(args.common().config()).await?;
            let out = commands::calc(&config, calc_args)?;
            if calc_args.json() {
                out.print_json()?
            } else {
                out.print()
            }
        }

        Command::Session => {
            let config = Config::load(args.common().config()).await?;
            commands::session(&config).await?.print()
        }

        Command::Factors(factors_args) => {
            let config = Config::load(args.common().config()).await?;
            let out = commands::factors(&config)?;
            if factors_args.json() {
                out.print_json()?
            } else {
                out.print()
            }
        }

        Command::Init(init_args) => commands::init(init_args.path()).await?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
