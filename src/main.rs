mod commands;
mod logging;
mod prompt;
mod settings;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use tracing::debug;

use crate::prompt::TermPrompter;
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "footprint-tariff",
    about = "Annual carbon footprint with offset cost, and tiered electricity bills.",
    version
)]
struct Cli {
    /// TOML settings file (log_level, color, json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive carbon footprint calculator
    Carbon,
    /// Interactive electricity bill generator
    Bill,
    /// Price a single bill without starting a session
    Quote {
        /// Consumer type: 1/domestic, 2/commercial, 3/industrial
        #[arg(long)]
        category: String,
        /// Units consumed
        #[arg(long, allow_negative_numbers = true)]
        units: i64,
    },
    /// Footprint from flags without starting a session
    Estimate {
        /// Vehicle code: 1 Petrol Car, 2 Diesel Car, 3 Motorbike, 4 Bus, 5 Train, 6 Flight
        #[arg(long, requires = "km", allow_negative_numbers = true)]
        vehicle: Option<i64>,
        /// Annual kilometres for --vehicle
        #[arg(long, requires = "vehicle", allow_negative_numbers = true)]
        km: Option<f64>,
        /// Annual electricity consumption in kWh
        #[arg(long, allow_negative_numbers = true)]
        kwh: Option<f64>,
        /// Diet code: 1 Meat heavy, 2 Average, 3 Vegetarian, 4 Vegan
        #[arg(long, allow_negative_numbers = true)]
        diet: Option<i64>,
    },
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.apply_flags(cli.json, cli.no_color);
    logging::init(&settings.log_level, cli.verbose);
    if !settings.color {
        colored::control::set_override(false);
    }
    debug!(?settings, "settings loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Carbon => {
            commands::carbon::run_session(&mut TermPrompter, &mut out, &settings).map(|_| ())
        }
        Command::Bill => {
            commands::bill::run_session(&mut TermPrompter, &mut out, &settings).map(|_| ())
        }
        Command::Quote { category, units } => {
            commands::bill::run_quote(&mut out, &settings, &category, units)
        }
        Command::Estimate {
            vehicle,
            km,
            kwh,
            diet,
        } => {
            let transport = vehicle.zip(km);
            commands::carbon::run_estimate(&mut out, &settings, transport, kwh, diet)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}: {:#}", "Error".red(), e);
        std::process::exit(1);
    }
}
