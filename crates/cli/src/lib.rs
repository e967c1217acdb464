pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "comparo",
    about = "Comparo aggregation engine CLI",
    long_about = "Run category searches against the comparison aggregation engine, inspect the category catalog, and review effective configuration.",
    after_help = "Examples:\n  comparo search food-delivery pizza --location Koramangala\n  comparo search flights \"delhi to goa\" --departure-date 2026-09-12 --passengers 2 --json\n  comparo categories\n  comparo config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run one aggregated search for a category and query")]
    Search {
        category: String,
        query: String,
        #[arg(long, help = "Location hint, e.g. a neighbourhood or city")]
        location: Option<String>,
        #[arg(long, help = "Departure date (YYYY-MM-DD) for travel categories")]
        departure_date: Option<NaiveDate>,
        #[arg(long, help = "Return date (YYYY-MM-DD) for travel categories")]
        return_date: Option<NaiveDate>,
        #[arg(long, help = "Passenger count for travel categories")]
        passengers: Option<u32>,
        #[arg(long, help = "Seed the pseudo-random source for reproducible output")]
        seed: Option<u64>,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "List catalog categories with platform counts and routing kind")]
    Categories,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Search {
            category,
            query,
            location,
            departure_date,
            return_date,
            passengers,
            seed,
            json,
        } => commands::search::run(commands::search::SearchArgs {
            category,
            query,
            location,
            departure_date,
            return_date,
            passengers,
            seed,
            json,
        }),
        Command::Categories => {
            commands::CommandResult { exit_code: 0, output: commands::categories::run() }
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
