use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use clap::Parser;
use clap::Subcommand;
use colored::ColoredString;
use colored::Colorize;
use rota_configuration::SystemConfigurations;
use rota_dashboard::Dashboard;
use rota_dashboard::RosterStore;
use rota_dashboard::WorkerCard;
use rota_dashboard::card::Tone;
use rota_dashboard::logging::LogLevel;
use rota_dashboard::logging::setup_logging;
use rota_scheduling_environment::TimeRange;
use rota_scheduling_environment::WorkerId;

#[derive(Parser, Debug)]
#[command(name = "rota-dashboard", version, about = "Staff availability dashboard")]
struct Cli
{
    /// Overrides ROTA_TRACING_LEVEL.
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevel>,

    /// Roster file to use instead of the configured one.
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Show every worker, in today first.
    List
    {
        #[arg(long)]
        search: Option<String>,
        /// Evaluate at this instant (RFC 3339) instead of the current time.
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        #[arg(long)]
        json: bool,
    },
    Add
    {
        #[arg(long)]
        name: String,
        #[arg(long = "role")]
        roles: Vec<String>,
    },
    Remove
    {
        id: u32,
    },
    /// Set a worker's availability for one day, replacing any window already
    /// starting on that date.
    SetAvailability
    {
        #[arg(long)]
        name: String,
        /// Day in dd/mm/yyyy.
        #[arg(long, value_parser = parse_sheet_date)]
        date: NaiveDate,
        /// For example "08:00 - 16:00" or "8:00 AM — 4:30 PM".
        #[arg(long)]
        range: TimeRange,
    },
}

fn parse_sheet_date(value: &str) -> Result<NaiveDate, chrono::ParseError>
{
    NaiveDate::parse_from_str(value.trim(), "%d/%m/%Y")
}

fn main() -> Result<()>
{
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let _guard = setup_logging(cli.log_level)?;

    let system_configurations =
        SystemConfigurations::read_all_configs().context("Configuration could not be loaded")?;

    let roster_path = cli
        .roster
        .unwrap_or_else(|| system_configurations.load().storage.roster_path.clone());
    let store = RosterStore::new(roster_path);

    match cli.command {
        Commands::List { search, now, json } => {
            let roster = store.load()?;
            let dashboard = Dashboard::new(system_configurations);
            let cards = dashboard.cards(
                roster.into_workers(),
                now.unwrap_or_else(Utc::now),
                search.as_deref(),
            )?;

            if json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else {
                print_cards(&cards);
            }
        }
        Commands::Add { name, roles } => {
            let mut roster = store.load()?;
            let id = roster.add_worker(&name, roles, vec![])?;
            store.save(&roster)?;
            println!("Worker {} created with id {}", name.trim(), id);
        }
        Commands::Remove { id } => {
            let mut roster = store.load()?;
            let removed = roster.remove_worker(&WorkerId(id))?;
            store.save(&roster)?;
            println!("Worker {} ({}) deleted", removed.name, removed.id);
        }
        Commands::SetAvailability { name, date, range } => {
            let mut roster = store.load()?;
            let upload_zone = system_configurations.load().time_zones.upload;
            roster.set_day_availability(&name, date, &range, &upload_zone)?;
            store.save(&roster)?;
            println!(
                "{} - {} - {} - {}",
                date.format("%Y-%m-%d"),
                name.trim(),
                range.start.format("%H:%M"),
                range.end.format("%H:%M")
            );
        }
    }

    Ok(())
}

fn print_cards(cards: &[WorkerCard])
{
    if cards.is_empty() {
        println!("{}", "No workers found".dimmed());
        return;
    }

    for card in cards {
        let badge: ColoredString = match card.badge.tone() {
            Tone::Success => card.badge.label().green().bold(),
            Tone::Warning => card.badge.label().yellow().bold(),
            Tone::Secondary => card.badge.label().bright_black(),
        };
        let late = if card.late { " (late)" } else { "" };

        println!("{:>4}  {}  {}", card.id.0, card.name.bold(), badge);
        if !card.roles.is_empty() {
            println!("      {}", card.roles.join(", ").cyan());
        }
        println!("      {}{}", card.summary, late);
    }
}
