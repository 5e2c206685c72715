// Rust Countdown Application
// Main entry point

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use env_logger::Env;

use rust_countdown::models::countdown_event::{
    CountdownEvent, EventCategory, EventDraft, EventError, EventId,
};
use rust_countdown::services::countdown::CountdownStatus;
use rust_countdown::services::event::EventService;
use rust_countdown::services::settings::{resolve_data_dir, SettingsService};
use rust_countdown::services::storage::{open_store, EventStore};
use rust_countdown::ui::{self, parse_target_date, render_board, render_card};

#[derive(Parser)]
#[command(name = "rust-countdown")]
#[command(about = "Track your important events with live countdowns")]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the event store
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show active countdowns and past events (default)
    List,
    /// Show a single event
    Show {
        id: String,
    },
    /// Create a new countdown
    Add {
        /// Event title
        title: String,

        /// Target date (e.g. "2030-03-20", "2030-03-20 15:00" or RFC 3339)
        #[arg(short, long, value_parser = parse_target_date)]
        date: DateTime<Local>,

        /// birthday, holiday, work, personal or travel
        #[arg(short, long, default_value = "personal")]
        category: EventCategory,

        #[arg(long)]
        description: Option<String>,

        /// Custom icon shown instead of the category icon
        #[arg(long)]
        icon: Option<String>,
    },
    /// Change an existing countdown; omitted fields keep their values
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long, value_parser = parse_target_date)]
        date: Option<DateTime<Local>>,

        #[arg(short, long)]
        category: Option<EventCategory>,

        /// Pass an empty string to clear
        #[arg(long)]
        description: Option<String>,

        /// Pass an empty string to clear
        #[arg(long)]
        icon: Option<String>,
    },
    /// Delete a countdown
    Remove {
        id: String,
    },
    /// Live-updating board; Ctrl-C to exit
    Watch {
        /// Only watch these events
        ids: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_service = match &cli.config {
        Some(path) => SettingsService::new(path),
        None => SettingsService::from_default_location(),
    };
    let settings = settings_service.load()?;

    env_logger::Builder::from_env(Env::default().default_filter_or(settings.log_filter.clone()))
        .init();
    log::info!("Starting Rust Countdown");
    log::debug!("Settings loaded from {}", settings_service.path().display());

    let data_dir = resolve_data_dir(&settings, cli.data_dir.as_deref());
    let store = open_store(settings.storage, &data_dir)?;
    let mut service = EventService::load(store, settings.seed_sample_events, Local::now())?;
    let date_format = settings.date_format;

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => {
            let now = Local::now();
            let cards: Vec<_> = service
                .events()
                .iter()
                .map(|event| (event, CountdownStatus::at(event, now)))
                .collect();
            print!("{}", render_board(&cards, now, &date_format));
        }
        Commands::Show { id } => {
            let id = EventId(id);
            let event = service.get(&id).ok_or(EventError::UnknownEvent(id.clone()))?;
            let now = Local::now();
            print!("{}", render_card(event, &CountdownStatus::at(event, now), now, &date_format));
        }
        Commands::Add {
            title,
            date,
            category,
            description,
            icon,
        } => {
            let draft = EventDraft {
                title,
                description,
                target_date: date,
                category,
                icon,
            };
            let id = service.add(draft, Local::now())?;
            println!("Added countdown {id}");
        }
        Commands::Edit {
            id,
            title,
            date,
            category,
            description,
            icon,
        } => {
            let id = EventId(id);
            let mut draft = service
                .get(&id)
                .map(|event| event.to_draft())
                .ok_or(EventError::UnknownEvent(id.clone()))?;
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(date) = date {
                draft.target_date = date;
            }
            if let Some(category) = category {
                draft.category = category;
            }
            if description.is_some() {
                draft.description = description;
            }
            if icon.is_some() {
                draft.icon = icon;
            }
            service.update(&id, draft)?;
            println!("Updated countdown {id}");
        }
        Commands::Remove { id } => {
            let id = EventId(id);
            if !service.remove(&id)? {
                return Err(EventError::UnknownEvent(id).into());
            }
            println!("Removed countdown {id}");
        }
        Commands::Watch { ids } => {
            let events = select_events(&service, &ids)?;
            ui::watch(events, date_format).await?;
        }
    }

    Ok(())
}

fn select_events<S: EventStore>(
    service: &EventService<S>,
    ids: &[String],
) -> Result<Vec<CountdownEvent>> {
    if ids.is_empty() {
        return Ok(service.events().to_vec());
    }
    ids.iter()
        .map(|id| {
            let id = EventId(id.clone());
            service
                .get(&id)
                .cloned()
                .ok_or_else(|| anyhow::Error::from(EventError::UnknownEvent(id)))
        })
        .collect()
}
