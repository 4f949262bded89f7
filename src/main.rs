// Calendar Layout
// Command line entry point

mod cli;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;

use calendar_layout::models::event::{Event, EventModel};
use calendar_layout::models::grid::{ContainerBounds, PointerPosition, TimeGridData};
use calendar_layout::models::settings::LayoutSettings;
use calendar_layout::services::grid::position::GridPositionFinder;
use calendar_layout::services::grid::{create_day_grid, create_week_grid};
use calendar_layout::services::layout::{layout_time_view, layout_week, RenderedEvent};
use calendar_layout::services::settings::SettingsService;

use cli::{Cli, Commands};

#[derive(Serialize)]
struct DayOutput {
    date: NaiveDate,
    events: Vec<RenderedEvent>,
}

#[derive(Serialize)]
struct LayoutOutput {
    grid: TimeGridData,
    days: Vec<DayOutput>,
}

fn settings_service(config: Option<&Path>) -> SettingsService {
    match config {
        Some(path) => SettingsService::new(path),
        None => SettingsService::with_default_path(),
    }
}

fn load_events(path: &Path) -> Result<Vec<EventModel>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read events from {}", path.display()))?;
    let events: Vec<Event> = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse events from {}", path.display()))?;

    let total = events.len();
    let models: Vec<EventModel> = events
        .into_iter()
        .filter_map(|event| {
            let title = event.title.clone();
            match EventModel::new(event) {
                Ok(model) => Some(model),
                Err(e) => {
                    log::warn!("Skipping event '{}': {}", title, e);
                    None
                }
            }
        })
        .collect();

    log::info!("Loaded {} of {} events from {}", models.len(), total, path.display());
    Ok(models)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", output);
    Ok(())
}

fn grid_for(date: NaiveDate, day: bool, settings: &LayoutSettings) -> TimeGridData {
    if day {
        create_day_grid(date, settings)
    } else {
        create_week_grid(date, settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    let service = settings_service(cli.config.as_deref());
    let settings = service.get().context("failed to load settings")?;
    log::debug!("Using settings from {}", service.path().display());

    match cli.command {
        Commands::Layout { events, date, day } => {
            let models = load_events(&events)?;
            let layout = if day {
                layout_time_view(&models, &[date], &settings)
            } else {
                layout_week(&models, date, &settings)
            };

            let days = layout
                .days
                .iter()
                .map(|day_layout| DayOutput {
                    date: day_layout.date,
                    events: day_layout.events().map(RenderedEvent::from).collect(),
                })
                .collect();

            print_json(&LayoutOutput {
                grid: layout.grid,
                days,
            })?;
        }
        Commands::Grid { date, day } => {
            print_json(&grid_for(date, day, &settings))?;
        }
        Commands::Locate {
            date,
            x,
            y,
            width,
            height,
            left,
            top,
        } => {
            let grid = create_week_grid(date, &settings);
            let finder = GridPositionFinder::for_grid(&grid, ContainerBounds::new(left, top, width, height));
            print_json(&finder.find(PointerPosition::new(x, y)))?;
        }
        Commands::Settings { save } => {
            let output = toml::to_string_pretty(&settings).context("failed to serialize settings")?;
            print!("{}", output);
            if save {
                service.update(&settings)?;
                log::info!("Saved settings to {}", service.path().display());
            }
        }
    }

    Ok(())
}
