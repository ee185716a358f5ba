use anyhow::Result;
use chrono::{Local, NaiveDate};
use colored::Colorize;
use dialoguer::{Input, Select};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_client::{
    config::Config,
    filter::FieldSelection,
    grid::{describe_from_state, GridDescription},
    selection::SelectionState,
    submission::{BookingForm, SubmissionError},
    ui, AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting seat-selection client");

    let state = AppState::new(config).expect("Failed to initialize application state");

    // Дефолты при загрузке: первый кинотеатр, если ничего не выбрано,
    // и сегодняшняя дата.
    let mut fields = FieldSelection {
        cinema_id: state.catalog.cinemas.first().map(|c| c.id),
        date: Some(Local::now().date_naive()),
        ..FieldSelection::default()
    };

    let mut selection = SelectionState::new();

    let (mut outcome, grid) = state
        .sync
        .refresh(&state.catalog, &fields, &mut selection)
        .await;
    fields = outcome.selection.clone();
    let mut current_grid = grid.unwrap_or_default();
    redraw(&current_grid, &selection);

    loop {
        let actions = [
            "Toggle a seat",
            "Change cinema",
            "Change screen",
            "Change date",
            "Change time",
            "Submit booking",
            "Quit",
        ];
        let choice = Select::new()
            .with_prompt("Action")
            .items(&actions)
            .default(0)
            .interact()?;

        let mut field_changed = false;

        match choice {
            0 => {
                let raw: String = Input::new()
                    .with_prompt("Seat label (e.g. A1)")
                    .interact_text()?;
                let seat = raw.trim().to_uppercase();
                if !grid_has_seat(&current_grid, &seat) {
                    println!("{}", format!("No seat {} in this hall.", seat).yellow());
                } else {
                    selection.toggle(&seat);
                    current_grid = describe_from_state(
                        current_grid.rows,
                        current_grid.cols,
                        &selection,
                    );
                }
                redraw(&current_grid, &selection);
            }
            1 => {
                let names: Vec<&str> = state.catalog.cinemas.iter().map(|c| c.name.as_str()).collect();
                if names.is_empty() {
                    println!("{}", "No cinemas available.".yellow());
                    continue;
                }
                let idx = Select::new()
                    .with_prompt("Cinema")
                    .items(&names)
                    .default(0)
                    .interact()?;
                fields.cinema_id = Some(state.catalog.cinemas[idx].id);
                field_changed = true;
            }
            2 => {
                let ids = outcome.selectable_screens.clone();
                if ids.is_empty() {
                    println!("{}", "Choose a cinema first.".yellow());
                    continue;
                }
                let names: Vec<String> = ids
                    .iter()
                    .filter_map(|id| state.catalog.screen(*id))
                    .map(|s| format!("{} ({}x{})", s.name, s.rows_count, s.cols_count))
                    .collect();
                let idx = Select::new()
                    .with_prompt("Screen")
                    .items(&names)
                    .default(0)
                    .interact()?;
                fields.screen_id = Some(ids[idx]);
                field_changed = true;
            }
            3 => {
                let default = fields
                    .date
                    .unwrap_or_else(|| Local::now().date_naive())
                    .format("%Y-%m-%d")
                    .to_string();
                let raw: String = Input::new()
                    .with_prompt("Date (YYYY-MM-DD)")
                    .default(default)
                    .interact_text()?;
                match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                    Ok(date) => {
                        fields.date = Some(date);
                        field_changed = true;
                    }
                    Err(_) => println!("{}", "Invalid date, expected YYYY-MM-DD.".yellow()),
                }
            }
            4 => {
                let times = outcome.selectable_times.clone();
                if times.is_empty() {
                    println!("{}", "Choose a cinema and a screen first.".yellow());
                    continue;
                }
                let idx = Select::new()
                    .with_prompt("Showtime")
                    .items(&times)
                    .default(0)
                    .interact()?;
                fields.time = Some(times[idx].clone());
                field_changed = true;
            }
            5 => {
                match submit(&state, &fields, &selection).await {
                    Ok(true) => {
                        println!("{}", "Booking submitted.".green().bold());
                        // Повторная синхронизация: наши места теперь заняты.
                        field_changed = true;
                    }
                    Ok(false) => {}
                    Err(e) => println!("{}", format!("Booking failed: {}", e).red()),
                }
            }
            _ => break,
        }

        if field_changed {
            let (next_outcome, grid) = state
                .sync
                .refresh(&state.catalog, &fields, &mut selection)
                .await;
            outcome = next_outcome;
            fields = outcome.selection.clone();
            if let Some(grid) = grid {
                current_grid = grid;
            }
            redraw(&current_grid, &selection);
        }
    }

    Ok(())
}

fn redraw(grid: &GridDescription, selection: &SelectionState) {
    println!();
    ui::print_grid(grid);
    ui::print_summary(&selection.serialize());
}

fn grid_has_seat(grid: &GridDescription, seat: &str) -> bool {
    grid.cells.iter().flatten().any(|c| c.label == seat)
}

/// Ok(true) — форма ушла на сервер, Ok(false) — отправка отменена проверкой.
async fn submit(
    state: &AppState,
    fields: &FieldSelection,
    selection: &SelectionState,
) -> Result<bool, SubmissionError> {
    let (Some(cinema_id), Some(screen_id), Some(date), Some(time)) = (
        fields.cinema_id,
        fields.screen_id,
        fields.date,
        fields.time.clone(),
    ) else {
        println!(
            "{}",
            "Please select cinema, screen, date, and time first.".yellow()
        );
        return Ok(false);
    };

    let form = BookingForm {
        cinema_id,
        screen_id,
        date,
        time,
        seat_labels: selection.serialize(),
    };

    match state.booking.submit(&form).await {
        Ok(()) => Ok(true),
        Err(SubmissionError::EmptySelection) => {
            println!("{}", SubmissionError::EmptySelection.to_string().yellow());
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
