use anyhow::{Result, bail};
use clap::Subcommand;
use dialoguer::Confirm;
use history_core::config::Settings;
use history_core::filter::{QueryState, filter_indexed};
use owo_colors::OwoColorize;

use crate::commands::{Session, load_day, require_loaded};
use crate::render::event_entry;

#[derive(Subcommand)]
pub enum FavoritesAction {
    /// Add entry N of a day (numbers as printed by `show`)
    Add {
        /// Entry number
        number: usize,

        /// Day the entry belongs to (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Remove favorite N (numbers as printed by `favorites`)
    Remove {
        number: usize,
    },
    /// Remove all favorites
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn list(settings: &Settings, query: &QueryState) -> Result<()> {
    let session = Session::open(settings)?;
    let favorites = &session.favorites;

    println!(
        "{}",
        session
            .palette
            .accent(&format!("♥ Favorites ({})", favorites.len()))
    );
    println!();

    if favorites.is_empty() {
        println!(
            "{}",
            "No favorites yet. Add one with `history-today favorites add <N> --date <DATE>`.".dimmed()
        );
        return Ok(());
    }

    let visible = filter_indexed(favorites.as_slice(), query);
    if visible.is_empty() {
        println!("{}", "No favorites match this filter.".dimmed());
        return Ok(());
    }

    for (index, event) in visible {
        println!("{}", event_entry(index + 1, event, true, &session.palette));
    }
    Ok(())
}

pub async fn run(settings: &Settings, action: FavoritesAction) -> Result<()> {
    let mut session = Session::open(settings)?;

    match action {
        FavoritesAction::Add { number, date } => {
            let date = crate::resolve_date(date.as_deref())?;
            let controller = load_day(settings, date).await?;
            require_loaded(&controller)?;

            let Some(event) = entry(controller.events(), number).cloned() else {
                bail!(
                    "No entry {} on {} ({} entries)",
                    number,
                    crate::render::long_date(date),
                    controller.events().len()
                );
            };

            let label = event.to_string();
            if session.favorites.add(event)? {
                println!("{} {}", "♥ Added".red(), label);
            } else {
                println!("{} {}", "Already a favorite:".dimmed(), label);
            }
        }
        FavoritesAction::Remove { number } => {
            let Some(event) = entry(session.favorites.as_slice(), number).cloned() else {
                bail!("No favorite {} ({} saved)", number, session.favorites.len());
            };
            session.favorites.remove(&event)?;
            println!("{} {}", "Removed".dimmed(), event);
        }
        FavoritesAction::Clear { yes } => {
            let count = session.favorites.len();
            if count == 0 {
                println!("{}", "No favorites to clear.".dimmed());
                return Ok(());
            }

            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!(
                        "Remove all {count} favorites? This cannot be undone."
                    ))
                    .default(false)
                    .interact()?;

            if confirmed {
                session.favorites.clear()?;
                println!("Cleared {count} favorites.");
            }
        }
    }
    Ok(())
}

/// 1-based lookup as shown to users.
fn entry<T>(items: &[T], number: usize) -> Option<&T> {
    number.checked_sub(1).and_then(|i| items.get(i))
}
