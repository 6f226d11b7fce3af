use anyhow::Result;
use chrono::NaiveDate;
use history_core::config::Settings;
use history_core::controller::DayController;
use history_core::filter::QueryState;
use owo_colors::OwoColorize;

use crate::commands::{Session, load_day, require_loaded};
use crate::render::{Palette, counts_bar, day_heading, empty_message, event_entry};

pub async fn run(settings: &Settings, date: NaiveDate, query: QueryState) -> Result<()> {
    let session = Session::open(settings)?;
    let mut controller = load_day(settings, date).await?;
    require_loaded(&controller)?;
    controller.query = query;

    print_day(&controller, &session);
    Ok(())
}

/// Heading, counts bar and visible entries of a loaded day.
pub fn print_day(controller: &DayController, session: &Session) {
    let palette: &Palette = &session.palette;
    println!("{}", palette.accent(&day_heading(controller.selected())));
    println!("{}", counts_bar(&controller.counts(), controller.query.filter, palette));
    if controller.query.has_search() {
        println!("{} \"{}\"", "Search:".dimmed(), controller.query.search);
    }
    println!();

    let visible = controller.visible_indexed();
    if visible.is_empty() {
        let message = empty_message(
            controller.selected(),
            &controller.query.search,
            !controller.events().is_empty(),
        );
        println!("{}", message.dimmed());
        return;
    }

    for (index, event) in visible {
        let favorite = session.favorites.is_favorite(event);
        println!("{}", event_entry(index + 1, event, favorite, palette));
    }
}
