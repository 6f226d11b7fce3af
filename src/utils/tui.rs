use std::time::Duration;

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};

use crate::render::day_heading;

/// Spinner shown while a day is being fetched.
pub fn loading_spinner(date: NaiveDate) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["·  ", "·· ", "···", " ··", "  ·", "   "])
        .template("{spinner} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Looking back at {}...", day_heading(date)));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
