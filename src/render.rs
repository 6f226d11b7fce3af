//! Terminal rendering for history-core types.
//!
//! Colors come from a [`Palette`] derived from the saved theme preference.

use chrono::NaiveDate;
use history_core::filter::{TypeCounts, TypeFilter};
use history_core::theme::Theme;
use history_core::{EventKind, HistoricalEvent};
use owo_colors::{AnsiColors, OwoColorize};

/// Descriptions longer than this are cut in list views.
const DESCRIPTION_WIDTH: usize = 160;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    accent: AnsiColors,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        let accent = match theme {
            Theme::Light => AnsiColors::Blue,
            Theme::Dark => AnsiColors::BrightYellow,
            Theme::System => AnsiColors::Yellow,
        };
        Palette { accent }
    }

    pub fn accent(&self, text: &str) -> String {
        text.color(self.accent).bold().to_string()
    }
}

/// Day heading, e.g. "Sunday, July 20".
pub fn day_heading(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// Long form used in messages, e.g. "July 20, 1969".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn kind_label(kind: EventKind) -> String {
    let label = format!("{:<5}", kind.label());
    match kind {
        EventKind::Event => label.cyan().to_string(),
        EventKind::Birth => label.green().to_string(),
        EventKind::Death => label.magenta().to_string(),
    }
}

/// Filter buttons with their totals; the active one is highlighted.
pub fn counts_bar(counts: &TypeCounts, active: TypeFilter, palette: &Palette) -> String {
    let buttons = [
        (TypeFilter::All, "All"),
        (TypeFilter::Only(EventKind::Event), "Events"),
        (TypeFilter::Only(EventKind::Birth), "Births"),
        (TypeFilter::Only(EventKind::Death), "Deaths"),
    ];

    buttons
        .iter()
        .map(|(filter, label)| {
            let text = format!("{} ({})", label, counts.get(*filter));
            if *filter == active {
                palette.accent(&text)
            } else {
                text.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// One entry: number, year, type, favorite marker, title, then the
/// description and link indented below.
pub fn event_entry(
    number: usize,
    event: &HistoricalEvent,
    is_favorite: bool,
    palette: &Palette,
) -> String {
    let marker = if is_favorite { "♥".red().to_string() } else { " ".to_string() };
    let mut lines = vec![format!(
        "{:>4} {} {} {} {}",
        format!("{number}.").dimmed(),
        palette.accent(&format!("{:>8}", event.display_year())),
        kind_label(event.kind),
        marker,
        event.title
    )];

    lines.push(format!("{:>21}{}", "", truncate(&event.description, DESCRIPTION_WIDTH).dimmed()));
    if let Some(url) = &event.wikipedia_url {
        lines.push(format!("{:>21}{}", "", url.underline().dimmed()));
    }

    lines.join("\n")
}

/// Message for an empty list. A search that matched nothing reads
/// differently from a day with no data.
pub fn empty_message(date: NaiveDate, search: &str, has_data: bool) -> String {
    if !search.trim().is_empty() {
        format!("No events found matching \"{search}\". Try a different search term.")
    } else if has_data {
        "No entries of this type for this day.".to_string()
    } else {
        format!(
            "No historical events are recorded for {}. Try selecting a different date.",
            long_date(date)
        )
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let text = "é".repeat(20);
        let cut = truncate(&text, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_empty_message_distinguishes_search_from_missing_data() {
        let date = NaiveDate::from_ymd_opt(1969, 7, 20).unwrap();
        assert!(empty_message(date, "moon", true).contains("matching \"moon\""));
        assert!(empty_message(date, "", false).contains("July 20, 1969"));
        assert!(empty_message(date, "  ", true).starts_with("No entries"));
    }

    #[test]
    fn test_day_heading() {
        let date = NaiveDate::from_ymd_opt(1969, 7, 20).unwrap();
        assert_eq!(day_heading(date), "Sunday, July 20");
    }
}
