//! Search and type filtering over a day's entries.

use std::fmt;
use std::str::FromStr;

use crate::error::HistoryError;
use crate::event::{EventKind, HistoricalEvent};

/// Which kinds of entry are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(EventKind),
}

impl TypeFilter {
    pub fn matches(self, kind: EventKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(only) => only == kind,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => write!(f, "all"),
            TypeFilter::Only(kind) => write!(f, "{}", kind.collection()),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse().map(TypeFilter::Only)
    }
}

/// Current search text and type filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub filter: TypeFilter,
    pub search: String,
}

impl QueryState {
    pub fn new(filter: TypeFilter, search: impl Into<String>) -> Self {
        QueryState {
            filter,
            search: search.into(),
        }
    }

    pub fn has_search(&self) -> bool {
        !self.search.trim().is_empty()
    }

    pub fn reset(&mut self) {
        *self = QueryState::default();
    }
}

/// Entries visible under `query`, in snapshot order.
///
/// The search text is matched case-insensitively against title, description
/// and the year's decimal form, so "44" finds 44 BC.
pub fn filter<'a>(events: &'a [HistoricalEvent], query: &QueryState) -> Vec<&'a HistoricalEvent> {
    filter_indexed(events, query)
        .into_iter()
        .map(|(_, event)| event)
        .collect()
}

/// Like [`filter`], paired with each entry's position in `events`.
pub fn filter_indexed<'a>(
    events: &'a [HistoricalEvent],
    query: &QueryState,
) -> Vec<(usize, &'a HistoricalEvent)> {
    let needle = query.has_search().then(|| query.search.to_lowercase());

    events
        .iter()
        .enumerate()
        .filter(|(_, event)| query.filter.matches(event.kind))
        .filter(|(_, event)| match &needle {
            Some(needle) => matches_search(event, needle),
            None => true,
        })
        .collect()
}

fn matches_search(event: &HistoricalEvent, needle: &str) -> bool {
    event.title.to_lowercase().contains(needle)
        || event.description.to_lowercase().contains(needle)
        || event.year.to_string().contains(needle)
}

/// Per-kind totals over an unfiltered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeCounts {
    pub all: usize,
    pub events: usize,
    pub births: usize,
    pub deaths: usize,
}

impl TypeCounts {
    pub fn tally(events: &[HistoricalEvent]) -> Self {
        events.iter().fold(TypeCounts::default(), |mut counts, event| {
            counts.all += 1;
            match event.kind {
                EventKind::Event => counts.events += 1,
                EventKind::Birth => counts.births += 1,
                EventKind::Death => counts.deaths += 1,
            }
            counts
        })
    }

    pub fn get(&self, filter: TypeFilter) -> usize {
        match filter {
            TypeFilter::All => self.all,
            TypeFilter::Only(EventKind::Event) => self.events,
            TypeFilter::Only(EventKind::Birth) => self.births,
            TypeFilter::Only(EventKind::Death) => self.deaths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: EventKind, year: i32, title: &str, description: &str) -> HistoricalEvent {
        HistoricalEvent {
            kind,
            year,
            title: title.to_string(),
            description: description.to_string(),
            image_url: None,
            wikipedia_url: None,
        }
    }

    fn sample() -> Vec<HistoricalEvent> {
        vec![
            event(EventKind::Birth, 1985, "Ada Example, engineer", "Born in Lisbon"),
            event(EventKind::Event, 1969, "Apollo 11 lands on the Moon", "NASA mission"),
            event(EventKind::Birth, 1930, "Neil Armstrong", "American astronaut"),
            event(EventKind::Death, 1815, "Someone at Waterloo", "Battle casualty"),
            event(EventKind::Death, -44, "Julius Caesar", "Roman dictator"),
        ]
    }

    fn titles(events: &[&HistoricalEvent]) -> Vec<String> {
        events.iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn test_all_and_empty_search_is_identity() {
        let events = sample();
        let visible = filter(&events, &QueryState::default());
        let expected: Vec<&HistoricalEvent> = events.iter().collect();
        assert_eq!(visible, expected);
    }

    #[test]
    fn test_whitespace_search_is_ignored() {
        let events = sample();
        let visible = filter(&events, &QueryState::new(TypeFilter::All, "   "));
        assert_eq!(visible.len(), events.len());
    }

    #[test]
    fn test_type_filter_keeps_relative_order() {
        let events = sample();
        let visible = filter(&events, &QueryState::new(TypeFilter::Only(EventKind::Birth), ""));
        assert_eq!(titles(&visible), vec!["Ada Example, engineer", "Neil Armstrong"]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_title_and_description() {
        let events = sample();
        let by_title = filter(&events, &QueryState::new(TypeFilter::All, "APOLLO"));
        assert_eq!(titles(&by_title), vec!["Apollo 11 lands on the Moon"]);

        let by_description = filter(&events, &QueryState::new(TypeFilter::All, "astronaut"));
        assert_eq!(titles(&by_description), vec!["Neil Armstrong"]);
    }

    #[test]
    fn test_search_matches_negative_year_digits() {
        let events = sample();
        let visible = filter(&events, &QueryState::new(TypeFilter::All, "44"));
        assert_eq!(titles(&visible), vec!["Julius Caesar"]);
    }

    #[test]
    fn test_search_and_type_combine() {
        let events = sample();
        let visible = filter(&events, &QueryState::new(TypeFilter::Only(EventKind::Death), "19"));
        assert!(visible.is_empty());

        let visible = filter(&events, &QueryState::new(TypeFilter::Only(EventKind::Event), "19"));
        assert_eq!(titles(&visible), vec!["Apollo 11 lands on the Moon"]);
    }

    #[test]
    fn test_filter_indexed_reports_source_positions() {
        let events = sample();
        let visible = filter_indexed(&events, &QueryState::new(TypeFilter::Only(EventKind::Death), ""));
        let positions: Vec<usize> = visible.iter().map(|(i, _)| *i).collect();
        assert_eq!(positions, vec![3, 4]);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let query = QueryState::new(TypeFilter::Only(EventKind::Event), "moon");
        assert!(filter(&[], &query).is_empty());
    }

    #[test]
    fn test_counts_over_unfiltered_list() {
        let counts = TypeCounts::tally(&sample());
        assert_eq!(
            counts,
            TypeCounts {
                all: 5,
                events: 1,
                births: 2,
                deaths: 2
            }
        );
        assert_eq!(counts.get(TypeFilter::Only(EventKind::Birth)), 2);
        assert_eq!(TypeCounts::tally(&[]), TypeCounts::default());
    }

    #[test]
    fn test_type_filter_parsing() {
        assert_eq!("all".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!(
            "births".parse::<TypeFilter>().unwrap(),
            TypeFilter::Only(EventKind::Birth)
        );
        assert!("weddings".parse::<TypeFilter>().is_err());
    }
}
