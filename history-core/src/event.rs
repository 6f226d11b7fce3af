//! Normalized "on this day" records.
//!
//! The feed hands out three differently named collections (events, births,
//! deaths). They are all converted into [`HistoricalEvent`], and the rest of
//! the crate works exclusively with that type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// Fallback used when the feed has no extract for an entry.
pub const NO_DESCRIPTION: &str = "No description available";

fn default_description() -> String {
    NO_DESCRIPTION.to_string()
}

/// Which collection of the day feed an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "events")]
    Event,
    #[serde(rename = "births")]
    Birth,
    #[serde(rename = "deaths")]
    Death,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Event, EventKind::Birth, EventKind::Death];

    /// Short label shown next to an entry ("Event", "Born", "Died").
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Event => "Event",
            EventKind::Birth => "Born",
            EventKind::Death => "Died",
        }
    }

    /// Name of the matching collection in the feed payload.
    pub fn collection(self) -> &'static str {
        match self {
            EventKind::Event => "events",
            EventKind::Birth => "births",
            EventKind::Death => "deaths",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Event => write!(f, "event"),
            EventKind::Birth => write!(f, "birth"),
            EventKind::Death => write!(f, "death"),
        }
    }
}

impl FromStr for EventKind {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "event" | "events" => Ok(EventKind::Event),
            "birth" | "births" => Ok(EventKind::Birth),
            "death" | "deaths" => Ok(EventKind::Death),
            _ => Err(HistoryError::InvalidEventKind(s.to_string())),
        }
    }
}

/// One entry of a day, whatever collection it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Negative for BCE.
    pub year: i32,
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikipedia_url: Option<String>,
}

impl HistoricalEvent {
    /// The identity of this event for favorites lookup.
    pub fn key(&self) -> EventKey {
        EventKey {
            kind: self.kind,
            year: self.year,
            title: self.title.clone(),
        }
    }

    pub fn same_event(&self, other: &HistoricalEvent) -> bool {
        self.kind == other.kind && self.year == other.year && self.title == other.title
    }

    /// Year as displayed to users, e.g. "1969" or "44 BC".
    pub fn display_year(&self) -> String {
        if self.year < 0 {
            format!("{} BC", self.year.unsigned_abs())
        } else {
            self.year.to_string()
        }
    }
}

impl fmt::Display for HistoricalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.display_year())
    }
}

/// Identity of a [`HistoricalEvent`]: (kind, year, title).
///
/// The feed has no stable id, so two entries with the same triple are the
/// same event even when description or image differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub kind: EventKind,
    pub year: i32,
    pub title: String,
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.kind.collection(), self.year, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moon_landing() -> HistoricalEvent {
        HistoricalEvent {
            kind: EventKind::Event,
            year: 1969,
            title: "Apollo 11 lands on the Moon".to_string(),
            description: "First crewed landing".to_string(),
            image_url: Some("https://upload.wikimedia.org/apollo.jpg".to_string()),
            wikipedia_url: None,
        }
    }

    #[test]
    fn test_key_ignores_description_and_image() {
        let a = moon_landing();
        let mut b = moon_landing();
        b.description = NO_DESCRIPTION.to_string();
        b.image_url = None;

        assert_eq!(a.key(), b.key());
        assert!(a.same_event(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_differs_by_kind() {
        let a = moon_landing();
        let mut b = moon_landing();
        b.kind = EventKind::Birth;
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_serializes_with_storage_field_names() {
        let json = serde_json::to_value(moon_landing()).unwrap();
        assert_eq!(json["type"], "events");
        assert_eq!(json["imageUrl"], "https://upload.wikimedia.org/apollo.jpg");
        assert!(json.get("wikipediaUrl").is_none());
    }

    #[test]
    fn test_deserialize_missing_description_uses_fallback() {
        let event: HistoricalEvent =
            serde_json::from_str(r#"{"type":"deaths","year":-44,"title":"Julius Caesar"}"#)
                .unwrap();
        assert_eq!(event.kind, EventKind::Death);
        assert_eq!(event.description, NO_DESCRIPTION);
        assert_eq!(event.display_year(), "44 BC");
    }

    #[test]
    fn test_event_kind_from_str() {
        assert_eq!("births".parse::<EventKind>().unwrap(), EventKind::Birth);
        assert_eq!("Death".parse::<EventKind>().unwrap(), EventKind::Death);
        assert!("holidays".parse::<EventKind>().is_err());
    }
}
