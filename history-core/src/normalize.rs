//! Conversion of a raw day payload into a [`DaySnapshot`].
//!
//! The feed returns `events`, `births` and `deaths` as separate optional
//! arrays. Each one is mapped by the same routine, the groups are
//! concatenated in that order, and the result is stably sorted by year,
//! most recent first. Entries sharing a year therefore keep feed order:
//! events before births before deaths.

use serde::Deserialize;

use crate::date_nav::DayKey;
use crate::event::{EventKind, HistoricalEvent, NO_DESCRIPTION};

/// Day payload as returned by the feed. Unknown collections are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDay {
    #[serde(default)]
    pub events: Option<Vec<RawItem>>,
    #[serde(default)]
    pub births: Option<Vec<RawItem>>,
    #[serde(default)]
    pub deaths: Option<Vec<RawItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub year: i32,
    pub text: String,
    #[serde(default)]
    pub pages: Option<Vec<RawPage>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPage {
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<RawThumbnail>,
    #[serde(default)]
    pub content_urls: Option<RawContentUrls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawThumbnail {
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawContentUrls {
    #[serde(default)]
    pub desktop: Option<RawPageUrl>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPageUrl {
    pub page: String,
}

/// The normalized, year-descending entries of one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySnapshot {
    pub key: DayKey,
    pub events: Vec<HistoricalEvent>,
}

impl DaySnapshot {
    pub fn from_raw(key: DayKey, raw: RawDay) -> Self {
        DaySnapshot {
            key,
            events: normalize(raw),
        }
    }

    pub fn empty(key: DayKey) -> Self {
        DaySnapshot {
            key,
            events: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Merge the three collections of a day into one list, newest year first.
pub fn normalize(raw: RawDay) -> Vec<HistoricalEvent> {
    let groups = [
        (raw.events, EventKind::Event),
        (raw.births, EventKind::Birth),
        (raw.deaths, EventKind::Death),
    ];

    let mut events: Vec<HistoricalEvent> = groups
        .into_iter()
        .filter_map(|(items, kind)| items.map(|items| (items, kind)))
        .flat_map(|(items, kind)| items.into_iter().map(move |item| to_event(item, kind)))
        .collect();

    // sort_by is stable: same-year entries keep their feed order
    events.sort_by(|a, b| b.year.cmp(&a.year));
    events
}

fn to_event(item: RawItem, kind: EventKind) -> HistoricalEvent {
    let page = item.pages.and_then(|pages| pages.into_iter().next()).unwrap_or_default();

    let description = page
        .extract
        .filter(|extract| !extract.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    HistoricalEvent {
        kind,
        year: item.year,
        title: item.text,
        description,
        image_url: page.thumbnail.map(|t| t.source),
        wikipedia_url: page.content_urls.and_then(|urls| urls.desktop).map(|d| d.page),
    }
}
