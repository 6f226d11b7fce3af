//! Day loading with protection against stale responses.
//!
//! Every date change or retry issues a [`FetchTicket`] carrying a new
//! generation. When a fetch settles, its result is committed only if its
//! ticket is still the latest one; anything older is dropped. This keeps a
//! slow response for a previous date from overwriting the current one.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::date_nav::{DateNavigator, DayKey};
use crate::error::HistoryResult;
use crate::event::HistoricalEvent;
use crate::filter::{QueryState, TypeCounts, filter, filter_indexed};
use crate::normalize::{DaySnapshot, RawDay};
use crate::source::DaySource;

const UNAVAILABLE_MESSAGE: &str = "Unable to retrieve events";

/// Identifies one fetch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub date: NaiveDate,
    pub key: DayKey,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(DaySnapshot),
    /// Holds the user-facing message. The snapshot is cleared.
    Failed(String),
}

pub struct DayController {
    nav: DateNavigator,
    generation: u64,
    state: LoadState,
    pub query: QueryState,
}

impl DayController {
    /// Start on `date`. The returned ticket is the initial fetch.
    pub fn new(date: NaiveDate) -> (Self, FetchTicket) {
        let mut controller = DayController {
            nav: DateNavigator::new(date),
            generation: 0,
            state: LoadState::Loading,
            query: QueryState::default(),
        };
        let ticket = controller.begin();
        (controller, ticket)
    }

    pub fn selected(&self) -> NaiveDate {
        self.nav.selected()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn next(&mut self) -> HistoryResult<FetchTicket> {
        self.nav.next()?;
        Ok(self.begin())
    }

    pub fn previous(&mut self) -> HistoryResult<FetchTicket> {
        self.nav.previous()?;
        Ok(self.begin())
    }

    pub fn set_date(&mut self, date: NaiveDate) -> FetchTicket {
        self.nav.set_date(date);
        self.begin()
    }

    /// Fetch the current date again, e.g. after a failure.
    pub fn retry(&mut self) -> FetchTicket {
        self.begin()
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply the outcome of a fetch. Returns `false` when the ticket is stale
    /// and the result was dropped.
    pub fn settle(&mut self, ticket: FetchTicket, result: HistoryResult<RawDay>) -> bool {
        if !self.is_current(&ticket) {
            debug!(date = %ticket.date, "dropping stale response");
            return false;
        }

        self.state = match result {
            Ok(raw) => {
                let snapshot = DaySnapshot::from_raw(ticket.key, raw);
                debug!(date = %ticket.date, count = snapshot.len(), "day loaded");
                LoadState::Ready(snapshot)
            }
            Err(e) => {
                warn!(date = %ticket.date, error = ?e, "fetch failed");
                LoadState::Failed(UNAVAILABLE_MESSAGE.to_string())
            }
        };
        true
    }

    /// Fetch and settle the current date in one step.
    pub async fn load<S: DaySource>(&mut self, source: &S) -> bool {
        let ticket = self.retry();
        let result = source.fetch_day(ticket.key).await;
        self.settle(ticket, result)
    }

    /// Entries of the current snapshot, empty while loading or after a failure.
    pub fn events(&self) -> &[HistoricalEvent] {
        match &self.state {
            LoadState::Ready(snapshot) => &snapshot.events,
            _ => &[],
        }
    }

    pub fn visible(&self) -> Vec<&HistoricalEvent> {
        filter(self.events(), &self.query)
    }

    /// Visible entries with their position in the full snapshot.
    pub fn visible_indexed(&self) -> Vec<(usize, &HistoricalEvent)> {
        filter_indexed(self.events(), &self.query)
    }

    pub fn counts(&self) -> TypeCounts {
        TypeCounts::tally(self.events())
    }

    fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        let ticket = FetchTicket {
            generation: self.generation,
            date: self.nav.selected(),
            key: self.nav.key(),
        };
        debug!(date = %ticket.date, key = %ticket.key, "fetch started");
        ticket
    }
}
