//! Core types for history-today.
//!
//! This crate turns the Wikimedia "onthisday" feed into a uniform list of
//! [`HistoricalEvent`]s and provides what the front end builds on:
//! - `normalize` merges events, births and deaths into one sorted list
//! - `favorites` keeps a persisted set keyed by (kind, year, title)
//! - `filter` derives the visible entries from a search and type filter
//! - `date_nav` and `controller` track the selected day and discard stale
//!   responses

pub mod config;
pub mod controller;
pub mod date_nav;
pub mod error;
pub mod event;
pub mod favorites;
pub mod filter;
pub mod normalize;
pub mod share;
pub mod source;
pub mod storage;
pub mod theme;

pub use event::*;
