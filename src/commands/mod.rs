pub mod browse;
pub mod config;
pub mod favorites;
pub mod share;
pub mod show;
pub mod theme;

use anyhow::Result;
use chrono::NaiveDate;
use history_core::config::Settings;
use history_core::controller::{DayController, LoadState};
use history_core::favorites::FavoritesStore;
use history_core::storage::FileStorage;
use history_core::theme::Theme;

use crate::render::Palette;
use crate::utils::tui::loading_spinner;

/// Favorites and colors, loaded once per invocation.
pub struct Session {
    pub favorites: FavoritesStore<FileStorage>,
    pub palette: Palette,
}

impl Session {
    pub fn open(settings: &Settings) -> Result<Self> {
        let storage = settings.storage()?;
        let palette = Palette::for_theme(Theme::load(&storage));
        let favorites = FavoritesStore::load(storage);
        Ok(Session { favorites, palette })
    }
}

/// Fetch one day behind a spinner.
pub async fn load_day(settings: &Settings, date: NaiveDate) -> Result<DayController> {
    let client = settings.client()?;
    let (mut controller, _) = DayController::new(date);

    let spinner = loading_spinner(date);
    controller.load(&client).await;
    spinner.finish_and_clear();

    Ok(controller)
}

/// Fail the command if the day could not be loaded.
pub fn require_loaded(controller: &DayController) -> Result<()> {
    if let LoadState::Failed(message) = controller.state() {
        anyhow::bail!("{message}. Please try again later.");
    }
    Ok(())
}
