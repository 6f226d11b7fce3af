use anyhow::Result;
use history_core::config::Settings;
use history_core::theme::Theme;

use crate::render::Palette;

pub fn run(settings: &Settings, value: Option<Theme>) -> Result<()> {
    let mut storage = settings.storage()?;

    let theme = match value {
        Some(theme) => {
            theme.save(&mut storage)?;
            theme
        }
        None => Theme::load(&storage),
    };

    let palette = Palette::for_theme(theme);
    println!("Theme: {}", palette.accent(&theme.to_string()));
    Ok(())
}
