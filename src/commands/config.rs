use anyhow::Result;
use history_core::config::Settings;
use owo_colors::OwoColorize;

pub fn run(mut settings: Settings, language: Option<String>) -> Result<()> {
    let config_path = Settings::config_path()?;

    if let Some(language) = language {
        settings.language = language;
        settings.save(&config_path)?;
        println!("{}", format!("Language set to '{}'", settings.language).green());
        println!();
    }

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", settings.data_path()?.display());
    println!();
    println!("{}", "Feed".bold());
    println!("  API:        {}", settings.api_base_url);
    println!("  Language:   {}", settings.language);
    println!("  Timeout:    {}s", settings.request_timeout_secs);
    println!("  Share base: {}", settings.share_base_url);

    Ok(())
}
