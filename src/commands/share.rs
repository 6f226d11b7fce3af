use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;
use history_core::config::Settings;
use history_core::controller::LoadState;
use history_core::share::Share;
use owo_colors::OwoColorize;
use tracing::warn;

use crate::commands::load_day;
use crate::render::long_date;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ShareTarget {
    Link,
    Twitter,
    Facebook,
}

pub async fn run(settings: &Settings, date: NaiveDate, open: Option<ShareTarget>) -> Result<()> {
    // The share text mentions how many entries the day has
    let controller = load_day(settings, date).await?;
    if let LoadState::Failed(message) = controller.state() {
        warn!(%message, "sharing without an event count");
    }

    let share = Share::new(&settings.share_base_url, date, controller.counts().all)?;
    let twitter = share.twitter_url()?;
    let facebook = share.facebook_url()?;

    println!("{}", format!("Share {}", long_date(date)).bold());
    println!("  Link:      {}", share.link);
    println!("  Message:   {}", share.message());
    println!("  Twitter:   {}", twitter.as_str().dimmed());
    println!("  Facebook:  {}", facebook.as_str().dimmed());

    if let Some(target) = open {
        let url = match target {
            ShareTarget::Link => share.link.as_str(),
            ShareTarget::Twitter => twitter.as_str(),
            ShareTarget::Facebook => facebook.as_str(),
        };
        if open::that(url).is_err() {
            println!("{}", "(Could not open browser automatically, please copy the URL above)".dimmed());
        }
    }

    Ok(())
}
