mod commands;
mod render;
mod utils;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use history_core::config::Settings;
use history_core::date_nav::parse_date;
use history_core::filter::{QueryState, TypeFilter};
use history_core::share::parse_share_date;
use history_core::theme::Theme;
use tracing_subscriber::EnvFilter;

use crate::commands::favorites::FavoritesAction;
use crate::commands::share::ShareTarget;

#[derive(Parser)]
#[command(name = "history-today")]
#[command(about = "Discover the events, births and deaths that happened on this day in history")]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what happened on a day (defaults to today)
    Show {
        /// Day to show: YYYY-MM-DD, MM-DD, "today" or a share link
        #[arg(short, long)]
        date: Option<String>,

        /// Only show one type: all, events, births or deaths
        #[arg(short = 't', long = "type", default_value = "all")]
        filter: TypeFilter,

        /// Search by year, person or keyword
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Step through days interactively
    Browse {
        /// Day to start on: YYYY-MM-DD, MM-DD, "today" or a share link
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List and manage favorites
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,

        /// Only list one type: all, events, births or deaths
        #[arg(short = 't', long = "type", default_value = "all")]
        filter: TypeFilter,

        /// Search favorites by year, person or keyword
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Print a share link for a day
    Share {
        /// Day to share: YYYY-MM-DD, MM-DD or "today"
        #[arg(short, long)]
        date: Option<String>,

        /// Open the link, or a social share page, in the browser
        #[arg(long, value_enum)]
        open: Option<ShareTarget>,
    },
    /// Show or set the color theme
    Theme {
        /// light, dark or system
        value: Option<Theme>,
    },
    /// Show configuration paths and values
    Config {
        /// Set the Wikipedia language edition (e.g. "en", "de")
        #[arg(long)]
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load()?;
    let command = cli.command.unwrap_or(Commands::Show {
        date: None,
        filter: TypeFilter::All,
        search: None,
    });

    match command {
        Commands::Show {
            date,
            filter,
            search,
        } => {
            let date = resolve_date(date.as_deref())?;
            let query = QueryState::new(filter, search.unwrap_or_default());
            commands::show::run(&settings, date, query).await
        }
        Commands::Browse { date } => {
            let date = resolve_date(date.as_deref())?;
            commands::browse::run(&settings, date).await
        }
        Commands::Favorites {
            action,
            filter,
            search,
        } => match action {
            None => {
                let query = QueryState::new(filter, search.unwrap_or_default());
                commands::favorites::list(&settings, &query)
            }
            Some(action) => commands::favorites::run(&settings, action).await,
        },
        Commands::Share { date, open } => {
            let date = resolve_date(date.as_deref())?;
            commands::share::run(&settings, date, open).await
        }
        Commands::Theme { value } => commands::theme::run(&settings, value),
        Commands::Config { language } => commands::config::run(settings, language),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("HISTORY_TODAY_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Turn a `--date` argument into a calendar date. Defaults to today.
pub fn resolve_date(arg: Option<&str>) -> Result<NaiveDate> {
    let today = Local::now().date_naive();

    match arg {
        None => Ok(today),
        Some(s) if s.starts_with("http://") || s.starts_with("https://") => {
            Ok(parse_share_date(s)?)
        }
        Some(s) => Ok(parse_date(s, today)?),
    }
}
