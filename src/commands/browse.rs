//! Interactive day browser.
//!
//! Commands are read from stdin while fetches run as background tasks, so
//! navigation, search and favorites stay usable while a day is loading.
//! Every fetch result goes through [`DayController::settle`], which drops
//! responses for days the user has already moved away from.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use history_core::config::Settings;
use history_core::controller::{DayController, FetchTicket, LoadState};
use history_core::error::HistoryResult;
use history_core::filter::TypeFilter;
use history_core::normalize::RawDay;
use history_core::share::Share;
use history_core::source::{DaySource, WikimediaClient};
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use crate::commands::Session;
use crate::commands::show::print_day;
use crate::render::day_heading;

const HELP: &str = "\
  n / p        next / previous day
  t            today
  d DATE       jump to a date (YYYY-MM-DD or MM-DD)
  /TEXT        search (a lone / clears it)
  f TYPE       filter: all, events, births, deaths
  c            clear search and filter
  s N          toggle favorite for entry N
  l            list the current day again
  r            retry after a failure
  share        print a share link
  q            quit";

#[derive(Debug, PartialEq)]
enum BrowseCommand {
    Next,
    Previous,
    Today,
    Jump(String),
    Search(String),
    Filter(TypeFilter),
    Clear,
    ToggleFavorite(usize),
    List,
    Retry,
    Share,
    Help,
    Quit,
}

impl BrowseCommand {
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        if let Some(search) = line.strip_prefix('/') {
            return Ok(Some(BrowseCommand::Search(search.trim().to_string())));
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        let command = match word.to_lowercase().as_str() {
            "n" | "next" => BrowseCommand::Next,
            "p" | "prev" | "previous" => BrowseCommand::Previous,
            "t" | "today" => BrowseCommand::Today,
            "d" | "date" if !rest.is_empty() => BrowseCommand::Jump(rest.to_string()),
            "f" | "filter" => {
                let filter = rest.parse().map_err(|e| format!("{e}"))?;
                BrowseCommand::Filter(filter)
            }
            "c" | "clear" => BrowseCommand::Clear,
            "s" | "star" => {
                let n: usize = rest
                    .parse()
                    .map_err(|_| format!("Expected an entry number, got '{rest}'"))?;
                if n == 0 {
                    return Err("Entries are numbered from 1".to_string());
                }
                BrowseCommand::ToggleFavorite(n)
            }
            "l" | "list" => BrowseCommand::List,
            "r" | "retry" => BrowseCommand::Retry,
            "share" => BrowseCommand::Share,
            "h" | "help" | "?" => BrowseCommand::Help,
            "q" | "quit" | "exit" => BrowseCommand::Quit,
            _ => return Err(format!("Unknown command '{line}'. Type h for help.")),
        };
        Ok(Some(command))
    }
}

type FetchOutcome = (FetchTicket, HistoryResult<RawDay>);

fn spawn_fetch(tasks: &mut JoinSet<FetchOutcome>, client: &WikimediaClient, ticket: FetchTicket) {
    println!("{}", format!("Loading {}...", day_heading(ticket.date)).dimmed());
    let client = client.clone();
    tasks.spawn(async move {
        let result = client.fetch_day(ticket.key).await;
        (ticket, result)
    });
}

pub async fn run(settings: &Settings, date: NaiveDate) -> Result<()> {
    let mut session = Session::open(settings)?;
    let client = settings.client()?;
    let mut tasks: JoinSet<FetchOutcome> = JoinSet::new();

    let (mut controller, ticket) = DayController::new(date);
    spawn_fetch(&mut tasks, &client, ticket);
    println!("{}", "Type h for help, q to quit.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(joined) = tasks.join_next() => {
                let (ticket, result) = joined?;
                if controller.settle(ticket, result) {
                    show_state(&controller, &session);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                let command = match BrowseCommand::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(message) => {
                        println!("{}", message.red());
                        continue;
                    }
                };

                if command == BrowseCommand::Quit {
                    break;
                }
                if let Err(e) = apply(command, &mut controller, &mut session, settings, &client, &mut tasks) {
                    println!("{}", e.to_string().red());
                }
            }
        }
    }

    Ok(())
}

fn apply(
    command: BrowseCommand,
    controller: &mut DayController,
    session: &mut Session,
    settings: &Settings,
    client: &WikimediaClient,
    tasks: &mut JoinSet<FetchOutcome>,
) -> Result<()> {
    match command {
        BrowseCommand::Next => spawn_fetch(tasks, client, controller.next()?),
        BrowseCommand::Previous => spawn_fetch(tasks, client, controller.previous()?),
        BrowseCommand::Today => {
            spawn_fetch(tasks, client, controller.set_date(Local::now().date_naive()))
        }
        BrowseCommand::Jump(input) => {
            let date = crate::resolve_date(Some(&input))?;
            spawn_fetch(tasks, client, controller.set_date(date));
        }
        BrowseCommand::Retry => spawn_fetch(tasks, client, controller.retry()),
        BrowseCommand::Search(text) => {
            controller.query.search = text;
            show_state(controller, session);
        }
        BrowseCommand::Filter(filter) => {
            controller.query.filter = filter;
            show_state(controller, session);
        }
        BrowseCommand::Clear => {
            controller.query.reset();
            show_state(controller, session);
        }
        BrowseCommand::ToggleFavorite(n) => {
            let Some(event) = controller.events().get(n - 1).cloned() else {
                anyhow::bail!("No entry {n} on this day");
            };
            let label = event.to_string();
            if session.favorites.toggle(event)? {
                println!("{} {}", "♥ Added".red(), label);
            } else {
                println!("{} {}", "Removed".dimmed(), label);
            }
        }
        BrowseCommand::List => show_state(controller, session),
        BrowseCommand::Share => {
            let share = Share::new(
                &settings.share_base_url,
                controller.selected(),
                controller.counts().all,
            )?;
            println!("{}", share.link);
        }
        BrowseCommand::Help => println!("{HELP}"),
        BrowseCommand::Quit => {}
    }
    Ok(())
}

fn show_state(controller: &DayController, session: &Session) {
    match controller.state() {
        LoadState::Loading => println!("{}", "Still loading...".dimmed()),
        LoadState::Failed(message) => {
            println!("{}", format!("{message}. Type r to try again.").red())
        }
        LoadState::Ready(_) => print_day(controller, session),
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use history_core::EventKind;

    #[test]
    fn test_parse_navigation() {
        assert_eq!(BrowseCommand::parse("n"), Ok(Some(BrowseCommand::Next)));
        assert_eq!(BrowseCommand::parse(" prev "), Ok(Some(BrowseCommand::Previous)));
        assert_eq!(
            BrowseCommand::parse("d 1969-07-20"),
            Ok(Some(BrowseCommand::Jump("1969-07-20".to_string())))
        );
        assert!(BrowseCommand::parse("d").is_err());
    }

    #[test]
    fn test_parse_search_and_filter() {
        assert_eq!(
            BrowseCommand::parse("/ Moon landing "),
            Ok(Some(BrowseCommand::Search("Moon landing".to_string())))
        );
        assert_eq!(
            BrowseCommand::parse("/"),
            Ok(Some(BrowseCommand::Search(String::new())))
        );
        assert_eq!(
            BrowseCommand::parse("f births"),
            Ok(Some(BrowseCommand::Filter(TypeFilter::Only(EventKind::Birth))))
        );
        assert!(BrowseCommand::parse("f weddings").is_err());
    }

    #[test]
    fn test_parse_favorite_toggle() {
        assert_eq!(
            BrowseCommand::parse("s 3"),
            Ok(Some(BrowseCommand::ToggleFavorite(3)))
        );
        assert!(BrowseCommand::parse("s 0").is_err());
        assert!(BrowseCommand::parse("s x").is_err());
    }

    #[test]
    fn test_parse_blank_and_unknown() {
        assert_eq!(BrowseCommand::parse("   "), Ok(None));
        assert!(BrowseCommand::parse("dance").is_err());
        assert_eq!(BrowseCommand::parse("Q"), Ok(Some(BrowseCommand::Quit)));
    }
}
