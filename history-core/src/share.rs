//! Share links for a selected day.
//!
//! Links carry the full date as `?date=YYYY-MM-DD`. That format is what
//! [`parse_share_date`] reads back, so existing links keep working.

use chrono::NaiveDate;
use url::Url;

use crate::error::{HistoryError, HistoryResult};

const DATE_PARAM: &str = "date";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";
const FACEBOOK_SHARER: &str = "https://www.facebook.com/sharer/sharer.php";

#[derive(Debug, Clone)]
pub struct Share {
    pub date: NaiveDate,
    pub link: Url,
    pub text: String,
}

impl Share {
    pub fn new(base_url: &str, date: NaiveDate, event_count: usize) -> HistoryResult<Self> {
        let mut link = Url::parse(base_url)
            .map_err(|e| HistoryError::Config(format!("Invalid share_base_url '{base_url}': {e}")))?;
        link.query_pairs_mut()
            .clear()
            .append_pair(DATE_PARAM, &date.format(DATE_FORMAT).to_string());

        let text = format!(
            "Discover what happened on {}! Check out {} fascinating historical events on History of Today.",
            date.format("%B %-d, %Y"),
            event_count
        );

        Ok(Share { date, link, text })
    }

    /// Text and link together, as copied to the clipboard.
    pub fn message(&self) -> String {
        format!("{} {}", self.text, self.link)
    }

    pub fn twitter_url(&self) -> HistoryResult<Url> {
        intent_url(
            TWITTER_INTENT,
            &[("text", self.text.as_str()), ("url", self.link.as_str())],
        )
    }

    pub fn facebook_url(&self) -> HistoryResult<Url> {
        intent_url(
            FACEBOOK_SHARER,
            &[("u", self.link.as_str()), ("quote", self.text.as_str())],
        )
    }
}

fn intent_url(base: &str, params: &[(&str, &str)]) -> HistoryResult<Url> {
    Url::parse_with_params(base, params).map_err(|e| HistoryError::Config(e.to_string()))
}

/// Read the date back out of a share link.
pub fn parse_share_date(link: &str) -> HistoryResult<NaiveDate> {
    let url = Url::parse(link).map_err(|e| HistoryError::InvalidShareLink(e.to_string()))?;

    let value = url
        .query_pairs()
        .find(|(name, _)| name == DATE_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| HistoryError::InvalidShareLink(format!("no '{DATE_PARAM}' parameter")))?;

    NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .map_err(|_| HistoryError::InvalidShareLink(format!("bad date '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moon_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(1969, 7, 20).unwrap()
    }

    #[test]
    fn test_link_and_text() {
        let share = Share::new("https://history.example.org/", moon_day(), 42).unwrap();
        assert_eq!(share.link.as_str(), "https://history.example.org/?date=1969-07-20");
        assert_eq!(
            share.text,
            "Discover what happened on July 20, 1969! Check out 42 fascinating historical events on History of Today."
        );
        assert!(share.message().ends_with("?date=1969-07-20"));
    }

    #[test]
    fn test_link_replaces_existing_query() {
        let share = Share::new("https://history.example.org/?date=2000-01-01&x=1", moon_day(), 0)
            .unwrap();
        assert_eq!(share.link.query(), Some("date=1969-07-20"));
    }

    #[test]
    fn test_link_roundtrips_through_parser() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let share = Share::new("https://history.example.org", date, 3).unwrap();
        assert_eq!(parse_share_date(share.link.as_str()).unwrap(), date);
    }

    #[test]
    fn test_intent_urls_carry_link() {
        let share = Share::new("https://history.example.org/", moon_day(), 1).unwrap();

        let twitter = share.twitter_url().unwrap();
        assert_eq!(twitter.host_str(), Some("twitter.com"));
        let url_param = twitter
            .query_pairs()
            .find(|(k, _)| k == "url")
            .map(|(_, v)| v.into_owned());
        assert_eq!(url_param.as_deref(), Some(share.link.as_str()));

        let facebook = share.facebook_url().unwrap();
        let u_param = facebook
            .query_pairs()
            .find(|(k, _)| k == "u")
            .map(|(_, v)| v.into_owned());
        assert_eq!(u_param.as_deref(), Some(share.link.as_str()));
    }

    #[test]
    fn test_parse_rejects_bad_links() {
        assert!(parse_share_date("not a url").is_err());
        assert!(parse_share_date("https://history.example.org/").is_err());
        assert!(parse_share_date("https://history.example.org/?date=1969-13-01").is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            Share::new("::nope", moon_day(), 0),
            Err(HistoryError::Config(_))
        ));
    }
}
