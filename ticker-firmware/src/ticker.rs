//! Message rotation
//!
//! Picks the next local message and expands placeholders into live
//! content. A local message that is exactly a placeholder tag is replaced;
//! any other text is shown as written.
//!
//! | Tag            | Replaced by                 |
//! |----------------|-----------------------------|
//! | `<weerlive>`   | next weather report         |
//! | `<mediastack>` | next news headline          |
//! | `<rssfeed>`    | next RSS item               |
//! | `<date>`       | current date                |
//! | `<time>`       | current time                |
//! | `<datetime>`   | current date and time       |
//! | `<spaces>`     | a blank stretch of display  |

use chrono::{DateTime, Local, TimeZone};
use log::debug;
use ticker_core::LocalMessages;
use ticker_hal::FileSystem;

/// Width of the `<spaces>` blank, in characters
pub const SPACES_WIDTH: usize = 85;

/// Source of live content for placeholder tags
///
/// Feed fetching and time keeping live outside this crate; the rotation
/// only asks for the next item.
pub trait FeedSource {
    /// Next weather report
    fn weerlive(&mut self) -> String;

    /// Next news headline
    fn mediastack(&mut self) -> String;

    /// Next RSS item
    fn rssfeed(&mut self) -> String;

    /// Current date
    fn date(&mut self) -> String;

    /// Current time
    fn time(&mut self) -> String;

    /// Current date and time
    fn datetime(&mut self) -> String {
        let date = self.date();
        let time = self.time();
        format!("{} {}", date, time)
    }
}

/// Placeholder tag of a local message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Weerlive,
    Mediastack,
    Rssfeed,
    Date,
    Time,
    DateTime,
    Spaces,
}

impl Placeholder {
    /// Recognize a message that consists of a tag only
    pub fn parse(message: &str) -> Option<Self> {
        match message {
            "<weerlive>" => Some(Placeholder::Weerlive),
            "<mediastack>" => Some(Placeholder::Mediastack),
            "<rssfeed>" => Some(Placeholder::Rssfeed),
            "<date>" => Some(Placeholder::Date),
            "<time>" => Some(Placeholder::Time),
            "<datetime>" => Some(Placeholder::DateTime),
            "<spaces>" => Some(Placeholder::Spaces),
            _ => None,
        }
    }

    /// Content the tag stands for
    pub fn resolve(self, feeds: &mut impl FeedSource) -> String {
        match self {
            Placeholder::Weerlive => feeds.weerlive(),
            Placeholder::Mediastack => feeds.mediastack(),
            Placeholder::Rssfeed => feeds.rssfeed(),
            Placeholder::Date => feeds.date(),
            Placeholder::Time => feeds.time(),
            Placeholder::DateTime => feeds.datetime(),
            Placeholder::Spaces => " ".repeat(SPACES_WIDTH),
        }
    }
}

/// Expand a message if it is a placeholder tag
pub fn resolve_message(message: &str, feeds: &mut impl FeedSource) -> String {
    match Placeholder::parse(message) {
        Some(tag) => {
            debug!("nextMessage(): {:?} message", tag);
            tag.resolve(feeds)
        }
        None => message.to_string(),
    }
}

/// Text handed to the display for one message
pub fn display_text(message: &str) -> String {
    format!("* {}*  ", message)
}

/// Take the next local message and expand it
///
/// Returns the expanded message; an empty store yields an empty message.
pub fn next_message<F: FileSystem, const R: usize>(
    messages: &mut LocalMessages<F, R>,
    feeds: &mut impl FeedSource,
) -> String {
    let message = messages.next_message();
    let resolved = resolve_message(message.as_str(), feeds);
    debug!("nextMessage(): Sending text: [{}]", display_text(&resolved));
    resolved
}

/// Feeds backed by the host clock
///
/// Remote feeds are not fetched on the host; their tags expand to a fixed
/// notice so the rotation can still be exercised.
pub struct ClockFeeds<Tz: TimeZone> {
    now: fn() -> DateTime<Tz>,
}

impl ClockFeeds<Local> {
    /// Feeds using the local time zone
    pub fn local() -> Self {
        Self { now: Local::now }
    }
}

impl<Tz: TimeZone> FeedSource for ClockFeeds<Tz>
where
    Tz::Offset: std::fmt::Display,
{
    fn weerlive(&mut self) -> String {
        String::from("(weerlive feed not available)")
    }

    fn mediastack(&mut self) -> String {
        String::from("(mediastack feed not available)")
    }

    fn rssfeed(&mut self) -> String {
        String::from("(rss feed not available)")
    }

    fn date(&mut self) -> String {
        (self.now)().format("%d-%m-%Y").to_string()
    }

    fn time(&mut self) -> String {
        (self.now)().format("%H:%M").to_string()
    }

    fn datetime(&mut self) -> String {
        (self.now)().format("%d-%m-%Y %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ticker_hal_host::RamFileSystem;

    #[derive(Default)]
    struct FakeFeeds {
        weather_calls: usize,
    }

    impl FeedSource for FakeFeeds {
        fn weerlive(&mut self) -> String {
            self.weather_calls += 1;
            format!("weather #{}", self.weather_calls)
        }

        fn mediastack(&mut self) -> String {
            "headline".to_string()
        }

        fn rssfeed(&mut self) -> String {
            "rss item".to_string()
        }

        fn date(&mut self) -> String {
            "19-10-2026".to_string()
        }

        fn time(&mut self) -> String {
            "12:34".to_string()
        }
    }

    #[test]
    fn test_placeholders_resolved() {
        let mut feeds = FakeFeeds::default();
        assert_eq!(resolve_message("<weerlive>", &mut feeds), "weather #1");
        assert_eq!(resolve_message("<mediastack>", &mut feeds), "headline");
        assert_eq!(resolve_message("<rssfeed>", &mut feeds), "rss item");
        assert_eq!(resolve_message("<date>", &mut feeds), "19-10-2026");
        assert_eq!(resolve_message("<time>", &mut feeds), "12:34");
        assert_eq!(resolve_message("<datetime>", &mut feeds), "19-10-2026 12:34");
        assert_eq!(resolve_message("<spaces>", &mut feeds), " ".repeat(SPACES_WIDTH));
    }

    #[test]
    fn test_plain_text_untouched() {
        let mut feeds = FakeFeeds::default();
        assert_eq!(resolve_message("Hello <weerlive>", &mut feeds), "Hello <weerlive>");
        assert_eq!(resolve_message("<WEERLIVE>", &mut feeds), "<WEERLIVE>");
        assert_eq!(feeds.weather_calls, 0);
    }

    #[test]
    fn test_display_text() {
        assert_eq!(display_text("news"), "* news*  ");
    }

    #[test]
    fn test_next_message_rotates_and_resolves() {
        let mut messages: LocalMessages<_, 150> =
            LocalMessages::new(RamFileSystem::new(), "/localMessages.txt");
        messages.replace_all(["Welcome", "<weerlive>"]);
        let mut feeds = FakeFeeds::default();

        assert_eq!(next_message(&mut messages, &mut feeds), "Welcome");
        assert_eq!(next_message(&mut messages, &mut feeds), "weather #1");
        assert_eq!(next_message(&mut messages, &mut feeds), "Welcome");
        assert_eq!(next_message(&mut messages, &mut feeds), "weather #2");
    }

    #[test]
    fn test_next_message_on_empty_store() {
        let mut messages: LocalMessages<_, 150> =
            LocalMessages::new(RamFileSystem::new(), "/localMessages.txt");
        assert_eq!(next_message(&mut messages, &mut FakeFeeds::default()), "");
    }

    #[test]
    fn test_clock_feeds_format() {
        fn fixed() -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2026, 10, 19, 8, 5, 0).unwrap()
        }
        let mut feeds = ClockFeeds { now: fixed };
        assert_eq!(feeds.date(), "19-10-2026");
        assert_eq!(feeds.time(), "08:05");
        assert_eq!(feeds.datetime(), "19-10-2026 08:05");
    }
}
