//! Usage: Unread-count parsing from the page title, plus per-title trigger state.
//!
//! messenger.com encodes the number of unread conversations as a leading
//! parenthesized integer in the document title, e.g. `"(2) Messenger"`. A
//! title without that marker means zero unread.

use regex::Regex;
use std::sync::LazyLock;

static UNREAD_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\((\d+)\)").expect("unread count pattern"));

/// Parses the unread count from a page title. Non-matching titles (including
/// counts too large for `u32`) parse as 0.
pub(crate) fn parse_unread_count(title: &str) -> u32 {
    UNREAD_COUNT_RE
        .captures(title)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0)
}

/// Last-observed title and unread count.
///
/// Both fields update synchronously on every observed title change, whether or
/// not a notification ends up scheduled or suppressed downstream.
#[derive(Debug)]
pub(crate) struct TitleState {
    last_title: String,
    last_unread: u32,
}

impl TitleState {
    pub(crate) fn new(initial_title: &str) -> Self {
        Self {
            last_title: initial_title.to_string(),
            last_unread: parse_unread_count(initial_title),
        }
    }

    /// Records a title observation. Returns the new count when it strictly
    /// increased; a decrease or unchanged count never qualifies. A jump of
    /// more than one still qualifies exactly once.
    pub(crate) fn observe(&mut self, title: &str) -> Option<u32> {
        if title == self.last_title {
            return None;
        }

        let count = parse_unread_count(title);
        let increased = count > self.last_unread;

        self.last_unread = count;
        self.last_title = title.to_string();

        increased.then_some(count)
    }

    #[cfg(test)]
    pub(crate) fn last_unread(&self) -> u32 {
        self.last_unread
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_without_marker_parse_as_zero() {
        assert_eq!(parse_unread_count("Messenger"), 0);
        assert_eq!(parse_unread_count(""), 0);
        assert_eq!(parse_unread_count("Chats (3)"), 0);
        assert_eq!(parse_unread_count("( 3) Messenger"), 0);
        assert_eq!(parse_unread_count("(-1) Messenger"), 0);
    }

    #[test]
    fn titles_with_marker_parse_the_count() {
        assert_eq!(parse_unread_count("(1) Messenger"), 1);
        assert_eq!(parse_unread_count("(42) Messenger"), 42);
        assert_eq!(parse_unread_count("(0) Messenger"), 0);
        assert_eq!(parse_unread_count("(7)Messenger"), 7);
    }

    #[test]
    fn absurd_digit_runs_parse_as_zero() {
        assert_eq!(parse_unread_count("(99999999999999999999) Messenger"), 0);
    }

    #[test]
    fn strictly_increasing_count_qualifies() {
        let mut state = TitleState::new("Messenger");
        assert_eq!(state.observe("(1) Messenger"), Some(1));
        assert_eq!(state.observe("(2) Messenger"), Some(2));
    }

    #[test]
    fn unchanged_or_decreasing_count_never_qualifies() {
        let mut state = TitleState::new("(3) Messenger");
        assert_eq!(state.observe("(3) Messenger · Chats"), None);
        assert_eq!(state.observe("(1) Messenger"), None);
        assert_eq!(state.observe("Messenger"), None);
    }

    #[test]
    fn jump_by_more_than_one_qualifies_once() {
        let mut state = TitleState::new("(1) Messenger");
        assert_eq!(state.observe("(4) Messenger"), Some(4));
    }

    #[test]
    fn state_updates_even_on_non_qualifying_change() {
        let mut state = TitleState::new("(3) Messenger");
        assert_eq!(state.observe("(1) Messenger"), None);
        assert_eq!(state.last_unread(), 1);
        // 2 > 1 after the decrease was recorded.
        assert_eq!(state.observe("(2) Messenger"), Some(2));
    }

    #[test]
    fn identical_title_is_not_an_observation() {
        let mut state = TitleState::new("(1) Messenger");
        assert_eq!(state.observe("(1) Messenger"), None);
        assert_eq!(state.last_unread(), 1);
    }

    #[test]
    fn initial_state_seeds_from_the_first_title() {
        let state = TitleState::new("(5) Messenger");
        assert_eq!(state.last_unread(), 5);
    }
}
