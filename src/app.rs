use ratatui::widgets::ListState;
use tracing::debug;

use crate::sync::{FeedController, Stream};

/// How key presses are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys navigate the list and trigger actions.
    Normal,
    /// Keys edit the search query.
    Search,
}

pub struct App {
    /// The sync engine; the only owner of article data.
    pub feed: FeedController,
    /// List selection state for scrolling.
    pub list_state: ListState,
    pub mode: InputMode,
    /// Text in the search bar.  Every edit is pushed to the overlay.
    pub query_input: String,
    /// Whether the user has requested to quit.
    pub quit: bool,
}

impl App {
    pub fn new(feed: FeedController) -> Self {
        Self {
            feed,
            list_state: ListState::default(),
            mode: InputMode::Normal,
            query_input: String::new(),
            quit: false,
        }
    }

    fn displayed_len(&self) -> usize {
        self.feed.view().displayed().len()
    }

    /// Apply finished fetches and keep the selection inside the list.
    ///
    /// Called once per tick from the main loop.
    pub fn tick(&mut self) {
        if self.feed.drain() > 0 {
            self.clamp_selection();
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.displayed_len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    /// Infinite scroll: ask for the next page once the last item is reached.
    ///
    /// A failed page is not re-requested automatically; the user retries.
    fn on_end_reached(&mut self) {
        let view = self.feed.view();
        if view.stream() == Stream::Pagination && view.is_failed() {
            return;
        }
        if self.feed.request_next_page() {
            debug!("end of list reached; loading more");
        }
    }

    fn at_end(&self) -> bool {
        let len = self.displayed_len();
        len == 0 || self.list_state.selected() == Some(len - 1)
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        let len = self.displayed_len();
        if len > 0 {
            let i = match self.list_state.selected() {
                Some(i) => (i + 1).min(len - 1),
                None => 0,
            };
            self.list_state.select(Some(i));
        }
        if self.at_end() {
            self.on_end_reached();
        }
    }

    pub fn select_previous(&mut self) {
        if self.displayed_len() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if self.displayed_len() > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.displayed_len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
        self.on_end_reached();
    }

    // -- search --------------------------------------------------------------

    pub fn enter_search(&mut self) {
        self.mode = InputMode::Search;
    }

    /// Leave the search bar, keeping the query active.
    pub fn leave_search(&mut self) {
        self.mode = InputMode::Normal;
    }

    /// Drop the query and return to the feed.
    pub fn clear_search(&mut self) {
        self.query_input.clear();
        self.apply_query();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query_input.push(c);
        self.apply_query();
    }

    pub fn pop_query_char(&mut self) {
        if self.query_input.pop().is_some() {
            self.apply_query();
        }
    }

    fn apply_query(&mut self) {
        self.feed.set_query(&self.query_input);
        self.list_state.select(None);
        self.clamp_selection();
    }

    // -- recovery ------------------------------------------------------------

    /// Retry whichever stream is on screen, if it failed.
    pub fn retry(&mut self) {
        let stream = self.feed.view().stream();
        match stream {
            Stream::Pagination => self.feed.retry_current_page(),
            Stream::Search => self.feed.retry_search(),
        };
    }

    pub fn refresh(&mut self) {
        self.feed.refresh();
    }
}
