use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use marquee_api::catalog::FilterSet;

use super::{Action, InputMode, handle_list_key, handle_search_key};
use crate::command::{Command, Outcome};
use crate::filters::FilterController;
use crate::listing::{Listing, ListingTarget};
use crate::route::Route;

/// Focused pane on the browse screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowsePane {
    /// Result list.
    #[default]
    Results,
    /// Genre list of the filter panel.
    Filters,
}

/// Browse screen: search box, filter panel and result list.
#[derive(Debug)]
pub struct BrowseView {
    /// Results for the current term or filters.
    pub listing: Listing,
    /// Filter panel.
    pub filters: FilterController,
    /// Input mode.
    pub mode: InputMode,
    /// Focused pane.
    pub pane: BrowsePane,
}

impl BrowseView {
    /// Creates an idle browse screen with no filters.
    #[must_use]
    pub fn new(quiet: Duration, latest_year: u32) -> Self {
        Self {
            listing: Listing::new(ListingTarget::Main, FilterSet::default(), quiet),
            filters: FilterController::new(FilterSet::default(), latest_year),
            mode: InputMode::Normal,
            pane: BrowsePane::Results,
        }
    }

    /// Fetches the first page and the genre list.
    pub fn start(&mut self) -> Vec<Action> {
        vec![
            Action::Fetch(self.listing.refresh()),
            Action::Fetch(Command::FetchGenres),
        ]
    }

    /// Commits settled search input.
    pub fn tick(&mut self, now: Instant) -> Vec<Action> {
        self.listing.tick(now).map(Action::Fetch).into_iter().collect()
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode, now: Instant, page_size: usize) -> Vec<Action> {
        if self.mode == InputMode::Search {
            return handle_search_key(&mut self.listing, &mut self.mode, key, now);
        }

        match key {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Esc => return vec![Action::Back],
            KeyCode::Char('h') => return vec![Action::Navigate(Route::Home)],
            KeyCode::Char('/') => {
                self.mode = InputMode::Search;
                return Vec::new();
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.pane = match self.pane {
                    BrowsePane::Results => BrowsePane::Filters,
                    BrowsePane::Filters => BrowsePane::Results,
                };
                return Vec::new();
            }
            KeyCode::Char('s') => {
                let changed = self.filters.cycle_sort();
                return self.sync_filters(changed);
            }
            KeyCode::Char('+' | ']') => {
                let changed = self.filters.step_year(1);
                return self.sync_filters(changed);
            }
            KeyCode::Char('-' | '[') => {
                let changed = self.filters.step_year(-1);
                return self.sync_filters(changed);
            }
            KeyCode::Char('y') => {
                let changed = self.filters.clear_year();
                return self.sync_filters(changed);
            }
            KeyCode::Char('c') => {
                let changed = self.filters.clear();
                return self.sync_filters(changed);
            }
            _ => {}
        }

        match self.pane {
            BrowsePane::Filters => match key {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.filters.move_up();
                    Vec::new()
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.filters.move_down();
                    Vec::new()
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    let changed = self.filters.toggle_genre_at_cursor();
                    self.sync_filters(changed)
                }
                _ => Vec::new(),
            },
            BrowsePane::Results => {
                handle_list_key(&mut self.listing, key, page_size).unwrap_or_default()
            }
        }
    }

    /// Pushes changed filters into the listing, which restarts from page 1.
    fn sync_filters(&mut self, changed: bool) -> Vec<Action> {
        if !changed {
            return Vec::new();
        }
        self.listing
            .set_filters(self.filters.filters().clone())
            .map(Action::Fetch)
            .into_iter()
            .collect()
    }

    /// Applies a listing page or the genre list.
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Listing {
                target: ListingTarget::Main,
                ticket,
                result,
            } => {
                self.listing.apply(ticket, result);
            }
            Outcome::Genres(result) => self.filters.set_genres(result),
            other => tracing::debug!(?other, "ignoring outcome on browse screen"),
        }
    }
}
