use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use marquee_api::catalog::{FilterSet, SortKey};

use super::{Action, InputMode, handle_list_key, handle_search_key};
use crate::command::Outcome;
use crate::listing::{Listing, ListingTarget};
use crate::route::Route;

/// Focused list on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomePane {
    /// Popular movies or search results.
    #[default]
    Results,
    /// Top rated strip.
    TopRated,
}

/// Home screen: a searchable popular list and a top rated strip.
#[derive(Debug)]
pub struct HomeView {
    /// Popular movies, replaced by search results while a term is set.
    pub listing: Listing,
    /// Highest rated movies with enough votes.
    pub top_rated: Listing,
    /// Input mode.
    pub mode: InputMode,
    /// Focused list.
    pub pane: HomePane,
}

impl HomeView {
    /// Creates an idle home screen.
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            listing: Listing::new(
                ListingTarget::Main,
                FilterSet::sorted_by(SortKey::PopularityDesc),
                quiet,
            ),
            top_rated: Listing::new(
                ListingTarget::TopRated,
                FilterSet::sorted_by(SortKey::RatingDesc),
                quiet,
            ),
            mode: InputMode::Normal,
            pane: HomePane::Results,
        }
    }

    /// Fetches both lists.
    pub fn start(&mut self) -> Vec<Action> {
        vec![
            Action::Fetch(self.listing.refresh()),
            Action::Fetch(self.top_rated.refresh()),
        ]
    }

    /// Commits settled search input.
    pub fn tick(&mut self, now: Instant) -> Vec<Action> {
        self.listing.tick(now).map(Action::Fetch).into_iter().collect()
    }

    /// Focused list.
    #[must_use]
    pub const fn focused(&self) -> &Listing {
        match self.pane {
            HomePane::Results => &self.listing,
            HomePane::TopRated => &self.top_rated,
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode, now: Instant, page_size: usize) -> Vec<Action> {
        if self.mode == InputMode::Search {
            return handle_search_key(&mut self.listing, &mut self.mode, key, now);
        }

        match key {
            KeyCode::Char('q') => vec![Action::Quit],
            KeyCode::Esc => vec![Action::Back],
            KeyCode::Char('/') => {
                self.mode = InputMode::Search;
                self.pane = HomePane::Results;
                Vec::new()
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.pane = match self.pane {
                    HomePane::Results => HomePane::TopRated,
                    HomePane::TopRated => HomePane::Results,
                };
                Vec::new()
            }
            KeyCode::Char('b') => vec![Action::Navigate(Route::Browse)],
            _ => {
                let listing = match self.pane {
                    HomePane::Results => &mut self.listing,
                    HomePane::TopRated => &mut self.top_rated,
                };
                handle_list_key(listing, key, page_size).unwrap_or_default()
            }
        }
    }

    /// Applies a listing page.
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Listing {
                target: ListingTarget::Main,
                ticket,
                result,
            } => {
                self.listing.apply(ticket, result);
            }
            Outcome::Listing {
                target: ListingTarget::TopRated,
                ticket,
                result,
            } => {
                self.top_rated.apply(ticket, result);
            }
            other => tracing::debug!(?other, "ignoring outcome on home screen"),
        }
    }
}
