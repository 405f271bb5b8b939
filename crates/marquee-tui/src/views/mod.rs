//! Screens and their key handling.
//!
//! Views never perform I/O. Key presses and ticks produce [`Action`]s that
//! the app carries out; fetch results come back through `apply`.

/// Filterable discovery screen.
pub mod browse;
/// Movie detail screen.
pub mod detail;
/// Home screen.
pub mod home;

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};

use crate::command::{Command, Outcome};
use crate::listing::Listing;
use crate::route::Route;

use self::browse::BrowseView;
use self::detail::DetailView;
use self::home::HomeView;

/// Something a view asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run a catalog fetch.
    Fetch(Command),
    /// Go to a route, pushing the current one on the back stack.
    Navigate(Route),
    /// Return to the previous route.
    Back,
    /// Open a URL in the system browser.
    OpenUrl(String),
    /// Exit the UI.
    Quit,
}

/// Where typed characters go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are commands.
    #[default]
    Normal,
    /// Keys edit the search box.
    Search,
}

/// Settings shared by every view.
#[derive(Debug, Clone, Copy)]
pub struct ViewSettings {
    /// Search debounce quiet period.
    pub quiet: Duration,
    /// Latest selectable release year.
    pub latest_year: u32,
}

/// The active screen.
#[derive(Debug)]
pub enum View {
    /// `/`.
    Home(HomeView),
    /// `/browse`.
    Browse(BrowseView),
    /// `/movie/:id`.
    Detail(DetailView),
    /// Unknown path.
    NotFound(String),
}

impl View {
    /// Creates a fresh view for `route`.
    #[must_use]
    pub fn for_route(route: &Route, settings: ViewSettings) -> Self {
        match route {
            Route::Home => Self::Home(HomeView::new(settings.quiet)),
            Route::Browse => Self::Browse(BrowseView::new(settings.quiet, settings.latest_year)),
            Route::Movie(id) => Self::Detail(DetailView::new(*id)),
            Route::NotFound(path) => Self::NotFound(path.clone()),
        }
    }

    /// Initial fetches.
    pub fn start(&mut self) -> Vec<Action> {
        match self {
            Self::Home(view) => view.start(),
            Self::Browse(view) => view.start(),
            Self::Detail(view) => view.start(),
            Self::NotFound(_) => Vec::new(),
        }
    }

    /// Advances debounced input.
    pub fn tick(&mut self, now: Instant) -> Vec<Action> {
        match self {
            Self::Home(view) => view.tick(now),
            Self::Browse(view) => view.tick(now),
            Self::Detail(_) | Self::NotFound(_) => Vec::new(),
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant, page_size: usize) -> Vec<Action> {
        match self {
            Self::Home(view) => view.handle_key(key.code, now, page_size),
            Self::Browse(view) => view.handle_key(key.code, now, page_size),
            Self::Detail(view) => view.handle_key(key.code),
            Self::NotFound(_) => match key.code {
                KeyCode::Char('q') => vec![Action::Quit],
                KeyCode::Enter | KeyCode::Char('h') => vec![Action::Navigate(Route::Home)],
                KeyCode::Esc | KeyCode::Backspace => vec![Action::Back],
                _ => Vec::new(),
            },
        }
    }

    /// Applies a fetch outcome.
    pub fn apply(&mut self, outcome: Outcome) {
        match self {
            Self::Home(view) => view.apply(outcome),
            Self::Browse(view) => view.apply(outcome),
            Self::Detail(view) => view.apply(outcome),
            Self::NotFound(_) => tracing::debug!(?outcome, "ignoring outcome on not-found page"),
        }
    }

    /// Whether keys currently edit a search box.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        match self {
            Self::Home(view) => matches!(view.mode, InputMode::Search),
            Self::Browse(view) => matches!(view.mode, InputMode::Search),
            Self::Detail(_) | Self::NotFound(_) => false,
        }
    }
}

/// Search box editing keys.
fn handle_search_key(
    listing: &mut Listing,
    mode: &mut InputMode,
    key: KeyCode,
    now: Instant,
) -> Vec<Action> {
    match key {
        KeyCode::Esc => {
            listing.clear_search(now);
            *mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            *mode = InputMode::Normal;
            return listing.submit().map(Action::Fetch).into_iter().collect();
        }
        KeyCode::Backspace => listing.pop_char(now),
        KeyCode::Char(c) => listing.push_char(c, now),
        _ => {}
    }
    Vec::new()
}

/// Result list keys shared by the home and browse screens. Returns `None`
/// for keys the list does not handle.
fn handle_list_key(listing: &mut Listing, key: KeyCode, page_size: usize) -> Option<Vec<Action>> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => listing.move_up(),
        KeyCode::Down | KeyCode::Char('j') => listing.move_down(),
        KeyCode::PageUp => listing.page_up(page_size),
        KeyCode::PageDown => listing.page_down(page_size),
        KeyCode::Enter => {
            return Some(
                listing
                    .selected()
                    .map(|movie| Action::Navigate(Route::Movie(movie.id)))
                    .into_iter()
                    .collect(),
            );
        }
        KeyCode::Char('m') => {
            return Some(listing.load_more().map(Action::Fetch).into_iter().collect());
        }
        KeyCode::Char('r') => return Some(vec![Action::Fetch(listing.refresh())]),
        KeyCode::Char('x') => listing.dismiss_error(),
        _ => return None,
    }
    Some(Vec::new())
}
