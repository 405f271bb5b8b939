use crossterm::event::KeyCode;
use marquee_api::catalog::MovieDetail;

use super::Action;
use crate::command::{Command, Outcome};
use crate::lightbox::Lightbox;
use crate::route::Route;

/// Movie detail screen. Owns the detail record for as long as it is shown.
#[derive(Debug)]
pub struct DetailView {
    id: u64,
    detail: Option<MovieDetail>,
    loading: bool,
    error: Option<String>,
    /// Open gallery, if any.
    pub lightbox: Option<Lightbox>,
    /// Vertical scroll offset of the detail body.
    pub scroll: u16,
}

impl DetailView {
    /// Creates a screen for movie `id`; details arrive after [`start`](Self::start).
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            detail: None,
            loading: false,
            error: None,
            lightbox: None,
            scroll: 0,
        }
    }

    /// Movie ID.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Loaded details.
    #[must_use]
    pub const fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    /// Whether details are in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetches the details.
    pub fn start(&mut self) -> Vec<Action> {
        self.loading = true;
        self.error = None;
        vec![Action::Fetch(Command::FetchDetail { id: self.id })]
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode) -> Vec<Action> {
        if let Some(lightbox) = self.lightbox.as_mut() {
            match key {
                KeyCode::Esc | KeyCode::Char('q') => self.lightbox = None,
                KeyCode::Left | KeyCode::Char('h') => lightbox.prev(),
                KeyCode::Right | KeyCode::Char('l') => lightbox.next(),
                _ => {}
            }
            return Vec::new();
        }

        match key {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Esc | KeyCode::Backspace => return vec![Action::Back],
            KeyCode::Char('h') => return vec![Action::Navigate(Route::Home)],
            KeyCode::Char('r') if !self.loading => return self.start(),
            KeyCode::Char('x') => self.error = None,
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Char('g') => self.open_gallery(0),
            KeyCode::Char('t') => {
                return self
                    .detail
                    .as_ref()
                    .and_then(MovieDetail::trailer)
                    .and_then(|video| video.youtube_url())
                    .map(Action::OpenUrl)
                    .into_iter()
                    .collect();
            }
            KeyCode::Char('w') => {
                return self
                    .detail
                    .as_ref()
                    .and_then(|d| d.homepage.clone())
                    .filter(|url| !url.trim().is_empty())
                    .map(Action::OpenUrl)
                    .into_iter()
                    .collect();
            }
            _ => {}
        }
        Vec::new()
    }

    /// Opens the backdrop gallery at `start`. No-op without images.
    pub fn open_gallery(&mut self, start: usize) {
        let len = self.detail.as_ref().map_or(0, |d| d.gallery().len());
        self.lightbox = Lightbox::open(len, start);
    }

    /// Applies the detail response.
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Detail { id, result } if id == self.id => {
                self.loading = false;
                match result {
                    Ok(detail) => {
                        self.detail = Some(detail);
                        self.error = None;
                    }
                    Err(e) => {
                        tracing::warn!(id, error = %e, "movie detail fetch failed");
                        self.error = Some(e.to_string());
                    }
                }
            }
            other => tracing::debug!(?other, "ignoring outcome on detail screen"),
        }
    }
}
