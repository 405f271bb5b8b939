//! Paginated result accumulation.

use marquee_api::catalog::{PagedResult, Result};

/// Load phase of a [`ResultSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// First page in flight.
    Loading,
    /// At least one page applied (possibly with an inline "load more" error).
    Loaded,
    /// First page failed.
    Failed,
    /// Next page in flight; existing items stay visible.
    LoadingMore,
}

/// Identifies one page request issued by a [`ResultSet`].
///
/// A response is applied only if its generation still matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    /// Generation the request belongs to.
    pub generation: u64,
    /// Requested page.
    pub page: u32,
    /// Whether the page extends the current items.
    pub append: bool,
}

/// Items accumulated for one query and filter combination.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct ResultSet<T> {
    items: Vec<T>,
    current_page: u32,
    total_pages: u32,
    phase: Phase,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for ResultSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResultSet<T> {
    /// Creates an idle, empty result set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 0,
            phase: Phase::Idle,
            error: None,
            generation: 0,
        }
    }

    /// Items in catalog order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Last applied page.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total reachable pages reported by the catalog.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Inline error message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current request generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// First page in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// Next page in flight.
    #[must_use]
    pub const fn is_loading_more(&self) -> bool {
        matches!(self.phase, Phase::LoadingMore)
    }

    /// Whether another page can be requested.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        matches!(self.phase, Phase::Loaded) && self.current_page < self.total_pages
    }

    /// Loaded successfully with nothing to show.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.phase == Phase::Loaded && self.items.is_empty()
    }

    /// Starts a fresh query: clears items and invalidates in-flight pages.
    pub fn begin_fresh(&mut self) -> PageTicket {
        self.generation = self.generation.wrapping_add(1);
        self.items.clear();
        self.current_page = 1;
        self.total_pages = 0;
        self.error = None;
        self.phase = Phase::Loading;
        PageTicket {
            generation: self.generation,
            page: 1,
            append: false,
        }
    }

    /// Requests the next page, or `None` when there is none or a load is
    /// already in flight.
    pub fn begin_more(&mut self) -> Option<PageTicket> {
        if !self.has_more() {
            return None;
        }
        self.phase = Phase::LoadingMore;
        self.error = None;
        Some(PageTicket {
            generation: self.generation,
            page: self.current_page.saturating_add(1),
            append: true,
        })
    }

    /// Applies a page response. Returns `false` for stale responses, which
    /// leave the set untouched.
    pub fn apply(&mut self, ticket: PageTicket, result: Result<PagedResult<T>>) -> bool {
        let expected = if ticket.append {
            Phase::LoadingMore
        } else {
            Phase::Loading
        };
        if ticket.generation != self.generation || self.phase != expected {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale page"
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.total_pages = page.reachable_pages();
                self.current_page = ticket.page;
                if ticket.append {
                    self.items.extend(page.results);
                } else {
                    self.items = page.results;
                }
                self.error = None;
                self.phase = Phase::Loaded;
            }
            Err(e) => {
                tracing::warn!(page = ticket.page, error = %e, "page fetch failed");
                self.error = Some(e.to_string());
                if ticket.append {
                    self.phase = Phase::Loaded;
                } else {
                    self.items.clear();
                    self.phase = Phase::Failed;
                }
            }
        }
        true
    }

    /// Clears the inline error.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
