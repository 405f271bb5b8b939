//! A searchable, filterable, paginated movie list.
//!
//! Ties a [`QueryController`], a [`FilterSet`] and a [`ResultSet`] together.
//! Every state change that needs data returns the [`Command`] to run; the
//! response comes back through [`Listing::apply`].

use std::time::{Duration, Instant};

use marquee_api::catalog::{FilterSet, MovieSummary, PagedResult, Result};
use ratatui::widgets::TableState;

use crate::command::Command;
use crate::debounce::QueryController;
use crate::results::{PageTicket, ResultSet};

/// Which list of a view a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingTarget {
    /// The view's main (searchable) list.
    Main,
    /// The home view's top rated strip.
    TopRated,
}

/// What to fetch: a text search when `term` is non-blank, otherwise a
/// discovery listing with `filters`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// Committed search term.
    pub term: String,
    /// Discovery filters (ignored by text search).
    pub filters: FilterSet,
}

impl ListingQuery {
    /// Discovery query.
    #[must_use]
    pub const fn discover(filters: FilterSet) -> Self {
        Self {
            term: String::new(),
            filters,
        }
    }

    /// The trimmed search term, or `None` for a discovery query.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        Some(self.term.trim()).filter(|t| !t.is_empty())
    }
}

/// A movie list with its search box, filters, pages and selection.
#[derive(Debug)]
pub struct Listing {
    target: ListingTarget,
    query: QueryController,
    filters: FilterSet,
    results: ResultSet<MovieSummary>,
    /// Row selection.
    pub table_state: TableState,
}

impl Listing {
    /// Creates an idle listing.
    #[must_use]
    pub fn new(target: ListingTarget, filters: FilterSet, quiet: Duration) -> Self {
        Self {
            target,
            query: QueryController::new(quiet),
            filters,
            results: ResultSet::new(),
            table_state: TableState::default(),
        }
    }

    /// Target tag carried by this listing's commands.
    #[must_use]
    pub const fn target(&self) -> ListingTarget {
        self.target
    }

    /// Search box state.
    #[must_use]
    pub const fn search(&self) -> &QueryController {
        &self.query
    }

    /// Active filters.
    #[must_use]
    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Accumulated results.
    #[must_use]
    pub const fn results(&self) -> &ResultSet<MovieSummary> {
        &self.results
    }

    /// Query the current results belong to.
    #[must_use]
    pub fn current_query(&self) -> ListingQuery {
        ListingQuery {
            term: String::from(self.query.debounced_term()),
            filters: self.filters.clone(),
        }
    }

    /// Whether the list shows text search results.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.current_query().search_term().is_some()
    }

    /// Fetches the first page of the current query.
    pub fn refresh(&mut self) -> Command {
        let ticket = self.results.begin_fresh();
        self.table_state.select(None);
        self.command(ticket)
    }

    /// Types a character into the search box.
    pub fn push_char(&mut self, c: char, now: Instant) {
        self.query.push_char(c, now);
    }

    /// Deletes the last character of the search box.
    pub fn pop_char(&mut self, now: Instant) {
        self.query.pop_char(now);
    }

    /// Empties the search box.
    pub fn clear_search(&mut self, now: Instant) {
        self.query.clear(now);
    }

    /// Commits settled input. Returns a fresh fetch when the term changed.
    pub fn tick(&mut self, now: Instant) -> Option<Command> {
        self.query.poll(now).then(|| self.refresh())
    }

    /// Commits the search box immediately.
    pub fn submit(&mut self) -> Option<Command> {
        self.query.commit_now().then(|| self.refresh())
    }

    /// Replaces the filters. Returns a fresh fetch when they changed.
    pub fn set_filters(&mut self, filters: FilterSet) -> Option<Command> {
        if self.filters == filters {
            return None;
        }
        self.filters = filters;
        Some(self.refresh())
    }

    /// Fetches the next page, if there is one and nothing is loading.
    pub fn load_more(&mut self) -> Option<Command> {
        let ticket = self.results.begin_more()?;
        Some(self.command(ticket))
    }

    /// Applies a page response. Returns `false` when it was stale.
    pub fn apply(&mut self, ticket: PageTicket, result: Result<PagedResult<MovieSummary>>) -> bool {
        let applied = self.results.apply(ticket, result);
        if applied && self.table_state.selected().is_none() && !self.results.items().is_empty() {
            self.table_state.select(Some(0));
        }
        applied
    }

    /// Clears the inline error.
    pub fn dismiss_error(&mut self) {
        self.results.dismiss_error();
    }

    /// Selected row position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Selected movie.
    #[must_use]
    pub fn selected(&self) -> Option<&MovieSummary> {
        self.results.items().get(self.table_state.selected()?)
    }

    /// Moves the selection up.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_up(&mut self) {
        let current = self.cursor();
        if current > 0 {
            self.table_state.select(Some(current - 1));
        }
    }

    /// Moves the selection down.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        let current = self.cursor();
        if current + 1 < self.results.items().len() {
            self.table_state.select(Some(current + 1));
        }
    }

    /// Moves the selection up by a page.
    pub fn page_up(&mut self, page_size: usize) {
        if self.results.items().is_empty() {
            return;
        }
        let current = self.cursor();
        self.table_state
            .select(Some(current.saturating_sub(page_size)));
    }

    /// Moves the selection down by a page.
    pub fn page_down(&mut self, page_size: usize) {
        if self.results.items().is_empty() {
            return;
        }
        let max = self.results.items().len().saturating_sub(1);
        let current = self.cursor();
        self.table_state
            .select(Some(current.saturating_add(page_size).min(max)));
    }

    fn command(&self, ticket: PageTicket) -> Command {
        Command::FetchListing {
            target: self.target,
            ticket,
            query: self.current_query(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use marquee_api::catalog::SortKey;

    use super::*;
    use crate::debounce::DEFAULT_QUIET;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn movie(id: u64, title: &str) -> MovieSummary {
        serde_json::from_value(serde_json::json!({ "id": id, "title": title })).unwrap()
    }

    fn page(page: u32, total_pages: u32, ids: &[u64]) -> Result<PagedResult<MovieSummary>> {
        Ok(PagedResult {
            page,
            total_pages,
            total_results: 0,
            results: ids.iter().map(|&id| movie(id, "m")).collect(),
        })
    }

    fn unpack(command: Command) -> (PageTicket, ListingQuery) {
        match command {
            Command::FetchListing { ticket, query, .. } => (ticket, query),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_search_term_selects_source() {
        // Arrange
        let mut query = ListingQuery::discover(FilterSet::default());

        // Act & Assert
        assert_eq!(query.search_term(), None);
        query.term = String::from("   ");
        assert_eq!(query.search_term(), None);
        query.term = String::from(" heat ");
        assert_eq!(query.search_term(), Some("heat"));
    }

    #[test]
    fn test_typing_bat_then_batman_issues_one_search() {
        // Arrange
        let t0 = Instant::now();
        let mut listing = Listing::new(ListingTarget::Main, FilterSet::default(), DEFAULT_QUIET);
        let mut commands = Vec::new();

        // Act: "bat", pause 150ms, then "man", 200ms per keystroke at most
        for (offset, c) in [(0, 'b'), (100, 'a'), (200, 't'), (350, 'm'), (550, 'a'), (750, 'n')] {
            let now = t0 + ms(offset);
            listing.push_char(c, now);
            commands.extend(listing.tick(now));
        }
        for step in 1..=10 {
            commands.extend(listing.tick(t0 + ms(750 + step * 100)));
        }

        // Assert
        assert_eq!(commands.len(), 1);
        let (ticket, query) = unpack(commands.remove(0));
        assert_eq!(query.search_term(), Some("batman"));
        assert_eq!(ticket.page, 1);
        assert!(!ticket.append);
    }

    #[test]
    fn test_filter_change_replaces_results() {
        // Arrange
        let mut listing = Listing::new(ListingTarget::Main, FilterSet::default(), DEFAULT_QUIET);
        let (ticket, _) = unpack(listing.refresh());
        listing.apply(ticket, page(1, 5, &[1, 2, 3]));

        // Act
        let command = listing.set_filters(FilterSet::sorted_by(SortKey::RatingDesc));

        // Assert
        let (ticket, query) = unpack(command.unwrap());
        assert!(!ticket.append);
        assert_eq!(ticket.page, 1);
        assert_eq!(query.filters.sort, SortKey::RatingDesc);
        assert!(listing.results().items().is_empty());
        assert!(listing.results().is_loading());
    }

    #[test]
    fn test_same_filters_issue_nothing() {
        // Arrange
        let mut listing = Listing::new(ListingTarget::Main, FilterSet::default(), DEFAULT_QUIET);

        // Act & Assert
        assert!(listing.set_filters(FilterSet::default()).is_none());
    }

    #[test]
    fn test_load_more_appends_same_query() {
        // Arrange
        let mut listing = Listing::new(
            ListingTarget::Main,
            FilterSet::sorted_by(SortKey::PopularityDesc),
            DEFAULT_QUIET,
        );
        let (ticket, first_query) = unpack(listing.refresh());
        listing.apply(ticket, page(1, 2, &[1, 2]));

        // Act
        let (more, more_query) = unpack(listing.load_more().unwrap());
        listing.apply(more, page(2, 2, &[3]));

        // Assert
        assert_eq!(more_query, first_query);
        assert_eq!(more.page, 2);
        let ids: Vec<u64> = listing.results().items().iter().map(|m| m.id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert!(listing.load_more().is_none());
    }

    #[test]
    fn test_load_more_single_page_issues_nothing() {
        // Arrange
        let mut listing = Listing::new(ListingTarget::Main, FilterSet::default(), DEFAULT_QUIET);
        let (ticket, _) = unpack(listing.refresh());
        listing.apply(ticket, page(1, 1, &[1]));

        // Act
        let command = listing.load_more();

        // Assert
        assert!(command.is_none());
        assert_eq!(listing.results().items().len(), 1);
    }

    #[test]
    fn test_selection_follows_results() {
        // Arrange
        let mut listing = Listing::new(ListingTarget::Main, FilterSet::default(), DEFAULT_QUIET);
        let (ticket, _) = unpack(listing.refresh());
        assert!(listing.selected().is_none());

        // Act
        listing.apply(ticket, page(1, 1, &[10, 20, 30]));
        listing.move_down();
        listing.page_down(10);

        // Assert
        assert_eq!(listing.selected().unwrap().id, 30);
        listing.page_up(10);
        assert_eq!(listing.selected().unwrap().id, 10);
    }

    #[test]
    fn test_submit_commits_immediately() {
        // Arrange
        let t0 = Instant::now();
        let mut listing = Listing::new(ListingTarget::Main, FilterSet::default(), DEFAULT_QUIET);
        for c in "up".chars() {
            listing.push_char(c, t0);
        }

        // Act
        let command = listing.submit();

        // Assert
        let (_, query) = unpack(command.unwrap());
        assert_eq!(query.search_term(), Some("up"));
        assert!(listing.is_searching());
        assert!(listing.tick(t0 + ms(1_000)).is_none());
    }
}
