//! Browse filter panel state.

use marquee_api::catalog::{FilterSet, Genre, GenreId, Result, SortKey};

/// Earliest selectable release year.
pub const MIN_YEAR: u32 = 1900;

/// Filter panel: the active [`FilterSet`] plus the genre list it picks from.
///
/// Mutators return `true` when the filter set changed; the owning listing
/// then starts a fresh query.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct FilterController {
    filters: FilterSet,
    genres: Vec<Genre>,
    genre_error: Option<String>,
    genres_loading: bool,
    cursor: usize,
    latest_year: u32,
}

impl FilterController {
    /// Creates a panel with `filters` active. `latest_year` bounds the year
    /// selector.
    #[must_use]
    pub const fn new(filters: FilterSet, latest_year: u32) -> Self {
        Self {
            filters,
            genres: Vec::new(),
            genre_error: None,
            genres_loading: true,
            cursor: 0,
            latest_year,
        }
    }

    /// Active filters.
    #[must_use]
    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Available genres.
    #[must_use]
    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    /// Genre list fetch error.
    #[must_use]
    pub fn genre_error(&self) -> Option<&str> {
        self.genre_error.as_deref()
    }

    /// Whether the genre list is still loading.
    #[must_use]
    pub const fn genres_loading(&self) -> bool {
        self.genres_loading
    }

    /// Genre cursor.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Stores the genre list response.
    pub fn set_genres(&mut self, result: Result<Vec<Genre>>) {
        self.genres_loading = false;
        match result {
            Ok(genres) => {
                self.genres = genres;
                self.genre_error = None;
                self.cursor = self.cursor.min(self.genres.len().saturating_sub(1));
            }
            Err(e) => {
                tracing::warn!(error = %e, "genre list fetch failed");
                self.genre_error = Some(e.to_string());
            }
        }
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: GenreId) -> bool {
        self.filters.genres.contains(&id)
    }

    /// Moves the genre cursor up.
    pub const fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the genre cursor down.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.genres.len() {
            self.cursor += 1;
        }
    }

    /// Toggles a genre.
    pub fn toggle_genre(&mut self, id: GenreId) -> bool {
        if !self.filters.genres.remove(&id) {
            self.filters.genres.insert(id);
        }
        true
    }

    /// Toggles the genre under the cursor.
    pub fn toggle_genre_at_cursor(&mut self) -> bool {
        let Some(id) = self.genres.get(self.cursor).map(|g| g.id) else {
            return false;
        };
        self.toggle_genre(id)
    }

    /// Sets or clears the release year.
    pub fn set_year(&mut self, year: Option<u32>) -> bool {
        let year = year.map(|y| y.clamp(MIN_YEAR, self.latest_year));
        if self.filters.year == year {
            return false;
        }
        self.filters.year = year;
        true
    }

    /// Steps the release year by `delta`. With no year set, starts at the
    /// latest year.
    pub fn step_year(&mut self, delta: i32) -> bool {
        let next = self.filters.year.map_or(self.latest_year, |year| {
            year.saturating_add_signed(delta)
                .clamp(MIN_YEAR, self.latest_year)
        });
        self.set_year(Some(next))
    }

    /// Clears the release year.
    pub fn clear_year(&mut self) -> bool {
        self.set_year(None)
    }

    /// Sets the ordering.
    pub fn set_sort(&mut self, sort: SortKey) -> bool {
        if self.filters.sort == sort {
            return false;
        }
        self.filters.sort = sort;
        true
    }

    /// Advances to the next ordering.
    pub fn cycle_sort(&mut self) -> bool {
        self.set_sort(self.filters.sort.next())
    }

    /// Resets genres and year. Ordering is kept.
    pub fn clear(&mut self) -> bool {
        if self.filters.is_unfiltered() {
            return false;
        }
        self.filters.genres.clear();
        self.filters.year = None;
        true
    }
}
