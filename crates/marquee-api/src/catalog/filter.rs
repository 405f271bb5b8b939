//! Discovery filters and sort keys.

use std::collections::BTreeSet;
use std::fmt;

/// TMDB genre ID.
pub type GenreId = u32;

/// Ordering of a discovery listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Weekly trending titles.
    #[default]
    Trending,
    /// Most popular first.
    PopularityDesc,
    /// Least popular first.
    PopularityAsc,
    /// Highest rated first.
    RatingDesc,
    /// Newest release first.
    ReleaseDesc,
}

impl SortKey {
    /// All sort keys in cycling order.
    pub const ALL: [Self; 5] = [
        Self::Trending,
        Self::PopularityDesc,
        Self::PopularityAsc,
        Self::RatingDesc,
        Self::ReleaseDesc,
    ];

    /// Value of the `sort_by` discover parameter.
    ///
    /// `Trending` has no discover equivalent of its own and ranks by
    /// popularity when it has to go through discovery.
    #[must_use]
    pub const fn sort_by(self) -> &'static str {
        match self {
            Self::Trending | Self::PopularityDesc => "popularity.desc",
            Self::PopularityAsc => "popularity.asc",
            Self::RatingDesc => "vote_average.desc",
            Self::ReleaseDesc => "primary_release_date.desc",
        }
    }

    /// Whether this ordering ranks by rating or popularity, where titles
    /// with very few votes would skew the listing.
    #[must_use]
    pub const fn ranks_by_quality(self) -> bool {
        matches!(
            self,
            Self::Trending | Self::PopularityDesc | Self::PopularityAsc | Self::RatingDesc
        )
    }

    /// Returns the next key in cycling order (wraps around).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Trending => Self::PopularityDesc,
            Self::PopularityDesc => Self::PopularityAsc,
            Self::PopularityAsc => Self::RatingDesc,
            Self::RatingDesc => Self::ReleaseDesc,
            Self::ReleaseDesc => Self::Trending,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trending => "Trending",
            Self::PopularityDesc => "Most popular",
            Self::PopularityAsc => "Least popular",
            Self::RatingDesc => "Top rated",
            Self::ReleaseDesc => "Newest",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Filters for a discovery listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    /// Selected genres (all must match).
    pub genres: BTreeSet<GenreId>,
    /// Primary release year.
    pub year: Option<u32>,
    /// Ordering.
    pub sort: SortKey,
}

impl FilterSet {
    /// Creates a filter set with the given ordering and no other filters.
    #[must_use]
    pub const fn sorted_by(sort: SortKey) -> Self {
        Self {
            genres: BTreeSet::new(),
            year: None,
            sort,
        }
    }

    /// Adds a genre filter.
    #[must_use]
    pub fn genre(mut self, id: GenreId) -> Self {
        self.genres.insert(id);
        self
    }

    /// Sets the release year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Returns `true` when neither genres nor year narrow the listing.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.genres.is_empty() && self.year.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_through_all_keys() {
        // Arrange
        let mut key = SortKey::Trending;
        let mut seen = Vec::new();

        // Act
        for _ in 0..SortKey::ALL.len() {
            seen.push(key);
            key = key.next();
        }

        // Assert
        assert_eq!(seen, SortKey::ALL);
        assert_eq!(key, SortKey::Trending);
    }

    #[test]
    fn test_release_sort_is_not_quality_ranked() {
        // Arrange & Act & Assert
        assert!(SortKey::RatingDesc.ranks_by_quality());
        assert!(SortKey::PopularityAsc.ranks_by_quality());
        assert!(!SortKey::ReleaseDesc.ranks_by_quality());
    }

    #[test]
    fn test_filter_builder() {
        // Arrange & Act
        let filters = FilterSet::sorted_by(SortKey::RatingDesc)
            .genre(28)
            .genre(12)
            .year(1999);

        // Assert
        assert_eq!(filters.genres.iter().copied().collect::<Vec<_>>(), [12, 28]);
        assert_eq!(filters.year, Some(1999));
        assert!(!filters.is_unfiltered());
        assert!(FilterSet::default().is_unfiltered());
    }
}
