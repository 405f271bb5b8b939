//! Pure request builders.
//!
//! Each function maps a catalog operation onto a path relative to the API
//! base URL and its query parameters. Transport concerns (auth header,
//! language, timeouts) are added by the client.

use super::filter::{FilterSet, SortKey};

/// Highest page number the catalog serves.
pub const MAX_PAGE: u32 = 500;

/// A catalog GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    /// Path relative to the base URL (no leading slash).
    pub path: String,
    /// Query parameters in emission order.
    pub query: Vec<(&'static str, String)>,
}

impl CatalogRequest {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Returns the value of the first parameter named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Clamps a page number into `1..=MAX_PAGE`.
#[must_use]
pub const fn clamp_page(page: u32) -> u32 {
    if page == 0 {
        1
    } else if page > MAX_PAGE {
        MAX_PAGE
    } else {
        page
    }
}

/// Text search (`search/movie`).
///
/// The term is sent as-is; callers must not issue a search for an empty term.
#[must_use]
pub fn search(term: &str, page: u32) -> CatalogRequest {
    CatalogRequest::new("search/movie")
        .param("query", term)
        .param("page", clamp_page(page))
        .param("include_adult", false)
}

/// Weekly trending listing (`trending/movie/week`).
#[must_use]
pub fn trending(page: u32) -> CatalogRequest {
    CatalogRequest::new("trending/movie/week").param("page", clamp_page(page))
}

/// Filtered and sorted listing.
///
/// Trending without genre or year filters goes to the trending endpoint;
/// everything else goes through `discover/movie`. Quality-ranked orderings
/// carry a `vote_count.gte` floor of `min_vote_count`.
#[must_use]
pub fn discover(filters: &FilterSet, page: u32, min_vote_count: u32) -> CatalogRequest {
    if filters.sort == SortKey::Trending && filters.is_unfiltered() {
        return trending(page);
    }

    let mut request = CatalogRequest::new("discover/movie")
        .param("sort_by", filters.sort.sort_by())
        .param("page", clamp_page(page))
        .param("include_adult", false);

    if !filters.genres.is_empty() {
        let ids: Vec<String> = filters.genres.iter().map(ToString::to_string).collect();
        request = request.param("with_genres", ids.join(","));
    }
    if let Some(year) = filters.year {
        request = request.param("primary_release_year", year);
    }
    if filters.sort.ranks_by_quality() {
        request = request.param("vote_count.gte", min_vote_count);
    }

    request
}

/// Movie genre list (`genre/movie/list`).
#[must_use]
pub fn genres() -> CatalogRequest {
    CatalogRequest::new("genre/movie/list")
}

/// Movie details with credits, videos, and images appended.
#[must_use]
pub fn movie_detail(id: u64) -> CatalogRequest {
    CatalogRequest::new(format!("movie/{id}"))
        .param("append_to_response", "videos,credits,images")
}
