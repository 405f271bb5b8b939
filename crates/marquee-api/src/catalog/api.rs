//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::Result;
use super::filter::FilterSet;
use super::types::{Genre, MovieDetail, MovieSummary, PagedResult};

/// Movie catalog trait.
///
/// Abstracts catalog operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Searches movies by title text.
    ///
    /// `term` must be non-empty; rejecting empty input is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`](super::CatalogError) on transport failure,
    /// non-success status, or an undecodable body.
    async fn search(&self, term: &str, page: u32) -> Result<PagedResult<MovieSummary>>;

    /// Lists movies matching `filters`, ordered by `filters.sort`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`](super::CatalogError) on transport failure,
    /// non-success status, or an undecodable body.
    async fn discover(&self, filters: &FilterSet, page: u32) -> Result<PagedResult<MovieSummary>>;

    /// Fetches the movie genre list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`](super::CatalogError) on transport failure,
    /// non-success status, or an undecodable body.
    async fn genres(&self) -> Result<Vec<Genre>>;

    /// Fetches movie details including credits, videos, and images.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`](super::CatalogError) on transport failure,
    /// non-success status, or an undecodable body.
    async fn movie_detail(&self, id: u64) -> Result<MovieDetail>;
}
