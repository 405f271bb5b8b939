//! Catalog client module.
//!
//! Builds read-only requests against the TMDB API v3 endpoints
//! (search, discover, trending, genres, movie details) and normalizes
//! their success and error shapes.

mod api;
mod client;
mod error;
mod filter;
pub mod request;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{CatalogClient, CatalogClientBuilder, DEFAULT_BASE_URL, DEFAULT_MIN_VOTE_COUNT};
#[allow(clippy::module_name_repetitions)]
pub use error::{CatalogError, Result};
pub use filter::{FilterSet, GenreId, SortKey};
pub use request::{CatalogRequest, MAX_PAGE};
pub use types::{
    CastMember, Credits, Genre, GenreList, ImageAsset, ImageGallery, MovieDetail, MovieSummary,
    PagedResult, ProductionCompany, ProductionCountry, SpokenLanguage, Video, VideoList,
};
