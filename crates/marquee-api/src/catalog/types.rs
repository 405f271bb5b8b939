//! Catalog response types.

use serde::{Deserialize, Deserializer};

use super::filter::GenreId;
use super::request::MAX_PAGE;

// --- Listings ---

/// A paginated listing (`search/movie`, `discover/movie`, `trending/movie/week`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PagedResult<T> {
    /// Current page number.
    #[serde(default = "first_page")]
    pub page: u32,
    /// Results on this page.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub results: Vec<T>,
    /// Total number of pages.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub total_results: u32,
}

const fn first_page() -> u32 {
    1
}

/// Deserializes an explicit `null` as the type's default value.
fn deserialize_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl<T> PagedResult<T> {
    /// Total pages reachable through the API (the catalog stops at page 500).
    #[must_use]
    pub fn reachable_pages(&self) -> u32 {
        self.total_pages.min(MAX_PAGE)
    }
}

/// A single movie in a listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty or null).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote average.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub popularity: f64,
    /// Genre IDs.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub genre_ids: Vec<GenreId>,
    /// Adult flag.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub adult: bool,
}

impl MovieSummary {
    /// Release year (first four characters of the release date).
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }
}

/// Extracts `YYYY` from a `YYYY-MM-DD` date.
fn release_year(date: Option<&str>) -> Option<&str> {
    date.and_then(|d| d.get(..4))
        .filter(|y| y.bytes().all(|b| b.is_ascii_digit()))
}

// --- Genres ---

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: GenreId,
    /// Genre name.
    pub name: String,
}

/// Response from `genre/movie/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    /// Genres.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub genres: Vec<Genre>,
}

// --- Movie Details ---

/// Response from `movie/{id}?append_to_response=videos,credits,images`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieDetail {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release status (e.g. "Released").
    #[serde(default)]
    pub status: Option<String>,
    /// Release date (YYYY-MM-DD).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Adult flag.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub adult: bool,
    /// Vote average.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub vote_count: u32,
    /// Budget in USD (0 when unknown).
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub budget: u64,
    /// Revenue in USD (0 when unknown).
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub revenue: u64,
    /// Official homepage.
    #[serde(default)]
    pub homepage: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Genres.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub genres: Vec<Genre>,
    /// Production companies.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub production_companies: Vec<ProductionCompany>,
    /// Production countries.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub production_countries: Vec<ProductionCountry>,
    /// Spoken languages.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub spoken_languages: Vec<SpokenLanguage>,
    /// Appended credits.
    #[serde(default)]
    pub credits: Option<Credits>,
    /// Appended videos.
    #[serde(default)]
    pub videos: Option<VideoList>,
    /// Appended images.
    #[serde(default)]
    pub images: Option<ImageGallery>,
}

impl MovieDetail {
    /// Release year.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }

    /// First YouTube trailer or teaser.
    #[must_use]
    pub fn trailer(&self) -> Option<&Video> {
        self.videos
            .as_ref()?
            .results
            .iter()
            .find(|v| v.is_youtube_trailer())
    }

    /// The first `limit` billed cast members.
    #[must_use]
    pub fn top_cast(&self, limit: usize) -> &[CastMember] {
        let cast = self.credits.as_ref().map_or(&[][..], |c| c.cast.as_slice());
        cast.get(..limit.min(cast.len())).unwrap_or_default()
    }

    /// Backdrops that can be shown in the gallery.
    #[must_use]
    pub fn gallery(&self) -> Vec<&ImageAsset> {
        self.images
            .as_ref()
            .map(|images| {
                images
                    .backdrops
                    .iter()
                    .filter(|img| !img.file_path.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Production company.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductionCompany {
    /// Company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
}

/// Production country.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductionCountry {
    /// ISO 3166-1 code.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub iso_3166_1: String,
    /// Country name.
    pub name: String,
}

/// Spoken language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpokenLanguage {
    /// ISO 639-1 code.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub iso_639_1: String,
    /// English name.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub english_name: String,
    /// Native name.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub name: String,
}

/// Appended credits.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Credits {
    /// Cast in billing order.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub cast: Vec<CastMember>,
}

/// Cast member.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CastMember {
    /// Person ID.
    pub id: u64,
    /// Credit-specific cast ID.
    #[serde(default)]
    pub cast_id: Option<u64>,
    /// Person name.
    pub name: String,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
    /// Billing order.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub order: u32,
}

/// Appended videos.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VideoList {
    /// Videos.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub results: Vec<Video>,
}

/// Video (trailer, teaser, clip, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Video {
    /// Site-specific key.
    pub key: String,
    /// Hosting site (e.g. "YouTube").
    pub site: String,
    /// Video type (e.g. "Trailer", "Teaser").
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub name: String,
}

impl Video {
    /// Whether this is a YouTube trailer or teaser.
    #[must_use]
    pub fn is_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && (self.kind == "Trailer" || self.kind == "Teaser")
    }

    /// Watch URL for YouTube videos.
    #[must_use]
    pub fn youtube_url(&self) -> Option<String> {
        (self.site == "YouTube").then(|| format!("https://www.youtube.com/watch?v={}", self.key))
    }
}

/// Appended images.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ImageGallery {
    /// Backdrop images.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub backdrops: Vec<ImageAsset>,
    /// Poster images.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub posters: Vec<ImageAsset>,
}

/// A single image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageAsset {
    /// CDN path.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub file_path: String,
    /// Width in pixels.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub width: u32,
    /// Height in pixels.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub height: u32,
}

// --- Error Response ---

/// Catalog error response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    /// TMDB error code.
    #[serde(default)]
    #[allow(dead_code)]
    pub status_code: u32,
    /// Error message.
    #[serde(default)]
    pub status_message: String,
}
