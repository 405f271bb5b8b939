//! Image CDN URL construction.

use std::fmt;

/// Base URL of the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Rendition width served by the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// 185px wide (profile pictures, thumbnails).
    W185,
    /// 500px wide (posters).
    W500,
    /// 780px wide.
    W780,
    /// 1280px wide (backdrops).
    W1280,
    /// Original upload.
    Original,
}

impl ImageSize {
    /// CDN path segment for this size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W185 => "w185",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::W1280 => "w1280",
            Self::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a CDN URL for an image path.
///
/// Returns `None` when the path is absent or empty, so callers can render a
/// placeholder instead.
#[must_use]
pub fn image_url(path: Option<&str>, size: ImageSize) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    let path = path.strip_prefix('/').unwrap_or(path);
    Some(format!("{IMAGE_BASE_URL}{size}/{path}"))
}
