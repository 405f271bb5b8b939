//! Path-based navigation targets.

use std::fmt;

/// A screen the UI can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// `/`: popular movies, search and the top rated strip.
    #[default]
    Home,
    /// `/browse`: filterable discovery.
    Browse,
    /// `/movie/:id`: movie details.
    Movie(u64),
    /// Any other path.
    NotFound(String),
}

impl Route {
    /// Parses a path. A trailing slash is ignored; unknown paths and
    /// non-numeric movie IDs become [`Route::NotFound`].
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');

        match normalized {
            "" => Self::Home,
            "/browse" => Self::Browse,
            _ => normalized
                .strip_prefix("/movie/")
                .and_then(|id| id.parse::<u64>().ok())
                .map_or_else(|| Self::NotFound(String::from(trimmed)), Self::Movie),
        }
    }

    /// Canonical path.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => String::from("/"),
            Self::Browse => String::from("/browse"),
            Self::Movie(id) => format!("/movie/{id}"),
            Self::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        // Arrange & Act & Assert
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/browse"), Route::Browse);
        assert_eq!(Route::parse("/browse/"), Route::Browse);
        assert_eq!(Route::parse("/movie/550"), Route::Movie(550));
    }

    #[test]
    fn test_parse_unknown_routes() {
        // Arrange & Act & Assert
        assert_eq!(
            Route::parse("/movie/abc"),
            Route::NotFound(String::from("/movie/abc"))
        );
        assert_eq!(
            Route::parse("/movie/"),
            Route::NotFound(String::from("/movie/"))
        );
        assert_eq!(
            Route::parse("/faq"),
            Route::NotFound(String::from("/faq"))
        );
    }

    #[test]
    fn test_path_round_trips() {
        // Arrange
        let routes = [Route::Home, Route::Browse, Route::Movie(27205)];

        // Act & Assert
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
        assert_eq!(Route::Movie(550).to_string(), "/movie/550");
    }
}
