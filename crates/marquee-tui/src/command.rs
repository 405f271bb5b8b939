//! Fetch commands and their outcomes.
//!
//! Views describe the data they need as [`Command`] values. The app runs them
//! with [`spawn`] and routes each [`Outcome`] back to the view that asked,
//! identified by its [`ViewKey`].

use std::sync::Arc;

use marquee_api::catalog::{
    CatalogApi, CatalogError, Genre, MovieDetail, MovieSummary, PagedResult, Result,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::instrument;

use crate::listing::{ListingQuery, ListingTarget};
use crate::results::PageTicket;

/// Identifies a view instance. Every navigation creates a new key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewKey(u64);

impl ViewKey {
    /// Returns the key following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A catalog fetch requested by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// One page of a listing.
    FetchListing {
        /// Listing the page belongs to.
        target: ListingTarget,
        /// Page request identity.
        ticket: PageTicket,
        /// Search term or discovery filters.
        query: ListingQuery,
    },
    /// The genre list.
    FetchGenres,
    /// Full details of one movie.
    FetchDetail {
        /// TMDB movie ID.
        id: u64,
    },
}

/// Result of a [`Command`].
#[derive(Debug)]
pub enum Outcome {
    /// Listing page.
    Listing {
        /// Listing the page belongs to.
        target: ListingTarget,
        /// Ticket of the originating request.
        ticket: PageTicket,
        /// Page or failure.
        result: Result<PagedResult<MovieSummary>>,
    },
    /// Genre list.
    Genres(Result<Vec<Genre>>),
    /// Movie details.
    Detail {
        /// Requested movie ID.
        id: u64,
        /// Details or failure.
        result: Result<MovieDetail>,
    },
}

/// An outcome addressed to a view.
#[derive(Debug)]
pub struct Delivery {
    /// View that issued the command.
    pub view: ViewKey,
    /// Command outcome.
    pub outcome: Outcome,
}

impl Command {
    /// Resolves the command to a failure without running it.
    #[must_use]
    pub fn fail(self, error: CatalogError) -> Outcome {
        match self {
            Self::FetchListing { target, ticket, .. } => Outcome::Listing {
                target,
                ticket,
                result: Err(error),
            },
            Self::FetchGenres => Outcome::Genres(Err(error)),
            Self::FetchDetail { id } => Outcome::Detail {
                id,
                result: Err(error),
            },
        }
    }
}

/// Runs one command against the catalog.
#[instrument(skip_all)]
pub async fn execute<C: CatalogApi + Sync>(catalog: &C, command: Command) -> Outcome {
    match command {
        Command::FetchListing {
            target,
            ticket,
            query,
        } => {
            tracing::debug!(?target, page = ticket.page, term = %query.term, "fetching listing");
            let result = match query.search_term() {
                Some(term) => catalog.search(term, ticket.page).await,
                None => catalog.discover(&query.filters, ticket.page).await,
            };
            Outcome::Listing {
                target,
                ticket,
                result,
            }
        }
        Command::FetchGenres => Outcome::Genres(catalog.genres().await),
        Command::FetchDetail { id } => {
            tracing::debug!(id, "fetching movie detail");
            Outcome::Detail {
                id,
                result: catalog.movie_detail(id).await,
            }
        }
    }
}

/// Runs `command` on the tokio runtime and sends its outcome to `tx`.
///
/// Without a catalog the command fails immediately with
/// [`CatalogError::MissingCredential`].
pub fn spawn<C>(
    catalog: Option<&Arc<C>>,
    view: ViewKey,
    command: Command,
    tx: &UnboundedSender<Delivery>,
) where
    C: CatalogApi + Send + Sync + 'static,
{
    let Some(catalog) = catalog else {
        let outcome = command.fail(CatalogError::MissingCredential);
        if tx.send(Delivery { view, outcome }).is_err() {
            tracing::debug!("outcome channel closed");
        }
        return;
    };

    let catalog = Arc::clone(catalog);
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = execute(catalog.as_ref(), command).await;
        if tx.send(Delivery { view, outcome }).is_err() {
            tracing::debug!("outcome channel closed");
        }
    });
}

#[cfg(test)]
pub(crate) mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex;

    use marquee_api::catalog::{FilterSet, SortKey};
    use tokio::sync::mpsc;

    use super::*;

    /// In-memory catalog that records every call.
    #[derive(Debug, Default)]
    pub(crate) struct MockCatalog {
        pub calls: Mutex<Vec<String>>,
        pub total_pages: u32,
    }

    impl MockCatalog {
        pub(crate) fn with_pages(total_pages: u32) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                total_pages,
            }
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn page(&self, page: u32, title: &str) -> PagedResult<MovieSummary> {
            let movie = serde_json::from_value(serde_json::json!({
                "id": u64::from(page) * 100,
                "title": title,
                "release_date": "1999-10-15",
                "vote_average": 8.4,
            }))
            .unwrap();
            PagedResult {
                page,
                total_pages: self.total_pages,
                total_results: self.total_pages,
                results: vec![movie],
            }
        }
    }

    impl CatalogApi for MockCatalog {
        async fn search(&self, term: &str, page: u32) -> Result<PagedResult<MovieSummary>> {
            self.record(format!("search:{term}:{page}"));
            Ok(self.page(page, term))
        }

        async fn discover(
            &self,
            filters: &FilterSet,
            page: u32,
        ) -> Result<PagedResult<MovieSummary>> {
            self.record(format!("discover:{}:{page}", filters.sort.sort_by()));
            Ok(self.page(page, filters.sort.label()))
        }

        async fn genres(&self) -> Result<Vec<Genre>> {
            self.record(String::from("genres"));
            Ok(vec![Genre {
                id: 28,
                name: String::from("Action"),
            }])
        }

        async fn movie_detail(&self, id: u64) -> Result<MovieDetail> {
            self.record(format!("detail:{id}"));
            if id == 404 {
                return Err(CatalogError::Api {
                    status: 404,
                    message: String::from("The resource you requested could not be found."),
                });
            }
            Ok(serde_json::from_value(serde_json::json!({ "id": id, "title": "Fight Club" }))
                .unwrap())
        }
    }

    fn ticket() -> PageTicket {
        PageTicket {
            generation: 1,
            page: 1,
            append: false,
        }
    }

    #[tokio::test]
    async fn test_execute_search_when_term_present() {
        // Arrange
        let catalog = MockCatalog::with_pages(1);
        let command = Command::FetchListing {
            target: ListingTarget::Main,
            ticket: ticket(),
            query: ListingQuery {
                term: String::from("batman"),
                filters: FilterSet::sorted_by(SortKey::RatingDesc),
            },
        };

        // Act
        let outcome = execute(&catalog, command).await;

        // Assert
        assert_eq!(catalog.calls(), ["search:batman:1"]);
        assert!(matches!(outcome, Outcome::Listing { result: Ok(_), .. }));
    }

    #[tokio::test]
    async fn test_execute_discover_when_term_blank() {
        // Arrange
        let catalog = MockCatalog::with_pages(1);
        let command = Command::FetchListing {
            target: ListingTarget::TopRated,
            ticket: ticket(),
            query: ListingQuery::discover(FilterSet::sorted_by(SortKey::RatingDesc)),
        };

        // Act
        let outcome = execute(&catalog, command).await;

        // Assert
        assert_eq!(catalog.calls(), ["discover:vote_average.desc:1"]);
        assert!(matches!(
            outcome,
            Outcome::Listing {
                target: ListingTarget::TopRated,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_execute_detail_error() {
        // Arrange
        let catalog = MockCatalog::default();

        // Act
        let outcome = execute(&catalog, Command::FetchDetail { id: 404 }).await;

        // Assert
        match outcome {
            Outcome::Detail { id, result } => {
                assert_eq!(id, 404);
                assert_eq!(result.unwrap_err().status(), Some(404));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_spawn_without_catalog_reports_missing_credential() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        let view = ViewKey::default().next();

        // Act
        spawn::<MockCatalog>(None, view, Command::FetchGenres, &tx);

        // Assert
        let delivery = rx.try_recv().unwrap();
        assert_eq!(delivery.view, view);
        assert!(matches!(
            delivery.outcome,
            Outcome::Genres(Err(CatalogError::MissingCredential))
        ));
    }

    #[tokio::test]
    async fn test_spawn_delivers_outcome() {
        // Arrange
        let catalog = Arc::new(MockCatalog::default());
        let (tx, mut rx) = mpsc::unbounded_channel();

        // Act
        spawn(Some(&catalog), ViewKey::default(), Command::FetchGenres, &tx);
        let delivery = rx.recv().await.unwrap();

        // Assert
        assert!(matches!(delivery.outcome, Outcome::Genres(Ok(ref g)) if g.len() == 1));
        assert_eq!(catalog.calls(), ["genres"]);
    }
}
