//! marquee - terminal movie discovery client.

/// Application configuration (TOML).
mod config;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use marquee_api::catalog::{
    CatalogClient, FilterSet, GenreId, LocalCatalogApi, MovieSummary, PagedResult, SortKey,
};
use marquee_api::images::{ImageSize, image_url};
use marquee_tui::TuiOptions;
use marquee_tui::route::Route;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, CatalogConfig, resolve_config_path};

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "marquee", about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Write logs to this file instead of stdout (always used by `tui`).
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search movies by title.
    Search(SearchArgs),
    /// Discover movies by genre, year and ordering.
    Discover(DiscoverArgs),
    /// List movie genres.
    Genres,
    /// Show full details of one movie.
    Movie(MovieArgs),
    /// Start the interactive UI.
    Tui(TuiArgs),
    /// Print a shell completion script.
    Completions(CompletionsArgs),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "batman").
    #[arg(long, required = true)]
    query: String,
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Ordering accepted by `discover --sort`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    /// Weekly trending titles.
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

impl From<SortArg> for SortKey {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Trending => Self::Trending,
            SortArg::PopularityDesc => Self::PopularityDesc,
            SortArg::PopularityAsc => Self::PopularityAsc,
            SortArg::RatingDesc => Self::RatingDesc,
            SortArg::ReleaseDesc => Self::ReleaseDesc,
        }
    }
}

/// Arguments for the `discover` subcommand.
#[derive(clap::Args)]
struct DiscoverArgs {
    /// Comma-separated genre IDs (e.g. "28,12"). All must match.
    #[arg(long, value_delimiter = ',')]
    genres: Vec<GenreId>,
    /// Primary release year.
    #[arg(long)]
    year: Option<u32>,
    /// Ordering.
    #[arg(long, value_enum, default_value_t = SortArg::Trending)]
    sort: SortArg,
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

impl DiscoverArgs {
    fn filters(&self) -> FilterSet {
        FilterSet {
            genres: self.genres.iter().copied().collect(),
            year: self.year,
            sort: self.sort.into(),
        }
    }
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `tui` subcommand.
#[derive(clap::Args)]
struct TuiArgs {
    /// Starting route: `/`, `/browse` or `/movie/<ID>`.
    #[arg(default_value = "/")]
    path: String,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: clap_complete::Shell,
}

/// Picks the API token: environment, then config file, then the token baked
/// in at build time.
fn resolve_api_token(catalog: &CatalogConfig) -> Option<String> {
    select_api_token(
        std::env::var("TMDB_API_TOKEN").ok(),
        catalog.api_token.clone(),
        option_env!("TMDB_API_TOKEN"),
    )
}

/// Returns the first non-blank token in precedence order.
fn select_api_token(
    env: Option<String>,
    config: Option<String>,
    baked: Option<&str>,
) -> Option<String> {
    [env, config, baked.map(String::from)]
        .into_iter()
        .flatten()
        .find(|token| !token.trim().is_empty())
}

/// Builds a catalog client from config.
///
/// # Errors
///
/// Returns an error if no API token is available, the base URL is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_catalog_client(catalog: &CatalogConfig) -> Result<CatalogClient> {
    let base_url = parse_base_url(&catalog.base_url)?;

    let mut builder = CatalogClient::builder()
        .base_url(base_url)
        .language(&catalog.language)
        .min_vote_count(catalog.min_vote_count)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(token) = resolve_api_token(catalog) {
        builder = builder.api_token(token);
    }

    builder.build().context("failed to build catalog client")
}

/// Parses the API base URL, adding the trailing `/` that relative request
/// paths are joined onto.
///
/// # Errors
///
/// Returns an error if `raw` is not an absolute URL.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).with_context(|| format!("invalid catalog.base_url: {raw}"))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Loads `config.toml` from `dir` or the default location.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    tracing::debug!(path = %path.display(), "loading config");
    AppConfig::load(&path)
}

/// Logs one page of movies.
fn log_movie_page(page: &PagedResult<MovieSummary>) {
    tracing::info!(
        "Page {}/{} ({} results)",
        page.page,
        page.total_pages,
        page.total_results
    );
    tracing::info!("ID\tYear\tRating\tVotes\tTitle");
    for movie in &page.results {
        tracing::info!(
            "{}\t{}\t{:.1}\t{}\t{}",
            movie.id,
            movie.release_year().unwrap_or("N/A"),
            movie.vote_average,
            movie.vote_count,
            movie.title,
        );
    }
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the catalog client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, config: &AppConfig) -> Result<()> {
    let client = build_catalog_client(&config.catalog)?;

    let page = client
        .search(&args.query, args.page)
        .await
        .context("movie search request failed")?;

    if page.results.is_empty() {
        tracing::info!("No movies found for \"{}\"", args.query);
        return Ok(());
    }
    log_movie_page(&page);
    Ok(())
}

/// Runs the `discover` subcommand.
///
/// # Errors
///
/// Returns an error if the catalog client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_discover(args: &DiscoverArgs, config: &AppConfig) -> Result<()> {
    let client = build_catalog_client(&config.catalog)?;
    let filters = args.filters();

    let page = client
        .discover(&filters, args.page)
        .await
        .context("movie discovery request failed")?;

    if page.results.is_empty() {
        tracing::info!("No movies found");
        return Ok(());
    }
    tracing::info!("Sort: {}", filters.sort);
    log_movie_page(&page);
    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if the catalog client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_genres(config: &AppConfig) -> Result<()> {
    let client = build_catalog_client(&config.catalog)?;

    let genres = client.genres().await.context("genre list request failed")?;

    tracing::info!("ID\tName");
    for genre in &genres {
        tracing::info!("{}\t{}", genre.id, genre.name);
    }
    Ok(())
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the catalog client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_movie(args: &MovieArgs, config: &AppConfig) -> Result<()> {
    let client = build_catalog_client(&config.catalog)?;

    let movie = client
        .movie_detail(args.id)
        .await
        .with_context(|| format!("movie detail request failed for {}", args.id))?;

    tracing::info!(
        "{} ({})",
        movie.title,
        movie.release_year().unwrap_or("N/A")
    );
    if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
        tracing::info!("  {tagline}");
    }
    tracing::info!("Rating:   {:.1} ({} votes)", movie.vote_average, movie.vote_count);
    if let Some(runtime) = movie.runtime.filter(|m| *m > 0) {
        tracing::info!("Runtime:  {runtime} min");
    }
    tracing::info!(
        "Genres:   {}",
        movie
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::info!(
        "Poster:   {}",
        image_url(movie.poster_path.as_deref(), ImageSize::W500)
            .unwrap_or_else(|| String::from("(none)"))
    );
    if let Some(url) = movie.trailer().and_then(|video| video.youtube_url()) {
        tracing::info!("Trailer:  {url}");
    }
    if let Some(overview) = movie.overview.as_deref().filter(|o| !o.is_empty()) {
        tracing::info!("{overview}");
    }
    for member in movie.top_cast(12) {
        tracing::info!(
            "  {}\t{}",
            member.name,
            member.character.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

/// Runs the `tui` subcommand.
///
/// A missing API token does not stop the UI; each screen shows the error.
///
/// # Errors
///
/// Returns an error if the client fails to build for another reason or the
/// terminal cannot be driven.
#[instrument(skip_all)]
async fn run_tui(args: &TuiArgs, config: &AppConfig) -> Result<()> {
    let catalog = if resolve_api_token(&config.catalog).is_some() {
        Some(Arc::new(build_catalog_client(&config.catalog)?))
    } else {
        tracing::warn!("no API token configured; fetches will fail");
        None
    };

    let options = TuiOptions {
        start: Route::parse(&args.path),
        quiet: config.ui.debounce(),
        tick_rate: config.ui.tick_rate(),
        ..TuiOptions::default()
    };
    marquee_tui::run_app(catalog, options).await
}

/// Initializes tracing.
///
/// Logs go to `log_file` when given (without ANSI colors). Otherwise the
/// interactive UI discards them and one-shot commands write to stdout.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let (writer, ansi) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None if interactive => (BoxMakeWriter::new(io::sink), false),
        None => (BoxMakeWriter::new(io::stdout), true),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(not(feature = "otel"))]
    {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions(args) = &cli.command {
        clap_complete::generate(args.shell, &mut Cli::command(), "marquee", &mut io::stdout());
        return Ok(());
    }

    let interactive = matches!(cli.command, Commands::Tui(_));
    init_tracing(cli.log_file.as_deref(), interactive)?;

    let config = load_config(cli.dir.as_ref())?;
    match cli.command {
        Commands::Search(args) => run_search(&args, &config).await,
        Commands::Discover(args) => run_discover(&args, &config).await,
        Commands::Genres => run_genres(&config).await,
        Commands::Movie(args) => run_movie(&args, &config).await,
        Commands::Tui(args) => run_tui(&args, &config).await,
        Commands::Completions(_) => Ok(()),
    }
}
