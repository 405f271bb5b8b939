//! Application loop and navigation.
//!
//! A single task owns all UI state. It waits on the tick interval, terminal
//! events and fetch outcomes, and redraws after each one.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Datelike;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use marquee_api::catalog::CatalogApi;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::command::{self, Delivery, ViewKey};
use crate::debounce::DEFAULT_QUIET;
use crate::filters::MIN_YEAR;
use crate::route::Route;
use crate::ui;
use crate::views::{Action, View, ViewSettings};

/// Rows taken by table borders, header and status line.
const TABLE_CHROME: u16 = 5;

/// Options for [`run_app`].
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// First route shown.
    pub start: Route,
    /// Search debounce quiet period.
    pub quiet: Duration,
    /// Redraw and debounce polling interval.
    pub tick_rate: Duration,
    /// Latest selectable release year.
    pub latest_year: u32,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            start: Route::Home,
            quiet: DEFAULT_QUIET,
            tick_rate: Duration::from_millis(100),
            latest_year: current_year(),
        }
    }
}

/// Current calendar year in local time.
fn current_year() -> u32 {
    u32::try_from(chrono::Local::now().year()).unwrap_or(MIN_YEAR)
}

/// Navigation, dispatch and outcome routing for the active view.
#[derive(Debug)]
pub struct App<C> {
    catalog: Option<Arc<C>>,
    settings: ViewSettings,
    route: Route,
    view: View,
    view_key: ViewKey,
    back: Vec<Route>,
    tx: UnboundedSender<Delivery>,
    rx: UnboundedReceiver<Delivery>,
    running: bool,
    ticks: u64,
    page_size: usize,
}

impl<C> App<C>
where
    C: CatalogApi + Send + Sync + 'static,
{
    /// Creates the app at `start` and issues the view's initial fetches.
    ///
    /// Without a catalog every fetch fails with a missing credential error
    /// that the view displays.
    pub fn new(catalog: Option<Arc<C>>, settings: ViewSettings, start: Route) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let view = View::for_route(&start, settings);
        let mut app = Self {
            catalog,
            settings,
            route: start,
            view,
            view_key: ViewKey::default(),
            back: Vec::new(),
            tx,
            rx,
            running: true,
            ticks: 0,
            page_size: 10,
        };
        let actions = app.view.start();
        app.dispatch(actions);
        app
    }

    /// Current route.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Active view.
    #[must_use]
    pub const fn view(&self) -> &View {
        &self.view
    }

    /// Whether the loop should keep running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Carries out view actions in order.
    pub fn dispatch(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::Fetch(command) => {
                    command::spawn(self.catalog.as_ref(), self.view_key, command, &self.tx);
                }
                Action::Navigate(route) => {
                    self.navigate(route);
                    return;
                }
                Action::Back => {
                    self.go_back();
                    return;
                }
                Action::OpenUrl(url) => {
                    tracing::debug!(%url, "opening in browser");
                    if let Err(e) = open::that_detached(&url) {
                        tracing::warn!(%url, error = %e, "failed to open browser");
                    }
                }
                Action::Quit => self.running = false,
            }
        }
    }

    /// Shows `route`, pushing the current route on the back stack.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        let previous = std::mem::replace(&mut self.route, route);
        self.back.push(previous);
        self.enter();
    }

    /// Returns to the previous route. No-op at the bottom of the stack.
    pub fn go_back(&mut self) {
        let Some(route) = self.back.pop() else {
            tracing::debug!("back stack empty");
            return;
        };
        self.route = route;
        self.enter();
    }

    /// Replaces the view with a fresh one for the current route.
    fn enter(&mut self) {
        tracing::debug!(route = %self.route, "entering route");
        self.view_key = self.view_key.next();
        self.view = View::for_route(&self.route, self.settings);
        let actions = self.view.start();
        self.dispatch(actions);
    }

    /// Hands an outcome to the view that requested it.
    pub fn on_delivery(&mut self, delivery: Delivery) {
        if delivery.view != self.view_key {
            tracing::debug!(outcome = ?delivery.outcome, "dropping outcome for discarded view");
            return;
        }
        self.view.apply(delivery.outcome);
    }

    /// Advances the spinner and commits settled search input.
    pub fn on_tick(&mut self, now: Instant) {
        self.ticks = self.ticks.wrapping_add(1);
        let actions = self.view.tick(now);
        self.dispatch(actions);
    }

    /// Handles one terminal key event.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }
        let actions = self.view.handle_key(key, now, self.page_size);
        self.dispatch(actions);
    }

    /// Main event loop.
    async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> Result<()> {
        let mut events = EventStream::new();
        let mut tick_interval = tokio::time::interval(tick_rate);

        while self.running {
            let mut content_height = 0;
            terminal
                .draw(|frame| {
                    content_height = ui::draw(frame, &mut self.view, &self.route, self.ticks);
                })
                .context("failed to draw TUI")?;
            self.page_size = usize::from(content_height.saturating_sub(TABLE_CHROME)).max(1);

            tokio::select! {
                _ = tick_interval.tick() => self.on_tick(Instant::now()),
                Some(delivery) = self.rx.recv() => self.on_delivery(delivery),
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key, Instant::now()),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("failed to read event"),
                    None => self.running = false,
                },
            }
        }
        Ok(())
    }
}

/// Runs the interactive UI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_app<C>(catalog: Option<Arc<C>>, options: TuiOptions) -> Result<()>
where
    C: CatalogApi + Send + Sync + 'static,
{
    let settings = ViewSettings {
        quiet: options.quiet,
        latest_year: options.latest_year,
    };
    tracing::info!(route = %options.start, "starting TUI");

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut app = App::new(catalog, settings, options.start);
    let result = app.run(&mut terminal, options.tick_rate).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    result
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::arithmetic_side_effects)]

    use marquee_api::catalog::MovieDetail;

    use super::*;
    use crate::command::Outcome;
    use crate::command::tests::MockCatalog;

    fn settings() -> ViewSettings {
        ViewSettings {
            quiet: Duration::from_millis(500),
            latest_year: 2026,
        }
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn offline(start: Route) -> App<MockCatalog> {
        App::new(None, settings(), start)
    }

    #[tokio::test]
    async fn test_start_fetches_home_lists() {
        // Arrange
        let catalog = Arc::new(MockCatalog::with_pages(3));

        // Act
        let mut app = App::new(Some(Arc::clone(&catalog)), settings(), Route::Home);
        for _ in 0..2 {
            let delivery = app.rx.recv().await.unwrap();
            app.on_delivery(delivery);
        }

        // Assert
        let mut calls = catalog.calls();
        calls.sort();
        assert_eq!(
            calls,
            ["discover:popularity.desc:1", "discover:vote_average.desc:1"]
        );
        let View::Home(home) = app.view() else {
            panic!("expected home view");
        };
        assert_eq!(home.listing.results().items().len(), 1);
        assert_eq!(home.top_rated.results().items().len(), 1);
    }

    #[tokio::test]
    async fn test_debounced_typing_issues_one_search() {
        // Arrange
        let catalog = Arc::new(MockCatalog::with_pages(1));
        let mut app = App::new(Some(Arc::clone(&catalog)), settings(), Route::Home);
        for _ in 0..2 {
            let delivery = app.rx.recv().await.unwrap();
            app.on_delivery(delivery);
        }
        let start = Instant::now();
        app.handle_key(key('/'), start);

        // Act
        let mut at = start;
        for c in "batman".chars() {
            at += Duration::from_millis(150);
            app.handle_key(key(c), at);
            app.on_tick(at);
        }
        app.on_tick(at + Duration::from_millis(600));
        let delivery = app.rx.recv().await.unwrap();
        app.on_delivery(delivery);

        // Assert
        let searches: Vec<String> = catalog
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("search:"))
            .collect();
        assert_eq!(searches, ["search:batman:1"]);
        let View::Home(home) = app.view() else {
            panic!("expected home view");
        };
        assert_eq!(home.listing.results().items()[0].title, "batman");
    }

    #[tokio::test]
    async fn test_missing_credential_reaches_view() {
        // Arrange
        let mut app = offline(Route::Movie(550));

        // Act
        let delivery = app.rx.try_recv().unwrap();
        app.on_delivery(delivery);

        // Assert
        let View::Detail(detail) = app.view() else {
            panic!("expected detail view");
        };
        assert!(detail.error().unwrap().contains("API key is missing"));
        assert!(!detail.is_loading());
    }

    #[tokio::test]
    async fn test_outcome_for_discarded_view_is_dropped() {
        // Arrange
        let mut app = offline(Route::Movie(550));
        let stale = app.view_key;
        app.navigate(Route::Movie(551));
        let detail: MovieDetail =
            serde_json::from_value(serde_json::json!({ "id": 550, "title": "Fight Club" }))
                .unwrap();

        // Act
        app.on_delivery(Delivery {
            view: stale,
            outcome: Outcome::Detail {
                id: 550,
                result: Ok(detail),
            },
        });

        // Assert
        let View::Detail(view) = app.view() else {
            panic!("expected detail view");
        };
        assert_eq!(view.id(), 551);
        assert!(view.detail().is_none());
        assert!(view.is_loading());
    }

    #[tokio::test]
    async fn test_back_stack() {
        // Arrange
        let mut app = offline(Route::Home);

        // Act & Assert
        app.dispatch(vec![Action::Navigate(Route::Browse)]);
        assert_eq!(app.route(), &Route::Browse);
        app.dispatch(vec![Action::Navigate(Route::Movie(550))]);
        assert_eq!(app.route(), &Route::Movie(550));

        app.dispatch(vec![Action::Back]);
        assert_eq!(app.route(), &Route::Browse);
        assert!(matches!(app.view(), View::Browse(_)));
        app.dispatch(vec![Action::Back]);
        assert_eq!(app.route(), &Route::Home);
        app.dispatch(vec![Action::Back]);
        assert_eq!(app.route(), &Route::Home);
        assert!(app.is_running());
    }

    #[tokio::test]
    async fn test_navigate_to_same_route_keeps_view() {
        // Arrange
        let mut app = offline(Route::Browse);
        let key_before = app.view_key;

        // Act
        app.navigate(Route::Browse);

        // Assert
        assert_eq!(app.view_key, key_before);
        app.go_back();
        assert_eq!(app.route(), &Route::Browse);
    }

    #[tokio::test]
    async fn test_not_found_enter_goes_home() {
        // Arrange
        let mut app = offline(Route::parse("/nowhere"));

        // Act
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), Instant::now());

        // Assert
        assert_eq!(app.route(), &Route::Home);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_even_while_typing() {
        // Arrange
        let mut app = offline(Route::Home);
        app.handle_key(key('/'), Instant::now());
        assert!(app.view().is_editing());

        // Act
        app.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );

        // Assert
        assert!(!app.is_running());
    }

    #[tokio::test]
    async fn test_quit_key() {
        // Arrange
        let mut app = offline(Route::Home);

        // Act
        app.handle_key(key('q'), Instant::now());

        // Assert
        assert!(!app.is_running());
    }
}
