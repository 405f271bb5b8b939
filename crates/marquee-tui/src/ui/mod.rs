//! TUI rendering.
//!
//! Pure functions of view state; nothing here mutates data other than
//! ratatui table selection.

mod browse;
mod detail;
pub mod format;
mod home;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Wrap};

use self::format::{format_rating, spinner, year_label};
use crate::listing::Listing;
use crate::results::Phase;
use crate::route::Route;
use crate::views::{InputMode, View};

/// Draws the active view. Returns the main content area height for page
/// size calculation.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, view: &mut View, route: &Route, ticks: u64) -> u16 {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    match view {
        View::Home(home) => home::draw(frame, &chunks, home, route, ticks),
        View::Browse(browse) => browse::draw(frame, &chunks, browse, route, ticks),
        View::Detail(detail) => detail::draw(frame, &chunks, detail, route, ticks),
        View::NotFound(path) => draw_not_found(frame, &chunks, path),
    }

    chunks[1].height
}

/// Draws the search box and a title panel.
#[allow(clippy::indexing_slicing)]
fn draw_search_header(
    frame: &mut Frame,
    area: Rect,
    listing: &Listing,
    mode: InputMode,
    title: &str,
    info: String,
) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let search_style = if mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let mut text = String::from(listing.search().term());
    if mode == InputMode::Search {
        text.push('_');
    }
    let search = Paragraph::new(text)
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[0]);

    let info = Paragraph::new(info).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {title} ")),
    );
    frame.render_widget(info, header_chunks[1]);
}

/// Draws a movie list with its loading, error and empty states.
#[allow(clippy::indexing_slicing)]
fn draw_movie_table(
    frame: &mut Frame,
    area: Rect,
    listing: &mut Listing,
    title: &str,
    focused: bool,
    ticks: u64,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(border_style);

    let results = listing.results();
    let placeholder = match results.phase() {
        Phase::Idle => Some(Line::from("")),
        Phase::Loading => Some(Line::from(format!("{} Loading movies...", spinner(ticks)))),
        Phase::Failed => Some(error_line(results.error().unwrap_or("Unknown error"))),
        Phase::Loaded if results.items().is_empty() => Some(Line::styled(
            "No movies found.",
            Style::default().fg(Color::DarkGray),
        )),
        Phase::Loaded | Phase::LoadingMore => None,
    };
    if let Some(line) = placeholder {
        let paragraph = Paragraph::new(line)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if results.is_loading_more() {
        Some(Line::from(format!("{} Loading more...", spinner(ticks))))
    } else if let Some(message) = results.error() {
        Some(error_line(message))
    } else if results.has_more() {
        Some(Line::styled(
            format!(
                "m: load more (page {}/{})",
                results.current_page(),
                results.total_pages()
            ),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        None
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(u16::from(status.is_some())),
        ])
        .split(area);

    let header = Row::new(vec!["#", "Title", "Year", "Rating"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = results
        .items()
        .iter()
        .enumerate()
        .map(|(i, movie)| {
            Row::new(vec![
                i.saturating_add(1).to_string(),
                movie.title.clone(),
                String::from(year_label(movie.release_year())),
                format_rating(movie.vote_average, movie.vote_count),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, chunks[0], &mut listing.table_state);

    if let Some(line) = status {
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }
}

/// Red inline error with its dismiss hint.
fn error_line(message: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("Error: {message}"),
            Style::default().fg(Color::Red),
        ),
        Span::styled("  (r: retry, x: dismiss)", Style::default().fg(Color::DarkGray)),
    ])
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, help_text: &str) {
    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Footer text while the search box is focused.
const SEARCH_HELP: &str = "Type to search | Enter: search now | Esc: clear | Backspace: delete";

#[allow(clippy::indexing_slicing)]
fn draw_not_found(frame: &mut Frame, chunks: &[Rect], path: &str) {
    let header = Paragraph::new("marquee").block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Not Found "),
    );
    frame.render_widget(header, chunks[0]);

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::styled(
            "404",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(format!("Nothing lives at {path}")),
        Line::from(""),
        Line::from("Press Enter to go back home."),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, chunks[1]);

    draw_footer(frame, chunks[2], "Enter/h: home  Esc: back  q: quit");
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::Duration;

    use marquee_api::catalog::{CatalogError, MovieDetail, PagedResult};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::command::{Command, Outcome};
    use crate::listing::ListingTarget;
    use crate::views::detail::DetailView;
    use crate::views::home::HomeView;
    use crate::views::{Action, ViewSettings};

    fn render(view: &mut View, route: &Route) -> String {
        let backend = TestBackend::new(120, 60);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| {
            draw(frame, view, route, 0);
        })
        .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn detail_view(fixture: &str) -> View {
        let detail: MovieDetail = serde_json::from_str(fixture).unwrap();
        let mut view = DetailView::new(detail.id);
        view.start();
        view.apply(Outcome::Detail {
            id: detail.id,
            result: Ok(detail),
        });
        View::Detail(view)
    }

    fn main_ticket(actions: &[Action]) -> crate::results::PageTicket {
        actions
            .iter()
            .find_map(|a| match a {
                Action::Fetch(Command::FetchListing {
                    target: ListingTarget::Main,
                    ticket,
                    ..
                }) => Some(*ticket),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_detail_without_poster_renders_placeholder() {
        // Arrange
        let mut view = detail_view(include_str!(
            "../../../../fixtures/catalog/movie_detail_no_poster.json"
        ));

        // Act
        let screen = render(&mut view, &Route::Movie(987_654));

        // Assert
        assert!(screen.contains("No Poster"));
        assert!(screen.contains("No Backdrop"));
        assert!(screen.contains("Untitled Short"));
    }

    #[test]
    fn test_detail_renders_fields() {
        // Arrange
        let mut view = detail_view(include_str!(
            "../../../../fixtures/catalog/movie_detail_550.json"
        ));

        // Act
        let screen = render(&mut view, &Route::Movie(550));

        // Assert
        assert!(screen.contains("Fight Club"));
        assert!(screen.contains("2h 19m"));
        assert!(screen.contains("October 15, 1999"));
        assert!(screen.contains("$63,000,000"));
        assert!(screen.contains("Tyler Durden"));
        assert!(!screen.contains("No Poster"));
    }

    #[test]
    fn test_empty_results_show_no_movies_found() {
        // Arrange
        let mut home = HomeView::new(Duration::from_millis(500));
        let ticket = main_ticket(&home.start());
        home.apply(Outcome::Listing {
            target: ListingTarget::Main,
            ticket,
            result: Ok(PagedResult {
                page: 1,
                total_pages: 0,
                total_results: 0,
                results: Vec::new(),
            }),
        });
        let mut view = View::Home(home);

        // Act
        let screen = render(&mut view, &Route::Home);

        // Assert
        assert!(screen.contains("No movies found."));
        assert!(!screen.contains("Error:"));
    }

    #[test]
    fn test_missing_credential_is_shown_inline() {
        // Arrange
        let mut home = HomeView::new(Duration::from_millis(500));
        let ticket = main_ticket(&home.start());
        home.apply(Outcome::Listing {
            target: ListingTarget::Main,
            ticket,
            result: Err(CatalogError::MissingCredential),
        });
        let mut view = View::Home(home);

        // Act
        let screen = render(&mut view, &Route::Home);

        // Assert
        assert!(screen.contains("Error: API key is missing"));
    }

    #[test]
    fn test_not_found_page() {
        // Arrange
        let settings = ViewSettings {
            quiet: Duration::from_millis(500),
            latest_year: 2026,
        };
        let route = Route::parse("/faq");
        let mut view = View::for_route(&route, settings);

        // Act
        let screen = render(&mut view, &route);

        // Assert
        assert!(screen.contains("Nothing lives at /faq"));
    }
}
