//! Browse screen rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::format::spinner;
use super::{SEARCH_HELP, draw_footer, draw_movie_table, draw_search_header};
use crate::filters::FilterController;
use crate::route::Route;
use crate::views::InputMode;
use crate::views::browse::{BrowsePane, BrowseView};

#[allow(clippy::indexing_slicing)]
pub(super) fn draw(
    frame: &mut Frame,
    chunks: &[Rect],
    view: &mut BrowseView,
    route: &Route,
    ticks: u64,
) {
    draw_search_header(
        frame,
        chunks[0],
        &view.listing,
        view.mode,
        "Browse All Movies",
        filter_summary(&view.filters, route),
    );

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[1]);

    draw_filter_pane(
        frame,
        pane_chunks[0],
        &view.filters,
        view.pane == BrowsePane::Filters,
        ticks,
    );

    let title = view.listing.current_query().search_term().map_or_else(
        || format!("{} Movies", view.filters.filters().sort),
        |term| format!("Results for \"{term}\" (filters off)"),
    );
    let focused = view.pane == BrowsePane::Results;
    draw_movie_table(frame, pane_chunks[1], &mut view.listing, &title, focused, ticks);

    let help = match (view.mode, view.pane) {
        (InputMode::Search, _) => SEARCH_HELP,
        (InputMode::Normal, BrowsePane::Filters) => {
            "\u{2191}\u{2193}/j/k: genre  Space: toggle  s: sort  +/-: year  y: any year  c: clear  Tab: results  q: quit"
        }
        (InputMode::Normal, BrowsePane::Results) => {
            "/: search  \u{2191}\u{2193}/j/k: move  Enter: details  m: more  s: sort  +/-: year  Tab: filters  h: home  q: quit"
        }
    };
    draw_footer(frame, chunks[2], help);
}

/// One-line summary of the active filters.
fn filter_summary(filters: &FilterController, route: &Route) -> String {
    let active = filters.filters();
    let year = active
        .year
        .map_or_else(|| String::from("any"), |y| y.to_string());
    let genres = if active.genres.is_empty() {
        String::from("all")
    } else {
        active
            .genres
            .iter()
            .map(|id| {
                filters
                    .genres()
                    .iter()
                    .find(|g| g.id == *id)
                    .map_or_else(|| id.to_string(), |g| g.name.clone())
            })
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("{route}  Sort: {}  Year: {year}  Genres: {genres}", active.sort)
}

/// Draws the genre checklist.
fn draw_filter_pane(
    frame: &mut Frame,
    area: Rect,
    filters: &FilterController,
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
        .border_style(border_style)
        .title(" Genres ");

    if filters.genres_loading() {
        let loading = Paragraph::new(format!("{} Loading genres...", spinner(ticks))).block(block);
        frame.render_widget(loading, area);
        return;
    }
    if let Some(message) = filters.genre_error() {
        let error = Paragraph::new(Line::styled(
            format!("Error: {message}"),
            Style::default().fg(Color::Red),
        ))
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(error, area);
        return;
    }

    let items: Vec<ListItem> = filters
        .genres()
        .iter()
        .enumerate()
        .map(|(i, genre)| {
            let checkbox = if filters.is_selected(genre.id) {
                "[x]"
            } else {
                "[ ]"
            };
            let style = if i == filters.cursor() && focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if filters.is_selected(genre.id) {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![Span::styled(
                format!(" {checkbox} {}", genre.name),
                style,
            )]))
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(filters.cursor()));
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}
