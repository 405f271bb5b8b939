//! Home screen rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::{SEARCH_HELP, draw_footer, draw_movie_table, draw_search_header};
use crate::route::Route;
use crate::views::InputMode;
use crate::views::home::{HomePane, HomeView};

#[allow(clippy::indexing_slicing)]
pub(super) fn draw(frame: &mut Frame, chunks: &[Rect], view: &mut HomeView, route: &Route, ticks: u64) {
    let info = format!("{route}  Tab: switch list  b: browse");
    draw_search_header(frame, chunks[0], &view.listing, view.mode, "marquee", info);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    let title = view
        .listing
        .current_query()
        .search_term()
        .map_or_else(|| String::from("Popular Movies"), |term| format!("Results for \"{term}\""));
    let pane = view.pane;
    draw_movie_table(
        frame,
        main_chunks[0],
        &mut view.listing,
        &title,
        pane == HomePane::Results,
        ticks,
    );
    draw_movie_table(
        frame,
        main_chunks[1],
        &mut view.top_rated,
        "Top Rated",
        pane == HomePane::TopRated,
        ticks,
    );

    let help = if view.mode == InputMode::Search {
        SEARCH_HELP
    } else {
        "/: search  \u{2191}\u{2193}/j/k: move  Enter: details  m: more  r: retry  x: dismiss  Tab: list  b: browse  q: quit"
    };
    draw_footer(frame, chunks[2], help);
}
