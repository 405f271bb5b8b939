//! Movie detail rendering.

use marquee_api::catalog::MovieDetail;
use marquee_api::images::{ImageSize, image_url};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::draw_footer;
use super::format::{
    format_currency, format_rating_long, format_release_date, format_runtime, spinner,
};
use crate::lightbox::Lightbox;
use crate::route::Route;
use crate::views::detail::DetailView;

/// Number of cast members shown.
const TOP_CAST: usize = 12;

#[allow(clippy::indexing_slicing)]
pub(super) fn draw(
    frame: &mut Frame,
    chunks: &[Rect],
    view: &DetailView,
    route: &Route,
    ticks: u64,
) {
    let Some(detail) = view.detail() else {
        let header = Paragraph::new(route.to_string())
            .block(Block::default().borders(Borders::ALL).title(" Movie "));
        frame.render_widget(header, chunks[0]);

        let body = if let Some(message) = view.error() {
            Paragraph::new(vec![
                Line::styled(format!("Error: {message}"), Style::default().fg(Color::Red)),
                Line::styled(
                    "r: retry  x: dismiss  Esc: back",
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        } else if view.is_loading() {
            Paragraph::new(format!("{} Loading movie details...", spinner(ticks)))
        } else {
            Paragraph::new("")
        };
        frame.render_widget(
            body.wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );
        draw_footer(frame, chunks[2], "r: retry  Esc: back  h: home  q: quit");
        return;
    };

    draw_header(frame, chunks[0], detail);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let mut facts = fact_lines(detail);
    if let Some(message) = view.error() {
        facts.insert(
            0,
            Line::styled(format!("Error: {message}"), Style::default().fg(Color::Red)),
        );
    }
    let facts = Paragraph::new(facts)
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    frame.render_widget(facts, body_chunks[0]);

    let story = Paragraph::new(story_lines(detail))
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(" Overview "));
    frame.render_widget(story, body_chunks[1]);

    if let Some(lightbox) = view.lightbox {
        draw_lightbox(frame, chunks[1], detail, lightbox);
        draw_footer(frame, chunks[2], "\u{2190}/\u{2192}: previous/next  Esc: close");
    } else {
        draw_footer(
            frame,
            chunks[2],
            "\u{2191}\u{2193}/j/k: scroll  g: gallery  t: trailer  w: homepage  Esc: back  h: home  q: quit",
        );
    }
}

/// Title, year and adult marker.
fn draw_header(frame: &mut Frame, area: Rect, detail: &MovieDetail) {
    let mut spans = vec![Span::styled(
        detail.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(year) = detail.release_year() {
        spans.push(Span::raw(format!(" ({year})")));
    }
    if detail.adult {
        spans.push(Span::styled(" 18+", Style::default().fg(Color::Red)));
    }
    if let Some(original) = detail
        .original_title
        .as_deref()
        .filter(|o| *o != detail.title)
    {
        spans.push(Span::styled(
            format!("  {original}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Movie "));
    frame.render_widget(header, area);
}

/// A `label: value` line.
fn field(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<10}"),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(value.into()),
    ])
}

/// Placeholder shown in place of a missing image.
fn placeholder(label: &str, text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<10}"),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(format!("[ {text} ]"), Style::default().fg(Color::DarkGray)),
    ])
}

/// Non-blank optional text.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn fact_lines(detail: &MovieDetail) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(
        image_url(detail.poster_path.as_deref(), ImageSize::W500)
            .map_or_else(|| placeholder("Poster", "No Poster"), |url| field("Poster", url)),
    );
    lines.push(
        image_url(detail.backdrop_path.as_deref(), ImageSize::W1280).map_or_else(
            || placeholder("Backdrop", "No Backdrop"),
            |url| field("Backdrop", url),
        ),
    );
    lines.push(
        detail
            .trailer()
            .and_then(|video| video.youtube_url())
            .map_or_else(
                || placeholder("Trailer", "No Trailer"),
                |url| field("Trailer", url),
            ),
    );
    lines.push(Line::from(""));

    if let Some(runtime) = format_runtime(detail.runtime) {
        lines.push(field("Runtime", runtime));
    }
    lines.push(field(
        "Rating",
        format_rating_long(detail.vote_average, detail.vote_count),
    ));
    if let Some(date) = format_release_date(detail.release_date.as_deref()) {
        lines.push(field("Released", date));
    }
    if let Some(status) = present(detail.status.as_deref()) {
        lines.push(field("Status", status));
    }
    if !detail.genres.is_empty() {
        lines.push(field("Genres", join(detail.genres.iter().map(|g| g.name.as_str()))));
    }
    if !detail.production_countries.is_empty() {
        lines.push(field(
            "Countries",
            join(detail.production_countries.iter().map(|c| c.name.as_str())),
        ));
    }
    if !detail.spoken_languages.is_empty() {
        lines.push(field(
            "Languages",
            join(detail.spoken_languages.iter().map(|l| {
                if l.english_name.is_empty() {
                    l.name.as_str()
                } else {
                    l.english_name.as_str()
                }
            })),
        ));
    }
    if let Some(budget) = format_currency(detail.budget) {
        lines.push(field("Budget", budget));
    }
    if let Some(revenue) = format_currency(detail.revenue) {
        lines.push(field("Revenue", revenue));
    }
    if let Some(homepage) = present(detail.homepage.as_deref()) {
        lines.push(field("Homepage", homepage));
    }
    if !detail.production_companies.is_empty() {
        lines.push(field(
            "Studios",
            join(detail.production_companies.iter().map(|c| c.name.as_str())),
        ));
    }

    let gallery = detail.gallery().len();
    if gallery > 0 {
        lines.push(Line::from(""));
        lines.push(field("Gallery", format!("{gallery} images (g: view)")));
    }

    lines
}

fn story_lines(detail: &MovieDetail) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(tagline) = present(detail.tagline.as_deref()) {
        lines.push(Line::styled(
            String::from(tagline),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(String::from(
        present(detail.overview.as_deref()).unwrap_or("No overview available."),
    )));

    let cast = detail.top_cast(TOP_CAST);
    if !cast.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "Top Cast",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        for member in cast {
            let mut spans = vec![Span::raw(member.name.clone())];
            if let Some(character) = present(member.character.as_deref()) {
                spans.push(Span::styled(
                    format!(" as {character}"),
                    Style::default().fg(Color::Cyan),
                ));
            }
            spans.push(Span::styled(
                image_url(member.profile_path.as_deref(), ImageSize::W185)
                    .map_or_else(|| String::from("  [no photo]"), |url| format!("  {url}")),
                Style::default().fg(Color::DarkGray),
            ));
            lines.push(Line::from(spans));
        }
    }

    lines
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}

/// Centered overlay showing one gallery image.
fn draw_lightbox(frame: &mut Frame, area: Rect, detail: &MovieDetail, lightbox: Lightbox) {
    let gallery = detail.gallery();
    let Some(image) = gallery.get(lightbox.index()) else {
        return;
    };

    let popup = centered(area, 80, 7);
    let url = image_url(Some(image.file_path.as_str()), ImageSize::Original)
        .unwrap_or_default();
    let body = Paragraph::new(vec![
        Line::from(url),
        Line::from(format!("{} x {}", image.width, image.height)),
    ])
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(format!(" Gallery {} ", lightbox.position())),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(body, popup);
}

/// A `percent_x` wide, `height` tall rectangle centered in `area`.
#[allow(clippy::indexing_slicing)]
fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    let side = 100_u16.saturating_sub(percent_x) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(side),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(side),
        ])
        .split(vertical[1])[1]
}
