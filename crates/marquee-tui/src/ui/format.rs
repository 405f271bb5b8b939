//! Display formatting for catalog values.

use chrono::NaiveDate;

/// Braille spinner frames, advanced once per tick.
const SPINNER_FRAMES: [&str; 8] = [
    "\u{28fe}", "\u{28fd}", "\u{28fb}", "\u{28bf}", "\u{287f}", "\u{28df}", "\u{28ef}", "\u{28f7}",
];

/// Spinner frame for the given tick count.
#[must_use]
pub fn spinner(ticks: u64) -> &'static str {
    let len = u64::try_from(SPINNER_FRAMES.len()).unwrap_or(1);
    usize::try_from(ticks.checked_rem(len).unwrap_or(0))
        .ok()
        .and_then(|i| SPINNER_FRAMES.get(i))
        .copied()
        .unwrap_or("*")
}

/// Formats a number with thousands separators (e.g. 169940 -> "169,940").
#[allow(clippy::arithmetic_side_effects)]
#[must_use]
pub fn fmt_num(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// US dollar amount, or `None` for 0 (unknown).
#[must_use]
pub fn format_currency(amount: u64) -> Option<String> {
    (amount > 0).then(|| format!("${}", fmt_num(amount)))
}

/// Runtime as `2h 19m`, or `None` when unknown.
#[allow(clippy::arithmetic_side_effects)]
#[must_use]
pub fn format_runtime(minutes: Option<u32>) -> Option<String> {
    let minutes = minutes.filter(|m| *m > 0)?;
    let (hours, rest) = (minutes / 60, minutes % 60);
    Some(match (hours, rest) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    })
}

/// Long-form release date, e.g. `October 15, 1999`.
///
/// Unparseable dates are shown as given; empty dates yield `None`.
#[must_use]
pub fn format_release_date(date: Option<&str>) -> Option<String> {
    let date = date.map(str::trim).filter(|d| !d.is_empty())?;
    Some(
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_or_else(|_| String::from(date), |d| d.format("%B %-d, %Y").to_string()),
    )
}

/// Release year column value.
#[must_use]
pub fn year_label(year: Option<&str>) -> &str {
    year.unwrap_or("N/A")
}

/// Rating with one decimal, or `N/A` when nobody voted.
#[must_use]
pub fn format_rating(vote_average: f64, vote_count: u32) -> String {
    if vote_count == 0 {
        String::from("N/A")
    } else {
        format!("{vote_average:.1}")
    }
}

/// Rating with vote count, e.g. `8.4/10 (26,280 votes)`.
#[must_use]
pub fn format_rating_long(vote_average: f64, vote_count: u32) -> String {
    if vote_count == 0 {
        return String::from("Not rated yet");
    }
    format!(
        "{vote_average:.1}/10 ({} votes)",
        fmt_num(u64::from(vote_count))
    )
}
