use std::fmt::Write;

use pretty_duration::pretty_duration;

use super::sort::{highest_current, SortColumn, SortDirection, SortPreference};
use super::REFRESH_PERIOD;
use crate::metrics::TokenMetrics;

pub const ERROR_BANNER: &str = "Failed to fetch APY data. Please try again later.";
pub const EMPTY_MESSAGE: &str = "No tokens configured.";
pub const HIGHEST_MARKER: &str = "Highest!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Failed,
    Ready(Vec<TokenMetrics>),
}

const HEADERS: [(&str, Option<SortColumn>); 5] = [
    ("Token", Some(SortColumn::Name)),
    ("Current APY", Some(SortColumn::CurrentApy)),
    ("7d Avg APY", Some(SortColumn::SevenDayAvgApy)),
    ("30d Avg APY", Some(SortColumn::ThirtyDayAvgApy)),
    ("Website", None),
];

pub fn render(state: &ViewState, sort: &SortPreference) -> String {
    let mut out = String::from("Solana LST Yields\n\n");
    match state {
        ViewState::Loading => out.push_str("Loading...\n"),
        ViewState::Failed => {
            out.push_str(ERROR_BANNER);
            out.push('\n');
        }
        ViewState::Ready(rows) if rows.is_empty() => {
            out.push_str(EMPTY_MESSAGE);
            out.push('\n');
        }
        ViewState::Ready(rows) => {
            let mut rows = rows.clone();
            sort.apply(&mut rows);
            render_table(&mut out, &rows, sort);
        }
    }
    let _ = write!(
        out,
        "\n[1] token  [2] current  [3] 7d  [4] 30d  [r] refresh  [q] quit  (auto-refresh every {})\n",
        pretty_duration(&REFRESH_PERIOD, None)
    );
    out
}

fn render_table(out: &mut String, rows: &[TokenMetrics], sort: &SortPreference) {
    let highest = highest_current(rows);
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|r| {
            [
                r.token.name.to_owned(),
                r.current_apy.to_string(),
                r.seven_day_avg_apy.to_string(),
                r.thirty_day_avg_apy.to_string(),
                r.token.website.to_owned(),
            ]
        })
        .collect();
    let headers: Vec<String> = HEADERS
        .iter()
        .map(|(title, column)| match (column, sort.column) {
            (Some(c), Some(active)) if *c == active => {
                let arrow = match sort.direction {
                    SortDirection::Ascending => '▲',
                    SortDirection::Descending => '▼',
                };
                format!("{} {}", title, arrow)
            }
            _ => (*title).to_owned(),
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    // token name left aligned, numbers right aligned
    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(i, (cell, &width))| {
                let pad = width - cell.chars().count();
                if (1..=3).contains(&i) {
                    format!("{}{}", " ".repeat(pad), cell)
                } else {
                    format!("{}{}", cell, " ".repeat(pad))
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    out.push_str(line(&headers[..]).trim_end());
    out.push('\n');
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for (i, row) in cells.iter().enumerate() {
        let mut text = line(&row[..]).trim_end().to_owned();
        if highest == Some(i) {
            text.push_str("  ");
            text.push_str(HIGHEST_MARKER);
        }
        out.push_str(&text);
        out.push('\n');
    }
}
