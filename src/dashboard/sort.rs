use std::cmp::Ordering;

use crate::metrics::{ApyValue, TokenMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    CurrentApy,
    SevenDayAvgApy,
    ThirtyDayAvgApy,
}

impl SortColumn {
    pub fn from_command(cmd: &str) -> Option<SortColumn> {
        match cmd.trim().to_ascii_lowercase().as_str() {
            "1" | "name" => Some(SortColumn::Name),
            "2" | "current" => Some(SortColumn::CurrentApy),
            "3" | "7d" => Some(SortColumn::SevenDayAvgApy),
            "4" | "30d" => Some(SortColumn::ThirtyDayAvgApy),
            _ => None,
        }
    }

    fn apy(self, row: &TokenMetrics) -> ApyValue {
        match self {
            SortColumn::CurrentApy => row.current_apy,
            SortColumn::SevenDayAvgApy => row.seven_day_avg_apy,
            SortColumn::ThirtyDayAvgApy => row.thirty_day_avg_apy,
            SortColumn::Name => ApyValue::NotAvailable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortPreference {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl Default for SortPreference {
    fn default() -> Self {
        SortPreference {
            column: None,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortPreference {
    /// Same column flips the direction, a new column starts ascending.
    pub fn activate(&mut self, column: SortColumn) {
        if self.column == Some(column) {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }

    /// Stable; rows keep configuration order when no column is active.
    pub fn apply(&self, rows: &mut [TokenMetrics]) {
        let column = match self.column {
            Some(c) => c,
            None => return,
        };
        rows.sort_by(|a, b| {
            let ord = match column {
                SortColumn::Name => compare_names(a.token.name, b.token.name),
                _ => column.apy(a).sort_key().cmp(&column.apy(b).sort_key()),
            };
            match self.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Index of the row with the greatest current APY, first one on ties.
/// Rows without a numeric value never win.
pub fn highest_current(rows: &[TokenMetrics]) -> Option<usize> {
    let mut best: Option<(usize, _)> = None;
    for (i, row) in rows.iter().enumerate() {
        if let Some(v) = row.current_apy.percent() {
            match best {
                Some((_, max)) if v <= max => {}
                _ => best = Some((i, v)),
            }
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::tests::cell;
    use crate::tokens::TokenConfig;

    fn row(name: &'static str, current: &str) -> TokenMetrics {
        TokenMetrics {
            token: TokenConfig {
                name,
                mint: name,
                website: "https://example.org",
            },
            current_apy: cell(current),
            seven_day_avg_apy: ApyValue::NotAvailable,
            thirty_day_avg_apy: ApyValue::NotAvailable,
        }
    }

    fn names(rows: &[TokenMetrics]) -> Vec<&'static str> {
        rows.iter().map(|r| r.token.name).collect()
    }

    #[test]
    fn activate_toggles_and_resets() {
        let mut pref = SortPreference::default();
        pref.activate(SortColumn::Name);
        assert_eq!(pref.column, Some(SortColumn::Name));
        assert_eq!(pref.direction, SortDirection::Ascending);
        pref.activate(SortColumn::Name);
        assert_eq!(pref.direction, SortDirection::Descending);
        pref.activate(SortColumn::CurrentApy);
        assert_eq!(pref.column, Some(SortColumn::CurrentApy));
        assert_eq!(pref.direction, SortDirection::Ascending);
    }

    #[test]
    fn name_directions_are_reverses() {
        let base = vec![row("mSOL", "1%"), row("JitoSOL", "1%"), row("dSOL", "1%")];
        let mut pref = SortPreference::default();

        pref.activate(SortColumn::Name);
        let mut asc = base.clone();
        pref.apply(&mut asc);
        assert_eq!(names(&asc), vec!["dSOL", "JitoSOL", "mSOL"]);

        pref.activate(SortColumn::Name);
        let mut desc = base;
        pref.apply(&mut desc);
        let mut reversed = names(&asc);
        reversed.reverse();
        assert_eq!(names(&desc), reversed);
    }

    #[test]
    fn sentinels_sort_as_zero() {
        let mut rows = vec![row("a", "5.00%"), row("b", "Error"), row("c", "N/A")];
        let mut pref = SortPreference::default();
        pref.activate(SortColumn::CurrentApy);
        pref.apply(&mut rows);
        assert_eq!(names(&rows), vec!["b", "c", "a"]);
        assert_eq!(rows[0].current_apy.to_string(), "Error");
    }

    #[test]
    fn no_column_keeps_insertion_order() {
        let mut rows = vec![row("z", "1.00%"), row("a", "9.00%")];
        SortPreference::default().apply(&mut rows);
        assert_eq!(names(&rows), vec!["z", "a"]);
    }

    #[test]
    fn highest_prefers_first_of_ties() {
        let rows = vec![row("a", "3.10%"), row("b", "4.50%"), row("c", "4.50%")];
        assert_eq!(highest_current(&rows), Some(1));
    }

    #[test]
    fn sentinels_are_never_highest() {
        let rows = vec![row("a", "Error"), row("b", "N/A")];
        assert_eq!(highest_current(&rows), None);
        let rows = vec![row("a", "Error"), row("b", "-1.00%")];
        assert_eq!(highest_current(&rows), Some(1));
    }
}
