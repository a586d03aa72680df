//! Report tables and helpers for building them from displayable values.

use std::fmt::Display;

/// Rows of rendered cells, as checked by a script's report step.
pub type Table = Vec<Vec<String>>;

/// A table with one row holding one cell.
pub fn single_cell(value: impl Display) -> Table {
    vec![vec![value.to_string()]]
}

/// A table with one row.
pub fn single_row<I>(values: I) -> Table
where
    I: IntoIterator,
    I::Item: Display,
{
    vec![values.into_iter().map(|v| v.to_string()).collect()]
}

/// A table with one cell per row.
pub fn single_column<I>(values: I) -> Table
where
    I: IntoIterator,
    I::Item: Display,
{
    values.into_iter().map(|v| vec![v.to_string()]).collect()
}

pub fn table<R, I>(rows: R) -> Table
where
    R: IntoIterator<Item = I>,
    I: IntoIterator,
    I::Item: Display,
{
    rows.into_iter()
        .map(|row| row.into_iter().map(|v| v.to_string()).collect())
        .collect()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes() {
        assert_eq!(single_cell(42), vec![vec!["42".to_string()]]);
        assert_eq!(single_row(["a", "b"]), vec![vec!["a".to_string(), "b".to_string()]]);
        assert_eq!(
            single_column([1, 2]),
            vec![vec!["1".to_string()], vec!["2".to_string()]]
        );
        assert!(single_column(Vec::<u8>::new()).is_empty());
    }

    #[test]
    fn table_renders_every_cell() {
        let rows = vec![vec!["date", "amount"], vec!["2011-03-01", "$5.00"]];
        assert_eq!(
            table(rows),
            vec![
                vec!["date".to_string(), "amount".to_string()],
                vec!["2011-03-01".to_string(), "$5.00".to_string()],
            ]
        );
    }
}
