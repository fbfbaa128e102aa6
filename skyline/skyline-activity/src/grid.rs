//! Activity cells and the column-major grid that holds them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Days per week; the usual column length of a contribution calendar.
pub const DAYS_PER_WEEK: usize = 7;

/// One day of activity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActivityCell {
    /// Number of contributions on this day.
    pub count: u32,
    /// True when the day has not happened yet.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_future: bool,
    /// Calendar date as reported by the data source (informational).
    #[cfg_attr(feature = "serde", serde(default))]
    pub date: Option<String>,
}

impl ActivityCell {
    /// A past or present day with `count` contributions.
    #[must_use]
    pub const fn new(count: u32) -> Self {
        Self {
            count,
            is_future: false,
            date: None,
        }
    }

    /// A day that lies in the future.
    #[must_use]
    pub const fn future() -> Self {
        Self {
            count: 0,
            is_future: true,
            date: None,
        }
    }

    /// Attach a date label.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Chronological columns (weeks) of cells (days).
///
/// Columns keep their input order. Within a column the cell order is the
/// calendar order; the mesh generator reorders cells for display, never the
/// grid itself. The final column may be shorter than the others.
///
/// # Example
///
/// ```
/// use skyline_activity::{ActivityCell, ActivityGrid};
///
/// let grid = ActivityGrid::from_counts(vec![vec![0, 3, 1], vec![7]]);
/// assert_eq!(grid.column_count(), 2);
/// assert_eq!(grid.max_count(), 7);
/// assert_eq!(grid.max_column_len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActivityGrid {
    columns: Vec<Vec<ActivityCell>>,
}

impl ActivityGrid {
    /// An empty grid with no columns.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Build a grid from columns of cells.
    #[must_use]
    pub const fn from_columns(columns: Vec<Vec<ActivityCell>>) -> Self {
        Self { columns }
    }

    /// Build a grid of past days from raw counts.
    #[must_use]
    pub fn from_counts(columns: Vec<Vec<u32>>) -> Self {
        Self {
            columns: columns
                .into_iter()
                .map(|col| col.into_iter().map(ActivityCell::new).collect())
                .collect(),
        }
    }

    /// Append a column at the end (latest in time).
    pub fn push_column(&mut self, column: Vec<ActivityCell>) {
        self.columns.push(column);
    }

    /// Columns in chronological order.
    #[must_use]
    pub fn columns(&self) -> &[Vec<ActivityCell>] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the grid has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Length of the longest column.
    #[must_use]
    pub fn max_column_len(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Iterate over every cell, column by column.
    pub fn cells(&self) -> impl Iterator<Item = &ActivityCell> {
        self.columns.iter().flatten()
    }

    /// Highest count among non-future cells, `0` if there is none.
    ///
    /// This is the default quantization context for the grid.
    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.cells()
            .filter(|c| !c.is_future)
            .map(|c| c.count)
            .max()
            .unwrap_or(0)
    }

    /// Sum of all non-future counts.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.cells()
            .filter(|c| !c.is_future)
            .map(|c| u64::from(c.count))
            .sum()
    }
}

impl FromIterator<Vec<ActivityCell>> for ActivityGrid {
    fn from_iter<I: IntoIterator<Item = Vec<ActivityCell>>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid() {
        let grid = ActivityGrid::new();
        assert!(grid.is_empty());
        assert_eq!(grid.max_count(), 0);
        assert_eq!(grid.max_column_len(), 0);
        assert_eq!(grid.total_count(), 0);
    }

    #[test]
    fn future_cells_do_not_raise_the_maximum() {
        let mut future = ActivityCell::future();
        future.count = 99;
        let grid = ActivityGrid::from_columns(vec![vec![ActivityCell::new(4), future]]);
        assert_eq!(grid.max_count(), 4);
        assert_eq!(grid.total_count(), 4);
    }

    #[test]
    fn ragged_final_column() {
        let mut grid = ActivityGrid::from_counts(vec![vec![1; DAYS_PER_WEEK]]);
        grid.push_column(vec![ActivityCell::new(2).with_date("2024-12-30")]);
        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.max_column_len(), DAYS_PER_WEEK);
        assert_eq!(grid.columns()[1][0].date.as_deref(), Some("2024-12-30"));
    }
}
