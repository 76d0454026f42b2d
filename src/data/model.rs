use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Axis – selects a table column and its metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

// ---------------------------------------------------------------------------
// AxisMeta – long name, symbol and unit of one axis
// ---------------------------------------------------------------------------

/// Descriptive metadata for one plotted dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMeta {
    pub name: String,
    pub symbol: String,
    pub unit: String,
}

/// Which part of an [`AxisMeta`] is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Name,
    Symbol,
    Unit,
}

impl MetaField {
    pub const ALL: [MetaField; 3] = [MetaField::Name, MetaField::Symbol, MetaField::Unit];
}

impl AxisMeta {
    pub fn with_symbol(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            ..Self::default()
        }
    }

    pub fn field(&self, field: MetaField) -> &str {
        match field {
            MetaField::Name => &self.name,
            MetaField::Symbol => &self.symbol,
            MetaField::Unit => &self.unit,
        }
    }

    pub fn field_mut(&mut self, field: MetaField) -> &mut String {
        match field {
            MetaField::Name => &mut self.name,
            MetaField::Symbol => &mut self.symbol,
            MetaField::Unit => &mut self.unit,
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`, or empty while the user is still typing.
pub fn is_valid_symbol(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        None => true,
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        Some(_) => false,
    }
}

// ---------------------------------------------------------------------------
// DataRow – one (x, y) pair of raw cell text
// ---------------------------------------------------------------------------

/// Cell text is stored verbatim; parsing happens only in
/// [`TableModel::materialize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataRow {
    pub x: String,
    pub y: String,
}

impl DataRow {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.x.is_empty() && self.y.is_empty()
    }

    pub fn cell(&self, axis: Axis) -> &str {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    fn cell_mut(&mut self, axis: Axis) -> &mut String {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("row {row} is out of range (table has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },
}

// ---------------------------------------------------------------------------
// TableModel – self-expanding two-column table
// ---------------------------------------------------------------------------

/// Ordered rows with exactly one trailing blank *entry row*.
///
/// After every edit (or at the end of a batch) the last row is blank and no
/// other row is blank. Rows inserted with [`insert_blank_row`] are the one
/// exception: they stay blank until the user edits them.
///
/// [`insert_blank_row`]: TableModel::insert_blank_row
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    rows: Vec<DataRow>,
    batch_depth: usize,
}

impl Default for TableModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TableModel {
    pub fn new() -> Self {
        Self {
            rows: vec![DataRow::default()],
            batch_depth: 0,
        }
    }

    /// Build a table from loaded rows, appending the entry row. Blank rows
    /// are dropped so the entry row is the only blank one.
    pub fn from_records(rows: impl IntoIterator<Item = DataRow>) -> Self {
        let mut rows: Vec<DataRow> = rows.into_iter().filter(|r| !r.is_blank()).collect();
        rows.push(DataRow::default());
        Self {
            rows,
            batch_depth: 0,
        }
    }

    /// Number of rows including the entry row (never zero).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    /// All rows except the trailing entry row.
    pub fn data_rows(&self) -> &[DataRow] {
        &self.rows[..self.last()]
    }

    pub fn cell(&self, row: usize, axis: Axis) -> Option<&str> {
        self.rows.get(row).map(|r| r.cell(axis))
    }

    pub fn is_entry_row(&self, row: usize) -> bool {
        row == self.last()
    }

    pub fn in_batch(&self) -> bool {
        self.batch_depth > 0
    }

    fn last(&self) -> usize {
        self.rows.len() - 1
    }

    /// Store `text` verbatim in one cell, then restore the entry-row
    /// invariant for that row (deferred while a batch edit is open).
    pub fn set_cell(&mut self, row: usize, axis: Axis, text: &str) -> Result<(), TableError> {
        let len = self.rows.len();
        let cell = self
            .rows
            .get_mut(row)
            .ok_or(TableError::RowOutOfRange { row, len })?
            .cell_mut(axis);
        cell.clear();
        cell.push_str(text);

        if !self.in_batch() {
            self.restore_invariant(row);
        }
        Ok(())
    }

    /// Insert a blank row before `before`. The position is clamped so the
    /// entry row stays last.
    pub fn insert_blank_row(&mut self, before: usize) {
        let at = before.min(self.last());
        self.rows.insert(at, DataRow::default());
    }

    /// Fix up the table after `row` was edited: a blanked interior row is
    /// removed, a filled-in entry row gets a new entry row after it.
    /// Only the edited row is considered.
    pub fn restore_invariant(&mut self, row: usize) {
        let Some(edited) = self.rows.get(row) else {
            return;
        };
        let blank = edited.is_blank();
        if row != self.last() {
            if blank {
                self.rows.remove(row);
            }
        } else if !blank {
            self.rows.push(DataRow::default());
        }
    }

    /// Defer invariant restoration until the matching [`end_batch_edit`].
    /// Batches nest.
    ///
    /// [`end_batch_edit`]: TableModel::end_batch_edit
    pub fn begin_batch_edit(&mut self) {
        self.batch_depth += 1;
    }

    /// Close a batch. Closing the outermost batch drops every blank row and
    /// re-appends a single entry row.
    pub fn end_batch_edit(&mut self) {
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 {
            self.normalize();
        }
    }

    fn normalize(&mut self) {
        self.rows.retain(|r| !r.is_blank());
        self.rows.push(DataRow::default());
    }

    /// Parse every data row into aligned `(xs, ys)`. Empty or unparseable
    /// cells become NaN; the entry row is skipped.
    pub fn materialize(&self) -> (Vec<f64>, Vec<f64>) {
        self.data_rows()
            .iter()
            .map(|r| (parse_cell(&r.x), parse_cell(&r.y)))
            .unzip()
    }
}

/// Parse cell text as `f64`, NaN when empty or invalid.
pub fn parse_cell(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}
