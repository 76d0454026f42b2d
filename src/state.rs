use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

use crate::data::header::{self, HeaderSpec};
use crate::data::loader;
use crate::data::model::{Axis, AxisMeta, DataRow, MetaField, TableError, TableModel, is_valid_symbol};
use crate::data::regression::{self, FitError, FitResult};
use crate::settings::Settings;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetaError {
    #[error("{0:?} is not a valid symbol (letters, digits and '_', not starting with a digit)")]
    InvalidSymbol(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("file is empty, expected a header record")]
    MissingHeader,

    #[error("record {record} has {found} fields, expected 2")]
    FieldCount { record: usize, found: usize },
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The full editor state, independent of rendering.
///
/// Every `on_*` handler leaves the table invariant intact (unless a batch is
/// open) and refreshes `xs`, `ys` and `fit` before returning.
pub struct Session {
    pub table: TableModel,

    pub x_meta: AxisMeta,
    pub y_meta: AxisMeta,

    /// Materialized table columns (NaN for missing cells).
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,

    /// Current fit, or why there is none.
    pub fit: Result<FitResult, FitError>,

    /// File the data was last loaded from or saved to.
    pub current_path: Option<PathBuf>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub settings: Settings,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let mut session = Self {
            table: TableModel::new(),
            x_meta: AxisMeta::with_symbol("x"),
            y_meta: AxisMeta::with_symbol("y"),
            xs: Vec::new(),
            ys: Vec::new(),
            fit: Err(FitError::InsufficientData { valid: 0 }),
            current_path: None,
            status_message: None,
            settings,
        };
        session.refit();
        session
    }

    pub fn meta(&self, axis: Axis) -> &AxisMeta {
        match axis {
            Axis::X => &self.x_meta,
            Axis::Y => &self.y_meta,
        }
    }

    fn meta_mut(&mut self, axis: Axis) -> &mut AxisMeta {
        match axis {
            Axis::X => &mut self.x_meta,
            Axis::Y => &mut self.y_meta,
        }
    }

    /// Recompute the fit from scratch. Skipped while a batch edit is open.
    fn refit(&mut self) {
        if self.table.in_batch() {
            return;
        }
        let (xs, ys) = self.table.materialize();
        self.fit = regression::fit(&xs, &ys);
        if let Err(reason) = &self.fit {
            log::debug!("no fit: {reason}");
        }
        self.xs = xs;
        self.ys = ys;
    }

    // -- Coordinator contract --

    pub fn on_cell_edited(&mut self, row: usize, axis: Axis, text: &str) -> Result<(), TableError> {
        self.table.set_cell(row, axis, text)?;
        self.refit();
        Ok(())
    }

    /// Update one metadata field. Symbols must be identifiers (or empty);
    /// anything else is rejected and the field keeps its old value.
    pub fn on_axis_meta_changed(
        &mut self,
        axis: Axis,
        field: MetaField,
        value: &str,
    ) -> Result<(), MetaError> {
        if field == MetaField::Symbol && !is_valid_symbol(value) {
            return Err(MetaError::InvalidSymbol(value.to_string()));
        }
        *self.meta_mut(axis).field_mut(field) = value.to_string();
        self.refit();
        Ok(())
    }

    /// Replace headers and rows with `records` (header record first).
    ///
    /// Everything is validated before anything is replaced, so on error the
    /// session is unchanged.
    pub fn on_load(&mut self, records: &[Vec<String>]) -> Result<(), LoadError> {
        let (header, data) = records.split_first().ok_or(LoadError::MissingHeader)?;
        if let Some((record, found)) = std::iter::once(header)
            .chain(data)
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != 2)
        {
            return Err(LoadError::FieldCount { record, found });
        }

        let x_meta = meta_from_header(header::parse_lenient(&header[0]));
        let y_meta = meta_from_header(header::parse_lenient(&header[1]));
        let table = TableModel::from_records(data.iter().map(|r| DataRow::new(&r[0], &r[1])));

        self.x_meta = x_meta;
        self.y_meta = y_meta;
        self.table = table;
        self.refit();
        Ok(())
    }

    /// Records to persist: encoded headers, then the raw text of every
    /// non-blank data row.
    pub fn on_save(&mut self) -> Vec<[String; 2]> {
        self.refit();

        let header = [
            header::format(&self.x_meta.name, &self.x_meta.symbol, &self.x_meta.unit),
            header::format(&self.y_meta.name, &self.y_meta.symbol, &self.y_meta.unit),
        ];
        std::iter::once(header)
            .chain(
                self.table
                    .data_rows()
                    .iter()
                    .filter(|r| !r.is_blank())
                    .map(|r| [r.x.clone(), r.y.clone()]),
            )
            .collect()
    }

    /// Insert a blank row above `before` (the "Insert Row" context action).
    pub fn insert_row(&mut self, before: usize) {
        self.table.insert_blank_row(before);
        self.refit();
    }

    /// Clear both cells of `row` as one edit; the row disappears when the
    /// batch closes.
    pub fn delete_row(&mut self, row: usize) -> Result<(), TableError> {
        self.begin_batch_edit();
        let cleared = self
            .table
            .set_cell(row, Axis::X, "")
            .and_then(|()| self.table.set_cell(row, Axis::Y, ""));
        self.end_batch_edit();
        cleared
    }

    pub fn begin_batch_edit(&mut self) {
        self.table.begin_batch_edit();
    }

    pub fn end_batch_edit(&mut self) {
        self.table.end_batch_edit();
        self.refit();
    }

    // -- File I/O --

    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        let records = loader::load_file(path)?;
        self.on_load(&records)?;
        log::info!(
            "Loaded {} rows from {}",
            self.table.data_rows().len(),
            path.display()
        );
        self.current_path = Some(path.to_path_buf());
        self.status_message = None;
        Ok(())
    }

    pub fn save_path(&mut self, path: &Path) -> Result<()> {
        let records = self.on_save();
        loader::save_file(path, &records)?;
        log::info!("Saved {} rows to {}", records.len() - 1, path.display());
        self.current_path = Some(path.to_path_buf());
        self.status_message = None;
        Ok(())
    }
}

fn meta_from_header(spec: HeaderSpec) -> AxisMeta {
    AxisMeta {
        name: spec.name,
        symbol: spec.symbol,
        unit: spec.unit,
    }
}
