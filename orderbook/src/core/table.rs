//! Raw persisted order table
//!
//! The table is kept as text: a header row plus one `Vec<String>` per record.
//! Columns this crate does not know about are carried through untouched so a
//! rewrite never drops a deployment's extra data.

use std::collections::HashSet;

use shared::{RowId, columns};

use crate::error::{OrderbookError, OrderbookResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names, in file order
    pub headers: Vec<String>,
    /// Records, each exactly `headers.len()` cells wide
    pub rows: Vec<Vec<String>>,
    /// Source line numbers of records that were skipped while parsing
    pub skipped_lines: Vec<u64>,
}

impl RawTable {
    /// Empty table with the given header
    pub fn with_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            skipped_lines: Vec::new(),
        }
    }

    /// Empty table with the canonical order header
    pub fn canonical() -> Self {
        Self::with_headers(columns::CANONICAL)
    }

    /// Parse CSV text.
    ///
    /// Records with more fields than the header are skipped; records with
    /// fewer are padded with empty cells. Records that are not valid UTF-8 or
    /// are entirely blank are skipped. An I/O failure aborts the parse.
    pub fn parse_csv(bytes: &[u8]) -> OrderbookResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Ok(Self::default());
        }

        let width = headers.len();
        let mut rows = Vec::new();
        let mut skipped_lines = Vec::new();

        for result in reader.records() {
            match result {
                Ok(record) => {
                    let line = record.position().map(|p| p.line()).unwrap_or(0);
                    if record.len() > width || record.iter().all(|cell| cell.trim().is_empty()) {
                        skipped_lines.push(line);
                        continue;
                    }
                    let mut row: Vec<String> = record.iter().map(str::to_string).collect();
                    row.resize(width, String::new());
                    rows.push(row);
                }
                Err(e) if e.is_io_error() => return Err(OrderbookError::Csv(e)),
                Err(e) => {
                    skipped_lines.push(e.position().map(|p| p.line()).unwrap_or(0));
                }
            }
        }

        Ok(Self {
            headers,
            rows,
            skipped_lines,
        })
    }

    /// Serialize back to CSV text, header first
    pub fn to_csv_bytes(&self) -> OrderbookResult<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.into_inner().map_err(|e| OrderbookError::Io(e.into_error()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of `name`, appending an empty column if it is absent
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(index) = self.column_index(name) {
            return index;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.headers.len() - 1
    }

    /// Cell text at `row` for `column`, if both exist
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(index)).map(String::as_str)
    }

    /// Overwrite one cell, creating the column when needed
    pub fn set_cell(&mut self, row: usize, column: &str, value: impl Into<String>) {
        let index = self.ensure_column(column);
        if let Some(r) = self.rows.get_mut(row) {
            r[index] = value.into();
        }
    }

    /// Append a record from `(column, value)` pairs; unspecified columns stay empty
    pub fn push_row(&mut self, cells: &[(&str, String)]) -> usize {
        for (column, _) in cells {
            self.ensure_column(column);
        }
        let mut row = vec![String::new(); self.headers.len()];
        for (column, value) in cells {
            if let Some(index) = self.column_index(column) {
                row[index] = value.clone();
            }
        }
        self.rows.push(row);
        self.rows.len() - 1
    }

    pub fn remove_row(&mut self, row: usize) -> Vec<String> {
        self.rows.remove(row)
    }

    /// Give every record a unique `Order_ID`.
    ///
    /// Records that already carry a valid id keep it (first occurrence wins on
    /// duplicates). The rest are numbered in file order from `max + 1`, so a
    /// file without any ids is numbered by position from 0. Ids at or above
    /// `RowId::LIMIT` count as missing. Returns how many ids were assigned.
    pub fn assign_row_ids(&mut self) -> usize {
        let column = self.ensure_column(columns::ORDER_ID);
        let mut seen = HashSet::new();
        let mut max: Option<u64> = None;
        let mut unassigned = Vec::new();

        for (index, row) in self.rows.iter().enumerate() {
            match parse_row_id(&row[column]) {
                Some(id) if seen.insert(id) => max = max.max(Some(id)),
                _ => unassigned.push(index),
            }
        }

        let mut next = max
            .and_then(|m| RowId(m).next())
            .map(|id| id.value())
            .unwrap_or(0);
        for index in &unassigned {
            // Past the id limit, fall back to the lowest free ids
            if next >= RowId::LIMIT {
                next = 0;
            }
            while seen.contains(&next) {
                next += 1;
            }
            self.rows[*index][column] = next.to_string();
            seen.insert(next);
            next += 1;
        }
        unassigned.len()
    }

    /// Id stored on a record, if any
    pub fn row_id_at(&self, row: usize) -> Option<RowId> {
        self.cell(row, columns::ORDER_ID).and_then(parse_row_id).map(RowId)
    }

    /// Current position of the record carrying `row_id`
    pub fn position_of(&self, row_id: RowId) -> Option<usize> {
        let column = self.column_index(columns::ORDER_ID)?;
        self.rows
            .iter()
            .position(|row| parse_row_id(&row[column]) == Some(row_id.value()))
    }

    /// Id for a newly created record
    pub fn next_row_id(&self) -> RowId {
        let used: HashSet<RowId> = (0..self.rows.len()).filter_map(|row| self.row_id_at(row)).collect();
        match used.iter().max() {
            None => RowId(0),
            Some(max) => max.next().unwrap_or_else(|| {
                (0..RowId::LIMIT)
                    .map(RowId)
                    .find(|id| !used.contains(id))
                    .unwrap_or_default()
            }),
        }
    }
}

/// Parse an id cell. Accepts integral floats ("3.0") written by spreadsheet
/// tools; anything at or above `RowId::LIMIT` is not an id.
fn parse_row_id(cell: &str) -> Option<u64> {
    let cell = cell.trim();
    if let Ok(id) = cell.parse::<u64>() {
        return (id < RowId::LIMIT).then_some(id);
    }
    let value = cell.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < RowId::LIMIT as f64)
        .then_some(value as u64)
}
