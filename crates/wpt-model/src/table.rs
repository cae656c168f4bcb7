//! A delimited file held in memory: one header plus ordered rows.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::DEFAULT_DELIMITER;
use crate::error::{Result, TableError};
use crate::header::Header;
use crate::row::{Cells, Row, RowMut};

/// Header and rows of one delimited file.
///
/// Every row is bound to the single header owned here; inserting a column
/// through [`TabularFile::add_column_after`] changes what every row
/// serializes to without touching stored cells.
#[derive(Debug, Clone)]
pub struct TabularFile {
    header: Header,
    rows: Vec<Cells>,
}

impl TabularFile {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Load a tab-delimited file.
    ///
    /// # Errors
    ///
    /// - [`TableError::Io`] if the file cannot be read.
    /// - [`TableError::MalformedSource`] if it is empty or whitespace only.
    /// - [`TableError::DuplicateColumn`] if the header repeats a name.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_delimiter(path, DEFAULT_DELIMITER)
    }

    pub fn load_with_delimiter(path: &Path, delimiter: char) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
        let table = Self::parse(&text, delimiter).map_err(|err| match err {
            TableError::MissingHeader => TableError::malformed(path, "file is empty"),
            other => other,
        })?;
        debug!(
            path = %path.display(),
            columns = table.header.column_count(),
            rows = table.rows.len(),
            "loaded table"
        );
        Ok(table)
    }

    /// Parse delimited text.
    ///
    /// Leading and trailing whitespace is stripped from the whole text before
    /// it is split on `\n`; the first line becomes the header and every other
    /// line one row.
    ///
    /// # Errors
    ///
    /// - [`TableError::MissingHeader`] if the text is blank.
    /// - [`TableError::DuplicateColumn`] if the header repeats a name.
    pub fn parse(text: &str, delimiter: char) -> Result<Self> {
        let contents = text.trim();
        if contents.is_empty() {
            return Err(TableError::MissingHeader);
        }
        let mut lines = contents.split('\n');
        let header_line = lines.next().ok_or(TableError::MissingHeader)?;
        let mut table = Self::new(Header::parse(header_line, delimiter)?);
        for line in lines {
            table.push_line(line);
        }
        Ok(table)
    }

    /// Append a row populated positionally from `line`.
    pub fn push_line(&mut self, line: &str) {
        let cells = Cells::from_line(&self.header, line);
        self.rows.push(cells);
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows
            .get(index)
            .map(|cells| Row::new(&self.header, cells))
    }

    pub fn row_mut(&mut self, index: usize) -> Option<RowMut<'_>> {
        let header = &self.header;
        self.rows
            .get_mut(index)
            .map(|cells| RowMut::new(header, cells))
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|cells| Row::new(&self.header, cells))
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = RowMut<'_>> {
        let header = &self.header;
        self.rows
            .iter_mut()
            .map(move |cells| RowMut::new(header, cells))
    }

    /// Remove the row at `index`, keeping the order of the rest.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_row(&mut self, index: usize) -> Cells {
        self.rows.remove(index)
    }

    /// Keep only rows for which `keep` returns true, in one stable pass.
    ///
    /// Returns the number of rows removed.
    pub fn retain_rows<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(Row<'_>) -> bool,
    {
        let before = self.rows.len();
        let header = &self.header;
        self.rows.retain(|cells| keep(Row::new(header, cells)));
        before - self.rows.len()
    }

    /// Insert `column` after `after` in the shared header.
    ///
    /// Existing rows serialize the new column as empty until it is set.
    ///
    /// # Errors
    ///
    /// See [`Header::insert_after`].
    pub fn add_column_after(&mut self, after: &str, column: impl Into<String>) -> Result<usize> {
        self.header.insert_after(after, column)
    }

    /// Write the header line and every row line, each `\n` terminated.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", self.header.serialize())?;
        for row in self.rows() {
            writeln!(writer, "{}", row.serialize())?;
        }
        writer.flush()
    }

    /// Write the table to `path`, truncating any existing content.
    ///
    /// Returns only after every line has been flushed. On error the target
    /// should be treated as corrupt and the whole write retried.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Io`] if the file cannot be created or written.
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| TableError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
            .map_err(|e| TableError::io(path, e))?;
        writer
            .into_inner()
            .map_err(|e| TableError::io(path, e.into_error()))?;
        debug!(path = %path.display(), rows = self.rows.len(), "wrote table");
        Ok(())
    }
}

impl fmt::Display for TabularFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
