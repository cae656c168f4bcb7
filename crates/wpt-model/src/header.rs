//! Ordered, unique column names of a delimited file.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{Result, TableError};

/// Column layout of a delimited file.
///
/// The name → position index is rebuilt after every structural change so it
/// always agrees with the ordered column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    delimiter: char,
}

impl Header {
    /// Parse a header line split on `delimiter`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if a name appears twice.
    pub fn parse(line: &str, delimiter: char) -> Result<Self> {
        let columns = line.split(delimiter).map(str::to_string).collect();
        Self::from_columns(columns, delimiter)
    }

    /// Build a header from already separated column names.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if a name appears twice.
    pub fn from_columns(columns: Vec<String>, delimiter: char) -> Result<Self> {
        if let Some(column) = first_duplicate(&columns) {
            return Err(TableError::DuplicateColumn { column });
        }
        let mut header = Self {
            columns,
            index: HashMap::new(),
            delimiter,
        };
        header.rebuild_index();
        Ok(header)
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .columns
            .iter()
            .enumerate()
            .map(|(position, name)| (name.clone(), position))
            .collect();
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn column_at(&self, position: usize) -> Option<&str> {
        self.columns.get(position).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Insert `column` immediately after `after`, shifting later columns right.
    ///
    /// Returns the position of the new column. The header is left unchanged on
    /// error.
    ///
    /// # Errors
    ///
    /// - [`TableError::DuplicateColumn`] if `column` already exists.
    /// - [`TableError::AnchorNotFound`] if `after` is not a column.
    pub fn insert_after(&mut self, after: &str, column: impl Into<String>) -> Result<usize> {
        let column = column.into();
        if self.contains(&column) {
            return Err(TableError::DuplicateColumn { column });
        }
        let Some(anchor) = self.column_index(after) else {
            return Err(TableError::AnchorNotFound {
                anchor: after.to_string(),
                column,
            });
        };
        let position = anchor + 1;
        self.columns.insert(position, column);
        self.rebuild_index();
        Ok(position)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// All column names joined by the delimiter.
    pub fn serialize(&self) -> String {
        let mut buf = [0; 4];
        let separator: &str = self.delimiter.encode_utf8(&mut buf);
        self.columns.join(separator)
    }
}

fn first_duplicate(columns: &[String]) -> Option<String> {
    let mut seen = HashSet::with_capacity(columns.len());
    columns
        .iter()
        .find(|name| !seen.insert(name.as_str()))
        .cloned()
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
