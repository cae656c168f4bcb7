//! Row cells and the header-bound views used to read and write them.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, TableError};
use crate::header::Header;

/// Stored cell values of one record, keyed by column name.
///
/// A column that was never assigned is absent, which is distinct from an
/// assigned empty string. `Cells` on its own knows nothing about column
/// layout; go through [`Row`] or [`RowMut`] to get validated access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cells {
    values: HashMap<String, String>,
}

impl Cells {
    /// Populate cells positionally from a delimited line.
    ///
    /// Only `min(fields, columns)` positions are assigned: trailing columns
    /// without a field stay unassigned and extra fields are dropped.
    pub fn from_line(header: &Header, line: &str) -> Self {
        let values = header
            .columns()
            .iter()
            .zip(line.split(header.delimiter()))
            .map(|(column, value)| (column.clone(), value.to_string()))
            .collect();
        Self { values }
    }

    fn check(header: &Header, column: &str) -> Result<()> {
        if header.contains(column) {
            Ok(())
        } else {
            Err(TableError::unknown(column))
        }
    }

    fn has(&self, header: &Header, column: &str) -> bool {
        header.contains(column) && self.values.contains_key(column)
    }

    fn get(&self, header: &Header, column: &str) -> Result<Option<&str>> {
        Self::check(header, column)?;
        Ok(self.values.get(column).map(String::as_str))
    }

    fn serialize(&self, header: &Header) -> String {
        let mut line = String::new();
        for (position, column) in header.columns().iter().enumerate() {
            if position > 0 {
                line.push(header.delimiter());
            }
            if let Some(value) = self.values.get(column) {
                line.push_str(value);
            }
        }
        line
    }
}

/// Read-only view of one record bound to its header.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    header: &'a Header,
    cells: &'a Cells,
}

impl<'a> Row<'a> {
    pub fn new(header: &'a Header, cells: &'a Cells) -> Self {
        Self { header, cells }
    }

    /// True only if `column` is a header column and has been assigned.
    pub fn has(&self, column: &str) -> bool {
        self.cells.has(self.header, column)
    }

    /// Value of `column`, `None` when the column is known but unassigned.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if `column` is not in the header.
    pub fn get(&self, column: &str) -> Result<Option<&'a str>> {
        self.cells.get(self.header, column)
    }

    /// One field per header column in current header order.
    pub fn serialize(&self) -> String {
        self.cells.serialize(self.header)
    }
}

impl fmt::Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Mutable view of one record bound to its header.
#[derive(Debug)]
pub struct RowMut<'a> {
    header: &'a Header,
    cells: &'a mut Cells,
}

impl<'a> RowMut<'a> {
    pub fn new(header: &'a Header, cells: &'a mut Cells) -> Self {
        Self { header, cells }
    }

    pub fn has(&self, column: &str) -> bool {
        self.cells.has(self.header, column)
    }

    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if `column` is not in the header.
    pub fn get(&self, column: &str) -> Result<Option<&str>> {
        self.cells.get(self.header, column)
    }

    /// Assign `value` to `column` as-is.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if `column` is not in the header.
    pub fn set(&mut self, column: &str, value: impl Into<String>) -> Result<()> {
        Cells::check(self.header, column)?;
        self.cells.values.insert(column.to_string(), value.into());
        Ok(())
    }

    /// Return `column` to the unassigned state.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if `column` is not in the header.
    pub fn clear(&mut self, column: &str) -> Result<()> {
        Cells::check(self.header, column)?;
        self.cells.values.remove(column);
        Ok(())
    }

    pub fn serialize(&self) -> String {
        self.cells.serialize(self.header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Header {
        Header::parse("Host\tURL\tStatus", '\t').expect("parse header")
    }

    #[test]
    fn test_positional_population() {
        let header = header();
        let cells = Cells::from_line(&header, "a.com\t/index");
        let row = Row::new(&header, &cells);
        assert_eq!(row.get("Host").unwrap(), Some("a.com"));
        assert_eq!(row.get("URL").unwrap(), Some("/index"));
        assert_eq!(row.get("Status").unwrap(), None);
        assert!(!row.has("Status"));
        assert_eq!(row.serialize(), "a.com\t/index\t");
    }

    #[test]
    fn test_extra_fields_dropped() {
        let header = header();
        let cells = Cells::from_line(&header, "a\tb\tc\td\te");
        assert_eq!(Row::new(&header, &cells).serialize(), "a\tb\tc");
    }

    #[test]
    fn test_empty_string_is_assigned() {
        let header = header();
        let cells = Cells::from_line(&header, "\t\t");
        let row = Row::new(&header, &cells);
        assert!(row.has("Host"));
        assert_eq!(row.get("Host").unwrap(), Some(""));
    }

    #[test]
    fn test_set_then_get_returns_value_unchanged() {
        let header = header();
        let mut cells = Cells::default();
        let mut row = RowMut::new(&header, &mut cells);
        row.set("Status", " 200 ").unwrap();
        assert_eq!(row.get("Status").unwrap(), Some(" 200 "));
        assert!(row.has("Status"));
        row.clear("Status").unwrap();
        assert!(!row.has("Status"));
    }

    #[test]
    fn test_unknown_column_errors() {
        let header = header();
        let mut cells = Cells::default();
        let mut row = RowMut::new(&header, &mut cells);
        assert!(matches!(
            row.get("Hots"),
            Err(TableError::UnknownColumn { column }) if column == "Hots"
        ));
        assert!(matches!(
            row.set("Hots", "x"),
            Err(TableError::UnknownColumn { .. })
        ));
        assert!(!row.has("Hots"));
    }

    #[test]
    fn test_serialize_follows_current_header_order() {
        let mut header = header();
        let cells = Cells::from_line(&header, "a.com\t/index\t200");
        header.insert_after("Host", "Owned").unwrap();
        let row = Row::new(&header, &cells);
        assert_eq!(row.serialize(), "a.com\t\t/index\t200");
        assert_eq!(row.get("Owned").unwrap(), None);
    }
}
