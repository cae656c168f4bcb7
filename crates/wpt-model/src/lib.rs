//! Tab-delimited file model.
//!
//! A [`TabularFile`] owns exactly one [`Header`] and a sequence of cell records.
//! Rows are exposed as [`Row`] / [`RowMut`] views that borrow the shared header,
//! so a column inserted through the file shows up in every row's serialization
//! without the rows being touched.

pub mod error;
pub mod header;
pub mod row;
pub mod table;

pub use error::{Result, TableError};
pub use header::Header;
pub use row::{Cells, Row, RowMut};
pub use table::TabularFile;

/// Field separator used when none is configured.
pub const DEFAULT_DELIMITER: char = '\t';
