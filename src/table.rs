//! Tabular storage of parsed results.
//!
//! A [`ResultTable`] holds one row per matched leaf path. Its columns are the
//! reserved [`PATH_COLUMN`] followed by every parameter name; a row whose path
//! did not capture a parameter holds `None` (the missing marker) in that
//! column. Cells start out as raw strings and can be cast in place.

use crate::convert::{parse_bool, parse_float, parse_int};
use crate::error::{ManagerError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Reserved column holding the matched leaf path of every row.
pub const PATH_COLUMN: &str = "__PATH__";

/// One record before it is placed into a table: column name to value.
pub type Record = BTreeMap<String, CellValue>;

/// Value of one table cell.
///
/// Equality is typed: `Str("3")` is not equal to `Int(3)`. Cast columns with
/// [`ResultTable::cast_column`] before filtering by non-string values.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Path(PathBuf),
}

impl CellValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            CellValue::Path(p) => Some(p),
            _ => None,
        }
    }

    fn cast(&self, column_type: ColumnType) -> Result<CellValue> {
        if self.column_type() == column_type {
            return Ok(self.clone());
        }
        let text = self.to_string();
        Ok(match column_type {
            ColumnType::Str => CellValue::Str(text),
            ColumnType::Int => CellValue::Int(parse_int(&text)?),
            ColumnType::Float => CellValue::Float(parse_float(&text)?),
            ColumnType::Bool => CellValue::Bool(parse_bool(&text)?),
            ColumnType::Path => CellValue::Path(PathBuf::from(text)),
        })
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            CellValue::Str(_) => ColumnType::Str,
            CellValue::Int(_) => ColumnType::Int,
            CellValue::Float(_) => ColumnType::Float,
            CellValue::Bool(_) => ColumnType::Bool,
            CellValue::Path(_) => ColumnType::Path,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Str(s) => write!(f, "{s}"),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(v) => write!(f, "{v}"),
            CellValue::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Str(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Str(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(i64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<PathBuf> for CellValue {
    fn from(value: PathBuf) -> Self {
        CellValue::Path(value)
    }
}

/// Target type of [`ResultTable::cast_column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Str,
    Int,
    Float,
    Bool,
    Path,
}

/// Row selection by column values.
///
/// All conditions are combined with AND. Rows with a missing value in a
/// filtered column never match.
///
/// ```rust
/// use experiment_manager::Filter;
///
/// let filter = Filter::new()
///     .equal("K", "3")
///     .contained("sample", ["True"]);
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    equal: Vec<(String, CellValue)>,
    contained: Vec<(String, Vec<CellValue>)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep rows whose `column` equals `value`.
    pub fn equal(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.equal.push((column.into(), value.into()));
        self
    }

    /// Keep rows whose `column` is one of `values`.
    pub fn contained<I, V>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.contained
            .push((column.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.equal.is_empty() && self.contained.is_empty()
    }

    fn columns(&self) -> impl Iterator<Item = &str> {
        self.equal
            .iter()
            .map(|(c, _)| c.as_str())
            .chain(self.contained.iter().map(|(c, _)| c.as_str()))
    }
}

/// Ordered rows of parsed parameter records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<CellValue>>>,
}

/// Borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Option<CellValue>],
}

impl<'a> Row<'a> {
    /// Value of `column`, `None` when missing or when the column does not exist.
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.values[index].as_ref()
    }

    /// Leaf path of the row.
    pub fn path(&self) -> Option<&'a Path> {
        self.get(PATH_COLUMN).and_then(CellValue::as_path)
    }

    pub fn values(&self) -> &'a [Option<CellValue>] {
        self.values
    }
}

impl ResultTable {
    /// Create an empty table with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from records.
    ///
    /// Columns are `preferred` first, in order, then every other key in order
    /// of first appearance. Keys absent from a record become missing cells.
    pub fn from_records<I>(records: I, preferred: &[String]) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut columns: Vec<String> = Vec::with_capacity(preferred.len());
        for column in preferred {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }

        let records: Vec<Record> = records.into_iter().collect();
        for record in &records {
            for key in record.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|column| record.remove(column))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| ManagerError::ColumnNotFound(column.to_string()))
    }

    /// All values of a column, top to bottom.
    pub fn column(&self, column: &str) -> Result<Vec<Option<&CellValue>>> {
        let index = self.column_index(column)?;
        Ok(self.rows.iter().map(|row| row[index].as_ref()).collect())
    }

    /// Value at `row` in `column`; `Ok(None)` when missing or out of range.
    pub fn get(&self, row: usize, column: &str) -> Result<Option<&CellValue>> {
        let index = self.column_index(column)?;
        Ok(self.rows.get(row).and_then(|r| r[index].as_ref()))
    }

    pub fn row(&self, row: usize) -> Option<Row<'_>> {
        self.rows.get(row).map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// Leaf paths of all rows, in row order.
    pub fn paths(&self) -> Vec<&Path> {
        self.rows().filter_map(|row| row.path()).collect()
    }

    /// Rows matching every condition of `filter`, as a new table.
    ///
    /// # Errors
    /// Returns [`ManagerError::ColumnNotFound`] if the filter names a column
    /// the table does not have.
    pub fn filter(&self, filter: &Filter) -> Result<ResultTable> {
        for column in filter.columns() {
            self.column_index(column)?;
        }

        let equal: Vec<(usize, &CellValue)> = filter
            .equal
            .iter()
            .map(|(c, v)| Ok((self.column_index(c)?, v)))
            .collect::<Result<_>>()?;
        let contained: Vec<(usize, &[CellValue])> = filter
            .contained
            .iter()
            .map(|(c, vs)| Ok((self.column_index(c)?, vs.as_slice())))
            .collect::<Result<_>>()?;

        let rows = self
            .rows
            .iter()
            .filter(|row| {
                equal
                    .iter()
                    .all(|(i, v)| row[*i].as_ref() == Some(*v))
                    && contained
                        .iter()
                        .all(|(i, vs)| row[*i].as_ref().map_or(false, |cell| vs.contains(cell)))
            })
            .cloned()
            .collect();

        Ok(ResultTable {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Convert every present cell of `column` to `column_type`.
    ///
    /// The table is left unchanged if any cell fails to convert.
    pub fn cast_column(&mut self, column: &str, column_type: ColumnType) -> Result<()> {
        let index = self.column_index(column)?;
        let converted: Vec<Option<CellValue>> = self
            .rows
            .iter()
            .map(|row| row[index].as_ref().map(|v| v.cast(column_type)).transpose())
            .collect::<Result<_>>()?;

        for (row, value) in self.rows.iter_mut().zip(converted) {
            row[index] = value;
        }
        Ok(())
    }

    /// Derive `target` from `source` cell by cell, adding or replacing `target`.
    ///
    /// Missing source cells stay missing in the target column.
    ///
    /// ```rust,no_run
    /// # use experiment_manager::{CellValue, ResultTable, PATH_COLUMN};
    /// # fn load(table: &mut ResultTable) -> experiment_manager::Result<()> {
    /// table.map_column(PATH_COLUMN, "time", |cell| {
    ///     let path = cell.as_path().unwrap().join("computational_time.txt");
    ///     let text = std::fs::read_to_string(path)?;
    ///     Ok(CellValue::Float(experiment_manager::convert::parse_float(&text)?))
    /// })
    /// # }
    /// ```
    pub fn map_column<F>(&mut self, source: &str, target: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&CellValue) -> Result<CellValue>,
    {
        let source_index = self.column_index(source)?;
        let derived: Vec<Option<CellValue>> = self
            .rows
            .iter()
            .map(|row| row[source_index].as_ref().map(&mut f).transpose())
            .collect::<Result<_>>()?;

        let target_index = match self.column_index(target) {
            Ok(index) => index,
            Err(_) => {
                self.columns.push(target.to_string());
                for row in &mut self.rows {
                    row.push(None);
                }
                self.columns.len() - 1
            }
        };

        for (row, value) in self.rows.iter_mut().zip(derived) {
            row[target_index] = value;
        }
        Ok(())
    }

    /// Number of rows per distinct combination of values in `columns`.
    ///
    /// Keys are the displayed cell values. Rows with a missing value in any of
    /// the grouping columns are not counted.
    pub fn group_sizes(&self, columns: &[&str]) -> Result<BTreeMap<Vec<String>, usize>> {
        let indices: Vec<usize> = columns
            .iter()
            .map(|c| self.column_index(c))
            .collect::<Result<_>>()?;

        let mut groups = BTreeMap::new();
        for row in &self.rows {
            let key: Option<Vec<String>> = indices
                .iter()
                .map(|i| row[*i].as_ref().map(ToString::to_string))
                .collect();
            if let Some(key) = key {
                *groups.entry(key).or_insert(0) += 1;
            }
        }
        Ok(groups)
    }
}
