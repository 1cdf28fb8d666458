use std::fmt;

/// A single untyped spreadsheet cell.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Missing,
}

impl CellValue {
    /// Builds a text cell, mapping blank input to [`CellValue::Missing`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self::Missing
        } else {
            Self::Text(value)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Missing => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Formats a numeric cell the way a placement ID reads in a sheet.
///
/// Integral values drop the fractional part so `12345.0` stringifies as
/// `12345`; everything else uses the shortest round-trip form.
///
/// ```
/// use tagsheet_model::format_number;
///
/// assert_eq!(format_number(12345.0), "12345");
/// assert_eq!(format_number(100.0), "100");
/// assert_eq!(format_number(1.5), "1.5");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// A rectangular table of cells with an optional header row.
///
/// The header is present exactly when the source carried a header row. Every
/// row, and the header when present, has [`RawTable::width`] cells. Fields are
/// read-only after construction.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct RawTable {
    header: Option<Vec<String>>,
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl RawTable {
    /// Builds a table, padding short rows (and the header) to the widest row.
    pub fn new(header: Option<Vec<String>>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(header.as_ref().map(Vec::len))
            .max()
            .unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Missing);
                row
            })
            .collect();
        let header = header.map(|mut labels| {
            labels.resize(width, String::new());
            labels
        });
        Self {
            header,
            rows,
            width,
        }
    }

    /// Splits the first row off as the header when `has_header_row` is set.
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>, has_header_row: bool) -> Self {
        if has_header_row && !rows.is_empty() {
            let header = rows.remove(0).iter().map(ToString::to_string).collect();
            Self::new(Some(header), rows)
        } else {
            Self::new(None, rows)
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Data rows, each exactly [`RawTable::width`] cells wide.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn header_label(&self, column: usize) -> Option<&str> {
        self.header
            .as_ref()
            .and_then(|labels| labels.get(column).map(String::as_str))
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Iterates the data cells of one column, top to bottom.
    pub fn column(&self, column: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().filter_map(move |row| row.get(column))
    }
}
