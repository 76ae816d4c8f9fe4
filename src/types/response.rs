//! The data-slice response supplied by a data listener.

use serde::{Deserialize, Serialize};

/// One datum of the virtual dataset.
///
/// The engine treats values as opaque; they only need to be renderable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// True for [`CellValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// A rectangular slice of the virtual dataset plus its declared extent.
///
/// `data` is columnar: `data[x][y]` is the `y`th row of the `x`th column of
/// the slice. A response may under-deliver at dataset edges; missing cells
/// render empty. `row_headers`/`column_headers`, when present, hold one
/// group-path per slice row/column in increasing specificity; an absent
/// array suppresses header rendering for that axis entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataResponse {
    /// Total number of rows in the underlying dataset.
    pub num_rows: u32,
    /// Total number of columns in the underlying dataset.
    pub num_columns: u32,
    /// Columnar cell data covering (at most) the requested viewport.
    pub data: Vec<Vec<CellValue>>,
    /// Group-path labels, one per slice row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_headers: Option<Vec<Vec<CellValue>>>,
    /// Group-path labels, one per slice column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_headers: Option<Vec<Vec<CellValue>>>,
}

impl DataResponse {
    /// Depth of the row-header paths: the longest path seen, 0 when absent.
    pub fn row_header_depth(&self) -> u32 {
        depth_of(self.row_headers.as_deref())
    }

    /// Depth of the column-header paths: the longest path seen, 0 when absent.
    pub fn column_header_depth(&self) -> u32 {
        depth_of(self.column_headers.as_deref())
    }
}

fn depth_of(headers: Option<&[Vec<CellValue>]>) -> u32 {
    let max = headers
        .map(|h| h.iter().map(Vec::len).max().unwrap_or(0))
        .unwrap_or(0);
    u32::try_from(max).unwrap_or(u32::MAX)
}
