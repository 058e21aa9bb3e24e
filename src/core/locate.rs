//! Header detection inside a freely laid-out worksheet grid.

use std::collections::HashSet;
use std::fmt;
use std::ops::Add;

use crate::core::cell::{CellValue, Row};
use crate::core::error::HeaderNotFound;
use crate::infra::utils::HalfWidth;

/// Zero-based cell coordinate inside a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cell text after full-width → half-width folding
fn normalized(cell: &CellValue) -> String {
    HalfWidth::fold(&cell.to_text())
}

/// Find the header row: the first row whose normalized cells contain every
/// header name. Returns the position of the cell equal to `header[0]`.
pub fn locate_header(grid: &[Row], header: &[&str]) -> Result<Position, HeaderNotFound> {
    let Some(anchor) = header.first() else {
        return Err(HeaderNotFound);
    };

    for (row_n, row) in grid.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(normalized).collect();
        let present: HashSet<&str> = cells.iter().map(String::as_str).collect();

        if !header.iter().all(|name| present.contains(name)) {
            continue;
        }

        if let Some(col_n) = cells.iter().position(|c| c == anchor) {
            return Ok(Position::new(row_n, col_n));
        }
    }

    Err(HeaderNotFound)
}

/// Rows below the header, sliced to start at the anchor column.
pub fn extract_table(grid: &[Row], header_position: Position) -> Vec<Row> {
    let origin = header_position + Position::new(1, 0);

    grid.iter()
        .skip(origin.row)
        .map(|row| row.get(origin.col..).map(<[CellValue]>::to_vec).unwrap_or_default())
        .collect()
}
