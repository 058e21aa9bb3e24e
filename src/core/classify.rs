//! Row classification by positional heuristics.
//!
//! Rows carry no explicit type tag; their shape decides the level.
//! The rule order below is what existing workbooks rely on.

use std::fmt;

use crate::core::cell::CellValue;

/// Literal marker in column 0 of a paint annotation row
pub const PAINT_MARKER: &str = "*=";

/// Hierarchy level of a classified row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// Named grouping `#1`..`#5`
    Level(u8),
    Block,
    Detail,
    Paint,
}

impl RowKind {
    /// Numeric depth in the 1..=8 hierarchy
    pub fn depth(self) -> u8 {
        match self {
            RowKind::Level(n) => n,
            RowKind::Block => 6,
            RowKind::Detail => 7,
            RowKind::Paint => 8,
        }
    }

    /// Label used in tree views: `#1`..`#5`, `BLOCK`, `DETAIL`, `PAINT`
    pub fn label(self) -> String {
        match self {
            RowKind::Level(n) => format!("#{n}"),
            RowKind::Block => "BLOCK".to_string(),
            RowKind::Detail => "DETAIL".to_string(),
            RowKind::Paint => "PAINT".to_string(),
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Classify one row. First matching rule wins; unrecognized rows yield `None`.
pub fn classify(row: &[CellValue]) -> Option<RowKind> {
    let first = row.first()?;

    // 1) Level markers "#1".."#5"
    if let Some(n) = level_marker(first) {
        return Some(RowKind::Level(n));
    }

    // 2) Blank first column with a string name next to it
    if first.is_absent() && matches!(row.get(1), Some(CellValue::Text(_))) {
        return Some(RowKind::Block);
    }

    // 3) Paint marker
    if first.as_str() == Some(PAINT_MARKER) {
        return Some(RowKind::Paint);
    }

    // 4) Any other row with a mark and a first dimension
    if row.len() > 2 && row[0].is_present() && row[1].is_present() {
        return Some(RowKind::Detail);
    }

    None
}

fn level_marker(cell: &CellValue) -> Option<u8> {
    let s = cell.as_str()?;
    let digit = s.strip_prefix('#')?;
    match digit {
        "1" | "2" | "3" | "4" | "5" => digit.parse().ok(),
        _ => None,
    }
}
