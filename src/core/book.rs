//! Workbook and sheet model: header-located tables per sheet, concatenated
//! per book and across books in argument order.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::core::cell::Row;
use crate::core::classify::{RowKind, classify};
use crate::core::error::{ConvertError, HierarchyViolation};
use crate::core::locate::{Position, extract_table, locate_header};
use crate::core::template::MATERIAL_HEADER;

/// One worksheet as delivered by a workbook cell source
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub name: String,
    pub hidden: bool,
    /// Row-major grid; merged cells hold their value in the anchor cell only
    pub grid: Vec<Row>,
}

/// Workbook cell-source collaborator
pub trait CellSource {
    /// Every worksheet of the workbook, in workbook order
    fn sheets(&mut self) -> Result<Vec<RawSheet>, ConvertError>;
}

/// Reader options shared by every book of one conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Read hidden worksheets too
    pub include_hidden: bool,
    /// Exclude sheets whose level sequence is not well formed
    pub strict_hierarchy: bool,
}

/// A recognized worksheet and its post-header table
#[derive(Debug, Clone)]
pub struct SheetNode {
    name: String,
    header_position: Position,
    table: Vec<Row>,
}

impl SheetNode {
    /// Locate the material header in `raw`; `None` when the sheet has no table.
    pub fn from_raw(raw: RawSheet) -> Option<Self> {
        let header_position = locate_header(&raw.grid, &MATERIAL_HEADER).ok()?;
        let table = extract_table(&raw.grid, header_position);

        if table.is_empty() {
            return None;
        }

        Some(Self { name: raw.name.trim().to_string(), header_position, table })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header_position(&self) -> Position {
        self.header_position
    }

    pub fn table_origin(&self) -> Position {
        self.header_position + Position::new(1, 0)
    }

    pub fn table(&self) -> &[Row] {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// One workbook and its recognized sheets
#[derive(Debug, Clone)]
pub struct BookNode {
    path: PathBuf,
    sheets: Vec<SheetNode>,
}

impl BookNode {
    /// Read every sheet of `source`, keeping those with a locatable table.
    #[instrument(skip(source), fields(book = %path.display()))]
    pub fn load(
        path: &Path,
        source: &mut dyn CellSource,
        options: ReadOptions,
    ) -> Result<Self, ConvertError> {
        let mut sheets = Vec::new();

        for raw in source.sheets()? {
            if raw.hidden && !options.include_hidden {
                debug!(sheet = %raw.name, "skipping hidden sheet");
                continue;
            }

            let sheet_name = raw.name.clone();
            let Some(sheet) = SheetNode::from_raw(raw) else {
                debug!(sheet = %sheet_name, "no material header, sheet excluded");
                continue;
            };

            if options.strict_hierarchy {
                if let Err(violation) = check_hierarchy(sheet.table()) {
                    warn!(sheet = %sheet.name(), %violation, "malformed hierarchy, sheet excluded");
                    continue;
                }
            }

            debug!(
                sheet = %sheet.name(),
                header = %sheet.header_position(),
                rows = sheet.len(),
                "sheet accepted"
            );
            sheets.push(sheet);
        }

        if sheets.is_empty() {
            return Err(ConvertError::NoValidSheets { path: path.to_path_buf() });
        }

        Ok(Self { path: path.to_path_buf(), sheets })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without extension
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn sheets(&self) -> &[SheetNode] {
        &self.sheets
    }

    pub fn valid_sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(SheetNode::name).collect()
    }

    /// Sheet tables concatenated in sheet order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.sheets.iter().flat_map(|s| s.table().iter())
    }
}

/// All books of one conversion, in argument order
#[derive(Debug, Clone, Default)]
pub struct BookContainer {
    books: Vec<BookNode>,
}

impl BookContainer {
    pub fn new(books: Vec<BookNode>) -> Self {
        Self { books }
    }

    pub fn push(&mut self, book: BookNode) {
        self.books.push(book);
    }

    pub fn books(&self) -> &[BookNode] {
        &self.books
    }

    pub fn sheets(&self) -> impl Iterator<Item = &SheetNode> {
        self.books.iter().flat_map(|b| b.sheets().iter())
    }

    /// Rows in file-then-sheet order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.books.iter().flat_map(BookNode::rows)
    }

    pub fn filepaths(&self) -> Vec<&Path> {
        self.books.iter().map(BookNode::path).collect()
    }
}

/// Well-formedness of a sheet's level sequence: it starts at level 1, never
/// climbs two or more levels at once, and only DETAIL/PAINT rows may repeat
/// the level of the row before them.
pub fn check_hierarchy(rows: &[Row]) -> Result<(), HierarchyViolation> {
    let mut prev: Option<RowKind> = None;

    for (row_n, row) in rows.iter().enumerate() {
        let Some(kind) = classify(row) else {
            continue;
        };
        let level = kind.depth();

        match prev {
            None if level != 1 => {
                return Err(HierarchyViolation::FirstNotTopLevel { found: level });
            }
            Some(p) if level >= p.depth() + 2 => {
                return Err(HierarchyViolation::LevelJump {
                    from: p.depth(),
                    to: level,
                    row: row_n,
                });
            }
            Some(p) if level == p.depth() && !matches!(kind, RowKind::Detail | RowKind::Paint) => {
                return Err(HierarchyViolation::RepeatedLevel { level, row: row_n });
            }
            _ => {}
        }

        prev = Some(kind);
    }

    Ok(())
}
