//! calamine-backed workbook reader.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader, Sheets, SheetVisible, open_workbook_auto};
use tracing::{debug, instrument};

use crate::core::book::{BookContainer, BookNode, CellSource, RawSheet, ReadOptions};
use crate::core::cell::{CellValue, Row};
use crate::core::error::ConvertError;

/// An open workbook; the handle is released when the source is dropped.
pub struct XlsxSource {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

impl XlsxSource {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        let workbook = open_workbook_auto(path).map_err(|err| ConvertError::Workbook {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

        Ok(Self { path: path.to_path_buf(), workbook })
    }
}

impl CellSource for XlsxSource {
    fn sheets(&mut self) -> Result<Vec<RawSheet>, ConvertError> {
        let metadata: Vec<(String, bool)> = self
            .workbook
            .sheets_metadata()
            .iter()
            .map(|sheet| (sheet.name.clone(), !matches!(sheet.visible, SheetVisible::Visible)))
            .collect();

        let mut sheets = Vec::with_capacity(metadata.len());

        for (name, hidden) in metadata {
            let range = self.workbook.worksheet_range(&name).map_err(|err| ConvertError::Workbook {
                path: self.path.clone(),
                message: format!("sheet `{name}`: {err}"),
            })?;

            let grid = range_to_grid(&range);
            debug!(sheet = %name, hidden, rows = grid.len(), "sheet read");
            sheets.push(RawSheet { name, hidden, grid });
        }

        Ok(sheets)
    }
}

/// Read every workbook in order. Each file is opened, read and closed before
/// the next one; `on_book` runs after each book is loaded.
#[instrument(skip_all, fields(books = files.len()))]
pub fn read_books<P, F>(
    files: &[P],
    options: ReadOptions,
    mut on_book: F,
) -> Result<BookContainer, ConvertError>
where
    P: AsRef<Path>,
    F: FnMut(&BookNode),
{
    let mut container = BookContainer::default();

    for file in files {
        let path: &Path = file.as_ref();
        let book = {
            let mut source = XlsxSource::open(path)?;
            BookNode::load(path, &mut source, options)?
        };
        on_book(&book);
        container.push(book);
    }

    Ok(container)
}

/// Rows in worksheet coordinates: the used range is shifted down and right
/// by its start so that row/column indices match the sheet's own.
fn range_to_grid(range: &Range<Data>) -> Vec<Row> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let lead_cols = start_col as usize;

    let mut grid: Vec<Row> = vec![Row::new(); start_row as usize];

    for cells in range.rows() {
        let mut row = vec![CellValue::Absent; lead_cols];
        row.extend(cells.iter().map(convert_value));
        grid.push(row);
    }

    grid
}

fn convert_value(value: &Data) -> CellValue {
    match value {
        Data::Empty | Data::Error(_) => CellValue::Absent,
        Data::Int(v) => CellValue::Int(*v),
        Data::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            CellValue::Int(*v as i64)
        }
        Data::Float(v) => CellValue::Float(*v),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(true) => CellValue::text("True"),
        Data::Bool(false) => CellValue::text("False"),
        other => CellValue::Text(other.to_string()),
    }
}
