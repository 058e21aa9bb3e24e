//! Fixed-width line formatting.
//!
//! A row is zipped with its level's template list; each value is padded to
//! its span width and the spans are concatenated. Overlong values overflow
//! their span instead of being clipped. BLOCK rows report a single
//! aggregated quantity computed from their three quantity slots.

use std::ops::Range;

use crate::core::cell::{CellValue, Row};
use crate::core::classify::RowKind;
use crate::core::error::ConvertError;
use crate::core::template::templates_for;
use crate::infra::utils::DisplayWidth;

/// Quantity slots of a BLOCK row (quantity 1 × quantity 2 × quantity 3)
pub const BLOCK_QUANTITY_SLOTS: Range<usize> = 6..9;

/// Format one classified row as a fixed-width line (trailing spaces trimmed).
pub fn format_line(kind: RowKind, row: &[CellValue]) -> Result<String, ConvertError> {
    match kind {
        RowKind::Block => Ok(render(kind, &collapse_block_row(row)?)),
        _ => Ok(render(kind, row)),
    }
}

/// Product of the present quantity slots of a BLOCK row.
pub fn block_quantity(row: &[CellValue]) -> Result<CellValue, ConvertError> {
    let end = BLOCK_QUANTITY_SLOTS.end.min(row.len());
    let start = BLOCK_QUANTITY_SLOTS.start.min(end);

    let mut present = row[start..end].iter().filter(|c| c.is_present());

    let Some(first) = present.next() else {
        return Err(ConvertError::UndefinedBlockQuantity { name: block_name(row) });
    };

    // Validate a lone quantity as numeric too
    let mut total = first
        .as_number()
        .ok_or_else(|| ConvertError::NonNumericQuantity(first.to_text()))?;

    for cell in present {
        total = total.checked_product(cell)?;
    }

    Ok(total)
}

/// Copy of a BLOCK row with the aggregated quantity in the first slot and the
/// other two slots cleared. The source row is never modified.
pub fn collapse_block_row(row: &[CellValue]) -> Result<Row, ConvertError> {
    let total = block_quantity(row)?;

    let mut out = row.to_vec();
    if out.len() < BLOCK_QUANTITY_SLOTS.end {
        out.resize(BLOCK_QUANTITY_SLOTS.end, CellValue::Absent);
    }

    let mut slots = BLOCK_QUANTITY_SLOTS;
    if let Some(first) = slots.next() {
        out[first] = total;
    }
    for i in slots {
        out[i] = CellValue::Absent;
    }

    Ok(out)
}

/// Present name fragments of a BLOCK row (columns 1..=3)
pub fn block_name_fragments(row: &[CellValue]) -> Vec<String> {
    row.iter()
        .skip(1)
        .take(3)
        .filter(|c| c.is_present())
        .map(CellValue::to_text)
        .collect()
}

fn block_name(row: &[CellValue]) -> String {
    block_name_fragments(row).join(" ")
}

fn render(kind: RowKind, row: &[CellValue]) -> String {
    let mut line = String::new();

    for (cell, template) in row.iter().zip(templates_for(kind)) {
        let text = if template.is_empty() { String::new() } else { cell.to_text() };
        line.push_str(&DisplayWidth::pad(&text, template.width(), template.align()));
    }

    line.trim_end().to_string()
}
