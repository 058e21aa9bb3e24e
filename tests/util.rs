//! Shared test utilities for integration tests
//!
//! Authors real .xlsx workbooks with rust_xlsxwriter so the reader is
//! exercised end to end through calamine.

#![allow(dead_code)]

use std::path::Path;

use matecon::core::cell::{CellValue, Row};
use matecon::core::template::MATERIAL_HEADER;
use matecon::row;
use rust_xlsxwriter::{Workbook, Worksheet};

const NONE: Option<&str> = None;

/// Row of the material header; the table starts on the row below
pub const HEADER_ROW: u32 = 2;

/// One worksheet to author
pub struct SheetSpec
{
    pub name: &'static str,
    pub hidden: bool,
    /// `None` writes a cover page without a material header
    pub rows: Option<Vec<Row>>,
}

impl SheetSpec
{
    pub fn table(
        name: &'static str,
        rows: Vec<Row>,
    ) -> Self
    {
        Self { name, hidden: false, rows: Some(rows) }
    }

    pub fn hidden(
        name: &'static str,
        rows: Vec<Row>,
    ) -> Self
    {
        Self { name, hidden: true, rows: Some(rows) }
    }

    pub fn cover(name: &'static str) -> Self
    {
        Self { name, hidden: false, rows: None }
    }
}

/// Write a workbook: a title in A1, the header on `HEADER_ROW` starting at
/// column B (column A holds a serial number), data rows below it.
pub fn write_book(
    path: &Path,
    sheets: &[SheetSpec],
)
{
    let mut workbook = Workbook::new();

    for spec in sheets
    {
        let ws = workbook.add_worksheet();
        ws.set_name(spec.name)
            .expect("sheet name");
        ws.write_string(0, 0, "材料集計表")
            .expect("title");

        if spec.hidden
        {
            ws.set_hidden(true);
        }

        let Some(rows) = &spec.rows
        else
        {
            continue;
        };

        ws.write_string(HEADER_ROW, 0, "番号")
            .expect("serial header");
        for (i, name) in MATERIAL_HEADER
            .iter()
            .enumerate()
        {
            ws.write_string(HEADER_ROW, (i + 1) as u16, *name)
                .expect("header cell");
        }

        for (n, row) in rows
            .iter()
            .enumerate()
        {
            let r = HEADER_ROW + 1 + n as u32;
            ws.write_number(r, 0, (n + 1) as f64)
                .expect("serial");
            write_row(ws, r, row);
        }
    }

    workbook
        .save(path)
        .expect("save workbook");
}

fn write_row(
    ws: &mut Worksheet,
    r: u32,
    row: &[CellValue],
)
{
    for (i, cell) in row
        .iter()
        .enumerate()
    {
        let c = (i + 1) as u16;
        match cell
        {
            CellValue::Absent => {}
            CellValue::Text(s) =>
            {
                ws.write_string(r, c, s.as_str())
                    .expect("string cell");
            }
            CellValue::Int(n) =>
            {
                ws.write_number(r, c, *n as f64)
                    .expect("int cell");
            }
            CellValue::Float(x) =>
            {
                ws.write_number(r, c, *x)
                    .expect("float cell");
            }
        }
    }
}

/// Main sample: upper structure with two blocks
pub fn sample_rows_a() -> Vec<Row>
{
    vec![
        row!["#1", "サンプル橋", NONE, NONE, NONE, NONE, 1],
        row!["#2", "上部構造"],
        row!["#3", "主桁"],
        row!["#4", "G1"],
        row!["#5", "腹板"],
        row![NONE, "中間横桁", "本体", NONE, NONE, NONE, 6, 1],
        row!["PL", 220, 16, NONE, NONE, 2200, 2, NONE, NONE, "SM490YA", "FLG"],
        row!["HTB", 22, NONE, NONE, NONE, 75, 24, NONE, NONE, "F10T"],
        row!["*="],
        row![],
        row![NONE, "中間横桁", "仕口", NONE, NONE, NONE, 6, 1, 2],
        row!["PL", 180, 12, NONE, NONE, 600, 4, NONE, NONE, "SS400"],
    ]
}

/// Second book: repeats the bridge level, then the substructure
pub fn sample_rows_b() -> Vec<Row>
{
    vec![
        row!["#1", "サンプル橋"],
        row!["#2", "下部構造"],
        row!["#3", "橋脚"],
        row!["#4", "P1"],
        row!["#5", "梁"],
        row![NONE, "梁", "本体", NONE, NONE, NONE, 1],
        row!["PL", 300, 25, NONE, NONE, 4000, 1, NONE, NONE, "SM400A"],
    ]
}

/// Hidden sheet content, only read with include-hidden
pub fn hidden_rows() -> Vec<Row>
{
    vec![row!["#1", "サンプル橋"], row!["#2", "予備構造"]]
}

/// Write the two sample books into `dir`, returning (a.xlsx, b.xlsx).
pub fn write_samples(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf)
{
    let a = dir.join("a.xlsx");
    let b = dir.join("b.xlsx");

    write_book(
        &a,
        &[
            SheetSpec::cover("表紙"),
            SheetSpec::table("材料", sample_rows_a()),
            SheetSpec::hidden("予備", hidden_rows()),
        ],
    );
    write_book(&b, &[SheetSpec::table("下部", sample_rows_b())]);

    (a, b)
}

/// Golden output of a.xlsx followed by b.xlsx, one entry per line
pub fn golden_lines() -> Vec<String>
{
    include_str!("fixtures/material_sample.txt")
        .lines()
        .map(str::to_string)
        .collect()
}
