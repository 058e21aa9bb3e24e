//! Per-level column templates of the JIP-MATERIAL fixed-width format.
//!
//! Each template entry owns a character span `[start, end)`; fields are
//! rendered left to right and concatenated, so a span's width is what
//! matters, not its absolute start. Empty placeholders keep the column
//! count aligned with the worksheet layout.

use crate::core::classify::RowKind;
use crate::infra::utils::Align;

/// Semantic type of a template column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    String,
    /// Placeholder: consumes its span, never emits a source value
    Empty,
}

/// One column of a level's template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTemplate {
    pub name: &'static str,
    pub kind: FieldKind,
    pub span: (usize, usize),
}

impl ColumnTemplate {
    const fn string(name: &'static str, start: usize, end: usize) -> Self {
        Self { name, kind: FieldKind::String, span: (start, end) }
    }

    const fn number(name: &'static str, start: usize, end: usize) -> Self {
        Self { name, kind: FieldKind::Number, span: (start, end) }
    }

    const fn empty_at(start: usize, end: usize) -> Self {
        Self { name: "EMPTY", kind: FieldKind::Empty, span: (start, end) }
    }

    const fn empty() -> Self {
        Self::empty_at(0, 0)
    }

    /// Field width in display columns
    pub const fn width(&self) -> usize {
        self.span.1.saturating_sub(self.span.0)
    }

    pub fn is_empty(&self) -> bool {
        self.kind == FieldKind::Empty
    }

    /// Numbers are right-aligned, text and placeholders left-aligned
    pub fn align(&self) -> Align {
        match self.kind {
            FieldKind::Number => Align::Right,
            FieldKind::String | FieldKind::Empty => Align::Left,
        }
    }
}

use ColumnTemplate as T;

#[rustfmt::skip]
pub const LEVEL_TEMPLATE: [ColumnTemplate; 15] = [
    T::string("TIER",     0,   5),
    T::string("NAME",     5,  30),
    T::empty(),
    T::empty(),
    T::empty(),
    T::empty(),
    T::number("N",       30,  35),
    T::empty(),
    T::empty(),
    T::empty(),
    T::empty(),
    T::empty(),
    T::empty(),
    T::empty(),
    T::string("JV",      35,  37),
];

#[rustfmt::skip]
pub const BLOCK_TEMPLATE: [ColumnTemplate; 15] = [
    T::empty_at(          0,   5),
    T::string("NAME1",    5,  13),
    T::string("NAME2",   13,  21),
    T::string("NAME3",   21,  29),
    T::empty(),
    T::empty(),
    T::number("NN1",     29,  35),
    T::empty(),
    T::empty(),
    T::empty(),
    T::empty(),
    T::empty_at(         35,  38),
    T::string("PB",      38,  39),
    T::string("JV",      37,  39),
    T::string("ALIAS",   40,  43),
];

#[rustfmt::skip]
pub const DETAIL_TEMPLATE: [ColumnTemplate; 40] = [
    T::string("MARK",     0,   4),
    T::number("S1",       4,   9),
    T::number("S2",       9,  13),
    T::number("S3",      13,  17),
    T::number("S4",      17,  21),
    T::number("L",       21,  27),
    T::number("EACH",    27,  31),
    T::number("UNITW",   31,  37),
    T::number("NET",     37,  40),
    T::string("QUALITY", 40,  57),
    T::string("REMARK",  57,  65),
    T::string("COMMENT", 65,  73),
    T::string("PR1",     73,  74),
    T::string("PR2",     74,  75),
    T::string("JV",      75,  77),
    T::string("ALIAS",   77,  79),
    T::string("P",       79,  80),
    T::string("T",       80,  81),
    T::string("C1",      81,  82),
    T::number("A1",      82,  87),
    T::string("C2",      87,  88),
    T::number("A2",      88,  93),
    T::string("WT",      93,  94),
    T::string("WB",      94,  95),
    T::string("WL",      95,  96),
    T::string("WR",      96,  97),
    T::number("YW",      97, 101),
    T::number("YL",     101, 105),
    T::number("HT",     105, 108),
    T::string("FACE1",  108, 109),
    T::string("FACE2",  109, 110),
    T::string("BOLT",   110, 111),
    T::string("PW",     111, 112),
    T::string("BEND",   112, 113),
    T::string("LC",     113, 114),
    T::string("BODY",   114, 115),
    T::number("WRT",    115, 120),
    T::number("WRB",    120, 125),
    T::number("WRL",    125, 130),
    T::number("WRR",    130, 135),
];

/// Paint rows share the leading DETAIL columns up to the second colour
pub const PAINT_COLUMNS: usize = 22;

/// Column names that identify a material table header row
pub const MATERIAL_HEADER: [&str; 40] = {
    let mut names = [""; 40];
    let mut i = 0;
    while i < 40 {
        names[i] = DETAIL_TEMPLATE[i].name;
        i += 1;
    }
    names
};

/// Template list for a row kind
pub fn templates_for(kind: RowKind) -> &'static [ColumnTemplate] {
    match kind {
        RowKind::Level(_) => &LEVEL_TEMPLATE,
        RowKind::Block => &BLOCK_TEMPLATE,
        RowKind::Detail => &DETAIL_TEMPLATE,
        RowKind::Paint => &DETAIL_TEMPLATE[..PAINT_COLUMNS],
    }
}
