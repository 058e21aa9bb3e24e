//! Property checks for row classification and line formatting.

use matecon::core::cell::{CellValue, Row};
use matecon::core::classify::{RowKind, classify};
use matecon::core::format::format_line;
use proptest::prelude::*;

fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Absent),
        "[A-Z#*=]{0,4}".prop_map(CellValue::Text),
        "[ぁ-ん]{1,6}".prop_map(CellValue::Text),
        (-5i64..5000).prop_map(CellValue::Int),
    ]
}

fn row() -> impl Strategy<Value = Row> {
    prop::collection::vec(cell(), 0..45)
}

proptest! {
    #[test]
    fn level_marker_always_wins(n in 1u8..=5, rest in row()) {
        let mut r = vec![CellValue::text(format!("#{n}"))];
        r.extend(rest);
        prop_assert_eq!(classify(&r), Some(RowKind::Level(n)));
    }

    #[test]
    fn blank_first_with_text_second_is_a_block(name in "[ぁ-ん]{1,6}", rest in row()) {
        let mut r = vec![CellValue::Absent, CellValue::Text(name)];
        r.extend(rest);
        prop_assert_eq!(classify(&r), Some(RowKind::Block));
    }

    #[test]
    fn only_level_markers_yield_levels(r in row()) {
        let marker = matches!(
            r.first(),
            Some(CellValue::Text(s)) if ["#1", "#2", "#3", "#4", "#5"].contains(&s.as_str())
        );
        prop_assume!(!marker);
        prop_assert!(!matches!(classify(&r), Some(RowKind::Level(_))));
    }

    #[test]
    fn near_miss_markers_are_not_levels(
        first in prop_oneof![
            Just("#0"), Just("#6"), Just("#"), Just("# 1"), Just("#12"), Just("1")
        ],
        rest in row(),
    ) {
        let mut r = vec![CellValue::text(first)];
        r.extend(rest);
        prop_assert!(!matches!(classify(&r), Some(RowKind::Level(_))));
    }

    #[test]
    fn lines_never_end_with_spaces(r in row()) {
        if let Some(kind) = classify(&r) {
            if let Ok(line) = format_line(kind, &r) {
                prop_assert!(!line.ends_with(' '));
                prop_assert_eq!(format_line(kind, &r).ok(), Some(line));
            }
        }
    }

    #[test]
    fn short_rows_are_unclassified(a in cell(), b in cell()) {
        let first_is_marker = matches!(&a, CellValue::Text(s) if s.starts_with('#') || s == "*=");
        let block = a.is_absent() && matches!(b, CellValue::Text(_));
        prop_assume!(!first_is_marker && !block);
        prop_assert_eq!(classify(&[a, b]), None);
    }
}
