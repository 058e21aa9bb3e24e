//! Filepath: src/infra/utils.rs
//! Text helpers for the fixed-width format, organized by small,
//! focused structs. All functions are associated fns to keep call
//! sites ergonomic, testable, and discoverable.

use unicode_width::UnicodeWidthChar;

/// Field alignment inside a fixed-width span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align
{
    Left,
    Right,
}

/// Display-width helpers (East-Asian wide/ambiguous count as 2)
pub struct DisplayWidth;

impl DisplayWidth
{
    /// Width of a single character in text-column units
    pub fn of_char(ch: char) -> usize
    {
        // width_cjk treats ambiguous characters (§, ±, ※) as wide;
        // control and combining characters still take one column
        UnicodeWidthChar::width_cjk(ch)
            .unwrap_or(1)
            .max(1)
    }

    /// Width of a string in text-column units
    pub fn of(text: &str) -> usize
    {
        text.chars()
            .map(Self::of_char)
            .sum()
    }

    /// Pad `text` to `width` columns using `align`.
    /// Content already at or beyond `width` is returned as is.
    pub fn pad(
        text: &str,
        width: usize,
        align: Align,
    ) -> String
    {
        let used = Self::of(text);

        if used >= width
        {
            return text.to_string();
        }

        // Fill the remainder with half-width spaces
        let fill = " ".repeat(width - used);

        match align
        {
            Align::Left => format!("{text}{fill}"),
            Align::Right => format!("{fill}{text}"),
        }
    }
}

/// Full-width to half-width folding
pub struct HalfWidth;

impl HalfWidth
{
    /// Fold full-width ASCII variants and the ideographic space to
    /// their ASCII forms. Kana and kanji are left untouched.
    pub fn fold(text: &str) -> String
    {
        text.chars()
            .map(Self::fold_char)
            .collect()
    }

    fn fold_char(ch: char) -> char
    {
        match ch
        {
            '\u{3000}' => ' ',
            '\u{FF01}'..='\u{FF5E}' =>
            {
                // The full-width block mirrors ASCII 0x21..=0x7E
                char::from_u32(ch as u32 - 0xFEE0).unwrap_or(ch)
            }
            _ => ch,
        }
    }
}
