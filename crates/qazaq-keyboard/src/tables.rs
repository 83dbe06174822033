//! Built-in tables for the Kazakh Arabic script.
//!
//! To port the keyboard to another alphabet, replace these rows (or load a
//! table with [`KeyTable::from_json`]).

use crate::keys::{KeyDescriptor, KeyTable};

fn key(glyph: &str) -> KeyDescriptor {
    KeyDescriptor::new(glyph)
}

fn key_with(glyph: &str, alternates: &[&str]) -> KeyDescriptor {
    KeyDescriptor::new(glyph).alternates(alternates.iter().copied())
}

/// A letter whose long press offers the letter itself in a one-option
/// popup.
fn letter(glyph: &str) -> KeyDescriptor {
    key_with(glyph, &[glyph])
}

fn letter_row(glyphs: &[&str]) -> Vec<KeyDescriptor> {
    glyphs.iter().copied().map(letter).collect()
}

/// Letters, in three rows of 11, 10 and 9 keys.
pub fn kazakh_letters() -> KeyTable {
    KeyTable::new(vec![
        letter_row(&["چ", "ۋ", "ء", "ر", "ت", "ي", "ۇ", "ڭ", "و", "پ", "ف"]),
        letter_row(&["ھ", "س", "د", "ا", "ه", "ى", "ق", "ك", "ل", "گ"]),
        letter_row(&["ز", "ش", "ع", "ۆ", "ب", "ن", "م", "ح", "ج"]),
    ])
}

/// Digits and punctuation shown in symbols mode.
pub fn kazakh_symbols() -> KeyTable {
    KeyTable::new(vec![
        ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"]
            .into_iter()
            .map(key)
            .collect(),
        ["-", "/", ":", "؛", "(", ")", "«", "»", "@", "\""]
            .into_iter()
            .map(key)
            .collect(),
        vec![
            key_with(".", &["…"]),
            key("،"),
            key_with("؟", &["?"]),
            key("!"),
            key("'"),
        ],
    ])
}
