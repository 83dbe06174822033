use std::ops::Range;

use qazaq_core::TextSink;
use unicode_segmentation::UnicodeSegmentation;

/// find prev grapheme boundary before a byte index
fn prev_grapheme_boundary(text: &str, byte: usize) -> usize {
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i >= byte {
            break;
        }
        last = i;
    }
    last
}

fn clamp_to_char_boundary(text: &str, mut byte: usize) -> usize {
    byte = byte.min(text.len());
    while !text.is_char_boundary(byte) {
        byte -= 1;
    }
    byte
}

/// An in-process text field: the host shell's input, and a [`TextSink`]
/// the keyboard can type into directly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextFieldState {
    pub text: String,
    /// Byte range; empty means a caret.
    pub selection: Range<usize>,
    /// How many times the keyboard asked to switch input methods.
    pub input_mode_switches: usize,
}

impl TextFieldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            selection: end..end,
            input_mode_switches: 0,
        }
    }

    pub fn caret(&self) -> usize {
        self.selection.end
    }

    pub fn select(&mut self, range: Range<usize>) {
        let start = clamp_to_char_boundary(&self.text, range.start);
        let end = clamp_to_char_boundary(&self.text, range.end);
        self.selection = start.min(end)..start.max(end);
    }

    pub fn insert_text(&mut self, text: &str) {
        let start = clamp_to_char_boundary(&self.text, self.selection.start);
        let end = clamp_to_char_boundary(&self.text, self.selection.end);

        self.text.replace_range(start..end, text);
        let new_pos = start + text.len();
        self.selection = new_pos..new_pos;
    }

    /// Removes the selection, or the grapheme before the caret.
    pub fn delete_backward(&mut self) {
        if self.selection.start == self.selection.end {
            let pos = clamp_to_char_boundary(&self.text, self.selection.start);
            if pos > 0 {
                let prev = prev_grapheme_boundary(&self.text, pos);
                self.text.replace_range(prev..pos, "");
                self.selection = prev..prev;
            }
        } else {
            self.insert_text("");
        }
    }
}

impl TextSink for TextFieldState {
    fn insert_text(&mut self, text: &str) {
        TextFieldState::insert_text(self, text);
    }

    fn delete_backward(&mut self) {
        TextFieldState::delete_backward(self);
    }

    fn advance_to_next_input_mode(&mut self) {
        self.input_mode_switches += 1;
        log::debug!("input mode switch requested ({})", self.input_mode_switches);
    }
}
