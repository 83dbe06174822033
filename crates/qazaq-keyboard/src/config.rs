use qazaq_core::{Palette, TextDirection};
use qazaq_ui::GestureConfig;

use crate::keys::{KeyTable, KeyTableError};
use crate::tables::{kazakh_letters, kazakh_symbols};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyboardMode {
    #[default]
    Letters,
    Symbols,
}

impl KeyboardMode {
    pub fn toggled(self) -> Self {
        match self {
            KeyboardMode::Letters => KeyboardMode::Symbols,
            KeyboardMode::Symbols => KeyboardMode::Letters,
        }
    }
}

/// Sizes in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyboardMetrics {
    pub width: f32,
    pub height: f32,
    /// Inset of the key grid from the keyboard edges.
    pub padding: f32,
    /// Gap between rows and between keys.
    pub spacing: f32,
    pub key_radius: f32,
    /// Fixed widths in the bottom row; space takes what is left.
    pub mode_key_width: f32,
    pub globe_key_width: f32,
    pub submit_key_width: f32,
    /// Each popup option gets this much width; the popup grows with the
    /// number of alternates.
    pub popup_option_width: f32,
    pub popup_height: f32,
    /// Gap between the popup's bottom edge and the key it belongs to.
    pub popup_offset: f32,
    pub popup_padding: f32,
    pub popup_spacing: f32,
}

impl Default for KeyboardMetrics {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 280.0,
            padding: 6.0,
            spacing: 6.0,
            key_radius: 5.0,
            mode_key_width: 50.0,
            globe_key_width: 50.0,
            submit_key_width: 60.0,
            popup_option_width: 50.0,
            popup_height: 50.0,
            popup_offset: 8.0,
            popup_padding: 8.0,
            popup_spacing: 6.0,
        }
    }
}

/// Captions of the descriptor-less keys.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLabels {
    /// Shown on the mode key while letters are up.
    pub to_symbols: String,
    /// Shown on the mode key while symbols are up.
    pub to_letters: String,
    /// The function row's mode key keeps this caption in both modes.
    pub function_row_mode: String,
    pub delete: String,
    pub globe: String,
    pub space: String,
    pub submit: String,
}

impl Default for FunctionLabels {
    fn default() -> Self {
        Self {
            to_symbols: "123".into(),
            to_letters: "ءاب".into(),
            function_row_mode: "表情包".into(),
            delete: "⌫".into(),
            globe: "🌐".into(),
            space: "بوس ورىن".into(),
            submit: "دايىن".into(),
        }
    }
}

/// Everything the controller reads; never mutated after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardConfig {
    pub letters: KeyTable,
    pub symbols: KeyTable,
    pub metrics: KeyboardMetrics,
    pub labels: FunctionLabels,
    pub palette: Palette,
    pub gestures: GestureConfig,
    /// Row direction. Tables list keys in left-to-right screen order.
    pub direction: TextDirection,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            letters: kazakh_letters(),
            symbols: kazakh_symbols(),
            metrics: KeyboardMetrics::default(),
            labels: FunctionLabels::default(),
            palette: Palette::default(),
            gestures: GestureConfig::default(),
            direction: TextDirection::Ltr,
        }
    }
}

impl KeyboardConfig {
    pub fn table(&self, mode: KeyboardMode) -> &KeyTable {
        match mode {
            KeyboardMode::Letters => &self.letters,
            KeyboardMode::Symbols => &self.symbols,
        }
    }

    pub fn mode_label(&self, mode: KeyboardMode) -> &str {
        match mode {
            KeyboardMode::Letters => &self.labels.to_symbols,
            KeyboardMode::Symbols => &self.labels.to_letters,
        }
    }

    pub fn validate(&self) -> Result<(), KeyTableError> {
        self.letters.validate()?;
        self.symbols.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_involution() {
        assert_eq!(KeyboardMode::Letters.toggled(), KeyboardMode::Symbols);
        assert_eq!(KeyboardMode::Letters.toggled().toggled(), KeyboardMode::Letters);
    }

    #[test]
    fn tables_follow_mode() {
        let cfg = KeyboardConfig::default();
        assert!(cfg.table(KeyboardMode::Letters).find_key("ق").is_some());
        assert!(cfg.table(KeyboardMode::Symbols).find_key("ق").is_none());
        assert!(cfg.table(KeyboardMode::Symbols).find_key("؟").is_some());
        assert_eq!(cfg.mode_label(KeyboardMode::Letters), "123");
        assert!(cfg.validate().is_ok());
    }
}
