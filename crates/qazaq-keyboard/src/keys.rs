//! Key descriptors and the tables they live in.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One letter key: what it types, what a long press offers, and how wide
/// it is relative to its neighbours.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    pub glyph: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<String>,
    /// Flex weight; `None` shares the row equally with the other keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
}

impl KeyDescriptor {
    pub fn new(glyph: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
            alternates: Vec::new(),
            width: None,
        }
    }

    pub fn alternates<I, S>(mut self, alternates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternates = alternates.into_iter().map(Into::into).collect();
        self
    }

    pub fn width(mut self, weight: f32) -> Self {
        self.width = Some(weight);
        self
    }

    pub fn has_alternates(&self) -> bool {
        !self.alternates.is_empty()
    }

    /// Caption shown above the glyph: the alternates that differ from the
    /// glyph itself, space separated.
    pub fn hint(&self) -> Option<String> {
        let others: Vec<&str> = self
            .alternates
            .iter()
            .map(String::as_str)
            .filter(|a| *a != self.glyph)
            .collect();
        (!others.is_empty()).then(|| others.join(" "))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeyTableError {
    #[error("key table has no rows")]
    EmptyTable,
    #[error("row {row} has no keys")]
    EmptyRow { row: usize },
    #[error("row {row}, key {index} has an empty glyph")]
    EmptyGlyph { row: usize, index: usize },
    #[error("glyph {glyph:?} appears more than once (row {row}, key {index})")]
    DuplicateGlyph {
        glyph: String,
        row: usize,
        index: usize,
    },
    #[error("key {glyph:?} has an invalid width {width}")]
    BadWidth { glyph: String, width: f32 },
    #[error("invalid key table JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered rows of letter keys for one keyboard mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyTable {
    rows: Vec<Vec<KeyDescriptor>>,
}

impl KeyTable {
    /// Builds a table without checking it; see [`KeyTable::validate`].
    pub fn new(rows: Vec<Vec<KeyDescriptor>>) -> Self {
        Self { rows }
    }

    /// Parses `[[{"glyph": "ا", "alternates": ["ٵ"]}, ...], ...]` and
    /// validates the result.
    pub fn from_json(json: &str) -> Result<Self, KeyTableError> {
        let table: KeyTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn to_json(&self) -> Result<String, KeyTableError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn rows(&self) -> &[Vec<KeyDescriptor>] {
        &self.rows
    }

    pub fn keys(&self) -> impl Iterator<Item = &KeyDescriptor> {
        self.rows.iter().flatten()
    }

    /// Linear scan in row order; the first match wins.
    pub fn find_key(&self, glyph: &str) -> Option<&KeyDescriptor> {
        self.keys().find(|k| k.glyph == glyph)
    }

    /// Lookup by glyph is only unambiguous if glyphs are unique, so that is
    /// checked here along with the shape of the table.
    pub fn validate(&self) -> Result<(), KeyTableError> {
        if self.rows.is_empty() {
            return Err(KeyTableError::EmptyTable);
        }
        let mut seen = HashSet::new();
        for (row, keys) in self.rows.iter().enumerate() {
            if keys.is_empty() {
                return Err(KeyTableError::EmptyRow { row });
            }
            for (index, key) in keys.iter().enumerate() {
                if key.glyph.is_empty() {
                    return Err(KeyTableError::EmptyGlyph { row, index });
                }
                if !seen.insert(key.glyph.as_str()) {
                    return Err(KeyTableError::DuplicateGlyph {
                        glyph: key.glyph.clone(),
                        row,
                        index,
                    });
                }
                if let Some(width) = key.width
                    && !(width.is_finite() && width > 0.0)
                {
                    return Err(KeyTableError::BadWidth {
                        glyph: key.glyph.clone(),
                        width,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> KeyTable {
        KeyTable::new(vec![
            vec![
                KeyDescriptor::new("ا").alternates(["ٵ"]),
                KeyDescriptor::new("ب"),
            ],
            vec![KeyDescriptor::new("ت").width(1.5)],
        ])
    }

    #[test]
    fn find_key_scans_rows_in_order() {
        let t = table();
        assert_eq!(t.find_key("ب"), Some(&KeyDescriptor::new("ب")));
        assert_eq!(t.find_key("ت").and_then(|k| k.width), Some(1.5));
        assert_eq!(t.find_key("ق"), None);
        assert_eq!(t.find_key(""), None);
    }

    #[test]
    fn first_duplicate_wins_but_validation_rejects_it() {
        let t = KeyTable::new(vec![
            vec![KeyDescriptor::new("ا").alternates(["1"])],
            vec![KeyDescriptor::new("ا").alternates(["2"])],
        ]);
        assert_eq!(t.find_key("ا").map(|k| k.alternates.clone()), Some(vec!["1".to_string()]));
        assert!(matches!(
            t.validate(),
            Err(KeyTableError::DuplicateGlyph { row: 1, index: 0, .. })
        ));
    }

    #[test]
    fn validate_shape() {
        assert!(table().validate().is_ok());
        assert!(matches!(
            KeyTable::new(vec![]).validate(),
            Err(KeyTableError::EmptyTable)
        ));
        assert!(matches!(
            KeyTable::new(vec![vec![KeyDescriptor::new("ا")], vec![]]).validate(),
            Err(KeyTableError::EmptyRow { row: 1 })
        ));
        assert!(matches!(
            KeyTable::new(vec![vec![KeyDescriptor::new("")]]).validate(),
            Err(KeyTableError::EmptyGlyph { row: 0, index: 0 })
        ));
        assert!(matches!(
            KeyTable::new(vec![vec![KeyDescriptor::new("ا").width(0.0)]]).validate(),
            Err(KeyTableError::BadWidth { .. })
        ));
    }

    #[test]
    fn hint_joins_alternates() {
        let k = KeyDescriptor::new("؟").alternates(["?", "¿"]);
        assert_eq!(k.hint().as_deref(), Some("? ¿"));
        assert_eq!(KeyDescriptor::new("ف").hint(), None);
        // a key that only repeats itself needs no caption
        let k = KeyDescriptor::new("ف").alternates(["ف"]);
        assert!(k.has_alternates());
        assert_eq!(k.hint(), None);
        let k = KeyDescriptor::new("ۇ").alternates(["ۇ", "7"]);
        assert_eq!(k.hint().as_deref(), Some("7"));
    }

    #[test]
    fn json_round_trip_and_defaults() {
        let t = KeyTable::from_json(r#"[[{"glyph": "ا", "alternates": ["ٵ"]}, {"glyph": "ب"}], [{"glyph": "ت", "width": 1.5}]]"#)
            .unwrap();
        assert_eq!(t, table());
        assert_eq!(KeyTable::from_json(&t.to_json().unwrap()).unwrap(), t);
    }

    #[test]
    fn json_errors_are_typed() {
        assert!(matches!(
            KeyTable::from_json("{not json"),
            Err(KeyTableError::Json(_))
        ));
        assert!(matches!(
            KeyTable::from_json(r#"[[{"glyph": "ا"}, {"glyph": "ا"}]]"#),
            Err(KeyTableError::DuplicateGlyph { .. })
        ));
    }
}
