//! Builds the key grid for a mode.

use std::fmt::Write as _;

use qazaq_core::{FunctionKey, Modifier, View, ViewKind};
use qazaq_ui::{Column, FunctionButton, KeyButton, Row, ViewExt};

use crate::config::{KeyboardConfig, KeyboardMode};
use crate::keys::KeyDescriptor;

fn key_modifier(cfg: &KeyboardConfig) -> Modifier {
    Modifier::new()
        .background(cfg.palette.key)
        .border(0.0, cfg.palette.key, cfg.metrics.key_radius)
}

fn function_modifier(cfg: &KeyboardConfig) -> Modifier {
    Modifier::new()
        .background(cfg.palette.function_key)
        .border(0.0, cfg.palette.function_key, cfg.metrics.key_radius)
}

fn letter_key(cfg: &KeyboardConfig, key: &KeyDescriptor) -> View {
    KeyButton(
        key.glyph.clone(),
        key.hint(),
        key_modifier(cfg).weight(key.width.unwrap_or(1.0)),
    )
}

fn mode_key(mode: KeyboardMode, label: &str, modifier: Modifier) -> View {
    let spoken = match mode {
        KeyboardMode::Letters => "symbols",
        KeyboardMode::Symbols => "letters",
    };
    FunctionButton(label, FunctionKey::ModeToggle, spoken, modifier)
}

fn row(cfg: &KeyboardConfig) -> View {
    Row(Modifier::new().weight(1.0).spacing(cfg.metrics.spacing))
}

/// Rows of the mode's table, top to bottom. The last table row is wrapped
/// with the mode key and delete; a function row is appended below it.
///
/// The result carries no ids; the controller stamps them.
pub fn build_layout(cfg: &KeyboardConfig, mode: KeyboardMode) -> View {
    let table = cfg.table(mode);
    let last = table.rows().len().saturating_sub(1);

    let mut rows: Vec<View> = table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, keys)| {
            let letters: Vec<View> = keys.iter().map(|k| letter_key(cfg, k)).collect();
            if i != last {
                return row(cfg).child(letters);
            }
            row(cfg).child((
                mode_key(
                    mode,
                    cfg.mode_label(mode),
                    function_modifier(cfg).weight(1.0),
                ),
                letters,
                FunctionButton(
                    cfg.labels.delete.clone(),
                    FunctionKey::Delete,
                    "delete",
                    function_modifier(cfg).weight(1.0),
                ),
            ))
        })
        .collect();

    let m = &cfg.metrics;
    rows.push(row(cfg).child((
        mode_key(
            mode,
            &cfg.labels.function_row_mode,
            function_modifier(cfg).width(m.mode_key_width),
        ),
        FunctionButton(
            cfg.labels.globe.clone(),
            FunctionKey::Globe,
            "next keyboard",
            function_modifier(cfg).width(m.globe_key_width),
        ),
        FunctionButton(
            cfg.labels.space.clone(),
            FunctionKey::Space,
            "space",
            function_modifier(cfg).weight(1.0),
        ),
        FunctionButton(
            cfg.labels.submit.clone(),
            FunctionKey::Submit,
            "return",
            function_modifier(cfg).width(m.submit_key_width),
        ),
    )));

    Column(
        Modifier::new()
            .fill_max_size()
            .padding(m.padding)
            .spacing(m.spacing)
            .background(cfg.palette.background),
    )
    .child(rows)
}

/// One line per view, indented by depth. Used for logging and snapshots.
pub fn outline(view: &View) -> String {
    fn go(v: &View, depth: usize, out: &mut String) {
        let pad = "  ".repeat(depth);
        let _ = match &v.kind {
            ViewKind::Key { glyph, hint: Some(h) } => writeln!(out, "{pad}Key {glyph} [{h}]"),
            ViewKind::Key { glyph, hint: None } => writeln!(out, "{pad}Key {glyph}"),
            ViewKind::FunctionKey { function, .. } => writeln!(out, "{pad}{function:?}"),
            ViewKind::PopupOption { glyph, index } => writeln!(out, "{pad}Option {index} {glyph}"),
            other => writeln!(out, "{pad}{other:?}"),
        };
        for c in &v.children {
            go(c, depth + 1, out);
        }
    }
    let mut out = String::new();
    go(view, 0, &mut out);
    out
}
