#![allow(non_snake_case)]
//! Views, layout, hit testing, gestures and the text field.

pub mod gestures;
pub mod layout;
pub mod textfield;

pub use gestures::{Gesture, GestureConfig, GestureDetector, LongPressPhase};
pub use layout::{Frames, HitRegion, LayoutError, layout_frames};
pub use textfield::TextFieldState;

use qazaq_core::*;

pub fn Row(modifier: Modifier) -> View {
    View::new(0, ViewKind::Row).modifier(modifier)
}

pub fn Column(modifier: Modifier) -> View {
    View::new(0, ViewKind::Column).modifier(modifier)
}

/// A letter key. Always a hit region.
pub fn KeyButton(glyph: impl Into<String>, hint: Option<String>, modifier: Modifier) -> View {
    let glyph = glyph.into();
    View::new(
        0,
        ViewKind::Key {
            glyph: glyph.clone(),
            hint,
        },
    )
    .modifier(modifier.clickable())
    .semantics(Semantics::new(Role::Key).label(glyph))
}

/// A command key; `spoken` is the accessibility label.
pub fn FunctionButton(
    label: impl Into<String>,
    function: FunctionKey,
    spoken: impl Into<String>,
    modifier: Modifier,
) -> View {
    View::new(
        0,
        ViewKind::FunctionKey {
            label: label.into(),
            function,
        },
    )
    .modifier(modifier.clickable())
    .semantics(Semantics::new(Role::Button).label(spoken))
}

/// Options laid side by side, each sharing the width equally.
pub fn Popup<S: AsRef<str>>(options: &[S], modifier: Modifier, option_modifier: Modifier) -> View {
    let children = options
        .iter()
        .enumerate()
        .map(|(index, glyph)| PopupOption(glyph.as_ref(), index, option_modifier.clone()))
        .collect();
    View::new(0, ViewKind::Popup)
        .modifier(modifier)
        .with_children(children)
        .semantics(Semantics::new(Role::Popup))
}

pub fn PopupOption(glyph: impl Into<String>, index: usize, modifier: Modifier) -> View {
    let glyph = glyph.into();
    View::new(
        0,
        ViewKind::PopupOption {
            glyph: glyph.clone(),
            index,
        },
    )
    .modifier(modifier.weight(1.0).clickable())
    .semantics(Semantics::new(Role::Key).label(glyph))
}

/// Assigns pre-order ids starting at `first`. Returns the next free id.
pub fn stamp_ids(root: &mut View, first: ViewId) -> ViewId {
    fn stamp(v: &mut View, id: &mut ViewId) {
        v.id = *id;
        *id += 1;
        for c in v.children.iter_mut() {
            stamp(c, id);
        }
    }
    let mut id = first;
    stamp(root, &mut id);
    id
}

/// Extension trait for child building
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(mut self, children: impl IntoChildren) -> Self {
        self.children.extend(children.into_children());
        self
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_is_preorder() {
        let mut root = Column(Modifier::new()).child((
            Row(Modifier::new()).child(KeyButton("ا", None, Modifier::new())),
            Row(Modifier::new()),
        ));
        let next = stamp_ids(&mut root, 1);

        assert_eq!(next, 5);
        assert_eq!(root.id, 1);
        assert_eq!(root.children[0].id, 2);
        assert_eq!(root.children[0].children[0].id, 3);
        assert_eq!(root.children[1].id, 4);
    }

    #[test]
    fn popup_options_keep_order() {
        let popup = Popup(&["1", "ٷ"], Modifier::new(), Modifier::new());
        let glyphs: Vec<_> = popup
            .children
            .iter()
            .map(|c| match &c.kind {
                ViewKind::PopupOption { glyph, index } => (glyph.as_str(), *index),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(glyphs, vec![("1", 0), ("ٷ", 1)]);
        assert!(popup.children.iter().all(|c| c.modifier.click));
    }

    #[test]
    fn keys_are_clickable_and_labelled() {
        let k = KeyButton("ق", Some("٧".into()), Modifier::new());
        assert!(k.modifier.click);
        assert_eq!(k.semantics.and_then(|s| s.label).as_deref(), Some("ق"));

        let del = FunctionButton("⌫", FunctionKey::Delete, "delete", Modifier::new());
        assert_eq!(del.semantics.map(|s| s.role), Some(Role::Button));
    }
}
