use crate::{Modifier, Semantics};

pub type ViewId = u64;

/// Keys that carry no descriptor and trigger a fixed action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKey {
    ModeToggle,
    Delete,
    Globe,
    Space,
    Submit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewKind {
    Row,
    Column,
    /// A letter key. `glyph` is what gets inserted on tap; `hint` is the
    /// small caption listing the long-press alternates.
    Key {
        glyph: String,
        hint: Option<String>,
    },
    FunctionKey {
        label: String,
        function: FunctionKey,
    },
    Popup,
    PopupOption {
        glyph: String,
        index: usize,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
    pub semantics: Option<Semantics>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            modifier: Modifier::default(),
            children: vec![],
            semantics: None,
        }
    }
    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn semantics(mut self, s: Semantics) -> Self {
        self.semantics = Some(s);
        self
    }

    /// Depth-first search by id.
    pub fn find(&self, id: ViewId) -> Option<&View> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Visits every view in pre-order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a View)) {
        f(self);
        for c in &self.children {
            c.walk(f);
        }
    }

    pub fn count_where(&self, pred: impl Fn(&ViewKind) -> bool) -> usize {
        let mut n = 0;
        self.walk(&mut |v| {
            if pred(&v.kind) {
                n += 1;
            }
        });
        n
    }

    /// Same kinds, modifiers and nesting, ignoring ids.
    pub fn same_shape(&self, other: &View) -> bool {
        self.kind == other.kind
            && self.modifier == other.modifier
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_shape(b))
    }
}
