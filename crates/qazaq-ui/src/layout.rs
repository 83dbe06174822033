//! Flexbox layout of a `View` tree into absolute frames (Taffy 0.9 API).

use std::cmp::Ordering;
use std::collections::HashMap;

use qazaq_core::{Modifier, Rect, Size, TextDirection, Vec2, View, ViewId, ViewKind};
use taffy::prelude::{length, percent};
use taffy::style::{AlignItems, AvailableSpace, Display, FlexDirection, JustifyContent, Style};
use taffy::{NodeId, TaffyTree};

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout engine failed: {0}")]
    Taffy(String),
    #[error("cannot lay out into a {0}x{1} area")]
    EmptyArea(f32, f32),
}

fn taffy_err(e: impl std::fmt::Debug) -> LayoutError {
    LayoutError::Taffy(format!("{e:?}"))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRegion {
    pub id: ViewId,
    pub rect: Rect,
    pub z_index: f32,
}

/// Absolute frames of a laid out tree plus its hit regions.
#[derive(Clone, Debug, Default)]
pub struct Frames {
    rects: HashMap<ViewId, Rect>,
    hits: Vec<HitRegion>,
}

impl Frames {
    pub fn get(&self, id: ViewId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    pub fn hits(&self) -> &[HitRegion] {
        &self.hits
    }

    /// Topmost clickable view under `p`.
    pub fn hit(&self, p: Vec2) -> Option<ViewId> {
        self.hits
            .iter()
            .rev()
            .find(|h| h.rect.contains(p))
            .map(|h| h.id)
    }

    pub fn translate(mut self, dx: f32, dy: f32) -> Self {
        for r in self.rects.values_mut() {
            *r = r.translate(dx, dy);
        }
        for h in self.hits.iter_mut() {
            h.rect = h.rect.translate(dx, dy);
        }
        self
    }
}

fn style_from_modifier(m: &Modifier, kind: &ViewKind, dir: TextDirection) -> Style {
    let mut s = Style {
        display: Display::Flex,
        ..Style::default()
    };

    match kind {
        ViewKind::Row | ViewKind::Popup => {
            s.flex_direction = if dir == TextDirection::Rtl {
                FlexDirection::RowReverse
            } else {
                FlexDirection::Row
            };
        }
        _ => s.flex_direction = FlexDirection::Column,
    }
    s.align_items = Some(AlignItems::Stretch);
    s.justify_content = Some(JustifyContent::FlexStart);

    if let Some(gap) = m.spacing {
        s.gap = taffy::geometry::Size {
            width: length(gap),
            height: length(gap),
        };
    }

    if let Some(p) = m.padding {
        s.padding = taffy::geometry::Rect {
            left: length(p.left),
            right: length(p.right),
            top: length(p.top),
            bottom: length(p.bottom),
        };
    }

    // Weight -> flex: w 1 0%, so equal weights mean equal shares.
    if let Some(w) = m.weight {
        s.flex_grow = w.max(0.0);
        s.flex_shrink = 1.0;
        s.flex_basis = length(0.0);
        s.min_size = taffy::geometry::Size {
            width: length(0.0),
            height: length(0.0),
        };
    }

    if m.fill_max {
        s.size = taffy::geometry::Size {
            width: percent(1.0),
            height: percent(1.0),
        };
    }

    // A fixed width wins over weight.
    if let Some(w) = m.width {
        s.size.width = length(w.max(0.0));
        s.flex_grow = 0.0;
        s.flex_shrink = 0.0;
    }

    s
}

fn build_node(
    v: &View,
    t: &mut TaffyTree<()>,
    nodes: &mut Vec<(ViewId, NodeId)>,
    dir: TextDirection,
) -> Result<NodeId, LayoutError> {
    let style = style_from_modifier(&v.modifier, &v.kind, dir);
    let node = if v.children.is_empty() {
        t.new_leaf(style).map_err(taffy_err)?
    } else {
        let children = v
            .children
            .iter()
            .map(|c| build_node(c, t, nodes, dir))
            .collect::<Result<Vec<_>, _>>()?;
        t.new_with_children(style, &children).map_err(taffy_err)?
    };
    nodes.push((v.id, node));
    Ok(node)
}

/// Lays `root` out into an area of `size` and returns absolute frames.
///
/// Ids are taken as-is; stamp them first (`stamp_ids`) so every view is
/// addressable.
pub fn layout_frames(root: &View, size: Size, dir: TextDirection) -> Result<Frames, LayoutError> {
    if !(size.width > 0.0 && size.height > 0.0) {
        return Err(LayoutError::EmptyArea(size.width, size.height));
    }

    let mut taffy: TaffyTree<()> = TaffyTree::new();
    let mut nodes = Vec::new();
    let root_node = build_node(root, &mut taffy, &mut nodes, dir)?;

    {
        let mut rs = taffy.style(root_node).map_err(taffy_err)?.clone();
        rs.size.width = length(size.width);
        rs.size.height = length(size.height);
        taffy.set_style(root_node, rs).map_err(taffy_err)?;
    }

    let available = taffy::geometry::Size {
        width: AvailableSpace::Definite(size.width),
        height: AvailableSpace::Definite(size.height),
    };
    taffy
        .compute_layout(root_node, available)
        .map_err(taffy_err)?;

    let node_of: HashMap<ViewId, NodeId> = nodes.into_iter().collect();
    let mut frames = Frames::default();

    fn walk(
        v: &View,
        t: &TaffyTree<()>,
        node_of: &HashMap<ViewId, NodeId>,
        offset: (f32, f32),
        frames: &mut Frames,
    ) -> Result<(), LayoutError> {
        let Some(&node) = node_of.get(&v.id) else {
            return Ok(());
        };
        let l = t.layout(node).map_err(taffy_err)?;
        let rect = Rect {
            x: offset.0 + l.location.x,
            y: offset.1 + l.location.y,
            w: l.size.width,
            h: l.size.height,
        };
        frames.rects.insert(v.id, rect);
        if v.modifier.click {
            frames.hits.push(HitRegion {
                id: v.id,
                rect,
                z_index: v.modifier.z_index,
            });
        }
        for c in &v.children {
            walk(c, t, node_of, (rect.x, rect.y), frames)?;
        }
        Ok(())
    }

    walk(root, &taffy, &node_of, (0.0, 0.0), &mut frames)?;

    // Low z_index first; `hit` searches from the back.
    frames
        .hits
        .sort_by(|a, b| a.z_index.partial_cmp(&b.z_index).unwrap_or(Ordering::Equal));

    log::trace!(
        "laid out {} views ({} hit regions) into {}x{}",
        frames.rects.len(),
        frames.hits.len(),
        size.width,
        size.height
    );
    Ok(frames)
}
