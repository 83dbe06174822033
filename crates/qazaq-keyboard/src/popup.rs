//! Long-press popups listing a key's alternates.
//!
//! Popups are owned by a [`PopupLayer`] and addressed by the [`PopupId`]
//! returned when they are opened, so closing one never touches another.

use qazaq_core::{Modifier, Rect, Size, TextDirection, Vec2, View, ViewId};
use qazaq_ui::{Frames, LayoutError, Popup as PopupView, layout_frames, stamp_ids};
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::config::KeyboardConfig;

new_key_type! {
    pub struct PopupId;
}

pub type Options = SmallVec<[String; 4]>;

#[derive(Clone, Debug)]
pub struct Popup {
    /// The key view the popup belongs to.
    pub source: ViewId,
    pub options: Options,
    pub frame: Rect,
    pub view: View,
    frames: Frames,
    order: u64,
}

impl Popup {
    pub fn option_frame(&self, index: usize) -> Option<Rect> {
        let option = self.view.children.get(index)?;
        self.frames.get(option.id)
    }

    /// Index of the option under `p`, if any.
    pub fn option_at(&self, p: Vec2) -> Option<usize> {
        let id = self.frames.hit(p)?;
        self.view.children.iter().position(|c| c.id == id)
    }
}

/// Frame of a popup with `count` options anchored above `key`: centred on
/// the key horizontally, bottom edge `popup_offset` above the key's top.
pub fn popup_frame(cfg: &KeyboardConfig, key: Rect, count: usize) -> Rect {
    let m = &cfg.metrics;
    let w = m.popup_option_width * count as f32;
    let h = m.popup_height;
    Rect {
        x: key.mid_x() - w / 2.0,
        y: key.y - h - m.popup_offset,
        w,
        h,
    }
}

#[derive(Debug, Default)]
pub struct PopupLayer {
    popups: SlotMap<PopupId, Popup>,
    next_order: u64,
}

impl PopupLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and lays out a popup for `options` above the `anchor` frame.
    pub fn open(
        &mut self,
        cfg: &KeyboardConfig,
        source: ViewId,
        anchor: Rect,
        options: &[String],
    ) -> Result<PopupId, LayoutError> {
        let frame = popup_frame(cfg, anchor, options.len());
        let m = &cfg.metrics;
        let mut view = PopupView(
            options,
            Modifier::new()
                .padding(m.popup_padding)
                .spacing(m.popup_spacing)
                .background(cfg.palette.popup)
                .border(1.0, cfg.palette.popup_border, 8.0)
                .z_index(1.0),
            Modifier::new()
                .background(cfg.palette.popup)
                .border(0.0, cfg.palette.popup, 4.0)
                .z_index(1.0),
        );
        stamp_ids(&mut view, 1);
        // The popup lays out its own options, so row direction does not
        // apply: alternates read in table order.
        let frames = layout_frames(&view, Size::new(frame.w, frame.h), TextDirection::Ltr)?
            .translate(frame.x, frame.y);

        let order = self.next_order;
        self.next_order += 1;
        let id = self.popups.insert(Popup {
            source,
            options: options.iter().cloned().collect(),
            frame,
            view,
            frames,
            order,
        });
        log::debug!("opened popup {id:?} with {} options", options.len());
        Ok(id)
    }

    /// Removes one popup. Closing an id that is already gone is a no-op.
    pub fn close(&mut self, id: PopupId) -> Option<Popup> {
        let popup = self.popups.remove(id);
        if popup.is_some() {
            log::debug!("closed popup {id:?}");
        }
        popup
    }

    pub fn close_all(&mut self) {
        if !self.popups.is_empty() {
            log::debug!("closing {} popups", self.popups.len());
        }
        self.popups.clear();
    }

    pub fn get(&self, id: PopupId) -> Option<&Popup> {
        self.popups.get(id)
    }

    pub fn contains(&self, id: PopupId) -> bool {
        self.popups.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.popups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PopupId, &Popup)> {
        self.popups.iter()
    }

    /// Most recently opened popup that belongs to the key view `source`.
    pub fn newest_for(&self, source: ViewId) -> Option<PopupId> {
        self.popups
            .iter()
            .filter(|(_, popup)| popup.source == source)
            .max_by_key(|(_, popup)| popup.order)
            .map(|(id, _)| id)
    }

    /// Topmost (most recently opened) popup under `p` and the option hit.
    pub fn hit(&self, p: Vec2) -> Option<(PopupId, Option<usize>)> {
        self.popups
            .iter()
            .filter(|(_, popup)| popup.frame.contains(p))
            .max_by_key(|(_, popup)| popup.order)
            .map(|(id, popup)| (id, popup.option_at(p)))
    }
}
