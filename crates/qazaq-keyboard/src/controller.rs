//! Owns the current key grid and turns taps, long presses and raw pointer
//! input into calls on the host's [`TextSink`].
//!
//! Everything runs on the host's UI thread. The sink is borrowed per event
//! rather than stored, so the host keeps ownership of its text field.

use std::collections::HashMap;

use qazaq_core::{
    FunctionKey, PointerEvent, PointerEventKind, PointerId, Rect, Size, TextSink, Vec2, View,
    ViewId, ViewKind,
};
use qazaq_ui::{Frames, Gesture, GestureDetector, LayoutError, LongPressPhase, layout_frames, stamp_ids};
use web_time::Instant;

use crate::config::{KeyboardConfig, KeyboardMode};
use crate::error::KeyboardError;
use crate::keys::KeyDescriptor;
use crate::layout::{build_layout, outline};
use crate::popup::{PopupId, PopupLayer};

/// What a pointer went down on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    View(ViewId),
    PopupOption { popup: PopupId, index: usize },
}

#[derive(Debug)]
struct Tracked {
    target: Target,
    detector: GestureDetector,
    /// Popup this pointer's long press opened.
    popup: Option<PopupId>,
}

pub struct KeyboardController {
    config: KeyboardConfig,
    mode: KeyboardMode,
    size: Size,
    view: View,
    frames: Frames,
    popups: PopupLayer,
    /// Popups opened through [`KeyboardController::long_press`], by key.
    /// Popups opened by pointers are held in `pointers` instead, so two
    /// fingers on one key each get their own.
    sessions: HashMap<ViewId, PopupId>,
    pointers: HashMap<PointerId, Tracked>,
}

impl KeyboardController {
    pub fn new(config: KeyboardConfig) -> Result<Self, KeyboardError> {
        config.validate()?;
        let size = Size::new(config.metrics.width, config.metrics.height);
        let (view, frames) = compose(&config, KeyboardMode::Letters, size)?;
        Ok(Self {
            config,
            mode: KeyboardMode::Letters,
            size,
            view,
            frames,
            popups: PopupLayer::new(),
            sessions: HashMap::new(),
            pointers: HashMap::new(),
        })
    }

    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    pub fn mode(&self) -> KeyboardMode {
        self.mode
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The current key grid, ids stamped.
    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn frames(&self) -> &Frames {
        &self.frames
    }

    pub fn popups(&self) -> &PopupLayer {
        &self.popups
    }

    /// Newest popup opened by a long press on `source`, if one is showing.
    pub fn popup_for(&self, source: ViewId) -> Option<PopupId> {
        self.popups.newest_for(source)
    }

    /// Looks a glyph up in the active table.
    pub fn find_key(&self, glyph: &str) -> Option<&KeyDescriptor> {
        self.config.table(self.mode).find_key(glyph)
    }

    /// View id of the letter key showing `glyph`.
    pub fn key_view(&self, glyph: &str) -> Option<ViewId> {
        let mut found = None;
        self.view.walk(&mut |v| {
            if found.is_none()
                && let ViewKind::Key { glyph: g, .. } = &v.kind
                && g == glyph
            {
                found = Some(v.id);
            }
        });
        found
    }

    /// View id of the first key bound to `function`, in row order.
    pub fn function_view(&self, function: FunctionKey) -> Option<ViewId> {
        let mut found = None;
        self.view.walk(&mut |v| {
            if found.is_none()
                && let ViewKind::FunctionKey { function: f, .. } = &v.kind
                && *f == function
            {
                found = Some(v.id);
            }
        });
        found
    }

    pub fn frame(&self, id: ViewId) -> Option<Rect> {
        self.frames.get(id)
    }

    /// Re-lays the grid out for a new keyboard size.
    pub fn resize(&mut self, size: Size) -> Result<(), KeyboardError> {
        let (view, frames) = compose(&self.config, self.mode, size)?;
        self.size = size;
        self.install(view, frames);
        Ok(())
    }

    /// Flips between letters and symbols and rebuilds the whole grid.
    /// The mode is left unchanged if the new grid cannot be laid out.
    pub fn toggle_mode(&mut self) -> Result<(), KeyboardError> {
        let mode = self.mode.toggled();
        let (view, frames) = compose(&self.config, mode, self.size)?;
        self.mode = mode;
        self.install(view, frames);
        log::info!("keyboard mode is now {mode:?}");
        Ok(())
    }

    fn install(&mut self, view: View, frames: Frames) {
        self.dismiss_all_popups();
        self.pointers.clear();
        self.view = view;
        self.frames = frames;
        log::trace!("installed layout:\n{}", outline(&self.view));
    }

    /// Tap-release on a key of the grid.
    pub fn tap(&mut self, id: ViewId, sink: &mut dyn TextSink) {
        let Some(view) = self.view.find(id) else {
            log::debug!("tap on unknown view {id}");
            return;
        };
        match &view.kind {
            ViewKind::Key { glyph, .. } => {
                log::trace!("insert {glyph:?}");
                sink.insert_text(glyph);
            }
            ViewKind::FunctionKey { function, .. } => {
                let function = *function;
                self.run_function(function, sink);
            }
            other => log::debug!("tap on non-key view {id} ({other:?})"),
        }
    }

    pub fn run_function(&mut self, function: FunctionKey, sink: &mut dyn TextSink) {
        log::trace!("function key {function:?}");
        match function {
            FunctionKey::ModeToggle => {
                if let Err(e) = self.toggle_mode() {
                    log::error!("mode switch failed: {e}");
                }
            }
            FunctionKey::Delete => sink.delete_backward(),
            FunctionKey::Globe => sink.advance_to_next_input_mode(),
            FunctionKey::Space => sink.insert_text(" "),
            FunctionKey::Submit => sink.insert_text("\n"),
        }
    }

    /// Long-press state change on a key of the grid.
    ///
    /// `Began` opens a popup of the key's alternates (none: no popup); every
    /// other phase closes the popup this key opened, if it is still there.
    pub fn long_press(&mut self, id: ViewId, phase: LongPressPhase) -> Option<PopupId> {
        if phase.is_terminal() {
            if let Some(popup) = self.sessions.remove(&id) {
                self.popups.close(popup);
            }
            return None;
        }

        if let Some(stale) = self.sessions.remove(&id) {
            self.popups.close(stale);
        }
        let popup = self.open_popup(id)?;
        self.sessions.insert(id, popup);
        Some(popup)
    }

    /// Opens a popup of the alternates of key view `id`, if it has any.
    fn open_popup(&mut self, id: ViewId) -> Option<PopupId> {
        let Some(view) = self.view.find(id) else {
            log::debug!("long press on unknown view {id}");
            return None;
        };
        let ViewKind::Key { glyph, .. } = &view.kind else {
            log::debug!("long press on non-key view {id}");
            return None;
        };
        let Some(key) = self.config.table(self.mode).find_key(glyph) else {
            log::debug!("no key descriptor for {glyph:?}");
            return None;
        };
        if !key.has_alternates() {
            return None;
        }
        let Some(anchor) = self.frames.get(id) else {
            log::debug!("no frame for view {id}");
            return None;
        };

        match self.popups.open(&self.config, id, anchor, &key.alternates) {
            Ok(popup) => Some(popup),
            Err(e) => {
                log::error!("could not lay out popup for {glyph:?}: {e}");
                None
            }
        }
    }

    /// Inserts option `index` of `popup` and closes the popup. Returns
    /// whether anything was inserted.
    pub fn select_popup_option(
        &mut self,
        popup: PopupId,
        index: usize,
        sink: &mut dyn TextSink,
    ) -> bool {
        let Some(glyph) = self
            .popups
            .get(popup)
            .and_then(|p| p.options.get(index))
            .cloned()
        else {
            log::debug!("no option {index} in popup {popup:?}");
            return false;
        };
        sink.insert_text(&glyph);
        self.popups.close(popup);
        self.sessions.retain(|_, p| *p != popup);
        for tracked in self.pointers.values_mut() {
            if tracked.popup == Some(popup) {
                tracked.popup = None;
            }
        }
        true
    }

    pub fn dismiss_all_popups(&mut self) {
        self.popups.close_all();
        self.sessions.clear();
    }

    fn target_at(&self, p: Vec2) -> Option<Target> {
        if let Some((popup, option)) = self.popups.hit(p) {
            // A popup's padding swallows the touch.
            return option.map(|index| Target::PopupOption { popup, index });
        }
        self.frames.hit(p).map(Target::View)
    }

    fn has_long_press(&self, target: Target) -> bool {
        let Target::View(id) = target else {
            return false;
        };
        match self.view.find(id).map(|v| &v.kind) {
            Some(ViewKind::Key { glyph, .. }) => self
                .find_key(glyph)
                .is_some_and(KeyDescriptor::has_alternates),
            _ => false,
        }
    }

    /// Feeds one raw pointer event through hit testing and gesture
    /// recognition.
    pub fn handle_pointer(&mut self, event: &PointerEvent, now: Instant, sink: &mut dyn TextSink) {
        if event.event == PointerEventKind::Down {
            let Some(target) = self.target_at(event.position) else {
                log::trace!("pointer down outside keys at {:?}", event.position);
                return;
            };
            let mut detector = GestureDetector::new(self.config.gestures)
                .long_press_enabled(self.has_long_press(target));
            detector.handle_pointer(event, now);
            self.pointers.insert(
                event.id,
                Tracked {
                    target,
                    detector,
                    popup: None,
                },
            );
            return;
        }

        let finished = matches!(event.event, PointerEventKind::Up | PointerEventKind::Cancel);
        let Some(tracked) = self.pointers.get_mut(&event.id) else {
            return;
        };
        let sliding = tracked.detector.long_press_active();
        let gesture = tracked.detector.handle_pointer(event, now);
        let target = tracked.target;
        let popup = tracked.popup;
        if finished {
            self.pointers.remove(&event.id);
        }

        // Releasing over an option of this pointer's popup picks it.
        if sliding
            && event.event == PointerEventKind::Up
            && let Some(popup) = popup
            && let Some((hit, Some(index))) = self.popups.hit(event.position)
            && hit == popup
        {
            self.select_popup_option(popup, index, sink);
        }

        if let Some(gesture) = gesture {
            log::trace!("{gesture:?} on {target:?}");
        }
        match gesture {
            Some(Gesture::Tap) => match target {
                Target::View(id) => self.tap(id, sink),
                Target::PopupOption { popup, index } => {
                    self.select_popup_option(popup, index, sink);
                }
            },
            Some(Gesture::LongPress(LongPressPhase::Began)) => {
                self.begin_long_press(event.id, target);
            }
            Some(Gesture::LongPress(_)) => {
                if let Some(popup) = popup {
                    self.popups.close(popup);
                }
            }
            None => {}
        }
    }

    fn begin_long_press(&mut self, pointer: PointerId, target: Target) {
        let Target::View(id) = target else {
            return;
        };
        let popup = self.open_popup(id);
        if let Some(tracked) = self.pointers.get_mut(&pointer) {
            tracked.popup = popup;
        }
    }

    /// Lets held pointers turn into long presses without moving.
    pub fn tick(&mut self, now: Instant) {
        let began: Vec<(PointerId, Target)> = self
            .pointers
            .iter_mut()
            .filter_map(|(pointer, t)| t.detector.poll(now).map(|_| (*pointer, t.target)))
            .collect();
        for (pointer, target) in began {
            self.begin_long_press(pointer, target);
        }
    }
}

fn compose(
    config: &KeyboardConfig,
    mode: KeyboardMode,
    size: Size,
) -> Result<(View, Frames), LayoutError> {
    let mut view = build_layout(config, mode);
    stamp_ids(&mut view, 1);
    let frames = layout_frames(&view, size, config.direction)?;
    Ok((view, frames))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qazaq_core::SinkCommand;

    fn controller() -> KeyboardController {
        KeyboardController::new(KeyboardConfig::default()).unwrap()
    }

    fn letter_glyphs(c: &KeyboardController) -> Vec<String> {
        c.config()
            .table(c.mode())
            .keys()
            .map(|k| k.glyph.clone())
            .collect()
    }

    #[test]
    fn tap_inserts_displayed_glyph() {
        let mut c = controller();
        for glyph in letter_glyphs(&c) {
            let mut sink: Vec<SinkCommand> = Vec::new();
            let id = c.key_view(&glyph).unwrap();
            c.tap(id, &mut sink);
            assert_eq!(sink, vec![SinkCommand::Insert(glyph)]);
        }
    }

    #[test]
    fn tap_on_container_or_unknown_view_is_silent() {
        let mut c = controller();
        let mut sink: Vec<SinkCommand> = Vec::new();
        let root = c.view().id;
        c.tap(root, &mut sink);
        c.tap(9_999, &mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn function_keys_forward_one_command_in_any_mode() {
        let mut c = controller();
        for _ in 0..2 {
            let mut sink: Vec<SinkCommand> = Vec::new();
            for f in [
                FunctionKey::Delete,
                FunctionKey::Space,
                FunctionKey::Submit,
                FunctionKey::Globe,
            ] {
                let id = c.function_view(f).unwrap();
                c.tap(id, &mut sink);
            }
            assert_eq!(
                sink,
                vec![
                    SinkCommand::DeleteBackward,
                    SinkCommand::Insert(" ".into()),
                    SinkCommand::Insert("\n".into()),
                    SinkCommand::AdvanceInputMode,
                ]
            );
            c.toggle_mode().unwrap();
        }
    }

    #[test]
    fn mode_key_switches_tables() {
        let mut c = controller();
        let mut sink: Vec<SinkCommand> = Vec::new();
        let before = c.view().clone();

        let toggle = c.function_view(FunctionKey::ModeToggle).unwrap();
        c.tap(toggle, &mut sink);
        assert_eq!(c.mode(), KeyboardMode::Symbols);
        assert!(sink.is_empty());
        assert!(c.key_view("ق").is_none());
        assert!(c.key_view("؟").is_some());
        assert!(!c.view().same_shape(&before));

        let toggle = c.function_view(FunctionKey::ModeToggle).unwrap();
        c.tap(toggle, &mut sink);
        assert_eq!(c.mode(), KeyboardMode::Letters);
        assert!(c.view().same_shape(&before));
        assert_eq!(c.view(), &before);
    }

    #[test]
    fn long_press_opens_popup_with_alternates_in_order() {
        let mut c = controller();
        for glyph in letter_glyphs(&c) {
            let alternates = c.find_key(&glyph).unwrap().alternates.clone();
            let id = c.key_view(&glyph).unwrap();
            let popup = c.long_press(id, LongPressPhase::Began);
            if alternates.is_empty() {
                assert!(popup.is_none(), "{glyph}");
                assert!(c.popups().is_empty());
                continue;
            }
            let popup = popup.unwrap();
            assert_eq!(c.popups().len(), 1);
            assert_eq!(c.popups().get(popup).unwrap().options.to_vec(), alternates);

            for (i, alt) in alternates.iter().enumerate() {
                let popup = c.long_press(id, LongPressPhase::Began).unwrap();
                let mut sink: Vec<SinkCommand> = Vec::new();
                assert!(c.select_popup_option(popup, i, &mut sink));
                assert_eq!(sink, vec![SinkCommand::Insert(alt.clone())]);
                assert!(c.popups().is_empty());
                // the gesture still ends afterwards
                c.long_press(id, LongPressPhase::Ended);
                assert!(c.popups().is_empty());
            }
        }
    }

    #[test]
    fn every_letter_long_press_offers_the_letter() {
        let mut c = controller();
        for glyph in letter_glyphs(&c) {
            let id = c.key_view(&glyph).unwrap();
            let popup = c.long_press(id, LongPressPhase::Began).unwrap();
            assert_eq!(c.popups().get(popup).unwrap().options.to_vec(), vec![glyph]);
            c.long_press(id, LongPressPhase::Ended);
        }
        assert!(c.popups().is_empty());
    }

    #[test]
    fn symbol_without_alternates_opens_nothing() {
        let mut c = controller();
        c.toggle_mode().unwrap();
        let id = c.key_view("!").unwrap();
        assert!(c.long_press(id, LongPressPhase::Began).is_none());
        assert!(c.popups().is_empty());

        let id = c.key_view("؟").unwrap();
        let popup = c.long_press(id, LongPressPhase::Began).unwrap();
        assert_eq!(c.popups().get(popup).unwrap().options.to_vec(), vec!["?".to_string()]);
    }

    #[test]
    fn popup_sits_above_its_key() {
        let mut c = controller();
        let id = c.key_view("و").unwrap();
        let key = c.frame(id).unwrap();
        let popup = c.long_press(id, LongPressPhase::Began).unwrap();
        let frame = c.popups().get(popup).unwrap().frame;
        // one option: the letter itself
        assert!((frame.w - 50.0).abs() < 0.01);
        assert!((frame.h - 50.0).abs() < 0.01);
        assert!((frame.mid_x() - key.mid_x()).abs() < 0.01);
        assert!((frame.max_y() + 8.0 - key.y).abs() < 0.01);
    }

    #[test]
    fn terminal_phases_always_leave_no_popup() {
        let mut c = controller();
        let id = c.key_view("ا").unwrap();
        for phase in [
            LongPressPhase::Ended,
            LongPressPhase::Cancelled,
            LongPressPhase::Failed,
        ] {
            // never opened
            c.long_press(id, phase);
            assert!(c.popups().is_empty());

            c.long_press(id, LongPressPhase::Began).unwrap();
            c.long_press(id, phase);
            assert!(c.popups().is_empty());
            c.long_press(id, phase);
            assert!(c.popups().is_empty());
        }
    }

    #[test]
    fn repeated_began_replaces_the_popup() {
        let mut c = controller();
        let id = c.key_view("ا").unwrap();
        let first = c.long_press(id, LongPressPhase::Began).unwrap();
        let second = c.long_press(id, LongPressPhase::Began).unwrap();
        assert_ne!(first, second);
        assert_eq!(c.popups().len(), 1);
        assert_eq!(c.popup_for(id), Some(second));
    }

    #[test]
    fn long_press_on_function_key_does_nothing() {
        let mut c = controller();
        let id = c.function_view(FunctionKey::Space).unwrap();
        assert!(c.long_press(id, LongPressPhase::Began).is_none());
        assert!(c.popups().is_empty());
    }

    #[test]
    fn select_out_of_range_is_rejected() {
        let mut c = controller();
        let id = c.key_view("ا").unwrap();
        let popup = c.long_press(id, LongPressPhase::Began).unwrap();
        let mut sink: Vec<SinkCommand> = Vec::new();
        assert!(!c.select_popup_option(popup, 5, &mut sink));
        assert!(sink.is_empty());
        assert_eq!(c.popups().len(), 1);
    }

    #[test]
    fn toggling_dismisses_popups() {
        let mut c = controller();
        let id = c.key_view("ا").unwrap();
        c.long_press(id, LongPressPhase::Began).unwrap();
        c.toggle_mode().unwrap();
        assert!(c.popups().is_empty());
        assert_eq!(c.popup_for(id), None);
    }

    #[test]
    fn resize_relays_the_grid() {
        let mut c = controller();
        let id = c.key_view("ف").unwrap();
        let narrow = c.frame(id).unwrap();
        c.resize(Size::new(780.0, 280.0)).unwrap();
        let id = c.key_view("ف").unwrap();
        let wide = c.frame(id).unwrap();
        assert!(wide.w > narrow.w * 1.9);
        assert!(c.resize(Size::new(0.0, 0.0)).is_err());
        assert_eq!(c.size(), Size::new(780.0, 280.0));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = KeyboardConfig {
            symbols: crate::keys::KeyTable::new(vec![]),
            ..KeyboardConfig::default()
        };
        assert!(matches!(
            KeyboardController::new(cfg),
            Err(KeyboardError::Table(_))
        ));
    }
}
