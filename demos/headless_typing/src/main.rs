//! A host shell without a window: it owns a text field, feeds the keyboard
//! scripted touches and prints what got typed.
//!
//! Run with `RUST_LOG=debug` to watch popups open and close.

use anyhow::Context;
use qazaq_core::{FunctionKey, PointerEvent, PointerEventKind, Vec2, ViewKind};
use qazaq_keyboard::{KeyboardConfig, KeyboardController, outline};
use qazaq_ui::TextFieldState;
use web_time::{Duration, Instant};

enum Step {
    Tap(&'static str),
    Function(FunctionKey),
    /// Long-press a key and slide to one of its alternates.
    Alternate(&'static str, usize),
}

struct Host {
    keyboard: KeyboardController,
    field: TextFieldState,
    now: Instant,
}

impl Host {
    fn send(&mut self, kind: PointerEventKind, at: Vec2) {
        let ev = PointerEvent::touch(1, kind, at);
        self.keyboard.handle_pointer(&ev, self.now, &mut self.field);
    }

    fn wait(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
        self.keyboard.tick(self.now);
    }

    fn press(&mut self, at: Vec2) {
        self.send(PointerEventKind::Down, at);
        self.wait(70);
        self.send(PointerEventKind::Up, at);
        self.wait(90);
    }

    fn run(&mut self, step: &Step) -> anyhow::Result<()> {
        match *step {
            Step::Tap(glyph) => {
                let at = self.key_center(glyph)?;
                self.press(at);
            }
            Step::Function(function) => {
                let id = self
                    .keyboard
                    .function_view(function)
                    .with_context(|| format!("no {function:?} key"))?;
                let at = self
                    .keyboard
                    .frame(id)
                    .context("function key has no frame")?
                    .center();
                self.press(at);
            }
            Step::Alternate(glyph, index) => {
                let at = self.key_center(glyph)?;
                self.send(PointerEventKind::Down, at);
                self.wait(600);

                let source = self.keyboard.key_view(glyph).context("key vanished")?;
                let popup = self
                    .keyboard
                    .popup_for(source)
                    .with_context(|| format!("{glyph} has no alternates"))?;
                let option = self
                    .keyboard
                    .popups()
                    .get(popup)
                    .and_then(|p| p.option_frame(index))
                    .with_context(|| format!("{glyph} has no alternate #{index}"))?
                    .center();

                self.send(PointerEventKind::Move, option);
                self.wait(50);
                self.send(PointerEventKind::Up, option);
            }
        }
        Ok(())
    }

    fn key_center(&self, glyph: &str) -> anyhow::Result<Vec2> {
        let id = self
            .keyboard
            .key_view(glyph)
            .with_context(|| format!("{glyph:?} is not on the current layout"))?;
        Ok(self.keyboard.frame(id).context("key has no frame")?.center())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let keyboard = KeyboardController::new(KeyboardConfig::default())?;
    log::debug!("layout:\n{}", outline(keyboard.view()));
    log::info!(
        "{} letter keys on the grid",
        keyboard
            .view()
            .count_where(|k| matches!(k, ViewKind::Key { .. }))
    );

    let mut host = Host {
        keyboard,
        field: TextFieldState::new(),
        now: Instant::now(),
    };

    let script = [
        Step::Tap("ق"),
        Step::Tap("ا"),
        Step::Tap("ز"),
        Step::Tap("ا"),
        Step::Tap("ق"),
        Step::Tap("س"),
        Step::Tap("ت"),
        Step::Tap("ا"),
        Step::Tap("ن"),
        Step::Function(FunctionKey::Space),
        Step::Alternate("ۇ", 0),
        Step::Tap("ل"),
        Step::Tap("ى"),
        Step::Tap("ت"),
        Step::Tap("ت"),
        Step::Function(FunctionKey::Delete),
        Step::Function(FunctionKey::ModeToggle),
        Step::Tap("!"),
        Step::Alternate("؟", 0),
        Step::Function(FunctionKey::ModeToggle),
        Step::Function(FunctionKey::Submit),
    ];
    for step in &script {
        host.run(step)?;
    }

    print!("{}", host.field.text);
    log::info!(
        "typed {} chars, keyboard back in {:?} mode",
        host.field.text.chars().count(),
        host.keyboard.mode()
    );
    Ok(())
}
