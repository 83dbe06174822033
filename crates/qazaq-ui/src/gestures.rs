use qazaq_core::{PointerEvent, PointerEventKind, Vec2};
use web_time::{Duration, Instant};

/// Terminal and initial states reported for a long press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LongPressPhase {
    Began,
    Ended,
    Cancelled,
    Failed,
}

impl LongPressPhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, LongPressPhase::Began)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// Released within the slop radius before the long-press delay.
    Tap,
    LongPress(LongPressPhase),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    pub long_press_delay: Duration,
    /// Max travel (points) before a press stops counting as a tap.
    pub touch_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_delay: Duration::from_millis(500),
            touch_slop: 10.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Press {
    start: Instant,
    origin: Vec2,
    began: bool,
    failed: bool,
}

/// Recognizes taps and long presses for a single pointer.
///
/// Time is passed in by the caller so hosts can drive it from their own
/// frame clock and tests can step it.
#[derive(Clone, Debug)]
pub struct GestureDetector {
    config: GestureConfig,
    long_press: bool,
    press: Option<Press>,
}

impl GestureDetector {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            long_press: true,
            press: None,
        }
    }

    /// Without a long-press recognizer every release inside the slop is a
    /// tap, however long it was held.
    pub fn long_press_enabled(mut self, enabled: bool) -> Self {
        self.long_press = enabled;
        self
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn long_press_active(&self) -> bool {
        self.press.is_some_and(|p| p.began)
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent, now: Instant) -> Option<Gesture> {
        match event.event {
            PointerEventKind::Down => {
                self.press = Some(Press {
                    start: now,
                    origin: event.position,
                    began: false,
                    failed: false,
                });
                None
            }
            PointerEventKind::Move => {
                let press = self.press.as_mut()?;
                if press.began || press.failed {
                    return None;
                }
                if press.origin.distance(event.position) > self.config.touch_slop {
                    press.failed = true;
                    return self
                        .long_press
                        .then_some(Gesture::LongPress(LongPressPhase::Failed));
                }
                self.poll(now)
            }
            PointerEventKind::Up => {
                let press = self.press.take()?;
                if press.began {
                    return Some(Gesture::LongPress(LongPressPhase::Ended));
                }
                if press.failed {
                    return None;
                }
                let held = now.saturating_duration_since(press.start);
                let inside = press.origin.distance(event.position) <= self.config.touch_slop;
                if inside && (!self.long_press || held < self.config.long_press_delay) {
                    Some(Gesture::Tap)
                } else if self.long_press {
                    // Held past the delay without anyone polling.
                    Some(Gesture::LongPress(LongPressPhase::Failed))
                } else {
                    None
                }
            }
            PointerEventKind::Cancel => {
                let press = self.press.take()?;
                press
                    .began
                    .then_some(Gesture::LongPress(LongPressPhase::Cancelled))
            }
        }
    }

    /// Fires `LongPress(Began)` once the press has been held long enough.
    pub fn poll(&mut self, now: Instant) -> Option<Gesture> {
        if !self.long_press {
            return None;
        }
        let press = self.press.as_mut()?;
        if press.began || press.failed {
            return None;
        }
        if now.saturating_duration_since(press.start) >= self.config.long_press_delay {
            press.began = true;
            log::trace!("long press began at {:?}", press.origin);
            return Some(Gesture::LongPress(LongPressPhase::Began));
        }
        None
    }
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(kind: PointerEventKind, x: f32, y: f32) -> PointerEvent {
        PointerEvent::touch(1, kind, Vec2::new(x, y))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn quick_release_is_tap() {
        let t0 = Instant::now();
        let mut g = GestureDetector::default();
        assert_eq!(g.handle_pointer(&ev(PointerEventKind::Down, 10.0, 10.0), t0), None);
        assert_eq!(
            g.handle_pointer(&ev(PointerEventKind::Up, 12.0, 11.0), t0 + ms(80)),
            Some(Gesture::Tap)
        );
        assert!(!g.is_pressed());
    }

    #[test]
    fn hold_then_release_is_long_press() {
        let t0 = Instant::now();
        let mut g = GestureDetector::default();
        g.handle_pointer(&ev(PointerEventKind::Down, 10.0, 10.0), t0);
        assert_eq!(g.poll(t0 + ms(200)), None);
        assert_eq!(
            g.poll(t0 + ms(500)),
            Some(Gesture::LongPress(LongPressPhase::Began))
        );
        // fires once
        assert_eq!(g.poll(t0 + ms(600)), None);
        assert!(g.long_press_active());
        // free to slide once began
        assert_eq!(
            g.handle_pointer(&ev(PointerEventKind::Move, 80.0, -40.0), t0 + ms(700)),
            None
        );
        assert_eq!(
            g.handle_pointer(&ev(PointerEventKind::Up, 80.0, -40.0), t0 + ms(800)),
            Some(Gesture::LongPress(LongPressPhase::Ended))
        );
    }

    #[test]
    fn move_past_delay_begins() {
        let t0 = Instant::now();
        let mut g = GestureDetector::default();
        g.handle_pointer(&ev(PointerEventKind::Down, 10.0, 10.0), t0);
        assert_eq!(
            g.handle_pointer(&ev(PointerEventKind::Move, 11.0, 10.0), t0 + ms(520)),
            Some(Gesture::LongPress(LongPressPhase::Began))
        );
    }

    #[test]
    fn moving_away_fails() {
        let t0 = Instant::now();
        let mut g = GestureDetector::default();
        g.handle_pointer(&ev(PointerEventKind::Down, 10.0, 10.0), t0);
        assert_eq!(
            g.handle_pointer(&ev(PointerEventKind::Move, 40.0, 10.0), t0 + ms(50)),
            Some(Gesture::LongPress(LongPressPhase::Failed))
        );
        assert_eq!(g.poll(t0 + ms(900)), None);
        assert_eq!(
            g.handle_pointer(&ev(PointerEventKind::Up, 10.0, 10.0), t0 + ms(950)),
            None
        );
    }

    #[test]
    fn cancel_after_began() {
        let t0 = Instant::now();
        let mut g = GestureDetector::default();
        g.handle_pointer(&ev(PointerEventKind::Down, 10.0, 10.0), t0);
        g.poll(t0 + ms(600));
        assert_eq!(
            g.handle_pointer(&ev(PointerEventKind::Cancel, 10.0, 10.0), t0 + ms(650)),
            Some(Gesture::LongPress(LongPressPhase::Cancelled))
        );

        g.handle_pointer(&ev(PointerEventKind::Down, 10.0, 10.0), t0);
        assert_eq!(
            g.handle_pointer(&ev(PointerEventKind::Cancel, 10.0, 10.0), t0 + ms(50)),
            None
        );
    }

    #[test]
    fn without_long_press_a_slow_release_still_taps() {
        let t0 = Instant::now();
        let mut g = GestureDetector::default().long_press_enabled(false);
        g.handle_pointer(&ev(PointerEventKind::Down, 10.0, 10.0), t0);
        assert_eq!(g.poll(t0 + ms(2000)), None);
        assert_eq!(
            g.handle_pointer(&ev(PointerEventKind::Up, 10.0, 10.0), t0 + ms(2000)),
            Some(Gesture::Tap)
        );

        g.handle_pointer(&ev(PointerEventKind::Down, 10.0, 10.0), t0);
        assert_eq!(
            g.handle_pointer(&ev(PointerEventKind::Move, 50.0, 10.0), t0 + ms(10)),
            None
        );
    }

    #[test]
    fn unpolled_hold_fails_on_release() {
        let t0 = Instant::now();
        let mut g = GestureDetector::default();
        g.handle_pointer(&ev(PointerEventKind::Down, 10.0, 10.0), t0);
        assert_eq!(
            g.handle_pointer(&ev(PointerEventKind::Up, 10.0, 10.0), t0 + ms(700)),
            Some(Gesture::LongPress(LongPressPhase::Failed))
        );
    }
}
