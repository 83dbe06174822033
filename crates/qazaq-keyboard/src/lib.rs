//! # Qazaq keyboard
//!
//! An on-screen keyboard for the Kazakh Arabic script.
//!
//! - [`KeyTable`] rows of [`KeyDescriptor`]s describe what each key types and
//!   what a long press offers. [`tables`] ships the letters and symbols.
//! - [`build_layout`] turns a table into a grid of rows, adding the mode,
//!   delete, globe, space and return keys.
//! - [`KeyboardController`] owns the grid, recognizes gestures and forwards
//!   text to the host through [`TextSink`](qazaq_core::TextSink).
//!
//! ```rust
//! use qazaq_core::SinkCommand;
//! use qazaq_keyboard::{KeyboardConfig, KeyboardController};
//!
//! let mut keyboard = KeyboardController::new(KeyboardConfig::default())?;
//! let mut typed: Vec<SinkCommand> = Vec::new();
//!
//! let key = keyboard.key_view("ق").expect("letter on the grid");
//! keyboard.tap(key, &mut typed);
//! assert_eq!(typed, vec![SinkCommand::Insert("ق".into())]);
//! # Ok::<(), qazaq_keyboard::KeyboardError>(())
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod keys;
pub mod layout;
pub mod popup;
pub mod tables;

pub use config::{FunctionLabels, KeyboardConfig, KeyboardMetrics, KeyboardMode};
pub use controller::{KeyboardController, Target};
pub use error::KeyboardError;
pub use keys::{KeyDescriptor, KeyTable, KeyTableError};
pub use layout::{build_layout, outline};
pub use popup::{Popup, PopupId, PopupLayer, popup_frame};
pub use qazaq_ui::{GestureConfig, LongPressPhase};
