//! # Qazaq keyboard core
//!
//! Plain data shared by the UI and keyboard crates:
//!
//! - `View`: a retained tree of rows, columns, keys and popups. Views carry
//!   what they *are* (`ViewKind`) rather than callbacks; the keyboard
//!   controller maps a view back to its action.
//! - `Modifier`: layout hints (size, weight, padding, spacing) and paint
//!   hints (background, border).
//! - `PointerEvent`: raw touch/mouse input from the host.
//! - `TextSink`: the host's text field, as seen by the keyboard.
//!
//! ```rust
//! use qazaq_core::*;
//!
//! let key = View::new(1, ViewKind::Key { glyph: "ا".into(), hint: None })
//!     .modifier(Modifier::new().weight(1.0).clickable());
//! let row = View::new(0, ViewKind::Row).with_children(vec![key]);
//! assert!(row.find(1).is_some());
//! ```

pub mod color;
pub mod geometry;
pub mod input;
pub mod modifier;
pub mod semantics;
pub mod sink;
pub mod view;

pub use color::*;
pub use geometry::*;
pub use input::*;
pub use modifier::*;
pub use semantics::*;
pub use sink::*;
pub use view::*;
