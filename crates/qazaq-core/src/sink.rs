//! The host-side text input the keyboard types into.

/// Commands a keyboard can send to the host's active text field.
///
/// Implemented by the host (a platform text-document proxy, or
/// `qazaq_ui::TextFieldState` for an in-process field). The keyboard owns
/// none of the semantics beyond calling these three operations.
pub trait TextSink {
    /// Inserts `text` at the cursor, replacing any selection.
    fn insert_text(&mut self, text: &str);
    fn delete_backward(&mut self);
    /// Asks the host to switch to the next system input method.
    fn advance_to_next_input_mode(&mut self);
}

/// One recorded call on a [`TextSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkCommand {
    Insert(String),
    DeleteBackward,
    AdvanceInputMode,
}

/// Records every command in order; handy for hosts that forward commands
/// over a channel and for tests.
impl TextSink for Vec<SinkCommand> {
    fn insert_text(&mut self, text: &str) {
        self.push(SinkCommand::Insert(text.to_string()));
    }

    fn delete_backward(&mut self) {
        self.push(SinkCommand::DeleteBackward);
    }

    fn advance_to_next_input_mode(&mut self) {
        self.push(SinkCommand::AdvanceInputMode);
    }
}

impl<T: TextSink + ?Sized> TextSink for &mut T {
    fn insert_text(&mut self, text: &str) {
        (**self).insert_text(text);
    }

    fn delete_backward(&mut self) {
        (**self).delete_backward();
    }

    fn advance_to_next_input_mode(&mut self) {
        (**self).advance_to_next_input_mode();
    }
}
