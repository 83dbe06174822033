use qazaq_ui::LayoutError;

use crate::keys::KeyTableError;

#[derive(Debug, thiserror::Error)]
pub enum KeyboardError {
    #[error(transparent)]
    Table(#[from] KeyTableError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
