//! Editing model: formatting commands, shortcuts, toolbar helpers and
//! selection anchoring

mod command;
mod selection;
pub mod toolbar;

pub use command::{shortcut, EditorCommand, ExecInvocation, FormatCommand, KeyChord};
pub use selection::{SelectionAnchor, SelectionSnapshot};
pub use toolbar::{ActiveFormats, FontSizeStepper};
