//! Formatting commands and keyboard shortcuts

use serde::Serialize;

use crate::error::{Error, Result};

/// A rich-text command carried out by the browser's editing surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    StrikeThrough,
    Subscript,
    Superscript,
    JustifyLeft,
    JustifyCenter,
    JustifyRight,
    JustifyFull,
    FontName(String),
    FontSize(String),
    /// Block style such as `h1` or `p`
    FormatBlock(String),
    ForeColor(String),
    HiliteColor(String),
    CreateLink(String),
    InsertText(String),
    InsertHtml(String),
    InsertImage(String),
    InsertUnorderedList,
    InsertOrderedList,
    InsertHorizontalRule,
    RemoveFormat,
    Cut,
    Copy,
    Paste,
    Undo,
    Redo,
}

impl FormatCommand {
    /// Parse an `execCommand` name; commands that take a value use `value`
    /// or an empty string when none is given
    pub fn parse(name: &str, value: Option<&str>) -> Result<Self> {
        let arg = || value.unwrap_or_default().to_string();
        let command = match name {
            "bold" => FormatCommand::Bold,
            "italic" => FormatCommand::Italic,
            "underline" => FormatCommand::Underline,
            "strikeThrough" => FormatCommand::StrikeThrough,
            "subscript" => FormatCommand::Subscript,
            "superscript" => FormatCommand::Superscript,
            "justifyLeft" => FormatCommand::JustifyLeft,
            "justifyCenter" => FormatCommand::JustifyCenter,
            "justifyRight" => FormatCommand::JustifyRight,
            "justifyFull" => FormatCommand::JustifyFull,
            "fontName" => FormatCommand::FontName(arg()),
            "fontSize" => FormatCommand::FontSize(arg()),
            "formatBlock" => FormatCommand::FormatBlock(arg()),
            "foreColor" => FormatCommand::ForeColor(arg()),
            "hiliteColor" => FormatCommand::HiliteColor(arg()),
            "createLink" => FormatCommand::CreateLink(arg()),
            "insertText" => FormatCommand::InsertText(arg()),
            "insertHTML" => FormatCommand::InsertHtml(arg()),
            "insertImage" => FormatCommand::InsertImage(arg()),
            "insertUnorderedList" => FormatCommand::InsertUnorderedList,
            "insertOrderedList" => FormatCommand::InsertOrderedList,
            "insertHorizontalRule" => FormatCommand::InsertHorizontalRule,
            "removeFormat" => FormatCommand::RemoveFormat,
            "cut" => FormatCommand::Cut,
            "copy" => FormatCommand::Copy,
            "paste" => FormatCommand::Paste,
            "undo" => FormatCommand::Undo,
            "redo" => FormatCommand::Redo,
            other => return Err(Error::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }

    /// The `execCommand` name
    pub fn exec_name(&self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::Underline => "underline",
            FormatCommand::StrikeThrough => "strikeThrough",
            FormatCommand::Subscript => "subscript",
            FormatCommand::Superscript => "superscript",
            FormatCommand::JustifyLeft => "justifyLeft",
            FormatCommand::JustifyCenter => "justifyCenter",
            FormatCommand::JustifyRight => "justifyRight",
            FormatCommand::JustifyFull => "justifyFull",
            FormatCommand::FontName(_) => "fontName",
            FormatCommand::FontSize(_) => "fontSize",
            FormatCommand::FormatBlock(_) => "formatBlock",
            FormatCommand::ForeColor(_) => "foreColor",
            FormatCommand::HiliteColor(_) => "hiliteColor",
            FormatCommand::CreateLink(_) => "createLink",
            FormatCommand::InsertText(_) => "insertText",
            FormatCommand::InsertHtml(_) => "insertHTML",
            FormatCommand::InsertImage(_) => "insertImage",
            FormatCommand::InsertUnorderedList => "insertUnorderedList",
            FormatCommand::InsertOrderedList => "insertOrderedList",
            FormatCommand::InsertHorizontalRule => "insertHorizontalRule",
            FormatCommand::RemoveFormat => "removeFormat",
            FormatCommand::Cut => "cut",
            FormatCommand::Copy => "copy",
            FormatCommand::Paste => "paste",
            FormatCommand::Undo => "undo",
            FormatCommand::Redo => "redo",
        }
    }

    /// The `execCommand` value argument, if the command takes one
    pub fn value(&self) -> Option<&str> {
        match self {
            FormatCommand::FontName(v)
            | FormatCommand::FontSize(v)
            | FormatCommand::FormatBlock(v)
            | FormatCommand::ForeColor(v)
            | FormatCommand::HiliteColor(v)
            | FormatCommand::CreateLink(v)
            | FormatCommand::InsertText(v)
            | FormatCommand::InsertHtml(v)
            | FormatCommand::InsertImage(v) => Some(v),
            _ => None,
        }
    }

    /// Flattened form handed to the browser shell
    pub fn invocation(&self) -> ExecInvocation {
        ExecInvocation {
            command: self.exec_name(),
            value: self.value().map(str::to_string),
        }
    }
}

/// An `execCommand(command, false, value)` call for the shell to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecInvocation {
    pub command: &'static str,
    pub value: Option<String>,
}

/// A key press with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyChord {
    pub key: char,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyChord {
    /// A key with Ctrl held
    pub fn ctrl(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            ..Default::default()
        }
    }

    /// A key with Ctrl and Alt held
    pub fn ctrl_alt(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            alt: true,
            ..Default::default()
        }
    }

    /// Ctrl on most platforms, Cmd on macOS
    fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Editor-level actions bound to keyboard shortcuts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    Save,
    ToggleComments,
    ToggleChat,
    AddPage,
    Format(FormatCommand),
}

/// Resolve a key chord to the action it is bound to
pub fn shortcut(chord: &KeyChord) -> Option<EditorCommand> {
    if !chord.command() {
        return None;
    }
    let key = chord.key.to_ascii_lowercase();

    if chord.alt {
        return match key {
            'c' => Some(EditorCommand::ToggleComments),
            'm' => Some(EditorCommand::ToggleChat),
            'p' => Some(EditorCommand::AddPage),
            _ => None,
        };
    }

    match key {
        's' => Some(EditorCommand::Save),
        'b' => Some(EditorCommand::Format(FormatCommand::Bold)),
        'i' => Some(EditorCommand::Format(FormatCommand::Italic)),
        'u' => Some(EditorCommand::Format(FormatCommand::Underline)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_name_agree() {
        for name in [
            "bold",
            "strikeThrough",
            "justifyFull",
            "insertHTML",
            "insertOrderedList",
            "removeFormat",
            "redo",
        ] {
            let command = FormatCommand::parse(name, None).unwrap();
            assert_eq!(command.exec_name(), name);
        }
    }

    #[test]
    fn test_value_commands() {
        let command = FormatCommand::parse("fontSize", Some("14")).unwrap();
        assert_eq!(command, FormatCommand::FontSize("14".into()));
        assert_eq!(command.value(), Some("14"));
        assert_eq!(FormatCommand::Bold.value(), None);
        assert_eq!(
            FormatCommand::parse("foreColor", None).unwrap().invocation(),
            ExecInvocation { command: "foreColor", value: Some(String::new()) }
        );
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            FormatCommand::parse("selfDestruct", None),
            Err(Error::UnknownCommand(name)) if name == "selfDestruct"
        ));
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(shortcut(&KeyChord::ctrl('s')), Some(EditorCommand::Save));
        assert_eq!(shortcut(&KeyChord::ctrl_alt('c')), Some(EditorCommand::ToggleComments));
        assert_eq!(shortcut(&KeyChord::ctrl_alt('M')), Some(EditorCommand::ToggleChat));
        assert_eq!(shortcut(&KeyChord::ctrl_alt('p')), Some(EditorCommand::AddPage));
        assert_eq!(
            shortcut(&KeyChord::ctrl('b')),
            Some(EditorCommand::Format(FormatCommand::Bold))
        );
        let cmd_i = KeyChord { key: 'i', meta: true, ..Default::default() };
        assert_eq!(shortcut(&cmd_i), Some(EditorCommand::Format(FormatCommand::Italic)));
    }

    #[test]
    fn test_unbound_chords() {
        assert_eq!(shortcut(&KeyChord { key: 's', ..Default::default() }), None);
        assert_eq!(shortcut(&KeyChord::ctrl('q')), None);
        assert_eq!(shortcut(&KeyChord::ctrl_alt('s')), None);
    }
}
