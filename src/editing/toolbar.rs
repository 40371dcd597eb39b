//! Toolbar state and the markup its buttons insert

use serde::Serialize;

use crate::editing::FormatCommand;

/// Font families offered by the toolbar
pub const FONT_FAMILIES: &[&str] = &[
    "Arial",
    "Calibri",
    "Cambria",
    "Comic Sans MS",
    "Courier New",
    "Georgia",
    "Helvetica",
    "Open Sans",
    "Roboto",
    "Times New Roman",
    "Trebuchet MS",
    "Verdana",
];

/// Font sizes offered by the toolbar, in points
pub const FONT_SIZES: &[&str] = &[
    "8", "9", "10", "11", "12", "14", "16", "18", "20", "24", "30", "36", "48", "60", "72",
];

const DEFAULT_FONT_SIZE: usize = 3; // "11"

/// Base of the links handed out by "Copy link"
pub const SHARE_LINK_BASE: &str = "https://docs.example.com/d/";

/// The toolbar's current font size, steppable through [`FONT_SIZES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSizeStepper {
    index: usize,
}

impl Default for FontSizeStepper {
    fn default() -> Self {
        Self {
            index: DEFAULT_FONT_SIZE,
        }
    }
}

impl FontSizeStepper {
    pub fn current(&self) -> &'static str {
        FONT_SIZES[self.index]
    }

    /// Pick a size from the list; sizes not offered are ignored
    pub fn select(&mut self, size: &str) -> Option<&'static str> {
        let index = FONT_SIZES.iter().position(|s| *s == size)?;
        self.index = index;
        Some(self.current())
    }

    /// Move `delta` entries through the list, clamped at both ends
    pub fn step(&mut self, delta: i32) -> &'static str {
        let last = FONT_SIZES.len() as i64 - 1;
        self.index = (self.index as i64 + delta as i64).clamp(0, last) as usize;
        self.current()
    }
}

/// On/off state of the toolbar's toggle buttons, plus whether anything
/// changed since the last completed save.
///
/// The four alignments are exclusive: turning one on turns the others off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveFormats {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike_through: bool,
    pub subscript: bool,
    pub superscript: bool,
    pub align_left: bool,
    pub align_center: bool,
    pub align_right: bool,
    pub align_justify: bool,
    saved: bool,
}

impl Default for ActiveFormats {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            strike_through: false,
            subscript: false,
            superscript: false,
            align_left: false,
            align_center: false,
            align_right: false,
            align_justify: false,
            saved: true,
        }
    }
}

impl ActiveFormats {
    /// Record a toolbar command. Toggle buttons flip; every command marks
    /// the document unsaved.
    pub fn apply(&mut self, command: &FormatCommand) {
        self.saved = false;
        let flag = match command {
            FormatCommand::Bold => &mut self.bold,
            FormatCommand::Italic => &mut self.italic,
            FormatCommand::Underline => &mut self.underline,
            FormatCommand::StrikeThrough => &mut self.strike_through,
            FormatCommand::Subscript => &mut self.subscript,
            FormatCommand::Superscript => &mut self.superscript,
            FormatCommand::JustifyLeft
            | FormatCommand::JustifyCenter
            | FormatCommand::JustifyRight
            | FormatCommand::JustifyFull => return self.toggle_alignment(command),
            _ => return,
        };
        *flag = !*flag;
    }

    fn toggle_alignment(&mut self, command: &FormatCommand) {
        let was = match command {
            FormatCommand::JustifyLeft => self.align_left,
            FormatCommand::JustifyCenter => self.align_center,
            FormatCommand::JustifyRight => self.align_right,
            _ => self.align_justify,
        };
        self.align_left = false;
        self.align_center = false;
        self.align_right = false;
        self.align_justify = false;
        match command {
            FormatCommand::JustifyLeft => self.align_left = !was,
            FormatCommand::JustifyCenter => self.align_center = !was,
            FormatCommand::JustifyRight => self.align_right = !was,
            _ => self.align_justify = !was,
        }
    }

    pub fn mark_unsaved(&mut self) {
        self.saved = false;
    }

    pub fn mark_saved(&mut self) {
        self.saved = true;
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }
}

/// Markup for an inserted table: one header row and `rows - 1` data rows.
/// Returns `None` when either dimension is zero.
pub fn table_markup(rows: usize, cols: usize) -> Option<String> {
    if rows == 0 || cols == 0 {
        return None;
    }

    let mut html = String::from("<table border=\"1\" style=\"width:100%; border-collapse: collapse;\">");
    html.push_str("<tr>");
    for col in 1..=cols {
        html.push_str(&format!(
            "<th style=\"border: 1px solid #dddddd; padding: 8px; text-align: left;\">Header {}</th>",
            col
        ));
    }
    html.push_str("</tr>");
    for row in 1..rows {
        html.push_str("<tr>");
        for col in 1..=cols {
            html.push_str(&format!(
                "<td style=\"border: 1px solid #dddddd; padding: 8px;\">Row {}, Col {}</td>",
                row, col
            ));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    Some(html)
}

/// Shareable link for a document
pub fn share_link(document_id: &str) -> String {
    format!("{}{}", SHARE_LINK_BASE, document_id)
}
