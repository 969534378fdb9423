//! Page document model for graphical printer contexts
//!
//! A [`PageDoc`] is the rendered form of a ticket for driver-based
//! printing: an ordered list of text lines, each tagged with the font to
//! draw it in. A graphical transport walks the lines top to bottom with a
//! vertical cursor that advances by a fixed per-font increment.

use serde::{Deserialize, Serialize};

/// Font selection for a page line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontKind {
    /// Large bold font (title, total)
    Title,
    /// Regular body font
    Normal,
}

impl FontKind {
    /// Vertical cursor advance after a line in this font, in device units
    pub fn line_advance(&self) -> i32 {
        match self {
            FontKind::Title => 80,
            FontKind::Normal => 50,
        }
    }
}

/// One text line of a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLine {
    pub text: String,
    pub font: FontKind,
}

/// A full ticket page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageDoc {
    pub lines: Vec<PageLine>,
}

impl PageDoc {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a line in the given font
    pub fn push(&mut self, font: FontKind, text: impl Into<String>) {
        self.lines.push(PageLine {
            text: text.into(),
            font,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
