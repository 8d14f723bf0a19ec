use serde::{Deserialize, Serialize};

/// The drawing tools offered by the editor.
///
/// Selecting a tool only changes how future pointer gestures are interpreted;
/// it never touches objects already on the canvas.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    /// Freehand strokes built one segment per pointer move
    #[default]
    Brush,
    Rectangle,
    /// Circle sized by the drag distance from the anchor
    Ellipse,
    /// Isosceles triangle inscribed in the drag box
    Triangle,
    Line,
    /// Opens the text editor instead of starting a gesture
    Text,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Brush,
        Tool::Rectangle,
        Tool::Ellipse,
        Tool::Triangle,
        Tool::Line,
        Tool::Text,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Brush => "Brush",
            Tool::Rectangle => "Rectangle",
            Tool::Ellipse => "Ellipse",
            Tool::Triangle => "Triangle",
            Tool::Line => "Line",
            Tool::Text => "Text",
        }
    }

    /// Short label shown under the sidebar icon
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Brush => "Pen",
            Tool::Rectangle => "Box",
            Tool::Ellipse => "Oval",
            Tool::Triangle => "Delta",
            Tool::Line => "Path",
            Tool::Text => "Text",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tool::Brush => "🖋",
            Tool::Rectangle => "⬜",
            Tool::Ellipse => "⚪",
            Tool::Triangle => "📐",
            Tool::Line => "📏",
            Tool::Text => "🔤",
        }
    }

    /// Whether a pointer-down with this tool starts a drawing gesture
    pub fn starts_gesture(&self) -> bool {
        !matches!(self, Tool::Text)
    }
}
