use egui::Pos2;

use crate::element::{DrawableObject, Style};
use crate::renderer::DisplayId;
use crate::tool::Tool;

/// A gesture in progress.
///
/// `tool` and `style` are fixed when the gesture starts; selecting another
/// tool or color mid-gesture only affects the next one.
#[derive(Debug, Clone)]
pub struct InteractionSession {
    pub tool: Tool,
    pub style: Style,
    /// Drag start for shape tools; for the brush, the previous pointer position
    pub anchor: Pos2,
    /// Last pointer position seen during this gesture
    pub last_position: Pos2,
    /// The uncommitted object, also shown on the surface as `display`
    pub live: DrawableObject,
    pub display: DisplayId,
}

#[derive(Debug, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Drawing(InteractionSession),
}

impl EditorState {
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing(_))
    }

    pub fn session_mut(&mut self) -> Option<&mut InteractionSession> {
        match self {
            Self::Drawing(session) => Some(session),
            Self::Idle => None,
        }
    }

    /// End the current gesture, returning its session
    pub fn take_session(&mut self) -> Option<InteractionSession> {
        match std::mem::take(self) {
            Self::Drawing(session) => Some(session),
            Self::Idle => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing(_) => "Drawing",
        }
    }
}
