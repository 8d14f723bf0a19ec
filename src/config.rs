use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::element::{FontSpec, Style};
use crate::tool::Tool;

/// Storage key used with `eframe::set_value` / `eframe::get_value`
pub const SETTINGS_KEY: &str = "shape_draw.settings";

/// What happens to the live shape when a gesture is cancelled
/// (for example the pointer is released outside the canvas).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelPolicy {
    /// Commit the shape as if the pointer had been released normally
    #[default]
    Commit,
    /// Drop the shape and remove it from the surface
    Discard,
}

/// User-tunable settings, persisted between sessions.
/// The drawing itself is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // new fields fall back to defaults when loading old settings
pub struct DrawSettings {
    pub tool: Tool,
    pub color: Color32,
    /// Fill opacity of closed shapes
    pub fill_alpha: f32,
    /// Outline width of rectangles, ellipses and triangles
    pub shape_stroke_width: f32,
    pub brush_width: f32,
    pub line_width: f32,
    pub font: FontSpec,
    /// Language tag used for transliteration suggestions
    pub language: String,
    /// File name stem for exports
    pub export_base_name: String,
    pub cancel_policy: CancelPolicy,
    /// How long notices stay on screen, in seconds
    pub notice_secs: f64,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            color: Color32::from_rgb(0x4f, 0x46, 0xe5),
            fill_alpha: 0.8,
            shape_stroke_width: 2.0,
            brush_width: 4.0,
            line_width: 6.0,
            font: FontSpec::default(),
            language: "hi".to_owned(),
            export_base_name: "drawing".to_owned(),
            cancel_policy: CancelPolicy::Commit,
            notice_secs: 4.0,
        }
    }
}

impl DrawSettings {
    /// Clamp values that may have been edited or corrupted in storage
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let width = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 { value } else { fallback }
        };

        self.fill_alpha = if self.fill_alpha.is_finite() {
            self.fill_alpha.clamp(0.0, 1.0)
        } else {
            defaults.fill_alpha
        };
        self.shape_stroke_width = width(self.shape_stroke_width, defaults.shape_stroke_width);
        self.brush_width = width(self.brush_width, defaults.brush_width);
        self.line_width = width(self.line_width, defaults.line_width);
        self.font.size = width(self.font.size, defaults.font.size);
        if self.font.family.trim().is_empty() {
            self.font.family = defaults.font.family;
        }
        if self.language.trim().is_empty() {
            self.language = defaults.language;
        }
        if self.export_base_name.trim().is_empty() {
            self.export_base_name = defaults.export_base_name;
        }
        if !self.notice_secs.is_finite() || self.notice_secs <= 0.0 {
            self.notice_secs = defaults.notice_secs;
        }
        self
    }

    /// The style a gesture with `tool` captures when it starts
    pub fn style_for(&self, tool: Tool, color: Color32) -> Style {
        match tool {
            Tool::Brush => Style::new(color, 0.0, self.brush_width),
            Tool::Line => Style::new(color, 0.0, self.line_width),
            Tool::Rectangle | Tool::Ellipse | Tool::Triangle => {
                Style::new(color, self.fill_alpha, self.shape_stroke_width)
            }
            Tool::Text => Style::new(color, 1.0, 0.0),
        }
    }
}
