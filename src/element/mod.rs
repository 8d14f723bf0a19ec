use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod common;

pub use common::{Segment, calculate_bounds};

/// Stable identity of a drawable object, independent of its position in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Paint parameters captured when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Opaque 24-bit color
    pub color: Color32,
    /// Fill opacity in `0.0..=1.0`; zero means outline only
    pub fill_alpha: f32,
    pub stroke_width: f32,
}

impl Style {
    pub fn new(color: Color32, fill_alpha: f32, stroke_width: f32) -> Self {
        let [r, g, b, _] = color.to_srgba_unmultiplied();
        Self {
            color: Color32::from_rgb(r, g, b),
            fill_alpha: fill_alpha.clamp(0.0, 1.0),
            stroke_width: stroke_width.max(0.0),
        }
    }

    pub fn stroke_color(&self) -> Color32 {
        self.color
    }

    /// The fill color, or `None` when the style has no fill
    pub fn fill_color(&self) -> Option<Color32> {
        if self.fill_alpha <= 0.0 {
            return None;
        }
        let [r, g, b, _] = self.color.to_array();
        let alpha = (self.fill_alpha * 255.0).round() as u8;
        Some(Color32::from_rgba_unmultiplied(r, g, b, alpha))
    }
}

/// Font used for text labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub bold: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Arial".to_owned(),
            size: 24.0,
            bold: true,
        }
    }
}

/// Geometry of a drawable object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Freehand brush stroke; each pointer move contributes one segment
    Stroke { segments: Vec<Segment> },
    /// Width and height are signed; negative extents flip the rectangle
    Rect { origin: Pos2, width: f32, height: f32 },
    Ellipse { center: Pos2, radius_x: f32, radius_y: f32 },
    Polygon { vertices: Vec<Pos2> },
    LineSegment { from: Pos2, to: Pos2 },
    TextLabel { origin: Pos2, content: String, font: FontSpec },
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Stroke { .. } => "stroke",
            Shape::Rect { .. } => "rect",
            Shape::Ellipse { .. } => "ellipse",
            Shape::Polygon { .. } => "polygon",
            Shape::LineSegment { .. } => "line",
            Shape::TextLabel { .. } => "text",
        }
    }

    /// Axis-aligned bounds of the geometry, `Rect::NOTHING` when empty.
    ///
    /// Text bounds are estimated from the font size since glyph metrics
    /// belong to the renderer.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Stroke { segments } => {
                let points: Vec<Pos2> = segments.iter().flat_map(|s| [s.from, s.to]).collect();
                calculate_bounds(&points, 0.0)
            }
            Shape::Rect { origin, width, height } => {
                Rect::from_two_pos(*origin, *origin + egui::vec2(*width, *height))
            }
            Shape::Ellipse { center, radius_x, radius_y } => {
                Rect::from_center_size(*center, egui::vec2(radius_x * 2.0, radius_y * 2.0))
            }
            Shape::Polygon { vertices } => calculate_bounds(vertices, 0.0),
            Shape::LineSegment { from, to } => Rect::from_two_pos(*from, *to),
            Shape::TextLabel { origin, content, font } => {
                let lines = content.lines().count().max(1) as f32;
                let longest = content.lines().map(|l| l.chars().count()).max().unwrap_or(0) as f32;
                Rect::from_min_size(
                    *origin,
                    egui::vec2(longest * font.size * 0.6, lines * font.size * 1.2),
                )
            }
        }
    }
}

/// A shape together with its identity and style.
///
/// Committed objects are owned by the scene and never change again; the only
/// way to get rid of one is undo or clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawableObject {
    id: ObjectId,
    style: Style,
    shape: Shape,
}

impl DrawableObject {
    pub fn new(style: Style, shape: Shape) -> Self {
        Self {
            id: ObjectId::new(),
            style,
            shape,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Replace the geometry of an uncommitted object
    pub(crate) fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    /// Append a segment to a brush stroke. Returns false for other shapes.
    pub(crate) fn push_segment(&mut self, segment: Segment) -> bool {
        match &mut self.shape {
            Shape::Stroke { segments } => {
                segments.push(segment);
                true
            }
            _ => false,
        }
    }
}

/// Factory functions for creating objects
pub mod factory {
    use super::*;

    pub fn stroke(style: Style, segments: Vec<Segment>) -> DrawableObject {
        DrawableObject::new(style, Shape::Stroke { segments })
    }

    pub fn rect(style: Style, origin: Pos2, width: f32, height: f32) -> DrawableObject {
        DrawableObject::new(style, Shape::Rect { origin, width, height })
    }

    pub fn circle(style: Style, center: Pos2, radius: f32) -> DrawableObject {
        DrawableObject::new(
            style,
            Shape::Ellipse {
                center,
                radius_x: radius,
                radius_y: radius,
            },
        )
    }

    pub fn text(color: Color32, origin: Pos2, content: String, font: FontSpec) -> DrawableObject {
        DrawableObject::new(
            Style::new(color, 1.0, 0.0),
            Shape::TextLabel { origin, content, font },
        )
    }
}
