use egui::{
    Align2, Color32, FontData, FontDefinitions, FontFamily, FontId, Painter, Pos2, Rect, Shape as EguiShape,
    Stroke as EguiStroke, Vec2,
};
use log::info;

use super::{FontBook, StageNode};
use crate::element::{FontSpec, Shape, Style};

const LABEL_FONT_KEY: &str = "label";

/// The system face used for text labels, registered with egui under its own
/// family so the live view matches the raster.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFont {
    family_name: String,
    bold: bool,
    family: FontFamily,
}

/// Load the face `FontBook` would rasterize `spec` with into egui.
///
/// The family can be used from the next frame on. Returns `None` when no
/// system face matches, in which case labels use egui's proportional font.
pub fn register_label_font(ctx: &egui::Context, fonts: &FontBook, spec: &FontSpec) -> Option<LabelFont> {
    let (bytes, index) = fonts.face_data(spec)?;
    let mut data = FontData::from_owned(bytes);
    data.index = index;

    let mut definitions = FontDefinitions::default();
    definitions.font_data.insert(LABEL_FONT_KEY.to_owned(), data.into());
    let family = FontFamily::Name(LABEL_FONT_KEY.into());
    let mut chain = vec![LABEL_FONT_KEY.to_owned()];
    // Glyphs the face lacks fall back to the bundled fonts
    chain.extend(
        definitions
            .families
            .get(&FontFamily::Proportional)
            .cloned()
            .unwrap_or_default(),
    );
    definitions.families.insert(family.clone(), chain);
    ctx.set_fonts(definitions);

    info!("text labels use the system face for '{}'", spec.family);
    Some(LabelFont {
        family_name: spec.family.clone(),
        bold: spec.bold,
        family,
    })
}

/// Font id for a label drawn with `font`: the registered face when it was
/// loaded for the same family and weight, egui's proportional font otherwise
pub fn label_font_id(font: &FontSpec, registered: Option<&LabelFont>) -> FontId {
    match registered {
        Some(label) if label.family_name == font.family && label.bold == font.bold => {
            FontId::new(font.size, label.family.clone())
        }
        _ => FontId::proportional(font.size),
    }
}

/// Paints the stage into `canvas_rect`, translating canvas-local
/// coordinates to screen space. `now` drives fade-in animations.
pub fn paint_stage(
    painter: &Painter,
    canvas_rect: Rect,
    nodes: &[StageNode],
    now: f64,
    label_font: Option<&LabelFont>,
) {
    painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);
    let offset = canvas_rect.min.to_vec2();
    let painter = painter.with_clip_rect(canvas_rect);

    for node in nodes {
        let alpha = node.alpha_at(now);
        paint_shape(&painter, node.object.shape(), node.object.style(), offset, alpha, label_font);
    }
}

fn paint_shape(
    painter: &Painter,
    shape: &Shape,
    style: &Style,
    offset: Vec2,
    alpha: f32,
    label_font: Option<&LabelFont>,
) {
    let stroke_color = style.stroke_color().gamma_multiply(alpha);
    let stroke = EguiStroke::new(style.stroke_width, stroke_color);
    let fill = style
        .fill_color()
        .map(|c| c.gamma_multiply(alpha))
        .unwrap_or(Color32::TRANSPARENT);
    let at = |p: Pos2| p + offset;

    match shape {
        Shape::Stroke { segments } => {
            for segment in segments {
                painter.line_segment([at(segment.from), at(segment.to)], stroke);
            }
        }
        Shape::Rect { origin, width, height } => {
            let rect = Rect::from_two_pos(at(*origin), at(*origin) + egui::vec2(*width, *height));
            painter.rect(rect, 0.0, fill, stroke);
        }
        Shape::Ellipse { center, radius_x, radius_y } => {
            if radius_x == radius_y {
                painter.circle(at(*center), *radius_x, fill, stroke);
            } else {
                painter.add(EguiShape::ellipse_filled(at(*center), egui::vec2(*radius_x, *radius_y), fill));
                painter.add(EguiShape::ellipse_stroke(at(*center), egui::vec2(*radius_x, *radius_y), stroke));
            }
        }
        Shape::Polygon { vertices } => {
            let points: Vec<Pos2> = vertices.iter().map(|p| at(*p)).collect();
            painter.add(EguiShape::convex_polygon(points, fill, stroke));
        }
        Shape::LineSegment { from, to } => {
            painter.line_segment([at(*from), at(*to)], stroke);
        }
        Shape::TextLabel { origin, content, font } => {
            painter.text(
                at(*origin),
                Align2::LEFT_TOP,
                content,
                label_font_id(font, label_font),
                stroke_color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(family_name: &str, bold: bool) -> LabelFont {
        LabelFont {
            family_name: family_name.to_owned(),
            bold,
            family: FontFamily::Name(LABEL_FONT_KEY.into()),
        }
    }

    #[test]
    fn test_label_font_uses_registered_face() {
        let spec = FontSpec::default();
        let registered = label(&spec.family, spec.bold);
        let id = label_font_id(&spec, Some(&registered));
        assert_eq!(id.family, FontFamily::Name(LABEL_FONT_KEY.into()));
        assert_eq!(id.size, spec.size);
    }

    #[test]
    fn test_label_font_falls_back_to_proportional() {
        let spec = FontSpec::default();
        assert_eq!(label_font_id(&spec, None), FontId::proportional(spec.size));

        let other_weight = label(&spec.family, !spec.bold);
        assert_eq!(label_font_id(&spec, Some(&other_weight)), FontId::proportional(spec.size));

        let other_family = label("Courier", spec.bold);
        assert_eq!(label_font_id(&spec, Some(&other_family)), FontId::proportional(spec.size));
    }
}
