use egui::{Color32, Pos2, Rect};
use image::RgbaImage;
use log::debug;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::{FontBook, StageNode, SurfaceSize};
use crate::element::{Shape, Style};
use crate::error::SurfaceError;

/// Rasterize stage nodes, bottom to top, onto an opaque white background.
pub fn rasterize(
    nodes: &[StageNode],
    size: SurfaceSize,
    fonts: &FontBook,
) -> Result<RgbaImage, SurfaceError> {
    size.validate()?;
    let (width, height) = size.pixel_size();
    let mut pixmap = Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = Transform::from_scale(size.scale, size.scale);
    for node in nodes {
        draw_shape(&mut pixmap, node.object.shape(), node.object.style(), transform, fonts);
    }
    debug!("rasterized {} nodes at {}x{}", nodes.len(), width, height);

    let mut data = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| SurfaceError::Rasterize("pixel buffer size mismatch".to_owned()))
}

fn paint_for(color: Color32) -> Paint<'static> {
    let mut paint = Paint::default();
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn stroke_for(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

fn draw_shape(pixmap: &mut Pixmap, shape: &Shape, style: &Style, transform: Transform, fonts: &FontBook) {
    match shape {
        Shape::Stroke { segments } => {
            let mut pb = PathBuilder::new();
            let mut pen: Option<Pos2> = None;
            for segment in segments {
                if pen != Some(segment.from) {
                    pb.move_to(segment.from.x, segment.from.y);
                }
                pb.line_to(segment.to.x, segment.to.y);
                pen = Some(segment.to);
            }
            if let Some(path) = pb.finish() {
                pixmap.stroke_path(&path, &paint_for(style.stroke_color()), &stroke_for(style.stroke_width), transform, None);
            }
        }
        Shape::Rect { origin, width, height } => {
            let rect = Rect::from_two_pos(*origin, *origin + egui::vec2(*width, *height));
            let Some(bounds) = tiny_skia::Rect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y) else {
                return;
            };
            fill_and_stroke(pixmap, PathBuilder::from_rect(bounds), style, transform);
        }
        Shape::Ellipse { center, radius_x, radius_y } => {
            let Some(bounds) = tiny_skia::Rect::from_xywh(
                center.x - radius_x,
                center.y - radius_y,
                radius_x * 2.0,
                radius_y * 2.0,
            ) else {
                return;
            };
            if let Some(path) = PathBuilder::from_oval(bounds) {
                fill_and_stroke(pixmap, path, style, transform);
            }
        }
        Shape::Polygon { vertices } => {
            let mut pb = PathBuilder::new();
            let mut points = vertices.iter();
            let Some(first) = points.next() else {
                return;
            };
            pb.move_to(first.x, first.y);
            for p in points {
                pb.line_to(p.x, p.y);
            }
            pb.close();
            if let Some(path) = pb.finish() {
                fill_and_stroke(pixmap, path, style, transform);
            }
        }
        Shape::LineSegment { from, to } => {
            let mut pb = PathBuilder::new();
            pb.move_to(from.x, from.y);
            pb.line_to(to.x, to.y);
            if let Some(path) = pb.finish() {
                pixmap.stroke_path(&path, &paint_for(style.stroke_color()), &stroke_for(style.stroke_width), transform, None);
            }
        }
        Shape::TextLabel { origin, content, font } => {
            if let Some(path) = fonts.outline_text(*origin, content, font) {
                pixmap.fill_path(&path, &paint_for(style.stroke_color()), FillRule::Winding, transform, None);
            }
        }
    }
}

fn fill_and_stroke(pixmap: &mut Pixmap, path: tiny_skia::Path, style: &Style, transform: Transform) {
    if let Some(fill) = style.fill_color() {
        pixmap.fill_path(&path, &paint_for(fill), FillRule::Winding, transform, None);
    }
    if style.stroke_width > 0.0 {
        pixmap.stroke_path(&path, &paint_for(style.stroke_color()), &stroke_for(style.stroke_width), transform, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{DrawableObject, factory};
    use crate::renderer::{RenderSurface, Stage};
    use egui::pos2;

    #[test]
    fn test_empty_stage_is_white() {
        let stage = Stage::new(SurfaceSize::new(20.0, 10.0)).unwrap();
        let image = stage.rasterize().unwrap();
        assert_eq!(image.dimensions(), (20, 10));
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_scale_multiplies_pixel_size() {
        let stage = Stage::new(SurfaceSize::new(20.0, 10.0).with_scale(2.0)).unwrap();
        let image = stage.rasterize().unwrap();
        assert_eq!(image.dimensions(), (40, 20));
    }

    #[test]
    fn test_reverse_rect_is_painted() {
        let mut stage = Stage::new(SurfaceSize::new(40.0, 40.0)).unwrap();
        let style = Style::new(Color32::from_rgb(255, 0, 0), 1.0, 0.0);
        let object: DrawableObject = factory::rect(style, pos2(30.0, 30.0), -20.0, -20.0);
        stage.attach(&object);

        let image = stage.rasterize().unwrap();
        assert_eq!(image.get_pixel(20, 20).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(2, 2).0, [255, 255, 255, 255]);
    }
}
