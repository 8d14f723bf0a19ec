//! Pure shape geometry: maps a drag from `anchor` to `current` onto the
//! parameters of the primitive each tool draws.

use egui::{Pos2, pos2};

use crate::element::{Segment, Shape};
use crate::tool::Tool;

/// Geometry for a drag gesture with a shape tool.
///
/// Returns `None` for tools that are not previewed from a fixed anchor:
/// the brush grows segment by segment (see [`brush_segment`]) and the text
/// tool never enters a gesture.
pub fn shape_for_drag(tool: Tool, anchor: Pos2, current: Pos2) -> Option<Shape> {
    match tool {
        Tool::Rectangle => Some(rectangle(anchor, current)),
        Tool::Ellipse => Some(ellipse(anchor, current)),
        Tool::Triangle => Some(triangle(anchor, current)),
        Tool::Line => Some(line(anchor, current)),
        Tool::Brush | Tool::Text => None,
    }
}

/// The shape a gesture starts with before the pointer has moved.
pub fn empty_shape(tool: Tool, anchor: Pos2) -> Option<Shape> {
    match tool {
        Tool::Brush => Some(Shape::Stroke {
            segments: Vec::new(),
        }),
        Tool::Text => None,
        _ => shape_for_drag(tool, anchor, anchor),
    }
}

/// Signed rectangle anchored at the drag start
pub fn rectangle(anchor: Pos2, current: Pos2) -> Shape {
    Shape::Rect {
        origin: anchor,
        width: current.x - anchor.x,
        height: current.y - anchor.y,
    }
}

/// Circle centered on the anchor with radius equal to the drag distance
pub fn ellipse(anchor: Pos2, current: Pos2) -> Shape {
    let radius = anchor.distance(current);
    Shape::Ellipse {
        center: anchor,
        radius_x: radius,
        radius_y: radius,
    }
}

/// Isosceles triangle inscribed in the drag box: apex at the top-center,
/// base along the far edge
pub fn triangle(anchor: Pos2, current: Pos2) -> Shape {
    let w = current.x - anchor.x;
    let h = current.y - anchor.y;
    Shape::Polygon {
        vertices: vec![
            pos2(anchor.x + w / 2.0, anchor.y),
            pos2(anchor.x, anchor.y + h),
            pos2(anchor.x + w, anchor.y + h),
        ],
    }
}

pub fn line(anchor: Pos2, current: Pos2) -> Shape {
    Shape::LineSegment {
        from: anchor,
        to: current,
    }
}

/// Next brush segment. The caller advances its anchor to `current` afterwards.
pub fn brush_segment(previous: Pos2, current: Pos2) -> Segment {
    Segment::new(previous, current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_forward_drag() {
        let shape = rectangle(pos2(10.0, 10.0), pos2(110.0, 60.0));
        assert_eq!(
            shape,
            Shape::Rect {
                origin: pos2(10.0, 10.0),
                width: 100.0,
                height: 50.0,
            }
        );
    }

    #[test]
    fn test_rectangle_reverse_drag_keeps_sign() {
        let shape = rectangle(pos2(110.0, 60.0), pos2(10.0, 10.0));
        assert_eq!(
            shape,
            Shape::Rect {
                origin: pos2(110.0, 60.0),
                width: -100.0,
                height: -50.0,
            }
        );
    }

    #[test]
    fn test_ellipse_radius_is_drag_distance() {
        match ellipse(pos2(0.0, 0.0), pos2(3.0, 4.0)) {
            Shape::Ellipse { center, radius_x, radius_y } => {
                assert_eq!(center, pos2(0.0, 0.0));
                assert_eq!(radius_x, 5.0);
                assert_eq!(radius_y, 5.0);
            }
            other => panic!("expected ellipse, got {other:?}"),
        }
    }

    #[test]
    fn test_triangle_vertices() {
        let shape = triangle(pos2(0.0, 0.0), pos2(100.0, 50.0));
        assert_eq!(
            shape,
            Shape::Polygon {
                vertices: vec![pos2(50.0, 0.0), pos2(0.0, 50.0), pos2(100.0, 50.0)],
            }
        );
    }

    #[test]
    fn test_brush_and_text_have_no_drag_shape() {
        let a = pos2(1.0, 2.0);
        let b = pos2(3.0, 4.0);
        assert!(shape_for_drag(Tool::Brush, a, b).is_none());
        assert!(shape_for_drag(Tool::Text, a, b).is_none());
        assert_eq!(shape_for_drag(Tool::Line, a, b), Some(line(a, b)));
    }

    #[test]
    fn test_empty_shapes() {
        let a = pos2(5.0, 5.0);
        assert_eq!(
            empty_shape(Tool::Brush, a),
            Some(Shape::Stroke { segments: vec![] })
        );
        assert_eq!(empty_shape(Tool::Rectangle, a), Some(rectangle(a, a)));
        assert!(empty_shape(Tool::Text, a).is_none());
    }
}
