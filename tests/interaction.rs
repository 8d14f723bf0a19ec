mod common;

use common::{HEIGHT, WIDTH, canvas, canvas_with};
use egui::{Color32, pos2};
use shape_draw::{CancelPolicy, DrawSettings, InputEvent, RenderSurface, Shape, Tool};

#[test]
fn test_shape_preview_is_a_single_display_object() {
    let (mut canvas, _) = canvas();
    canvas.select_tool(Tool::Rectangle);

    canvas.pointer_down(pos2(10.0, 10.0));
    for i in 0..20 {
        canvas.pointer_move(pos2(20.0 + i as f32 * 5.0, 15.0 + i as f32 * 2.0));
        assert_eq!(canvas.surface().display_count(), 1);
    }
    assert!(canvas.state().is_drawing());
    assert!(canvas.scene().is_empty());

    canvas.pointer_up(pos2(110.0, 60.0));
    assert!(!canvas.state().is_drawing());
    assert_eq!(canvas.surface().display_count(), 1);
    assert_eq!(canvas.scene().len(), 1);
}

#[test]
fn test_rectangle_geometry_is_finalized_at_release() {
    let (mut canvas, _) = canvas();
    canvas.select_tool(Tool::Rectangle);

    canvas.pointer_down(pos2(10.0, 10.0));
    canvas.pointer_move(pos2(50.0, 50.0));
    canvas.pointer_up(pos2(110.0, 60.0));

    let committed = canvas.scene().last().unwrap();
    assert_eq!(
        committed.shape(),
        &Shape::Rect {
            origin: pos2(10.0, 10.0),
            width: 100.0,
            height: 50.0,
        }
    );

    // The surface shows the same geometry as the scene
    let display = canvas.scene().entries()[0].display;
    assert_eq!(canvas.surface().object(display), Some(committed));
}

#[test]
fn test_reverse_rectangle_drag_has_negative_extents() {
    let (mut canvas, _) = canvas();
    canvas.select_tool(Tool::Rectangle);

    canvas.pointer_down(pos2(110.0, 60.0));
    canvas.pointer_up(pos2(10.0, 10.0));

    assert_eq!(
        canvas.scene().last().unwrap().shape(),
        &Shape::Rect {
            origin: pos2(110.0, 60.0),
            width: -100.0,
            height: -50.0,
        }
    );
}

#[test]
fn test_ellipse_radius_follows_drag_distance() {
    let (mut canvas, _) = canvas();
    canvas.select_tool(Tool::Ellipse);

    canvas.pointer_down(pos2(0.0, 0.0));
    canvas.pointer_move(pos2(3.0, 4.0));
    canvas.pointer_up(pos2(3.0, 4.0));

    assert_eq!(
        canvas.scene().last().unwrap().shape(),
        &Shape::Ellipse {
            center: pos2(0.0, 0.0),
            radius_x: 5.0,
            radius_y: 5.0,
        }
    );
}

#[test]
fn test_brush_moves_produce_connected_segments() {
    let (mut canvas, _) = canvas();
    assert_eq!(canvas.tool(), Tool::Brush);

    let points = [pos2(10.0, 10.0), pos2(12.0, 15.0), pos2(20.0, 18.0), pos2(25.0, 30.0), pos2(40.0, 31.0)];
    canvas.pointer_down(pos2(5.0, 5.0));
    for point in points {
        canvas.pointer_move(point);
    }
    canvas.pointer_up(pos2(90.0, 90.0));

    let Shape::Stroke { segments } = canvas.scene().last().unwrap().shape() else {
        panic!("expected a brush stroke");
    };
    // Release does not add a segment
    assert_eq!(segments.len(), points.len());
    assert_eq!(segments[0].from, pos2(5.0, 5.0));
    for pair in segments.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
    }
    assert_eq!(segments.last().unwrap().to, pos2(40.0, 31.0));
}

#[test]
fn test_triangle_and_line_tools() {
    let (mut canvas, _) = canvas();

    canvas.select_tool(Tool::Triangle);
    canvas.pointer_down(pos2(0.0, 0.0));
    canvas.pointer_up(pos2(100.0, 50.0));

    canvas.select_tool(Tool::Line);
    canvas.pointer_down(pos2(10.0, 20.0));
    canvas.pointer_up(pos2(30.0, 40.0));

    let shapes: Vec<_> = canvas.scene().objects().map(|o| o.shape().clone()).collect();
    assert_eq!(
        shapes,
        vec![
            Shape::Polygon {
                vertices: vec![pos2(50.0, 0.0), pos2(0.0, 50.0), pos2(100.0, 50.0)],
            },
            Shape::LineSegment {
                from: pos2(10.0, 20.0),
                to: pos2(30.0, 40.0),
            },
        ]
    );
}

#[test]
fn test_tool_and_color_changes_apply_to_next_gesture() {
    let (mut canvas, _) = canvas();
    canvas.select_tool(Tool::Rectangle);
    canvas.select_color(Color32::RED);

    canvas.pointer_down(pos2(10.0, 10.0));
    canvas.select_tool(Tool::Line);
    canvas.select_color(Color32::GREEN);
    canvas.pointer_move(pos2(40.0, 40.0));
    canvas.pointer_up(pos2(50.0, 50.0));

    let first = canvas.scene().last().unwrap();
    assert_eq!(first.shape().kind(), "rect");
    assert_eq!(first.style().color, Color32::RED);

    canvas.pointer_down(pos2(10.0, 10.0));
    canvas.pointer_up(pos2(50.0, 50.0));
    let second = canvas.scene().last().unwrap();
    assert_eq!(second.shape().kind(), "line");
    assert_eq!(second.style().color, Color32::GREEN);
}

#[test]
fn test_events_that_do_not_apply_are_ignored() {
    let (mut canvas, _) = canvas();
    canvas.select_tool(Tool::Rectangle);

    canvas.pointer_move(pos2(10.0, 10.0));
    canvas.pointer_up(pos2(10.0, 10.0));
    canvas.pointer_cancel();
    assert_eq!(canvas.surface().display_count(), 0);
    assert!(canvas.scene().is_empty());

    canvas.pointer_down(pos2(10.0, 10.0));
    canvas.pointer_down(pos2(200.0, 200.0));
    assert_eq!(canvas.surface().display_count(), 1);
    canvas.pointer_up(pos2(20.0, 20.0));

    assert_eq!(
        canvas.scene().last().unwrap().shape(),
        &Shape::Rect {
            origin: pos2(10.0, 10.0),
            width: 10.0,
            height: 10.0,
        }
    );
}

#[test]
fn test_cancel_commits_by_default() {
    let (mut canvas, _) = canvas();
    canvas.select_tool(Tool::Line);

    canvas.pointer_down(pos2(10.0, 10.0));
    canvas.pointer_move(pos2(60.0, 30.0));
    canvas.pointer_cancel();

    assert!(!canvas.state().is_drawing());
    assert_eq!(
        canvas.scene().last().unwrap().shape(),
        &Shape::LineSegment {
            from: pos2(10.0, 10.0),
            to: pos2(60.0, 30.0),
        }
    );
}

#[test]
fn test_cancel_can_discard() {
    let settings = DrawSettings {
        cancel_policy: CancelPolicy::Discard,
        ..DrawSettings::default()
    };
    let (mut canvas, _) = canvas_with(settings);

    canvas.pointer_down(pos2(10.0, 10.0));
    canvas.pointer_move(pos2(60.0, 30.0));
    canvas.pointer_cancel();

    assert!(!canvas.state().is_drawing());
    assert!(canvas.scene().is_empty());
    assert_eq!(canvas.surface().display_count(), 0);
}

#[test]
fn test_positions_are_sanitized() {
    let (mut canvas, _) = canvas();
    canvas.select_tool(Tool::Line);

    canvas.pointer_down(pos2(f32::NAN, 10.0));
    assert!(!canvas.state().is_drawing());

    canvas.pointer_down(pos2(-20.0, 10.0));
    canvas.pointer_move(pos2(f32::INFINITY, 0.0));
    canvas.pointer_up(pos2(1000.0, -50.0));

    assert_eq!(
        canvas.scene().last().unwrap().shape(),
        &Shape::LineSegment {
            from: pos2(0.0, 10.0),
            to: pos2(WIDTH, 0.0),
        }
    );
}

#[test]
fn test_input_events_drive_the_canvas() {
    let (mut canvas, _) = canvas();
    canvas.select_tool(Tool::Rectangle);

    for event in [
        InputEvent::PointerDown { position: pos2(10.0, 10.0) },
        InputEvent::PointerMove { position: pos2(30.0, 30.0) },
        InputEvent::PointerUp { position: pos2(40.0, 50.0) },
    ] {
        canvas.handle_event(event);
    }

    assert_eq!(canvas.scene().len(), 1);
    assert_eq!(canvas.scene().last().unwrap().shape().bounds().max, pos2(40.0, 50.0));
}

#[test]
fn test_text_tool_opens_draft_without_gesture() {
    let (mut canvas, _) = canvas();
    canvas.select_tool(Tool::Text);

    canvas.pointer_down(pos2(WIDTH - 10.0, HEIGHT - 10.0));

    assert!(!canvas.state().is_drawing());
    assert_eq!(canvas.surface().display_count(), 0);
    let draft = canvas.text().draft().unwrap();
    assert_eq!(draft.anchor, pos2(WIDTH - 10.0, HEIGHT - 10.0));
    assert_eq!(draft.editor_pos, pos2(WIDTH - 340.0, HEIGHT - 200.0));
}

#[test]
fn test_clear_ends_gesture_in_progress() {
    let (mut canvas, _) = canvas();
    canvas.select_tool(Tool::Rectangle);
    canvas.pointer_down(pos2(10.0, 10.0));
    canvas.pointer_move(pos2(50.0, 50.0));

    canvas.clear();

    assert!(!canvas.state().is_drawing());
    assert_eq!(canvas.surface().display_count(), 0);

    // The release of the cleared gesture commits nothing
    canvas.pointer_up(pos2(60.0, 60.0));
    assert!(canvas.scene().is_empty());
}
