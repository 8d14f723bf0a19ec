mod common;

use common::canvas;
use egui::{Color32, pos2};
use shape_draw::{Command, CommandOutcome, RenderSurface, Tool};

fn draw_rect(canvas: &mut shape_draw::Canvas<shape_draw::Stage>, x: f32) {
    canvas.select_tool(Tool::Rectangle);
    canvas.pointer_down(pos2(x, 10.0));
    canvas.pointer_up(pos2(x + 20.0, 30.0));
}

#[test]
fn test_undo_on_empty_scene_is_noop() {
    let (mut canvas, _) = canvas();
    assert!(!canvas.can_undo());
    assert!(canvas.undo().is_none());
    assert!(canvas.scene().is_empty());
    assert_eq!(canvas.surface().display_count(), 0);
}

#[test]
fn test_commit_then_undo_restores_scene() {
    let (mut canvas, _) = canvas();
    draw_rect(&mut canvas, 10.0);
    let before = canvas.scene().len();

    draw_rect(&mut canvas, 50.0);
    let display = canvas.scene().entries()[1].display;
    assert!(canvas.surface().contains(display));

    let undone = canvas.undo().unwrap();
    assert_eq!(undone.shape().bounds().min, pos2(50.0, 10.0));
    assert_eq!(canvas.scene().len(), before);
    assert!(!canvas.surface().contains(display));
    assert_eq!(canvas.surface().display_count(), before);
}

#[test]
fn test_undo_removes_most_recent_first() {
    let (mut canvas, _) = canvas();
    draw_rect(&mut canvas, 10.0);
    draw_rect(&mut canvas, 50.0);
    draw_rect(&mut canvas, 90.0);

    let ids: Vec<_> = canvas.scene().objects().map(|o| o.id()).collect();
    assert_eq!(canvas.undo().map(|o| o.id()), Some(ids[2]));
    assert_eq!(canvas.undo().map(|o| o.id()), Some(ids[1]));

    let remaining: Vec<_> = canvas.scene().objects().map(|o| o.id()).collect();
    assert_eq!(remaining, vec![ids[0]]);
}

#[test]
fn test_scene_mirrors_surface_order() {
    let (mut canvas, _) = canvas();
    draw_rect(&mut canvas, 10.0);
    draw_rect(&mut canvas, 50.0);

    let scene: Vec<_> = canvas.scene().entries().iter().map(|e| e.display).collect();
    let stage: Vec<_> = canvas.surface().nodes().iter().map(|n| n.id).collect();
    assert_eq!(scene, stage);
}

#[test]
fn test_clear_is_idempotent() {
    let (mut canvas, _) = canvas();
    draw_rect(&mut canvas, 10.0);
    draw_rect(&mut canvas, 50.0);

    canvas.clear();
    assert!(canvas.scene().is_empty());
    assert_eq!(canvas.surface().display_count(), 0);

    canvas.clear();
    assert!(canvas.scene().is_empty());
    assert_eq!(canvas.surface().display_count(), 0);
    assert!(canvas.undo().is_none());
}

#[test]
fn test_commands_drive_the_canvas() {
    let (mut canvas, _) = canvas();

    let outcome = Command::SelectTool(Tool::Line).execute(&mut canvas).unwrap();
    assert_eq!(outcome, CommandOutcome::Done);
    Command::SelectColor(Color32::from_rgba_premultiplied(0, 0, 0, 4))
        .execute(&mut canvas)
        .unwrap();
    assert_eq!(canvas.tool(), Tool::Line);
    // Drawing colors are always opaque
    assert_eq!(canvas.color(), Color32::BLACK);

    canvas.pointer_down(pos2(0.0, 0.0));
    canvas.pointer_up(pos2(10.0, 10.0));
    assert_eq!(canvas.scene().len(), 1);

    Command::Undo.execute(&mut canvas).unwrap();
    assert!(canvas.scene().is_empty());

    // Undo with nothing left still succeeds
    assert_eq!(Command::Undo.execute(&mut canvas).unwrap(), CommandOutcome::Done);

    canvas.pointer_down(pos2(0.0, 0.0));
    canvas.pointer_up(pos2(10.0, 10.0));
    Command::Clear.execute(&mut canvas).unwrap();
    assert!(canvas.scene().is_empty());
}

#[test]
fn test_resize_keeps_content() {
    let (mut canvas, _) = canvas();
    draw_rect(&mut canvas, 10.0);
    let shape = canvas.scene().last().unwrap().shape().clone();

    let size = shape_draw::SurfaceSize::new(800.0, 600.0).with_scale(2.0);
    Command::Resize(size).execute(&mut canvas).unwrap();

    assert_eq!(canvas.surface().size(), size);
    assert_eq!(canvas.scene().last().unwrap().shape(), &shape);
}

#[test]
fn test_collapsed_layout_keeps_last_good_size() {
    let (mut canvas, _) = canvas();
    let before = canvas.surface().size();

    // A collapsed window reports the same empty size every frame
    for _ in 0..3 {
        canvas.resize(shape_draw::SurfaceSize::new(0.0, 0.0));
        assert_eq!(canvas.surface().size(), before);
    }

    let size = shape_draw::SurfaceSize::new(320.0, 200.0);
    canvas.resize(size);
    assert_eq!(canvas.surface().size(), size);
}
