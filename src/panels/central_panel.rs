use crate::DrawApp;
use crate::renderer::paint_stage;
use crate::util::time::current_time_secs;

pub fn central_panel(app: &mut DrawApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(egui::Color32::from_gray(235)))
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            app.ensure_canvas(ctx, canvas_rect);
            app.input_mut().set_canvas_rect(canvas_rect);

            let events = app.input_mut().process_input(ctx);
            let label_font = app.label_font().cloned();
            if let Some(canvas) = app.canvas_mut() {
                for event in events {
                    canvas.handle_event(event);
                }
                paint_stage(
                    &painter,
                    canvas_rect,
                    canvas.surface().nodes(),
                    current_time_secs(),
                    label_font.as_ref(),
                );
            }

            if response.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }
        });
}
