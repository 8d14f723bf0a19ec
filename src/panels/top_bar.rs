use crate::DrawApp;
use crate::command::Command;
use crate::export::ExportFormat;

pub fn top_bar(app: &mut DrawApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Shape Draw");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Export SVG").clicked() {
                    app.execute(Command::Export(ExportFormat::VectorWrapped));
                }
                if ui.button("PNG").clicked() {
                    app.execute(Command::Export(ExportFormat::Raster));
                }
                if ui
                    .add_enabled(app.can_undo(), egui::Button::new("⟲ Undo"))
                    .clicked()
                {
                    app.execute(Command::Undo);
                }
            });
        });
    });
}
