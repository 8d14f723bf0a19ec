use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::DrawApp;
use crate::command::Command;
use crate::components::ToolButton;
use crate::tool::Tool;

pub fn tools_panel(app: &mut DrawApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .exact_width(72.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                let active = app.settings().tool;
                for tool in Tool::ALL {
                    if ToolButton::new(tool, tool == active).show(ui).clicked() {
                        log::info!("Tool selected from UI: {}", tool.name());
                        app.execute(Command::SelectTool(tool));
                    }
                    ui.add_space(4.0);
                }

                ui.separator();

                let mut color = app.settings().color;
                if color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                    app.execute(Command::SelectColor(color));
                }

                ui.separator();

                if ui
                    .button(egui::RichText::new("🗑").size(20.0))
                    .on_hover_text("Clear canvas")
                    .clicked()
                {
                    app.execute(Command::Clear);
                }
            });
        });
}
