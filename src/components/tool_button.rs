use eframe::egui;

use crate::tool::Tool;

/// Square sidebar button showing a tool's icon above its short label
pub struct ToolButton {
    pub tool: Tool,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(tool: Tool, selected: bool) -> Self {
        Self { tool, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(52.0, 52.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_rgb(79, 70, 229) // Indigo when selected
            } else if response.hovered() {
                egui::Color32::from_gray(60)
            } else {
                egui::Color32::from_gray(40)
            };
            let text_color = if self.selected {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_gray(200)
            };

            ui.painter().rect_filled(rect, 8.0, bg_color);
            ui.painter().text(
                rect.center() - egui::vec2(0.0, 7.0),
                egui::Align2::CENTER_CENTER,
                self.tool.icon(),
                egui::FontId::proportional(20.0),
                text_color,
            );
            ui.painter().text(
                rect.center_bottom() - egui::vec2(0.0, 8.0),
                egui::Align2::CENTER_CENTER,
                self.tool.label(),
                egui::FontId::proportional(10.0),
                text_color,
            );
        }

        response.on_hover_text(self.tool.name())
    }
}
