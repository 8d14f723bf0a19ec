use crate::DrawApp;
use crate::util::time::current_time_secs;

pub fn notice_toast(app: &DrawApp, ctx: &egui::Context) {
    let Some(notice) = app.notices().active(current_time_secs()) else {
        return;
    };

    egui::Area::new(egui::Id::new("notice_toast"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(egui::Color32::from_rgb(220, 38, 38))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(&notice.message)
                            .color(egui::Color32::WHITE)
                            .strong(),
                    );
                });
        });
}
