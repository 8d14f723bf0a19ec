use crate::DrawApp;
use crate::text::{LANGUAGES, label_for};

/// What the user did in the editor this frame
enum EditorAction {
    None,
    Edited(String),
    Suggestion(String),
    Language(&'static str),
    Confirm,
    Cancel,
}

/// Floating editor for an open text draft, with transliteration suggestions
pub fn text_editor(app: &mut DrawApp, ctx: &egui::Context) {
    let origin = app.input().canvas_rect().min.to_vec2();
    let Some(canvas) = app.canvas() else {
        return;
    };
    let Some(draft) = canvas.text().draft() else {
        return;
    };

    let mut text = draft.text.clone();
    let position = draft.editor_pos + origin;
    let language = canvas.text().language().to_owned();
    let suggestions = canvas.text().suggestions();
    let mut action = EditorAction::None;

    egui::Window::new("Add text")
        .id(egui::Id::new("text_editor"))
        .fixed_pos(position)
        .fixed_size(egui::vec2(300.0, 160.0))
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Language");
                egui::ComboBox::from_id_salt("language")
                    .selected_text(label_for(&language))
                    .show_ui(ui, |ui| {
                        for lang in LANGUAGES {
                            if ui.selectable_label(lang.tag == language, lang.label).clicked() {
                                action = EditorAction::Language(lang.tag);
                            }
                        }
                    });
            });

            let response = ui.add(
                egui::TextEdit::multiline(&mut text)
                    .hint_text("Type in English...")
                    .desired_rows(2)
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                action = EditorAction::Edited(text.clone());
            }

            if !suggestions.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    for suggestion in &suggestions {
                        if ui.button(suggestion.as_str()).clicked() {
                            action = EditorAction::Suggestion(suggestion.clone());
                        }
                    }
                });
            }

            ui.horizontal(|ui| {
                if ui.button("Add").clicked() {
                    action = EditorAction::Confirm;
                }
                if ui.button("Cancel").clicked() {
                    action = EditorAction::Cancel;
                }
            });
        });

    match action {
        EditorAction::None => {}
        EditorAction::Language(tag) => app.set_language(tag),
        EditorAction::Edited(text) => {
            if let Some(canvas) = app.canvas_mut() {
                canvas.text_mut().text_changed(text);
            }
        }
        EditorAction::Suggestion(suggestion) => {
            if let Some(canvas) = app.canvas_mut() {
                canvas.text_mut().apply_suggestion(&suggestion);
            }
        }
        EditorAction::Confirm => {
            if let Some(canvas) = app.canvas_mut() {
                canvas.confirm_text();
            }
        }
        EditorAction::Cancel => {
            if let Some(canvas) = app.canvas_mut() {
                canvas.cancel_text();
            }
        }
    }
}
