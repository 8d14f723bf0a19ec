use std::sync::Arc;
use std::time::Duration;

use egui::Rect;

use crate::canvas::Canvas;
use crate::command::{Command, CommandOutcome, CommandResult};
use crate::config::{DrawSettings, SETTINGS_KEY};
use crate::error::CommandError;
use crate::file_handler::FileHandler;
use crate::input::InputHandler;
use crate::notice::{self, NoticeBoard};
use crate::panels;
use crate::renderer::{LabelFont, Stage, SurfaceSize, register_label_font};
use crate::text::{InputToolsProvider, SuggestionLookup};
use crate::util::time::current_time_secs;

/// The host application: panels around a single drawing canvas.
///
/// Only [`DrawSettings`] survive a restart; the drawing itself does not.
pub struct DrawApp {
    settings: DrawSettings,
    /// `None` until the first frame lays out the canvas, or if the surface
    /// could not be created
    canvas: Option<Canvas<Stage>>,
    surface_failed: bool,
    input: InputHandler,
    notices: NoticeBoard,
    files: FileHandler,
    lookup: SuggestionLookup,
    /// Label face registered this frame; egui can use it from the next one
    pending_label_font: Option<LabelFont>,
    label_font: Option<LabelFont>,
}

impl DrawApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings: DrawSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, SETTINGS_KEY))
            .unwrap_or_default();
        // Suggestions arrive from another thread
        let ctx = cc.egui_ctx.clone();
        let lookup = SuggestionLookup::new(Arc::new(InputToolsProvider::new()))
            .with_notifier(move || ctx.request_repaint());
        Self::with_settings(settings, lookup)
    }

    pub fn with_settings(settings: DrawSettings, lookup: SuggestionLookup) -> Self {
        Self {
            settings: settings.sanitized(),
            canvas: None,
            surface_failed: false,
            input: InputHandler::new(Rect::NOTHING),
            notices: NoticeBoard::default(),
            files: FileHandler::new(),
            lookup,
            pending_label_font: None,
            label_font: None,
        }
    }

    pub fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    pub fn canvas(&self) -> Option<&Canvas<Stage>> {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut Canvas<Stage>> {
        self.canvas.as_mut()
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub(crate) fn label_font(&self) -> Option<&LabelFont> {
        self.label_font.as_ref()
    }

    pub(crate) fn input(&self) -> &InputHandler {
        &self.input
    }

    pub(crate) fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn can_undo(&self) -> bool {
        self.canvas.as_ref().is_some_and(|canvas| canvas.can_undo())
    }

    /// Create the surface on first layout, resize it afterwards
    pub(crate) fn ensure_canvas(&mut self, ctx: &egui::Context, rect: Rect) {
        let size = SurfaceSize::new(rect.width(), rect.height()).with_scale(ctx.pixels_per_point());
        if let Some(canvas) = &mut self.canvas {
            canvas.resize(size);
            return;
        }
        if self.surface_failed || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }

        match Stage::new(size) {
            Ok(stage) => {
                log::info!("canvas created at {}x{}", size.width, size.height);
                self.pending_label_font = register_label_font(ctx, stage.fonts(), &self.settings.font);
                self.canvas = Some(Canvas::new(stage, self.settings.clone(), self.lookup.clone()));
            }
            Err(err) => {
                log::error!("failed to create drawing surface: {err}");
                self.surface_failed = true;
                self.notices
                    .show(notice::SURFACE_FAILED, current_time_secs(), self.settings.notice_secs);
            }
        }
    }

    /// Run a command from the UI, reporting failures as notices
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::SelectTool(tool) => self.settings.tool = tool,
            Command::SelectColor(color) => self.settings.color = color,
            _ => {}
        }

        match self.run(command) {
            Ok(CommandOutcome::Done) => {}
            Ok(CommandOutcome::Exported(file)) => {
                if let Err(err) = self.files.save(&file) {
                    log::error!("{err}");
                    self.notify(notice::EXPORT_FAILED);
                }
            }
            Err(CommandError::NoCanvas) => {
                log::warn!("{command:?} ignored: no canvas");
            }
            Err(err) => {
                log::error!("{command:?} failed: {err}");
                self.notify(notice::EXPORT_FAILED);
            }
        }
    }

    fn run(&mut self, command: Command) -> CommandResult {
        let canvas = self.canvas.as_mut().ok_or(CommandError::NoCanvas)?;
        command.execute(canvas)
    }

    /// Change the transliteration language and remember it
    pub fn set_language(&mut self, language: &str) {
        self.settings.language = language.to_owned();
        if let Some(canvas) = &mut self.canvas {
            canvas.set_settings(self.settings.clone());
        }
    }

    fn notify(&mut self, message: &str) {
        self.notices
            .show(message, current_time_secs(), self.settings.notice_secs);
    }

    /// Keep frames coming while something animates on its own
    fn schedule_repaint(&self, ctx: &egui::Context) {
        let now = current_time_secs();
        if let Some(canvas) = &self.canvas {
            if canvas.surface().is_animating(now) {
                ctx.request_repaint();
            }
        }
        if let Some(notice) = self.notices.active(now) {
            ctx.request_repaint_after(Duration::from_secs_f64((notice.expires_at - now).max(0.0)));
        }
    }
}

impl eframe::App for DrawApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(font) = self.pending_label_font.take() {
            self.label_font = Some(font);
        }
        panels::top_bar(self, ctx);
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
        panels::text_editor(self, ctx);
        panels::notice_toast(self, ctx);
        self.schedule_repaint(ctx);
    }
}
