//! The drawing interaction engine.
//!
//! [`Canvas`] owns the render surface, the scene and the gesture state, and
//! turns pointer events plus the current tool and color into committed
//! objects.

use egui::{Color32, Pos2, pos2};
use log::{debug, info, warn};

use crate::config::{CancelPolicy, DrawSettings};
use crate::element::{DrawableObject, ObjectId};
use crate::error::ExportError;
use crate::export::{ExportFormat, ExportedFile, Exporter};
use crate::geometry;
use crate::input::InputEvent;
use crate::renderer::{RenderSurface, SurfaceSize};
use crate::scene::Scene;
use crate::state::{EditorState, InteractionSession};
use crate::text::{SuggestionLookup, TextBridge};
use crate::tool::Tool;

pub struct Canvas<S: RenderSurface> {
    surface: S,
    scene: Scene,
    state: EditorState,
    tool: Tool,
    color: Color32,
    settings: DrawSettings,
    text: TextBridge,
    exporter: Exporter,
    /// Last size asked for by the host, valid or not
    requested_size: SurfaceSize,
}

impl<S: RenderSurface + std::fmt::Debug> std::fmt::Debug for Canvas<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("surface", &self.surface)
            .field("scene", &self.scene)
            .field("state", &self.state.name())
            .field("tool", &self.tool)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

impl<S: RenderSurface> Canvas<S> {
    pub fn new(surface: S, settings: DrawSettings, lookup: SuggestionLookup) -> Self {
        let settings = settings.sanitized();
        let [r, g, b, _] = settings.color.to_srgba_unmultiplied();
        Self {
            scene: Scene::new(),
            state: EditorState::Idle,
            tool: settings.tool,
            color: Color32::from_rgb(r, g, b),
            text: TextBridge::new(lookup, settings.language.clone(), settings.font.clone()),
            exporter: Exporter::new(settings.export_base_name.clone()),
            requested_size: surface.size(),
            settings,
            surface,
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { position } => self.pointer_down(position),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp { position } => self.pointer_up(position),
            InputEvent::PointerCancel => self.pointer_cancel(),
        }
    }

    /// Drop non-finite positions and clamp the rest into the surface
    fn sanitize(&self, position: Pos2) -> Option<Pos2> {
        if !position.x.is_finite() || !position.y.is_finite() {
            warn!("ignoring non-finite pointer position {position:?}");
            return None;
        }
        let size = self.surface.size();
        Some(pos2(
            position.x.clamp(0.0, size.width.max(0.0)),
            position.y.clamp(0.0, size.height.max(0.0)),
        ))
    }

    pub fn pointer_down(&mut self, position: Pos2) {
        if self.state.is_drawing() {
            debug!("pointer down ignored while drawing");
            return;
        }
        let Some(anchor) = self.sanitize(position) else {
            return;
        };

        let tool = self.tool;
        if !tool.starts_gesture() {
            let size = self.surface.size();
            self.text.open(anchor, self.color, size.width, size.height);
            debug!("text draft opened at {anchor:?}");
            return;
        }

        let style = self.settings.style_for(tool, self.color);
        let Some(shape) = geometry::empty_shape(tool, anchor) else {
            return;
        };
        let live = DrawableObject::new(style, shape);
        let display = self.surface.attach(&live);
        debug!("{} gesture started at {anchor:?}", tool.name());

        self.state = EditorState::Drawing(InteractionSession {
            tool,
            style,
            anchor,
            last_position: anchor,
            live,
            display,
        });
    }

    pub fn pointer_move(&mut self, position: Pos2) {
        let Some(position) = self.sanitize(position) else {
            return;
        };
        let Some(session) = self.state.session_mut() else {
            return;
        };
        session.last_position = position;

        if session.tool == Tool::Brush {
            let segment = geometry::brush_segment(session.anchor, position);
            if session.live.push_segment(segment) {
                self.surface.extend_stroke(session.display, segment);
            }
            session.anchor = position;
        } else if let Some(shape) = geometry::shape_for_drag(session.tool, session.anchor, position) {
            session.live.set_shape(shape);
            self.surface.redraw(session.display, &session.live);
        }
    }

    pub fn pointer_up(&mut self, position: Pos2) {
        if !self.state.is_drawing() {
            return;
        }
        // A release with a garbage position still ends the gesture where it last was
        let position = self.sanitize(position);
        let Some(mut session) = self.state.take_session() else {
            return;
        };
        if let Some(position) = position {
            Self::finalize(&mut self.surface, &mut session, position);
        }
        self.commit_session(session);
    }

    pub fn pointer_cancel(&mut self) {
        let Some(session) = self.state.take_session() else {
            return;
        };
        match self.settings.cancel_policy {
            CancelPolicy::Commit => {
                debug!("{} gesture cancelled, committing", session.tool.name());
                self.commit_session(session);
            }
            CancelPolicy::Discard => {
                debug!("{} gesture cancelled, discarding", session.tool.name());
                self.surface.detach(session.display);
            }
        }
    }

    /// Settle shape geometry at the release position; brush strokes are
    /// left as they are
    fn finalize(surface: &mut S, session: &mut InteractionSession, position: Pos2) {
        session.last_position = position;
        if let Some(shape) = geometry::shape_for_drag(session.tool, session.anchor, position) {
            session.live.set_shape(shape);
            surface.redraw(session.display, &session.live);
        }
    }

    fn commit_session(&mut self, session: InteractionSession) {
        self.surface.fade_in(session.display);
        self.scene.commit(session.display, session.live);
    }

    /// Attach and commit a finished object, e.g. a confirmed text label.
    ///
    /// A gesture still in progress is committed first, so the new object
    /// lands on top in both the scene and the surface.
    pub fn commit_object(&mut self, object: DrawableObject) -> ObjectId {
        if let Some(session) = self.state.take_session() {
            debug!("{} gesture ended by an object commit", session.tool.name());
            self.commit_session(session);
        }
        let id = object.id();
        let display = self.surface.attach(&object);
        self.surface.fade_in(display);
        self.scene.commit(display, object);
        id
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            debug!("tool {} -> {}", self.tool.name(), tool.name());
            self.tool = tool;
        }
    }

    /// Alpha is ignored; drawing colors are opaque
    pub fn select_color(&mut self, color: Color32) {
        let [r, g, b, _] = color.to_srgba_unmultiplied();
        self.color = Color32::from_rgb(r, g, b);
    }

    /// Remove the most recently committed object
    pub fn undo(&mut self) -> Option<DrawableObject> {
        self.scene.undo(&mut self.surface)
    }

    pub fn can_undo(&self) -> bool {
        !self.scene.is_empty()
    }

    /// Remove everything, including an unfinished gesture
    pub fn clear(&mut self) {
        if let Some(session) = self.state.take_session() {
            debug!("{} gesture ended by clear", session.tool.name());
        }
        self.scene.clear(&mut self.surface);
    }

    /// Resize the surface without rescaling its content. Sizes the surface
    /// cannot take are ignored, and reported once per change.
    pub fn resize(&mut self, size: SurfaceSize) {
        if size == self.requested_size {
            return;
        }
        self.requested_size = size;
        if let Err(err) = size.validate() {
            warn!("keeping surface size: {err}");
            return;
        }
        if size != self.surface.size() {
            info!("resizing surface to {}x{} @{}", size.width, size.height, size.scale);
            self.surface.resize(size);
        }
    }

    pub fn export(&self, format: ExportFormat) -> Result<ExportedFile, ExportError> {
        self.exporter.export(&self.surface, format)
    }

    /// Commit the open text draft. Returns the new label's id, if any.
    pub fn confirm_text(&mut self) -> Option<ObjectId> {
        let object = self.text.confirm()?;
        Some(self.commit_object(object))
    }

    pub fn cancel_text(&mut self) {
        self.text.cancel();
    }

    pub fn text(&self) -> &TextBridge {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut TextBridge {
        &mut self.text
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    /// Apply new settings. Tool and color are left alone since they are
    /// driven by their own commands.
    pub fn set_settings(&mut self, settings: DrawSettings) {
        let settings = settings.sanitized();
        if settings.language != self.text.language() {
            self.text.set_language(settings.language.clone());
        }
        self.text.set_font(settings.font.clone());
        self.exporter = Exporter::new(settings.export_base_name.clone());
        self.settings = settings;
    }
}
