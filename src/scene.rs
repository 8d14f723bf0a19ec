use log::info;

use crate::element::DrawableObject;
use crate::renderer::{DisplayId, RenderSurface};

/// A committed object and the display object showing it
#[derive(Debug, Clone)]
pub struct SceneEntry {
    pub display: DisplayId,
    pub object: DrawableObject,
}

/// Committed objects in z-order (later entries are drawn on top).
///
/// The scene mirrors what the render surface shows for committed content and
/// doubles as the undo history: undo always removes the last entry.
#[derive(Debug, Default)]
pub struct Scene {
    entries: Vec<SceneEntry>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object that is already attached to the surface as `display`
    pub fn commit(&mut self, display: DisplayId, object: DrawableObject) {
        info!("committed {} {}", object.shape().kind(), object.id());
        self.entries.push(SceneEntry { display, object });
    }

    /// Remove the most recent object and detach it from the surface.
    ///
    /// Does nothing on an empty scene.
    pub fn undo(&mut self, surface: &mut impl RenderSurface) -> Option<DrawableObject> {
        let entry = self.entries.pop()?;
        surface.detach(entry.display);
        info!("undid {} {}", entry.object.shape().kind(), entry.object.id());
        Some(entry.object)
    }

    /// Empty the scene and the whole stage
    pub fn clear(&mut self, surface: &mut impl RenderSurface) {
        if !self.entries.is_empty() {
            info!("cleared {} objects", self.entries.len());
        }
        self.entries.clear();
        surface.detach_all();
    }

    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    pub fn objects(&self) -> impl Iterator<Item = &DrawableObject> {
        self.entries.iter().map(|entry| &entry.object)
    }

    pub fn last(&self) -> Option<&DrawableObject> {
        self.entries.last().map(|entry| &entry.object)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
