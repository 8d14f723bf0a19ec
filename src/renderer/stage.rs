use image::RgbaImage;
use log::{debug, warn};

use super::{DisplayId, FontBook, RenderSurface, SurfaceSize, raster};
use crate::element::{DrawableObject, Segment};
use crate::error::SurfaceError;
use crate::util::time;

/// Duration of the commit fade-in, in seconds
pub const FADE_IN_SECS: f64 = 0.3;
/// Alpha the fade-in starts from
pub const FADE_IN_FROM: f32 = 0.5;

/// One object on the stage
#[derive(Debug, Clone)]
pub struct StageNode {
    pub id: DisplayId,
    pub object: DrawableObject,
    fade_started: Option<f64>,
}

impl StageNode {
    /// Opacity multiplier at time `now` (seconds)
    pub fn alpha_at(&self, now: f64) -> f32 {
        let Some(started) = self.fade_started else {
            return 1.0;
        };
        // Timestamps are large, so compare against the end instead of
        // subtracting first
        if now >= started + FADE_IN_SECS {
            return 1.0;
        }
        let t = ((now - started) / FADE_IN_SECS).clamp(0.0, 1.0) as f32;
        // ease-out quad
        let eased = t * (2.0 - t);
        FADE_IN_FROM + (1.0 - FADE_IN_FROM) * eased
    }

    pub fn is_fading(&self, now: f64) -> bool {
        self.fade_started
            .is_some_and(|started| now < started + FADE_IN_SECS)
    }
}

/// The bundled render surface
#[derive(Debug)]
pub struct Stage {
    nodes: Vec<StageNode>,
    size: SurfaceSize,
    next_id: u64,
    fonts: FontBook,
}

impl Stage {
    /// Creates a stage of the given size.
    ///
    /// Fails when the size cannot be rasterized (zero or oversized), which the
    /// host reports as an initialization failure.
    pub fn new(size: SurfaceSize) -> Result<Self, SurfaceError> {
        size.validate()?;
        Ok(Self {
            nodes: Vec::new(),
            size,
            next_id: 1,
            fonts: FontBook::default(),
        })
    }

    pub fn nodes(&self) -> &[StageNode] {
        &self.nodes
    }

    pub fn contains(&self, id: DisplayId) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    pub fn object(&self, id: DisplayId) -> Option<&DrawableObject> {
        self.node(id).map(|node| &node.object)
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Whether any node is still animating
    pub fn is_animating(&self, now: f64) -> bool {
        self.nodes.iter().any(|node| node.is_fading(now))
    }

    fn node(&self, id: DisplayId) -> Option<&StageNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    fn node_mut(&mut self, id: DisplayId) -> Option<&mut StageNode> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }
}

impl RenderSurface for Stage {
    fn attach(&mut self, object: &DrawableObject) -> DisplayId {
        let id = DisplayId::new(self.next_id);
        self.next_id += 1;
        self.nodes.push(StageNode {
            id,
            object: object.clone(),
            fade_started: None,
        });
        id
    }

    fn redraw(&mut self, id: DisplayId, object: &DrawableObject) {
        match self.node_mut(id) {
            Some(node) => node.object = object.clone(),
            None => warn!("redraw of unknown display object {}", id.raw()),
        }
    }

    fn extend_stroke(&mut self, id: DisplayId, segment: Segment) {
        match self.node_mut(id) {
            Some(node) => {
                if !node.object.push_segment(segment) {
                    warn!("display object {} is not a stroke", id.raw());
                }
            }
            None => warn!("extend of unknown display object {}", id.raw()),
        }
    }

    fn detach(&mut self, id: DisplayId) -> bool {
        // Undo always removes the top node
        if self.nodes.last().is_some_and(|node| node.id == id) {
            self.nodes.pop();
            return true;
        }
        let before = self.nodes.len();
        self.nodes.retain(|node| node.id != id);
        before != self.nodes.len()
    }

    fn detach_all(&mut self) {
        self.nodes.clear();
    }

    fn fade_in(&mut self, id: DisplayId) {
        if let Some(node) = self.node_mut(id) {
            node.fade_started = Some(time::current_time_secs());
        }
    }

    fn display_count(&self) -> usize {
        self.nodes.len()
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        if let Err(err) = size.validate() {
            warn!("ignoring resize: {err}");
            return;
        }
        debug!("stage resized to {}x{} @{}", size.width, size.height, size.scale);
        self.size = size;
    }

    fn rasterize(&self) -> Result<RgbaImage, SurfaceError> {
        raster::rasterize(&self.nodes, self.size, &self.fonts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Style, factory};
    use egui::{Color32, pos2};

    fn style() -> Style {
        Style::new(Color32::BLUE, 0.8, 2.0)
    }

    #[test]
    fn test_stage_rejects_zero_size() {
        let err = Stage::new(SurfaceSize::new(0.0, 100.0)).unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidSize { width: 0, .. }));
    }

    #[test]
    fn test_attach_keeps_insertion_order() {
        let mut stage = Stage::new(SurfaceSize::new(100.0, 100.0)).unwrap();
        let a = stage.attach(&factory::rect(style(), pos2(0.0, 0.0), 5.0, 5.0));
        let b = stage.attach(&factory::circle(style(), pos2(10.0, 10.0), 3.0));
        let ids: Vec<_> = stage.nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a, b]);

        assert!(stage.detach(a));
        assert!(!stage.detach(a));
        assert_eq!(stage.display_count(), 1);
    }

    #[test]
    fn test_invalid_resize_is_ignored() {
        let mut stage = Stage::new(SurfaceSize::new(100.0, 50.0)).unwrap();
        stage.resize(SurfaceSize::new(0.0, 0.0));
        assert_eq!(stage.size(), SurfaceSize::new(100.0, 50.0));
    }

    #[test]
    fn test_fade_in_alpha_ramps_up() {
        let mut stage = Stage::new(SurfaceSize::new(10.0, 10.0)).unwrap();
        let id = stage.attach(&factory::rect(style(), pos2(0.0, 0.0), 1.0, 1.0));
        stage.fade_in(id);
        let node = &stage.nodes()[0];
        let started = node.fade_started.unwrap();
        assert_eq!(node.alpha_at(started), FADE_IN_FROM);
        assert_eq!(node.alpha_at(started + FADE_IN_SECS), 1.0);
        assert!(!node.is_fading(started + FADE_IN_SECS));
        assert!(node.is_fading(started + FADE_IN_SECS / 2.0));
    }

    #[test]
    fn test_detach_top_and_middle_nodes() {
        let mut stage = Stage::new(SurfaceSize::new(100.0, 100.0)).unwrap();
        let a = stage.attach(&factory::rect(style(), pos2(0.0, 0.0), 5.0, 5.0));
        let b = stage.attach(&factory::circle(style(), pos2(10.0, 10.0), 3.0));
        let c = stage.attach(&factory::circle(style(), pos2(20.0, 20.0), 3.0));

        assert!(stage.detach(c));
        let ids: Vec<_> = stage.nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a, b]);

        assert!(stage.detach(a));
        let ids: Vec<_> = stage.nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![b]);
        assert!(!stage.detach(c));
    }
}
