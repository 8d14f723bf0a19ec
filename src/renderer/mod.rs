//! The render surface: a retained, ordered stage of display objects.
//!
//! The interaction engine only talks to the [`RenderSurface`] trait. [`Stage`]
//! is the bundled implementation; it paints through egui for the live view
//! and rasterizes through tiny-skia for export.

use image::RgbaImage;

use crate::element::{DrawableObject, Segment};
use crate::error::SurfaceError;

mod fonts;
mod painter;
mod raster;
mod stage;

pub use fonts::FontBook;
pub use painter::{LabelFont, label_font_id, paint_stage, register_label_font};
pub use raster::rasterize;
pub use stage::{Stage, StageNode};

/// Handle of an object attached to a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayId(u64);

impl DisplayId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Logical size of the drawing surface plus its device scale factor.
///
/// Canvas coordinates are logical; rasterization happens at
/// `ceil(width * scale) x ceil(height * scale)` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl SurfaceSize {
    /// Largest pixel edge the rasterizer accepts
    pub const MAX_PIXELS: u32 = 16_384;

    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Output size in physical pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let scale = if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        };
        let w = (self.width * scale).ceil();
        let h = (self.height * scale).ceil();
        let to_px = |v: f32| if v.is_finite() && v > 0.0 { v as u32 } else { 0 };
        (to_px(w), to_px(h))
    }

    /// Checks that the surface can actually be allocated
    pub fn validate(&self) -> Result<(), SurfaceError> {
        let (width, height) = self.pixel_size();
        if width == 0 || height == 0 || width > Self::MAX_PIXELS || height > Self::MAX_PIXELS {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        Ok(())
    }
}

/// Retained-mode 2D scene graph the interaction engine draws into.
pub trait RenderSurface {
    /// Add an object on top of the stage
    fn attach(&mut self, object: &DrawableObject) -> DisplayId;

    /// Replace the geometry of an attached object in place
    fn redraw(&mut self, id: DisplayId, object: &DrawableObject);

    /// Append one segment to an attached brush stroke
    fn extend_stroke(&mut self, id: DisplayId, segment: Segment);

    /// Remove an object from the stage. Returns false if it was not attached.
    fn detach(&mut self, id: DisplayId) -> bool;

    /// Remove every object from the stage
    fn detach_all(&mut self);

    /// Brief visual confirmation after a commit
    fn fade_in(&mut self, _id: DisplayId) {}

    /// Number of objects currently on the stage
    fn display_count(&self) -> usize;

    fn size(&self) -> SurfaceSize;

    /// Resize the output. Attached objects keep their coordinates.
    fn resize(&mut self, size: SurfaceSize);

    /// Snapshot the stage into an opaque RGBA buffer at the current pixel size
    fn rasterize(&self) -> Result<RgbaImage, SurfaceError>;
}
