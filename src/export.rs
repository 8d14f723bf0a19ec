//! Export pipeline: rasterize the surface, then encode.
//!
//! Both formats start from the same pixel snapshot. The vector-wrapped format
//! is an SVG container around that snapshot, not a true vector export.

use std::fmt::Write as _;
use std::io::Cursor;

use base64::Engine as _;
use image::{ImageFormat, RgbaImage};
use log::info;

use crate::error::ExportError;
use crate::renderer::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG of the rendered scene
    Raster,
    /// SVG document embedding the PNG as a data URI
    VectorWrapped,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Raster => "png",
            ExportFormat::VectorWrapped => "svg",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Raster => "image/png",
            ExportFormat::VectorWrapped => "image/svg+xml",
        }
    }
}

/// An encoded export ready to hand to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Reads a surface and produces export files named `<base_name>.<ext>`
#[derive(Debug, Clone)]
pub struct Exporter {
    base_name: String,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new("drawing")
    }
}

impl Exporter {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
        }
    }

    /// Snapshot `surface` and encode it. The surface is only read.
    pub fn export(
        &self,
        surface: &impl RenderSurface,
        format: ExportFormat,
    ) -> Result<ExportedFile, ExportError> {
        let pixels = surface.rasterize()?;
        let png = encode_png(&pixels)?;

        let bytes = match format {
            ExportFormat::Raster => png,
            ExportFormat::VectorWrapped => {
                let size = surface.size();
                wrap_in_svg(&png, size.width, size.height).into_bytes()
            }
        };

        let file_name = format!("{}.{}", self.base_name, format.extension());
        info!("exported {file_name} ({} bytes)", bytes.len());
        Ok(ExportedFile {
            file_name,
            mime: format.mime(),
            bytes,
        })
    }
}

pub fn encode_png(pixels: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Cursor::new(Vec::new());
    pixels.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// SVG document of the given logical size with a white background and the
/// PNG stretched over the whole viewport
pub fn wrap_in_svg(png: &[u8], width: f32, height: f32) -> String {
    let data = base64::engine::general_purpose::STANDARD.encode(png);
    let mut svg = String::with_capacity(data.len() + 256);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" style=\"background:white\">"
    );
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>");
    let _ = write!(
        svg,
        "<image href=\"data:image/png;base64,{data}\" width=\"100%\" height=\"100%\"/>"
    );
    svg.push_str("</svg>");
    svg
}
