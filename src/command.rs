use egui::Color32;
use log::debug;

use crate::canvas::Canvas;
use crate::error::CommandError;
use crate::export::{ExportFormat, ExportedFile};
use crate::renderer::{RenderSurface, SurfaceSize};
use crate::tool::Tool;

/// Result type for command execution
pub type CommandResult = Result<CommandOutcome, CommandError>;

/// What a successfully executed command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    /// Export bytes for the host to save
    Exported(ExportedFile),
}

/// Commands the host UI sends to the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Change the tool used by the next gesture
    SelectTool(Tool),
    /// Change the color used by the next gesture
    SelectColor(Color32),
    /// Remove the most recent object
    Undo,
    /// Remove all objects
    Clear,
    Export(ExportFormat),
    /// The host's drawing area changed size
    Resize(SurfaceSize),
}

impl Command {
    /// Execute the command against `canvas`
    pub fn execute<S: RenderSurface>(&self, canvas: &mut Canvas<S>) -> CommandResult {
        debug!("executing {self:?}");
        match self {
            Command::SelectTool(tool) => canvas.select_tool(*tool),
            Command::SelectColor(color) => canvas.select_color(*color),
            Command::Undo => {
                canvas.undo();
            }
            Command::Clear => canvas.clear(),
            Command::Export(format) => {
                return Ok(CommandOutcome::Exported(canvas.export(*format)?));
            }
            Command::Resize(size) => canvas.resize(*size),
        }
        Ok(CommandOutcome::Done)
    }
}
