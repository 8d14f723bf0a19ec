#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod components;
pub mod config;
pub mod element;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod notice;
pub mod panels;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod text;
pub mod tool;
pub mod util;

pub use app::DrawApp;
pub use canvas::Canvas;
pub use command::{Command, CommandOutcome, CommandResult};
pub use config::{CancelPolicy, DrawSettings};
pub use element::{DrawableObject, ObjectId, Shape, Style};
pub use error::{CommandError, ExportError, SuggestionError, SurfaceError};
pub use export::{ExportFormat, ExportedFile, Exporter};
pub use input::{InputEvent, InputHandler};
pub use renderer::{DisplayId, RenderSurface, Stage, SurfaceSize};
pub use scene::Scene;
pub use state::EditorState;
pub use tool::Tool;
