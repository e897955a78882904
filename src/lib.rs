#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod backend;
pub mod command;
pub mod console;
pub mod editor;
pub mod history;
pub mod image;
pub mod input;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod state;
pub mod stroke;
pub mod texture_manager;

pub use app::PaintApp;
pub use backend::{FillRule, PaintBackend};
pub use command::Command;
pub use editor::Editor;
pub use history::CommandHistory;
pub use renderer::Renderer;
pub use state::{DrawState, ShapeMode};
pub use stroke::{PendingStroke, Stroke};
