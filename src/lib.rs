#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod background;
pub mod calibration;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod export;
pub mod file_handler;
pub mod geometry;
mod id_generator;
pub mod input;
pub mod line;
pub mod loupe;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod tools;

pub use app::{CalibrationPrompt, MeasureApp};
pub use calibration::CalibrationRequest;
pub use config::SessionConfig;
pub use document::Document;
pub use error::{CalibrationError, ConfigError, ImageLoadError};
pub use event::{EditorEvent, EventBus, EventHandler};
pub use export::MeasurementTable;
pub use input::{CommitGesture, InputEvent, InputLocation};
pub use line::{Endpoint, Line, LineId};
pub use loupe::Loupe;
pub use renderer::Renderer;
pub use state::{EditingSession, EditorState, EndpointHandle};
pub use tools::ToolMode;
