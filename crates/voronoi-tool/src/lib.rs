//! Interactive Voronoi diagram tool.
//!
//! Each cell is drawn as a cone seen from above through an orthographic
//! camera; the depth buffer keeps the nearest cone at every pixel, which is
//! the Voronoi partition of the cell positions.

pub mod app;
pub mod camera;
pub mod cells;
pub mod config;
pub mod error;
pub mod event;
pub mod growth;
pub mod mesh;
pub mod picking;
pub mod state;

pub use app::VoronoiApp;
pub use config::{KeyBindings, ToolConfig};
pub use error::ConfigError;
pub use event::{Button, Event};
pub use state::AppState;
