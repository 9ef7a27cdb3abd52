//! Voronoi engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the tool layer:
//! window and event loop, input translation, frame timing, logging and the
//! indexed-mesh renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
