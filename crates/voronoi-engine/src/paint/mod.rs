//! Paint model shared between the tool and renderers.

pub mod color;

pub use color::Color;
