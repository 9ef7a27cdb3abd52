//! Window-space geometry shared by the runtime and renderers.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down

mod viewport;

pub use viewport::Viewport;
