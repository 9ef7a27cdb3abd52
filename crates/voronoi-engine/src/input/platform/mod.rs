//! Window-system translation layers.

pub(crate) mod winit;
