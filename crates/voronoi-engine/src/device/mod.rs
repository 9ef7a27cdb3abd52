//! GPU device + surface management.
//!
//! Creates the wgpu device, keeps the surface configured for the window and
//! owns the per-frame attachments (depth, optional multisampled color).

mod gpu;
mod targets;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
pub use targets::{FrameTargets, DEPTH_FORMAT};
