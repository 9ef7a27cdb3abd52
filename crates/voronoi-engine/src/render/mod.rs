//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record passes
//! into the frame's encoder.
//!
//! Convention:
//! - mesh geometry is in model space, placed by a per-draw model matrix
//! - the camera projection-view matrix lives in a uniform buffer and changes
//!   only when the application says so

mod ctx;
pub mod mesh;
pub mod shader;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{MeshDraw, MeshId, MeshRenderer};
pub use shader::{ShaderError, ShaderStage};
