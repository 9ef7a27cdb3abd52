use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::device::DEPTH_FORMAT;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::shader::{validate_wgsl, ShaderError};

/// WGSL source of the mesh pipeline.
pub const MESH_SHADER: &str = include_str!("shaders/mesh.wgsl");

/// Handle to a mesh registered with [`MeshRenderer::add_mesh`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MeshId(usize);

/// One draw call: a registered mesh placed by `model`, filled with `color`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshDraw {
    pub mesh: MeshId,
    pub model: Mat4,
    pub color: Color,
}

/// Renderer for indexed triangle meshes with a per-draw model matrix and color.
///
/// Meshes are registered once on the CPU and uploaded on the first frame;
/// their buffers are immutable afterwards and are released when the renderer
/// drops. Draws are issued one per [`MeshDraw`] in slice order, against the
/// frame's depth buffer (compare `Less`), so at equal depth the earlier draw
/// stays visible.
pub struct MeshRenderer {
    sources: Vec<MeshSource>,
    buffers: Vec<MeshBuffers>,

    pipeline_key: Option<(wgpu::TextureFormat, u32)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,

    proj_view: Mat4,
    proj_view_dirty: bool,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    warned_unknown_mesh: bool,
}

struct MeshSource {
    label: String,
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

struct MeshBuffers {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

impl MeshRenderer {
    /// Validates the mesh shader and creates an empty renderer.
    ///
    /// No GPU object exists until the first [`render`](Self::render).
    pub fn new() -> Result<Self, ShaderError> {
        validate_wgsl("mesh", MESH_SHADER)?;

        Ok(Self {
            sources: Vec::new(),
            buffers: Vec::new(),
            pipeline_key: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            camera_ubo: None,
            proj_view: Mat4::IDENTITY,
            proj_view_dirty: true,
            instance_vbo: None,
            instance_capacity: 0,
            warned_unknown_mesh: false,
        })
    }

    /// Registers a mesh. `indices` are triangle-list triplets into `positions`.
    pub fn add_mesh(
        &mut self,
        label: impl Into<String>,
        positions: Vec<[f32; 3]>,
        indices: Vec<u32>,
    ) -> MeshId {
        debug_assert!(indices.len() % 3 == 0, "mesh indices must form whole triangles");
        debug_assert!(
            indices.iter().all(|&i| (i as usize) < positions.len()),
            "mesh index out of range"
        );

        let id = MeshId(self.sources.len());
        self.sources.push(MeshSource {
            label: label.into(),
            positions,
            indices,
        });
        id
    }

    /// Replaces the camera projection-view matrix.
    ///
    /// The uniform buffer is written once, at the next `render`.
    pub fn set_proj_view(&mut self, proj_view: Mat4) {
        self.proj_view = proj_view;
        self.proj_view_dirty = true;
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draws: &[MeshDraw]) {
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.ensure_mesh_buffers(ctx);
        self.write_camera_uniform(ctx);

        if draws.is_empty() {
            return;
        }

        let instances: Vec<MeshInstance> = draws
            .iter()
            .map(|d| MeshInstance {
                model: d.model.to_cols_array_2d(),
                color: d.color.to_array(),
            })
            .collect();

        self.ensure_instance_capacity(ctx, instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("voronoi mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: target.resolve_view,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        let mut bound: Option<MeshId> = None;
        for (i, draw) in draws.iter().enumerate() {
            let Some(mesh) = self.buffers.get(draw.mesh.0) else {
                if !self.warned_unknown_mesh {
                    log::warn!("skipping draw of unregistered mesh {:?}", draw.mesh);
                    self.warned_unknown_mesh = true;
                }
                continue;
            };

            if bound != Some(draw.mesh) {
                rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
                rpass.set_index_buffer(mesh.ibo.slice(..), wgpu::IndexFormat::Uint32);
                bound = Some(draw.mesh);
            }

            let instance = i as u32;
            rpass.draw_indexed(0..mesh.index_count, 0, instance..instance + 1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = (ctx.surface_format, ctx.sample_count);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("voronoi mesh shader"),
            source: wgpu::ShaderSource::Wgsl(MESH_SHADER.into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("voronoi mesh bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<CameraUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("voronoi mesh pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("voronoi mesh pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout(), MeshInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: ctx.sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview_mask: None,
            cache: None,
        });

        log::debug!(
            "mesh pipeline built for {:?}, {}x MSAA",
            ctx.surface_format,
            ctx.sample_count
        );

        self.pipeline_key = Some(key);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.camera_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("voronoi camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("voronoi mesh bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.bind_group = Some(bind_group);
        // A fresh buffer holds zeros until the matrix is written.
        self.proj_view_dirty = true;
    }

    fn ensure_mesh_buffers(&mut self, ctx: &RenderCtx<'_>) {
        for source in &self.sources[self.buffers.len()..] {
            let vertices: Vec<MeshVertex> = source
                .positions
                .iter()
                .map(|&pos| MeshVertex { pos })
                .collect();

            let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("voronoi {} vbo", source.label)),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("voronoi {} ibo", source.label)),
                contents: bytemuck::cast_slice(&source.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            log::debug!(
                "uploaded mesh '{}': {} vertices, {} indices",
                source.label,
                vertices.len(),
                source.indices.len()
            );

            self.buffers.push(MeshBuffers {
                vbo,
                ibo,
                index_count: source.indices.len() as u32,
            });
        }
    }

    fn write_camera_uniform(&mut self, ctx: &RenderCtx<'_>) {
        if !self.proj_view_dirty {
            return;
        }
        let Some(ubo) = self.camera_ubo.as_ref() else { return };
        ctx.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&CameraUniform {
                proj_view: self.proj_view.to_cols_array_2d(),
            }),
        );
        self.proj_view_dirty = false;
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        let new_size = (new_cap * std::mem::size_of::<MeshInstance>()) as u64;
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("voronoi mesh instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

impl Drop for MeshRenderer {
    fn drop(&mut self) {
        for mesh in self.buffers.drain(..) {
            mesh.vbo.destroy();
            mesh.ibo.destroy();
        }
        if let Some(vbo) = self.instance_vbo.take() {
            vbo.destroy();
        }
        if let Some(ubo) = self.camera_ubo.take() {
            ubo.destroy();
        }
        log::debug!("mesh renderer released");
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    proj_view: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct MeshVertex {
    pos: [f32; 3],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Instance data layout (80 bytes):
///
///  offset  0  model  [[f32; 4]; 4]  loc 1..4 (columns)
///  offset 64  color  [f32; 4]       loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct MeshInstance {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl MeshInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x4, // model column 0
        2 => Float32x4, // model column 1
        3 => Float32x4, // model column 2
        4 => Float32x4, // model column 3
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Vec<[f32; 3]>, Vec<u32>) {
        (vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], vec![0, 1, 2])
    }

    #[test]
    fn new_renderer_starts_without_gpu_objects() {
        let renderer = MeshRenderer::new().unwrap();
        assert!(renderer.sources.is_empty());
        assert!(renderer.pipeline.is_none());
        assert!(renderer.pipeline_key.is_none());
    }

    #[test]
    fn mesh_ids_follow_registration_order() {
        let mut renderer = MeshRenderer::new().unwrap();
        let (p, i) = triangle();
        let a = renderer.add_mesh("a", p.clone(), i.clone());
        let b = renderer.add_mesh("b", p, i);
        assert_ne!(a, b);
        assert_eq!(a, MeshId(0));
        assert_eq!(b, MeshId(1));
        assert_eq!(renderer.sources.len(), 2);
    }

    #[test]
    fn proj_view_is_written_lazily() {
        let mut renderer = MeshRenderer::new().unwrap();
        renderer.proj_view_dirty = false;
        renderer.set_proj_view(Mat4::from_scale(glam::Vec3::splat(2.0)));
        assert!(renderer.proj_view_dirty);
        assert_eq!(renderer.proj_view, Mat4::from_scale(glam::Vec3::splat(2.0)));
    }

    #[test]
    fn gpu_layouts_have_expected_sizes() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 12);
        assert_eq!(std::mem::size_of::<MeshInstance>(), 80);
    }
}
