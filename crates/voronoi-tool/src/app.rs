//! Glue between the tool state and the engine runtime.

use std::time::{Duration, Instant};

use voronoi_engine::core::{App, AppControl, FrameCtx};
use voronoi_engine::paint::Color;
use voronoi_engine::render::{MeshDraw, MeshId, MeshRenderer};
use voronoi_engine::time::FrameTime;

use crate::config::ToolConfig;
use crate::event::Event;
use crate::mesh::RadialMesh;
use crate::state::{AppState, Shape};

pub struct VoronoiApp {
    state: AppState,
    renderer: MeshRenderer,
    cone: MeshId,
    disc: MeshId,
    camera_configured: bool,
    frame_log: Option<FrameTimeLog>,
}

impl VoronoiApp {
    /// Builds both meshes and the renderer. The config must already be valid.
    pub fn new(config: ToolConfig) -> anyhow::Result<Self> {
        let cone_mesh = RadialMesh::build(
            "cone",
            config.cone_height,
            config.cone_depth,
            config.cone_resolution,
        )?;
        let disc_mesh = RadialMesh::build(
            "disc",
            0.0,
            config.cone_depth + config.cone_height,
            config.disc_resolution,
        )?;

        let mut renderer = MeshRenderer::new()?;
        let cone = renderer.add_mesh("cone", cone_mesh.vertices, cone_mesh.indices);
        let disc = renderer.add_mesh("disc", disc_mesh.vertices, disc_mesh.indices);

        let frame_log = config.enable_frame_time_log.then(FrameTimeLog::new);

        Ok(Self {
            state: AppState::new(config),
            renderer,
            cone,
            disc,
            camera_configured: false,
            frame_log,
        })
    }

    fn mesh_for(&self, shape: Shape) -> MeshId {
        match shape {
            Shape::Cone => self.cone,
            Shape::Disc => self.disc,
        }
    }
}

impl App for VoronoiApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.state.set_time(ctx.time.elapsed_ms());

        if !self.camera_configured {
            let (width, height) = ctx.window.logical_size().whole_pixels();
            self.state.handle(Event::Resize { width, height });
            self.camera_configured = true;
        }

        for ev in ctx.input_frame.events.iter().filter_map(Event::from_input) {
            self.state.handle(ev);
        }

        let draws: Vec<MeshDraw> = self
            .state
            .frame()
            .into_iter()
            .map(|d| MeshDraw {
                mesh: self.mesh_for(d.shape),
                model: d.model,
                color: d.color,
            })
            .collect();

        if let Some(proj_view) = self.state.take_proj_view() {
            self.renderer.set_proj_view(proj_view);
        }

        let renderer = &mut self.renderer;
        let control = ctx.render(Color::WHITE, |rctx, target| {
            renderer.render(rctx, target, &draws);
        });

        if self.state.is_animating() {
            ctx.window.request_redraw();
        }

        if let Some(log) = self.frame_log.as_mut() {
            log.record(&ctx.time);
        }

        control
    }

    fn on_exit(&mut self) {
        log::info!("exiting with {} cells", self.state.registry().len());
    }
}

/// Rolling frame-time average, reported once per second.
struct FrameTimeLog {
    window_start: Instant,
    frames: u32,
    total_dt: f64,
}

impl FrameTimeLog {
    const PERIOD: Duration = Duration::from_secs(1);

    fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
            total_dt: 0.0,
        }
    }

    /// Adds one frame; returns `(avg_ms, fps)` when a period completes.
    fn record(&mut self, ft: &FrameTime) -> Option<(f64, f64)> {
        self.frames += 1;
        self.total_dt += ft.dt as f64;

        if ft.now.saturating_duration_since(self.window_start) < Self::PERIOD {
            return None;
        }

        let avg_ms = self.total_dt * 1000.0 / self.frames as f64;
        let fps = if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 };
        log::info!("frame time {avg_ms:.2} ms ({fps:.1} fps)");

        self.window_start = ft.now;
        self.frames = 0;
        self.total_dt = 0.0;
        Some((avg_ms, fps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(start: Instant, at_ms: u64, dt: f32) -> FrameTime {
        let elapsed = Duration::from_millis(at_ms);
        FrameTime { dt, now: start + elapsed, elapsed }
    }

    #[test]
    fn reports_average_once_per_period() {
        let mut log = FrameTimeLog::new();
        let start = log.window_start;

        for i in 1..50 {
            assert_eq!(log.record(&frame(start, i * 20, 0.020)), None);
        }
        let (avg_ms, fps) = log.record(&frame(start, 1000, 0.020)).unwrap();
        assert!((avg_ms - 20.0).abs() < 1e-3);
        assert!((fps - 50.0).abs() < 1e-2);
    }

    #[test]
    fn resets_after_report() {
        let mut log = FrameTimeLog::new();
        let start = log.window_start;

        assert!(log.record(&frame(start, 1200, 0.010)).is_some());
        assert_eq!(log.frames, 0);
        assert_eq!(log.total_dt, 0.0);
        assert_eq!(log.window_start, start + Duration::from_millis(1200));

        // Next period is measured from the report, not from the start.
        assert_eq!(log.record(&frame(start, 2100, 0.010)), None);
        assert!(log.record(&frame(start, 2200, 0.030)).is_some());
    }
}
