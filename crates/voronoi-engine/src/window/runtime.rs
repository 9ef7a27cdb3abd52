use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::{FrameClock, FrameTime};

/// When the runtime schedules frames.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RedrawMode {
    /// Redraw every time the event loop goes idle.
    Continuous,
    /// Redraw after input, resize, or an explicit `request_redraw`.
    OnDemand,
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Open centered on the primary monitor.
    pub centered: bool,
    pub redraw: RedrawMode,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "voronoi".to_string(),
            initial_size: LogicalSize::new(800.0, 800.0),
            centered: true,
            redraw: RedrawMode::OnDemand,
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    exit: bool,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.exit = true;
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, runs the event loop until it closes, and returns the
    /// first fatal initialization error if any.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    init_error: Option<anyhow::Error>,
    exit_requested: bool,
    exited: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            init_error: None,
            exit_requested: false,
            exited: false,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        if self.config.centered {
            if let Some(monitor) = event_loop.primary_monitor() {
                let window_size = self.config.initial_size.to_physical(monitor.scale_factor());
                attrs = attrs.with_position(centered_position(
                    monitor.position(),
                    monitor.size(),
                    window_size,
                ));
            }
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn request_redraw(&self) {
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn draw_frame(&mut self, window_id: WindowId) -> RuntimeCtx {
        let mut runtime_ctx = RuntimeCtx::default();
        let (app, window) = (&mut self.app, &mut self.window);

        let Some(entry) = window.as_mut() else {
            return runtime_ctx;
        };

        entry.with_mut(|fields| {
            let ft: FrameTime = fields.clock.tick();

            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: window_id,
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    input_frame: fields.input_frame,
                    time: ft,
                    runtime: &mut runtime_ctx,
                };
                app.on_frame(&mut ctx)
            };

            if control == AppControl::Exit {
                runtime_ctx.exit();
            }

            // Events are consumed once per frame.
            fields.input_frame.clear();
        });

        runtime_ctx
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                log::info!(
                    "window '{}' opened ({:?} redraw)",
                    self.config.title,
                    self.config.redraw
                );
                self.window = Some(entry);
                self.request_redraw();
            }
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.init_error = Some(e);
                self.shutdown(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        if self.config.redraw == RedrawMode::Continuous {
            self.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        let translated = entry.with_mut(|fields| {
            match translate_window_event(fields.window, fields.input_state, &event) {
                Some(ev) => {
                    fields.input_state.apply_event(fields.input_frame, ev);
                    true
                }
                None => false,
            }
        });

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window close requested");
                self.shutdown(event_loop);
                return;
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }

            WindowEvent::RedrawRequested => {
                let runtime_ctx = self.draw_frame(window_id);
                if runtime_ctx.exit {
                    self.shutdown(event_loop);
                }
                return;
            }

            _ => {}
        }

        if translated && self.config.redraw == RedrawMode::OnDemand {
            self.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.exited {
            return;
        }
        self.exited = true;

        self.app.on_exit();
        // GPU objects go before the window they borrow.
        self.window = None;
        log::info!("runtime shut down");
    }
}

/// Top-left corner that centers `window` on a monitor, kept on-screen when
/// the window is larger than the monitor.
fn centered_position(
    origin: PhysicalPosition<i32>,
    monitor: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let offset = |m: u32, w: u32| (m.saturating_sub(w) / 2) as i32;
    PhysicalPosition::new(
        origin.x + offset(monitor.width, window.width),
        origin.y + offset(monitor.height, window.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_centered_on_monitor() {
        let pos = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(1920, 1080),
            PhysicalSize::new(800, 800),
        );
        assert_eq!(pos, PhysicalPosition::new(560, 140));
    }

    #[test]
    fn secondary_monitor_origin_is_respected() {
        let pos = centered_position(
            PhysicalPosition::new(1920, -200),
            PhysicalSize::new(1280, 1024),
            PhysicalSize::new(800, 800),
        );
        assert_eq!(pos, PhysicalPosition::new(2160, -88));
    }

    #[test]
    fn oversized_window_starts_at_monitor_origin() {
        let pos = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(640, 480),
            PhysicalSize::new(800, 800),
        );
        assert_eq!(pos, PhysicalPosition::new(0, 0));
    }

    #[test]
    fn default_config_opens_centered_on_demand() {
        let config = RuntimeConfig::default();
        assert!(config.centered);
        assert_eq!(config.redraw, RedrawMode::OnDemand);
    }
}
