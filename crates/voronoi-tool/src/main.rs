use anyhow::Context;
use winit::dpi::LogicalSize;

use voronoi_engine::device::GpuInit;
use voronoi_engine::logging::{init_logging, LoggingConfig};
use voronoi_engine::window::{RedrawMode, Runtime, RuntimeConfig};
use voronoi_tool::{ToolConfig, VoronoiApp};

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run(ToolConfig::default()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(config: ToolConfig) -> anyhow::Result<()> {
    config.validate().context("invalid tool configuration")?;
    log::debug!("configuration: {config:?}");

    let runtime = RuntimeConfig {
        title: config.title.clone(),
        initial_size: LogicalSize::new(config.window_width as f64, config.window_height as f64),
        centered: true,
        redraw: if config.enable_frame_time_log {
            RedrawMode::Continuous
        } else {
            RedrawMode::OnDemand
        },
    };

    let gpu_init = GpuInit {
        sample_count: config.msaa_samples,
        ..GpuInit::default()
    };

    let app = VoronoiApp::new(config)?;
    Runtime::run(runtime, gpu_init, app)
}
