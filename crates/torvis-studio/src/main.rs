mod app;
mod config;

use std::path::PathBuf;

use anyhow::{Result, bail};
use winit::dpi::LogicalSize;

use torvis_engine::device::GpuInit;
use torvis_engine::logging::{LoggingConfig, init_logging};
use torvis_engine::window::{Runtime, RuntimeConfig};

use app::{MeshInstance, StudioApp};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let panels = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            log::info!("loading panels from {}", path.display());
            config::load(&path)?
        }
        None => config::builtin(),
    };

    let mut app = StudioApp::new();
    let mut windows = Vec::new();

    for panel in &panels {
        match MeshInstance::from_panel(panel) {
            Ok(instance) => {
                app.add(panel.name.clone(), &instance);
                let [w, h] = panel.size();
                windows.push(RuntimeConfig {
                    initial_size: LogicalSize::new(w, h),
                    ..RuntimeConfig::new(panel.name.clone())
                });
            }
            // A bad panel is skipped; the others still open.
            Err(e) => log::error!("[{}] invalid grid: {e}", panel.name),
        }
    }

    if app.is_empty() {
        bail!("no valid panel to show");
    }

    Runtime::run(windows, GpuInit::default(), app)
}
