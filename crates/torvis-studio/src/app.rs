use std::collections::HashMap;

use winit::window::WindowId;

use torvis_engine::core::{App, AppControl, FrameCtx};
use torvis_engine::mesh::{Color, ConfigError, GridConfig, Mesh, generate};
use torvis_engine::render::mesh::MeshRenderer;

use crate::config::PanelConfig;

/// One mesh to draw: its validated grid plus the wireframe color.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshInstance {
    pub config: GridConfig,
    pub line_color: Color,
}

impl MeshInstance {
    pub fn from_panel(panel: &PanelConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: GridConfig::new(panel.grid.clone())?,
            line_color: panel.line_color,
        })
    }
}

enum Panel {
    /// Generated, waiting for its window's device.
    Pending { mesh: Mesh, line_color: Color },
    Ready(MeshRenderer),
    Failed,
}

/// Draws one mesh per window, keyed by panel name.
///
/// Each panel's renderer is built on its first frame, against that window's
/// own device; a renderer error closes that window only.
pub struct StudioApp {
    panels: HashMap<String, Panel>,
}

impl StudioApp {
    pub const CLEAR: Color = Color::LIGHT_GRAY;

    pub fn new() -> Self {
        Self {
            panels: HashMap::new(),
        }
    }

    /// Generates the mesh for `instance` and registers it under `name`.
    pub fn add(&mut self, name: impl Into<String>, instance: &MeshInstance) {
        let mesh = generate(&instance.config);
        self.panels.insert(
            name.into(),
            Panel::Pending {
                mesh,
                line_color: instance.line_color,
            },
        );
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    fn prepare(&mut self, ctx: &mut FrameCtx<'_, '_>) {
        let key = ctx.window.key;
        let Some(panel) = self.panels.get_mut(key) else { return };
        if !matches!(panel, Panel::Pending { .. }) {
            return;
        }

        let Panel::Pending { mesh, line_color } = std::mem::replace(panel, Panel::Failed) else {
            return;
        };

        match MeshRenderer::new(&ctx.render_ctx(), mesh, line_color) {
            Ok(renderer) => {
                log::info!("[{key}] ready");
                *panel = Panel::Ready(renderer);
            }
            Err(e) => {
                log::error!("[{key}] {e}");
                ctx.runtime.close_window(ctx.window.id);
            }
        }
    }
}

impl Default for StudioApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.prepare(ctx);

        match self.panels.get(ctx.window.key) {
            Some(Panel::Ready(renderer)) => {
                ctx.render(Self::CLEAR, |_, target| renderer.render(target))
            }
            _ => AppControl::Continue,
        }
    }

    fn on_window_closed(&mut self, _window_id: WindowId, key: &str) {
        // Dropping the renderer releases the panel's buffers.
        self.panels.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    #[test]
    fn instance_validates_grid() {
        let mut panel = config::builtin().remove(0);
        assert!(MeshInstance::from_panel(&panel).is_ok());

        panel.grid.minor_radius = 0.0;
        let err = MeshInstance::from_panel(&panel).unwrap_err();
        assert_eq!(err.field(), Some("minor_radius"));
    }

    #[test]
    fn panels_are_generated_once_per_name() {
        let mut app = StudioApp::new();
        for panel in config::builtin() {
            let instance = MeshInstance::from_panel(&panel).unwrap();
            app.add(panel.name, &instance);
        }
        assert_eq!(app.len(), 2);

        match app.panels.get("lofted") {
            Some(Panel::Pending { mesh, line_color }) => {
                assert_eq!(mesh.vertex_count(), 25 * 4 * 11);
                assert_eq!(*line_color, Color::BLUE);
            }
            _ => panic!("lofted panel missing"),
        }
    }

    #[test]
    fn closing_a_window_drops_its_panel() {
        let mut app = StudioApp::new();
        let panel = config::builtin().remove(0);
        app.add(panel.name.clone(), &MeshInstance::from_panel(&panel).unwrap());

        app.on_window_closed(WindowId::from(0u64), &panel.name);
        assert!(app.is_empty());
    }
}
