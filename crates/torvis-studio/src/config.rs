//! Panel configuration.
//!
//! A panel file is TOML with one `[[panel]]` table per window:
//!
//! ```toml
//! [[panel]]
//! name = "torus"
//! line_color = [0.0, 0.0, 1.0]
//! size = [500, 500]
//!
//! [panel.grid]
//! ring_segments = 64
//! tube_segments = 32
//! major_radius = 0.6
//! minor_radius = 0.2
//!
//! [panel.grid.ramp]
//! start = [0.5, 0.9, 0.9]
//! mid = [1.0, 0.0, 0.0]
//! end = [0.5, 0.9, 0.9]
//! ```
//!
//! Grid parameters are kept raw here and validated per panel, so one bad panel
//! does not reject the whole file.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use torvis_mesh::{Color, ColorRamp, GridParams};

pub const DEFAULT_SIZE: [f64; 2] = [500.0, 500.0];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelConfig {
    pub name: String,
    pub grid: GridParams,
    #[serde(default = "default_line_color")]
    pub line_color: Color,
    /// Logical window size, `[width, height]`.
    #[serde(default)]
    pub size: Option<[f64; 2]>,
}

impl PanelConfig {
    #[inline]
    pub fn size(&self) -> [f64; 2] {
        self.size.unwrap_or(DEFAULT_SIZE)
    }
}

fn default_line_color() -> Color {
    Color::BLUE
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PanelFile {
    #[serde(default)]
    panel: Vec<PanelConfig>,
}

/// Parses a panel file.
///
/// Rejects an empty panel list and duplicate panel names; the name keys the
/// panel's window.
pub fn parse(src: &str) -> Result<Vec<PanelConfig>> {
    let file: PanelFile = toml::from_str(src).context("invalid panel file")?;

    if file.panel.is_empty() {
        bail!("panel file declares no [[panel]]");
    }

    let mut seen = HashSet::new();
    for p in &file.panel {
        if !seen.insert(p.name.as_str()) {
            bail!("duplicate panel name `{}`", p.name);
        }
    }

    Ok(file.panel)
}

pub fn load(path: &Path) -> Result<Vec<PanelConfig>> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read panel file {}", path.display()))?;
    parse(&src).with_context(|| format!("in {}", path.display()))
}

/// The two reference panels: a flat 64×32 torus and a 24×3 torus lofted
/// into eleven slices.
pub fn builtin() -> Vec<PanelConfig> {
    vec![
        PanelConfig {
            name: "torus".to_string(),
            grid: GridParams {
                ring_segments: 64,
                tube_segments: 32,
                major_radius: 0.6,
                minor_radius: 0.2,
                loft_count: None,
                loft_step: None,
                ramp: ColorRamp::CORAL,
            },
            line_color: Color::BLUE,
            size: None,
        },
        PanelConfig {
            name: "lofted".to_string(),
            grid: GridParams {
                ring_segments: 24,
                tube_segments: 3,
                major_radius: 0.6,
                minor_radius: 0.2,
                loft_count: Some(10),
                loft_step: Some(0.1),
                ramp: ColorRamp::AMBER,
            },
            line_color: Color::BLUE,
            size: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documented_example() {
        let src = r#"
            [[panel]]
            name = "torus"
            line_color = [0.0, 0.0, 1.0]
            size = [640, 480]

            [panel.grid]
            ring_segments = 64
            tube_segments = 32
            major_radius = 0.6
            minor_radius = 0.2

            [panel.grid.ramp]
            start = [0.5, 0.9, 0.9]
            mid = [1.0, 0.0, 0.0]
            end = [0.5, 0.9, 0.9]
        "#;

        let panels = parse(src).unwrap();
        assert_eq!(panels.len(), 1);
        let p = &panels[0];
        assert_eq!(p.name, "torus");
        assert_eq!(p.grid.ring_segments, 64);
        assert_eq!(p.grid.ramp, ColorRamp::CORAL);
        assert_eq!(p.line_color, Color::BLUE);
        assert_eq!(p.size(), [640.0, 480.0]);
    }

    #[test]
    fn optional_fields_default() {
        let src = r#"
            [[panel]]
            name = "plain"
            [panel.grid]
            ring_segments = 4
            tube_segments = 2
            major_radius = 0.6
            minor_radius = 0.2
        "#;

        let p = &parse(src).unwrap()[0];
        assert_eq!(p.line_color, Color::BLUE);
        assert_eq!(p.size(), DEFAULT_SIZE);
        assert_eq!(p.grid.loft_count, None);
        assert_eq!(p.grid.ramp, ColorRamp::default());
    }

    #[test]
    fn lofted_panel_keeps_raw_counts() {
        let src = r#"
            [[panel]]
            name = "lofted"
            [panel.grid]
            ring_segments = 24
            tube_segments = 3
            major_radius = 0.6
            minor_radius = 0.2
            loft_count = 10
            loft_step = 0.1
        "#;

        let p = &parse(src).unwrap()[0];
        assert_eq!(p.grid.loft_count, Some(10));
        assert_eq!(p.grid.loft_step, Some(0.1));
    }

    #[test]
    fn invalid_grid_values_survive_parsing() {
        // Validation happens per panel, later.
        let src = r#"
            [[panel]]
            name = "bad"
            [panel.grid]
            ring_segments = -3
            tube_segments = 2
            major_radius = 0.6
            minor_radius = 0.2
        "#;

        assert_eq!(parse(src).unwrap()[0].grid.ring_segments, -3);
    }

    #[test]
    fn duplicate_names_rejected() {
        let src = r#"
            [[panel]]
            name = "a"
            [panel.grid]
            ring_segments = 4
            tube_segments = 2
            major_radius = 0.6
            minor_radius = 0.2

            [[panel]]
            name = "a"
            [panel.grid]
            ring_segments = 8
            tube_segments = 2
            major_radius = 0.6
            minor_radius = 0.2
        "#;

        let err = parse(src).unwrap_err();
        assert!(err.to_string().contains("duplicate panel name `a`"));
    }

    #[test]
    fn empty_file_rejected() {
        assert!(parse("").is_err());
    }

    #[test]
    fn unknown_keys_rejected() {
        let src = r#"
            [[panel]]
            name = "typo"
            colour = [1.0, 0.0, 0.0]
            [panel.grid]
            ring_segments = 4
            tube_segments = 2
            major_radius = 0.6
            minor_radius = 0.2
        "#;
        assert!(parse(src).is_err());
    }

    #[test]
    fn builtin_panels_are_valid_and_unique() {
        let panels = builtin();
        assert_eq!(panels.len(), 2);
        assert_ne!(panels[0].name, panels[1].name);
        for p in panels {
            assert!(torvis_mesh::GridConfig::new(p.grid).is_ok());
        }
    }
}
