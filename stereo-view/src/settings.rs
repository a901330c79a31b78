use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stereo_core::{GlyphConfig, PickConfig, ShapeModel, ShapeParams};

use crate::camera::OrbitCameraConfig;
use crate::host::Palette;

/// Все настройки сеанса одним JSON-документом; пропущенные поля берутся по умолчанию.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pick: PickConfig,
    pub glyph: GlyphConfig,
    pub palette: Palette,
    pub camera: OrbitCameraConfig,
    pub shape: ShapeParams,
}

impl Settings {
    pub fn from_json(s: &str) -> stereo_core::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> stereo_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings {}", path.display()))?;
        let settings = Self::from_json(&text)
            .with_context(|| format!("parse settings {}", path.display()))?;
        log::debug!("settings loaded from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("write settings {}", path.display()))
    }

    /// Модель тела с размером маркеров прямого угла из настроек глифов.
    pub fn shape_model(&self) -> stereo_core::Result<ShapeModel> {
        ShapeModel::with_marker_size(self.shape, self.glyph.solid_marker_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "pick": {{ "snap_radius": 0.25 }}, "palette": {{ "line": 16711680 }} }}"#).unwrap();

        let s = Settings::load(file.path()).unwrap();
        assert_eq!(s.pick.snap_radius, 0.25);
        assert_eq!(s.pick.billboard_half_width, 0.075);
        assert_eq!(s.palette.line.to_hex(), 0xFF0000);
        assert_eq!(s.palette.angle.to_hex(), 0x00FFDF);
        assert_eq!(s.camera, OrbitCameraConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.json");
        let mut s = Settings::default();
        s.glyph.arc_segments = 12;
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), s);
        assert_eq!(s.shape_model().unwrap().params(), &s.shape);
    }

    #[test]
    fn errors_carry_the_path() {
        let err = Settings::load("/nonexistent/stereo.json").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/stereo.json"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = Settings::load(file.path()).unwrap_err();
        assert!(err.downcast_ref::<stereo_core::Error>().is_some());
    }
}
