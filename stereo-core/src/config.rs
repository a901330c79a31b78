use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Допуски пикинга и снапа.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickConfig {
    /// Полуширина билборда вокруг ребра.
    pub billboard_half_width: f64,
    /// Радиус притяжения к кандидатам снапа.
    pub snap_radius: f64,
    /// Минимальная длина линии.
    pub degenerate_eps: f64,
    pub intersection_eps: f64,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self {
            billboard_half_width: 0.075,
            snap_radius: 0.15,
            degenerate_eps: 1.0e-6,
            intersection_eps: 1.0e-6,
        }
    }
}

impl PickConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Параметры глифов угла и маркеров прямого угла тела.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    pub arc_radius: f64,
    pub arc_segments: u32,
    /// Отклонение от π/2 (рад), при котором рисуется квадрат вместо дуги.
    pub right_angle_tolerance: f64,
    pub solid_marker_size: f64,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            arc_radius: 0.4,
            arc_segments: 32,
            right_angle_tolerance: 0.01,
            solid_marker_size: 0.2,
        }
    }
}
