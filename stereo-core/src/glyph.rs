use std::f64::consts::FRAC_PI_2;

use cgmath::InnerSpace;

use crate::config::GlyphConfig;
use crate::geom::Point3;
use crate::tolerance::TOLERANCE;

/// Геометрия для отрисовки угла с вершиной в B.
#[derive(Debug, Clone, PartialEq)]
pub enum AngleGlyph {
    /// Одна из сторон вырождена, либо стороны коллинеарны.
    None,
    /// Три угла квадрата: на BC, диагональный, на перпендикуляре.
    RightAngle([Point3; 3]),
    /// Дуга от BC к BA.
    Arc(Vec<Point3>),
}

/// Угол ABC в радианах; `None` при нулевой стороне.
pub fn angle_at(a: Point3, b: Point3, c: Point3) -> Option<f64> {
    let ba = a - b;
    let bc = c - b;
    if ba.magnitude() < TOLERANCE || bc.magnitude() < TOLERANCE {
        return None;
    }
    Some(ba.normalize().dot(bc.normalize()).clamp(-1.0, 1.0).acos())
}

pub fn angle_glyph(a: Point3, b: Point3, c: Point3, cfg: &GlyphConfig) -> AngleGlyph {
    let Some(angle) = angle_at(a, b, c) else {
        log::warn!("angle glyph skipped: zero-length leg at {b:?}");
        return AngleGlyph::None;
    };

    // базис плоскости угла: right вдоль BC, up к BA
    let right = (c - b).normalize();
    let normal = right.cross((a - b).normalize());
    if normal.magnitude() < TOLERANCE {
        log::debug!("angle glyph skipped: legs are collinear at {b:?}");
        return AngleGlyph::None;
    }
    let up = normal.normalize().cross(right).normalize();

    if (angle - FRAC_PI_2).abs() < cfg.right_angle_tolerance {
        let r = cfg.arc_radius / 2.0;
        return AngleGlyph::RightAngle([b + right * r, b + right * r + up * r, b + up * r]);
    }

    let n = cfg.arc_segments.max(1);
    let arc = (0..=n)
        .map(|i| {
            let t = angle * f64::from(i) / f64::from(n);
            b + right * (cfg.arc_radius * t.cos()) + up * (cfg.arc_radius * t.sin())
        })
        .collect();
    AngleGlyph::Arc(arc)
}
