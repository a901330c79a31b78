//! Процедурные опорные тела. Каждое тело отдаётся одной ломаной (последовательностью
//! вершин), по которой строятся билборды и таблица привязок.

use std::f64::consts::{FRAC_PI_2, PI};

use cgmath::{InnerSpace, MetricSpace};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geom::{Point3, Vector3};
use crate::tolerance::TOLERANCE;

/// Размер маркера прямого угла в основании по умолчанию.
pub const RIGHT_ANGLE_MARKER: f64 = 0.2;

const CIRCLE_STEP: f64 = 0.02;
const CIRCLE_SWEEP: f64 = 2.1 * PI;

/// Вид тела вместе с собственными параметрами.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeKind {
    Scalene { a: f64, b: f64, c: f64 },
    Right { a: f64, b: f64 },
    IsoscelesRight { a: f64 },
    Isosceles { base: f64, leg: f64 },
    Equilateral { a: f64 },
    RegularPyramid { sides: u32, radius: f64 },
    RectPyramid { a: f64, b: f64 },
    RegularPrism { sides: u32, radius: f64 },
    Cuboid { a: f64, b: f64 },
}

/// Какая окружность основания задаёт проекцию вершины тетраэдра.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleMode {
    /// Вершина над центроидом, окружности нет.
    #[default]
    None,
    Inscribed,
    Circumscribed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    pub kind: ShapeKind,
    pub height: f64,
    /// Учитывается только для треугольных оснований.
    pub circle: CircleMode,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Scalene { a: 2.0, b: 3.0, c: 4.0 },
            height: 2.0,
            circle: CircleMode::None,
        }
    }
}

/// Построенное тело.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    /// Каркас одной ломаной.
    pub vertices: Vec<Point3>,
    /// Вписанная/описанная окружность основания вокруг начала координат.
    pub circle: Vec<Point3>,
    pub circle_radius: f64,
    /// Пары точек отрезков маркеров прямого угла.
    pub right_angle_marks: Vec<Point3>,
}

impl Solid {
    pub fn build(params: &ShapeParams) -> Result<Self> {
        Self::build_with_marker(params, RIGHT_ANGLE_MARKER)
    }

    pub fn build_with_marker(params: &ShapeParams, marker_size: f64) -> Result<Self> {
        let h = positive("height", params.height)?;
        match params.kind {
            ShapeKind::Scalene { a, b, c } => {
                let (a, b, c) = (positive("a", a)?, positive("b", b)?, positive("c", c)?);
                if a + b <= c || a + c <= b || b + c <= a {
                    return Err(Error::InvalidTriangle { a, b, c });
                }
                let cos = (a * a + c * c - b * b) / (2.0 * a * c);
                let sin = (1.0 - cos * cos).max(0.0).sqrt();
                let base = [p(0.0, 0.0), p(a, 0.0), p(c * cos, c * sin)];
                tetrahedron(base, h, params.circle, marker_size)
            }
            ShapeKind::Right { a, b } => {
                let (a, b) = (positive("a", a)?, positive("b", b)?);
                tetrahedron([p(0.0, 0.0), p(a, 0.0), p(0.0, b)], h, params.circle, marker_size)
            }
            ShapeKind::IsoscelesRight { a } => {
                let a = positive("a", a)?;
                tetrahedron([p(0.0, 0.0), p(a, 0.0), p(0.0, a)], h, params.circle, marker_size)
            }
            ShapeKind::Isosceles { base, leg } => {
                let (base, leg) = (positive("base", base)?, positive("leg", leg)?);
                if leg <= base / 2.0 {
                    return Err(Error::InvalidTriangle { a: base, b: leg, c: leg });
                }
                let height = (leg * leg - base * base / 4.0).sqrt();
                let tri = [p(-base / 2.0, 0.0), p(base / 2.0, 0.0), p(0.0, height)];
                tetrahedron(tri, h, params.circle, marker_size)
            }
            ShapeKind::Equilateral { a } => {
                let a = positive("a", a)?;
                let height = a * 3f64.sqrt() / 2.0;
                tetrahedron([p(-a / 2.0, 0.0), p(a / 2.0, 0.0), p(0.0, height)], h, params.circle, marker_size)
            }
            ShapeKind::RegularPyramid { sides, radius } => {
                let ring = regular_ring(sides, positive("radius", radius)?)?;
                let top = Point3::new(0.0, h, 0.0);
                let mut vertices = ring.clone();
                for v in &ring[1..] {
                    vertices.push(*v);
                    vertices.push(top);
                }
                Ok(Self::wire(vertices))
            }
            ShapeKind::RectPyramid { a, b } => {
                let [qa, qb, qc, qd] = rect(positive("a", a)?, positive("b", b)?);
                let top = qa + Vector3::new(0.0, h, 0.0);
                Ok(Self::wire(vec![qa, qb, qd, qc, qa, top, qb, top, qd, top, qc]))
            }
            ShapeKind::RegularPrism { sides, radius } => {
                let ring = regular_ring(sides, positive("radius", radius)?)?;
                let up = Vector3::new(0.0, h, 0.0);
                let mut vertices = ring.clone();
                vertices.extend(ring.iter().map(|v| *v + up));
                for v in &ring {
                    vertices.extend([*v, *v + up, *v]);
                }
                Ok(Self::wire(vertices))
            }
            ShapeKind::Cuboid { a, b } => {
                let [qa, qb, qc, qd] = rect(positive("a", a)?, positive("b", b)?);
                let up = Vector3::new(0.0, h, 0.0);
                let (ta, tb, tc, td) = (qa + up, qb + up, qc + up, qd + up);
                Ok(Self::wire(vec![
                    qa, qb, qd, qc, qa, ta, tb, td, tc, ta, tb, qb, qd, td, tc, qc,
                ]))
            }
        }
    }

    fn wire(vertices: Vec<Point3>) -> Self {
        Self { vertices, ..Self::default() }
    }
}

/// Параметры тела и последнее успешно построенное тело.
#[derive(Debug, Clone)]
pub struct ShapeModel {
    params: ShapeParams,
    solid: Solid,
    marker_size: f64,
}

impl ShapeModel {
    pub fn new(params: ShapeParams) -> Result<Self> {
        Self::with_marker_size(params, RIGHT_ANGLE_MARKER)
    }

    pub fn with_marker_size(params: ShapeParams, marker_size: f64) -> Result<Self> {
        let solid = Solid::build_with_marker(&params, marker_size)?;
        Ok(Self { params, solid, marker_size })
    }

    /// Перестроить тело. При ошибке остаётся прежнее тело и прежние параметры.
    pub fn set_params(&mut self, params: ShapeParams) -> Result<()> {
        match Solid::build_with_marker(&params, self.marker_size) {
            Ok(solid) => {
                log::debug!("solid rebuilt: {:?}, {} vertices", params.kind, solid.vertices.len());
                self.params = params;
                self.solid = solid;
                Ok(())
            }
            Err(e) => {
                log::warn!("solid parameters rejected: {e}");
                Err(e)
            }
        }
    }

    pub fn params(&self) -> &ShapeParams {
        &self.params
    }

    pub fn solid(&self) -> &Solid {
        &self.solid
    }
}

impl Default for ShapeModel {
    fn default() -> Self {
        let params = ShapeParams::default();
        let solid = Solid::build(&params).unwrap_or_default();
        Self { params, solid, marker_size: RIGHT_ANGLE_MARKER }
    }
}

#[inline]
fn p(x: f64, z: f64) -> Point3 {
    Point3::new(x, 0.0, z)
}

fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonPositive { name, value })
    }
}

fn rect(a: f64, b: f64) -> [Point3; 4] {
    [p(-a / 2.0, -b / 2.0), p(a / 2.0, -b / 2.0), p(-a / 2.0, b / 2.0), p(a / 2.0, b / 2.0)]
}

/// n + 1 точка: кольцо замкнуто повтором последней вершины в начале.
fn regular_ring(sides: u32, radius: f64) -> Result<Vec<Point3>> {
    if sides < 3 {
        return Err(Error::TooFewSides(sides));
    }
    let n = f64::from(sides);
    Ok((-1..i64::from(sides))
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / n + FRAC_PI_2;
            p(radius * angle.cos(), radius * angle.sin())
        })
        .collect())
}

fn tetrahedron(base: [Point3; 3], h: f64, mode: CircleMode, marker_size: f64) -> Result<Solid> {
    let [a, b, c] = base;
    let (center, radius) = match mode {
        CircleMode::None => (Point3::new((a.x + b.x + c.x) / 3.0, 0.0, (a.z + b.z + c.z) / 3.0), 0.0),
        CircleMode::Circumscribed => {
            let center = circumcenter(a, b, c).ok_or(Error::DegenerateTriangle)?;
            (center, a.distance(center))
        }
        CircleMode::Inscribed => incircle(a, b, c).ok_or(Error::DegenerateTriangle)?,
    };

    // сдвигаем так, чтобы проекция вершины D попала в начало координат
    let offset = Vector3::new(center.x, 0.0, center.z);
    let (a, b, c) = (a - offset, b - offset, c - offset);
    let d = Point3::new(0.0, h, 0.0);
    let o = Point3::new(0.0, 0.0, 0.0);

    let vertices = vec![a, b, c, a, a, d, b, a, b, c, d, b, a, c, d, a, d, o];

    let circle = if radius > 0.0 {
        let steps = (CIRCLE_SWEEP / CIRCLE_STEP) as usize;
        (0..=steps)
            .map(|i| {
                let t = i as f64 * CIRCLE_STEP;
                Point3::new(radius * t.sin(), 0.0, radius * t.cos())
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut right_angle_marks = Vec::new();
    for (vertex, q, r) in [(a, b, c), (b, a, c), (c, a, b)] {
        push_right_angle_mark(&mut right_angle_marks, q, vertex, r, marker_size);
    }

    Ok(Solid { vertices, circle, circle_radius: radius, right_angle_marks })
}

fn circumcenter(a: Point3, b: Point3, c: Point3) -> Option<Point3> {
    let d = 2.0 * (a.x * (b.z - c.z) + b.x * (c.z - a.z) + c.x * (a.z - b.z));
    if d.abs() < TOLERANCE {
        return None;
    }
    let (sa, sb, sc) = (a.x * a.x + a.z * a.z, b.x * b.x + b.z * b.z, c.x * c.x + c.z * c.z);
    let x = (sa * (b.z - c.z) + sb * (c.z - a.z) + sc * (a.z - b.z)) / d;
    let z = (sa * (c.x - b.x) + sb * (a.x - c.x) + sc * (b.x - a.x)) / d;
    Some(Point3::new(x, 0.0, z))
}

/// Центр и радиус вписанной окружности.
fn incircle(a: Point3, b: Point3, c: Point3) -> Option<(Point3, f64)> {
    let (la, lb, lc) = (b.distance(c), a.distance(c), a.distance(b));
    let s = (la + lb + lc) / 2.0;
    let area2 = s * (s - la) * (s - lb) * (s - lc);
    if area2 < TOLERANCE {
        return None;
    }
    let w = la + lb + lc;
    let center = Point3::new(
        (la * a.x + lb * b.x + lc * c.x) / w,
        0.0,
        (la * a.z + lb * b.z + lc * c.z) / w,
    );
    Some((center, area2.sqrt() / s))
}

/// Квадратик в вершине `vertex`, если угол q-vertex-r прямой.
fn push_right_angle_mark(out: &mut Vec<Point3>, q: Point3, vertex: Point3, r: Point3, size: f64) {
    let vq = q - vertex;
    let vr = r - vertex;
    if vq.magnitude() < TOLERANCE || vr.magnitude() < TOLERANCE {
        return;
    }
    let (vq, vr) = (vq.normalize(), vr.normalize());
    if vq.dot(vr).abs() >= TOLERANCE {
        return;
    }
    let c1 = vertex + vq * size;
    let c2 = c1 + vr * size;
    let c3 = vertex + vr * size;
    out.extend([c1, c2, c2, c3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(kind: ShapeKind, circle: CircleMode) -> ShapeParams {
        ShapeParams { kind, height: 2.0, circle }
    }

    #[test]
    fn scalene_default_is_tetrahedron_over_origin() {
        let solid = Solid::build(&ShapeParams::default()).unwrap();
        assert_eq!(solid.vertices.len(), 18);
        let apex = solid.vertices[5];
        crate::assert_near!(apex, Point3::new(0.0, 2.0, 0.0));
        assert_eq!(solid.vertices[17], Point3::new(0.0, 0.0, 0.0));
        // центроид основания в начале координат
        let [a, b, c] = [solid.vertices[0], solid.vertices[1], solid.vertices[2]];
        crate::assert_near!(Point3::new((a.x + b.x + c.x) / 3.0, 0.0, (a.z + b.z + c.z) / 3.0), Point3::new(0.0, 0.0, 0.0));
        assert!((a.distance(b) - 2.0).abs() < 1.0e-9);
        assert!((b.distance(c) - 3.0).abs() < 1.0e-9);
        assert!((a.distance(c) - 4.0).abs() < 1.0e-9);
        assert!(solid.circle.is_empty());
        assert!(solid.right_angle_marks.is_empty());
    }

    #[test]
    fn invalid_triangle_is_rejected() {
        let err = Solid::build(&params(ShapeKind::Scalene { a: 1.0, b: 1.0, c: 3.0 }, CircleMode::None));
        assert!(matches!(err, Err(Error::InvalidTriangle { .. })));
        let err = Solid::build(&params(ShapeKind::Isosceles { base: 4.0, leg: 2.0 }, CircleMode::None));
        assert!(matches!(err, Err(Error::InvalidTriangle { .. })));
        let err = Solid::build(&params(ShapeKind::Equilateral { a: -1.0 }, CircleMode::None));
        assert!(matches!(err, Err(Error::NonPositive { name: "a", .. })));
        let err = Solid::build(&params(ShapeKind::RegularPrism { sides: 2, radius: 1.0 }, CircleMode::None));
        assert!(matches!(err, Err(Error::TooFewSides(2))));
    }

    #[test]
    fn circles_are_centred_on_apex_projection() {
        let kind = ShapeKind::Right { a: 3.0, b: 4.0 };
        let out = Solid::build(&params(kind, CircleMode::Circumscribed)).unwrap();
        assert!((out.circle_radius - 2.5).abs() < 1.0e-9);
        // все вершины основания на описанной окружности
        for v in &out.vertices[..3] {
            assert!((v.distance(Point3::new(0.0, 0.0, 0.0)) - 2.5).abs() < 1.0e-9);
        }
        assert!(out.circle.iter().all(|p| (p.distance(Point3::new(0.0, 0.0, 0.0)) - 2.5).abs() < 1.0e-9));

        let inc = Solid::build(&params(kind, CircleMode::Inscribed)).unwrap();
        assert!((inc.circle_radius - 1.0).abs() < 1.0e-9);
    }

    #[test]
    fn right_triangle_gets_one_marker() {
        let solid = Solid::build(&params(ShapeKind::IsoscelesRight { a: 2.0 }, CircleMode::None)).unwrap();
        assert_eq!(solid.right_angle_marks.len(), 4);
        assert_eq!(solid.right_angle_marks[1], solid.right_angle_marks[2]);
    }

    #[test]
    fn polyhedra_vertex_counts() {
        let n = 5;
        let pyr = Solid::build(&params(ShapeKind::RegularPyramid { sides: n, radius: 1.0 }, CircleMode::None)).unwrap();
        assert_eq!(pyr.vertices.len(), (n as usize + 1) + 2 * n as usize);
        crate::assert_near!(pyr.vertices[0], pyr.vertices[n as usize]);

        let prism = Solid::build(&params(ShapeKind::RegularPrism { sides: n, radius: 1.0 }, CircleMode::None)).unwrap();
        assert_eq!(prism.vertices.len(), 5 * (n as usize + 1));

        let cube = Solid::build(&params(ShapeKind::Cuboid { a: 1.0, b: 1.0 }, CircleMode::None)).unwrap();
        assert_eq!(cube.vertices.len(), 16);
        let rp = Solid::build(&params(ShapeKind::RectPyramid { a: 1.0, b: 2.0 }, CircleMode::None)).unwrap();
        assert_eq!(rp.vertices.len(), 11);
        assert_eq!(rp.vertices[5], Point3::new(-0.5, 2.0, -1.0));
    }

    #[test]
    fn model_keeps_last_good_solid() {
        let mut model = ShapeModel::default();
        let before = model.solid().clone();
        let bad = params(ShapeKind::Scalene { a: 1.0, b: 1.0, c: 5.0 }, CircleMode::None);
        assert!(model.set_params(bad).is_err());
        assert_eq!(model.solid(), &before);
        assert_eq!(model.params(), &ShapeParams::default());

        model.set_params(params(ShapeKind::Cuboid { a: 1.0, b: 2.0 }, CircleMode::None)).unwrap();
        assert_eq!(model.solid().vertices.len(), 16);
    }

    #[test]
    fn params_from_json() {
        let json = r#"{ "kind": { "kind": "regular_pyramid", "sides": 4, "radius": 1.5 }, "circle": "inscribed" }"#;
        let p: ShapeParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.kind, ShapeKind::RegularPyramid { sides: 4, radius: 1.5 });
        assert_eq!(p.height, 2.0);
        assert_eq!(p.circle, CircleMode::Inscribed);
    }
}
