//! Билборды: тонкое ребро превращаем в узкий четырёхугольник, развёрнутый к камере,
//! чтобы по нему можно было попасть лучом.

use cgmath::{InnerSpace, MetricSpace};

use crate::geom::{Point3, Ray, Segment};
use crate::tolerance::TOLERANCE;

/// Два треугольника вокруг ребра `source`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Billboard {
    /// Исходное ребро (не укороченное), для проекции при отсутствии снапа.
    pub source: Segment,
    pub triangles: [[Point3; 3]; 2],
}

impl Billboard {
    /// Построить билборд с полушириной `half_width`.
    /// `None`, если ребро вырождено, камера в середине ребра или на его прямой.
    pub fn generate(source: Segment, camera: Point3, half_width: f64) -> Option<Self> {
        let ab = source.direction();
        let len = ab.magnitude();
        if len < TOLERANCE {
            log::warn!("billboard skipped: edge endpoints coincide at {:?}", source.a);
            return None;
        }

        let center = source.midpoint();
        if camera.distance(center) < TOLERANCE {
            log::warn!("billboard skipped: camera sits on the edge midpoint {center:?}");
            return None;
        }
        let to_cam = (camera - center).normalize();

        let right = to_cam.cross(ab);
        if right.magnitude() < TOLERANCE {
            log::warn!("billboard skipped: camera is collinear with edge {source:?}");
            return None;
        }
        let right = right.normalize() * half_width;

        // укорачиваем с обоих концов, чтобы соседние ребра не перекрывались в вершине
        let (a, b) = if len > 2.0 * half_width {
            let margin = ab / len * half_width;
            (source.a + margin, source.b - margin)
        } else {
            (source.a, source.b)
        };

        Some(Self {
            source,
            triangles: [[a - right, a + right, b - right], [b - right, a + right, b + right]],
        })
    }

    /// Шесть вершин подряд, как в вершинном буфере.
    pub fn vertices(&self) -> [Point3; 6] {
        let [t0, t1] = self.triangles;
        [t0[0], t0[1], t0[2], t1[0], t1[1], t1[2]]
    }

    /// Расстояние вдоль луча до ближайшего попадания.
    pub fn raycast(&self, ray: &Ray) -> Option<f64> {
        self.triangles
            .iter()
            .filter_map(|tri| ray_triangle(ray, tri))
            .min_by(|x, y| x.total_cmp(y))
    }
}

/// Билборды по последовательности точек с шагом `stride`:
/// 1: ломаная (каждая соседняя пара), 2: независимые пары.
pub fn build_billboards(
    points: &[Point3],
    stride: usize,
    camera: Point3,
    half_width: f64,
) -> Vec<Billboard> {
    if points.len() < 2 {
        return Vec::new();
    }
    (0..points.len() - 1)
        .step_by(stride.max(1))
        .filter_map(|i| Billboard::generate(Segment::new(points[i], points[i + 1]), camera, half_width))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Индекс билборда в переданном срезе.
    pub index: usize,
    pub distance: f64,
    pub point: Point3,
}

/// Ближайшее попадание луча по набору билбордов.
pub fn nearest_hit(billboards: &[Billboard], ray: &Ray) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;
    for (index, bb) in billboards.iter().enumerate() {
        if let Some(distance) = bb.raycast(ray) {
            let replace = match best {
                None => true,
                Some(b) => distance < b.distance,
            };
            if replace {
                best = Some(RayHit { index, distance, point: ray.at(distance) });
            }
        }
    }
    best
}

/// Möller–Trumbore, двусторонний.
fn ray_triangle(ray: &Ray, tri: &[Point3; 3]) -> Option<f64> {
    const EPS: f64 = 1.0e-12;

    let edge1 = tri[1] - tri[0];
    let edge2 = tri[2] - tri[0];
    let h = ray.dir.cross(edge2);
    let det = edge1.dot(h);
    if det.abs() < EPS {
        return None;
    }
    let inv = 1.0 / det;
    let s = ray.origin - tri[0];
    let u = inv * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = inv * ray.dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = inv * edge2.dot(q);
    (t > EPS).then_some(t)
}
