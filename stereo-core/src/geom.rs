use cgmath::{EuclideanSpace, InnerSpace, MetricSpace};

use crate::tolerance::TOLERANCE;

pub type Point3 = cgmath::Point3<f64>;
pub type Vector3 = cgmath::Vector3<f64>;

/// Отрезок A→B: ребро тела или нарисованная линия.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point3,
    pub b: Point3,
}

impl Segment {
    #[inline]
    pub fn new(a: Point3, b: Point3) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn midpoint(&self) -> Point3 {
        self.a.midpoint(self.b)
    }

    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.b - self.a
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Параметр t ∈ [0, 1] ортогональной проекции `p` на отрезок.
    /// Для вырожденного отрезка 0.
    pub fn clamped_parameter(&self, p: Point3) -> f64 {
        let ab = self.direction();
        let len2 = ab.magnitude2();
        if len2 < TOLERANCE {
            return 0.0;
        }
        ((p - self.a).dot(ab) / len2).clamp(0.0, 1.0)
    }

    /// Проекция точки на отрезок без выхода за концы.
    #[inline]
    pub fn project_clamped(&self, p: Point3) -> Point3 {
        self.a + self.direction() * self.clamped_parameter(p)
    }
}

/// Основание высоты из `apex` на прямую (q, r). Точка может лежать вне отрезка.
pub fn altitude_foot(apex: Point3, q: Point3, r: Point3) -> Option<Point3> {
    let qr = r - q;
    let len2 = qr.magnitude2();
    if len2 < TOLERANCE {
        return None;
    }
    Some(q + qr * ((apex - q).dot(qr) / len2))
}

/// Луч из камеры; `dir` ожидается нормированным.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub dir: Vector3,
}

impl Ray {
    #[inline]
    pub fn new(origin: Point3, dir: Vector3) -> Self {
        Self { origin, dir }
    }

    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.dir * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_is_clamped_to_segment() {
        let s = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0));
        assert_eq!(s.project_clamped(Point3::new(0.5, 1.0, 0.0)), Point3::new(0.5, 0.0, 0.0));
        assert_eq!(s.project_clamped(Point3::new(-3.0, 1.0, 0.0)), s.a);
        assert_eq!(s.project_clamped(Point3::new(7.0, 0.0, -1.0)), s.b);
    }

    #[test]
    fn degenerate_segment_projects_to_start() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let s = Segment::new(p, p);
        assert_eq!(s.project_clamped(Point3::new(4.0, 0.0, 0.0)), p);
    }

    #[test]
    fn altitude_foot_may_leave_the_side() {
        // тупой угол при A: основание высоты из C уходит за A
        let foot = altitude_foot(
            Point3::new(-1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        )
        .unwrap();
        assert_eq!(foot, Point3::new(-1.0, 0.0, 0.0));
        assert!(altitude_foot(foot, foot, foot).is_none());
    }
}
