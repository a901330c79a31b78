use cgmath::InnerSpace;

use crate::geom::{Point3, Segment};

/// Точка пересечения двух отрезков в пространстве.
///
/// Непараллельные отрезки должны лежать в одной плоскости (квадрат
/// расстояния между прямыми меньше `eps`) и принимаются с допуском `eps`
/// по параметрам, чтобы ловить касание в концах. Для коллинеарных возвращается середина
/// общего участка, для параллельных без общей части и вырожденного
/// первого отрезка будет `None`.
pub fn segment_intersection(first: &Segment, second: &Segment, eps: f64) -> Option<Point3> {
    let r = first.direction();
    let s = second.direction();
    let qp = second.a - first.a;
    let rxs = r.cross(s);
    let denom = rxs.magnitude2();

    if denom < eps {
        if qp.cross(r).magnitude2() >= eps {
            return None;
        }
        let rr = r.magnitude2();
        if rr < eps {
            log::debug!("intersection skipped: zero-length segment at {:?}", first.a);
            return None;
        }
        let t0 = qp.dot(r) / rr;
        let t1 = (qp + s).dot(r) / rr;
        let lo = t0.min(t1).max(0.0);
        let hi = t0.max(t1).min(1.0);
        if lo > hi {
            return None;
        }
        return Some(first.a + r * ((lo + hi) * 0.5));
    }

    // квадрат расстояния между прямыми: скрещивающиеся отрезки не пересекаются
    let gap = qp.dot(rxs);
    if gap * gap / denom >= eps {
        return None;
    }

    let t = qp.cross(s).dot(rxs) / denom;
    let u = qp.cross(r).dot(rxs) / denom;
    let range = -eps..=1.0 + eps;
    (range.contains(&t) && range.contains(&u)).then(|| first.a + r * t)
}
