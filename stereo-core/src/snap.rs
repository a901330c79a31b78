use cgmath::MetricSpace;

use crate::geom::{altitude_foot, Point3, Segment};
use crate::intersect::segment_intersection;

/// Тип привязки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapKind {
    Vertex,
    Midpoint,
    AltitudeFoot,
    Intersection,
}

/// Кандидат привязки
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    pub world: Point3,
    pub kind: SnapKind,
}

/// Плоский упорядоченный список кандидатов; дубликаты допустимы,
/// при равных расстояниях побеждает более ранний.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapTable {
    points: Vec<SnapPoint>,
}

impl SnapTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Кандидаты тела: вершины и середины ломаной, основания высот
    /// треугольников (по 4 точки на группу), пересечения нарисованных линий.
    pub fn for_solid(vertices: &[Point3], lines: &[Segment], eps: f64) -> Self {
        let mut table = Self::new();

        if let Some(last) = vertices.last() {
            for w in vertices.windows(2) {
                table.push(Segment::new(w[0], w[1]).midpoint(), SnapKind::Midpoint);
                table.push(w[0], SnapKind::Vertex);
            }
            table.push(*last, SnapKind::Vertex);
        }

        let mut i = 0;
        while i + 3 < vertices.len() {
            let (a, b, c) = (vertices[i], vertices[i + 1], vertices[i + 2]);
            for (apex, q, r) in [(a, b, c), (b, a, c), (c, a, b)] {
                match altitude_foot(apex, q, r) {
                    Some(foot) => table.push(foot, SnapKind::AltitudeFoot),
                    None => log::debug!("altitude foot skipped: degenerate side at {q:?}"),
                }
            }
            i += 4;
        }

        for (i, first) in lines.iter().enumerate() {
            for second in &lines[i + 1..] {
                if let Some(p) = segment_intersection(first, second, eps) {
                    table.push(p, SnapKind::Intersection);
                }
            }
        }

        table
    }

    /// Вспомогательная таблица нарисованных линий: середина, затем концы.
    pub fn for_lines(lines: &[Segment]) -> Self {
        let mut table = Self::new();
        for l in lines {
            table.push(l.midpoint(), SnapKind::Midpoint);
            table.push(l.a, SnapKind::Vertex);
            table.push(l.b, SnapKind::Vertex);
        }
        table
    }

    #[inline]
    pub fn push(&mut self, world: Point3, kind: SnapKind) {
        self.points.push(SnapPoint { world, kind });
    }

    pub fn extend(&mut self, other: SnapTable) {
        self.points.extend(other.points);
    }

    /// Ближайший кандидат не дальше `radius`.
    pub fn nearest(&self, p: Point3, radius: f64) -> Option<SnapPoint> {
        let mut best: Option<(SnapPoint, f64)> = None;
        for cand in &self.points {
            let d = cand.world.distance(p);
            if d > radius {
                continue;
            }
            let replace = match best {
                None => true,
                Some((_, bd)) => d < bd,
            };
            if replace {
                best = Some((*cand, d));
            }
        }
        best.map(|(c, _)| c)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SnapPoint> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[SnapPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<'a> IntoIterator for &'a SnapTable {
    type Item = &'a SnapPoint;
    type IntoIter = std::slice::Iter<'a, SnapPoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Итог разрешения точки попадания.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub point: Point3,
    /// `None`: точка получена проекцией на ребро.
    pub snap: Option<SnapKind>,
}

/// Притянуть `hit` к ближайшему кандидату в радиусе, иначе спроецировать
/// на ребро `fallback` без выхода за его концы.
pub fn resolve(hit: Point3, table: &SnapTable, radius: f64, fallback: &Segment) -> Resolved {
    match table.nearest(hit, radius) {
        Some(sp) => Resolved { point: sp.world, snap: Some(sp.kind) },
        None => {
            log::trace!("no snap candidate near {hit:?}, projecting onto edge");
            Resolved { point: fallback.project_clamped(hit), snap: None }
        }
    }
}
