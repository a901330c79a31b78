use serde::{Deserialize, Serialize};
use stereo_core::{Point3, Segment};

/// Режим рисования
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    #[default]
    Lines,
    Angles,
}

impl DrawMode {
    /// Сколько точек нужно для фиксации.
    pub fn points_needed(self) -> usize {
        match self {
            DrawMode::Lines => 2,
            DrawMode::Angles => 3,
        }
    }
}

/// Незавершённый выбор: закреплённые точки, маркеры и живое превью линии.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pinned: Vec<Point3>,
    markers: Vec<Point3>,
    preview: Option<Segment>,
}

impl Selection {
    #[inline]
    pub fn pinned(&self) -> &[Point3] {
        &self.pinned
    }

    #[inline]
    pub fn markers(&self) -> &[Point3] {
        &self.markers
    }

    #[inline]
    pub fn preview(&self) -> Option<Segment> {
        self.preview
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty() && self.markers.is_empty() && self.preview.is_none()
    }

    pub fn pin(&mut self, p: Point3) {
        self.pinned.push(p);
    }

    pub fn drop_marker(&mut self, p: Point3) {
        self.markers.push(p);
    }

    /// Превью начинается вырожденным отрезком из первой точки.
    pub fn open_preview(&mut self, start: Point3) {
        self.preview = Some(Segment::new(start, start));
    }

    /// Передвинуть свободный конец превью; `false`, если превью нет.
    pub fn stretch_preview(&mut self, end: Point3) -> bool {
        match &mut self.preview {
            Some(seg) => {
                seg.b = end;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.pinned.clear();
        self.markers.clear();
        self.preview = None;
    }
}
