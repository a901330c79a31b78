use cgmath::MetricSpace;
use serde::{Deserialize, Serialize};
use stereo_core::{angle_at, angle_glyph, AngleGlyph, Color, GlyphConfig, Point3, Segment};

use crate::history::{History, UndoTag};

/// Отрезок-измерение
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineAnnotation {
    pub a: Point3,
    pub b: Point3,
    pub color: Color,
}

impl LineAnnotation {
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.a, self.b)
    }
}

/// Угол ABC с вершиной в B.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleAnnotation {
    pub a: Point3,
    pub b: Point3,
    pub c: Point3,
    pub color: Color,
}

impl AngleAnnotation {
    /// 0 для вырожденного угла.
    pub fn radians(&self) -> f64 {
        angle_at(self.a, self.b, self.c).unwrap_or(0.0)
    }

    pub fn degrees(&self) -> f64 {
        self.radians().to_degrees()
    }

    pub fn glyph(&self, cfg: &GlyphConfig) -> AngleGlyph {
        angle_glyph(self.a, self.b, self.c, cfg)
    }
}

/// Копия состояния для рендера или сохранения.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSnapshot {
    pub lines: Vec<LineAnnotation>,
    pub angles: Vec<AngleAnnotation>,
    pub undo: Vec<UndoTag>,
}

/// Зафиксированные аннотации и стек отмены.
///
/// Длина стека всегда равна сумме длин списков: каждая фиксация кладёт
/// ровно один тег, каждая отмена снимает ровно один элемент.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    lines: Vec<LineAnnotation>,
    angles: Vec<AngleAnnotation>,
    history: History,
}

impl AnnotationStore {
    pub fn commit_line(&mut self, line: LineAnnotation) {
        log::debug!("line committed, length {:.4}", line.length());
        self.lines.push(line);
        self.history.record(UndoTag::Line);
    }

    pub fn commit_angle(&mut self, angle: AngleAnnotation) {
        log::debug!("angle committed, {:.2} deg", angle.degrees());
        self.angles.push(angle);
        self.history.record(UndoTag::Angle);
    }

    /// Снять последнюю фиксацию. На пустом стеке ничего не делает.
    pub fn undo(&mut self) -> Option<UndoTag> {
        let tag = self.history.pop()?;
        let removed = match tag {
            UndoTag::Line => self.lines.pop().is_some(),
            UndoTag::Angle => self.angles.pop().is_some(),
        };
        debug_assert!(removed, "undo tag {tag:?} without annotation");
        Some(tag)
    }

    /// Очистить оба списка вместе со стеком отмены.
    pub fn clear_all(&mut self) {
        self.lines.clear();
        self.angles.clear();
        self.history.clear();
    }

    pub fn lines(&self) -> &[LineAnnotation] {
        &self.lines
    }

    pub fn angles(&self) -> &[AngleAnnotation] {
        &self.angles
    }

    pub fn undo_tags(&self) -> &[UndoTag] {
        self.history.tags()
    }

    pub fn line_segments(&self) -> Vec<Segment> {
        self.lines.iter().map(LineAnnotation::segment).collect()
    }

    /// Концы линий подряд (A0, B0, A1, B1, ...), шаг 2 для билбордов.
    pub fn line_points(&self) -> Vec<Point3> {
        self.lines.iter().flat_map(|l| [l.a, l.b]).collect()
    }

    pub fn snapshot(&self) -> AnnotationSnapshot {
        AnnotationSnapshot {
            lines: self.lines.clone(),
            angles: self.angles.clone(),
            undo: self.history.tags().to_vec(),
        }
    }

    pub fn is_consistent(&self) -> bool {
        let n_lines = self.undo_tags().iter().filter(|t| **t == UndoTag::Line).count();
        n_lines == self.lines.len() && self.history.len() == self.lines.len() + self.angles.len()
    }
}
