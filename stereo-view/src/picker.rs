//! Пикинг по лучу и автомат кликов.
//!
//! Каждый пик строит билборды заново по свежему снимку тела и нарисованных
//! линий, находит ближайшее попадание и притягивает его к таблице привязок.

use cgmath::MetricSpace;
use stereo_core::{
    build_billboards, nearest_hit, resolve, Billboard, PickConfig, Point3, Ray, Segment, SnapTable,
};

use crate::annotations::{AngleAnnotation, AnnotationSnapshot, AnnotationStore, LineAnnotation};
use crate::history::UndoTag;
use crate::host::{Collaborators, Viewport};
use crate::selection::{DrawMode, Selection};

#[derive(Debug)]
pub struct Picker {
    cfg: PickConfig,
    collab: Collaborators,
    viewport: Viewport,
    mode: DrawMode,
    selection: Selection,
    store: AnnotationStore,
}

impl Picker {
    pub fn new(cfg: PickConfig, collab: Collaborators) -> Self {
        Self {
            cfg,
            collab,
            viewport: Viewport::default(),
            mode: DrawMode::default(),
            selection: Selection::default(),
            store: AnnotationStore::default(),
        }
    }

    pub fn config(&self) -> &PickConfig {
        &self.cfg
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Смена режима сбрасывает незавершённый выбор.
    pub fn set_mode(&mut self, mode: DrawMode) {
        log::debug!("draw mode {:?} -> {mode:?}", self.mode);
        self.mode = mode;
        self.selection.clear();
        self.redraw();
    }

    /// Пик в пикселях вьюпорта. При `quick` только вычисляем точку, без изменения состояния.
    pub fn pick(&mut self, x: f64, y: f64, quick: bool) -> Option<Point3> {
        let (_, point) = self.cast(x, y);
        let point = point?;
        if quick {
            return Some(point);
        }
        self.advance(point);
        self.redraw();
        Some(point)
    }

    /// Протянуть превью линии за курсором. Без попадания конец висит
    /// в единице от камеры вдоль луча.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> Option<Point3> {
        self.selection.preview()?;
        let (ray, point) = self.cast(x, y);
        let end = point.unwrap_or_else(|| ray.at(1.0));
        self.selection.stretch_preview(end);
        self.redraw();
        Some(end)
    }

    pub fn cancel(&mut self) {
        self.selection.clear();
        self.redraw();
    }

    pub fn undo(&mut self) -> Option<UndoTag> {
        let tag = self.store.undo();
        if tag.is_some() {
            self.redraw();
        }
        tag
    }

    /// Очистить все аннотации, стек отмены и незавершённый выбор.
    pub fn clear_all(&mut self) {
        self.store.clear_all();
        self.selection.clear();
        self.redraw();
    }

    /// Текущие кандидаты привязки: тело, затем нарисованные линии.
    pub fn snap_targets(&self) -> SnapTable {
        self.snap_table(&self.collab.solid.current_vertices())
    }

    /// Текущие билборды для отладочной отрисовки.
    pub fn billboards(&self) -> Vec<Billboard> {
        self.build_billboards(&self.collab.solid.current_vertices(), self.collab.camera.position())
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn snapshot(&self) -> AnnotationSnapshot {
        self.store.snapshot()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn pinned(&self) -> &[Point3] {
        self.selection.pinned()
    }

    pub fn preview(&self) -> Option<Segment> {
        self.selection.preview()
    }

    pub fn markers(&self) -> &[Point3] {
        self.selection.markers()
    }

    fn build_billboards(&self, vertices: &[Point3], camera: Point3) -> Vec<Billboard> {
        let w = self.cfg.billboard_half_width;
        let mut bbs = build_billboards(vertices, 1, camera, w);
        bbs.extend(build_billboards(&self.store.line_points(), 2, camera, w));
        bbs
    }

    fn snap_table(&self, vertices: &[Point3]) -> SnapTable {
        let lines = self.store.line_segments();
        let mut table = SnapTable::for_solid(vertices, &lines, self.cfg.intersection_eps);
        table.extend(SnapTable::for_lines(&lines));
        table
    }

    /// Луч через пиксель и разрешённая точка попадания, если она есть.
    fn cast(&self, x: f64, y: f64) -> (Ray, Option<Point3>) {
        let origin = self.collab.camera.position();
        let ray = Ray::new(origin, self.collab.camera.screen_to_world_ray(x, y, self.viewport));

        let vertices = self.collab.solid.current_vertices();
        let bbs = self.build_billboards(&vertices, origin);
        let Some(hit) = nearest_hit(&bbs, &ray) else {
            log::trace!("pick ({x}, {y}) missed {} billboards", bbs.len());
            return (ray, None);
        };

        let table = self.snap_table(&vertices);
        let resolved = resolve(hit.point, &table, self.cfg.snap_radius, &bbs[hit.index].source);
        log::trace!("pick ({x}, {y}) -> {:?} via {:?}", resolved.point, resolved.snap);
        (ray, Some(resolved.point))
    }

    fn advance(&mut self, p: Point3) {
        let pinned = self.selection.pinned();
        match (self.mode, pinned.len()) {
            (DrawMode::Lines, 0) => {
                self.selection.pin(p);
                self.selection.open_preview(p);
            }
            (DrawMode::Angles, 0) | (DrawMode::Angles, 1) => {
                self.selection.pin(p);
                self.selection.drop_marker(p);
            }
            (DrawMode::Lines, _) => {
                let a = pinned[0];
                if a.distance(p) > self.cfg.degenerate_eps {
                    let color = self.collab.colors.line_color();
                    self.store.commit_line(LineAnnotation { a, b: p, color });
                    self.selection.clear();
                } else {
                    log::debug!("degenerate line at {p:?} ignored");
                    self.selection.drop_marker(p);
                }
            }
            (DrawMode::Angles, _) => {
                let (a, b) = (pinned[0], pinned[1]);
                let color = self.collab.colors.angle_color();
                self.store.commit_angle(AngleAnnotation { a, b, c: p, color });
                self.selection.clear();
            }
        }
    }

    fn redraw(&mut self) {
        self.collab.scene.request_redraw();
    }
}
