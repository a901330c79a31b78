//! Узкие контракты с хостом: камера, источник тела, сцена, палитра.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use stereo_core::{Color, Point3, ShapeModel, Vector3};

/// Размер области вывода в пикселях.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        (self.width / self.height.max(1.0)).max(1.0e-4)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0 }
    }
}

pub trait CameraProvider {
    fn position(&self) -> Point3;
    /// Нормированное направление луча через пиксель (x, y).
    fn screen_to_world_ray(&self, x: f64, y: f64, viewport: Viewport) -> Vector3;
}

pub trait SolidSource {
    /// Свежий снимок вершин на каждый пик.
    fn current_vertices(&self) -> Vec<Point3>;
}

pub trait SceneSink {
    fn request_redraw(&mut self);
}

/// Цвета читаются в момент фиксации и замораживаются в аннотации.
pub trait ColorSource {
    fn line_color(&self) -> Color;
    fn angle_color(&self) -> Color;
}

impl<T: CameraProvider + ?Sized> CameraProvider for Rc<RefCell<T>> {
    fn position(&self) -> Point3 {
        self.borrow().position()
    }
    fn screen_to_world_ray(&self, x: f64, y: f64, viewport: Viewport) -> Vector3 {
        self.borrow().screen_to_world_ray(x, y, viewport)
    }
}

impl<T: SolidSource + ?Sized> SolidSource for Rc<RefCell<T>> {
    fn current_vertices(&self) -> Vec<Point3> {
        self.borrow().current_vertices()
    }
}

impl<T: SceneSink + ?Sized> SceneSink for Rc<RefCell<T>> {
    fn request_redraw(&mut self) {
        self.borrow_mut().request_redraw()
    }
}

impl<T: ColorSource + ?Sized> ColorSource for Rc<RefCell<T>> {
    fn line_color(&self) -> Color {
        self.borrow().line_color()
    }
    fn angle_color(&self) -> Color {
        self.borrow().angle_color()
    }
}

impl SolidSource for Vec<Point3> {
    fn current_vertices(&self) -> Vec<Point3> {
        self.clone()
    }
}

impl SolidSource for ShapeModel {
    fn current_vertices(&self) -> Vec<Point3> {
        self.solid().vertices.clone()
    }
}

/// Цвета рисования по умолчанию.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub line: Color,
    pub angle: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            line: Color::from_hex(0x00FF96),
            angle: Color::from_hex(0x00FFDF),
        }
    }
}

impl ColorSource for Palette {
    fn line_color(&self) -> Color {
        self.line
    }
    fn angle_color(&self) -> Color {
        self.angle
    }
}

/// Сцена, которой перерисовка не нужна.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopScene;

impl SceneSink for NoopScene {
    fn request_redraw(&mut self) {}
}

/// Внешние зависимости пикера, передаются при создании.
pub struct Collaborators {
    pub camera: Box<dyn CameraProvider>,
    pub solid: Box<dyn SolidSource>,
    pub scene: Box<dyn SceneSink>,
    pub colors: Box<dyn ColorSource>,
}

impl Collaborators {
    pub fn new(
        camera: impl CameraProvider + 'static,
        solid: impl SolidSource + 'static,
        scene: impl SceneSink + 'static,
        colors: impl ColorSource + 'static,
    ) -> Self {
        Self {
            camera: Box::new(camera),
            solid: Box::new(solid),
            scene: Box::new(scene),
            colors: Box::new(colors),
        }
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
