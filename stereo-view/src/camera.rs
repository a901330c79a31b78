use std::f64::consts::{FRAC_PI_4, PI};

use cgmath::{Deg, EuclideanSpace, InnerSpace, Matrix4, Rad};
use serde::{Deserialize, Serialize};
use stereo_core::{Point3, Vector3};

use crate::host::{CameraProvider, Viewport};

const PHI_MARGIN: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitCameraConfig {
    /// Вертикальный угол обзора, градусы.
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    pub distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Доля оставшегося пути к целевой дистанции за один `update`.
    pub zoom_speed: f64,
    pub zoom_step: f64,
    pub target: Point3,
}

impl Default for OrbitCameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 70.0,
            near: 0.1,
            far: 1000.0,
            distance: 5.0,
            min_distance: 1.0,
            max_distance: 100.0,
            zoom_speed: 0.08,
            zoom_step: 0.4,
            target: Point3::origin(),
        }
    }
}

/// Перспективная камера на сфере вокруг цели.
/// θ: азимут, φ: полярный угол от +Y.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    cfg: OrbitCameraConfig,
    target: Point3,
    theta: f64,
    phi: f64,
    distance: f64,
    target_distance: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(OrbitCameraConfig::default())
    }
}

impl OrbitCamera {
    pub fn new(cfg: OrbitCameraConfig) -> Self {
        let distance = cfg.distance.clamp(cfg.min_distance, cfg.max_distance);
        Self {
            target: cfg.target,
            theta: 0.0,
            phi: FRAC_PI_4,
            distance,
            target_distance: distance,
            cfg,
        }
    }

    pub fn config(&self) -> &OrbitCameraConfig {
        &self.cfg
    }

    pub fn rotate(&mut self, d_theta: f64, d_phi: f64) {
        self.theta += d_theta;
        self.phi = (self.phi + d_phi).clamp(PHI_MARGIN, PI - PHI_MARGIN);
    }

    /// Сдвинуть целевую дистанцию; сама дистанция догоняет её в `update`.
    pub fn zoom(&mut self, delta: f64) {
        self.target_distance = (self.target_distance + delta * self.cfg.zoom_step)
            .clamp(self.cfg.min_distance, self.cfg.max_distance);
    }

    /// Шаг сглаживания зума; вызывается раз в кадр.
    pub fn update(&mut self) {
        self.distance += (self.target_distance - self.distance) * self.cfg.zoom_speed;
    }

    pub fn lift(&mut self, dy: f64) {
        self.target.y += dy;
    }

    pub fn set_target(&mut self, target: Point3) {
        self.target = target;
    }

    pub fn target(&self) -> Point3 {
        self.target
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn angles(&self) -> (f64, f64) {
        (self.theta, self.phi)
    }

    pub fn position(&self) -> Point3 {
        let (st, ct) = self.theta.sin_cos();
        let (sp, cp) = self.phi.sin_cos();
        self.target + Vector3::new(sp * ct, cp, sp * st) * self.distance
    }

    pub fn forward(&self) -> Vector3 {
        (self.target - self.position()).normalize()
    }

    /// Базис камеры (right, up, forward).
    pub fn axes(&self) -> (Vector3, Vector3, Vector3) {
        let f = self.forward();
        let r = f.cross(Vector3::unit_y()).normalize();
        let u = r.cross(f);
        (r, u, f)
    }

    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(self.position(), self.target, Vector3::unit_y())
    }

    pub fn projection_matrix(&self, viewport: Viewport) -> Matrix4<f64> {
        cgmath::perspective(Deg(self.cfg.fov_deg), viewport.aspect(), self.cfg.near, self.cfg.far)
    }

    pub fn screen_to_world_ray(&self, x: f64, y: f64, viewport: Viewport) -> Vector3 {
        let ndc_x = 2.0 * x / viewport.width - 1.0;
        let ndc_y = 1.0 - 2.0 * y / viewport.height;
        let tan = (Rad::from(Deg(self.cfg.fov_deg)).0 * 0.5).tan();
        let (r, u, f) = self.axes();
        (f + r * (ndc_x * tan * viewport.aspect()) + u * (ndc_y * tan)).normalize()
    }
}

impl CameraProvider for OrbitCamera {
    fn position(&self) -> Point3 {
        OrbitCamera::position(self)
    }
    fn screen_to_world_ray(&self, x: f64, y: f64, viewport: Viewport) -> Vector3 {
        OrbitCamera::screen_to_world_ray(self, x, y, viewport)
    }
}
