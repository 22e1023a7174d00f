use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// Pitch stays this far short of straight up or down.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// What a pointer drag does this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    None,
    /// Yaw and pitch follow the pointer.
    Look,
    /// Vertical motion moves along forward, horizontal motion yaws.
    Dolly,
    /// Vertical motion moves the camera up or down.
    Vertical,
}

/// Camera controls sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer movement since the last frame, in pixels. +y is down.
    pub pointer_delta: Vector2<f32>,
    pub drag: DragMode,
}

/// A free-flying perspective camera.
///
/// `forward` is the only orientation state; `right` and `up` are rebuilt
/// from it on every [`Camera::calculate_view_matrix`].
#[derive(Debug, Clone)]
pub struct Camera {
    pub origin: Point3<f32>,
    pub forward: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,

    /// `tan(vertical_fov / 2)`.
    fov: f32,
    near: f32,
    far: f32,
    aspect_ratio: f32,

    total_pitch: f32,
    total_yaw: f32,

    /// World units per second.
    pub move_speed: f32,
    /// Radians per pixel of pointer motion.
    pub look_sensitivity: f32,

    // --- Cached Matrices ---
    inv_view_matrix: Matrix4<f32>,
    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new(origin: Point3<f32>, aspect_ratio: f32, fov_angle: f32) -> Self {
        let mut cam = Self {
            origin,
            forward: Vector3::z(),
            up: Vector3::y(),
            right: Vector3::x(),
            fov: fov_tangent(fov_angle),
            near: 0.1,
            far: 100.0,
            aspect_ratio,
            total_pitch: 0.0,
            total_yaw: 0.0,
            move_speed: 10.0,
            look_sensitivity: 0.005,
            inv_view_matrix: Matrix4::identity(),
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.calculate_view_matrix();
        cam.calculate_projection_matrix();
        cam
    }

    pub fn with_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self.calculate_projection_matrix();
        self
    }

    /// Rebuilds the basis from `forward` and derives both view matrices.
    ///
    /// Looking straight along world up leaves `right` undefined; world X is
    /// used instead.
    pub fn calculate_view_matrix(&mut self) {
        self.right = Vector3::y()
            .cross(&self.forward)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::x);
        self.up = self.forward.cross(&self.right).normalize();

        self.inv_view_matrix =
            TransformFactory::camera_to_world(&self.right, &self.up, &self.forward, &self.origin.coords);
        if let Some(view) = self.inv_view_matrix.try_inverse() {
            self.view_matrix = view;
        }
    }

    pub fn calculate_projection_matrix(&mut self) {
        self.projection_matrix =
            TransformFactory::perspective_fov_lh(self.fov, self.aspect_ratio, self.near, self.far);
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.calculate_projection_matrix();
    }

    /// Points the camera by absolute pitch and yaw (radians).
    pub fn set_orientation(&mut self, pitch: f32, yaw: f32) {
        self.total_pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.total_yaw = yaw;
        self.orient();
    }

    /// Applies one frame of input. Never touches the projection.
    pub fn update(&mut self, elapsed: f32, input: &CameraInput) {
        let step = self.move_speed * elapsed;

        if input.forward {
            self.origin += self.forward * step;
        }
        if input.backward {
            self.origin -= self.forward * step;
        }
        if input.right {
            self.origin += self.right * step;
        }
        if input.left {
            self.origin -= self.right * step;
        }

        let delta = input.pointer_delta;
        match input.drag {
            DragMode::None => {}
            DragMode::Look => {
                self.total_yaw += delta.x * self.look_sensitivity;
                self.total_pitch += delta.y * self.look_sensitivity;
            }
            DragMode::Dolly => {
                self.origin -= self.forward * (delta.y * step);
                self.total_yaw += delta.x * self.look_sensitivity;
            }
            DragMode::Vertical => {
                self.origin.y -= delta.y * step;
            }
        }

        self.total_pitch = self.total_pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.orient();
    }

    fn orient(&mut self) {
        let rotation = TransformFactory::rotation_euler(self.total_pitch, self.total_yaw, 0.0);
        self.forward = rotation.transform_vector(&Vector3::z()).normalize();
        self.calculate_view_matrix();
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn inv_view_matrix(&self) -> Matrix4<f32> {
        self.inv_view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }

    /// `projection * view`.
    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix * self.view_matrix
    }
}

fn fov_tangent(fov_angle: f32) -> f32 {
    (fov_angle.to_radians() / 2.0).tan()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_camera() -> Camera {
        Camera::new(Point3::new(0.0, 0.0, -10.0), 640.0 / 480.0, 45.0)
    }

    #[test]
    fn test_view_and_inverse_round_trip() {
        let mut cam = default_camera();
        cam.set_orientation(0.3, -1.1);

        let product = cam.view_matrix() * cam.inv_view_matrix();
        assert!((product - Matrix4::identity()).norm() < 1e-5, "got {product}");
    }

    #[test]
    fn test_view_moves_origin_to_zero() {
        let cam = default_camera();
        let p = cam.view_matrix().transform_point(&cam.origin);
        assert!(p.coords.norm() < 1e-5);

        let ahead = cam.view_matrix().transform_point(&Point3::new(0.0, 0.0, 0.0));
        assert!((ahead.z - 10.0).abs() < 1e-5, "points ahead have positive view z");
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let mut cam = default_camera();
        cam.set_orientation(-0.7, 2.0);

        assert!((cam.right().norm() - 1.0).abs() < 1e-5);
        assert!((cam.up().norm() - 1.0).abs() < 1e-5);
        assert!(cam.right().dot(&cam.forward).abs() < 1e-5);
        assert!(cam.up().dot(&cam.forward).abs() < 1e-5);
        assert!(cam.up().y > 0.0);
    }

    #[test]
    fn test_degenerate_forward_stays_finite() {
        let mut cam = default_camera();
        cam.forward = Vector3::y();
        cam.calculate_view_matrix();

        assert_eq!(cam.right(), Vector3::x());
        assert!(cam.view_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_update_moves_along_forward() {
        let mut cam = default_camera();
        let input = CameraInput {
            forward: true,
            ..Default::default()
        };

        cam.update(0.5, &input);

        assert!((cam.origin - Point3::new(0.0, 0.0, -5.0)).norm() < 1e-5);
    }

    #[test]
    fn test_look_drag_turns_camera() {
        let mut cam = default_camera();
        let input = CameraInput {
            pointer_delta: Vector2::new(100.0, 0.0),
            drag: DragMode::Look,
            ..Default::default()
        };

        cam.update(0.016, &input);

        assert!(cam.forward.x > 0.0, "positive yaw turns right, got {:?}", cam.forward);
        assert!((cam.forward.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut cam = default_camera();
        let input = CameraInput {
            pointer_delta: Vector2::new(0.0, 1.0e6),
            drag: DragMode::Look,
            ..Default::default()
        };

        cam.update(0.016, &input);

        assert!(cam.forward.y.abs() < 1.0);
        assert!(cam.view_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_update_keeps_projection() {
        let mut cam = default_camera();
        let before = cam.projection_matrix();
        let input = CameraInput {
            right: true,
            pointer_delta: Vector2::new(3.0, -4.0),
            drag: DragMode::Dolly,
            ..Default::default()
        };

        cam.update(0.1, &input);

        assert_eq!(cam.projection_matrix(), before);
    }

    #[test]
    fn test_dolly_drag_moves_along_forward_and_yaws() {
        let mut cam = default_camera();
        let input = CameraInput {
            pointer_delta: Vector2::new(2.0, -4.0),
            drag: DragMode::Dolly,
            ..Default::default()
        };

        // step = 10 * 0.1; dragging up by 4 pixels moves 4 units forward.
        cam.update(0.1, &input);

        assert!((cam.origin - Point3::new(0.0, 0.0, -6.0)).norm() < 1e-5, "got {}", cam.origin);
        assert!(cam.forward.x > 0.0, "horizontal motion yaws, got {:?}", cam.forward);
        assert!(cam.forward.y.abs() < 1e-6, "dolly never pitches");
    }

    #[test]
    fn test_vertical_drag_moves_along_world_y() {
        let mut cam = default_camera();
        let input = CameraInput {
            pointer_delta: Vector2::new(5.0, 3.0),
            drag: DragMode::Vertical,
            ..Default::default()
        };

        cam.update(0.1, &input);

        assert!((cam.origin - Point3::new(0.0, -3.0, -10.0)).norm() < 1e-5, "got {}", cam.origin);
        assert!((cam.forward - Vector3::z()).norm() < 1e-6, "vertical drag keeps orientation");
    }

    #[test]
    fn test_set_aspect_ratio_rebuilds_projection() {
        let mut cam = default_camera();
        cam.set_aspect_ratio(2.0);
        let expected = TransformFactory::perspective_fov_lh(fov_tangent(45.0), 2.0, 0.1, 100.0);
        assert_eq!(cam.projection_matrix(), expected);
    }
}
