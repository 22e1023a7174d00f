use crate::pipeline::frame::FrameConfig;
use crate::scene::camera::{Camera, CameraInput};
use crate::scene::light::DirectionalLight;
use crate::scene::mesh::Mesh;

/// Everything a frame renders: camera, meshes and the light.
pub struct RenderContext {
    pub camera: Camera,
    pub meshes: Vec<Mesh>,
    pub light: DirectionalLight,
    /// Mesh spin in radians per second, applied while rotation is on.
    pub rotation_speed: f32,
}

impl RenderContext {
    pub fn new(camera: Camera, meshes: Vec<Mesh>) -> Self {
        Self {
            camera,
            meshes,
            light: DirectionalLight::default(),
            rotation_speed: 45f32.to_radians(),
        }
    }

    /// Advances the scene by `elapsed` seconds.
    pub fn update(&mut self, elapsed: f32, input: &CameraInput, config: &FrameConfig) {
        self.camera.update(elapsed, input);

        if config.rotate {
            let angle = self.rotation_speed * elapsed;
            for mesh in &mut self.meshes {
                mesh.rotate_y(angle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::frame::Command;
    use nalgebra::{Matrix4, Point3};

    fn context() -> RenderContext {
        let camera = Camera::new(Point3::new(0.0, 0.0, -10.0), 1.0, 45.0);
        RenderContext::new(camera, vec![Mesh::create_test_triangle()])
    }

    #[test]
    fn test_rotation_follows_toggle() {
        let mut ctx = context();
        let input = CameraInput::default();

        let still = FrameConfig::default().apply(Command::ToggleRotation);
        ctx.update(1.0, &input, &still);
        assert_eq!(*ctx.meshes[0].world_matrix(), Matrix4::identity());

        ctx.update(1.0, &input, &FrameConfig::default());
        assert_ne!(*ctx.meshes[0].world_matrix(), Matrix4::identity());
    }
}
