use crate::core::math::transform::TransformFactory;
use crate::io::config::Config;
use crate::io::obj_loader::load_obj;
use crate::scene::camera::Camera;
use crate::scene::context::RenderContext;
use crate::scene::light::DirectionalLight;
use crate::scene::material::ShadingResources;
use crate::scene::mesh::Mesh;
use crate::scene::texture::Texture;
use log::{error, info, warn};
use nalgebra::{Point3, Vector3};
use std::sync::Arc;

/// Loads one optional texture slot. An empty path or a failed load
/// leaves the slot empty.
fn load_texture_slot(kind: &str, path: &str) -> Option<Arc<Texture>> {
    if path.is_empty() {
        return None;
    }
    match Texture::load(path) {
        Ok(texture) => Some(Arc::new(texture)),
        Err(e) => {
            warn!("Failed to load {} texture '{}': {}", kind, path, e);
            None
        }
    }
}

pub fn load_shading_resources(config: &Config) -> ShadingResources {
    let textures = &config.textures;
    ShadingResources {
        diffuse: load_texture_slot("diffuse", &textures.diffuse),
        normal: load_texture_slot("normal", &textures.normal),
        specular: load_texture_slot("specular", &textures.specular),
        glossiness: load_texture_slot("glossiness", &textures.glossiness),
    }
}

pub fn build_camera(config: &Config) -> Camera {
    let cam = &config.camera;
    let aspect_ratio = config.window.width as f32 / config.window.height.max(1) as f32;

    let mut camera = Camera::new(Point3::from(cam.origin), aspect_ratio, cam.fov).with_planes(cam.near, cam.far);
    camera.move_speed = cam.move_speed;
    camera.look_sensitivity = cam.look_sensitivity;
    if cam.pitch != 0.0 || cam.yaw != 0.0 {
        camera.set_orientation(cam.pitch.to_radians(), cam.yaw.to_radians());
    }
    camera
}

/// Initial resource loading (heavy I/O). Never fails: a missing model
/// falls back to a test triangle and missing textures leave their slot empty.
pub fn init_render_context(config: &Config) -> RenderContext {
    let camera = build_camera(config);

    let mesh = match load_obj(&config.mesh.path) {
        Ok(mesh) => mesh,
        Err(e) => {
            error!(
                "Error loading model '{}': {}. Using fallback triangle.",
                config.mesh.path, e
            );
            Mesh::create_test_triangle()
        }
    };

    let mesh_conf = &config.mesh;
    let rotation = Vector3::from(mesh_conf.rotation).map(f32::to_radians);
    let mut mesh = mesh.with_resources(load_shading_resources(config));
    mesh.set_world_matrix(TransformFactory::world(
        &Vector3::from(mesh_conf.position),
        &rotation,
        &Vector3::from(mesh_conf.scale),
    ));

    let mut context = RenderContext::new(camera, vec![mesh]);
    context.light = DirectionalLight::new(Vector3::from(config.light.direction), config.light.intensity);
    context.rotation_speed = mesh_conf.rotation_speed.to_radians();

    info!(
        "Scene initialized: {} mesh(es), camera at {:?}",
        context.meshes.len(),
        context.camera.origin
    );

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_assets_fall_back() {
        let config = Config::from_toml(
            r#"
            [mesh]
            path = "no/such/model.obj"
            position = [0.0, 0.0, 0.0]

            [textures]
            diffuse = "no/such/diffuse.png"
            normal = ""
            "#,
        )
        .unwrap();

        let context = init_render_context(&config);

        assert_eq!(context.meshes.len(), 1);
        assert_eq!(context.meshes[0].vertices().len(), 3);
        let resources = &context.meshes[0].resources;
        assert!(resources.diffuse.is_none());
        assert!(resources.normal.is_none());
        assert_eq!(context.light.intensity, 7.0);
    }

    #[test]
    fn test_zero_light_direction_keeps_lighting_finite() {
        let config = Config::from_toml(
            r#"
            [mesh]
            path = "no/such/model.obj"

            [light]
            direction = [0.0, 0.0, 0.0]
            intensity = 2.0
            "#,
        )
        .unwrap();

        let context = init_render_context(&config);

        assert_eq!(context.light.direction, DirectionalLight::default().direction);
        assert_eq!(context.light.intensity, 2.0);
    }

    #[test]
    fn test_camera_from_config() {
        let config = Config::from_toml(
            r#"
            [window]
            width = 800
            height = 400

            [camera]
            origin = [1.0, 2.0, 3.0]
            move_speed = 4.0
            "#,
        )
        .unwrap();

        let camera = build_camera(&config);
        assert_eq!(camera.origin, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.aspect_ratio(), 2.0);
        assert_eq!(camera.move_speed, 4.0);
    }
}
