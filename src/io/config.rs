use crate::core::color::pack_rgb8;
use crate::core::rasterizer::{CullMode, RenderMode};
use crate::error::Result;
use crate::pipeline::frame::{ColorMode, FrameConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub mesh: MeshConfig,
    #[serde(default)]
    pub textures: TextureConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_target_fps")]
    pub target_fps: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            target_fps: default_target_fps(),
        }
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_title() -> String {
    "softraster".to_string()
}
fn default_target_fps() -> usize {
    60
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    /// Vertical field of view, degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    /// Initial pitch and yaw, degrees.
    #[serde(default)]
    pub pitch: f32,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    #[serde(default = "default_look_sensitivity")]
    pub look_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            pitch: 0.0,
            yaw: 0.0,
            move_speed: default_move_speed(),
            look_sensitivity: default_look_sensitivity(),
        }
    }
}

fn default_origin() -> [f32; 3] {
    [0.0, 0.0, -10.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}
fn default_move_speed() -> f32 {
    10.0
}
fn default_look_sensitivity() -> f32 {
    0.005
}

#[derive(Debug, Deserialize)]
pub struct MeshConfig {
    #[serde(default = "default_mesh_path")]
    pub path: String,

    // --- Transform ---
    #[serde(default = "default_mesh_position")]
    pub position: [f32; 3],
    /// Pitch, yaw, roll in degrees.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    /// Degrees per second while rotation is on.
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            path: default_mesh_path(),
            position: default_mesh_position(),
            rotation: [0.0; 3],
            scale: default_scale(),
            rotation_speed: default_rotation_speed(),
        }
    }
}

fn default_mesh_path() -> String {
    "resources/vehicle.obj".to_string()
}
fn default_mesh_position() -> [f32; 3] {
    [0.0, 0.0, 40.0]
}
fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_rotation_speed() -> f32 {
    45.0
}

/// Texture paths. An empty string leaves the slot unset.
#[derive(Debug, Deserialize)]
pub struct TextureConfig {
    #[serde(default = "default_diffuse")]
    pub diffuse: String,
    #[serde(default = "default_normal")]
    pub normal: String,
    #[serde(default = "default_specular")]
    pub specular: String,
    #[serde(default = "default_glossiness")]
    pub glossiness: String,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            diffuse: default_diffuse(),
            normal: default_normal(),
            specular: default_specular(),
            glossiness: default_glossiness(),
        }
    }
}

fn default_diffuse() -> String {
    "resources/vehicle_diffuse.png".to_string()
}
fn default_normal() -> String {
    "resources/vehicle_normal.png".to_string()
}
fn default_specular() -> String {
    "resources/vehicle_specular.png".to_string()
}
fn default_glossiness() -> String {
    "resources/vehicle_gloss.png".to_string()
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_direction")]
    pub direction: [f32; 3],
    #[serde(default = "default_light_intensity")]
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: default_light_direction(),
            intensity: default_light_intensity(),
        }
    }
}

fn default_light_direction() -> [f32; 3] {
    [0.577, -0.577, 0.577]
}
fn default_light_intensity() -> f32 {
    7.0
}

/// Startup values of the per-frame toggles.
#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub render_mode: RenderMode,
    #[serde(default)]
    pub color_mode: ColorMode,
    #[serde(default = "default_true")]
    pub normal_mapping: bool,
    #[serde(default = "default_true")]
    pub rotate: bool,
    #[serde(default)]
    pub cull_mode: CullMode,
    #[serde(default = "default_clear_color")]
    pub clear_color: [u8; 3],
    #[serde(default = "default_alternate_clear_color")]
    pub alternate_clear_color: [u8; 3],
    #[serde(default = "default_true")]
    pub print_fps: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::default(),
            color_mode: ColorMode::default(),
            normal_mapping: true,
            rotate: true,
            cull_mode: CullMode::default(),
            clear_color: default_clear_color(),
            alternate_clear_color: default_alternate_clear_color(),
            print_fps: true,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_clear_color() -> [u8; 3] {
    [100, 100, 100]
}
fn default_alternate_clear_color() -> [u8; 3] {
    [3, 3, 3]
}

impl From<&RenderConfig> for FrameConfig {
    fn from(render: &RenderConfig) -> Self {
        let [r, g, b] = render.clear_color;
        let [ar, ag, ab] = render.alternate_clear_color;
        Self {
            render_mode: render.render_mode,
            color_mode: render.color_mode,
            normal_mapping: render.normal_mapping,
            rotate: render.rotate,
            cull_mode: render.cull_mode,
            alternate_clear: false,
            clear_color: pack_rgb8(r, g, b),
            alternate_clear_color: pack_rgb8(ar, ag, ab),
            print_fps: render.print_fps,
        }
    }
}

/// Headless rendering.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_frames")]
    pub frames: usize,
    /// Simulated seconds per frame.
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            frames: default_frames(),
            frame_time: default_frame_time(),
        }
    }
}

fn default_output_path() -> String {
    "output.png".to_string()
}
fn default_frames() -> usize {
    1
}
fn default_frame_time() -> f32 {
    1.0 / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.camera.origin, [0.0, 0.0, -10.0]);
        assert_eq!(config.mesh.position, [0.0, 0.0, 40.0]);
        assert_eq!(config.light.intensity, 7.0);
        assert_eq!(FrameConfig::from(&config.render), FrameConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(
            r#"
            [window]
            width = 320

            [mesh]
            path = "models/cube.obj"

            [render]
            render_mode = "depth_buffer"
            color_mode = "observed_area"
            cull_mode = "none"
            clear_color = [0, 0, 255]
            print_fps = false
            "#,
        )
        .unwrap();

        assert_eq!(config.window.width, 320);
        assert_eq!(config.window.height, 480);
        assert_eq!(config.mesh.path, "models/cube.obj");
        assert_eq!(config.mesh.rotation_speed, 45.0);

        let frame = FrameConfig::from(&config.render);
        assert_eq!(frame.render_mode, RenderMode::DepthBuffer);
        assert_eq!(frame.color_mode, ColorMode::ObservedArea);
        assert_eq!(frame.cull_mode, CullMode::None);
        assert_eq!(frame.background(), 0x000000FF);
        assert!(!frame.print_fps);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(Config::from_toml("[window\nwidth = ").is_err());
        assert!(Config::from_toml("[render]\ncull_mode = \"sideways\"").is_err());
    }
}
