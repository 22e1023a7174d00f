use crate::core::color::{gray, pack_rgb, saturate};
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::VertexOut;
use crate::core::math::interpolation::{barycentric_weights, reciprocal_interpolate, signed_area};
use crate::core::math::transform::ndc_to_screen;
use crate::core::pipeline::{Fragment, Shader};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Depth range stretched over the full gray ramp in [`RenderMode::DepthBuffer`].
/// Perspective depth crowds toward 1.0, so only the far end is shown.
pub const DEPTH_VIEW_MIN: f32 = 0.985;
pub const DEPTH_VIEW_MAX: f32 = 1.0;

/// Which screen-space winding survives triangle setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    /// Keep triangles with positive signed area (clockwise in NDC).
    #[default]
    Back,
    /// Keep triangles with negative signed area.
    Front,
    /// Keep both windings.
    None,
}

impl CullMode {
    pub fn next(self) -> Self {
        match self {
            CullMode::Back => CullMode::Front,
            CullMode::Front => CullMode::None,
            CullMode::None => CullMode::Back,
        }
    }

    #[inline]
    fn accepts(self, area: f32) -> bool {
        match self {
            CullMode::Back => area > 0.0,
            CullMode::Front => area < 0.0,
            CullMode::None => area != 0.0,
        }
    }
}

/// What a covered pixel writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Run the fragment shader.
    #[default]
    Texture,
    /// Grayscale visualization of the depth buffer.
    DepthBuffer,
}

impl RenderMode {
    pub fn next(self) -> Self {
        match self {
            RenderMode::Texture => RenderMode::DepthBuffer,
            RenderMode::DepthBuffer => RenderMode::Texture,
        }
    }
}

/// Counters gathered over one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles: usize,
    pub culled_by_volume: usize,
    pub culled_by_winding: usize,
    pub fragments_tested: usize,
    pub fragments_written: usize,
}

/// Draws transformed triangles into a [`FrameBuffer`].
pub struct Rasterizer {
    pub cull_mode: CullMode,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            cull_mode: CullMode::default(),
        }
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    /// Rasterizes one triangle of transformed vertices.
    ///
    /// Triangles with any vertex outside the view volume are dropped whole
    /// (no clipping). Covered pixels run the depth test once each and, if
    /// it passes, are shaded and written.
    pub fn rasterize_triangle<S: Shader>(
        &self,
        framebuffer: &mut FrameBuffer,
        shader: &S,
        vertices: [&VertexOut; 3],
        render_mode: RenderMode,
        stats: &mut FrameStats,
    ) {
        stats.triangles += 1;

        if vertices.iter().any(|v| v.is_outside_view_volume()) {
            stats.culled_by_volume += 1;
            return;
        }

        let width = framebuffer.width;
        let height = framebuffer.height;

        // 1. Viewport transform
        let screen = vertices.map(|v| ndc_to_screen(v.position.x, v.position.y, width as f32, height as f32));
        let depths = vertices.map(|v| v.position.z);
        let ws = vertices.map(|v| v.position.w);

        // 2. Winding
        let area = signed_area(&screen);
        if !self.cull_mode.accepts(area) {
            stats.culled_by_winding += 1;
            return;
        }

        // 3. Bounding box, one pixel of slack, end exclusive
        let (start_x, end_x) = pixel_span(screen.map(|p| p.x), width);
        let (start_y, end_y) = pixel_span(screen.map(|p| p.y), height);

        // 4. Pixel loop
        for y in start_y..end_y {
            for x in start_x..end_x {
                let pixel_center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);

                let Some(weights) = barycentric_weights(&pixel_center, &screen, area) else {
                    continue;
                };

                let depth = reciprocal_interpolate(&weights, depths);
                let interpolated_w = reciprocal_interpolate(&weights, ws);
                if !depth.is_finite() || !interpolated_w.is_finite() {
                    continue;
                }

                stats.fragments_tested += 1;
                if !framebuffer.depth_test_and_update(x, y, depth) {
                    continue;
                }

                let color = match render_mode {
                    RenderMode::Texture => {
                        let fragment = Fragment::interpolate(&weights, vertices, interpolated_w, depth);
                        shader.fragment(&fragment)
                    }
                    RenderMode::DepthBuffer => gray(remap(depth, DEPTH_VIEW_MIN, DEPTH_VIEW_MAX)),
                };

                framebuffer.set_pixel(x, y, pack_rgb(&saturate(&color)));
                stats.fragments_written += 1;
            }
        }
    }
}

/// Pixel range `[start, end)` covering `coords`, widened by one pixel on
/// each side and clamped to `[0, limit]`.
#[inline]
fn pixel_span(coords: [f32; 3], limit: usize) -> (usize, usize) {
    let min = coords[0].min(coords[1]).min(coords[2]);
    let max = coords[0].max(coords[1]).max(coords[2]);
    let limit = limit as i64;
    let start = (min as i64 - 1).clamp(0, limit);
    let end = (max as i64 + 1).clamp(0, limit);
    (start as usize, end as usize)
}

/// Maps `value` from `[min, max]` to `[0, 1]`, clamped.
#[inline]
pub fn remap(value: f32, min: f32, max: f32) -> f32 {
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}
