use crate::core::color::Color;
use crate::core::geometry::VertexOut;
use crate::core::math::interpolation::perspective_correct;
use crate::core::math::transform::safe_normalize;
use nalgebra::{Vector2, Vector3};
use std::ops::{Add, Mul};

/// Trait for types that can be linearly interpolated across a triangle's surface.
///
/// Anything that supports the linear combination `a * t + b * s` qualifies,
/// which covers the nalgebra vectors and plain `f32`.
pub trait Interpolatable: Copy + Add<Output = Self> + Mul<f32, Output = Self> {}

impl<T> Interpolatable for T where T: Copy + Add<Output = T> + Mul<f32, Output = T> {}

/// Per-pixel attributes handed to the fragment stage.
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub color: Color,
    pub texcoord: Vector2<f32>,
    /// Unit length, or zero if the interpolated value degenerated.
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub view_direction: Vector3<f32>,
    /// Interpolated depth that passed the depth test.
    pub depth: f32,
}

impl Fragment {
    /// Perspective-correct interpolation of the three transformed vertices.
    ///
    /// `interpolated_w` is `1 / Σ(weight_i / w_i)`; direction attributes are
    /// renormalized afterwards.
    pub fn interpolate(
        weights: &Vector3<f32>,
        vertices: [&VertexOut; 3],
        interpolated_w: f32,
        depth: f32,
    ) -> Self {
        let w = vertices.map(|v| v.position.w);
        let lerp = |attr: fn(&VertexOut) -> Vector3<f32>| {
            perspective_correct(weights, vertices.map(attr), w, interpolated_w)
        };

        Self {
            color: lerp(|v| v.color),
            texcoord: perspective_correct(weights, vertices.map(|v| v.texcoord), w, interpolated_w),
            normal: safe_normalize(&lerp(|v| v.normal)),
            tangent: safe_normalize(&lerp(|v| v.tangent)),
            view_direction: safe_normalize(&lerp(|v| v.view_direction)),
            depth,
        }
    }
}

/// Fragment stage of the pipeline.
///
/// Returns the unclamped linear color for one covered, depth-passing pixel.
/// The rasterizer clamps and packs the result.
pub trait Shader {
    fn fragment(&self, fragment: &Fragment) -> Color;
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector4;

    fn vertex(w: f32, u: f32) -> VertexOut {
        VertexOut {
            position: Vector4::new(0.0, 0.0, 0.5, w),
            color: Color::new(1.0, 0.5, 0.25),
            texcoord: Vector2::new(u, 0.0),
            normal: Vector3::new(0.0, 0.0, -2.0),
            tangent: Vector3::x(),
            view_direction: Vector3::z(),
        }
    }

    #[test]
    fn test_interpolate_renormalizes_directions() {
        let (a, b, c) = (vertex(1.0, 0.0), vertex(2.0, 1.0), vertex(3.0, 1.0));
        let weights = Vector3::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0);
        let inv = 1.0 / (weights.x / 1.0 + weights.y / 2.0 + weights.z / 3.0);

        let frag = Fragment::interpolate(&weights, [&a, &b, &c], inv, 0.5);

        assert!((frag.normal - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-5);
        assert!((frag.color - Color::new(1.0, 0.5, 0.25)).norm() < 1e-5);
        assert_eq!(frag.depth, 0.5);
    }

    #[test]
    fn test_interpolate_is_perspective_weighted() {
        // The near vertex (w = 1) dominates the screen-space midpoint.
        let (a, b, c) = (vertex(1.0, 0.0), vertex(3.0, 1.0), vertex(3.0, 1.0));
        let weights = Vector3::new(0.5, 0.25, 0.25);
        let inv = 1.0 / (0.5 / 1.0 + 0.25 / 3.0 + 0.25 / 3.0);

        let frag = Fragment::interpolate(&weights, [&a, &b, &c], inv, 0.5);

        assert!(frag.texcoord.x < 0.5, "u should bias toward the near vertex, got {}", frag.texcoord.x);
        assert!((frag.texcoord.x - 0.25).abs() < 1e-5);
    }
}
