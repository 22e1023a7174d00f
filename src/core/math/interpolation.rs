use crate::core::pipeline::Interpolatable;
use nalgebra::{Point2, Vector2, Vector3};

/// 2D cross product (z component of the 3D cross).
#[inline(always)]
pub fn cross_2d(a: &Vector2<f32>, b: &Vector2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Twice the signed area of a screen-space triangle, measured as
/// `cross(p1 - p0, p2 - p1)`.
///
/// Screen Y points down, so a triangle that is counter-clockwise in NDC
/// comes out negative here.
#[inline]
pub fn signed_area(p: &[Point2<f32>; 3]) -> f32 {
    cross_2d(&(p[1] - p[0]), &(p[2] - p[1]))
}

/// Edge function values of `point`, ordered by the vertex opposite each edge:
/// `x` for edge p1->p2, `y` for edge p2->p0, `z` for edge p0->p1.
#[inline]
pub fn edge_functions(point: &Point2<f32>, p: &[Point2<f32>; 3]) -> Vector3<f32> {
    Vector3::new(
        cross_2d(&(p[2] - p[1]), &(point - p[1])),
        cross_2d(&(p[0] - p[2]), &(point - p[2])),
        cross_2d(&(p[1] - p[0]), &(point - p[0])),
    )
}

/// Barycentric weights of `point` in the triangle `p`, or `None` when the
/// point is not strictly inside.
///
/// `area` is [`signed_area`] of `p`. Every edge function must share the
/// sign of `area` and be non-zero, so pixels exactly on an edge are not
/// covered and a zero-area triangle covers nothing. The weights are in
/// (0, 1) and sum to 1.
#[inline]
pub fn barycentric_weights(point: &Point2<f32>, p: &[Point2<f32>; 3], area: f32) -> Option<Vector3<f32>> {
    if area == 0.0 {
        return None;
    }
    let edges = edge_functions(point, p);
    let inside = if area > 0.0 {
        edges.x > 0.0 && edges.y > 0.0 && edges.z > 0.0
    } else {
        edges.x < 0.0 && edges.y < 0.0 && edges.z < 0.0
    };
    if !inside {
        return None;
    }
    Some(edges / area)
}

/// `1 / (w0/v0 + w1/v1 + w2/v2)`.
///
/// Used for both the interpolated depth (with NDC z) and the
/// interpolated clip w. Not finite if any value is zero.
#[inline]
pub fn reciprocal_interpolate(weights: &Vector3<f32>, values: [f32; 3]) -> f32 {
    1.0 / (weights.x / values[0] + weights.y / values[1] + weights.z / values[2])
}

/// Perspective-correct interpolation: `Σ weight_i * attr_i / w_i`,
/// scaled by the interpolated w.
#[inline]
pub fn perspective_correct<T: Interpolatable>(
    weights: &Vector3<f32>,
    attributes: [T; 3],
    w: [f32; 3],
    interpolated_w: f32,
) -> T {
    let [a0, a1, a2] = attributes;
    (a0 * (weights.x / w[0]) + a1 * (weights.y / w[1]) + a2 * (weights.z / w[2])) * interpolated_w
}
