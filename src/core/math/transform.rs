use nalgebra::{Matrix4, Point2, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the transformation matrices used by the pipeline.
///
/// Left-handed: +X right, +Y up, +Z into the screen. Matrices act on
/// column vectors, so a world-view-projection chain is `proj * view * world`.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Rotation around the X-axis. Positive angles tip +Z toward -Y.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation around the Y-axis. Positive angles turn +Z toward +X.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Pitch about X, then yaw about Y, then roll about Z.
    pub fn rotation_euler(pitch: f32, yaw: f32, roll: f32) -> Matrix4<f32> {
        Self::rotation_z(roll) * Self::rotation_y(yaw) * Self::rotation_x(pitch)
    }

    pub fn translation(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, offset.x,
            0.0, 1.0, 0.0, offset.y,
            0.0, 0.0, 1.0, offset.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Object-to-world matrix: scale, then rotate (radians, pitch/yaw/roll), then translate.
    pub fn world(position: &Vector3<f32>, rotation: &Vector3<f32>, scale: &Vector3<f32>) -> Matrix4<f32> {
        Self::translation(position)
            * Self::rotation_euler(rotation.x, rotation.y, rotation.z)
            * Self::scaling_nonuniform(scale)
    }

    /// Camera-to-world (inverse view) matrix with the basis vectors as columns.
    /// The view matrix is its inverse.
    pub fn camera_to_world(
        right: &Vector3<f32>,
        up: &Vector3<f32>,
        forward: &Vector3<f32>,
        origin: &Vector3<f32>,
    ) -> Matrix4<f32> {
        Matrix4::new(
            right.x, up.x, forward.x, origin.x,
            right.y, up.y, forward.y, origin.y,
            right.z, up.z, forward.z, origin.z,
            0.0,     0.0,  0.0,       1.0,
        )
    }

    /// Left-handed perspective projection.
    ///
    /// `fov_tan` is `tan(fov_y / 2)`. View-space z in [near, far] maps to
    /// NDC z in [0, 1] and clip w carries the view-space depth.
    pub fn perspective_fov_lh(fov_tan: f32, aspect_ratio: f32, near: f32, far: f32) -> Matrix4<f32> {
        let x_scale = 1.0 / (aspect_ratio * fov_tan);
        let y_scale = 1.0 / fov_tan;
        let q = far / (far - near);

        Matrix4::new(
            x_scale, 0.0,     0.0, 0.0,
            0.0,     y_scale, 0.0, 0.0,
            0.0,     0.0,     q,   -near * q,
            0.0,     0.0,     1.0, 0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Clip space -> NDC. x, y, z are divided by w; w itself is kept for
/// perspective-correct interpolation. No guard on w: callers cull
/// triangles whose NDC leaves the view volume.
#[inline]
pub fn perspective_divide(clip: &Vector4<f32>) -> Vector4<f32> {
    let w = clip.w;
    Vector4::new(clip.x / w, clip.y / w, clip.z / w, w)
}

/// Converts NDC coordinates to screen coordinates (viewport transform).
/// Y is flipped: NDC +Y is up, screen +Y is down.
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - ndc_y) * 0.5 * height,
    )
}

/// Transforms a direction (w = 0), ignoring translation.
#[inline]
pub fn transform_direction(matrix: &Matrix4<f32>, direction: &Vector3<f32>) -> Vector3<f32> {
    matrix.fixed_view::<3, 3>(0, 0) * direction
}

/// Reflects `incident` about the plane with normal `normal`.
#[inline]
pub fn reflect(incident: &Vector3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * normal.dot(incident))
}

/// Normalizes, or returns zero for a zero-length vector instead of NaN.
#[inline]
pub fn safe_normalize(v: &Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}
