use crate::core::color::Color;
use crate::core::math::transform::{perspective_divide, safe_normalize, transform_direction};
use nalgebra::{Matrix4, Point3, Vector2, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// Represents a single vertex in object space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    /// Base color, used when the mesh has no diffuse texture.
    pub color: Color,
    /// Texture coordinates (UV).
    pub texcoord: Vector2<f32>,
    pub normal: Vector3<f32>,
    /// Tangent for normal mapping. Zero when the source data has none.
    pub tangent: Vector3<f32>,
    /// Placeholder; recomputed for every transformed vertex.
    pub view_direction: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, texcoord: Vector2<f32>) -> Self {
        Self {
            position,
            color: Color::new(1.0, 1.0, 1.0),
            texcoord,
            normal,
            tangent: Vector3::zeros(),
            view_direction: Vector3::zeros(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_tangent(mut self, tangent: Vector3<f32>) -> Self {
        self.tangent = tangent;
        self
    }
}

/// A vertex after the transform stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOut {
    /// NDC x, y, z after the perspective divide, with clip-space w kept in `w`.
    pub position: Vector4<f32>,
    pub color: Color,
    pub texcoord: Vector2<f32>,
    /// World-space normal, unit length.
    pub normal: Vector3<f32>,
    /// World-space tangent, unit length (zero if the input had none).
    pub tangent: Vector3<f32>,
    /// Normalized NDC position.
    pub view_direction: Vector3<f32>,
}

impl VertexOut {
    /// Runs one vertex through the transform stage.
    ///
    /// `world` orients the direction attributes; `world_view_projection`
    /// takes the position to clip space.
    pub fn from_vertex(vertex: &Vertex, world: &Matrix4<f32>, world_view_projection: &Matrix4<f32>) -> Self {
        let clip = world_view_projection * vertex.position.to_homogeneous();
        let position = perspective_divide(&clip);

        Self {
            position,
            color: vertex.color,
            texcoord: vertex.texcoord,
            normal: safe_normalize(&transform_direction(world, &vertex.normal)),
            tangent: safe_normalize(&transform_direction(world, &vertex.tangent)),
            view_direction: safe_normalize(&position.xyz()),
        }
    }

    /// True when the vertex lies outside the canonical view volume:
    /// x or y outside [-1, 1], or z outside [0, 1]. NaN counts as outside.
    #[inline]
    pub fn is_outside_view_volume(&self) -> bool {
        let p = &self.position;
        !((-1.0..=1.0).contains(&p.x) && (-1.0..=1.0).contains(&p.y) && (0.0..=1.0).contains(&p.z))
    }
}

/// How a mesh's index buffer forms triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveTopology {
    /// Every three indices form one triangle.
    #[default]
    TriangleList,
    /// Each index after the first two forms a triangle with its two predecessors.
    TriangleStrip,
}
