use crate::core::geometry::{PrimitiveTopology, Vertex, VertexOut};
use crate::core::math::transform::TransformFactory;
use crate::error::{RenderError, Result};
use crate::scene::material::ShadingResources;
use nalgebra::{Matrix4, Point3, Vector2, Vector3};
use rayon::prelude::*;

/// Vertices and indices of one object, plus its per-frame transform cache.
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    topology: PrimitiveTopology,
    world_matrix: Matrix4<f32>,
    pub resources: ShadingResources,
    /// Rebuilt by [`Mesh::transform_vertices`] every frame.
    vertices_out: Vec<VertexOut>,
}

impl Mesh {
    /// Fails if any index points past the end of `vertices`.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, topology: PrimitiveTopology) -> Result<Self> {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(RenderError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        Ok(Self {
            vertices_out: Vec::with_capacity(vertices.len()),
            vertices,
            indices,
            topology,
            world_matrix: Matrix4::identity(),
            resources: ShadingResources::default(),
        })
    }

    pub fn with_resources(mut self, resources: ShadingResources) -> Self {
        self.resources = resources;
        self
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    pub fn world_matrix(&self) -> &Matrix4<f32> {
        &self.world_matrix
    }

    pub fn set_world_matrix(&mut self, world: Matrix4<f32>) {
        self.world_matrix = world;
    }

    /// Spins the mesh about its local Y axis.
    pub fn rotate_y(&mut self, angle_rad: f32) {
        self.world_matrix *= TransformFactory::rotation_y(angle_rad);
    }

    /// Transformed vertices from the last [`Mesh::transform_vertices`] call.
    pub fn vertices_out(&self) -> &[VertexOut] {
        &self.vertices_out
    }

    /// Runs every vertex through the transform stage.
    ///
    /// The cache is cleared first, then refilled in vertex order, so its
    /// length always equals the vertex count afterwards.
    pub fn transform_vertices(&mut self, view_projection: &Matrix4<f32>) {
        let world = self.world_matrix;
        let world_view_projection = view_projection * world;

        self.vertices_out.clear();
        self.vertices_out.par_extend(
            self.vertices
                .par_iter()
                .map(|v| VertexOut::from_vertex(v, &world, &world_view_projection)),
        );
    }

    /// A single triangle facing -Z (toward a default camera).
    ///
    /// Used when no model can be loaded.
    pub fn create_test_triangle() -> Self {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let tangent = Vector3::new(1.0, 0.0, 0.0);
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 0.5, 0.0), normal, Vector2::new(0.5, 0.0)).with_tangent(tangent),
            Vertex::new(Point3::new(0.5, -0.5, 0.0), normal, Vector2::new(1.0, 1.0)).with_tangent(tangent),
            Vertex::new(Point3::new(-0.5, -0.5, 0.0), normal, Vector2::new(0.0, 1.0)).with_tangent(tangent),
        ];

        Self {
            vertices_out: Vec::with_capacity(vertices.len()),
            vertices,
            indices: vec![0, 1, 2],
            topology: PrimitiveTopology::TriangleList,
            world_matrix: Matrix4::identity(),
            resources: ShadingResources::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_index() {
        let vertices = Mesh::create_test_triangle().vertices;
        let err = Mesh::new(vertices, vec![0, 1, 3], PrimitiveTopology::TriangleList).err();
        assert!(matches!(err, Some(RenderError::IndexOutOfRange { index: 3, vertex_count: 3 })));
    }

    #[test]
    fn test_transform_cache_is_rebuilt_not_appended() {
        let mut mesh = Mesh::create_test_triangle();
        let vp = Matrix4::identity();

        mesh.transform_vertices(&vp);
        mesh.transform_vertices(&vp);

        assert_eq!(mesh.vertices_out().len(), mesh.vertices().len());
    }

    #[test]
    fn test_transform_preserves_vertex_order() {
        let mut mesh = Mesh::create_test_triangle();
        mesh.set_world_matrix(TransformFactory::translation(&Vector3::new(0.0, 0.0, 0.5)));
        mesh.transform_vertices(&Matrix4::identity());

        for (v, out) in mesh.vertices().iter().zip(mesh.vertices_out()) {
            assert!((out.position.x - v.position.x).abs() < 1e-6);
            assert!((out.position.z - 0.5).abs() < 1e-6);
            assert_eq!(out.texcoord, v.texcoord);
        }
    }

    #[test]
    fn test_rotate_y_accumulates() {
        let mut mesh = Mesh::create_test_triangle();
        mesh.rotate_y(std::f32::consts::FRAC_PI_4);
        mesh.rotate_y(std::f32::consts::FRAC_PI_4);

        let expected = TransformFactory::rotation_y(std::f32::consts::FRAC_PI_2);
        assert!((mesh.world_matrix() - expected).norm() < 1e-5);
    }
}
