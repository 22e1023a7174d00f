use crate::core::color::Color;
use crate::core::geometry::{PrimitiveTopology, Vertex};
use crate::error::Result;
use crate::scene::mesh::Mesh;
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file into one triangle-list mesh.
///
/// OBJ data is right-handed with V pointing up; it is converted to the
/// left-handed, V-down convention used here by negating z, swapping the
/// winding of every triangle and flipping V. Tangents are derived from
/// the UVs. Sub-models are merged.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    info!("Loading OBJ file: {:?}", path);

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &load_options)?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let base = vertices.len() as u32;
        let num_vertices = mesh.positions.len() / 3;

        let has_normals = !mesh.normals.is_empty();
        let has_texcoords = !mesh.texcoords.is_empty();
        let has_colors = !mesh.vertex_color.is_empty();
        if !has_normals {
            warn!("Mesh '{}' has no normals, using (0, 1, 0)", model.name);
        }

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                -mesh.positions[i * 3 + 2],
            );
            let normal = if has_normals {
                Vector3::new(mesh.normals[i * 3], mesh.normals[i * 3 + 1], -mesh.normals[i * 3 + 2])
            } else {
                Vector3::y()
            };
            let texcoord = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };

            let mut vertex = Vertex::new(position, normal, texcoord);
            if has_colors {
                vertex = vertex.with_color(Color::new(
                    mesh.vertex_color[i * 3],
                    mesh.vertex_color[i * 3 + 1],
                    mesh.vertex_color[i * 3 + 2],
                ));
            }
            vertices.push(vertex);
        }

        // Mirroring z flips winding; swap the last two corners back.
        for tri in mesh.indices.chunks_exact(3) {
            indices.extend_from_slice(&[base + tri[0], base + tri[2], base + tri[1]]);
        }
    }

    compute_tangents(&mut vertices, &indices);

    info!(
        "OBJ loaded. Vertices: {}, triangles: {}",
        vertices.len(),
        indices.len() / 3
    );

    Mesh::new(vertices, indices, PrimitiveTopology::TriangleList)
}

/// Accumulates per-triangle UV tangents onto their vertices, then makes
/// each tangent orthogonal to its normal (Gram-Schmidt) and unit length.
///
/// Triangles with degenerate UVs contribute nothing; a vertex left with no
/// usable tangent keeps a zero tangent.
pub fn compute_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accumulated = vec![Vector3::<f32>::zeros(); vertices.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (v0, v1, v2) = (&vertices[i0], &vertices[i1], &vertices[i2]);

        let edge0 = v1.position - v0.position;
        let edge1 = v2.position - v0.position;
        let duv0 = v1.texcoord - v0.texcoord;
        let duv1 = v2.texcoord - v0.texcoord;

        let r = 1.0 / (duv0.x * duv1.y - duv1.x * duv0.y);
        if !r.is_finite() {
            continue;
        }
        let tangent = (edge0 * duv1.y - edge1 * duv0.y) * r;

        accumulated[i0] += tangent;
        accumulated[i1] += tangent;
        accumulated[i2] += tangent;
    }

    for (vertex, tangent) in vertices.iter_mut().zip(accumulated) {
        let n = vertex.normal;
        let orthogonal = tangent - n * n.dot(&tangent);
        vertex.tangent = orthogonal.try_normalize(1e-8).unwrap_or_else(Vector3::zeros);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const QUAD_OBJ: &str = "\
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
f 1/1/1 3/3/1 4/4/1
";

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("softraster_{}_{}.obj", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_converts_handedness() {
        let path = write_temp("quad", QUAD_OBJ);
        let mesh = load_obj(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(mesh.indices().len(), 6);
        assert_eq!(mesh.topology(), PrimitiveTopology::TriangleList);

        for v in mesh.vertices() {
            // +Z normal in OBJ space faces the camera (-Z) here.
            assert!((v.normal - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
            assert!((v.tangent - Vector3::x()).norm() < 1e-5, "tangent {:?}", v.tangent);
        }

        // V is flipped: the bottom-left corner maps to the bottom of the texture.
        let bottom_left = mesh
            .vertices()
            .iter()
            .find(|v| v.position.x < 0.0 && v.position.y < 0.0)
            .unwrap();
        assert_eq!(bottom_left.texcoord, Vector2::new(0.0, 1.0));
    }

    #[test]
    fn test_load_swaps_winding() {
        let path = write_temp("winding", QUAD_OBJ);
        let mesh = load_obj(&path).unwrap();
        fs::remove_file(&path).ok();

        // Viewed from -Z with +Y up, the converted triangle must be clockwise
        // in x/y so that it keeps positive screen area.
        let idx = mesh.indices();
        let p = |i: u32| mesh.vertices()[i as usize].position;
        let (a, b, c) = (p(idx[0]), p(idx[1]), p(idx[2]));
        let cross_z = (b - a).x * (c - a).y - (b - a).y * (c - a).x;
        assert!(cross_z < 0.0, "expected clockwise winding, got {cross_z}");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_obj("definitely/not/here.obj").is_err());
    }

    #[test]
    fn test_degenerate_uvs_leave_zero_tangent() {
        let mut vertices = vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z(), Vector2::zeros()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z(), Vector2::zeros()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z(), Vector2::zeros()),
        ];
        compute_tangents(&mut vertices, &[0, 1, 2]);
        assert!(vertices.iter().all(|v| v.tangent == Vector3::zeros()));
    }
}
