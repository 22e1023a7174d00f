use crate::core::color::Color;
use crate::core::pipeline::{Fragment, Shader};
use crate::scene::texture::Texture;

/// Writes the diffuse map as-is, without lighting.
///
/// Meshes without a diffuse map show their interpolated vertex color.
pub struct UnlitShader<'a> {
    pub diffuse: Option<&'a Texture>,
}

impl<'a> UnlitShader<'a> {
    pub fn new(diffuse: Option<&'a Texture>) -> Self {
        Self { diffuse }
    }
}

impl Shader for UnlitShader<'_> {
    fn fragment(&self, fragment: &Fragment) -> Color {
        match self.diffuse {
            Some(texture) => texture.sample(&fragment.texcoord),
            None => fragment.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Vector2, Vector3};

    fn fragment(uv: Vector2<f32>) -> Fragment {
        Fragment {
            color: Color::new(0.2, 0.4, 0.6),
            texcoord: uv,
            normal: Vector3::z(),
            tangent: Vector3::x(),
            view_direction: Vector3::z(),
            depth: 0.5,
        }
    }

    #[test]
    fn test_samples_diffuse_map() {
        let tex = Texture::from_rgb8(1, 1, vec![255, 0, 255]).unwrap();
        let shader = UnlitShader::new(Some(&tex));
        assert_eq!(shader.fragment(&fragment(Vector2::new(0.5, 0.5))), Color::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_falls_back_to_vertex_color() {
        let shader = UnlitShader::new(None);
        assert_eq!(shader.fragment(&fragment(Vector2::zeros())), Color::new(0.2, 0.4, 0.6));
    }
}
