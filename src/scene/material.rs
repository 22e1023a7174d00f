use crate::scene::texture::Texture;
use std::sync::Arc;

/// Texture maps a mesh is shaded with. Every slot is optional and the
/// shaders fall back per slot when one is missing.
#[derive(Debug, Clone, Default)]
pub struct ShadingResources {
    pub diffuse: Option<Arc<Texture>>,
    /// Tangent-space normals, encoded in [0, 1].
    pub normal: Option<Arc<Texture>>,
    pub specular: Option<Arc<Texture>>,
    /// Red channel scales the Phong exponent.
    pub glossiness: Option<Arc<Texture>>,
}

impl ShadingResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diffuse(mut self, texture: Arc<Texture>) -> Self {
        self.diffuse = Some(texture);
        self
    }

    pub fn with_normal(mut self, texture: Arc<Texture>) -> Self {
        self.normal = Some(texture);
        self
    }

    pub fn with_specular(mut self, texture: Arc<Texture>) -> Self {
        self.specular = Some(texture);
        self
    }

    pub fn with_glossiness(mut self, texture: Arc<Texture>) -> Self {
        self.glossiness = Some(texture);
        self
    }
}
