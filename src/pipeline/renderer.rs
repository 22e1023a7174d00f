use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::{FrameStats, Rasterizer};
use crate::pipeline::assembly::assemble_triangles;
use crate::pipeline::frame::{ColorMode, FrameConfig};
use crate::pipeline::shaders::phong::PhongShader;
use crate::pipeline::shaders::unlit::UnlitShader;
use crate::scene::context::RenderContext;
use crate::scene::light::DirectionalLight;
use crate::scene::mesh::Mesh;
use log::{debug, warn};

/// Owns the framebuffer and drives one software frame at a time.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.framebuffer.resize(width, height);
    }

    /// Renders every mesh of `context` with the settings in `config`.
    ///
    /// Clears the buffers, rebuilds each mesh's transformed vertices, then
    /// rasterizes triangles in index order.
    pub fn render_frame(&mut self, context: &mut RenderContext, config: &FrameConfig) -> FrameStats {
        self.framebuffer.clear(config.background());
        self.rasterizer.set_cull_mode(config.cull_mode);

        let view_projection = context.camera.view_projection_matrix();
        let mut stats = FrameStats::default();

        for mesh in &mut context.meshes {
            mesh.transform_vertices(&view_projection);
            self.draw_mesh(mesh, &context.light, config, &mut stats);
        }

        debug!(
            "Frame: {} triangles ({} out of volume, {} culled), {}/{} fragments written",
            stats.triangles,
            stats.culled_by_volume,
            stats.culled_by_winding,
            stats.fragments_written,
            stats.fragments_tested
        );
        stats
    }

    /// Rasterizes a mesh whose transformed vertices are already current.
    pub fn draw_mesh(
        &mut self,
        mesh: &Mesh,
        light: &DirectionalLight,
        config: &FrameConfig,
        stats: &mut FrameStats,
    ) {
        if mesh.vertices_out().len() != mesh.vertices().len() {
            warn!(
                "Skipping mesh: {} transformed vertices for {} inputs",
                mesh.vertices_out().len(),
                mesh.vertices().len()
            );
            return;
        }

        match config.color_mode {
            ColorMode::Base => {
                let shader = UnlitShader::new(mesh.resources.diffuse.as_deref());
                self.draw_triangles(mesh, &shader, config, stats);
            }
            color_mode => {
                let shader = PhongShader::new(&mesh.resources, light, color_mode, config.normal_mapping);
                self.draw_triangles(mesh, &shader, config, stats);
            }
        }
    }

    fn draw_triangles<S: Shader>(&mut self, mesh: &Mesh, shader: &S, config: &FrameConfig, stats: &mut FrameStats) {
        let vertices = mesh.vertices_out();
        for [i0, i1, i2] in assemble_triangles(mesh.indices(), mesh.topology()) {
            self.rasterizer.rasterize_triangle(
                &mut self.framebuffer,
                shader,
                [
                    &vertices[i0 as usize],
                    &vertices[i1 as usize],
                    &vertices[i2 as usize],
                ],
                config.render_mode,
                stats,
            );
        }
    }
}
