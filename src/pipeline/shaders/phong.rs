use crate::core::color::{Color, gray};
use crate::core::math::transform::reflect;
use crate::core::pipeline::{Fragment, Shader};
use crate::pipeline::frame::ColorMode;
use crate::scene::light::DirectionalLight;
use crate::scene::material::ShadingResources;
use nalgebra::{Matrix3, Vector3};
use std::f32::consts::PI;

/// Scales the glossiness sample into a Phong exponent.
pub const GLOSSINESS_SCALE: f32 = 25.0;

/// Lambert diffuse with Phong specular under one directional light.
///
/// The output depends on `color_mode`; see [`ColorMode`]. Missing texture
/// slots fall back to the vertex color (diffuse), no highlight (specular),
/// glossiness 1.0 and the vertex normal.
pub struct PhongShader<'a> {
    pub resources: &'a ShadingResources,
    pub light: &'a DirectionalLight,
    pub color_mode: ColorMode,
    pub normal_mapping: bool,
}

impl<'a> PhongShader<'a> {
    pub fn new(
        resources: &'a ShadingResources,
        light: &'a DirectionalLight,
        color_mode: ColorMode,
        normal_mapping: bool,
    ) -> Self {
        Self {
            resources,
            light,
            color_mode,
            normal_mapping,
        }
    }

    /// Vertex normal, or the normal map decoded through the tangent frame.
    ///
    /// The decoded normal is not renormalized.
    fn shading_normal(&self, fragment: &Fragment) -> Vector3<f32> {
        let normal_map = match (self.normal_mapping, &self.resources.normal) {
            (true, Some(texture)) => texture,
            _ => return fragment.normal,
        };

        let n = fragment.normal;
        let t = fragment.tangent;
        let b = n.cross(&t);
        // Columns map tangent-space x/y/z onto tangent/bitangent/normal.
        let tbn = Matrix3::from_columns(&[t, b, n]);

        let sample = normal_map.sample(&fragment.texcoord);
        let tangent_normal = sample * 2.0 - Vector3::new(1.0, 1.0, 1.0);

        tbn * tangent_normal
    }

    fn diffuse_albedo(&self, fragment: &Fragment) -> Color {
        match &self.resources.diffuse {
            Some(texture) => texture.sample(&fragment.texcoord),
            None => fragment.color,
        }
    }

    fn specular(&self, fragment: &Fragment, normal: &Vector3<f32>) -> Color {
        let Some(specular_map) = &self.resources.specular else {
            return Color::zeros();
        };
        let glossiness = self
            .resources
            .glossiness
            .as_ref()
            .map_or(1.0, |g| g.sample(&fragment.texcoord).x);

        let highlight = phong(
            1.0,
            glossiness * GLOSSINESS_SCALE,
            &self.light.to_light(),
            &fragment.view_direction,
            normal,
        );
        specular_map.sample(&fragment.texcoord) * highlight
    }
}

impl Shader for PhongShader<'_> {
    fn fragment(&self, fragment: &Fragment) -> Color {
        let normal = self.shading_normal(fragment);
        let observed_area = normal.dot(&self.light.to_light()).max(0.0);

        match self.color_mode {
            ColorMode::Base => self.diffuse_albedo(fragment),
            ColorMode::ObservedArea => gray(observed_area),
            ColorMode::Diffuse => lambert(self.light.intensity, &self.diffuse_albedo(fragment)) * observed_area,
            ColorMode::Specular => self.specular(fragment, &normal),
            ColorMode::Combined => {
                let diffuse = lambert(self.light.intensity, &self.diffuse_albedo(fragment));
                (diffuse + self.specular(fragment, &normal)) * observed_area
            }
        }
    }
}

/// Lambert BRDF: `kd * cd / π`.
#[inline]
pub fn lambert(kd: f32, cd: &Color) -> Color {
    cd * (kd / PI)
}

/// Phong specular lobe: `ks * max(dot(reflect(l, n), v), 0)^exponent`.
#[inline]
pub fn phong(ks: f32, exponent: f32, l: &Vector3<f32>, v: &Vector3<f32>, n: &Vector3<f32>) -> f32 {
    let cos_alpha = reflect(l, n).dot(v).max(0.0);
    ks * cos_alpha.powf(exponent)
}
