use crate::core::color::Color;
use log::warn;
use nalgebra::Vector3;

const DEFAULT_DIRECTION: Vector3<f32> = Vector3::new(0.577, -0.577, 0.577);

/// The single light of the scene. Rays are parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels, unit length.
    pub direction: Vector3<f32>,
    pub intensity: f32,
    /// Kept with the light but not applied by any color mode.
    pub ambient: Color,
}

impl DirectionalLight {
    /// A zero or non-finite `direction` falls back to the default direction.
    pub fn new(direction: Vector3<f32>, intensity: f32) -> Self {
        let direction = direction
            .try_normalize(f32::EPSILON)
            .filter(|d| d.iter().all(|c| c.is_finite()))
            .unwrap_or_else(|| {
                warn!("Light direction {:?} is unusable, using the default", direction);
                DEFAULT_DIRECTION.normalize()
            });
        Self {
            direction,
            intensity,
            ambient: Color::new(0.025, 0.025, 0.025),
        }
    }

    /// Unit vector from a surface toward the light.
    #[inline]
    pub fn to_light(&self) -> Vector3<f32> {
        -self.direction
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTION, 7.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_normalized() {
        let light = DirectionalLight::new(Vector3::new(0.0, -4.0, 0.0), 2.0);
        assert_eq!(light.direction, Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(light.to_light(), Vector3::y());
    }

    #[test]
    fn test_zero_direction_falls_back_to_default() {
        let light = DirectionalLight::new(Vector3::zeros(), 3.0);
        assert_eq!(light.direction, DirectionalLight::default().direction);
        assert!(light.direction.iter().all(|c| c.is_finite()));
        assert_eq!(light.intensity, 3.0);

        let nan = DirectionalLight::new(Vector3::new(f32::NAN, 0.0, 1.0), 1.0);
        assert_eq!(nan.direction, DirectionalLight::default().direction);
    }
}
