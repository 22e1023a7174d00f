use crate::core::color::pack_rgb8;
use crate::core::rasterizer::{CullMode, RenderMode};
use serde::{Deserialize, Serialize};

/// Shading term written in [`RenderMode::Texture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Unlit diffuse sample.
    Base,
    /// Lambert cosine only, as grayscale.
    ObservedArea,
    Diffuse,
    Specular,
    #[default]
    Combined,
}

impl ColorMode {
    pub fn next(self) -> Self {
        match self {
            ColorMode::Base => ColorMode::ObservedArea,
            ColorMode::ObservedArea => ColorMode::Diffuse,
            ColorMode::Diffuse => ColorMode::Specular,
            ColorMode::Specular => ColorMode::Combined,
            ColorMode::Combined => ColorMode::Base,
        }
    }
}

/// User-issued toggles, mapped from keys by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CycleRenderMode,
    CycleColorMode,
    ToggleNormalMapping,
    ToggleRotation,
    ToggleClearColor,
    CycleCullMode,
    TogglePrintFps,
}

/// Render settings for one frame.
///
/// Immutable while a frame renders; [`FrameConfig::apply`] yields the
/// configuration for the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    pub render_mode: RenderMode,
    pub color_mode: ColorMode,
    pub normal_mapping: bool,
    pub rotate: bool,
    pub cull_mode: CullMode,
    pub alternate_clear: bool,
    pub clear_color: u32,
    pub alternate_clear_color: u32,
    /// Log frames per second once a second.
    pub print_fps: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Texture,
            color_mode: ColorMode::Combined,
            normal_mapping: true,
            rotate: true,
            cull_mode: CullMode::Back,
            alternate_clear: false,
            clear_color: pack_rgb8(100, 100, 100),
            alternate_clear_color: pack_rgb8(3, 3, 3),
            print_fps: true,
        }
    }
}

impl FrameConfig {
    pub fn apply(self, command: Command) -> Self {
        let mut next = self;
        match command {
            Command::CycleRenderMode => next.render_mode = self.render_mode.next(),
            Command::CycleColorMode => next.color_mode = self.color_mode.next(),
            Command::ToggleNormalMapping => next.normal_mapping = !self.normal_mapping,
            Command::ToggleRotation => next.rotate = !self.rotate,
            Command::ToggleClearColor => next.alternate_clear = !self.alternate_clear,
            Command::CycleCullMode => next.cull_mode = self.cull_mode.next(),
            Command::TogglePrintFps => next.print_fps = !self.print_fps,
        }
        next
    }

    /// Packed clear color for this frame.
    pub fn background(&self) -> u32 {
        if self.alternate_clear {
            self.alternate_clear_color
        } else {
            self.clear_color
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FrameConfig::default();
        assert_eq!(config.render_mode, RenderMode::Texture);
        assert_eq!(config.color_mode, ColorMode::Combined);
        assert!(config.normal_mapping);
        assert_eq!(config.background(), 0x00646464);
    }

    #[test]
    fn test_apply_returns_new_config() {
        let config = FrameConfig::default();
        let next = config.apply(Command::ToggleNormalMapping);

        assert!(config.normal_mapping, "the original is left untouched");
        assert!(!next.normal_mapping);
        assert_eq!(next.apply(Command::ToggleNormalMapping), config);
    }

    #[test]
    fn test_color_mode_cycle_wraps() {
        let mut mode = ColorMode::Combined;
        for _ in 0..5 {
            mode = mode.next();
        }
        assert_eq!(mode, ColorMode::Combined);
        assert_eq!(ColorMode::Combined.next(), ColorMode::Base);
    }

    #[test]
    fn test_clear_color_toggle() {
        let config = FrameConfig::default().apply(Command::ToggleClearColor);
        assert_eq!(config.background(), 0x00030303);
    }

    #[test]
    fn test_mode_cycles() {
        let config = FrameConfig::default()
            .apply(Command::CycleRenderMode)
            .apply(Command::CycleCullMode)
            .apply(Command::ToggleRotation);
        assert_eq!(config.render_mode, RenderMode::DepthBuffer);
        assert_eq!(config.cull_mode, CullMode::Front);
        assert!(!config.rotate);
    }

    #[test]
    fn test_print_fps_toggle() {
        let config = FrameConfig::default();
        assert!(config.print_fps);

        let quiet = config.apply(Command::TogglePrintFps);
        assert!(!quiet.print_fps);
        assert_eq!(quiet.render_mode, config.render_mode);
        assert_eq!(quiet.apply(Command::TogglePrintFps), config);
    }
}
