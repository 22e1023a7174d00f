use nalgebra::Vector3;

/// RGB color with floating-point channels, nominally in [0.0, 1.0].
pub type Color = Vector3<f32>;

/// A color with the same value in every channel.
#[inline]
pub fn gray(value: f32) -> Color {
    Color::new(value, value, value)
}

/// Clamps each channel to [0.0, 1.0].
///
/// Channels above 1.0 saturate on their own; the color is not rescaled
/// by its largest channel, so hue shifts toward white on overexposure.
#[inline]
pub fn saturate(color: &Color) -> Color {
    Color::new(
        color.x.clamp(0.0, 1.0),
        color.y.clamp(0.0, 1.0),
        color.z.clamp(0.0, 1.0),
    )
}

/// Packs 8-bit channels into `0x00RRGGBB`.
#[inline]
pub fn pack_rgb8(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Packs a color into `0x00RRGGBB`, clamping and rounding each channel.
#[inline]
pub fn pack_rgb(color: &Color) -> u32 {
    let c = saturate(color);
    pack_rgb8(to_u8(c.x), to_u8(c.y), to_u8(c.z))
}

/// Splits a packed `0x00RRGGBB` value into its channels.
#[inline]
pub fn channels(packed: u32) -> [u8; 3] {
    [
        ((packed >> 16) & 0xFF) as u8,
        ((packed >> 8) & 0xFF) as u8,
        (packed & 0xFF) as u8,
    ]
}

#[inline]
fn to_u8(channel: f32) -> u8 {
    (channel * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate_clamps_per_channel() {
        let c = saturate(&Color::new(2.0, 0.5, -1.0));
        assert_eq!(c, Color::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_pack_rgb_layout() {
        assert_eq!(pack_rgb(&Color::new(1.0, 0.0, 0.0)), 0x00FF0000);
        assert_eq!(pack_rgb(&Color::new(0.0, 1.0, 0.0)), 0x0000FF00);
        assert_eq!(pack_rgb(&Color::new(0.0, 0.0, 1.0)), 0x000000FF);
        assert_eq!(pack_rgb8(100, 100, 100), 0x00646464);
    }

    #[test]
    fn test_pack_rgb_rounds_near_one() {
        // Interpolation noise just under 1.0 must not drop a whole step.
        assert_eq!(pack_rgb(&gray(0.99999)), 0x00FFFFFF);
        assert_eq!(pack_rgb(&gray(5.0)), 0x00FFFFFF);
    }

    #[test]
    fn test_channels_split_packed_color() {
        let packed = pack_rgb8(0xBB, 0xCC, 0xDD);
        assert_eq!(channels(packed), [0xBB, 0xCC, 0xDD]);
    }
}
