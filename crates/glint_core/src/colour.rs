//! 8-bit RGB colour with a brightness multiplier, and ARGB packing.

use glint_math::Vec3;

/// An RGB colour with channels in 0-255 and a linear brightness scale.
///
/// Brightness is kept separate from the channels until the colour is packed,
/// so shading can adjust it without losing the surface's base colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub brightness: f32,
}

impl Colour {
    pub const BLACK: Colour = Colour::new(0, 0, 0);
    pub const WHITE: Colour = Colour::new(255, 255, 255);

    /// Create a colour at full brightness.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            brightness: 1.0,
        }
    }

    /// Same channels, different brightness.
    pub fn with_brightness(self, brightness: f32) -> Self {
        Self { brightness, ..self }
    }

    /// Build from unit-range RGB (as found in MTL files).
    pub fn from_unit_rgb(rgb: [f32; 3]) -> Self {
        Self::new(unit_to_byte(rgb[0]), unit_to_byte(rgb[1]), unit_to_byte(rgb[2]))
    }

    /// Unpack a 0xAARRGGBB word; brightness is 1.0.
    pub fn from_packed(argb: u32) -> Self {
        Self::new((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }

    /// Pack channels as 0xFFRRGGBB, ignoring brightness.
    pub fn pack(&self) -> u32 {
        pack_argb(self.red, self.green, self.blue)
    }

    /// Pack channels as 0xFFRRGGBB with brightness multiplied into each channel.
    pub fn pack_with_brightness(&self) -> u32 {
        pack_argb(
            scale_channel(self.red, self.brightness),
            scale_channel(self.green, self.brightness),
            scale_channel(self.blue, self.brightness),
        )
    }

    /// Brightness-scaled channels as linear 0-1 RGB.
    pub fn to_linear(&self) -> Vec3 {
        Vec3::new(self.red as f32, self.green as f32, self.blue as f32) * self.brightness / 255.0
    }

    /// Convert linear 0-1 RGB back to channels at brightness 1.0.
    pub fn from_linear(rgb: Vec3) -> Self {
        Self::from_unit_rgb(rgb.to_array())
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Pack three channels with an opaque alpha.
#[inline]
pub fn pack_argb(red: u8, green: u8, blue: u8) -> u32 {
    (255 << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32
}

#[inline]
fn scale_channel(channel: u8, brightness: f32) -> u8 {
    (channel as f32 * brightness).round().clamp(0.0, 255.0) as u8
}

#[inline]
fn unit_to_byte(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack() {
        let c = Colour::new(0x12, 0x34, 0x56);
        assert_eq!(c.pack(), 0xFF12_3456);
        // Brightness ignored by plain pack
        assert_eq!(c.with_brightness(0.5).pack(), 0xFF12_3456);
    }

    #[test]
    fn test_pack_with_brightness() {
        let c = Colour::new(200, 100, 0).with_brightness(0.5);
        assert_eq!(c.pack_with_brightness(), pack_argb(100, 50, 0));

        let full = Colour::new(200, 100, 10);
        assert_eq!(full.pack_with_brightness(), full.pack());
    }

    #[test]
    fn test_pack_with_brightness_saturates() {
        let c = Colour::new(200, 0, 0).with_brightness(4.0);
        assert_eq!(c.pack_with_brightness(), pack_argb(255, 0, 0));
    }

    #[test]
    fn test_from_packed() {
        let c = Colour::from_packed(0xFFAA_BBCC);
        assert_eq!(c, Colour::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_unit_rgb() {
        let c = Colour::from_unit_rgb([1.0, 0.5, -1.0]);
        assert_eq!(c, Colour::new(255, 128, 0));
    }

    #[test]
    fn test_linear() {
        let c = Colour::new(255, 0, 51).with_brightness(0.5);
        let linear = c.to_linear();
        assert!((linear.x - 0.5).abs() < 1e-6);
        assert!((linear.z - 0.1).abs() < 1e-6);
        assert_eq!(Colour::from_linear(Vec3::new(1.0, 0.0, 0.2)), Colour::new(255, 0, 51));
    }
}
