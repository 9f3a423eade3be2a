use std::ops::Mul;

use super::clamp;

/// Float RGBA colour, channels nominally in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color4 {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Default for Color4 {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color4 {
    pub const BLACK: Color4 = Color4::new(0., 0., 0., 1.);
    pub const WHITE: Color4 = Color4::new(1., 1., 1., 1.);
    pub const RED: Color4 = Color4::new(1., 0., 0., 1.);
    pub const YELLOW: Color4 = Color4::new(1., 1., 0., 1.);

    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self { red, green, blue, alpha }
    }

    /// Scales the colour channels by a light intensity; alpha is kept.
    pub fn shade(self, intensity: f32) -> Self {
        Self {
            red: self.red * intensity,
            green: self.green * intensity,
            blue: self.blue * intensity,
            alpha: self.alpha,
        }
    }

    /// Packs to framebuffer byte order: blue, green, red, alpha.
    pub fn to_bgra(self) -> [u8; 4] {
        [
            channel_byte(self.blue),
            channel_byte(self.green),
            channel_byte(self.red),
            channel_byte(self.alpha),
        ]
    }
}

fn channel_byte(value: f32) -> u8 {
    (clamp(value, 0., 1.) * 255.) as u8
}

impl Mul<f32> for Color4 {
    type Output = Color4;
    fn mul(self, scale: f32) -> Color4 {
        Color4::new(
            self.red * scale,
            self.green * scale,
            self.blue * scale,
            self.alpha * scale,
        )
    }
}
