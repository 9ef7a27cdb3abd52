/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size rounded to whole logical pixels, with each side at least 1.
    #[inline]
    pub fn whole_pixels(self) -> (u32, u32) {
        let w = if self.width.is_finite() { self.width.round().max(1.0) } else { 1.0 };
        let h = if self.height.is_finite() { self.height.round().max(1.0) } else { 1.0 };
        (w as u32, h as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_pixels_rounds_and_clamps() {
        assert_eq!(Viewport::new(799.6, 400.2).whole_pixels(), (800, 400));
        assert_eq!(Viewport::new(0.0, 0.0).whole_pixels(), (1, 1));
        assert_eq!(Viewport::new(f32::NAN, 10.0).whole_pixels(), (1, 10));
    }
}
