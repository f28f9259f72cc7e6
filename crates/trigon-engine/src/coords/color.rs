/// Straight-alpha RGBA color with channels in `[0, 1]`.
///
/// Channel values are written to the render target as-is; no sRGB conversion
/// happens when the surface format is linear.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub(crate) fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_sets_full_alpha() {
        assert_eq!(ColorRgba::opaque(0.2, 0.3, 0.3), ColorRgba::new(0.2, 0.3, 0.3, 1.0));
    }

    #[test]
    fn converts_to_wgpu_clear_value() {
        let c = ColorRgba::new(0.5, 0.25, 0.0, 1.0).to_wgpu();
        assert_eq!((c.r, c.g, c.b, c.a), (0.5, 0.25, 0.0, 1.0));
    }
}
