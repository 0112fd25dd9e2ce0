//! Viewport sizes and normalized-viewport coordinates.
//!
//! Widget layout runs in pixel space with the origin at the bottom-left of
//! the render surface and y pointing up. Renderers with a y-down convention
//! flip at the draw boundary, not here.

use glam::Vec2;

/// Pixel size of a render surface at one instant.
///
/// This is the whole render-surface seam the widget layer needs: controls
/// are handed a `Viewport` snapshot and never talk to a window directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True while the surface has not been given a real size yet.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn size_px(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// A point expressed as a fraction of the viewport, (0, 0) bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint(pub Vec2);

impl NormalizedPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn to_pixels(self, viewport: Viewport) -> Vec2 {
        self.0 * viewport.size_px()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_point_maps_to_pixels() {
        let vp = Viewport::new(1000, 500);
        let p = NormalizedPoint::new(0.8, 0.8).to_pixels(vp);
        assert_eq!(p, Vec2::new(800.0, 400.0));
    }

    #[test]
    fn zero_size_viewport_is_empty() {
        assert!(Viewport::new(0, 720).is_empty());
        assert!(Viewport::new(1280, 0).is_empty());
        assert!(!Viewport::new(1280, 720).is_empty());
    }
}
