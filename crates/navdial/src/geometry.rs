//! Fixed dial geometry: the tick ring and the translucent backdrop.

use glam::{Affine2, Vec2};

use crate::coord::Viewport;
use crate::items::{PolyItem, Property};

/// Outer ring radius in unit (pre-scale) dial space.
pub const OUTER_RADIUS: f32 = 0.9;

/// Inner ring radius in unit dial space.
pub const INNER_RADIUS: f32 = 0.75;

/// Two concentric 35-point arcs at 10-degree steps plus the three
/// west/south/east marker tips. The count is fixed for the lifetime of the
/// ring; layout only re-transforms it.
pub const RING_POINT_COUNT: usize = 73;

/// Backdrop alpha on its shaded edge (matches an 80/255 byte alpha).
pub const BACKDROP_ALPHA: f32 = 80.0 / 255.0;

/// The dial's tick ring: four 80-degree double arcs with a gap at each
/// cardinal direction, and filled tick triangles at west, south and east.
/// North stays open for the heading label.
#[derive(Debug, Clone)]
pub struct Ring {
    base: [Vec2; RING_POINT_COUNT],
    pub item: PolyItem,
}

impl Ring {
    pub fn new(property: Property) -> Self {
        let mut base = [Vec2::ZERO; RING_POINT_COUNT];
        for i in 0..35 {
            let angle = (10.0 * (i as f32 + 10.0)).to_radians();
            let dir = Vec2::new(angle.cos(), angle.sin());
            base[i] = OUTER_RADIUS * dir;
            base[i + 35] = INNER_RADIUS * dir;
        }
        // Marker tips just past the outer radius.
        base[70] = Vec2::new(-OUTER_RADIUS - 0.1, 0.0);
        base[71] = Vec2::new(0.0, -OUTER_RADIUS - 0.1);
        base[72] = Vec2::new(OUTER_RADIUS + 0.1, 0.0);

        let mut item = PolyItem::new(property);
        item.points = base.to_vec();

        // Each arc cell walks 8 outer points, the matching inner points in
        // reverse, and closes on its first outer point.
        for i in 0..4u16 {
            let mut cell = Vec::with_capacity(17);
            for j in 0..8u16 {
                cell.push(i * 9 + j);
            }
            for j in 0..8u16 {
                cell.push(i * 9 + 35 + 7 - j);
            }
            cell.push(i * 9);
            item.lines.push(cell);
        }

        // Tick triangles at the west/south/east gaps.
        for i in 1..4u16 {
            item.tris.push([i + 69, i * 9 + 35, i * 9 + 33]);
        }

        Self { base, item }
    }

    /// Re-transforms the fixed points: translate to `center`, scale by
    /// `radius`, rotate by `heading_deg`. Topology is untouched.
    pub fn set_transform(&mut self, center: Vec2, radius: f32, heading_deg: f32) {
        let xform = Affine2::from_scale_angle_translation(
            Vec2::splat(radius),
            heading_deg.to_radians(),
            center,
        );
        for (out, base) in self.item.points.iter_mut().zip(self.base.iter()) {
            *out = xform.transform_point2(*base);
        }
    }
}

/// Translucent quad behind the dial and its status text. The right edge
/// tracks the viewport, the left edge tracks center/radius/highlight.
#[derive(Debug, Clone)]
pub struct Backdrop {
    pub item: PolyItem,
}

impl Backdrop {
    pub fn new() -> Self {
        let mut item = PolyItem::new(Property::new([0.0, 0.0, 0.0], 1.0, 1.0));
        item.points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        item.tris = vec![[0, 1, 2], [0, 2, 3]];
        // Left edge fully transparent, right edge shaded.
        item.vertex_colors = Some(vec![
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, BACKDROP_ALPHA],
            [0.0, 0.0, 0.0, BACKDROP_ALPHA],
            [0.0, 0.0, 0.0, 0.0],
        ]);
        Self { item }
    }

    /// Regenerated every layout pass, unlike the ring.
    pub fn layout(&mut self, viewport: Viewport, center: Vec2, radius: f32, highlighted: bool) {
        let size = viewport.size_px();
        let bottom = center.y - radius * 1.1;
        // A highlighted backdrop reaches further left so the status text
        // stays readable against the scene.
        let left = if highlighted {
            center.x - radius * 5.0
        } else {
            center.x - radius * 3.0
        };

        self.item.points[0] = Vec2::new(left, bottom);
        self.item.points[1] = Vec2::new(size.x, bottom);
        self.item.points[2] = size;
        self.item.points[3] = Vec2::new(left, size.y);

        if let Some(colors) = &mut self.item.vertex_colors {
            colors[1][3] = if highlighted { BACKDROP_ALPHA } else { 0.0 };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ring_topology_is_fixed() {
        let ring = Ring::new(Property::dial_normal());
        assert_eq!(ring.item.points.len(), RING_POINT_COUNT);
        assert_eq!(ring.item.lines.len(), 4);
        assert!(ring.item.lines.iter().all(|cell| cell.len() == 17));
        assert_eq!(ring.item.tris.len(), 3);
    }

    #[test]
    fn ring_transform_does_not_reallocate() {
        let mut ring = Ring::new(Property::dial_normal());
        ring.set_transform(Vec2::new(500.0, 400.0), 60.0, 45.0);
        assert_eq!(ring.item.points.len(), RING_POINT_COUNT);
        ring.set_transform(Vec2::new(10.0, 10.0), 5.0, 300.0);
        assert_eq!(ring.item.points.len(), RING_POINT_COUNT);
    }

    #[test]
    fn ring_transform_places_east_marker() {
        let mut ring = Ring::new(Property::dial_normal());
        let center = Vec2::new(100.0, 100.0);
        ring.set_transform(center, 50.0, 0.0);
        let east = ring.item.points[72];
        assert_relative_eq!(east.x, 100.0 + 50.0 * (OUTER_RADIUS + 0.1), epsilon = 1e-3);
        assert_relative_eq!(east.y, 100.0, epsilon = 1e-3);
    }

    #[test]
    fn backdrop_tracks_viewport_and_highlight() {
        let mut backdrop = Backdrop::new();
        let vp = Viewport::new(800, 600);
        let center = Vec2::new(700.0, 500.0);

        backdrop.layout(vp, center, 40.0, false);
        assert_eq!(backdrop.item.points[1], Vec2::new(800.0, 500.0 - 44.0));
        assert_eq!(backdrop.item.points[2], Vec2::new(800.0, 600.0));
        assert_relative_eq!(backdrop.item.points[0].x, 700.0 - 120.0);
        assert_eq!(backdrop.item.vertex_colors.as_ref().unwrap()[1][3], 0.0);

        backdrop.layout(vp, center, 40.0, true);
        assert_relative_eq!(backdrop.item.points[0].x, 700.0 - 200.0);
        assert_eq!(
            backdrop.item.vertex_colors.as_ref().unwrap()[1][3],
            BACKDROP_ALPHA
        );
    }
}
