//! Centered slider sub-control embedded in the dial.
//!
//! A thin tube with an arrow cap at each end and a handle riding the value.
//! The owning dial positions the endpoints each layout pass; the slider only
//! knows its box, bounds and value.

use glam::Vec2;

use crate::items::{
    FontFamily, HAlign, OverlayPass, PolyItem, Property, TextItem, TextStyle, VAlign,
    WidgetRepresentation,
};

/// Fraction of the long axis taken by each arrow cap.
const CAP_FRACTION: f32 = 0.15;

/// Fraction of the long axis taken by the handle.
const HANDLE_FRACTION: f32 = 0.1;

/// Where a pointer sits relative to the slider. `LowCap` is the cap at the
/// `p1` end of the box, `HighCap` the one at the `p2` end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderPart {
    Outside,
    LowCap,
    HighCap,
    Tube,
    Handle,
}

#[derive(Debug, Clone)]
pub struct CenteredSlider {
    minimum: f64,
    maximum: f64,
    value: f64,
    p1: Vec2,
    p2: Vec2,
    highlighted: bool,
    built: bool,
    normal_property: Property,
    selected_property: Property,
    pub tube: PolyItem,
    pub caps: PolyItem,
    pub handle: PolyItem,
    pub title: TextItem,
}

impl CenteredSlider {
    pub fn new(minimum: f64, maximum: f64, value: f64, title: &str) -> Self {
        let normal_property = Property::dial_normal();
        let selected_property = Property::dial_selected();
        let style = TextStyle::new(12.0, FontFamily::SansSerif, HAlign::Center, VAlign::Center);
        Self {
            minimum,
            maximum,
            value: value.clamp(minimum, maximum),
            p1: Vec2::ZERO,
            p2: Vec2::ZERO,
            highlighted: false,
            built: false,
            normal_property,
            selected_property,
            tube: PolyItem::new(normal_property),
            caps: PolyItem::new(normal_property),
            handle: PolyItem::new(Property::new([1.0, 1.0, 1.0], 0.9, 1.0)),
            title: TextItem::new(title, style),
        }
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value.clamp(self.minimum, self.maximum);
    }

    /// Lowering the maximum below the current value re-clamps the value.
    pub fn set_maximum(&mut self, maximum: f64) {
        self.maximum = maximum;
        self.set_value(self.value);
    }

    pub fn set_minimum(&mut self, minimum: f64) {
        self.minimum = minimum;
        self.set_value(self.value);
    }

    /// Spring the value back to mid-range (the "centered" contract; gesture
    /// layers call this when a tube drag ends).
    pub fn recenter(&mut self) {
        self.set_value(0.5 * (self.minimum + self.maximum));
    }

    /// Box corners in pixels, set by the owning dial each layout pass.
    pub fn set_endpoints(&mut self, p1: Vec2, p2: Vec2) {
        self.p1 = p1;
        self.p2 = p2;
    }

    pub fn highlight(&mut self, highlighted: bool) {
        if highlighted == self.highlighted {
            return;
        }
        self.highlighted = highlighted;
        let property = if highlighted {
            self.selected_property
        } else {
            self.normal_property
        };
        self.tube.property = property;
        self.caps.property = property;
    }

    /// Axis-aligned layout of the box: (axis index, cross index, length along
    /// the axis, p1-relative direction sign).
    fn axis(&self) -> (usize, usize, f32, f32) {
        let d = self.p2 - self.p1;
        if d.y.abs() >= d.x.abs() {
            (1, 0, d.y.abs(), d.y.signum())
        } else {
            (0, 1, d.x.abs(), d.x.signum())
        }
    }

    /// Pointer position expressed as (along-axis from the p1 end, across).
    /// None when outside the box.
    fn box_coords(&self, pos: Vec2) -> Option<(f32, f32)> {
        let (a, c, len, sign) = self.axis();
        if len <= 0.0 {
            return None;
        }
        let s = (pos[a] - self.p1[a]) * sign;
        let lo_c = self.p1[c].min(self.p2[c]);
        let hi_c = self.p1[c].max(self.p2[c]);
        if s < 0.0 || s > len || pos[c] < lo_c || pos[c] > hi_c {
            return None;
        }
        Some((s, pos[c] - lo_c))
    }

    /// Classifies a pointer position against the built geometry.
    pub fn interaction_state(&self, pos: Vec2) -> SliderPart {
        if !self.built {
            return SliderPart::Outside;
        }
        let Some((s, _)) = self.box_coords(pos) else {
            return SliderPart::Outside;
        };
        let (_, _, len, _) = self.axis();
        let cap = CAP_FRACTION * len;
        if s <= cap {
            return SliderPart::LowCap;
        }
        if s >= len - cap {
            return SliderPart::HighCap;
        }
        let handle_center = cap + self.value_fraction() * (len - 2.0 * cap);
        if (s - handle_center).abs() <= 0.5 * HANDLE_FRACTION * len {
            SliderPart::Handle
        } else {
            SliderPart::Tube
        }
    }

    /// Maps a pointer position along the tube into a value in [min, max].
    /// Positions off the tube clamp to the nearest bound.
    pub fn pointer_value(&self, pos: Vec2) -> f64 {
        let (a, _, len, sign) = self.axis();
        if len <= 0.0 {
            return self.value;
        }
        let cap = CAP_FRACTION * len;
        let s = ((pos[a] - self.p1[a]) * sign).clamp(cap, len - cap);
        let t = ((s - cap) / (len - 2.0 * cap)) as f64;
        self.minimum + t * (self.maximum - self.minimum)
    }

    fn value_fraction(&self) -> f32 {
        let span = self.maximum - self.minimum;
        if span <= 0.0 {
            0.5
        } else {
            ((self.value - self.minimum) / span) as f32
        }
    }

    /// Point in box space: `s` along the axis from the p1 end, `t` across in
    /// [0, 1].
    fn box_point(&self, s: f32, t: f32) -> Vec2 {
        let (a, c, _, sign) = self.axis();
        let lo_c = self.p1[c].min(self.p2[c]);
        let hi_c = self.p1[c].max(self.p2[c]);
        let mut out = Vec2::ZERO;
        out[a] = self.p1[a] + s * sign;
        out[c] = lo_c + t * (hi_c - lo_c);
        out
    }
}

impl WidgetRepresentation for CenteredSlider {
    /// Rebuilds tube, caps, handle and title from the current box. The
    /// owning dial gates the call, so this always regenerates.
    fn build(&mut self) -> bool {
        let (_, c, len, _) = self.axis();
        if len <= 0.0 {
            return false;
        }
        let cap = CAP_FRACTION * len;
        let width = (self.p2[c] - self.p1[c]).abs();

        self.tube.points = vec![
            self.box_point(cap, 0.0),
            self.box_point(len - cap, 0.0),
            self.box_point(len - cap, 1.0),
            self.box_point(cap, 1.0),
        ];
        self.tube.tris = vec![[0, 1, 2], [0, 2, 3]];
        self.tube.lines = vec![vec![0, 1, 2, 3, 0]];

        // Arrow caps point outward along the axis.
        self.caps.points = vec![
            self.box_point(0.0, 0.5),
            self.box_point(cap, 0.0),
            self.box_point(cap, 1.0),
            self.box_point(len, 0.5),
            self.box_point(len - cap, 0.0),
            self.box_point(len - cap, 1.0),
        ];
        self.caps.tris = vec![[0, 1, 2], [3, 4, 5]];
        self.caps.lines.clear();

        let handle_center = cap + self.value_fraction() * (len - 2.0 * cap);
        let half = 0.5 * HANDLE_FRACTION * len;
        self.handle.points = vec![
            self.box_point(handle_center - half, 0.0),
            self.box_point(handle_center + half, 0.0),
            self.box_point(handle_center + half, 1.0),
            self.box_point(handle_center - half, 1.0),
        ];
        self.handle.tris = vec![[0, 1, 2], [0, 2, 3]];
        self.handle.lines.clear();

        self.title.position = self.box_point(0.5 * len, 0.5);
        self.title.style.font_size = (0.45 * width).max(8.0);
        self.title.orientation_deg = 90.0;

        self.built = true;
        true
    }

    fn render_opaque_geometry(&mut self, pass: &mut dyn OverlayPass) -> usize {
        self.render_overlay(pass)
    }

    fn render_overlay(&mut self, pass: &mut dyn OverlayPass) -> usize {
        if !self.built {
            return 0;
        }
        let mut count = 0;
        pass.draw_poly(&self.tube);
        count += 1;
        pass.draw_poly(&self.caps);
        count += 1;
        pass.draw_poly(&self.handle);
        count += 1;
        if !self.title.text.is_empty() {
            pass.draw_text(&self.title);
            count += 1;
        }
        count
    }

    fn release_graphics_resources(&mut self) {
        self.built = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn built_slider() -> CenteredSlider {
        // Vertical box, 30 px wide, 200 px tall, p1 at the bottom.
        let mut s = CenteredSlider::new(-90.0, 90.0, 0.0, "tilt");
        s.set_endpoints(Vec2::new(100.0, 100.0), Vec2::new(130.0, 300.0));
        s.build();
        s
    }

    #[test]
    fn value_clamps_to_bounds() {
        let mut s = CenteredSlider::new(-90.0, 90.0, 0.0, "tilt");
        s.set_value(200.0);
        assert_eq!(s.value(), 90.0);
        s.set_value(-200.0);
        assert_eq!(s.value(), -90.0);
    }

    #[test]
    fn shrinking_bounds_reclamps_value() {
        let mut s = CenteredSlider::new(-90.0, 90.0, 80.0, "tilt");
        s.set_maximum(45.0);
        assert_eq!(s.value(), 45.0);
        s.set_minimum(50.0);
        assert_eq!(s.value(), 50.0);
    }

    #[test]
    fn outside_before_build() {
        let mut s = CenteredSlider::new(-90.0, 90.0, 0.0, "tilt");
        s.set_endpoints(Vec2::new(100.0, 100.0), Vec2::new(130.0, 300.0));
        assert_eq!(s.interaction_state(Vec2::new(115.0, 200.0)), SliderPart::Outside);
    }

    #[test]
    fn classifies_caps_tube_and_handle() {
        let s = built_slider();
        // Bottom cap (p1 end) within the first 30 px.
        assert_eq!(s.interaction_state(Vec2::new(115.0, 110.0)), SliderPart::LowCap);
        // Top cap.
        assert_eq!(s.interaction_state(Vec2::new(115.0, 290.0)), SliderPart::HighCap);
        // Handle rides mid-tube at value 0 of [-90, 90].
        assert_eq!(s.interaction_state(Vec2::new(115.0, 200.0)), SliderPart::Handle);
        // Tube above the handle, below the cap.
        assert_eq!(s.interaction_state(Vec2::new(115.0, 250.0)), SliderPart::Tube);
        // Off to the side.
        assert_eq!(s.interaction_state(Vec2::new(90.0, 200.0)), SliderPart::Outside);
    }

    #[test]
    fn pointer_value_maps_tube_span() {
        let s = built_slider();
        // Tube spans y in [130, 270]; its midpoint is value 0.
        assert_relative_eq!(s.pointer_value(Vec2::new(115.0, 200.0)), 0.0, epsilon = 1e-6);
        assert_relative_eq!(s.pointer_value(Vec2::new(115.0, 130.0)), -90.0, epsilon = 1e-6);
        assert_relative_eq!(s.pointer_value(Vec2::new(115.0, 270.0)), 90.0, epsilon = 1e-6);
        // Beyond the caps clamps to the bounds.
        assert_relative_eq!(s.pointer_value(Vec2::new(115.0, 500.0)), 90.0, epsilon = 1e-6);
    }

    #[test]
    fn recenter_returns_to_midrange() {
        let mut s = CenteredSlider::new(0.0, 2.0, 1.7, "dist");
        s.recenter();
        assert_relative_eq!(s.value(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn highlight_swaps_chrome_once() {
        let mut s = built_slider();
        let normal = s.tube.property;
        s.highlight(true);
        let selected = s.tube.property;
        assert_ne!(normal, selected);
        s.highlight(true);
        assert_eq!(s.tube.property, selected);
        s.highlight(false);
        assert_eq!(s.tube.property, normal);
    }
}
