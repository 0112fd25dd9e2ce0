//! The compass dial: heading ring, tilt and distance sliders, label, status
//! text and backdrop, plus the pointer-to-state classification that drives
//! interaction.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use crate::coord::{NormalizedPoint, Viewport};
use crate::geometry::{Backdrop, Ring, INNER_RADIUS, OUTER_RADIUS};
use crate::items::{
    FontFamily, HAlign, OverlayPass, Property, TextItem, TextStyle, VAlign, WidgetRepresentation,
};
use crate::slider::{CenteredSlider, SliderPart};

/// Pixel tolerance around the ring annulus when picking.
const RING_PICK_TOLERANCE: f32 = 2.0;

/// Unit radius below which the status text and its font are suppressed.
const STATUS_MIN_RADIUS: f32 = 40.0;

/// Classification of a pointer position against the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Outside,
    /// Near the dial center, inside three unit radii.
    Inside,
    /// On the ring annulus; dragging rotates the heading.
    Adjusting,
    TiltAdjusting,
    TiltDown,
    TiltUp,
    DistanceAdjusting,
    DistanceIn,
    DistanceOut,
}

/// Screen-space compass control owning heading, tilt and distance.
///
/// Layout is deferred: setters bump a revision counter and the next
/// [`WidgetRepresentation::build`] call recomputes geometry if the revision
/// or the attached viewport changed.
#[derive(Debug, Clone)]
pub struct CompassRep {
    heading: f64,
    tilt: f64,
    distance: f64,
    tilt_slider: CenteredSlider,
    distance_slider: CenteredSlider,
    highlighted: bool,
    visible: bool,
    point1: NormalizedPoint,
    point2: NormalizedPoint,
    viewport: Option<Viewport>,
    revision: u64,
    built_revision: u64,
    built_viewport: Option<Viewport>,
    last_event_position: Option<Vec2>,
    state: InteractionState,
    ring_property: Property,
    selected_property: Property,
    ring: Ring,
    backdrop: Backdrop,
    label: TextItem,
    status: TextItem,
}

impl Default for CompassRep {
    fn default() -> Self {
        Self::new()
    }
}

impl CompassRep {
    pub fn new() -> Self {
        let ring_property = Property::dial_normal();
        let selected_property = Property::dial_selected();

        let tilt_slider = CenteredSlider::new(-90.0, 90.0, 0.0, "tilt");
        let distance_slider = CenteredSlider::new(0.0, 2.0, 1.0, "dist");
        // Owned values start at the midpoint of their slider's range.
        let tilt = 0.5 * (tilt_slider.minimum() + tilt_slider.maximum());
        let distance = 0.5 * (distance_slider.minimum() + distance_slider.maximum());

        let label_style =
            TextStyle::new(12.0, FontFamily::Serif, HAlign::Center, VAlign::Center);
        let status_style =
            TextStyle::new(12.0, FontFamily::SansSerif, HAlign::Right, VAlign::Top);
        let mut status = TextItem::new("0 Degrees", status_style);
        status.color = [1.0, 1.0, 1.0, 1.0];

        Self {
            heading: 0.0,
            tilt,
            distance,
            tilt_slider,
            distance_slider,
            highlighted: false,
            visible: true,
            point1: NormalizedPoint::new(0.80, 0.80),
            point2: NormalizedPoint::new(0.99, 0.99),
            viewport: None,
            revision: 1,
            built_revision: 0,
            built_viewport: None,
            last_event_position: None,
            state: InteractionState::Outside,
            ring_property,
            selected_property,
            ring: Ring::new(ring_property),
            backdrop: Backdrop::new(),
            label: TextItem::new("N", label_style),
            status,
        }
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    /// Monotonic mutation counter; compared against the last built revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Attaches (or re-attaches) the control to a render surface snapshot.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.bump();
        }
    }

    /// Lower-left anchor of the dial's bounding box, viewport-normalized.
    pub fn set_point1(&mut self, point: NormalizedPoint) {
        if self.point1 != point {
            self.point1 = point;
            self.bump();
        }
    }

    /// Upper-right anchor of the dial's bounding box, viewport-normalized.
    pub fn set_point2(&mut self, point: NormalizedPoint) {
        if self.point2 != point {
            self.point2 = point;
            self.bump();
        }
    }

    pub fn set_label(&mut self, text: &str) {
        if self.label.text != text {
            self.label.text = text.to_owned();
            self.bump();
        }
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Stores the heading normalized into [0, 360).
    pub fn set_heading(&mut self, heading: f64) {
        let heading = heading.rem_euclid(360.0);
        if self.heading != heading {
            self.heading = heading;
            self.bump();
        }
    }

    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    /// Clamps into the tilt bounds and mirrors the value into the slider.
    pub fn set_tilt(&mut self, tilt: f64) {
        let tilt = tilt.clamp(self.tilt_slider.minimum(), self.tilt_slider.maximum());
        if self.tilt != tilt {
            self.tilt = tilt;
            self.tilt_slider.set_value(tilt);
            self.bump();
        }
    }

    pub fn minimum_tilt_angle(&self) -> f64 {
        self.tilt_slider.minimum()
    }

    pub fn maximum_tilt_angle(&self) -> f64 {
        self.tilt_slider.maximum()
    }

    pub fn set_minimum_tilt_angle(&mut self, angle: f64) {
        self.tilt_slider.set_minimum(angle);
        // Changing bounds can invalidate the current value.
        self.set_tilt(self.tilt);
    }

    pub fn set_maximum_tilt_angle(&mut self, angle: f64) {
        self.tilt_slider.set_maximum(angle);
        self.set_tilt(self.tilt);
    }

    /// Incremental drag step: current slider value plus `delta`, clamp-set.
    pub fn update_tilt(&mut self, delta: f64) {
        self.set_tilt(self.tilt_slider.value() + delta);
    }

    /// Commits the slider's live value into the owned tilt.
    pub fn end_tilt(&mut self) {
        self.set_tilt(self.tilt_slider.value());
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f64) {
        let distance = distance.clamp(
            self.distance_slider.minimum(),
            self.distance_slider.maximum(),
        );
        if self.distance != distance {
            self.distance = distance;
            self.distance_slider.set_value(distance);
            self.bump();
        }
    }

    pub fn minimum_distance(&self) -> f64 {
        self.distance_slider.minimum()
    }

    pub fn maximum_distance(&self) -> f64 {
        self.distance_slider.maximum()
    }

    pub fn set_minimum_distance(&mut self, distance: f64) {
        self.distance_slider.set_minimum(distance);
        self.set_distance(self.distance);
    }

    pub fn set_maximum_distance(&mut self, distance: f64) {
        self.distance_slider.set_maximum(distance);
        self.set_distance(self.distance);
    }

    pub fn update_distance(&mut self, delta: f64) {
        self.set_distance(self.distance_slider.value() + delta);
    }

    pub fn end_distance(&mut self) {
        self.set_distance(self.distance_slider.value());
    }

    pub fn tilt_slider(&self) -> &CenteredSlider {
        &self.tilt_slider
    }

    pub fn distance_slider(&self) -> &CenteredSlider {
        &self.distance_slider
    }

    pub fn highlighted(&self) -> bool {
        self.highlighted
    }

    /// Swaps the dial chrome between normal and selected. A repeated call
    /// with the same flag is a no-op.
    pub fn highlight(&mut self, highlighted: bool) {
        if highlighted == self.highlighted {
            return;
        }
        self.highlighted = highlighted;
        self.ring.item.property = if highlighted {
            self.selected_property
        } else {
            self.ring_property
        };
        self.tilt_slider.highlight(highlighted);
        self.distance_slider.highlight(highlighted);
        // Highlight changes the unit radius and the backdrop extent.
        self.bump();
    }

    /// Dial center and unit radius for the given viewport.
    ///
    /// The dial sticks to the upper-right corner of the anchor box and
    /// shrinks non-linearly as the box grows; un-highlighted dials shrink an
    /// extra `scale²` once the scale drops below 0.9.
    pub fn center_and_unit_radius_in(&self, viewport: Viewport) -> (Vec2, f32) {
        let p1 = self.point1.to_pixels(viewport);
        let p2 = self.point2.to_pixels(viewport);

        let mut radius = (p1.x - p2.x).abs().min((p1.y - p2.y).abs()) / 2.0;
        let scale = (1.0 - (radius - 40.0) / (radius + 100.0) * 0.5).min(1.0);
        radius *= scale;

        let center = Vec2::new(p2.x - radius, p2.y - radius);

        if !self.highlighted && scale < 0.9 {
            radius *= scale * scale;
        }
        (center, radius)
    }

    /// Same, against the attached viewport.
    pub fn center_and_unit_radius(&self) -> Option<(Vec2, f32)> {
        self.viewport.map(|vp| self.center_and_unit_radius_in(vp))
    }

    /// Last computed classification.
    pub fn interaction_state(&self) -> InteractionState {
        self.state
    }

    /// Classifies a pointer position. Priority: ring annulus, tilt slider,
    /// distance slider, inside-circle fallback, outside. A detached or
    /// zero-size viewport always reports `Outside`.
    pub fn compute_interaction_state(&mut self, x: f32, y: f32) -> InteractionState {
        let state = self.classify(Vec2::new(x, y));
        if state != self.state {
            log::trace!("compass interaction state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
        state
    }

    fn classify(&self, pos: Vec2) -> InteractionState {
        let Some(viewport) = self.viewport else {
            return InteractionState::Outside;
        };
        if viewport.is_empty() {
            return InteractionState::Outside;
        }

        let (center, rsize) = self.center_and_unit_radius_in(viewport);
        let radius = pos.distance(center);

        // The ring annulus wins over everything it overlaps.
        if radius < rsize * OUTER_RADIUS + RING_PICK_TOLERANCE
            && radius > rsize * INNER_RADIUS - RING_PICK_TOLERANCE
        {
            return InteractionState::Adjusting;
        }

        match self.tilt_slider.interaction_state(pos) {
            SliderPart::LowCap => return InteractionState::TiltDown,
            SliderPart::HighCap => return InteractionState::TiltUp,
            SliderPart::Tube | SliderPart::Handle => return InteractionState::TiltAdjusting,
            SliderPart::Outside => {}
        }

        match self.distance_slider.interaction_state(pos) {
            SliderPart::LowCap => return InteractionState::DistanceIn,
            SliderPart::HighCap => return InteractionState::DistanceOut,
            SliderPart::Tube | SliderPart::Handle => return InteractionState::DistanceAdjusting,
            SliderPart::Outside => {}
        }

        if radius < rsize * 3.0 {
            InteractionState::Inside
        } else {
            InteractionState::Outside
        }
    }

    /// Entry point of a drag gesture: records the pointer and reclassifies.
    pub fn start_interaction(&mut self, pos: Vec2) -> InteractionState {
        self.last_event_position = Some(pos);
        self.compute_interaction_state(pos.x, pos.y)
    }

    /// Circular drag step: the signed angle between the previous and the new
    /// pointer (both center-relative) is added to the heading. A pointer
    /// sitting exactly on the center contributes nothing; the gesture
    /// resumes once it moves off.
    pub fn pointer_interaction(&mut self, pos: Vec2) {
        let Some(viewport) = self.viewport else {
            return;
        };
        let (center, _) = self.center_and_unit_radius_in(viewport);

        let prev = self.last_event_position.replace(pos);
        let Some(prev) = prev else {
            return;
        };

        let v1 = prev - center;
        let v2 = pos - center;
        if v1.length_squared() == 0.0 || v2.length_squared() == 0.0 {
            return;
        }

        let delta_rad = v2.y.atan2(v2.x) - v1.y.atan2(v1.x);
        self.set_heading(self.heading + f64::from(delta_rad.to_degrees()));
    }

    /// Multi-line readout shown next to a highlighted dial.
    pub fn status_text(&self) -> String {
        format!(
            "Distance: {:.0}\nTilt: {:.0}\nHeading: {:.0}",
            self.distance, self.tilt, self.heading
        )
    }

    fn layout(&mut self, viewport: Viewport) {
        let (center, rsize) = self.center_and_unit_radius_in(viewport);
        let heading = self.heading as f32;
        let heading_rad = heading.to_radians();

        self.ring.set_transform(center, rsize, heading);

        // The heading label rides the inner ring, 90 degrees ahead of the
        // ring's rotation.
        self.label.position = center
            + rsize
                * INNER_RADIUS
                * Vec2::new((heading_rad + FRAC_PI_2).cos(), (heading_rad + FRAC_PI_2).sin());
        self.label.orientation_deg = heading;

        let fsize = 1.4 * rsize * INNER_RADIUS * 18f32.to_radians().sin();
        self.label.style.font_size = fsize;

        if rsize > STATUS_MIN_RADIUS {
            self.label.style.font_size = fsize * 0.8;
            self.status.style.font_size = fsize * 0.9;
            self.status.text = self.status_text();
            self.status.position = Vec2::new(center.x - rsize * 2.0, center.y + rsize);
        } else {
            // Too small for detail.
            self.status.text.clear();
        }

        self.tilt_slider.set_endpoints(
            Vec2::new(center.x - rsize * 1.5, center.y - rsize),
            Vec2::new(center.x - rsize * 1.2, center.y + rsize),
        );
        self.tilt_slider.build();

        self.distance_slider.set_endpoints(
            Vec2::new(center.x - rsize * 1.9, center.y - rsize),
            Vec2::new(center.x - rsize * 1.6, center.y + rsize),
        );
        self.distance_slider.build();

        self.backdrop
            .layout(viewport, center, rsize, self.highlighted);
    }

    fn status_visible(&self) -> bool {
        self.highlighted && !self.status.text.is_empty()
    }

    fn render(&mut self, pass: &mut dyn OverlayPass) -> usize {
        self.build();
        let mut count = 0;
        // Back-to-front: the translucent backdrop must composit first.
        pass.draw_poly(&self.backdrop.item);
        count += 1;
        if self.status_visible() {
            pass.draw_text(&self.status);
            count += 1;
        }
        pass.draw_poly(&self.ring.item);
        count += 1;
        if !self.label.text.is_empty() {
            pass.draw_text(&self.label);
            count += 1;
        }
        count += self.tilt_slider.render_overlay(pass);
        count += self.distance_slider.render_overlay(pass);
        count
    }
}

impl WidgetRepresentation for CompassRep {
    fn build(&mut self) -> bool {
        let Some(viewport) = self.viewport else {
            return false;
        };
        if !self.visible {
            return false;
        }
        if self.built_revision == self.revision && self.built_viewport == Some(viewport) {
            return false;
        }
        if viewport.is_empty() {
            // Surface has no size yet; wait for the next build.
            return false;
        }

        self.layout(viewport);
        self.built_revision = self.revision;
        self.built_viewport = Some(viewport);
        log::debug!(
            "compass layout: heading {:.1} tilt {:.1} distance {:.2} viewport {}x{}",
            self.heading,
            self.tilt,
            self.distance,
            viewport.width,
            viewport.height
        );
        true
    }

    fn render_opaque_geometry(&mut self, pass: &mut dyn OverlayPass) -> usize {
        self.render(pass)
    }

    fn render_overlay(&mut self, pass: &mut dyn OverlayPass) -> usize {
        self.render(pass)
    }

    fn release_graphics_resources(&mut self) {
        self.viewport = None;
        self.built_viewport = None;
        self.tilt_slider.release_graphics_resources();
        self.distance_slider.release_graphics_resources();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{PolyItem, TextItem};
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct CountingPass {
        polys: usize,
        texts: Vec<String>,
    }

    impl OverlayPass for CountingPass {
        fn draw_poly(&mut self, _item: &PolyItem) {
            self.polys += 1;
        }

        fn draw_text(&mut self, item: &TextItem) {
            self.texts.push(item.text.clone());
        }
    }

    fn attached() -> CompassRep {
        let mut rep = CompassRep::new();
        rep.set_viewport(Viewport::new(800, 600));
        rep.build();
        rep
    }

    #[test]
    fn heading_normalizes_into_range() {
        let mut rep = CompassRep::new();
        rep.set_heading(-10.0);
        assert_relative_eq!(rep.heading(), 350.0, epsilon = 1e-12);
        rep.set_heading(370.0);
        assert_relative_eq!(rep.heading(), 10.0, epsilon = 1e-12);
        rep.set_heading(720.0);
        assert_relative_eq!(rep.heading(), 0.0, epsilon = 1e-12);
        rep.set_heading(359.9);
        assert!(rep.heading() < 360.0);
    }

    #[test]
    fn tilt_clamps_to_default_bounds() {
        let mut rep = CompassRep::new();
        rep.set_tilt(200.0);
        assert_eq!(rep.tilt(), 90.0);
        rep.set_tilt(-200.0);
        assert_eq!(rep.tilt(), -90.0);
    }

    #[test]
    fn lowering_max_tilt_reclamps_current_value() {
        let mut rep = CompassRep::new();
        rep.set_tilt(80.0);
        rep.set_maximum_tilt_angle(45.0);
        assert_eq!(rep.tilt(), 45.0);
        assert_eq!(rep.tilt_slider().value(), 45.0);
    }

    #[test]
    fn distance_drag_commits_through_end() {
        let mut rep = CompassRep::new();
        assert_eq!(rep.distance(), 1.0);
        rep.update_distance(0.5);
        rep.end_distance();
        assert_eq!(rep.distance(), 1.5);
        // Still clamped by the configured bounds.
        rep.update_distance(5.0);
        rep.end_distance();
        assert_eq!(rep.distance(), 2.0);
    }

    #[test]
    fn zero_size_viewport_reports_outside() {
        let mut rep = CompassRep::new();
        rep.set_viewport(Viewport::new(0, 0));
        assert_eq!(
            rep.compute_interaction_state(400.0, 300.0),
            InteractionState::Outside
        );
    }

    #[test]
    fn detached_control_reports_outside() {
        let mut rep = attached();
        rep.release_graphics_resources();
        assert_eq!(
            rep.compute_interaction_state(400.0, 300.0),
            InteractionState::Outside
        );
    }

    #[test]
    fn classifies_ring_center_and_outside() {
        let mut rep = attached();
        let (center, rsize) = rep.center_and_unit_radius().unwrap();

        // On the annulus midway between inner and outer radius.
        let mid = 0.5 * (INNER_RADIUS + OUTER_RADIUS);
        let on_ring = center + Vec2::new(rsize * mid, 0.0);
        assert_eq!(
            rep.compute_interaction_state(on_ring.x, on_ring.y),
            InteractionState::Adjusting
        );

        assert_eq!(
            rep.compute_interaction_state(center.x, center.y),
            InteractionState::Inside
        );

        assert_eq!(
            rep.compute_interaction_state(10.0, 10.0),
            InteractionState::Outside
        );
    }

    #[test]
    fn classifies_slider_parts() {
        let mut rep = attached();
        let (center, rsize) = rep.center_and_unit_radius().unwrap();

        // Middle of the tilt tube, clear of the centered handle.
        let tilt_x = center.x - rsize * 1.35;
        let tube_y = center.y + rsize * 0.45;
        assert_eq!(
            rep.compute_interaction_state(tilt_x, tube_y),
            InteractionState::TiltAdjusting
        );
        // Bottom cap tilts down, top cap tilts up.
        assert_eq!(
            rep.compute_interaction_state(tilt_x, center.y - rsize * 0.95),
            InteractionState::TiltDown
        );
        assert_eq!(
            rep.compute_interaction_state(tilt_x, center.y + rsize * 0.95),
            InteractionState::TiltUp
        );

        let dist_x = center.x - rsize * 1.75;
        assert_eq!(
            rep.compute_interaction_state(dist_x, tube_y),
            InteractionState::DistanceAdjusting
        );
        assert_eq!(
            rep.compute_interaction_state(dist_x, center.y - rsize * 0.95),
            InteractionState::DistanceIn
        );
        assert_eq!(
            rep.compute_interaction_state(dist_x, center.y + rsize * 0.95),
            InteractionState::DistanceOut
        );
    }

    #[test]
    fn annulus_wins_over_overlapping_slider() {
        // A tiny viewport squeezes the sliders inside the pick tolerance of
        // the ring, so one point sits in both regions.
        let mut rep = CompassRep::new();
        rep.set_viewport(Viewport::new(40, 40));
        rep.build();

        let (center, rsize) = rep.center_and_unit_radius().unwrap();
        let probe = Vec2::new(center.x - rsize * 1.35, center.y);
        // The probe really is inside the tilt slider's box.
        assert_ne!(rep.tilt_slider().interaction_state(probe), SliderPart::Outside);
        // And still classified as a ring drag.
        assert_eq!(
            rep.compute_interaction_state(probe.x, probe.y),
            InteractionState::Adjusting
        );
    }

    #[test]
    fn build_is_idempotent_until_mutation() {
        let mut rep = CompassRep::new();
        rep.set_viewport(Viewport::new(800, 600));
        assert!(rep.build());
        let built_at = rep.revision();
        assert!(!rep.build());
        assert_eq!(rep.revision(), built_at);

        rep.set_heading(15.0);
        assert!(rep.build());
        // A viewport change alone also forces a rebuild.
        rep.set_viewport(Viewport::new(1024, 768));
        assert!(rep.build());
    }

    #[test]
    fn build_defers_on_zero_size_viewport() {
        let mut rep = CompassRep::new();
        rep.set_viewport(Viewport::new(0, 0));
        assert!(!rep.build());
        rep.set_viewport(Viewport::new(800, 600));
        assert!(rep.build());
    }

    #[test]
    fn repeated_highlight_is_a_no_op() {
        let mut rep = attached();
        rep.highlight(true);
        let after_first = rep.revision();
        rep.highlight(true);
        assert_eq!(rep.revision(), after_first);
        rep.highlight(false);
        assert_eq!(rep.revision(), after_first + 1);
    }

    #[test]
    fn ring_drag_rotates_heading() {
        let mut rep = attached();
        let (center, rsize) = rep.center_and_unit_radius().unwrap();
        let mid = 0.5 * (INNER_RADIUS + OUTER_RADIUS) * rsize;

        // Drag a quarter turn counter-clockwise around the center.
        rep.start_interaction(center + Vec2::new(mid, 0.0));
        rep.pointer_interaction(center + Vec2::new(0.0, mid));
        assert_relative_eq!(rep.heading(), 90.0, epsilon = 1e-3);

        // Crossing the atan2 branch cut still lands on the short way around.
        rep.start_interaction(center + Vec2::new(-mid, 1.0));
        rep.pointer_interaction(center + Vec2::new(-mid, -1.0));
        assert!(rep.heading() > 90.0 && rep.heading() < 95.0);
    }

    #[test]
    fn pointer_on_exact_center_is_skipped() {
        let mut rep = attached();
        let (center, rsize) = rep.center_and_unit_radius().unwrap();
        rep.start_interaction(center + Vec2::new(rsize, 0.0));
        rep.pointer_interaction(center);
        assert_eq!(rep.heading(), 0.0);
        // Gesture resumes once the pointer leaves the center.
        rep.pointer_interaction(center + Vec2::new(0.0, rsize));
        assert_eq!(rep.heading(), 0.0);
        rep.pointer_interaction(center + Vec2::new(-rsize, 0.0));
        assert_relative_eq!(rep.heading(), 90.0, epsilon = 1e-3);
    }

    #[test]
    fn status_text_suppressed_below_threshold() {
        let mut rep = CompassRep::new();
        rep.set_viewport(Viewport::new(800, 600));
        rep.build();
        // 800x600 gives a unit radius comfortably above the threshold.
        assert!(rep.status.text.contains("Heading: 0"));

        let mut small = CompassRep::new();
        small.set_viewport(Viewport::new(200, 200));
        small.build();
        assert!(small.status.text.is_empty());
    }

    #[test]
    fn render_order_and_status_gating() {
        let mut rep = attached();

        let mut pass = CountingPass::default();
        let count = rep.render_overlay(&mut pass);
        // Backdrop + ring + 2x(tube, caps, handle) polys; "N" label plus two
        // slider titles; no status while un-highlighted.
        assert_eq!(pass.polys, 8);
        assert_eq!(pass.texts.len(), 3);
        assert_eq!(count, 11);
        assert!(!pass.texts.iter().any(|t| t.contains("Heading")));

        rep.highlight(true);
        let mut pass = CountingPass::default();
        rep.render_overlay(&mut pass);
        assert!(pass.texts.iter().any(|t| t.contains("Heading")));
    }

    #[test]
    fn release_is_idempotent() {
        let mut rep = attached();
        rep.release_graphics_resources();
        rep.release_graphics_resources();
        assert!(rep.viewport().is_none());
        assert!(!rep.build());
    }

    #[test]
    fn label_rides_inner_ring() {
        let mut rep = attached();
        rep.build();
        let (center, rsize) = rep.center_and_unit_radius().unwrap();
        // Heading 0 puts the label straight up from the center.
        assert_relative_eq!(rep.label.position.x, center.x, epsilon = 1e-3);
        assert_relative_eq!(
            rep.label.position.y,
            center.y + rsize * INNER_RADIUS,
            epsilon = 1e-3
        );
    }
}
