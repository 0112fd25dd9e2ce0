use glam::{Mat4, Vec3};
use navdial::CompassRep;

/// Orbit radius in meters when the dial's distance sits at zero.
const BASE_RADIUS_M: f64 = 24.0;

/// Elevation clamp keeping `look_at` away from the exact poles.
const MAX_ELEVATION_DEG: f64 = 89.0;

/// Orbit camera around a fixed target, driven by the navigation dial:
/// heading maps to azimuth, tilt to elevation, distance to orbit radius.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub heading_deg: f64,
    pub tilt_deg: f64,
    pub radius_m: f64,
    pub proj: Mat4,
}

impl OrbitCamera {
    pub fn new(target: Vec3, aspect: f32) -> Self {
        Self {
            target,
            heading_deg: 0.0,
            tilt_deg: 0.0,
            radius_m: BASE_RADIUS_M,
            proj: Self::projection(aspect),
        }
    }

    fn projection(aspect: f32) -> Mat4 {
        // wgpu depth range is [0, 1]; glam's perspective_rh matches it.
        Mat4::perspective_rh(60f32.to_radians(), aspect.max(1e-3), 0.1, 500.0)
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.proj = Self::projection(aspect);
    }

    /// Pulls the current orbit parameters from the dial.
    pub fn sync_from_dial(&mut self, dial: &CompassRep) {
        self.heading_deg = dial.heading();
        self.tilt_deg = dial.tilt();
        self.radius_m = BASE_RADIUS_M * (0.25 + dial.distance());
    }

    /// Camera position in world space. Heading 0 with tilt 0 looks north
    /// (toward -Z) from the +Z side of the target.
    pub fn eye(&self) -> Vec3 {
        let az = self.heading_deg.to_radians();
        let el = self
            .tilt_deg
            .clamp(-MAX_ELEVATION_DEG, MAX_ELEVATION_DEG)
            .to_radians();
        let (sin_az, cos_az) = az.sin_cos();
        let (sin_el, cos_el) = el.sin_cos();
        let offset = Vec3::new(
            (self.radius_m * cos_el * sin_az) as f32,
            (self.radius_m * sin_el) as f32,
            (self.radius_m * cos_el * cos_az) as f32,
        );
        self.target + offset
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.proj * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_zero_puts_eye_south_of_target() {
        let cam = OrbitCamera::new(Vec3::ZERO, 16.0 / 9.0);
        let eye = cam.eye();
        assert!(eye.z > 0.0);
        assert!(eye.x.abs() < 1e-4);
        assert!(eye.y.abs() < 1e-4);
    }

    #[test]
    fn dial_distance_scales_radius() {
        let mut cam = OrbitCamera::new(Vec3::ZERO, 1.0);
        let mut dial = CompassRep::new();
        dial.set_distance(2.0);
        cam.sync_from_dial(&dial);
        assert!(cam.radius_m > BASE_RADIUS_M);
    }
}
