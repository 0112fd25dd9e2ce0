//! Billboard actor variant that keeps its local up axis aligned with a
//! tracked physical up vector instead of the camera's.
//!
//! Matrix math only; pose queries come in through [`UpSource`] and the
//! rendering framework consumes the resulting model matrix.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Source of the tracked "physical up" vector (headset pose, IMU, or a
/// synthetic stand-in).
pub trait UpSource {
    fn view_up(&self) -> Vec3;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CachedMatrix {
    up: Vec3,
    eye: Vec3,
    revision: u64,
    matrix: Mat4,
}

/// A flat actor transform that preserves position and scale while rotating
/// so its local +Y matches the tracked up vector and its local +Z faces the
/// eye as far as that constraint allows.
#[derive(Debug, Clone)]
pub struct Follower {
    position: Vec3,
    scale: Vec3,
    revision: u64,
    cache: Option<CachedMatrix>,
    rebuilds: u64,
}

impl Default for Follower {
    fn default() -> Self {
        Self::new()
    }
}

impl Follower {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            revision: 0,
            cache: None,
            rebuilds: 0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        if self.position != position {
            self.position = position;
            self.revision += 1;
        }
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        if self.scale != scale {
            self.scale = scale;
            self.revision += 1;
        }
    }

    /// How many times the matrix was actually recomputed. The cache is an
    /// optimization, not a contract; this makes it observable.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Model matrix for the current render pass.
    ///
    /// Unchanged `(view_up, eye)` inputs and no position/scale edits return
    /// the cached matrix without recomputation.
    pub fn compute_matrix(&mut self, view_up: Vec3, eye: Vec3) -> Mat4 {
        if let Some(cache) = &self.cache {
            if cache.up == view_up && cache.eye == eye && cache.revision == self.revision {
                return cache.matrix;
            }
        }

        let up = view_up.try_normalize().unwrap_or(Vec3::Y);

        // Face the eye within the plane perpendicular to up.
        let to_eye = eye - self.position;
        let forward = to_eye - up * to_eye.dot(up);

        let rotation = if forward.length_squared() > 1e-12 {
            let z = forward.normalize();
            let x = up.cross(z);
            Mat3::from_cols(x, up, z)
        } else {
            // Eye sits on the up axis; fall back to the smallest rotation
            // that aligns +Y alone.
            Mat3::from_quat(Quat::from_rotation_arc(Vec3::Y, up))
        };

        let matrix = Mat4::from_translation(self.position)
            * Mat4::from_mat3(rotation)
            * Mat4::from_scale(self.scale);

        self.rebuilds += 1;
        self.cache = Some(CachedMatrix {
            up: view_up,
            eye,
            revision: self.revision,
            matrix,
        });
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn local_up_aligns_with_view_up() {
        let mut follower = Follower::new();
        follower.set_position(Vec3::new(2.0, 0.0, -5.0));

        let up = Vec3::new(0.3, 0.9, -0.1).normalize();
        let m = follower.compute_matrix(up, Vec3::new(0.0, 1.0, 8.0));
        assert_vec3_eq(m.transform_vector3(Vec3::Y), up);
    }

    #[test]
    fn position_and_scale_preserved() {
        let mut follower = Follower::new();
        let pos = Vec3::new(-1.0, 4.0, 2.0);
        follower.set_position(pos);
        follower.set_scale(Vec3::splat(2.5));

        let m = follower.compute_matrix(Vec3::Y, Vec3::new(10.0, 2.0, 10.0));
        assert_vec3_eq(m.transform_point3(Vec3::ZERO), pos);
        assert_relative_eq!(m.transform_vector3(Vec3::X).length(), 2.5, epsilon = 1e-5);
    }

    #[test]
    fn faces_eye_within_up_constraint() {
        let mut follower = Follower::new();
        follower.set_position(Vec3::ZERO);

        let eye = Vec3::new(0.0, 3.0, 10.0);
        let m = follower.compute_matrix(Vec3::Y, eye);
        // Local +Z points at the eye's footprint in the horizontal plane.
        assert_vec3_eq(m.transform_vector3(Vec3::Z), Vec3::Z);
        // Basis stays right-handed and orthonormal.
        let x = m.transform_vector3(Vec3::X);
        let y = m.transform_vector3(Vec3::Y);
        let z = m.transform_vector3(Vec3::Z);
        assert_relative_eq!(x.dot(y), 0.0, epsilon = 1e-5);
        assert_vec3_eq(x.cross(y), z);
    }

    #[test]
    fn eye_on_up_axis_falls_back_to_arc_rotation() {
        let mut follower = Follower::new();
        let up = Vec3::X;
        let m = follower.compute_matrix(up, Vec3::new(10.0, 0.0, 0.0));
        // Degenerate facing still aligns up.
        assert_vec3_eq(m.transform_vector3(Vec3::Y), up);
    }

    #[test]
    fn unchanged_inputs_hit_the_cache() {
        let mut follower = Follower::new();
        let up = Vec3::Y;
        let eye = Vec3::new(1.0, 2.0, 3.0);

        let a = follower.compute_matrix(up, eye);
        assert_eq!(follower.rebuild_count(), 1);
        let b = follower.compute_matrix(up, eye);
        assert_eq!(follower.rebuild_count(), 1);
        assert_eq!(a, b);

        // A new up vector recomputes.
        follower.compute_matrix(Vec3::new(0.0, 0.9, 0.1).normalize(), eye);
        assert_eq!(follower.rebuild_count(), 2);

        // So does moving the actor, even with identical pose inputs.
        follower.set_position(Vec3::ONE);
        follower.compute_matrix(up, eye);
        assert_eq!(follower.rebuild_count(), 3);
    }

    #[test]
    fn zero_up_vector_defaults_to_world_up() {
        let mut follower = Follower::new();
        let m = follower.compute_matrix(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        assert_vec3_eq(m.transform_vector3(Vec3::Y), Vec3::Y);
    }
}
