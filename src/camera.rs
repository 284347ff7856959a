use glam::{Quat, Vec3};

/// Fly camera described by an origin and three orthogonal basis vectors.
///
/// The lengths of `up` and `right` encode the field of view and the aspect
/// ratio, so a pixel offset `(x, y)` in `[-0.5, 0.5]` maps to the direction
/// `forward + x * right + y * up` without any projection matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    origin: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,

    fov: f32,
    aspect_ratio: f32,
}

impl Camera {
    /// `fov` is the vertical field of view in radians and must lie in `(0, PI)`.
    pub fn new(fov: f32, aspect_ratio: f32) -> Self {
        debug_assert!(fov > 0.0 && fov < std::f32::consts::PI);

        let up_length = (fov / 2.0).tan();

        Self {
            origin: Vec3::new(0.0, 0.0, -10.0),
            forward: Vec3::Z,
            right: Vec3::new(aspect_ratio * up_length, 0.0, 0.0),
            up: Vec3::new(0.0, up_length, 0.0),
            fov,
            aspect_ratio,
        }
    }

    /// Pitch: turns `forward` and `up` around the current `right` axis.
    pub fn rotate_x(&mut self, angle: f32) {
        let rotation = Quat::from_axis_angle(self.right.normalize(), angle);
        self.forward = rotation * self.forward;
        self.up = rotation * self.up;
    }

    /// Yaw: turns `forward` and `right` around the current `up` axis.
    pub fn rotate_y(&mut self, angle: f32) {
        let rotation = Quat::from_axis_angle(self.up.normalize(), angle);
        self.forward = rotation * self.forward;
        self.right = rotation * self.right;
    }

    /// Roll: turns the whole basis around the current `forward` axis.
    pub fn rotate_z(&mut self, angle: f32) {
        let rotation = Quat::from_axis_angle(self.forward.normalize(), angle);
        self.forward = rotation * self.forward;
        self.up = rotation * self.up;
        self.right = rotation * self.right;
    }

    pub fn move_forward(&mut self, amount: f32) {
        self.origin += self.forward * amount;
    }

    pub fn move_right(&mut self, amount: f32) {
        self.origin += self.right * amount;
    }

    pub fn move_up(&mut self, amount: f32) {
        self.origin += self.up * amount;
    }

    /// Rescales `up` and `right` for a new projection, keeping their directions.
    /// `forward` is never touched here.
    pub fn set_fov_aspect_ratio(&mut self, fov: f32, aspect_ratio: f32) {
        debug_assert!(fov > 0.0 && fov < std::f32::consts::PI);

        self.fov = fov;
        self.aspect_ratio = aspect_ratio;

        let up_length = (fov / 2.0).tan();
        self.up = self.up.normalize() * up_length;
        self.right = self.right.normalize() * (aspect_ratio * up_length);
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}
