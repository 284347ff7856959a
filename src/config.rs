use crate::util::math::degree_to_radian;

pub const MIN_FOV_DEGREES: f32 = 5.0;
pub const MAX_FOV_DEGREES: f32 = 175.0;
pub const MIN_SENSITIVITY: f32 = 1.0;
pub const MAX_SENSITIVITY: f32 = 6.0;
pub const MAX_SAMPLES: u32 = 500;
pub const MAX_BOUNCES: u32 = 50;
pub const MAX_BLUR_STRENGTH: f32 = 0.1;

/// Parameters forwarded to the ray tracing shader. The setters keep them in
/// the range the shader is written for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub num_samples: u32,
    pub num_bounces: u32,
    pub blur_distance: f32,
    pub blur_strength: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            num_samples: 5,
            num_bounces: 5,
            blur_distance: 5.0,
            blur_strength: 0.01,
        }
    }
}

impl RenderSettings {
    pub fn set_num_samples(&mut self, num_samples: u32) {
        self.num_samples = num_samples.clamp(1, MAX_SAMPLES);
    }

    pub fn set_num_bounces(&mut self, num_bounces: u32) {
        self.num_bounces = num_bounces.clamp(1, MAX_BOUNCES);
    }

    /// Focus distance of the depth of field. Never negative.
    pub fn set_blur_distance(&mut self, blur_distance: f32) {
        self.blur_distance = blur_distance.max(0.0);
    }

    pub fn set_blur_strength(&mut self, blur_strength: f32) {
        self.blur_strength = blur_strength.clamp(0.0, MAX_BLUR_STRENGTH);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorSettings {
    pub window_width: u32,
    pub window_height: u32,
    pub fov_degrees: f32,
    pub sensitivity: f32,
    /// Distance per frame per unit of sensitivity while a move key is held.
    pub move_step: f32,
    /// Cursor pixels are divided by this before becoming radians.
    pub rotation_divisor: f32,
    /// Present with vertical sync when the surface supports it.
    pub vsync: bool,
    pub render: RenderSettings,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            window_width: 1920,
            window_height: 1080,
            fov_degrees: 70.0,
            sensitivity: 3.0,
            move_step: 0.01,
            rotation_divisor: 10000.0,
            vsync: true,
            render: RenderSettings::default(),
        }
    }
}

impl EditorSettings {
    pub fn fov_radians(&self) -> f32 {
        degree_to_radian(self.fov_degrees)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height as f32
    }

    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov_degrees = fov_degrees.clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES);
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fov_stays_inside_valid_range() {
        let mut settings = EditorSettings::default();
        settings.set_fov_degrees(400.0);
        assert_eq!(settings.fov_degrees, MAX_FOV_DEGREES);
        settings.set_fov_degrees(-3.0);
        assert_eq!(settings.fov_degrees, MIN_FOV_DEGREES);
        assert!(settings.fov_radians() > 0.0 && settings.fov_radians() < std::f32::consts::PI);
    }

    #[test]
    fn sensitivity_is_clamped() {
        let mut settings = EditorSettings::default();
        settings.set_sensitivity(10.0);
        assert_eq!(settings.sensitivity, MAX_SENSITIVITY);
    }

    #[test]
    fn render_settings_stay_in_shader_range() {
        let mut render = RenderSettings::default();

        render.set_num_samples(0);
        assert_eq!(render.num_samples, 1);
        render.set_num_samples(1000);
        assert_eq!(render.num_samples, MAX_SAMPLES);

        render.set_num_bounces(0);
        assert_eq!(render.num_bounces, 1);
        render.set_num_bounces(51);
        assert_eq!(render.num_bounces, MAX_BOUNCES);

        render.set_blur_distance(-2.0);
        assert_eq!(render.blur_distance, 0.0);

        render.set_blur_strength(0.5);
        assert_eq!(render.blur_strength, MAX_BLUR_STRENGTH);
        render.set_blur_strength(-0.5);
        assert_eq!(render.blur_strength, 0.0);
    }
}
