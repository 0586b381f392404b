use glam::{Mat4, Vec3};

/// Perspective camera looking at a fixed target.
#[derive(Debug, Copy, Clone)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y: 45f32.to_radians(),
            z_near: 0.01,
            z_far: 100.0,
            eye: Vec3::ZERO,
            target: Vec3::NEG_Z,
        }
    }
}

impl Camera {
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, aspect, self.z_near, self.z_far)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }
}

/// Rotation about +Y at a quarter turn every two seconds.
pub fn spin(elapsed: f32) -> Mat4 {
    Mat4::from_rotation_y(elapsed * std::f32::consts::FRAC_PI_4)
}

/// Background gray, converted so it reads as sRGB 0.8 on an sRGB framebuffer.
pub fn background() -> [f32; 4] {
    let c = srgb_to_linear(0.8);
    [c, c, c, 1.0]
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
