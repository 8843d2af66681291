use glam::{Mat4, Vec3};

use crate::model::world::Player;

/// First-person camera riding on the player.
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::ZERO,
            target: Vec3::Y,
            up: Vec3::Z,
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect: width as f32 / height.max(1) as f32,
            z_near: 1.0,
            z_far: 10.0,
        }
    }

    /// Eye at the player, looking one unit along the heading and slightly
    /// down while airborne (target height is 3/4 of the eye height).
    pub fn follow(&mut self, player: &Player) {
        let facing = player.facing();
        self.eye = player.position;
        self.target = Vec3::new(
            player.position.x + facing.x,
            player.position.y + facing.y,
            player.position.z * 0.75,
        );
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far);
        proj * self.view()
    }
}
