use glam::Vec2;

use crate::model::world::Player;

/// Forward or backward along the heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
}

/// Scripted jump arc and fixed-step walking.
///
/// Both steps are per frame, not per second, so speed follows the frame rate.
pub struct PhysicsIntegrator {
    pub move_step: f32,
    pub jump_step: f32,
    pub turn_step_deg: f32,
}

impl PhysicsIntegrator {
    pub fn new() -> Self {
        Self {
            move_step: 0.1,
            jump_step: 0.1,
            turn_step_deg: 15.0,
        }
    }

    /// Height on the arc `z(t) = t - 0.1 t^2` and whether the jump goes on.
    ///
    /// The arc starts grounded at `t = 0` and ends once it comes back to zero
    /// (at `t = 10`); from then on the height is clamped to zero.
    pub fn integrate_jump(&self, t: f32) -> (f32, bool) {
        let z = t - 0.1 * t * t;
        if t > 0.0 && z <= 0.0 {
            (0.0, false)
        } else {
            (z.max(0.0), true)
        }
    }

    /// Start a jump. Retriggering mid-air restarts the arc from the ground.
    pub fn trigger_jump(&self, player: &mut Player) {
        player.jump.time = 0.0;
        player.jump.active = true;
    }

    /// One frame of an active jump: apply the height, then advance the clock.
    pub fn advance_jump(&self, player: &mut Player) {
        if !player.jump.active {
            return;
        }
        let (height, rising) = self.integrate_jump(player.jump.time);
        player.position.z = height;
        player.jump.active = rising;
        player.jump.time += self.jump_step;
    }

    /// Candidate ground position one step along the heading.
    pub fn integrate_move(&self, position: Vec2, direction: MoveDirection, heading_deg: f32) -> Vec2 {
        let rad = heading_deg.to_radians();
        let facing = Vec2::new(rad.sin(), rad.cos());
        match direction {
            MoveDirection::Forward => position + facing * self.move_step,
            MoveDirection::Backward => position - facing * self.move_step,
        }
    }

    /// Turn by whole steps; negative turns left.
    pub fn rotate(&self, player: &mut Player, steps: i32) {
        player.heading_deg = (player.heading_deg + steps as f32 * self.turn_step_deg).rem_euclid(360.0);
    }
}

impl Default for PhysicsIntegrator {
    fn default() -> Self {
        Self::new()
    }
}
