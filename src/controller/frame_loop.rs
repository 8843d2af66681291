use glam::Mat4;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::collision;
use super::input::{InputEvent, InputProcessor, Intent};
use super::physics::PhysicsIntegrator;
use crate::model::camera::Camera;
use crate::model::world::WorldState;
use crate::view::draw_list::{DrawInstruction, RenderScheduler};

/// Everything the platform layer needs after one frame.
#[derive(Debug)]
pub struct FrameOutput {
    pub draw_list: Vec<DrawInstruction>,
    pub view_proj: Mat4,
    /// Fullscreen was toggled an odd number of times this frame.
    pub toggle_fullscreen: bool,
    pub quit: bool,
}

/// Owns the level and drives one synchronous frame at a time.
pub struct FrameLoop {
    world: WorldState,
    physics: PhysicsIntegrator,
    input: InputProcessor,
    scheduler: RenderScheduler,
    camera: Camera,
    rng: StdRng,
    levels_completed: u32,
}

impl FrameLoop {
    pub fn new(
        world: WorldState,
        input: InputProcessor,
        scheduler: RenderScheduler,
        camera: Camera,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut frame_loop = Self {
            world,
            physics: PhysicsIntegrator::new(),
            input,
            scheduler,
            camera,
            rng,
            levels_completed: 0,
        };
        frame_loop.camera.follow(frame_loop.world.player());
        frame_loop
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub fn levels_completed(&self) -> u32 {
        self.levels_completed
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
    }

    /// Run one frame: jump, then every event in arrival order, then build the
    /// draw list from the settled state.
    pub fn step(&mut self, events: &[InputEvent]) -> FrameOutput {
        self.physics.advance_jump(self.world.player_mut());

        let mut toggle_fullscreen = false;
        let mut quit = false;
        let intents: Vec<Intent> = self.input.translate_all(events).collect();
        for intent in intents {
            match intent {
                Intent::Move(direction) => {
                    let player = self.world.player();
                    let candidate =
                        self.physics
                            .integrate_move(player.ground_position(), direction, player.heading_deg);
                    collision::resolve(&mut self.world, candidate);
                }
                Intent::Rotate(steps) => self.physics.rotate(self.world.player_mut(), steps),
                Intent::Jump => self.physics.trigger_jump(self.world.player_mut()),
                Intent::Recolor => {
                    let tint = [self.rng.gen(), self.rng.gen(), self.rng.gen()];
                    debug!("Tint set to {:?}", tint);
                    self.scheduler.set_tint(tint);
                }
                Intent::ToggleFullscreen => toggle_fullscreen = !toggle_fullscreen,
                Intent::Quit => quit = true,
            }
        }

        if self.world.take_goal_reached() {
            self.levels_completed += 1;
            info!("Level completed ({} so far)", self.levels_completed);
        }

        self.camera.follow(self.world.player());
        FrameOutput {
            draw_list: self.scheduler.build_draw_list(&self.world),
            view_proj: self.camera.view_proj(),
            toggle_fullscreen,
            quit,
        }
    }
}
