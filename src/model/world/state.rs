use glam::{Vec2, Vec3};

use super::door::Door;
use super::tile::{DoorTag, TileCoord};

/// Goal tile plus the one-frame "level finished" signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    position: Vec2,
    reached: bool,
}

impl Goal {
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_reached(&self) -> bool {
        self.reached
    }
}

/// Scripted jump accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Jump {
    pub time: f32,
    pub active: bool,
}

/// Player and camera pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec3,
    start: Vec3,
    /// Degrees; 0 faces +y, 90 faces +x.
    pub heading_deg: f32,
    pub jump: Jump,
}

impl Player {
    pub fn new(start: TileCoord) -> Self {
        let start = Vec3::new(start.x as f32, start.y as f32, 0.0);
        Self {
            position: start,
            start,
            heading_deg: 0.0,
            jump: Jump::default(),
        }
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    /// Unit vector in the ground plane the player walks along.
    pub fn facing(&self) -> Vec2 {
        let rad = self.heading_deg.to_radians();
        Vec2::new(rad.sin(), rad.cos())
    }

    pub fn ground_position(&self) -> Vec2 {
        self.position.truncate()
    }
}

/// Everything one loaded level owns: grid, walls, doors, goal and the player.
///
/// Grid size and walls never change after load. Door flags, the goal signal
/// and the player pose are mutated by the controller layer only.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    width: u32,
    height: u32,
    walls: Vec<TileCoord>,
    doors: Vec<Door>,
    goal: Goal,
    player: Player,
}

impl WorldState {
    pub fn new(
        width: u32,
        height: u32,
        walls: Vec<TileCoord>,
        doors: Vec<Door>,
        goal: TileCoord,
        start: TileCoord,
    ) -> Self {
        Self {
            width,
            height,
            walls,
            doors,
            goal: Goal {
                position: goal.center(),
                reached: false,
            },
            player: Player::new(start),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn walls(&self) -> &[TileCoord] {
        &self.walls
    }

    /// Doors in load order.
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn door(&self, tag: DoorTag) -> Option<&Door> {
        self.doors.iter().find(|d| d.tag() == tag)
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub(crate) fn doors_mut(&mut self) -> &mut [Door] {
        &mut self.doors
    }

    /// Returns and clears the goal signal raised during this frame.
    pub fn take_goal_reached(&mut self) -> bool {
        std::mem::take(&mut self.goal.reached)
    }

    /// In-place level restart: player back on the start tile, every door shut
    /// and every key back on the floor.
    pub(crate) fn reset_level(&mut self) {
        self.goal.reached = true;
        let start = self.player.start;
        self.player.position.x = start.x;
        self.player.position.y = start.y;
        for door in &mut self.doors {
            door.reset();
        }
    }
}
