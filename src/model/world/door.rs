use glam::{Vec2, Vec3};

use super::tile::{DoorTag, TileCoord};

/// A tagged door and the key that unlocks it.
///
/// Position and color are fixed at load time. `have_key` and `open` only move
/// from false to true through the collision resolver, and only a level reset
/// sends them back.
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    tag: DoorTag,
    door: TileCoord,
    key: Vec3,
    color: [f32; 3],
    have_key: bool,
    open: bool,
}

impl Door {
    pub fn new(tag: DoorTag, door: TileCoord, key: TileCoord) -> Self {
        Self {
            tag,
            door,
            key: Vec3::new(key.x as f32, key.y as f32, 0.0),
            color: tag.color(),
            have_key: false,
            open: false,
        }
    }

    pub fn tag(&self) -> DoorTag {
        self.tag
    }

    pub fn door_tile(&self) -> TileCoord {
        self.door
    }

    pub fn door_position(&self) -> Vec2 {
        self.door.center()
    }

    pub fn key_position(&self) -> Vec3 {
        self.key
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn have_key(&self) -> bool {
        self.have_key
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn pick_up_key(&mut self) {
        self.have_key = true;
    }

    pub(crate) fn unlock(&mut self) {
        self.open = true;
    }

    pub(crate) fn reset(&mut self) {
        self.have_key = false;
        self.open = false;
    }
}
