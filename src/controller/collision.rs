//! Ordered interaction rules for a proposed player move.
//!
//! Rules run in a fixed order: walls, doors, keys, goal. A rejecting rule
//! ends the evaluation, so a move blocked by a wall never picks up a key or
//! touches a door. Key pickup and goal detection never reject.

use glam::Vec2;
use tracing::{debug, info};

use crate::model::world::{within_square, WorldState};

/// Square half-width around a wall center that blocks movement.
pub const WALL_HALF_WIDTH: f32 = 0.75;
/// Square half-width around a closed door that blocks (or opens) it.
pub const DOOR_HALF_WIDTH: f32 = 1.0;
/// Pickup radius around a key.
pub const KEY_RADIUS: f32 = 0.5;
/// Trigger radius around the goal.
pub const GOAL_RADIUS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Continue,
    Reject,
    /// Level was reset; the move counts as accepted but nothing is committed.
    Restarted,
}

type Rule = fn(&mut WorldState, Vec2) -> Verdict;

const RULES: [(&str, Rule); 4] = [
    ("wall", wall_rule),
    ("door", door_rule),
    ("key", key_rule),
    ("goal", goal_rule),
];

/// Validate a move to `candidate`, applying its side effects to the world.
///
/// Returns `false` when a wall or door rejects the move; the player position
/// is then left untouched. An accepted move commits the candidate, unless the
/// goal was reached, in which case the player is already back on the start.
pub fn resolve(world: &mut WorldState, candidate: Vec2) -> bool {
    for (name, rule) in RULES {
        match rule(world, candidate) {
            Verdict::Continue => {}
            Verdict::Reject => {
                debug!("Move to ({:.2}, {:.2}) blocked by {}", candidate.x, candidate.y, name);
                return false;
            }
            Verdict::Restarted => return true,
        }
    }

    let player = world.player_mut();
    player.position.x = candidate.x;
    player.position.y = candidate.y;
    true
}

fn wall_rule(world: &mut WorldState, candidate: Vec2) -> Verdict {
    let blocked = world
        .walls()
        .iter()
        .any(|wall| within_square(candidate, wall.center(), WALL_HALF_WIDTH));
    if blocked {
        Verdict::Reject
    } else {
        Verdict::Continue
    }
}

/// The first closed door in reach decides. Holding its key swings it open,
/// but the move that opened it is still refused.
fn door_rule(world: &mut WorldState, candidate: Vec2) -> Verdict {
    let door = world
        .doors_mut()
        .iter_mut()
        .filter(|door| !door.is_open())
        .find(|door| within_square(candidate, door.door_position(), DOOR_HALF_WIDTH));

    match door {
        Some(door) if door.have_key() => {
            door.unlock();
            info!("Door `{}` opened", door.tag().as_char());
            Verdict::Reject
        }
        Some(_) => Verdict::Reject,
        None => Verdict::Continue,
    }
}

fn key_rule(world: &mut WorldState, candidate: Vec2) -> Verdict {
    for door in world.doors_mut().iter_mut().filter(|door| !door.have_key()) {
        if candidate.distance(door.key_position().truncate()) < KEY_RADIUS {
            door.pick_up_key();
            info!("Picked up key `{}`", door.tag().as_char());
        }
    }
    Verdict::Continue
}

fn goal_rule(world: &mut WorldState, candidate: Vec2) -> Verdict {
    if candidate.distance(world.goal().position()) < GOAL_RADIUS {
        info!("Goal reached, restarting level");
        world.reset_level();
        return Verdict::Restarted;
    }
    Verdict::Continue
}
