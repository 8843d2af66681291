pub mod door;
pub mod map;
pub mod state;
pub mod tile;

pub use door::Door;
pub use map::{parse_map, parse_map_str};
pub use state::{Goal, Jump, Player, WorldState};
pub use tile::{within_square, DoorTag, Tile, TileCoord};
