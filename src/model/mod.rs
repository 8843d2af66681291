// MODEL: Level data, mesh assets and the camera
pub mod assets;
pub mod camera;
pub mod world;

pub use assets::{AssetRegistry, MeshRange, FLOATS_PER_VERTEX};
pub use camera::Camera;
pub use world::{parse_map, parse_map_str, Door, DoorTag, TileCoord, WorldState};
