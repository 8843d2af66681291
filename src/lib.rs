pub mod config;
pub mod error;
pub mod logging;

// MVC Architecture
pub mod controller;
pub mod model;
pub mod view;

use std::path::Path;

use model::assets::{AssetRegistry, MESH_CUBE, MESH_GOAL, MESH_KEY};

/// Mesh names loaded at startup, in pool order.
pub const SCENE_MESHES: [&str; 3] = [MESH_CUBE, MESH_KEY, MESH_GOAL];

/// Load every mesh the scene draws from `<assets>/models`.
pub fn load_scene_assets(models_dir: impl AsRef<Path>) -> Result<AssetRegistry, error::AssetLoadError> {
    AssetRegistry::load_dir(models_dir, &SCENE_MESHES)
}
