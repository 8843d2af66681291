//! World state to ordered draw instructions.
//!
//! The scheduler decides what gets drawn where, with which texture and
//! color. It knows nothing about GPU buffers or pipelines.

use glam::{Mat4, Vec3};

use crate::error::AssetLoadError;
use crate::model::assets::{AssetRegistry, MeshRange, MESH_CUBE, MESH_GOAL, MESH_KEY};
use crate::model::world::WorldState;

/// Scale applied to key meshes.
pub const KEY_SCALE: f32 = 0.5;
/// Floors sit one unit below the walls.
pub const FLOOR_Z: f32 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSelector {
    Wood,
    Brick,
    /// Color only.
    Untextured,
}

impl TextureSelector {
    /// Index the fragment shader switches on.
    pub fn shader_code(self) -> u32 {
        match self {
            TextureSelector::Untextured => 0,
            TextureSelector::Wood => 1,
            TextureSelector::Brick => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawInstruction {
    pub mesh: MeshRange,
    pub transform: Mat4,
    pub texture: TextureSelector,
    pub color: [f32; 3],
}

/// Per-instance GPU block: model matrix, then rgb + texture code.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceUniform {
    pub fn from_instruction(instruction: &DrawInstruction) -> Self {
        let [r, g, b] = instruction.color;
        Self {
            model: instruction.transform.to_cols_array_2d(),
            color: [r, g, b, instruction.texture.shader_code() as f32],
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Mesh ranges the scheduler draws with, resolved once from the registry.
#[derive(Debug, Clone, Copy)]
pub struct SceneMeshes {
    pub cube: MeshRange,
    pub key: MeshRange,
    pub goal: MeshRange,
}

impl SceneMeshes {
    pub fn from_registry(assets: &AssetRegistry) -> Result<Self, AssetLoadError> {
        Ok(Self {
            cube: assets.mesh(MESH_CUBE)?,
            key: assets.mesh(MESH_KEY)?,
            goal: assets.mesh(MESH_GOAL)?,
        })
    }
}

pub struct RenderScheduler {
    meshes: SceneMeshes,
    /// Applied to walls, floors and the goal.
    tint: [f32; 3],
}

impl RenderScheduler {
    pub fn new(meshes: SceneMeshes) -> Self {
        Self {
            meshes,
            tint: [1.0, 1.0, 1.0],
        }
    }

    pub fn tint(&self) -> [f32; 3] {
        self.tint
    }

    pub fn set_tint(&mut self, tint: [f32; 3]) {
        self.tint = tint;
    }

    /// Upper bound on the list length for this world: every key and door present.
    pub fn capacity(world: &WorldState) -> usize {
        world.walls().len()
            + (world.width() * world.height()) as usize
            + 2 * world.doors().len()
            + 1
    }

    /// Walls, floors (row-major), then per door its key and door while
    /// still present, then the goal.
    pub fn build_draw_list(&self, world: &WorldState) -> Vec<DrawInstruction> {
        let mut list = Vec::with_capacity(Self::capacity(world));

        for wall in world.walls() {
            list.push(DrawInstruction {
                mesh: self.meshes.cube,
                transform: Mat4::from_translation(Vec3::new(wall.x as f32, wall.y as f32, 0.0)),
                texture: TextureSelector::Brick,
                color: self.tint,
            });
        }

        for j in 0..world.height() {
            for i in 0..world.width() {
                list.push(DrawInstruction {
                    mesh: self.meshes.cube,
                    transform: Mat4::from_translation(Vec3::new(i as f32, j as f32, FLOOR_Z)),
                    texture: TextureSelector::Wood,
                    color: self.tint,
                });
            }
        }

        for door in world.doors() {
            if !door.have_key() {
                list.push(DrawInstruction {
                    mesh: self.meshes.key,
                    transform: Mat4::from_translation(door.key_position())
                        * Mat4::from_scale(Vec3::splat(KEY_SCALE)),
                    texture: TextureSelector::Untextured,
                    color: door.color(),
                });
            }
            if !door.is_open() {
                let tile = door.door_tile();
                list.push(DrawInstruction {
                    mesh: self.meshes.cube,
                    transform: Mat4::from_translation(Vec3::new(tile.x as f32, tile.y as f32, 0.0)),
                    texture: TextureSelector::Untextured,
                    color: door.color(),
                });
            }
        }

        let goal = world.goal().position();
        list.push(DrawInstruction {
            mesh: self.meshes.goal,
            transform: Mat4::from_translation(goal.extend(0.0)),
            texture: TextureSelector::Wood,
            color: self.tint,
        });

        list
    }
}
