// VIEW: Draw list construction and the wgpu renderer
pub mod draw_list;
#[cfg(feature = "native")]
pub mod gpu_init;
#[cfg(feature = "native")]
pub mod render;
#[cfg(feature = "native")]
pub mod textures;

pub use draw_list::{DrawInstruction, InstanceUniform, RenderScheduler, SceneMeshes, TextureSelector};
#[cfg(feature = "native")]
pub use gpu_init::GpuContext;
#[cfg(feature = "native")]
pub use render::Renderer;
