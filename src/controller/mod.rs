// CONTROLLER: Input translation, movement rules and the frame loop
pub mod collision;
pub mod frame_loop;
pub mod input;
pub mod physics;

pub use collision::resolve;
pub use frame_loop::{FrameLoop, FrameOutput};
pub use input::{InputEvent, InputProcessor, Intent, Key, KeyBindings, Modifiers};
pub use physics::{MoveDirection, PhysicsIntegrator};
