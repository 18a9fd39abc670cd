//! Scene composition: what is built in each initialization phase, how
//! frames advance it, and how it is viewed.

pub mod camera;
pub mod frame;
pub mod passes;
pub mod world;

pub use camera::{FixedCamera, OrbitCamera, Projection};
pub use frame::{FrameDriver, FrameUpdate, TextOverlay};
pub use passes::{CameraSlot, ClearMode, RenderPass, SceneGroup, DEFAULT_PASSES};
pub use world::WorldScene;
