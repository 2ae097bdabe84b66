pub mod camera;
pub mod config;
pub mod contact;
pub mod input;
pub mod integrate;
pub mod jump;
pub mod separation;
pub mod snapshot;
pub mod world;

pub use camera::CameraOffset;
pub use config::{CameraConfig, MayhemConfig, PhysicsConfig};
pub use input::PlayerInput;
pub use snapshot::WorldSnapshot;
pub use world::{Phase, World};
