// Domain layer: core simulation types and rules.

pub mod input;
pub mod state;
pub mod systems;
pub mod tick;
pub mod tuning;
pub mod visual;
pub mod world;

pub use input::{InputEvent, InputState, KeyMapping};
pub use state::{Aabb, BulletState, Entity, EntityId, EntityKind, EntitySnapshot, PlayerState};
pub use tick::TickGate;
pub use visual::{Pose, VisualRequest};
pub use world::{ArenaBounds, HealthWrite, World};
