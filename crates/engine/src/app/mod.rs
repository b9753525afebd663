mod collision;
mod input;
mod loop_runner;
mod movement;
mod scene;

pub use collision::{collider_at, resolve_movement, REPULSION_PUSH_DISTANCE};
pub use input::{InputAction, InputSnapshot};
pub use loop_runner::{run_headless, LoopConfig, LoopSummary};
pub use movement::{clamp_to_bounds, step};
pub use scene::{
    BoundsError, Entity, EntityId, EntityIdAllocator, EntityWorld, Facing, Scene, SceneCommand,
    Vec2, WorldBounds,
};
