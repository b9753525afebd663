pub mod app;

pub use app::{
    clamp_to_bounds, collider_at, resolve_movement, run_headless, step, BoundsError, Entity,
    EntityId, EntityIdAllocator, EntityWorld, Facing, InputAction, InputSnapshot, LoopConfig,
    LoopSummary, Scene, SceneCommand, Vec2, WorldBounds, REPULSION_PUSH_DISTANCE,
};
