use std::collections::HashMap;
use std::f32::consts::TAU;
use std::fs;
use std::path::Path;

use engine::{
    clamp_to_bounds, resolve_movement, step, EntityId, EntityWorld, InputAction, InputSnapshot,
    Scene, SceneCommand, Vec2, WorldBounds,
};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const PLAYER_SPEED: f32 = 1.0;
const NPC_SPEED: f32 = 0.5;
const RUN_SPEED_MULTIPLIER: f32 = 1.5;
const CHARACTER_HALF_EXTENT: f32 = 32.0;
const WANDER_CHANCE: f32 = 0.7;
const DEFAULT_WANDER_RADIUS: f32 = 200.0;
const DEFAULT_MIN_WANDER_TICKS: u32 = 60;
const DEFAULT_MAX_WANDER_TICKS: u32 = 180;
const DEFAULT_MIN_PAUSE_TICKS: u32 = 30;
const DEFAULT_MAX_PAUSE_TICKS: u32 = 120;
const DEFAULT_MAX_STUCK_TICKS: u32 = 60;
const HEADING_JITTER_PERIOD_TICKS: u32 = 30;
const HEADING_JITTER_RANGE_RADIANS: f32 = 0.25;
const EDGE_STEER_MARGIN: f32 = 50.0;
const HOME_PULL_TRIGGER_FRACTION: f32 = 0.8;
const HOME_PULL_WEIGHT: f32 = 0.7;
const STUCK_DISPLACEMENT_EPSILON: f32 = 0.1;
const DEFAULT_WORLD_WIDTH: f32 = 800.0;
const DEFAULT_WORLD_HEIGHT: f32 = 600.0;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_TOTAL_TICKS: u64 = 600;
const MODE_LOG_INTERVAL_TICKS: u64 = 120;

pub(crate) const CONFIG_ENV_VAR: &str = "MEANDER_CONFIG";

include!("types.rs");
include!("behavior.rs");
include!("systems.rs");
include!("scene_impl.rs");
include!("config.rs");
