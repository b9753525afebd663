#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BehaviorMode {
    Wandering,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct WanderTuning {
    wander_radius: f32,
    min_wander_ticks: u32,
    max_wander_ticks: u32,
    min_pause_ticks: u32,
    max_pause_ticks: u32,
    max_stuck_ticks: u32,
}

impl Default for WanderTuning {
    fn default() -> Self {
        Self {
            wander_radius: DEFAULT_WANDER_RADIUS,
            min_wander_ticks: DEFAULT_MIN_WANDER_TICKS,
            max_wander_ticks: DEFAULT_MAX_WANDER_TICKS,
            min_pause_ticks: DEFAULT_MIN_PAUSE_TICKS,
            max_pause_ticks: DEFAULT_MAX_PAUSE_TICKS,
            max_stuck_ticks: DEFAULT_MAX_STUCK_TICKS,
        }
    }
}

/// Diagnostic view of one behavior, for debug overlays and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BehaviorSnapshot {
    mode: BehaviorMode,
    elapsed: u32,
    duration: u32,
    stuck_ticks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct WanderBehavior {
    mode: BehaviorMode,
    direction: Vec2,
    elapsed: u32,
    duration: u32,
    stuck_ticks: u32,
    home: Vec2,
    tuning: WanderTuning,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ModeCounts {
    wandering: u32,
    paused: u32,
}

impl ModeCounts {
    fn record(&mut self, mode: BehaviorMode) {
        match mode {
            BehaviorMode::Wandering => self.wandering = self.wandering.saturating_add(1),
            BehaviorMode::Paused => self.paused = self.paused.saturating_add(1),
        }
    }
}
