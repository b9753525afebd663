use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::input::InputSnapshot;
use super::scene::{EntityWorld, Scene, SceneCommand};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    /// Stop after this many ticks; `None` runs until the scene quits.
    pub total_ticks: Option<u64>,
    /// Pace ticks against the wall clock. Off, the loop runs flat out, which
    /// is what tests and batch runs want.
    pub realtime: bool,
    pub log_interval_ticks: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            total_ticks: None,
            realtime: true,
            log_interval_ticks: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub ticks_run: u64,
    pub dropped_backlog: Duration,
}

/// Drives a scene through a fixed-timestep loop without any window or
/// renderer. Input comes from the caller as a per-tick snapshot closure.
pub fn run_headless(
    config: LoopConfig,
    mut scene: Box<dyn Scene>,
    mut input_for_tick: impl FnMut(u64) -> InputSnapshot,
) -> LoopSummary {
    let mut world = EntityWorld::default();
    scene.load(&mut world);
    world.apply_pending();
    info!(entity_count = world.entity_count(), "scene_loaded");

    let target_tps = config.target_tps.max(1);
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let log_interval_ticks = config.log_interval_ticks.max(1);

    let mut summary = LoopSummary::default();
    let mut accumulator = Duration::ZERO;
    let mut last_frame = Instant::now();

    'frames: loop {
        let ticks_this_frame = if config.realtime {
            thread::sleep(fixed_dt);
            let now = Instant::now();
            let raw_frame_dt = now.duration_since(last_frame);
            last_frame = now;
            accumulator =
                accumulator.saturating_add(clamp_frame_delta(raw_frame_dt, max_frame_delta));

            let plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
            accumulator = plan.remaining_accumulator;
            if plan.dropped_backlog > Duration::ZERO {
                summary.dropped_backlog =
                    summary.dropped_backlog.saturating_add(plan.dropped_backlog);
                warn!(
                    dropped_ms = plan.dropped_backlog.as_millis() as u64,
                    "tick_backlog_dropped"
                );
            }
            plan.ticks_to_run
        } else {
            1
        };

        for _ in 0..ticks_this_frame {
            if let Some(total_ticks) = config.total_ticks {
                if summary.ticks_run >= total_ticks {
                    break 'frames;
                }
            }

            let input = input_for_tick(summary.ticks_run);
            let command = scene.update(&input, &mut world);
            world.apply_pending();
            summary.ticks_run += 1;

            if summary.ticks_run % log_interval_ticks == 0 {
                if let Some(title) = scene.debug_title(&world) {
                    info!(title = %title, "tick_status");
                }
            }

            if command == SceneCommand::Quit {
                info!(tick = summary.ticks_run, "scene_quit");
                break 'frames;
            }
        }

        if !config.realtime && config.total_ticks.is_none() {
            // Nothing will ever stop an unpaced, unbounded loop.
            warn!("unbounded_unpaced_loop_stopped");
            break;
        }
    }

    scene.unload(&mut world);
    info!(ticks_run = summary.ticks_run, "loop_finished");
    summary
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn clamp_frame_delta(raw_frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    raw_frame_dt.min(max_frame_delta)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SimStepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> SimStepPlan {
    let mut ticks_to_run = 0u32;
    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run += 1;
    }

    let mut dropped_backlog = Duration::ZERO;
    if accumulator >= fixed_dt {
        dropped_backlog = accumulator;
        accumulator = Duration::ZERO;
    }

    SimStepPlan {
        ticks_to_run,
        remaining_accumulator: accumulator,
        dropped_backlog,
    }
}
