use std::env;
use std::path::Path;

use engine::{run_headless, InputAction, InputSnapshot, LoopConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use super::gameplay::{self, GameplayScene, SimConfig, CONFIG_ENV_VAR};

pub(crate) fn run() {
    init_tracing();
    info!("=== Meander Startup ===");

    let config = match resolve_sim_config() {
        Ok(config) => config,
        Err(error) => {
            error!(error = %error, "config_load_failed");
            std::process::exit(1);
        }
    };
    info!(
        seed = config.seed,
        npc_count = config.npcs.len(),
        total_ticks = config.total_ticks,
        "simulation_config"
    );

    let loop_config = LoopConfig {
        realtime: false,
        total_ticks: Some(config.total_ticks),
        ..LoopConfig::default()
    };
    let scene = GameplayScene::from_config("village", config);
    let summary = run_headless(loop_config, Box::new(scene), scripted_input);
    info!(ticks_run = summary.ticks_run, "simulation_complete");
}

fn resolve_sim_config() -> Result<SimConfig, String> {
    match env::var(CONFIG_ENV_VAR) {
        Ok(path) => gameplay::load_sim_config(Path::new(&path)),
        Err(env::VarError::NotPresent) => Ok(SimConfig::default()),
        Err(error) => Err(format!("read {CONFIG_ENV_VAR}: {error}")),
    }
}

/// Canned player input for the headless demo: east, a diagonal cut south,
/// then a sprint back west, idling out the rest of the run.
fn scripted_input(tick: u64) -> InputSnapshot {
    match tick {
        0..=119 => InputSnapshot::empty().with_action_down(InputAction::MoveRight, true),
        120..=179 => InputSnapshot::empty()
            .with_action_down(InputAction::MoveRight, true)
            .with_action_down(InputAction::MoveDown, true),
        180..=239 => InputSnapshot::empty()
            .with_action_down(InputAction::MoveLeft, true)
            .with_action_down(InputAction::Run, true),
        _ => InputSnapshot::empty(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
