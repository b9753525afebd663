#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct ConfigVec2 {
    x: f32,
    y: f32,
}

impl ConfigVec2 {
    fn from_vec2(value: Vec2) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }

    fn to_vec2(self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct BoundsConfig {
    width: f32,
    height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct PlayerConfig {
    position: ConfigVec2,
    #[serde(default)]
    speed: Option<f32>,
    #[serde(default)]
    half_extent: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct NpcConfig {
    position: ConfigVec2,
    #[serde(default)]
    speed: Option<f32>,
    #[serde(default)]
    half_extent: Option<f32>,
    #[serde(default)]
    wander_radius: Option<f32>,
    #[serde(default)]
    min_wander_ticks: Option<u32>,
    #[serde(default)]
    max_wander_ticks: Option<u32>,
    #[serde(default)]
    min_pause_ticks: Option<u32>,
    #[serde(default)]
    max_pause_ticks: Option<u32>,
    #[serde(default)]
    max_stuck_ticks: Option<u32>,
}

impl NpcConfig {
    fn at(position: Vec2) -> Self {
        Self {
            position: ConfigVec2::from_vec2(position),
            speed: None,
            half_extent: None,
            wander_radius: None,
            min_wander_ticks: None,
            max_wander_ticks: None,
            min_pause_ticks: None,
            max_pause_ticks: None,
            max_stuck_ticks: None,
        }
    }

    fn tuning(&self) -> WanderTuning {
        WanderTuning {
            wander_radius: self.wander_radius.unwrap_or(DEFAULT_WANDER_RADIUS),
            min_wander_ticks: self.min_wander_ticks.unwrap_or(DEFAULT_MIN_WANDER_TICKS),
            max_wander_ticks: self.max_wander_ticks.unwrap_or(DEFAULT_MAX_WANDER_TICKS),
            min_pause_ticks: self.min_pause_ticks.unwrap_or(DEFAULT_MIN_PAUSE_TICKS),
            max_pause_ticks: self.max_pause_ticks.unwrap_or(DEFAULT_MAX_PAUSE_TICKS),
            max_stuck_ticks: self.max_stuck_ticks.unwrap_or(DEFAULT_MAX_STUCK_TICKS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SimConfig {
    bounds: BoundsConfig,
    pub(crate) seed: u64,
    pub(crate) total_ticks: u64,
    player: PlayerConfig,
    pub(crate) npcs: Vec<NpcConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bounds: BoundsConfig {
                width: DEFAULT_WORLD_WIDTH,
                height: DEFAULT_WORLD_HEIGHT,
            },
            seed: DEFAULT_SEED,
            total_ticks: DEFAULT_TOTAL_TICKS,
            player: PlayerConfig {
                position: ConfigVec2 { x: 100.0, y: 100.0 },
                speed: None,
                half_extent: None,
            },
            npcs: vec![
                NpcConfig::at(Vec2 { x: 300.0, y: 200.0 }),
                NpcConfig::at(Vec2 { x: 500.0, y: 400.0 }),
                NpcConfig::at(Vec2 { x: 650.0, y: 150.0 }),
            ],
        }
    }
}

type ConfigResult<T> = Result<T, String>;

pub(crate) fn load_sim_config(path: &Path) -> ConfigResult<SimConfig> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("read config '{}': {error}", path.display()))?;
    let config = parse_sim_config_json(&raw)?;
    validate_sim_config(&config)?;
    Ok(config)
}

fn parse_sim_config_json(raw: &str) -> ConfigResult<SimConfig> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, SimConfig>(&mut deserializer) {
        Ok(config) => Ok(config),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(format!("parse config json: {source}"))
            } else {
                Err(format!("parse config json at {path}: {source}"))
            }
        }
    }
}

fn validation_err(path: &str, message: impl Into<String>) -> String {
    format!("validation failed at {path}: {}", message.into())
}

fn expected_actual(
    path: &str,
    expected: impl std::fmt::Display,
    actual: impl std::fmt::Display,
) -> String {
    validation_err(path, format!("expected {expected}, got {actual}"))
}

fn validate_finite_positive(path: &str, value: f32) -> ConfigResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(expected_actual(path, "finite positive number", value));
    }
    Ok(())
}

fn validate_finite(path: &str, value: f32) -> ConfigResult<()> {
    if !value.is_finite() {
        return Err(expected_actual(path, "finite number", value));
    }
    Ok(())
}

fn validate_sim_config(config: &SimConfig) -> ConfigResult<()> {
    validate_finite_positive("bounds.width", config.bounds.width)?;
    validate_finite_positive("bounds.height", config.bounds.height)?;

    validate_finite("player.position.x", config.player.position.x)?;
    validate_finite("player.position.y", config.player.position.y)?;
    if let Some(speed) = config.player.speed {
        validate_finite_positive("player.speed", speed)?;
    }
    if let Some(half_extent) = config.player.half_extent {
        validate_finite_positive("player.half_extent", half_extent)?;
    }

    for (index, npc) in config.npcs.iter().enumerate() {
        validate_finite(&format!("npcs[{index}].position.x"), npc.position.x)?;
        validate_finite(&format!("npcs[{index}].position.y"), npc.position.y)?;
        if let Some(speed) = npc.speed {
            validate_finite_positive(&format!("npcs[{index}].speed"), speed)?;
        }
        if let Some(half_extent) = npc.half_extent {
            validate_finite_positive(&format!("npcs[{index}].half_extent"), half_extent)?;
        }

        let tuning = npc.tuning();
        if !tuning.wander_radius.is_finite() || tuning.wander_radius < 0.0 {
            return Err(expected_actual(
                &format!("npcs[{index}].wander_radius"),
                "finite non-negative number",
                tuning.wander_radius,
            ));
        }
        if tuning.min_wander_ticks > tuning.max_wander_ticks {
            return Err(validation_err(
                &format!("npcs[{index}].min_wander_ticks"),
                format!(
                    "wander window is inverted: {}..{}",
                    tuning.min_wander_ticks, tuning.max_wander_ticks
                ),
            ));
        }
        if tuning.min_pause_ticks > tuning.max_pause_ticks {
            return Err(validation_err(
                &format!("npcs[{index}].min_pause_ticks"),
                format!(
                    "pause window is inverted: {}..{}",
                    tuning.min_pause_ticks, tuning.max_pause_ticks
                ),
            ));
        }
    }

    Ok(())
}
