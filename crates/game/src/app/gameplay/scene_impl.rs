pub(crate) struct GameplayScene {
    scene_name: &'static str,
    config: SimConfig,
    bounds: WorldBounds,
    player_id: Option<EntityId>,
    behaviors_by_entity: HashMap<EntityId, WanderBehavior>,
    rng: ChaCha8Rng,
    tick: u64,
    last_tick_mode_counts: ModeCounts,
}

impl GameplayScene {
    pub(crate) fn from_config(scene_name: &'static str, config: SimConfig) -> Self {
        let bounds = WorldBounds::new(config.bounds.width, config.bounds.height)
            .expect("config bounds are validated before scene construction");
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            scene_name,
            config,
            bounds,
            player_id: None,
            behaviors_by_entity: HashMap::new(),
            rng,
            tick: 0,
            last_tick_mode_counts: ModeCounts::default(),
        }
    }

    fn last_tick_mode_counts(&self) -> ModeCounts {
        self.last_tick_mode_counts
    }
}

#[allow(dead_code)]
impl GameplayScene {
    /// Bounds may change between ticks (resize); every entity is re-clamped
    /// at the start of the next update.
    fn set_bounds(&mut self, bounds: WorldBounds) {
        self.bounds = bounds;
    }

    fn behavior_snapshot(&self, id: EntityId) -> Option<BehaviorSnapshot> {
        self.behaviors_by_entity
            .get(&id)
            .map(WanderBehavior::snapshot)
    }

    fn npc_mode(&self, id: EntityId) -> Option<BehaviorMode> {
        self.behaviors_by_entity.get(&id).map(WanderBehavior::mode)
    }
}

impl Scene for GameplayScene {
    fn load(&mut self, world: &mut EntityWorld) {
        let player = &self.config.player;
        let player_id = world.spawn(
            player.position.to_vec2(),
            Vec2 {
                x: player.half_extent.unwrap_or(CHARACTER_HALF_EXTENT),
                y: player.half_extent.unwrap_or(CHARACTER_HALF_EXTENT),
            },
            player.speed.unwrap_or(PLAYER_SPEED),
        );
        self.player_id = Some(player_id);

        for npc in &self.config.npcs {
            let half_extent = npc.half_extent.unwrap_or(CHARACTER_HALF_EXTENT);
            let id = world.spawn(
                npc.position.to_vec2(),
                Vec2 {
                    x: half_extent,
                    y: half_extent,
                },
                npc.speed.unwrap_or(NPC_SPEED),
            );
            // Home is the spawn point.
            let behavior = WanderBehavior::new(npc.position.to_vec2(), npc.tuning(), &mut self.rng);
            self.behaviors_by_entity.insert(id, behavior);
        }

        world.apply_pending();
        info!(
            scene = self.scene_name,
            entity_count = world.entity_count(),
            "scene_loaded"
        );
    }

    fn update(&mut self, input: &InputSnapshot, world: &mut EntityWorld) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Quit;
        }
        self.tick += 1;
        let bounds = self.bounds;

        for entity in world.entities_mut() {
            clamp_to_bounds(entity, bounds);
        }

        // The player resolves against everyone's pre-tick position.
        if let Some(player_id) = self.player_id {
            let intent = player_intent(input);
            let multiplier = player_speed_multiplier(input);
            advance_entity(world, player_id, intent, multiplier, bounds, &mut self.rng);
        }

        // Non-player entities follow in registration order. Each one sees the
        // already-updated positions of entities processed earlier this tick.
        let mut npc_ids: Vec<EntityId> = self.behaviors_by_entity.keys().copied().collect();
        npc_ids.sort_by_key(|id| id.0);

        let mut counts = ModeCounts::default();
        for id in npc_ids {
            let Some(mut behavior) = self.behaviors_by_entity.get(&id).copied() else {
                continue;
            };
            let Some(position) = world.find_entity(id).map(|entity| entity.position) else {
                self.behaviors_by_entity.remove(&id);
                continue;
            };

            let intent = behavior.update(position, bounds, &mut self.rng);
            let displacement = advance_entity(world, id, intent, 1.0, bounds, &mut self.rng);
            behavior.report_displacement(displacement, &mut self.rng);

            counts.record(behavior.mode());
            self.behaviors_by_entity.insert(id, behavior);
        }
        self.last_tick_mode_counts = counts;

        if self.tick % MODE_LOG_INTERVAL_TICKS == 0 {
            debug!(
                tick = self.tick,
                wandering = counts.wandering,
                paused = counts.paused,
                "behavior_modes"
            );
            for (id, behavior) in &self.behaviors_by_entity {
                let snapshot = behavior.snapshot();
                debug!(
                    entity = id.0,
                    mode = ?snapshot.mode,
                    elapsed = snapshot.elapsed,
                    duration = snapshot.duration,
                    stuck_ticks = snapshot.stuck_ticks,
                    "behavior_state"
                );
            }
        }

        SceneCommand::None
    }

    fn unload(&mut self, world: &mut EntityWorld) {
        info!(
            scene = self.scene_name,
            entity_count = world.entity_count(),
            "scene_unload"
        );
        self.player_id = None;
        self.behaviors_by_entity.clear();
    }

    fn debug_title(&self, world: &EntityWorld) -> Option<String> {
        let player = self.player_id.and_then(|id| world.find_entity(id))?;
        let counts = self.last_tick_mode_counts();
        Some(format!(
            "Meander | Player ({:.2}, {:.2}) | Entities {} | Wandering {} / Paused {}",
            player.position.x,
            player.position.y,
            world.entity_count(),
            counts.wandering,
            counts.paused
        ))
    }
}
