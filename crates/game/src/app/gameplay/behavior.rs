impl WanderBehavior {
    /// Construction immediately rolls the first mode, so a fresh behavior is
    /// already mid-wander or mid-pause.
    fn new(home: Vec2, tuning: WanderTuning, rng: &mut dyn RngCore) -> Self {
        let mut behavior = Self {
            mode: BehaviorMode::Paused,
            direction: Vec2::default(),
            elapsed: 0,
            duration: 0,
            stuck_ticks: 0,
            home,
            tuning,
        };
        behavior.roll_next_mode(rng);
        behavior
    }

    fn mode(&self) -> BehaviorMode {
        self.mode
    }

    fn snapshot(&self) -> BehaviorSnapshot {
        BehaviorSnapshot {
            mode: self.mode,
            elapsed: self.elapsed,
            duration: self.duration,
            stuck_ticks: self.stuck_ticks,
        }
    }

    /// One behavior tick. Returns the intent vector for this tick, consumed
    /// verbatim by the movement stepper.
    fn update(&mut self, position: Vec2, bounds: WorldBounds, rng: &mut dyn RngCore) -> Vec2 {
        match self.mode {
            BehaviorMode::Wandering => self.update_wandering(position, bounds, rng),
            BehaviorMode::Paused => self.update_paused(rng),
        }
    }

    /// Fed by the orchestrator after the movement attempt. Near-zero
    /// displacement while wandering counts toward the stuck limit; hitting it
    /// forces a fresh heading.
    fn report_displacement(&mut self, displacement: f32, rng: &mut dyn RngCore) {
        if self.mode != BehaviorMode::Wandering {
            return;
        }
        if displacement < STUCK_DISPLACEMENT_EPSILON {
            self.stuck_ticks += 1;
            if self.stuck_ticks >= self.tuning.max_stuck_ticks {
                self.direction = random_heading(rng);
                self.stuck_ticks = 0;
            }
        } else {
            self.stuck_ticks = 0;
        }
    }

    fn update_wandering(
        &mut self,
        position: Vec2,
        bounds: WorldBounds,
        rng: &mut dyn RngCore,
    ) -> Vec2 {
        self.elapsed += 1;

        if self.elapsed % HEADING_JITTER_PERIOD_TICKS == 0 {
            let offset =
                rng.gen_range(-HEADING_JITTER_RANGE_RADIANS..=HEADING_JITTER_RANGE_RADIANS);
            let angle = self.direction.y.atan2(self.direction.x) + offset;
            self.direction = Vec2 {
                x: angle.cos(),
                y: angle.sin(),
            };
        }

        self.steer_off_edges(position, bounds);
        self.steer_toward_home(position);

        if self.elapsed >= self.duration {
            self.roll_next_mode(rng);
            return Vec2::default();
        }
        self.direction
    }

    fn update_paused(&mut self, rng: &mut dyn RngCore) -> Vec2 {
        self.elapsed += 1;
        if self.elapsed >= self.duration {
            self.roll_next_mode(rng);
        }
        Vec2::default()
    }

    fn roll_next_mode(&mut self, rng: &mut dyn RngCore) {
        self.stuck_ticks = 0;
        if rng.gen::<f32>() < WANDER_CHANCE {
            self.enter_wandering(rng);
        } else {
            self.enter_paused(rng);
        }
    }

    fn enter_wandering(&mut self, rng: &mut dyn RngCore) {
        self.mode = BehaviorMode::Wandering;
        self.elapsed = 0;
        self.duration = rng.gen_range(self.tuning.min_wander_ticks..=self.tuning.max_wander_ticks);
        self.direction = random_heading(rng);
    }

    fn enter_paused(&mut self, rng: &mut dyn RngCore) {
        self.mode = BehaviorMode::Paused;
        self.elapsed = 0;
        self.duration = rng.gen_range(self.tuning.min_pause_ticks..=self.tuning.max_pause_ticks);
        self.direction = Vec2::default();
    }

    /// Within the steer margin of an edge, the matching direction component's
    /// sign is forced inward. Overrides the wander heading on that axis.
    fn steer_off_edges(&mut self, position: Vec2, bounds: WorldBounds) {
        if position.x < EDGE_STEER_MARGIN {
            self.direction.x = self.direction.x.abs();
        } else if position.x > bounds.width() - EDGE_STEER_MARGIN {
            self.direction.x = -self.direction.x.abs();
        }

        if position.y < EDGE_STEER_MARGIN {
            self.direction.y = self.direction.y.abs();
        } else if position.y > bounds.height() - EDGE_STEER_MARGIN {
            self.direction.y = -self.direction.y.abs();
        }
    }

    fn steer_toward_home(&mut self, position: Vec2) {
        let to_home_x = self.home.x - position.x;
        let to_home_y = self.home.y - position.y;
        let distance = (to_home_x * to_home_x + to_home_y * to_home_y).sqrt();
        if distance <= self.tuning.wander_radius * HOME_PULL_TRIGGER_FRACTION || distance <= 0.0 {
            return;
        }

        let toward_x = to_home_x / distance;
        let toward_y = to_home_y / distance;
        // The blend is left un-normalized; homing drifts the effective speed.
        self.direction.x =
            self.direction.x * (1.0 - HOME_PULL_WEIGHT) + toward_x * HOME_PULL_WEIGHT;
        self.direction.y =
            self.direction.y * (1.0 - HOME_PULL_WEIGHT) + toward_y * HOME_PULL_WEIGHT;
    }
}

#[allow(dead_code)]
impl WanderBehavior {
    fn set_home(&mut self, home: Vec2) {
        self.home = home;
    }

    fn set_wander_radius(&mut self, wander_radius: f32) {
        self.tuning.wander_radius = wander_radius;
    }

    fn set_max_stuck_ticks(&mut self, max_stuck_ticks: u32) {
        self.tuning.max_stuck_ticks = max_stuck_ticks;
    }

    /// New duration windows apply from the next mode transition; the current
    /// duration was drawn on entry.
    fn set_timing(
        &mut self,
        min_wander_ticks: u32,
        max_wander_ticks: u32,
        min_pause_ticks: u32,
        max_pause_ticks: u32,
    ) {
        self.tuning.min_wander_ticks = min_wander_ticks;
        self.tuning.max_wander_ticks = max_wander_ticks;
        self.tuning.min_pause_ticks = min_pause_ticks;
        self.tuning.max_pause_ticks = max_pause_ticks;
    }
}

fn random_heading(rng: &mut dyn RngCore) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    Vec2 {
        x: angle.cos(),
        y: angle.sin(),
    }
}

fn distance_between(a: Vec2, b: Vec2) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}
