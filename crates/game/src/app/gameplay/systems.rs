fn player_intent(input: &InputSnapshot) -> Vec2 {
    let mut x = 0.0f32;
    let mut y = 0.0f32;

    if input.is_down(InputAction::MoveRight) {
        x += 1.0;
    }
    if input.is_down(InputAction::MoveLeft) {
        x -= 1.0;
    }
    if input.is_down(InputAction::MoveDown) {
        y += 1.0;
    }
    if input.is_down(InputAction::MoveUp) {
        y -= 1.0;
    }

    // Raw axis intent; the movement stepper owns diagonal normalization.
    Vec2 { x, y }
}

fn player_speed_multiplier(input: &InputSnapshot) -> f32 {
    if input.is_down(InputAction::Run) {
        RUN_SPEED_MULTIPLIER
    } else {
        1.0
    }
}

/// Runs one entity through stepper and resolver against the current entity
/// snapshot, commits the outcome, and returns the realized displacement.
/// Zero intent skips the resolver entirely: a stationary entity is never
/// pushed around.
fn advance_entity(
    world: &mut EntityWorld,
    id: EntityId,
    intent: Vec2,
    speed_multiplier: f32,
    bounds: WorldBounds,
    rng: &mut dyn RngCore,
) -> f32 {
    let Some(index) = world.entities().iter().position(|entity| entity.id == id) else {
        return 0.0;
    };
    let previous = world.entities()[index].position;

    step(
        &mut world.entities_mut()[index],
        intent,
        bounds,
        speed_multiplier,
    );
    if intent.x == 0.0 && intent.y == 0.0 {
        return 0.0;
    }

    let resolved = resolve_movement(
        &world.entities()[index],
        previous,
        world.entities(),
        bounds,
        rng,
    );
    world.entities_mut()[index].position = resolved;
    distance_between(previous, resolved)
}
