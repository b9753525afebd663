use std::f32::consts::FRAC_1_SQRT_2;

use super::scene::{Entity, Facing, Vec2, WorldBounds};

/// Advances `entity` by one tick of `intent`, clamped to `bounds`. The intent
/// is a raw direction vector; diagonal intents are scaled so diagonal speed
/// equals axial speed. No collision awareness here — `resolve_movement`
/// arbitrates afterwards against the committed candidate.
pub fn step(entity: &mut Entity, intent: Vec2, bounds: WorldBounds, speed_multiplier: f32) {
    if intent.x == 0.0 && intent.y == 0.0 {
        entity.is_moving = false;
        return;
    }

    let mut dx = intent.x;
    let mut dy = intent.y;
    if dx != 0.0 && dy != 0.0 {
        dx *= FRAC_1_SQRT_2;
        dy *= FRAC_1_SQRT_2;
    }

    // Equal magnitudes take the horizontal branch.
    entity.facing = if dx.abs() >= dy.abs() {
        if dx > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        }
    } else if dy > 0.0 {
        Facing::Down
    } else {
        Facing::Up
    };

    let speed = entity.speed * speed_multiplier;
    let candidate = Vec2 {
        x: entity.position.x + dx * speed,
        y: entity.position.y + dy * speed,
    };
    entity.position = clamp_point(candidate, entity.half_extents, bounds);
    entity.is_moving = true;
}

/// Re-clamps an entity into the current bounds without touching facing or
/// movement state. Bounds may shrink between ticks (resize), and entities with
/// zero intent would otherwise never be pulled back in.
pub fn clamp_to_bounds(entity: &mut Entity, bounds: WorldBounds) {
    entity.position = clamp_point(entity.position, entity.half_extents, bounds);
}

pub(crate) fn clamp_point(point: Vec2, half_extents: Vec2, bounds: WorldBounds) -> Vec2 {
    // min-then-max so degenerate bounds (smaller than the entity) resolve to
    // the near margin instead of panicking.
    Vec2 {
        x: point.x.min(bounds.width() - half_extents.x).max(half_extents.x),
        y: point.y.min(bounds.height() - half_extents.y).max(half_extents.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::scene::EntityId;

    fn bounds() -> WorldBounds {
        WorldBounds::new(800.0, 600.0).expect("bounds")
    }

    fn entity_at(x: f32, y: f32, speed: f32) -> Entity {
        Entity {
            id: EntityId(0),
            position: Vec2 { x, y },
            facing: Facing::Down,
            is_moving: false,
            speed,
            half_extents: Vec2 { x: 32.0, y: 32.0 },
        }
    }

    #[test]
    fn zero_intent_clears_moving_and_leaves_position_and_facing() {
        let mut entity = entity_at(100.0, 100.0, 5.0);
        entity.facing = Facing::Left;
        entity.is_moving = true;

        step(&mut entity, Vec2::default(), bounds(), 1.0);

        assert_eq!(entity.position, Vec2 { x: 100.0, y: 100.0 });
        assert_eq!(entity.facing, Facing::Left);
        assert!(!entity.is_moving);
    }

    #[test]
    fn axial_step_advances_by_speed() {
        let mut entity = entity_at(100.0, 100.0, 5.0);
        step(&mut entity, Vec2 { x: 1.0, y: 0.0 }, bounds(), 1.0);
        assert!((entity.position.x - 105.0).abs() < 0.0001);
        assert!((entity.position.y - 100.0).abs() < 0.0001);
        assert!(entity.is_moving);
    }

    #[test]
    fn diagonal_step_matches_axial_distance() {
        let mut axial = entity_at(300.0, 300.0, 5.0);
        let mut diagonal = entity_at(300.0, 300.0, 5.0);

        step(&mut axial, Vec2 { x: 1.0, y: 0.0 }, bounds(), 1.0);
        step(&mut diagonal, Vec2 { x: 1.0, y: 1.0 }, bounds(), 1.0);

        let axial_distance = (axial.position.x - 300.0).hypot(axial.position.y - 300.0);
        let diagonal_distance = (diagonal.position.x - 300.0).hypot(diagonal.position.y - 300.0);
        assert!((axial_distance - diagonal_distance).abs() < 0.001);
    }

    #[test]
    fn speed_multiplier_scales_displacement() {
        let mut walking = entity_at(300.0, 300.0, 2.0);
        let mut running = entity_at(300.0, 300.0, 2.0);

        step(&mut walking, Vec2 { x: 0.0, y: 1.0 }, bounds(), 1.0);
        step(&mut running, Vec2 { x: 0.0, y: 1.0 }, bounds(), 1.5);

        assert!((walking.position.y - 302.0).abs() < 0.0001);
        assert!((running.position.y - 303.0).abs() < 0.0001);
    }

    #[test]
    fn facing_follows_dominant_axis() {
        let mut entity = entity_at(300.0, 300.0, 1.0);
        step(&mut entity, Vec2 { x: -2.0, y: 1.0 }, bounds(), 1.0);
        assert_eq!(entity.facing, Facing::Left);

        step(&mut entity, Vec2 { x: 1.0, y: -3.0 }, bounds(), 1.0);
        assert_eq!(entity.facing, Facing::Up);

        step(&mut entity, Vec2 { x: 0.0, y: 2.0 }, bounds(), 1.0);
        assert_eq!(entity.facing, Facing::Down);
    }

    #[test]
    fn exact_diagonal_facing_prefers_horizontal() {
        let mut entity = entity_at(300.0, 300.0, 1.0);
        step(&mut entity, Vec2 { x: 1.0, y: 1.0 }, bounds(), 1.0);
        assert_eq!(entity.facing, Facing::Right);

        step(&mut entity, Vec2 { x: -1.0, y: -1.0 }, bounds(), 1.0);
        assert_eq!(entity.facing, Facing::Left);
    }

    #[test]
    fn step_clamps_each_axis_to_the_margin() {
        let mut entity = entity_at(34.0, 300.0, 10.0);
        step(&mut entity, Vec2 { x: -1.0, y: 0.0 }, bounds(), 1.0);
        assert_eq!(entity.position.x, 32.0);

        let mut entity = entity_at(300.0, 595.0, 10.0);
        step(&mut entity, Vec2 { x: 0.0, y: 1.0 }, bounds(), 1.0);
        assert_eq!(entity.position.y, 568.0);
    }

    #[test]
    fn clamp_to_bounds_pulls_entity_back_after_resize() {
        let mut entity = entity_at(700.0, 500.0, 1.0);
        let shrunk = WorldBounds::new(400.0, 300.0).expect("bounds");

        clamp_to_bounds(&mut entity, shrunk);

        assert_eq!(entity.position, Vec2 { x: 368.0, y: 268.0 });
        assert!(!entity.is_moving);
    }
}
