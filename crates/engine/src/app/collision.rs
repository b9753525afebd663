use std::f32::consts::TAU;

use rand::{Rng, RngCore};

use super::movement::clamp_point;
use super::scene::{Entity, EntityId, Vec2, WorldBounds};

/// Fixed nudge applied when both axis-separated moves are blocked.
pub const REPULSION_PUSH_DISTANCE: f32 = 2.0;

fn circles_overlap(x1: f32, y1: f32, r1: f32, x2: f32, y2: f32, r2: f32) -> bool {
    let dx = x1 - x2;
    let dy = y1 - y2;
    // Strict: touching circles do not count as overlapping.
    (dx * dx + dy * dy).sqrt() < r1 + r2
}

/// First entity in `others` (slice order) whose circle overlaps a probe circle
/// of `radius` centered at `(x, y)`. The probing entity skips itself by id.
pub fn collider_at<'a>(
    entity_id: EntityId,
    radius: f32,
    x: f32,
    y: f32,
    others: &'a [Entity],
) -> Option<&'a Entity> {
    others.iter().find(|other| {
        other.id != entity_id
            && circles_overlap(
                x,
                y,
                radius,
                other.position.x,
                other.position.y,
                other.radius(),
            )
    })
}

/// Arbitrates a movement candidate against every other entity. `entity` holds
/// the bounds-clamped candidate position committed by `step`; `previous` is
/// the pre-tick position. Returns the position to commit:
///
/// 1. Candidate free → candidate.
/// 2. Otherwise each axis is tested independently and every individually-free
///    axis is committed, which slides the entity along the obstacle.
/// 3. Both axes blocked → a small push away from the colliding entity
///    (random heading when centers coincide), kept only if it lands clear of
///    everything; else the entity stays put.
///
/// Never fails: "no movement possible" is a silent no-op.
pub fn resolve_movement(
    entity: &Entity,
    previous: Vec2,
    all: &[Entity],
    bounds: WorldBounds,
    rng: &mut dyn RngCore,
) -> Vec2 {
    let candidate = entity.position;
    let radius = entity.radius();

    let Some(collider) = collider_at(entity.id, radius, candidate.x, candidate.y, all) else {
        return candidate;
    };

    let x_blocked = collider_at(entity.id, radius, candidate.x, previous.y, all).is_some();
    let y_blocked = collider_at(entity.id, radius, previous.x, candidate.y, all).is_some();
    if !x_blocked || !y_blocked {
        return Vec2 {
            x: if x_blocked { previous.x } else { candidate.x },
            y: if y_blocked { previous.y } else { candidate.y },
        };
    }

    let away_x = previous.x - collider.position.x;
    let away_y = previous.y - collider.position.y;
    let distance = (away_x * away_x + away_y * away_y).sqrt();
    let (unit_x, unit_y) = if distance == 0.0 {
        // Coincident centers: separate along a random heading.
        let angle = rng.gen_range(0.0..TAU);
        (angle.cos(), angle.sin())
    } else {
        (away_x / distance, away_y / distance)
    };

    let pushed = clamp_point(
        Vec2 {
            x: previous.x + unit_x * REPULSION_PUSH_DISTANCE,
            y: previous.y + unit_y * REPULSION_PUSH_DISTANCE,
        },
        entity.half_extents,
        bounds,
    );
    if collider_at(entity.id, radius, pushed.x, pushed.y, all).is_none() {
        pushed
    } else {
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::scene::Facing;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bounds() -> WorldBounds {
        WorldBounds::new(800.0, 600.0).expect("bounds")
    }

    fn entity(id: u64, x: f32, y: f32, half_extent: f32) -> Entity {
        Entity {
            id: EntityId(id),
            position: Vec2 { x, y },
            facing: Facing::Down,
            is_moving: false,
            speed: 1.0,
            half_extents: Vec2 {
                x: half_extent,
                y: half_extent,
            },
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(17)
    }

    #[test]
    fn touching_circles_do_not_overlap() {
        assert!(!circles_overlap(0.0, 0.0, 20.0, 40.0, 0.0, 20.0));
        assert!(circles_overlap(0.0, 0.0, 20.0, 39.9, 0.0, 20.0));
    }

    #[test]
    fn collider_at_returns_first_in_slice_order_and_skips_self() {
        let mover = entity(0, 100.0, 100.0, 20.0);
        let all = vec![
            mover.clone(),
            entity(1, 110.0, 100.0, 20.0),
            entity(2, 95.0, 100.0, 20.0),
        ];

        let hit = collider_at(mover.id, mover.radius(), 100.0, 100.0, &all).expect("collider");
        assert_eq!(hit.id, EntityId(1));
    }

    #[test]
    fn free_candidate_commits_both_axes() {
        let mut mover = entity(0, 100.0, 100.0, 20.0);
        let previous = mover.position;
        mover.position = Vec2 { x: 104.0, y: 103.0 };
        let all = vec![mover.clone(), entity(1, 300.0, 300.0, 20.0)];

        let resolved = resolve_movement(&mover, previous, &all, bounds(), &mut rng());
        assert_eq!(resolved, Vec2 { x: 104.0, y: 103.0 });
    }

    #[test]
    fn blocked_axis_is_dropped_and_free_axis_slides() {
        // Obstacle dead ahead on x; the y component survives.
        let mut mover = entity(0, 100.0, 100.0, 20.0);
        let previous = mover.position;
        mover.position = Vec2 { x: 104.0, y: 103.0 };
        let all = vec![mover.clone(), entity(1, 140.0, 100.0, 20.0)];

        let resolved = resolve_movement(&mover, previous, &all, bounds(), &mut rng());
        assert_eq!(resolved, Vec2 { x: 100.0, y: 103.0 });
    }

    #[test]
    fn head_on_approach_commits_nothing() {
        // Pure x-axis approach: the x test fails, the y test is a no-op move,
        // so the mover stays exactly where it started.
        let mut mover = entity(0, 100.0, 100.0, 20.0);
        let previous = mover.position;
        mover.position = Vec2 { x: 140.0, y: 100.0 };
        let all = vec![mover.clone(), entity(1, 145.0, 100.0, 20.0)];

        let resolved = resolve_movement(&mover, previous, &all, bounds(), &mut rng());
        assert_eq!(resolved, Vec2 { x: 100.0, y: 100.0 });
    }

    #[test]
    fn fully_blocked_mover_gets_pushed_clear() {
        // Tiny radii so the fixed push is enough to separate.
        let mut mover = entity(0, 100.0, 100.0, 1.0);
        let previous = mover.position;
        mover.position = Vec2 { x: 101.0, y: 100.0 };
        let all = vec![mover.clone(), entity(1, 101.5, 100.0, 1.0)];

        let resolved = resolve_movement(&mover, previous, &all, bounds(), &mut rng());
        assert!((resolved.x - 98.0).abs() < 0.0001);
        assert!((resolved.y - 100.0).abs() < 0.0001);
    }

    #[test]
    fn push_that_would_hit_another_entity_is_abandoned() {
        let mut mover = entity(0, 100.0, 100.0, 20.0);
        let previous = mover.position;
        mover.position = Vec2 { x: 101.0, y: 100.0 };
        // Overlapping ahead and another obstacle covering the push landing
        // spot behind.
        let all = vec![
            mover.clone(),
            entity(1, 120.0, 100.0, 20.0),
            entity(2, 70.0, 100.0, 20.0),
        ];

        let resolved = resolve_movement(&mover, previous, &all, bounds(), &mut rng());
        assert_eq!(resolved, previous);
    }

    #[test]
    fn coincident_centers_push_along_a_random_unit_heading() {
        let mut mover = entity(0, 100.0, 100.0, 0.5);
        let previous = mover.position;
        mover.position = Vec2 { x: 100.0, y: 100.0 };
        let all = vec![mover.clone(), entity(1, 100.0, 100.0, 0.5)];

        let resolved = resolve_movement(&mover, previous, &all, bounds(), &mut rng());
        let pushed_by = (resolved.x - 100.0).hypot(resolved.y - 100.0);
        assert!((pushed_by - REPULSION_PUSH_DISTANCE).abs() < 0.0001);
    }

    #[test]
    fn push_is_clamped_to_world_margins() {
        let mut mover = entity(0, 33.0, 100.0, 32.0);
        let previous = mover.position;
        mover.position = Vec2 { x: 33.5, y: 100.0 };
        // Blocked ahead and behind is the world edge: the clamped push lands
        // on the margin and still overlaps, so the mover stays put.
        let all = vec![mover.clone(), entity(1, 60.0, 100.0, 32.0)];

        let resolved = resolve_movement(&mover, previous, &all, bounds(), &mut rng());
        assert_eq!(resolved, previous);
    }
}
