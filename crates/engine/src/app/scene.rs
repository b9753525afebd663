use thiserror::Error;

use super::input::InputSnapshot;

/// World coordinate convention: screen-space pixels, origin at the top-left
/// corner, +x right and +y down. An entity's `position` is the center of its
/// bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BoundsError {
    #[error("world bounds must be finite and positive, got {width}x{height}")]
    NonPositive { width: f32, height: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    width: f32,
    height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Result<Self, BoundsError> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(BoundsError::NonPositive { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub position: Vec2,
    pub facing: Facing,
    pub is_moving: bool,
    /// Pixels advanced per tick at unit intent magnitude.
    pub speed: f32,
    /// Half the bounding box on each axis; doubles as the world-edge margin.
    pub half_extents: Vec2,
}

impl Entity {
    /// Collision radius: half the smaller bounding-box dimension.
    pub fn radius(&self) -> f32 {
        self.half_extents.x.min(self.half_extents.y)
    }
}

#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Entity storage with deferred structural mutation: spawns and despawns queue
/// up during a tick and land in `apply_pending`, so the entity list is stable
/// while an update pass is iterating it.
#[derive(Debug, Default)]
pub struct EntityWorld {
    allocator: EntityIdAllocator,
    entities: Vec<Entity>,
    pending_spawns: Vec<Entity>,
    pending_despawns: Vec<EntityId>,
}

impl EntityWorld {
    pub fn spawn(&mut self, position: Vec2, half_extents: Vec2, speed: f32) -> EntityId {
        let id = self.allocator.allocate();
        self.pending_spawns.push(Entity {
            id,
            position,
            facing: Facing::default(),
            is_moving: false,
            speed,
            half_extents,
        });
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        let exists_now = self.entities.iter().any(|entity| entity.id == id);
        let pending_spawn = self.pending_spawns.iter().any(|entity| entity.id == id);
        if !exists_now && !pending_spawn {
            return false;
        }
        self.pending_despawns.push(id);
        true
    }

    pub fn apply_pending(&mut self) {
        if !self.pending_despawns.is_empty() {
            self.pending_despawns.sort_by_key(|id| id.0);
            self.pending_despawns.dedup();
            let pending = &self.pending_despawns;
            self.entities.retain(|entity| {
                pending
                    .binary_search_by_key(&entity.id.0, |id| id.0)
                    .is_err()
            });
            self.pending_spawns.retain(|entity| {
                pending
                    .binary_search_by_key(&entity.id.0, |id| id.0)
                    .is_err()
            });
            self.pending_despawns.clear();
        }

        if !self.pending_spawns.is_empty() {
            self.entities.append(&mut self.pending_spawns);
        }
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending_spawns.clear();
        self.pending_despawns.clear();
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

pub trait Scene {
    fn load(&mut self, world: &mut EntityWorld);

    fn update(&mut self, input: &InputSnapshot, world: &mut EntityWorld) -> SceneCommand;

    fn unload(&mut self, _world: &mut EntityWorld) {}

    fn debug_title(&self, _world: &EntityWorld) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_default(world: &mut EntityWorld, x: f32, y: f32) -> EntityId {
        world.spawn(Vec2 { x, y }, Vec2 { x: 32.0, y: 32.0 }, 1.0)
    }

    #[test]
    fn allocator_hands_out_sequential_ids() {
        let mut allocator = EntityIdAllocator::default();
        assert_eq!(allocator.allocate(), EntityId(0));
        assert_eq!(allocator.allocate(), EntityId(1));
        assert_eq!(allocator.allocate(), EntityId(2));
    }

    #[test]
    fn spawn_is_deferred_until_apply_pending() {
        let mut world = EntityWorld::default();
        let id = spawn_default(&mut world, 10.0, 20.0);
        assert_eq!(world.entity_count(), 0);

        world.apply_pending();
        assert_eq!(world.entity_count(), 1);
        let entity = world.find_entity(id).expect("entity");
        assert_eq!(entity.position, Vec2 { x: 10.0, y: 20.0 });
        assert_eq!(entity.facing, Facing::Down);
        assert!(!entity.is_moving);
    }

    #[test]
    fn despawn_is_deferred_and_removes_pending_spawns_too() {
        let mut world = EntityWorld::default();
        let live = spawn_default(&mut world, 0.0, 0.0);
        world.apply_pending();

        let queued = spawn_default(&mut world, 1.0, 1.0);
        assert!(world.despawn(live));
        assert!(world.despawn(queued));
        assert_eq!(world.entity_count(), 1);

        world.apply_pending();
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn despawn_of_unknown_id_reports_false() {
        let mut world = EntityWorld::default();
        assert!(!world.despawn(EntityId(99)));
    }

    #[test]
    fn radius_is_half_the_smaller_bounding_dimension() {
        let mut world = EntityWorld::default();
        let id = world.spawn(Vec2::default(), Vec2 { x: 32.0, y: 24.0 }, 1.0);
        world.apply_pending();
        assert_eq!(world.find_entity(id).expect("entity").radius(), 24.0);
    }

    #[test]
    fn bounds_reject_non_positive_dimensions() {
        assert!(WorldBounds::new(800.0, 600.0).is_ok());
        assert!(WorldBounds::new(0.0, 600.0).is_err());
        assert!(WorldBounds::new(800.0, -1.0).is_err());
        assert!(WorldBounds::new(f32::NAN, 600.0).is_err());
    }
}
