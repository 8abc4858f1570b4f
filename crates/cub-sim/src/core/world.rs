use crate::api::types::EntityId;
use crate::components::entity::{Entity, Kind};

/// Mutable world storage using flat Vecs.
/// Designed for level-sized entity counts (hundreds, not millions).
///
/// Projectiles live in their own list: they are short-lived and removed
/// outright, while level entities are soft-deleted and reaped later.
pub struct World {
    entities: Vec<Entity>,
    projectiles: Vec<Entity>,
    next_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
            projectiles: Vec::with_capacity(32),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a level entity.
    pub fn spawn(&mut self, entity: Entity) {
        debug_assert!(
            !matches!(entity.kind, Kind::Projectile),
            "projectiles go through spawn_projectile"
        );
        self.entities.push(entity);
    }

    pub fn spawn_projectile(&mut self, projectile: Entity) {
        self.projectiles.push(projectile);
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// All level entities, dead ones included (presentation fades them out).
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Index-stable mutable access for per-tick passes.
    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn iter_live(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_alive())
    }

    pub fn projectiles(&self) -> &[Entity] {
        &self.projectiles
    }

    /// Level entities and projectiles as two disjoint mutable borrows.
    pub fn split_mut(&mut self) -> (&mut [Entity], &mut Vec<Entity>) {
        (&mut self.entities, &mut self.projectiles)
    }

    /// Age dead entities and purge those dead for longer than `linger` ticks.
    /// Call only between passes.
    pub fn reap(&mut self, linger: u32) {
        for e in self.entities.iter_mut().filter(|e| e.dead) {
            e.dead_for = e.dead_for.saturating_add(1);
        }
        self.entities.retain(|e| !e.dead || e.dead_for <= linger);
    }

    /// Remove matching level entities outright, without a corpse. Returns how many went.
    pub fn discard(&mut self, mut gone: impl FnMut(&Entity) -> bool) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !gone(e));
        before - self.entities.len()
    }

    /// Number of level entities (dead ones not yet reaped included).
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop everything. IDs keep counting so stale handles never alias.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.projectiles.clear();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
