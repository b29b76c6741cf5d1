// Authoritative collections of projectiles and targets, indexed by id.

use crate::domain::state::{EntityId, PlayerSlot, Projectile, ProjectileId, Target, TargetId};
use crate::domain::tuning::ArenaBounds;
use crate::domain::tuning::projectile::ProjectileTuning;
use crate::domain::tuning::target::TargetTuning;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::collections::BTreeMap;

/// Owns every live projectile and target of a round.
///
/// Ids come from a single counter shared by both kinds and are never reused
/// within a store. Iteration is always in ascending id order.
pub struct EntityStore {
    arena: ArenaBounds,
    projectile_tuning: ProjectileTuning,
    target_tuning: TargetTuning,
    projectiles: BTreeMap<ProjectileId, Projectile>,
    targets: BTreeMap<TargetId, Target>,
    next_id: u64,
    rng: Pcg32,
}

impl EntityStore {
    pub fn new(
        arena: ArenaBounds,
        projectile_tuning: ProjectileTuning,
        target_tuning: TargetTuning,
        seed: u64,
    ) -> Self {
        Self {
            arena,
            projectile_tuning,
            target_tuning,
            projectiles: BTreeMap::new(),
            targets: BTreeMap::new(),
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Spawns a target at a random x inside the arena, at the configured spawn height.
    pub fn spawn_target(&mut self) -> TargetId {
        let (min_x, max_x) = self.spawn_x_range();
        let x = if max_x > min_x {
            self.rng.random_range(min_x..=max_x)
        } else {
            min_x
        };

        let id = TargetId(self.allocate_id());
        self.targets.insert(
            id,
            Target {
                id,
                x,
                y: self.target_tuning.spawn_height,
                vy: -self.target_tuning.speed,
            },
        );
        id
    }

    // Narrow arenas fall back to any x that keeps the whole box inside the walls.
    fn spawn_x_range(&self) -> (f32, f32) {
        let margin = self.target_tuning.spawn_margin;
        if self.arena.width - margin >= margin {
            (margin, self.arena.width - margin)
        } else {
            (0.0, (self.arena.width - self.target_tuning.size).max(0.0))
        }
    }

    pub fn spawn_projectile(&mut self, x: f32, y: f32, owner: PlayerSlot) -> ProjectileId {
        let id = ProjectileId(self.allocate_id());
        self.projectiles.insert(
            id,
            Projectile {
                id,
                owner,
                x,
                y,
                vy: self.projectile_tuning.speed,
            },
        );
        id
    }

    /// Removes an entity. Returns false when it was already gone.
    pub fn remove(&mut self, id: impl Into<EntityId>) -> bool {
        match id.into() {
            EntityId::Projectile(id) => self.projectiles.remove(&id).is_some(),
            EntityId::Target(id) => self.targets.remove(&id).is_some(),
        }
    }

    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.values()
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    pub fn projectiles_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.values_mut()
    }

    pub fn targets_mut(&mut self) -> impl Iterator<Item = &mut Target> {
        self.targets.values_mut()
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.get(&id)
    }

    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(&id)
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    // Test hook for placing a target at an exact position.
    #[cfg(test)]
    pub(crate) fn place_target(&mut self, x: f32, y: f32) -> TargetId {
        let id = TargetId(self.allocate_id());
        self.targets.insert(
            id,
            Target {
                id,
                x,
                y,
                vy: -self.target_tuning.speed,
            },
        );
        id
    }
}
