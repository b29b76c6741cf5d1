// Pure hit and boundary detection over the live entity set.

use crate::domain::state::{PlayerSlot, Projectile, ProjectileId, Target, TargetId};
use crate::domain::systems::entity_store::EntityStore;
use crate::domain::tuning::ArenaBounds;
use std::collections::BTreeSet;

/// Box sizes used for overlap checks. Entity positions are the bottom-left corner.
#[derive(Debug, Clone, Copy)]
pub struct HitBoxes {
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub target_size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub target: TargetId,
    pub projectile: ProjectileId,
    pub scorer: PlayerSlot,
}

/// What happened during one tick. Applying it is the caller's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub hits: Vec<Hit>,
    pub expired_projectiles: Vec<ProjectileId>,
    pub expired_targets: Vec<TargetId>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.expired_projectiles.is_empty() && self.expired_targets.is_empty()
    }
}

/// Detects hits and boundary exits without mutating anything.
///
/// Targets are visited in ascending id order and each scans projectiles in
/// ascending id order, so the oldest overlapping shot wins. A projectile
/// claimed by an earlier target is skipped, which keeps every id in at most
/// one hit. Hits take precedence over expiry for both kinds.
pub fn resolve(store: &EntityStore, bounds: ArenaBounds, boxes: HitBoxes) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut claimed: BTreeSet<ProjectileId> = BTreeSet::new();
    let mut hit_targets: BTreeSet<TargetId> = BTreeSet::new();

    for target in store.targets() {
        let hit = store
            .projectiles()
            .filter(|p| !claimed.contains(&p.id))
            .find(|p| overlaps(p, target, boxes));

        if let Some(projectile) = hit {
            claimed.insert(projectile.id);
            hit_targets.insert(target.id);
            report.hits.push(Hit {
                target: target.id,
                projectile: projectile.id,
                scorer: projectile.owner,
            });
        }
    }

    report.expired_projectiles = store
        .projectiles()
        .filter(|p| !claimed.contains(&p.id) && p.y > bounds.height)
        .map(|p| p.id)
        .collect();

    report.expired_targets = store
        .targets()
        .filter(|t| !hit_targets.contains(&t.id) && t.y < 0.0)
        .map(|t| t.id)
        .collect();

    report
}

fn overlaps(p: &Projectile, t: &Target, boxes: HitBoxes) -> bool {
    p.x < t.x + boxes.target_size
        && t.x < p.x + boxes.projectile_width
        && p.y < t.y + boxes.target_size
        && t.y < p.y + boxes.projectile_height
}
