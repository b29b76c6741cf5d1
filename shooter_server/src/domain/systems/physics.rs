use crate::domain::systems::entity_store::EntityStore;

/// Integrates every projectile and target for one tick.
///
/// Velocities are expressed per `reference_tick`, so a `dt` of exactly one
/// reference tick moves each entity by its velocity. Nothing is clamped or
/// removed here; boundary exits are the collision resolver's job.
pub fn advance(store: &mut EntityStore, dt: f32, reference_tick: f32) {
    let steps = dt / reference_tick;

    for p in store.projectiles_mut() {
        p.y += p.vy * steps;
    }

    for t in store.targets_mut() {
        t.y += t.vy * steps;
    }
}
