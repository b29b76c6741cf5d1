// Per-tick simulation systems. Each one works on plain data owned by the round.

pub mod collision;
pub mod entity_store;
pub mod movement;
pub mod physics;
pub mod scoring;
