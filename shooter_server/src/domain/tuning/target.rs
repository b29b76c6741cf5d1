/// Gameplay tuning for falling targets.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetTuning {
    /// Downward speed in world units per reference tick.
    pub speed: f32,

    /// Edge length of the square hit box.
    pub size: f32,

    /// Height at which new targets appear.
    pub spawn_height: f32,

    /// Keep spawned targets at least this far from the side walls.
    pub spawn_margin: f32,

    /// Live target population restored at the end of every tick.
    pub min_count: usize,
}

impl Default for TargetTuning {
    fn default() -> Self {
        Self {
            speed: 1.0,
            size: 20.0,
            spawn_height: 350.0,
            spawn_margin: 50.0,
            min_count: 2,
        }
    }
}
