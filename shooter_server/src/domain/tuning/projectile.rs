/// Gameplay tuning for projectiles.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileTuning {
    /// Upward speed in world units per reference tick.
    pub speed: f32,

    /// Hit box width in world units.
    pub width: f32,

    /// Hit box height in world units.
    pub height: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 5.0,
            width: 5.0,
            height: 15.0,
        }
    }
}
