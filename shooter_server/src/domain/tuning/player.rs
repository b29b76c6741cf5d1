/// Gameplay tuning for the player avatars.
///
/// Keep this separate from runtime/server configuration (tick rates, buffer sizes, etc.).

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    /// Avatar width in world units; bounds horizontal movement.
    pub width: f32,

    /// Avatar height in world units; projectiles spawn at the top edge.
    pub height: f32,

    /// Fixed vertical position of every avatar.
    pub baseline_y: f32,

    /// Horizontal distance covered by one move input.
    pub step: f32,

    /// Starting x for player one.
    pub start_x_one: f32,

    /// Starting x for player two.
    pub start_x_two: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            baseline_y: 10.0,
            step: 10.0,
            start_x_one: 100.0,
            start_x_two: 300.0,
        }
    }
}
