use crate::domain::state::{MoveDirection, Player};
use crate::domain::tuning::ArenaBounds;
use crate::domain::tuning::player::PlayerTuning;

/// Moves an avatar one step sideways, keeping it fully inside the arena.
pub fn step_player(player: &mut Player, direction: MoveDirection, cfg: PlayerTuning, arena: ArenaBounds) {
    let max_x = (arena.width - cfg.width).max(0.0);

    player.x = match direction {
        MoveDirection::Left => player.x - cfg.step,
        MoveDirection::Right => player.x + cfg.step,
    };
    player.x = player.x.clamp(0.0, max_x);
}

/// Where a fresh projectile appears: top-centre of the avatar.
pub fn muzzle(player: &Player, cfg: PlayerTuning) -> (f32, f32) {
    (player.x + cfg.width / 2.0, player.y + cfg.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::PlayerSlot;

    fn player_at(x: f32) -> Player {
        Player {
            slot: PlayerSlot::One,
            x,
            y: 10.0,
        }
    }

    #[test]
    fn when_moving_left_at_the_wall_then_position_is_clamped_to_zero() {
        let mut player = player_at(4.0);

        step_player(&mut player, MoveDirection::Left, PlayerTuning::default(), ArenaBounds::default());

        assert_eq!(player.x, 0.0);
    }

    #[test]
    fn when_moving_right_near_the_wall_then_avatar_stays_inside() {
        let mut player = player_at(455.0);

        step_player(&mut player, MoveDirection::Right, PlayerTuning::default(), ArenaBounds::default());

        assert_eq!(player.x, 460.0);
    }

    #[test]
    fn when_moving_in_open_space_then_position_changes_by_one_step() {
        let mut player = player_at(100.0);

        step_player(&mut player, MoveDirection::Right, PlayerTuning::default(), ArenaBounds::default());
        assert_eq!(player.x, 110.0);

        step_player(&mut player, MoveDirection::Left, PlayerTuning::default(), ArenaBounds::default());
        assert_eq!(player.x, 100.0);
    }

    #[test]
    fn when_firing_then_muzzle_is_top_centre_of_avatar() {
        let player = player_at(100.0);

        assert_eq!(muzzle(&player, PlayerTuning::default()), (120.0, 50.0));
    }
}
