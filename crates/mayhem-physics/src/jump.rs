use mayhem_core::entity::Player;

use crate::config::PhysicsConfig;

/// Start the next jump stage, if the player has one left.
///
/// The first jump only sets the impulse; the second (and the third, with
/// `triple_jump`) also cancel the current vertical velocity. The counter is
/// bumped on every request so extra presses mid-air are absorbed.
pub fn request_jump(player: &mut Player, config: &PhysicsConfig) {
    let [first, second, third] = config.jump_impulses;
    match player.jump_number {
        0 => {
            player.jump_acceleration = first;
        },
        1 => {
            player.vertical_velocity = 0.0;
            player.jump_acceleration = second;
        },
        2 if player.triple_jump => {
            player.vertical_velocity = 0.0;
            player.jump_acceleration = third;
        },
        _ => {},
    }
    player.jump_number = player.jump_number.saturating_add(1);
}
