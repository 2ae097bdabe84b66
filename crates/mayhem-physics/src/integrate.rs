use mayhem_core::entity::Player;

use crate::config::PhysicsConfig;

/// Move an integer coordinate by a fractional amount, truncating toward zero.
pub(crate) fn offset(position: i64, delta: f64) -> i64 {
    (position as f64 + delta) as i64
}

/// Advance one player by a single tick on both axes.
///
/// Runs for every player regardless of collision registration and never
/// touches the previous-position snapshot.
pub fn integrate_player(player: &mut Player, config: &PhysicsConfig) {
    integrate_horizontal(player, config);
    integrate_vertical(player, config);
}

fn integrate_horizontal(player: &mut Player, config: &PhysicsConfig) {
    let velocity = decay_horizontal(player.velocity + player.acceleration, config);
    player.velocity = clamp_speed(velocity, player.velocity_max);
    player.x = offset(player.x, player.velocity + player.collision_velocity);
}

/// Slide by a fixed amount at high speed, halve at low speed, stop near zero.
pub(crate) fn decay_horizontal(velocity: f64, config: &PhysicsConfig) -> f64 {
    let decayed = if velocity > config.slide_threshold {
        velocity - config.slide_decay
    } else if velocity > 0.0 {
        velocity / 2.0
    } else if velocity < -config.slide_threshold {
        velocity + config.slide_decay
    } else if velocity < 0.0 {
        velocity / 2.0
    } else {
        velocity
    };

    if decayed.abs() < config.stop_epsilon {
        0.0
    } else {
        decayed
    }
}

fn clamp_speed(velocity: f64, velocity_max: f64) -> f64 {
    if velocity > velocity_max {
        velocity_max
    } else if velocity < -velocity_max {
        -velocity_max
    } else {
        velocity
    }
}

fn integrate_vertical(player: &mut Player, config: &PhysicsConfig) {
    player.vertical_velocity += player.gravity_acceleration + player.jump_acceleration;

    player.jump_acceleration /= 2.0;
    if player.jump_acceleration < config.jump_impulse_cutoff {
        player.jump_acceleration = 0.0;
    }

    // Both values are negative.
    if player.vertical_velocity < player.terminal_velocity {
        player.vertical_velocity = player.terminal_velocity;
    }
    player.y = offset(player.y, player.vertical_velocity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mayhem_core::test_helpers::make_player;

    fn config() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    #[test]
    fn high_speed_slides_by_fixed_amount() {
        assert_eq!(decay_horizontal(500.0, &config()), 470.0);
        assert_eq!(decay_horizontal(-500.0, &config()), -470.0);
    }

    #[test]
    fn low_speed_halves() {
        assert_eq!(decay_horizontal(100.0, &config()), 50.0);
        assert_eq!(decay_horizontal(-60.0, &config()), -30.0);
    }

    #[test]
    fn tiny_speed_snaps_to_zero() {
        assert_eq!(decay_horizontal(3.0, &config()), 0.0);
        assert_eq!(decay_horizontal(-3.5, &config()), 0.0);
        assert_eq!(decay_horizontal(0.0, &config()), 0.0);
    }

    #[test]
    fn held_input_accelerates_until_capped() {
        let mut player = make_player(10_000, 50_000);
        player.velocity_max = 400.0;
        player.acceleration = 160.0;

        integrate_player(&mut player, &config());
        // 0 + 160 -> 130
        assert_eq!(player.velocity, 130.0);
        assert_eq!(player.x, 10_130);

        for _ in 0..10 {
            integrate_player(&mut player, &config());
        }
        assert_eq!(player.velocity, 400.0);
    }

    #[test]
    fn knockback_adds_to_displacement() {
        let mut player = make_player(10_000, 50_000);
        player.collision_velocity = -250.5;
        integrate_player(&mut player, &config());
        assert_eq!(player.velocity, 0.0);
        assert_eq!(player.x, 9_749);
    }

    #[test]
    fn gravity_accumulates_each_tick() {
        let mut player = make_player(0, 50_000);
        integrate_player(&mut player, &config());
        assert_eq!(player.vertical_velocity, -60.0);
        assert_eq!(player.y, 49_940);
        integrate_player(&mut player, &config());
        assert_eq!(player.vertical_velocity, -120.0);
        assert_eq!(player.y, 49_820);
    }

    #[test]
    fn jump_impulse_fades_over_several_ticks() {
        let mut player = make_player(0, 50_000);
        player.jump_acceleration = 700.0;

        integrate_player(&mut player, &config());
        assert_eq!(player.vertical_velocity, 640.0);
        assert_eq!(player.jump_acceleration, 350.0);

        integrate_player(&mut player, &config());
        assert_eq!(player.vertical_velocity, 930.0);
        assert_eq!(player.jump_acceleration, 175.0);

        for _ in 0..10 {
            integrate_player(&mut player, &config());
        }
        assert_eq!(player.jump_acceleration, 0.0);
    }

    #[test]
    fn fall_speed_stops_at_terminal_velocity() {
        let mut player = make_player(0, 100_000);
        player.vertical_velocity = -4_990.0;
        integrate_player(&mut player, &config());
        assert_eq!(player.vertical_velocity, -5_000.0);
        assert_eq!(player.y, 95_000);
    }

    #[test]
    fn previous_position_untouched() {
        let mut player = make_player(1_000, 2_000);
        player.acceleration = 160.0;
        player.jump_acceleration = 700.0;
        integrate_player(&mut player, &config());
        assert_eq!((player.x_before, player.y_before), (1_000, 2_000));
    }

    #[test]
    fn offset_truncates_toward_zero() {
        assert_eq!(offset(100, 2.9), 102);
        assert_eq!(offset(100, -0.5), 99);
        assert_eq!(offset(-100, 0.5), -99);
    }
}
