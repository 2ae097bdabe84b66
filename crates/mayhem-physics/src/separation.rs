use slotmap::SlotMap;

use mayhem_core::entity::Player;
use mayhem_core::handle::PlayerHandle;

use crate::config::PhysicsConfig;

/// Soft player-vs-player separation over every ordered pair in `order`.
///
/// Pairs are visited outer index first, in registry order, and each push is
/// applied immediately: later pairs in the same tick see the moved players.
/// Results therefore depend on registration order, and this pass must not be
/// reordered or parallelised.
pub fn separate_players(
    players: &mut SlotMap<PlayerHandle, Player>,
    order: &[PlayerHandle],
    config: &PhysicsConfig,
) {
    for (i, &a) in order.iter().enumerate() {
        let mut in_contact = false;

        for (j, &b) in order.iter().enumerate() {
            if i == j {
                continue;
            }
            let Some([pa, pb]) = players.get_disjoint_mut([a, b]) else {
                continue;
            };
            if !pa.rect().overlaps(&pb.rect()) {
                continue;
            }
            in_contact = true;
            push_apart(pa, pb, config);
        }

        if !in_contact && let Some(player) = players.get_mut(a) {
            decay_collision_velocity(player, config);
        }
    }
}

fn push_apart(a: &mut Player, b: &mut Player, config: &PhysicsConfig) {
    let overlap = a.rect().overlap_x(&b.rect());
    // Whole units, equal on both sides, at least one unit for any overlap.
    let push = (overlap as f64 * config.separation_force * config.separation_speed).ceil() as i64;

    if a.x < b.x {
        a.x -= push;
        b.x += push;
    } else {
        a.x += push;
        b.x -= push;
    }

    let exchange = (a.velocity - b.velocity) * config.velocity_exchange;
    a.velocity = (a.velocity - exchange).clamp(-a.velocity_max.abs(), a.velocity_max.abs());
    b.velocity = (b.velocity + exchange).clamp(-b.velocity_max.abs(), b.velocity_max.abs());
}

fn decay_collision_velocity(player: &mut Player, config: &PhysicsConfig) {
    player.collision_velocity *= config.collision_velocity_decay;
    if player.collision_velocity.abs() < config.collision_velocity_cutoff {
        player.collision_velocity = 0.0;
    }
}
