//! Player-vs-platform contact resolution.
//!
//! Instead of computing a time of impact, the resolver compares where the
//! player was at the end of the previous tick with where it is now to decide
//! which platform face was crossed. This is correct as long as a player moves
//! less than the platform's smaller dimension per tick. Faster movement can
//! tunnel: the crossed face may be misclassified or missed entirely, and the
//! player ends up visibly wrong but the simulation keeps running.

use slotmap::SlotMap;

use mayhem_core::entity::{Platform, Player, Rect};
use mayhem_core::handle::{PlatformHandle, PlayerHandle};

/// Which face of a platform a player touched this tick.
///
/// Variants are listed in priority order: when several conditions hold at
/// once (e.g. a corner hit), the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Crossed the top face from above.
    LandedOnTop,
    /// Was exactly on the top face last tick and is sinking into it.
    RestingOnTop,
    /// Crossed the right face moving left.
    HitRightFace,
    /// Flush against the right face last tick.
    RestingOnRightFace,
    /// Crossed the left face moving right.
    HitLeftFace,
    /// Flush against the left face last tick.
    RestingOnLeftFace,
    /// Crossed the bottom face moving up.
    HitBottomFace,
    /// Flush against the bottom face last tick.
    RestingOnBottomFace,
}

/// Classify the contact between a player and a platform, if any.
pub fn classify(player: &Player, platform: &Rect) -> Option<Contact> {
    let top = platform.top();
    let right = platform.right();

    let overlaps_x = player.right() >= platform.x && player.x <= right;
    let within_band = player.y < top && (player.y > platform.y || player.top() > platform.y);
    let prev_right = player.x_before + i64::from(player.size_x);
    let prev_top = player.y_before + i64::from(player.size_y);

    let contact = if player.y < top && player.y_before > top && overlaps_x {
        Contact::LandedOnTop
    } else if overlaps_x && player.y_before == top && player.y < top {
        Contact::RestingOnTop
    } else if player.x < right && player.x_before > right && within_band && player.x > platform.x
    {
        Contact::HitRightFace
    } else if player.x < right && player.x_before == right && within_band && player.x > platform.x
    {
        Contact::RestingOnRightFace
    } else if player.right() > platform.x
        && prev_right < platform.x
        && within_band
        && player.x < platform.x
    {
        Contact::HitLeftFace
    } else if player.right() > platform.x
        && prev_right == platform.x
        && within_band
        && player.x < platform.x
    {
        Contact::RestingOnLeftFace
    } else if overlaps_x && player.top() > platform.y && prev_top < platform.y {
        Contact::HitBottomFace
    } else if overlaps_x && player.top() > platform.y && prev_top == platform.y {
        Contact::RestingOnBottomFace
    } else {
        return None;
    };
    Some(contact)
}

/// Correct a player's position and velocity for a classified contact.
pub fn apply(player: &mut Player, platform: &Rect, contact: Contact) {
    match contact {
        Contact::LandedOnTop => {
            player.y = platform.top();
            if player.vertical_velocity < 0.0 {
                player.vertical_velocity = 0.0;
            }
            player.jump_number = 0;
        },
        Contact::RestingOnTop => {
            player.jump_number = 0;
            if player.vertical_velocity < 0.0 {
                player.vertical_velocity = 0.0;
            }
            player.y = player.y_before;
        },
        Contact::HitRightFace | Contact::RestingOnRightFace => {
            player.x = platform.right();
            if player.velocity < 0.0 {
                player.velocity = 0.0;
            }
        },
        Contact::HitLeftFace | Contact::RestingOnLeftFace => {
            player.x = platform.x - i64::from(player.size_x);
            if player.velocity > 0.0 {
                player.velocity = 0.0;
            }
        },
        Contact::HitBottomFace => {
            player.y = platform.y - i64::from(player.size_y);
            if player.vertical_velocity > 0.0 {
                player.vertical_velocity = 0.0;
            }
        },
        Contact::RestingOnBottomFace => {
            if player.vertical_velocity > 0.0 {
                player.vertical_velocity = 0.0;
            }
            player.y = player.y_before;
        },
    }
}

/// Classify and correct in one step.
pub fn resolve(player: &mut Player, platform: &Rect) -> Option<Contact> {
    let contact = classify(player, platform)?;
    apply(player, platform, contact);
    Some(contact)
}

/// Resolve every registered player against every registered platform.
///
/// Each pair yields at most one correction, and a correction is visible to
/// the player's checks against later platforms in the same tick.
pub fn resolve_platform_collisions(
    players: &mut SlotMap<PlayerHandle, Player>,
    player_order: &[PlayerHandle],
    platforms: &SlotMap<PlatformHandle, Platform>,
    platform_order: &[PlatformHandle],
) {
    for &player_handle in player_order {
        let Some(player) = players.get_mut(player_handle) else {
            continue;
        };
        for &platform_handle in platform_order {
            let Some(platform) = platforms.get(platform_handle) else {
                continue;
            };
            if let Some(contact) = resolve(player, &platform.rect()) {
                tracing::trace!(
                    ?player_handle,
                    ?platform_handle,
                    ?contact,
                    "Resolved platform contact"
                );
            }
        }
    }
}
