use serde::{Deserialize, Serialize};

use mayhem_core::entity::{Player, Rect};

use crate::config::CameraConfig;

/// Camera translation and zoom handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraOffset {
    pub x: i64,
    pub y: i64,
    pub magnification: f64,
}

/// Smoothly follows the midpoint of the players still in play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    x: i64,
    y: i64,
    target_x: i64,
    target_y: i64,
    magnification: f64,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            x: 0,
            y: 0,
            target_x: 0,
            target_y: 0,
            magnification: config.magnification,
        }
    }

    pub fn offset(&self) -> CameraOffset {
        CameraOffset {
            x: self.x,
            y: self.y,
            magnification: self.magnification,
        }
    }

    pub fn target(&self) -> (i64, i64) {
        (self.target_x, self.target_y)
    }

    /// Aim at `midpoint` (centred in the world) and move one tick toward it.
    pub fn track(&mut self, midpoint: (i64, i64), config: &CameraConfig) {
        self.target_x = config.world_width / 2 - midpoint.0;
        self.target_y = config.world_height / 2 - midpoint.1;
        self.x = approach(self.x, self.target_x, config);
        self.y = approach(self.y, self.target_y, config);
    }
}

fn approach(current: i64, target: i64, config: &CameraConfig) -> i64 {
    let next = (current as f64 + (target - current) as f64 * config.follow_rate) as i64;
    if (target - next).abs() < config.snap_distance {
        target
    } else {
        next
    }
}

/// Mean centre of all in-play players, measured at their previous positions.
///
/// Players at or below `in_play_floor` are left out. Returns the origin when
/// no player qualifies.
pub fn midpoint<'a>(
    players: impl IntoIterator<Item = &'a Player>,
    config: &CameraConfig,
) -> (i64, i64) {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut count = 0u32;

    for player in players {
        if player.y_before <= config.in_play_floor {
            continue;
        }
        let previous = Rect::new(player.x_before, player.y_before, player.size_x, player.size_y);
        let (cx, cy) = previous.center();
        sum_x += cx as f64;
        sum_y += cy as f64;
        count += 1;
    }

    if count == 0 {
        return (0, 0);
    }
    let n = f64::from(count);
    ((sum_x / n) as i64, (sum_y / n) as i64)
}

/// Squared distance between two players' positions.
///
/// Computed in floating point: a falling player can end up far enough away
/// that the integer square overflows.
pub fn squared_distance(a: &Player, b: &Player) -> f64 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    dx * dx + dy * dy
}

/// Largest distance between any two players, 0 with fewer than two.
pub fn longest_distance(players: &[&Player]) -> f64 {
    let mut longest = 0.0_f64;
    for (i, a) in players.iter().enumerate() {
        for b in &players[i + 1..] {
            longest = longest.max(squared_distance(a, b).sqrt());
        }
    }
    longest
}
