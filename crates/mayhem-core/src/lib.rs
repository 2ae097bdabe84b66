pub mod entity;
pub mod error;
pub mod handle;
pub mod registry;
pub mod visual;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::entity::{Platform, Player};
    use crate::visual::{Rgba, Visual};

    /// Player width used by test fixtures.
    pub const TEST_PLAYER_WIDTH: u32 = 4_000;
    /// Player height used by test fixtures.
    pub const TEST_PLAYER_HEIGHT: u32 = 6_000;
    /// Speed limit used by test fixtures.
    pub const TEST_VELOCITY_MAX: f64 = 1_200.0;

    /// A default-sized player at rest, previous position equal to current.
    pub fn make_player(x: i64, y: i64) -> Player {
        Player::new(x, y, TEST_PLAYER_WIDTH, TEST_PLAYER_HEIGHT, TEST_VELOCITY_MAX)
    }

    /// Create `n` players spaced far enough apart that they never touch.
    pub fn make_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| {
                make_player(10_000 + i as i64 * 20_000, 50_000)
                    .with_visual(Visual::Solid(Rgba::for_slot(i)))
            })
            .collect()
    }

    /// A wide floor platform whose top surface is at `top`.
    pub fn make_floor(top: i64) -> Platform {
        Platform::new(0, top - 1_000, 192_000, 1_000, Visual::default())
    }
}
