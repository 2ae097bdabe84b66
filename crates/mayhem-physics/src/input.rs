use serde::{Deserialize, Serialize};

/// One tick of already-mapped input for a single player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Horizontal acceleration, positive to the right.
    pub acceleration: f64,
    /// Rising edge of the jump button.
    pub jump: bool,
}

impl PlayerInput {
    pub fn to_bytes(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec(self)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, rmp_serde::decode::Error> {
        rmp_serde::from_slice(data)
    }
}
