use serde::{Deserialize, Serialize};

use mayhem_core::entity::{Decoration, Platform, Player};

use crate::camera::CameraOffset;
use crate::world::Phase;

/// Everything a renderer or spectator needs for one frame.
///
/// Entities are listed in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub phase: Phase,
    pub players: Vec<Player>,
    pub platforms: Vec<Platform>,
    pub decorations: Vec<Decoration>,
    pub camera: CameraOffset,
}

impl WorldSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec(self)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, rmp_serde::decode::Error> {
        rmp_serde::from_slice(data)
    }
}
