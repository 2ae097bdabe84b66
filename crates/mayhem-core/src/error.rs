use crate::handle::{DecorationHandle, PlatformHandle, PlayerHandle};

/// A host call referenced an entity that has been destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldError {
    StalePlayer(PlayerHandle),
    StalePlatform(PlatformHandle),
    StaleDecoration(DecorationHandle),
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StalePlayer(h) => write!(f, "player handle {h:?} is no longer valid"),
            Self::StalePlatform(h) => write!(f, "platform handle {h:?} is no longer valid"),
            Self::StaleDecoration(h) => write!(f, "decoration handle {h:?} is no longer valid"),
        }
    }
}

impl std::error::Error for WorldError {}
