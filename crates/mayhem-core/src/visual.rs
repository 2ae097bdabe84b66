use serde::{Deserialize, Serialize};

/// RGBA colour used for solid-colour rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Default player colour.
    pub const RED: Rgba = Rgba::opaque(255, 0, 0);
    /// Default platform and decoration colour.
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    /// Per-slot colours for up to eight players.
    pub const PALETTE: &[Rgba] = &[
        Rgba::opaque(120, 100, 240),
        Rgba::opaque(130, 90, 240),
        Rgba::opaque(140, 80, 240),
        Rgba::opaque(150, 70, 240),
        Rgba::opaque(160, 60, 240),
        Rgba::opaque(170, 50, 240),
        Rgba::opaque(180, 40, 240),
        Rgba::opaque(190, 30, 240),
    ];

    /// Palette colour for a player slot, wrapping past the end.
    pub fn for_slot(slot: usize) -> Self {
        Self::PALETTE[slot % Self::PALETTE.len()]
    }
}

/// Extra draw rectangle applied by the renderer around a sprite, in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteOffset {
    pub x: i64,
    pub y: i64,
    pub size_x: i64,
    pub size_y: i64,
}

/// How an entity is drawn. The simulation never interprets this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visual {
    Solid(Rgba),
    /// A texture owned by the renderer, referenced by an opaque id.
    Texture { id: u32, offset: SpriteOffset },
}

impl Default for Visual {
    fn default() -> Self {
        Visual::Solid(Rgba::WHITE)
    }
}
