use std::path::Path;

use serde::{Deserialize, Serialize};

use mayhem_core::handle::PlayerHandle;
use mayhem_core::visual::{Rgba, Visual};
use mayhem_physics::{MayhemConfig, World};

use crate::error::ScenarioError;

fn enabled() -> bool {
    true
}

/// A static platform in a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub x: i64,
    pub y: i64,
    pub size_x: u32,
    pub size_y: u32,
    #[serde(default = "enabled")]
    pub collides: bool,
    #[serde(default)]
    pub visual: Visual,
}

/// Scenery that physics ignores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationSpec {
    pub x: i64,
    pub y: i64,
    pub size_x: u32,
    pub size_y: u32,
    #[serde(default)]
    pub visual: Visual,
}

/// Who drives a player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    /// Seeded random input every tick.
    #[default]
    Bot,
    /// Only input arriving over the command channel.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSpec {
    pub x: i64,
    pub y: i64,
    pub size_x: u32,
    pub size_y: u32,
    pub velocity_max: f64,
    pub triple_jump: bool,
    pub collides: bool,
    pub control: Control,
    /// Palette colour for the player's slot when unset.
    pub visual: Option<Visual>,
}

impl Default for PlayerSpec {
    fn default() -> Self {
        Self {
            x: 0,
            y: 60_000,
            size_x: 4_000,
            size_y: 6_000,
            velocity_max: 1_200.0,
            triple_jump: false,
            collides: true,
            control: Control::Bot,
            visual: None,
        }
    }
}

/// Arena layout and run parameters for a headless session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Ticks spent in the menu phase before play starts.
    pub menu_ticks: u64,
    /// Stop after this many ticks in total; 0 runs until stopped.
    pub max_ticks: u64,
    /// Base seed for bot input.
    pub seed: u64,
    pub platforms: Vec<PlatformSpec>,
    pub decorations: Vec<DecorationSpec>,
    pub players: Vec<PlayerSpec>,
}

impl Default for Scenario {
    fn default() -> Self {
        let platform = |x, y| PlatformSpec {
            x,
            y,
            size_x: 50_000,
            size_y: 20_000,
            collides: true,
            visual: Visual::default(),
        };
        Self {
            menu_ticks: 120,
            max_ticks: 3_600,
            seed: 0,
            platforms: vec![platform(100_000, 1_500), platform(65_000, 35_000)],
            decorations: Vec::new(),
            players: (0..4)
                .map(|i| PlayerSpec {
                    x: 70_000 + i * 12_000,
                    ..PlayerSpec::default()
                })
                .collect(),
        }
    }
}

/// A created player and how it is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSlot {
    pub handle: PlayerHandle,
    pub control: Control,
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ScenarioError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Build a world from this scenario. Slots are returned in player order.
    pub fn build_world(
        &self,
        config: MayhemConfig,
    ) -> Result<(World, Vec<PlayerSlot>), ScenarioError> {
        let mut world = World::with_config(config);

        for spec in &self.platforms {
            let handle =
                world.create_platform(spec.x, spec.y, spec.size_x, spec.size_y, spec.visual);
            if spec.collides {
                world.enable_platform_collisions(handle)?;
            }
        }

        for spec in &self.decorations {
            world.create_decoration(spec.x, spec.y, spec.size_x, spec.size_y, spec.visual);
        }

        let mut slots = Vec::with_capacity(self.players.len());
        for (i, spec) in self.players.iter().enumerate() {
            let visual = spec.visual.unwrap_or(Visual::Solid(Rgba::for_slot(i)));
            let handle = world.create_player(
                spec.x,
                spec.y,
                spec.size_x,
                spec.size_y,
                spec.velocity_max,
                visual,
            );
            world.set_triple_jump(handle, spec.triple_jump)?;
            if spec.collides {
                world.enable_player_collisions(handle)?;
            }
            slots.push(PlayerSlot {
                handle,
                control: spec.control,
            });
        }

        tracing::debug!(
            platforms = self.platforms.len(),
            decorations = self.decorations.len(),
            players = slots.len(),
            "Scenario built"
        );
        Ok((world, slots))
    }
}
