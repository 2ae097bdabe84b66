use serde::{Deserialize, Serialize};

use mayhem_core::entity::{
    DEFAULT_GRAVITY_ACCELERATION, DEFAULT_TERMINAL_VELOCITY, WORLD_HEIGHT, WORLD_WIDTH,
};

/// Speed above which horizontal velocity slides down by a fixed amount.
pub const SLIDE_THRESHOLD: f64 = 100.0;
/// Per-tick slide decay above the threshold (how slippery movement is).
pub const SLIDE_DECAY: f64 = 30.0;
/// Horizontal speeds below this snap to zero.
pub const STOP_EPSILON: f64 = 2.0;
/// First, second and third jump impulses.
pub const JUMP_IMPULSES: [f64; 3] = [700.0, 500.0, 450.0];
/// Jump impulses below this snap to zero.
pub const JUMP_IMPULSE_CUTOFF: f64 = 2.0;
/// Fraction of the horizontal overlap used as push-apart force.
pub const SEPARATION_FORCE: f64 = 0.5;
/// Scale on the push-apart force per tick.
pub const SEPARATION_SPEED: f64 = 0.1;
/// Fraction of relative velocity exchanged between overlapping players.
pub const VELOCITY_EXCHANGE: f64 = 0.05;
/// Per-tick decay of knockback velocity for players not in contact.
pub const COLLISION_VELOCITY_DECAY: f64 = 0.9;
/// Knockback velocities below this snap to zero.
pub const COLLISION_VELOCITY_CUTOFF: f64 = 0.1;

/// Tunable physics constants, loadable from TOML.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub slide_threshold: f64,
    pub slide_decay: f64,
    pub stop_epsilon: f64,
    /// Initial gravity for newly created players.
    pub gravity_acceleration: f64,
    /// Initial terminal velocity for newly created players.
    pub terminal_velocity: f64,
    pub jump_impulses: [f64; 3],
    pub jump_impulse_cutoff: f64,
    pub separation_force: f64,
    pub separation_speed: f64,
    pub velocity_exchange: f64,
    pub collision_velocity_decay: f64,
    pub collision_velocity_cutoff: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            slide_threshold: SLIDE_THRESHOLD,
            slide_decay: SLIDE_DECAY,
            stop_epsilon: STOP_EPSILON,
            gravity_acceleration: DEFAULT_GRAVITY_ACCELERATION,
            terminal_velocity: DEFAULT_TERMINAL_VELOCITY,
            jump_impulses: JUMP_IMPULSES,
            jump_impulse_cutoff: JUMP_IMPULSE_CUTOFF,
            separation_force: SEPARATION_FORCE,
            separation_speed: SEPARATION_SPEED,
            velocity_exchange: VELOCITY_EXCHANGE,
            collision_velocity_decay: COLLISION_VELOCITY_DECAY,
            collision_velocity_cutoff: COLLISION_VELOCITY_CUTOFF,
        }
    }
}

/// Camera tracking parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub world_width: i64,
    pub world_height: i64,
    /// Fraction of the remaining distance covered per tick.
    pub follow_rate: f64,
    /// Distance under which the camera jumps straight to its target.
    pub snap_distance: i64,
    /// Players whose previous `y` is at or below this are out of play.
    pub in_play_floor: i64,
    pub magnification: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            follow_rate: 0.01,
            snap_distance: 200,
            in_play_floor: -75_000,
            magnification: 1.0,
        }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MayhemConfig {
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    pub tick_rate_hz: f32,
}

impl Default for MayhemConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            camera: CameraConfig::default(),
            tick_rate_hz: 60.0,
        }
    }
}

impl MayhemConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var("MAYHEM_CONFIG").unwrap_or_else(|_| "config/mayhem.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
