use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mayhem_physics::PlayerInput;

/// Stick deflection (in raw axis units) ignored to absorb drift.
pub const STICK_DEAD_ZONE: i32 = 8_000;
/// Full-scale raw axis magnitude.
pub const STICK_RANGE: f64 = 32_768.0;
/// Acceleration at full deflection, and for a held direction key.
pub const RUN_ACCELERATION: f64 = 160.0;

/// Round to `figures` significant decimal digits. Zero and non-finite values
/// are returned unchanged.
pub fn round_to_significant_figures(value: f64, figures: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let shift = figures - value.abs().log10().ceil() as i32;
    // Always scale by an exact power of ten, never by a fraction like 0.1.
    if shift >= 0 {
        let magnitude = 10f64.powi(shift);
        (value * magnitude).round() / magnitude
    } else {
        let magnitude = 10f64.powi(-shift);
        (value / magnitude).round() * magnitude
    }
}

/// Map a raw left-stick x axis to a horizontal acceleration.
pub fn stick_acceleration(axis_x: i16) -> f64 {
    if i32::from(axis_x).abs() > STICK_DEAD_ZONE {
        round_to_significant_figures(f64::from(axis_x) / STICK_RANGE * RUN_ACCELERATION, 2)
    } else {
        0.0
    }
}

/// One poll of a game controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerSample {
    pub axis_x: i16,
    pub jump_button: bool,
}

/// One poll of the keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardSample {
    pub left: bool,
    pub right: bool,
    pub jump_key: bool,
}

/// Turns held-button state into single press events.
#[derive(Debug, Clone, Copy, Default)]
pub struct JumpEdge {
    held: bool,
}

impl JumpEdge {
    /// Feed the current button state; true only on the poll it goes down.
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.held;
        self.held = down;
        pressed
    }
}

/// Per-device input state for one player.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputMapper {
    jump: JumpEdge,
}

impl InputMapper {
    pub fn from_controller(&mut self, sample: ControllerSample) -> PlayerInput {
        PlayerInput {
            acceleration: stick_acceleration(sample.axis_x),
            jump: self.jump.update(sample.jump_button),
        }
    }

    /// Left wins when both keys are held. Releasing both stops acceleration.
    pub fn from_keyboard(&mut self, sample: KeyboardSample) -> PlayerInput {
        let acceleration = if sample.left {
            -RUN_ACCELERATION
        } else if sample.right {
            RUN_ACCELERATION
        } else {
            0.0
        };
        PlayerInput {
            acceleration,
            jump: self.jump.update(sample.jump_key),
        }
    }
}

/// Chance per tick that a bot presses jump.
const BOT_JUMP_CHANCE: f64 = 0.03;

/// Deterministic pseudo-player that wiggles a virtual stick.
#[derive(Debug, Clone)]
pub struct BotDriver {
    rng: StdRng,
    mapper: InputMapper,
    axis_x: i16,
    hold_ticks: u32,
}

impl BotDriver {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            mapper: InputMapper::default(),
            axis_x: 0,
            hold_ticks: 0,
        }
    }

    pub fn next_input(&mut self) -> PlayerInput {
        if self.hold_ticks == 0 {
            self.axis_x = self.rng.random_range(i16::MIN..=i16::MAX);
            self.hold_ticks = self.rng.random_range(10..60);
        }
        self.hold_ticks -= 1;
        let jump_button = self.rng.random_bool(BOT_JUMP_CHANCE);
        self.mapper.from_controller(ControllerSample {
            axis_x: self.axis_x,
            jump_button,
        })
    }
}
