use serde::{Deserialize, Serialize};

use crate::visual::{Rgba, Visual};

/// Nominal world width in world units.
pub const WORLD_WIDTH: i64 = 192_000;
/// Nominal world height in world units.
pub const WORLD_HEIGHT: i64 = 108_000;
/// Downward acceleration applied to new players every tick.
pub const DEFAULT_GRAVITY_ACCELERATION: f64 = -60.0;
/// Most negative vertical velocity a new player may reach.
pub const DEFAULT_TERMINAL_VELOCITY: f64 = -5000.0;

/// Axis-aligned box anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub size_x: u32,
    pub size_y: u32,
}

impl Rect {
    pub fn new(x: i64, y: i64, size_x: u32, size_y: u32) -> Self {
        Self {
            x,
            y,
            size_x,
            size_y,
        }
    }

    pub fn right(&self) -> i64 {
        self.x + i64::from(self.size_x)
    }

    pub fn top(&self) -> i64 {
        self.y + i64::from(self.size_y)
    }

    /// Strict overlap on both axes; touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.top()
            && self.top() > other.y
    }

    /// Width of the horizontal intersection, negative when disjoint.
    pub fn overlap_x(&self, other: &Rect) -> i64 {
        self.right().min(other.right()) - self.x.max(other.x)
    }

    /// Centre point, using integer halves of the size.
    pub fn center(&self) -> (i64, i64) {
        (
            self.x + i64::from(self.size_x / 2),
            self.y + i64::from(self.size_y / 2),
        )
    }
}

/// A dynamic actor driven by input, gravity and collisions.
///
/// Positions are integer world units; velocities and accelerations are
/// per-tick floating point values applied with truncation toward zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: i64,
    pub y: i64,
    pub size_x: u32,
    pub size_y: u32,
    /// Position at the end of the previous tick, written only by the tick itself.
    pub x_before: i64,
    pub y_before: i64,

    /// Horizontal acceleration requested by input, read every tick.
    pub acceleration: f64,
    pub velocity: f64,
    /// Horizontal speed limit (applies to both directions).
    pub velocity_max: f64,
    /// Extra horizontal velocity from knockback; decays on its own.
    pub collision_velocity: f64,

    pub gravity_acceleration: f64,
    /// Decaying upward impulse from the most recent jump.
    pub jump_acceleration: f64,
    pub vertical_velocity: f64,
    /// Most negative vertical velocity allowed.
    pub terminal_velocity: f64,

    /// 0 when grounded; incremented by every jump request.
    pub jump_number: u32,
    pub triple_jump: bool,

    pub visual: Visual,
}

impl Player {
    pub fn new(x: i64, y: i64, size_x: u32, size_y: u32, velocity_max: f64) -> Self {
        Self {
            x,
            y,
            size_x,
            size_y,
            x_before: x,
            y_before: y,
            acceleration: 0.0,
            velocity: 0.0,
            velocity_max,
            collision_velocity: 0.0,
            gravity_acceleration: DEFAULT_GRAVITY_ACCELERATION,
            jump_acceleration: 0.0,
            vertical_velocity: 0.0,
            terminal_velocity: DEFAULT_TERMINAL_VELOCITY,
            jump_number: 0,
            triple_jump: false,
            visual: Visual::Solid(Rgba::RED),
        }
    }

    pub fn with_visual(mut self, visual: Visual) -> Self {
        self.visual = visual;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size_x, self.size_y)
    }

    pub fn right(&self) -> i64 {
        self.x + i64::from(self.size_x)
    }

    pub fn top(&self) -> i64 {
        self.y + i64::from(self.size_y)
    }

    /// Record the current position as the previous-tick position.
    pub fn commit_position(&mut self) {
        self.x_before = self.x;
        self.y_before = self.y;
    }
}

/// A static obstacle. Geometry is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    rect: Rect,
    visual: Visual,
}

impl Platform {
    pub fn new(x: i64, y: i64, size_x: u32, size_y: u32, visual: Visual) -> Self {
        Self {
            rect: Rect::new(x, y, size_x, size_y),
            visual,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn visual(&self) -> Visual {
        self.visual
    }
}

/// Background or foreground scenery. Physics never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub rect: Rect,
    pub visual: Visual,
}

impl Decoration {
    pub fn new(x: i64, y: i64, size_x: u32, size_y: u32, visual: Visual) -> Self {
        Self {
            rect: Rect::new(x, y, size_x, size_y),
            visual,
        }
    }
}
