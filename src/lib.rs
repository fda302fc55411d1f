//! Happy Chicken - a three-level side-scrolling chicken platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, hazard motion, contacts, levels)
//! - `session`: Level progression, reset, mute and the character controller
//! - `audio`: Sound cues behind a pluggable sink
//! - `view`: Read-only presentation helpers (camera, HUD text, intros)
//! - `settings`: User configuration

pub mod audio;
pub mod session;
pub mod settings;
pub mod sim;
pub mod view;

pub use session::{ChickenController, GameSession, SessionEvent, SessionSnapshot, Walk};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate the levels were tuned at)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Simulation steps per countdown second
    pub const TICKS_PER_SECOND: u32 = 60;

    /// World gravity (units/s², downward)
    pub const GRAVITY: f32 = -9.8;
    /// Touching bodies count as in contact within this distance
    pub const CONTACT_SLOP: f32 = 0.05;
    /// Projectiles below this height have left the world
    pub const WORLD_FLOOR: f32 = -200.0;
    /// Projectiles beyond this horizontal distance have left the world
    pub const WORLD_HALF_WIDTH: f32 = 150.0;

    /// Character movement
    pub const WALK_SPEED: f32 = 8.0;
    pub const JUMP_IMPULSE: f32 = 12.0;
    /// Vertical speed imposed by a queen egg
    pub const BOUNCE_SPEED: f32 = 30.0;

    /// Water projectiles
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const MAX_SHOTS: u32 = 3;

    /// Credits
    pub const EGG_CREDITS: u32 = 1;
    pub const QUEEN_EGG_CREDITS: u32 = 2;

    /// Level 2 rules
    pub const LEVEL2_TIME_LIMIT: u32 = 120;
    pub const LEVEL2_CREDIT_TARGET: u32 = 20;

    /// Hits needed to put out a fire with water
    pub const EXTINGUISH_HITS: u8 = 3;

    /// Hazard motion (units/s at the fixed step)
    pub const MOVING_FIRE_RANGE: f32 = 20.0;
    pub const MOVING_FIRE_SPEED: f32 = 36.0;
    pub const LAST_FIRE_SPEED: f32 = 3.0;

    /// Where the golden egg appears once the last fire is out
    pub const GOLD_EGG_SPAWN: (f32, f32) = (5.0, -107.5);
    /// Where the golden egg sits when the level is built with water already collected
    pub const GOLD_EGG_PRESET: (f32, f32) = (0.0, -107.5);
    /// Celebration fireworks
    pub const FIREWORK_XS: [f32; 3] = [-20.0, 0.0, 20.0];
    pub const FIREWORK_Y: f32 = -99.0;

    /// Camera easing
    pub const CAMERA_EASE_X: f32 = 0.2;
    pub const CAMERA_EASE_Y: f32 = 0.001;
    /// Level 3 camera never looks below the ground
    pub const LEVEL3_CAMERA_FLOOR: f32 = -104.0;
}

/// Horizontal unit direction of a velocity: (1,0), (-1,0) or (0,0) when still
#[inline]
pub fn horizontal_direction(vel: Vec2) -> Vec2 {
    if vel.x > 0.0 {
        Vec2::X
    } else if vel.x < 0.0 {
        Vec2::NEG_X
    } else {
        Vec2::ZERO
    }
}

/// Axis-aligned overlap test between two boxes given by centre and half extents
#[inline]
pub fn boxes_overlap(a_pos: Vec2, a_half: Vec2, b_pos: Vec2, b_half: Vec2, slop: f32) -> bool {
    let d = (a_pos - b_pos).abs();
    d.x <= a_half.x + b_half.x + slop && d.y <= a_half.y + b_half.y + slop
}
