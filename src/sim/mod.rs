//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod level;
pub mod motion;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{
    CollisionResult, HazardEffect, PlayerEffect, box_box_collision, resolve_hazard_contact,
    resolve_player_contact,
};
pub use entity::{BodyType, Entity, EntityId, EntityKind, KindSpec};
pub use level::{Level, LevelId};
pub use motion::HazardMotion;
pub use state::{CHICKEN_HALF_EXTENTS, Chicken, Cue, GameEvent, RoastCause, SessionFlags};
pub use tick::tick;
pub use timer::{Countdown, CountdownState, CountdownStep};
