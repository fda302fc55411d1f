//! Player character, session-scoped flags and per-step game events

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind};
use super::level::LevelId;
use crate::consts::*;
use crate::horizontal_direction;

/// Chicken collision half extents (the sprite polygon's bounding box)
pub const CHICKEN_HALF_EXTENTS: Vec2 = Vec2::new(2.8, 2.55);

/// The player-controlled chicken
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chicken {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Horizontal walking speed held while walking (0 = standing)
    pub walk_speed: f32,
    /// Collected-item score
    pub credits: u32,
    /// Terminal failure
    pub roasted: bool,
    /// Resting on a solid body this step
    #[serde(default)]
    pub grounded: bool,
}

impl Chicken {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            walk_speed: 0.0,
            credits: 0,
            roasted: false,
            grounded: false,
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        CHICKEN_HALF_EXTENTS
    }

    pub fn start_walking(&mut self, speed: f32) {
        self.walk_speed = speed;
        self.vel.x = speed;
    }

    pub fn stop_walking(&mut self) {
        self.walk_speed = 0.0;
        self.vel.x = 0.0;
    }

    /// Jump only when standing on something
    pub fn jump(&mut self, impulse: f32) -> bool {
        if !self.grounded || self.roasted {
            return false;
        }
        self.vel.y = impulse;
        self.grounded = false;
        true
    }

    /// Queen-egg launch: vertical speed replaced, horizontal kept
    pub fn bounce(&mut self) {
        self.vel = Vec2::new(self.vel.x, BOUNCE_SPEED);
        self.grounded = false;
    }

    /// Current horizontal direction of motion
    pub fn direction(&self) -> Vec2 {
        horizontal_direction(self.vel)
    }

    pub fn add_credits(&mut self, amount: u32) {
        self.credits += amount;
    }

    pub fn roast(&mut self) {
        self.roasted = true;
        self.walk_speed = 0.0;
    }
}

/// Flags that outlive a single level.
///
/// Owned by the session and threaded into each level; whether a reset clears
/// them is a session setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFlags {
    pub water_collected: bool,
    pub reward_collected: bool,
}

/// Sound cue attached to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Chirp,
    Cheer,
}

/// Why the chicken was roasted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoastCause {
    Fire,
    TimeUp,
}

/// Something that happened during a simulation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A credit-bearing item was collected
    Collected { kind: EntityKind, credits: u32 },
    /// The water bucket was picked up
    WaterCollected,
    /// A fire burned an egg
    EggBurned { id: EntityId },
    /// A fire absorbed a water hit without going out
    HazardHit { id: EntityId, hits: u8 },
    /// A fire was put out
    HazardExtinguished { id: EntityId, kind: EntityKind },
    /// The golden egg appeared
    RewardSpawned { pos: Vec2 },
    /// The chicken reached the level exit
    ReachedExit { level: LevelId },
    /// The chicken was roasted and the level stopped
    Roasted { cause: RoastCause },
    /// The golden egg was collected
    Won,
}

impl GameEvent {
    /// Sound cue to play for this event (if any)
    pub fn cue(&self) -> Option<Cue> {
        match self {
            GameEvent::Collected {
                kind: EntityKind::Egg,
                ..
            } => Some(Cue::Chirp),
            GameEvent::Collected { .. }
            | GameEvent::WaterCollected
            | GameEvent::HazardExtinguished { .. }
            | GameEvent::ReachedExit { .. }
            | GameEvent::Won => Some(Cue::Cheer),
            GameEvent::EggBurned { .. }
            | GameEvent::HazardHit { .. }
            | GameEvent::RewardSpawned { .. }
            | GameEvent::Roasted { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounce_keeps_horizontal() {
        let mut chicken = Chicken::new(Vec2::ZERO);
        chicken.start_walking(-WALK_SPEED);
        chicken.vel.y = -4.0;
        chicken.bounce();
        assert_eq!(chicken.vel, Vec2::new(-WALK_SPEED, BOUNCE_SPEED));
    }

    #[test]
    fn test_jump_needs_ground() {
        let mut chicken = Chicken::new(Vec2::ZERO);
        assert!(!chicken.jump(JUMP_IMPULSE));
        chicken.grounded = true;
        assert!(chicken.jump(JUMP_IMPULSE));
        assert_eq!(chicken.vel.y, JUMP_IMPULSE);
        assert!(!chicken.grounded);
    }

    #[test]
    fn test_direction_follows_velocity() {
        let mut chicken = Chicken::new(Vec2::ZERO);
        assert_eq!(chicken.direction(), Vec2::ZERO);
        chicken.start_walking(WALK_SPEED);
        assert_eq!(chicken.direction(), Vec2::X);
        chicken.stop_walking();
        assert_eq!(chicken.direction(), Vec2::ZERO);
    }

    #[test]
    fn test_event_cues() {
        let egg = GameEvent::Collected {
            kind: EntityKind::Egg,
            credits: 1,
        };
        let queen = GameEvent::Collected {
            kind: EntityKind::QueenEgg,
            credits: 2,
        };
        assert_eq!(egg.cue(), Some(Cue::Chirp));
        assert_eq!(queen.cue(), Some(Cue::Cheer));
        assert_eq!(GameEvent::Won.cue(), Some(Cue::Cheer));
        assert_eq!(
            GameEvent::Roasted {
                cause: RoastCause::Fire
            }
            .cue(),
            None
        );
    }
}
