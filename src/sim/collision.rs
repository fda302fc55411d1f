//! Contact detection and collision resolution
//!
//! Detection is plain box overlap. Resolution maps a contact to exactly one
//! effect based on the other body's kind; the `match` is exhaustive so a new
//! kind cannot be added without deciding what touching it does.

use glam::Vec2;

use super::entity::{Entity, EntityKind};
use super::level::LevelId;
use crate::consts::*;

/// Result of a box-vs-box penetration check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal pointing from the solid toward the mover
    pub normal: Vec2,
    /// Penetration depth along the normal
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Penetration of a moving box into a solid box, resolved along the axis of
/// least overlap
pub fn box_box_collision(
    mover_pos: Vec2,
    mover_half: Vec2,
    solid_pos: Vec2,
    solid_half: Vec2,
) -> CollisionResult {
    let delta = mover_pos - solid_pos;
    let overlap = mover_half + solid_half - delta.abs();
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return CollisionResult::miss();
    }

    if overlap.x < overlap.y {
        let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
        CollisionResult {
            hit: true,
            normal: Vec2::new(sign, 0.0),
            penetration: overlap.x,
        }
    } else {
        let sign = if delta.y < 0.0 { -1.0 } else { 1.0 };
        CollisionResult {
            hit: true,
            normal: Vec2::new(0.0, sign),
            penetration: overlap.y,
        }
    }
}

/// Zero the velocity component driving into the surface
#[inline]
pub fn cancel_into_surface(velocity: Vec2, normal: Vec2) -> Vec2 {
    let into = velocity.dot(normal);
    if into < 0.0 {
        velocity - into * normal
    } else {
        velocity
    }
}

/// What touching an entity does to the character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEffect {
    /// Gain credits and remove the item; queen eggs also launch the chicken
    Collect { credits: u32, bounce: bool },
    /// Terminal failure
    Roast,
    /// Advance to the next level
    Exit,
    /// Remove the bucket and unlock shooting
    CollectWater,
    /// Remove the golden egg and win
    CollectReward,
}

/// Resolve a contact between the chicken and an entity of `kind`
pub fn resolve_player_contact(
    kind: EntityKind,
    level: LevelId,
    level_complete: bool,
) -> Option<PlayerEffect> {
    match kind {
        EntityKind::Egg => Some(PlayerEffect::Collect {
            credits: EGG_CREDITS,
            bounce: false,
        }),
        EntityKind::QueenEgg => Some(PlayerEffect::Collect {
            credits: QUEEN_EGG_CREDITS,
            bounce: true,
        }),
        EntityKind::Fire | EntityKind::MovingFire | EntityKind::LastMovingFire => {
            Some(PlayerEffect::Roast)
        }
        EntityKind::Nest if level == LevelId::One => Some(PlayerEffect::Exit),
        EntityKind::Door if level == LevelId::Two && level_complete => Some(PlayerEffect::Exit),
        EntityKind::WaterBucket => Some(PlayerEffect::CollectWater),
        EntityKind::GoldEgg => Some(PlayerEffect::CollectReward),
        EntityKind::Nest
        | EntityKind::Door
        | EntityKind::WaterProjectile
        | EntityKind::Ground
        | EntityKind::Border
        | EntityKind::Grass
        | EntityKind::Fireworks => None,
    }
}

/// What a burning hazard does to an entity touching it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardEffect {
    /// Destroy the egg
    BurnEgg,
    /// Destroy the projectile; the fire stays lit
    AbsorbHit { hits: u8 },
    /// Destroy the projectile and the fire
    Extinguish { spawn_reward: bool },
}

/// Resolve a contact between a burning hazard and a non-player entity.
///
/// Only hazards that carry the fire handler (`burns`) react at all.
pub fn resolve_hazard_contact(hazard: &Entity, other: EntityKind) -> Option<HazardEffect> {
    if !hazard.burns || !hazard.kind.is_fire() {
        return None;
    }
    match other {
        EntityKind::Egg => Some(HazardEffect::BurnEgg),
        EntityKind::WaterProjectile => {
            let hits = hazard.hits.saturating_add(1);
            if hits < EXTINGUISH_HITS {
                Some(HazardEffect::AbsorbHit { hits })
            } else {
                Some(HazardEffect::Extinguish {
                    spawn_reward: hazard.kind == EntityKind::LastMovingFire,
                })
            }
        }
        _ => None,
    }
}
