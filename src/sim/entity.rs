//! Entity catalog
//!
//! Every object placed in a level is one of a closed set of kinds. Each kind
//! carries a static description of its shape, sprite and behaviour so the
//! rest of the simulation can dispatch on the kind alone.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::HazardMotion;

/// Entity identifier, unique within a level and never reused
pub type EntityId = u32;

/// All object kinds that can appear in a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Egg,
    QueenEgg,
    /// Terminal reward of the last level
    GoldEgg,
    Fire,
    MovingFire,
    /// The fire guarding the golden egg; drifts once water is collected
    LastMovingFire,
    WaterBucket,
    WaterProjectile,
    /// Level 1 exit
    Nest,
    /// Level 2 exit
    Door,
    Ground,
    Border,
    /// Small platform tile
    Grass,
    /// Win decoration
    Fireworks,
}

/// Whether the body is moved by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    Static,
    Dynamic,
}

/// Static description of an entity kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindSpec {
    /// Default collision half extents (circles use their radius on both axes)
    pub half_extents: Vec2,
    /// Sprite asset and its display height in world units
    pub sprite: &'static str,
    pub sprite_height: f32,
    pub body: BodyType,
    pub gravity_scale: f32,
    /// Destroyed on contact with the character
    pub collectible: bool,
    /// Roasts the character on contact
    pub hazard: bool,
    /// Blocks movement
    pub solid: bool,
}

const FIRE_HALF: Vec2 = Vec2::new(6.0, 4.9);

impl EntityKind {
    pub const ALL: [EntityKind; 14] = [
        EntityKind::Egg,
        EntityKind::QueenEgg,
        EntityKind::GoldEgg,
        EntityKind::Fire,
        EntityKind::MovingFire,
        EntityKind::LastMovingFire,
        EntityKind::WaterBucket,
        EntityKind::WaterProjectile,
        EntityKind::Nest,
        EntityKind::Door,
        EntityKind::Ground,
        EntityKind::Border,
        EntityKind::Grass,
        EntityKind::Fireworks,
    ];

    pub fn spec(self) -> KindSpec {
        use EntityKind::*;
        let base = KindSpec {
            half_extents: Vec2::ONE,
            sprite: "",
            sprite_height: 0.0,
            body: BodyType::Static,
            gravity_scale: 0.0,
            collectible: false,
            hazard: false,
            solid: false,
        };
        match self {
            Egg => KindSpec {
                half_extents: Vec2::splat(1.5),
                sprite: "data/egg.png",
                sprite_height: 3.0,
                body: BodyType::Dynamic,
                collectible: true,
                ..base
            },
            QueenEgg => KindSpec {
                half_extents: Vec2::new(1.0, 1.93),
                sprite: "data/queenEgg.png",
                sprite_height: 4.0,
                body: BodyType::Dynamic,
                collectible: true,
                ..base
            },
            GoldEgg => KindSpec {
                half_extents: Vec2::new(2.5, 4.0),
                sprite: "data/goldEgg.png",
                sprite_height: 8.0,
                collectible: true,
                ..base
            },
            Fire => KindSpec {
                half_extents: FIRE_HALF,
                sprite: "data/fire.png",
                sprite_height: 10.0,
                hazard: true,
                ..base
            },
            MovingFire | LastMovingFire => KindSpec {
                half_extents: FIRE_HALF,
                sprite: "data/fire.png",
                sprite_height: 10.0,
                body: BodyType::Dynamic,
                hazard: true,
                ..base
            },
            WaterBucket => KindSpec {
                half_extents: Vec2::splat(2.0),
                sprite: "data/waterBucket.png",
                sprite_height: 4.5,
                collectible: true,
                ..base
            },
            WaterProjectile => KindSpec {
                half_extents: Vec2::splat(2.0),
                sprite: "data/water.png",
                sprite_height: 10.0,
                body: BodyType::Dynamic,
                gravity_scale: 1.0,
                ..base
            },
            Nest => KindSpec {
                half_extents: Vec2::new(5.0, 2.5),
                sprite: "data/chickenNest.png",
                sprite_height: 5.5,
                solid: true,
                ..base
            },
            Door => KindSpec {
                half_extents: Vec2::new(2.5, 6.0),
                sprite: "data/door.png",
                sprite_height: 12.0,
                solid: true,
                ..base
            },
            Ground => KindSpec {
                sprite: "data/grass.jpeg",
                sprite_height: 10.0,
                solid: true,
                ..base
            },
            Border => KindSpec {
                sprite: "data/border1.jpg",
                solid: true,
                ..base
            },
            Grass => KindSpec {
                half_extents: Vec2::new(3.0, 1.5),
                sprite: "data/grass.png",
                sprite_height: 4.0,
                solid: true,
                ..base
            },
            Fireworks => KindSpec {
                half_extents: Vec2::splat(10.0),
                sprite: "data/fireworks.gif",
                sprite_height: 20.0,
                ..base
            },
        }
    }

    /// Decorations never take part in contacts
    pub fn is_decoration(self) -> bool {
        self == EntityKind::Fireworks
    }

    /// Any of the fire kinds
    pub fn is_fire(self) -> bool {
        matches!(
            self,
            EntityKind::Fire | EntityKind::MovingFire | EntityKind::LastMovingFire
        )
    }
}

/// A placed object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub half_extents: Vec2,
    pub motion: HazardMotion,
    /// Carries the fire contact handler (burns eggs, counts water hits)
    #[serde(default)]
    pub burns: bool,
    /// Water hits absorbed so far
    #[serde(default)]
    pub hits: u8,
    /// Sprite override for level-specific scenery
    #[serde(default)]
    pub sprite: Option<String>,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2) -> Self {
        let motion = match kind {
            EntityKind::MovingFire => HazardMotion::oscillate(pos.x),
            EntityKind::LastMovingFire => HazardMotion::drift(),
            _ => HazardMotion::Fixed,
        };
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            half_extents: kind.spec().half_extents,
            motion,
            burns: false,
            hits: 0,
            sprite: None,
        }
    }

    /// Override the collision box (ground, borders)
    pub fn with_half_extents(mut self, half_extents: Vec2) -> Self {
        self.half_extents = half_extents;
        self
    }

    /// Attach the fire contact handler
    pub fn burning(mut self) -> Self {
        self.burns = true;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_sprite(mut self, sprite: &str) -> Self {
        self.sprite = Some(sprite.to_string());
        self
    }

    /// Sprite to draw (override or catalog default)
    pub fn sprite(&self) -> &str {
        self.sprite.as_deref().unwrap_or(self.kind.spec().sprite)
    }

    pub fn spec(&self) -> KindSpec {
        self.kind.spec()
    }
}
