//! Levels: hand-authored layouts plus win/lose predicates
//!
//! Exactly one level is active at a time. A level owns its chicken, its
//! placed entities and any level-specific state (the level 2 countdown, the
//! level 3 scenery list). Level-specific features are exposed as optional
//! capabilities rather than per-level types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use super::state::{Chicken, SessionFlags};
use super::timer::Countdown;
use crate::consts::*;

/// Which level is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelId {
    One,
    Two,
    Three,
}

impl LevelId {
    /// Following level, or `None` after the last one
    pub fn next(self) -> Option<LevelId> {
        match self {
            LevelId::One => Some(LevelId::Two),
            LevelId::Two => Some(LevelId::Three),
            LevelId::Three => None,
        }
    }

    /// 1-based level number
    pub fn number(self) -> u32 {
        match self {
            LevelId::One => 1,
            LevelId::Two => 2,
            LevelId::Three => 3,
        }
    }

    /// Background image
    pub fn background(self) -> &'static str {
        match self {
            LevelId::One => "data/background1.jpg",
            LevelId::Two => "data/background2.jpg",
            LevelId::Three => "data/background3.jpg",
        }
    }
}

/// A level in play
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    id: LevelId,
    pub chicken: Chicken,
    /// Placed entities, kept sorted by id
    entities: Vec<Entity>,
    /// Destructible scenery cleared by the win celebration
    scenery: Vec<EntityId>,
    /// Only the timed level has one
    countdown: Option<Countdown>,
    /// Simulation is stepping
    running: bool,
    next_id: EntityId,
}

impl Level {
    /// Build a level with its hand-authored layout. The level starts stopped.
    pub fn new(id: LevelId, flags: &SessionFlags) -> Self {
        let mut level = Self {
            id,
            chicken: Chicken::new(Vec2::ZERO),
            entities: Vec::new(),
            scenery: Vec::new(),
            countdown: None,
            running: false,
            next_id: 1,
        };
        match id {
            LevelId::One => level.build_level1(),
            LevelId::Two => level.build_level2(),
            LevelId::Three => level.build_level3(flags),
        }
        log::debug!(
            "Built level {} with {} entities",
            id.number(),
            level.entities.len()
        );
        level
    }

    /// Empty arena with a floor, for scripted scenarios
    #[cfg(test)]
    pub(crate) fn sandbox(id: LevelId) -> Self {
        let mut level = Self {
            id,
            chicken: Chicken::new(Vec2::new(0.0, -7.45)),
            entities: Vec::new(),
            scenery: Vec::new(),
            countdown: (id == LevelId::Two).then(|| Countdown::new(LEVEL2_TIME_LIMIT)),
            running: false,
            next_id: 1,
        };
        level.add_ground(Vec2::new(0.0, -15.0), Vec2::new(100.0, 5.0), "data/grass.jpeg");
        level
    }

    /// Mark an existing entity as destructible scenery
    #[cfg(test)]
    pub(crate) fn push_scenery(&mut self, id: EntityId) {
        self.scenery.push(id);
    }

    pub fn id(&self) -> LevelId {
        self.id
    }

    // === Layouts ===

    fn build_level1(&mut self) {
        self.add_ground(Vec2::new(0.0, -116.0), Vec2::new(30.0, 5.0), "data/grass.jpeg");
        for x in [40.0, -40.0] {
            self.add_border(Vec2::new(x, 0.0), Vec2::new(7.5, 150.0), "data/border1.jpg");
        }

        self.chicken = Chicken::new(Vec2::new(0.0, 110.5));

        for j in 0..10 {
            for i in 0..3 {
                self.add(EntityKind::Egg, -15.0 + 15.0 * i as f32, 100.0 - 20.0 * j as f32);
            }
        }
        for j in 0..10 {
            for i in 0..4 {
                self.add(EntityKind::Egg, -22.0 + 15.0 * i as f32, 90.0 - 20.0 * j as f32);
            }
        }

        for (x, y) in [(-8.0, 90.0), (15.0, 45.0), (0.0, 0.0), (20.0, -40.0), (-14.0, -72.0)] {
            self.add_burning(EntityKind::Fire, x, y);
        }

        for (x, y) in [(0.0, 10.0), (-15.0, -15.0), (15.0, -30.0), (15.0, -74.0)] {
            self.add(EntityKind::QueenEgg, x, y);
        }

        self.add(EntityKind::Nest, 15.0, -108.5);
    }

    fn build_level2(&mut self) {
        self.countdown = Some(Countdown::new(LEVEL2_TIME_LIMIT));

        self.add_ground(Vec2::new(0.0, -125.0), Vec2::new(50.0, 10.0), "data/soil.jpg");
        for x in [48.0, -52.0] {
            self.add_border(Vec2::new(x, -70.0), Vec2::new(4.0, 50.0), "data/border2.jpg");
        }

        self.chicken = Chicken::new(Vec2::new(-34.0, -105.5));

        for i in 0..3 {
            self.grass_and_egg(2.0 - 12.0 * i as f32, -113.0);
        }
        for i in 0..3 {
            self.grass_and_egg(20.0 + 10.0 * i as f32, -110.0 + 5.0 * i as f32);
        }
        for i in 0..2 {
            self.grass_and_egg(28.0 - 10.0 * i as f32, -95.0 + 5.0 * i as f32);
        }
        for i in 0..4 {
            self.grass_and_egg(6.0 - 12.0 * i as f32, -90.0);
        }
        self.grass_and_egg(-42.0, -85.0);

        // Fires here never burn eggs
        for i in 0..2 {
            self.add(EntityKind::Fire, -24.0 * i as f32, -92.0);
        }
        for i in 0..3 {
            self.grass_and_egg(-30.0 + 10.0 * i as f32, -78.0 + 5.0 * i as f32);
        }
        for i in 0..4 {
            self.grass_and_egg(12.0 * i as f32, -63.0);
        }
        self.add(EntityKind::Fire, -14.0, -71.0);
        for i in 0..2 {
            self.add(EntityKind::Fire, 5.5 + 24.0 * i as f32, -64.0);
        }

        self.add(EntityKind::Door, 42.0, -60.0);
    }

    fn build_level3(&mut self, flags: &SessionFlags) {
        self.add_ground(Vec2::new(0.0, -116.0), Vec2::new(30.0, 5.0), "data/grass.jpeg");
        for x in [45.0, -45.0] {
            self.add_border(Vec2::new(x, 0.0), Vec2::new(15.0, 300.0), "data/border1.jpg");
        }

        self.chicken = Chicken::new(Vec2::new(0.0, 115.5));

        // (columns, x0, rows, y0, row step)
        let egg_grids: [(u32, f32, u32, f32, f32); 6] = [
            (3, -15.0, 2, 100.0, 20.0),
            (4, -22.0, 2, 90.0, 20.0),
            (4, -22.0, 4, 40.0, 20.0),
            (3, -15.0, 4, 30.0, 20.0),
            (3, -15.0, 1, -50.0, 20.0),
            (4, -22.0, 2, -60.0, 22.0),
        ];
        for (cols, x0, rows, y0, dy) in egg_grids {
            for j in 0..rows {
                for i in 0..cols {
                    self.add(EntityKind::Egg, x0 + 15.0 * i as f32, y0 - dy * j as f32);
                }
            }
        }

        self.add_burning(EntityKind::Fire, 9.0, 90.0);
        self.add(EntityKind::MovingFire, 0.0, 50.0);
        self.add_burning(EntityKind::Fire, -14.0, 20.0);
        self.add_burning(EntityKind::Fire, 16.0, 0.0);
        self.add(EntityKind::MovingFire, -5.0, -40.0);
        self.add(EntityKind::MovingFire, 5.0, -70.0);
        self.add_burning(EntityKind::LastMovingFire, -10.0, -106.0);

        for i in 0..3 {
            self.add(EntityKind::QueenEgg, -15.0 + 15.0 * i as f32, 60.0);
        }
        for i in 0..4 {
            self.add(EntityKind::QueenEgg, -22.0 + 15.0 * i as f32, -30.0);
        }

        for i in 0..8 {
            let id = self.add(EntityKind::Grass, 27.0 - 6.0 * i as f32, -99.0);
            self.scenery.push(id);
        }

        self.add(EntityKind::WaterBucket, -27.0, -108.8);

        if flags.water_collected {
            let (x, y) = GOLD_EGG_PRESET;
            self.add(EntityKind::GoldEgg, x, y);
        }
    }

    fn grass_and_egg(&mut self, x: f32, y: f32) {
        self.add(EntityKind::Grass, x, y);
        self.add(EntityKind::Egg, x, y + 4.0);
    }

    fn add(&mut self, kind: EntityKind, x: f32, y: f32) -> EntityId {
        self.spawn(kind, Vec2::new(x, y))
    }

    fn add_burning(&mut self, kind: EntityKind, x: f32, y: f32) -> EntityId {
        let id = self.next_entity_id();
        self.entities
            .push(Entity::new(id, kind, Vec2::new(x, y)).burning());
        id
    }

    fn add_ground(&mut self, pos: Vec2, half: Vec2, sprite: &str) {
        let id = self.next_entity_id();
        self.entities.push(
            Entity::new(id, EntityKind::Ground, pos)
                .with_half_extents(half)
                .with_sprite(sprite),
        );
    }

    fn add_border(&mut self, pos: Vec2, half: Vec2, sprite: &str) {
        let id = self.next_entity_id();
        self.entities.push(
            Entity::new(id, EntityKind::Border, pos)
                .with_half_extents(half)
                .with_sprite(sprite),
        );
    }

    // === Entities ===

    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a new entity; ids increase so the list stays sorted
    pub fn spawn(&mut self, kind: EntityKind, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(Entity::new(id, kind, pos));
        id
    }

    /// Launch a water projectile from `origin` along `direction`
    pub fn spawn_projectile(&mut self, origin: Vec2, direction: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(
            Entity::new(id, EntityKind::WaterProjectile, origin)
                .with_velocity(direction * PROJECTILE_SPEED),
        );
        id
    }

    /// Remove an entity from the world
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.binary_search_by_key(&id, |e| e.id).ok()?;
        Some(self.entities.remove(idx))
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|idx| &self.entities[idx])
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let idx = self.entities.binary_search_by_key(&id, |e| e.id).ok()?;
        Some(&mut self.entities[idx])
    }

    /// Number of live entities of a kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// First live entity of a kind
    pub fn find(&self, kind: EntityKind) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind == kind)
    }

    // === Lifecycle ===

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Resume stepping (and the countdown, if any)
    pub fn start(&mut self) {
        if self.chicken.roasted {
            return;
        }
        self.running = true;
        if let Some(countdown) = &mut self.countdown {
            countdown.resume();
        }
    }

    /// Pause stepping (and the countdown, if any)
    pub fn stop(&mut self) {
        self.running = false;
        if let Some(countdown) = &mut self.countdown {
            countdown.pause();
        }
    }

    /// Stop for good: the level is being replaced or has been lost
    pub fn halt(&mut self) {
        self.running = false;
        if let Some(countdown) = &mut self.countdown {
            countdown.stop();
        }
    }

    /// Roast the chicken and stop the level
    pub fn roast(&mut self) {
        self.chicken.roast();
        self.halt();
    }

    // === Predicates ===

    /// Level objective met
    pub fn is_complete(&self, flags: &SessionFlags) -> bool {
        match self.id {
            // Leaving level 1 is driven by touching the nest, not by a predicate
            LevelId::One => false,
            LevelId::Two => self.chicken.credits == LEVEL2_CREDIT_TARGET,
            LevelId::Three => flags.reward_collected,
        }
    }

    /// The chicken has been roasted
    pub fn is_game_over(&self) -> bool {
        self.chicken.roasted
    }

    // === Capabilities ===

    /// Countdown, on timed levels only
    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn countdown_mut(&mut self) -> Option<&mut Countdown> {
        self.countdown.as_mut()
    }

    /// Jumping is only possible where there are platforms to climb
    pub fn jump_enabled(&self) -> bool {
        self.id == LevelId::Two
    }

    /// Scenery removed by the win celebration
    pub fn scenery(&self) -> &[EntityId] {
        &self.scenery
    }

    /// Destroy all destructible scenery
    pub fn clear_scenery(&mut self) {
        let ids = std::mem::take(&mut self.scenery);
        for id in ids {
            self.despawn(id);
        }
    }
}
