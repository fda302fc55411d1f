//! Fixed timestep simulation tick
//!
//! Advances one level by one step: walking, hazard motion, body integration, solid
//! contacts, the fire handlers, the chicken's contacts and the countdown.

use glam::Vec2;

use super::collision::{
    HazardEffect, PlayerEffect, box_box_collision, cancel_into_surface, resolve_hazard_contact,
    resolve_player_contact,
};
use super::entity::{BodyType, EntityId, EntityKind};
use super::level::Level;
use super::state::{GameEvent, RoastCause, SessionFlags};
use super::timer::CountdownStep;
use crate::boxes_overlap;
use crate::consts::*;

/// Advance the level by one fixed timestep.
///
/// Returns what happened, in order. Does nothing while the level is stopped.
pub fn tick(level: &mut Level, flags: &mut SessionFlags, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !level.is_running() {
        return events;
    }

    // Walking holds horizontal speed
    let chicken = &mut level.chicken;
    if chicken.walk_speed != 0.0 {
        chicken.vel.x = chicken.walk_speed;
    }

    // Hazard motion
    let water = flags.water_collected;
    for entity in level.entities_mut() {
        entity.motion.step(&mut entity.pos, water, dt);
    }

    // Integrate falling bodies and the chicken against solids
    let solids: Vec<(Vec2, Vec2)> = level
        .entities()
        .iter()
        .filter(|e| e.spec().solid)
        .map(|e| (e.pos, e.half_extents))
        .collect();

    for entity in level.entities_mut() {
        let spec = entity.spec();
        if spec.body == BodyType::Dynamic && spec.gravity_scale != 0.0 {
            integrate_body(
                &mut entity.pos,
                &mut entity.vel,
                entity.half_extents,
                spec.gravity_scale,
                &solids,
                dt,
            );
        }
    }

    let chicken = &mut level.chicken;
    let half = chicken.half_extents();
    chicken.grounded = integrate_body(&mut chicken.pos, &mut chicken.vel, half, 1.0, &solids, dt);

    // Fire handlers
    run_fire_handlers(level, &mut events);

    // Chicken contacts
    if !run_player_contacts(level, flags, &mut events) {
        return events;
    }

    // Countdown
    let expired = level
        .countdown_mut()
        .is_some_and(|countdown| countdown.advance() == CountdownStep::Expired);
    if expired {
        log::info!("Time's up! The nest burnt down");
        level.roast();
        events.push(GameEvent::Roasted {
            cause: RoastCause::TimeUp,
        });
        return events;
    }

    // Projectiles that left the world
    let lost: Vec<EntityId> = level
        .entities()
        .iter()
        .filter(|e| e.kind == EntityKind::WaterProjectile)
        .filter(|e| e.pos.y < WORLD_FLOOR || e.pos.x.abs() > WORLD_HALF_WIDTH)
        .map(|e| e.id)
        .collect();
    for id in lost {
        level.despawn(id);
    }

    events
}

/// Apply gravity and velocity, then push the body out of any solid.
/// Returns true if the body ended up resting on top of something.
fn integrate_body(
    pos: &mut Vec2,
    vel: &mut Vec2,
    half: Vec2,
    gravity_scale: f32,
    solids: &[(Vec2, Vec2)],
    dt: f32,
) -> bool {
    vel.y += GRAVITY * gravity_scale * dt;
    *pos += *vel * dt;

    let mut grounded = false;
    for &(solid_pos, solid_half) in solids {
        let result = box_box_collision(*pos, half, solid_pos, solid_half);
        if !result.hit {
            continue;
        }
        *pos += result.normal * result.penetration;
        *vel = cancel_into_surface(*vel, result.normal);
        if result.normal.y > 0.0 {
            grounded = true;
        }
    }
    grounded
}

/// Burning hazards destroy eggs and soak up water
fn run_fire_handlers(level: &mut Level, events: &mut Vec<GameEvent>) {
    let mut contacts: Vec<(EntityId, EntityId)> = Vec::new();
    for hazard in level.entities().iter().filter(|e| e.burns) {
        for other in level.entities() {
            if !matches!(other.kind, EntityKind::Egg | EntityKind::WaterProjectile) {
                continue;
            }
            if boxes_overlap(
                hazard.pos,
                hazard.half_extents,
                other.pos,
                other.half_extents,
                CONTACT_SLOP,
            ) {
                contacts.push((hazard.id, other.id));
            }
        }
    }

    for (hazard_id, other_id) in contacts {
        // Either side may already be gone from an earlier contact this step
        let Some(other_kind) = level.entity(other_id).map(|e| e.kind) else {
            continue;
        };
        let Some(effect) = level
            .entity(hazard_id)
            .and_then(|hazard| resolve_hazard_contact(hazard, other_kind))
        else {
            continue;
        };

        match effect {
            HazardEffect::BurnEgg => {
                level.despawn(other_id);
                events.push(GameEvent::EggBurned { id: other_id });
            }
            HazardEffect::AbsorbHit { hits } => {
                level.despawn(other_id);
                if let Some(hazard) = level.entity_mut(hazard_id) {
                    hazard.hits = hits;
                }
                log::debug!("Fire {hazard_id} hit by water ({hits})");
                events.push(GameEvent::HazardHit {
                    id: hazard_id,
                    hits,
                });
            }
            HazardEffect::Extinguish { spawn_reward } => {
                level.despawn(other_id);
                let Some(hazard) = level.despawn(hazard_id) else {
                    continue;
                };
                log::info!("Fire extinguished!");
                events.push(GameEvent::HazardExtinguished {
                    id: hazard_id,
                    kind: hazard.kind,
                });
                if spawn_reward {
                    let pos = Vec2::from(GOLD_EGG_SPAWN);
                    level.spawn(EntityKind::GoldEgg, pos);
                    events.push(GameEvent::RewardSpawned { pos });
                }
            }
        }
    }
}

/// Resolve everything the chicken touches. Returns false if the step must
/// end here (roasted or leaving the level).
fn run_player_contacts(
    level: &mut Level,
    flags: &mut SessionFlags,
    events: &mut Vec<GameEvent>,
) -> bool {
    let chicken_pos = level.chicken.pos;
    let chicken_half = level.chicken.half_extents();
    let touching: Vec<EntityId> = level
        .entities()
        .iter()
        .filter(|e| !e.kind.is_decoration())
        .filter(|e| boxes_overlap(chicken_pos, chicken_half, e.pos, e.half_extents, CONTACT_SLOP))
        .map(|e| e.id)
        .collect();

    for id in touching {
        let Some(kind) = level.entity(id).map(|e| e.kind) else {
            continue;
        };
        let complete = level.is_complete(flags);
        let Some(effect) = resolve_player_contact(kind, level.id(), complete) else {
            continue;
        };

        match effect {
            PlayerEffect::Collect { credits, bounce } => {
                level.despawn(id);
                level.chicken.add_credits(credits);
                if bounce {
                    level.chicken.bounce();
                }
                events.push(GameEvent::Collected { kind, credits });
            }
            PlayerEffect::Roast => {
                log::info!("Oh no! You're cooked! Game over");
                level.roast();
                events.push(GameEvent::Roasted {
                    cause: RoastCause::Fire,
                });
                return false;
            }
            PlayerEffect::Exit => {
                level.stop();
                events.push(GameEvent::ReachedExit { level: level.id() });
                return false;
            }
            PlayerEffect::CollectWater => {
                level.despawn(id);
                flags.water_collected = true;
                log::info!("Water collected!");
                events.push(GameEvent::WaterCollected);
            }
            PlayerEffect::CollectReward => {
                level.despawn(id);
                level.clear_scenery();
                flags.reward_collected = true;
                for x in FIREWORK_XS {
                    level.spawn(EntityKind::Fireworks, Vec2::new(x, FIREWORK_Y));
                }
                log::info!("Gold egg collected! You won!");
                events.push(GameEvent::Won);
            }
        }
    }
    true
}
