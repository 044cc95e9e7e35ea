// The world owns every live entity and runs the fixed-step simulation over
// them. Entities live in a dense vec (registration order doubles as render
// order) with an id-to-index map for lookups.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::domain::input::{InputEvent, InputState};
use crate::domain::state::{Entity, EntityId, EntityKind};
use crate::domain::systems;
use crate::domain::tuning::BulletTuning;
use crate::domain::visual::{Pose, VisualRequest};

/// Playfield rectangle; y=0 is the floor.
#[derive(Debug, Clone, Copy)]
pub struct ArenaBounds {
    pub width: f32,
    pub height: f32,
}

/// Lifebar update produced by an accepted hit, drained by the UI adapter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthWrite {
    pub player: EntityId,
    pub percent: f32,
}

#[derive(Debug)]
pub struct World {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
    next_id: EntityId,
    bounds: ArenaBounds,
    input: InputState,
    tick: u64,
    bullet_tuning: BulletTuning,
    visual_requests: Vec<VisualRequest>,
    health_writes: Vec<HealthWrite>,
}

impl World {
    pub fn new(bounds: ArenaBounds) -> Self {
        Self {
            entities: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
            bounds,
            input: InputState::default(),
            tick: 0,
            bullet_tuning: BulletTuning::default(),
            visual_requests: Vec::new(),
            health_writes: Vec::new(),
        }
    }

    pub fn bounds(&self) -> ArenaBounds {
        self.bounds
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn bullet_tuning(&self) -> BulletTuning {
        self.bullet_tuning
    }

    /// Registers a new entity and queues its initial sprite load.
    pub fn spawn(&mut self, asset: impl Into<String>, x: f32, y: f32, kind: EntityKind) -> EntityId {
        let asset = asset.into();
        let id = self.next_id;
        self.next_id += 1;

        let pose = match &kind {
            EntityKind::Player(player) => Some(player.pose),
            _ => None,
        };
        self.visual_requests.push(VisualRequest {
            entity: id,
            asset: asset.clone(),
            pose,
        });

        self.index.insert(id, self.entities.len());
        self.entities.push(Entity {
            id,
            x,
            y,
            width: 0.0,
            height: 0.0,
            visual: asset,
            ready: false,
            kind,
            dead: false,
        });
        debug!(entity = id, "entity registered");
        id
    }

    /// Idempotent removal; the entity disappears from lookups immediately and
    /// is swept out of storage at the end of the step.
    pub fn destroy(&mut self, id: EntityId) {
        if let Some(&ix) = self.index.get(&id) {
            self.entities[ix].dead = true;
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index
            .get(&id)
            .map(|&ix| &self.entities[ix])
            .filter(|e| !e.dead)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let ix = *self.index.get(&id)?;
        let entity = &mut self.entities[ix];
        if entity.dead { None } else { Some(entity) }
    }

    /// First live entity matching the predicate, in registration order.
    pub fn find(&self, predicate: impl Fn(&Entity) -> bool) -> Option<&Entity> {
        self.entities().find(|e| predicate(e))
    }

    /// All live entities in registration (and therefore render) order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| !e.dead)
    }

    /// Feeds one input event into the snapshot. Shooting is edge-triggered
    /// here rather than polled per tick; releasing the shoot key only clears
    /// the trigger guard.
    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(key) => {
                self.input.press(&key);
                let shooters: Vec<EntityId> = self
                    .entities()
                    .filter(|e| e.player().is_some_and(|p| p.mapping.shoot == key))
                    .map(|e| e.id)
                    .collect();
                for id in shooters {
                    systems::player::try_shoot(self, id);
                }
            }
            InputEvent::Released(key) => {
                self.input.release(&key);
                for entity in self.entities.iter_mut().filter(|e| !e.dead) {
                    if let EntityKind::Player(player) = &mut entity.kind {
                        if player.mapping.shoot == key {
                            player.trigger_held = false;
                        }
                    }
                }
            }
        }
    }

    /// Applies a completed sprite load: dimensions land on the entity, and a
    /// player swap either settles or chains a load for the pose that was
    /// requested in the meantime.
    pub fn apply_asset_ready(&mut self, id: EntityId, pose: Option<Pose>, width: f32, height: f32) {
        let mut chained: Option<VisualRequest> = None;
        match self.get_mut(id) {
            None => {
                debug!(entity = id, "asset ready for a missing entity; dropped");
                return;
            }
            Some(entity) => {
                entity.width = width;
                entity.height = height;
                entity.ready = true;

                let Entity { x, visual, kind, .. } = entity;
                if let (EntityKind::Player(player), Some(new_pose)) = (kind, pose) {
                    // Left-facing sprites are anchored at their right edge, so
                    // compensate when the box crosses the crouch boundary.
                    if !player.face_right {
                        if player.shown_pose == Pose::Crouch && new_pose != Pose::Crouch {
                            *x += width;
                        } else if player.shown_pose != Pose::Crouch && new_pose == Pose::Crouch {
                            *x -= width / 2.0;
                        }
                    }
                    player.shown_pose = new_pose;
                    *visual = player.asset_for(new_pose);

                    if player.pose != new_pose {
                        // The requested pose moved on while this load was in
                        // flight; start the next one immediately.
                        chained = Some(VisualRequest {
                            entity: id,
                            asset: player.asset_for(player.pose),
                            pose: Some(player.pose),
                        });
                    } else {
                        player.swap_in_flight = false;
                    }
                }
            }
        }
        if let Some(request) = chained {
            self.visual_requests.push(request);
        }
    }

    /// Applies damage to a player unless its invulnerability window is open.
    /// Health is clamped to `[0, max_health]`; reaching zero destroys the
    /// player.
    pub fn hit(&mut self, id: EntityId, amount: i32) {
        let mut write = None;
        let mut defeated = false;
        if let Some(entity) = self.get_mut(id) {
            if let EntityKind::Player(player) = &mut entity.kind {
                if player.invuln_ticks > 0 {
                    return;
                }
                player.invuln_ticks = player.tuning.invuln_ticks;
                player.health = (player.health - amount).clamp(0, player.tuning.max_health);
                write = Some(HealthWrite {
                    player: id,
                    percent: player.health as f32 / player.tuning.max_health as f32 * 100.0,
                });
                defeated = player.health == 0;
                info!(player = id, damage = amount, hp = player.health, "player hit");
            }
        }
        if let Some(write) = write {
            self.health_writes.push(write);
        }
        if defeated {
            info!(player = id, "player defeated");
            self.destroy(id);
        }
    }

    /// Runs one logic step over every live entity, then sweeps destroyed
    /// entities out of storage. Rendering is not touched here.
    pub fn step(&mut self) {
        self.tick += 1;

        enum Dispatch {
            Player,
            Bullet,
        }

        let ids: Vec<EntityId> = self.entities().map(|e| e.id).collect();
        for id in ids {
            let dispatch = match self.get(id).map(|e| &e.kind) {
                Some(EntityKind::Player(_)) => Dispatch::Player,
                Some(EntityKind::Bullet(_)) => Dispatch::Bullet,
                _ => continue,
            };
            match dispatch {
                Dispatch::Player => systems::player::step(self, id),
                Dispatch::Bullet => systems::bullet::step(self, id),
            }
        }

        self.sweep();
    }

    pub(crate) fn queue_visual(&mut self, entity: EntityId, asset: String, pose: Option<Pose>) {
        self.visual_requests.push(VisualRequest {
            entity,
            asset,
            pose,
        });
    }

    /// Drains pending sprite loads for the asset pump.
    pub fn take_visual_requests(&mut self) -> Vec<VisualRequest> {
        std::mem::take(&mut self.visual_requests)
    }

    /// Drains pending lifebar updates for the UI sink.
    pub fn take_health_writes(&mut self) -> Vec<HealthWrite> {
        std::mem::take(&mut self.health_writes)
    }

    fn sweep(&mut self) {
        if self.entities.iter().any(|e| e.dead) {
            self.entities.retain(|e| !e.dead);
            self.index = self
                .entities
                .iter()
                .enumerate()
                .map(|(ix, e)| (e.id, ix))
                .collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input::KeyMapping;
    use crate::domain::state::PlayerState;

    fn mapping() -> KeyMapping {
        KeyMapping {
            left: "a".into(),
            right: "d".into(),
            jump: "w".into(),
            crouch: "s".into(),
            shoot: "f".into(),
        }
    }

    fn arena() -> ArenaBounds {
        ArenaBounds {
            width: 784.0,
            height: 400.0,
        }
    }

    #[test]
    fn spawn_registers_and_destroy_is_idempotent() {
        let mut world = World::new(arena());
        let ground = world.spawn("ground", 0.0, 0.0, EntityKind::Ground);
        let player = world.spawn(
            "soldier/idle",
            10.0,
            0.0,
            EntityKind::Player(PlayerState::new("soldier", mapping(), true)),
        );

        assert!(world.get(ground).is_some());
        assert_eq!(world.entities().count(), 2);
        assert!(
            world
                .find(|e| matches!(e.kind, EntityKind::Player(_)))
                .is_some()
        );

        world.destroy(player);
        world.destroy(player);
        assert!(world.get(player).is_none());
        assert_eq!(world.entities().count(), 1);

        // The sweep at step end reclaims storage.
        world.step();
        assert_eq!(world.entities().count(), 1);
    }

    #[test]
    fn hit_clamps_health_and_destroys_at_zero() {
        let mut world = World::new(arena());
        let player = world.spawn(
            "soldier/idle",
            10.0,
            0.0,
            EntityKind::Player(PlayerState::new("soldier", mapping(), true)),
        );

        world.hit(player, 30);
        assert_eq!(world.get(player).unwrap().player().unwrap().health, 70);

        let writes = world.take_health_writes();
        assert_eq!(writes.len(), 1);
        assert!((writes[0].percent - 70.0).abs() < f32::EPSILON);

        // Overkill damage clamps to zero and removes the player.
        if let Some(p) = world.get_mut(player).and_then(Entity::player_mut) {
            p.invuln_ticks = 0;
        }
        world.hit(player, 999);
        assert!(world.get(player).is_none());
        assert_eq!(world.take_health_writes().last().unwrap().percent, 0.0);
    }

    #[test]
    fn hits_inside_the_invulnerability_window_are_ignored() {
        let mut world = World::new(arena());
        let player = world.spawn(
            "soldier/idle",
            10.0,
            0.0,
            EntityKind::Player(PlayerState::new("soldier", mapping(), true)),
        );

        world.hit(player, 10);
        world.hit(player, 10);
        assert_eq!(world.get(player).unwrap().player().unwrap().health, 90);
        assert_eq!(world.take_health_writes().len(), 1);
    }

    #[test]
    fn asset_ready_for_a_destroyed_entity_is_dropped() {
        let mut world = World::new(arena());
        let player = world.spawn(
            "soldier/idle",
            10.0,
            0.0,
            EntityKind::Player(PlayerState::new("soldier", mapping(), true)),
        );
        world.destroy(player);
        world.apply_asset_ready(player, Some(Pose::Idle), 60.0, 110.0);
        assert!(world.get(player).is_none());
    }
}
