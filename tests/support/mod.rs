// Shared fixture: a two-fighter world driven through the session, the asset
// pump and a synthetic clock, one logic step at a time.
#![allow(dead_code)]

use std::time::Instant;

use duel_arena::domain::state::{Entity, EntityId, EntityKind, PlayerState};
use duel_arena::domain::tick::STEP_INTERVAL;
use duel_arena::domain::tuning::PlayerTuning;
use duel_arena::domain::world::{ArenaBounds, World};
use duel_arena::domain::{InputEvent, KeyMapping};
use duel_arena::frameworks::runner::default_catalog;
use duel_arena::interface_adapters::assets::{AssetPump, CatalogAssets};
use duel_arena::use_cases::{MatchEvent, MatchSession};

pub const ARENA_WIDTH: f32 = 784.0;
pub const ARENA_HEIGHT: f32 = 400.0;

// Dimensions from the default catalog.
pub const PLAYER_WIDTH: f32 = 60.0;
pub const PLAYER_HEIGHT: f32 = 110.0;
pub const FLOOR: f32 = 40.0;

pub fn left_mapping() -> KeyMapping {
    KeyMapping {
        left: "ArrowLeft".to_string(),
        right: "ArrowRight".to_string(),
        jump: "ArrowUp".to_string(),
        crouch: "ArrowDown".to_string(),
        shoot: "Control".to_string(),
    }
}

pub fn right_mapping() -> KeyMapping {
    KeyMapping {
        left: "q".to_string(),
        right: "d".to_string(),
        jump: "z".to_string(),
        crouch: "s".to_string(),
        shoot: " ".to_string(),
    }
}

pub struct Duel {
    pub session: MatchSession,
    pub assets: CatalogAssets,
    pub pump: AssetPump,
    pub soldier: EntityId,
    pub dragonoid: EntityId,
    now: Instant,
}

impl Duel {
    pub fn new() -> Self {
        Self::with_positions(80.0, 620.0)
    }

    pub fn with_positions(soldier_x: f32, dragonoid_x: f32) -> Self {
        Self::build(soldier_x, dragonoid_x, PlayerTuning::default())
    }

    /// Duel where the soldier carries custom tuning (e.g. a faster reload).
    pub fn with_soldier_tuning(tuning: PlayerTuning) -> Self {
        Self::build(80.0, 620.0, tuning)
    }

    fn build(soldier_x: f32, dragonoid_x: f32, soldier_tuning: PlayerTuning) -> Self {
        let mut world = World::new(ArenaBounds {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        });
        world.spawn("ground", 0.0, 0.0, EntityKind::Ground);
        let soldier = world.spawn(
            "soldier/idle",
            soldier_x,
            FLOOR,
            EntityKind::Player(
                PlayerState::new("soldier", left_mapping(), true).with_tuning(soldier_tuning),
            ),
        );
        let dragonoid = world.spawn(
            "dragonoid/idle",
            dragonoid_x,
            FLOOR,
            EntityKind::Player(PlayerState::new("dragonoid", right_mapping(), false)),
        );

        let now = Instant::now();
        let mut duel = Duel {
            session: MatchSession::new(world, now),
            assets: default_catalog(),
            pump: AssetPump::default(),
            soldier,
            dragonoid,
            now,
        };
        // Resolve the initial sprite loads so bounding boxes are in place
        // before the first step.
        duel.pump_assets();
        duel
    }

    /// Submits queued sprite loads and applies whatever completed.
    pub fn pump_assets(&mut self) {
        let requests = self.session.take_visual_requests();
        self.pump.submit(&mut self.assets, requests);
        self.pump.deliver(&mut self.assets, &mut self.session);
    }

    pub fn press(&mut self, key: &str) {
        self.session
            .apply(MatchEvent::Key(InputEvent::Pressed(key.to_string())));
    }

    pub fn release(&mut self, key: &str) {
        self.session
            .apply(MatchEvent::Key(InputEvent::Released(key.to_string())));
    }

    /// Advances the synthetic clock one step interval and runs the frame
    /// callback, then lets pending sprite swaps land, as a render pass would.
    pub fn step(&mut self) {
        assert!(self.step_without_assets());
        self.pump_assets();
    }

    pub fn step_n(&mut self, count: usize) {
        for _ in 0..count {
            self.step();
        }
    }

    /// A frame with no asset delivery, for exercising in-flight swaps.
    pub fn step_without_assets(&mut self) -> bool {
        self.now += STEP_INTERVAL;
        self.session.frame(self.now)
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        self.session.world().get(id).expect("entity should be live")
    }

    pub fn player(&self, id: EntityId) -> &PlayerState {
        self.entity(id).player().expect("entity should be a player")
    }

    pub fn health(&self, id: EntityId) -> i32 {
        self.player(id).health
    }

    pub fn bullets(&self) -> Vec<EntityId> {
        self.session
            .world()
            .entities()
            .filter(|e| matches!(e.kind, EntityKind::Bullet(_)))
            .map(|e| e.id)
            .collect()
    }

    /// Direct state access for test setup (teleports, handicaps).
    pub fn world_mut(&mut self) -> &mut World {
        self.session.world_mut()
    }
}
