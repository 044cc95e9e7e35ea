// One match: the world, its tick gate and the lifecycle phase.

use std::time::Instant;

use tracing::info;

use crate::domain::state::{EntityKind, EntitySnapshot};
use crate::domain::tick::TickGate;
use crate::domain::visual::VisualRequest;
use crate::domain::world::{HealthWrite, World};
use crate::use_cases::types::{MatchEvent, MatchPhase, WorldUpdate};

pub struct MatchSession {
    world: World,
    gate: TickGate,
    phase: MatchPhase,
    frames: u64,
}

impl MatchSession {
    pub fn new(world: World, now: Instant) -> Self {
        Self {
            world,
            gate: TickGate::at_step_rate(now),
            phase: MatchPhase::Starting,
            frames: 0,
        }
    }

    pub fn apply(&mut self, event: MatchEvent) {
        match event {
            MatchEvent::Key(input) => self.world.apply_input(input),
            MatchEvent::AssetReady {
                entity,
                pose,
                width,
                height,
            } => self.world.apply_asset_ready(entity, pose, width, height),
        }
    }

    /// One frame callback: runs at most one gated logic step and reports
    /// whether it did. The caller renders every frame regardless, which keeps
    /// the simulation capped at the step rate while display rates vary.
    pub fn frame(&mut self, now: Instant) -> bool {
        self.frames += 1;
        let stepped = self.gate.should_tick(now);
        if stepped {
            self.gate.reset(now);
            self.world.step();
            self.advance_phase();
        }
        stepped
    }

    fn advance_phase(&mut self) {
        if matches!(self.phase, MatchPhase::Ended { .. }) {
            return;
        }
        let mut fighters = self
            .world
            .entities()
            .filter(|e| matches!(e.kind, EntityKind::Player(_)));
        let first = fighters.next().map(|e| e.id);
        let several = fighters.next().is_some();

        self.phase = if first.is_some() && several {
            MatchPhase::Running
        } else {
            info!(winner = ?first, tick = self.world.tick(), "match decided");
            MatchPhase::Ended { winner: first }
        };
    }

    pub fn snapshot(&self) -> WorldUpdate {
        WorldUpdate {
            tick: self.world.tick(),
            entities: self.world.entities().map(EntitySnapshot::from).collect(),
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn take_visual_requests(&mut self) -> Vec<VisualRequest> {
        self.world.take_visual_requests()
    }

    pub fn take_health_writes(&mut self) -> Vec<HealthWrite> {
        self.world.take_health_writes()
    }
}
