// Use-case level inputs/outputs for the match loop.

use serde::Serialize;

use crate::domain::input::InputEvent;
use crate::domain::state::{EntityId, EntitySnapshot};
use crate::domain::visual::Pose;

/// Everything the outside world can feed into a running match.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    Key(InputEvent),
    /// A sprite finished loading; dimensions are in pixels.
    AssetReady {
        entity: EntityId,
        pose: Option<Pose>,
        width: f32,
        height: f32,
    },
}

/// High-level match lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchPhase {
    Starting,
    Running,
    /// At most one fighter is left; `winner` is `None` on a draw.
    Ended { winner: Option<EntityId> },
}

/// Snapshot of the world for a given tick.
#[derive(Debug, Clone, Serialize)]
pub struct WorldUpdate {
    pub tick: u64,
    pub entities: Vec<EntitySnapshot>,
}
