// Lifebar sink port: hits write a visual width percentage per player.

use std::collections::HashMap;

use tracing::info;

use crate::domain::state::EntityId;

pub trait HealthSink {
    fn set_health_percent(&mut self, player: EntityId, percent: f32);
}

/// Reports lifebar changes through the log stream; the headless runner's
/// stand-in for a real HUD.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHealthSink;

impl HealthSink for LogHealthSink {
    fn set_health_percent(&mut self, player: EntityId, percent: f32) {
        info!(player, percent, "lifebar updated");
    }
}

/// Retains the last written percentage per player, for HUD polling.
#[derive(Debug, Default)]
pub struct StoredLifebars {
    bars: HashMap<EntityId, f32>,
}

impl StoredLifebars {
    pub fn percent(&self, player: EntityId) -> Option<f32> {
        self.bars.get(&player).copied()
    }
}

impl HealthSink for StoredLifebars {
    fn set_health_percent(&mut self, player: EntityId, percent: f32) {
        self.bars.insert(player, percent);
    }
}
