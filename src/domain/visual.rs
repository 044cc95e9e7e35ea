// Pose identifiers and the per-entity visual swap bookkeeping.
//
// Swapping a sprite is asynchronous: a request is queued here, an asset
// provider resolves it on a later frame, and the world applies the resulting
// dimensions when the completion event comes back.

use crate::domain::state::EntityId;

/// Named animation state of a player. Each pose maps to one sprite asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    Idle,
    Forward,
    Backward,
    Jump,
    Fall,
    Crouch,
    Shoot,
}

impl Pose {
    /// Sprite file stem for this pose, joined under the character's directory.
    pub fn sprite_name(self) -> &'static str {
        match self {
            Pose::Idle => "idle",
            Pose::Forward => "forward",
            Pose::Backward => "backward",
            Pose::Jump => "jump",
            Pose::Fall => "fall",
            Pose::Crouch => "crouch",
            Pose::Shoot => "shoot",
        }
    }
}

/// A pending visual load, queued by the world and drained by the asset pump.
///
/// `pose` is set for player pose swaps so the completion event can advance the
/// swap state machine; plain entities (ground, bullets) only need dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualRequest {
    pub entity: EntityId,
    pub asset: String,
    pub pose: Option<Pose>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_names_match_asset_layout() {
        assert_eq!(Pose::Idle.sprite_name(), "idle");
        assert_eq!(Pose::Crouch.sprite_name(), "crouch");
        assert_eq!(Pose::Shoot.sprite_name(), "shoot");
    }
}
