// Domain-level entity state and snapshot types.

use serde::Serialize;

use crate::domain::input::KeyMapping;
use crate::domain::tuning::PlayerTuning;
use crate::domain::visual::Pose;

pub type EntityId = u64;

/// Axis-aligned bounding box, y measured from the arena floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    /// True iff both the horizontal and vertical intervals strictly overlap.
    /// Touching edges do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x + self.width > other.x
            && self.x < other.x + other.width
            && self.y + self.height > other.y
            && self.y < other.y + other.height
    }
}

/// A live game object tracked by the world registry.
///
/// `width`/`height` come from the visual asset and stay zero until the first
/// asset-ready event lands; `ready` gates rendering until then.
#[derive(Debug)]
pub struct Entity {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Asset id currently shown for this entity, e.g. "soldier/idle".
    pub visual: String,
    pub ready: bool,
    pub kind: EntityKind,
    pub(crate) dead: bool,
}

impl Entity {
    pub fn aabb(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn collides(&self, other: &Entity) -> bool {
        self.aabb().overlaps(&other.aabb())
    }

    pub fn player(&self) -> Option<&PlayerState> {
        match &self.kind {
            EntityKind::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.kind {
            EntityKind::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            EntityKind::Background => "background",
            EntityKind::Ground => "ground",
            EntityKind::Player(_) => "player",
            EntityKind::Bullet(_) => "bullet",
        }
    }
}

/// Closed set of entity behaviours; dispatch is by match, not subclassing.
#[derive(Debug)]
pub enum EntityKind {
    /// Static decor (backdrop, banner); rendered, never updated.
    Background,
    /// The floor entity players stand on.
    Ground,
    Player(PlayerState),
    Bullet(BulletState),
}

/// Per-player simulation state.
///
/// Lock, reload and invulnerability windows are integer tick countdowns,
/// decremented once per logic step.
#[derive(Debug)]
pub struct PlayerState {
    /// Character directory the pose sprites live under, e.g. "soldier".
    pub character: String,
    pub mapping: KeyMapping,
    pub face_right: bool,
    pub tuning: PlayerTuning,

    pub health: i32,
    pub speed: f32,
    pub jumping: bool,
    pub jump_count: u32,
    pub crouching: bool,
    /// Armed melee charge; set to 1 when crouch engages, spent on contact.
    pub crouch_hits: u8,

    pub lock_ticks: u32,
    pub reload_ticks: u32,
    pub invuln_ticks: u32,
    /// Edge guard for the shoot key; cleared on release, not by timers.
    pub trigger_held: bool,

    // Lazily resolved registry references, cached after the first lookup.
    pub opponent: Option<EntityId>,
    pub ground: Option<EntityId>,

    /// Most recently requested pose.
    pub pose: Pose,
    /// Pose the bounding box and visual currently reflect.
    pub shown_pose: Pose,
    /// At most one sprite load may be pending per entity.
    pub swap_in_flight: bool,
}

impl PlayerState {
    pub fn new(character: &str, mapping: KeyMapping, face_right: bool) -> Self {
        let tuning = PlayerTuning::default();
        Self {
            character: character.to_string(),
            mapping,
            face_right,
            health: tuning.max_health,
            tuning,
            speed: 0.0,
            jumping: false,
            jump_count: 0,
            crouching: false,
            crouch_hits: 0,
            lock_ticks: 0,
            reload_ticks: 0,
            invuln_ticks: 0,
            trigger_held: false,
            opponent: None,
            ground: None,
            pose: Pose::Idle,
            shown_pose: Pose::Idle,
            // The spawn queues the initial idle sprite load.
            swap_in_flight: true,
        }
    }

    pub fn with_tuning(mut self, tuning: PlayerTuning) -> Self {
        self.health = tuning.max_health;
        self.tuning = tuning;
        self
    }

    pub fn locked(&self) -> bool {
        self.lock_ticks > 0
    }

    pub fn asset_for(&self, pose: Pose) -> String {
        format!("{}/{}", self.character, pose.sprite_name())
    }

    /// Record a pose request and return the asset to load, if a load should
    /// start now. Requesting the current pose is a no-op; while a swap is in
    /// flight the request only retargets it (the completion path chains the
    /// next load, so the latest request wins).
    pub fn request_pose(&mut self, pose: Pose) -> Option<String> {
        if self.pose == pose {
            return None;
        }
        self.pose = pose;
        if self.swap_in_flight {
            return None;
        }
        self.swap_in_flight = true;
        Some(self.asset_for(pose))
    }
}

/// Kinematic projectile state; velocity is fixed at spawn from the owner's
/// facing direction.
#[derive(Debug, Clone, Copy)]
pub struct BulletState {
    pub vx: f32,
    pub damage: i32,
    /// The only entity this bullet can hurt, recorded at spawn.
    pub target: Option<EntityId>,
}

/// Per-entity world snapshot for logging and export.
#[derive(Debug, Clone, Serialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub kind: &'static str,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub visual: String,
    pub health: Option<i32>,
}

impl From<&Entity> for EntitySnapshot {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind_name(),
            x: entity.x,
            y: entity.y,
            width: entity.width,
            height: entity.height,
            visual: entity.visual.clone(),
            health: entity.player().map(|p| p.health),
        }
    }
}
