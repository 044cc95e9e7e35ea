/// Gameplay tuning for fighters.
///
/// Keep this separate from runtime configuration (display rates, channel
/// sizes, etc.). Timed windows are expressed in logic ticks at 60 Hz.

#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    pub max_health: i32,

    /// Maximum horizontal speed in pixels per logic step.
    pub max_speed: f32,

    /// Horizontal acceleration applied per step while a direction is held.
    pub accel: f32,

    /// Exponent shaping the jump arc; higher values rise and fall harder.
    pub jump_strength: f32,

    /// Speed multiplier per step while crouched.
    pub crouch_drag: f32,

    /// Speed multiplier per step when grounded with no direction held.
    pub idle_friction: f32,

    /// Damage dealt by an armed crouch on contact.
    pub melee_damage: i32,

    /// Action lock after firing, in ticks (~100 ms).
    pub lock_ticks: u32,

    /// Delay before the next shot, in ticks (~300 ms). Per-player so
    /// characters can carry distinct fire rates.
    pub reload_ticks: u32,

    /// Damage immunity window after an accepted hit, in ticks (~200 ms).
    pub invuln_ticks: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            max_speed: 10.0,
            accel: 2.0,
            jump_strength: 1.5,
            crouch_drag: 0.98,
            idle_friction: 0.85,
            melee_damage: 10,
            lock_ticks: 6,
            reload_ticks: 18,
            invuln_ticks: 12,
        }
    }
}
