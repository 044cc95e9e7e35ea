/// Gameplay tuning for bullets.

#[derive(Debug, Clone, Copy)]
pub struct BulletTuning {
    /// Horizontal speed in pixels per logic step; sign follows the shooter's
    /// facing at spawn.
    pub speed: f32,

    /// Damage dealt to the recorded target on contact.
    pub damage: i32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            speed: 20.0,
            damage: 25,
        }
    }
}
