// Gameplay tuning, kept separate from runtime configuration.

pub mod bullet;
pub mod player;

pub use bullet::BulletTuning;
pub use player::PlayerTuning;
