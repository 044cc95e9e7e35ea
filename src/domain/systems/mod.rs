// Per-kind simulation systems, dispatched from the world step.

pub mod bullet;
pub mod player;
