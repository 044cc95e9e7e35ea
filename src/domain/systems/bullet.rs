// Bullet kinematics and collision resolution against the recorded target.

use crate::domain::state::{EntityId, EntityKind};
use crate::domain::world::World;

pub fn step(world: &mut World, id: EntityId) {
    let arena = world.bounds();

    let (bbox, target, damage) = {
        let Some(entity) = world.get_mut(id) else {
            return;
        };
        let EntityKind::Bullet(bullet) = &entity.kind else {
            return;
        };
        let (vx, target, damage) = (bullet.vx, bullet.target, bullet.damage);
        entity.x += vx;
        (entity.aabb(), target, damage)
    };

    if bbox.x < 0.0 || bbox.x + bbox.width > arena.width {
        world.destroy(id);
    }

    // Leaving the arena does not short-circuit the hit check; a bullet that
    // exits while overlapping its target still lands this step.
    if let Some(target) = target {
        let connects = world
            .get(target)
            .is_some_and(|victim| bbox.overlaps(&victim.aabb()));
        if connects {
            world.destroy(id);
            world.hit(target, damage);
        }
    }
}
