// Fighter logic: one call per player per logic step, plus the edge-triggered
// shot. Stage order matters and mirrors the combat rules: movement, jump,
// crouch, melee, boundary clamps, then timer countdowns.

use tracing::debug;

use crate::domain::state::{BulletState, Entity, EntityId, EntityKind};
use crate::domain::visual::Pose;
use crate::domain::world::World;

pub fn step(world: &mut World, id: EntityId) {
    let arena = world.bounds();

    // Held keys under this player's mapping.
    let Some((left, right, jump_held, crouch_held)) =
        world.get(id).and_then(Entity::player).map(|p| {
            (
                world.input().held(&p.mapping.left),
                world.input().held(&p.mapping.right),
                world.input().held(&p.mapping.jump),
                world.input().held(&p.mapping.crouch),
            )
        })
    else {
        return;
    };

    // Resolve the opponent and the ground lazily; both are cached once found
    // and retried every step until then.
    let opponent = match world.get(id).and_then(Entity::player).and_then(|p| p.opponent) {
        Some(found) => Some(found),
        None => {
            let found = world
                .find(|e| e.id != id && matches!(e.kind, EntityKind::Player(_)))
                .map(|e| e.id);
            if let Some(player) = world.get_mut(id).and_then(Entity::player_mut) {
                player.opponent = found;
            }
            found
        }
    };
    let ground = match world.get(id).and_then(Entity::player).and_then(|p| p.ground) {
        Some(found) => Some(found),
        None => {
            let found = world
                .find(|e| matches!(e.kind, EntityKind::Ground))
                .map(|e| e.id);
            if let Some(player) = world.get_mut(id).and_then(Entity::player_mut) {
                player.ground = found;
            }
            found
        }
    };
    let floor = ground
        .and_then(|g| world.get(g))
        .map(|g| g.height / 2.0)
        .unwrap_or(0.0);

    let direction = match (left, right) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    };

    let mut loads: Vec<(String, Pose)> = Vec::new();
    {
        let Some(entity) = world.get_mut(id) else {
            return;
        };
        let Entity { x, y, kind, .. } = entity;
        let EntityKind::Player(player) = kind else {
            return;
        };

        // Horizontal movement. Acceleration and stance poses are suppressed
        // while locked, airborne or crouched, but residual speed still
        // decays and moves the fighter.
        let mut accel = 0.0;
        if !player.locked() && !player.jumping && !player.crouching {
            let pose = if direction == 0.0 {
                Pose::Idle
            } else if (direction > 0.0) == player.face_right {
                Pose::Forward
            } else {
                Pose::Backward
            };
            if let Some(asset) = player.request_pose(pose) {
                loads.push((asset, pose));
            }
            accel = direction * player.tuning.accel;
        }

        let mut speed = player.speed + accel;
        if player.crouching {
            speed *= player.tuning.crouch_drag;
        } else if accel == 0.0 && !player.jumping {
            speed *= player.tuning.idle_friction;
        }
        player.speed = speed.clamp(-player.tuning.max_speed, player.tuning.max_speed);
        *x += player.speed;

        // Jump start: a small upward nudge, then the arc takes over.
        if jump_held && !player.locked() && !player.jumping && !player.crouching {
            player.jumping = true;
            player.jump_count = 0;
            *y += 1.0;
            if let Some(asset) = player.request_pose(Pose::Jump) {
                loads.push((asset, Pose::Jump));
            }
        }

        // Jump arc: ease-out rise for ten steps, mirrored accelerating fall,
        // then the jump ends. The counter advances every step while airborne.
        if player.jumping {
            if player.jump_count < 10 {
                if let Some(asset) = player.request_pose(Pose::Jump) {
                    loads.push((asset, Pose::Jump));
                }
                *y += ((10 - player.jump_count) as f32).powf(player.tuning.jump_strength);
            } else if player.jump_count <= 20 {
                if let Some(asset) = player.request_pose(Pose::Fall) {
                    loads.push((asset, Pose::Fall));
                }
                *y -= ((player.jump_count - 10) as f32).powf(player.tuning.jump_strength);
            } else {
                player.jumping = false;
            }
            player.jump_count += 1;
        }

        // Crouch mirrors the held key unless locked. Engaging arms exactly
        // one melee charge; standing up disarms it.
        if !player.locked() {
            if crouch_held && !player.crouching {
                player.crouch_hits = 1;
            }
            if player.crouching && !crouch_held {
                player.crouch_hits = 0;
            }
            player.crouching = crouch_held;
            if player.crouching {
                if let Some(asset) = player.request_pose(Pose::Crouch) {
                    loads.push((asset, Pose::Crouch));
                }
            }
        }
    }
    for (asset, pose) in loads {
        world.queue_visual(id, asset, Some(pose));
    }

    // Melee: an armed charge connects once against a non-crouching opponent
    // on box overlap, then disarms.
    let armed = world
        .get(id)
        .and_then(Entity::player)
        .is_some_and(|p| p.crouch_hits > 0);
    if let (Some(opponent), true) = (opponent, armed) {
        let connects = world
            .get(id)
            .zip(world.get(opponent))
            .is_some_and(|(me, other)| {
                let other_crouching = other.player().is_some_and(|p| p.crouching);
                !other_crouching && me.collides(other)
            });
        if connects {
            let damage = world
                .get(id)
                .and_then(Entity::player)
                .map(|p| p.tuning.melee_damage)
                .unwrap_or(0);
            if let Some(player) = world.get_mut(id).and_then(Entity::player_mut) {
                player.crouch_hits = 0;
            }
            world.hit(opponent, damage);
        }
    }

    // Boundary clamps and timer countdowns close the step.
    if let Some(entity) = world.get_mut(id) {
        let Entity {
            x,
            y,
            width,
            kind,
            ..
        } = entity;
        let EntityKind::Player(player) = kind else {
            return;
        };

        if *x <= 0.0 {
            *x = 0.0;
            player.speed = 0.0;
        }
        if *x + *width >= arena.width {
            *x = arena.width - *width;
            player.speed = 0.0;
        }
        if *y <= floor {
            *y = floor;
        }

        player.lock_ticks = player.lock_ticks.saturating_sub(1);
        player.reload_ticks = player.reload_ticks.saturating_sub(1);
        player.invuln_ticks = player.invuln_ticks.saturating_sub(1);
    }
}

/// Fires a bullet if the trigger is free and no lock or reload window is
/// open. Called on the shoot key's press edge, not per tick.
pub fn try_shoot(world: &mut World, id: EntityId) {
    let mut pose_load = None;
    let (asset, muzzle_x, muzzle_y, face_right, target) = {
        let Some(entity) = world.get_mut(id) else {
            return;
        };
        let Entity {
            x,
            y,
            width,
            height,
            kind,
            ..
        } = entity;
        let EntityKind::Player(player) = kind else {
            return;
        };
        if player.locked() || player.reload_ticks > 0 || player.trigger_held {
            return;
        }

        if let Some(asset) = player.request_pose(Pose::Shoot) {
            pose_load = Some(asset);
        }
        player.lock_ticks = player.tuning.lock_ticks;
        player.trigger_held = true;
        player.reload_ticks = player.tuning.reload_ticks;

        let muzzle_x = if player.face_right { *x + *width } else { *x };
        let muzzle_y = *y + *height / 2.5;
        (
            format!("{}/bullet", player.character),
            muzzle_x,
            muzzle_y,
            player.face_right,
            player.opponent,
        )
    };
    if let Some(asset) = pose_load {
        world.queue_visual(id, asset, Some(Pose::Shoot));
    }

    let tuning = world.bullet_tuning();
    let vx = if face_right { tuning.speed } else { -tuning.speed };
    let bullet = world.spawn(
        asset,
        muzzle_x,
        muzzle_y,
        EntityKind::Bullet(BulletState {
            vx,
            damage: tuning.damage,
            target,
        }),
    );
    debug!(player = id, bullet, ?target, "bullet fired");
}
