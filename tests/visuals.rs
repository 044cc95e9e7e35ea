mod support;

use support::{Duel, FLOOR, PLAYER_HEIGHT};

use duel_arena::domain::Pose;
use duel_arena::interface_adapters::render::{ARENA_BACKDROP, RenderSurface, render_world};

#[test]
fn pose_swaps_defer_the_bounding_box_until_the_asset_lands() {
    let mut duel = Duel::new();
    let soldier = duel.soldier;

    duel.press("ArrowRight");
    duel.step_without_assets();

    // The request is recorded immediately, the box only once the load lands.
    let player = duel.player(soldier);
    assert_eq!(player.pose, Pose::Forward);
    assert_eq!(player.shown_pose, Pose::Idle);
    assert!(player.swap_in_flight);
    assert_eq!(duel.entity(soldier).height, PLAYER_HEIGHT);

    duel.pump_assets();
    let player = duel.player(soldier);
    assert_eq!(player.shown_pose, Pose::Forward);
    assert!(!player.swap_in_flight);
    assert_eq!(duel.entity(soldier).visual, "soldier/forward");
}

#[test]
fn the_latest_pose_request_wins_with_one_load_in_flight() {
    let mut duel = Duel::new();
    let soldier = duel.soldier;

    duel.press("ArrowRight");
    duel.step_without_assets();
    assert_eq!(duel.player(soldier).pose, Pose::Forward);

    // Retarget while the forward sprite is still loading.
    duel.release("ArrowRight");
    duel.press("ArrowDown");
    duel.step_without_assets();
    assert_eq!(duel.player(soldier).pose, Pose::Crouch);
    assert_eq!(duel.player(soldier).shown_pose, Pose::Idle);

    // The stale load lands first, then chains straight into the crouch.
    duel.pump_assets();
    assert_eq!(duel.player(soldier).shown_pose, Pose::Forward);
    assert!(duel.player(soldier).swap_in_flight);

    duel.pump_assets();
    let player = duel.player(soldier);
    assert_eq!(player.shown_pose, Pose::Crouch);
    assert!(!player.swap_in_flight);
    assert_eq!(duel.entity(soldier).height, 60.0);
}

#[test]
fn left_facing_fighters_stay_anchored_across_crouch_swaps() {
    let mut duel = Duel::new();
    let dragonoid = duel.dragonoid;

    duel.press("s");
    duel.step();
    assert_eq!(duel.player(dragonoid).shown_pose, Pose::Crouch);
    // Entering a crouch pulls the sprite back by half its new width.
    assert_eq!(duel.entity(dragonoid).x, 620.0 - 30.0);
    assert_eq!(duel.entity(dragonoid).height, 60.0);

    duel.release("s");
    // Standing up: the crouch flag clears first, the idle pose lands on the
    // following step's swap.
    duel.step();
    duel.step();
    let entity = duel.entity(dragonoid);
    assert_eq!(duel.player(dragonoid).shown_pose, Pose::Idle);
    assert_eq!(entity.x, 620.0 - 30.0 + 60.0);
    assert_eq!(entity.height, PLAYER_HEIGHT);
}

#[derive(Default)]
struct RecordingSurface {
    clears: Vec<String>,
    draws: Vec<(String, f32, f32)>,
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (784.0, 400.0)
    }

    fn clear(&mut self, color: &str) {
        self.clears.push(color.to_string());
    }

    fn draw_image(&mut self, asset: &str, x: f32, y: f32) {
        self.draws.push((asset.to_string(), x, y));
    }
}

#[test]
fn rendering_clears_and_draws_floor_anchored() {
    let duel = Duel::new();
    let mut surface = RecordingSurface::default();

    render_world(duel.session.world(), &mut surface);

    assert_eq!(surface.clears, vec![ARENA_BACKDROP.to_string()]);
    // Registration order: ground, then both fighters.
    assert_eq!(surface.draws.len(), 3);
    assert_eq!(
        surface.draws[0],
        ("ground".to_string(), 0.0, 400.0 - 80.0)
    );
    assert_eq!(
        surface.draws[1],
        (
            "soldier/idle".to_string(),
            80.0,
            400.0 - PLAYER_HEIGHT - FLOOR
        )
    );
}

#[test]
fn entities_without_dimensions_are_not_drawn() {
    let mut duel = Duel::new();
    duel.step();
    // Fire without letting the bullet sprite resolve.
    duel.press("Control");

    let mut surface = RecordingSurface::default();
    render_world(duel.session.world(), &mut surface);
    assert!(
        surface
            .draws
            .iter()
            .all(|(asset, _, _)| !asset.ends_with("bullet"))
    );
}
