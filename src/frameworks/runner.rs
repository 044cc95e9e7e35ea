// Framework bootstrap and the frame-loop driver for a headless demo match.

use std::io::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Notify, mpsc};
use tracing::{debug, info};

use crate::domain::input::InputEvent;
use crate::domain::state::{EntityKind, PlayerState};
use crate::domain::world::{ArenaBounds, World};
use crate::frameworks::config;
use crate::interface_adapters::assets::{AssetProvider, AssetPump, CatalogAssets, DiskAssets};
use crate::interface_adapters::lifebar::{HealthSink, LogHealthSink};
use crate::interface_adapters::render::{NullSurface, render_world};
use crate::use_cases::session::MatchSession;
use crate::use_cases::types::{MatchEvent, MatchPhase};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Builds the standard duel: backdrop, banner, ground and two fighters.
pub fn build_world() -> World {
    let bounds = ArenaBounds {
        width: config::arena_width(),
        height: config::arena_height(),
    };
    let mut world = World::new(bounds);

    world.spawn("background", 0.0, 0.0, EntityKind::Background);
    world.spawn(
        "vs",
        bounds.width / 2.0 - 60.0,
        bounds.height * 0.7,
        EntityKind::Background,
    );
    world.spawn("ground", 0.0, 0.0, EntityKind::Ground);
    world.spawn(
        "soldier/idle",
        bounds.width * 0.1,
        0.0,
        EntityKind::Player(PlayerState::new(
            "soldier",
            config::left_player_mapping(),
            true,
        )),
    );
    world.spawn(
        "dragonoid/idle",
        bounds.width * 0.8,
        0.0,
        EntityKind::Player(PlayerState::new(
            "dragonoid",
            config::right_player_mapping(),
            false,
        )),
    );
    world
}

/// Built-in sprite dimension table used when no sprite directory is
/// configured.
pub fn default_catalog() -> CatalogAssets {
    let mut catalog = CatalogAssets::new();
    catalog.insert("background", 784.0, 400.0);
    catalog.insert("vs", 120.0, 84.0);
    catalog.insert("ground", 784.0, 80.0);
    for character in ["soldier", "dragonoid"] {
        for pose in ["idle", "forward", "backward", "jump", "fall", "shoot"] {
            catalog.insert(&format!("{character}/{pose}"), 60.0, 110.0);
        }
        catalog.insert(&format!("{character}/crouch"), 60.0, 60.0);
        catalog.insert(&format!("{character}/bullet"), 24.0, 12.0);
    }
    catalog
}

/// Scripted attract-mode inputs: the dragonoid closes the distance while the
/// soldier fires on cooldown. Ends when the match loop drops the receiver.
async fn demo_script(tx: mpsc::Sender<InputEvent>) {
    let press = |key: &str| InputEvent::Pressed(key.to_string());
    let release = |key: &str| InputEvent::Released(key.to_string());

    if tx.send(press("q")).await.is_err() {
        return;
    }
    // First volley while the challenger is still closing in.
    if tx.send(press("Control")).await.is_err() {
        return;
    }
    tokio::time::sleep(Duration::from_millis(60)).await;
    if tx.send(release("Control")).await.is_err() {
        return;
    }
    tokio::time::sleep(Duration::from_millis(340)).await;
    // Stop the approach inside the firing line, then shoot on cooldown.
    if tx.send(release("q")).await.is_err() {
        return;
    }
    loop {
        if tx.send(press("Control")).await.is_err() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(60)).await;
        if tx.send(release("Control")).await.is_err() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(340)).await;
    }
}

/// Drives frame callbacks at the display rate until the match ends, the time
/// limit passes, or shutdown is requested. Every frame drains input, pumps
/// assets, runs at most one logic step and renders.
pub async fn run(mut events: mpsc::Receiver<InputEvent>, shutdown: Arc<Notify>) -> Result<()> {
    let mut session = MatchSession::new(build_world(), Instant::now());

    let mut provider: Box<dyn AssetProvider + Send> = match config::sprite_dir() {
        Some(dir) => {
            info!(dir = %dir.display(), "loading sprites from disk");
            Box::new(DiskAssets::new(dir))
        }
        None => Box::new(default_catalog()),
    };
    let mut pump = AssetPump::default();
    let mut surface = NullSurface::new(config::arena_width(), config::arena_height());
    let mut lifebars = LogHealthSink;

    let mut frames = tokio::time::interval(Duration::from_secs_f64(
        1.0 / f64::from(config::display_hz()),
    ));
    let time_limit = config::match_time_limit();
    let started = Instant::now();
    info!(
        width = config::arena_width(),
        height = config::arena_height(),
        "match starting"
    );

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!("shutdown requested");
                break;
            }
            _ = frames.tick() => {}
        }

        while let Ok(event) = events.try_recv() {
            session.apply(MatchEvent::Key(event));
        }

        let requests = session.take_visual_requests();
        pump.submit(provider.as_mut(), requests);
        pump.deliver(provider.as_mut(), &mut session);

        let stepped = session.frame(Instant::now());

        for write in session.take_health_writes() {
            lifebars.set_health_percent(write.player, write.percent);
        }

        render_world(session.world(), &mut surface);

        if stepped && session.world().tick() % 60 == 0 {
            match serde_json::to_string(&session.snapshot()) {
                Ok(json) => debug!(%json, "world update"),
                Err(error) => tracing::error!(%error, "snapshot serialization failed"),
            }
        }

        if let MatchPhase::Ended { winner } = session.phase() {
            info!(?winner, tick = session.world().tick(), "match ended");
            break;
        }
        if !time_limit.is_zero() && started.elapsed() >= time_limit {
            info!("match time limit reached");
            break;
        }
    }

    Ok(())
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let (input_tx, input_rx) = mpsc::channel::<InputEvent>(config::INPUT_CHANNEL_CAPACITY);
    let shutdown = Arc::new(Notify::new());

    // The script stands in for DOM key events; it stops once the loop drops
    // the receiver.
    tokio::spawn(demo_script(input_tx));

    run(input_rx, shutdown).await
}
