// Asset provider port and the pump that connects it to a running match.
//
// Providers are memoized by asset id and complete asynchronously relative to
// the simulation: a request drained this frame reports its dimensions on a
// later drain, never inline. Unknown assets simply never complete.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::domain::state::EntityId;
use crate::domain::visual::{Pose, VisualRequest};
use crate::use_cases::session::MatchSession;
use crate::use_cases::types::MatchEvent;

/// A completed sprite load.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetReady {
    pub asset: String,
    pub width: f32,
    pub height: f32,
}

pub trait AssetProvider {
    /// Begin (or re-serve, when memoized) a load for the given asset id.
    fn request(&mut self, asset: &str);

    /// Drain loads that completed since the previous call.
    fn take_ready(&mut self) -> Vec<AssetReady>;
}

/// In-memory provider backed by a fixed dimension table. Requests for known
/// ids complete on the next drain; everything else stalls forever, matching
/// the engine's treatment of load failures.
#[derive(Debug, Default)]
pub struct CatalogAssets {
    dims: HashMap<String, (f32, f32)>,
    ready: Vec<AssetReady>,
}

impl CatalogAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset: &str, width: f32, height: f32) {
        self.dims.insert(asset.to_string(), (width, height));
    }
}

impl AssetProvider for CatalogAssets {
    fn request(&mut self, asset: &str) {
        match self.dims.get(asset) {
            Some(&(width, height)) => self.ready.push(AssetReady {
                asset: asset.to_string(),
                width,
                height,
            }),
            None => warn!(asset, "unknown asset id; load will never complete"),
        }
    }

    fn take_ready(&mut self) -> Vec<AssetReady> {
        std::mem::take(&mut self.ready)
    }
}

/// Provider that reads sprite dimensions from `<root>/<asset>.png`,
/// memoized per id. Decode failures are logged once and the asset stays
/// pending forever.
#[derive(Debug)]
pub struct DiskAssets {
    root: PathBuf,
    cache: HashMap<String, Option<(f32, f32)>>,
    ready: Vec<AssetReady>,
}

impl DiskAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
            ready: Vec::new(),
        }
    }
}

impl AssetProvider for DiskAssets {
    fn request(&mut self, asset: &str) {
        let dims = match self.cache.get(asset) {
            Some(cached) => *cached,
            None => {
                let path = self.root.join(format!("{asset}.png"));
                let loaded = match image::image_dimensions(&path) {
                    Ok((width, height)) => Some((width as f32, height as f32)),
                    Err(error) => {
                        warn!(asset, path = %path.display(), %error, "sprite load failed");
                        None
                    }
                };
                self.cache.insert(asset.to_string(), loaded);
                loaded
            }
        };
        if let Some((width, height)) = dims {
            self.ready.push(AssetReady {
                asset: asset.to_string(),
                width,
                height,
            });
        }
    }

    fn take_ready(&mut self) -> Vec<AssetReady> {
        std::mem::take(&mut self.ready)
    }
}

/// Routes world visual requests into a provider and completed loads back
/// into the match as asset-ready events, keeping the per-asset waiter
/// bookkeeping out of the domain.
#[derive(Debug, Default)]
pub struct AssetPump {
    waiting: HashMap<String, Vec<(EntityId, Option<Pose>)>>,
}

impl AssetPump {
    pub fn submit(&mut self, provider: &mut dyn AssetProvider, requests: Vec<VisualRequest>) {
        for request in requests {
            debug!(entity = request.entity, asset = %request.asset, "visual requested");
            self.waiting
                .entry(request.asset.clone())
                .or_default()
                .push((request.entity, request.pose));
            provider.request(&request.asset);
        }
    }

    pub fn deliver(&mut self, provider: &mut dyn AssetProvider, session: &mut MatchSession) {
        for ready in provider.take_ready() {
            let Some(waiters) = self.waiting.remove(&ready.asset) else {
                continue;
            };
            for (entity, pose) in waiters {
                session.apply(MatchEvent::AssetReady {
                    entity,
                    pose,
                    width: ready.width,
                    height: ready.height,
                });
            }
        }
    }
}
