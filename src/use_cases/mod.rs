// Use cases layer: match orchestration over the domain simulation.

pub mod session;
pub mod types;

pub use session::MatchSession;
pub use types::{MatchEvent, MatchPhase, WorldUpdate};
