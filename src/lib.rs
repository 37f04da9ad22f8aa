pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod predict;
pub mod stats;

use db::Database;
use predict::{artifacts::ArtifactStore, gateway::ModelGateway};

/// Shared state handed to every request handler. The database and model
/// handles are cheap clones over `Arc`s; nothing here is per-request.
pub struct AppState {
    pub db: Database,
    pub model: ModelGateway,
    pub artifacts: ArtifactStore,
}
