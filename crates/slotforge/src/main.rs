//! Slotforge - headless scene runner.
//!
//! Loads `slotforge.toml` (or defaults), builds the storage template with
//! every game component registered, and steps the menu and arena scenes for
//! a fixed number of frames.

mod components;
mod config;
mod scenes;

use anyhow::{Context, Result};
use slotforge_core::StorageEngine;
use slotforge_scene::SceneDirector;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::{AppConfig, CONFIG_FILE};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Starting Slotforge v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_or_default(CONFIG_FILE)?;

    let mut template =
        StorageEngine::from_config(&config.pool).context("invalid pool configuration")?;
    components::register_all(&mut template);

    let mut director = SceneDirector::new(scenes::all(config.director.frames_per_scene), template)?;
    let switches = director.run(&config.director.start_scene, config.director.max_frames)?;

    info!(
        frames = config.director.max_frames,
        switches, "Slotforge shutdown complete"
    );
    Ok(())
}
