//! The demo's scenes.

mod arena;
mod menu;

pub use arena::ArenaScene;
pub use menu::MenuScene;

use slotforge_scene::SceneConfig;

/// Every scene the runner knows about, each lasting `frames_per_scene` frames.
pub fn all(frames_per_scene: u64) -> Vec<SceneConfig> {
    vec![
        SceneConfig::new("menu", MenuScene::new(frames_per_scene)),
        SceneConfig::new("main", ArenaScene::new(frames_per_scene)),
    ]
}
