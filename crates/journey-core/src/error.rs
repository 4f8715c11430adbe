use crate::scene::SceneId;
use thiserror::Error;

/// Problems found while loading or validating a [`crate::JourneyConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("friction must lie in (0, 1), got {0}")]
    Friction(f32),

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("image scene {scene} has a zero-sized image ({width}x{height})")]
    EmptyImage {
        scene: SceneId,
        width: u32,
        height: u32,
    },

    #[error("image scene {scene} targets pixel ({x}, {y}) outside a {width}x{height} image")]
    TargetOutsideImage {
        scene: SceneId,
        x: f32,
        y: f32,
        width: u32,
        height: u32,
    },

    #[error("{scene} is not an image scene")]
    NotAnImageScene { scene: SceneId },
}
