//! Scene registry: the fixed, ordered list of stages in the camera journey and
//! the static asset manifest each stage needs.
//!
//! The order is significant. Adjacent scenes are chained by zoom transitions
//! and the overall progress indicator is linear in the scene index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One stage of the journey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SceneId {
    Galaxy,
    SolarSystemApproach,
    SolarSystemRotation,
    EarthApproach,
    Earth,
    Continent,
    City,
    District,
    Room,
}

/// Scene order, first to last.
pub const SCENE_ORDER: [SceneId; 9] = [
    SceneId::Galaxy,
    SceneId::SolarSystemApproach,
    SceneId::SolarSystemRotation,
    SceneId::EarthApproach,
    SceneId::Earth,
    SceneId::Continent,
    SceneId::City,
    SceneId::District,
    SceneId::Room,
];

impl SceneId {
    pub const FIRST: SceneId = SCENE_ORDER[0];
    pub const LAST: SceneId = SCENE_ORDER[SCENE_ORDER.len() - 1];

    /// Position of the scene in [`SCENE_ORDER`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<SceneId> {
        SCENE_ORDER.get(index).copied()
    }

    /// The scene a committed zoom-in hands off to, if any.
    #[inline]
    pub fn next(self) -> Option<SceneId> {
        Self::from_index(self.index() + 1)
    }

    #[inline]
    pub fn prev(self) -> Option<SceneId> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    #[inline]
    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    #[inline]
    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Stable string key, identical to the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            SceneId::Galaxy => "galaxy",
            SceneId::SolarSystemApproach => "solarSystemApproach",
            SceneId::SolarSystemRotation => "solarSystemRotation",
            SceneId::EarthApproach => "earthApproach",
            SceneId::Earth => "earth",
            SceneId::Continent => "continent",
            SceneId::City => "city",
            SceneId::District => "district",
            SceneId::Room => "room",
        }
    }

    pub fn from_key(key: &str) -> Option<SceneId> {
        SCENE_ORDER.iter().copied().find(|s| s.key() == key)
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Assets one scene asks the renderer to preload. Paths are relative to the
/// deployment base URL; join them with [`asset_path`].
#[derive(Clone, Copy, Debug)]
pub struct SceneAssets {
    pub models: &'static [(&'static str, &'static str)],
    pub textures: &'static [(&'static str, &'static str)],
    /// Marker icon shown by the progress indicator.
    pub icon: &'static str,
}

const SOLAR_SYSTEM_TEXTURES: &[(&str, &str)] = &[
    ("disc", "/assets/img/discs/disc.png"),
    ("smoke", "/assets/img/other/smoke.png"),
    ("sun", "/assets/img/planets/sun.jpg"),
    ("mercury", "/assets/img/planets/mercury.jpg"),
    ("venus", "/assets/img/planets/venus.jpg"),
    ("earth", "/assets/img/planets/earth.jpg"),
    ("earthnight", "/assets/img/planets/earthnight.jpg"),
    ("earthclouds", "/assets/img/planets/earthclouds.jpg"),
    ("mars", "/assets/img/planets/mars.jpg"),
    ("jupiter", "/assets/img/planets/jupiter.jpg"),
    ("saturn", "/assets/img/planets/saturn.jpg"),
    ("saturnring", "/assets/img/planets/saturnring.jpg"),
    ("uranus", "/assets/img/planets/uranus.jpg"),
    ("uranusring", "/assets/img/planets/uranusring.jpg"),
    ("neptune", "/assets/img/planets/neptune.jpg"),
];

/// Icon for the pseudo-marker below the last scene (terminal zoomed-in state).
pub const END_MARKER_ICON: &str = "/assets/icons/zoom_progress_indicator/pin.png";
pub const ASTRONAUT_ICON: &str = "/assets/icons/zoom_progress_indicator/astronaut.png";
pub const SUPERHERO_ICON: &str = "/assets/icons/zoom_progress_indicator/superhero.png";
pub const HUMAN_ICON: &str = "/assets/icons/zoom_progress_indicator/human.png";

/// Static asset manifest for `scene`.
pub fn scene_assets(scene: SceneId) -> SceneAssets {
    match scene {
        SceneId::Galaxy => SceneAssets {
            models: &[("galaxy", "/assets/models/galaxy.glb")],
            textures: &[("disc", "/assets/img/discs/disc.png")],
            icon: "/assets/icons/zoom_progress_indicator/galaxy.png",
        },
        SceneId::SolarSystemApproach => SceneAssets {
            models: &[],
            textures: SOLAR_SYSTEM_TEXTURES,
            icon: "/assets/icons/zoom_progress_indicator/space.png",
        },
        SceneId::SolarSystemRotation => SceneAssets {
            models: &[],
            textures: SOLAR_SYSTEM_TEXTURES,
            icon: "/assets/icons/zoom_progress_indicator/solarsystem.png",
        },
        SceneId::EarthApproach => SceneAssets {
            models: &[],
            textures: SOLAR_SYSTEM_TEXTURES,
            icon: "/assets/icons/zoom_progress_indicator/earthapproach.png",
        },
        SceneId::Earth => SceneAssets {
            models: &[],
            textures: SOLAR_SYSTEM_TEXTURES,
            icon: "/assets/icons/zoom_progress_indicator/earth.png",
        },
        SceneId::Continent => SceneAssets {
            models: &[],
            textures: &[("continent", "/assets/img/continent/gcc.jpg")],
            icon: "/assets/icons/zoom_progress_indicator/continent.png",
        },
        SceneId::City => SceneAssets {
            models: &[],
            textures: &[("city", "/assets/img/city/city.jpg")],
            icon: "/assets/icons/zoom_progress_indicator/city.png",
        },
        SceneId::District => SceneAssets {
            models: &[],
            textures: &[("district", "/assets/img/district/dubai.jpg")],
            icon: "/assets/icons/zoom_progress_indicator/district.png",
        },
        SceneId::Room => SceneAssets {
            models: &[
                ("room", "/assets/models/room.glb"),
                ("phone", "/assets/models/phone.glb"),
                ("monitor", "/assets/models/monitor.glb"),
            ],
            textures: &[],
            icon: "/assets/icons/zoom_progress_indicator/room.png",
        },
    }
}

/// Named asset URL, already joined to the base URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetUrl {
    pub name: &'static str,
    pub url: String,
}

/// A scene's manifest with every path resolved against a base URL, ready for
/// the renderer's loaders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAssets {
    pub scene: SceneId,
    pub models: Vec<AssetUrl>,
    pub textures: Vec<AssetUrl>,
    pub icon: String,
}

impl SceneAssets {
    pub fn resolve(&self, scene: SceneId, base_url: &str) -> ResolvedAssets {
        let join = |entries: &[(&'static str, &'static str)]| -> Vec<AssetUrl> {
            entries
                .iter()
                .map(|(name, path)| AssetUrl {
                    name: *name,
                    url: asset_path(base_url, path),
                })
                .collect()
        };
        ResolvedAssets {
            scene,
            models: join(self.models),
            textures: join(self.textures),
            icon: asset_path(base_url, self.icon),
        }
    }
}

/// Join an asset path onto the deployment base URL without doubling slashes.
pub fn asset_path(base_url: &str, path: &str) -> String {
    let base = if base_url.is_empty() { "/" } else { base_url };
    let path = path.strip_prefix('/').unwrap_or(path);
    if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
