// Host-side tests for configuration loading and validation.

use glam::Vec2;
use journey_core::*;

#[test]
fn empty_document_yields_defaults() {
    let config = JourneyConfig::from_json("{}").unwrap();
    assert_eq!(config, JourneyConfig::default());
    assert_eq!(config.images.len(), 3);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_overrides_keep_other_defaults() {
    let json = r#"{
        "physics": { "friction": 0.3 },
        "scenePhysics": { "room": { "touchSensitivity": 0.5 } },
        "thresholds": { "completionSensitivity": 0.02 },
        "device": "mobile",
        "baseUrl": "/portfolio/"
    }"#;
    let config = JourneyConfig::from_json(json).unwrap();
    assert_eq!(config.physics.friction, 0.3);
    assert_eq!(config.physics.acceleration, DEFAULT_ACCELERATION);
    assert_eq!(config.physics_for(SceneId::Room).touch_sensitivity, 0.5);
    assert_eq!(config.physics_for(SceneId::Room).friction, DEFAULT_FRICTION);
    assert_eq!(config.physics_for(SceneId::Earth), config.physics);
    assert_eq!(config.thresholds.forward_threshold(), 0.02);
    assert_eq!(config.device, DeviceProfile::Mobile);
    assert_eq!(config.base_url, "/portfolio/");
}

#[test]
fn image_override_replaces_only_that_scene() {
    let json = r#"{
        "images": {
            "city": { "width": 800, "height": 400, "targetCoords": [400, 100], "targetRepeat": [0.2, 0.2] }
        }
    }"#;
    let config = JourneyConfig::from_json(json).unwrap();
    let city = config.images[&SceneId::City];
    assert_eq!(city.target_uv(), Vec2::new(0.5, 0.25));
    assert_eq!(config.images[&SceneId::Continent], CONTINENT_IMAGE);
    assert_eq!(config.images[&SceneId::District], DISTRICT_IMAGE);
}

#[test]
fn invalid_json_is_a_parse_error() {
    assert!(matches!(
        JourneyConfig::from_json("{ not json"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn friction_outside_unit_interval_is_rejected() {
    for friction in ["0", "1", "1.5", "-0.2"] {
        let json = format!(r#"{{ "physics": {{ "friction": {friction} }} }}"#);
        assert!(
            matches!(JourneyConfig::from_json(&json), Err(ConfigError::Friction(_))),
            "friction {friction}"
        );
    }
}

#[test]
fn non_positive_values_are_named() {
    let json = r#"{ "thresholds": { "zoomedInSensitivityMultiplier": 0 } }"#;
    match JourneyConfig::from_json(json) {
        Err(ConfigError::NonPositive { name, .. }) => {
            assert_eq!(name, "zoomedInSensitivityMultiplier")
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn image_targets_must_lie_inside_the_image() {
    let json = r#"{
        "images": {
            "district": { "width": 100, "height": 100, "targetCoords": [150, 10], "targetRepeat": [0.5, 0.5] }
        }
    }"#;
    assert!(matches!(
        JourneyConfig::from_json(json),
        Err(ConfigError::TargetOutsideImage { scene: SceneId::District, .. })
    ));

    let json = r#"{
        "images": {
            "galaxy": { "width": 100, "height": 100, "targetCoords": [10, 10], "targetRepeat": [0.5, 0.5] }
        }
    }"#;
    assert!(matches!(
        JourneyConfig::from_json(json),
        Err(ConfigError::NotAnImageScene { scene: SceneId::Galaxy })
    ));
}

#[test]
fn zero_sized_image_is_rejected() {
    let mut config = JourneyConfig::default();
    config.images.insert(
        SceneId::City,
        ImageTarget {
            width: 0,
            height: 10,
            target_coords: Vec2::ZERO,
            target_repeat: Vec2::ONE,
        },
    );
    let err = config.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "image scene city has a zero-sized image (0x10)"
    );
}

#[test]
fn device_detection() {
    assert_eq!(DeviceProfile::detect(390.0, true), DeviceProfile::Mobile);
    assert_eq!(DeviceProfile::detect(700.0, false), DeviceProfile::Mobile);
    assert_eq!(DeviceProfile::detect(900.0, true), DeviceProfile::Mobile);
    assert_eq!(DeviceProfile::detect(1440.0, false), DeviceProfile::Desktop);
    assert_eq!(DeviceProfile::detect(1440.0, true), DeviceProfile::Desktop);
    assert_eq!(DeviceProfile::Mobile.default_fov(), MOBILE_FOV);
    assert_eq!(
        JourneyConfig::default().with_device(DeviceProfile::Mobile).device,
        DeviceProfile::Mobile
    );
}

#[test]
fn hysteresis_threshold_is_a_fraction_of_the_full_one() {
    let t = ThresholdTuning::default();
    assert_eq!(t.backward_threshold(false), COMPLETION_SENSITIVITY);
    assert!(t.backward_threshold(true) < t.backward_threshold(false));
    assert!(
        (t.backward_threshold(true) * ZOOMED_IN_SENSITIVITY_MULTIPLIER - COMPLETION_SENSITIVITY)
            .abs()
            < 1e-7
    );
}
