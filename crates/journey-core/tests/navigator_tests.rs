// Host-side scenario tests for the navigator: thresholds, hand-offs,
// reversal and the fully zoomed-in end of the journey.

use journey_core::*;
use std::cell::RefCell;
use std::rc::Rc;

const FRAME: f64 = 1.0 / 60.0;
const MAX_FRAMES: usize = 5_000;

struct Driver {
    nav: Navigator,
    now: f64,
}

impl Driver {
    fn new() -> Self {
        Self {
            nav: Navigator::new(JourneyConfig::default()),
            now: 0.0,
        }
    }

    fn tick(&mut self, wheel: f32) -> TickReport {
        self.now += FRAME;
        self.nav.tick(&InputSample::wheel(wheel), self.now)
    }

    /// Scroll with `wheel` every frame until a transition completes.
    fn scroll_until_complete(&mut self, wheel: f32) -> TransitionOutcome {
        for _ in 0..MAX_FRAMES {
            if let Some(outcome) = self.tick(wheel).completed {
                return outcome;
            }
        }
        panic!("no transition completed after {MAX_FRAMES} frames");
    }

    fn scroll_until_transition(&mut self, wheel: f32) -> ActiveTransition {
        for _ in 0..MAX_FRAMES {
            self.tick(wheel);
            if let Some(active) = self.nav.state().active_transition() {
                return active;
            }
        }
        panic!("no transition started after {MAX_FRAMES} frames");
    }

    fn scroll_to_room_zoomed_in(&mut self) {
        while !self.nav.state().terminal_zoomed_in() {
            self.scroll_until_complete(1.0);
        }
    }
}

/// Resting on the room with its own zoom committed.
fn room_zoomed_in() -> NavigationState {
    let mut state = NavigationState::new();
    state.set_current_scene(SceneId::Room);
    state.begin_transition(SceneId::Room, ZoomDirection::In);
    state.end_transition();
    state
}

#[test]
fn threshold_boundary_is_inclusive() {
    let thresholds = ThresholdTuning::default();
    let state = NavigationState::new();
    assert_eq!(
        threshold_decision(COMPLETION_SENSITIVITY, &thresholds, &state),
        ThresholdDecision::Forward(SceneId::Galaxy)
    );
    assert_eq!(
        threshold_decision(COMPLETION_SENSITIVITY - 1e-6, &thresholds, &state),
        ThresholdDecision::Hold
    );
}

#[test]
fn zoomed_in_device_is_left_with_less_progress() {
    let thresholds = ThresholdTuning::default();
    let reduced = COMPLETION_SENSITIVITY / ZOOMED_IN_SENSITIVITY_MULTIPLIER;

    let mut state = room_zoomed_in();
    assert_eq!(
        threshold_decision(-reduced, &thresholds, &state),
        ThresholdDecision::Backward(SceneId::Room)
    );
    assert_eq!(
        threshold_decision(-reduced * 0.9, &thresholds, &state),
        ThresholdDecision::Hold
    );

    // zoomed out, the same progress is not enough
    state.set_scene_zoomed(ZoomStatus::Out);
    assert_eq!(
        threshold_decision(-reduced, &thresholds, &state),
        ThresholdDecision::Hold
    );
    assert_eq!(
        threshold_decision(-COMPLETION_SENSITIVITY, &thresholds, &state),
        ThresholdDecision::Backward(SceneId::District)
    );
}

#[test]
fn journey_ends_are_blocked() {
    let thresholds = ThresholdTuning::default();
    let state = NavigationState::new();
    assert_eq!(
        threshold_decision(-1.0, &thresholds, &state),
        ThresholdDecision::Blocked(ZoomDirection::Out)
    );

    let state = room_zoomed_in();
    assert_eq!(
        threshold_decision(1.0, &thresholds, &state),
        ThresholdDecision::Blocked(ZoomDirection::In)
    );
}

#[test]
fn scrolling_forward_from_galaxy_reaches_solar_system() {
    let mut driver = Driver::new();
    let initial = driver.nav.stage().camera.pose();

    let outcome = driver.scroll_until_complete(1.0);
    assert_eq!(outcome.scene, SceneId::Galaxy);
    assert_eq!(outcome.direction, ZoomDirection::In);
    assert_eq!(driver.nav.state().current_scene(), SceneId::SolarSystemApproach);
    assert_eq!(driver.nav.state().scene_zoomed(), ZoomStatus::In);

    let stored = driver
        .nav
        .state()
        .zoom_out_camera_data(SceneId::Galaxy)
        .expect("galaxy pose recorded");
    assert!(stored.zoomed_in);
    assert_eq!(stored.pose, initial);
    assert_eq!(driver.nav.physics().velocity(), 0.0);
}

#[test]
fn leaving_after_a_forward_hand_off_needs_less_progress() {
    let mut driver = Driver::new();
    driver.scroll_until_complete(1.0);
    let thresholds = driver.nav.config().thresholds;
    let reduced = COMPLETION_SENSITIVITY / ZOOMED_IN_SENSITIVITY_MULTIPLIER;
    assert_eq!(
        threshold_decision(-reduced, &thresholds, driver.nav.state()),
        ThresholdDecision::Backward(SceneId::Galaxy)
    );

    // a gentle scroll back commits well before the full threshold
    let active = driver.scroll_until_transition(-0.05);
    assert_eq!(active.scene, SceneId::Galaxy);
    assert_eq!(active.direction, ZoomDirection::Out);
    let local = driver.nav.rest_local_progress();
    assert!(local <= -reduced && local > -COMPLETION_SENSITIVITY, "{local}");
}

#[test]
fn reversing_a_zoom_out_returns_to_the_next_scene() {
    let mut driver = Driver::new();
    let initial = driver.nav.stage().camera.pose();
    driver.scroll_until_complete(1.0);

    // back out of the solar system until the galaxy zoom is ~40% undone
    for _ in 0..MAX_FRAMES {
        driver.tick(-1.0);
        if driver.nav.transition_progress().is_some_and(|p| p < 0.6) {
            break;
        }
    }
    let active = driver.nav.state().active_transition().expect("zoom out in flight");
    assert_eq!(active.scene, SceneId::Galaxy);
    assert_eq!(active.direction, ZoomDirection::Out);
    assert_eq!(driver.nav.state().current_scene(), SceneId::SolarSystemApproach);

    let outcome = driver.scroll_until_complete(3.0);
    assert_eq!(outcome.scene, SceneId::Galaxy);
    assert_eq!(outcome.direction, ZoomDirection::In);
    assert_eq!(outcome.to, SceneId::SolarSystemApproach);
    let state = driver.nav.state();
    assert_eq!(state.current_scene(), SceneId::SolarSystemApproach);
    assert_eq!(state.scene_zoomed(), ZoomStatus::In);
    let stored = state.zoom_out_camera_data(SceneId::Galaxy).unwrap();
    assert!(stored.zoomed_in);
    assert_eq!(stored.pose, initial);
}

#[test]
fn reversing_mid_transition_keeps_current_scene() {
    let mut driver = Driver::new();
    let initial = driver.nav.stage().camera.pose();

    // scroll until the galaxy zoom is well underway
    for _ in 0..MAX_FRAMES {
        driver.tick(1.0);
        if driver.nav.transition_progress().is_some_and(|p| p > 0.3) {
            break;
        }
    }
    assert_eq!(
        driver.nav.state().active_transition().map(|a| a.direction),
        Some(ZoomDirection::In)
    );

    let outcome = driver.scroll_until_complete(-3.0);
    assert_eq!(outcome.direction, ZoomDirection::Out);
    assert_eq!(driver.nav.state().current_scene(), SceneId::Galaxy);
    assert_eq!(driver.nav.state().scene_zoomed(), ZoomStatus::Out);
    assert!(driver.nav.stage().camera.pose().approx_eq(&initial, 1e-6));
    assert_eq!(
        driver.nav.controller(SceneId::Galaxy).phase(),
        ControllerPhase::IdleOut
    );
}

#[test]
fn zoom_in_then_out_restores_camera() {
    let mut driver = Driver::new();
    driver.scroll_until_complete(1.0);
    driver.scroll_until_complete(1.0);
    assert_eq!(driver.nav.state().current_scene(), SceneId::SolarSystemRotation);
    let recorded = driver
        .nav
        .state()
        .zoom_out_camera_data(SceneId::SolarSystemApproach)
        .unwrap()
        .pose;

    let outcome = driver.scroll_until_complete(-1.0);
    assert_eq!(outcome.scene, SceneId::SolarSystemApproach);
    assert_eq!(outcome.to, SceneId::SolarSystemApproach);
    assert!(driver.nav.stage().camera.pose().approx_eq(&recorded, 1e-6));
    assert!(
        !driver
            .nav
            .state()
            .zoom_out_camera_data(SceneId::SolarSystemApproach)
            .unwrap()
            .zoomed_in
    );
}

#[test]
fn fully_zoomed_room_shows_full_progress_and_no_text() {
    let mut driver = Driver::new();
    driver.scroll_to_room_zoomed_in();
    let state = driver.nav.state();
    assert_eq!(state.current_scene(), SceneId::Room);
    assert_eq!(state.scene_zoomed(), ZoomStatus::In);
    assert_eq!(overall_progress(state, driver.nav.transition_progress()), 100.0);
    assert_eq!(visible_scene_text(state), None);

    // further forward scrolling goes nowhere
    for _ in 0..200 {
        assert!(driver.tick(1.0).completed.is_none());
    }
    assert!(driver.nav.state().active_transition().is_none());
}

#[test]
fn fullscreen_swallows_scroll_input() {
    let mut driver = Driver::new();
    assert!(!driver.nav.set_fullscreen(true), "only on the zoomed-in device");

    driver.scroll_to_room_zoomed_in();
    assert!(driver.nav.set_fullscreen(true));
    for _ in 0..200 {
        driver.tick(-5.0);
    }
    assert!(driver.nav.state().terminal_zoomed_in());
    assert!(driver.nav.state().fullscreen_active());

    driver.nav.set_fullscreen(false);
    let outcome = driver.scroll_until_complete(-1.0);
    assert_eq!(outcome.scene, SceneId::Room);
    assert_eq!(outcome.direction, ZoomDirection::Out);
    assert_eq!(driver.nav.state().current_scene(), SceneId::Room);
    assert_eq!(driver.nav.state().scene_zoomed(), ZoomStatus::Out);
}

#[test]
fn events_arrive_in_frame_order() {
    let mut driver = Driver::new();
    let seen: Rc<RefCell<Vec<NavigationEvent>>> = Rc::default();
    let sink = seen.clone();
    driver.nav.subscribe(move |event| sink.borrow_mut().push(*event));

    driver.scroll_until_complete(1.0);
    let events = seen.borrow();
    assert_eq!(
        events.first(),
        Some(&NavigationEvent::TransitionStarted {
            scene: SceneId::Galaxy,
            direction: ZoomDirection::In,
        })
    );
    assert!(matches!(
        events.last(),
        Some(NavigationEvent::TransitionCompleted(outcome)) if outcome.to == SceneId::SolarSystemApproach
    ));

    let progress: Vec<f32> = events
        .iter()
        .filter_map(|e| match e {
            NavigationEvent::Progress(update) => Some(update.progress),
            _ => None,
        })
        .collect();
    assert!(!progress.is_empty());
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(progress.last(), Some(&1.0));
}

#[test]
fn reversal_is_published() {
    let mut driver = Driver::new();
    let reversed = Rc::new(RefCell::new(0));
    let counter = reversed.clone();
    let id = driver.nav.subscribe(move |event| {
        if matches!(event, NavigationEvent::TransitionReversed { .. }) {
            *counter.borrow_mut() += 1;
        }
    });
    for _ in 0..MAX_FRAMES {
        driver.tick(1.0);
        if driver.nav.transition_progress().is_some_and(|p| p > 0.1) {
            break;
        }
    }
    driver.scroll_until_complete(-3.0);
    assert_eq!(*reversed.borrow(), 1);
    assert!(driver.nav.unsubscribe(id));
}

#[test]
fn teardown_stops_the_active_timeline() {
    let mut driver = Driver::new();
    for _ in 0..MAX_FRAMES {
        driver.tick(1.0);
        if driver.nav.state().active_transition().is_some() {
            break;
        }
    }
    let handle = driver
        .nav
        .controller(SceneId::Galaxy)
        .handle()
        .expect("galaxy zoom in flight");
    driver.nav.teardown();
    assert!(handle.is_cancelled());
    assert!(driver.nav.state().active_transition().is_none());
    assert_eq!(driver.nav.state().current_scene(), SceneId::Galaxy);
}

#[test]
fn per_scene_physics_applies_after_hand_off() {
    let mut config = JourneyConfig::default();
    let slow = PhysicsTuning {
        friction: 0.9,
        ..PhysicsTuning::default()
    };
    config.scene_physics.insert(SceneId::SolarSystemApproach, slow);
    let mut driver = Driver {
        nav: Navigator::new(config),
        now: 0.0,
    };
    assert_eq!(driver.nav.physics().tuning(), PhysicsTuning::default());
    driver.scroll_until_complete(1.0);
    assert_eq!(driver.nav.physics().tuning(), slow);
}

#[test]
fn scene_assets_follow_the_base_url() {
    let config = JourneyConfig {
        base_url: "/portfolio/".into(),
        ..JourneyConfig::default()
    };
    let nav = Navigator::new(config);
    let galaxy = nav.scene_assets(SceneId::Galaxy);
    assert_eq!(galaxy.models[0].url, "/portfolio/assets/models/galaxy.glb");
    assert_eq!(galaxy.textures[0].url, "/portfolio/assets/img/discs/disc.png");
    assert!(galaxy.icon.starts_with("/portfolio/"));
}
