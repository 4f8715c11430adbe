// Host-side tests for the input-to-velocity physics.

use journey_core::*;
use proptest::prelude::*;

fn tuning(friction: f32) -> PhysicsTuning {
    PhysicsTuning {
        friction,
        ..PhysicsTuning::default()
    }
}

#[test]
fn impulse_accelerates_then_friction_damps() {
    let mut physics = PhysicsEngine::new(PhysicsTuning::default());
    let frame = physics.step(&InputSample::wheel(1.0), 0.0);
    // (0 + 1 * 1.0 * 0.04) * (1 - 0.6)
    assert!((frame.velocity - 0.016).abs() < 1e-7);
    assert_eq!(frame.delta, frame.velocity);
    assert!((frame.progress - 0.016).abs() < 1e-7);
    assert!(!frame.settled);
}

#[test]
fn wheel_and_touch_in_one_frame_add_up() {
    let mut both = PhysicsEngine::new(PhysicsTuning::default());
    let mut wheel = PhysicsEngine::new(PhysicsTuning::default());
    let mut touch = PhysicsEngine::new(PhysicsTuning::default());
    let combined = InputSample::wheel(2.0).merged(InputSample::touch(5.0));
    let a = both.step(&combined, 0.0).velocity;
    let b = wheel.step(&InputSample::wheel(2.0), 0.0).velocity;
    let c = touch.step(&InputSample::touch(5.0), 0.0).velocity;
    assert!((a - (b + c)).abs() < 1e-7);
}

#[test]
fn touch_uses_its_own_sensitivity() {
    let physics = PhysicsEngine::new(PhysicsTuning::default());
    let impulse = physics.impulse(&InputSample::touch(10.0));
    assert!((impulse - 10.0 * DEFAULT_TOUCH_SENSITIVITY).abs() < 1e-6);
}

#[test]
fn settled_velocity_is_still_reported() {
    let mut physics = PhysicsEngine::new(tuning(0.5));
    physics.step(&InputSample::wheel(1.0), 0.0);
    let mut frame = physics.step(&InputSample::default(), 0.016);
    for i in 0..200 {
        frame = physics.step(&InputSample::default(), 0.016 * i as f64);
        if frame.settled {
            break;
        }
    }
    assert!(frame.settled);
    assert!(frame.velocity > 0.0, "settled velocity must not be zeroed");
}

#[test]
fn halt_keeps_progress() {
    let mut physics = PhysicsEngine::new(PhysicsTuning::default());
    physics.step(&InputSample::wheel(3.0), 0.0);
    let progress = physics.progress();
    physics.halt();
    assert_eq!(physics.velocity(), 0.0);
    assert_eq!(physics.progress(), progress);
    let frame = physics.step(&InputSample::default(), 0.1);
    assert_eq!(frame.progress, progress);
}

#[test]
fn last_input_time_tracks_non_empty_samples() {
    let mut physics = PhysicsEngine::new(PhysicsTuning::default());
    assert_eq!(physics.last_input_at(), None);
    physics.step(&InputSample::touch(-1.0), 1.5);
    physics.step(&InputSample::default(), 2.0);
    assert_eq!(physics.last_input_at(), Some(1.5));
}

#[test]
fn negative_input_moves_progress_backwards() {
    let mut physics = PhysicsEngine::new(PhysicsTuning::default());
    for _ in 0..5 {
        physics.step(&InputSample::wheel(-1.0), 0.0);
    }
    assert!(physics.velocity() < 0.0);
    assert!(physics.progress() < 0.0);
}

proptest! {
    #[test]
    fn velocity_decays_monotonically_without_input(
        friction in 0.01f32..0.99,
        impulse in prop_oneof![-100.0f32..-0.1, 0.1f32..100.0],
    ) {
        let mut physics = PhysicsEngine::new(tuning(friction));
        physics.step(&InputSample::wheel(impulse), 0.0);
        let mut previous = physics.velocity().abs();
        prop_assert!(previous > 0.0);
        for i in 1..10_000 {
            let v = physics.step(&InputSample::default(), i as f64).velocity.abs();
            if previous > 1e-30 {
                prop_assert!(v < previous, "frame {}: {} !< {}", i, v, previous);
            } else {
                prop_assert!(v <= previous);
            }
            previous = v;
        }
        prop_assert!(previous < VELOCITY_THRESHOLD);
    }
}
