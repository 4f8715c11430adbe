// Host-side tests for the publish/subscribe bus.

use journey_core::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn subscribers_receive_in_subscription_order() {
    let mut bus: EventBus<u32> = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let a = log.clone();
    let b = log.clone();
    bus.subscribe(move |e| a.borrow_mut().push(("a", *e)));
    bus.subscribe(move |e| b.borrow_mut().push(("b", *e)));
    bus.publish(&1);
    bus.publish(&2);
    assert_eq!(*log.borrow(), vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]);
}

#[test]
fn unsubscribe_stops_delivery() {
    let mut bus: EventBus<u32> = EventBus::new();
    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    let id = bus.subscribe(move |_| *c.borrow_mut() += 1);
    bus.publish(&0);
    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id));
    bus.publish(&0);
    assert_eq!(*count.borrow(), 1);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn progress_update_serializes_camel_case() {
    let update = ProgressUpdate {
        scene: SceneId::SolarSystemRotation,
        direction: ZoomDirection::Out,
        progress: 0.5,
    };
    let json = serde_json::to_string(&update).unwrap();
    assert_eq!(
        json,
        r#"{"scene":"solarSystemRotation","direction":"out","progress":0.5}"#
    );
}
