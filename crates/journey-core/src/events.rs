//! Navigation events and a single-threaded publish/subscribe bus.
//!
//! Overlays subscribe once and receive every event the navigator publishes
//! during a tick, in publish order.

use crate::scene::SceneId;
use crate::state::{TransitionOutcome, ZoomDirection};
use serde::Serialize;

/// Position of the active zoom, `0.0` zoomed out and `1.0` zoomed in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub scene: SceneId,
    pub direction: ZoomDirection,
    pub progress: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavigationEvent {
    /// Published every frame a transition is in flight.
    Progress(ProgressUpdate),
    TransitionStarted {
        scene: SceneId,
        direction: ZoomDirection,
    },
    TransitionReversed {
        scene: SceneId,
        direction: ZoomDirection,
    },
    TransitionCompleted(TransitionOutcome),
}

/// Opaque handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Box<dyn FnMut(&E)>;

pub struct EventBus<E> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Handler<E>)>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Returns whether `id` was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver `event` to every subscriber in subscription order.
    pub fn publish(&mut self, event: &E) {
        for (_, handler) in self.subscribers.iter_mut() {
            handler(event);
        }
    }

    #[inline]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}
