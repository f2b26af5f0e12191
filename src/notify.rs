//! Typed observer registry for locomotion notifications.
//!
//! Every state has a switch event; all but WallJump and WallDismount also have a
//! loop event. Handlers run synchronously, in the order they were registered.

use crate::enums::{LocomotionState, Phase};
use crate::error::ControllerError;
use bevy::prelude::*;

/// One notification: a state paired with the phase that fired it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateEvent {
    pub state: LocomotionState,
    pub phase: Phase,
}

impl StateEvent {
    pub fn switch(state: LocomotionState) -> Self {
        Self {
            state,
            phase: Phase::Switch,
        }
    }

    pub fn looped(state: LocomotionState) -> Self {
        Self {
            state,
            phase: Phase::Loop,
        }
    }

    pub fn exists(&self) -> bool {
        self.phase == Phase::Switch || self.state.has_loop_event()
    }
}

/// Handle returned by a subscription, used to unsubscribe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Handler = Box<dyn FnMut() + Send + Sync>;
pub type Listener = Box<dyn FnMut(StateEvent) + Send + Sync>;

enum Target {
    Event(StateEvent, Handler),
    All(Listener),
}

struct Subscription {
    id: SubscriptionId,
    target: Target,
}

#[derive(Default)]
pub struct Notifier {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zero-argument handler for a single event.
    pub fn subscribe(
        &mut self,
        event: StateEvent,
        handler: impl FnMut() + Send + Sync + 'static,
    ) -> Result<SubscriptionId, ControllerError> {
        if !event.exists() {
            warn!("Refusing subscription to missing event {:?}", event);
            return Err(ControllerError::NoLoopEvent(event.state));
        }
        Ok(self.register(Target::Event(event, Box::new(handler))))
    }

    /// Register a handler that receives every event.
    pub fn subscribe_all(
        &mut self,
        listener: impl FnMut(StateEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.register(Target::All(Box::new(listener)))
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.id != id);
        self.subscriptions.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn dispatch(&mut self, event: StateEvent) {
        for sub in self.subscriptions.iter_mut() {
            match &mut sub.target {
                Target::Event(wanted, handler) => {
                    if *wanted == event {
                        handler();
                    }
                }
                Target::All(listener) => listener(event),
            }
        }
    }

    fn register(&mut self, target: Target) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, target });
        id
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, Notifier) {
        (Arc::new(Mutex::new(Vec::new())), Notifier::new())
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let (log, mut notifier) = recorder();
        let idle_switch = StateEvent::switch(LocomotionState::Idle);

        let first = log.clone();
        notifier
            .subscribe(idle_switch, move || first.lock().unwrap().push("first"))
            .unwrap();
        let all = log.clone();
        notifier.subscribe_all(move |_| all.lock().unwrap().push("all"));
        let second = log.clone();
        notifier
            .subscribe(idle_switch, move || second.lock().unwrap().push("second"))
            .unwrap();

        notifier.dispatch(idle_switch);

        assert_eq!(*log.lock().unwrap(), vec!["first", "all", "second"]);
    }

    #[test]
    fn test_handlers_only_see_their_event() {
        let (log, mut notifier) = recorder();
        let sink = log.clone();
        notifier
            .subscribe(StateEvent::looped(LocomotionState::Falling), move || {
                sink.lock().unwrap().push("falling loop")
            })
            .unwrap();

        notifier.dispatch(StateEvent::switch(LocomotionState::Falling));
        notifier.dispatch(StateEvent::looped(LocomotionState::Idle));
        assert!(log.lock().unwrap().is_empty());

        notifier.dispatch(StateEvent::looped(LocomotionState::Falling));
        assert_eq!(*log.lock().unwrap(), vec!["falling loop"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let (log, mut notifier) = recorder();
        let sink = log.clone();
        let id = notifier.subscribe_all(move |_| sink.lock().unwrap().push("event"));

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        assert!(notifier.is_empty());

        notifier.dispatch(StateEvent::switch(LocomotionState::Running));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_loop_events_are_refused() {
        let mut notifier = Notifier::new();
        let result = notifier.subscribe(StateEvent::looped(LocomotionState::WallJump), || {});
        assert_eq!(
            result,
            Err(ControllerError::NoLoopEvent(LocomotionState::WallJump))
        );

        assert!(notifier
            .subscribe(StateEvent::switch(LocomotionState::WallDismount), || {})
            .is_ok());
        assert_eq!(notifier.len(), 1);
    }
}
