use std::cell::RefCell;
use std::rc::Rc;

use trivia_core::model::{CategoryIndex, Outcome};

/// Notifications raised by `GameService` for presenters to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    CategorySelected(CategoryIndex),
    AnswerEvaluated {
        category: CategoryIndex,
        outcome: Outcome,
    },
    CategoryCompleted(CategoryIndex),
    GameWon,
    GameReset,
}

/// Receives game notifications. Closures taking `&GameEvent` implement it.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event);
    }
}

/// Fan-out of events to every subscribed observer, in subscription order.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Box<dyn GameObserver>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn publish(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

/// Observer that keeps every event it receives; clones share the log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Removes and returns the events recorded so far.
    pub fn drain(&self) -> Vec<GameEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    #[must_use]
    pub fn count(&self, event: &GameEvent) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(*event);
    }
}
