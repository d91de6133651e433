//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use std::cell::RefCell;
use std::rc::Rc;
use workflow_canvas::GraphEvent;

/// Records graph change notifications for assertions.
#[derive(Default, Clone)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GraphEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A subscriber closure that appends into this log.
    pub fn subscriber(&self) -> impl Fn(&GraphEvent) + 'static {
        let sink = self.events.clone();
        move |event| sink.borrow_mut().push(event.clone())
    }

    pub fn events(&self) -> Vec<GraphEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Count of recorded events matching a predicate.
    pub fn count(&self, pred: impl Fn(&GraphEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}
