// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use drift_math::Vec3;
use drift_world::{Body, ObjectRef, World, WorldObject};

pub type Log = Rc<RefCell<Vec<String>>>;
pub type Slot = Rc<RefCell<Option<ObjectRef>>>;
type Action = Box<dyn FnMut(&mut World)>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

/// Empty slot for handing a handle to a callback after construction.
pub fn slot() -> Slot {
    Rc::new(RefCell::new(None))
}

pub fn fill(slot: &Slot, object: &ObjectRef) {
    *slot.borrow_mut() = Some(Rc::clone(object));
}

/// Object that records every hook it receives and runs optional actions.
pub struct Probe {
    name: &'static str,
    body: Body,
    log: Log,
    on_added: Option<Action>,
    on_update: Option<Action>,
    on_post_update: Option<Action>,
}

impl Probe {
    pub fn new(name: &'static str, log: &Log, position: Vec3, needs_update: bool) -> Self {
        Self {
            name,
            body: Body::new(position, 1.0).with_needs_update(needs_update),
            log: Rc::clone(log),
            on_added: None,
            on_update: None,
            on_post_update: None,
        }
    }

    pub fn when_added(mut self, action: impl FnMut(&mut World) + 'static) -> Self {
        self.on_added = Some(Box::new(action));
        self
    }

    pub fn when_updated(mut self, action: impl FnMut(&mut World) + 'static) -> Self {
        self.on_update = Some(Box::new(action));
        self
    }

    pub fn when_post_updated(mut self, action: impl FnMut(&mut World) + 'static) -> Self {
        self.on_post_update = Some(Box::new(action));
        self
    }

    fn record(&self, hook: &str) {
        self.log.borrow_mut().push(format!("{hook}:{}", self.name));
    }
}

impl WorldObject for Probe {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn on_added(&mut self, world: &mut World) {
        self.record("added");
        if let Some(action) = self.on_added.as_mut() {
            action(world);
        }
    }

    fn on_removed(&mut self) {
        self.record("removed");
    }

    fn update(&mut self, _delta_time: Duration, world: &mut World) {
        self.record("update");
        if let Some(action) = self.on_update.as_mut() {
            action(world);
        }
    }

    fn post_update(&mut self, world: &mut World) {
        self.record("post");
        if let Some(action) = self.on_post_update.as_mut() {
            action(world);
        }
    }
}
