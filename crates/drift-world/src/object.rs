// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Object capability trait, shared handles, and registration ids.
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::body::Body;
use crate::world::World;

/// Registration number assigned by a [`World`] when an object is added.
///
/// Ids increase monotonically in registration order and are never reused by
/// the same world, including across [`World::clear`]. Ordering ids therefore
/// orders objects by registration.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ObjectId(u64);

impl ObjectId {
    pub(crate) const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Raw registration number.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj#{}", self.0)
    }
}

/// Capability set every simulated object implements.
///
/// The world depends only on this trait. Hooks receive the world explicitly
/// instead of holding a back-reference, and may call any world method
/// (`add`, `remove`, `query`, ...) from inside.
///
/// Callback rules
/// - `on_added` runs once, before the object is visible to queries.
/// - `on_removed` runs once, after the object is no longer visible.
/// - `update` and `post_update` run only while `body().needs_update()` was
///   true at the start of the tick. Every `update` of a tick finishes before
///   the first `post_update` of that tick starts.
/// - After `on_added`, `update`, and `post_update` return, the world
///   re-reads `body().bounding_box()`, so moving the own body inside those
///   hooks needs no further notification.
pub trait WorldObject {
    /// Physical state read by the world.
    fn body(&self) -> &Body;

    /// Mutable physical state.
    fn body_mut(&mut self) -> &mut Body;

    /// Called once when the object is registered.
    fn on_added(&mut self, _world: &mut World) {}

    /// Called once when the object is deregistered by [`World::remove`].
    fn on_removed(&mut self) {}

    /// First pass of a tick.
    fn update(&mut self, _delta_time: Duration, _world: &mut World) {}

    /// Second pass of a tick, after every object's `update`.
    fn post_update(&mut self, _world: &mut World) {}
}

/// Shared handle to an object.
///
/// The caller constructs the object and keeps its own handle; the world
/// holds a clone while the object is registered. Identity is handle identity
/// (`Rc::ptr_eq`).
pub type ObjectRef = Rc<RefCell<dyn WorldObject>>;

/// Wraps `object` into a fresh [`ObjectRef`].
pub fn object_ref<T: WorldObject + 'static>(object: T) -> ObjectRef {
    Rc::new(RefCell::new(object))
}

/// Identity key of a handle: the address of its shared allocation.
///
/// Stable while the world holds a clone, because the allocation cannot be
/// freed or reused until every clone is dropped.
pub(crate) fn identity_of(object: &ObjectRef) -> usize {
    Rc::as_ptr(object).cast::<()>().addr()
}
