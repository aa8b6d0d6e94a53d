// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The simulation world: registration, ticking, and spatial queries.
use std::collections::BTreeMap;
use std::mem;
use std::rc::Rc;
use std::time::Duration;

use drift_geom::{time_of_impact, Aabb, BroadPhase, Tick, UniformGrid};
use drift_math::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, instrument, trace, warn};

use crate::config::{WorldConfig, WorldConfigError};
use crate::error::WorldError;
use crate::object::{identity_of, ObjectId, ObjectRef, WorldObject};

/// Which pass of a tick is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Update,
    PostUpdate,
}

/// Fixed-step simulation of sphere-bounded objects.
///
/// The world owns the authoritative registration table (in registration
/// order) and a [`UniformGrid`] derived from it. The grid is maintained
/// incrementally on add, remove, and every reported or observed move; it is
/// never rebuilt.
///
/// Invariants
/// - Every registered object has exactly one grid proxy, keyed by its
///   [`ObjectId`], and no proxy exists for an unregistered object.
/// - A handle is registered at most once.
/// - Outside a running callback, each proxy box equals the object's
///   `body().bounding_box()` provided external movers call
///   [`World::on_object_moved`].
///
/// Re-entrancy
/// - Callbacks receive `&mut World` and may add, remove, query, or clear.
/// - While an object's own callback runs its `RefCell` is mutably borrowed;
///   the world never tries to borrow it then. Work that needs the object
///   (delivering `on_removed`, re-reading its box) is queued and performed
///   as soon as the callback returns.
///
/// `World` holds `Rc` handles and is neither `Send` nor `Sync`.
pub struct World {
    config: WorldConfig,
    time: Duration,
    tick: Tick,
    next_id: u64,
    objects: BTreeMap<ObjectId, ObjectRef>,
    ids: FxHashMap<usize, ObjectId>,
    index: UniformGrid<ObjectId>,
    adding: FxHashSet<usize>,
    in_tick: bool,
    // Reused every tick; cleared, never reallocated.
    eligible: Vec<(ObjectId, ObjectRef)>,
    pending_removed: Vec<ObjectRef>,
    pending_sync: Vec<ObjectId>,
}

impl Default for World {
    fn default() -> Self {
        Self::from_valid_config(WorldConfig::default())
    }
}

impl World {
    /// Creates an empty world with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty world after validating `config`.
    pub fn with_config(config: WorldConfig) -> Result<Self, WorldConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: WorldConfig) -> Self {
        let index = UniformGrid::with_config(config.grid).unwrap_or_default();
        let cap = config.expected_objects;
        let mut ids = FxHashMap::default();
        ids.reserve(cap);
        Self {
            config,
            time: Duration::ZERO,
            tick: Tick::ZERO,
            next_id: 0,
            objects: BTreeMap::new(),
            ids,
            index,
            adding: FxHashSet::default(),
            in_tick: false,
            eligible: Vec::with_capacity(cap),
            pending_removed: Vec::new(),
            pending_sync: Vec::new(),
        }
    }

    /// Configuration the world was built with.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Simulation time accumulated since creation or the last [`World::clear`].
    #[must_use]
    pub fn time(&self) -> Duration {
        self.time
    }

    /// Number of ticks run since creation or the last [`World::clear`].
    #[must_use]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Number of registered objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` when no objects are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Registration id of `object`, if registered.
    #[must_use]
    pub fn id_of(&self, object: &ObjectRef) -> Option<ObjectId> {
        self.ids.get(&identity_of(object)).copied()
    }

    /// Returns `true` when `object` is registered.
    #[must_use]
    pub fn contains(&self, object: &ObjectRef) -> bool {
        self.id_of(object).is_some()
    }

    /// Handle of the object registered under `id`.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<ObjectRef> {
        self.objects.get(&id).cloned()
    }

    /// Registered objects in registration order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &ObjectRef)> + '_ {
        self.objects.iter().map(|(id, obj)| (*id, obj))
    }

    /// Box currently stored in the spatial index for `id`.
    #[must_use]
    pub fn indexed_box(&self, id: ObjectId) -> Option<Aabb> {
        self.index.get(id)
    }

    /// Registers `object`.
    ///
    /// `on_added` runs first, against a world that does not yet contain the
    /// object; the object becomes visible to queries once it returns.
    ///
    /// # Errors
    /// [`WorldError::InvalidState`] if the handle is already registered, is
    /// being registered by an enclosing `add`, is borrowed elsewhere, or
    /// still awaits its `on_removed`. The world is left unmodified and
    /// `on_added` is not called.
    pub fn add(&mut self, object: &ObjectRef) -> Result<ObjectId, WorldError> {
        self.flush_pending();
        let key = identity_of(object);
        if self.ids.contains_key(&key) {
            return Err(refuse("object is already registered"));
        }
        if self.adding.contains(&key) {
            return Err(refuse("object is already being added"));
        }
        if self.pending_removed.iter().any(|p| Rc::ptr_eq(p, object)) {
            return Err(refuse("object removal is still pending"));
        }
        let Ok(mut guard) = object.try_borrow_mut() else {
            return Err(refuse("object is borrowed elsewhere"));
        };

        self.adding.insert(key);
        guard.on_added(self);
        let aabb = guard.body().bounding_box();
        drop(guard);
        self.adding.remove(&key);

        let id = ObjectId::from_raw(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, Rc::clone(object));
        self.ids.insert(key, id);
        self.index.upsert(id, aabb);
        debug!(%id, objects = self.objects.len(), "object added");

        self.flush_pending();
        Ok(id)
    }

    /// Deregisters `object`.
    ///
    /// The object leaves the collection and the spatial index first, then
    /// `on_removed` runs exactly once. When the object is inside one of its
    /// own callbacks (self-removal), `on_removed` runs right after that
    /// callback returns. When the caller holds a borrow of the object,
    /// `on_removed` runs at the first `add`, `remove`, `update`, or `clear`
    /// after the borrow is released, and always before the handle can be
    /// registered again.
    ///
    /// # Errors
    /// [`WorldError::NotFound`] if the handle is not registered.
    pub fn remove(&mut self, object: &ObjectRef) -> Result<ObjectId, WorldError> {
        self.flush_pending();
        let key = identity_of(object);
        let Some(id) = self.ids.remove(&key) else {
            warn!("remove of an unregistered object");
            return Err(WorldError::NotFound);
        };
        self.objects.remove(&id);
        self.index.remove(id);
        debug!(%id, objects = self.objects.len(), "object removed");

        match object.try_borrow_mut() {
            Ok(mut guard) => guard.on_removed(),
            Err(_) => {
                trace!(%id, "object busy; on_removed deferred");
                self.pending_removed.push(Rc::clone(object));
            }
        }
        Ok(id)
    }

    /// Reports that `object` moved by `displacement`.
    ///
    /// The index entry is refreshed from the object's current bounding box.
    /// If the object is borrowed right now (the caller still holds its
    /// `RefMut`, or the object is inside its own callback) the stored box is
    /// shifted by `displacement` instead, and the exact box is re-read at
    /// the next opportunity.
    ///
    /// # Errors
    /// [`WorldError::NotFound`] if the handle is not registered.
    pub fn on_object_moved(
        &mut self,
        object: &ObjectRef,
        displacement: Vec3,
    ) -> Result<(), WorldError> {
        let Some(id) = self.id_of(object) else {
            warn!("move notification for an unregistered object");
            return Err(WorldError::NotFound);
        };
        trace!(%id, ?displacement, "object moved");
        match object.try_borrow() {
            Ok(guard) => {
                let aabb = guard.body().bounding_box();
                drop(guard);
                self.index.upsert(id, aabb);
            }
            Err(_) => {
                if let Some(stored) = self.index.get(id) {
                    self.index.upsert(id, stored.translated(&displacement));
                }
                self.pending_sync.push(id);
            }
        }
        Ok(())
    }

    /// Resets time to zero and evicts every object.
    ///
    /// This is a hard reset: evicted objects get no `on_removed`. Queued
    /// `on_removed` calls from earlier removals are delivered first when
    /// their objects are free.
    pub fn clear(&mut self) {
        self.flush_pending();
        let evicted = self.objects.len();
        self.time = Duration::ZERO;
        self.tick = Tick::ZERO;
        self.objects.clear();
        self.ids.clear();
        self.index.clear();
        self.pending_sync.clear();
        debug!(evicted, "world cleared");
    }

    /// Appends every registered object whose box overlaps `aabb` to `result`.
    ///
    /// `result` is not cleared first. Order is unspecified.
    pub fn query(&self, aabb: &Aabb, result: &mut Vec<ObjectRef>) {
        self.index.for_each_overlap(aabb, |id| {
            if let Some(object) = self.objects.get(&id) {
                result.push(Rc::clone(object));
            }
        });
    }

    /// Like [`World::query`], but appends registration ids.
    pub fn query_ids(&self, aabb: &Aabb, result: &mut Vec<ObjectId>) {
        self.index.query(aabb, result);
    }

    /// Advances time by `delta_time` and runs one tick.
    ///
    /// The objects whose `needs_update` is set when the tick starts form the
    /// tick's snapshot. Pass one calls `update` on each, in registration
    /// order; pass two then calls `post_update` on each, in the same order.
    /// Snapshot members removed during the tick receive no further calls.
    /// Objects added, or whose flag changes, during the tick join from the
    /// next tick.
    ///
    /// # Errors
    /// [`WorldError::InvalidState`] when called from inside a tick callback.
    #[instrument(level = "trace", skip(self), fields(tick = self.tick.index() + 1))]
    pub fn update(&mut self, delta_time: Duration) -> Result<(), WorldError> {
        if self.in_tick {
            return Err(refuse("update called from inside a tick"));
        }
        self.in_tick = true;
        self.time = self.time.saturating_add(delta_time);
        self.tick = self.tick.next();
        self.flush_pending();

        let mut eligible = mem::take(&mut self.eligible);
        eligible.clear();
        for (id, obj) in &self.objects {
            match obj.try_borrow() {
                Ok(o) if o.body().needs_update() => eligible.push((*id, Rc::clone(obj))),
                Ok(_) => {}
                Err(_) => warn!(%id, "object borrowed elsewhere; left out of tick"),
            }
        }
        trace!(eligible = eligible.len(), "tick snapshot");

        self.run_pass(&eligible, Pass::Update, delta_time);
        self.run_pass(&eligible, Pass::PostUpdate, delta_time);

        eligible.clear();
        self.eligible = eligible;
        self.in_tick = false;
        Ok(())
    }

    /// Time until `a` and `b` first touch, moving at their current
    /// velocities.
    ///
    /// Returns `0` when they already touch or overlap and `+∞` when they
    /// never will. Symmetric in its arguments.
    ///
    /// Takes bodies by reference so callbacks can pass `self` for the
    /// object whose hook is running.
    #[must_use]
    pub fn precise_collision(a: &dyn WorldObject, b: &dyn WorldObject) -> f32 {
        time_of_impact(&a.body().moving_sphere(), &b.body().moving_sphere())
    }
}

impl World {
    fn run_pass(&mut self, eligible: &[(ObjectId, ObjectRef)], pass: Pass, delta_time: Duration) {
        for (id, object) in eligible {
            if !self.objects.contains_key(id) {
                continue;
            }
            match object.try_borrow_mut() {
                Ok(mut guard) => match pass {
                    Pass::Update => guard.update(delta_time, self),
                    Pass::PostUpdate => guard.post_update(self),
                },
                Err(_) => {
                    warn!(%id, ?pass, "object borrowed elsewhere; callback skipped");
                    continue;
                }
            }
            self.sync(*id);
            self.flush_pending();
        }
    }

    /// Re-reads the box of a registered object into the index.
    fn sync(&mut self, id: ObjectId) -> bool {
        let Some(object) = self.objects.get(&id) else {
            return true;
        };
        let Ok(guard) = object.try_borrow() else {
            return false;
        };
        let aabb = guard.body().bounding_box();
        drop(guard);
        if self.index.get(id) != Some(aabb) {
            self.index.upsert(id, aabb);
        }
        true
    }

    /// Delivers queued `on_removed` calls and box re-reads whose objects are
    /// no longer borrowed.
    fn flush_pending(&mut self) {
        if !self.pending_removed.is_empty() {
            self.pending_removed.retain(|object| match object.try_borrow_mut() {
                Ok(mut guard) => {
                    guard.on_removed();
                    false
                }
                Err(_) => true,
            });
        }
        if !self.pending_sync.is_empty() {
            let mut pending = mem::take(&mut self.pending_sync);
            pending.retain(|id| !self.sync(*id));
            // Anything queued while syncing stays behind the survivors.
            pending.append(&mut self.pending_sync);
            self.pending_sync = pending;
        }
    }
}

fn refuse(reason: &'static str) -> WorldError {
    warn!(reason, "world call refused");
    WorldError::InvalidState(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use crate::object::object_ref;

    struct Rock {
        body: Body,
    }

    impl WorldObject for Rock {
        fn body(&self) -> &Body {
            &self.body
        }
        fn body_mut(&mut self) -> &mut Body {
            &mut self.body
        }
    }

    fn rock(x: f32) -> ObjectRef {
        object_ref(Rock {
            body: Body::new(Vec3::new(x, 0.0, 0.0), 1.0),
        })
    }

    #[test]
    fn ids_follow_registration_order_and_survive_clear() {
        let mut world = World::new();
        let a = world.add(&rock(0.0)).expect("add");
        let b = world.add(&rock(5.0)).expect("add");
        assert!(a < b);
        world.clear();
        let c = world.add(&rock(0.0)).expect("add");
        assert!(b < c);
    }

    #[test]
    fn move_while_borrowed_shifts_then_resyncs() {
        let mut world = World::new();
        let r = rock(0.0);
        let id = world.add(&r).expect("add");
        let d = Vec3::new(3.0, 0.0, 0.0);
        {
            let mut guard = r.borrow_mut();
            guard.body_mut().translate(&d);
            world.on_object_moved(&r, d).expect("registered");
        }
        assert_eq!(world.indexed_box(id), Some(Aabb::from_sphere(Vec3::new(3.0, 0.0, 0.0), 1.0)));
        assert_eq!(world.pending_sync, vec![id]);
        world.update(Duration::from_millis(16)).expect("tick");
        assert!(world.pending_sync.is_empty());
    }
}
