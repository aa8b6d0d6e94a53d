// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]

mod common;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use common::{entries, fill, new_log, slot, Probe};
use drift_geom::{Aabb, GridConfig};
use drift_math::Vec3;
use drift_world::{object_ref, World, WorldConfig, WorldConfigError, WorldError};

#[test]
fn duplicate_add_is_rejected_and_world_is_unchanged() {
    let log = new_log();
    let mut world = World::new();
    let a = object_ref(Probe::new("a", &log, Vec3::ZERO, false));
    let id = world.add(&a).unwrap();

    let err = world.add(&a).unwrap_err();
    assert!(matches!(err, WorldError::InvalidState(_)));
    assert_eq!(world.len(), 1);
    assert_eq!(world.id_of(&a), Some(id));
    assert_eq!(entries(&log), ["added:a"]);
}

#[test]
fn add_while_caller_holds_a_borrow_is_rejected() {
    let log = new_log();
    let mut world = World::new();
    let a = object_ref(Probe::new("a", &log, Vec3::ZERO, false));
    let guard = a.borrow();
    assert!(matches!(world.add(&a), Err(WorldError::InvalidState(_))));
    drop(guard);
    assert!(world.is_empty());
    assert!(entries(&log).is_empty());
}

#[test]
fn remove_of_unregistered_object_is_not_found() {
    let log = new_log();
    let mut world = World::new();
    let a = object_ref(Probe::new("a", &log, Vec3::ZERO, false));
    assert_eq!(world.remove(&a), Err(WorldError::NotFound));

    world.add(&a).unwrap();
    world.remove(&a).unwrap();
    assert_eq!(world.remove(&a), Err(WorldError::NotFound));
    assert_eq!(entries(&log), ["added:a", "removed:a"]);
}

#[test]
fn removal_while_borrowed_delivers_on_removed_before_re_adding() {
    let log = new_log();
    let mut world = World::new();
    let a = object_ref(Probe::new("a", &log, Vec3::ZERO, false));
    world.add(&a).unwrap();

    let guard = a.borrow_mut();
    world.remove(&a).unwrap();
    assert!(matches!(world.add(&a), Err(WorldError::InvalidState(_))));
    drop(guard);

    world.add(&a).unwrap();
    assert_eq!(entries(&log), ["added:a", "removed:a", "added:a"]);
    assert!(world.contains(&a));
    let mut hits = Vec::new();
    world.query(&Aabb::from_sphere(Vec3::ZERO, 5.0), &mut hits);
    assert_eq!(hits.len(), 1);
}

#[test]
fn clear_delivers_queued_on_removed() {
    let log = new_log();
    let mut world = World::new();
    let a = object_ref(Probe::new("a", &log, Vec3::ZERO, false));
    world.add(&a).unwrap();

    let guard = a.borrow_mut();
    world.remove(&a).unwrap();
    drop(guard);
    assert_eq!(entries(&log), ["added:a"]);

    world.clear();
    assert_eq!(entries(&log), ["added:a", "removed:a"]);
}

#[test]
fn on_added_sees_the_world_without_the_object() {
    let log = new_log();
    let mut world = World::new();
    world
        .add(&object_ref(Probe::new("other", &log, Vec3::new(1.0, 0.0, 0.0), false)))
        .unwrap();

    let seen = Rc::new(Cell::new(None));
    let s = Rc::clone(&seen);
    let a = object_ref(Probe::new("a", &log, Vec3::ZERO, false).when_added(move |world| {
        let mut hits = Vec::new();
        world.query(&Aabb::from_sphere(Vec3::ZERO, 5.0), &mut hits);
        s.set(Some((world.len(), hits.len())));
    }));
    world.add(&a).unwrap();
    assert_eq!(seen.get(), Some((1, 1)));

    let mut hits = Vec::new();
    world.query(&Aabb::from_sphere(Vec3::ZERO, 5.0), &mut hits);
    assert_eq!(hits.len(), 2);
}

#[test]
fn on_removed_runs_once_after_the_object_leaves_queries() {
    let log = new_log();
    let mut world = World::new();
    let a = object_ref(Probe::new("a", &log, Vec3::ZERO, false));
    world.add(&a).unwrap();
    world.remove(&a).unwrap();

    let mut hits = Vec::new();
    world.query(&Aabb::from_sphere(Vec3::ZERO, 5.0), &mut hits);
    assert!(hits.is_empty());
    assert!(!world.contains(&a));
    assert_eq!(entries(&log), ["added:a", "removed:a"]);
}

#[test]
fn self_removal_defers_on_removed_until_the_callback_returns() {
    let log = new_log();
    let mut world = World::new();
    let me = slot();
    let removed_inside = Rc::new(Cell::new(true));

    let (m, l, r) = (Rc::clone(&me), Rc::clone(&log), Rc::clone(&removed_inside));
    let a = object_ref(Probe::new("a", &log, Vec3::ZERO, true).when_updated(move |world| {
        let handle = m.borrow_mut().take().unwrap();
        world.remove(&handle).unwrap();
        r.set(l.borrow().iter().any(|e| e == "removed:a"));
    }));
    fill(&me, &a);
    world.add(&a).unwrap();
    world.update(Duration::from_millis(16)).unwrap();

    assert!(!removed_inside.get());
    assert!(world.is_empty());
    assert_eq!(entries(&log), ["added:a", "update:a", "removed:a"]);
}

#[test]
fn re_adding_from_inside_on_added_is_rejected() {
    let log = new_log();
    let mut world = World::new();
    let me = slot();
    let result = Rc::new(Cell::new(None));

    let (m, res) = (Rc::clone(&me), Rc::clone(&result));
    let a = object_ref(Probe::new("a", &log, Vec3::ZERO, false).when_added(move |world| {
        let handle = m.borrow_mut().take().unwrap();
        res.set(Some(world.add(&handle).map(|_| ())));
    }));
    fill(&me, &a);
    world.add(&a).unwrap();

    assert!(matches!(result.take(), Some(Err(WorldError::InvalidState(_)))));
    assert_eq!(world.len(), 1);
    assert_eq!(entries(&log), ["added:a"]);
}

#[test]
fn objects_added_from_on_added_register_first() {
    let log = new_log();
    let mut world = World::new();
    let b = object_ref(Probe::new("b", &log, Vec3::ZERO, false));
    let b_for_a = Rc::clone(&b);
    let a = object_ref(Probe::new("a", &log, Vec3::ZERO, false).when_added(move |world| {
        world.add(&b_for_a).unwrap();
    }));
    world.add(&a).unwrap();

    assert_eq!(world.len(), 2);
    assert!(world.id_of(&b) < world.id_of(&a));
    assert_eq!(entries(&log), ["added:a", "added:b"]);
}

#[test]
fn clear_evicts_without_on_removed_and_never_reuses_ids() {
    let log = new_log();
    let mut world = World::new();
    let a = object_ref(Probe::new("a", &log, Vec3::ZERO, false));
    let first = world.add(&a).unwrap();
    world.update(Duration::from_secs(1)).unwrap();
    world.clear();

    assert!(world.is_empty());
    assert!(!world.contains(&a));
    assert_eq!(world.time(), Duration::ZERO);
    assert_eq!(world.tick().index(), 0);
    assert_eq!(entries(&log), ["added:a"]);

    let again = world.add(&a).unwrap();
    assert!(first < again);
    assert!(world.get(first).is_none());
    assert!(world.get(again).is_some());
}

#[test]
fn with_config_validates_grid_settings() {
    let config = WorldConfig {
        grid: GridConfig::with_cell_size(0.0),
        expected_objects: 0,
    };
    assert!(matches!(World::with_config(config), Err(WorldConfigError::Grid(_))));

    let config = WorldConfig::from_json_str(r#"{ "grid": { "cell_size": 2.5 } }"#).unwrap();
    let world = World::with_config(config).unwrap();
    assert_eq!(world.config().grid.cell_size, 2.5);
}
