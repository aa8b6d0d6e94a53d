// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

/// Structural errors reported by [`World`](crate::World).
///
/// These are precondition violations, not transient failures: the world is
/// left unmodified and retrying the same call fails the same way.
///
/// Numeric degeneracies in collision queries are not errors; they resolve to
/// `0` or `+∞` (see [`drift_geom::ccd`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The call is not valid in the world's current state: duplicate or
    /// re-entrant registration, or a nested tick.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    /// The object is not registered with this world.
    #[error("object not registered with this world")]
    NotFound,
}
