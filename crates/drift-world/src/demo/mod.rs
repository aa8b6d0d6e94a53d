// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ready-made objects for tests, benches, and examples.

/// Constant-velocity object.
pub mod drifter;

pub use drifter::Drifter;
