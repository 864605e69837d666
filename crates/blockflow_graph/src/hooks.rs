// SPDX-License-Identifier: MIT OR Apache-2.0
//! Collaborator hooks consumed by the engine.
//!
//! The engine does not implement undo history or rendering; it only calls
//! into them at the two points where graph bookkeeping concerns them.

/// Undo-history checkpoint.
///
/// Invoked before any parameter mutation is applied, so the host can
/// snapshot the pre-mutation state.
pub trait HistoryHook {
    /// Record a checkpoint of the current state.
    fn save(&mut self);
}

/// Rendering-side notification.
pub trait LayoutHook {
    /// Called after automatic pruning removed edges, invalidating whatever
    /// the host has drawn for them.
    fn layout_changed(&mut self);
}
