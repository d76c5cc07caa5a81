//! Selection controller
//!
//! Tracks the active node ids. A plain click replaces the selection; a click
//! with the accumulating modifier held toggles membership. Entry nodes are
//! only ever selected on their own.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ids::NodeId;
use crate::types::Document;

/// Apply a click to a selection
///
/// - Without the modifier the result is exactly `[clicked]`.
/// - With the modifier, a selected id is removed and an unselected id is
///   appended, unless that would mix an entry id with any other id; in that
///   case the selection is returned unchanged.
pub fn toggle_select(
    current: &[NodeId],
    clicked: &NodeId,
    entry_ids: &HashSet<NodeId>,
    multi_modifier_active: bool,
) -> Vec<NodeId> {
    if !multi_modifier_active {
        return vec![clicked.clone()];
    }

    if current.contains(clicked) {
        return current.iter().filter(|id| *id != clicked).cloned().collect();
    }

    if current.is_empty() {
        return vec![clicked.clone()];
    }

    // Non-empty selection: adding anything to an entry, or an entry to anything, mixes
    let clicked_is_entry = entry_ids.contains(clicked);
    let holds_entry = current.iter().any(|id| entry_ids.contains(id));
    if clicked_is_entry || holds_entry {
        log::trace!("Refused to add '{}' to a selection holding an entry", clicked);
        return current.to_vec();
    }

    let mut next = current.to_vec();
    next.push(clicked.clone());
    next
}

/// Drop ids that no longer resolve in `doc`
pub fn retain_existing(selection: &[NodeId], doc: &Document) -> Vec<NodeId> {
    let present = doc.id_set();
    selection
        .iter()
        .filter(|id| present.contains(*id))
        .cloned()
        .collect()
}

/// Selection state held by an editing session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    selected: Vec<NodeId>,
    multi_modifier_active: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids, in selection order
    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    /// The most recently selected id, if any
    pub fn active(&self) -> Option<&NodeId> {
        self.selected.last()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn multi_modifier_active(&self) -> bool {
        self.multi_modifier_active
    }

    /// Record whether the accumulating modifier key is held
    pub fn set_modifier(&mut self, active: bool) {
        self.multi_modifier_active = active;
    }

    /// Apply a click on `clicked`
    pub fn click(&mut self, clicked: &NodeId, entry_ids: &HashSet<NodeId>) {
        self.selected = toggle_select(
            &self.selected,
            clicked,
            entry_ids,
            self.multi_modifier_active,
        );
        log::trace!("Selection is now {:?}", self.selected);
    }

    /// Replace the selection outright
    pub fn replace(&mut self, ids: Vec<NodeId>) {
        self.selected = ids;
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop ids that no longer exist in `doc`
    pub fn prune(&mut self, doc: &Document) {
        self.selected = retain_existing(&self.selected, doc);
    }
}
