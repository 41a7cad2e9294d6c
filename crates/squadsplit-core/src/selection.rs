use serde::{Deserialize, Serialize};

use crate::player::{Player, PlayerId};

/// The roster entries picked for the next split, in the order they were
/// ticked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: Vec<PlayerId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id` if it is not selected, otherwise deselect it. Returns
    /// whether the player is selected afterwards.
    pub fn toggle(&mut self, id: &PlayerId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id.clone());
            true
        }
    }

    /// Returns whether the id was selected.
    pub fn remove(&mut self, id: &PlayerId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|selected| selected != id);
        self.ids.len() != before
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[PlayerId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The selected players, in roster order. Ids missing from `roster` are
    /// skipped.
    pub fn resolve(&self, roster: &[Player]) -> Vec<Player> {
        roster
            .iter()
            .filter(|p| self.contains(&p.id))
            .cloned()
            .collect()
    }
}
