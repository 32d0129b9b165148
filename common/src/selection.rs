//! Pending selection: the playlists marked for the next transformation

use std::collections::BTreeMap;

use crate::types::PlaylistRef;

/// Set of playlists keyed by id. Iterates in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSelection {
    entries: BTreeMap<String, String>,
}

impl PendingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a card click: `selected == true` adds, `false` removes.
    /// Adding an id that is already present keeps a single entry (and
    /// refreshes its name).
    pub fn set(&mut self, selected: bool, id: &str, name: &str) {
        if selected {
            self.entries.insert(id.to_string(), name.to_string());
        } else {
            self.entries.remove(id);
        }
    }

    /// Flips membership and returns the new state.
    pub fn toggle(&mut self, playlist: &PlaylistRef) -> bool {
        let selected = !self.contains(&playlist.id);
        self.set(selected, &playlist.id, &playlist.name);
        selected
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = PlaylistRef> + '_ {
        self.entries
            .iter()
            .map(|(id, name)| PlaylistRef::new(id, name))
    }

    pub fn to_vec(&self) -> Vec<PlaylistRef> {
        self.iter().collect()
    }
}

impl FromIterator<PlaylistRef> for PendingSelection {
    fn from_iter<I: IntoIterator<Item = PlaylistRef>>(iter: I) -> Self {
        let mut selection = PendingSelection::new();
        for playlist in iter {
            selection.set(true, &playlist.id, &playlist.name);
        }
        selection
    }
}
