use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use crate::core::{LeakError, Result, ViewId};
use crate::view::ViewHandle;

/// Mapping from view identity to live view handle.
///
/// At most one entry per identity. Registering a present identity or
/// unregistering an absent one returns a typed error; the caller decides how
/// loudly to complain (the facade logs and carries on).
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: HashMap<ViewId, Arc<ViewHandle>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    /// Insert `view` under its identity. The existing entry wins on conflict;
    /// no overwrite.
    pub fn register(&mut self, view: Arc<ViewHandle>) -> Result<()> {
        match self.views.entry(view.id().clone()) {
            Entry::Occupied(entry) => Err(LeakError::DuplicateRegistration(entry.key().clone())),
            Entry::Vacant(slot) => {
                slot.insert(view);
                Ok(())
            }
        }
    }

    pub fn unregister(&mut self, id: &ViewId) -> Result<Arc<ViewHandle>> {
        self.views
            .remove(id)
            .ok_or_else(|| LeakError::MissingRegistration(id.clone()))
    }

    pub fn get(&self, id: &ViewId) -> Option<Arc<ViewHandle>> {
        self.views.get(id).cloned()
    }

    pub fn clear(&mut self) {
        self.views.clear();
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Copy of the current entries for iteration. Sweeps traverse the
    /// snapshot, never the live map, so entries may be unregistered while a
    /// pass is still walking them.
    pub fn snapshot(&self) -> Vec<Arc<ViewHandle>> {
        self.views.values().cloned().collect()
    }
}
