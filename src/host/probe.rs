use crate::core::{ElementId, Result};

/// Presence probe: the external check for whether an element is part of the
/// visible document tree.
///
/// The probe may fail for a malformed or already-torn-down element; sweeps
/// treat a failure as per-entry, log it, and continue with the rest.
pub trait DomProbe: Send + Sync {
    fn is_attached(&self, element: ElementId) -> Result<bool>;
}
