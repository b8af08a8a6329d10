//! The leakiness heuristic: a view that was never explicitly destroyed and is
//! not currently attached to the document is presumed abandoned.
//!
//! This is intentionally conservative (false negatives over false positives),
//! and it samples: a view that is detached for a moment while being moved in
//! the document will be flagged on a sweep that happens to catch it mid-move.

use crate::core::{LeakError, LeakVerdict, Result};
use crate::host::DomProbe;
use crate::view::ViewHandle;

/// Raw presence-probe result for a view's root element.
pub fn is_on_screen(view: &ViewHandle, probe: &dyn DomProbe) -> Result<bool> {
    let element = view.element().ok_or_else(|| {
        LeakError::ProbeFailure(format!("view '{}' has no root element", view.id()))
    })?;

    probe.is_attached(element)
}

pub fn verdict(view: &ViewHandle, probe: &dyn DomProbe) -> Result<LeakVerdict> {
    // destroyed through the proper path; not a concern
    if view.is_destroyed() {
        return Ok(LeakVerdict::NotLeaky);
    }

    // not destroyed, but still attached to the document
    if is_on_screen(view, probe)? {
        return Ok(LeakVerdict::NotLeaky);
    }

    // neither destroyed nor on screen
    Ok(LeakVerdict::Leaky)
}

pub fn is_leaky(view: &ViewHandle, probe: &dyn DomProbe) -> Result<bool> {
    Ok(verdict(view, probe)?.is_leaky())
}
