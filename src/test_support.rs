//! Shared fixtures for unit tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, OnceLock, Weak};

use crate::core::{ElementId, Result};
use crate::facade::LeakChecker;
use crate::host::{DomProbe, ViewDestroyer};
use crate::logging::LeakLogger;
use crate::view::ViewHandle;

/// Probe backed by a mutable set of attached elements.
#[derive(Default)]
pub(crate) struct FakeDocument {
    attached: Mutex<HashSet<ElementId>>,
}

impl FakeDocument {
    pub(crate) fn attach(&self, element: ElementId) {
        self.attached.lock().unwrap().insert(element);
    }

    pub(crate) fn detach(&self, element: ElementId) {
        self.attached.lock().unwrap().remove(&element);
    }
}

impl DomProbe for FakeDocument {
    fn is_attached(&self, element: ElementId) -> Result<bool> {
        Ok(self.attached.lock().unwrap().contains(&element))
    }
}

/// Emulates the host's destroy path without the full hook stack: records the
/// call, flags the view, unregisters it.
#[derive(Default)]
pub(crate) struct HostDestroyer {
    pub(crate) checker: OnceLock<Weak<LeakChecker>>,
    pub(crate) destroyed: Mutex<Vec<String>>,
}

impl ViewDestroyer for HostDestroyer {
    fn destroy(&self, view: &Arc<ViewHandle>) -> Result<()> {
        self.destroyed.lock().unwrap().push(view.id().to_string());
        view.mark_destroyed();
        if let Some(checker) = self.checker.get().and_then(|weak| weak.upgrade()) {
            checker.unregister(view);
        }
        Ok(())
    }
}

/// Destroyer for tests that never reclaim.
pub(crate) struct NullDestroyer;

impl ViewDestroyer for NullDestroyer {
    fn destroy(&self, _view: &Arc<ViewHandle>) -> Result<()> {
        Ok(())
    }
}

/// Sink that records every entry so tests can count diagnostics.
#[derive(Default)]
pub(crate) struct RecordingLogger {
    entries: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingLogger {
    fn push(&self, level: &'static str, message: &str) {
        self.entries.lock().unwrap().push((level, message.to_string()));
    }

    pub(crate) fn count(&self, level: &str, needle: &str) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(entry_level, message)| *entry_level == level && message.contains(needle))
            .count()
    }
}

impl LeakLogger for RecordingLogger {
    fn log(&self, message: &str) {
        self.push("log", message);
    }

    fn warn(&self, message: &str) {
        self.push("warn", message);
    }

    fn error(&self, message: &str) {
        self.push("error", message);
    }

    fn debug(&self, message: &str) {
        self.push("debug", message);
    }

    fn trace(&self, message: &str) {
        self.push("trace", message);
    }
}
