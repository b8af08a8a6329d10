use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::{ElementId, ViewId};

/// The checker's non-owning mirror of a host view instance.
///
/// The host framework owns the real view; it hands the checker a `ViewHandle`
/// carrying the view's identity and root element at construction time. The
/// destroyed flag is set exactly once, by the destroy interception, the
/// instant the host's destroy operation completes; it is never cleared.
#[derive(Debug)]
pub struct ViewHandle {
    id: ViewId,
    element: Option<ElementId>,
    destroyed: AtomicBool,
}

impl ViewHandle {
    pub fn new(id: impl Into<ViewId>, element: ElementId) -> Self {
        Self {
            id: id.into(),
            element: Some(element),
            destroyed: AtomicBool::new(false),
        }
    }

    /// A handle whose root element is missing. The presence probe cannot
    /// check such a view; sweeps report it as a probe failure and move on.
    pub fn without_element(id: impl Into<ViewId>) -> Self {
        Self {
            id: id.into(),
            element: None,
            destroyed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &ViewId {
        &self.id
    }

    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    pub fn mark_destroyed(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
    }
}
