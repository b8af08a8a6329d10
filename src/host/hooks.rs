use std::sync::{Arc, Weak};

use crate::facade::LeakChecker;
use crate::view::ViewHandle;

/// The host framework's lifecycle extension points.
///
/// The host calls `after_create` once construction of a view finishes and
/// `on_destroy` once its destroy logic finishes. Implement this for the
/// host's own hook logic, then hand it to
/// [`LeakChecker::intercept`](crate::LeakChecker::intercept) and install the
/// returned adapter in its place.
pub trait LifecycleHooks: Send + Sync {
    fn after_create(&self, view: &Arc<ViewHandle>);

    fn on_destroy(&self, view: &Arc<ViewHandle>);
}

/// Wraps the host's hooks with registration bookkeeping.
///
/// The wrapped hook runs first and its behavior is fully preserved; the
/// bookkeeping is a strict after-effect. Create: register the view. Destroy:
/// set the destroyed flag, trace-log the removal, unregister the view.
///
/// Holds only a weak reference to the checker; once the checker is dropped
/// the adapter degrades to a transparent pass-through.
pub struct InterceptedHooks {
    inner: Arc<dyn LifecycleHooks>,
    checker: Weak<LeakChecker>,
}

impl InterceptedHooks {
    pub(crate) fn new(inner: Arc<dyn LifecycleHooks>, checker: Weak<LeakChecker>) -> Self {
        Self { inner, checker }
    }
}

impl LifecycleHooks for InterceptedHooks {
    fn after_create(&self, view: &Arc<ViewHandle>) {
        self.inner.after_create(view);

        if let Some(checker) = self.checker.upgrade() {
            checker.register(Arc::clone(view));
        }
    }

    fn on_destroy(&self, view: &Arc<ViewHandle>) {
        self.inner.on_destroy(view);

        view.mark_destroyed();
        if let Some(checker) = self.checker.upgrade() {
            checker.log().trace(&format!("[{}] removed", view.id()));
            checker.unregister(view);
        }
    }
}

/// Compose `after` onto `original`: the returned callable runs `original`,
/// then `after`, and yields `original`'s value untouched.
///
/// The functional form of the wrapping contract, for hosts whose extension
/// points are plain functions rather than a hook object.
pub fn intercept<A, R, F, G>(original: F, after: G) -> impl Fn(&A) -> R
where
    F: Fn(&A) -> R,
    G: Fn(&A),
{
    move |arg| {
        let val = original(arg);
        after(arg);
        val
    }
}
