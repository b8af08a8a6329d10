//! Trait seams toward the host component-lifecycle framework.
//!
//! The checker never talks to a concrete UI framework. The host injects three
//! capabilities at construction time: the presence probe ([`DomProbe`]), the
//! destroy operation ([`ViewDestroyer`]), and its lifecycle extension points
//! ([`LifecycleHooks`], wrapped by [`InterceptedHooks`]).

pub mod hooks;
pub mod probe;

pub use hooks::{InterceptedHooks, LifecycleHooks, intercept};
pub use probe::DomProbe;

use std::sync::Arc;

use crate::core::Result;
use crate::view::ViewHandle;

/// The host framework's destroy operation, invoked by the reclamation pass.
///
/// Implementations must run the host's own teardown and then synchronously
/// invoke the (intercepted) destroy hook for the view, so that the destroyed
/// flag is set and the view leaves the registry before this call returns.
pub trait ViewDestroyer: Send + Sync {
    fn destroy(&self, view: &Arc<ViewHandle>) -> Result<()>;
}
