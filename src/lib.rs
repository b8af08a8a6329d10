// ============================================================================
// Leakwatch Library
// ============================================================================

//! Runtime leak detection for UI view components.
//!
//! Leakwatch keeps a registry of live view instances and periodically sweeps
//! it for views that look abandoned: neither explicitly destroyed through the
//! host framework nor attached to the visible document tree. Suspects are
//! reported through a leveled log sink; with `perform_gc` enabled they are
//! force-destroyed through the host's own destroy operation.
//!
//! This is a best-effort sampler, not a memory profiler: the only signals are
//! one lifecycle event (explicit destruction) and one presence check
//! (document attachment). A view detached for a moment while being moved will
//! be flagged on a sweep that happens to catch it mid-move.
//!
//! The host framework is abstracted behind three small traits: [`DomProbe`]
//! (the presence check), [`ViewDestroyer`] (the destroy operation), and
//! [`LifecycleHooks`] (the construction/destroy extension points, wrapped by
//! [`LeakChecker::intercept`] so every view is tracked automatically).
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use leakwatch::{CheckerConfig, DomProbe, ElementId, LeakChecker, ViewDestroyer, ViewHandle};
//!
//! // The host framework supplies the presence probe and destroy operation.
//! struct Probe;
//! impl DomProbe for Probe {
//!     fn is_attached(&self, _element: ElementId) -> leakwatch::Result<bool> {
//!         Ok(false)
//!     }
//! }
//!
//! struct Destroyer;
//! impl ViewDestroyer for Destroyer {
//!     fn destroy(&self, _view: &Arc<ViewHandle>) -> leakwatch::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> leakwatch::Result<()> {
//! let checker = LeakChecker::new(
//!     CheckerConfig::new(),
//!     Arc::new(Probe),
//!     Arc::new(Destroyer),
//! )?;
//!
//! checker.register(Arc::new(ViewHandle::new("view1", ElementId(1))));
//! checker.report_leaks(); // warns: [view1] is leaky
//! assert_eq!(checker.stats().tracked_views, 1);
//! # Ok(())
//! # }
//! ```

pub mod core;

pub mod config;
pub mod facade;
pub mod heuristic;
pub mod host;
pub mod logging;
pub mod registry;
pub mod view;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use core::{ElementId, LeakError, LeakVerdict, Result, ViewId};

pub use config::CheckerConfig;
pub use facade::{CheckerStats, LeakChecker};
pub use host::{DomProbe, InterceptedHooks, LifecycleHooks, ViewDestroyer, intercept};
pub use logging::{LeakLogger, LogFacade};
pub use registry::ViewRegistry;
pub use view::ViewHandle;
