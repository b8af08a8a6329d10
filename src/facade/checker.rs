use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, Weak};

use crate::config::CheckerConfig;
use crate::core::{LeakError, LeakVerdict, Result, ViewId};
use crate::heuristic;
use crate::host::{DomProbe, InterceptedHooks, LifecycleHooks, ViewDestroyer};
use crate::logging::{LeakLogger, LogFacade};
use crate::registry::ViewRegistry;
use crate::view::ViewHandle;

use super::worker::SweepWorker;

// Process-wide checker instance, installed by LeakChecker::init
static GLOBAL: OnceLock<Arc<LeakChecker>> = OnceLock::new();

/// The leak-detection registry.
///
/// Tracks live view instances, sweeps them on a timer for ones that look
/// abandoned (neither destroyed nor attached to the document). When
/// `perform_gc` is enabled it force-destroys them through the host framework.
///
/// Construct one per process with the host's capabilities injected, or use
/// [`LeakChecker::init`] for a process-wide instance. Every failure the
/// checker encounters is logged and recovered locally; nothing propagates to
/// the host application.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use leakwatch::{CheckerConfig, DomProbe, ElementId, LeakChecker, ViewDestroyer, ViewHandle};
///
/// # struct Probe;
/// # impl DomProbe for Probe {
/// #     fn is_attached(&self, _element: ElementId) -> leakwatch::Result<bool> {
/// #         Ok(false)
/// #     }
/// # }
/// # struct Destroyer;
/// # impl ViewDestroyer for Destroyer {
/// #     fn destroy(&self, _view: &Arc<ViewHandle>) -> leakwatch::Result<()> {
/// #         Ok(())
/// #     }
/// # }
/// let checker = LeakChecker::new(
///     CheckerConfig::new(),
///     Arc::new(Probe),
///     Arc::new(Destroyer),
/// )?;
///
/// checker.register(Arc::new(ViewHandle::new("view1", ElementId(1))));
/// checker.report_leaks(); // warns: [view1] is leaky
/// assert_eq!(checker.stats().tracked_views, 1);
/// # Ok::<(), leakwatch::LeakError>(())
/// ```
pub struct LeakChecker {
    config: CheckerConfig,
    registry: Mutex<ViewRegistry>,
    probe: Arc<dyn DomProbe>,
    destroyer: Arc<dyn ViewDestroyer>,
    log: Arc<dyn LeakLogger>,
    worker: Mutex<Option<SweepWorker>>,
    hooks: OnceLock<Arc<InterceptedHooks>>,
    self_ref: Weak<LeakChecker>,
}

impl LeakChecker {
    /// Create a checker with the host's presence probe and destroy operation.
    pub fn new(
        config: CheckerConfig,
        probe: Arc<dyn DomProbe>,
        destroyer: Arc<dyn ViewDestroyer>,
    ) -> Result<Arc<Self>> {
        config.validate().map_err(LeakError::ConfigError)?;

        let log = config
            .logger
            .clone()
            .unwrap_or_else(|| Arc::new(LogFacade));

        let checker = Arc::new_cyclic(|self_ref: &Weak<LeakChecker>| Self {
            config,
            registry: Mutex::new(ViewRegistry::new()),
            probe,
            destroyer,
            log,
            worker: Mutex::new(None),
            hooks: OnceLock::new(),
            self_ref: self_ref.clone(),
        });

        checker.log.log(&format!(
            "view leak checker ready (interval: {:?}, gc: {})",
            checker.config.interval, checker.config.perform_gc
        ));

        Ok(checker)
    }

    /// Install the process-wide checker.
    ///
    /// The first call constructs the checker and starts its sweep scheduler;
    /// any later call ignores its arguments and returns the instance already
    /// installed. Must be called from within a Tokio runtime.
    pub fn init(
        config: CheckerConfig,
        probe: Arc<dyn DomProbe>,
        destroyer: Arc<dyn ViewDestroyer>,
    ) -> Result<&'static Arc<LeakChecker>> {
        if let Some(existing) = GLOBAL.get() {
            return Ok(existing);
        }

        let checker = LeakChecker::new(config, probe, destroyer)?;
        checker.start();
        Ok(GLOBAL.get_or_init(move || checker))
    }

    /// The process-wide checker, if [`LeakChecker::init`] has run.
    pub fn global() -> Option<&'static Arc<LeakChecker>> {
        GLOBAL.get()
    }

    /// Wrap the host's lifecycle hooks with registration bookkeeping.
    ///
    /// Installs at most once: a second call returns the adapter installed by
    /// the first, unchanged, so views can never be double-registered by a
    /// double wrap.
    pub fn intercept(&self, inner: Arc<dyn LifecycleHooks>) -> Arc<InterceptedHooks> {
        let mut installed = false;
        let hooks = self.hooks.get_or_init(|| {
            installed = true;
            Arc::new(InterceptedHooks::new(inner, self.self_ref.clone()))
        });

        if !installed {
            self.log
                .debug("lifecycle hooks already intercepted; reusing the installed adapter");
        }

        Arc::clone(hooks)
    }

    /// Arm the sweep timer at the configured interval.
    ///
    /// Restarting replaces the previous timer rather than stacking a second
    /// one. Must be called from within a Tokio runtime.
    pub fn start(&self) {
        let worker = SweepWorker::spawn(self.self_ref.clone(), self.config.interval);

        match self.worker.lock() {
            Ok(mut slot) => {
                if slot.replace(worker).is_some() {
                    self.log.debug("sweep scheduler restarted");
                }
            }
            Err(err) => self.log.error(&LeakError::from(err).to_string()),
        }
    }

    /// Disarm the sweep timer. A sweep already in progress runs to
    /// completion; only the next scheduled one is prevented.
    pub fn stop(&self) {
        match self.worker.lock() {
            Ok(mut slot) => drop(slot.take()),
            Err(err) => self.log.error(&LeakError::from(err).to_string()),
        }
    }

    /// Stop the scheduler and drop every tracked view.
    pub fn dispose(&self) {
        self.stop();
        self.clear();
    }

    /// Track a view. A duplicate identity is logged and ignored; the existing
    /// entry wins.
    pub fn register(&self, view: Arc<ViewHandle>) {
        let outcome = self.views().and_then(|mut views| views.register(view));
        if let Err(err) = outcome {
            self.log.error(&err.to_string());
        }
    }

    /// Stop tracking a view. An unknown identity is logged and ignored.
    pub fn unregister(&self, view: &ViewHandle) {
        let outcome = self
            .views()
            .and_then(|mut views| views.unregister(view.id()).map(|_| ()));
        if let Err(err) = outcome {
            self.log.error(&err.to_string());
        }
    }

    /// The tracked view for `id`, if any.
    pub fn get(&self, id: &ViewId) -> Option<Arc<ViewHandle>> {
        match self.views() {
            Ok(views) => views.get(id),
            Err(err) => {
                self.log.error(&err.to_string());
                None
            }
        }
    }

    /// Drop every tracked view.
    pub fn clear(&self) {
        match self.views() {
            Ok(mut views) => views.clear(),
            Err(err) => self.log.error(&err.to_string()),
        }
    }

    /// One sweep pass over a snapshot of the registry: log a warning per
    /// leaky view and a debug entry per on-screen view, then run the
    /// reclamation pass in gc mode. A broken entry is logged and skipped; the
    /// pass always covers the rest.
    pub fn report_leaks(&self) {
        self.log.log("checking for leaky views");

        for view in self.snapshot() {
            let verdict = match heuristic::verdict(&view, self.probe.as_ref()) {
                Ok(verdict) => verdict,
                Err(err) => {
                    self.log.error(&format!("[{}] {}", view.id(), err));
                    continue;
                }
            };

            if verdict.is_leaky() {
                self.log.warn(&format!("[{}] is leaky", view.id()));
            }

            if view.is_destroyed() {
                continue;
            }

            match heuristic::is_on_screen(&view, self.probe.as_ref()) {
                Ok(true) => self.log.debug(&format!("[{}] still on screen", view.id())),
                Ok(false) => {}
                Err(err) => self.log.error(&format!("[{}] {}", view.id(), err)),
            }
        }

        if self.config.perform_gc {
            self.collect();
        }
    }

    /// Reclamation pass: force-destroy every view currently verdicted leaky.
    /// Works from a fresh snapshot; the registry shrinks underneath it as
    /// destroy hooks fire.
    fn collect(&self) {
        for view in self.snapshot() {
            match heuristic::verdict(&view, self.probe.as_ref()) {
                Ok(LeakVerdict::Leaky) => {
                    if let Err(err) = self.destroyer.destroy(&view) {
                        self.log.error(&format!("[{}] {}", view.id(), err));
                    }
                }
                Ok(LeakVerdict::NotLeaky) => {}
                Err(err) => self.log.error(&format!("[{}] {}", view.id(), err)),
            }
        }
    }

    /// Leakiness verdict for a single view, via the injected probe.
    pub fn verdict(&self, view: &ViewHandle) -> Result<LeakVerdict> {
        heuristic::verdict(view, self.probe.as_ref())
    }

    pub fn is_leaky(&self, view: &ViewHandle) -> Result<bool> {
        heuristic::is_leaky(view, self.probe.as_ref())
    }

    /// Raw presence-probe diagnostic for a single view.
    pub fn is_on_screen(&self, view: &ViewHandle) -> Result<bool> {
        heuristic::is_on_screen(view, self.probe.as_ref())
    }

    /// Get checker statistics
    pub fn stats(&self) -> CheckerStats {
        let tracked_views = self.views().map(|views| views.len()).unwrap_or(0);
        let running = self
            .worker
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false);

        CheckerStats {
            tracked_views,
            running,
        }
    }

    pub(crate) fn log(&self) -> &dyn LeakLogger {
        self.log.as_ref()
    }

    fn views(&self) -> Result<MutexGuard<'_, ViewRegistry>> {
        Ok(self.registry.lock()?)
    }

    fn snapshot(&self) -> Vec<Arc<ViewHandle>> {
        match self.views() {
            Ok(views) => views.snapshot(),
            Err(err) => {
                self.log.error(&err.to_string());
                Vec::new()
            }
        }
    }
}

/// Checker statistics
#[derive(Debug, Clone)]
pub struct CheckerStats {
    pub tracked_views: usize,
    pub running: bool,
}

impl fmt::Display for CheckerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tracking {} views, scheduler {}",
            self.tracked_views,
            if self.running { "running" } else { "stopped" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::core::ElementId;
    use crate::test_support::{FakeDocument, HostDestroyer, RecordingLogger};

    fn checker(
        perform_gc: bool,
    ) -> (
        Arc<LeakChecker>,
        Arc<FakeDocument>,
        Arc<HostDestroyer>,
        Arc<RecordingLogger>,
    ) {
        let doc = Arc::new(FakeDocument::default());
        let destroyer = Arc::new(HostDestroyer::default());
        let logger = Arc::new(RecordingLogger::default());
        let config = CheckerConfig::new()
            .perform_gc(perform_gc)
            .logger(logger.clone());

        let checker = LeakChecker::new(config, doc.clone(), destroyer.clone()).unwrap();
        destroyer.checker.set(Arc::downgrade(&checker)).unwrap();

        (checker, doc, destroyer, logger)
    }

    /// A attached, B detached, C destroyed-but-registered.
    fn populate(
        checker: &Arc<LeakChecker>,
        doc: &FakeDocument,
    ) -> (Arc<ViewHandle>, Arc<ViewHandle>, Arc<ViewHandle>) {
        let a = Arc::new(ViewHandle::new("a", ElementId(1)));
        let b = Arc::new(ViewHandle::new("b", ElementId(2)));
        let c = Arc::new(ViewHandle::new("c", ElementId(3)));
        doc.attach(ElementId(1));
        c.mark_destroyed();

        checker.register(a.clone());
        checker.register(b.clone());
        checker.register(c.clone());

        (a, b, c)
    }

    #[test]
    fn test_report_leaks_warns_for_detached_only() {
        let (checker, doc, destroyer, logger) = checker(false);
        let (_a, _b, _c) = populate(&checker, &doc);

        checker.report_leaks();

        assert_eq!(logger.count("warn", "is leaky"), 1);
        assert_eq!(logger.count("warn", "[b] is leaky"), 1);
        assert_eq!(logger.count("debug", "[a] still on screen"), 1);
        // reporting alone never reclaims
        assert!(destroyer.destroyed.lock().unwrap().is_empty());
        assert_eq!(checker.stats().tracked_views, 3);
    }

    #[test]
    fn test_gc_reclaims_leaky_views() {
        let (checker, doc, destroyer, _logger) = checker(true);
        let (_a, b, _c) = populate(&checker, &doc);

        checker.report_leaks();

        assert_eq!(
            *destroyer.destroyed.lock().unwrap(),
            vec!["b".to_string()]
        );
        assert!(b.is_destroyed());
        assert!(checker.get(&ViewId::from("b")).is_none());
        assert!(checker.get(&ViewId::from("a")).is_some());
        assert!(checker.get(&ViewId::from("c")).is_some());
    }

    #[test]
    fn test_transient_detachment_is_sampled() {
        let (checker, doc, _destroyer, logger) = checker(false);
        let view = Arc::new(ViewHandle::new("v1", ElementId(1)));
        doc.attach(ElementId(1));
        checker.register(view.clone());

        checker.report_leaks();
        assert_eq!(logger.count("warn", "[v1] is leaky"), 0);

        // a sweep that catches the view mid-move flags it
        doc.detach(ElementId(1));
        checker.report_leaks();
        assert_eq!(logger.count("warn", "[v1] is leaky"), 1);

        // reattached: no further warnings
        doc.attach(ElementId(1));
        checker.report_leaks();
        assert_eq!(logger.count("warn", "[v1] is leaky"), 1);
    }

    #[test]
    fn test_probe_failure_skips_entry_and_continues() {
        let (checker, _doc, _destroyer, logger) = checker(false);
        checker.register(Arc::new(ViewHandle::without_element("broken")));
        checker.register(Arc::new(ViewHandle::new("leaky", ElementId(9))));

        checker.report_leaks();

        assert_eq!(logger.count("error", "[broken]"), 1);
        assert_eq!(logger.count("warn", "[leaky] is leaky"), 1);
        assert_eq!(checker.stats().tracked_views, 2);
    }

    #[test]
    fn test_destroy_failure_logged_and_sweep_continues() {
        struct FailingDestroyer;

        impl ViewDestroyer for FailingDestroyer {
            fn destroy(&self, view: &Arc<ViewHandle>) -> Result<()> {
                Err(LeakError::DestroyFailure(format!(
                    "host refused to destroy '{}'",
                    view.id()
                )))
            }
        }

        let logger = Arc::new(RecordingLogger::default());
        let config = CheckerConfig::new().perform_gc(true).logger(logger.clone());
        let checker = LeakChecker::new(
            config,
            Arc::new(FakeDocument::default()),
            Arc::new(FailingDestroyer),
        )
        .unwrap();
        checker.register(Arc::new(ViewHandle::new("x", ElementId(1))));
        checker.register(Arc::new(ViewHandle::new("y", ElementId(2))));

        checker.report_leaks();

        // both entries were attempted; neither failure aborted the pass
        assert_eq!(logger.count("error", "destroy failed"), 2);
        assert_eq!(checker.stats().tracked_views, 2);
    }

    #[test]
    fn test_duplicate_registration_logged_once() {
        let (checker, _doc, _destroyer, logger) = checker(false);
        let first = Arc::new(ViewHandle::new("v1", ElementId(1)));
        let duplicate = Arc::new(ViewHandle::new("v1", ElementId(2)));

        checker.register(first.clone());
        checker.register(duplicate);

        assert_eq!(logger.count("error", "already registered"), 1);
        let found = checker.get(&ViewId::from("v1")).unwrap();
        assert!(Arc::ptr_eq(&found, &first));
        assert_eq!(checker.stats().tracked_views, 1);
    }

    #[test]
    fn test_missing_unregistration_logged_once() {
        let (checker, _doc, _destroyer, logger) = checker(false);
        checker.register(Arc::new(ViewHandle::new("v1", ElementId(1))));

        checker.unregister(&ViewHandle::new("ghost", ElementId(2)));

        assert_eq!(logger.count("error", "not registered"), 1);
        assert_eq!(checker.stats().tracked_views, 1);
    }

    #[test]
    fn test_dispose_clears_registry() {
        let (checker, _doc, _destroyer, _logger) = checker(false);
        checker.register(Arc::new(ViewHandle::new("v1", ElementId(1))));

        checker.dispose();

        assert!(checker.get(&ViewId::from("v1")).is_none());
        assert_eq!(checker.stats().tracked_views, 0);
        assert!(!checker.stats().running);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let result = LeakChecker::new(
            CheckerConfig::new().interval(Duration::ZERO),
            Arc::new(FakeDocument::default()),
            Arc::new(HostDestroyer::default()),
        );

        assert!(matches!(result, Err(LeakError::ConfigError(_))));
    }

    #[test]
    fn test_stats_display() {
        let stats = CheckerStats {
            tracked_views: 2,
            running: true,
        };
        assert_eq!(stats.to_string(), "tracking 2 views, scheduler running");
    }
}
