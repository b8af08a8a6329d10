use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::logging::LeakLogger;

/// Leak checker configuration
///
/// Controls how often the sweep runs and whether leaky views are
/// automatically reclaimed.
#[derive(Clone)]
pub struct CheckerConfig {
    /// Time between sweep passes
    pub interval: Duration,

    /// Automatically destroy views verdicted leaky during a sweep
    pub perform_gc: bool,

    /// Log sink override; the ambient `log` logger is used when unset
    pub logger: Option<Arc<dyn LeakLogger>>,
}

impl CheckerConfig {
    /// Create a configuration with the defaults: a 5000 ms sweep interval,
    /// no automatic reclamation, the ambient log sink.
    pub fn new() -> Self {
        Self {
            interval: Duration::from_millis(5000),
            perform_gc: false,
            logger: None,
        }
    }

    /// Set the sweep interval
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Enable or disable the automatic reclamation pass
    pub fn perform_gc(mut self, enabled: bool) -> Self {
        self.perform_gc = enabled;
        self
    }

    /// Replace the log sink
    pub fn logger(mut self, logger: Arc<dyn LeakLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.interval.is_zero() {
            return Err("interval must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CheckerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerConfig")
            .field("interval", &self.interval)
            .field("perform_gc", &self.perform_gc)
            .field("logger", &self.logger.as_ref().map(|_| "custom"))
            .finish()
    }
}
