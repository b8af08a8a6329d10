use log::{debug, error, info, trace, warn};

/// Leveled log sink for checker diagnostics.
///
/// The checker never surfaces failures to the host application; everything it
/// has to say goes through this trait. Swap it out via
/// [`CheckerConfig::logger`](crate::CheckerConfig::logger); tests typically
/// inject a recording sink to assert on emitted diagnostics.
pub trait LeakLogger: Send + Sync {
    fn log(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
    fn trace(&self, message: &str);
}

/// Default sink: forwards to the ambient [`log`] logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl LeakLogger for LogFacade {
    fn log(&self, message: &str) {
        info!("{message}");
    }

    fn warn(&self, message: &str) {
        warn!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
    }

    fn debug(&self, message: &str) {
        debug!("{message}");
    }

    fn trace(&self, message: &str) {
        trace!("{message}");
    }
}
