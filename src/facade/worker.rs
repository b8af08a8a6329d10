use std::sync::Weak;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::checker::LeakChecker;

/// Recurring sweep task. One per started checker; restarting replaces it,
/// never stacks a second timer.
pub(crate) struct SweepWorker {
    stop_tx: Option<oneshot::Sender<()>>,
    join_handle: Option<JoinHandle<()>>,
}

impl SweepWorker {
    /// Arms the timer. The task holds only a weak reference to the checker,
    /// so a dropped checker ends the loop at its next tick.
    pub(crate) fn spawn(checker: Weak<LeakChecker>, interval: Duration) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let join_handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        break;
                    }
                    _ = sleep(interval) => {
                        match checker.upgrade() {
                            Some(checker) => checker.report_leaks(),
                            None => break,
                        }
                    }
                }
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            join_handle: Some(join_handle),
        }
    }
}

impl Drop for SweepWorker {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(join_handle) = self.join_handle.take() {
            join_handle.abort();
        }
    }
}
