//! Watch Use Case implementation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::StylesheetCompiler;
use crate::error::StylewatchResult;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::notifier::NotifyWatcher;

use super::event::{WatchEvent, WatchOptions};
use super::queue::BuildQueue;
use super::session::WatchSession;

/// How long the loop blocks on the channel before re-checking the running flag
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Build worker threads. Fixed rather than per CPU, so one hung compile
/// leaves others running even on a single-core machine.
const BUILD_WORKERS: usize = 4;

/// Watch Use Case
///
/// Wires the local filesystem and the `notify` watcher into a
/// [`WatchSession`] and runs the event loop. This is the main entry point for
/// the `stylewatch` binary.
pub struct WatchUseCase {
    options: WatchOptions,
    compiler: Arc<dyn StylesheetCompiler>,
}

impl WatchUseCase {
    /// Create a new WatchUseCase
    pub fn new(options: WatchOptions, compiler: Arc<dyn StylesheetCompiler>) -> Self {
        Self { options, compiler }
    }

    /// Start watching (blocking)
    ///
    /// Discovers the roots, then handles change notifications one at a time
    /// until the running flag is cleared. Only startup can fail; once
    /// `WatchStarted` has been emitted every problem arrives as an event.
    ///
    /// The loop thread owns the graph and calls `on_event`; compiles run on
    /// the build queue, whose events are forwarded between notifications.
    pub fn start<F>(self, running: Arc<AtomicBool>, on_event: F) -> StylewatchResult<()>
    where
        F: Fn(WatchEvent),
    {
        let (tx, rx) = channel();
        let notifier = NotifyWatcher::new(tx)?;
        let mut session = WatchSession::new(self.options, LocalFs::new(), self.compiler, notifier)?;

        session.start(&on_event)?;
        let queue = BuildQueue::new(session.builder().clone(), BUILD_WORKERS)?;

        while running.load(Ordering::SeqCst) {
            queue.drain(&on_event);
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(path) => {
                    if let Some(rebuild) = session.plan_rebuild(&path, &on_event) {
                        queue.submit(rebuild);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::warn!("file watcher stopped delivering events");
                    break;
                }
            }
        }

        // Builds still running are abandoned with the pool.
        queue.drain(&on_event);
        on_event(WatchEvent::Shutdown);
        Ok(())
    }
}
