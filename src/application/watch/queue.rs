//! Background build queue
//!
//! Rebuilds run on a small rayon pool so a compiler that hangs only holds up
//! its own rebuild. Workers never touch the dependency graph; they report back
//! over a channel that the watch loop drains between notifications.

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::domain::ports::FileSystem;
use crate::error::StylewatchResult;

use super::build::Builder;
use super::event::WatchEvent;
use super::propagate::Rebuild;

/// Runs [`Rebuild`]s off the watch loop thread
pub struct BuildQueue<F> {
    builder: Builder<F>,
    pool: rayon::ThreadPool,
    events_tx: Sender<WatchEvent>,
    events_rx: Receiver<WatchEvent>,
}

impl<F> BuildQueue<F>
where
    F: FileSystem + Clone + Send + Sync + 'static,
{
    /// Create a queue with `workers` build threads, or one per CPU when zero
    pub fn new(builder: Builder<F>, workers: usize) -> StylewatchResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("stylewatch-build-{i}"))
            .build()?;
        let (events_tx, events_rx) = channel();

        Ok(Self {
            builder,
            pool,
            events_tx,
            events_rx,
        })
    }

    /// Queue `rebuild` and return immediately.
    ///
    /// The files of one rebuild are built in order on a single worker;
    /// separate rebuilds may run at the same time.
    pub fn submit(&self, rebuild: Rebuild) {
        tracing::debug!(
            trigger = %rebuild.trigger.display(),
            files = rebuild.order.len(),
            "queue rebuild"
        );

        let builder = self.builder.clone();
        let tx = self.events_tx.clone();
        self.pool.spawn(move || {
            builder.run(&rebuild, &|event| {
                // The receiver only goes away when the loop has shut down.
                let _ = tx.send(event);
            });
        });
    }

    /// Hand every event reported so far to `on_event`, without blocking.
    ///
    /// Returns how many events were delivered.
    pub fn drain(&self, on_event: &impl Fn(WatchEvent)) -> usize {
        let mut delivered = 0;
        for event in self.events_rx.try_iter() {
            on_event(event);
            delivered += 1;
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Condvar, Mutex};
    use std::time::{Duration, Instant};

    use tempfile::TempDir;

    use crate::application::watch::WatchOptions;
    use crate::domain::ports::{CompileError, CompileRequest, StylesheetCompiler};
    use crate::infrastructure::LocalFs;

    /// Echoes its input, but holds any file named `slow.less` until opened
    #[derive(Default)]
    struct GatedCompiler {
        open: Mutex<bool>,
        opened: Condvar,
    }

    impl GatedCompiler {
        fn open(&self) {
            if let Ok(mut open) = self.open.lock() {
                *open = true;
                self.opened.notify_all();
            }
        }
    }

    impl StylesheetCompiler for GatedCompiler {
        fn compile(&self, source: &str, request: &CompileRequest) -> Result<String, CompileError> {
            if request.source.ends_with("slow.less") {
                let mut open = self.open.lock().unwrap();
                while !*open {
                    open = self.opened.wait(open).unwrap();
                }
            }
            Ok(source.to_string())
        }
    }

    fn queue(dir: &TempDir, compiler: Arc<GatedCompiler>) -> BuildQueue<LocalFs> {
        let options = WatchOptions::new(vec![dir.path().to_path_buf()], dir.path().to_path_buf());
        let builder = Builder::new(LocalFs::new(), compiler, options);
        BuildQueue::new(builder, 2).unwrap()
    }

    fn rebuild(path: &Path) -> Rebuild {
        Rebuild {
            trigger: path.to_path_buf(),
            order: vec![path.to_path_buf()],
        }
    }

    /// Drain events until one satisfies `done` or five seconds pass
    fn wait_for(
        queue: &BuildQueue<LocalFs>,
        seen: &Mutex<Vec<WatchEvent>>,
        done: impl Fn(&[WatchEvent]) -> bool,
    ) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            queue.drain(&|event| seen.lock().unwrap().push(event));
            if done(&seen.lock().unwrap()) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        false
    }

    fn compiled(events: &[WatchEvent], name: &str) -> bool {
        events
            .iter()
            .any(|e| matches!(e, WatchEvent::Compiled { source, .. } if source == name))
    }

    #[test]
    fn test_hung_compile_does_not_hold_up_other_files() {
        let dir = TempDir::new().unwrap();
        let slow: PathBuf = dir.path().join("slow.less");
        let fast: PathBuf = dir.path().join("fast.less");
        std::fs::write(&slow, ".slow {}").unwrap();
        std::fs::write(&fast, ".fast {}").unwrap();

        let compiler = Arc::new(GatedCompiler::default());
        let queue = queue(&dir, compiler.clone());
        let seen = Mutex::new(Vec::new());

        queue.submit(rebuild(&slow));
        queue.submit(rebuild(&fast));

        assert!(wait_for(&queue, &seen, |e| compiled(e, "fast.less")));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("fast.css")).unwrap(),
            ".fast {}"
        );
        assert!(!dir.path().join("slow.css").exists());

        compiler.open();
        assert!(wait_for(&queue, &seen, |e| compiled(e, "slow.less")));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("slow.css")).unwrap(),
            ".slow {}"
        );
    }

    #[test]
    fn test_rebuild_reports_completion_after_its_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.less");
        let b = dir.path().join("b.less");
        std::fs::write(&a, ".a {}").unwrap();
        std::fs::write(&b, "@import \"a\";").unwrap();

        let queue = queue(&dir, Arc::new(GatedCompiler::default()));
        let seen = Mutex::new(Vec::new());
        queue.submit(Rebuild {
            trigger: a.clone(),
            order: vec![a, b],
        });

        assert!(wait_for(&queue, &seen, |e| e
            .iter()
            .any(|e| matches!(e, WatchEvent::RebuildComplete { .. }))));

        let seen = seen.into_inner().unwrap();
        let names: Vec<&str> = seen
            .iter()
            .filter_map(|e| match e {
                WatchEvent::Compiled { source, .. } => Some(source.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, ["a.less", "b.less"]);
        assert!(matches!(
            seen.last(),
            Some(WatchEvent::RebuildComplete { trigger, rebuilt })
                if trigger == "a.less" && rebuilt == &["a.less", "b.less"]
        ));
    }

    #[test]
    fn test_drain_without_work_delivers_nothing() {
        let dir = TempDir::new().unwrap();
        let queue = queue(&dir, Arc::new(GatedCompiler::default()));
        assert_eq!(queue.drain(&|_| {}), 0);
    }
}
