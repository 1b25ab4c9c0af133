//! Worker Pool - fixed set of threads draining a shared task queue.
//!
//! ```text
//! [Submitter] --submit--> [VecDeque<Task>] --> [boggle-worker-0..N]
//!      |                                              |
//!      +------ wait_for_completion <-- active == 0 ---+
//! ```
//!
//! `active` counts tasks that were submitted and have not finished
//! running. It is bumped inside `submit` and dropped only after the task
//! body returns, so the barrier also covers tasks submitted by other
//! tasks.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::{debug, error, trace, warn};

use crate::error::PoolError;

type Task = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker threads.
    pub threads: usize,
    /// Pin worker `i` to core `i % cores`.
    pub pin_to_cores: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            threads: thread::available_parallelism().map_or(1, |n| n.get()),
            pin_to_cores: false,
        }
    }
}

struct State {
    queue: VecDeque<Task>,
    /// Submitted but not yet finished
    active: usize,
    /// Workers still inside their loop
    alive: usize,
    /// Tasks that ended in a panic, ever
    panicked: usize,
    stop: bool,
}

struct Shared {
    state: Mutex<State>,
    /// Signalled when a task is queued or stop is raised
    task_ready: Condvar,
    /// Signalled when `active` drops to zero
    idle: Condvar,
}

impl Shared {
    // Pool code never panics while holding the lock; task panics are caught
    // outside it, so a poisoned guard still holds consistent state.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cloneable submission handle, usable from inside running tasks.
#[derive(Clone)]
pub struct PoolHandle {
    shared: Arc<Shared>,
}

impl PoolHandle {
    /// Queue a task and wake one idle worker.
    ///
    /// Tasks submitted after every worker has exited are dropped.
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut state = self.shared.lock();
            if state.stop && state.alive == 0 {
                warn!("task submitted to a stopped worker pool was dropped");
                return;
            }
            state.queue.push_back(Box::new(task));
            state.active += 1;
        }
        self.shared.task_ready.notify_one();
    }

    /// Block until every submitted task has finished running.
    ///
    /// Must not be called from inside a task: the caller's own task is
    /// still counted as active.
    pub fn wait_for_completion(&self) {
        let state = self.shared.lock();
        let _state = self
            .shared
            .idle
            .wait_while(state, |s| s.active > 0)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Tasks submitted but not yet finished.
    pub fn pending(&self) -> usize {
        self.shared.lock().active
    }

    /// Total number of tasks that panicked since the pool started.
    pub fn panicked(&self) -> usize {
        self.shared.lock().panicked
    }
}

pub struct WorkerPool {
    handle: PoolHandle,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn the workers described by `config`.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        if config.threads == 0 {
            return Err(PoolError::NoThreads);
        }

        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                queue: VecDeque::new(),
                active: 0,
                alive: 0,
                panicked: 0,
                stop: false,
            }),
            task_ready: Condvar::new(),
            idle: Condvar::new(),
        });

        let cores = if config.pin_to_cores {
            core_affinity::get_core_ids().unwrap_or_default()
        } else {
            Vec::new()
        };
        if config.pin_to_cores && cores.is_empty() {
            warn!("core pinning requested but no core ids are available");
        }

        // On a spawn failure `pool` is dropped, which stops and joins the
        // workers started so far.
        let mut pool = Self {
            handle: PoolHandle { shared },
            workers: Vec::with_capacity(config.threads),
        };

        for index in 0..config.threads {
            let shared = Arc::clone(&pool.handle.shared);
            let core = (!cores.is_empty()).then(|| cores[index % cores.len()]);

            pool.handle.shared.lock().alive += 1;
            let spawned = thread::Builder::new()
                .name(format!("boggle-worker-{index}"))
                .spawn(move || {
                    if let Some(core) = core {
                        if !core_affinity::set_for_current(core) {
                            warn!(worker = index, "failed to pin worker to core {}", core.id);
                        }
                    }
                    worker_loop(&shared, index);
                });

            match spawned {
                Ok(handle) => pool.workers.push(handle),
                Err(source) => {
                    pool.handle.shared.lock().alive -= 1;
                    return Err(PoolError::Spawn { index, source });
                }
            }
        }

        debug!(
            threads = config.threads,
            pinned = !cores.is_empty(),
            "worker pool started"
        );
        Ok(pool)
    }

    /// Pool with `threads` unpinned workers.
    pub fn with_threads(threads: usize) -> Result<Self, PoolError> {
        Self::new(PoolConfig {
            threads,
            pin_to_cores: false,
        })
    }

    #[inline]
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.handle.submit(task);
    }

    #[inline]
    pub fn wait_for_completion(&self) {
        self.handle.wait_for_completion();
    }

    #[inline]
    pub fn pending(&self) -> usize {
        self.handle.pending()
    }

    #[inline]
    pub fn panicked(&self) -> usize {
        self.handle.panicked()
    }

    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// A handle tasks can capture to submit follow-up work.
    pub fn handle(&self) -> PoolHandle {
        self.handle.clone()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.handle.shared.lock().stop = true;
        self.handle.shared.task_ready.notify_all();

        // Workers exit only once the queue is empty
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                error!("worker thread panicked outside a task");
            }
        }
        debug!("worker pool stopped");
    }
}

fn worker_loop(shared: &Shared, index: usize) {
    loop {
        let task = {
            let state = shared.lock();
            let mut state = shared
                .task_ready
                .wait_while(state, |s| !s.stop && s.queue.is_empty())
                .unwrap_or_else(PoisonError::into_inner);

            match state.queue.pop_front() {
                Some(task) => task,
                None => {
                    // Stopped and drained
                    state.alive -= 1;
                    trace!(worker = index, "worker exiting");
                    return;
                }
            }
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(task));
        if let Err(payload) = &outcome {
            error!(worker = index, "task panicked: {}", panic_message(&**payload));
        }

        let mut state = shared.lock();
        if outcome.is_err() {
            state.panicked += 1;
        }
        state.active -= 1;
        if state.active == 0 {
            shared.idle.notify_all();
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "<non-string panic payload>"
    }
}
