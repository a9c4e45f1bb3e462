//! A dedicated pool of worker threads that grows the trees.
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::common::constants::WORKER_STACK_SIZE;
use crate::common::checker;
use crate::error::Result;


/// A `rayon` thread pool with exactly `n_jobs` workers.
/// Work submitted through [`WorkerPool::install`],
/// including nested parallel iterators, runs on these workers only.
#[derive(Debug)]
pub struct WorkerPool {
    pool: ThreadPool,
}


impl WorkerPool {
    /// Spawn `n_jobs` workers.
    /// Each worker gets a large stack since trees are grown recursively.
    pub fn new(n_jobs: usize) -> Result<Self> {
        checker::check_positive("n_jobs", n_jobs)?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(n_jobs)
            .thread_name(|i| format!("forest-worker-{i}"))
            .stack_size(WORKER_STACK_SIZE)
            .build()?;

        debug!(n_jobs, "spawned worker pool");
        Ok(Self { pool })
    }


    /// Returns the number of workers.
    #[inline]
    pub fn n_jobs(&self) -> usize {
        self.pool.current_num_threads()
    }


    /// Run `op` inside the pool and wait for its result.
    pub fn install<OP, R>(&self, op: OP) -> R
        where OP: FnOnce() -> R + Send,
              R: Send,
    {
        self.pool.install(op)
    }
}
