//! Fixed-size worker pool for a batch of independent jobs.
//!
//! Jobs are declared in a fixed order. The scheduler hands the costliest
//! ones to workers first so that a long job is not left running alone at
//! the end, but results always come back in declaration order: every job
//! owns a one-shot result slot, and the collector reads the slots in
//! order, waiting on whichever is still empty.
//!
//! ```text
//!   declared jobs ──sort by cost──▶ bounded queue ──▶ worker 0..n
//!                                                        │
//!   collector ◀── slot 0, slot 1, ... (declaration order) ┘
//! ```
//!
//! All workers read the same [`EncodedSequence`]; each job builds its own
//! tables, so the queue and the slots are the only shared mutable state.
//! Every queued job runs to completion. There is no cancellation.

use std::{cmp::Reverse, fmt, num::NonZeroUsize, thread};

use crossbeam::channel::{bounded, Receiver, Sender};

use crate::{
    report::{Report, ReportKind},
    sequence::EncodedSequence,
};

#[cfg(feature = "tracing")]
use tracing::{debug, info_span};

/// The work a job performs over the shared sequence.
pub type Task<T> = Box<dyn FnOnce(&EncodedSequence) -> T + Send>;

/// A declared unit of work with a scheduling cost.
pub struct Job<T> {
    name: String,
    cost: usize,
    task: Task<T>,
}

impl<T> Job<T> {
    /// Declares a job. Higher `cost` jobs are started first.
    pub fn new<F>(name: impl Into<String>, cost: usize, task: F) -> Self
    where
        F: FnOnce(&EncodedSequence) -> T + Send + 'static,
    {
        Self {
            name: name.into(),
            cost,
            task: Box::new(task),
        }
    }

    /// Name used in logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scheduling cost.
    #[must_use]
    pub const fn cost(&self) -> usize {
        self.cost
    }
}

impl Job<Report> {
    /// A job that runs one report.
    #[must_use]
    pub fn report(kind: ReportKind) -> Self {
        Self::new(kind.to_string(), kind.cost(), move |dna| kind.run(dna))
    }
}

impl<T> fmt::Debug for Job<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("name", &self.name)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

/// A job on the queue, carrying the write end of its result slot.
struct Queued<T> {
    index: usize,
    name: String,
    task: Task<T>,
    slot: Sender<T>,
}

/// Number of parallel execution units, at least 1.
pub fn available_workers() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Runs a batch of jobs on a fixed pool of worker threads.
///
/// # Example
///
/// ```rust
/// use knucleotide::scheduler::{Job, JobScheduler};
/// use knucleotide::sequence::EncodedSequence;
///
/// let dna = EncodedSequence::from_ascii(b"GATTACA")?;
/// let jobs = vec![
///     Job::new("length", 1, |dna: &EncodedSequence| dna.len()),
///     Job::new("adenines", 2, |dna: &EncodedSequence| {
///         dna.codes().iter().filter(|&&c| c == 0).count()
///     }),
/// ];
///
/// // Declaration order, whatever order the jobs ran in.
/// assert_eq!(JobScheduler::new().run(&dna, jobs), vec![7, 3]);
/// # Ok::<(), knucleotide::error::InvalidSymbolError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobScheduler {
    workers: usize,
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl JobScheduler {
    /// A scheduler with one worker per available execution unit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_workers(available_workers())
    }

    /// A scheduler with `workers` threads, at least 1.
    #[must_use]
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Configured pool size.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Runs every job and returns their outputs in declaration order.
    pub fn run<T: Send>(&self, dna: &EncodedSequence, jobs: Vec<Job<T>>) -> Vec<T> {
        let mut outputs = Vec::with_capacity(jobs.len());
        self.run_with(dna, jobs, |_, output| outputs.push(output));
        outputs
    }

    /// Runs every job, handing each output to `sink` in declaration order.
    ///
    /// `sink` is called on the calling thread as soon as the next output
    /// in declaration order is ready, while later jobs may still run.
    pub fn run_with<T, F>(&self, dna: &EncodedSequence, jobs: Vec<Job<T>>, mut sink: F)
    where
        T: Send,
        F: FnMut(usize, T),
    {
        if jobs.is_empty() {
            return;
        }

        let pool = self.workers.min(jobs.len());

        #[cfg(feature = "tracing")]
        let _span = info_span!("run_jobs", jobs = jobs.len(), workers = pool).entered();

        let mut slots = Vec::with_capacity(jobs.len());
        let mut pending = Vec::with_capacity(jobs.len());
        for (index, job) in jobs.into_iter().enumerate() {
            let (slot, result) = bounded(1);
            slots.push(result);
            pending.push((
                job.cost,
                Queued {
                    index,
                    name: job.name,
                    task: job.task,
                    slot,
                },
            ));
        }
        // Stable sort: equal costs keep declaration order.
        pending.sort_by_key(|(cost, _)| Reverse(*cost));

        let (queue, jobs_rx) = bounded::<Queued<T>>(pending.len());

        thread::scope(|scope| {
            for worker in 0..pool {
                let jobs_rx = jobs_rx.clone();
                scope.spawn(move || work(worker, &jobs_rx, dna));
            }
            drop(jobs_rx);

            for (_, queued) in pending {
                #[cfg(feature = "tracing")]
                debug!(job = queued.index, name = %queued.name, "Job queued");

                // The queue holds every job, so this only fails once all
                // workers are gone.
                if queue.send(queued).is_err() {
                    break;
                }
            }
            // Closing the queue lets workers exit once it is drained.
            drop(queue);

            for (index, result) in slots.into_iter().enumerate() {
                match result.recv() {
                    Ok(output) => sink(index, output),
                    // A worker panicked; leaving the scope re-raises it.
                    Err(_) => break,
                }
            }
        });
    }
}

fn work<T>(worker: usize, jobs: &Receiver<Queued<T>>, dna: &EncodedSequence) {
    for queued in jobs {
        let Queued {
            index,
            name,
            task,
            slot,
        } = queued;

        #[cfg(feature = "tracing")]
        debug!(worker, job = index, name = %name, "Job running");

        let output = task(dna);

        #[cfg(feature = "tracing")]
        debug!(worker, job = index, name = %name, "Job completed");
        #[cfg(not(feature = "tracing"))]
        let _ = (worker, index, name);

        // Each slot is written exactly once; the collector holds the
        // other end until it has read it.
        let _ = slot.send(output);
    }
}
