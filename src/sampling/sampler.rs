//! Fan-out of raw radiocarbon ages over a bounded worker pool.
//!
//! Every age in the scan span goes into one shared queue. Each worker pops
//! ages until the queue reports empty, evaluates them, and appends the sample
//! to a shared result list. The caller blocks until all workers have exited.
//!
//! The first worker fault (degenerate distribution or panic) raises an abort
//! flag; remaining workers stop pulling work and the fault is returned instead
//! of an incomplete result set.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::domain::{CalendarGrid, CalibrationCurve, RangeSample};
use crate::error::Res14cError;
use crate::sampling::range::get_range;

/// Lock-protected stack of raw ages awaiting evaluation.
#[derive(Debug)]
pub struct WorkQueue {
    ages: Mutex<Vec<i64>>,
}

impl WorkQueue {
    /// Queue holding every integer age in `[from, to]`.
    pub fn span(from: i64, to: i64) -> Self {
        Self {
            ages: Mutex::new((from..=to).collect()),
        }
    }

    /// Take the next age; `None` once the queue is exhausted.
    pub fn pop(&self) -> Option<i64> {
        self.ages.lock().pop()
    }

    pub fn len(&self) -> usize {
        self.ages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ages.lock().is_empty()
    }
}

/// Evaluate every raw age in `[c14_from, c14_to]` on `workers` threads.
///
/// The returned samples are in completion order, which is unspecified.
pub fn sample_ranges(
    c14_from: i64,
    c14_to: i64,
    uncert: f64,
    curve: &CalibrationCurve,
    grid: &CalendarGrid,
    workers: usize,
) -> Result<Vec<RangeSample>, Res14cError> {
    let queue = WorkQueue::span(c14_from, c14_to);
    let expected = queue.len();
    let results: Mutex<Vec<RangeSample>> = Mutex::new(Vec::with_capacity(expected));
    let fault: Mutex<Option<Res14cError>> = Mutex::new(None);
    let abort = AtomicBool::new(false);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|i| format!("res14c-worker-{i}"))
        .build()
        .map_err(|e| Res14cError::WorkerPool(format!("failed to create thread pool: {e}")))?;

    pool.scope(|s| {
        for worker in 0..workers.max(1) {
            let (queue, results, fault, abort) = (&queue, &results, &fault, &abort);
            s.spawn(move |_| {
                let mut done = 0usize;
                while !abort.load(Ordering::Relaxed) {
                    let Some(age) = queue.pop() else {
                        break;
                    };
                    let evaluate = AssertUnwindSafe(|| get_range(age, uncert, curve, grid));
                    let outcome = catch_unwind(evaluate).unwrap_or_else(|_| {
                        Err(Res14cError::WorkerPool(format!(
                            "worker {worker} panicked evaluating 14C age {age}"
                        )))
                    });
                    match outcome {
                        Ok(sample) => {
                            results.lock().push(sample);
                            done += 1;
                        }
                        Err(e) => {
                            abort.store(true, Ordering::Relaxed);
                            fault.lock().get_or_insert(e);
                            break;
                        }
                    }
                }
                tracing::debug!(worker, evaluated = done, "worker finished");
            });
        }
    });

    if let Some(e) = fault.into_inner() {
        return Err(e);
    }
    let results = results.into_inner();
    if results.len() != expected {
        return Err(Res14cError::WorkerPool(format!(
            "expected {expected} range samples, collected {}",
            results.len()
        )));
    }
    Ok(results)
}
