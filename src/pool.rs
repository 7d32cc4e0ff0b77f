//! Ordered worker pool: fan items out to scoped threads, gather results by index.

use std::num::NonZeroUsize;
use std::thread;

/// Apply `f` to every item on up to `jobs` worker threads.
///
/// Workers pull `(index, item)` pairs from a shared queue and send back
/// `(index, result)`; results are slotted by index, so the output order
/// always equals the input order regardless of which worker finished first.
/// With one job (or one item) everything runs on the calling thread.
pub fn map_ordered<T, R, F>(items: Vec<T>, jobs: NonZeroUsize, f: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Sync,
{
    let workers = jobs.get().min(items.len());
    if workers <= 1 {
        return items.into_iter().map(f).collect();
    }

    let total = items.len();
    let (job_tx, job_rx) = crossbeam_channel::unbounded::<(usize, T)>();
    let (result_tx, result_rx) = crossbeam_channel::unbounded::<(usize, R)>();

    for job in items.into_iter().enumerate() {
        // The receiver is alive until the scope below ends.
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    let f = &f;
    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for (index, item) in job_rx {
                    let _ = result_tx.send((index, f(item)));
                }
            });
        }
    });
    drop(result_tx);

    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| return None).take(total).collect();
    for (index, result) in result_rx {
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(result);
        }
    }

    return slots.into_iter().flatten().collect();
}

/// Parse a `--jobs` style count; zero means "one per available core".
pub fn jobs_or_available(requested: usize) -> NonZeroUsize {
    return NonZeroUsize::new(requested).unwrap_or_else(|| {
        return thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
    });
}
