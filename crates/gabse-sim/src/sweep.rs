//! Independent runs over a parameter list.
//!
//! An engine is single-threaded; throughput for experiments comes from
//! running many engines at once.  With the `parallel` feature the runs are
//! spread over Rayon's thread pool; without it they run one after another.
//! Either way results come back in input order.

use gabse_core::SimRng;

/// Run `run_one` once per parameter set and collect the results in input
/// order.
///
/// ```rust,ignore
/// let seeds = sweep_seeds(42, 16);
/// let outcomes = run_sweep(seeds, |seed| {
///     let config = SimConfig { seed, ..SimConfig::default() };
///     let mut engine = build_outbreak(config)?;
///     engine.run(Exhaust, &mut NoopObserver)
/// });
/// ```
pub fn run_sweep<I, T, F>(params: Vec<I>, run_one: F) -> Vec<T>
where
    I: Send,
    T: Send,
    F: Fn(I) -> T + Send + Sync,
{
    #[cfg(not(feature = "parallel"))]
    {
        params.into_iter().map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        params.into_par_iter().map(|p| run_one(p)).collect()
    }
}

/// Derive `n` independent seeds from one master seed.  The same master
/// always yields the same list.
pub fn sweep_seeds(master: u64, n: usize) -> Vec<u64> {
    let mut rng = SimRng::new(master);
    (0..n as u64).map(|i| rng.child_seed(i)).collect()
}
