//! Solving-session lifetime: worker spawn, cooperative cancellation, and
//! the completion handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use thrustfit_core::allocation::ThrusterMap;
use thrustfit_core::error::AllocResult;

use crate::adapter::{AllocationProblem, SearchDriver, SessionContext, SolveCallbacks};

/// Configuration for one solving session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionConfig {
    /// RNG seed. Same seed, same driver, same problem: same session.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Cooperative cancellation flag shared by the handle and the worker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. Idempotent; the worker settles with its best
    /// result instead of aborting.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Handle to a running solving session.
pub struct SolveHandle {
    cancel: CancelToken,
    join: JoinHandle<AllocResult<ThrusterMap>>,
}

impl SolveHandle {
    /// Ask the worker to stop launching evaluations and settle.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A clone of the session's cancellation token, for wiring into UI
    /// or timeout plumbing.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Block until the session settles. The final map is complete and
    /// normalized, whether the driver ran to convergence or was
    /// cancelled partway. A panic on the worker resumes here.
    pub fn wait(self) -> AllocResult<ThrusterMap> {
        match self.join.join() {
            Ok(outcome) => outcome,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Spawn a driver against a problem on a dedicated worker thread.
///
/// The worker owns its own seeded RNG, so concurrent sessions never
/// share random state. Callbacks fire on the worker thread while the
/// driver runs.
pub fn spawn_search<D>(
    problem: AllocationProblem,
    mut driver: D,
    callbacks: SolveCallbacks,
    config: SessionConfig,
) -> SolveHandle
where
    D: SearchDriver + 'static,
{
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();

    let join = std::thread::Builder::new()
        .name("thrustfit-search".into())
        .spawn(move || {
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
            info!(
                emitters = problem.sample_len(),
                seed = config.seed,
                "search session started"
            );

            let ctx = SessionContext::new(&problem, worker_cancel, &callbacks);
            let raw = driver.run(&problem, &ctx, &mut rng);
            let cancelled = ctx.cancelled();

            let outcome = problem.adapt(&raw);
            match &outcome {
                Ok(map) => info!(
                    used = map.used().count(),
                    cancelled = cancelled,
                    "search session settled"
                ),
                Err(err) => warn!(%err, "search driver returned a sample that does not fit the model"),
            }
            outcome
        })
        .expect("Failed to spawn search worker thread");

    SolveHandle { cancel, join }
}
