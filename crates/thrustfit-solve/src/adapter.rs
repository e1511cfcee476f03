//! Boundary between the allocation engine and an external search loop.
//!
//! The loop itself lives outside this crate. What lives here is the
//! problem surface it drives: sampling, evaluation, and mutation over
//! raw level vectors, plus the context a running driver reports through.
//! Raw samples cross the boundary as plain `Vec<f64>`; complete,
//! normalized [`ThrusterMap`]s come back out.

use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use thrustfit_core::allocation::ThrusterMap;
use thrustfit_core::contribution::ContributionModel;
use thrustfit_core::error::{AllocError, AllocResult};
use thrustfit_core::score::{ErrorWeights, SolutionError};
use thrustfit_core::types::Objective;

use crate::generate;
use crate::mutate::{self, MutationTuning};
use crate::score;
use crate::session::CancelToken;

/// One thruster allocation problem: everything a search loop needs to
/// explore the allocation space. Holds no state between calls; the loop
/// owns its own population and bookkeeping.
#[derive(Debug, Clone)]
pub struct AllocationProblem {
    model: ContributionModel,
    objective: Objective,
    weights: ErrorWeights,
    mutation: MutationTuning,
}

impl AllocationProblem {
    /// Fails immediately on an empty objective rather than at the first
    /// evaluation.
    pub fn new(model: ContributionModel, objective: Objective) -> AllocResult<Self> {
        if objective.is_empty() {
            return Err(AllocError::MissingObjective);
        }
        Ok(Self {
            model,
            objective,
            weights: ErrorWeights::default(),
            mutation: MutationTuning::default(),
        })
    }

    pub fn with_weights(mut self, weights: ErrorWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_mutation(mut self, mutation: MutationTuning) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn model(&self) -> &ContributionModel {
        &self.model
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Length of one raw sample: one level per emitter.
    pub fn sample_len(&self) -> usize {
        self.model.len()
    }

    /// Draw a fresh random sample, already normalized.
    pub fn sample(&self, rng: &mut ChaCha8Rng) -> Vec<f64> {
        generate::random_map(&self.model, rng).levels()
    }

    /// Score one raw sample. The sample is normalized before scoring so
    /// the loop's working scale never biases the error.
    pub fn evaluate(&self, raw: &[f64]) -> AllocResult<SolutionError> {
        let map = ThrusterMap::from_levels(&self.model, raw)?.normalized();
        score::score(&map, &self.model, &self.objective, &self.weights)
    }

    /// Mutate a raw sample in its unnormalized working form.
    pub fn mutate_sample(&self, raw: &[f64], rng: &mut ChaCha8Rng) -> AllocResult<Vec<f64>> {
        let map = ThrusterMap::from_levels(&self.model, raw)?;
        Ok(mutate::mutate(&map, &self.mutation, rng).levels())
    }

    /// Adapt a winning raw sample into the normalized map callers see.
    pub fn adapt(&self, raw: &[f64]) -> AllocResult<ThrusterMap> {
        Ok(ThrusterMap::from_levels(&self.model, raw)?.normalized())
    }
}

/// Observation hooks for a running session. Both are optional. They may
/// run on the worker thread between evaluations, so they must return
/// quickly and never block.
#[derive(Default)]
pub struct SolveCallbacks {
    /// Fired for each new best allocation, normalized, with its error.
    on_best: Option<Box<dyn Fn(&ThrusterMap, &SolutionError) + Send + Sync>>,
    /// Fired with whole-generation snapshots, normalized.
    on_generation: Option<Box<dyn Fn(&[(ThrusterMap, SolutionError)]) + Send + Sync>>,
}

impl SolveCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_best(
        mut self,
        callback: impl Fn(&ThrusterMap, &SolutionError) + Send + Sync + 'static,
    ) -> Self {
        self.on_best = Some(Box::new(callback));
        self
    }

    pub fn on_generation(
        mut self,
        callback: impl Fn(&[(ThrusterMap, SolutionError)]) + Send + Sync + 'static,
    ) -> Self {
        self.on_generation = Some(Box::new(callback));
        self
    }
}

/// What a running driver sees of its session: the cancellation flag and
/// the reporting side of the callbacks. Everything reported is adapted
/// to normalized maps first; raw working vectors never leave the loop.
pub struct SessionContext<'a> {
    problem: &'a AllocationProblem,
    cancel: CancelToken,
    callbacks: &'a SolveCallbacks,
}

impl<'a> SessionContext<'a> {
    pub(crate) fn new(
        problem: &'a AllocationProblem,
        cancel: CancelToken,
        callbacks: &'a SolveCallbacks,
    ) -> Self {
        Self {
            problem,
            cancel,
            callbacks,
        }
    }

    /// True once the session has been asked to stop. A driver seeing
    /// this must stop launching evaluations and settle on its best.
    pub fn cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Report a sample better than anything seen so far.
    pub fn report_best(&self, raw: &[f64], error: &SolutionError) {
        debug!(total = error.total, "new best allocation");
        let Some(on_best) = &self.callbacks.on_best else {
            return;
        };
        match self.problem.adapt(raw) {
            Ok(map) => on_best(&map, error),
            Err(err) => warn!(%err, "dropping best-sample report that does not fit the model"),
        }
    }

    /// Report a whole generation of scored samples.
    pub fn report_generation(&self, generation: &[(Vec<f64>, SolutionError)]) {
        let Some(on_generation) = &self.callbacks.on_generation else {
            return;
        };
        let mut adapted = Vec::with_capacity(generation.len());
        for (raw, error) in generation {
            match self.problem.adapt(raw) {
                Ok(map) => adapted.push((map, *error)),
                Err(err) => {
                    warn!(%err, "dropping generation report that does not fit the model");
                    return;
                }
            }
        }
        on_generation(&adapted);
    }
}

/// The seam an external stochastic search loop implements.
///
/// The engine supplies the problem, the session context, and a dedicated
/// random source; the driver owns iteration policy and returns the best
/// raw sample it found. Population management, convergence checks, and
/// any parallel fan-out are the driver's business, not this crate's.
pub trait SearchDriver: Send {
    fn run(
        &mut self,
        problem: &AllocationProblem,
        ctx: &SessionContext<'_>,
        rng: &mut ChaCha8Rng,
    ) -> Vec<f64>;
}
