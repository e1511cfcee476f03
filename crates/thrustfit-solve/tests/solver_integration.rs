//! End-to-end searches over a four-corner reaction-control rig.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use glam::DVec3;
use rand_chacha::ChaCha8Rng;

use thrustfit_core::allocation::ThrusterMap;
use thrustfit_core::contribution::ContributionModel;
use thrustfit_core::score::SolutionError;
use thrustfit_core::thruster::Thruster;

use thrustfit_solve::adapter::{
    AllocationProblem, SearchDriver, SessionContext, SolveCallbacks,
};
use thrustfit_solve::generate::objective_for;
use thrustfit_solve::session::{spawn_search, SessionConfig};

/// Four opposed-pair thrusters at the corners of a unit square, each able
/// to push 10 N along +Z or -Z.
fn corner_rig() -> ContributionModel {
    let thrusters = vec![
        Thruster::opposed(DVec3::new(1.0, 1.0, 0.0), DVec3::Z, 10.0),
        Thruster::opposed(DVec3::new(-1.0, 1.0, 0.0), DVec3::Z, 10.0),
        Thruster::opposed(DVec3::new(-1.0, -1.0, 0.0), DVec3::Z, 10.0),
        Thruster::opposed(DVec3::new(1.0, -1.0, 0.0), DVec3::Z, 10.0),
    ];
    ContributionModel::build(&thrusters, DVec3::ZERO).unwrap()
}

/// Net force and torque a map produces on a model, at face value.
fn net_output(map: &ThrusterMap, model: &ContributionModel) -> (DVec3, DVec3) {
    let mut force = DVec3::ZERO;
    let mut torque = DVec3::ZERO;
    for (level, contribution) in map.entries().iter().zip(model.entries()) {
        force += contribution.translation_force * level.percent;
        torque += contribution.torque * level.percent;
    }
    (force, torque)
}

fn translation_problem() -> AllocationProblem {
    let model = corner_rig();
    let objective = objective_for(&model, Some(DVec3::Z), None);
    AllocationProblem::new(model, objective).unwrap()
}

/// A small generational search: mutate every member, keep improvements,
/// report each generation and every new overall best.
struct PopulationSearch {
    population: usize,
    generations: usize,
}

impl SearchDriver for PopulationSearch {
    fn run(
        &mut self,
        problem: &AllocationProblem,
        ctx: &SessionContext<'_>,
        rng: &mut ChaCha8Rng,
    ) -> Vec<f64> {
        let mut members: Vec<(Vec<f64>, SolutionError)> = (0..self.population)
            .map(|_| {
                let raw = problem.sample(rng);
                let error = problem.evaluate(&raw).unwrap();
                (raw, error)
            })
            .collect();

        let mut best = members[0].clone();
        for member in &members {
            if member.1.total < best.1.total {
                best = member.clone();
            }
        }
        ctx.report_best(&best.0, &best.1);

        for _ in 0..self.generations {
            if ctx.cancelled() {
                break;
            }
            for member in &mut members {
                let candidate = problem.mutate_sample(&member.0, rng).unwrap();
                let error = problem.evaluate(&candidate).unwrap();
                if error.total < member.1.total {
                    *member = (candidate, error);
                }
                if member.1.total < best.1.total {
                    best = member.clone();
                    ctx.report_best(&best.0, &best.1);
                }
            }
            ctx.report_generation(&members);
        }
        best.0
    }
}

// --- Translation ---

#[test]
fn population_search_aligns_translation() {
    let model = corner_rig();
    let objective = objective_for(&model, Some(DVec3::Z), None);
    let problem = AllocationProblem::new(model.clone(), objective).unwrap();

    let handle = spawn_search(
        problem.clone(),
        PopulationSearch {
            population: 8,
            generations: 60,
        },
        SolveCallbacks::new(),
        SessionConfig { seed: 42 },
    );
    let map = handle.wait().unwrap();

    assert_eq!(map.len(), 8);
    assert_eq!(map.max_percent(), 1.0);

    let (force, _) = net_output(&map, &model);
    assert!(
        force.z > 0.0,
        "Solved allocation should push along +Z, got {force}"
    );
    let error = problem.evaluate(&map.levels()).unwrap();
    assert!(
        error.total < 1.0e6,
        "Solved allocation should be far from the degenerate sentinel, total {}",
        error.total
    );
}

// --- Rotation ---

#[test]
fn population_search_aligns_yaw_torque() {
    let model = corner_rig();
    // Pure +X torque is reachable with zero net force by pairing +Z fire
    // on the +Y corners with -Z fire on the -Y corners.
    let objective = objective_for(&model, None, Some(DVec3::X));
    let problem = AllocationProblem::new(model.clone(), objective).unwrap();

    let handle = spawn_search(
        problem,
        PopulationSearch {
            population: 8,
            generations: 80,
        },
        SolveCallbacks::new(),
        SessionConfig { seed: 7 },
    );
    let map = handle.wait().unwrap();

    let (_, torque) = net_output(&map, &model);
    assert!(
        torque.x > 0.0,
        "Solved allocation should twist along +X, got {torque}"
    );
}

// --- Reporting ---

#[test]
fn generation_reports_are_normalized_and_sized() {
    let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_sizes = Arc::clone(&seen);
    let best_totals: Arc<Mutex<Vec<f64>>> = Arc::new(Mutex::new(Vec::new()));
    let reported_totals = Arc::clone(&best_totals);

    let callbacks = SolveCallbacks::new()
        .on_best(move |map, error| {
            assert_eq!(map.max_percent(), 1.0);
            reported_totals.lock().unwrap().push(error.total);
        })
        .on_generation(move |generation| {
            for (map, _) in generation {
                assert_eq!(
                    map.max_percent(),
                    1.0,
                    "Generation snapshots must be normalized"
                );
            }
            seen_sizes.lock().unwrap().push(generation.len());
        });

    let handle = spawn_search(
        translation_problem(),
        PopulationSearch {
            population: 6,
            generations: 20,
        },
        callbacks,
        SessionConfig::default(),
    );
    handle.wait().unwrap();

    let sizes = seen.lock().unwrap();
    assert_eq!(sizes.len(), 20, "One report per generation");
    assert!(sizes.iter().all(|&size| size == 6));

    let totals = best_totals.lock().unwrap();
    assert!(!totals.is_empty());
    for pair in totals.windows(2) {
        assert!(pair[1] <= pair[0], "Best reports must never get worse");
    }
}

// --- Determinism and cancellation ---

#[test]
fn same_seed_reproduces_the_solved_map() {
    let run = || {
        let handle = spawn_search(
            translation_problem(),
            PopulationSearch {
                population: 6,
                generations: 30,
            },
            SolveCallbacks::new(),
            SessionConfig { seed: 1234 },
        );
        serde_json::to_string(&handle.wait().unwrap()).unwrap()
    };
    assert_eq!(run(), run(), "Same seed and driver must reproduce the session");
}

#[test]
fn cancelled_search_settles_quickly() {
    let handle = spawn_search(
        translation_problem(),
        PopulationSearch {
            population: 8,
            generations: usize::MAX,
        },
        SolveCallbacks::new(),
        SessionConfig::default(),
    );

    std::thread::sleep(Duration::from_millis(20));
    let token = handle.cancel_token();
    assert!(!token.is_cancelled());
    token.cancel();

    let map = handle.wait().unwrap();
    assert_eq!(map.len(), 8, "Cancelled session still settles on a complete map");
    assert_eq!(map.max_percent(), 1.0);
}
