//! Checks that retraction and conflict rollback restore the matrix exactly.

use gauss_xor::{
    config::Config, db::matrix::XorMatrix, procedures::inference::InferenceMode,
    propagator::Propagator,
};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Everything observable about the matrix, in a comparable form.
#[derive(Debug, PartialEq, Eq)]
struct Snapshot {
    valuation: Vec<Option<bool>>,
    active: Vec<u32>,
    rows: Vec<Vec<u32>>,
    counters: Vec<(u32, u32)>,
    bases: Vec<Option<u32>>,
}

fn snapshot(matrix: &XorMatrix) -> Snapshot {
    let active: Vec<u32> = matrix.active_equations().collect();
    Snapshot {
        valuation: (0..matrix.nb_variables() as u32)
            .map(|variable| matrix.value_of(variable))
            .collect(),
        rows: active
            .iter()
            .map(|&equation| {
                let mut members = matrix.variables_of(equation).to_vec();
                members.sort_unstable();
                members
            })
            .collect(),
        counters: active
            .iter()
            .map(|&equation| (matrix.nb_unknowns(equation), matrix.nb_trues(equation)))
            .collect(),
        bases: active
            .iter()
            .map(|&equation| matrix.base_variable_of(equation))
            .collect(),
        active,
    }
}

#[test]
fn retraction_restores_each_intermediate_state() {
    let equations: Vec<Vec<u32>> = vec![
        vec![0, 1, 2],
        vec![2, 3, 4],
        vec![4, 5, 6],
        vec![1, 3, 5],
    ];
    let mut propagator = Propagator::new(7, &equations, Config::default()).unwrap();

    let mut snapshots = vec![snapshot(propagator.matrix())];
    for (variable, value) in [(0, false), (1, true), (3, false)] {
        propagator.assign(variable, value).unwrap();
        snapshots.push(snapshot(propagator.matrix()));
    }

    while let Some(expected) = snapshots.pop() {
        assert_eq!(snapshot(propagator.matrix()), expected);
        if propagator.depth() == 0 {
            break;
        }
        propagator.retract().unwrap();
    }
    assert!(snapshots.is_empty());
}

#[test]
fn a_conflicted_assignment_leaves_no_trace() {
    let mut propagator = Propagator::new(3, &[vec![0, 1, 2]], Config::default()).unwrap();

    propagator.assign(0, true).unwrap();
    propagator.assign(1, false).unwrap();
    let before = snapshot(propagator.matrix());

    // The remaining member is forced true; fixing it false conflicts.
    assert!(propagator.assign(2, false).is_err());
    assert_eq!(snapshot(propagator.matrix()), before);

    assert!(propagator.assign(2, true).is_ok());
}

#[test]
fn random_walks_return_to_the_initial_state() {
    let mut rng = StdRng::seed_from_u64(71);

    for _ in 0..32 {
        let nb_variables: u32 = rng.random_range(4..=9);
        let nb_equations = rng.random_range(2..=6);
        let mut equations = Vec::with_capacity(nb_equations);
        for _ in 0..nb_equations {
            let size = rng.random_range(2..=4);
            let mut members: Vec<u32> = Vec::with_capacity(size);
            while members.len() < size {
                let variable = rng.random_range(0..nb_variables);
                if !members.contains(&variable) {
                    members.push(variable);
                }
            }
            equations.push(members);
        }

        let inference = match rng.random_bool(0.5) {
            true => InferenceMode::Full,
            false => InferenceMode::Partial,
        };
        let mut propagator =
            Propagator::new(nb_variables as usize, &equations, Config { inference }).unwrap();
        let initial = snapshot(propagator.matrix());

        // A random mix of assignments (some conflicting, some not) and retractions.
        for _ in 0..64 {
            if propagator.depth() > 0 && rng.random_bool(0.3) {
                propagator.retract().unwrap();
                continue;
            }
            let variable = rng.random_range(0..nb_variables);
            if propagator.value_of(variable).is_none() {
                // A conflicted call must have already undone itself.
                let _ = propagator.assign(variable, rng.random_bool(0.5));
            }
        }

        while propagator.depth() > 0 {
            propagator.retract().unwrap();
        }
        assert_eq!(snapshot(propagator.matrix()), initial);
    }
}
