//! Exhaustive comparison of the propagator against a reference decision procedure.
//!
//! A depth-first host drives the propagator over every branch, instantiating forced
//! assignments as the contract requires, and collects the complete valuations the
//! propagator accepts.
//!
//! The reference reads each equation as a sum of vectors over GF(2): a complete
//! valuation is supportable exactly when no combination of equations, restricted to
//! the variables set true, collapses to a single true variable (which would force
//! that variable's vector to zero).
//! This is checked by eliminating the true-restricted rows to reduced form and
//! looking for a singleton.

use gauss_xor::{config::Config, procedures::inference::InferenceMode, propagator::Propagator};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Assigns `variable` and recursively instantiates whatever the call forces.
///
/// Returns the count of committed frames, or `None` after retracting them all if a
/// conflict (direct or downstream) killed the branch.
fn instantiate(propagator: &mut Propagator, variable: u32, value: bool) -> Option<usize> {
    match propagator.value_of(variable) {
        Some(held) => return if held == value { Some(0) } else { None },
        None => {}
    }

    let forced = match propagator.assign(variable, value) {
        Ok(forced) => forced.to_vec(),
        Err(_) => return None,
    };

    let mut frames = 1;
    for propagation in forced {
        match instantiate(propagator, propagation.variable, propagation.value) {
            Some(committed) => frames += committed,
            None => {
                for _ in 0..frames {
                    propagator.retract().unwrap();
                }
                return None;
            }
        }
    }
    Some(frames)
}

/// Collects every complete valuation the propagator accepts, as bit masks.
fn accepted_valuations(propagator: &mut Propagator, nb_variables: u32, found: &mut Vec<u64>) {
    let next = (0..nb_variables).find(|&variable| propagator.value_of(variable).is_none());
    let Some(variable) = next else {
        let mask = (0..nb_variables)
            .filter(|&variable| propagator.value_of(variable) == Some(true))
            .fold(0_u64, |mask, variable| mask | 1 << variable);
        found.push(mask);
        return;
    };

    for value in [false, true] {
        if let Some(frames) = instantiate(propagator, variable, value) {
            accepted_valuations(propagator, nb_variables, found);
            for _ in 0..frames {
                propagator.retract().unwrap();
            }
        }
    }
}

/// True when the valuation in `mask` is supportable in the vector reading.
fn supportable(equations: &[Vec<u32>], mask: u64) -> bool {
    // Reduce the true-restricted rows; a singleton in the span forces a zero vector.
    let mut reduced: Vec<u64> = Vec::with_capacity(equations.len());
    for equation in equations {
        let mut row = equation
            .iter()
            .filter(|&&variable| mask >> variable & 1 == 1)
            .fold(0_u64, |row, &variable| row | 1 << variable);
        for &pivot in &reduced {
            let lead = pivot & pivot.wrapping_neg();
            if row & lead != 0 {
                row ^= pivot;
            }
        }
        if row != 0 {
            let lead = row & row.wrapping_neg();
            for pivot in &mut reduced {
                if *pivot & lead != 0 {
                    *pivot ^= row;
                }
            }
            reduced.push(row);
        }
    }
    reduced.iter().all(|row| row.count_ones() != 1)
}

fn reference_valuations(nb_variables: u32, equations: &[Vec<u32>]) -> Vec<u64> {
    (0..1_u64 << nb_variables)
        .filter(|&mask| supportable(equations, mask))
        .collect()
}

fn check_instance(nb_variables: u32, equations: &[Vec<u32>], inference: InferenceMode) {
    let config = Config { inference };
    let mut propagator = Propagator::new(nb_variables as usize, equations, config).unwrap();

    let mut found = Vec::new();
    accepted_valuations(&mut propagator, nb_variables, &mut found);
    assert_eq!(propagator.depth(), 0);

    found.sort_unstable();
    found.dedup();
    assert_eq!(
        found,
        reference_valuations(nb_variables, equations),
        "divergence under {inference:?} on {equations:?}"
    );
}

mod fixed_instances {

    use super::*;

    const INSTANCES: &[(u32, &[&[u32]])] = &[
        (2, &[&[0, 1]]),
        (4, &[&[0, 2, 3], &[1, 2, 3]]),
        (4, &[&[0, 1], &[1, 2], &[0, 2], &[1, 2, 3]]),
        (7, &[&[0, 1, 2], &[2, 3, 4], &[4, 5, 6]]),
        (6, &[&[0, 1, 2], &[1, 2, 3], &[2, 3, 4], &[3, 4, 5]]),
        (5, &[&[0, 1, 2, 3, 4], &[0, 1], &[2, 3]]),
    ];

    #[test]
    fn full_matches_the_reference() {
        for (nb_variables, equations) in INSTANCES {
            let equations: Vec<Vec<u32>> =
                equations.iter().map(|members| members.to_vec()).collect();
            check_instance(*nb_variables, &equations, InferenceMode::Full);
        }
    }

    #[test]
    fn partial_matches_the_reference() {
        for (nb_variables, equations) in INSTANCES {
            let equations: Vec<Vec<u32>> =
                equations.iter().map(|members| members.to_vec()).collect();
            check_instance(*nb_variables, &equations, InferenceMode::Partial);
        }
    }
}

mod random_instances {

    use super::*;

    fn random_equations(rng: &mut StdRng, nb_variables: u32, nb_equations: usize) -> Vec<Vec<u32>> {
        let mut equations = Vec::with_capacity(nb_equations);
        for _ in 0..nb_equations {
            let size = rng.random_range(2..=4.min(nb_variables));
            let mut members: Vec<u32> = Vec::with_capacity(size as usize);
            while members.len() < size as usize {
                let variable = rng.random_range(0..nb_variables);
                if !members.contains(&variable) {
                    members.push(variable);
                }
            }
            equations.push(members);
        }
        equations
    }

    #[test]
    fn full_matches_the_reference() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..64 {
            let nb_variables = rng.random_range(3..=9);
            let nb_equations = rng.random_range(1..=6);
            let equations = random_equations(&mut rng, nb_variables, nb_equations);
            check_instance(nb_variables, &equations, InferenceMode::Full);
        }
    }

    #[test]
    fn partial_matches_the_reference() {
        let mut rng = StdRng::seed_from_u64(29);
        for _ in 0..64 {
            let nb_variables = rng.random_range(3..=9);
            let nb_equations = rng.random_range(1..=6);
            let equations = random_equations(&mut rng, nb_variables, nb_equations);
            check_instance(nb_variables, &equations, InferenceMode::Partial);
        }
    }
}
