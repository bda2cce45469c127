/*!
Initial Gaussian normalisation.

Run once at construction, before any assignment: elects a base variable for as many rows as possible and XOR-eliminates each base from every other row, so the reduced-echelon invariant the assignment orchestrators rely on holds from the first call.
Rows cancelled to nothing by the elimination are retired.

This runs outside the trail; nothing here is undone, as the normalised matrix *is* the propagator's initial state.
*/

use crate::{
    db::matrix::XorMatrix,
    misc::log::targets::{self},
    structures::{equation::EquationIndex, variable::Variable},
};

/// Brings `matrix` to reduced echelon form, retiring rows emptied by cancellation.
pub fn echelonize(matrix: &mut XorMatrix) {
    let nb_equations = matrix.nb_equations();
    let mut is_pivot = vec![false; nb_equations];
    // Rows which regained a member below the frontier variable through an earlier
    // elimination; such rows are skipped as pivot candidates for the frontier.
    let mut has_lower = vec![false; nb_equations];
    let mut conflicts: Vec<EquationIndex> = Vec::with_capacity(nb_equations);

    for variable in 0..matrix.nb_variables() as Variable {
        conflicts.clear();
        for position in 0..matrix.occurrence_count(variable) {
            let equation = matrix.equations_of(variable)[position];
            if !is_pivot[equation as usize]
                && !has_lower[equation as usize]
                && !matrix.is_base(variable)
            {
                matrix.set_base(equation, variable);
                is_pivot[equation as usize] = true;
            } else {
                conflicts.push(equation);
            }
        }

        if let Some(pivot) = matrix.pivot_of(variable) {
            for &target in &conflicts {
                matrix.xor(target, pivot);
                if !is_pivot[target as usize] {
                    has_lower[target as usize] = lower_member_exists(matrix, target, variable);
                }
            }
        }
    }

    for equation in 0..nb_equations as EquationIndex {
        if matrix.nb_unknowns(equation) == 0 {
            log::trace!(target: targets::BASIS, "Equation {equation} cancelled during normalisation");
            matrix.remove_equation(equation);
        }
    }
}

/// True if `equation` holds a live non-false member below `frontier`.
fn lower_member_exists(matrix: &XorMatrix, equation: EquationIndex, frontier: Variable) -> bool {
    matrix
        .variables_of(equation)
        .iter()
        .any(|&variable| variable < frontier && !matrix.is_false(variable))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echelon_established() {
        let mut matrix =
            XorMatrix::new(5, &[vec![0, 1, 2], vec![2, 3, 4], vec![0, 1, 3, 4]]).unwrap();
        echelonize(&mut matrix);

        assert!(matrix.stable_state());
        for equation in matrix.active_equations() {
            let base = matrix.base_variable_of(equation);
            assert!(base.is_some());
            // The base occupies no other active row.
            assert_eq!(matrix.equations_of(base.unwrap()), &[equation]);
        }
    }

    #[test]
    fn dependent_rows_are_retired() {
        // The third row is the sum of the first two and must cancel away.
        let mut matrix =
            XorMatrix::new(5, &[vec![0, 1, 2], vec![2, 3, 4], vec![0, 1, 3, 4]]).unwrap();
        echelonize(&mut matrix);
        assert_eq!(matrix.active_equations().count(), 2);
    }
}
