/*!
Inference strategies: what to conclude from a row whose unknown count has dropped to one.

With a single unknown member left, the abstract XOR rule decides the row:
- No true member: if the unknown went true it would be the row's only true, so it is forced *false*.
- Exactly one true member: if the unknown went false the row would be left with exactly one true, so it is forced *true*.
- Two or more true members: the row is satisfied either way, and nothing is forced.

[Full](InferenceMode::Full) emits both deductions.
[Partial](InferenceMode::Partial) emits only the forced-true case, trading filtering strength for a cheaper sweep; it also disables the base-equality sweeps in the orchestrators.
The mode is fixed per propagator by [Config](crate::config::Config), never per equation.
*/

use crate::{
    db::matrix::XorMatrix,
    structures::{equation::EquationIndex, propagation::Propagation},
};

/// A completeness level for single-unknown deduction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InferenceMode {
    /// Emit every assignment the row determines.
    Full,

    /// Emit only assignments forced true.
    Partial,
}

impl InferenceMode {
    /// Appends to `propagations` whatever `equation` forces under this strategy.
    /// Reads the matrix without mutating it.
    pub fn infer(
        &self,
        matrix: &XorMatrix,
        equation: EquationIndex,
        propagations: &mut Vec<Propagation>,
    ) {
        if matrix.nb_unknowns(equation) != 1 {
            return;
        }
        // One unknown member exists, by the count just checked.
        let Some(variable) = matrix.first_unknown(equation) else {
            return;
        };

        match matrix.nb_trues(equation) {
            0 => {
                if let InferenceMode::Full = self {
                    propagations.push(Propagation {
                        variable,
                        value: false,
                    });
                }
            }
            1 => propagations.push(Propagation {
                variable,
                value: true,
            }),
            _ => {}
        }
    }
}
