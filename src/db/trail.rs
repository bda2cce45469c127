/*!
Reversible actions and the trail which records them.

Every mutation of the [matrix](crate::db::matrix::XorMatrix) made during propagation goes through an [Action], a unit of work with a three-valued [Outcome] and an exact inverse.
A composite protocol (a whole true/false assignment) is a sequence of actions committed to the [Trail]; the trail remembers exactly which actions took effect, so that [cancel_frame](Trail::cancel_frame) can replay their inverses in reverse commit order, whether the protocol completed or failed partway.

Preconditions of an action are caller obligations and are checked with `debug_assert!`; the *normal* failure path is a postcondition — some row reaching the invalid state — reported as [LateFail](Outcome::LateFail) after the mutation took effect, so the failing action is still recorded for undo.
*/

use crate::{
    db::matrix::XorMatrix,
    misc::log::targets::{self},
    procedures::inference::InferenceMode,
    structures::{equation::EquationIndex, propagation::Propagation, variable::Variable},
    types::err::PropagationError,
};

/// An atomic, reversible unit of matrix mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Give `variable` the value `value`.
    /// Fails late if this leaves any row containing `variable` invalid.
    Fix { variable: Variable, value: bool },

    /// Replace row `target` with `target ⊕ pivot`.
    /// Fails early if `target` is already invalid, late if it becomes so.
    Xor {
        target: EquationIndex,
        pivot: EquationIndex,
    },

    /// Retire a fully determined equation.
    RemoveEquation { equation: EquationIndex },

    /// Detach a resolved (false) variable from every row.
    RemoveVariable { variable: Variable },

    /// Reassign the base of `equation` from `old` to `new`.
    SwapBase {
        equation: EquationIndex,
        old: Variable,
        new: Variable,
    },

    /// Run the inference strategy over `equation`, appending any forced assignments.
    /// Reads the matrix without mutating it.
    InferEquation { equation: EquationIndex },

    /// Append a forced assignment discovered outside the single-unknown rule.
    InferAssignment { variable: Variable, value: bool },
}

/// The outcome of applying an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The action took effect.
    Done,

    /// A precondition failed; nothing was mutated.
    EarlyFail,

    /// The action took effect and then a postcondition failed.
    /// The action must still be undone.
    LateFail,
}

impl Action {
    /// Applies the action to `matrix`, appending any forced assignments to `propagations`.
    pub fn apply(
        &self,
        matrix: &mut XorMatrix,
        inference: InferenceMode,
        propagations: &mut Vec<Propagation>,
    ) -> Outcome {
        match *self {
            Self::Fix { variable, value } => {
                debug_assert!(matrix.is_undefined(variable));
                matrix.fix(variable, value);
                for &equation in matrix.equations_of(variable) {
                    if matrix.is_invalid(equation) {
                        log::trace!(target: targets::TRAIL, "Fix {variable} ← {value} invalidated {equation}");
                        return Outcome::LateFail;
                    }
                }
                Outcome::Done
            }

            Self::Xor { target, pivot } => {
                if matrix.is_invalid(target) {
                    return Outcome::EarlyFail;
                }
                matrix.xor(target, pivot);
                match matrix.is_valid(target) {
                    true => Outcome::Done,
                    false => {
                        log::trace!(target: targets::TRAIL, "Xor {target} ⊕= {pivot} invalidated {target}");
                        Outcome::LateFail
                    }
                }
            }

            Self::RemoveEquation { equation } => {
                debug_assert!(matrix.nb_unknowns(equation) == 0);
                matrix.remove_equation(equation);
                Outcome::Done
            }

            Self::RemoveVariable { variable } => {
                debug_assert!(matrix.is_unused(variable));
                matrix.remove_variable(variable);
                Outcome::Done
            }

            Self::SwapBase { equation, old, new } => {
                debug_assert!(matrix.pivot_of(old) == Some(equation));
                debug_assert!(!matrix.is_base(new));
                matrix.set_off_base(old);
                matrix.set_base(equation, new);
                Outcome::Done
            }

            Self::InferEquation { equation } => {
                debug_assert!(matrix.is_valid(equation));
                inference.infer(matrix, equation, propagations);
                Outcome::Done
            }

            Self::InferAssignment { variable, value } => {
                propagations.push(Propagation { variable, value });
                Outcome::Done
            }
        }
    }

    /// Applies the specific inverse of the action.
    pub fn undo(&self, matrix: &mut XorMatrix) {
        match *self {
            Self::Fix { variable, .. } => matrix.unset(variable),
            // An involution; undo is a second application.
            Self::Xor { target, pivot } => matrix.xor(target, pivot),
            Self::RemoveEquation { equation } => matrix.restore_equation(equation),
            Self::RemoveVariable { variable } => matrix.restore_variable(variable),
            Self::SwapBase { equation, old, new } => {
                matrix.set_off_base(new);
                matrix.set_base(equation, old);
            }
            Self::InferEquation { .. } | Self::InferAssignment { .. } => {}
        }
    }
}

/// The committed-action log, with one frame per top-level assignment.
#[derive(Default)]
pub struct Trail {
    /// Every committed action, oldest first.
    /// Includes actions which failed late, as those mutated the matrix.
    actions: Vec<Action>,

    /// Indices at which a new frame begins.
    frames: Vec<usize>,
}

impl Trail {
    /// Begins a frame; subsequent commits belong to it until it is closed or cancelled.
    pub fn open_frame(&mut self) {
        self.frames.push(self.actions.len());
    }

    /// A count of open or committed frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// A count of committed actions, over all frames.
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Applies `action` and records it if it took effect.
    ///
    /// On any failure a [Conflict](PropagationError::Conflict) is returned and the current frame holds exactly the actions to undo; a late failure is recorded first, an early one mutated nothing and is not.
    pub fn commit(
        &mut self,
        action: Action,
        matrix: &mut XorMatrix,
        inference: InferenceMode,
        propagations: &mut Vec<Propagation>,
    ) -> Result<(), PropagationError> {
        match action.apply(matrix, inference, propagations) {
            Outcome::Done => {
                self.actions.push(action);
                Ok(())
            }
            Outcome::EarlyFail => Err(PropagationError::Conflict),
            Outcome::LateFail => {
                self.actions.push(action);
                Err(PropagationError::Conflict)
            }
        }
    }

    /// Undoes the most recent frame, in exact reverse commit order, and drops its mark.
    pub fn cancel_frame(&mut self, matrix: &mut XorMatrix) {
        let Some(mark) = self.frames.pop() else {
            debug_assert!(false, "cancel with no open frame");
            return;
        };
        log::trace!(target: targets::TRAIL, "Cancelling {} actions", self.actions.len() - mark);
        while self.actions.len() > mark {
            // The pop is guarded by the loop condition.
            if let Some(action) = self.actions.pop() {
                action.undo(matrix);
            }
        }
    }
}
