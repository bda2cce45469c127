/*!
The assignment orchestrators: the two protocols behind [assign](crate::propagator::Propagator::assign).

Each protocol is a chain of [actions](crate::db::trail::Action) committed to the trail one by one.
The chain either completes, leaving forced assignments in the propagation buffer, or fails partway, in which case [assign](crate::propagator::Propagator::assign) cancels the frame and every committed step is undone in reverse.

# Variable became true

Fix the variable.
If it is a base, only its own pivot row can newly determine anything, so inference runs there alone; otherwise inference runs over every row containing the variable.
In full mode, a base variable turning true additionally opens the base-equality sweep: any other row with the same off-base member set as the pivot row, and counters offset by exactly the base's contribution, encodes the equality of the two base variables, so its base is forced true as well.

# Variable became false

Fix the variable, then infer as above.
A base variable fixed false loses its pivot row: if the row is now empty it is retired, otherwise a replacement base is elected and XOR-eliminated from every other row containing it, restoring the reduced-echelon invariant — with inference re-run after each elimination, since an elimination may leave a row with a single unknown, or invalid.
The variable, now resolved and inert, is detached from the matrix; in full mode a final base-equality sweep runs over the rows that contained it, in both counter directions.
*/

use crate::{
    db::trail::Action,
    misc::log::targets::{self},
    procedures::inference::InferenceMode,
    propagator::Propagator,
    structures::{equation::EquationIndex, variable::Variable},
    types::err::PropagationError,
};

impl Propagator {
    /// The protocol for a variable fixed true.
    pub(crate) fn apply_true(&mut self, variable: Variable) -> Result<(), PropagationError> {
        self.commit(Action::Fix {
            variable,
            value: true,
        })?;

        match self.matrix.pivot_of(variable) {
            Some(pivot) => {
                self.commit(Action::InferEquation { equation: pivot })?;
                if self.config.inference == InferenceMode::Full {
                    self.infer_base_equalities(pivot)?;
                }
            }
            None => self.infer_rows_of(variable)?,
        }

        Ok(())
    }

    /// The protocol for a variable fixed false.
    pub(crate) fn apply_false(&mut self, variable: Variable) -> Result<(), PropagationError> {
        self.commit(Action::Fix {
            variable,
            value: false,
        })?;

        match self.matrix.pivot_of(variable) {
            Some(pivot) => {
                self.commit(Action::InferEquation { equation: pivot })?;
                if self.matrix.is_empty(pivot) {
                    self.commit(Action::RemoveEquation { equation: pivot })?;
                } else {
                    self.reelect_base(pivot, variable)?;
                }
            }
            None => self.infer_rows_of(variable)?,
        }

        self.commit(Action::RemoveVariable { variable })?;

        if self.config.inference == InferenceMode::Full {
            self.infer_all_base_equalities(variable)?;
        }

        Ok(())
    }

    /// Runs inference over every active row containing `variable`.
    fn infer_rows_of(&mut self, variable: Variable) -> Result<(), PropagationError> {
        // Inference actions read the matrix without mutating it, so the column is stable.
        for position in 0..self.matrix.occurrence_count(variable) {
            let equation = self.matrix.equations_of(variable)[position];
            self.commit(Action::InferEquation { equation })?;
        }
        Ok(())
    }

    /// Replaces the base of `pivot` after `old` was fixed false, and eliminates the
    /// replacement from every other row to restore the echelon invariant.
    fn reelect_base(
        &mut self,
        pivot: EquationIndex,
        old: Variable,
    ) -> Result<(), PropagationError> {
        let new = match self.matrix.eligible_base(pivot) {
            Some(variable) => variable,
            None => {
                // A non-empty pivot row always offers a replacement while the echelon
                // invariant holds; see the notes on PropagationError::LostBasis.
                debug_assert!(false, "no eligible base for non-empty row {pivot}");
                return Err(PropagationError::LostBasis);
            }
        };
        log::trace!(target: targets::BASIS, "Base of {pivot}: {old} → {new}");

        self.commit(Action::SwapBase {
            equation: pivot,
            old,
            new,
        })?;

        // Snapshot the column of the new base: each elimination removes its row from it.
        let mut column = std::mem::take(&mut self.scratch);
        column.clear();
        column.extend_from_slice(self.matrix.equations_of(new));

        let mut outcome = Ok(());
        for &target in &column {
            if target == pivot {
                continue;
            }
            outcome = self
                .commit(Action::Xor { target, pivot })
                .and_then(|()| self.commit(Action::InferEquation { equation: target }));
            if outcome.is_err() {
                break;
            }
        }

        self.scratch = column;
        outcome
    }

    /// The base-equality sweep around `pivot`, run when the base of `pivot` turned true.
    ///
    /// Rows sharing the pivot row's off-base member set with counters offset by exactly
    /// the base's contribution have a base equal to the pivot's, hence forced true.
    fn infer_base_equalities(&mut self, pivot: EquationIndex) -> Result<(), PropagationError> {
        match self.matrix.base_variable_of(pivot) {
            Some(base) if self.matrix.is_true(base) => {}
            _ => return Ok(()),
        }
        let Some(off_base) = self.matrix.first_off_base(pivot) else {
            return Ok(());
        };

        // Only inference actions are committed below, so the columns read are stable.
        for position in 0..self.matrix.occurrence_count(off_base) {
            let target = self.matrix.equations_of(off_base)[position];
            let Some(target_base) = self.matrix.base_variable_of(target) else {
                continue;
            };
            if !self.matrix.is_true(target_base)
                && self.matrix.nb_unknowns(target) == self.matrix.nb_unknowns(pivot) + 1
                && self.matrix.nb_trues(target) + 1 == self.matrix.nb_trues(pivot)
                && self.matrix.same_off_base_variables(target, pivot)
            {
                log::trace!(target: targets::PROPAGATION, "Base equality: {target_base} matches base of {pivot}");
                self.commit(Action::InferAssignment {
                    variable: target_base,
                    value: true,
                })?;
            }
        }
        Ok(())
    }

    /// The generalised base-equality sweep over every row that contained `variable`,
    /// run after `variable` was resolved false and detached.
    ///
    /// Runs in both counter directions: a true base forces the matching row's base true,
    /// and a row with a true base matching a pivot row forces the pivot row's own base.
    fn infer_all_base_equalities(&mut self, variable: Variable) -> Result<(), PropagationError> {
        // The detached variable keeps its column, which lists the rows it occupied.
        for position in 0..self.matrix.occurrence_count(variable) {
            let pivot = self.matrix.equations_of(variable)[position];
            let Some(base) = self.matrix.base_variable_of(pivot) else {
                continue;
            };
            let Some(off_base) = self.matrix.first_off_base(pivot) else {
                continue;
            };

            if self.matrix.is_true(base) {
                for target_position in 0..self.matrix.occurrence_count(off_base) {
                    let target = self.matrix.equations_of(off_base)[target_position];
                    let Some(target_base) = self.matrix.base_variable_of(target) else {
                        continue;
                    };
                    if !self.matrix.is_true(target_base)
                        && self.matrix.nb_unknowns(target) == self.matrix.nb_unknowns(pivot) + 1
                        && self.matrix.nb_trues(target) + 1 == self.matrix.nb_trues(pivot)
                        && self.matrix.same_off_base_variables(target, pivot)
                    {
                        self.commit(Action::InferAssignment {
                            variable: target_base,
                            value: true,
                        })?;
                    }
                }
            } else {
                for target_position in 0..self.matrix.occurrence_count(off_base) {
                    let target = self.matrix.equations_of(off_base)[target_position];
                    let Some(target_base) = self.matrix.base_variable_of(target) else {
                        continue;
                    };
                    if self.matrix.is_true(target_base)
                        && self.matrix.nb_unknowns(target) + 1 == self.matrix.nb_unknowns(pivot)
                        && self.matrix.nb_trues(target) == self.matrix.nb_trues(pivot) + 1
                        && self.matrix.same_off_base_variables(target, pivot)
                    {
                        self.commit(Action::InferAssignment {
                            variable: base,
                            value: true,
                        })?;
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
