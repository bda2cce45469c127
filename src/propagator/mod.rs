/*!
The propagator: the public face of the engine.

A [Propagator] owns the [matrix](crate::db::matrix::XorMatrix), the [trail](crate::db::trail::Trail), and a buffer of forced assignments, and exposes the two operations a search procedure drives it with:

- [assign](Propagator::assign) fixes a variable, runs the matching orchestration protocol, and either returns the assignments forced as a consequence or reports a conflict — in which case the matrix is exactly as it was before the call.
- [retract](Propagator::retract) undoes the most recent surviving assignment, together with everything it entailed.

Each successful call to [assign](Propagator::assign) opens a fresh frame on the trail, so calls nest and retract in strict LIFO order.

The caller is responsible for acting on the returned assignments: the propagator reports them, it does not apply them.
Feeding a forced assignment back through [assign](Propagator::assign) is the expected way to take it into account.
*/

use crate::{
    config::Config,
    db::{matrix::XorMatrix, trail::{Action, Trail}},
    misc::log::targets::{self},
    procedures::gauss,
    structures::{equation::EquationIndex, propagation::Propagation, variable::Variable},
    types::err::{BuildError, PropagationError},
};

pub struct Propagator {
    pub(crate) matrix: XorMatrix,
    pub(crate) trail: Trail,
    pub(crate) config: Config,
    pub(crate) propagations: Vec<Propagation>,
    pub(crate) scratch: Vec<EquationIndex>,
}

impl Propagator {
    /// A propagator over `nb_variables` variables constrained by the given XOR equations,
    /// each equation a set of variable indices.
    ///
    /// The system is brought to reduced echelon form during construction.
    pub fn new(
        nb_variables: usize,
        equations: &[Vec<Variable>],
        config: Config,
    ) -> Result<Self, BuildError> {
        let mut matrix = XorMatrix::new(nb_variables, equations)?;
        gauss::echelonize(&mut matrix);
        debug_assert!(matrix.stable_state());

        Ok(Propagator {
            matrix,
            trail: Trail::default(),
            config,
            propagations: Vec::default(),
            scratch: Vec::default(),
        })
    }

    /// Fixes `variable` to `value` and propagates.
    ///
    /// On success the returned slice holds every assignment forced as a consequence, in
    /// the order derived.
    /// The slice is valid until the next call to [assign](Propagator::assign).
    ///
    /// On conflict every effect of the call has been undone before the error is returned.
    pub fn assign(
        &mut self,
        variable: Variable,
        value: bool,
    ) -> Result<&[Propagation], PropagationError> {
        if self.matrix.value_of(variable).is_some() {
            return Err(PropagationError::AlreadyAssigned);
        }
        log::trace!(target: targets::PROPAGATION, "Assign: {variable} ← {value}");

        self.propagations.clear();
        self.trail.open_frame();

        let result = match value {
            true => self.apply_true(variable),
            false => self.apply_false(variable),
        };

        match result {
            Ok(()) => {
                debug_assert!(self.matrix.stable_state());
                Ok(&self.propagations)
            }
            Err(error) => {
                log::trace!(target: targets::PROPAGATION, "Conflict on {variable} ← {value}");
                self.trail.cancel_frame(&mut self.matrix);
                debug_assert!(self.matrix.stable_state());
                Err(error)
            }
        }
    }

    /// Undoes the most recent surviving assignment and everything it entailed.
    pub fn retract(&mut self) -> Result<(), PropagationError> {
        if self.trail.frame_count() == 0 {
            return Err(PropagationError::EmptyTrail);
        }
        self.trail.cancel_frame(&mut self.matrix);
        debug_assert!(self.matrix.stable_state());
        Ok(())
    }

    /// Count of assignments surviving on the trail.
    pub fn depth(&self) -> usize {
        self.trail.frame_count()
    }

    /// The value of `variable`, if fixed.
    pub fn value_of(&self, variable: Variable) -> Option<bool> {
        self.matrix.value_of(variable)
    }

    /// A view of the equation system.
    pub fn matrix(&self) -> &XorMatrix {
        &self.matrix
    }

    /// Commits `action` to the trail against the matrix.
    pub(crate) fn commit(&mut self, action: Action) -> Result<(), PropagationError> {
        self.trail.commit(
            action,
            &mut self.matrix,
            self.config.inference,
            &mut self.propagations,
        )
    }
}
