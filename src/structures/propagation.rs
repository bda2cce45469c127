//! Forced assignments, emitted by the engine for the host to instantiate.

use crate::structures::variable::Variable;

/// A forced assignment of `value` to `variable`, implied by the current matrix.
///
/// The engine does not apply these itself; the host is expected to push each one back through [assign](crate::propagator::Propagator::assign).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Propagation {
    /// The variable forced.
    pub variable: Variable,

    /// The value the variable is forced to.
    pub value: bool,
}

impl std::fmt::Display for Propagation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ← {}", self.variable, self.value)
    }
}
