//! Error types used in the library.
//!
//! - Some of these are internally expected --- e.g. a [Conflict](PropagationError::Conflict) is the primary signal the engine exists to produce, and the host recovers from it by retracting and branching elsewhere.
//! - Most of the others indicate a caller or internal invariant broken, and are very unlikely to occur during use.

/// A general error, wrapping the specific errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Build(BuildError),
    Propagation(PropagationError),
}

/// Noted errors while building a propagator from an equation system.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// An equation mentions a variable outside `[0, nb_variables)`.
    VariableOutOfBounds,

    /// An equation mentions the same variable twice; members form a set.
    RepeatedVariable,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// Noted errors during an assignment or retraction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PropagationError {
    /// Some equation reached the invalid state.
    /// This is expected from time to time; the failed frame has been rolled back and the host should branch elsewhere.
    Conflict,

    /// An assignment was requested for a variable which already holds a value.
    /// The host is expected to skip forced assignments which agree with the current state and to treat disagreement as a conflict of its own.
    AlreadyAssigned,

    /// No eligible replacement base was found for a non-empty pivot row.
    /// Unreachable while the echelon invariant holds; reported rather than guessed at.
    LostBasis,

    /// A retraction was requested with no committed frame to retract.
    EmptyTrail,
}

impl From<PropagationError> for ErrorKind {
    fn from(e: PropagationError) -> Self {
        ErrorKind::Propagation(e)
    }
}
