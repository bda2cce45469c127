//! Equations, indices into the matrix rows.
//!
//! At construction an equation is given as the set of variables whose abstract XOR must hold; afterwards an equation is referred to only by index, with its live membership and counters held in the [matrix](crate::db::matrix::XorMatrix).
//!
//! An equation is *invalid* exactly when every member is fixed and exactly one is true.
//! An equation is *empty* when no member is true and none remain unknown, and is then eligible for removal.

/// An equation, identified by its index in `[0, nb_equations)`.
pub type EquationIndex = u32;
