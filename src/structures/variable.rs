//! Variables, indices into the matrix columns.
//!
//! A variable is created once at model-build time and carries no payload of its own; its truth state, row memberships, and basis role are all recorded in the [matrix](crate::db::matrix::XorMatrix).

/// A variable, identified by its index in `[0, nb_variables)`.
pub type Variable = u32;
