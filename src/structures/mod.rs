//! The abstract elements of an XOR system: variables, equations, and forced assignments.

pub mod equation;
pub mod propagation;
pub mod variable;
