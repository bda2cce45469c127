//! Databases of 'things' relevant to a propagation: the matrix and the trail.

pub mod matrix;
pub mod trail;
