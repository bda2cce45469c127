//! Generic structures, independent of the domain.

pub mod sparse_set;
