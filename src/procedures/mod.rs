//! Procedures for establishing and revising the matrix.
//!
//! - [assign]: the two top-level orchestrators, pivot re-election, and the base-equality sweeps.
//! - [gauss]: initial normalisation to reduced echelon form.
//! - [inference]: the pluggable single-unknown deduction strategies.

pub mod assign;
pub mod gauss;
pub mod inference;
