//! A propagator for systems of abstract XOR constraints, built on incremental, reversible Gaussian elimination over GF(2).
//!
//! gauss_xor maintains a sparse boolean matrix in reduced echelon form while a host backtracking search fixes variables one at a time, detecting contradictions as early as possible, emitting forced assignments, and undoing all of its own mutations exactly when the search backtracks.
//!
//! The intended client is a differential cryptanalysis search: cipher models (AES, Midori, Skinny, …) compile each linear relation among difference bits into an equation over boolean variables, with the *abstract XOR* reading — an equation is violated exactly when exactly one of its members is true and none remain unknown.
//! Model construction, the search heuristics, and reporting all live in the host; this crate owns only the constraint engine.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [propagator](crate::propagator::Propagator), which owns:
//! - A [matrix](crate::db::matrix::XorMatrix) storing variable truth states, live row/column membership, per-row counters, and the basis (pivot) maps.
//! - A [trail](crate::db::trail::Trail) of committed reversible [actions](crate::db::trail::Action), grouped into one frame per top-level assignment.
//! - A [configuration](crate::config) fixing the [inference strategy](crate::procedures::inference::InferenceMode) for the lifetime of the propagator.
//!
//! The host drives the engine through a narrow contract:
//! - [assign](crate::propagator::Propagator::assign) when a variable's domain collapses to a value; on success the returned forced assignments must themselves be pushed through [assign](crate::propagator::Propagator::assign), and on [Conflict](crate::types::err::PropagationError::Conflict) the frame has already been rolled back.
//! - [retract](crate::propagator::Propagator::retract) to undo the most recent committed assignment when a branch is abandoned, in exact reverse commit order.
//!
//! Useful starting points:
//! - The [assignment orchestrators](crate::procedures::assign) for the dynamics of a propagation step, including pivot re-election.
//! - The [matrix](crate::db::matrix) for the data considered during a step and the invariants it maintains.
//! - The [trail](crate::db::trail) for how every mutation is made reversible.
//!
//! # Example
//!
//! ```rust
//! use gauss_xor::config::Config;
//! use gauss_xor::propagator::Propagator;
//!
//! // a ⊕ b ⊕ c = 0 and c ⊕ d ⊕ e = 0, in the abstract reading.
//! let equations = vec![vec![0, 1, 2], vec![2, 3, 4]];
//! let mut propagator = Propagator::new(5, &equations, Config::default()).unwrap();
//!
//! // a ← false: nothing is forced yet.
//! assert!(propagator.assign(0, false).unwrap().is_empty());
//!
//! // b ← false: the first equation forces c ← false.
//! let forced = propagator.assign(1, false).unwrap().to_vec();
//! assert_eq!(forced.len(), 1);
//! assert_eq!((forced[0].variable, forced[0].value), (2, false));
//!
//! // The host instantiates what was forced, recursively.
//! assert!(propagator.assign(2, false).unwrap().is_empty());
//!
//! // d ← true: the second equation now forces e ← true.
//! let forced = propagator.assign(3, true).unwrap().to_vec();
//! assert_eq!((forced[0].variable, forced[0].value), (4, true));
//!
//! // Backtrack in reverse commit order.
//! while propagator.depth() > 0 {
//!     propagator.retract().unwrap();
//! }
//! assert_eq!(propagator.value_of(0), None);
//! ```
//!
//! # Logs
//!
//! Detailed calls to [log!](log) are made on the propagation paths, with a variety of targets defined in [misc::log] to help narrow output to relevant parts of the library.
//! No log implementation is provided; as logging is compiled out of release builds, logs are verbose.

pub mod config;
pub mod db;
pub mod generic;
pub mod misc;
pub mod procedures;
pub mod propagator;
pub mod structures;
pub mod types;
