/*!
Configuration of a propagator.

A configuration is read once, when a propagator is built.
The inference mode cannot change mid-search, as retraction must replay the exact inverse of what was committed.
*/

use crate::procedures::inference::InferenceMode;

/// The primary configuration structure.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Which inference strategy to apply when a row's unknown count drops to one.
    pub inference: InferenceMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            inference: InferenceMode::Full,
        }
    }
}
